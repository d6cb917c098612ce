//! ANSI output of finished frames
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    QueueableCommand,
};
use std::io::{self, Write};
use tmesh_core::framebuffer::{intensity_char, ColorBuffer, FrameBuffer};

/// Row terminator; the carriage return keeps rows aligned in raw mode
const ROW_END: &str = "\r\n";

/// Write a grid of shade characters, starting at the top-left cell
pub fn draw_shades<W: Write>(writer: &mut W, shades: &FrameBuffer<u8>) -> io::Result<()> {
    writer.queue(cursor::MoveTo(0, 0))?;
    for row in shades.rows() {
        writer.write_all(row)?;
        writer.queue(Print(ROW_END))?;
    }
    Ok(())
}

/// Write 24-bit color pixels as background-colored spaces
pub fn draw_color<W: Write>(writer: &mut W, pixels: &ColorBuffer) -> io::Result<()> {
    writer.queue(cursor::MoveTo(0, 0))?;
    for row in pixels.rows() {
        for pixel in row {
            writer.queue(SetBackgroundColor(Color::Rgb {
                r: pixel.r,
                g: pixel.g,
                b: pixel.b,
            }))?;
            writer.queue(Print(' '))?;
        }
        writer.queue(ResetColor)?;
        writer.queue(Print(ROW_END))?;
    }
    Ok(())
}

/// Write color pixels as shade characters by their average intensity
pub fn draw_ascii<W: Write>(writer: &mut W, pixels: &ColorBuffer) -> io::Result<()> {
    writer.queue(cursor::MoveTo(0, 0))?;
    let mut line = Vec::with_capacity(pixels.width());
    for row in pixels.rows() {
        line.clear();
        line.extend(row.iter().map(|pixel| {
            let gray = (pixel.r as u16 + pixel.g as u16 + pixel.b as u16) / 3;
            intensity_char(gray as u8)
        }));
        writer.write_all(&line)?;
        writer.queue(Print(ROW_END))?;
    }
    Ok(())
}

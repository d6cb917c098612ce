//! Terminal front end: runs an animated scene full-screen until cancelled
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self},
};
use log::{debug, info, warn};
use std::io::{self, stdout, BufWriter, Write};
use std::time::{Duration, Instant};

pub mod args;
pub mod display;
pub mod scenes;

pub use scenes::{Animation, CastScene, ColorOutput, RasterScene};

/// Pacing and stopping rules for the render loop
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopOptions {
    /// Minimum time between frames; `None` renders as fast as possible
    pub frame_interval: Option<Duration>,
    /// Stop after this many frames; `None` runs until cancelled
    pub max_frames: Option<u64>,
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp<A> {
    animation: A,
    options: LoopOptions,
    running: bool,
    frames: u64,
    last_report: Instant,
    frames_since_report: u32,
}

impl<A: Animation> TerminalApp<A> {
    pub fn new(animation: A, options: LoopOptions) -> Self {
        Self {
            animation,
            options,
            running: true,
            frames: 0,
            last_report: Instant::now(),
            frames_since_report: 0,
        }
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Take over the terminal and animate until cancelled.
    ///
    /// The terminal is restored before returning, whether or not the loop
    /// failed.
    pub fn run(&mut self) -> io::Result<()> {
        let (columns, rows) = terminal::size()?;
        let (width, height) = self.animation.frame_size();
        if width > columns as usize || height > rows as usize {
            warn!(
                "terminal is {}x{} but frames are {}x{}; output will wrap",
                columns, rows, width, height
            );
        }

        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();
        let restored = restore_terminal();

        info!("stopped after {} frames", self.frames);
        first_error([result, restored])
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let mut out = BufWriter::new(stdout().lock());

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::ZERO)? {
                let event = event::read()?;
                self.handle_event(&event);
            }
            if !self.running {
                break;
            }

            self.step(&mut out)?;

            // Frame timing
            if let Some(interval) = self.options.frame_interval {
                let elapsed = frame_start.elapsed();
                if elapsed < interval {
                    std::thread::sleep(interval - elapsed);
                }
            }

            self.report_fps();
        }

        Ok(())
    }

    /// Render one full frame to `out`, then advance the animation
    pub fn step<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.animation.render_frame(out)?;
        out.flush()?;
        self.animation.advance();

        self.frames += 1;
        self.frames_since_report += 1;
        if self.options.max_frames.is_some_and(|max| self.frames >= max) {
            self.running = false;
        }
        Ok(())
    }

    /// React to a terminal event; `q`, `Esc` and `Ctrl-C` stop the loop
    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    self.running = false
                }
                _ => {}
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn report_fps(&mut self) {
        let now = Instant::now();
        let elapsed = now - self.last_report;
        if elapsed.as_secs() >= 1 {
            debug!(
                "{:.1} fps",
                self.frames_since_report as f32 / elapsed.as_secs_f32()
            );
            self.frames_since_report = 0;
            self.last_report = now;
        }
    }
}

/// Leave raw mode and the alternate screen. Both steps run even if the first
/// one fails.
fn restore_terminal() -> io::Result<()> {
    let raw = terminal::disable_raw_mode();
    let screen = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);
    first_error([raw, screen])
}

fn first_error<const N: usize>(results: [io::Result<()>; N]) -> io::Result<()> {
    results.into_iter().collect()
}

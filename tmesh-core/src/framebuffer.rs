//! Pixel grids written by the renderers and read by the display driver
use rgb::RGB8;

/// Shade characters from darkest to brightest
pub const SHADE_GRADIENT: &[u8; 10] = b".,:~=+*#%@";

/// Shade written where nothing was drawn
pub const BLANK: u8 = b' ';

/// Gradient character for `index`, clamped to the gradient's bounds
pub fn gradient_char(index: i32) -> u8 {
    SHADE_GRADIENT[index.clamp(0, SHADE_GRADIENT.len() as i32 - 1) as usize]
}

/// Gradient character for a gray level in `0..=255`
pub fn intensity_char(gray: u8) -> u8 {
    SHADE_GRADIENT[gray as usize * SHADE_GRADIENT.len() / 256]
}

/// Row-major 2D grid of pixels
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer<P> {
    width: usize,
    height: usize,
    pixels: Vec<P>,
}

impl<P: Copy> FrameBuffer<P> {
    pub fn new(width: usize, height: usize, fill: P) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn fill(&mut self, value: P) {
        self.pixels.fill(value);
    }

    pub fn get(&self, x: usize, y: usize) -> P {
        self.pixels[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: P) {
        self.pixels[y * self.width + x] = value;
    }

    pub fn row(&self, y: usize) -> &[P] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[P]> {
        // chunks_exact panics on zero, and a zero-width grid has no pixels anyway
        self.pixels.chunks_exact(self.width.max(1))
    }

    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }
}

/// Nearest depth drawn so far for each pixel; larger is nearer
pub type DepthBuffer = FrameBuffer<f32>;

/// 24-bit color pixels
pub type ColorBuffer = FrameBuffer<RGB8>;

/// Shade characters with a parallel depth buffer, as used by the rasterizer
#[derive(Debug, Clone)]
pub struct ShadeTarget {
    pub shades: FrameBuffer<u8>,
    pub depth: DepthBuffer,
}

impl ShadeTarget {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            shades: FrameBuffer::new(width, height, BLANK),
            depth: FrameBuffer::new(width, height, f32::NEG_INFINITY),
        }
    }

    pub fn width(&self) -> usize {
        self.shades.width()
    }

    pub fn height(&self) -> usize {
        self.shades.height()
    }

    /// Reset every pixel to blank and every depth to "nothing drawn"
    pub fn clear(&mut self) {
        self.shades.fill(BLANK);
        self.depth.fill(f32::NEG_INFINITY);
    }
}

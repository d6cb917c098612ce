//! Flat-shaded scanline rasterizer writing shade characters
use nalgebra::Vector3;

use crate::config::RasterConfig;
use crate::framebuffer::{gradient_char, ShadeTarget};
use crate::geometry::IndexedMesh;
use crate::projection::ScreenMapping;
use crate::transform::YawPitch;

/// Gradient index for a view-space normal.
///
/// Light comes from the upper right front; after the screen-space Y flip that
/// is `(1, -1, 1)`, so the Y weight is negated.
pub fn shade_index(normal: &Vector3<f32>) -> i32 {
    let lit = normal.x * 0.57 - normal.y * 0.57 + normal.z * 0.57;
    ((lit + 0.95) * 5.0).floor() as i32
}

/// Gradient character for a view-space normal
pub fn shade_for_normal(normal: &Vector3<f32>) -> u8 {
    gradient_char(shade_index(normal))
}

/// Renders meshes into an owned [`ShadeTarget`]
pub struct Rasterizer {
    target: ShadeTarget,
    mapping: ScreenMapping,
}

impl Rasterizer {
    pub fn new(config: &RasterConfig) -> Self {
        Self {
            target: ShadeTarget::new(config.width, config.height),
            mapping: ScreenMapping::new(config.height, config.char_aspect, config.model_scale),
        }
    }

    pub fn target(&self) -> &ShadeTarget {
        &self.target
    }

    pub fn clear(&mut self) {
        self.target.clear();
    }

    /// Draw a full frame of `mesh` seen through `view`
    pub fn render(&mut self, mesh: &IndexedMesh, view: &YawPitch) {
        self.clear();

        for triangle in mesh.triangles() {
            let shade = shade_for_normal(&view.apply(&triangle.normal));
            let points = triangle
                .vertices
                .map(|v| self.mapping.map(&view.apply(&v)));

            self.fill_triangle(points, shade);
        }
    }

    /// Scan-convert a triangle given in screen coordinates.
    ///
    /// The whole triangle is depth tested against the top vertex's z, and a
    /// pixel is written only where that z is greater than the stored depth.
    /// Scanlines outside the target are never visited, so the cost stays
    /// bounded however far the vertices lie off screen.
    pub fn fill_triangle(&mut self, points: [Vector3<f32>; 3], value: u8) {
        let [mut a, mut b, mut c] = points;

        // sort so that a is the top vertex and c the bottom one
        if a.y > c.y {
            std::mem::swap(&mut a, &mut c);
        }
        if b.y > c.y {
            std::mem::swap(&mut b, &mut c);
        }
        if a.y > b.y {
            std::mem::swap(&mut a, &mut b);
        }

        let width = self.target.width() as i32;
        let height = self.target.height() as i32;
        let (beg_y, mid_y, end_y) = (a.y as i32, b.y as i32, c.y as i32);

        // x step per scanline along the long edge and the current short edge.
        // Row differences are taken in f64 since far-off vertices saturate to
        // the ends of the i32 range.
        let slope = |from: &Vector3<f32>, to: &Vector3<f32>, from_y: i32, to_y: i32| {
            if from_y == to_y {
                0.0
            } else {
                (f64::from(from.x - to.x) / (f64::from(from_y) - f64::from(to_y))) as f32
            }
        };
        let step_full = slope(&a, &c, beg_y, end_y);
        let step_upper = slope(&a, &b, beg_y, mid_y);
        let step_lower = slope(&b, &c, mid_y, end_y);

        // rows above the screen are skipped in one go rather than walked
        let first_y = beg_y.max(0);
        let rows = |from: i32, to: i32| f64::from(to) - f64::from(from);
        let advance =
            |x: f32, step: f32, count: f64| (f64::from(x) + f64::from(step) * count) as f32;

        let mut x_full = advance(a.x, step_full, rows(beg_y, first_y));
        let (mut x_half, mut step_half) = if first_y > mid_y {
            let at_mid = advance(a.x, step_upper, rows(beg_y, mid_y));
            (advance(at_mid, step_lower, rows(mid_y, first_y)), step_lower)
        } else {
            (advance(a.x, step_upper, rows(beg_y, first_y)), step_upper)
        };

        for y in first_y..=end_y.min(height - 1) {
            let left = x_full.min(x_half).max(0.0) as i32;
            let right = x_full.max(x_half).min((width - 1) as f32) as i32;
            for x in left..=right {
                let (x, y) = (x as usize, y as usize);
                if a.z > self.target.depth.get(x, y) {
                    self.target.shades.set(x, y, value);
                    self.target.depth.set(x, y, a.z);
                }
            }

            if y == mid_y {
                step_half = step_lower;
            }

            x_full += step_full;
            x_half += step_half;
        }
    }
}

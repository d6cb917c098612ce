//! Model-to-screen mapping for the rasterizer and the ray caster's camera
use std::f32::consts::FRAC_PI_2;

use nalgebra::Vector3;

use crate::transform::{rotate_x, rotate_y};

/// Maps normalized model space `[-1, 1]` onto character cells.
///
/// Horizontal extent is derived from the height and the character aspect
/// ratio so that the model keeps its proportions in a terminal whose cells
/// are taller than they are wide.
#[derive(Debug, Clone, Copy)]
pub struct ScreenMapping {
    x_shift: f32,
    y_shift: f32,
    model_scale: f32,
}

impl ScreenMapping {
    pub fn new(height: usize, char_aspect: f32, model_scale: f32) -> Self {
        Self {
            x_shift: (height as f32 * char_aspect / 2.0).floor(),
            y_shift: (height / 2) as f32,
            model_scale,
        }
    }

    /// Screen position of `v`; z passes through untouched for depth testing
    pub fn map(&self, v: &Vector3<f32>) -> Vector3<f32> {
        Vector3::new(
            v.x * self.x_shift * self.model_scale + self.x_shift,
            v.y * self.y_shift * self.model_scale + self.y_shift,
            v.z,
        )
    }
}

/// Pinhole camera at the origin looking down -Z
#[derive(Debug, Clone, Copy)]
pub struct RayCamera {
    width: usize,
    height: usize,
    fov: f32,
}

impl RayCamera {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            fov: FRAC_PI_2,
        }
    }

    /// Angular offsets `(xa, ya)` of the pixel from straight ahead
    pub fn pixel_angles(&self, x: usize, y: usize) -> (f32, f32) {
        let xa = (x as f32 / self.width as f32 - 0.5) * self.fov;
        let ya = (y as f32 / self.height as f32 - 0.5) * self.fov;
        (xa, ya)
    }

    /// Unit direction of the ray through pixel `(x, y)`
    pub fn ray_direction(&self, x: usize, y: usize) -> Vector3<f32> {
        let (xa, ya) = self.pixel_angles(x, y);
        rotate_y(&rotate_x(&-Vector3::z(), xa), ya)
    }
}

//! Animated scenes: a mesh, a render pipeline and the rotation advancing it
use nalgebra::Vector3;
use std::io::{self, Write};
use tmesh_core::{
    CasterConfig, IndexedMesh, Mesh, RasterConfig, Rasterizer, RayCaster, RotationState, Transform,
    YawPitch,
};

use crate::display;

/// One frame of output at a time, then a step of the animation
pub trait Animation {
    /// Frame size in terminal cells, `(columns, rows)`
    fn frame_size(&self) -> (usize, usize);

    /// Render the current frame and write it out in full
    fn render_frame<W: Write>(&mut self, writer: &mut W) -> io::Result<()>;

    /// Move the animation on by one frame
    fn advance(&mut self);
}

/// Spinning mesh drawn by the scanline rasterizer as shade characters
pub struct RasterScene {
    mesh: IndexedMesh,
    rasterizer: Rasterizer,
    config: RasterConfig,
    yaw: f32,
    pitch: f32,
}

impl RasterScene {
    pub fn new(mesh: IndexedMesh, config: RasterConfig) -> Self {
        Self {
            rasterizer: Rasterizer::new(&config),
            mesh,
            config,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn angles(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }
}

impl Animation for RasterScene {
    fn frame_size(&self) -> (usize, usize) {
        (self.config.width, self.config.height)
    }

    fn render_frame<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.rasterizer
            .render(&self.mesh, &YawPitch::new(self.yaw, self.pitch));
        display::draw_shades(writer, &self.rasterizer.target().shades)
    }

    fn advance(&mut self) {
        self.yaw += self.config.yaw_rate;
        self.pitch += self.config.pitch_rate;
    }
}

/// How the ray caster's gray levels reach the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOutput {
    /// Background-colored cells
    TrueColor,
    /// Shade characters
    Ascii,
}

/// Spinning mesh drawn by the ray caster
pub struct CastScene {
    mesh: Mesh,
    caster: RayCaster,
    config: CasterConfig,
    output: ColorOutput,
    angle: f32,
}

impl CastScene {
    pub fn new(mesh: Mesh, config: CasterConfig, output: ColorOutput) -> Self {
        Self {
            caster: RayCaster::new(&config),
            mesh,
            angle: config.spin_step,
            config,
            output,
        }
    }

    /// Current model rotation: the spin angle scaled per axis
    pub fn rotation(&self) -> RotationState {
        let angles: Vector3<f32> = self.config.spin_axes * self.angle;
        RotationState::new(angles.x, angles.y, angles.z)
    }
}

impl Animation for CastScene {
    fn frame_size(&self) -> (usize, usize) {
        (self.config.width, self.config.height)
    }

    fn render_frame<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        let transform = Transform::new(&self.rotation(), self.config.offset);
        self.caster.render(&self.mesh, &transform);

        match self.output {
            ColorOutput::TrueColor => display::draw_color(writer, self.caster.pixels()),
            ColorOutput::Ascii => display::draw_ascii(writer, self.caster.pixels()),
        }
    }

    fn advance(&mut self) {
        self.angle += self.config.spin_step;
    }
}

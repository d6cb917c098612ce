//! Command-line arguments shared by the two demos
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tmesh_core::{CasterConfig, HitPolicy, RasterConfig};

use crate::scenes::ColorOutput;

#[derive(clap::Args, Debug)]
pub struct CommonArgs {
    /// Mesh file with `v x y z` and `f a b c` lines
    #[arg(value_name = "MESH")]
    pub mesh_path: PathBuf,

    /// Frame width in terminal cells
    #[arg(long)]
    pub width: Option<usize>,

    /// Frame height in terminal cells
    #[arg(long)]
    pub height: Option<usize>,

    /// Cap on frames per second; uncapped when omitted
    #[arg(long)]
    pub fps: Option<u32>,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,
}

impl CommonArgs {
    /// Minimum time between frames, if capped
    pub fn frame_interval(&self) -> Option<Duration> {
        self.fps
            .filter(|&fps| fps > 0)
            .map(|fps| Duration::from_secs(1) / fps)
    }
}

/// Spin a mesh in the terminal with the scanline rasterizer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct RasterArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Height-to-width ratio of a terminal cell
    #[arg(long)]
    pub char_aspect: Option<f32>,

    /// Fraction of the half-height the [-1, 1] model extent fills
    #[arg(long)]
    pub model_scale: Option<f32>,

    /// Yaw added per frame, in radians
    #[arg(long, allow_negative_numbers = true)]
    pub yaw_rate: Option<f32>,

    /// Pitch added per frame, in radians
    #[arg(long, allow_negative_numbers = true)]
    pub pitch_rate: Option<f32>,
}

impl RasterArgs {
    pub fn config(&self) -> RasterConfig {
        let defaults = RasterConfig::default();
        RasterConfig {
            width: self.common.width.unwrap_or(defaults.width),
            height: self.common.height.unwrap_or(defaults.height),
            char_aspect: self.char_aspect.unwrap_or(defaults.char_aspect),
            model_scale: self.model_scale.unwrap_or(defaults.model_scale),
            yaw_rate: self.yaw_rate.unwrap_or(defaults.yaw_rate),
            pitch_rate: self.pitch_rate.unwrap_or(defaults.pitch_rate),
        }
    }
}

/// Spin a mesh in the terminal with the ray caster
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CastArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Distance from the eye to the model's origin
    #[arg(long)]
    pub distance: Option<f32>,

    /// Spin angle added per frame, in radians
    #[arg(long, allow_negative_numbers = true)]
    pub spin_step: Option<f32>,

    /// Draw shade characters instead of 24-bit colored cells
    #[arg(long)]
    pub ascii: bool,

    /// Shade each pixel by the nearest triangle rather than the first hit
    #[arg(long)]
    pub nearest: bool,
}

impl CastArgs {
    pub fn config(&self) -> CasterConfig {
        let defaults = CasterConfig::default();
        let mut offset = defaults.offset;
        if let Some(distance) = self.distance {
            offset.z = distance;
        }

        CasterConfig {
            width: self.common.width.unwrap_or(defaults.width),
            height: self.common.height.unwrap_or(defaults.height),
            offset,
            spin_step: self.spin_step.unwrap_or(defaults.spin_step),
            hit_policy: if self.nearest {
                HitPolicy::Nearest
            } else {
                HitPolicy::FirstInOrder
            },
            ..defaults
        }
    }

    pub fn output(&self) -> ColorOutput {
        if self.ascii {
            ColorOutput::Ascii
        } else {
            ColorOutput::TrueColor
        }
    }
}

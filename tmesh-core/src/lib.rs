//! tmesh core library - mesh loading and the two software render pipelines
//!
//! Everything here is terminal-agnostic: meshes are parsed from the `v`/`f`
//! subset of Wavefront OBJ and rendered into owned frame buffers, either by a
//! flat-shaded scanline rasterizer or by a per-pixel ray caster.

pub mod config;
pub mod framebuffer;
pub mod geometry;
pub mod obj;
pub mod projection;
pub mod raster;
pub mod raycast;
pub mod transform;

// Re-export commonly used types
pub use config::{CasterConfig, ConfigError, HitPolicy, RasterConfig};
pub use framebuffer::{ColorBuffer, FrameBuffer, ShadeTarget};
pub use geometry::{IndexedMesh, Mesh, Triangle};
pub use obj::{load_obj, LoadError, ParseError};
pub use raster::Rasterizer;
pub use raycast::RayCaster;
pub use transform::{RotationState, Transform, YawPitch};

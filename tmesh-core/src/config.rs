//! Tunables for the two render pipelines
use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("frame size must be non-zero, got {width}x{height}")]
    EmptyFrame { width: usize, height: usize },
    #[error("`{name}` must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("`{name}` must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[error("light direction must be a non-zero vector")]
    ZeroLight,
}

fn check_frame(width: usize, height: usize) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::EmptyFrame { width, height });
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::NotPositive { name, value });
    }
    Ok(())
}

fn check_finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { name, value });
    }
    Ok(())
}

/// Settings for the scanline rasterizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterConfig {
    pub width: usize,
    pub height: usize,
    /// Height of a terminal cell divided by its width
    pub char_aspect: f32,
    /// Shrink factor applied to the [-1, 1] model extent
    pub model_scale: f32,
    /// Radians of yaw added per frame
    pub yaw_rate: f32,
    /// Radians of pitch added per frame
    pub pitch_rate: f32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 50,
            char_aspect: 2.0,
            model_scale: 0.9,
            yaw_rate: 0.0006,
            pitch_rate: 0.0003,
        }
    }
}

impl RasterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_frame(self.width, self.height)?;
        check_positive("char_aspect", self.char_aspect)?;
        check_positive("model_scale", self.model_scale)?;
        check_finite("yaw_rate", self.yaw_rate)?;
        check_finite("pitch_rate", self.pitch_rate)
    }
}

/// Which intersection the ray caster keeps for a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitPolicy {
    /// Stop at the first triangle hit, in mesh order
    #[default]
    FirstInOrder,
    /// Test every triangle and keep the one closest to the eye
    Nearest,
}

/// Settings for the ray caster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CasterConfig {
    pub width: usize,
    pub height: usize,
    /// Cell aspect ratio of the target terminal. Carried for display
    /// purposes; ray directions depend only on the pixel grid.
    pub aspect_ratio: f32,
    /// Model placement relative to the eye
    pub offset: Vector3<f32>,
    /// Angle added per frame
    pub spin_step: f32,
    /// Per-axis multipliers of the spin angle
    pub spin_axes: Vector3<f32>,
    pub light: Vector3<f32>,
    pub hit_policy: HitPolicy,
}

impl Default for CasterConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            aspect_ratio: 1.8,
            offset: Vector3::new(0.0, 0.0, 2.0),
            spin_step: 0.1,
            spin_axes: Vector3::new(1.0, 0.4, 0.5),
            light: Vector3::y(),
            hit_policy: HitPolicy::FirstInOrder,
        }
    }
}

impl CasterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_frame(self.width, self.height)?;
        check_positive("aspect_ratio", self.aspect_ratio)?;
        check_finite("spin_step", self.spin_step)?;
        for (name, value) in [
            ("offset.x", self.offset.x),
            ("offset.y", self.offset.y),
            ("offset.z", self.offset.z),
            ("spin_axes.x", self.spin_axes.x),
            ("spin_axes.y", self.spin_axes.y),
            ("spin_axes.z", self.spin_axes.z),
        ] {
            check_finite(name, value)?;
        }
        if !(self.light.norm() > 0.0) {
            return Err(ConfigError::ZeroLight);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(RasterConfig::default().validate(), Ok(()));
        assert_eq!(CasterConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_empty_frame() {
        let config = RasterConfig {
            height: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyFrame {
                width: 100,
                height: 0
            })
        );
    }

    #[test]
    fn test_rejects_bad_scale() {
        let config = RasterConfig {
            model_scale: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                name: "model_scale",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_zero_light() {
        let config = CasterConfig {
            light: Vector3::zeros(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLight));
    }

    #[test]
    fn test_rejects_non_finite_offset() {
        let config = CasterConfig {
            offset: Vector3::new(0.0, f32::NAN, 2.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite {
                name: "offset.y",
                ..
            })
        ));
    }
}

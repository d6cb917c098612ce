//! Axis rotations and the per-frame transforms built from them
use nalgebra::{Rotation3, Vector3};

/// Rotate `v` about the X axis by `angle` radians
pub fn rotate_x(v: &Vector3<f32>, angle: f32) -> Vector3<f32> {
    let (s, c) = angle.sin_cos();
    Vector3::new(v.x, v.y * c - v.z * s, v.y * s + v.z * c)
}

/// Rotate `v` about the Y axis by `angle` radians
pub fn rotate_y(v: &Vector3<f32>, angle: f32) -> Vector3<f32> {
    let (s, c) = angle.sin_cos();
    Vector3::new(v.x * c + v.z * s, v.y, -v.x * s + v.z * c)
}

/// Rotate `v` about the Z axis by `angle` radians
pub fn rotate_z(v: &Vector3<f32>, angle: f32) -> Vector3<f32> {
    let (s, c) = angle.sin_cos();
    Vector3::new(v.x * c - v.y * s, v.x * s + v.y * c, v.z)
}

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate a vector about X, then Y, then Z
    pub fn apply(&self, v: &Vector3<f32>) -> Vector3<f32> {
        rotate_z(&rotate_y(&rotate_x(v, self.x), self.y), self.z)
    }

    /// Undo [`RotationState::apply`]: negated angles, reverse axis order
    pub fn apply_inverse(&self, v: &Vector3<f32>) -> Vector3<f32> {
        rotate_x(&rotate_y(&rotate_z(v, -self.z), -self.y), -self.x)
    }

    /// The same composition as [`RotationState::apply`], as one matrix
    pub fn rotation_matrix(&self) -> Rotation3<f32> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.z);

        // Apply rotations in order: X, Y, Z
        rz * ry * rx
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Model-to-world transform: a rotation followed by a translation.
///
/// The rotation matrix is built once on construction so that a frame's worth
/// of triangles shares the trig evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    rotation: Rotation3<f32>,
    offset: Vector3<f32>,
}

impl Transform {
    pub fn new(rotation: &RotationState, offset: Vector3<f32>) -> Self {
        Self {
            rotation: rotation.rotation_matrix(),
            offset,
        }
    }

    /// Transform a position: rotate, then translate
    pub fn apply_point(&self, v: &Vector3<f32>) -> Vector3<f32> {
        self.rotation * v + self.offset
    }

    /// Transform a direction such as a face normal: rotate only
    pub fn apply_vector(&self, v: &Vector3<f32>) -> Vector3<f32> {
        self.rotation * v
    }
}

/// Yaw/pitch view rotation used by the rasterizer, with its trig cached.
///
/// Applies a yaw about Y, flips Y into screen orientation (rows grow
/// downwards), then pitches about X.
#[derive(Debug, Clone, Copy)]
pub struct YawPitch {
    yaw_sin: f32,
    yaw_cos: f32,
    pitch_sin: f32,
    pitch_cos: f32,
}

impl YawPitch {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        let (yaw_sin, yaw_cos) = yaw.sin_cos();
        let (pitch_sin, pitch_cos) = pitch.sin_cos();
        Self {
            yaw_sin,
            yaw_cos,
            pitch_sin,
            pitch_cos,
        }
    }

    pub fn apply(&self, v: &Vector3<f32>) -> Vector3<f32> {
        let (ys, yc, ps, pc) = (self.yaw_sin, self.yaw_cos, self.pitch_sin, self.pitch_cos);
        let v = Vector3::new(v.x * yc - v.z * ys, -v.y, v.z * yc + v.x * ys);
        Vector3::new(v.x, v.y * pc - v.z * ps, v.z * pc + v.y * ps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use std::f32::consts::{FRAC_PI_3, PI, TAU};

    fn assert_vec_eq(a: Vector3<f32>, b: Vector3<f32>) {
        assert_float_eq!(a.x, b.x, abs <= 1e-5);
        assert_float_eq!(a.y, b.y, abs <= 1e-5);
        assert_float_eq!(a.z, b.z, abs <= 1e-5);
    }

    #[test]
    fn test_rotation_state() {
        let state = RotationState::default();
        assert_eq!(state, RotationState::new(0.0, 0.0, 0.0));
        let identity = Rotation3::<f32>::identity();
        assert!((state.rotation_matrix().matrix() - identity.matrix()).norm() < 1e-6);
    }

    #[test]
    fn test_zero_angle_is_identity() {
        let v = Vector3::new(0.3, -1.2, 2.5);
        assert_eq!(rotate_x(&v, 0.0), v);
        assert_eq!(rotate_y(&v, 0.0), v);
        assert_eq!(rotate_z(&v, 0.0), v);
        assert_eq!(RotationState::zero().apply(&v), v);
    }

    #[test]
    fn test_full_turn_is_periodic() {
        let v = Vector3::new(1.0, 2.0, -0.5);
        assert_vec_eq(rotate_x(&v, TAU), v);
        assert_vec_eq(rotate_y(&v, TAU), v);
        assert_vec_eq(rotate_z(&v, TAU), v);
    }

    #[test]
    fn test_quarter_turns() {
        let x = Vector3::x();
        let y = Vector3::y();
        assert_vec_eq(rotate_z(&x, PI / 2.0), Vector3::y());
        assert_vec_eq(rotate_x(&y, PI / 2.0), Vector3::z());
        assert_vec_eq(rotate_y(&Vector3::z(), PI / 2.0), Vector3::x());
    }

    #[test]
    fn test_inverse_round_trip() {
        let rotation = RotationState::new(0.7, -1.3, 2.9);
        let v = Vector3::new(-0.4, 0.9, 1.6);
        assert_vec_eq(rotation.apply_inverse(&rotation.apply(&v)), v);
    }

    #[test]
    fn test_matrix_matches_axis_composition() {
        let rotation = RotationState::new(0.5, 0.2, FRAC_PI_3);
        let v = Vector3::new(1.0, -2.0, 0.25);
        assert_vec_eq(rotation.rotation_matrix() * v, rotation.apply(&v));
    }

    #[test]
    fn test_transform_offsets_points_not_vectors() {
        let transform = Transform::new(&RotationState::zero(), Vector3::new(0.0, 0.0, 2.0));
        let v = Vector3::new(1.0, 1.0, 1.0);
        assert_vec_eq(transform.apply_point(&v), Vector3::new(1.0, 1.0, 3.0));
        assert_vec_eq(transform.apply_vector(&v), v);
    }

    #[test]
    fn test_yaw_pitch_matches_axis_rotations() {
        let (yaw, pitch) = (0.8, -0.3);
        let view = YawPitch::new(yaw, pitch);
        let v = Vector3::new(0.2, 0.6, -0.9);

        let yawed = rotate_y(&v, -yaw);
        let flipped = Vector3::new(yawed.x, -yawed.y, yawed.z);
        assert_vec_eq(view.apply(&v), rotate_x(&flipped, pitch));
    }

    #[test]
    fn test_yaw_pitch_at_rest_only_flips_y() {
        let view = YawPitch::new(0.0, 0.0);
        assert_vec_eq(view.apply(&Vector3::new(1.0, 2.0, 3.0)), Vector3::new(1.0, -2.0, 3.0));
    }
}

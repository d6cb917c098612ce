//! Per-pixel ray casting against a triangle list
use nalgebra::Vector3;
use rgb::RGB8;

use crate::config::{CasterConfig, HitPolicy};
use crate::framebuffer::ColorBuffer;
use crate::geometry::{Mesh, Triangle};
use crate::projection::RayCamera;
use crate::transform::Transform;

/// A ray/triangle intersection and the gray level it shades to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub point: Vector3<f32>,
    pub shade: u8,
}

/// Diffuse term of `normal` against `light`, mapped onto `0..=255`
pub fn diffuse_shade(normal: &Vector3<f32>, light: &Vector3<f32>) -> u8 {
    // float to int casts saturate, so a slightly overshooting dot stays at 255
    ((normal.dot(light) + 1.0) * 127.5) as u8
}

/// Where a ray from the origin along `dir` meets `triangle`, if it does.
///
/// The plane is solved for `t = -dot(n, a) / dot(n, dir)` and the hit taken at
/// `dir * -t`; a negative `t` or a ray parallel to the plane misses. The hit
/// must lie on the inner side of all three edges.
pub fn intersect(triangle: &Triangle, dir: &Vector3<f32>) -> Option<Vector3<f32>> {
    let normal = &triangle.normal;
    let facing = normal.dot(dir);
    if facing == 0.0 {
        return None;
    }

    let t = -normal.dot(triangle.a()) / facing;
    if t < 0.0 {
        return None;
    }
    let hit = dir * -t;

    let [a, b, c] = &triangle.vertices;
    for (start, end) in [(a, b), (b, c), (c, a)] {
        let edge = end - start;
        if normal.dot(&edge.cross(&(hit - start))) < 0.0 {
            return None;
        }
    }

    Some(hit)
}

/// Shade the ray along `dir` against `triangles` in world space.
///
/// A hit is only accepted if its z is no greater than the best so far. With
/// [`HitPolicy::FirstInOrder`] the scan stops at the first accepted hit, so
/// a triangle earlier in the list can win over a nearer one later in it.
pub fn trace(
    triangles: &[Triangle],
    dir: &Vector3<f32>,
    policy: HitPolicy,
    light: &Vector3<f32>,
) -> Option<Hit> {
    let mut best: Option<Hit> = None;

    for triangle in triangles {
        let Some(point) = intersect(triangle, dir) else {
            continue;
        };
        if best.is_some_and(|hit| point.z > hit.point.z) {
            continue;
        }

        best = Some(Hit {
            point,
            shade: diffuse_shade(&triangle.normal, light),
        });
        if policy == HitPolicy::FirstInOrder {
            break;
        }
    }

    best
}

/// Renders meshes into an owned grayscale [`ColorBuffer`]
pub struct RayCaster {
    pixels: ColorBuffer,
    camera: RayCamera,
    policy: HitPolicy,
    light: Vector3<f32>,
    world: Vec<Triangle>,
}

impl RayCaster {
    pub fn new(config: &CasterConfig) -> Self {
        Self {
            pixels: ColorBuffer::new(config.width, config.height, RGB8::default()),
            camera: RayCamera::new(config.width, config.height),
            policy: config.hit_policy,
            light: config.light.normalize(),
            world: Vec::new(),
        }
    }

    pub fn pixels(&self) -> &ColorBuffer {
        &self.pixels
    }

    /// Draw a full frame of `mesh` placed in the world by `transform`
    pub fn render(&mut self, mesh: &Mesh, transform: &Transform) {
        self.world.clear();
        self.world.extend(mesh.triangles.iter().map(|triangle| Triangle {
            vertices: triangle.vertices.map(|v| transform.apply_point(&v)),
            normal: transform.apply_vector(&triangle.normal),
        }));

        for y in 0..self.pixels.height() {
            for x in 0..self.pixels.width() {
                let dir = self.camera.ray_direction(x, y);
                let shade = trace(&self.world, &dir, self.policy, &self.light)
                    .map_or(0, |hit| hit.shade);
                self.pixels.set(x, y, RGB8::new(shade, shade, shade));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::IndexedMesh;
    use crate::transform::RotationState;

    fn triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(a.into(), b.into(), c.into()).unwrap()
    }

    fn caster(width: usize, height: usize, hit_policy: HitPolicy) -> RayCaster {
        RayCaster::new(&CasterConfig {
            width,
            height,
            hit_policy,
            ..Default::default()
        })
    }

    // plane z = 4, normal +z, shades to 127
    fn far() -> Triangle {
        triangle([-1.0, -1.0, 4.0], [1.0, -1.0, 4.0], [0.0, 1.0, 4.0])
    }

    // tilted through (0, 0, 2), normal (0, -1, 2) normalized, shades to 70
    fn near() -> Triangle {
        triangle([-1.0, -1.0, 1.5], [1.0, -1.0, 1.5], [0.0, 1.0, 2.5])
    }

    #[test]
    fn test_diffuse_shade_range() {
        let light = Vector3::y();
        assert_eq!(diffuse_shade(&Vector3::y(), &light), 255);
        assert_eq!(diffuse_shade(&-Vector3::y(), &light), 0);
        assert_eq!(diffuse_shade(&Vector3::z(), &light), 127);
        assert_eq!(diffuse_shade(&(Vector3::y() * 1.01), &light), 255);
    }

    #[test]
    fn test_intersect_straight_ahead() {
        let hit = intersect(&far(), &-Vector3::z()).unwrap();
        assert_eq!(hit, Vector3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn test_intersect_misses_outside_edges() {
        let dir = Vector3::new(0.5, -0.7, -0.5).normalize();
        assert!(intersect(&far(), &dir).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        assert!(intersect(&far(), &Vector3::x()).is_none());
    }

    #[test]
    fn test_first_in_order_stops_at_first_hit() {
        let dir = -Vector3::z();
        let light = Vector3::y();

        let hit = trace(&[far(), near()], &dir, HitPolicy::FirstInOrder, &light).unwrap();
        assert_eq!(hit.shade, 127);
        assert_eq!(hit.point.z, 4.0);
    }

    #[test]
    fn test_nearest_finds_closest_hit() {
        let dir = -Vector3::z();
        let light = Vector3::y();

        let hit = trace(&[far(), near()], &dir, HitPolicy::Nearest, &light).unwrap();
        assert_eq!(hit.shade, 70);

        let hit = trace(&[near(), far()], &dir, HitPolicy::Nearest, &light).unwrap();
        assert_eq!(hit.shade, 70);
    }

    #[test]
    fn test_empty_scene_is_black() {
        let mut caster = caster(20, 10, HitPolicy::FirstInOrder);
        let transform = Transform::new(&RotationState::new(0.3, 0.1, 0.2), Vector3::z() * 2.0);
        caster.render(&Mesh::new(), &transform);

        assert!(caster
            .pixels()
            .pixels()
            .iter()
            .all(|&p| p == RGB8::new(0, 0, 0)));
    }

    #[test]
    fn test_single_triangle_frame() {
        let mut caster = caster(20, 10, HitPolicy::FirstInOrder);
        let mut mesh = Mesh::new();
        mesh.add_triangle(triangle([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]));
        let transform = Transform::new(&RotationState::zero(), Vector3::new(0.0, 0.0, 2.0));

        caster.render(&mesh, &transform);

        let pixels = caster.pixels();
        assert_eq!(pixels.get(10, 5), RGB8::new(127, 127, 127));
        assert_eq!(pixels.get(0, 0), RGB8::new(0, 0, 0));
    }

    #[test]
    fn test_cube_is_visible() {
        let mut caster = caster(40, 20, HitPolicy::Nearest);
        let mesh = IndexedMesh::cube(1.0).into_mesh();
        let transform = Transform::new(&RotationState::new(0.5, 0.2, 0.25), Vector3::z() * 2.0);

        caster.render(&mesh, &transform);

        assert_ne!(caster.pixels().get(20, 10), RGB8::new(0, 0, 0));
        assert_eq!(caster.pixels().get(0, 0), RGB8::new(0, 0, 0));
    }
}

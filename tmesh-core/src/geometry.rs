//! Geometry primitives for 3D rendering
use nalgebra::Vector3;

/// Unit normal of the triangle `a, b, c` following its winding order.
///
/// Returns `None` when the triangle has zero area.
pub fn face_normal(
    a: &Vector3<f32>,
    b: &Vector3<f32>,
    c: &Vector3<f32>,
) -> Option<Vector3<f32>> {
    let edge1 = b - a;
    let edge2 = c - a;

    edge1.cross(&edge2).try_normalize(0.0)
}

/// A triangle in absolute coordinates with its precomputed unit normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vector3<f32>; 3],
    pub normal: Vector3<f32>,
}

impl Triangle {
    /// Build a triangle, computing its normal. `None` if degenerate.
    pub fn new(a: Vector3<f32>, b: Vector3<f32>, c: Vector3<f32>) -> Option<Self> {
        let normal = face_normal(&a, &b, &c)?;
        Some(Self {
            vertices: [a, b, c],
            normal,
        })
    }

    pub fn a(&self) -> &Vector3<f32> {
        &self.vertices[0]
    }

    pub fn b(&self) -> &Vector3<f32> {
        &self.vertices[1]
    }

    pub fn c(&self) -> &Vector3<f32> {
        &self.vertices[2]
    }
}

/// A triangular face referencing vertices by 1-based index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub indices: [usize; 3],
    pub normal: Vector3<f32>,
}

/// Vertex list plus faces indexing into it, as stored on disk
#[derive(Debug, Clone, Default)]
pub struct IndexedMesh {
    pub vertices: Vec<Vector3<f32>>,
    pub faces: Vec<Face>,
}

impl IndexedMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a vertex by its 1-based index
    pub fn vertex(&self, index: usize) -> Option<&Vector3<f32>> {
        index.checked_sub(1).and_then(|i| self.vertices.get(i))
    }

    pub fn add_vertex(&mut self, vertex: Vector3<f32>) -> usize {
        self.vertices.push(vertex);
        self.vertices.len()
    }

    /// Add a face over existing vertices.
    ///
    /// Returns `None` if an index is out of range or the face is degenerate.
    pub fn add_face(&mut self, indices: [usize; 3]) -> Option<&Face> {
        let a = self.vertex(indices[0])?;
        let b = self.vertex(indices[1])?;
        let c = self.vertex(indices[2])?;
        let normal = face_normal(a, b, c)?;

        self.faces.push(Face { indices, normal });
        self.faces.last()
    }

    /// Faces resolved to absolute-coordinate triangles, in file order
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(move |face| {
            let [a, b, c] = face.indices.map(|i| self.vertices[i - 1]);
            Triangle {
                vertices: [a, b, c],
                normal: face.normal,
            }
        })
    }

    pub fn into_mesh(self) -> Mesh {
        Mesh {
            triangles: self.triangles().collect(),
        }
    }

    /// Axis-aligned cube centred on the origin, outward-facing normals
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::new();
        for &(x, y, z) in &[
            (-h, -h, -h),
            (h, -h, -h),
            (h, h, -h),
            (-h, h, -h),
            (-h, -h, h),
            (h, -h, h),
            (h, h, h),
            (-h, h, h),
        ] {
            mesh.add_vertex(Vector3::new(x, y, z));
        }

        for indices in [
            [5, 6, 7], // front
            [5, 7, 8],
            [1, 4, 3], // back
            [1, 3, 2],
            [4, 8, 7], // top
            [4, 7, 3],
            [1, 2, 6], // bottom
            [1, 6, 5],
            [2, 3, 7], // right
            [2, 7, 6],
            [1, 5, 8], // left
            [1, 8, 4],
        ] {
            mesh.add_face(indices);
        }

        mesh
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }
}

impl From<IndexedMesh> for Mesh {
    fn from(mesh: IndexedMesh) -> Self {
        mesh.into_mesh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn test_normal_is_unit_length() {
        let normal = face_normal(
            &Vector3::new(0.3, -2.0, 1.0),
            &Vector3::new(4.0, 0.5, -1.5),
            &Vector3::new(-1.0, 3.0, 0.2),
        )
        .unwrap();
        assert_float_eq!(normal.norm(), 1.0, abs <= 1e-6);
    }

    #[test]
    fn test_normal_follows_winding() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(1.0, 0.0, 0.0);
        let c = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(face_normal(&a, &b, &c), Some(Vector3::z()));
        assert_eq!(face_normal(&a, &c, &b), Some(-Vector3::z()));
    }

    #[test]
    fn test_degenerate_triangle_has_no_normal() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(1.0, 1.0, 1.0);
        let c = Vector3::new(2.0, 2.0, 2.0);
        assert!(face_normal(&a, &b, &c).is_none());
        assert!(Triangle::new(a, a, b).is_none());
    }

    #[test]
    fn test_vertex_lookup_is_one_based() {
        let mut mesh = IndexedMesh::new();
        mesh.add_vertex(Vector3::new(1.0, 2.0, 3.0));
        assert!(mesh.vertex(0).is_none());
        assert_eq!(mesh.vertex(1), Some(&Vector3::new(1.0, 2.0, 3.0)));
        assert!(mesh.vertex(2).is_none());
    }

    #[test]
    fn test_add_face_rejects_bad_indices() {
        let mut mesh = IndexedMesh::new();
        mesh.add_vertex(Vector3::zeros());
        mesh.add_vertex(Vector3::x());
        assert!(mesh.add_face([1, 2, 3]).is_none());
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn test_cube_normals_point_outward() {
        let cube = IndexedMesh::cube(2.0);
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.faces.len(), 12);

        for triangle in cube.triangles() {
            let centroid = (triangle.a() + triangle.b() + triangle.c()) / 3.0;
            assert!(triangle.normal.dot(&centroid) > 0.0, "{:?}", triangle);
        }
    }

    #[test]
    fn test_into_mesh_keeps_face_order() {
        let cube = IndexedMesh::cube(1.0);
        let expected: Vec<Triangle> = cube.triangles().collect();
        let mesh = Mesh::from(cube);
        assert_eq!(mesh.triangles, expected);
    }
}

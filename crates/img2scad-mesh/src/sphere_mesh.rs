//! The vertex and face lists produced for one image.

use glam::DVec3;

/// A triangle as three indices into [`SphereMesh::vertices`].
pub type Face = [u32; 3];

/// A displaced sphere over a `(height + 1) x (width + 1)` vertex grid.
///
/// Vertices are row-major: sample `(i, j)` lives at `i * (width + 1) + j`.
/// Faces reference vertices positionally, so the vertex order is fixed once built.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereMesh {
    width: u32,
    height: u32,
    vertices: Vec<DVec3>,
    faces: Vec<Face>,
}

impl SphereMesh {
    pub(crate) fn new(width: u32, height: u32, vertices: Vec<DVec3>, faces: Vec<Face>) -> Self {
        Self {
            width,
            height,
            vertices,
            faces,
        }
    }

    /// Source image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Source image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Vertices in row-major sample order.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Triangles, two per grid cell.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Number of vertices, `(height + 1) * (width + 1)`.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces, `2 * height * width`.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Row stride of the vertex grid.
    pub fn row_stride(&self) -> u32 {
        self.width + 1
    }

    /// Index of sample `(i, j)` in the vertex list.
    pub fn vertex_index(&self, i: u32, j: u32) -> u32 {
        i * self.row_stride() + j
    }

    /// Returns `true` if every face index points at an existing vertex.
    pub fn indices_in_bounds(&self) -> bool {
        let count = self.vertices.len();
        self.faces
            .iter()
            .flatten()
            .all(|&index| (index as usize) < count)
    }
}

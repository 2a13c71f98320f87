//! CPU-side mesh data and the box builder.
//!
//! The whole scene is drawn from a single unit cube. [`build_box_mesh`]
//! produces it once at startup; the GPU copy is created by
//! [`crate::resources::mesh::upload_mesh`] and shared by every instance.

/// An immutable indexed triangle mesh.
///
/// Indices are `u32` and always come in triples. The number of elements drawn
/// is the index count, not the vertex count.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn new(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        debug_assert!(indices.len() % 3 == 0, "index count must be a multiple of 3");
        Self { positions, indices }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of indices to pass to `draw_indexed`.
    pub fn num_elements(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Iterate the triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }
}

/// Build the unit cube (corners at ±0.5) shared by every instance.
///
/// 8 vertices, 12 triangles. Every triangle is counter-clockwise when seen
/// from outside the box so back-face culling keeps the outward faces only.
pub fn build_box_mesh() -> Mesh {
    #[rustfmt::skip]
    let positions = vec![
        // top
        [-0.5,  0.5,  0.5], // 0
        [ 0.5,  0.5,  0.5], // 1
        [ 0.5,  0.5, -0.5], // 2
        [-0.5,  0.5, -0.5], // 3
        // bottom
        [-0.5, -0.5,  0.5], // 4
        [ 0.5, -0.5,  0.5], // 5
        [ 0.5, -0.5, -0.5], // 6
        [-0.5, -0.5, -0.5], // 7
    ];

    #[rustfmt::skip]
    let indices = vec![
        0, 4, 1,   4, 5, 1, // front
        3, 2, 7,   2, 6, 7, // back
        0, 1, 3,   3, 1, 2, // top
        4, 7, 6,   4, 6, 5, // bottom
        1, 5, 6,   6, 2, 1, // right
        4, 0, 7,   7, 0, 3, // left
    ];

    Mesh::new(positions, indices)
}

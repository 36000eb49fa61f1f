#![warn(missing_docs)]

//! Extruded solid assembly for the prism pipeline.
//!
//! Takes a boundary and its triangulated cap and writes the front cap,
//! back cap and side walls into flat, exactly-sized render buffers.
//! Several extruded contours can be merged into one buffer set.

mod assemble;
mod index;
mod merge;
mod stl;

pub use assemble::{assemble, MeshLayout};
pub use index::{IndexBuffer, IndexIter, MAX_NARROW_VERTICES};
pub use merge::merge;

use serde::Serialize;

/// An extruded solid ready for rendering.
///
/// `positions` and `normals` are flat `[x0, y0, z0, x1, ...]` arrays with
/// one entry per vertex; `indices` holds three entries per triangle, with
/// a width fixed when the mesh was built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtrudedMesh {
    /// Vertex positions, stride 3.
    pub positions: Vec<f32>,
    /// Vertex normals, stride 3. Same length as `positions`.
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex arrays.
    pub indices: IndexBuffer,
}

impl ExtrudedMesh {
    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position of vertex `i`.
    pub fn position(&self, i: usize) -> [f32; 3] {
        [
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        ]
    }

    /// Normal of vertex `i`.
    pub fn normal(&self, i: usize) -> [f32; 3] {
        [
            self.normals[i * 3],
            self.normals[i * 3 + 1],
            self.normals[i * 3 + 2],
        ]
    }

    /// Iterate over triangles as vertex index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let mut it = self.indices.iter();
        std::iter::from_fn(move || {
            let a = it.next()?;
            let b = it.next()?;
            let c = it.next()?;
            Some([a as usize, b as usize, c as usize])
        })
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<([f32; 3], [f32; 3])> {
        if self.positions.is_empty() {
            return None;
        }
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for p in self.positions.chunks_exact(3) {
            for k in 0..3 {
                min[k] = min[k].min(p[k]);
                max[k] = max[k].max(p[k]);
            }
        }
        Some((min, max))
    }
}

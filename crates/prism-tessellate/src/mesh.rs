//! Flat 2D triangle mesh produced by a triangulation backend.

use prism_math::Point2;

use crate::TriangulationError;

/// A triangulated cap in the outline plane.
///
/// Vertices are stored flat as `[x0, y0, x1, y1, ...]` and triangles as
/// `[i0, i1, i2, ...]` indices into them, counter-clockwise. Every stored
/// vertex is referenced by at least one triangle, so the vertex count is
/// the number of distinct cap vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct CapMesh {
    vertices: Vec<f64>,
    indices: Vec<u32>,
}

impl CapMesh {
    /// Build a cap mesh from flat buffers.
    ///
    /// Vertices no triangle refers to are dropped; the survivors keep their
    /// relative order and indices are remapped accordingly.
    ///
    /// # Errors
    ///
    /// Returns [`TriangulationError::Malformed`] if the buffers have the
    /// wrong stride or an index is out of range.
    pub fn new(vertices: Vec<f64>, indices: Vec<u32>) -> Result<Self, TriangulationError> {
        if vertices.len() % 2 != 0 {
            return Err(TriangulationError::Malformed(format!(
                "vertex buffer length {} is not a multiple of 2",
                vertices.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(TriangulationError::Malformed(format!(
                "index buffer length {} is not a multiple of 3",
                indices.len()
            )));
        }

        let n_verts = vertices.len() / 2;
        let mut used = vec![false; n_verts];
        for &i in &indices {
            let i = i as usize;
            if i >= n_verts {
                return Err(TriangulationError::Malformed(format!(
                    "index {i} out of range for {n_verts} vertices"
                )));
            }
            used[i] = true;
        }

        if used.iter().all(|&u| u) {
            return Ok(Self { vertices, indices });
        }

        // Compact unreferenced vertices
        let mut remap = vec![0u32; n_verts];
        let mut compacted = Vec::with_capacity(vertices.len());
        let mut next = 0u32;
        for (i, &u) in used.iter().enumerate() {
            if !u {
                continue;
            }
            remap[i] = next;
            compacted.push(vertices[i * 2]);
            compacted.push(vertices[i * 2 + 1]);
            next += 1;
        }
        let indices = indices.iter().map(|&i| remap[i as usize]).collect();

        Ok(Self {
            vertices: compacted,
            indices,
        })
    }

    /// Flat vertex coordinates `[x0, y0, ...]`.
    pub fn vertices(&self) -> &[f64] {
        &self.vertices
    }

    /// Flat triangle indices, counter-clockwise.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of distinct vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// True if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Vertex `i` as a point.
    pub fn vertex(&self, i: usize) -> Point2 {
        Point2::new(self.vertices[i * 2], self.vertices[i * 2 + 1])
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Total area covered by the triangles.
    pub fn area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| {
                let (a, b, c) = (
                    self.vertex(a as usize),
                    self.vertex(b as usize),
                    self.vertex(c as usize),
                );
                ((b - a).perp(&(c - a))) / 2.0
            })
            .sum()
    }
}

//! Merging of independently extruded contours.

use crate::{ExtrudedMesh, IndexBuffer};

/// Concatenate several meshes into one.
///
/// Positions and normals are appended in input order and every mesh's
/// indices are shifted by the number of vertices written before it. The
/// index width is chosen again from the combined vertex count. A single
/// mesh is returned untouched; an empty list yields `None`.
pub fn merge(mut meshes: Vec<ExtrudedMesh>) -> Option<ExtrudedMesh> {
    if meshes.len() <= 1 {
        return meshes.pop();
    }

    let total_vertices: usize = meshes.iter().map(ExtrudedMesh::num_vertices).sum();
    let total_indices: usize = meshes.iter().map(|m| m.indices.len()).sum();

    let mut positions = Vec::with_capacity(total_vertices * 3);
    let mut normals = Vec::with_capacity(total_vertices * 3);
    let mut indices = IndexBuffer::with_capacity(total_vertices, total_indices);

    for mesh in &meshes {
        let offset = (positions.len() / 3) as u32;
        positions.extend_from_slice(&mesh.positions);
        normals.extend_from_slice(&mesh.normals);
        for i in mesh.indices.iter() {
            indices.push(i + offset);
        }
    }

    log::debug!(
        "merged {} meshes: {} vertices, {} indices",
        meshes.len(),
        total_vertices,
        total_indices
    );

    Some(ExtrudedMesh {
        positions,
        normals,
        indices,
    })
}

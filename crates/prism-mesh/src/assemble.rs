//! Front cap, back cap and side wall assembly.

use prism_math::Point2;
use prism_tessellate::CapMesh;

use crate::{ExtrudedMesh, IndexBuffer};

/// Exact buffer sizes of an extruded mesh, known before anything is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshLayout {
    /// Distinct cap vertices (boundary plus interior).
    pub cap_vertices: usize,
    /// Cap triangles.
    pub cap_triangles: usize,
    /// Boundary points, one side wall column per edge.
    pub boundary: usize,
    /// Quads stacked along the depth of each side wall column.
    pub depth_segments: usize,
}

impl MeshLayout {
    /// Layout for a cap extruded along a boundary of `boundary` points.
    ///
    /// `depth_segments` below 1 counts as 1.
    pub fn new(cap: &CapMesh, boundary: usize, depth_segments: u32) -> Self {
        Self {
            cap_vertices: cap.num_vertices(),
            cap_triangles: cap.num_triangles(),
            boundary,
            depth_segments: depth_segments.max(1) as usize,
        }
    }

    /// Side wall vertices: four unshared corners per quad.
    pub fn side_vertices(&self) -> usize {
        self.boundary * self.depth_segments * 4
    }

    /// Front cap, back cap and side walls.
    pub fn total_vertices(&self) -> usize {
        self.cap_vertices * 2 + self.side_vertices()
    }

    /// Three indices per cap triangle on each cap, six per side quad.
    pub fn total_indices(&self) -> usize {
        self.cap_triangles * 6 + self.boundary * self.depth_segments * 6
    }
}

/// Extrude a triangulated cap along its boundary.
///
/// The solid spans `z = -depth/2` (front) to `z = +depth/2` (back). The
/// front cap faces `-z` and reverses the cap winding, the back cap faces
/// `+z` and keeps it. Each boundary edge gets `depth_segments` quads with
/// flat outward normals; side vertices are never shared between quads.
///
/// `boundary` must be the counter-clockwise outline the cap was built
/// from. All buffers are allocated once at their final size.
pub fn assemble(
    boundary: &[Point2],
    cap: &CapMesh,
    depth: f64,
    depth_segments: u32,
) -> ExtrudedMesh {
    let layout = MeshLayout::new(cap, boundary.len(), depth_segments);
    let mut writer = MeshWriter::new(&layout);

    let front_z = -depth / 2.0;
    let back_z = depth / 2.0;

    writer.write_cap(cap, front_z, -1.0, true);
    writer.write_cap(cap, back_z, 1.0, false);
    writer.write_sides(boundary, front_z, back_z, layout.depth_segments);

    log::debug!(
        "assembled mesh: {} vertices, {} indices, {} bit indices",
        layout.total_vertices(),
        layout.total_indices(),
        if writer.indices.is_narrow() { 16 } else { 32 }
    );
    writer.finish(&layout)
}

struct MeshWriter {
    positions: Vec<f32>,
    normals: Vec<f32>,
    indices: IndexBuffer,
}

impl MeshWriter {
    fn new(layout: &MeshLayout) -> Self {
        let total_vertices = layout.total_vertices();
        Self {
            positions: Vec::with_capacity(total_vertices * 3),
            normals: Vec::with_capacity(total_vertices * 3),
            indices: IndexBuffer::with_capacity(total_vertices, layout.total_indices()),
        }
    }

    fn vertex_count(&self) -> u32 {
        (self.positions.len() / 3) as u32
    }

    fn push_vertex(&mut self, x: f64, y: f64, z: f64, normal: [f64; 3]) -> u32 {
        let index = self.vertex_count();
        self.positions
            .extend_from_slice(&[x as f32, y as f32, z as f32]);
        self.normals
            .extend_from_slice(&[normal[0] as f32, normal[1] as f32, normal[2] as f32]);
        index
    }

    fn write_cap(&mut self, cap: &CapMesh, z: f64, normal_z: f64, reverse: bool) {
        let base = self.vertex_count();
        for i in 0..cap.num_vertices() {
            let p = cap.vertex(i);
            self.push_vertex(p.x, p.y, z, [0.0, 0.0, normal_z]);
        }
        for [a, b, c] in cap.triangles() {
            if reverse {
                self.indices.push_triangle(base + a, base + c, base + b);
            } else {
                self.indices.push_triangle(base + a, base + b, base + c);
            }
        }
    }

    fn write_sides(&mut self, boundary: &[Point2], front_z: f64, back_z: f64, segments: usize) {
        let n = boundary.len();
        for i in 0..n {
            let a = boundary[i];
            let b = boundary[(i + 1) % n];

            let (dx, dy) = (b.x - a.x, b.y - a.y);
            let len = dx.hypot(dy);
            // Outward for a CCW boundary
            let normal = if len > 0.0 {
                [dy / len, -dx / len, 0.0]
            } else {
                [0.0, 0.0, 0.0]
            };

            for j in 0..segments {
                let z0 = front_z + (back_z - front_z) * (j as f64 / segments as f64);
                let z1 = front_z + (back_z - front_z) * ((j + 1) as f64 / segments as f64);

                let v0 = self.push_vertex(a.x, a.y, z0, normal);
                let v1 = self.push_vertex(b.x, b.y, z0, normal);
                let v2 = self.push_vertex(b.x, b.y, z1, normal);
                let v3 = self.push_vertex(a.x, a.y, z1, normal);

                self.indices.push_triangle(v0, v1, v2);
                self.indices.push_triangle(v0, v2, v3);
            }
        }
    }

    fn finish(self, layout: &MeshLayout) -> ExtrudedMesh {
        debug_assert_eq!(self.positions.len(), layout.total_vertices() * 3);
        debug_assert_eq!(self.normals.len(), layout.total_vertices() * 3);
        debug_assert_eq!(self.indices.len(), layout.total_indices());
        ExtrudedMesh {
            positions: self.positions,
            normals: self.normals,
            indices: self.indices,
        }
    }
}

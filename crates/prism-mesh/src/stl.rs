//! Binary STL encoding.

use crate::ExtrudedMesh;

const HEADER_TEXT: &[u8] = b"prism STL export";

impl ExtrudedMesh {
    /// Encode the mesh as binary STL.
    ///
    /// Facet normals are recomputed from the triangle winding; degenerate
    /// triangles get `+z`.
    pub fn to_stl_bytes(&self) -> Vec<u8> {
        let num_triangles = self.num_triangles();
        let mut data = Vec::with_capacity(84 + num_triangles * 50);

        // 80-byte header, space padded
        data.extend_from_slice(HEADER_TEXT);
        data.resize(80, b' ');
        data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

        for [i0, i1, i2] in self.triangles() {
            let v0 = self.position(i0);
            let v1 = self.position(i1);
            let v2 = self.position(i2);

            let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
            let nx = e1[1] * e2[2] - e1[2] * e2[1];
            let ny = e1[2] * e2[0] - e1[0] * e2[2];
            let nz = e1[0] * e2[1] - e1[1] * e2[0];
            let len = (nx * nx + ny * ny + nz * nz).sqrt();
            let normal = if len > 1e-10 {
                [nx / len, ny / len, nz / len]
            } else {
                [0.0, 0.0, 1.0]
            };

            for v in [normal, v0, v1, v2] {
                data.extend_from_slice(&v[0].to_le_bytes());
                data.extend_from_slice(&v[1].to_le_bytes());
                data.extend_from_slice(&v[2].to_le_bytes());
            }
            // Attribute byte count
            data.extend_from_slice(&0u16.to_le_bytes());
        }

        data
    }
}

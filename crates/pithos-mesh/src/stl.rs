//! Binary STL serialization of a triangle mesh.
//!
//! Produces the byte image only; writing it to disk is the caller's
//! concern, keeping this crate free of file I/O.

use crate::TriangleMesh;

/// Size of the fixed STL file header.
const HEADER_LEN: usize = 80;

/// Bytes per STL triangle record: normal + 3 vertices (4-byte floats)
/// + attribute count.
const TRIANGLE_RECORD_LEN: usize = 50;

/// Serialize a mesh into binary STL bytes. `header_name` is embedded in
/// the 80-byte header, truncated if longer.
pub fn to_binary_stl_bytes(mesh: &TriangleMesh, header_name: &str) -> Vec<u8> {
    let num_triangles = mesh.num_triangles();
    let mut out = Vec::with_capacity(HEADER_LEN + 4 + num_triangles * TRIANGLE_RECORD_LEN);

    let mut header = [0u8; HEADER_LEN];
    let name_bytes = header_name.as_bytes();
    let copy_n = name_bytes.len().min(header.len());
    header[..copy_n].copy_from_slice(&name_bytes[..copy_n]);
    out.extend_from_slice(&header);

    out.extend_from_slice(&(num_triangles as u32).to_le_bytes());

    for tri in mesh.indices.chunks_exact(3) {
        let a = vertex(mesh, tri[0]);
        let b = vertex(mesh, tri[1]);
        let c = vertex(mesh, tri[2]);

        let (nx, ny, nz) = face_normal(a, b, c);
        out.extend_from_slice(&nx.to_le_bytes());
        out.extend_from_slice(&ny.to_le_bytes());
        out.extend_from_slice(&nz.to_le_bytes());

        for (x, y, z) in [a, b, c] {
            out.extend_from_slice(&x.to_le_bytes());
            out.extend_from_slice(&y.to_le_bytes());
            out.extend_from_slice(&z.to_le_bytes());
        }

        out.extend_from_slice(&0u16.to_le_bytes());
    }

    out
}

fn vertex(mesh: &TriangleMesh, i: u32) -> (f32, f32, f32) {
    let i = i as usize * 3;
    (
        mesh.vertices[i],
        mesh.vertices[i + 1],
        mesh.vertices[i + 2],
    )
}

fn face_normal(a: (f32, f32, f32), b: (f32, f32, f32), c: (f32, f32, f32)) -> (f32, f32, f32) {
    let ab = (b.0 - a.0, b.1 - a.1, b.2 - a.2);
    let ac = (c.0 - a.0, c.1 - a.1, c.2 - a.2);
    let n = (
        ab.1 * ac.2 - ab.2 * ac.1,
        ab.2 * ac.0 - ab.0 * ac.2,
        ab.0 * ac.1 - ab.1 * ac.0,
    );
    let len2 = n.0 * n.0 + n.1 * n.1 + n.2 * n.2;
    if len2 <= f32::EPSILON {
        // Degenerate face; a zero normal is valid STL.
        return (0.0, 0.0, 0.0);
    }
    let inv_len = 1.0 / len2.sqrt();
    (n.0 * inv_len, n.1 * inv_len, n.2 * inv_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RevolutionMesh;
    use pithos_profile::ProfileCurve;

    #[test]
    fn test_stl_layout() {
        let curve = ProfileCurve::from_samples(&[(0.0, 3.0), (8.0, 2.0)]).unwrap();
        let tri = RevolutionMesh::build(&curve, 12).unwrap().triangulate();
        let bytes = to_binary_stl_bytes(&tri, "vessel");

        assert_eq!(
            bytes.len(),
            HEADER_LEN + 4 + tri.num_triangles() * TRIANGLE_RECORD_LEN
        );
        let count = u32::from_le_bytes(bytes[80..84].try_into().unwrap());
        assert_eq!(count as usize, tri.num_triangles());
        assert_eq!(&bytes[..6], b"vessel");
    }

    #[test]
    fn test_stl_header_truncated() {
        let curve = ProfileCurve::from_samples(&[(0.0, 3.0), (8.0, 2.0)]).unwrap();
        let tri = RevolutionMesh::build(&curve, 4).unwrap().triangulate();
        let long_name = "x".repeat(200);
        let bytes = to_binary_stl_bytes(&tri, &long_name);
        assert_eq!(bytes[79], b'x');
        assert_eq!(u32::from_le_bytes(bytes[80..84].try_into().unwrap()) as usize, tri.num_triangles());
    }
}

#![warn(missing_docs)]

//! Surface-of-revolution mesh generation.
//!
//! Sweeps a (possibly RDP-simplified) vessel profile a full turn around
//! its height axis into a `(n_theta, n_samples)` grid of 3D vertices,
//! and triangulates the grid into a flat [`TriangleMesh`] for rendering
//! or export. Heights are normalized so the vessel base sits at y = 0;
//! the sweep duplicates the first angle as the last, closing the seam.
//!
//! The quad split is fixed: each grid cell
//! `(i,j) (i+1,j) (i+1,j+1) (i,j+1)` is cut along the
//! `(i,j)-(i+1,j+1)` diagonal into `(v1,v2,v3)` and `(v1,v3,v4)`.
//! Exporters rely on this rule staying put; it decides which way the
//! surface normals of neighbouring triangles lean.

pub mod stl;

use std::f64::consts::PI;

use pithos_math::{Point3, Vec3};
use pithos_profile::ProfileCurve;
use thiserror::Error;

/// Errors that can occur while building a revolution mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// Fewer than 3 angular segments requested.
    #[error("at least 3 angular segments required, got {0}")]
    TooFewSegments(usize),

    /// The profile has fewer than 2 height samples.
    #[error("profile has too few samples for a mesh: {0} (at least 2 required)")]
    TooFewSamples(usize),
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;

/// A vertex grid produced by revolving a profile: `n_theta` angular
/// rings (seam duplicated) by `n_samples` height samples.
#[derive(Debug, Clone)]
pub struct RevolutionMesh {
    n_theta: usize,
    n_samples: usize,
    vertices: Vec<Point3>,
}

impl RevolutionMesh {
    /// Revolve `curve` around its height axis with `n_theta` angles
    /// evenly spaced over a full turn (both 0 and 2π present, so the
    /// first and last ring coincide).
    pub fn build(curve: &ProfileCurve, n_theta: usize) -> Result<Self> {
        if n_theta < 3 {
            return Err(MeshError::TooFewSegments(n_theta));
        }
        let n_samples = curve.sample_count();
        if n_samples < 2 {
            return Err(MeshError::TooFewSamples(n_samples));
        }

        let base = curve.base_height();
        let mut vertices = Vec::with_capacity(n_theta * n_samples);
        for i in 0..n_theta {
            let theta = 2.0 * PI * i as f64 / (n_theta - 1) as f64;
            let (sin, cos) = theta.sin_cos();
            for (h, r) in curve.points() {
                vertices.push(Point3::new(r * cos, h - base, r * sin));
            }
        }

        Ok(Self {
            n_theta,
            n_samples,
            vertices,
        })
    }

    /// Grid shape as `(angular rings, height samples)`.
    pub fn grid_shape(&self) -> (usize, usize) {
        (self.n_theta, self.n_samples)
    }

    /// Vertex at angular ring `ring`, height sample `sample`.
    pub fn vertex(&self, ring: usize, sample: usize) -> Point3 {
        self.vertices[ring * self.n_samples + sample]
    }

    /// All vertices, ring-major.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Triangulate the grid with the fixed diagonal split documented on
    /// the crate, producing per-vertex normals accumulated from the
    /// incident faces.
    pub fn triangulate(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        mesh.vertices.reserve(self.vertices.len() * 3);
        for v in &self.vertices {
            mesh.vertices.push(v.x as f32);
            mesh.vertices.push(v.y as f32);
            mesh.vertices.push(v.z as f32);
        }

        let index = |ring: usize, sample: usize| (ring * self.n_samples + sample) as u32;
        for i in 0..self.n_theta - 1 {
            for j in 0..self.n_samples - 1 {
                let v1 = index(i, j);
                let v2 = index(i + 1, j);
                let v3 = index(i + 1, j + 1);
                let v4 = index(i, j + 1);
                mesh.indices.extend_from_slice(&[v1, v2, v3]);
                mesh.indices.extend_from_slice(&[v1, v3, v4]);
            }
        }

        mesh.normals = accumulate_vertex_normals(&mesh.vertices, &mesh.indices);
        mesh
    }
}

/// Output triangle mesh for rendering and export.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
    /// Flat array of vertex normals, same length as `vertices` (f32).
    pub normals: Vec<f32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-vertex normals: area-weighted accumulation of incident face
/// normals, normalized at the end. Degenerate faces contribute nothing.
fn accumulate_vertex_normals(vertices: &[f32], indices: &[u32]) -> Vec<f32> {
    let mut acc = vec![Vec3::zeros(); vertices.len() / 3];
    let point = |i: u32| {
        let i = i as usize * 3;
        Vec3::new(
            vertices[i] as f64,
            vertices[i + 1] as f64,
            vertices[i + 2] as f64,
        )
    };
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (point(tri[0]), point(tri[1]), point(tri[2]));
        // Cross-product magnitude carries the area weighting.
        let n = (b - a).cross(&(c - a));
        for &vi in tri {
            acc[vi as usize] += n;
        }
    }
    let mut normals = Vec::with_capacity(vertices.len());
    for n in acc {
        let len = n.norm();
        let n = if len > 1e-12 { n / len } else { Vec3::zeros() };
        normals.push(n.x as f32);
        normals.push(n.y as f32);
        normals.push(n.z as f32);
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cylinder_curve() -> ProfileCurve {
        ProfileCurve::from_samples(&[(0.0, 5.0), (5.0, 5.0), (10.0, 5.0)]).unwrap()
    }

    #[test]
    fn test_build_validation() {
        let curve = cylinder_curve();
        assert!(matches!(
            RevolutionMesh::build(&curve, 2),
            Err(MeshError::TooFewSegments(2))
        ));
        assert!(RevolutionMesh::build(&curve, 3).is_ok());
    }

    #[test]
    fn test_grid_shape_and_seam() {
        let mesh = RevolutionMesh::build(&cylinder_curve(), 16).unwrap();
        assert_eq!(mesh.grid_shape(), (16, 3));
        // Seam closed: first and last rings coincide.
        for j in 0..3 {
            let first = mesh.vertex(0, j);
            let last = mesh.vertex(15, j);
            assert!((first - last).norm() < 1e-9, "sample {j}");
        }
    }

    #[test]
    fn test_cylinder_vertices_on_radius() {
        let mesh = RevolutionMesh::build(&cylinder_curve(), 24).unwrap();
        for v in mesh.vertices() {
            let radial = (v.x * v.x + v.z * v.z).sqrt();
            assert!((radial - 5.0).abs() < 1e-9);
            assert!((0.0..=10.0).contains(&v.y));
        }
    }

    #[test]
    fn test_height_normalized_to_base() {
        // A profile whose base sits above zero is translated down.
        let curve = ProfileCurve::from_samples(&[(0.005, 2.0), (5.005, 3.0)]).unwrap();
        let mesh = RevolutionMesh::build(&curve, 8).unwrap();
        assert!((mesh.vertex(0, 0).y - 0.0).abs() < 1e-12);
        assert!((mesh.vertex(0, 1).y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_triangulation_counts() {
        let mesh = RevolutionMesh::build(&cylinder_curve(), 16).unwrap();
        let tri = mesh.triangulate();
        assert_eq!(tri.num_vertices(), 16 * 3);
        assert_eq!(tri.num_triangles(), (16 - 1) * (3 - 1) * 2);
        assert_eq!(tri.normals.len(), tri.vertices.len());
    }

    #[test]
    fn test_cylinder_normals_radial() {
        let mesh = RevolutionMesh::build(&cylinder_curve(), 32).unwrap();
        let tri = mesh.triangulate();
        // Interior vertex of the cylinder wall: its normal must be
        // horizontal and parallel to the radial direction.
        let (_, n_samples) = mesh.grid_shape();
        let ring = 5;
        let sample = 1;
        let vi = ring * n_samples + sample;
        let v = mesh.vertex(ring, sample);
        let n = Vec3::new(
            tri.normals[vi * 3] as f64,
            tri.normals[vi * 3 + 1] as f64,
            tri.normals[vi * 3 + 2] as f64,
        );
        assert!(n.y.abs() < 1e-4);
        let radial = Vec3::new(v.x, 0.0, v.z).normalize();
        assert!((n.dot(&radial).abs() - 1.0).abs() < 1e-4);
    }
}

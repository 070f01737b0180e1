//! Core data types shared across the INR crates.

use core::ops::{Add, Mul, Sub};

/// The spatial layout of a sampled signal.
///
/// A `Plane` is a 2D raster (image), a `Volume` is a 3D scalar field.
/// All flattening in this workspace is row-major with the first axis
/// outermost; see [`crate::coords`] for the coordinate convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridShape {
    /// A 2D raster with `h` rows and `w` columns.
    Plane {
        /// Number of rows.
        h: usize,
        /// Number of columns.
        w: usize,
    },
    /// A 3D field with `h × w × t` samples.
    Volume {
        /// Size of the first (outermost) axis.
        h: usize,
        /// Size of the second axis.
        w: usize,
        /// Size of the third (innermost) axis.
        t: usize,
    },
}

impl GridShape {
    /// Total number of spatial samples.
    pub fn sample_count(&self) -> usize {
        match *self {
            GridShape::Plane { h, w } => h * w,
            GridShape::Volume { h, w, t } => h * w * t,
        }
    }

    /// Input dimensionality of a coordinate on this grid (2 or 3).
    pub fn in_dim(&self) -> usize {
        match self {
            GridShape::Plane { .. } => 2,
            GridShape::Volume { .. } => 3,
        }
    }

    /// Axis sizes, padded with 1 for the missing third axis of a plane.
    pub fn dims(&self) -> (usize, usize, usize) {
        match *self {
            GridShape::Plane { h, w } => (h, w, 1),
            GridShape::Volume { h, w, t } => (h, w, t),
        }
    }

    /// Whether this shape is a 3D volume.
    pub fn is_volume(&self) -> bool {
        matches!(self, GridShape::Volume { .. })
    }
}

/// A 3D point in normalized grid space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Point3 {
    /// Create a new point.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Linear interpolation between `self` and `other` at parameter `t`.
    pub fn lerp(self, other: Point3, t: f32) -> Point3 {
        self + (other - self) * t
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Point3 {
    type Output = Point3;

    fn mul(self, rhs: f32) -> Point3 {
        Point3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// A triangulated surface produced by marching cubes.
///
/// Vertices are not deduplicated: each triangle owns three consecutive
/// vertices, matching the flat output of the per-cell extraction.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions in normalized grid space.
    pub vertices: Vec<[f32; 3]>,
    /// Triangles as vertex index triples.
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh contains no geometry.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count() {
        assert_eq!(GridShape::Plane { h: 8, w: 8 }.sample_count(), 64);
        assert_eq!(GridShape::Volume { h: 2, w: 3, t: 4 }.sample_count(), 24);
    }

    #[test]
    fn test_in_dim() {
        assert_eq!(GridShape::Plane { h: 1, w: 1 }.in_dim(), 2);
        assert_eq!(GridShape::Volume { h: 1, w: 1, t: 1 }.in_dim(), 3);
    }

    #[test]
    fn test_point_lerp() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 2.0, 4.0);

        let mid = a.lerp(b, 0.5);
        assert!((mid.x - 0.5).abs() < 1e-6);
        assert!((mid.y - 1.0).abs() < 1e-6);
        assert!((mid.z - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_mesh_counts() {
        let mesh = Mesh {
            vertices: vec![[0.0; 3]; 6],
            triangles: vec![[0, 1, 2], [3, 4, 5]],
        };
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(!mesh.is_empty());
    }
}

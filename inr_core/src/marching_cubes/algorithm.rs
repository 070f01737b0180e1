//! Marching cubes mesh extraction over dense volumes.
//!
//! Walks every cell of an `H × W × T` scalar field and emits a triangulated
//! isosurface at a given threshold. Vertex positions live in the same
//! normalized `[-1, 1]` grid space produced by [`crate::coords::build_grid`].

use crate::coords::axis_position;
use crate::error::{CoreError, Result};
use crate::types::{Mesh, Point3};

use super::tables::{CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES, TRI_TABLE};

/// Interpolate the position along an edge where the field crosses the
/// iso-value.
#[inline]
pub fn interpolate_vertex(p0: Point3, p1: Point3, v0: f32, v1: f32, iso_value: f32) -> Point3 {
    // Avoid division by zero for degenerate cases
    let denom = v1 - v0;
    if denom.abs() < 1e-10 {
        return p0.lerp(p1, 0.5);
    }

    let t = ((iso_value - v0) / denom).clamp(0.0, 1.0);
    p0.lerp(p1, t)
}

/// Compute the cube configuration index from corner field values.
///
/// Bit `i` is set when corner `i` is inside the surface (value below the
/// iso-value).
#[inline]
fn compute_cube_index(corner_values: &[f32; 8], iso_value: f32) -> usize {
    let mut index = 0;
    for (i, &val) in corner_values.iter().enumerate() {
        if val < iso_value {
            index |= 1 << i;
        }
    }
    index
}

/// Extract the triangles for a single cell at grid position `(i, j, k)`.
fn cell_triangles(
    volume: &[f32],
    dims: (usize, usize, usize),
    cell: (usize, usize, usize),
    iso_value: f32,
) -> Vec<[Point3; 3]> {
    let (h, w, t) = dims;
    let (i, j, k) = cell;

    let mut corner_values = [0.0f32; 8];
    let mut corner_positions = [Point3::default(); 8];

    for (c, &(di, dj, dk)) in CORNER_OFFSETS.iter().enumerate() {
        let (ci, cj, ck) = (i + di, j + dj, k + dk);
        corner_values[c] = volume[(ci * w + cj) * t + ck];
        corner_positions[c] = Point3::new(
            axis_position(h, ci),
            axis_position(w, cj),
            axis_position(t, ck),
        );
    }

    let cube_index = compute_cube_index(&corner_values, iso_value);
    let edge_flags = EDGE_TABLE[cube_index];
    if edge_flags == 0 {
        return Vec::new();
    }

    let mut edge_vertices = [Point3::default(); 12];
    for (edge_idx, &(v0, v1)) in EDGE_VERTICES.iter().enumerate() {
        if edge_flags & (1 << edge_idx) != 0 {
            edge_vertices[edge_idx] = interpolate_vertex(
                corner_positions[v0],
                corner_positions[v1],
                corner_values[v0],
                corner_values[v1],
                iso_value,
            );
        }
    }

    let mut triangles = Vec::new();
    let tri_list = &TRI_TABLE[cube_index];
    let mut n = 0;
    while n < 16 && tri_list[n] != -1 {
        triangles.push([
            edge_vertices[tri_list[n] as usize],
            edge_vertices[tri_list[n + 1] as usize],
            edge_vertices[tri_list[n + 2] as usize],
        ]);
        n += 3;
    }

    triangles
}

/// Extract an isosurface mesh from a dense volume.
///
/// `volume` holds `h * w * t` values in row-major order (first axis
/// outermost). Returns [`CoreError::NoIsosurface`] when no cell crosses the
/// threshold, e.g. when the threshold lies outside the volume's value range.
pub fn extract_mesh(volume: &[f32], dims: (usize, usize, usize), threshold: f32) -> Result<Mesh> {
    let (h, w, t) = dims;

    if volume.len() != h * w * t {
        return Err(CoreError::ShapeMismatch {
            expected: h * w * t,
            got: volume.len(),
        });
    }
    if h < 2 || w < 2 || t < 2 {
        return Err(CoreError::DegenerateVolume { h, w, t });
    }

    let mut mesh = Mesh::default();

    for i in 0..h - 1 {
        for j in 0..w - 1 {
            for k in 0..t - 1 {
                for tri in cell_triangles(volume, dims, (i, j, k), threshold) {
                    let base = mesh.vertices.len() as u32;
                    for p in &tri {
                        mesh.vertices.push([p.x, p.y, p.z]);
                    }
                    mesh.triangles.push([base, base + 1, base + 2]);
                }
            }
        }
    }

    if mesh.is_empty() {
        return Err(CoreError::NoIsosurface { threshold });
    }

    Ok(mesh)
}

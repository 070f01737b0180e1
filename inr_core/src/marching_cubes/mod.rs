//! Marching cubes isosurface extraction.

mod algorithm;
mod tables;

pub use algorithm::{extract_mesh, interpolate_vertex};
pub use tables::{CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES, TRI_TABLE};

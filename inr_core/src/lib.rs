//! # inr_core
//!
//! Pure algorithms for implicit neural representation experiments.
//!
//! This crate holds the framework-free pieces shared by the INR training
//! stack: coordinate grid construction, reconstruction quality metrics, and
//! marching-cubes isosurface extraction over dense volumes. It carries no
//! tensor runtime; everything operates on plain `f32` buffers.
//!
//! ## Modules
//!
//! - [`types`]: Shared data types (GridShape, Point3, Mesh)
//! - [`coords`]: Normalized coordinate grid construction
//! - [`metrics`]: PSNR / IoU / MSE quality metrics
//! - [`marching_cubes`]: Isosurface mesh extraction
//! - [`error`]: Error types
//!
//! ## Usage
//!
//! ```
//! use inr_core::prelude::*;
//!
//! let shape = GridShape::Plane { h: 32, w: 32 };
//! let coords = build_grid(shape);
//! assert_eq!(coords.len(), shape.sample_count() * shape.in_dim());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coords;
pub mod error;
pub mod marching_cubes;
pub mod metrics;
pub mod types;

pub use coords::build_grid;
pub use error::{CoreError, Result};
pub use marching_cubes::extract_mesh;
pub use metrics::{iou, mse, psnr};
pub use types::{GridShape, Mesh, Point3};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::coords::{axis_position, build_grid};
    pub use crate::error::{CoreError, Result};
    pub use crate::marching_cubes::extract_mesh;
    pub use crate::metrics::{iou, mse, psnr};
    pub use crate::types::{GridShape, Mesh, Point3};
}

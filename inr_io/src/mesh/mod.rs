//! Mesh serialization.

mod obj;

pub use obj::{export_obj, export_obj_to_file, MeshStats};

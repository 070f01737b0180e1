//! Postprocessing of trained reconstructions.
//!
//! Bridges the trainer's best reconstruction to marching cubes and OBJ
//! export for occupancy runs.

use std::path::Path;

use inr_core::{extract_mesh, GridShape, Mesh};
use inr_io::{export_obj_to_file, MeshStats, Signal};

use crate::error::{NeuralInrError, Result};

/// Extract an isosurface mesh from a reconstructed volume.
///
/// Fails with [`NeuralInrError::MeshExtraction`] when no isosurface crosses
/// the threshold, and rejects 2D signals outright.
pub fn extract_reconstruction_mesh(volume: &Signal, threshold: f32) -> Result<Mesh> {
    let dims = match volume.shape {
        GridShape::Volume { h, w, t } => (h, w, t),
        GridShape::Plane { .. } => {
            return Err(NeuralInrError::config(
                "mesh extraction requires a 3D volume",
            ))
        }
    };

    Ok(extract_mesh(&volume.data, dims, threshold)?)
}

/// Extract a mesh and write it to an OBJ file.
pub fn save_reconstruction_mesh<P: AsRef<Path>>(
    volume: &Signal,
    threshold: f32,
    path: P,
) -> Result<MeshStats> {
    let mesh = extract_reconstruction_mesh(volume, threshold)?;
    let stats = export_obj_to_file(&mesh, path)?;

    log::info!(
        "extracted mesh: {} vertices, {} triangles",
        stats.vertex_count,
        stats.triangle_count
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_signal(n: usize, radius: f32) -> Signal {
        let mut data = vec![0.0f32; n * n * n];
        let c = (n - 1) as f32 / 2.0;
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    let d = ((i as f32 - c).powi(2)
                        + (j as f32 - c).powi(2)
                        + (k as f32 - c).powi(2))
                    .sqrt();
                    if d <= radius {
                        data[(i * n + j) * n + k] = 1.0;
                    }
                }
            }
        }
        Signal {
            data,
            shape: GridShape::Volume { h: n, w: n, t: n },
            channels: 1,
        }
    }

    #[test]
    fn test_sphere_meshes_at_half() {
        let volume = sphere_signal(12, 4.0);
        let mesh = extract_reconstruction_mesh(&volume, 0.5).unwrap();
        assert!(mesh.vertex_count() > 0);
    }

    #[test]
    fn test_threshold_above_max_fails() {
        let volume = sphere_signal(8, 2.5);
        let err = extract_reconstruction_mesh(&volume, 1.1).unwrap_err();
        assert!(matches!(err, NeuralInrError::MeshExtraction(_)));
    }

    #[test]
    fn test_plane_rejected() {
        let plane = Signal {
            data: vec![1.0; 16],
            shape: GridShape::Plane { h: 4, w: 4 },
            channels: 1,
        };
        let err = extract_reconstruction_mesh(&plane, 0.5).unwrap_err();
        assert!(matches!(err, NeuralInrError::InvalidConfig { .. }));
    }

    #[test]
    fn test_save_mesh_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sphere.obj");

        let volume = sphere_signal(12, 4.0);
        let stats = save_reconstruction_mesh(&volume, 0.5, &path).unwrap();

        assert!(stats.triangle_count > 0);
        assert!(path.exists());
    }
}

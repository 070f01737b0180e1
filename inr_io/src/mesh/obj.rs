//! Wavefront OBJ export for extracted isosurface meshes.

use std::io::Write;
use std::path::Path;

use inr_core::Mesh;

use crate::error::Result;

/// Mesh statistics returned by export functions.
#[derive(Debug, Clone, Copy)]
pub struct MeshStats {
    /// Number of vertices written.
    pub vertex_count: usize,
    /// Number of triangles written.
    pub triangle_count: usize,
}

/// Export a mesh as Wavefront OBJ.
///
/// Faces use OBJ's 1-based vertex indexing.
pub fn export_obj<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<MeshStats> {
    writeln!(writer, "# INR isosurface export")?;
    writeln!(writer, "# {} vertices", mesh.vertex_count())?;
    writeln!(writer, "# {} faces", mesh.triangle_count())?;
    writeln!(writer)?;

    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v[0], v[1], v[2])?;
    }

    writeln!(writer)?;

    for f in &mesh.triangles {
        writeln!(writer, "f {} {} {}", f[0] + 1, f[1] + 1, f[2] + 1)?;
    }

    Ok(MeshStats {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
    })
}

/// Export a mesh to an OBJ file.
pub fn export_obj_to_file<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<MeshStats> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    export_obj(mesh, &mut file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_mesh() -> Mesh {
        Mesh {
            vertices: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            triangles: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn test_export_obj_basic() {
        let mesh = make_mesh();
        let mut output = Vec::new();

        let stats = export_obj(&mesh, &mut output).unwrap();
        assert_eq!(stats.vertex_count, 3);
        assert_eq!(stats.triangle_count, 1);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("v 0 0 0"));
        assert!(text.contains("f 1 2 3"));
    }

    #[test]
    fn test_export_obj_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("surface.obj");

        let stats = export_obj_to_file(&make_mesh(), &path).unwrap();
        assert_eq!(stats.triangle_count, 1);
        assert!(path.exists());
    }

    #[test]
    fn test_export_empty_mesh() {
        let mut output = Vec::new();
        let stats = export_obj(&Mesh::default(), &mut output).unwrap();
        assert_eq!(stats.vertex_count, 0);
        assert_eq!(stats.triangle_count, 0);
    }
}

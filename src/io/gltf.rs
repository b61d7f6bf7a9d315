//! glTF import
//!
//! Loads triangle primitives from `.gltf` and `.glb` files into a single
//! [`PolyMesh`]. Node transforms are ignored; positions are taken as stored.

use std::path::Path;

use glam::Vec3;

use super::document::DocumentError;
use crate::mesh::PolyMesh;

/// Load every triangle primitive of a glTF file into one mesh.
///
/// Triangle lists, strips and fans are converted to triangles. Point and
/// line primitives are skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be imported or holds no triangles
pub fn load_gltf(path: impl AsRef<Path>) -> Result<PolyMesh, DocumentError> {
    let path = path.as_ref();

    let (document, buffers, _images) = ::gltf::import(path)
        .map_err(|e| DocumentError::ImportError(format!("{}: {e}", path.display())))?;

    let mut positions: Vec<Vec3> = Vec::new();
    let mut triangles: Vec<[u32; 3]> = Vec::new();

    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let Some(primitive_positions) = reader.read_positions() else {
                continue;
            };

            let offset = positions.len() as u32;
            positions.extend(primitive_positions.map(Vec3::from));
            let count = positions.len() as u32 - offset;

            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..count).collect(),
            };

            let before = triangles.len();
            triangulate(primitive.mode(), &indices, offset, &mut triangles);
            log::debug!(
                "Primitive {} of mesh {}: {} vertices, {} triangles",
                primitive.index(),
                mesh.index(),
                count,
                triangles.len() - before
            );
        }
    }

    if triangles.is_empty() {
        return Err(DocumentError::ImportError(format!(
            "{} contains no triangle meshes",
            path.display()
        )));
    }

    log::info!(
        "Imported {} vertices and {} triangles from {}",
        positions.len(),
        triangles.len(),
        path.display()
    );

    Ok(PolyMesh::from_polygons(positions, triangles))
}

/// Convert a primitive's index stream into triangles
fn triangulate(mode: ::gltf::mesh::Mode, indices: &[u32], offset: u32, out: &mut Vec<[u32; 3]>) {
    match mode {
        ::gltf::mesh::Mode::Triangles => {
            for chunk in indices.chunks_exact(3) {
                out.push([chunk[0] + offset, chunk[1] + offset, chunk[2] + offset]);
            }
        }
        ::gltf::mesh::Mode::TriangleStrip => {
            for i in 0..indices.len().saturating_sub(2) {
                if i % 2 == 0 {
                    out.push([
                        indices[i] + offset,
                        indices[i + 1] + offset,
                        indices[i + 2] + offset,
                    ]);
                } else {
                    // Odd triangles flip to keep the winding
                    out.push([
                        indices[i] + offset,
                        indices[i + 2] + offset,
                        indices[i + 1] + offset,
                    ]);
                }
            }
        }
        ::gltf::mesh::Mode::TriangleFan => {
            for i in 1..indices.len().saturating_sub(1) {
                out.push([indices[0] + offset, indices[i] + offset, indices[i + 1] + offset]);
            }
        }
        _ => {}
    }
}

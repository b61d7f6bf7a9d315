//! Edge-aware face unwrapping
//!
//! This crate lays out polygon mesh faces in texture space by unfolding them
//! from a seed face across shared edges:
//! - Mesh access through the [`FaceSource`](mesh::FaceSource) trait
//! - Breadth-first unfolding that keeps each face's shape
//! - Island handling policies and per-run statistics
//! - RON/JSON documents, glTF import and PNG layout previews

pub mod core;
pub mod io;
pub mod mesh;
pub mod unwrap;

// Re-exports for convenience
pub use glam;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::core::{IslandPolicy, UnwrapConfig, UnwrapStats};
    pub use crate::io::{DocumentError, MeshDocument, PreviewStyle, load_gltf};
    pub use crate::mesh::{FaceId, FaceSource, PolyMesh, VertexId};
    pub use crate::unwrap::{FaceUnwrapper, UnwrapError, UnwrapResult, UnwrappedFace, unwrap_faces};
    pub use glam::{Vec2, Vec3};
}

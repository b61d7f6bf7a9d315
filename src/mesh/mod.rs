//! Mesh module
//!
//! Handles, the read-only [`FaceSource`] view the unwrapper consumes, and a
//! reference polygon mesh implementing it.

mod handle;
mod poly;
mod source;

pub use handle::{FaceId, VertexId};
pub use poly::{PolyFace, PolyMesh};
pub use source::{FaceSource, FaceVertices};

//! Mesh access trait used by the unwrapper
//!
//! The unwrapper never owns mesh data. Anything that can enumerate a face's
//! vertices and report vertex positions can be unwrapped.

use std::hash::Hash;

use glam::Vec3;
use smallvec::SmallVec;

/// Ordered vertex handles of a single face
pub type FaceVertices<V> = SmallVec<[V; 4]>;

/// Read-only view of a polygon mesh.
///
/// Implementors map opaque face and vertex handles to topology and geometry.
/// Handle types only need to be copyable, hashable and comparable.
pub trait FaceSource {
    /// Face handle type
    type Face: Copy + Eq + Hash;
    /// Vertex handle type
    type Vertex: Copy + Eq + Hash;

    /// Whether the face handle still refers to a live face
    fn is_valid(&self, face: Self::Face) -> bool;

    /// Vertex handles of a face, in winding order.
    ///
    /// Only called for faces where [`is_valid`](Self::is_valid) returned true.
    fn face_vertices(&self, face: Self::Face) -> FaceVertices<Self::Vertex>;

    /// Position of a vertex
    fn vertex_position(&self, vertex: Self::Vertex) -> Vec3;
}

impl<S: FaceSource + ?Sized> FaceSource for &S {
    type Face = S::Face;
    type Vertex = S::Vertex;

    fn is_valid(&self, face: Self::Face) -> bool {
        (**self).is_valid(face)
    }

    fn face_vertices(&self, face: Self::Face) -> FaceVertices<Self::Vertex> {
        (**self).face_vertices(face)
    }

    fn vertex_position(&self, vertex: Self::Vertex) -> Vec3 {
        (**self).vertex_position(vertex)
    }
}

//! Face and vertex handles
//!
//! Provides lightweight, copyable handles for referencing mesh elements
//! without borrowing the mesh.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A handle to a face of a [`PolyMesh`](super::PolyMesh).
///
/// Handles stay cheap to copy and hash. A handle may become invalid when its
/// face is removed; check with [`FaceSource::is_valid`](super::FaceSource::is_valid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceId(u32);

impl FaceId {
    /// Create a handle from a raw index
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index of this handle
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// A handle to a vertex of a [`PolyMesh`](super::PolyMesh).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(u32);

impl VertexId {
    /// Create a handle from a raw index
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index of this handle
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_handle_index() {
        assert_eq!(FaceId::new(7).index(), 7);
        assert_eq!(VertexId::new(3).index(), 3);
    }

    #[test]
    fn test_handle_hash_and_display() {
        let mut set = FxHashSet::default();
        set.insert(FaceId::new(1));
        set.insert(FaceId::new(1));
        set.insert(FaceId::new(2));
        assert_eq!(set.len(), 2);

        assert_eq!(FaceId::new(4).to_string(), "f4");
        assert_eq!(VertexId::new(9).to_string(), "v9");
    }
}

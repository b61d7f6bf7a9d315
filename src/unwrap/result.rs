//! Unwrap output

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::UnwrapStats;

/// A placed face and its corners in the result's index space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnwrappedFace<F> {
    /// Face handle as passed to the unwrapper
    pub face: F,
    /// Indices into [`UnwrapResult::positions`] and [`UnwrapResult::uvs`], in winding order
    pub indices: Vec<usize>,
    /// Island the face was laid out in, counting from zero
    pub island: usize,
}

/// Result of unwrapping a set of faces.
///
/// `positions` and `uvs` share one index space with an entry per
/// `(face, vertex)` occurrence. Dropped faces still own entries in both
/// tables, but their UVs stay `None` and they are absent from `faces`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnwrapResult<F> {
    /// 3D position of each corner
    pub positions: Vec<Vec3>,
    /// Layout coordinate of each corner, `None` where never placed
    pub uvs: Vec<Option<Vec2>>,
    /// Placed faces, in input order. A handle repeated in the input appears once.
    pub faces: Vec<UnwrappedFace<F>>,
    /// Run counters
    pub stats: UnwrapStats,
}

impl<F> Default for UnwrapResult<F> {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            uvs: Vec::new(),
            faces: Vec::new(),
            stats: UnwrapStats::default(),
        }
    }
}

impl<F> UnwrapResult<F> {
    /// Get the number of placed faces
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Check if no face was placed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Get the layout coordinate of a corner
    #[must_use]
    pub fn uv(&self, index: usize) -> Option<Vec2> {
        self.uvs.get(index).copied().flatten()
    }

    /// Index lists of all placed faces, in output order
    pub fn face_indices(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.faces.iter().map(|face| face.indices.as_slice())
    }

    /// Layout coordinates of the `n`th placed face, in winding order
    #[must_use]
    pub fn face_uvs(&self, n: usize) -> Option<Vec<Vec2>> {
        self.faces
            .get(n)?
            .indices
            .iter()
            .map(|&i| self.uv(i))
            .collect()
    }

    /// Find the output entry of a face handle
    #[must_use]
    pub fn find_face(&self, face: &F) -> Option<&UnwrappedFace<F>>
    where
        F: PartialEq,
    {
        self.faces.iter().find(|entry| entry.face == *face)
    }

    /// Number of islands in the layout
    #[must_use]
    pub fn island_count(&self) -> usize {
        self.stats.islands
    }

    /// Bounds of all placed faces' coordinates as (min, max).
    ///
    /// Returns `None` if no face was placed.
    #[must_use]
    pub fn uv_bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut corners = self.face_indices().flatten().filter_map(|&i| self.uv(i));
        let first = corners.next()?;

        Some(corners.fold((first, first), |(min, max), uv| (min.min(uv), max.max(uv))))
    }
}

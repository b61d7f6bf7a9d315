//! Write-once UV storage

use glam::Vec2;

/// UV coordinates indexed like the face graph's position table.
///
/// Every slot starts unset and keeps the first value written to it.
#[derive(Debug, Clone)]
pub(crate) struct UvTable {
    coords: Vec<Option<Vec2>>,
}

impl UvTable {
    /// Create a table with `len` unset slots
    pub fn new(len: usize) -> Self {
        Self {
            coords: vec![None; len],
        }
    }

    /// Get the coordinate at `index`, if it has been placed
    #[inline]
    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.coords.get(index).copied().flatten()
    }

    /// Assign `uv` to an unset slot.
    ///
    /// Returns false and leaves the slot untouched if it was already placed.
    pub fn place(&mut self, index: usize, uv: Vec2) -> bool {
        let Some(slot) = self.coords.get_mut(index) else {
            return false;
        };

        if slot.is_some() {
            log::debug!("UV slot {index} already placed, keeping first value");
            return false;
        }

        *slot = Some(uv);
        true
    }

    /// Consume the table
    pub fn into_inner(self) -> Vec<Option<Vec2>> {
        self.coords
    }
}

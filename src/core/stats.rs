//! Unwrap statistics
//!
//! Every face the unwrapper drops is counted here, so callers can tell a
//! complete layout from a partial one without parsing logs.

use serde::{Deserialize, Serialize};

/// Counters collected during a single unwrap run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnwrapStats {
    /// Face handles passed in
    pub input_faces: usize,
    /// Handles the mesh reported as invalid
    pub invalid_faces: usize,
    /// Handles repeating an earlier handle
    pub duplicate_faces: usize,
    /// Valid faces with fewer than three corners
    pub degenerate_faces: usize,
    /// Faces that received UVs
    pub placed_faces: usize,
    /// Faces left unplaced when the retry budget ran out
    pub abandoned_faces: usize,
    /// Number of seeded islands
    pub islands: usize,
    /// Total placement attempts, successful or not
    pub attempts: usize,
}

impl UnwrapStats {
    /// Faces absent from the output for any reason
    #[must_use]
    pub fn dropped_faces(&self) -> usize {
        self.invalid_faces + self.duplicate_faces + self.degenerate_faces + self.abandoned_faces
    }

    /// Whether every valid, non-degenerate face was placed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.degenerate_faces == 0 && self.abandoned_faces == 0
    }

    /// Get a formatted stats string
    #[must_use]
    pub fn format_stats(&self) -> String {
        format!(
            "Faces: {}/{} placed | Islands: {} | Dropped: {} (invalid: {}, duplicate: {}, degenerate: {}, abandoned: {}) | Attempts: {}",
            self.placed_faces,
            self.input_faces,
            self.islands,
            self.dropped_faces(),
            self.invalid_faces,
            self.duplicate_faces,
            self.degenerate_faces,
            self.abandoned_faces,
            self.attempts
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropped_faces() {
        let stats = UnwrapStats {
            input_faces: 10,
            invalid_faces: 1,
            duplicate_faces: 1,
            degenerate_faces: 2,
            placed_faces: 4,
            abandoned_faces: 2,
            islands: 1,
            attempts: 30,
        };

        assert_eq!(stats.dropped_faces(), 6);
        assert!(!stats.is_complete());
        assert!(stats.format_stats().starts_with("Faces: 4/10 placed"));
    }

    #[test]
    fn test_default_is_complete() {
        assert!(UnwrapStats::default().is_complete());
    }
}

//! Unwrap configuration

use serde::{Deserialize, Serialize};

/// Default 3D distance under which two corners count as the same point
pub const DEFAULT_EDGE_TOLERANCE: f32 = 0.001;

/// Default retry budget, as a multiple of the input face count
pub const DEFAULT_ATTEMPT_FACTOR: usize = 3;

/// What to do with faces the seed face cannot reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IslandPolicy {
    /// Only lay out the island containing the seed; drop the rest
    #[default]
    SeedOnly,
    /// Start a new island from the first unreachable face until all are placed
    Reseed,
    /// Like `SeedOnly`, but fail if any face is dropped
    Strict,
}

/// Unwrapper configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnwrapConfig {
    /// Maximum 3D distance between corners considered coincident
    pub edge_tolerance: f32,
    /// Consecutive failed placements allowed, per input face, before giving up
    pub attempt_factor: usize,
    /// Handling of disconnected islands
    pub island_policy: IslandPolicy,
}

impl Default for UnwrapConfig {
    fn default() -> Self {
        Self {
            edge_tolerance: DEFAULT_EDGE_TOLERANCE,
            attempt_factor: DEFAULT_ATTEMPT_FACTOR,
            island_policy: IslandPolicy::SeedOnly,
        }
    }
}

impl UnwrapConfig {
    /// Set the corner matching tolerance
    #[must_use]
    pub fn with_edge_tolerance(mut self, tolerance: f32) -> Self {
        self.edge_tolerance = tolerance;
        self
    }

    /// Set the retry budget factor
    #[must_use]
    pub fn with_attempt_factor(mut self, factor: usize) -> Self {
        self.attempt_factor = factor;
        self
    }

    /// Set the island policy
    #[must_use]
    pub fn with_island_policy(mut self, policy: IslandPolicy) -> Self {
        self.island_policy = policy;
        self
    }

    /// Attempt budget for a run over `face_count` input faces
    #[must_use]
    pub fn max_attempts(&self, face_count: usize) -> usize {
        self.attempt_factor.saturating_mul(face_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = UnwrapConfig::default()
            .with_edge_tolerance(0.01)
            .with_attempt_factor(5)
            .with_island_policy(IslandPolicy::Reseed);

        assert!((config.edge_tolerance - 0.01).abs() < f32::EPSILON);
        assert_eq!(config.max_attempts(4), 20);
        assert_eq!(config.island_policy, IslandPolicy::Reseed);
    }

    #[test]
    fn test_config_partial_ron() {
        let config: UnwrapConfig = ron::from_str("(island_policy: Strict)").unwrap();

        assert_eq!(config.island_policy, IslandPolicy::Strict);
        assert_eq!(config.attempt_factor, DEFAULT_ATTEMPT_FACTOR);
        assert!((config.edge_tolerance - DEFAULT_EDGE_TOLERANCE).abs() < f32::EPSILON);
    }
}

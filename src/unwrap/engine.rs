//! Breadth-first face unwrapper
//!
//! Lays out a set of faces by seeding the first valid face flat and then
//! hinging neighbours open across shared edges, one face at a time.
//!
//! A first face with fewer than three corners seeds nothing, so every other
//! face ends up abandoned. Only [`IslandPolicy::Reseed`] skips ahead to the
//! next face that can be laid flat.
//!
//! # Ordering
//!
//! The layout depends on which shared edge is found first, so every search
//! runs in a fixed order:
//!
//! - pending faces are retried first-in first-out,
//! - placed faces are scanned in the order they were placed,
//! - edges are scanned in ring order, pending face outermost.
//!
//! # Retry budget
//!
//! A pending face with no placed neighbour goes to the back of the queue.
//! Each dequeue costs one attempt and each successful placement refunds them
//! all. Once `attempt_factor × input faces` attempts fail in a row, whatever
//! is still queued cannot be reached from the current island.

use std::collections::VecDeque;
use std::fmt;

use crate::core::{IslandPolicy, UnwrapConfig, UnwrapStats};
use crate::mesh::FaceSource;

use super::graph::FaceGraph;
use super::result::{UnwrapResult, UnwrappedFace};
use super::seed::unfold_seed;
use super::table::UvTable;
use super::unfold::{find_shared_edge, unfold_along_edge};

/// Layout state of one face during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaceState {
    /// Not looked at yet
    Unseen,
    /// Waiting for a placed neighbour
    Queued,
    /// Has UVs, as part of the given island
    Processed { island: usize },
    /// Gave up after the retry budget ran out
    Abandoned,
    /// Fewer than three corners, never placed
    Degenerate,
}

/// Unwraps faces of a [`FaceSource`] into a flat layout.
///
/// # Example
///
/// ```
/// use facefold::mesh::PolyMesh;
/// use facefold::unwrap::FaceUnwrapper;
///
/// let cube = PolyMesh::cube(1.0);
/// let faces: Vec<_> = cube.face_ids().collect();
///
/// let result = FaceUnwrapper::new(&cube, &faces).unwrap_to_square().unwrap();
/// assert_eq!(result.len(), 6);
/// ```
pub struct FaceUnwrapper<'a, S: FaceSource + ?Sized> {
    source: &'a S,
    faces: &'a [S::Face],
    config: UnwrapConfig,
}

impl<'a, S: FaceSource + ?Sized> FaceUnwrapper<'a, S> {
    /// Create an unwrapper over `faces` of `source` with default settings
    pub fn new(source: &'a S, faces: &'a [S::Face]) -> Self {
        Self {
            source,
            faces,
            config: UnwrapConfig::default(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: UnwrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the unwrap.
    ///
    /// Malformed input never fails under [`IslandPolicy::SeedOnly`] or
    /// [`IslandPolicy::Reseed`]: invalid, repeated, degenerate and unreachable
    /// faces are left out of the result and counted in its stats.
    ///
    /// # Errors
    ///
    /// Under [`IslandPolicy::Strict`], returns an error if any valid face
    /// could not be placed.
    pub fn unwrap_to_square(&self) -> Result<UnwrapResult<S::Face>, UnwrapError> {
        let graph = FaceGraph::build(self.source, self.faces);
        let mut run = Run::new(&graph, &self.config);

        run.stats.input_faces = self.faces.len();
        run.stats.invalid_faces = graph.invalid;
        run.stats.duplicate_faces = graph.duplicates;

        run.mark_degenerate();

        let seeded = match self.config.island_policy {
            IslandPolicy::Reseed => run.seed_next(),
            IslandPolicy::SeedOnly | IslandPolicy::Strict => run.seed_first(),
        };
        run.enqueue_unseen();

        if seeded {
            let max_attempts = self.config.max_attempts(self.faces.len());

            loop {
                run.propagate(max_attempts);

                if run.queue.is_empty() || self.config.island_policy != IslandPolicy::Reseed {
                    break;
                }

                log::debug!(
                    "{} faces unreachable from island {}, reseeding",
                    run.queue.len(),
                    run.island
                );
                run.reseed_from_queue();
            }
        }

        run.abandon_queued();

        let result = run.finish();
        log::info!("Unwrap finished: {}", result.stats.format_stats());

        if self.config.island_policy == IslandPolicy::Strict {
            check_strict(&result.stats)?;
        }

        Ok(result)
    }
}

fn check_strict(stats: &UnwrapStats) -> Result<(), UnwrapError> {
    if stats.degenerate_faces > 0 {
        return Err(UnwrapError::DegenerateFaces {
            count: stats.degenerate_faces,
        });
    }
    if stats.abandoned_faces > 0 {
        return Err(UnwrapError::UnreachableFaces {
            count: stats.abandoned_faces,
        });
    }
    Ok(())
}

/// Mutable state of a single unwrap run
struct Run<'g, F> {
    graph: &'g FaceGraph<F>,
    tolerance: f32,
    uvs: UvTable,
    states: Vec<FaceState>,
    /// Placed faces in placement order
    placed: Vec<usize>,
    queue: VecDeque<usize>,
    /// Island currently being grown
    island: usize,
    stats: UnwrapStats,
}

impl<'g, F: Copy> Run<'g, F> {
    fn new(graph: &'g FaceGraph<F>, config: &UnwrapConfig) -> Self {
        Self {
            graph,
            tolerance: config.edge_tolerance,
            uvs: UvTable::new(graph.positions.len()),
            states: vec![FaceState::Unseen; graph.faces.len()],
            placed: Vec::with_capacity(graph.faces.len()),
            queue: VecDeque::with_capacity(graph.faces.len()),
            island: 0,
            stats: UnwrapStats::default(),
        }
    }

    fn mark_degenerate(&mut self) {
        let graph = self.graph;
        for (i, face) in graph.faces.iter().enumerate() {
            if face.is_degenerate() {
                log::warn!(
                    "Face #{i} has {} corners and cannot be unwrapped",
                    face.indices.len()
                );
                self.states[i] = FaceState::Degenerate;
                self.stats.degenerate_faces += 1;
            }
        }
    }

    /// Seed the first valid face, placing nothing when it is degenerate
    fn seed_first(&mut self) -> bool {
        match self.states.first() {
            Some(FaceState::Unseen) => {
                self.seed(0);
                true
            }
            Some(FaceState::Degenerate) => {
                log::warn!("First face is degenerate, nothing can be unfolded from it");
                false
            }
            _ => false,
        }
    }

    /// Seed the first unseen face, in input order
    fn seed_next(&mut self) -> bool {
        let Some(seed) = self.states.iter().position(|&s| s == FaceState::Unseen) else {
            return false;
        };

        self.seed(seed);
        true
    }

    fn seed(&mut self, face: usize) {
        let graph = self.graph;
        if unfold_seed(&graph.positions, &graph.faces[face].indices, &mut self.uvs) {
            log::debug!("Seeded island {} with face #{face}", self.stats.islands);
            self.island = self.stats.islands;
            self.stats.islands += 1;
            self.mark_placed(face);
        }
    }

    fn enqueue_unseen(&mut self) {
        for (i, state) in self.states.iter_mut().enumerate() {
            if *state == FaceState::Unseen {
                *state = FaceState::Queued;
                self.queue.push_back(i);
            }
        }
    }

    /// Drain the queue until it empties or `max_attempts` fail in a row
    fn propagate(&mut self, max_attempts: usize) {
        let mut attempts = 0;

        while attempts < max_attempts {
            let Some(face) = self.queue.pop_front() else {
                break;
            };
            attempts += 1;
            self.stats.attempts += 1;

            if self.try_unfold(face) {
                attempts = 0;
            } else {
                self.queue.push_back(face);
            }
        }
    }

    fn try_unfold(&mut self, face: usize) -> bool {
        let graph = self.graph;
        let positions = &graph.positions;
        let indices = &graph.faces[face].indices;

        let shared = self.placed.iter().find_map(|&other| {
            find_shared_edge(
                positions,
                &self.uvs,
                indices,
                &graph.faces[other].indices,
                self.tolerance,
            )
        });

        let Some(edge) = shared else {
            return false;
        };

        unfold_along_edge(positions, indices, &edge, &mut self.uvs);
        self.mark_placed(face);
        true
    }

    /// Pull the earliest input face out of the queue and seed it
    fn reseed_from_queue(&mut self) {
        let Some(position) = self
            .queue
            .iter()
            .enumerate()
            .min_by_key(|&(_, &face)| face)
            .map(|(position, _)| position)
        else {
            return;
        };

        if let Some(face) = self.queue.remove(position) {
            self.seed(face);
        }
    }

    fn abandon_queued(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        log::warn!(
            "Abandoning {} faces not connected to the seeded island",
            self.queue.len()
        );
        for face in self.queue.drain(..) {
            self.states[face] = FaceState::Abandoned;
            self.stats.abandoned_faces += 1;
        }
    }

    fn mark_placed(&mut self, face: usize) {
        self.states[face] = FaceState::Processed {
            island: self.island,
        };
        self.placed.push(face);
        self.stats.placed_faces += 1;
    }

    fn finish(self) -> UnwrapResult<F> {
        let faces = self
            .graph
            .faces
            .iter()
            .zip(&self.states)
            .filter_map(|(face, state)| match *state {
                FaceState::Processed { island } => Some(UnwrappedFace {
                    face: face.handle,
                    indices: face.indices.to_vec(),
                    island,
                }),
                _ => None,
            })
            .collect();

        UnwrapResult {
            positions: self.graph.positions.clone(),
            uvs: self.uvs.into_inner(),
            faces,
            stats: self.stats,
        }
    }
}

/// Errors returned by [`FaceUnwrapper::unwrap_to_square`] under [`IslandPolicy::Strict`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnwrapError {
    /// Faces with fewer than three corners were present
    DegenerateFaces { count: usize },
    /// Faces could not be reached from the seed face
    UnreachableFaces { count: usize },
}

impl fmt::Display for UnwrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateFaces { count } => {
                write!(f, "{count} faces have fewer than three corners")
            }
            Self::UnreachableFaces { count } => {
                write!(f, "{count} faces are not connected to the seed face")
            }
        }
    }
}

impl std::error::Error for UnwrapError {}

/// Unwrap `faces` of `source` with default settings.
///
/// Never fails: dropped faces are reported in the result's stats.
pub fn unwrap_faces<S: FaceSource + ?Sized>(
    source: &S,
    faces: &[S::Face],
) -> UnwrapResult<S::Face> {
    FaceUnwrapper::new(source, faces)
        .unwrap_to_square()
        .unwrap_or_default()
}

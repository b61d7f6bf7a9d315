//! Face unwrapping
//!
//! Flattens connected mesh faces into a 2D layout by unfolding them outward
//! from a seed face across shared edges:
//! - Face graph construction with per-face corner copies
//! - Seed face projection onto its own plane
//! - Breadth-first hinge unfolding with a retry budget

mod engine;
mod graph;
mod result;
mod seed;
mod table;
mod unfold;

pub use engine::{FaceUnwrapper, UnwrapError, unwrap_faces};
pub use result::{UnwrapResult, UnwrappedFace};

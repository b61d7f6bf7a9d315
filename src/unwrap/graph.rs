//! Face graph construction
//!
//! Flattens the input faces into an arena: one position entry per
//! `(face, vertex handle)` occurrence and one index ring per face. Keying on
//! the pair rather than the vertex alone lets a vertex shared by several
//! faces land at different UVs per face.

use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::mesh::FaceSource;

/// Index ring of a face into the position table
pub(crate) type IndexRing = SmallVec<[usize; 4]>;

/// A valid input face after flattening
#[derive(Debug, Clone)]
pub(crate) struct GraphFace<F> {
    /// Handle as supplied by the caller
    pub handle: F,
    /// Indices into [`FaceGraph::positions`], in winding order
    pub indices: IndexRing,
}

impl<F> GraphFace<F> {
    /// Faces with fewer than three corners cannot be laid out
    pub fn is_degenerate(&self) -> bool {
        self.indices.len() < 3
    }
}

/// Flattened topology and geometry of the faces being unwrapped
#[derive(Debug, Clone)]
pub(crate) struct FaceGraph<F> {
    /// One entry per unique `(face, vertex)` occurrence
    pub positions: Vec<Vec3>,
    /// Valid faces, in input order
    pub faces: Vec<GraphFace<F>>,
    /// Number of input handles rejected by the source
    pub invalid: usize,
    /// Number of input handles that repeated an earlier one
    pub duplicates: usize,
}

impl<F: Copy + Eq + std::hash::Hash> FaceGraph<F> {
    /// Build the graph for `faces`, querying `source` for topology and positions
    pub fn build<S>(source: &S, faces: &[F]) -> Self
    where
        S: FaceSource<Face = F> + ?Sized,
    {
        let mut positions = Vec::new();
        let mut graph_faces = Vec::with_capacity(faces.len());
        let mut index_of: FxHashMap<(F, S::Vertex), usize> = FxHashMap::default();
        let mut seen: FxHashSet<F> = FxHashSet::default();
        let mut invalid = 0;
        let mut duplicates = 0;

        for &face in faces {
            if !source.is_valid(face) {
                invalid += 1;
                continue;
            }
            if !seen.insert(face) {
                duplicates += 1;
                continue;
            }

            let indices = source
                .face_vertices(face)
                .into_iter()
                .map(|vertex| {
                    *index_of.entry((face, vertex)).or_insert_with(|| {
                        positions.push(source.vertex_position(vertex));
                        positions.len() - 1
                    })
                })
                .collect();

            graph_faces.push(GraphFace {
                handle: face,
                indices,
            });
        }

        Self {
            positions,
            faces: graph_faces,
            invalid,
            duplicates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{FaceId, PolyMesh};

    #[test]
    fn test_shared_vertices_are_split_per_face() {
        let grid = PolyMesh::grid(2, 1, 1.0);
        let faces: Vec<FaceId> = grid.face_ids().collect();
        let graph = FaceGraph::build(&grid, &faces);

        // 6 grid vertices, but each quad gets its own four entries
        assert_eq!(graph.positions.len(), 8);
        assert_eq!(graph.faces.len(), 2);
        assert_eq!(graph.faces[0].indices.as_slice(), &[0, 1, 2, 3]);
        assert_eq!(graph.faces[1].indices.as_slice(), &[4, 5, 6, 7]);

        // The shared corner keeps its position in both copies
        assert_eq!(graph.positions[1], graph.positions[4]);
    }

    #[test]
    fn test_invalid_and_duplicate_faces_are_skipped() {
        let mut grid = PolyMesh::grid(3, 1, 1.0);
        let faces: Vec<FaceId> = grid.face_ids().collect();
        grid.remove_face(faces[1]);

        let input = [faces[0], faces[1], faces[2], faces[0], FaceId::new(99)];
        let graph = FaceGraph::build(&grid, &input);

        assert_eq!(graph.faces.len(), 2);
        assert_eq!(graph.invalid, 2);
        assert_eq!(graph.duplicates, 1);
        assert_eq!(graph.faces[0].handle, faces[0]);
        assert_eq!(graph.faces[1].handle, faces[2]);
    }

    #[test]
    fn test_repeated_vertex_in_face_reuses_index() {
        let mut mesh = PolyMesh::new();
        let a = mesh.add_vertex(Vec3::ZERO);
        let b = mesh.add_vertex(Vec3::X);
        let c = mesh.add_vertex(Vec3::Y);
        let face = mesh.add_face(&[a, b, b, c]).unwrap();

        let graph = FaceGraph::build(&mesh, &[face]);
        assert_eq!(graph.positions.len(), 3);
        assert_eq!(graph.faces[0].indices.as_slice(), &[0, 1, 1, 2]);
    }

    #[test]
    fn test_degenerate_detection() {
        let mut mesh = PolyMesh::new();
        let a = mesh.add_vertex(Vec3::ZERO);
        let b = mesh.add_vertex(Vec3::X);
        let face = mesh.add_face(&[a, b]).unwrap();

        let graph = FaceGraph::build(&mesh, &[face]);
        assert!(graph.faces[0].is_degenerate());
    }
}

//! Indexed polygon mesh
//!
//! A small arena-style mesh that stores positions once and faces as ordered
//! vertex handles. Removed faces keep their slot so outstanding handles turn
//! invalid instead of aliasing a different face.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::handle::{FaceId, VertexId};
use super::source::{FaceSource, FaceVertices};

/// A single polygon of a [`PolyMesh`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyFace {
    /// Vertex handles in winding order
    pub vertices: Vec<VertexId>,
    /// Set once the face has been removed
    #[serde(default)]
    pub removed: bool,
}

/// An indexed polygon mesh with stable handles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyMesh {
    positions: Vec<Vec3>,
    faces: Vec<PolyFace>,
}

impl PolyMesh {
    /// Create a new empty mesh
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from positions and polygons given as position indices.
    ///
    /// Polygons referencing an out-of-range index are dropped.
    #[must_use]
    pub fn from_polygons<P>(positions: Vec<Vec3>, polygons: impl IntoIterator<Item = P>) -> Self
    where
        P: AsRef<[u32]>,
    {
        let mut mesh = Self {
            positions,
            faces: Vec::new(),
        };

        for polygon in polygons {
            let handles: Vec<VertexId> = polygon
                .as_ref()
                .iter()
                .map(|&i| VertexId::new(i))
                .collect();
            if mesh.add_face(&handles).is_none() {
                log::warn!("Dropping polygon with out-of-range vertex index");
            }
        }

        mesh
    }

    /// Create a single square in the XY plane, facing +Z
    #[must_use]
    pub fn quad(size: f32) -> Self {
        let half = size / 2.0;
        Self::from_polygons(
            vec![
                Vec3::new(-half, -half, 0.0),
                Vec3::new(half, -half, 0.0),
                Vec3::new(half, half, 0.0),
                Vec3::new(-half, half, 0.0),
            ],
            [[0_u32, 1, 2, 3]],
        )
    }

    /// Create a cube centered at origin with shared corner vertices.
    ///
    /// All six quads wind counter-clockwise when seen from outside.
    #[must_use]
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let positions = vec![
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];

        let quads: [[u32; 4]; 6] = [
            [4, 5, 6, 7], // Front
            [1, 0, 3, 2], // Back
            [5, 1, 2, 6], // Right
            [0, 4, 7, 3], // Left
            [7, 6, 2, 3], // Top
            [0, 1, 5, 4], // Bottom
        ];

        Self::from_polygons(positions, quads)
    }

    /// Create a flat grid of quads in the XY plane
    #[must_use]
    pub fn grid(columns: u32, rows: u32, cell_size: f32) -> Self {
        let mut positions = Vec::with_capacity(((columns + 1) * (rows + 1)) as usize);
        for y in 0..=rows {
            for x in 0..=columns {
                positions.push(Vec3::new(x as f32 * cell_size, y as f32 * cell_size, 0.0));
            }
        }

        let stride = columns + 1;
        let mut quads = Vec::with_capacity((columns * rows) as usize);
        for y in 0..rows {
            for x in 0..columns {
                let i = y * stride + x;
                quads.push([i, i + 1, i + stride + 1, i + stride]);
            }
        }

        Self::from_polygons(positions, quads)
    }

    /// Add a vertex and return its handle
    pub fn add_vertex(&mut self, position: Vec3) -> VertexId {
        let id = VertexId::new(self.positions.len() as u32);
        self.positions.push(position);
        id
    }

    /// Add a face from vertex handles.
    ///
    /// Returns `None` if any handle does not belong to this mesh.
    pub fn add_face(&mut self, vertices: &[VertexId]) -> Option<FaceId> {
        if vertices.iter().any(|v| v.index() >= self.positions.len()) {
            return None;
        }

        let id = FaceId::new(self.faces.len() as u32);
        self.faces.push(PolyFace {
            vertices: vertices.to_vec(),
            removed: false,
        });
        Some(id)
    }

    /// Remove a face, invalidating its handle.
    ///
    /// Returns true if the face was live
    pub fn remove_face(&mut self, face: FaceId) -> bool {
        match self.faces.get_mut(face.index()) {
            Some(entry) if !entry.removed => {
                entry.removed = true;
                true
            }
            _ => false,
        }
    }

    /// Handles of all live faces, in creation order
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, face)| !face.removed)
            .map(|(i, _)| FaceId::new(i as u32))
    }

    /// Get the number of vertices
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of live faces
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.iter().filter(|face| !face.removed).count()
    }

    /// Check if the mesh has no live faces
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.face_count() == 0
    }

    /// Offset every vertex by `offset`
    pub fn translate(&mut self, offset: Vec3) {
        for position in &mut self.positions {
            *position += offset;
        }
    }

    /// Append another mesh, returning the handles of its faces in this mesh
    pub fn append(&mut self, other: &PolyMesh) -> Vec<FaceId> {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);

        let mut added = Vec::with_capacity(other.faces.len());
        for face in other.faces.iter().filter(|face| !face.removed) {
            let vertices: Vec<VertexId> = face
                .vertices
                .iter()
                .map(|v| VertexId::new(base + v.index() as u32))
                .collect();
            if let Some(id) = self.add_face(&vertices) {
                added.push(id);
            }
        }
        added
    }
}

impl FaceSource for PolyMesh {
    type Face = FaceId;
    type Vertex = VertexId;

    fn is_valid(&self, face: FaceId) -> bool {
        self.faces
            .get(face.index())
            .is_some_and(|entry| !entry.removed)
    }

    fn face_vertices(&self, face: FaceId) -> FaceVertices<VertexId> {
        self.faces
            .get(face.index())
            .map(|entry| entry.vertices.iter().copied().collect())
            .unwrap_or_default()
    }

    fn vertex_position(&self, vertex: VertexId) -> Vec3 {
        self.positions
            .get(vertex.index())
            .copied()
            .unwrap_or(Vec3::ZERO)
    }
}

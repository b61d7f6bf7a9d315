//! Edge matching and edge-relative unfolding
//!
//! A face joins the layout by hinging it flat about an edge it shares with a
//! face that is already placed. The shared edge keeps the UVs of the placed
//! face; every other corner is expressed in the face's own plane relative to
//! that edge and mapped into the edge's 2D frame.

use glam::{Vec2, Vec3};

use super::table::UvTable;

/// An edge of the face being placed that coincides with an edge of a placed face
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SharedEdge {
    /// Start index of the edge on the face being placed
    pub a: usize,
    /// End index of the edge on the face being placed
    pub b: usize,
    /// UV of the placed corner coinciding with `a`
    pub uv_a: Vec2,
    /// UV of the placed corner coinciding with `b`
    pub uv_b: Vec2,
}

/// Consecutive index pairs around a ring, wrapping at the end
fn ring_edges(ring: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    ring.iter()
        .enumerate()
        .map(move |(i, &start)| (start, ring[(i + 1) % ring.len()]))
}

/// Find the first edge of `face` that coincides with an edge of `placed`.
///
/// Edges of `face` are scanned in ring order, and for each of them the edges
/// of `placed` in ring order. Two edges coincide when both endpoints lie
/// within `tolerance` of each other in 3D, in either direction.
pub(crate) fn find_shared_edge(
    positions: &[Vec3],
    uvs: &UvTable,
    face: &[usize],
    placed: &[usize],
    tolerance: f32,
) -> Option<SharedEdge> {
    let near = |i: usize, j: usize| positions[i].distance(positions[j]) < tolerance;

    for (a, b) in ring_edges(face) {
        for (c, d) in ring_edges(placed) {
            let (from, to) = if near(a, c) && near(b, d) {
                (c, d)
            } else if near(a, d) && near(b, c) {
                (d, c)
            } else {
                continue;
            };

            let (Some(uv_a), Some(uv_b)) = (uvs.get(from), uvs.get(to)) else {
                continue;
            };

            return Some(SharedEdge { a, b, uv_a, uv_b });
        }
    }

    None
}

/// Place `face` by hinging it about `edge`.
///
/// The edge endpoints take the matched UVs. The remaining corners are laid
/// out in the face's plane, scaled by the ratio of the edge's 2D and 3D
/// lengths.
pub(crate) fn unfold_along_edge(
    positions: &[Vec3],
    face: &[usize],
    edge: &SharedEdge,
    uvs: &mut UvTable,
) {
    uvs.place(edge.a, edge.uv_a);
    uvs.place(edge.b, edge.uv_b);

    let origin = positions[edge.a];
    let edge_3d = positions[edge.b] - origin;
    let edge_2d = edge.uv_b - edge.uv_a;

    let third = face
        .iter()
        .find(|&&i| i != edge.a && i != edge.b)
        .map_or(origin, |&i| positions[i]);

    let normal = edge_3d.cross(third - origin).normalize_or_zero();
    let local_u = edge_3d.normalize_or_zero();
    let local_v = normal.cross(local_u);

    let length_3d = edge_3d.length();
    let scale = if length_3d > 0.0 {
        edge_2d.length() / length_3d
    } else {
        log::debug!("Zero-length hinge edge ({}, {}), using unit scale", edge.a, edge.b);
        1.0
    };

    let dir = edge_2d.normalize_or_zero();
    let perp = dir.perp();

    for &index in face {
        if index == edge.a || index == edge.b {
            continue;
        }

        let relative = positions[index] - origin;
        let local = Vec2::new(relative.dot(local_u), relative.dot(local_v)) * scale;
        uvs.place(index, edge.uv_a + dir * local.x + perp * local.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unwrap::seed::unfold_seed;

    const EPS: f32 = 1e-5;

    /// Two triangles hinged along (1,0,0)-(0,1,0), each with its own indices
    fn hinged_triangles() -> Vec<Vec3> {
        vec![
            // Triangle A
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            // Triangle B
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
        ]
    }

    #[test]
    fn test_ring_edges_wrap() {
        let edges: Vec<_> = ring_edges(&[4, 7, 9]).collect();
        assert_eq!(edges, vec![(4, 7), (7, 9), (9, 4)]);
    }

    #[test]
    fn test_find_shared_edge_reverse_match() {
        let positions = hinged_triangles();
        let mut uvs = UvTable::new(positions.len());
        unfold_seed(&positions, &[0, 1, 2], &mut uvs);

        let edge = find_shared_edge(&positions, &uvs, &[3, 4, 5], &[0, 1, 2], 0.001).unwrap();

        // B's first edge (0,1,0)->(1,0,0) runs against A's edge 1->2
        assert_eq!((edge.a, edge.b), (3, 4));
        assert_eq!(edge.uv_a, uvs.get(2).unwrap());
        assert_eq!(edge.uv_b, uvs.get(1).unwrap());
    }

    #[test]
    fn test_find_shared_edge_respects_tolerance() {
        let mut positions = hinged_triangles();
        positions[3].x += 0.01;
        let mut uvs = UvTable::new(positions.len());
        unfold_seed(&positions, &[0, 1, 2], &mut uvs);

        assert!(find_shared_edge(&positions, &uvs, &[3, 4, 5], &[0, 1, 2], 0.001).is_none());
        assert!(find_shared_edge(&positions, &uvs, &[3, 4, 5], &[0, 1, 2], 0.1).is_some());
    }

    #[test]
    fn test_unfold_keeps_edge_and_shape() {
        let positions = hinged_triangles();
        let mut uvs = UvTable::new(positions.len());
        unfold_seed(&positions, &[0, 1, 2], &mut uvs);

        let edge = find_shared_edge(&positions, &uvs, &[3, 4, 5], &[0, 1, 2], 0.001).unwrap();
        unfold_along_edge(&positions, &[3, 4, 5], &edge, &mut uvs);

        let b0 = uvs.get(3).unwrap();
        let b1 = uvs.get(4).unwrap();
        let b2 = uvs.get(5).unwrap();

        // Hinge copied from A
        assert_eq!(b0, uvs.get(2).unwrap());
        assert_eq!(b1, uvs.get(1).unwrap());

        // B is equilateral with side sqrt(2)
        let side = std::f32::consts::SQRT_2;
        assert!((b0.distance(b1) - side).abs() < EPS);
        assert!((b1.distance(b2) - side).abs() < EPS);
        assert!((b2.distance(b0) - side).abs() < EPS);

        // The apex lands on the far side of the hinge from A's right angle
        let hinge = b1 - b0;
        let side_of = |p: Vec2| hinge.perp_dot(p - b0);
        assert!(side_of(b2) * side_of(uvs.get(0).unwrap()) < 0.0);
    }

    #[test]
    fn test_unfold_zero_length_edge_uses_unit_scale() {
        let positions = vec![Vec3::ZERO, Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0)];
        let mut uvs = UvTable::new(3);
        let edge = SharedEdge {
            a: 0,
            b: 1,
            uv_a: Vec2::new(1.0, 1.0),
            uv_b: Vec2::new(1.0, 1.0),
        };

        unfold_along_edge(&positions, &[0, 1, 2], &edge, &mut uvs);

        // No direction to hinge about: the corner collapses onto the edge
        let apex = uvs.get(2).unwrap();
        assert!(apex.is_finite());
        assert!((apex - Vec2::new(1.0, 1.0)).length() < EPS);
    }
}

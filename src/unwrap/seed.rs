//! Seed face layout
//!
//! The first face of each island is projected onto its own plane, so it
//! lands in UV space without distortion.

use glam::{Vec2, Vec3};

use super::table::UvTable;

/// Orthonormal in-plane basis of a face, anchored at its first corner
#[derive(Debug, Clone, Copy)]
struct PlaneBasis {
    origin: Vec3,
    u: Vec3,
    v: Vec3,
}

impl PlaneBasis {
    /// Basis from the first two edges: `u` follows corner 0 to corner 1
    fn from_corners(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        let u = (p1 - p0).normalize_or_zero();
        let normal = u.cross((p2 - p0).normalize_or_zero()).normalize_or_zero();
        let v = normal.cross(u);
        Self { origin: p0, u, v }
    }

    /// Project a point into the plane's 2D coordinates
    #[inline]
    fn project(&self, point: Vec3) -> Vec2 {
        let relative = point - self.origin;
        Vec2::new(relative.dot(self.u), relative.dot(self.v))
    }
}

/// Lay out a seed face. Returns false for faces with fewer than three corners.
pub(crate) fn unfold_seed(positions: &[Vec3], indices: &[usize], uvs: &mut UvTable) -> bool {
    let &[i0, i1, i2, ..] = indices else {
        return false;
    };

    let basis = PlaneBasis::from_corners(positions[i0], positions[i1], positions[i2]);
    for &index in indices {
        uvs.place(index, basis.project(positions[index]));
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_seed_right_triangle() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let mut uvs = UvTable::new(3);

        assert!(unfold_seed(&positions, &[0, 1, 2], &mut uvs));

        let a = uvs.get(0).unwrap();
        let b = uvs.get(1).unwrap();
        let c = uvs.get(2).unwrap();
        assert!(a.length() < EPS);
        assert!((b - Vec2::new(1.0, 0.0)).length() < EPS);
        assert!((c - Vec2::new(0.0, 1.0)).length() < EPS);
    }

    #[test]
    fn test_seed_preserves_shape_of_tilted_quad() {
        // A unit square tilted 45 degrees about the X axis, offset from origin
        let s = std::f32::consts::FRAC_1_SQRT_2;
        let offset = Vec3::new(3.0, -2.0, 7.0);
        let positions = [
            offset,
            offset + Vec3::X,
            offset + Vec3::new(1.0, s, s),
            offset + Vec3::new(0.0, s, s),
        ];
        let mut uvs = UvTable::new(4);

        assert!(unfold_seed(&positions, &[0, 1, 2, 3], &mut uvs));

        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            let d = uvs.get(a).unwrap().distance(uvs.get(b).unwrap());
            assert!((d - 1.0).abs() < EPS, "edge {a}-{b} has length {d}");
        }
        let diagonal = uvs.get(0).unwrap().distance(uvs.get(2).unwrap());
        assert!((diagonal - std::f32::consts::SQRT_2).abs() < EPS);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let positions = [
            Vec3::new(0.3, 1.2, -0.4),
            Vec3::new(2.1, 0.2, 0.9),
            Vec3::new(-1.0, 0.5, 1.5),
        ];

        let mut first = UvTable::new(3);
        let mut second = UvTable::new(3);
        unfold_seed(&positions, &[0, 1, 2], &mut first);
        unfold_seed(&positions, &[0, 1, 2], &mut second);

        for i in 0..3 {
            assert_eq!(first.get(i), second.get(i));
        }
    }

    #[test]
    fn test_seed_rejects_two_corners() {
        let positions = [Vec3::ZERO, Vec3::X];
        let mut uvs = UvTable::new(2);

        assert!(!unfold_seed(&positions, &[0, 1], &mut uvs));
        assert_eq!(uvs.get(0), None);
    }
}

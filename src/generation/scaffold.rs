//! Virtual point scaffold
//!
//! A fixed cage of distant points around the generation region. Real
//! generators near the boundary would otherwise have unbounded cells; the
//! bisector planes against the cage close them off. Cage points are never
//! cell centers themselves.

use glam::DVec3;

use crate::config::ScaffoldOptions;

/// Offsets of the 3×3 grid laid on each cube face, as fractions of the spread
const FACE_GRID: [f64; 3] = [-0.5, 0.0, 0.5];

/// Number of points produced by [`build_virtual_points`]: 8 corners + 6 faces × 9
pub const VIRTUAL_POINT_COUNT: usize = 8 + 6 * 9;

/// Build the virtual cage at distance `virtual_bound` from the origin
///
/// Produces the 8 corners `(±1, ±1, ±1) · virtual_bound · corner_scale`, then
/// for each sign and each grid cell `(i, j)` one point on the x, y, and z
/// faces, in that order. Grid points are spread over `face_spread ·
/// virtual_bound` in the in-plane axes, so the outer grid rows coincide with
/// the corners and cube edges. Coincident points are kept: they only produce
/// degenerate triples, which the cell builder skips.
///
/// # Example
///
/// ```rust
/// use rust_voronoi_cells::generation::{build_virtual_points, VIRTUAL_POINT_COUNT};
/// use rust_voronoi_cells::ScaffoldOptions;
///
/// let cage = build_virtual_points(30.0, &ScaffoldOptions::default());
/// assert_eq!(cage.len(), VIRTUAL_POINT_COUNT);
/// ```
pub fn build_virtual_points(virtual_bound: f64, options: &ScaffoldOptions) -> Vec<DVec3> {
    let mut points = Vec::with_capacity(VIRTUAL_POINT_COUNT);

    let corner = virtual_bound * options.corner_scale;
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                points.push(DVec3::new(x, y, z) * corner);
            }
        }
    }

    let spread = virtual_bound * options.face_spread;
    for sign in [-1.0, 1.0] {
        let face = sign * virtual_bound;
        for i in FACE_GRID {
            for j in FACE_GRID {
                let (u, v) = (i * spread, j * spread);
                points.push(DVec3::new(face, u, v));
                points.push(DVec3::new(u, face, v));
                points.push(DVec3::new(u, v, face));
            }
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_count() {
        let points = build_virtual_points(30.0, &ScaffoldOptions::default());
        assert_eq!(points.len(), 62);
    }

    #[test]
    fn test_corners_first() {
        let points = build_virtual_points(30.0, &ScaffoldOptions::default());
        for p in &points[..8] {
            assert_eq!(p.abs(), DVec3::splat(30.0));
        }
        assert_eq!(points[0], DVec3::new(-30.0, -30.0, -30.0));
        assert_eq!(points[7], DVec3::new(30.0, 30.0, 30.0));
    }

    #[test]
    fn test_face_points_lie_on_faces() {
        let points = build_virtual_points(30.0, &ScaffoldOptions::default());
        for p in &points[8..] {
            // Every face point has at least one coordinate on the cage
            assert!((p.abs().max_element() - 30.0).abs() < 1e-12);
        }
        // Face centers are present
        for axis in [DVec3::X, DVec3::Y, DVec3::Z] {
            assert!(points.contains(&(axis * 30.0)));
            assert!(points.contains(&(axis * -30.0)));
        }
    }

    #[test]
    fn test_deterministic() {
        let a = build_virtual_points(30.0, &ScaffoldOptions::default());
        let b = build_virtual_points(30.0, &ScaffoldOptions::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_spread() {
        let options = ScaffoldOptions {
            corner_scale: 2.0,
            face_spread: 1.0,
        };
        let points = build_virtual_points(10.0, &options);
        assert_eq!(points[7], DVec3::splat(20.0));
        for p in &points[8..] {
            assert!(p.abs().max_element() <= 10.0 + 1e-12);
        }
    }
}

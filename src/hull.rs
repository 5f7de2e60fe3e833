//! Convex surface adapter for cells
//!
//! A cell's vertex set is the vertex set of a convex polyhedron, so its
//! boundary is recovered with parry3d's 3D convex hull. The builder only
//! guarantees at least four vertices, not four non-coplanar ones, so flat
//! inputs are rejected up front instead of being handed to the hull.

use glam::DVec3;
use parry3d::math::Point;
use parry3d::transformation;

use crate::cell::VoronoiCell;
use crate::error::{Result, VoronoiError};

/// Relative thickness below which a vertex set counts as flat
const FLATNESS_TOLERANCE: f64 = 1e-6;

/// Triangulated boundary of one cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellHull {
    /// Generator index of the cell
    pub cell: usize,
    /// Hull vertices (a subset of the cell vertices, possibly reordered)
    pub vertices: Vec<DVec3>,
    /// Triangles indexing into `vertices`
    pub triangles: Vec<[u32; 3]>,
}

impl CellHull {
    /// Number of boundary triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Enclosed volume
    pub fn volume(&self) -> f64 {
        let origin = self.interior_point();
        let signed: f64 = self
            .triangles
            .iter()
            .map(|t| {
                let [a, b, c] = self.corners(t);
                (a - origin).dot((b - origin).cross(c - origin)) / 6.0
            })
            .sum();
        signed.abs()
    }

    /// Total area of the boundary
    pub fn surface_area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = self.corners(t);
                (b - a).cross(c - a).length() * 0.5
            })
            .sum()
    }

    /// Outward unit normal of triangle `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.triangle_count()`.
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let [a, b, c] = self.corners(&self.triangles[index]);
        let normal = (b - a).cross(c - a).normalize_or_zero();
        // Orient away from the interior point
        if normal.dot(a - self.interior_point()) < 0.0 {
            -normal
        } else {
            normal
        }
    }

    fn corners(&self, t: &[u32; 3]) -> [DVec3; 3] {
        t.map(|i| self.vertices[i as usize])
    }

    fn interior_point(&self) -> DVec3 {
        if self.vertices.is_empty() {
            return DVec3::ZERO;
        }
        self.vertices.iter().copied().sum::<DVec3>() / self.vertices.len() as f64
    }
}

/// Triangulate the boundary of a cell
///
/// # Errors
///
/// Returns `HullFailed` when the cell has fewer than four vertices, when the
/// vertices are (numerically) coplanar or collinear, or when parry3d cannot
/// build the hull.
///
/// # Example
///
/// ```rust
/// use rust_voronoi_cells::{cell_hull, VoronoiCell};
/// use glam::DVec3;
///
/// let cell = VoronoiCell::new(0, DVec3::ZERO, vec![
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
///     DVec3::new(-1.0, -1.0, -1.0),
/// ]);
/// let hull = cell_hull(&cell).unwrap();
/// assert_eq!(hull.triangle_count(), 4);
/// ```
pub fn cell_hull(cell: &VoronoiCell) -> Result<CellHull> {
    let fail = |reason: String| VoronoiError::HullFailed {
        cell: cell.id,
        reason,
    };

    if cell.vertices.len() < 4 {
        return Err(fail(format!(
            "need at least 4 vertices, got {}",
            cell.vertices.len()
        )));
    }
    if is_flat(&cell.vertices) {
        return Err(fail("vertices are coplanar".to_string()));
    }

    let points: Vec<Point<f32>> = cell
        .vertices
        .iter()
        .map(|v| Point::new(v.x as f32, v.y as f32, v.z as f32))
        .collect();

    let (vertices, triangles) =
        transformation::try_convex_hull(&points).map_err(|e| fail(format!("{:?}", e)))?;

    if triangles.len() < 4 {
        return Err(fail(format!("hull has only {} triangles", triangles.len())));
    }

    Ok(CellHull {
        cell: cell.id,
        vertices: vertices
            .iter()
            .map(|p| DVec3::new(p.x as f64, p.y as f64, p.z as f64))
            .collect(),
        triangles,
    })
}

/// Whether all points lie (nearly) on one plane
///
/// Picks an extreme point, the point farthest from it, the point farthest
/// from that line, and then measures the largest distance from that plane.
fn is_flat(points: &[DVec3]) -> bool {
    let Some(&a) = points.first() else {
        return true;
    };

    let farthest = |score: &dyn Fn(DVec3) -> f64| {
        points
            .iter()
            .copied()
            .map(|p| (p, score(p)))
            .fold((a, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best })
    };

    let (b, extent) = farthest(&|p| p.distance(a));
    if extent <= 0.0 {
        return true;
    }
    let axis = (b - a) / extent;

    let (c, _) = farthest(&|p| (p - a).reject_from_normalized(axis).length());
    let normal = axis.cross(c - a).normalize_or_zero();
    if normal == DVec3::ZERO {
        return true;
    }

    let (_, thickness) = farthest(&|p| (p - a).dot(normal).abs());
    thickness <= FLATNESS_TOLERANCE * extent
}

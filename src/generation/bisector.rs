//! Perpendicular-bisector planes and three-plane intersection

use glam::{DMat3, DVec3};

/// Plane halfway between a cell center and another point
///
/// The normal points from the center towards the other point, so the center's
/// side of the plane is where `normal · x < normal · point`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectorPlane {
    /// Midpoint between the center and the other point
    pub point: DVec3,
    /// Unit normal from the center towards the other point
    pub normal: DVec3,
}

impl BisectorPlane {
    /// Build the bisector plane between `center` and `other`
    ///
    /// Returns `None` for coincident points, which have no bisector.
    pub fn between(center: DVec3, other: DVec3) -> Option<Self> {
        let normal = (other - center).try_normalize()?;
        Some(Self {
            point: (center + other) * 0.5,
            normal,
        })
    }

    /// Plane offset `d` in `normal · x = d`
    #[inline]
    pub fn offset(&self) -> f64 {
        self.normal.dot(self.point)
    }

    /// Signed distance from the plane (positive on the far side from the center)
    #[inline]
    pub fn signed_distance(&self, p: DVec3) -> f64 {
        (p - self.point).dot(self.normal)
    }
}

/// Result of solving one plane triple
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TripleOutcome {
    /// Intersection point; from the cell builder, also within bounds and valid
    Vertex(DVec3),
    /// Normals are (nearly) linearly dependent
    Degenerate,
    /// Solving produced NaN or infinity
    NonFinite,
    /// Some coordinate lies beyond the clamp box
    OutOfBounds,
    /// Some other point is strictly closer to the candidate than the center is
    Invalid,
}

/// Intersect three planes with Cramer's rule
///
/// Solves `nᵢ · x = dᵢ` for `i = 1..3`. Returns [`TripleOutcome::Degenerate`]
/// when `|det| < det_tolerance` and [`TripleOutcome::NonFinite`] when the
/// solution overflows; otherwise `Vertex` with the raw intersection (not yet
/// bounds- or validity-checked).
pub fn intersect_planes(planes: &[BisectorPlane; 3], det_tolerance: f64) -> TripleOutcome {
    let [a, b, c] = planes;

    // Rows are the plane normals
    let m = DMat3::from_cols(a.normal, b.normal, c.normal).transpose();
    let det = m.determinant();
    if det.is_nan() || det.abs() < det_tolerance {
        return TripleOutcome::Degenerate;
    }

    let d = DVec3::new(a.offset(), b.offset(), c.offset());
    let solve = |col: usize| {
        let mut replaced = m;
        *replaced.col_mut(col) = d;
        replaced.determinant() / det
    };

    let vertex = DVec3::new(solve(0), solve(1), solve(2));
    if !vertex.is_finite() {
        return TripleOutcome::NonFinite;
    }

    TripleOutcome::Vertex(vertex)
}

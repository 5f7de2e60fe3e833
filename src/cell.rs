//! Voronoi Cell Structure
//!
//! A convex polyhedral cell around one real generator, described by its
//! vertex set.

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::generation::PointSet;

/// A vertex that is strictly closer to some other point than to its own center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Violation {
    /// Generator index of the offending cell
    pub cell: usize,
    /// Index of the vertex within the cell
    pub vertex: usize,
    /// Index (in the full point set) of the closer point
    pub closer_point: usize,
    /// How much closer that point is than the center
    pub excess: f64,
}

/// Two vertices of one cell that lie closer together than the dedup radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuplicatePair {
    /// Generator index of the offending cell
    pub cell: usize,
    /// Index of the earlier vertex
    pub a: usize,
    /// Index of the later vertex
    pub b: usize,
    /// Distance between the two vertices
    pub distance: f64,
}

/// Every broken cell invariant found by [`ValidityReport::check`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidityReport {
    /// Vertices closer to another point than to their center
    pub closer: Vec<Violation>,
    /// Vertex pairs inside the dedup radius
    pub duplicates: Vec<DuplicatePair>,
}

impl ValidityReport {
    /// Check the distance and dedup invariants over a set of cells
    ///
    /// `points` must be the full point set the cells were built against.
    pub fn check(
        cells: &[VoronoiCell],
        points: &PointSet,
        tolerance: f64,
        dedup_radius: f64,
    ) -> Self {
        let mut report = Self::default();
        for cell in cells {
            report.closer.extend(cell.violations(points, tolerance));
            report
                .duplicates
                .extend(cell.duplicate_pairs(dedup_radius).into_iter().map(|(a, b)| {
                    DuplicatePair {
                        cell: cell.id,
                        a,
                        b,
                        distance: cell.vertices[a].distance(cell.vertices[b]),
                    }
                }));
        }
        report
    }

    /// Whether no invariant is broken
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.closer.is_empty() && self.duplicates.is_empty()
    }

    /// Total number of problems found
    #[inline]
    pub fn len(&self) -> usize {
        self.closer.len() + self.duplicates.len()
    }
}

/// The approximate Voronoi cell of one real generator
///
/// Vertices are unique to within the dedup radius and kept in the order they
/// were accepted. No face or ordering information is stored; the cell is
/// convex by construction, so a convex hull of `vertices` recovers its surface.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    /// Index of the generator in the real point list
    pub id: usize,

    /// Generator point
    pub center: DVec3,

    /// Validated, deduplicated cell vertices (at least four)
    pub vertices: Vec<DVec3>,
}

impl VoronoiCell {
    /// Create a new Voronoi cell
    ///
    /// This is typically called by the cell builder, not by user code.
    pub fn new(id: usize, center: DVec3, vertices: Vec<DVec3>) -> Self {
        Self {
            id,
            center,
            vertices,
        }
    }

    /// Get the vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Mean of the vertices
    ///
    /// This is not the volume centroid, but it lies inside the cell.
    pub fn centroid(&self) -> DVec3 {
        if self.vertices.is_empty() {
            return self.center;
        }
        self.vertices.iter().copied().sum::<DVec3>() / self.vertices.len() as f64
    }

    /// Largest distance from the center to any vertex
    pub fn max_vertex_distance(&self) -> f64 {
        self.vertices
            .iter()
            .map(|v| v.distance(self.center))
            .fold(0.0, f64::max)
    }

    /// Axis-aligned bounds of the vertices as `(min, max)`
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))),
        )
    }

    /// Vertices that are strictly closer to another point than to the center
    ///
    /// Checks `distance(v, center) <= distance(v, p) + tolerance` for every
    /// point `p` in `points` except the generator itself.
    pub fn violations(&self, points: &PointSet, tolerance: f64) -> Vec<Violation> {
        let mut found = Vec::new();
        for (vi, v) in self.vertices.iter().enumerate() {
            let dc = v.distance(self.center);
            for (pi, p) in points.all().iter().enumerate() {
                if pi == self.id {
                    continue;
                }
                let excess = dc - v.distance(*p);
                if excess > tolerance {
                    found.push(Violation {
                        cell: self.id,
                        vertex: vi,
                        closer_point: pi,
                        excess,
                    });
                }
            }
        }
        found
    }

    /// Pairs of vertex indices closer together than `radius`
    pub fn duplicate_pairs(&self, radius: f64) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..self.vertices.len() {
            for j in (i + 1)..self.vertices.len() {
                if self.vertices[i].distance(self.vertices[j]) < radius {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube_cell() -> VoronoiCell {
        let mut vertices = Vec::new();
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    vertices.push(DVec3::new(x, y, z));
                }
            }
        }
        VoronoiCell::new(0, DVec3::ZERO, vertices)
    }

    #[test]
    fn test_cell_creation() {
        let cell = unit_cube_cell();
        assert_eq!(cell.id, 0);
        assert_eq!(cell.vertex_count(), 8);
        assert!(cell.centroid().length() < 1e-12);
        assert!((cell.max_vertex_distance() - 3.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_bounds() {
        let cell = unit_cube_cell();
        let (lo, hi) = cell.bounds().unwrap();
        assert_eq!(lo, DVec3::splat(-1.0));
        assert_eq!(hi, DVec3::splat(1.0));
        assert!(VoronoiCell::new(1, DVec3::ZERO, vec![]).bounds().is_none());
    }

    #[test]
    fn test_violations() {
        let cell = unit_cube_cell();

        // Mirror images across the faces are exactly as far as the center
        let neighbors = [DVec3::new(2.0, 0.0, 0.0), DVec3::new(-2.0, 0.0, 0.0)];
        let ok = PointSet::new(&[DVec3::ZERO], &neighbors);
        assert!(cell.violations(&ok, 1e-9).is_empty());

        // A point just outside the +x face steals the +x vertices
        let close = PointSet::new(&[DVec3::ZERO], &[DVec3::new(1.5, 0.0, 0.0)]);
        let found = cell.violations(&close, 1e-9);
        assert_eq!(found.len(), 4);
        assert!(found.iter().all(|v| v.closer_point == 1 && v.excess > 0.0));
    }

    #[test]
    fn test_duplicate_pairs() {
        let cell = VoronoiCell::new(
            0,
            DVec3::ZERO,
            vec![
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(1.05, 0.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
            ],
        );
        assert_eq!(cell.duplicate_pairs(0.1), vec![(0, 1)]);
        assert!(cell.duplicate_pairs(0.01).is_empty());
    }

    #[test]
    fn test_report_flags_close_vertices() {
        let mut cell = unit_cube_cell();
        cell.vertices.push(DVec3::new(1.0, 1.0, 0.95));
        let points = PointSet::new(&[DVec3::ZERO], &[]);

        let report = ValidityReport::check(&[cell], &points, 1e-9, 0.1);
        assert!(report.closer.is_empty());
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.len(), 1);
        assert!(!report.is_empty());

        let pair = report.duplicates[0];
        assert_eq!((pair.cell, pair.b), (0, 8));
        assert!((pair.distance - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_report_clean_cube() {
        let points = PointSet::new(&[DVec3::ZERO], &[DVec3::new(2.0, 0.0, 0.0)]);
        let report = ValidityReport::check(&[unit_cube_cell()], &points, 1e-9, 0.1);
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
    }
}

//! Brute-force Voronoi cell construction from bisector-plane triples
//!
//! For every real generator `c`, each unordered triple of other points yields
//! three bisector planes. Their intersection is a candidate vertex of `c`'s
//! cell; it is kept when it lies inside the clamp box and no other point is
//! strictly closer to it than `c` is. Surviving vertices are merged within a
//! small radius, and cells with fewer than four unique vertices are dropped.
//!
//! Cost is O(R · M³) for R real and M total points, which keeps this to a few
//! dozen generators.

use glam::DVec3;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::bisector::{intersect_planes, BisectorPlane, TripleOutcome};
use crate::cell::VoronoiCell;
use crate::config::{
    DEFAULT_DEDUP_RADIUS, DEFAULT_DET_TOLERANCE, DEFAULT_OUTER_BOUND, DEFAULT_VALIDITY_TOLERANCE,
    VERTEX_CLAMP_FACTOR,
};
use crate::error::{Result, VoronoiError};
use crate::util::StageTimer;

/// Minimum number of unique vertices for a non-degenerate polyhedron
pub const MIN_CELL_VERTICES: usize = 4;

/// Fixed-for-the-run point array: real generators first, then virtual points
///
/// Points are identified by index. Equal coordinates at different indices are
/// distinct entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    points: Vec<DVec3>,
    real_count: usize,
}

impl PointSet {
    /// Concatenate real and virtual points
    pub fn new(real: &[DVec3], virtual_points: &[DVec3]) -> Self {
        let mut points = Vec::with_capacity(real.len() + virtual_points.len());
        points.extend_from_slice(real);
        points.extend_from_slice(virtual_points);
        Self {
            points,
            real_count: real.len(),
        }
    }

    /// Total number of points (real + virtual)
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the set holds no points at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of real generators
    #[inline]
    pub fn real_count(&self) -> usize {
        self.real_count
    }

    /// All points in index order
    #[inline]
    pub fn all(&self) -> &[DVec3] {
        &self.points
    }

    /// Real generators
    #[inline]
    pub fn real(&self) -> &[DVec3] {
        &self.points[..self.real_count]
    }

    /// Virtual scaffold points
    #[inline]
    pub fn virtual_points(&self) -> &[DVec3] {
        &self.points[self.real_count..]
    }

    /// Whether `index` refers to a virtual point
    #[inline]
    pub fn is_virtual(&self, index: usize) -> bool {
        index >= self.real_count
    }
}

/// Numerical parameters for [`build_cells`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildParams {
    /// Outer bound; vertices with any |coordinate| above `bound * 1.5` are rejected
    pub bound: f64,
    /// Merge radius for duplicate vertices in one cell
    pub dedup_radius: f64,
    /// Minimum |det| of the normal matrix
    pub det_tolerance: f64,
    /// Slack for the "no closer to another point" check
    pub validity_tolerance: f64,
}

impl BuildParams {
    /// Largest coordinate magnitude a vertex may have
    #[inline]
    pub fn clamp_limit(&self) -> f64 {
        self.bound * VERTEX_CLAMP_FACTOR
    }
}

impl Default for BuildParams {
    fn default() -> Self {
        Self {
            bound: DEFAULT_OUTER_BOUND,
            dedup_radius: DEFAULT_DEDUP_RADIUS,
            det_tolerance: DEFAULT_DET_TOLERANCE,
            validity_tolerance: DEFAULT_VALIDITY_TOLERANCE,
        }
    }
}

/// Per-cell counters for every triple outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStats {
    /// Triples enumerated
    pub triples: usize,
    /// Candidates that passed bounds and validity checks
    pub accepted: usize,
    /// Triples skipped for a near-singular system
    pub degenerate: usize,
    /// Triples whose solution was not finite
    pub non_finite: usize,
    /// Candidates outside the clamp box
    pub out_of_bounds: usize,
    /// Candidates closer to another point than to the center
    pub invalid: usize,
    /// Accepted candidates merged into an earlier vertex
    pub duplicates: usize,
    /// Vertices left after merging
    pub unique_vertices: usize,
}

impl CellStats {
    /// Count one triple outcome
    pub fn record(&mut self, outcome: &TripleOutcome) {
        self.triples += 1;
        match outcome {
            TripleOutcome::Vertex(_) => self.accepted += 1,
            TripleOutcome::Degenerate => self.degenerate += 1,
            TripleOutcome::NonFinite => self.non_finite += 1,
            TripleOutcome::OutOfBounds => self.out_of_bounds += 1,
            TripleOutcome::Invalid => self.invalid += 1,
        }
    }

    /// Triples that did not produce a candidate vertex
    #[inline]
    pub fn skipped(&self) -> usize {
        self.degenerate + self.non_finite + self.out_of_bounds + self.invalid
    }

    /// Add another cell's counters into this one
    pub fn merge(&mut self, other: &CellStats) {
        self.triples += other.triples;
        self.accepted += other.accepted;
        self.degenerate += other.degenerate;
        self.non_finite += other.non_finite;
        self.out_of_bounds += other.out_of_bounds;
        self.invalid += other.invalid;
        self.duplicates += other.duplicates;
        self.unique_vertices += other.unique_vertices;
    }
}

/// Aggregated statistics for one full build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildStats {
    /// Sum over all centers
    pub totals: CellStats,
    /// Counters per real generator, indexed by generator
    pub per_cell: Vec<CellStats>,
    /// Number of cells with at least four vertices
    pub cells_emitted: usize,
    /// Generators whose cell had too few vertices
    pub dropped: Vec<usize>,
}

impl BuildStats {
    /// Number of generators without an emitted cell
    #[inline]
    pub fn cells_dropped(&self) -> usize {
        self.dropped.len()
    }
}

/// Output of [`build_cells`]
#[derive(Debug, Clone, Default)]
pub struct CellBuild {
    /// Emitted cells, ordered by generator index
    pub cells: Vec<VoronoiCell>,
    /// Counters for diagnostics
    pub stats: BuildStats,
}

/// Shared flag for stopping a build between cells
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a flag that is not yet raised
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; takes effect before the next cell starts
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Build the cells of every real generator
///
/// # Arguments
///
/// * `points` - Real generators followed by the virtual scaffold
/// * `params` - Bounds and tolerances
///
/// # Returns
///
/// Cells with at least four vertices in generator order, plus statistics.
///
/// # Errors
///
/// Returns `GenerationFailed` if a point is not finite.
///
/// # Example
///
/// ```rust
/// use rust_voronoi_cells::generation::*;
/// use rust_voronoi_cells::ScaffoldOptions;
/// use glam::DVec3;
///
/// let cage = build_virtual_points(30.0, &ScaffoldOptions::default());
/// let points = PointSet::new(&[DVec3::ZERO], &cage);
/// let build = build_cells(&points, &BuildParams::default()).unwrap();
///
/// // A lone generator gets the cube cut out by the cage
/// assert_eq!(build.cells.len(), 1);
/// assert_eq!(build.cells[0].vertex_count(), 8);
/// ```
pub fn build_cells(points: &PointSet, params: &BuildParams) -> Result<CellBuild> {
    build_cells_cancellable(points, params, &CancelFlag::new())
}

/// [`build_cells`] with a cancellation flag checked before each cell
///
/// # Errors
///
/// Returns `Cancelled` if the flag was raised, and `GenerationFailed` if a
/// point is not finite.
pub fn build_cells_cancellable(
    points: &PointSet,
    params: &BuildParams,
    cancel: &CancelFlag,
) -> Result<CellBuild> {
    if let Some(bad) = points.all().iter().position(|p| !p.is_finite()) {
        return Err(VoronoiError::GenerationFailed(format!(
            "point {} is not finite",
            bad
        )));
    }

    let mut timer = StageTimer::new("Cell construction", log::Level::Debug);
    timer.items(points.real_count(), "cells");
    let results = run_centers(points, params, cancel)?;

    let mut build = CellBuild::default();
    for (center, (cell, stats)) in results.into_iter().enumerate() {
        build.stats.totals.merge(&stats);
        build.stats.per_cell.push(stats);
        match cell {
            Some(cell) => build.cells.push(cell),
            None => build.stats.dropped.push(center),
        }
    }
    build.stats.cells_emitted = build.cells.len();

    let totals = &build.stats.totals;
    log::debug!(
        "Built {} cells ({} dropped): {} triples, {} accepted, {} degenerate, {} non-finite, {} out of bounds, {} invalid, {} merged",
        build.stats.cells_emitted,
        build.stats.cells_dropped(),
        totals.triples,
        totals.accepted,
        totals.degenerate,
        totals.non_finite,
        totals.out_of_bounds,
        totals.invalid,
        totals.duplicates,
    );

    Ok(build)
}

#[cfg(not(feature = "parallel"))]
fn run_centers(
    points: &PointSet,
    params: &BuildParams,
    cancel: &CancelFlag,
) -> Result<Vec<(Option<VoronoiCell>, CellStats)>> {
    let mut results = Vec::with_capacity(points.real_count());
    for center in 0..points.real_count() {
        if cancel.is_cancelled() {
            log::warn!("Cell construction cancelled at generator {}", center);
            return Err(VoronoiError::Cancelled);
        }
        results.push(build_cell(points, center, params));
    }
    Ok(results)
}

#[cfg(feature = "parallel")]
fn run_centers(
    points: &PointSet,
    params: &BuildParams,
    cancel: &CancelFlag,
) -> Result<Vec<(Option<VoronoiCell>, CellStats)>> {
    use rayon::prelude::*;

    // collect() keeps generator order, so the merge is deterministic
    let results: Vec<Option<(Option<VoronoiCell>, CellStats)>> = (0..points.real_count())
        .into_par_iter()
        .map(|center| {
            if cancel.is_cancelled() {
                None
            } else {
                Some(build_cell(points, center, params))
            }
        })
        .collect();

    if results.iter().any(Option::is_none) {
        log::warn!("Cell construction cancelled");
        return Err(VoronoiError::Cancelled);
    }
    Ok(results.into_iter().flatten().collect())
}

/// Build the cell of one real generator
///
/// Returns `None` for the cell when fewer than [`MIN_CELL_VERTICES`] unique
/// vertices survive; the statistics are returned either way.
///
/// # Panics
///
/// Panics if `center >= points.len()`. Callers pass real generator indices,
/// `center < points.real_count()`.
pub fn build_cell(
    points: &PointSet,
    center: usize,
    params: &BuildParams,
) -> (Option<VoronoiCell>, CellStats) {
    let all = points.all();
    let c = all[center];

    // Other points by index, paired with their bisector against the center
    let others: Vec<(usize, Option<BisectorPlane>)> = (0..all.len())
        .filter(|&i| i != center)
        .map(|i| (i, BisectorPlane::between(c, all[i])))
        .collect();

    let mut stats = CellStats::default();
    let mut vertices: Vec<DVec3> = Vec::new();

    for a in 0..others.len() {
        for b in (a + 1)..others.len() {
            for d in (b + 1)..others.len() {
                let outcome = match (others[a].1, others[b].1, others[d].1) {
                    (Some(p1), Some(p2), Some(p3)) => {
                        classify_candidate(all, center, &[p1, p2, p3], params)
                    }
                    // A point coincident with the center has no bisector
                    _ => TripleOutcome::Degenerate,
                };
                stats.record(&outcome);

                if let TripleOutcome::Vertex(v) = outcome {
                    if vertices.iter().any(|u| u.distance(v) < params.dedup_radius) {
                        stats.duplicates += 1;
                    } else {
                        vertices.push(v);
                    }
                }
            }
        }
    }

    stats.unique_vertices = vertices.len();

    if vertices.len() < MIN_CELL_VERTICES {
        log::debug!(
            "Dropping cell {}: only {} unique vertices ({} triples)",
            center,
            vertices.len(),
            stats.triples
        );
        return (None, stats);
    }

    log::trace!(
        "Cell {}: {} vertices from {} accepted candidates",
        center,
        vertices.len(),
        stats.accepted
    );

    (Some(VoronoiCell::new(center, c, vertices)), stats)
}

/// Solve a plane triple and check the candidate against bounds and all other points
fn classify_candidate(
    all: &[DVec3],
    center: usize,
    planes: &[BisectorPlane; 3],
    params: &BuildParams,
) -> TripleOutcome {
    let vertex = match intersect_planes(planes, params.det_tolerance) {
        TripleOutcome::Vertex(v) => v,
        other => return other,
    };

    if vertex.abs().max_element() > params.clamp_limit() {
        return TripleOutcome::OutOfBounds;
    }

    let threshold = vertex.distance(all[center]) - params.validity_tolerance;
    let closer_exists = all
        .iter()
        .enumerate()
        .any(|(i, p)| i != center && vertex.distance(*p) < threshold);
    if closer_exists {
        return TripleOutcome::Invalid;
    }

    TripleOutcome::Vertex(vertex)
}

//! VoronoiDiagram main structure

use glam::DVec3;

use crate::cell::{ValidityReport, VoronoiCell};
use crate::config::{clamp_point_count, DiagramConfig};
use crate::error::{Result, VoronoiError};
use crate::generation::{generate_cells, BuildStats, CancelFlag, PointSet};
use crate::hull::{cell_hull, CellHull};
use crate::util::StageTimer;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A complete approximate 3D Voronoi diagram
///
/// Holds the generators, the virtual cage, and the emitted cells of one run.
/// Nothing is updated incrementally: changing the point count rebuilds
/// everything from the seed.
///
/// # Examples
///
/// ```
/// use rust_voronoi_cells::*;
///
/// let config = DiagramConfigBuilder::new()
///     .seed(42)
///     .point_count(5)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let diagram = VoronoiDiagram::generate(config).unwrap();
/// println!("Generated {} cells", diagram.cell_count());
///
/// for cell in diagram.cells() {
///     assert!(cell.vertex_count() >= 4);
/// }
/// ```
#[derive(Clone)]
pub struct VoronoiDiagram {
    /// Configuration used to generate this diagram
    config: DiagramConfig,

    /// Real generators followed by the virtual cage
    points: PointSet,

    /// Emitted cells, ordered by generator index
    cells: Vec<VoronoiCell>,

    /// Counters from the last build
    stats: BuildStats,

    /// Nearest-generator lookup (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl VoronoiDiagram {
    /// Generate a diagram from configuration
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` if the configuration yields non-finite points.
    pub fn generate(config: DiagramConfig) -> Result<Self> {
        Self::generate_cancellable(config, &CancelFlag::new())
    }

    /// Generate a diagram, stopping early if `cancel` is raised
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the flag was raised before all cells were built.
    pub fn generate_cancellable(config: DiagramConfig, cancel: &CancelFlag) -> Result<Self> {
        let _timer = StageTimer::new("Diagram generation", log::Level::Info);

        let (points, build) = generate_cells(&config, cancel)?;

        log::info!(
            "Generated {} cells for {} generators ({} dropped, seed {})",
            build.stats.cells_emitted,
            points.real_count(),
            build.stats.cells_dropped(),
            config.seed
        );

        #[cfg(feature = "spatial-index")]
        let spatial_index = SpatialIndex::new(points.real());

        Ok(Self {
            config,
            points,
            cells: build.cells,
            stats: build.stats,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Change the number of generators and rebuild everything
    ///
    /// The count is clamped to `[MIN_POINTS, MAX_POINTS]`. Generators are
    /// drawn again from the same seed, so the first points keep their
    /// positions when the count grows. Returns the count actually used.
    ///
    /// # Example
    ///
    /// ```
    /// # use rust_voronoi_cells::*;
    /// let config = DiagramConfigBuilder::new().seed(3).point_count(3).unwrap().build().unwrap();
    /// let mut diagram = VoronoiDiagram::generate(config).unwrap();
    ///
    /// assert_eq!(diagram.set_point_count(1).unwrap(), MIN_POINTS);
    /// assert_eq!(diagram.point_count(), 3);
    /// ```
    pub fn set_point_count(&mut self, count: usize) -> Result<usize> {
        let clamped = clamp_point_count(count);
        if clamped != count {
            log::debug!("Point count {} clamped to {}", count, clamped);
        }

        let config = DiagramConfig {
            point_count: clamped,
            ..self.config
        };
        *self = Self::generate(config)?;
        Ok(clamped)
    }

    /// Get the configuration used to generate this diagram
    #[inline]
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Number of real generators
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.real_count()
    }

    /// Number of emitted cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Real generators, in index order
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        self.points.real()
    }

    /// Virtual cage points
    #[inline]
    pub fn virtual_points(&self) -> &[DVec3] {
        self.points.virtual_points()
    }

    /// Full point set the cells were built against
    #[inline]
    pub fn point_set(&self) -> &PointSet {
        &self.points
    }

    /// All emitted cells, ordered by generator index
    #[inline]
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    /// Get the `n`th emitted cell
    #[inline]
    pub fn get_cell(&self, n: usize) -> Option<&VoronoiCell> {
        self.cells.get(n)
    }

    /// Get the cell of generator `generator`
    ///
    /// # Errors
    ///
    /// Returns `CellNotFound` if the generator does not exist or its cell was dropped.
    pub fn cell_for_generator(&self, generator: usize) -> Result<&VoronoiCell> {
        self.cells
            .binary_search_by_key(&generator, |c| c.id)
            .map(|i| &self.cells[i])
            .map_err(|_| VoronoiError::CellNotFound(generator))
    }

    /// Counters from the build
    #[inline]
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Radius of the sphere enclosing the outer bound cube
    #[inline]
    pub fn bounding_sphere_radius(&self) -> f64 {
        self.config.bounding_sphere_radius()
    }

    /// Triangulated boundaries of all cells that admit one
    ///
    /// Cells whose hull cannot be built are logged and left out.
    pub fn hulls(&self) -> Vec<CellHull> {
        self.cells
            .iter()
            .filter_map(|cell| match cell_hull(cell) {
                Ok(hull) => Some(hull),
                Err(err) => {
                    log::warn!("Skipping cell {}: {}", cell.id, err);
                    None
                }
            })
            .collect()
    }

    /// Re-check every emitted cell against the full point set
    ///
    /// Reports every vertex that is closer to another point than to its center
    /// by more than the validity tolerance, and every vertex pair within the
    /// dedup radius. Empty for a correct build.
    pub fn check_validity(&self) -> ValidityReport {
        ValidityReport::check(
            &self.cells,
            &self.points,
            self.config.validity_tolerance,
            self.config.dedup_radius,
        )
    }

    /// Find the generator whose cell contains a position (requires spatial-index feature)
    ///
    /// # Example
    ///
    /// ```
    /// # use rust_voronoi_cells::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// # let diagram = VoronoiDiagram::generate(DiagramConfig::default()).unwrap();
    /// let generator = diagram.points()[0];
    /// assert_eq!(diagram.find_cell_at(generator), Some(0));
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_cell_at(&self, position: DVec3) -> Option<usize> {
        self.spatial_index.find_nearest(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiagramConfigBuilder, MAX_POINTS};

    fn config(count: usize, seed: u32) -> DiagramConfig {
        DiagramConfigBuilder::new()
            .seed(seed)
            .point_count(count)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_diagram_generation() {
        let diagram = VoronoiDiagram::generate(config(5, 42)).unwrap();

        assert_eq!(diagram.point_count(), 5);
        assert_eq!(diagram.virtual_points().len(), 62);
        assert!(diagram.cell_count() > 0);
        assert_eq!(
            diagram.cell_count() + diagram.stats().cells_dropped(),
            diagram.point_count()
        );
        assert!(diagram.check_validity().is_empty());
    }

    #[test]
    fn test_check_validity_reports_duplicates() {
        let mut diagram = VoronoiDiagram::generate(config(4, 42)).unwrap();
        assert!(diagram.check_validity().is_empty());

        // Nudge a copy of the first vertex by half the dedup radius
        let cell = &mut diagram.cells[0];
        let near = cell.vertices[0] + DVec3::new(0.05, 0.0, 0.0);
        cell.vertices.push(near);
        let id = cell.id;
        let last = cell.vertices.len() - 1;

        let report = diagram.check_validity();
        assert!(!report.is_empty());
        assert!(report
            .duplicates
            .iter()
            .any(|d| d.cell == id && d.a == 0 && d.b == last));
    }

    #[test]
    fn test_cell_lookup() {
        let diagram = VoronoiDiagram::generate(config(4, 7)).unwrap();
        let first = diagram.get_cell(0).unwrap();
        assert_eq!(diagram.cell_for_generator(first.id).unwrap(), first);
        assert!(diagram.get_cell(diagram.cell_count()).is_none());
        assert_eq!(
            diagram.cell_for_generator(99).unwrap_err(),
            VoronoiError::CellNotFound(99)
        );
    }

    #[test]
    fn test_set_point_count_clamps() {
        let mut diagram = VoronoiDiagram::generate(config(3, 11)).unwrap();
        assert_eq!(diagram.set_point_count(4).unwrap(), 4);
        assert_eq!(diagram.point_count(), 4);
        assert_eq!(diagram.set_point_count(0).unwrap(), 3);
        assert_eq!(diagram.point_count(), 3);
        assert_eq!(clamp_point_count(MAX_POINTS + 5), MAX_POINTS);
    }

    #[test]
    fn test_set_point_count_keeps_prefix() {
        let mut diagram = VoronoiDiagram::generate(config(3, 5)).unwrap();
        let before = diagram.points().to_vec();
        diagram.set_point_count(6).unwrap();
        assert_eq!(&diagram.points()[..3], before.as_slice());
    }

    #[test]
    fn test_hulls() {
        let diagram = VoronoiDiagram::generate(config(4, 42)).unwrap();
        let hulls = diagram.hulls();
        assert!(!hulls.is_empty());
        for hull in &hulls {
            assert!(hull.triangle_count() >= 4);
            assert!(hull.volume() > 0.0);
        }
    }

    #[test]
    fn test_cancelled_generation() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let result = VoronoiDiagram::generate_cancellable(config(3, 1), &cancel);
        assert!(matches!(result, Err(VoronoiError::Cancelled)));
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_cell_at() {
        let diagram = VoronoiDiagram::generate(config(5, 42)).unwrap();
        for (i, p) in diagram.points().iter().enumerate() {
            assert_eq!(diagram.find_cell_at(*p), Some(i));
        }
    }
}

//! Diagram Configuration and Builder
//!
//! This module provides the parameter table for deterministic Voronoi cell
//! construction: region sizes, tolerances, and the virtual point scaffold.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};
use crate::generation::BuildParams;

/// Number of generator points used when none is specified
pub const DEFAULT_POINT_COUNT: usize = 10;

/// Smallest supported generator count
pub const MIN_POINTS: usize = 3;

/// Largest supported generator count
///
/// The builder is O(R · M³), so counts beyond a few dozen get slow quickly.
pub const MAX_POINTS: usize = 30;

/// Edge length of the cube that generator points are drawn from
pub const DEFAULT_REGION_SIZE: f64 = 10.0;

/// Outer bound used for the vertex clamp and the virtual scaffold
pub const DEFAULT_OUTER_BOUND: f64 = 15.0;

/// Virtual points sit at this multiple of the outer bound
pub const VIRTUAL_BOUND_FACTOR: f64 = 2.0;

/// Candidate vertices with any coordinate beyond `outer_bound * VERTEX_CLAMP_FACTOR` are rejected
pub const VERTEX_CLAMP_FACTOR: f64 = 1.5;

/// Minimum |det| for a bisector-plane triple to be solved
pub const DEFAULT_DET_TOLERANCE: f64 = 1e-4;

/// Slack allowed when checking that a vertex is no closer to another point than to its center
pub const DEFAULT_VALIDITY_TOLERANCE: f64 = 1e-4;

/// Vertices closer than this to an accepted vertex of the same cell are merged
pub const DEFAULT_DEDUP_RADIUS: f64 = 0.1;

/// Clamp a requested point count into the supported `[MIN_POINTS, MAX_POINTS]` range
#[inline]
pub fn clamp_point_count(count: usize) -> usize {
    count.clamp(MIN_POINTS, MAX_POINTS)
}

/// Shape of the virtual point cage that closes off boundary cells
///
/// These factors were tuned by eye so that boundary cells look bounded. They
/// are a heuristic stand-in for the plane at infinity, not an exact construction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaffoldOptions {
    /// Multiplier applied to the virtual bound for the 8 corner points
    pub corner_scale: f64,
    /// In-plane spread of the 3×3 face grids, as a multiple of the virtual bound
    pub face_spread: f64,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            corner_scale: 1.0,
            face_spread: 2.0,
        }
    }
}

/// Configuration for deterministic Voronoi cell generation
///
/// The same configuration will always produce identical generator points and
/// identical cells.
///
/// # Example
///
/// ```rust
/// use rust_voronoi_cells::*;
///
/// let config = DiagramConfigBuilder::new()
///     .seed(42)
///     .point_count(12)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.point_count, 12);
/// assert_eq!(config.virtual_bound(), 30.0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramConfig {
    /// Random seed for generator placement
    pub seed: u32,

    /// Number of real generator points (within `[MIN_POINTS, MAX_POINTS]`)
    pub point_count: usize,

    /// Edge length of the generation cube; coordinates lie in `[-size/2, size/2]`
    pub region_size: f64,

    /// Outer bound for the vertex clamp and the scaffold distance
    pub outer_bound: f64,

    /// Determinant threshold below which a plane triple is treated as degenerate
    pub det_tolerance: f64,

    /// Slack for the "no closer to another point" vertex check
    pub validity_tolerance: f64,

    /// Merge radius for duplicate vertices within one cell
    pub dedup_radius: f64,

    /// Virtual point cage shape
    pub scaffold: ScaffoldOptions,
}

impl DiagramConfig {
    /// Distance of the virtual point cage from the origin
    #[inline]
    pub fn virtual_bound(&self) -> f64 {
        self.outer_bound * VIRTUAL_BOUND_FACTOR
    }

    /// Radius of a sphere enclosing the outer bound cube
    #[inline]
    pub fn bounding_sphere_radius(&self) -> f64 {
        3.0_f64.sqrt() * self.outer_bound
    }

    /// Parameters handed to the cell builder
    pub fn build_params(&self) -> BuildParams {
        BuildParams {
            bound: self.outer_bound,
            dedup_radius: self.dedup_radius,
            det_tolerance: self.det_tolerance,
            validity_tolerance: self.validity_tolerance,
        }
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            point_count: DEFAULT_POINT_COUNT,
            region_size: DEFAULT_REGION_SIZE,
            outer_bound: DEFAULT_OUTER_BOUND,
            det_tolerance: DEFAULT_DET_TOLERANCE,
            validity_tolerance: DEFAULT_VALIDITY_TOLERANCE,
            dedup_radius: DEFAULT_DEDUP_RADIUS,
            scaffold: ScaffoldOptions::default(),
        }
    }
}

/// Builder for creating DiagramConfig with validation
///
/// # Example
///
/// ```rust
/// use rust_voronoi_cells::*;
///
/// let config = DiagramConfigBuilder::new()
///     .seed(7)
///     .dedup_radius(0.05)
///     .unwrap()
///     .det_tolerance(1e-6)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.seed, 7);
/// ```
#[derive(Debug, Clone)]
pub struct DiagramConfigBuilder {
    seed: Option<u32>,
    point_count: usize,
    region_size: f64,
    outer_bound: f64,
    det_tolerance: f64,
    validity_tolerance: f64,
    dedup_radius: f64,
    scaffold: ScaffoldOptions,
}

impl DiagramConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - point_count: 10
    /// - region_size: 10, outer_bound: 15
    /// - tolerances: 1e-4, dedup radius: 0.1
    pub fn new() -> Self {
        Self {
            seed: None,
            point_count: DEFAULT_POINT_COUNT,
            region_size: DEFAULT_REGION_SIZE,
            outer_bound: DEFAULT_OUTER_BOUND,
            det_tolerance: DEFAULT_DET_TOLERANCE,
            validity_tolerance: DEFAULT_VALIDITY_TOLERANCE,
            dedup_radius: DEFAULT_DEDUP_RADIUS,
            scaffold: ScaffoldOptions::default(),
        }
    }

    /// Set the random seed for generator placement
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of generator points
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `count` is outside `[MIN_POINTS, MAX_POINTS]`
    pub fn point_count(mut self, count: usize) -> Result<Self> {
        if !(MIN_POINTS..=MAX_POINTS).contains(&count) {
            return Err(VoronoiError::InvalidConfig(format!(
                "point count must be in [{}, {}] (got {})",
                MIN_POINTS, MAX_POINTS, count
            )));
        }
        self.point_count = count;
        Ok(self)
    }

    /// Set the edge length of the generation cube
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if size is not a positive finite number
    pub fn region_size(mut self, size: f64) -> Result<Self> {
        self.region_size = positive("region size", size)?;
        Ok(self)
    }

    /// Set the outer bound (vertex clamp and scaffold distance)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if bound is not a positive finite number
    pub fn outer_bound(mut self, bound: f64) -> Result<Self> {
        self.outer_bound = positive("outer bound", bound)?;
        Ok(self)
    }

    /// Set the determinant degeneracy threshold
    pub fn det_tolerance(mut self, tolerance: f64) -> Result<Self> {
        self.det_tolerance = positive("determinant tolerance", tolerance)?;
        Ok(self)
    }

    /// Set the vertex validity slack
    pub fn validity_tolerance(mut self, tolerance: f64) -> Result<Self> {
        self.validity_tolerance = positive("validity tolerance", tolerance)?;
        Ok(self)
    }

    /// Set the duplicate-merge radius
    ///
    /// Zero disables merging of nearby (but not identical) vertices.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if radius is negative or not finite
    pub fn dedup_radius(mut self, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(VoronoiError::InvalidConfig(format!(
                "dedup radius must be >= 0 (got {})",
                radius
            )));
        }
        self.dedup_radius = radius;
        Ok(self)
    }

    /// Set the virtual point cage shape
    pub fn scaffold(mut self, scaffold: ScaffoldOptions) -> Result<Self> {
        positive("scaffold corner scale", scaffold.corner_scale)?;
        positive("scaffold face spread", scaffold.face_spread)?;
        self.scaffold = scaffold;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the generation cube does not fit inside the outer bound
    pub fn build(self) -> Result<DiagramConfig> {
        if self.region_size / 2.0 >= self.outer_bound {
            return Err(VoronoiError::InvalidConfig(format!(
                "region half-extent {} must be smaller than outer bound {}",
                self.region_size / 2.0,
                self.outer_bound
            )));
        }

        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(DiagramConfig {
            seed,
            point_count: self.point_count,
            region_size: self.region_size,
            outer_bound: self.outer_bound,
            det_tolerance: self.det_tolerance,
            validity_tolerance: self.validity_tolerance,
            dedup_radius: self.dedup_radius,
            scaffold: self.scaffold,
        })
    }
}

impl Default for DiagramConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn positive(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(VoronoiError::InvalidConfig(format!(
            "{} must be positive (got {})",
            name, value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = DiagramConfigBuilder::new().seed(1).build().unwrap();
        assert_eq!(config.point_count, DEFAULT_POINT_COUNT);
        assert_eq!(config.region_size, 10.0);
        assert_eq!(config.outer_bound, 15.0);
        assert_eq!(config.virtual_bound(), 30.0);
        assert_eq!(config.dedup_radius, 0.1);
        assert_eq!(config.scaffold, ScaffoldOptions::default());
    }

    #[test]
    fn test_builder_custom() {
        let config = DiagramConfigBuilder::new()
            .seed(42)
            .point_count(5)
            .unwrap()
            .region_size(4.0)
            .unwrap()
            .outer_bound(8.0)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.point_count, 5);
        assert_eq!(config.build_params().bound, 8.0);
    }

    #[test]
    fn test_point_count_range() {
        assert!(DiagramConfigBuilder::new().point_count(2).is_err());
        assert!(DiagramConfigBuilder::new().point_count(31).is_err());
        assert!(DiagramConfigBuilder::new().point_count(3).is_ok());
        assert!(DiagramConfigBuilder::new().point_count(30).is_ok());
    }

    #[test]
    fn test_clamp_point_count() {
        assert_eq!(clamp_point_count(0), MIN_POINTS);
        assert_eq!(clamp_point_count(17), 17);
        assert_eq!(clamp_point_count(1000), MAX_POINTS);
    }

    #[test]
    fn test_invalid_values() {
        assert!(DiagramConfigBuilder::new().region_size(0.0).is_err());
        assert!(DiagramConfigBuilder::new().outer_bound(-1.0).is_err());
        assert!(DiagramConfigBuilder::new().det_tolerance(f64::NAN).is_err());
        assert!(DiagramConfigBuilder::new().dedup_radius(-0.1).is_err());
        assert!(DiagramConfigBuilder::new().dedup_radius(0.0).is_ok());
        assert!(DiagramConfigBuilder::new()
            .scaffold(ScaffoldOptions {
                corner_scale: 0.0,
                face_spread: 2.0,
            })
            .is_err());
    }

    #[test]
    fn test_region_must_fit_outer_bound() {
        let result = DiagramConfigBuilder::new()
            .region_size(40.0)
            .unwrap()
            .build();
        assert!(matches!(result, Err(VoronoiError::InvalidConfig(_))));
    }

    #[test]
    fn test_bounding_sphere_radius() {
        let config = DiagramConfig::default();
        assert!((config.bounding_sphere_radius() - 15.0 * 3.0_f64.sqrt()).abs() < 1e-12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = DiagramConfigBuilder::new().seed(12345).build().unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let restored: DiagramConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}

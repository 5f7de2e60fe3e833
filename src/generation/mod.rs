//! Core Voronoi generation algorithm
//!
//! Generates random generator points, surrounds them with a virtual point
//! cage, and builds one convex cell per real generator from bisector-plane
//! triples.

mod bisector;
mod cell_builder;
mod points;
mod scaffold;

pub use bisector::{intersect_planes, BisectorPlane, TripleOutcome};
pub use cell_builder::{
    build_cell, build_cells, build_cells_cancellable, BuildParams, BuildStats, CancelFlag,
    CellBuild, CellStats, PointSet, MIN_CELL_VERTICES,
};
pub use points::{generate_points, generate_points_seeded};
pub use scaffold::{build_virtual_points, VIRTUAL_POINT_COUNT};

use crate::config::DiagramConfig;
use crate::error::Result;

/// Generate the full point set for a configuration (without cells)
///
/// Real generators come from `config.seed`; the scaffold is deterministic.
pub fn generate_point_set(config: &DiagramConfig) -> PointSet {
    let real = generate_points_seeded(config.point_count, config.region_size, config.seed);
    let cage = build_virtual_points(config.virtual_bound(), &config.scaffold);
    PointSet::new(&real, &cage)
}

/// Generate points and cells from configuration
///
/// Returns the point set the cells were built against along with the build.
pub fn generate_cells(config: &DiagramConfig, cancel: &CancelFlag) -> Result<(PointSet, CellBuild)> {
    let points = generate_point_set(config);
    let build = build_cells_cancellable(&points, &config.build_params(), cancel)?;
    Ok((points, build))
}

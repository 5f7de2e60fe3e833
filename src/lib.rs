//! Approximate 3D Voronoi cells
//!
//! Builds the Voronoi cells of a few dozen random points in a cube by
//! intersecting perpendicular-bisector planes three at a time. A fixed cage
//! of distant virtual points keeps boundary cells bounded. Cells come out as
//! vertex sets; hull and mesh adapters turn them into renderable surfaces.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rust_voronoi_cells::*;
//!
//! let config = DiagramConfigBuilder::new()
//!     .seed(42)
//!     .point_count(10).unwrap()
//!     .build().unwrap();
//!
//! let mut diagram = VoronoiDiagram::generate(config).unwrap();
//! println!("Generated {} cells", diagram.cell_count());
//!
//! // Rebuild with more points from the same seed
//! diagram.set_point_count(20).unwrap();
//!
//! let mesh = generate_mesh(&diagram, &UniformColorMapper::default());
//! println!("Generated {} triangles", mesh.triangle_count());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Nearest-generator lookups using a KD-tree
//! - `parallel`: Build cells on the rayon thread pool
//! - `serde`: Serialization support for configuration and cells

// Modules
pub mod error;
pub mod config;
pub mod cell;
pub mod generation;
pub mod hull;
pub mod diagram;
pub mod mesh;
mod util;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{VoronoiError, Result};
pub use config::{
    clamp_point_count, DiagramConfig, DiagramConfigBuilder, ScaffoldOptions, DEFAULT_POINT_COUNT,
    MAX_POINTS, MIN_POINTS,
};
pub use cell::{DuplicatePair, ValidityReport, Violation, VoronoiCell};
pub use diagram::VoronoiDiagram;
pub use generation::{BuildParams, BuildStats, CancelFlag, CellStats, PointSet};
pub use hull::{cell_hull, CellHull};
pub use mesh::{
    generate_mesh, generate_scene_mesh, CellColor, ColorMapper, MeshData, PaletteColorMapper,
    UniformColorMapper,
};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec3 for convenience
pub use glam::DVec3;

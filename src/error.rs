//! Error types for Voronoi cell construction

use std::fmt;

/// Errors that can occur while building or querying a diagram
#[derive(Debug, Clone, PartialEq)]
pub enum VoronoiError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Generation failed due to geometry issues
    GenerationFailed(String),
    /// A cell's vertex set could not be turned into a convex surface
    HullFailed {
        /// Generator index of the cell
        cell: usize,
        /// Human-readable cause
        reason: String,
    },
    /// Requested cell ID does not exist
    CellNotFound(usize),
    /// The computation was cancelled between cells
    Cancelled,
}

impl fmt::Display for VoronoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoronoiError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            VoronoiError::GenerationFailed(msg) => write!(f, "generation failed: {}", msg),
            VoronoiError::HullFailed { cell, reason } => {
                write!(f, "convex hull failed for cell {}: {}", cell, reason)
            }
            VoronoiError::CellNotFound(id) => write!(f, "cell not found: {}", id),
            VoronoiError::Cancelled => write!(f, "computation cancelled"),
        }
    }
}

impl std::error::Error for VoronoiError {}

/// Result type alias for voronoi operations
pub type Result<T> = std::result::Result<T, VoronoiError>;

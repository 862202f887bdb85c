//! Error types for brush CSG.
//!
//! Geometric degeneracy during clipping and splitting is not an error: it is
//! reported through empty windings, empty brushes and `None` results. The
//! types here cover invalid input, failed validation and misuse of handles.

use thiserror::Error;

/// Errors produced while building a plane from raw input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaneError {
    /// The defining points are collinear or coincident.
    #[error("plane points are degenerate (cross product length {area})")]
    Degenerate {
        /// Length of the cross product of the two edge vectors.
        area: f64,
    },
}

/// Reasons a brush fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrushCheckError {
    /// The brush has no sides at all.
    #[error("brush has no sides")]
    NoSides,

    /// A side has fewer than three winding points.
    #[error("brush side {side} missing winding")]
    MissingWinding {
        /// Index of the offending side.
        side: usize,
    },

    /// A winding pokes through the plane of another side.
    #[error("non convex brush (side {side})")]
    NonConvex {
        /// Index of the side whose plane is violated.
        side: usize,
    },

    /// The brush extends past the map limits.
    #[error("brush bounds out of range")]
    BoundsOutOfRange,

    /// The bounds are inverted, so nothing visible remains.
    #[error("brush has no visible sides")]
    NoVisibleSides,
}

/// Errors produced by [`crate::BrushWorkspace`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    /// A brush handle does not refer to a stored brush.
    #[error("brush index {index} out of range (workspace holds {len} brushes)")]
    IndexOutOfRange {
        /// The requested handle.
        index: usize,
        /// Number of brushes in the workspace.
        len: usize,
    },
}

/// Errors produced while loading [`crate::WorkspaceOptions`].
#[derive(Error, Debug)]
pub enum OptionsError {
    /// The configuration text is not valid JSON for the options.
    #[error("invalid workspace options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for workspace operations.
pub type Result<T> = std::result::Result<T, WorkspaceError>;

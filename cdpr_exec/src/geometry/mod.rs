//! # Geometry module
//!
//! Rotation and box corner geometry shared by the platform and the frame.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod corners;
mod correspondence;
mod rotation;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use corners::*;
pub use correspondence::*;
pub use rotation::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of corners of a box.
pub const NUM_CORNERS: usize = 8;

/// The number of cables holding the platform, one per frame corner.
pub const NUM_CABLES: usize = NUM_CORNERS;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors raised by geometry construction.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("Box dimension {axis} must be strictly positive and finite, found {value}")]
    InvalidDimension { axis: usize, value: f64 },

    #[error("Correspondence table {0:?} is not a permutation of 0..8")]
    InvalidCorrespondence([usize; NUM_CABLES]),

    #[error("Non-finite corner position computed for corner {0}")]
    NonFiniteCorner(usize),
}

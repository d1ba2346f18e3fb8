//! Box corner construction
//!
//! Corners are numbered the same way for the platform and for the frame, so
//! that index `i` always denotes the same corner role:
//!
//! | index | x | y | z |
//! |-------|---|---|---|
//! | 0     | + | - | - |
//! | 1     | + | - | + |
//! | 2     | + | + | - |
//! | 3     | + | + | + |
//! | 4     | - | + | - |
//! | 5     | - | + | + |
//! | 6     | - | - | - |
//! | 7     | - | - | + |
//!
//! where `+`/`-` is the side of the box centre the corner lies on along that
//! axis. Corner 6 is the frame's origin corner.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// Internal
use super::{GeometryError, NUM_CORNERS};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Side of the box centre each corner lies on, per axis.
pub const CORNER_SIGNS: [[f64; 3]; NUM_CORNERS] = [
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
];

/// Index of the corner placed at the origin by [`anchored_corners`].
pub const ORIGIN_CORNER: usize = 6;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The 8 corners of a box, indexed as described in the module documentation.
///
/// Units: meters
pub type BoxCorners = [Vector3<f64>; NUM_CORNERS];

/// Dimensions of an axis-aligned box.
///
/// Units: meters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxDims {
    /// Extent along X
    pub length_m: f64,

    /// Extent along Y
    pub width_m: f64,

    /// Extent along Z
    pub height_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl BoxDims {
    /// Create new box dimensions, all of which must be strictly positive.
    pub fn new(length_m: f64, width_m: f64, height_m: f64) -> Result<Self, GeometryError> {
        let dims = Self {
            length_m,
            width_m,
            height_m,
        };

        for (axis, &value) in dims.as_vector().iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeometryError::InvalidDimension { axis, value });
            }
        }

        Ok(dims)
    }

    /// The dimensions as a vector along the frame axes.
    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.length_m, self.width_m, self.height_m)
    }
}

impl std::convert::TryFrom<[f64; 3]> for BoxDims {
    type Error = GeometryError;

    fn try_from(dims: [f64; 3]) -> Result<Self, Self::Error> {
        Self::new(dims[0], dims[1], dims[2])
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Corners of a box centred on the origin (the platform convention).
pub fn centred_corners(dims: &BoxDims) -> BoxCorners {
    let half = dims.as_vector() * 0.5;

    let mut corners = [Vector3::zeros(); NUM_CORNERS];
    for (corner, signs) in corners.iter_mut().zip(CORNER_SIGNS.iter()) {
        *corner = Vector3::from(*signs).component_mul(&half);
    }

    corners
}

/// Corners of a box lying in the positive octant with its
/// [`ORIGIN_CORNER`] on the origin (the frame/anchor convention).
pub fn anchored_corners(dims: &BoxDims) -> BoxCorners {
    let half = dims.as_vector() * 0.5;

    let mut corners = centred_corners(dims);
    for corner in corners.iter_mut() {
        *corner += half;
    }

    corners
}

//! # Motor control module
//!
//! Converts changes of cable length into winch drum rotations.
//!
//! Each cable winds onto a drum of diameter `d`. With the default
//! [`DrumModel::Linear`] model a change of length `dL` needs a drum rotation
//!
//! ```text
//! theta = dL / (d / 2)
//! ```
//!
//! which is exact for a single layer of cable on the drum. The
//! [`DrumModel::Arctangent`] model, `theta = atan(dL / d)`, is kept for
//! comparison with earlier test rigs only: it saturates at a quarter turn and
//! so cannot represent any real winding.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::SVector;
use serde::{Deserialize, Serialize};

// Internal
use crate::{cable_ctrl::CableLengths, geometry::NUM_CABLES};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Rotation of each winch drum, indexed by cable.
///
/// Units: radians
pub type MotorCommand = SVector<f64, NUM_CABLES>;

/// Parameters of the winches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Diameter of the winch drums.
    ///
    /// Units: meters
    pub drum_diameter_m: f64,

    /// Relationship between cable length and drum rotation.
    #[serde(default)]
    pub drum_model: DrumModel,
}

/// Maps cable lengths to drum rotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorCmdMapper {
    drum_diameter_m: f64,
    model: DrumModel,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Relationship between cable length and drum rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrumModel {
    /// Rotation proportional to length over drum radius.
    Linear,

    /// Arctangent of length over drum diameter.
    Arctangent,
}

/// Possible errors raised by the motor command mapping.
#[derive(Debug, thiserror::Error)]
pub enum MotorCtrlError {
    #[error("Drum diameter must be strictly positive and finite, found {0}")]
    InvalidDrumDiameter(f64),

    #[error("Non-finite rotation computed for motor {0}")]
    NonFiniteCommand(usize),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for DrumModel {
    fn default() -> Self {
        DrumModel::Linear
    }
}

impl MotorCmdMapper {
    /// Create a new mapper from the winch parameters.
    pub fn new(params: &Params) -> Result<Self, MotorCtrlError> {
        if !(params.drum_diameter_m.is_finite() && params.drum_diameter_m > 0.0) {
            return Err(MotorCtrlError::InvalidDrumDiameter(params.drum_diameter_m));
        }

        Ok(Self {
            drum_diameter_m: params.drum_diameter_m,
            model: params.drum_model,
        })
    }

    /// Drum rotation for a single cable length (or length change).
    ///
    /// Units: radians
    pub fn map(&self, length_m: f64) -> f64 {
        match self.model {
            DrumModel::Linear => 2.0 * length_m / self.drum_diameter_m,
            DrumModel::Arctangent => (length_m / self.drum_diameter_m).atan(),
        }
    }

    /// Drum rotation of every cable.
    ///
    /// Fails rather than letting a non-finite rotation through to a motor.
    pub fn map_all(&self, lengths_m: &CableLengths) -> Result<MotorCommand, MotorCtrlError> {
        let cmd = lengths_m.map(|l| self.map(l));

        match cmd.iter().position(|r| !r.is_finite()) {
            Some(motor) => Err(MotorCtrlError::NonFiniteCommand(motor)),
            None => Ok(cmd),
        }
    }
}

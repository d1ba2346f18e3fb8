//! # Cable control module
//!
//! Converts a platform trajectory into cable length demands for the eight
//! winches. For each step of the discretised trajectory:
//!
//! 1. the step is added to the running platform pose,
//! 2. the platform corners are reconstructed from the pose,
//! 3. the cable lengths are computed from the platform and frame corners,
//! 4. the change in length since the previous step is emitted, along with the
//!    winch rotation achieving it.
//!
//! Cable crossings (cables touching each other once the platform is rotated
//! far enough) are not detected.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_corners;
mod calc_lengths;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::SVector;

// Internal
pub use calc_corners::*;
pub use calc_lengths::*;
pub use params::*;
pub use state::*;

use crate::{
    geometry::{GeometryError, NUM_CABLES},
    motor_ctrl::MotorCtrlError,
    pose::{Pose6D, PoseError},
    step_planner::StepPlannerError,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Length of each cable, indexed by cable (and so by frame corner).
///
/// Units: meters
pub type CableLengths = SVector<f64, NUM_CABLES>;

/// Change of length of each cable over one step.
///
/// Units: meters
pub type CableLengthDelta = SVector<f64, NUM_CABLES>;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during CableCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum CableCtrlError {
    #[error("Could not load the CableCtrl parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Invalid geometry: {0}")]
    GeometryError(#[from] GeometryError),

    #[error("Invalid trajectory: {0}")]
    StepPlannerError(#[from] StepPlannerError),

    #[error("Invalid motor command: {0}")]
    MotorCtrlError(#[from] MotorCtrlError),

    #[error("Invalid pose: {0}")]
    PoseError(#[from] PoseError),

    #[error("CableCtrl has not been initialised with parameters")]
    NotInitialised,

    #[error("Pose is not finite: {0:?}")]
    NonFinitePose(Pose6D),

    #[error("Non-finite length computed for cable {0}")]
    NonFiniteLength(usize),

    #[error("Trajectory aborted at step {step_index} (pose {pose:?}): {source}")]
    StepFailed {
        step_index: usize,
        pose: Pose6D,
        #[source]
        source: Box<CableCtrlError>,
    },
}

/// Broad classification of [`CableCtrlError`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad parameters, detected before any step is computed.
    Configuration,

    /// Inputs with the wrong number of components or waypoints.
    InputShape,

    /// Non-finite values in the inputs or produced by the computation.
    Numerical,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CableCtrlError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CableCtrlError::ParamLoadError(_) | CableCtrlError::NotInitialised => {
                ErrorKind::Configuration
            }
            CableCtrlError::GeometryError(e) => match e {
                GeometryError::InvalidDimension { .. }
                | GeometryError::InvalidCorrespondence(_) => ErrorKind::Configuration,
                GeometryError::NonFiniteCorner(_) => ErrorKind::Numerical,
            },
            CableCtrlError::StepPlannerError(e) => match e {
                StepPlannerError::InvalidMaxStep { .. }
                | StepPlannerError::TooManySteps { .. } => ErrorKind::Configuration,
                StepPlannerError::EmptyTrajectory => ErrorKind::InputShape,
                StepPlannerError::NonFiniteWaypoint { .. } => ErrorKind::Numerical,
            },
            CableCtrlError::MotorCtrlError(e) => match e {
                MotorCtrlError::InvalidDrumDiameter(_) => ErrorKind::Configuration,
                MotorCtrlError::NonFiniteCommand(_) => ErrorKind::Numerical,
            },
            CableCtrlError::PoseError(_) => ErrorKind::InputShape,
            CableCtrlError::NonFinitePose(_)
            | CableCtrlError::NonFiniteLength(_)
            | CableCtrlError::StepFailed { .. } => ErrorKind::Numerical,
        }
    }
}

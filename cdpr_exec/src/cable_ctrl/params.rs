//! Parameters structure for CableCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

// Internal
use super::CableCtrlError;
use crate::{
    geometry::{anchored_corners, BoxCorners, BoxDims, CorrespondenceTable},
    motor_ctrl::{self, MotorCmdMapper},
    pose::NUM_POSE_AXES,
    step_planner::StepPlanner,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Cable control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    // ---- TRAJECTORY ----
    /// Largest allowed change of each pose component in one step.
    ///
    /// Units: meters for x, y, z and radians for rx, ry, rz
    pub max_step: [f64; NUM_POSE_AXES],

    // ---- GEOMETRY ----
    /// Length, width and height of the platform.
    ///
    /// Units: meters
    pub platform_dims_m: [f64; 3],

    /// Length, width and height of the frame, whose corners hold the cable
    /// anchors.
    ///
    /// Units: meters
    pub frame_dims_m: [f64; 3],

    /// Platform corner each cable is attached to.
    #[serde(default)]
    pub correspondence: CorrespondenceTable,

    // ---- WINCHES ----
    pub drum: motor_ctrl::Params,
}

/// The validated configuration of the robot, fixed for a whole run.
#[derive(Debug, Clone)]
pub struct CableRig {
    pub planner: StepPlanner,

    pub platform_dims: BoxDims,

    /// Anchor points of the cables, frame corner `i` holding cable `i`.
    pub frame_corners: BoxCorners,

    pub correspondence: CorrespondenceTable,

    pub motor: MotorCmdMapper,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// Check every parameter and build the rig they describe.
    pub fn validate(&self) -> Result<CableRig, CableCtrlError> {
        let frame_dims = BoxDims::try_from(self.frame_dims_m)?;

        Ok(CableRig {
            planner: StepPlanner::new(self.max_step)?,
            platform_dims: BoxDims::try_from(self.platform_dims_m)?,
            frame_corners: anchored_corners(&frame_dims),
            correspondence: self.correspondence,
            motor: MotorCmdMapper::new(&self.drum)?,
        })
    }
}

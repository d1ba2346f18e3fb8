//! Implementations for the CableCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace, warn};
use serde::Serialize;

// Internal
use super::{
    calc_cable_lengths, calc_platform_corners, CableCtrlError, CableLengthDelta, CableLengths,
    CableRig, Params,
};
use crate::{motor_ctrl::MotorCommand, pose::Pose6D, step_planner::TrajectoryPlan};
use util::{module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Cable control module state
#[derive(Default)]
pub struct CableCtrl {
    /// Validated configuration, `None` until the module is initialised.
    pub(crate) rig: Option<CableRig>,

    pub(crate) mode: Mode,

    pub(crate) report: StatusReport,

    /// The discretised trajectory being executed.
    pub(crate) plan: TrajectoryPlan,

    /// Index of the next step to execute.
    pub(crate) step_index: usize,

    /// Pose reached by the last executed step.
    pub(crate) pose: Pose6D,

    /// Cable lengths at `pose`.
    pub(crate) lengths_m: CableLengths,

    /// Cable lengths at the start of the trajectory.
    pub(crate) initial_lengths_m: CableLengths,
}

/// Input data to Cable Control.
#[derive(Default)]
pub struct InputData {
    /// A new trajectory to execute, or `None` to continue the current one.
    pub waypoints: Option<Vec<Pose6D>>,
}

/// Output data of one CableCtrl cycle.
#[derive(Clone, Copy, Default, Debug)]
pub struct OutputData {
    /// The step executed in this cycle, `None` if there was nothing to do.
    pub step: Option<StepOutput>,
}

/// Everything produced by a single step of the trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutput {
    /// Index of the step in the trajectory
    pub step_index: usize,

    /// Platform pose at the end of the step
    pub pose: Pose6D,

    /// Absolute cable lengths at the end of the step
    ///
    /// Units: meters
    pub lengths_m: CableLengths,

    /// Change of cable lengths over the step
    ///
    /// Units: meters
    pub delta_m: CableLengthDelta,

    /// Drum rotations performing `delta_m`
    ///
    /// Units: radians
    pub motor_cmd_rad: MotorCommand,
}

/// The whole output of a trajectory, one entry per step in each sequence.
#[derive(Clone, Debug, Default)]
pub struct TrajectoryOutput {
    pub poses: Vec<Pose6D>,
    pub lengths_m: Vec<CableLengths>,
    pub deltas_m: Vec<CableLengthDelta>,
    pub motor_cmds_rad: Vec<MotorCommand>,

    /// Cable lengths at the first waypoint
    pub initial_lengths_m: CableLengths,

    /// Cable lengths once the whole trajectory has been executed
    pub final_lengths_m: CableLengths,
}

/// Status report for CableCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    pub mode: Mode,

    /// Number of steps executed so far
    pub steps_done: usize,

    /// Total number of steps in the current trajectory
    pub num_steps: usize,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Execution mode of CableCtrl.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// No trajectory loaded yet
    Uninitialized,

    /// Executing the steps of a trajectory
    Running,

    /// The last trajectory is finished (or was aborted)
    Done,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Mode {
    fn default() -> Self {
        Mode::Uninitialized
    }
}

impl State for CableCtrl {
    type InitData = &'static str;
    type InitError = CableCtrlError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = CableCtrlError;

    /// Initialise the CableCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session) -> Result<(), Self::InitError> {
        let params: Params = params::load(init_data)?;

        *self = Self::new(&params)?;

        Ok(())
    }

    /// Perform one step of the current trajectory, loading the input
    /// trajectory first if there is one.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        if let Some(waypoints) = &input_data.waypoints {
            self.load_trajectory(waypoints)?;
        }

        let step = self.step()?;

        Ok((OutputData { step }, self.report))
    }
}

impl CableCtrl {
    /// Create a new module from the given parameters.
    ///
    /// All parameters are validated here, so that configuration errors are
    /// raised before any trajectory is loaded.
    pub fn new(params: &Params) -> Result<Self, CableCtrlError> {
        Ok(Self {
            rig: Some(params.validate()?),
            ..Default::default()
        })
    }

    /// Current execution mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current status report.
    pub fn report(&self) -> StatusReport {
        self.report
    }

    /// The plan of the current trajectory.
    pub fn plan(&self) -> &TrajectoryPlan {
        &self.plan
    }

    /// Pose reached by the last step, the first waypoint before any step.
    pub fn pose(&self) -> Pose6D {
        self.pose
    }

    /// Cable lengths at the pose reached by the last step.
    pub fn lengths_m(&self) -> CableLengths {
        self.lengths_m
    }

    /// Cable lengths at an arbitrary pose, without touching the running
    /// state.
    pub fn lengths_at(&self, pose: &Pose6D) -> Result<CableLengths, CableCtrlError> {
        let rig = self.rig.as_ref().ok_or(CableCtrlError::NotInitialised)?;

        let corners = calc_platform_corners(pose, &rig.platform_dims)?;

        calc_cable_lengths(&corners, &rig.frame_corners, &rig.correspondence)
    }

    /// Load a new trajectory, replacing any trajectory being executed.
    ///
    /// The initial cable lengths are computed from the first waypoint. A
    /// trajectory with no steps (a single waypoint, or only repeated
    /// waypoints) goes straight to `Mode::Done`.
    pub fn load_trajectory(&mut self, waypoints: &[Pose6D]) -> Result<(), CableCtrlError> {
        let rig = self.rig.as_ref().ok_or(CableCtrlError::NotInitialised)?;

        if self.mode == Mode::Running {
            warn!(
                "Replacing trajectory with {} steps remaining",
                self.plan.num_steps() - self.step_index
            );
        }

        let plan = rig.planner.plan(waypoints)?;
        let initial_lengths_m = self.lengths_at(&plan.start)?;

        debug!(
            "New trajectory: {} waypoints, {} steps",
            waypoints.len(),
            plan.num_steps()
        );

        self.pose = plan.start;
        self.lengths_m = initial_lengths_m;
        self.initial_lengths_m = initial_lengths_m;
        self.step_index = 0;
        self.mode = match plan.num_steps() {
            0 => Mode::Done,
            _ => Mode::Running,
        };
        self.plan = plan;
        self.update_report();

        Ok(())
    }

    /// Execute the next step of the trajectory.
    ///
    /// Returns `None` when no trajectory is running. If the step produces a
    /// non-finite value the trajectory is aborted and the error reports the
    /// step and pose at fault.
    pub fn step(&mut self) -> Result<Option<StepOutput>, CableCtrlError> {
        if self.mode != Mode::Running {
            return Ok(None);
        }

        let step_index = self.step_index;
        let pose = self.plan.poses[step_index];

        let output = match self.calc_step(step_index, pose) {
            Ok(o) => o,
            Err(e) => {
                self.mode = Mode::Done;
                self.update_report();
                return Err(CableCtrlError::StepFailed {
                    step_index,
                    pose,
                    source: Box::new(e),
                });
            }
        };

        trace!(
            "CableCtrl step {}:\n    pose: {:?}\n    delta: {:?}",
            step_index,
            pose.to_array(),
            output.delta_m.as_slice()
        );

        self.pose = pose;
        self.lengths_m = output.lengths_m;
        self.step_index += 1;

        if self.step_index >= self.plan.num_steps() {
            debug!("Trajectory complete after {} steps", self.step_index);
            self.mode = Mode::Done;
        }
        self.update_report();

        Ok(Some(output))
    }

    /// Execute a whole trajectory, collecting the output of every step.
    pub fn run(&mut self, waypoints: &[Pose6D]) -> Result<TrajectoryOutput, CableCtrlError> {
        self.load_trajectory(waypoints)?;

        let num_steps = self.plan.num_steps();
        let mut output = TrajectoryOutput {
            poses: Vec::with_capacity(num_steps),
            lengths_m: Vec::with_capacity(num_steps),
            deltas_m: Vec::with_capacity(num_steps),
            motor_cmds_rad: Vec::with_capacity(num_steps),
            initial_lengths_m: self.initial_lengths_m,
            final_lengths_m: self.initial_lengths_m,
        };

        while let Some(step) = self.step()? {
            output.poses.push(step.pose);
            output.lengths_m.push(step.lengths_m);
            output.deltas_m.push(step.delta_m);
            output.motor_cmds_rad.push(step.motor_cmd_rad);
        }

        output.final_lengths_m = self.lengths_m;

        Ok(output)
    }

    /// Compute the output of a step reaching `pose`.
    fn calc_step(&self, step_index: usize, pose: Pose6D) -> Result<StepOutput, CableCtrlError> {
        let rig = self.rig.as_ref().ok_or(CableCtrlError::NotInitialised)?;

        let lengths_m = self.lengths_at(&pose)?;
        let delta_m = lengths_m - self.lengths_m;
        let motor_cmd_rad = rig.motor.map_all(&delta_m)?;

        Ok(StepOutput {
            step_index,
            pose,
            lengths_m,
            delta_m,
            motor_cmd_rad,
        })
    }

    fn update_report(&mut self) {
        self.report = StatusReport {
            mode: self.mode,
            steps_done: self.step_index,
            num_steps: self.plan.num_steps(),
        };
    }
}

//! # Step planner
//!
//! Splits a waypoint trajectory into small pose increments so that the
//! platform never moves more than a configured maximum along any axis in one
//! step.
//!
//! For a segment going from `O` to `D` with maximum steps `M` the number of
//! steps is
//!
//! ```text
//! n = ceil(max_i(|D_i - O_i| / M_i))
//! ```
//!
//! i.e. the slowest axis dictates the count, and every step of the segment is
//! the same increment `(D - O) / n`. A segment whose end points are equal has
//! no steps.
//!
//! A trajectory may hold at most [`MAX_TRAJECTORY_STEPS`] steps, so that a
//! tiny maximum step against an ordinary segment is refused instead of
//! exhausting memory.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use nalgebra::Vector6;

// Internal
use crate::pose::{Pose6D, StepVector, NUM_POSE_AXES};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Largest number of steps a whole trajectory may be split into.
pub const MAX_TRAJECTORY_STEPS: usize = 10_000_000;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Discretises trajectories with a fixed per-axis maximum step.
#[derive(Clone, Debug)]
pub struct StepPlanner {
    max_step: Vector6<f64>,
}

/// The discretisation of a single segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentPlan {
    /// Start of the segment
    pub origin: Pose6D,

    /// End of the segment
    pub destination: Pose6D,

    /// Number of steps needed to go from origin to destination
    pub num_steps: usize,

    /// The increment applied at each step, zero if there are no steps
    pub step: StepVector,
}

/// The discretisation of a whole trajectory.
#[derive(Clone, Debug, Default)]
pub struct TrajectoryPlan {
    /// First waypoint of the trajectory, the pose before any step
    pub start: Pose6D,

    /// One plan per pair of consecutive waypoints
    pub segments: Vec<SegmentPlan>,

    /// Pose reached after each step, in path order
    pub poses: Vec<Pose6D>,

    /// Increment of each step, in path order
    pub steps: Vec<StepVector>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors raised while planning steps.
#[derive(Debug, thiserror::Error)]
pub enum StepPlannerError {
    #[error("Maximum step of axis {axis} must be strictly positive and finite, found {value}")]
    InvalidMaxStep { axis: usize, value: f64 },

    #[error("Cannot plan an empty trajectory")]
    EmptyTrajectory,

    #[error("Waypoint {index} is not finite: {pose:?}")]
    NonFiniteWaypoint { index: usize, pose: Pose6D },

    #[error(
        "Segment {segment} brings the trajectory to {steps} steps, more than the limit of {}",
        MAX_TRAJECTORY_STEPS
    )]
    TooManySteps { segment: usize, steps: f64 },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl StepPlanner {
    /// Create a new planner, all maximum steps must be strictly positive.
    ///
    /// Units: meters for the translation axes, radians for the rotation axes.
    pub fn new(max_step: [f64; NUM_POSE_AXES]) -> Result<Self, StepPlannerError> {
        for (axis, &value) in max_step.iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(StepPlannerError::InvalidMaxStep { axis, value });
            }
        }

        Ok(Self {
            max_step: Vector6::from(max_step),
        })
    }

    /// Plan a single segment.
    ///
    /// A non-finite end point is reported as waypoint 0 (origin) or 1
    /// (destination).
    pub fn plan_segment(
        &self,
        origin: Pose6D,
        destination: Pose6D,
    ) -> Result<SegmentPlan, StepPlannerError> {
        check_finite(0, &origin)?;
        check_finite(1, &destination)?;

        self.segment(0, origin, destination)
    }

    /// Plan a whole trajectory.
    ///
    /// A trajectory of a single waypoint is valid and has no steps.
    pub fn plan(&self, waypoints: &[Pose6D]) -> Result<TrajectoryPlan, StepPlannerError> {
        let start = match waypoints.first() {
            Some(w) => *w,
            None => return Err(StepPlannerError::EmptyTrajectory),
        };

        for (index, pose) in waypoints.iter().enumerate() {
            check_finite(index, pose)?;
        }

        let segments = waypoints
            .windows(2)
            .enumerate()
            .map(|(i, w)| self.segment(i, w[0], w[1]))
            .collect::<Result<Vec<SegmentPlan>, _>>()?;

        let mut num_steps: usize = 0;
        for (i, seg) in segments.iter().enumerate() {
            num_steps = num_steps
                .checked_add(seg.num_steps)
                .filter(|&n| n <= MAX_TRAJECTORY_STEPS)
                .ok_or(StepPlannerError::TooManySteps {
                    segment: i,
                    steps: num_steps as f64 + seg.num_steps as f64,
                })?;
        }

        let mut plan = TrajectoryPlan {
            start,
            segments: Vec::new(),
            poses: Vec::with_capacity(num_steps),
            steps: Vec::with_capacity(num_steps),
        };

        for seg in segments.iter() {
            for j in 1..=seg.num_steps {
                plan.poses.push(seg.pose_at(j));
                plan.steps.push(seg.step);
            }
        }

        plan.segments = segments;

        trace!(
            "Planned {} steps over {} segments",
            plan.num_steps(),
            plan.segments.len()
        );

        Ok(plan)
    }

    /// Plan a segment whose end points are known to be finite.
    ///
    /// `index` is the position of the segment in its trajectory, used to
    /// report an excessive step count.
    fn segment(
        &self,
        index: usize,
        origin: Pose6D,
        destination: Pose6D,
    ) -> Result<SegmentPlan, StepPlannerError> {
        let diff = destination - origin;

        let steps = diff.0.abs().component_div(&self.max_step).max().ceil();
        if !(steps <= MAX_TRAJECTORY_STEPS as f64) {
            return Err(StepPlannerError::TooManySteps {
                segment: index,
                steps,
            });
        }
        let num_steps = steps as usize;

        let step = match num_steps {
            0 => StepVector::default(),
            n => StepVector(diff.0 / n as f64),
        };

        Ok(SegmentPlan {
            origin,
            destination,
            num_steps,
            step,
        })
    }
}

impl SegmentPlan {
    /// Pose reached after `j` steps of this segment.
    ///
    /// After the last step the destination is returned as is, so that
    /// rounding never accumulates across segments.
    pub fn pose_at(&self, j: usize) -> Pose6D {
        if j >= self.num_steps {
            self.destination
        } else {
            Pose6D(self.origin.0 + self.step.0 * j as f64)
        }
    }
}

impl TrajectoryPlan {
    /// Total number of steps in the trajectory.
    pub fn num_steps(&self) -> usize {
        self.steps.len()
    }

    /// Pose at the end of the trajectory.
    pub fn end(&self) -> Pose6D {
        self.poses.last().copied().unwrap_or(self.start)
    }
}

fn check_finite(index: usize, pose: &Pose6D) -> Result<(), StepPlannerError> {
    if pose.is_finite() {
        Ok(())
    } else {
        Err(StepPlannerError::NonFiniteWaypoint { index, pose: *pose })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TOL: f64 = 1e-9;

    const MAX_STEP: [f64; 6] = [0.01, 0.02, 0.01, 0.05, 0.05, 0.1];

    /// A handful of segments exercising every axis, including fractional
    /// ratios and negative directions.
    fn sample_segments() -> Vec<(Pose6D, Pose6D)> {
        vec![
            (
                Pose6D::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
                Pose6D::new(0.1, 0.05, -0.03, 0.2, 0.0, 0.0),
            ),
            (
                Pose6D::new(0.5, 0.5, 0.5, 0.0, 0.0, 0.0),
                Pose6D::new(0.5, 0.5, 0.5, 0.0, 0.0, 1.337),
            ),
            (
                Pose6D::new(0.3, 0.7, 0.2, -0.1, 0.2, 0.3),
                Pose6D::new(0.31, 0.2, 0.25, 0.4, -0.6, 0.0),
            ),
            (
                Pose6D::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0),
                Pose6D::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            ),
        ]
    }

    #[test]
    fn test_rejects_bad_max_step() {
        match StepPlanner::new([0.1, 0.1, 0.0, 0.1, 0.1, 0.1]) {
            Err(StepPlannerError::InvalidMaxStep { axis, value }) => {
                assert_eq!(axis, 2);
                assert_eq!(value, 0.0);
            }
            other => panic!("Expected an invalid max step, got {:?}", other),
        }

        assert!(StepPlanner::new([0.1, -0.1, 0.1, 0.1, 0.1, 0.1]).is_err());
        assert!(StepPlanner::new([0.1, 0.1, 0.1, 0.1, std::f64::NAN, 0.1]).is_err());
        assert!(StepPlanner::new(MAX_STEP).is_ok());
    }

    #[test]
    fn test_step_count() {
        let planner = StepPlanner::new([0.25, 0.25, 0.25, 0.5, 0.5, 0.5]).unwrap();

        // Ratios are 4, 8, 2, 0, 2, 0.5: Y dictates
        let seg = planner
            .plan_segment(
                Pose6D::default(),
                Pose6D::new(1.0, -2.0, 0.5, 0.0, 1.0, 0.25),
            )
            .unwrap();
        assert_eq!(seg.num_steps, 8);
        assert_eq!(seg.step.to_array(), [0.125, -0.25, 0.0625, 0.0, 0.125, 0.03125]);

        // A fractional ratio rounds up
        let seg = planner
            .plan_segment(Pose6D::default(), Pose6D::new(1.1, 0.0, 0.0, 0.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(seg.num_steps, 5);

        // Every segment follows the ceiling formula
        let planner = StepPlanner::new(MAX_STEP).unwrap();
        for (o, d) in sample_segments() {
            let seg = planner.plan_segment(o, d).unwrap();
            let expected = (0..6)
                .map(|i| ((d.0[i] - o.0[i]).abs() / MAX_STEP[i]).ceil() as usize)
                .max()
                .unwrap();
            assert_eq!(seg.num_steps, expected);
        }
    }

    #[test]
    fn test_steps_bounded_and_sum_to_segment() {
        let planner = StepPlanner::new(MAX_STEP).unwrap();

        for (o, d) in sample_segments() {
            let seg = planner.plan_segment(o, d).unwrap();

            for i in 0..6 {
                assert!(
                    seg.step.0[i].abs() <= MAX_STEP[i] * (1.0 + 1e-12),
                    "axis {} step {} exceeds {}",
                    i,
                    seg.step.0[i],
                    MAX_STEP[i]
                );
            }

            let total = seg.step.0 * seg.num_steps as f64;
            assert!((total - (d - o).0).norm() < TOL);

            // Last pose lands on the destination
            assert_eq!(seg.pose_at(seg.num_steps), d);
        }
    }

    #[test]
    fn test_too_many_steps() {
        // Valid but tiny maximum step along X
        let planner = StepPlanner::new([1e-300, 1.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
        let waypoints = [
            Pose6D::default(),
            Pose6D::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            Pose6D::default(),
        ];

        match planner.plan(&waypoints) {
            Err(StepPlannerError::TooManySteps { segment, steps }) => {
                assert_eq!(segment, 0);
                assert!(steps > MAX_TRAJECTORY_STEPS as f64);
            }
            other => panic!("Expected too many steps, got {:?}", other),
        }

        // Segments within the limit on their own can still add up past it
        let planner = StepPlanner::new([1e-7, 1.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
        let waypoints = [
            Pose6D::default(),
            Pose6D::new(0.6, 0.0, 0.0, 0.0, 0.0, 0.0),
            Pose6D::default(),
        ];

        match planner.plan(&waypoints) {
            Err(StepPlannerError::TooManySteps { segment, steps }) => {
                assert_eq!(segment, 1);
                assert!(steps > MAX_TRAJECTORY_STEPS as f64);
            }
            other => panic!("Expected too many steps, got {:?}", other),
        }

        assert!(planner
            .plan_segment(Pose6D::default(), Pose6D::new(2.0, 0.0, 0.0, 0.0, 0.0, 0.0))
            .is_err());
    }

    #[test]
    fn test_stationary_segment() {
        let planner = StepPlanner::new(MAX_STEP).unwrap();
        let p = Pose6D::new(0.5, 0.5, 0.5, 0.1, 0.2, 0.3);

        let seg = planner.plan_segment(p, p).unwrap();
        assert_eq!(seg.num_steps, 0);
        assert_eq!(seg.step, StepVector::default());
        assert!(seg.step.0.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_single_waypoint() {
        let planner = StepPlanner::new(MAX_STEP).unwrap();
        let p = Pose6D::new(0.5, 0.5, 0.5, 0.0, 0.0, 0.0);

        let plan = planner.plan(&[p]).unwrap();
        assert_eq!(plan.num_steps(), 0);
        assert!(plan.segments.is_empty());
        assert!(plan.poses.is_empty());
        assert_eq!(plan.start, p);
        assert_eq!(plan.end(), p);
    }

    #[test]
    fn test_empty_trajectory() {
        let planner = StepPlanner::new(MAX_STEP).unwrap();
        match planner.plan(&[]) {
            Err(StepPlannerError::EmptyTrajectory) => (),
            other => panic!("Expected an empty trajectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_waypoint() {
        let planner = StepPlanner::new(MAX_STEP).unwrap();
        let waypoints = [
            Pose6D::default(),
            Pose6D::new(0.1, 0.0, 0.0, 0.0, 0.0, 0.0),
            Pose6D::new(0.1, std::f64::INFINITY, 0.0, 0.0, 0.0, 0.0),
        ];

        match planner.plan(&waypoints) {
            Err(StepPlannerError::NonFiniteWaypoint { index, .. }) => assert_eq!(index, 2),
            other => panic!("Expected a non-finite waypoint error, got {:?}", other),
        }
    }

    #[test]
    fn test_trajectory_concatenation() {
        let planner = StepPlanner::new(MAX_STEP).unwrap();
        let waypoints: Vec<Pose6D> = {
            let mut w = vec![sample_segments()[0].0];
            w.extend(sample_segments().iter().map(|(_, d)| *d));
            w
        };

        let plan = planner.plan(&waypoints).unwrap();

        assert_eq!(plan.segments.len(), waypoints.len() - 1);
        assert_eq!(
            plan.num_steps(),
            plan.segments.iter().map(|s| s.num_steps).sum::<usize>()
        );
        assert_eq!(plan.poses.len(), plan.steps.len());

        // Each segment's last pose is exactly its destination, and the shared
        // end point appears once only.
        let mut idx = 0;
        for seg in plan.segments.iter() {
            idx += seg.num_steps;
            if seg.num_steps > 0 {
                assert_eq!(plan.poses[idx - 1], seg.destination);
            }
        }
        assert_eq!(plan.end(), *waypoints.last().unwrap());

        // Integrating the steps from the start reaches the end
        let mut pose = plan.start;
        for step in plan.steps.iter() {
            pose += *step;
        }
        assert!((pose.0 - plan.end().0).norm() < TOL);
    }
}

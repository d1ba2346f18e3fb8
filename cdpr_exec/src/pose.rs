//! # Platform pose
//!
//! Poses and pose increments of the platform, expressed in the frame's
//! coordinate system.
//!
//! Both types hold 6 ordered components:
//!
//! | index | component | units   |
//! |-------|-----------|---------|
//! | 0     | x         | meters  |
//! | 1     | y         | meters  |
//! | 2     | z         | meters  |
//! | 3     | rx        | radians |
//! | 4     | ry        | radians |
//! | 5     | rz        | radians |
//!
//! The rotation components are angles about the frame's fixed X, Y and Z axes,
//! combined by [`crate::geometry::rotation_matrix`].

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{Vector3, Vector6};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of components in a pose.
pub const NUM_POSE_AXES: usize = 6;

/// Names of the pose components, in order.
pub const POSE_AXIS_NAMES: [&str; NUM_POSE_AXES] = ["x", "y", "z", "rx", "ry", "rz"];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Position and attitude of the platform centre in the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose6D(pub Vector6<f64>);

/// An increment of pose, added to a [`Pose6D`] to move one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepVector(pub Vector6<f64>);

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors raised when building poses from raw values.
#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    #[error("Expected {expected} components, found {found}")]
    WrongComponentCount { expected: usize, found: usize },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose6D {
    /// Create a new pose from its translation and rotation components.
    pub fn new(x_m: f64, y_m: f64, z_m: f64, rx_rad: f64, ry_rad: f64, rz_rad: f64) -> Self {
        Self(Vector6::new(x_m, y_m, z_m, rx_rad, ry_rad, rz_rad))
    }

    /// Create a pose from a slice of exactly 6 components.
    pub fn from_slice(values: &[f64]) -> Result<Self, PoseError> {
        check_len(values).map(|_| Self(Vector6::from_column_slice(values)))
    }

    /// Translation of the platform centre.
    ///
    /// Units: meters
    pub fn translation_m(&self) -> Vector3<f64> {
        self.0.fixed_rows::<3>(0).into_owned()
    }

    /// Rotation angles about the frame's X, Y and Z axes.
    ///
    /// Units: radians
    pub fn rotation_rad(&self) -> Vector3<f64> {
        self.0.fixed_rows::<3>(3).into_owned()
    }

    /// True if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Components as a plain array, in the documented order.
    pub fn to_array(&self) -> [f64; NUM_POSE_AXES] {
        self.0.into()
    }
}

impl StepVector {
    /// Create a step vector from a slice of exactly 6 components.
    pub fn from_slice(values: &[f64]) -> Result<Self, PoseError> {
        check_len(values).map(|_| Self(Vector6::from_column_slice(values)))
    }

    /// Components as a plain array, in the documented order.
    pub fn to_array(&self) -> [f64; NUM_POSE_AXES] {
        self.0.into()
    }
}

impl From<[f64; NUM_POSE_AXES]> for Pose6D {
    fn from(values: [f64; NUM_POSE_AXES]) -> Self {
        Self(Vector6::from(values))
    }
}

impl From<[f64; NUM_POSE_AXES]> for StepVector {
    fn from(values: [f64; NUM_POSE_AXES]) -> Self {
        Self(Vector6::from(values))
    }
}

impl Add<StepVector> for Pose6D {
    type Output = Pose6D;

    fn add(self, rhs: StepVector) -> Self::Output {
        Pose6D(self.0 + rhs.0)
    }
}

impl AddAssign<StepVector> for Pose6D {
    fn add_assign(&mut self, rhs: StepVector) {
        self.0 += rhs.0;
    }
}

impl Sub for Pose6D {
    type Output = StepVector;

    fn sub(self, rhs: Pose6D) -> Self::Output {
        StepVector(self.0 - rhs.0)
    }
}

fn check_len(values: &[f64]) -> Result<(), PoseError> {
    if values.len() == NUM_POSE_AXES {
        Ok(())
    } else {
        Err(PoseError::WrongComponentCount {
            expected: NUM_POSE_AXES,
            found: values.len(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_layout() {
        let pose = Pose6D::new(1.0, 2.0, 3.0, 0.1, 0.2, 0.3);

        assert_eq!(pose.translation_m(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(pose.rotation_rad(), Vector3::new(0.1, 0.2, 0.3));
        assert_eq!(pose.to_array(), [1.0, 2.0, 3.0, 0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_from_slice() {
        let pose = Pose6D::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(pose, Pose6D::from([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));

        match Pose6D::from_slice(&[1.0, 2.0, 3.0]) {
            Err(PoseError::WrongComponentCount { expected, found }) => {
                assert_eq!(expected, 6);
                assert_eq!(found, 3);
            }
            Ok(p) => panic!("Expected a shape error, got {:?}", p),
        }

        assert!(StepVector::from_slice(&[0.0; 7]).is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Pose6D::new(1.0, 1.0, 1.0, 0.0, 0.0, 0.0);
        let b = Pose6D::new(2.0, 0.5, 1.0, 0.1, 0.0, -0.1);

        let step = b - a;
        assert_eq!(step.to_array(), [1.0, -0.5, 0.0, 0.1, 0.0, -0.1]);
        assert_eq!(a + step, b);

        let mut c = a;
        c += step;
        assert_eq!(c, b);

        assert!(!Pose6D::new(std::f64::NAN, 0.0, 0.0, 0.0, 0.0, 0.0).is_finite());
    }
}

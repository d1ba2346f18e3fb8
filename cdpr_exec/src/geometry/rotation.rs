//! Rotation matrix construction

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Matrix3, Rotation3, Vector3};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Build the rotation matrix of the given angles about the frame's fixed axes.
///
/// The matrix is `R = Rx(rx) * Ry(ry) * Rz(rz)`. Each factor is the frame
/// (passive) rotation of the rig's calibration, for instance
///
/// ```text
///          | 1    0       0     |
/// Rx(a) =  | 0    cos a   sin a |
///          | 0   -sin a   cos a |
/// ```
///
/// so a positive angle turns a platform vector clockwise when looking down
/// the axis. Applied to a column vector the Z factor acts first, then Y, then
/// X. Every caller in the crate goes through this function so the convention
/// cannot drift.
///
/// Units: radians
pub fn rotation_matrix(angles_rad: &Vector3<f64>) -> Matrix3<f64> {
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), -angles_rad[0]);
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), -angles_rad[1]);
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), -angles_rad[2]);

    (rx * ry * rz).into_inner()
}

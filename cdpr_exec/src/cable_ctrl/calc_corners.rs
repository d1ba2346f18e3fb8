//! Platform corner reconstruction

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::CableCtrlError;
use crate::{
    geometry::{centred_corners, rotation_matrix, BoxCorners, BoxDims, GeometryError},
    pose::Pose6D,
};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Position of the platform corners in the frame for the given pose.
///
/// The centred box corners are rotated by the pose's attitude, then moved by
/// its translation.
pub fn calc_platform_corners(
    pose: &Pose6D,
    platform_dims: &BoxDims,
) -> Result<BoxCorners, CableCtrlError> {
    if !pose.is_finite() {
        return Err(CableCtrlError::NonFinitePose(*pose));
    }

    let rot = rotation_matrix(&pose.rotation_rad());
    let translation_m = pose.translation_m();

    let mut corners = centred_corners(platform_dims);

    for (i, corner) in corners.iter_mut().enumerate() {
        *corner = rot * *corner + translation_m;

        if !corner.iter().all(|v| v.is_finite()) {
            return Err(GeometryError::NonFiniteCorner(i).into());
        }
    }

    Ok(corners)
}

//! Cable length calculation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{CableCtrlError, CableLengths};
use crate::geometry::{BoxCorners, CorrespondenceTable};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Length of each cable, i.e. the straight line distance between the frame
/// corner holding the cable and the platform corner it is attached to.
pub fn calc_cable_lengths(
    platform_corners: &BoxCorners,
    frame_corners: &BoxCorners,
    correspondence: &CorrespondenceTable,
) -> Result<CableLengths, CableCtrlError> {
    let mut lengths_m = CableLengths::zeros();

    for (cable, platform_corner) in correspondence.pairs() {
        lengths_m[cable] = (platform_corners[platform_corner] - frame_corners[cable]).norm();

        if !lengths_m[cable].is_finite() {
            return Err(CableCtrlError::NonFiniteLength(cable));
        }
    }

    Ok(lengths_m)
}

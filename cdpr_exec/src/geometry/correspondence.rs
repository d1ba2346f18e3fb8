//! Cable routing table

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use super::{GeometryError, NUM_CABLES};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Platform corner reached by each cable in the physical wiring.
///
/// Each cable leaves its frame corner and crosses over to the platform corner
/// on the opposite side in X, keeping the same Y side and height.
pub const DEFAULT_CORRESPONDENCE: [usize; NUM_CABLES] = [6, 7, 4, 5, 2, 3, 0, 1];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Maps cable index to the platform corner the cable is attached to.
///
/// Cable `i` is anchored on frame corner `i`, so only the platform side needs
/// a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[usize; 8]", into = "[usize; 8]")]
pub struct CorrespondenceTable([usize; NUM_CABLES]);

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CorrespondenceTable {
    /// Create a new table, which must be a permutation of `0..NUM_CABLES`.
    pub fn new(table: [usize; NUM_CABLES]) -> Result<Self, GeometryError> {
        let mut seen = [false; NUM_CABLES];

        for &corner in table.iter() {
            if corner >= NUM_CABLES || seen[corner] {
                return Err(GeometryError::InvalidCorrespondence(table));
            }
            seen[corner] = true;
        }

        Ok(Self(table))
    }

    /// Platform corner index of the given cable.
    pub fn platform_corner(&self, cable: usize) -> usize {
        self.0[cable]
    }

    /// Iterate over `(cable/frame corner, platform corner)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().copied().enumerate()
    }
}

impl Default for CorrespondenceTable {
    fn default() -> Self {
        Self(DEFAULT_CORRESPONDENCE)
    }
}

impl std::convert::TryFrom<[usize; NUM_CABLES]> for CorrespondenceTable {
    type Error = GeometryError;

    fn try_from(table: [usize; NUM_CABLES]) -> Result<Self, Self::Error> {
        Self::new(table)
    }
}

impl From<CorrespondenceTable> for [usize; NUM_CABLES] {
    fn from(table: CorrespondenceTable) -> Self {
        table.0
    }
}

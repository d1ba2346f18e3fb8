//! Module interfaces
//!
//! Every processing module of an exec (for instance `cable_ctrl`) provides a
//! struct implementing [`State`], so that execs can initialise modules from
//! their parameter files and then drive them one cycle at a time.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// MODULE STATE
// ---------------------------------------------------------------------------

/// A cyclically processed module.
pub trait State {
    /// Data required during initialisation, usually a parameter file path.
    type InitData;
    /// Error raised by `init`.
    type InitError;

    /// Data consumed by one processing cycle.
    type InputData;
    /// Data produced by one processing cycle.
    type OutputData;
    /// Status of the module after a processing cycle.
    type StatusReport;
    /// Error raised by `proc`.
    type ProcError;

    /// Initialise the module within the given session.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>;

    /// Run one processing cycle, returning the cycle's output along with the
    /// module's status report.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}

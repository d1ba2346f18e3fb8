//! Cable robot executable entry point.
//!
//! # Usage
//!
//! ```text
//! cdpr_exec <waypoints.csv>
//! ```
//!
//! # Architecture
//!
//! The executable runs a single trajectory and exits:
//!
//!     - Create the session and logger
//!     - Initialise CableCtrl from `params/cable_ctrl.toml`
//!     - Load the waypoints given on the command line
//!     - Run the trajectory through CableCtrl
//!     - Archive the poses, cable lengths, length changes and motor commands
//!       in the session's archive directory
//!
//! The software root is taken from the `CDPR_SW_ROOT` environment variable.

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use cdpr_lib::{
    cable_ctrl::{CableCtrl, TrajectoryOutput},
    geometry::NUM_CABLES,
    pose::POSE_AXIS_NAMES,
    waypoints,
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{info, warn};
use std::env;

// Internal
use util::{
    archive::{ArchiveError, Archiver},
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Parameter file of the cable control module, relative to `params/`.
const CABLE_CTRL_PARAMS: &str = "cable_ctrl.toml";

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("cdpr_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Cable Robot Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- ARGUMENTS ----

    let args: Vec<String> = env::args().collect();

    let waypoints_path = match args.len() {
        2 => &args[1],
        _ => {
            return Err(eyre!(
                "Expected exactly one argument, the path to the waypoint file, found {}",
                args.len() - 1
            ))
        }
    };

    // ---- MODULE INITIALISATION ----

    let mut cable_ctrl = CableCtrl::default();
    cable_ctrl
        .init(CABLE_CTRL_PARAMS, &session)
        .wrap_err("Failed to initialise CableCtrl")?;
    info!("CableCtrl initialised");

    // ---- LOAD WAYPOINTS ----

    let waypoints = waypoints::load(waypoints_path)
        .wrap_err_with(|| format!("Failed to load the waypoints from {:?}", waypoints_path))?;
    info!("Loaded {} waypoints", waypoints.len());

    if waypoints.len() == 1 {
        warn!("Only one waypoint given, the platform will not move");
    }

    // ---- RUN ----

    let output = cable_ctrl
        .run(&waypoints)
        .wrap_err("Failed to compute the cable commands")?;

    info!("Trajectory executed in {} steps", output.poses.len());
    info!(
        "Initial cable lengths (m): {:?}",
        output.initial_lengths_m.as_slice()
    );
    info!(
        "Final cable lengths (m):   {:?}",
        output.final_lengths_m.as_slice()
    );

    // ---- ARCHIVE ----

    archive_output(&session, &output).wrap_err("Failed to archive the trajectory output")?;
    info!("Output archived in {:?}", session.arch_root.join("cable_ctrl"));

    info!("End of execution");

    Ok(())
}

/// Write every sequence of the trajectory output to its own CSV file.
fn archive_output(session: &Session, output: &TrajectoryOutput) -> Result<(), ArchiveError> {
    let cable_columns: Vec<String> = (0..NUM_CABLES).map(|i| format!("cable_{}", i)).collect();

    // Poses
    let mut arch = Archiver::from_path(session, "cable_ctrl/poses.csv")?;
    arch.write_header(std::iter::once("step").chain(POSE_AXIS_NAMES.iter().copied()))?;
    for (i, pose) in output.poses.iter().enumerate() {
        arch.write_row(i, &pose.to_array())?;
    }
    arch.flush()?;

    // Cable sequences, all with one column per cable
    let sequences = [
        ("cable_ctrl/lengths.csv", &output.lengths_m),
        ("cable_ctrl/deltas.csv", &output.deltas_m),
        ("cable_ctrl/motor_cmds.csv", &output.motor_cmds_rad),
    ];

    for (path, rows) in sequences.iter() {
        let mut arch = Archiver::from_path(session, path)?;
        arch.write_header(std::iter::once("step").chain(cable_columns.iter().map(|c| c.as_str())))?;
        for (i, row) in rows.iter().enumerate() {
            arch.write_row(i, row.as_slice())?;
        }
        arch.flush()?;
    }

    Ok(())
}

//! # Cable robot library.
//!
//! Kinematics of an eight cable parallel robot: converts a trajectory of
//! platform poses into per-step cable length changes and winch rotations.
//!
//! The executable in this crate is a thin shell around [`cable_ctrl::CableCtrl`],
//! other crates in the workspace can use the modules directly.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Cable control module - runs the full pose to motor command pipeline
pub mod cable_ctrl;

/// Geometry of the platform and frame boxes, and the cable routing between them
pub mod geometry;

/// Motor control - converts cable length changes into drum rotations
pub mod motor_ctrl;

/// Platform pose and pose increment types
pub mod pose;

/// Step planner - discretises a list of waypoints into bounded steps
pub mod step_planner;

/// Waypoint file loading
pub mod waypoints;

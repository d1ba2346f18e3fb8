//! Whole pipeline tests, from parameters and waypoints to motor commands.

use std::path::PathBuf;

use cdpr_lib::{
    cable_ctrl::{CableCtrl, CableCtrlError, ErrorKind, Mode, Params},
    geometry::NUM_CABLES,
    motor_ctrl::DrumModel,
    pose::Pose6D,
    waypoints,
};

const TOL: f64 = 1e-9;

const PARAMS_TOML: &str = r#"
max_step = [0.01, 0.01, 0.01, 0.0175, 0.0175, 0.0175]
platform_dims_m = [0.25, 0.25, 0.30]
frame_dims_m = [1.25, 1.25, 1.00]

[drum]
drum_diameter_m = 0.03
"#;

fn params() -> Params {
    util::params::parse(PARAMS_TOML).unwrap()
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf()
}

#[test]
fn test_symmetric_centre() {
    let cable_ctrl = CableCtrl::new(&params()).unwrap();

    let lengths = cable_ctrl
        .lengths_at(&Pose6D::new(0.625, 0.625, 0.5, 0.0, 0.0, 0.0))
        .unwrap();

    let expected = (0.75f64.powi(2) + 0.5f64.powi(2) + 0.35f64.powi(2)).sqrt();
    for (i, l) in lengths.iter().enumerate() {
        assert!(
            (l - expected).abs() < TOL,
            "cable {} is {}, expected {}",
            i,
            l,
            expected
        );
    }
}

#[test]
fn test_full_trajectory() {
    let mut cable_ctrl = CableCtrl::new(&params()).unwrap();

    let waypoints = vec![
        Pose6D::new(0.625, 0.625, 0.5, 0.0, 0.0, 0.0),
        Pose6D::new(0.725, 0.625, 0.55, 0.0, 0.0, 0.1),
        Pose6D::new(0.725, 0.525, 0.55, 0.05, -0.05, 0.1),
    ];

    let output = cable_ctrl.run(&waypoints).unwrap();
    let num_steps = output.poses.len();

    assert!(num_steps > 0);
    assert_eq!(output.lengths_m.len(), num_steps);
    assert_eq!(output.deltas_m.len(), num_steps);
    assert_eq!(output.motor_cmds_rad.len(), num_steps);
    assert_eq!(cable_ctrl.mode(), Mode::Done);
    assert_eq!(cable_ctrl.report().steps_done, num_steps);

    // Ends on the last waypoint
    let end = output.poses[num_steps - 1];
    assert!((end.0 - waypoints[2].0).amax() < TOL);

    // No step larger than allowed
    let max_step = params().max_step;
    let mut previous = waypoints[0];
    for pose in output.poses.iter() {
        let step = *pose - previous;
        for axis in 0..6 {
            assert!(step.0[axis].abs() <= max_step[axis] + TOL);
        }
        previous = *pose;
    }

    // Length changes add up to the total change
    let sum = output
        .deltas_m
        .iter()
        .fold(output.initial_lengths_m * 0.0, |acc, d| acc + d);
    let total = output.final_lengths_m - output.initial_lengths_m;
    assert!((sum - total).amax() < TOL);

    // Absolute lengths match the pose of each step
    for (pose, lengths) in output.poses.iter().zip(output.lengths_m.iter()) {
        assert!((cable_ctrl.lengths_at(pose).unwrap() - lengths).amax() < TOL);
    }

    // Linear drums, so the motor commands follow the deltas
    for (delta, cmd) in output.deltas_m.iter().zip(output.motor_cmds_rad.iter()) {
        for i in 0..NUM_CABLES {
            assert!((cmd[i] - 2.0 * delta[i] / 0.03).abs() < TOL);
        }
    }
}

#[test]
fn test_arctangent_drums() {
    let mut params = params();
    params.drum.drum_model = DrumModel::Arctangent;
    let mut cable_ctrl = CableCtrl::new(&params).unwrap();

    let output = cable_ctrl
        .run(&[
            Pose6D::new(0.625, 0.625, 0.5, 0.0, 0.0, 0.0),
            Pose6D::new(0.625, 0.625, 0.45, 0.0, 0.0, 0.0),
        ])
        .unwrap();

    for (delta, cmd) in output.deltas_m.iter().zip(output.motor_cmds_rad.iter()) {
        for i in 0..NUM_CABLES {
            assert!((cmd[i] - (delta[i] / 0.03).atan()).abs() < TOL);
        }
    }
}

#[test]
fn test_single_waypoint() {
    let mut cable_ctrl = CableCtrl::new(&params()).unwrap();

    let output = cable_ctrl
        .run(&[Pose6D::new(0.5, 0.5, 0.5, 0.0, 0.0, 0.0)])
        .unwrap();

    assert!(output.poses.is_empty());
    assert!(output.motor_cmds_rad.is_empty());
    assert_eq!(output.initial_lengths_m, output.final_lengths_m);
    assert_eq!(cable_ctrl.mode(), Mode::Done);
}

#[test]
fn test_configuration_errors() {
    let mut bad = params();
    bad.max_step[4] = 0.0;
    assert_eq!(
        CableCtrl::new(&bad).map(|_| ()).unwrap_err().kind(),
        ErrorKind::Configuration
    );

    let mut bad = params();
    bad.frame_dims_m[2] = -1.0;
    assert_eq!(
        CableCtrl::new(&bad).map(|_| ()).unwrap_err().kind(),
        ErrorKind::Configuration
    );

    let mut bad = params();
    bad.drum.drum_diameter_m = 0.0;
    assert_eq!(
        CableCtrl::new(&bad).map(|_| ()).unwrap_err().kind(),
        ErrorKind::Configuration
    );

    // A valid but tiny maximum step is refused when the trajectory is planned
    let mut tiny = params();
    tiny.max_step[0] = 1e-300;
    let mut cable_ctrl = CableCtrl::new(&tiny).unwrap();
    match cable_ctrl.run(&[
        Pose6D::new(0.5, 0.5, 0.5, 0.0, 0.0, 0.0),
        Pose6D::new(0.6, 0.5, 0.5, 0.0, 0.0, 0.0),
    ]) {
        Err(e) => assert_eq!(e.kind(), ErrorKind::Configuration),
        Ok(o) => panic!("Expected an error, got {:?}", o),
    }
    assert_eq!(cable_ctrl.mode(), Mode::Uninitialized);

    // A correspondence that is not a permutation is refused when parsing
    let res: Result<Params, _> = util::params::parse(&format!(
        "correspondence = [0, 0, 1, 2, 3, 4, 5, 6]\n{}",
        PARAMS_TOML
    ));
    assert!(res.is_err());
}

#[test]
fn test_input_errors() {
    let mut cable_ctrl = CableCtrl::new(&params()).unwrap();

    match cable_ctrl.run(&[]) {
        Err(e) => assert_eq!(e.kind(), ErrorKind::InputShape),
        Ok(o) => panic!("Expected an error, got {:?}", o),
    }

    match cable_ctrl.run(&[
        Pose6D::new(0.5, 0.5, 0.5, 0.0, 0.0, 0.0),
        Pose6D::new(0.5, std::f64::NAN, 0.5, 0.0, 0.0, 0.0),
    ]) {
        Err(e) => assert_eq!(e.kind(), ErrorKind::Numerical),
        Ok(o) => panic!("Expected an error, got {:?}", o),
    }

    // Nothing was started by the failed loads
    assert_eq!(cable_ctrl.mode(), Mode::Uninitialized);
}

#[test]
fn test_uninitialised() {
    let mut cable_ctrl = CableCtrl::default();

    match cable_ctrl.run(&[Pose6D::new(0.5, 0.5, 0.5, 0.0, 0.0, 0.0)]) {
        Err(CableCtrlError::NotInitialised) => (),
        other => panic!("Expected NotInitialised, got {:?}", other),
    }
}

#[test]
fn test_shipped_params_and_demo() {
    let root = repo_root();

    let params_str = std::fs::read_to_string(root.join("params/cable_ctrl.toml")).unwrap();
    let params: Params = util::params::parse(&params_str).unwrap();
    let mut cable_ctrl = CableCtrl::new(&params).unwrap();

    let waypoints = waypoints::load(root.join("demos/square_lift.csv")).unwrap();
    assert_eq!(waypoints.len(), 6);

    let output = cable_ctrl.run(&waypoints).unwrap();

    // The demo is a closed loop, so every cable ends where it started
    assert!(!output.poses.is_empty());
    assert!((output.final_lengths_m - output.initial_lengths_m).amax() < TOL);
}

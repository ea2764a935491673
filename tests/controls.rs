// tests/controls.rs
use robot_rig::{
    ControlConfig, ControlOp, HeadLimits, InputController, RobotPose, wrap_degrees,
};

const EPS: f32 = 1e-4;

fn controller() -> InputController {
    InputController::with_standard_keys(ControlConfig::default())
}

/// Small deterministic generator for key sequences.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

#[test]
fn drive_forward_from_rest() {
    let controller = controller();
    let mut pose = RobotPose::default();
    assert!(controller.on_key_press('w', &mut pose));

    assert!(pose.position_x.abs() < EPS);
    assert!((pose.position_z - 2.0).abs() < EPS);
    assert!((pose.wheel_turn - 20.0).abs() < EPS);
}

#[test]
fn drive_follows_yaw() {
    let controller = controller();
    let mut pose = RobotPose::default();
    controller.on_key_press('r', &mut pose);
    controller.on_key_press('w', &mut pose);

    assert!((pose.robot_angle - 2.0).abs() < EPS);
    let magnitude = (pose.position_x.powi(2) + pose.position_z.powi(2)).sqrt();
    assert!((magnitude - 2.0).abs() < EPS);
    let heading = pose.position_x.atan2(pose.position_z).to_degrees();
    assert!((heading - 2.0).abs() < EPS, "heading {heading}");
}

#[test]
fn forward_then_back_is_identity() {
    let controller = controller();
    let mut rng = Lcg(7);
    for _ in 0..200 {
        let start = RobotPose {
            robot_angle: (rng.next() % 360) as f32 + 0.5,
            wheel_turn: (rng.next() % 360) as f32,
            position_x: (rng.next() % 200) as f32 - 100.0,
            position_z: (rng.next() % 200) as f32 - 100.0,
            ..RobotPose::default()
        };

        for keys in [['w', 's'], ['s', 'w']] {
            let mut pose = start.clone();
            for key in keys {
                controller.on_key_press(key, &mut pose);
            }
            assert!((pose.position_x - start.position_x).abs() < EPS);
            assert!((pose.position_z - start.position_z).abs() < EPS);
            let wheel_delta = wrap_degrees(pose.wheel_turn - start.wheel_turn);
            assert!(wheel_delta < EPS || wheel_delta > 360.0 - EPS);
        }
    }
}

#[test]
fn head_pitch_stays_within_limits() {
    let limits = HeadLimits::default();
    for pitch_step in [2.0, 7.0] {
        let controller = InputController::with_standard_keys(ControlConfig {
            pitch_step,
            ..ControlConfig::default()
        });
        let mut pose = RobotPose::default();
        let mut rng = Lcg(42);
        let mut reached_down = false;
        let mut reached_up = false;

        for _ in 0..10_000 {
            let key = if rng.next() % 2 == 0 { 'a' } else { 'A' };
            controller.on_key_press(key, &mut pose);
            assert!(
                (limits.up..=limits.down).contains(&pose.head_angle),
                "head angle {} escaped with step {pitch_step}",
                pose.head_angle
            );
            reached_down |= pose.head_angle + pitch_step > limits.down;
            reached_up |= pose.head_angle - pitch_step < limits.up;
        }
        assert!(reached_down && reached_up, "walk never reached a limit");
    }
}

#[test]
fn head_stops_at_each_limit() {
    let controller = controller();
    let mut pose = RobotPose::default();
    for _ in 0..50 {
        controller.on_key_press('a', &mut pose);
    }
    assert_eq!(pose.head_angle, 20.0);
    assert!(!controller.on_key_press('a', &mut pose));

    for _ in 0..100 {
        controller.on_key_press('A', &mut pose);
    }
    assert_eq!(pose.head_angle, -40.0);
}

#[test]
fn yaw_wraps_both_ways() {
    let controller = controller();
    let mut pose = RobotPose::default();
    controller.on_key_press('R', &mut pose);
    assert!((pose.robot_angle - 358.0).abs() < EPS);
    controller.on_key_press('r', &mut pose);
    assert!(pose.robot_angle.abs() < EPS);

    for _ in 0..200 {
        controller.on_key_press('r', &mut pose);
    }
    assert!((0.0..360.0).contains(&pose.robot_angle));
    assert!((pose.robot_angle - 40.0).abs() < EPS);
}

#[test]
fn unknown_keys_leave_pose_alone() {
    let controller = controller();
    let mut pose = RobotPose::default();
    for key in ['t', 'x', ' ', 'W', '1'] {
        assert_eq!(controller.op_for(key), ControlOp::Ignore);
        assert!(!controller.on_key_press(key, &mut pose));
    }
    assert_eq!(pose, RobotPose::default());
}

#[test]
fn custom_bindings() {
    let mut controller = InputController::new(ControlConfig::default());
    assert_eq!(controller.op_for('w'), ControlOp::Ignore);

    controller.set_key('i', ControlOp::Drive(1.0));
    controller.set_key('k', ControlOp::Drive(-1.0));
    let mut pose = RobotPose::default();
    controller.on_key_press('i', &mut pose);
    controller.on_key_press('i', &mut pose);
    controller.on_key_press('k', &mut pose);
    assert!((pose.position_z - 2.0).abs() < EPS);
}

#[test]
fn inverted_limits_are_rejected() {
    let config = ControlConfig {
        head_limits: HeadLimits {
            up: 10.0,
            down: -10.0,
        },
        ..ControlConfig::default()
    };
    assert!(config.validate().is_err());
    assert!(ControlConfig::default().validate().is_ok());
}

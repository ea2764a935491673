// tests/scene.rs
use glam::{Mat4, Vec3};
use robot_rig::{
    AnimationConfig, AnimationDriver, BodyDimensions, DrawList, Error, MaterialPalette, MeshKind,
    PartId, PoseEvaluator, Primitive, RedrawRequest, RenderBackend, Rig, RobotPose,
    RobotProportions, RobotScene, SceneConfig, SceneEvent, TransformStack, parts,
};
use std::f32::consts::PI;
use std::sync::mpsc;
use std::time::Duration;

const EPS: f32 = 1e-4;

fn scene() -> RobotScene {
    RobotScene::new(SceneConfig::default()).unwrap()
}

#[test]
fn end_to_end_key_scenario() {
    let mut scene = scene();
    assert_eq!(scene.pose(), &RobotPose::default());

    scene.on_key_press('w');
    let pose = scene.pose();
    assert!(pose.position_x.abs() < EPS);
    assert!((pose.position_z - 2.0).abs() < EPS);
    assert!((pose.wheel_turn - 20.0).abs() < EPS);

    let mut scene = self::scene();
    scene.on_key_press('r');
    scene.on_key_press('w');
    let pose = scene.pose();
    let expected = Vec3::new(2.0 * 2f32.to_radians().sin(), 0.0, 2.0 * 2f32.to_radians().cos());
    assert!(pose.position().abs_diff_eq(expected, EPS));
}

#[test]
fn every_key_requests_redraw() {
    let mut scene = scene();
    let mut list = DrawList::new();
    scene.render_frame(&mut list);
    assert!(!scene.redraw().is_pending());

    assert!(!scene.on_key_press('z'));
    assert!(scene.redraw().is_pending());
}

#[test]
fn redraws_coalesce_into_one_frame() {
    let mut scene = scene();
    let (tx, rx) = mpsc::channel();
    for key in "wwrA".chars() {
        tx.send(SceneEvent::KeyPress(key)).unwrap();
    }
    tx.send(SceneEvent::Tick).unwrap();

    let mut list = DrawList::new();
    assert!(scene.run_pending(&rx, &mut list));
    assert_eq!(scene.frames(), 1);
    assert_eq!(scene.redraw().coalesced(), 0);

    list.clear();
    assert!(!scene.run_pending(&rx, &mut list));
    assert_eq!(scene.frames(), 1);
    assert!(list.is_empty());
}

#[test]
fn coalesced_count_is_per_frame() {
    let mut scene = scene();
    let mut list = DrawList::new();
    // The initial request plus four key presses.
    for key in "wwrA".chars() {
        scene.handle_event(SceneEvent::KeyPress(key));
    }
    assert_eq!(scene.redraw().coalesced(), 4);
    scene.render_frame(&mut list);
    assert_eq!(scene.redraw().coalesced(), 0);

    scene.on_key_press('r');
    scene.on_key_press('r');
    assert_eq!(scene.redraw().coalesced(), 1);
}

#[test]
fn redraw_request_resets_on_take() {
    let mut redraw = RedrawRequest::default();
    assert!(!redraw.take());

    redraw.request();
    redraw.request();
    redraw.request();
    assert_eq!(redraw.coalesced(), 2);
    assert!(redraw.take());
    assert!(!redraw.is_pending());
    assert_eq!(redraw.coalesced(), 0);

    redraw.request();
    assert_eq!(redraw.coalesced(), 0);
}

#[test]
fn script_sends_keys_then_ticks_then_stop() {
    let events = SceneEvent::script("ra", 2);
    assert_eq!(
        events,
        vec![
            SceneEvent::KeyPress('r'),
            SceneEvent::KeyPress('a'),
            SceneEvent::Tick,
            SceneEvent::Tick,
            SceneEvent::Stop,
        ]
    );
    assert_eq!(SceneEvent::script("", 0), vec![SceneEvent::Stop]);

    let mut scene = scene();
    let (tx, rx) = mpsc::channel();
    for event in SceneEvent::script("w", 3) {
        tx.send(event).unwrap();
    }
    assert!(scene.run_pending(&rx, &mut DrawList::new()));
    assert!((scene.pose().position_z - 2.0).abs() < EPS);
    assert_eq!(scene.animation().ticks(), 3);
    assert!(!scene.animation().is_running());
}

#[test]
fn set_pose_rejects_head_outside_limits() {
    let mut scene = scene();
    let before = scene.pose().clone();

    for head in [90.0, 21.0, -41.0] {
        let pose = RobotPose {
            head_angle: head,
            ..RobotPose::default()
        };
        assert!(matches!(scene.set_pose(pose), Err(Error::Config(_))));
        assert_eq!(scene.pose(), &before);
    }

    let at_limit = RobotPose {
        head_angle: 20.0,
        ..RobotPose::default()
    };
    scene.set_pose(at_limit).unwrap();
    assert!(!scene.on_key_press('a'));
    assert!(scene.on_key_press('A'));
    assert!((scene.pose().head_angle - 18.0).abs() < EPS);
}

#[test]
fn set_pose_wraps_spin_angles() {
    let mut scene = scene();
    let pose = RobotPose {
        robot_angle: 370.0,
        wheel_turn: -5.0,
        cube_angle: -90.0,
        ..RobotPose::default()
    };
    scene.set_pose(pose).unwrap();
    assert!((scene.pose().robot_angle - 10.0).abs() < EPS);
    assert!((scene.pose().wheel_turn - 355.0).abs() < EPS);
    assert!((scene.pose().cube_angle - 270.0).abs() < EPS);
    assert!((scene.pose().shoulder_angle - 320.0).abs() < EPS);

    scene.on_key_press('w');
    scene.on_key_press('s');
    assert!((scene.pose().wheel_turn - 355.0).abs() < EPS);
}

#[test]
fn frame_draws_robot_then_decorations() {
    let mut scene = scene();
    let mut list = DrawList::new();
    scene.render_frame(&mut list);

    assert_eq!(list.len(), 11);
    let meshes: Vec<_> = list
        .commands
        .iter()
        .filter_map(|c| match c.primitive {
            Primitive::Mesh(mesh) => Some((mesh, c.part, c.transform)),
            _ => None,
        })
        .collect();
    assert_eq!(meshes.len(), 2);

    let view_inverse = scene.config().camera.view().inverse();
    let (mesh, part, transform) = meshes[0];
    assert_eq!(mesh, MeshKind::DecorativeCube);
    assert_eq!(part, None);
    let cube = (view_inverse * transform).transform_point3(Vec3::ZERO);
    assert!(cube.abs_diff_eq(Vec3::new(8.0, 0.0, 3.0), EPS));

    let (mesh, _, transform) = meshes[1];
    assert_eq!(mesh, MeshKind::Ground);
    let ground = (view_inverse * transform).transform_point3(Vec3::ZERO);
    assert!(ground.abs_diff_eq(Vec3::new(0.0, -20.0, 0.0), EPS));
}

#[test]
fn camera_view_is_stack_base() {
    let mut scene = scene();
    let mut list = DrawList::new();
    scene.render_frame(&mut list);

    let head = list.frame_of(PartId::Head).unwrap();
    let world = (scene.config().camera.view().inverse() * head).transform_point3(Vec3::ZERO);
    let p = scene.proportions();
    let expected = Vec3::new(-p.arm_width, 0.5 * p.arm_length - 0.5 * p.head_length, 0.0);
    assert!(world.abs_diff_eq(expected, EPS));
}

#[test]
fn decorative_cube_spins_in_place() {
    let mut scene = scene();
    for _ in 0..45 {
        scene.on_tick();
    }
    assert!((scene.pose().cube_angle - 90.0).abs() < EPS);

    let mut list = DrawList::new();
    scene.render_frame(&mut list);
    let cube = list
        .commands
        .iter()
        .find(|c| c.primitive == Primitive::Mesh(MeshKind::DecorativeCube))
        .unwrap();
    let world = scene.config().camera.view().inverse() * cube.transform;
    assert!(world.transform_point3(Vec3::ZERO).abs_diff_eq(Vec3::new(8.0, 0.0, 3.0), EPS));
    assert!(world.transform_vector3(Vec3::X).abs_diff_eq(-Vec3::Z, EPS));
}

#[test]
fn animation_ticks_until_stopped() {
    let mut scene = scene();
    let token = scene.stop_token();
    let mut list = DrawList::new();
    scene.render_frame(&mut list);

    assert!(scene.on_tick());
    assert!((scene.pose().shoulder_angle - 321.0).abs() < EPS);
    assert!((scene.pose().cube_angle - 2.0).abs() < EPS);
    assert!(scene.redraw().is_pending());
    scene.render_frame(&mut list);

    token.cancel();
    let before = scene.pose().clone();
    assert!(!scene.on_tick());
    assert_eq!(scene.pose(), &before);
    assert!(!scene.redraw().is_pending());
    assert_eq!(scene.animation().ticks(), 1);
}

#[test]
fn stop_event_halts_animation() {
    let mut scene = scene();
    let (tx, rx) = mpsc::channel();
    tx.send(SceneEvent::Tick).unwrap();
    tx.send(SceneEvent::Stop).unwrap();
    tx.send(SceneEvent::Tick).unwrap();
    scene.run_pending(&rx, &mut DrawList::new());

    assert!(!scene.animation().is_running());
    assert_eq!(scene.animation().ticks(), 1);
}

#[test]
fn driver_advances_whole_periods() {
    let mut driver = AnimationDriver::new(AnimationConfig::default());
    let mut pose = RobotPose::default();
    assert_eq!(driver.period(), Duration::from_millis(10));

    assert_eq!(driver.advance(Duration::from_millis(25), &mut pose), 2);
    assert_eq!(driver.advance(Duration::from_millis(4), &mut pose), 0);
    assert_eq!(driver.advance(Duration::from_millis(1), &mut pose), 1);
    assert!((pose.cube_angle - 6.0).abs() < EPS);

    driver.stop();
    assert_eq!(driver.advance(Duration::from_secs(1), &mut pose), 0);
    assert!((pose.cube_angle - 6.0).abs() < EPS);
}

#[test]
fn disabled_animation_never_ticks() {
    let config = SceneConfig::default().with_animation(AnimationConfig {
        enabled: false,
        ..AnimationConfig::default()
    });
    let mut scene = RobotScene::new(config).unwrap();
    assert!(!scene.on_tick());
    assert_eq!(scene.pose().cube_angle, 0.0);
}

#[test]
fn invalid_config_is_rejected() {
    let zero_period = SceneConfig::default().with_animation(AnimationConfig {
        period_ms: 0,
        ..AnimationConfig::default()
    });
    assert!(matches!(RobotScene::new(zero_period), Err(Error::Config(_))));

    let flat = SceneConfig::default().with_body(BodyDimensions::new(8.0, 24.0, 0.0));
    assert!(matches!(
        RobotScene::new(flat),
        Err(Error::InvalidDimension { name: "depth", .. })
    ));
}

fn isolated(node: &robot_rig::PartNode) -> DrawList {
    let empty = Rig {
        robot: Vec::new(),
        fixed: Vec::new(),
    };
    let palette = MaterialPalette::default();
    let mut list = DrawList::new();
    PoseEvaluator::new(&empty, &palette).draw_part(
        node,
        &RobotPose::default(),
        &mut TransformStack::default(),
        &mut list,
    );
    list
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-3 * a.abs().max(b.abs())
}

#[test]
fn body_block_mass() {
    let p = RobotProportions::default();
    let list = isolated(&parts::body(&p));
    let props = list.mass_properties(2.0);
    assert!(close(props.mass, 2.0 * 8.0 * 24.0 * 8.0), "mass {}", props.mass);
    assert!(props.center_of_mass.abs_diff_eq(Vec3::ZERO, EPS));
}

#[test]
fn wheel_mass_centres_on_axle() {
    let p = RobotProportions::default();
    let mut wheel = parts::wheel(&p);
    // Keep only the cylinder: caps are massless, the tire would shift the centre.
    wheel.children.clear();
    let list = isolated(&wheel);
    let props = list.mass_properties(1.0);

    let expected_mass = PI * p.wheel_radius.powi(2) * p.wheel_length;
    assert!(close(props.mass, expected_mass), "mass {}", props.mass);
    let centre = Vec3::new(0.5 * p.body_width - 0.5 * p.wheel_length, -0.5 * p.body_length, 0.0);
    assert!(props.center_of_mass.abs_diff_eq(centre, EPS));
}

#[test]
fn sensor_torus_mass_matches_volume() {
    let p = RobotProportions::default();
    let list = isolated(&parts::sensor(&p));
    let props = list.mass_properties(1.0);
    let volume = 2.0 * PI * PI * p.sensor_outer_radius * p.sensor_inner_radius.powi(2);
    assert!(close(props.mass, volume), "mass {} vs {}", props.mass, volume);
}

#[test]
fn cylinder_radius_uses_mean_xy_scale() {
    let mut list = DrawList::new();
    let cylinder = Primitive::Cylinder {
        base_radius: 1.0,
        top_radius: 1.0,
        height: 2.0,
        slices: 16,
        stacks: 1,
    };
    list.draw_primitive(&cylinder, Mat4::from_scale(Vec3::new(2.0, 4.0, 1.0)));
    let props = list.mass_properties(1.0);
    let expected = PI * 3.0f32.powi(2) * 2.0;
    assert!(close(props.mass, expected), "mass {} vs {}", props.mass, expected);
    assert!(props.center_of_mass.abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), EPS));
}

#[test]
fn scene_mass_follows_robot() {
    let mut scene = scene();
    let at_rest = scene.mass_properties();
    assert!(at_rest.mass > 0.0);

    // Translate only; driving would also turn the tire marker.
    let mut pose = scene.pose().clone();
    pose.position_z += 2.0;
    scene.set_pose(pose).unwrap();
    let moved = scene.mass_properties();
    assert!(close(moved.mass, at_rest.mass));
    let shift = moved.center_of_mass - at_rest.center_of_mass;
    assert!(shift.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-3), "shift {shift}");
}

#[test]
fn camera_sees_robot_origin() {
    let config = SceneConfig::default();
    assert!((config.aspect_ratio() - 1.3).abs() < EPS);

    let clip_from_world = config.camera.projection(config.aspect_ratio()) * config.camera.view();
    let ndc = clip_from_world.project_point3(Vec3::ZERO);
    assert!(ndc.x.abs() < EPS && ndc.y.abs() < EPS);
    assert!((-1.0..=1.0).contains(&ndc.z));
}

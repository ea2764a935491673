//! Headless replay of a key script.
//!
//! Usage: `robot-replay [KEYS] [TICKS]`
//!
//! Sends every character of `KEYS` as a key press and `TICKS` animation ticks
//! through the scene's event queue, renders one frame into a recording
//! backend and prints where each part ended up.

use robot_rig::{DrawList, RobotScene, SceneConfig, SceneEvent, init_logging};
use std::process::ExitCode;
use std::sync::mpsc;
use tracing::{error, info};

fn main() -> ExitCode {
    init_logging();

    let mut args = std::env::args().skip(1);
    let keys = args.next().unwrap_or_else(|| "w".to_string());
    let ticks = match args.next().map(|t| t.parse::<u32>()) {
        None => 0,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            error!("invalid tick count: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut scene = match RobotScene::new(SceneConfig::default()) {
        Ok(scene) => scene,
        Err(e) => {
            error!("failed to build scene: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (tx, rx) = mpsc::channel();
    for event in SceneEvent::script(&keys, ticks) {
        if let Err(e) = tx.send(event) {
            error!("event queue closed: {e}");
            return ExitCode::FAILURE;
        }
    }

    let mut list = DrawList::new();
    scene.run_pending(&rx, &mut list);

    let pose = scene.pose();
    info!(frames = scene.frames(), "replay finished");
    println!(
        "pose: yaw {:.1} head {:.1} wheel {:.1} position ({:.3}, {:.3})",
        pose.robot_angle, pose.head_angle, pose.wheel_turn, pose.position_x, pose.position_z
    );

    // Eye-space frames are hard to read; report world-space origins.
    let view_inverse = scene.config().camera.view().inverse();
    for frame in &list.frames {
        let origin = (view_inverse * frame.frame).transform_point3(glam::Vec3::ZERO);
        println!(
            "{:<12} ({:>8.3}, {:>8.3}, {:>8.3})",
            frame.part.name(),
            origin.x,
            origin.y,
            origin.z
        );
    }

    let mass = scene.mass_properties();
    println!(
        "mass {:.1}, centre of mass ({:.3}, {:.3}, {:.3})",
        mass.mass, mass.center_of_mass.x, mass.center_of_mass.y, mass.center_of_mass.z
    );

    ExitCode::SUCCESS
}

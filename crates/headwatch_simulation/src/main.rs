//! Headless симуляция head watch
//!
//! Guard следит за прохожим, который идёт мимо него слева направо.
//! Каждые 30 тиков логируем controller angles головы guard'а.

use std::time::Duration;

use bevy::prelude::*;
use headwatch_simulation::head_watch::{HEAD_BONE, TORSO_BONE};
use headwatch_simulation::{
    create_headless_app, Actor, HeadWatchCommand, HeadWatchConfig, HeadWatcher, SimulationPlugin,
    Skeleton, TargetName,
};

fn humanoid_skeleton() -> Skeleton {
    Skeleton::new()
        .with_bone(TORSO_BONE, Vec3::new(0.0, 1.2, 0.0))
        .with_bone(HEAD_BONE, Vec3::new(0.0, 1.7, 0.0))
        .with_legs_anim(0)
}

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    headwatch_simulation::log_info(&format!(
        "Starting head watch headless simulation (seed: {})",
        seed
    ));

    let guard = app
        .world_mut()
        .spawn((
            Actor,
            Transform::default(),
            humanoid_skeleton(),
            HeadWatchConfig {
                twitch_enabled: true,
                ..default()
            },
        ))
        .id();

    let passerby = app
        .world_mut()
        .spawn((
            Actor,
            Transform::from_xyz(-6.0, 0.0, -4.0),
            humanoid_skeleton(),
            TargetName::new("passerby"),
        ))
        .id();

    app.world_mut().send_event(HeadWatchCommand::SetTargetByName {
        watcher: guard,
        name: "passerby".to_string(),
    });

    let step = Duration::from_secs_f64(1.0 / 60.0);

    for tick in 0..600 {
        // Прохожий идёт вдоль -Z линии со скоростью 2 м/с
        if let Some(mut transform) = app.world_mut().get_mut::<Transform>(passerby) {
            transform.translation.x += 2.0 * step.as_secs_f32();
        }

        app.world_mut().resource_mut::<Time<Fixed>>().advance_by(step);
        app.world_mut().run_schedule(FixedUpdate);

        if tick % 30 == 0 {
            if let Some(watcher) = app.world().get::<HeadWatcher>(guard) {
                let angles = watcher.current_head_angles();
                headwatch_simulation::log_info(&format!(
                    "Tick {}: head yaw {:.1}, pitch {:.1}, target {:?}",
                    tick,
                    angles.yaw,
                    angles.pitch,
                    watcher.watch_target()
                ));
            }
        }
    }

    headwatch_simulation::log_info("Simulation complete!");
}

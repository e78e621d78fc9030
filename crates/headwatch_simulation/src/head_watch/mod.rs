//! Head watch: поворот головы актора к watch target
//!
//! ECS ответственность:
//! - HeadWatcher: выбор цели, gate, solver, rate-limited интерполяция, twitch idle
//! - Skeleton: controller angles head кости (результат)
//! - Events: HeadWatchCommand (вход), WatchTargetLost (выход)
//!
//! Рендер ответственность:
//! - применить controller angles к реальной кости поверх анимации
//!
//! Ядро (HeadWatcher::update) не знает про ECS: skeleton и мир приходят через
//! HeadRig/WatchWorld, поэтому его можно тестировать без App.

use bevy::prelude::*;

pub mod angles;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod events;
pub mod gate;
pub mod interpolator;
pub mod snapshot;
pub mod solver;
pub mod systems;
pub mod twitch;
pub mod watcher;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod test_support;
#[cfg(test)]
mod interpolator_tests;

// Re-export основных типов
pub use angles::{angle_normalize_180, direction_to_angles, HeadAngles};
pub use collaborators::{HeadRig, TargetLiveness, TargetView, WatchWorld};
pub use config::{HeadWatchConfig, HeadWatchSettings, HEAD_BONE, TORSO_BONE};
pub use error::HeadWatchError;
pub use events::{HeadWatchCommand, WatchTargetLost};
pub use gate::RelaxReason;
pub use interpolator::TorsoFrame;
pub use snapshot::HeadWatcherSnapshot;
pub use twitch::TwitchPhase;
pub use watcher::{HeadWatcher, TargetLookup, WatchOutcome};

/// Head Watch Plugin
///
/// Регистрирует head watch системы в FixedUpdate (60Hz).
///
/// Порядок выполнения:
/// 1. attach_head_watchers: HeadWatcher для новых акторов с HeadWatchConfig
/// 2. apply_head_watch_commands: HeadWatchCommand → HeadWatcher
/// 3. head_watch_update: per-frame поворот головы
pub struct HeadWatchPlugin;

impl Plugin for HeadWatchPlugin {
    fn build(&self, app: &mut App) {
        // RNG для twitch (не перетираем seed, если App уже создан с ним)
        if !app.world().contains_resource::<crate::DeterministicRng>() {
            app.insert_resource(crate::DeterministicRng::new(42));
        }

        app.init_resource::<HeadWatchSettings>()
            .init_resource::<Time<Fixed>>()
            .add_event::<HeadWatchCommand>()
            .add_event::<WatchTargetLost>();

        app.add_systems(
            FixedUpdate,
            (
                systems::attach_head_watchers,
                systems::apply_head_watch_commands,
                systems::head_watch_update,
            )
                .chain(), // Последовательное выполнение для детерминизма
        );
    }
}

//! Head watch systems: attach, команды, per-frame update

use std::collections::HashMap;

use bevy::prelude::*;

use super::adapters::{target_view, EcsWatchWorld, OwnerRig, TargetRegistry};
use crate::components::{
    Actor, ActorFlags, BoundingBox, EffectiveHeadPitch, Health, Skeleton, TargetName, WatchOffset,
};
use crate::head_watch::config::{HeadWatchConfig, HeadWatchSettings};
use crate::head_watch::events::{HeadWatchCommand, WatchTargetLost};
use crate::head_watch::watcher::{HeadWatcher, TargetLookup, WatchOutcome};
use crate::DeterministicRng;

/// Система: создать HeadWatcher для только что заспавненных акторов с HeadWatchConfig
///
/// Стартовые углы головы читаются из Skeleton. Ошибка конфигурации логируется,
/// актор остаётся без HeadWatcher.
pub fn attach_head_watchers(
    mut commands: Commands,
    settings: Res<HeadWatchSettings>,
    mut actors: Query<
        (Entity, &HeadWatchConfig, &Transform, &mut Skeleton, Option<&ActorFlags>),
        (Added<HeadWatchConfig>, Without<HeadWatcher>),
    >,
) {
    for (entity, config, transform, mut skeleton, flags) in actors.iter_mut() {
        let rig = OwnerRig::new(transform, &mut skeleton, flags);

        match HeadWatcher::new(entity, config, &rig, &settings.head_bone) {
            Ok(watcher) => {
                commands
                    .entity(entity)
                    .insert((watcher, EffectiveHeadPitch::default()));
                crate::log(&format!("HeadWatch: attached HeadWatcher to {:?}", entity));
            }
            Err(err) => {
                crate::log_error(&format!("HeadWatch: {:?} not attached: {}", entity, err));
            }
        }
    }
}

/// Система: применить HeadWatchCommand события
pub fn apply_head_watch_commands(
    mut commands: EventReader<HeadWatchCommand>,
    mut watchers: Query<&mut HeadWatcher>,
    names: Query<(Entity, &TargetName)>,
) {
    // Registry строим лениво: нужен только для SetTargetByName
    let mut world: Option<EcsWatchWorld> = None;

    for command in commands.read() {
        let Ok(mut watcher) = watchers.get_mut(command.watcher()) else {
            crate::log_warning(&format!(
                "HeadWatch: command for {:?} without HeadWatcher: {:?}",
                command.watcher(),
                command
            ));
            continue;
        };

        match command {
            HeadWatchCommand::SetTarget { target, .. } => watcher.set_watch_target(*target),
            HeadWatchCommand::SetTargetByName { name, .. } => {
                let world = world.get_or_insert_with(|| EcsWatchWorld {
                    registry: TargetRegistry::from_entries(
                        names.iter().map(|(entity, name)| (entity, name.0.clone())),
                    ),
                    ..default()
                });

                if let TargetLookup::Unique(target) | TargetLookup::Ambiguous { chosen: target, .. } =
                    watcher.set_watch_target_by_name(name, &*world)
                {
                    crate::log(&format!(
                        "HeadWatch: {:?} watching '{}' ({:?})",
                        command.watcher(),
                        name,
                        target
                    ));
                }
            }
            HeadWatchCommand::ClearTarget { .. } => watcher.clear_watch_target(),
            HeadWatchCommand::SetWatchSpeed { speed, .. } => watcher.set_watch_speed(*speed),
            HeadWatchCommand::SetHeadTwitch { enabled, .. } => watcher.set_head_twitch(*enabled),
            HeadWatchCommand::SetIgnoreTarget { ignore, .. } => {
                watcher.set_ignore_watch_target(*ignore)
            }
            HeadWatchCommand::SetMaxDistance { max_distance, .. } => {
                watcher.set_max_distance(*max_distance)
            }
        }
    }
}

/// Система: per-frame head watch update
///
/// 1. Собираем цели всех HeadWatcher'ов
/// 2. Снимаем TargetView с их компонентов (read-only, до мутаций)
/// 3. Прогоняем HeadWatcher::update для каждого актора
pub fn head_watch_update(
    mut set: ParamSet<(
        Query<&HeadWatcher>,
        Query<(
            &Transform,
            Option<&Skeleton>,
            Option<&WatchOffset>,
            Option<&BoundingBox>,
            Option<&Actor>,
            Option<&ActorFlags>,
            Option<&Health>,
        )>,
        Query<(
            Entity,
            &mut HeadWatcher,
            &Transform,
            &mut Skeleton,
            Option<&ActorFlags>,
            &mut EffectiveHeadPitch,
        )>,
    )>,
    settings: Res<HeadWatchSettings>,
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut lost_events: EventWriter<WatchTargetLost>,
) {
    let watched: Vec<Entity> = set
        .p0()
        .iter()
        .filter_map(HeadWatcher::watch_target)
        .collect();

    let mut targets = HashMap::new();
    {
        let target_query = set.p1();
        for entity in watched {
            if targets.contains_key(&entity) {
                continue;
            }
            if let Ok(data) = target_query.get(entity) {
                targets.insert(entity, target_view(data, &settings.head_bone));
            }
        }
    }

    let world = EcsWatchWorld {
        targets,
        registry: TargetRegistry::default(),
        now: time.elapsed_secs(),
    };

    let mut owners = set.p2();
    for (entity, mut watcher, transform, mut skeleton, flags, mut pitch) in owners.iter_mut() {
        let mut rig = OwnerRig::new(transform, &mut skeleton, flags);
        let outcome = watcher.update(&mut rig, &world, &settings, &mut rng.rng);

        if let Some(effective_pitch) = rig.effective_head_pitch {
            pitch.0 = effective_pitch;
        }

        if let WatchOutcome::TargetDropped(target) = outcome {
            lost_events.write(WatchTargetLost {
                watcher: entity,
                target,
            });
        }
    }
}


//! Head watch события
//!
//! - HeadWatchCommand: скрипты/AI/диалоги → HeadWatcher (внешний API в ECS)
//! - WatchTargetLost: HeadWatcher сбросил мёртвую цель (для AI/анимации)

use bevy::prelude::*;

/// Команда для HeadWatcher конкретного актора
#[derive(Event, Debug, Clone, PartialEq)]
pub enum HeadWatchCommand {
    /// Смотреть на entity
    SetTarget { watcher: Entity, target: Entity },
    /// Смотреть на entity из named-target registry
    SetTargetByName { watcher: Entity, name: String },
    ClearTarget { watcher: Entity },
    /// Градусов за update
    SetWatchSpeed { watcher: Entity, speed: f32 },
    SetHeadTwitch { watcher: Entity, enabled: bool },
    /// Не смотреть на цель, но и не забывать её
    SetIgnoreTarget { watcher: Entity, ignore: bool },
    /// < 0 = без лимита
    SetMaxDistance { watcher: Entity, max_distance: f32 },
}

impl HeadWatchCommand {
    pub fn watcher(&self) -> Entity {
        match self {
            Self::SetTarget { watcher, .. }
            | Self::SetTargetByName { watcher, .. }
            | Self::ClearTarget { watcher }
            | Self::SetWatchSpeed { watcher, .. }
            | Self::SetHeadTwitch { watcher, .. }
            | Self::SetIgnoreTarget { watcher, .. }
            | Self::SetMaxDistance { watcher, .. } => *watcher,
        }
    }
}

/// HeadWatcher перестал смотреть на цель, потому что она мертва/неактивна
#[derive(Event, Debug, Clone, PartialEq)]
pub struct WatchTargetLost {
    pub watcher: Entity,
    pub target: Entity,
}

//! Persist-набор полей HeadWatcher (save/load)
//!
//! Формат хранения: забота вызывающего (serde). Owner не сохраняется:
//! при restore HeadWatcher заново привязывается к актору, который его загружает.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::angles::HeadAngles;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadWatcherSnapshot {
    /// Safe pointer: при загрузке может не резолвиться: тогда gate считает что цели нет
    pub watch_target: Option<Entity>,
    pub current_head_angles: HeadAngles,
    pub max_head_turn_speed: f32,
    pub turn_threshold: f32,
    pub explicitly_set: bool,
    pub max_head_yaw: f32,
    pub max_head_pitch: f32,
    pub twitch_enabled: bool,
    pub next_twitch_time: f32,
    pub head_twitch_angles: HeadAngles,
    pub max_distance: f32,
    pub ignore_watch_target: bool,
}

//! Конфигурация head watch: per-actor HeadWatchConfig и глобальные HeadWatchSettings

use bevy::prelude::*;

use crate::components::Skeleton;

/// Имя head кости (Biped rig)
pub const HEAD_BONE: &str = "Bip01 Head";
/// Имя torso кости (reference frame для torso-relative yaw)
pub const TORSO_BONE: &str = "Bip01 Spine1";

/// Параметры head watch для конкретного актора
///
/// Спавн актора с HeadWatchConfig → attach_head_watchers создаёт HeadWatcher
/// с этими лимитами. Skeleton и Transform подставляются пустыми если их нет
/// в bundle: attach срабатывает один раз, на добавлении конфига.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Skeleton, Transform)]
pub struct HeadWatchConfig {
    /// Градусов за update, на каждую ось
    pub max_head_turn_speed: f32,
    /// Dead-zone по yaw и pitch (0 = выключена)
    pub turn_threshold: f32,
    pub max_head_yaw: f32,
    pub max_head_pitch: f32,
    /// < 0 = без ограничения дистанции
    pub max_distance: f32,
    pub twitch_enabled: bool,
}

impl Default for HeadWatchConfig {
    fn default() -> Self {
        Self {
            max_head_turn_speed: 30.0,
            turn_threshold: 0.0,
            max_head_yaw: 60.0,
            max_head_pitch: 45.0,
            max_distance: -1.0,
            twitch_enabled: false,
        }
    }
}

/// Глобальные настройки: имена костей и twitch idle
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct HeadWatchSettings {
    pub head_bone: String,
    pub torso_bone: String,
    /// Скорость поворота во время twitch (градусов за update)
    pub twitch_turn_speed: f32,
    /// Максимальный twitch offset по yaw/pitch (градусы)
    pub twitch_amplitude: f32,
    /// Базовый интервал между twitch picks (секунды)
    pub twitch_interval: f32,
    /// Случайный разброс интервала (± секунды)
    pub twitch_jitter: f32,
}

impl Default for HeadWatchSettings {
    fn default() -> Self {
        Self {
            head_bone: HEAD_BONE.to_string(),
            torso_bone: TORSO_BONE.to_string(),
            twitch_turn_speed: 0.25,
            twitch_amplitude: 4.0,
            twitch_interval: 1.0,
            twitch_jitter: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = HeadWatchConfig::default();
        assert_eq!(config.max_head_turn_speed, 30.0);
        assert_eq!(config.turn_threshold, 0.0);
        assert_eq!(config.max_head_yaw, 60.0);
        assert_eq!(config.max_head_pitch, 45.0);
        assert_eq!(config.max_distance, -1.0);
        assert!(!config.twitch_enabled);
    }

    #[test]
    fn test_twitch_speed_below_default_turn_speed() {
        let settings = HeadWatchSettings::default();
        let config = HeadWatchConfig::default();
        assert!(settings.twitch_turn_speed < config.max_head_turn_speed);
        assert_eq!(settings.head_bone, "Bip01 Head");
        assert_eq!(settings.torso_bone, "Bip01 Spine1");
    }
}

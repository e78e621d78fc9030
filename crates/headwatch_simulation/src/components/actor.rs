//! Базовые компоненты акторов: Actor, Health, ActorFlags

use bevy::prelude::*;

/// Актор (NPC, игрок): базовый компонент для живых существ
///
/// Автоматически добавляет Health и ActorFlags через Required Components.
/// Для head watch наличие Actor = цель "похожа на актора" (есть think state).
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health, ActorFlags)]
pub struct Actor;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }
}

/// Флаги состояния актора
///
/// - thinking: актор активен (false = заморожен скриптом / выключен)
/// - dialog_playing + using_hud одновременно → head watch подавлен
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ActorFlags {
    pub thinking: bool,
    pub dialog_playing: bool,
    pub using_hud: bool,
}

impl Default for ActorFlags {
    fn default() -> Self {
        Self {
            thinking: true,
            dialog_playing: false,
            using_hud: false,
        }
    }
}

/// Pitch головы после последнего head watch шага (градусы)
///
/// Читается aim assist / камерой, пишется только HeadWatcher.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EffectiveHeadPitch(pub f32);

/// Think state актора: включён И жив
pub fn is_think_on(flags: &ActorFlags, health: Option<&Health>) -> bool {
    flags.thinking && health.map(Health::is_alive).unwrap_or(true)
}

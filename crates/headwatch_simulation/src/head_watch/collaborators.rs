//! Внешние коллабораторы HeadWatcher
//!
//! HeadWatcher не ходит в ECS напрямую: всё что ему нужно от анимации
//! и от мира приходит через два trait'а. ECS реализации в systems/adapters.rs,
//! тестовые в test_support.rs.
//!
//! - HeadRig: skeleton + состояние актора-владельца (мутабельный)
//! - WatchWorld: цели, registry по имени, время (только чтение)

use bevy::prelude::*;

use super::angles::HeadAngles;
use crate::components::BoneTag;

/// Анимационный runtime актора-владельца
pub trait HeadRig {
    /// Bone tag по имени (None = кости нет в текущем skeleton)
    fn bone_tag(&self, name: &str) -> Option<BoneTag>;

    fn controller_angles(&self, tag: BoneTag) -> HeadAngles;

    fn set_controller_angles(&mut self, tag: BoneTag, angles: HeadAngles);

    /// World-space позиция кости по имени
    fn bone_world_position(&self, name: &str) -> Option<Vec3>;

    /// Есть ли привязанная locomotion (legs) анимация
    fn has_locomotion_anim(&self) -> bool;

    fn origin(&self) -> Vec3;

    /// Абсолютная ориентация тела актора
    fn body_angles(&self) -> HeadAngles;

    fn is_dialog_playing(&self) -> bool;

    fn is_using_hud(&self) -> bool;

    /// Effective head pitch для потребителей вне head watch (aim assist, камера)
    fn set_effective_head_pitch(&mut self, pitch: f32);
}

/// Мир глазами HeadWatcher
pub trait WatchWorld {
    /// Снимок цели на этот тик (None = entity больше не существует)
    fn target(&self, entity: Entity) -> Option<TargetView>;

    /// Named-target registry (порядок registry стабилен)
    fn find_targets(&self, name: &str) -> Vec<Entity>;

    /// Текущее время симуляции (секунды)
    fn now(&self) -> f32;
}

/// Capability: цель "похожа на актора" (имеет think state)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLiveness {
    /// Актор жив и думает
    Thinking,
    /// Актор мёртв или неактивен
    Inactive,
}

/// Point-in-time снимок цели
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub origin: Vec3,
    pub rotation: Quat,
    /// Локальный watch offset (Vec3::ZERO = не задан)
    pub watch_offset: Vec3,
    /// World-space позиция head-эквивалентной кости (если есть)
    pub head_position: Option<Vec3>,
    /// Геометрический центр (fallback aim point)
    pub centroid: Vec3,
    /// None = цель не актор (нет think state)
    pub liveness: Option<TargetLiveness>,
}

impl TargetView {
    /// Простая цель без костей и без think state (точка в мире)
    pub fn point(origin: Vec3) -> Self {
        Self {
            origin,
            rotation: Quat::IDENTITY,
            watch_offset: Vec3::ZERO,
            head_position: None,
            centroid: origin,
            liveness: None,
        }
    }

    pub fn is_actor(&self) -> bool {
        self.liveness.is_some()
    }
}

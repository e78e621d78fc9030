//! World компоненты для целей: TargetName, WatchOffset, BoundingBox

use bevy::prelude::*;

/// Имя в named-target registry (скрипты ищут цели по имени)
///
/// Несколько entity могут иметь одно имя: тогда lookup неоднозначен.
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct TargetName(pub String);

impl TargetName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Точка на акторе, куда смотрят другие (локальное пространство entity)
///
/// Vec3::ZERO = не задана, используется head кость или centroid.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WatchOffset(pub Vec3);

/// Локальный AABB entity (mins/maxs относительно origin)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BoundingBox {
    pub mins: Vec3,
    pub maxs: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        // Человекоподобный актор ~1.8м
        Self {
            mins: Vec3::new(-0.4, 0.0, -0.4),
            maxs: Vec3::new(0.4, 1.8, 0.4),
        }
    }
}

impl BoundingBox {
    /// World-space центр (без учёта вращения: AABB)
    pub fn centroid(&self, origin: Vec3) -> Vec3 {
        origin + (self.mins + self.maxs) * 0.5
    }
}

//! Угловая математика для head watch: HeadAngles, нормализация, direction → angles
//!
//! Конвенция (Bevy, Y-up, forward = -Z):
//! - yaw: вращение вокруг +Y, 0° смотрит в -Z, положительный yaw поворачивает к -X
//! - pitch: вращение вокруг локальной +X, положительный pitch смотрит вверх
//! - roll: вращение вокруг forward оси (для головы всегда 0)
//!
//! Все углы в градусах.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Тройка углов (yaw, pitch, roll) в градусах
///
/// Используется для bone-local controller angles и для дельт между ориентациями.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect, Serialize, Deserialize)]
pub struct HeadAngles {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl HeadAngles {
    pub const ZERO: Self = Self {
        yaw: 0.0,
        pitch: 0.0,
        roll: 0.0,
    };

    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Поосевая разница `self - other` без нормализации
    pub fn sub(self, other: Self) -> Self {
        Self {
            yaw: self.yaw - other.yaw,
            pitch: self.pitch - other.pitch,
            roll: self.roll - other.roll,
        }
    }

    /// Каждая ось в (-180°, 180°] (кратчайший путь)
    pub fn normalized_180(self) -> Self {
        Self {
            yaw: angle_normalize_180(self.yaw),
            pitch: angle_normalize_180(self.pitch),
            roll: angle_normalize_180(self.roll),
        }
    }

    /// Абсолютные углы ориентации из quaternion (Transform.rotation)
    pub fn from_rotation(rotation: Quat) -> Self {
        let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
        Self {
            yaw: yaw.to_degrees(),
            pitch: pitch.to_degrees(),
            roll: roll.to_degrees(),
        }
    }
}

/// Нормализует угол в (-180°, 180°]
pub fn angle_normalize_180(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Направление → абсолютные (yaw, pitch, 0)
///
/// Нулевой вектор даёт (0, 0, 0).
pub fn direction_to_angles(direction: Vec3) -> HeadAngles {
    if direction.length_squared() <= f32::EPSILON {
        return HeadAngles::ZERO;
    }

    let horizontal = Vec2::new(direction.x, direction.z).length();
    let yaw = (-direction.x).atan2(-direction.z).to_degrees();
    let pitch = direction.y.atan2(horizontal).to_degrees();

    HeadAngles::new(yaw, pitch, 0.0)
}

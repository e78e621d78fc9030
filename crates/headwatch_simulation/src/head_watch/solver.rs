//! Angle solver: aim point на цели → желаемая bone-local дельта головы

use bevy::prelude::*;

use super::angles::{direction_to_angles, HeadAngles};
use super::collaborators::TargetView;

/// Лимиты для solver'а (снимок полей HeadWatcher)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverLimits {
    pub turn_threshold: f32,
    pub max_head_yaw: f32,
    pub max_head_pitch: f32,
}

/// Результат solver'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolvedDelta {
    /// Дельта внутри dead-zone: ничего не делаем
    InDeadZone,
    /// Clamped дельта для интерполятора
    Turn(HeadAngles),
}

/// Куда смотреть на цели
///
/// Приоритет: watch offset актора → head кость → centroid.
pub fn aim_point(target: &TargetView) -> Vec3 {
    if target.is_actor() && target.watch_offset != Vec3::ZERO {
        return target.origin + target.rotation * target.watch_offset;
    }

    target.head_position.unwrap_or(target.centroid)
}

/// Желаемая дельта головы
///
/// direction → absolute angles → минус body angles → (-180, 180] →
/// dead-zone → clamp по анатомическим лимитам (roll = 0).
pub fn solve_head_delta(
    head_position: Vec3,
    aim: Vec3,
    body_angles: HeadAngles,
    limits: SolverLimits,
) -> SolvedDelta {
    let absolute = direction_to_angles(aim - head_position);
    let delta = absolute.sub(body_angles).normalized_180();

    let threshold = limits.turn_threshold;
    if threshold > 0.0
        && delta.yaw < threshold
        && delta.yaw > -threshold
        && delta.pitch < threshold
        && delta.pitch > -threshold
    {
        return SolvedDelta::InDeadZone;
    }

    SolvedDelta::Turn(HeadAngles {
        yaw: clamp_symmetric(delta.yaw, limits.max_head_yaw),
        pitch: clamp_symmetric(delta.pitch, limits.max_head_pitch),
        roll: 0.0,
    })
}

/// Clamp в [-limit, limit] через сравнения (не паникует на NaN/отрицательном limit)
pub fn clamp_symmetric(value: f32, limit: f32) -> f32 {
    if value < -limit {
        -limit
    } else if value > limit {
        limit
    } else {
        value
    }
}

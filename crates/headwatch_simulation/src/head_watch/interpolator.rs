//! Rate-limited interpolator: шаг head angles к цели не быстрее speed за update
//!
//! Каждая ось ограничивается независимо. Roll головы всегда коммитится как 0.

use super::angles::HeadAngles;
use super::collaborators::HeadRig;
use crate::components::BoneTag;

/// В каком кадре коммитится yaw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorsoFrame {
    /// yaw коммитится относительно текущего torso yaw (watching)
    Relative,
    /// yaw коммитится как есть (relax, twitch)
    Absolute,
}

/// Параметры одного шага интерполяции
#[derive(Debug, Clone, Copy)]
pub struct HeadStep<'a> {
    pub head: BoneTag,
    pub torso_bone: &'a str,
    /// Градусов за update на ось
    pub speed: f32,
    pub frame: TorsoFrame,
}

/// Одна ось: не дальше чем на speed от current
pub fn step_axis(current: f32, target: f32, speed: f32) -> f32 {
    let change = target - current;
    if change > speed {
        current + speed
    } else if change < -speed {
        current - speed
    } else {
        target
    }
}

/// Шаг всей тройки (roll = 0)
pub fn step_angles(current: HeadAngles, target: HeadAngles, speed: f32) -> HeadAngles {
    HeadAngles {
        yaw: step_axis(current.yaw, target.yaw, speed),
        pitch: step_axis(current.pitch, target.pitch, speed),
        roll: 0.0,
    }
}

/// Шаг + коммит в анимационный runtime
///
/// - current обновляется до stepped (до torso поправки): следующий шаг
///   считается в том же кадре
/// - effective head pitch = stepped pitch
/// - возвращает то, что реально записано в head кость
pub fn commit_head_step<R: HeadRig + ?Sized>(
    rig: &mut R,
    current: &mut HeadAngles,
    target: HeadAngles,
    step: HeadStep<'_>,
) -> HeadAngles {
    let stepped = step_angles(*current, target, step.speed);

    let mut committed = stepped;
    if step.frame == TorsoFrame::Relative {
        // Torso yaw читаем в момент вызова (snapshot, без кеша между кадрами)
        let torso_yaw = rig
            .bone_tag(step.torso_bone)
            .map(|tag| rig.controller_angles(tag).yaw)
            .unwrap_or(0.0);
        committed.yaw = stepped.yaw - torso_yaw;
    }

    rig.set_controller_angles(step.head, committed);
    rig.set_effective_head_pitch(stepped.pitch);
    *current = stepped;

    committed
}

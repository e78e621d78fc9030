//! Eligibility gate: решение на этот тик: смотреть, расслабиться, twitch или ничего
//!
//! Порядок правил (первое совпавшее побеждает):
//! 1. Нет head кости / нет legs анимации → Abort (без изменений)
//! 2. Нет цели (или ignore) → Idle (twitch или relax)
//! 3. Dialog + HUD одновременно → Relax
//! 4. Цель дальше max_distance → Relax
//! 5. Цель-актор не думает (мёртв) → DropTarget
//! 6. Иначе → Watch

use bevy::prelude::*;

use super::collaborators::{HeadRig, TargetLiveness, TargetView, WatchWorld};
use crate::components::BoneTag;

/// Почему голова возвращается в нейтраль
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxReason {
    /// Dialog и HUD активны одновременно
    DialogWithHud,
    /// Цель за пределами max_distance
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WatchDecision {
    /// Skeleton/анимация не готовы: тик пропускается целиком
    Abort,
    /// Цели нет (или ignore). stale_target = сохранённая цель исчезла из мира
    Idle { head: BoneTag, stale_target: bool },
    Relax { head: BoneTag, reason: RelaxReason },
    /// Цель-актор мёртв/неактивен: сбросить и ничего не коммитить
    DropTarget { target: Entity },
    Watch { head: BoneTag, target: TargetView },
}

/// Входы gate со стороны HeadWatcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateInput {
    pub watch_target: Option<Entity>,
    pub ignore_watch_target: bool,
    pub max_distance: f32,
}

pub fn evaluate<R, W>(rig: &R, world: &W, head_bone: &str, input: GateInput) -> WatchDecision
where
    R: HeadRig + ?Sized,
    W: WatchWorld + ?Sized,
{
    // 1. Skeleton не загружен или нет анимации: ждём
    let Some(head) = rig.bone_tag(head_bone) else {
        return WatchDecision::Abort;
    };
    if !rig.has_locomotion_anim() {
        return WatchDecision::Abort;
    }

    // 2. Нет цели. Handle проверяется каждый тик: despawned цель = нет цели
    let Some(target_entity) = input.watch_target else {
        return WatchDecision::Idle {
            head,
            stale_target: false,
        };
    };
    let Some(target) = world.target(target_entity) else {
        return WatchDecision::Idle {
            head,
            stale_target: true,
        };
    };
    if input.ignore_watch_target {
        return WatchDecision::Idle {
            head,
            stale_target: false,
        };
    }

    // 3. Только комбинация dialog + HUD подавляет watching
    if rig.is_dialog_playing() && rig.is_using_hud() {
        return WatchDecision::Relax {
            head,
            reason: RelaxReason::DialogWithHud,
        };
    }

    // 4. Дистанция (max_distance <= 0 = без лимита)
    if input.max_distance > 0.0 && rig.origin().distance(target.origin) > input.max_distance {
        return WatchDecision::Relax {
            head,
            reason: RelaxReason::OutOfRange,
        };
    }

    // 5. Мёртвые не интересны
    if target.liveness == Some(TargetLiveness::Inactive) {
        return WatchDecision::DropTarget {
            target: target_entity,
        };
    }

    WatchDecision::Watch { head, target }
}

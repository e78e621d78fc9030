//! HeadWatcher: per-actor контроллер поворота головы к watch target
//!
//! Pipeline на тик (update):
//! gate → (Watch) solver → interpolator → commit
//!      → (Idle) twitch → interpolator → commit, или relax к нулю
//!      → (Relax) relax к нулю
//!      → (DropTarget) сброс цели, без коммита
//!
//! Внешние зависимости (skeleton, мир, время, RNG) передаются в update,
//! сам компонент ECS не трогает.

use bevy::prelude::*;
use rand::Rng;

use super::angles::HeadAngles;
use super::collaborators::{HeadRig, WatchWorld};
use super::config::{HeadWatchConfig, HeadWatchSettings};
use super::error::HeadWatchError;
use super::gate::{self, GateInput, RelaxReason, WatchDecision};
use super::interpolator::{commit_head_step, HeadStep, TorsoFrame};
use super::snapshot::HeadWatcherSnapshot;
use super::solver::{aim_point, solve_head_delta, SolvedDelta, SolverLimits};
use super::twitch::{pick_twitch, TwitchPhase};
use crate::components::BoneTag;

/// Что сделал update на этом тике
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WatchOutcome {
    /// Skeleton/анимация не готовы: ничего не изменено
    Skipped,
    /// Голова шагнула к нейтрали. reason = None: просто нет цели (idle)
    Relaxed {
        angles: HeadAngles,
        reason: Option<RelaxReason>,
    },
    /// Twitch idle шаг (committed angles)
    Twitched(HeadAngles),
    /// Голова шагнула к цели (committed angles)
    Watched(HeadAngles),
    /// Дельта внутри dead-zone: ничего не изменено
    HeldInDeadZone,
    /// Цель мертва/неактивна и сброшена, ничего не закоммичено
    TargetDropped(Entity),
}

impl WatchOutcome {
    /// Что было записано в head кость (None = коммита не было)
    pub fn committed(&self) -> Option<HeadAngles> {
        match self {
            Self::Relaxed { angles, .. } | Self::Twitched(angles) | Self::Watched(angles) => {
                Some(*angles)
            }
            Self::Skipped | Self::HeldInDeadZone | Self::TargetDropped(_) => None,
        }
    }
}

/// Результат поиска цели по имени
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetLookup {
    /// Никого с таким именем: цель не изменена
    NotFound,
    Unique(Entity),
    /// Несколько совпадений: взят первый в порядке registry
    Ambiguous { chosen: Entity, matches: usize },
}

/// Head watch контроллер (один на актора)
///
/// Инварианты:
/// - owner никогда не placeholder
/// - max_head_turn_speed, max_head_yaw, max_head_pitch ≥ 0
/// - watch_target не владеющий, проверяется каждый тик
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HeadWatcher {
    owner: Entity,
    watch_target: Option<Entity>,
    explicitly_set: bool,
    ignore_watch_target: bool,
    /// Последние закоммиченные углы (до torso поправки)
    current_head_angles: HeadAngles,
    max_head_turn_speed: f32,
    turn_threshold: f32,
    max_head_yaw: f32,
    max_head_pitch: f32,
    max_distance: f32,
    twitch_enabled: bool,
    next_twitch_time: f32,
    head_twitch_angles: HeadAngles,
}

impl HeadWatcher {
    /// Создать контроллер для актора
    ///
    /// Стартовые углы читаются из head кости (ZERO если кости ещё нет).
    pub fn new<R: HeadRig + ?Sized>(
        owner: Entity,
        config: &HeadWatchConfig,
        rig: &R,
        head_bone: &str,
    ) -> Result<Self, HeadWatchError> {
        if owner == Entity::PLACEHOLDER {
            return Err(HeadWatchError::MissingOwner);
        }
        validate_limit("max_head_turn_speed", config.max_head_turn_speed)?;
        validate_limit("max_head_yaw", config.max_head_yaw)?;
        validate_limit("max_head_pitch", config.max_head_pitch)?;
        validate_finite("turn_threshold", config.turn_threshold)?;
        validate_finite("max_distance", config.max_distance)?;

        let current_head_angles = rig
            .bone_tag(head_bone)
            .map(|tag| rig.controller_angles(tag))
            .unwrap_or_default();

        Ok(Self {
            owner,
            watch_target: None,
            explicitly_set: false,
            ignore_watch_target: false,
            current_head_angles,
            max_head_turn_speed: config.max_head_turn_speed,
            turn_threshold: config.turn_threshold,
            max_head_yaw: config.max_head_yaw,
            max_head_pitch: config.max_head_pitch,
            max_distance: config.max_distance,
            twitch_enabled: config.twitch_enabled,
            next_twitch_time: 0.0,
            head_twitch_angles: HeadAngles::ZERO,
        })
    }

    // === Target resolver ===

    /// Прямая ссылка на цель (liveness не проверяется до update)
    pub fn set_watch_target(&mut self, target: Entity) {
        self.watch_target = Some(target);
        self.explicitly_set = true;
    }

    /// Цель по имени из named-target registry
    pub fn set_watch_target_by_name<W: WatchWorld + ?Sized>(
        &mut self,
        name: &str,
        world: &W,
    ) -> TargetLookup {
        let matches = world.find_targets(name);

        let Some(&chosen) = matches.first() else {
            crate::log_warning(&format!(
                "HeadWatcher {:?}: no target with target name '{}'",
                self.owner, name
            ));
            return TargetLookup::NotFound;
        };

        self.set_watch_target(chosen);

        if matches.len() > 1 {
            crate::log_warning(&format!(
                "HeadWatcher {:?}: {} targets with target name '{}', using first ({:?})",
                self.owner,
                matches.len(),
                name,
                chosen
            ));
            TargetLookup::Ambiguous {
                chosen,
                matches: matches.len(),
            }
        } else {
            TargetLookup::Unique(chosen)
        }
    }

    pub fn clear_watch_target(&mut self) {
        self.watch_target = None;
        self.explicitly_set = false;
    }

    /// Текущая цель (может указывать на уже despawned entity)
    pub fn watch_target(&self) -> Option<Entity> {
        self.watch_target
    }

    // === Настройки ===

    /// Градусов за update (отрицательное → 0, NaN/inf игнорируются)
    pub fn set_watch_speed(&mut self, speed: f32) {
        if let Some(speed) = self.sanitize_limit("watch speed", speed) {
            self.max_head_turn_speed = speed;
        }
    }

    pub fn set_turn_threshold(&mut self, threshold: f32) {
        if self.is_storable("turn threshold", threshold) {
            self.turn_threshold = threshold;
        }
    }

    pub fn set_head_limits(&mut self, max_yaw: f32, max_pitch: f32) {
        if let Some(yaw) = self.sanitize_limit("max head yaw", max_yaw) {
            self.max_head_yaw = yaw;
        }
        if let Some(pitch) = self.sanitize_limit("max head pitch", max_pitch) {
            self.max_head_pitch = pitch;
        }
    }

    /// < 0 = без лимита (бесконечность не принимается: её не сохранить в snapshot)
    pub fn set_max_distance(&mut self, max_distance: f32) {
        if self.is_storable("max distance", max_distance) {
            self.max_distance = max_distance;
        }
    }

    pub fn set_ignore_watch_target(&mut self, ignore: bool) {
        self.ignore_watch_target = ignore;
    }

    /// Включение twitch сбрасывает расписание: pick на следующем eligible update
    pub fn set_head_twitch(&mut self, enabled: bool) {
        self.twitch_enabled = enabled;

        if enabled {
            self.next_twitch_time = 0.0;
        }
    }

    fn sanitize_limit(&self, what: &str, value: f32) -> Option<f32> {
        self.is_storable(what, value).then_some(value.max(0.0))
    }

    /// Setters держат те же правила что restore: только конечные значения
    fn is_storable(&self, what: &str, value: f32) -> bool {
        if !value.is_finite() {
            crate::log_warning(&format!(
                "HeadWatcher {:?}: ignoring non-finite {} ({})",
                self.owner, what, value
            ));
            return false;
        }
        true
    }

    // === Accessors ===

    pub fn owner(&self) -> Entity {
        self.owner
    }

    pub fn is_explicitly_set(&self) -> bool {
        self.explicitly_set
    }

    pub fn ignores_watch_target(&self) -> bool {
        self.ignore_watch_target
    }

    pub fn current_head_angles(&self) -> HeadAngles {
        self.current_head_angles
    }

    pub fn max_head_turn_speed(&self) -> f32 {
        self.max_head_turn_speed
    }

    pub fn turn_threshold(&self) -> f32 {
        self.turn_threshold
    }

    pub fn max_head_yaw(&self) -> f32 {
        self.max_head_yaw
    }

    pub fn max_head_pitch(&self) -> f32 {
        self.max_head_pitch
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn twitch_enabled(&self) -> bool {
        self.twitch_enabled
    }

    pub fn next_twitch_time(&self) -> f32 {
        self.next_twitch_time
    }

    pub fn head_twitch_angles(&self) -> HeadAngles {
        self.head_twitch_angles
    }

    pub fn twitch_phase(&self, now: f32) -> TwitchPhase {
        TwitchPhase::at(now, self.next_twitch_time)
    }

    // === Per-frame update ===

    /// Один тик head watch
    ///
    /// Никогда не паникует: все edge cases деградируют в Skipped / relax.
    pub fn update<R, W, G>(
        &mut self,
        rig: &mut R,
        world: &W,
        settings: &HeadWatchSettings,
        rng: &mut G,
    ) -> WatchOutcome
    where
        R: HeadRig + ?Sized,
        W: WatchWorld + ?Sized,
        G: Rng + ?Sized,
    {
        let input = GateInput {
            watch_target: self.watch_target,
            ignore_watch_target: self.ignore_watch_target,
            max_distance: self.max_distance,
        };

        match gate::evaluate(rig, world, &settings.head_bone, input) {
            WatchDecision::Abort => WatchOutcome::Skipped,

            WatchDecision::Idle { head, stale_target } => {
                if stale_target {
                    crate::log(&format!(
                        "HeadWatcher {:?}: watch target {:?} no longer exists, dropping",
                        self.owner, self.watch_target
                    ));
                    self.watch_target = None;
                }

                if self.twitch_enabled {
                    WatchOutcome::Twitched(self.twitch_head(rig, head, world.now(), settings, rng))
                } else {
                    WatchOutcome::Relaxed {
                        angles: self.relax(rig, head, settings),
                        reason: None,
                    }
                }
            }

            WatchDecision::Relax { head, reason } => WatchOutcome::Relaxed {
                angles: self.relax(rig, head, settings),
                reason: Some(reason),
            },

            WatchDecision::DropTarget { target } => {
                crate::log(&format!(
                    "HeadWatcher {:?}: watch target {:?} is not thinking, dropping",
                    self.owner, target
                ));
                self.watch_target = None;
                WatchOutcome::TargetDropped(target)
            }

            WatchDecision::Watch { head, target } => {
                let Some(head_position) = rig.bone_world_position(&settings.head_bone) else {
                    return WatchOutcome::Skipped;
                };

                let delta = solve_head_delta(
                    head_position,
                    aim_point(&target),
                    rig.body_angles(),
                    self.solver_limits(),
                );

                match delta {
                    SolvedDelta::InDeadZone => WatchOutcome::HeldInDeadZone,
                    SolvedDelta::Turn(delta) => {
                        let committed = self.lerp_head_by_speed(
                            rig,
                            head,
                            delta,
                            self.max_head_turn_speed,
                            TorsoFrame::Relative,
                            settings,
                        );
                        WatchOutcome::Watched(committed)
                    }
                }
            }
        }
    }

    fn solver_limits(&self) -> SolverLimits {
        SolverLimits {
            turn_threshold: self.turn_threshold,
            max_head_yaw: self.max_head_yaw,
            max_head_pitch: self.max_head_pitch,
        }
    }

    fn relax<R: HeadRig + ?Sized>(
        &mut self,
        rig: &mut R,
        head: BoneTag,
        settings: &HeadWatchSettings,
    ) -> HeadAngles {
        self.lerp_head_by_speed(
            rig,
            head,
            HeadAngles::ZERO,
            self.max_head_turn_speed,
            TorsoFrame::Absolute,
            settings,
        )
    }

    /// Twitch FSM: pick если пора, затем медленный шаг к twitch offset
    fn twitch_head<R, G>(
        &mut self,
        rig: &mut R,
        head: BoneTag,
        now: f32,
        settings: &HeadWatchSettings,
        rng: &mut G,
    ) -> HeadAngles
    where
        R: HeadRig + ?Sized,
        G: Rng + ?Sized,
    {
        if self.twitch_phase(now) == TwitchPhase::DueForPick {
            let pick = pick_twitch(rng, now, settings);
            self.head_twitch_angles = pick.angles;
            self.next_twitch_time = pick.next_twitch_time;
        }

        // Пониженная скорость передаётся в шаг, max_head_turn_speed не трогаем
        self.lerp_head_by_speed(
            rig,
            head,
            self.head_twitch_angles,
            settings.twitch_turn_speed,
            TorsoFrame::Absolute,
            settings,
        )
    }

    fn lerp_head_by_speed<R: HeadRig + ?Sized>(
        &mut self,
        rig: &mut R,
        head: BoneTag,
        target: HeadAngles,
        speed: f32,
        frame: TorsoFrame,
        settings: &HeadWatchSettings,
    ) -> HeadAngles {
        commit_head_step(
            rig,
            &mut self.current_head_angles,
            target,
            HeadStep {
                head,
                torso_bone: &settings.torso_bone,
                speed,
                frame,
            },
        )
    }

    // === Persistence ===

    pub fn snapshot(&self) -> HeadWatcherSnapshot {
        HeadWatcherSnapshot {
            watch_target: self.watch_target,
            current_head_angles: self.current_head_angles,
            max_head_turn_speed: self.max_head_turn_speed,
            turn_threshold: self.turn_threshold,
            explicitly_set: self.explicitly_set,
            max_head_yaw: self.max_head_yaw,
            max_head_pitch: self.max_head_pitch,
            twitch_enabled: self.twitch_enabled,
            next_twitch_time: self.next_twitch_time,
            head_twitch_angles: self.head_twitch_angles,
            max_distance: self.max_distance,
            ignore_watch_target: self.ignore_watch_target,
        }
    }

    /// Восстановить из snapshot и привязать к актору-владельцу
    pub fn restore(owner: Entity, snapshot: &HeadWatcherSnapshot) -> Result<Self, HeadWatchError> {
        if owner == Entity::PLACEHOLDER {
            return Err(HeadWatchError::MissingOwner);
        }
        validate_limit("max_head_turn_speed", snapshot.max_head_turn_speed)?;
        validate_limit("max_head_yaw", snapshot.max_head_yaw)?;
        validate_limit("max_head_pitch", snapshot.max_head_pitch)?;
        validate_finite("turn_threshold", snapshot.turn_threshold)?;
        validate_finite("max_distance", snapshot.max_distance)?;

        Ok(Self {
            owner,
            watch_target: snapshot.watch_target,
            explicitly_set: snapshot.explicitly_set,
            ignore_watch_target: snapshot.ignore_watch_target,
            current_head_angles: snapshot.current_head_angles,
            max_head_turn_speed: snapshot.max_head_turn_speed,
            turn_threshold: snapshot.turn_threshold,
            max_head_yaw: snapshot.max_head_yaw,
            max_head_pitch: snapshot.max_head_pitch,
            max_distance: snapshot.max_distance,
            twitch_enabled: snapshot.twitch_enabled,
            next_twitch_time: snapshot.next_twitch_time,
            head_twitch_angles: snapshot.head_twitch_angles,
        })
    }
}

fn validate_limit(field: &'static str, value: f32) -> Result<(), HeadWatchError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(HeadWatchError::InvalidLimit { field, value })
    }
}

fn validate_finite(field: &'static str, value: f32) -> Result<(), HeadWatchError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(HeadWatchError::InvalidLimit { field, value })
    }
}

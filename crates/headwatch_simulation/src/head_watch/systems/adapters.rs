//! ECS реализации HeadRig / WatchWorld
//!
//! OwnerRig: поверх компонентов актора-владельца (Transform, Skeleton, ActorFlags).
//! EcsWatchWorld: снимок целей на этот тик + named-target registry + время.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::components::{
    is_think_on, Actor, ActorFlags, BoneTag, BoundingBox, Health, Skeleton, WatchOffset,
};
use crate::head_watch::angles::HeadAngles;
use crate::head_watch::collaborators::{HeadRig, TargetLiveness, TargetView, WatchWorld};

/// Актор-владелец глазами HeadWatcher
pub struct OwnerRig<'a> {
    pub transform: &'a Transform,
    pub skeleton: &'a mut Skeleton,
    pub flags: ActorFlags,
    /// Заполняется интерполятором, система пишет в EffectiveHeadPitch
    pub effective_head_pitch: Option<f32>,
}

impl<'a> OwnerRig<'a> {
    pub fn new(transform: &'a Transform, skeleton: &'a mut Skeleton, flags: Option<&ActorFlags>) -> Self {
        Self {
            transform,
            skeleton,
            flags: flags.copied().unwrap_or_default(),
            effective_head_pitch: None,
        }
    }
}

impl HeadRig for OwnerRig<'_> {
    fn bone_tag(&self, name: &str) -> Option<BoneTag> {
        self.skeleton.tag_for_name(name)
    }

    fn controller_angles(&self, tag: BoneTag) -> HeadAngles {
        self.skeleton.controller_angles(tag)
    }

    fn set_controller_angles(&mut self, tag: BoneTag, angles: HeadAngles) {
        self.skeleton.set_controller_angles(tag, angles);
    }

    fn bone_world_position(&self, name: &str) -> Option<Vec3> {
        self.skeleton.bone_world_position(self.transform, name)
    }

    fn has_locomotion_anim(&self) -> bool {
        self.skeleton.legs_anim().is_some()
    }

    fn origin(&self) -> Vec3 {
        self.transform.translation
    }

    fn body_angles(&self) -> HeadAngles {
        HeadAngles::from_rotation(self.transform.rotation)
    }

    fn is_dialog_playing(&self) -> bool {
        self.flags.dialog_playing
    }

    fn is_using_hud(&self) -> bool {
        self.flags.using_hud
    }

    fn set_effective_head_pitch(&mut self, pitch: f32) {
        self.effective_head_pitch = Some(pitch);
    }
}

/// Named-target registry
///
/// Порядок совпадений: по Entity (index, generation): стабилен в пределах прогона,
/// поэтому "первый" при неоднозначном имени детерминирован.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    entries: Vec<(Entity, String)>,
}

impl TargetRegistry {
    pub fn from_entries(entries: impl IntoIterator<Item = (Entity, String)>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by_key(|(entity, _)| *entity);
        Self { entries }
    }

    pub fn find(&self, name: &str) -> Vec<Entity> {
        self.entries
            .iter()
            .filter(|(_, entry_name)| entry_name == name)
            .map(|(entity, _)| *entity)
            .collect()
    }
}

/// Мир на этот тик
#[derive(Debug, Clone, Default)]
pub struct EcsWatchWorld {
    pub targets: HashMap<Entity, TargetView>,
    pub registry: TargetRegistry,
    pub now: f32,
}

impl WatchWorld for EcsWatchWorld {
    fn target(&self, entity: Entity) -> Option<TargetView> {
        self.targets.get(&entity).copied()
    }

    fn find_targets(&self, name: &str) -> Vec<Entity> {
        self.registry.find(name)
    }

    fn now(&self) -> f32 {
        self.now
    }
}

/// Компоненты цели, из которых строится TargetView
pub type TargetData<'a> = (
    &'a Transform,
    Option<&'a Skeleton>,
    Option<&'a WatchOffset>,
    Option<&'a BoundingBox>,
    Option<&'a Actor>,
    Option<&'a ActorFlags>,
    Option<&'a Health>,
);

/// Снимок цели из её компонентов
pub fn target_view(data: TargetData<'_>, head_bone: &str) -> TargetView {
    let (transform, skeleton, offset, bounds, actor, flags, health) = data;
    let origin = transform.translation;

    let liveness = actor.map(|_| {
        let flags = flags.copied().unwrap_or_default();
        if is_think_on(&flags, health) {
            TargetLiveness::Thinking
        } else {
            TargetLiveness::Inactive
        }
    });

    TargetView {
        origin,
        rotation: transform.rotation,
        watch_offset: offset.map(|offset| offset.0).unwrap_or(Vec3::ZERO),
        head_position: skeleton.and_then(|skeleton| skeleton.bone_world_position(transform, head_bone)),
        centroid: bounds.map(|bounds| bounds.centroid(origin)).unwrap_or(origin),
        liveness,
    }
}

//! Тестовые коллабораторы для HeadWatcher (без App)

use std::collections::HashMap;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::angles::HeadAngles;
use super::collaborators::{HeadRig, TargetView, WatchWorld};
use super::config::{HeadWatchConfig, HEAD_BONE, TORSO_BONE};
use super::watcher::HeadWatcher;
use crate::components::{ActorFlags, BoneTag, Skeleton};

/// Актор-владелец: skeleton + transform + флаги, считает коммиты
#[derive(Debug, Clone)]
pub struct MockRig {
    pub skeleton: Skeleton,
    pub transform: Transform,
    pub flags: ActorFlags,
    pub effective_head_pitch: Option<f32>,
    pub commits: Vec<HeadAngles>,
}

impl MockRig {
    /// Гуманоид в origin, смотрит в -Z, legs анимация привязана
    pub fn humanoid() -> Self {
        Self {
            skeleton: Skeleton::new()
                .with_bone(TORSO_BONE, Vec3::new(0.0, 1.2, 0.0))
                .with_bone(HEAD_BONE, Vec3::new(0.0, 1.7, 0.0))
                .with_legs_anim(0),
            transform: Transform::default(),
            flags: ActorFlags::default(),
            effective_head_pitch: None,
            commits: Vec::new(),
        }
    }

    pub fn head_tag(&self) -> BoneTag {
        self.skeleton
            .tag_for_name(HEAD_BONE)
            .expect("humanoid has a head bone")
    }

    pub fn set_bone_angles(&mut self, bone: &str, angles: HeadAngles) {
        let tag = self.skeleton.tag_for_name(bone).expect("bone exists");
        self.skeleton.set_controller_angles(tag, angles);
    }

    pub fn head_angles(&self) -> HeadAngles {
        self.skeleton.controller_angles(self.head_tag())
    }

    pub fn last_commit(&self) -> Option<HeadAngles> {
        self.commits.last().copied()
    }
}

impl HeadRig for MockRig {
    fn bone_tag(&self, name: &str) -> Option<BoneTag> {
        self.skeleton.tag_for_name(name)
    }

    fn controller_angles(&self, tag: BoneTag) -> HeadAngles {
        self.skeleton.controller_angles(tag)
    }

    fn set_controller_angles(&mut self, tag: BoneTag, angles: HeadAngles) {
        self.skeleton.set_controller_angles(tag, angles);
        self.commits.push(angles);
    }

    fn bone_world_position(&self, name: &str) -> Option<Vec3> {
        self.skeleton.bone_world_position(&self.transform, name)
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

/// Мир: цели по Entity, registry по имени, время
#[derive(Debug, Clone, Default)]
pub struct MockWorld {
    pub targets: HashMap<Entity, TargetView>,
    pub names: Vec<(Entity, String)>,
    pub now: f32,
}

impl MockWorld {
    pub fn with_target(mut self, entity: Entity, view: TargetView) -> Self {
        self.targets.insert(entity, view);
        self
    }

    pub fn with_name(mut self, entity: Entity, name: &str) -> Self {
        self.names.push((entity, name.to_string()));
        self
    }
}

impl WatchWorld for MockWorld {
    fn target(&self, entity: Entity) -> Option<TargetView> {
        self.targets.get(&entity).copied()
    }

    fn find_targets(&self, name: &str) -> Vec<Entity> {
        self.names
            .iter()
            .filter(|(_, entry)| entry == name)
            .map(|(entity, _)| *entity)
            .collect()
    }

    fn now(&self) -> f32 {
        self.now
    }
}

pub fn owner() -> Entity {
    Entity::from_raw(1)
}

pub fn target() -> Entity {
    Entity::from_raw(2)
}

pub fn watcher_for(rig: &MockRig, config: &HeadWatchConfig) -> HeadWatcher {
    HeadWatcher::new(owner(), config, rig, HEAD_BONE).expect("valid config")
}

pub fn seeded_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

/// Точка на высоте головы гуманоида
pub fn eye_level(x: f32, z: f32) -> TargetView {
    TargetView::point(Vec3::new(x, 1.7, z))
}

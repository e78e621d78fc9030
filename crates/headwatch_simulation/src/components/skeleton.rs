//! Skeleton компонент: кости, controller angles, locomotion анимация
//!
//! ECS-сторона анимационного runtime. Рендер (Godot/Bevy) заполняет кости
//! при загрузке модели и читает controller angles каждый кадр.

use bevy::prelude::*;

use crate::head_watch::HeadAngles;

/// Handle кости внутри Skeleton (индекс, валиден пока skeleton не пересобран)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct BoneTag(pub usize);

/// Кость skeleton'а
#[derive(Debug, Clone, Reflect)]
pub struct Bone {
    pub name: String,
    /// Позиция кости относительно origin entity (в локальном пространстве entity)
    pub offset: Vec3,
    /// Bone-local rotation offset поверх base pose
    pub controller_angles: HeadAngles,
}

/// Skeleton актора
///
/// Пустой skeleton = модель ещё не загружена (head watch ждёт).
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Skeleton {
    bones: Vec<Bone>,
    /// Текущая legs анимация (None = ничего не привязано)
    legs_anim: Option<u32>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: добавить кость
    pub fn with_bone(mut self, name: impl Into<String>, offset: Vec3) -> Self {
        self.bones.push(Bone {
            name: name.into(),
            offset,
            controller_angles: HeadAngles::ZERO,
        });
        self
    }

    /// Builder: привязать legs анимацию
    pub fn with_legs_anim(mut self, anim: u32) -> Self {
        self.legs_anim = Some(anim);
        self
    }

    pub fn tag_for_name(&self, name: &str) -> Option<BoneTag> {
        self.bones.iter().position(|bone| bone.name == name).map(BoneTag)
    }

    pub fn bone(&self, tag: BoneTag) -> Option<&Bone> {
        self.bones.get(tag.0)
    }

    /// Controller angles кости (ZERO для невалидного tag)
    pub fn controller_angles(&self, tag: BoneTag) -> HeadAngles {
        self.bone(tag)
            .map(|bone| bone.controller_angles)
            .unwrap_or_default()
    }

    /// Невалидный tag игнорируется
    pub fn set_controller_angles(&mut self, tag: BoneTag, angles: HeadAngles) {
        if let Some(bone) = self.bones.get_mut(tag.0) {
            bone.controller_angles = angles;
        }
    }

    /// World-space позиция кости
    pub fn bone_world_position(&self, transform: &Transform, name: &str) -> Option<Vec3> {
        let tag = self.tag_for_name(name)?;
        self.bone(tag).map(|bone| transform.transform_point(bone.offset))
    }

    pub fn legs_anim(&self) -> Option<u32> {
        self.legs_anim
    }

    pub fn set_legs_anim(&mut self, anim: Option<u32>) {
        self.legs_anim = anim;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_lookup() {
        let skeleton = Skeleton::new()
            .with_bone("Bip01 Spine1", Vec3::new(0.0, 1.2, 0.0))
            .with_bone("Bip01 Head", Vec3::new(0.0, 1.7, 0.0));

        assert_eq!(skeleton.tag_for_name("Bip01 Head"), Some(BoneTag(1)));
        assert_eq!(skeleton.tag_for_name("Bip01 Tail"), None);
    }

    #[test]
    fn test_controller_angles_roundtrip() {
        let mut skeleton = Skeleton::new().with_bone("Bip01 Head", Vec3::ZERO);
        let tag = skeleton.tag_for_name("Bip01 Head").unwrap();

        skeleton.set_controller_angles(tag, HeadAngles::new(10.0, -5.0, 0.0));
        assert_eq!(skeleton.controller_angles(tag), HeadAngles::new(10.0, -5.0, 0.0));

        // Невалидный tag: no-op
        skeleton.set_controller_angles(BoneTag(7), HeadAngles::new(1.0, 1.0, 1.0));
        assert_eq!(skeleton.controller_angles(BoneTag(7)), HeadAngles::ZERO);
    }

    #[test]
    fn test_bone_world_position() {
        let skeleton = Skeleton::new().with_bone("Bip01 Head", Vec3::new(0.0, 1.7, 0.0));
        let transform = Transform::from_xyz(5.0, 0.0, -2.0);

        assert_eq!(
            skeleton.bone_world_position(&transform, "Bip01 Head"),
            Some(Vec3::new(5.0, 1.7, -2.0))
        );
        assert_eq!(skeleton.bone_world_position(&transform, "Bip01 Neck"), None);
    }
}

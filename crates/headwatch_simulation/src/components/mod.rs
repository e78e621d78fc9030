//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (Actor, Health, ActorFlags)
//! - skeleton: кости и controller angles (Skeleton, BoneTag)
//! - world: данные целей (TargetName, WatchOffset, BoundingBox)

pub mod actor;
pub mod skeleton;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use skeleton::*;
pub use world::*;

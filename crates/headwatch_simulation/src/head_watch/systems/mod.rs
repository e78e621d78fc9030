//! Head watch systems (ECS glue вокруг HeadWatcher)

pub mod adapters;
pub mod update;


pub use adapters::{target_view, EcsWatchWorld, OwnerRig, TargetRegistry};
pub use update::*;

//! Ошибки конфигурации head watch

use thiserror::Error;

/// Фатальные ошибки создания/restore HeadWatcher
///
/// Per-frame update ошибок не возвращает: там всё деградирует в "ничего не делать".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeadWatchError {
    /// HeadWatcher без актора-владельца бесполезен
    #[error("head watcher requires an owner actor, got a placeholder entity")]
    MissingOwner,

    /// Лимит отрицательный или не конечный
    #[error("invalid head watch limit `{field}`: {value}")]
    InvalidLimit { field: &'static str, value: f32 },
}

use thiserror::Error;

/// Input rejected by a goal operation. State is never modified when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoalError {
    #[error("goal name must not be empty")]
    EmptyName,
    #[error("invalid day key {0:?}, expected YYYY-MM-DD")]
    InvalidDayKey(String),
    #[error("unknown icon {0:?}")]
    UnknownIcon(String),
}

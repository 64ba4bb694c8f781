use thiserror::Error;

use crate::ScrollDirection;

/// Errors produced by calendar window arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WindowError {
    /// The unit name is not one of day/week/month.
    #[error("unsupported calendar unit: {0}")]
    InvalidUnit(String),

    #[error("unit count must be at least 1, got {0}")]
    InvalidUnitCount(u32),

    /// The requested window would lie entirely before the calendar's minimum date.
    #[error("window would start before the minimum date {min}")]
    BeforeMinimum { min: chrono::NaiveDate },

    /// The result is not representable by chrono.
    #[error("date out of range")]
    OutOfRange,

    #[error("invalid date format: {0}")]
    InvalidFormat(String),
}

/// A move was requested while a move in the other direction is still in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("a {active:?} move is already in progress")]
pub struct MoveLocked {
    pub active: ScrollDirection,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NavigatorError {
    #[error("invalid initial window: {0}")]
    Window(#[from] WindowError),
}

pub type WindowResult<T> = Result<T, WindowError>;

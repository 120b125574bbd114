//! Error types for matchday.

use thiserror::Error;

/// Errors that can occur while turning a schedule into calendar events.
#[derive(Error, Debug)]
pub enum MatchdayError {
    #[error("No recognizable date in fragment: {0:?}")]
    MalformedFragment(String),

    #[error("Calendar query failed: {0}")]
    CalendarQueryFailed(String),

    #[error("Calendar write failed: {0}")]
    CalendarWriteFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for matchday operations.
pub type MatchdayResult<T> = Result<T, MatchdayError>;

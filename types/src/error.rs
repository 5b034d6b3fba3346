//! Configuration validation errors.

use crate::time::Timestamp;
use thiserror::Error;

/// Why an `ElectionConfig` was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("start time {start} must be before end time {end}")]
    StartNotBeforeEnd { start: Timestamp, end: Timestamp },

    #[error(
        "candidate registration deadline {deadline} must not be after start time {start}"
    )]
    DeadlineAfterStart { deadline: Timestamp, start: Timestamp },
}

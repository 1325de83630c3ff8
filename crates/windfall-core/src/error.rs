//! Error types for windfall-core

use crate::TaskHandle;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(TaskHandle),

    #[error("Invalid interval: {0} ticks (must be at least 1)")]
    InvalidInterval(u64),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

//! Planner error types.
//!
//! Missing durations, empty inputs and partially filled detections are all
//! recovered inline with defaults. Only configuration problems surface here.

use thiserror::Error;

pub type PlannerResult<T> = Result<T, PlannerError>;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PlannerError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Check if this error came from configuration validation.
    pub fn is_config_error(&self) -> bool {
        matches!(self, PlannerError::InvalidConfig(_))
    }
}

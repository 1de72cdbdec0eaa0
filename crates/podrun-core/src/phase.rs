//! Phase info reported back to the caller after each poll.

use serde::{Deserialize, Serialize};

use crate::TaskPhase;

/// Who is to blame for a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Failure caused by the user's workload.
    #[default]
    User,
    /// Failure caused by the platform.
    System,
}

/// Best-effort description of why a task attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionError {
    /// Short machine-readable code (e.g. `Unschedulable`).
    pub code: String,

    /// Human-readable message.
    pub message: String,

    /// Failure attribution.
    pub kind: ErrorKind,
}

impl ExecutionError {
    /// Create a new user-attributed ExecutionError.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            kind: ErrorKind::User,
        }
    }

    /// Builder method to set the attribution.
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A task phase plus the error that explains it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseInfo {
    /// Derived phase.
    pub phase: TaskPhase,

    /// Set only for failure phases.
    pub error: Option<ExecutionError>,
}

impl PhaseInfo {
    /// Create a PhaseInfo with no error attached.
    pub fn new(phase: TaskPhase) -> Self {
        Self { phase, error: None }
    }

    pub fn undefined() -> Self {
        Self::new(TaskPhase::Undefined)
    }

    pub fn queued() -> Self {
        Self::new(TaskPhase::Queued)
    }

    pub fn running() -> Self {
        Self::new(TaskPhase::Running)
    }

    pub fn success() -> Self {
        Self::new(TaskPhase::Success)
    }

    pub fn unknown() -> Self {
        Self::new(TaskPhase::Unknown)
    }

    /// Failure the caller is free to retry.
    pub fn retryable_failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            phase: TaskPhase::RetryableFailure,
            error: Some(ExecutionError::new(code, message)),
        }
    }

    /// Failure that retrying will not fix.
    pub fn permanent_failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            phase: TaskPhase::PermanentFailure,
            error: Some(ExecutionError::new(code, message)),
        }
    }

    /// Builder method to set the error attribution.
    pub fn with_error_kind(mut self, kind: ErrorKind) -> Self {
        if let Some(error) = self.error.take() {
            self.error = Some(error.with_kind(kind));
        }
        self
    }

    /// Error code, if any.
    pub fn error_code(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.code.as_str())
    }
}

//! Status enums for task attempts and the orchestrated objects backing them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Execution phase of a task attempt as reported to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPhase {
    /// No phase has been derived yet.
    Undefined,
    /// Object accepted but not yet running.
    Queued,
    /// Object is running.
    Running,
    /// Task completed successfully.
    Success,
    /// Task failed; the caller may retry the attempt.
    RetryableFailure,
    /// Task failed; retrying will not help.
    PermanentFailure,
    /// Observed state could not be classified.
    #[default]
    Unknown,
}

impl TaskPhase {
    /// All phases, in declaration order.
    pub const ALL: [TaskPhase; 7] = [
        Self::Undefined,
        Self::Queued,
        Self::Running,
        Self::Success,
        Self::RetryableFailure,
        Self::PermanentFailure,
        Self::Unknown,
    ];

    /// Returns true once no further transitions can occur.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Success | Self::RetryableFailure | Self::PermanentFailure
        )
    }

    /// Returns true for either failure phase.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::RetryableFailure | Self::PermanentFailure)
    }

    /// Stable name used when persisting the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::Queued => "Queued",
            Self::Running => "Running",
            Self::Success => "Success",
            Self::RetryableFailure => "RetryableFailure",
            Self::PermanentFailure => "PermanentFailure",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TaskPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPhase {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| CoreError::UnknownTaskPhase(s.to_string()))
    }
}

/// Whether the orchestrated object backing a task attempt exists.
///
/// Internal bookkeeping of the status tracker, never read by upstream
/// components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectStatus {
    /// Object has not been observed yet.
    #[default]
    Unknown,
    /// Object was observed on the cluster.
    Exists,
    /// Object existed and is gone.
    Deleted,
}

impl ObjectStatus {
    /// Stable name used when persisting the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Exists => "Exists",
            Self::Deleted => "Deleted",
        }
    }
}

/// Operator-facing name.
impl fmt::Display for ObjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "NotStarted",
            Self::Exists => "Running",
            Self::Deleted => "Deleted",
        };
        f.write_str(name)
    }
}

impl FromStr for ObjectStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unknown" => Ok(Self::Unknown),
            "Exists" => Ok(Self::Exists),
            "Deleted" => Ok(Self::Deleted),
            other => Err(CoreError::UnknownObjectStatus(other.to_string())),
        }
    }
}

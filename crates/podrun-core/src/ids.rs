//! Newtype wrappers for identifiers and storage references.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a single task attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskExecutionId(String);

impl TaskExecutionId {
    /// Create a new TaskExecutionId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random TaskExecutionId.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TaskExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskExecutionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskExecutionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Reference to a location in external blob storage (e.g. `s3://bucket/key`).
///
/// The reference is opaque here: it is only ever rendered into staging
/// command lines, never resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataReference(String);

impl DataReference {
    /// Create a new DataReference from a string.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Get the inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if no location is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DataReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DataReference {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DataReference {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_execution_id_generate() {
        let id1 = TaskExecutionId::generate();
        let id2 = TaskExecutionId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_id_display() {
        let id = TaskExecutionId::new("my_project:my_domain:my_name");
        assert_eq!(format!("{}", id), "my_project:my_domain:my_name");
    }

    #[test]
    fn test_data_reference_is_transparent() {
        let reference = DataReference::from("s3://bucket/inputs.pb");
        let json = serde_json::to_string(&reference).unwrap();
        assert_eq!(json, r#""s3://bucket/inputs.pb""#);

        assert!(DataReference::default().is_empty());
    }
}

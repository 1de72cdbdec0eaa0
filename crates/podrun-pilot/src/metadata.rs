//! Task execution metadata supplied by the caller.

use k8s_openapi::api::core::v1::ResourceRequirements;
use podrun_core::TaskExecutionId;
use serde::{Deserialize, Serialize};

/// Read-only view of the task attempt a pod is built for.
pub trait TaskExecutionMetadata {
    /// Identity of the task attempt.
    fn task_execution_id(&self) -> &TaskExecutionId;

    /// Namespace the pod will be created in.
    fn namespace(&self) -> &str;

    /// Resource overrides set on the task, if any.
    fn resource_overrides(&self) -> Option<&ResourceRequirements>;
}

/// Plain record implementing [`TaskExecutionMetadata`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMetadata {
    pub id: TaskExecutionId,
    pub namespace: String,
    #[serde(default)]
    pub resources: Option<ResourceRequirements>,
}

impl TaskMetadata {
    /// Create metadata with no resource overrides.
    pub fn new(id: TaskExecutionId, namespace: impl Into<String>) -> Self {
        Self {
            id,
            namespace: namespace.into(),
            resources: None,
        }
    }

    /// Builder method to set resource overrides.
    pub fn with_resources(mut self, resources: ResourceRequirements) -> Self {
        self.resources = Some(resources);
        self
    }
}

impl TaskExecutionMetadata for TaskMetadata {
    fn task_execution_id(&self) -> &TaskExecutionId {
        &self.id
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn resource_overrides(&self) -> Option<&ResourceRequirements> {
        self.resources.as_ref()
    }
}

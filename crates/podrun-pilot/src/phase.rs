//! Mapping observed pod status to a task phase.

use k8s_openapi::api::core::v1::{Pod, PodStatus};
use podrun_core::PhaseInfo;
use tracing::debug;

/// Error code used when a failed pod carries no condition.
pub const UNKNOWN_ERROR_CODE: &str = "UnknownError";

/// Lifecycle phase reported by the cluster for a pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    /// Missing or not one of the above.
    Unknown,
}

impl PodPhase {
    /// Classify the phase string of a pod status.
    pub fn from_status(status: Option<&PodStatus>) -> Self {
        match status.and_then(|s| s.phase.as_deref()) {
            Some("Pending") => Self::Pending,
            Some("Running") => Self::Running,
            Some("Succeeded") => Self::Succeeded,
            Some("Failed") => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

/// Derive the task phase of a pod.
pub fn pod_phase_info(pod: &Pod) -> PhaseInfo {
    status_phase_info(pod.status.as_ref())
}

/// Derive the task phase from a pod status.
///
/// A failed pod is always reported as retryable. Whether a particular
/// failure (e.g. `Unschedulable`) is permanent is left to the caller.
pub fn status_phase_info(status: Option<&PodStatus>) -> PhaseInfo {
    let phase = PodPhase::from_status(status);
    debug!(pod_phase = ?phase, "Mapping pod phase");

    match phase {
        PodPhase::Pending => PhaseInfo::queued(),
        PodPhase::Running => PhaseInfo::running(),
        PodPhase::Succeeded => PhaseInfo::success(),
        PodPhase::Failed => {
            let (code, message) = failure_details(status);
            PhaseInfo::retryable_failure(code, message)
        }
        PodPhase::Unknown => PhaseInfo::unknown(),
    }
}

/// Error code from the first condition that is not satisfied, message from the
/// status message or reason.
fn failure_details(status: Option<&PodStatus>) -> (String, String) {
    let Some(status) = status else {
        return (UNKNOWN_ERROR_CODE.to_string(), String::new());
    };

    let code = status
        .conditions
        .iter()
        .flatten()
        .filter(|c| c.status != "True")
        .map(|c| c.type_.as_str())
        .find(|t| !t.is_empty())
        .unwrap_or(UNKNOWN_ERROR_CODE)
        .to_string();

    let message = [status.message.as_deref(), status.reason.as_deref()]
        .into_iter()
        .flatten()
        .find(|m| !m.is_empty())
        .unwrap_or_default()
        .to_string();

    (code, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::PodCondition;
    use podrun_core::TaskPhase;

    fn pod_with_phase(phase: &str) -> Pod {
        Pod {
            status: Some(PodStatus {
                phase: Some(phase.to_string()),
                ..PodStatus::default()
            }),
            ..Pod::default()
        }
    }

    #[test]
    fn test_running() {
        let info = pod_phase_info(&pod_with_phase("Running"));
        assert_eq!(info.phase, TaskPhase::Running);
        assert!(info.error.is_none());
    }

    #[test]
    fn test_queued() {
        let info = pod_phase_info(&pod_with_phase("Pending"));
        assert_eq!(info.phase, TaskPhase::Queued);
        assert!(info.error.is_none());
    }

    #[test]
    fn test_success() {
        let info = pod_phase_info(&pod_with_phase("Succeeded"));
        assert_eq!(info.phase, TaskPhase::Success);
        assert!(info.error.is_none());
    }

    #[test]
    fn test_fail_no_condition() {
        let info = pod_phase_info(&pod_with_phase("Failed"));
        assert_eq!(info.phase, TaskPhase::RetryableFailure);
        assert_eq!(info.error_code(), Some("UnknownError"));
    }

    #[test]
    fn test_fail_condition_unschedulable() {
        let mut pod = pod_with_phase("Failed");
        if let Some(status) = pod.status.as_mut() {
            status.reason = Some("Unschedulable".to_string());
            status.message = Some("some message".to_string());
            status.conditions = Some(vec![PodCondition {
                type_: "Unschedulable".to_string(),
                ..PodCondition::default()
            }]);
        }

        let info = pod_phase_info(&pod);
        assert_eq!(info.phase, TaskPhase::RetryableFailure);
        let error = info.error.unwrap();
        assert_eq!(error.code, "Unschedulable");
        assert_eq!(error.message, "some message");
    }

    #[test]
    fn test_fail_ignores_satisfied_conditions() {
        let condition = |type_: &str, status: &str| PodCondition {
            type_: type_.to_string(),
            status: status.to_string(),
            ..PodCondition::default()
        };
        let mut pod = pod_with_phase("Failed");
        if let Some(status) = pod.status.as_mut() {
            status.reason = Some("Evicted".to_string());
            status.conditions = Some(vec![
                condition("Initialized", "True"),
                condition("Ready", "False"),
                condition("ContainersReady", "False"),
                condition("PodScheduled", "True"),
            ]);
        }

        let error = pod_phase_info(&pod).error.unwrap();
        assert_eq!(error.code, "Ready");
        assert_eq!(error.message, "Evicted");
    }

    #[test]
    fn test_fail_all_conditions_satisfied_is_unknown_error() {
        let mut pod = pod_with_phase("Failed");
        if let Some(status) = pod.status.as_mut() {
            status.conditions = Some(vec![PodCondition {
                type_: "PodScheduled".to_string(),
                status: "True".to_string(),
                ..PodCondition::default()
            }]);
        }

        let error = pod_phase_info(&pod).error.unwrap();
        assert_eq!(error.code, UNKNOWN_ERROR_CODE);
    }

    #[test]
    fn test_fail_message_falls_back_to_reason() {
        let mut pod = pod_with_phase("Failed");
        if let Some(status) = pod.status.as_mut() {
            status.reason = Some("Evicted".to_string());
        }

        let error = pod_phase_info(&pod).error.unwrap();
        assert_eq!(error.code, "UnknownError");
        assert_eq!(error.message, "Evicted");
    }

    #[test]
    fn test_unrecognized_phase() {
        for pod in [pod_with_phase("Unknown"), pod_with_phase("Terminating"), Pod::default()] {
            let info = pod_phase_info(&pod);
            assert_eq!(info.phase, TaskPhase::Unknown);
            assert!(!info.phase.is_terminal());
            assert!(info.error.is_none());
        }
    }
}

//! One reconciliation poll: previous state + observed pod -> phase + next state.

use k8s_openapi::api::core::v1::Pod;
use podrun_core::{ErrorKind, ObjectStatus, PhaseInfo, TaskPhase};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::phase::pod_phase_info;
use crate::state::{CustomState, ObjectState};

/// Error code reported when the pod vanished before finishing.
pub const OBJECT_DELETED_CODE: &str = "ObjectDeleted";

/// Outcome of a single poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation {
    /// Phase to report for this poll.
    pub phase: PhaseInfo,

    /// State bag to persist for the next poll.
    pub state: CustomState,
}

/// Run one poll for a task attempt.
///
/// `observed` is `None` when the pod was not found. A terminal phase, once
/// derived, is cached in the state and reported on every later poll without
/// looking at the pod again.
pub fn reconcile(previous: Option<&CustomState>, observed: Option<&Pod>) -> Result<Reconciliation> {
    let prior = ObjectState::retrieve(previous)?;

    let status = match (observed, prior.status) {
        (Some(_), _) => ObjectStatus::Exists,
        (None, ObjectStatus::Unknown) => ObjectStatus::Unknown,
        (None, ObjectStatus::Exists | ObjectStatus::Deleted) => ObjectStatus::Deleted,
    };

    let phase = if prior.terminal_phase.is_terminal() {
        PhaseInfo::new(prior.terminal_phase)
    } else {
        match (observed, status) {
            (Some(pod), _) => pod_phase_info(pod),
            (None, ObjectStatus::Deleted) => PhaseInfo::retryable_failure(
                OBJECT_DELETED_CODE,
                "pod was deleted before reaching a terminal phase",
            )
            .with_error_kind(ErrorKind::System),
            (None, _) => PhaseInfo::undefined(),
        }
    };

    let terminal_phase = if phase.phase.is_terminal() {
        phase.phase
    } else {
        TaskPhase::Unknown
    };

    debug!(
        previous_status = %prior.status,
        status = %status,
        phase = %phase.phase,
        "Reconciled object status"
    );

    Ok(Reconciliation {
        phase,
        state: ObjectState::new(status, terminal_phase).store(),
    })
}

//! Object status tracking across polls.
//!
//! The caller owns an opaque per-attempt state bag and hands it back on
//! every poll. This module is the only reader and writer of the two entries
//! inside it. A bag is either absent (first poll) or holds both entries with
//! valid values; anything else is reported as corruption rather than
//! patched up.

use std::collections::HashMap;
use std::str::FromStr;

use podrun_core::{CoreError, ObjectStatus, TaskPhase};
use serde_json::Value;

use crate::error::{PilotError, Result};

/// Caller-owned state bag.
pub type CustomState = HashMap<String, Value>;

const STATUS_KEY: &str = "ObjectStatus";
const TERMINAL_TASK_PHASE_KEY: &str = "TerminalTaskPhase";

/// Everything persisted between polls for one task attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectState {
    /// Whether the backing object exists.
    pub status: ObjectStatus,

    /// Terminal phase once one has been derived, `Unknown` until then.
    pub terminal_phase: TaskPhase,
}

impl ObjectState {
    pub fn new(status: ObjectStatus, terminal_phase: TaskPhase) -> Self {
        Self {
            status,
            terminal_phase,
        }
    }

    /// Encode into a fresh state bag holding exactly the two entries.
    pub fn store(&self) -> CustomState {
        let mut state = CustomState::with_capacity(2);
        state.insert(STATUS_KEY.to_string(), Value::from(self.status.as_str()));
        state.insert(
            TERMINAL_TASK_PHASE_KEY.to_string(),
            Value::from(self.terminal_phase.as_str()),
        );
        state
    }

    /// Decode from a state bag.
    ///
    /// An absent bag decodes to `Unknown`/`Unknown`. A present bag must hold
    /// both entries as valid names; otherwise a [`PilotError::CorruptState`]
    /// carrying a dump of the bag is returned.
    pub fn retrieve(state: Option<&CustomState>) -> Result<Self> {
        let Some(state) = state else {
            return Ok(Self::default());
        };

        let decoded = decode_entry::<ObjectStatus>(state, STATUS_KEY).and_then(|status| {
            decode_entry::<TaskPhase>(state, TERMINAL_TASK_PHASE_KEY)
                .map(|phase| Self::new(status, phase))
        });

        decoded.map_err(|reason| PilotError::CorruptState {
            reason,
            dump: render_state(state),
        })
    }
}

/// Encode a status/phase pair into a fresh state bag.
pub fn store_object_status(status: ObjectStatus, phase: TaskPhase) -> CustomState {
    ObjectState::new(status, phase).store()
}

/// Decode a status/phase pair from a state bag.
pub fn retrieve_object_status(state: Option<&CustomState>) -> Result<(ObjectStatus, TaskPhase)> {
    let decoded = ObjectState::retrieve(state)?;
    Ok((decoded.status, decoded.terminal_phase))
}

fn decode_entry<T>(state: &CustomState, key: &str) -> std::result::Result<T, String>
where
    T: FromStr<Err = CoreError>,
{
    let value = state.get(key).ok_or_else(|| format!("missing {key}"))?;
    let name = value
        .as_str()
        .ok_or_else(|| format!("{key} is not a string"))?;
    name.parse().map_err(|e: CoreError| format!("{key}: {e}"))
}

/// One `key="value"` line per entry, sorted by key.
fn render_state(state: &CustomState) -> String {
    let mut keys: Vec<&String> = state.keys().collect();
    keys.sort();

    keys.into_iter()
        .map(|key| {
            let rendered = match &state[key] {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("{key}=\"{rendered}\"\n")
        })
        .collect()
}

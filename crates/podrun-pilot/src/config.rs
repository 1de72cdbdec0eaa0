//! CoPilot configuration.

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{PilotError, Result};

/// Configuration shared by the downloader and sidecar containers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoPilotConfig {
    /// Prefix prepended to the staging container names.
    pub name_prefix: String,

    /// Image of the staging binary.
    pub image: String,

    /// Where inputs land when the task does not say otherwise.
    pub default_input_path: String,

    /// Where outputs are read from when the task does not say otherwise.
    pub default_output_path: String,

    /// Name of the input scratch volume.
    pub input_volume_name: String,

    /// Name of the output scratch volume.
    pub output_volume_name: String,

    /// CPU request and limit of each staging container.
    pub cpu: String,

    /// Memory request and limit of each staging container.
    pub memory: String,

    /// How long the sidecar waits for the user container to start (seconds).
    pub start_timeout_secs: u64,
}

impl Default for CoPilotConfig {
    fn default() -> Self {
        Self {
            name_prefix: "copilot-".to_string(),
            image: "ghcr.io/filipelabs/podrun-copilot:v0.1.0".to_string(),
            default_input_path: "/var/podrun/inputs".to_string(),
            default_output_path: "/var/podrun/outputs".to_string(),
            input_volume_name: "podrun-inputs".to_string(),
            output_volume_name: "podrun-outputs".to_string(),
            cpu: "500m".to_string(),
            memory: "128Mi".to_string(),
            start_timeout_secs: 100,
        }
    }
}

impl CoPilotConfig {
    /// Sidecar start timeout as a Duration.
    pub fn start_timeout(&self) -> Duration {
        Duration::from_secs(self.start_timeout_secs)
    }

    /// Check that volume names are usable and distinct within a pod.
    pub fn validate(&self) -> Result<()> {
        if self.image.is_empty() {
            return Err(PilotError::InvalidConfig("image must not be empty".to_string()));
        }

        let names = [
            crate::pod::DATA_CONFIG_VOLUME,
            self.input_volume_name.as_str(),
            self.output_volume_name.as_str(),
        ];
        if names.iter().any(|n| n.is_empty()) {
            return Err(PilotError::InvalidConfig(
                "volume names must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name) {
                return Err(PilotError::InvalidConfig(format!(
                    "volume name '{name}' is used more than once"
                )));
            }
        }

        Ok(())
    }
}

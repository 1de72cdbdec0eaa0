//! Per-task data loading configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Format the staging binary writes input metadata in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetadataFormat {
    #[default]
    Json,
    Yaml,
    Proto,
}

impl MetadataFormat {
    /// Canonical upper-case name.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Proto => "PROTO",
        }
    }
}

impl fmt::Display for MetadataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}

impl FromStr for MetadataFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "JSON" => Ok(Self::Json),
            "YAML" => Ok(Self::Yaml),
            "PROTO" => Ok(Self::Proto),
            _ => Err(CoreError::UnknownMetadataFormat(s.to_string())),
        }
    }
}

/// Data loading settings for one task attempt.
///
/// When `enabled` is false the pod is left exactly as the plugin built it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLoadingConfig {
    /// Whether CoPilot staging is requested at all.
    #[serde(default)]
    pub enabled: bool,

    /// Local directory inputs are downloaded to. Empty means the default.
    #[serde(default)]
    pub input_path: Option<String>,

    /// Local directory outputs are uploaded from. Empty means the default.
    #[serde(default)]
    pub output_path: Option<String>,

    /// Metadata format for downloaded inputs.
    #[serde(default)]
    pub format: MetadataFormat,

    /// Overrides how long the sidecar waits for the user container to start.
    #[serde(default)]
    pub start_timeout_secs: Option<u64>,
}

impl DataLoadingConfig {
    /// Create an enabled config with all defaults.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Builder method to set the input path.
    pub fn with_input_path(mut self, path: impl Into<String>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Builder method to set the output path.
    pub fn with_output_path(mut self, path: impl Into<String>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Builder method to set the metadata format.
    pub fn with_format(mut self, format: MetadataFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder method to override the sidecar start timeout.
    pub fn with_start_timeout(mut self, timeout: Duration) -> Self {
        self.start_timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Input directory, falling back to `default` when unset or empty.
    pub fn resolve_input_path<'a>(&'a self, default: &'a str) -> &'a str {
        non_empty(self.input_path.as_deref()).unwrap_or(default)
    }

    /// Output directory, falling back to `default` when unset or empty.
    pub fn resolve_output_path<'a>(&'a self, default: &'a str) -> &'a str {
        non_empty(self.output_path.as_deref()).unwrap_or(default)
    }

    /// Sidecar start timeout, falling back to `default` when not overridden.
    pub fn resolve_start_timeout(&self, default: Duration) -> Duration {
        self.start_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(default)
    }
}

fn non_empty(path: Option<&str>) -> Option<&str> {
    path.filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_default() {
        assert!(!DataLoadingConfig::default().enabled);
        assert!(DataLoadingConfig::enabled().enabled);
    }

    #[test]
    fn test_resolve_paths() {
        let cfg = DataLoadingConfig::enabled();
        assert_eq!(cfg.resolve_input_path("/var/inputs"), "/var/inputs");
        assert_eq!(cfg.resolve_output_path("/var/outputs"), "/var/outputs");

        let cfg = cfg.with_input_path("/in").with_output_path("");
        assert_eq!(cfg.resolve_input_path("/var/inputs"), "/in");
        assert_eq!(cfg.resolve_output_path("/var/outputs"), "/var/outputs");
    }

    #[test]
    fn test_resolve_start_timeout() {
        let default = Duration::from_secs(100);
        let cfg = DataLoadingConfig::enabled();
        assert_eq!(cfg.resolve_start_timeout(default), default);

        let cfg = cfg.with_start_timeout(Duration::from_secs(30));
        assert_eq!(cfg.resolve_start_timeout(default), Duration::from_secs(30));
    }

    #[test]
    fn test_metadata_format_names() {
        assert_eq!(MetadataFormat::Yaml.to_string(), "YAML");
        assert_eq!("proto".parse::<MetadataFormat>(), Ok(MetadataFormat::Proto));
        assert!("xml".parse::<MetadataFormat>().is_err());

        let json = serde_json::to_string(&MetadataFormat::Json).unwrap();
        assert_eq!(json, r#""JSON""#);
    }
}

//! Core domain errors.

use thiserror::Error;

/// Core domain errors for PodRun.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// String does not name a task phase.
    #[error("Unknown task phase: {0}")]
    UnknownTaskPhase(String),

    /// String does not name an object status.
    #[error("Unknown object status: {0}")]
    UnknownObjectStatus(String),

    /// String does not name a metadata format.
    #[error("Unknown metadata format: {0}")]
    UnknownMetadataFormat(String),
}

//! Error types for pod injection and status tracking.

use thiserror::Error;

use crate::interface::InterfaceSide;

/// Errors returned by the CoPilot injector and the object status tracker.
#[derive(Debug, Error)]
pub enum PilotError {
    /// A resource quantity string could not be parsed.
    #[error("Invalid quantity for {field}: '{value}'")]
    InvalidQuantity { field: &'static str, value: String },

    /// The CoPilot configuration contradicts itself.
    #[error("Invalid CoPilot config: {0}")]
    InvalidConfig(String),

    /// Staging was requested for a side the interface does not declare.
    #[error("{side} interface is required for CoPilot staging")]
    MissingInterface { side: InterfaceSide },

    /// The interface could not be encoded for the command line.
    #[error("Failed to marshal given {side} interface: {source}")]
    Serialization {
        side: InterfaceSide,
        #[source]
        source: prost::EncodeError,
    },

    /// The persisted state bag does not hold a valid record.
    #[error("Invalid custom state ({reason}):\n{dump}")]
    CorruptState { reason: String, dump: String },
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, PilotError>;

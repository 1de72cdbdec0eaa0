//! PodRun Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - The cluster object model
//! - Storage clients
//! - Runtime specifics
//!
//! Everything the pod injector and the phase mapper agree on lives here.

pub mod data_loading;
pub mod error;
pub mod ids;
pub mod interface;
pub mod io;
pub mod phase;
pub mod status;

// Re-export commonly used types
pub use data_loading::{DataLoadingConfig, MetadataFormat};
pub use error::CoreError;
pub use ids::{DataReference, TaskExecutionId};
pub use interface::{
    BlobDimensionality, BlobType, LiteralType, SimpleType, TypedInterface, Variable, VariableMap,
};
pub use io::{InputFilePaths, OutputFilePaths, TaskPaths};
pub use phase::{ErrorKind, ExecutionError, PhaseInfo};
pub use status::{ObjectStatus, TaskPhase};

//! CoPilot injection and status tracking for PodRun
//!
//! This crate contains the parts of the runtime that touch the cluster
//! object model:
//! - Building the CoPilot staging containers and injecting them into a pod
//! - Persisting object status between reconciliation polls
//! - Mapping observed pod status to a task phase
//!
//! Nothing here performs I/O. Every function is a pure transformation of
//! its arguments or mutates a pod spec owned by the caller for the duration
//! of one call.
//!
//! # Example
//!
//! ```rust,no_run
//! use k8s_openapi::api::core::v1::PodSpec;
//! use podrun_core::{DataLoadingConfig, TaskExecutionId, TaskPaths, TypedInterface, VariableMap};
//! use podrun_pilot::{add_copilot_to_pod, CoPilotConfig, TaskMetadata};
//!
//! fn build(pod: &mut PodSpec) -> Result<(), podrun_pilot::PilotError> {
//!     let iface = TypedInterface::new(Some(VariableMap::default()), None);
//!     let metadata = TaskMetadata::new(TaskExecutionId::generate(), "default");
//!     let paths = TaskPaths::default();
//!
//!     add_copilot_to_pod(
//!         &CoPilotConfig::default(),
//!         pod,
//!         Some(&iface),
//!         &metadata,
//!         &paths,
//!         &paths,
//!         Some(&DataLoadingConfig::enabled()),
//!     )
//! }
//! ```

pub mod command;
pub mod config;
pub mod container;
pub mod copilot;
pub mod error;
pub mod interface;
pub mod metadata;
pub mod phase;
pub mod pod;
pub mod quantity;
pub mod reconcile;
pub mod state;

// Re-export main types
pub use command::{download_command_args, sidecar_command_args};
pub use config::CoPilotConfig;
pub use container::copilot_container;
pub use copilot::{add_copilot_to_container, add_copilot_to_pod};
pub use error::{PilotError, Result};
pub use interface::{serialize_interface, InterfaceSide};
pub use metadata::{TaskExecutionMetadata, TaskMetadata};
pub use phase::{pod_phase_info, status_phase_info, PodPhase};
pub use reconcile::{reconcile, Reconciliation};
pub use state::{retrieve_object_status, store_object_status, CustomState, ObjectState};

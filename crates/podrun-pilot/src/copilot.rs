//! CoPilot injection.
//!
//! Extends a plain task pod so that inputs are downloaded before the user
//! container starts and outputs are uploaded after it exits, without the
//! user container knowing anything about blob storage:
//!
//! - an init container (`downloader`) fills the input volume,
//! - a sidecar (`sidecar`) watches the user process through the shared
//!   process namespace and uploads the output volume once it exits.
//!
//! Injection is a single-application mutation. Applying it twice to the
//! same pod adds every container and volume twice.

use k8s_openapi::api::core::v1::{Container, PodSpec};
use podrun_core::{DataLoadingConfig, InputFilePaths, OutputFilePaths, TypedInterface};
use tracing::debug;

use crate::command::{download_command_args, sidecar_command_args};
use crate::config::CoPilotConfig;
use crate::container::{copilot_container, DOWNLOADER_CONTAINER_NAME, SIDECAR_CONTAINER_NAME};
use crate::error::Result;
use crate::metadata::TaskExecutionMetadata;
use crate::pod::{
    calculate_storage_size, data_config_mount, data_config_volume, data_volume, volume_mount,
    ContainerExt, PodSpecExt, PTRACE_CAPABILITY,
};

/// Inject the CoPilot staging containers and volumes into `pod`.
///
/// Does nothing when `pilot` is `None` or disabled. On error the pod may be
/// partially mutated and must be discarded.
pub fn add_copilot_to_pod(
    cfg: &CoPilotConfig,
    pod: &mut PodSpec,
    iface: Option<&TypedInterface>,
    metadata: &dyn TaskExecutionMetadata,
    input_paths: &dyn InputFilePaths,
    output_paths: &dyn OutputFilePaths,
    pilot: Option<&DataLoadingConfig>,
) -> Result<()> {
    let Some(pilot) = pilot.filter(|p| p.enabled) else {
        return Ok(());
    };
    cfg.validate()?;

    debug!(
        task = %metadata.task_execution_id(),
        namespace = metadata.namespace(),
        "Injecting CoPilot into pod"
    );

    pod.enable_process_namespace_sharing();

    let Some(iface) = iface else {
        return Ok(());
    };

    if iface.has_data() {
        pod.add_volume(data_config_volume());
    }

    let storage = calculate_storage_size(metadata.resource_overrides());

    if let Some(inputs) = iface.inputs.as_ref() {
        let in_path = pilot.resolve_input_path(&cfg.default_input_path);
        pod.add_volume(data_volume(&cfg.input_volume_name, storage.clone()));

        let args = download_command_args(
            &input_paths.input_path(),
            &output_paths.output_prefix_path(),
            in_path,
            pilot.format,
            Some(inputs),
        )?;
        let downloader = copilot_container(
            DOWNLOADER_CONTAINER_NAME,
            cfg,
            args,
            vec![volume_mount(&cfg.input_volume_name, in_path), data_config_mount()],
        )?;

        debug!(container = %downloader.name, path = in_path, "Adding CoPilot downloader");
        pod.add_init_container(downloader);
    }

    if let Some(outputs) = iface.outputs.as_ref() {
        let out_path = pilot.resolve_output_path(&cfg.default_output_path);
        pod.add_volume(data_volume(&cfg.output_volume_name, storage));

        let args = sidecar_command_args(
            out_path,
            &output_paths.output_prefix_path(),
            &output_paths.raw_output_prefix(),
            pilot.resolve_start_timeout(cfg.start_timeout()),
            Some(outputs),
        )?;
        let mut sidecar = copilot_container(
            SIDECAR_CONTAINER_NAME,
            cfg,
            args,
            vec![volume_mount(&cfg.output_volume_name, out_path), data_config_mount()],
        )?;
        sidecar.add_capability(PTRACE_CAPABILITY);

        debug!(container = %sidecar.name, path = out_path, "Adding CoPilot sidecar");
        pod.add_container(sidecar);
    }

    Ok(())
}

/// Mount the CoPilot volumes into an existing container.
///
/// Used when the user's own container reads staged inputs or writes
/// outputs. Grants the container process tracing and mounts the input and
/// output volumes at the resolved paths. Creates no volumes or containers.
pub fn add_copilot_to_container(
    cfg: &CoPilotConfig,
    container: &mut Container,
    iface: Option<&TypedInterface>,
    pilot: Option<&DataLoadingConfig>,
) {
    let Some(pilot) = pilot.filter(|p| p.enabled) else {
        return;
    };

    container.add_capability(PTRACE_CAPABILITY);

    let Some(iface) = iface else {
        return;
    };

    if iface.inputs.is_some() {
        let in_path = pilot.resolve_input_path(&cfg.default_input_path);
        container.add_volume_mount(volume_mount(&cfg.input_volume_name, in_path));
    }

    if iface.outputs.is_some() {
        let out_path = pilot.resolve_output_path(&cfg.default_output_path);
        container.add_volume_mount(volume_mount(&cfg.output_volume_name, out_path));
    }
}

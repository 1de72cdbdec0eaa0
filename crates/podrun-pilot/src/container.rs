//! Staging container construction.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{Container, ResourceRequirements, VolumeMount};

use crate::config::CoPilotConfig;
use crate::error::Result;
use crate::quantity::parse_quantity;

/// Name suffix of the init container that downloads inputs.
pub const DOWNLOADER_CONTAINER_NAME: &str = "downloader";

/// Name suffix of the sidecar that uploads outputs.
pub const SIDECAR_CONTAINER_NAME: &str = "sidecar";

/// Staging binary and its configuration glob.
const COPILOT_COMMAND: [&str; 3] = ["/bin/podrun-copilot", "--config", "/etc/podrun/config**/*"];

const PULL_IF_NOT_PRESENT: &str = "IfNotPresent";
const FALLBACK_TO_LOGS_ON_ERROR: &str = "FallbackToLogsOnError";

/// Build a staging container named `cfg.name_prefix + name`.
///
/// Requests equal limits so the staging process is never throttled below
/// what it declared. Fails before building anything if `cfg.cpu` or
/// `cfg.memory` is not a valid quantity.
pub fn copilot_container(
    name: &str,
    cfg: &CoPilotConfig,
    args: Vec<String>,
    volume_mounts: Vec<VolumeMount>,
) -> Result<Container> {
    let cpu = parse_quantity("cpu", &cfg.cpu)?;
    let memory = parse_quantity("memory", &cfg.memory)?;

    let resources: BTreeMap<String, _> = [("cpu".to_string(), cpu), ("memory".to_string(), memory)]
        .into_iter()
        .collect();

    Ok(Container {
        name: format!("{}{}", cfg.name_prefix, name),
        image: Some(cfg.image.clone()),
        command: Some(COPILOT_COMMAND.iter().map(|s| s.to_string()).collect()),
        args: Some(args),
        working_dir: Some("/".to_string()),
        resources: Some(ResourceRequirements {
            limits: Some(resources.clone()),
            requests: Some(resources),
            ..ResourceRequirements::default()
        }),
        volume_mounts: Some(volume_mounts),
        termination_message_policy: Some(FALLBACK_TO_LOGS_ON_ERROR.to_string()),
        image_pull_policy: Some(PULL_IF_NOT_PRESENT.to_string()),
        ..Container::default()
    })
}

//! Pod spec mutation helpers.
//!
//! Every helper appends. None of them checks for an existing entry, so
//! applying the same mutation twice yields duplicates: callers apply each
//! mutation exactly once per pod.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{
    Capabilities, ConfigMapVolumeSource, Container, EmptyDirVolumeSource, PodSpec,
    ResourceRequirements, SecurityContext, Volume, VolumeMount,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use tracing::trace;

/// Volume holding the staging binary's storage configuration.
pub const DATA_CONFIG_VOLUME: &str = "data-config-volume";

/// Mount path of [`DATA_CONFIG_VOLUME`].
pub const DATA_CONFIG_PATH: &str = "/etc/podrun/config-data";

/// Config map backing [`DATA_CONFIG_VOLUME`].
pub const DATA_CONFIG_MAP: &str = "podrun-data-config";

/// Capability that lets a container inspect other processes in the pod.
pub const PTRACE_CAPABILITY: &str = "SYS_PTRACE";

/// Resource names that size scratch volumes, most specific first.
const STORAGE_RESOURCES: [&str; 2] = ["ephemeral-storage", "storage"];

/// In-place, append-only mutations of a pod spec.
pub trait PodSpecExt {
    /// Let containers see each other's processes.
    fn enable_process_namespace_sharing(&mut self) -> &mut Self;

    /// Append a volume.
    fn add_volume(&mut self, volume: Volume) -> &mut Self;

    /// Append an init container after any existing ones.
    fn add_init_container(&mut self, container: Container) -> &mut Self;

    /// Append a regular container after any existing ones.
    fn add_container(&mut self, container: Container) -> &mut Self;
}

impl PodSpecExt for PodSpec {
    fn enable_process_namespace_sharing(&mut self) -> &mut Self {
        self.share_process_namespace = Some(true);
        self
    }

    fn add_volume(&mut self, volume: Volume) -> &mut Self {
        trace!(volume = %volume.name, "Adding volume to pod");
        self.volumes.get_or_insert_with(Vec::new).push(volume);
        self
    }

    fn add_init_container(&mut self, container: Container) -> &mut Self {
        trace!(container = %container.name, "Adding init container to pod");
        self.init_containers
            .get_or_insert_with(Vec::new)
            .push(container);
        self
    }

    fn add_container(&mut self, container: Container) -> &mut Self {
        trace!(container = %container.name, "Adding container to pod");
        self.containers.push(container);
        self
    }
}

/// In-place, append-only mutations of a single container.
pub trait ContainerExt {
    /// Grant a Linux capability.
    fn add_capability(&mut self, capability: &str) -> &mut Self;

    /// Append a volume mount.
    fn add_volume_mount(&mut self, mount: VolumeMount) -> &mut Self;
}

impl ContainerExt for Container {
    fn add_capability(&mut self, capability: &str) -> &mut Self {
        trace!(container = %self.name, capability, "Granting capability");
        self.security_context
            .get_or_insert_with(SecurityContext::default)
            .capabilities
            .get_or_insert_with(Capabilities::default)
            .add
            .get_or_insert_with(Vec::new)
            .push(capability.to_string());
        self
    }

    fn add_volume_mount(&mut self, mount: VolumeMount) -> &mut Self {
        self.volume_mounts.get_or_insert_with(Vec::new).push(mount);
        self
    }
}

/// Scratch volume on node-local storage, optionally size-limited.
pub fn data_volume(name: &str, size: Option<Quantity>) -> Volume {
    Volume {
        name: name.to_string(),
        empty_dir: Some(EmptyDirVolumeSource {
            medium: None,
            size_limit: size,
        }),
        ..Volume::default()
    }
}

/// Read-only volume with the staging binary's storage configuration.
pub fn data_config_volume() -> Volume {
    Volume {
        name: DATA_CONFIG_VOLUME.to_string(),
        config_map: Some(ConfigMapVolumeSource {
            name: Some(DATA_CONFIG_MAP.to_string()),
            ..ConfigMapVolumeSource::default()
        }),
        ..Volume::default()
    }
}

/// Mount of [`data_config_volume`].
pub fn data_config_mount() -> VolumeMount {
    VolumeMount {
        name: DATA_CONFIG_VOLUME.to_string(),
        mount_path: DATA_CONFIG_PATH.to_string(),
        read_only: Some(true),
        ..VolumeMount::default()
    }
}

/// Read-write mount of a named volume.
pub fn volume_mount(name: &str, mount_path: &str) -> VolumeMount {
    VolumeMount {
        name: name.to_string(),
        mount_path: mount_path.to_string(),
        ..VolumeMount::default()
    }
}

/// Storage size from the task's resource overrides.
///
/// Limits win over requests; `None` when neither names a storage resource.
pub fn calculate_storage_size(requirements: Option<&ResourceRequirements>) -> Option<Quantity> {
    let requirements = requirements?;
    storage_from(requirements.limits.as_ref())
        .or_else(|| storage_from(requirements.requests.as_ref()))
}

fn storage_from(resources: Option<&BTreeMap<String, Quantity>>) -> Option<Quantity> {
    let resources = resources?;
    STORAGE_RESOURCES
        .iter()
        .find_map(|name| resources.get(*name))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resources(pairs: &[(&str, &str)]) -> Option<BTreeMap<String, Quantity>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), Quantity(v.to_string())))
                .collect(),
        )
    }

    #[test]
    fn test_storage_size_prefers_limits() {
        let req = ResourceRequirements {
            limits: resources(&[("cpu", "1"), ("ephemeral-storage", "100M")]),
            requests: resources(&[("ephemeral-storage", "50M")]),
            ..ResourceRequirements::default()
        };
        assert_eq!(
            calculate_storage_size(Some(&req)),
            Some(Quantity("100M".to_string()))
        );
    }

    #[test]
    fn test_storage_size_falls_back_to_requests() {
        let req = ResourceRequirements {
            limits: resources(&[("cpu", "1")]),
            requests: resources(&[("storage", "50M")]),
            ..ResourceRequirements::default()
        };
        assert_eq!(
            calculate_storage_size(Some(&req)),
            Some(Quantity("50M".to_string()))
        );
    }

    #[test]
    fn test_storage_size_unsized() {
        assert_eq!(calculate_storage_size(None), None);
        assert_eq!(
            calculate_storage_size(Some(&ResourceRequirements::default())),
            None
        );
    }

    #[test]
    fn test_add_capability_creates_security_context() {
        let mut container = Container {
            name: "main".to_string(),
            ..Container::default()
        };
        container.add_capability(PTRACE_CAPABILITY);

        let added = container
            .security_context
            .and_then(|sc| sc.capabilities)
            .and_then(|caps| caps.add)
            .unwrap();
        assert_eq!(added, vec![PTRACE_CAPABILITY.to_string()]);
    }

    #[test]
    fn test_mutations_append() {
        let mut pod = PodSpec::default();
        pod.enable_process_namespace_sharing()
            .add_volume(data_config_volume())
            .add_volume(data_config_volume())
            .add_init_container(Container::default())
            .add_container(Container::default());

        assert_eq!(pod.share_process_namespace, Some(true));
        assert_eq!(pod.volumes.as_ref().map(Vec::len), Some(2));
        assert_eq!(pod.init_containers.as_ref().map(Vec::len), Some(1));
        assert_eq!(pod.containers.len(), 1);
    }

    #[test]
    fn test_data_config_mount_is_read_only() {
        let mount = data_config_mount();
        assert_eq!(mount.name, DATA_CONFIG_VOLUME);
        assert_eq!(mount.read_only, Some(true));
    }
}

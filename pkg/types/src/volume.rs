use serde::{Deserialize, Serialize};

use crate::meta::ObjectMeta;
use crate::quantity::Quantity;

/// Volume mount in a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    /// Name of the volume (must match a Volume in the pod spec)
    pub name: String,
    /// Path inside the container to mount the volume
    pub mount_path: String,
    /// Whether to mount read-only
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
}

/// Volume source: where the storage comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum VolumeSource {
    /// An empty directory created when the pod starts, deleted when it stops
    EmptyDir {},
    /// A persistent volume claim reference
    PersistentVolumeClaim { claim_name: String },
    /// A configmap projected as files
    ConfigMap { name: String },
    /// A secret projected as files
    Secret { secret_name: String },
}

/// Named volume in a pod spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub name: String,
    #[serde(flatten)]
    pub source: VolumeSource,
}

// --- Persistent volumes ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AccessMode {
    #[default]
    ReadWriteOnce,
    ReadOnlyMany,
    ReadWriteMany,
    ReadWriteOncePod,
}

impl AccessMode {
    /// Whether pods on more than one node may mount the volume read-write.
    pub fn allows_shared_writers(&self) -> bool {
        matches!(self, AccessMode::ReadWriteMany)
    }
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessMode::ReadWriteOnce => write!(f, "ReadWriteOnce"),
            AccessMode::ReadOnlyMany => write!(f, "ReadOnlyMany"),
            AccessMode::ReadWriteMany => write!(f, "ReadWriteMany"),
            AccessMode::ReadWriteOncePod => write!(f, "ReadWriteOncePod"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReclaimPolicy {
    #[default]
    Retain,
    Delete,
}

/// Storage amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageAmount {
    pub storage: Quantity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostPathVolumeSource {
    pub path: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub path_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeSpec {
    pub capacity: StorageAmount,
    pub access_modes: Vec<AccessMode>,
    pub persistent_volume_reclaim_policy: ReclaimPolicy,
    pub storage_class_name: String,
    pub host_path: HostPathVolumeSource,
}

/// Persistent Volume: a piece of storage provisioned on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistentVolume {
    pub metadata: ObjectMeta,
    pub spec: PersistentVolumeSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeResourceRequirements {
    pub requests: StorageAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeClaimSpec {
    pub access_modes: Vec<AccessMode>,
    /// Storage class name (e.g. "standard", "fast-ssd")
    pub storage_class_name: String,
    /// Pre-bound PersistentVolume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_name: Option<String>,
    pub resources: VolumeResourceRequirements,
}

/// Persistent Volume Claim: a request for storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistentVolumeClaim {
    pub metadata: ObjectMeta,
    pub spec: PersistentVolumeClaimSpec,
}

impl PersistentVolumeClaim {
    pub fn requested(&self) -> &Quantity {
        &self.spec.resources.requests.storage
    }
}

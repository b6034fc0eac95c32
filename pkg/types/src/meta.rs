use pkg_constants::api;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::labels::Labels;

/// Every kind the generator knows about, declared in apply order.
///
/// `StorageClass` is never emitted; it only appears as the target of a
/// reference edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Namespace,
    ServiceAccount,
    Role,
    RoleBinding,
    PersistentVolume,
    PersistentVolumeClaim,
    ConfigMap,
    Secret,
    Deployment,
    Service,
    Ingress,
    NetworkPolicy,
    StorageClass,
}

impl ResourceKind {
    pub fn api_version(&self) -> &'static str {
        match self {
            ResourceKind::Namespace
            | ResourceKind::ServiceAccount
            | ResourceKind::PersistentVolume
            | ResourceKind::PersistentVolumeClaim
            | ResourceKind::ConfigMap
            | ResourceKind::Secret
            | ResourceKind::Service => api::CORE_V1,
            ResourceKind::Role | ResourceKind::RoleBinding => api::RBAC_V1,
            ResourceKind::Deployment => api::APPS_V1,
            ResourceKind::Ingress | ResourceKind::NetworkPolicy => api::NETWORKING_V1,
            ResourceKind::StorageClass => "storage.k8s.io/v1",
        }
    }

    pub fn is_namespaced(&self) -> bool {
        !matches!(
            self,
            ResourceKind::Namespace | ResourceKind::PersistentVolume | ResourceKind::StorageClass
        )
    }

    /// Lowercase form used in file names.
    pub fn slug(&self) -> String {
        self.to_string().to_ascii_lowercase()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Namespace => "Namespace",
            ResourceKind::ServiceAccount => "ServiceAccount",
            ResourceKind::Role => "Role",
            ResourceKind::RoleBinding => "RoleBinding",
            ResourceKind::PersistentVolume => "PersistentVolume",
            ResourceKind::PersistentVolumeClaim => "PersistentVolumeClaim",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::Service => "Service",
            ResourceKind::Ingress => "Ingress",
            ResourceKind::NetworkPolicy => "NetworkPolicy",
            ResourceKind::StorageClass => "StorageClass",
        };
        f.pad(s)
    }
}

/// Identity of an object: kind, optional namespace, name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub kind: ResourceKind,
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: String,
}

impl ObjectRef {
    pub fn namespaced(kind: ResourceKind, namespace: &str, name: &str) -> Self {
        Self {
            kind,
            namespace: Some(namespace.to_string()),
            name: name.to_string(),
        }
    }

    pub fn cluster(kind: ResourceKind, name: &str) -> Self {
        Self {
            kind,
            namespace: None,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}/{}", self.kind, ns, self.name),
            None => write!(f, "{}/{}", self.kind, self.name),
        }
    }
}

/// Standard object metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: Labels,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    pub fn namespaced(name: &str, namespace: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        }
    }

    pub fn cluster(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_annotation(mut self, key: &str, value: &str) -> Self {
        self.annotations.insert(key.to_string(), value.to_string());
        self
    }
}

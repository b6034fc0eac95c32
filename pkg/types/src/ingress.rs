use serde::{Deserialize, Serialize};

use crate::meta::ObjectMeta;

/// Path matching type for Ingress rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathType {
    #[default]
    Prefix,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBackendPort {
    pub number: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngressServiceBackend {
    pub name: String,
    pub port: ServiceBackendPort,
}

/// Backend service target for an Ingress path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngressBackend {
    pub service: IngressServiceBackend,
}

impl IngressBackend {
    pub fn to_service(name: &str, port: u16) -> Self {
        Self {
            service: IngressServiceBackend {
                name: name.to_string(),
                port: ServiceBackendPort { number: port },
            },
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service.name
    }

    pub fn service_port(&self) -> u16 {
        self.service.port.number
    }
}

/// A single path rule within an Ingress HTTP rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressPath {
    pub path: String,
    #[serde(default)]
    pub path_type: PathType,
    pub backend: IngressBackend,
}

/// HTTP rules for a host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngressHTTP {
    pub paths: Vec<IngressPath>,
}

/// A single host-based Ingress rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngressRule {
    pub host: String,
    pub http: IngressHTTP,
}

/// TLS configuration for an Ingress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressTLS {
    pub hosts: Vec<String>,
    pub secret_name: String,
}

/// Ingress specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tls: Vec<IngressTLS>,
    pub rules: Vec<IngressRule>,
}

/// Ingress resource for external traffic routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingress {
    pub metadata: ObjectMeta,
    pub spec: IngressSpec,
}

impl Ingress {
    pub fn backends(&self) -> impl Iterator<Item = &IngressBackend> {
        self.spec
            .rules
            .iter()
            .flat_map(|r| r.http.paths.iter())
            .map(|p| &p.backend)
    }

    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.spec.rules.iter().map(|r| r.host.as_str())
    }
}

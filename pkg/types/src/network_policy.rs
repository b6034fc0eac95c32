use serde::{Deserialize, Serialize};

use crate::labels::LabelSelector;
use crate::meta::ObjectMeta;
use crate::pod::Protocol;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PolicyType {
    Ingress,
    Egress,
}

/// CIDR block peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpBlock {
    pub cidr: String,
}

/// A peer in a network policy (pod selector, namespace selector or CIDR).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPolicyPeer {
    /// Match pods with these labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_selector: Option<LabelSelector>,
    /// Match namespaces with these labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_selector: Option<LabelSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_block: Option<IpBlock>,
}

/// A port in a network policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkPolicyPort {
    pub protocol: Protocol,
    pub port: u16,
}

impl NetworkPolicyPort {
    pub fn tcp(port: u16) -> Self {
        Self {
            protocol: Protocol::TCP,
            port,
        }
    }

    pub fn udp(port: u16) -> Self {
        Self {
            protocol: Protocol::UDP,
            port,
        }
    }
}

/// Inbound traffic rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkPolicyIngressRule {
    /// Source peers allowed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub from: Vec<NetworkPolicyPeer>,
    /// Ports allowed
    #[serde(default)]
    pub ports: Vec<NetworkPolicyPort>,
}

/// Outbound traffic rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkPolicyEgressRule {
    /// Destination peers allowed; empty means any destination
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<NetworkPolicyPeer>,
    /// Ports allowed
    #[serde(default)]
    pub ports: Vec<NetworkPolicyPort>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPolicySpec {
    /// Pods this policy applies to; empty selects every pod in the namespace
    pub pod_selector: LabelSelector,
    /// Which traffic directions this policy controls
    pub policy_types: Vec<PolicyType>,
    #[serde(default)]
    pub ingress: Vec<NetworkPolicyIngressRule>,
    #[serde(default)]
    pub egress: Vec<NetworkPolicyEgressRule>,
}

/// Network policy controlling ingress/egress traffic for pods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkPolicy {
    pub metadata: ObjectMeta,
    pub spec: NetworkPolicySpec,
}

impl NetworkPolicy {
    /// Whether some egress rule lets traffic out on `port`.
    pub fn allows_egress_port(&self, port: u16) -> bool {
        self.spec
            .egress
            .iter()
            .any(|rule| rule.ports.iter().any(|p| p.port == port))
    }
}

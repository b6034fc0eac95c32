//! Ingress and NetworkPolicy.

use pkg_constants::{labels as keys, network};
use pkg_types::ingress::{
    Ingress, IngressBackend, IngressHTTP, IngressPath, IngressRule, IngressSpec, IngressTLS,
    PathType,
};
use pkg_types::labels::{LabelSelector, Labels};
use pkg_types::meta::ObjectMeta;
use pkg_types::network_policy::{
    IpBlock, NetworkPolicy, NetworkPolicyEgressRule, NetworkPolicyIngressRule, NetworkPolicyPeer,
    NetworkPolicyPort, NetworkPolicySpec, PolicyType,
};
use pkg_types::object::ResourceObject;
use std::net::IpAddr;

use crate::plan::BuildPlan;

/// Ingress for the configured host, or `None` when no host is set.
pub fn ingress(plan: &BuildPlan) -> Option<ResourceObject> {
    let host = plan.config.ingress_host()?;

    let mut metadata = ObjectMeta::namespaced(plan.name(), plan.namespace())
        .with_labels(plan.common_labels.clone());
    if let Some(issuer) = &plan.config.cluster_issuer {
        metadata = metadata.with_annotation(keys::CERT_MANAGER_CLUSTER_ISSUER, issuer);
    }

    let tls = plan
        .tls_secret_name()
        .map(|secret_name| IngressTLS {
            hosts: vec![host.to_string()],
            secret_name,
        })
        .into_iter()
        .collect();

    Some(ResourceObject::Ingress(Ingress {
        metadata,
        spec: IngressSpec {
            ingress_class_name: plan.config.ingress_class_name.clone(),
            tls,
            rules: vec![IngressRule {
                host: host.to_string(),
                http: IngressHTTP {
                    paths: vec![IngressPath {
                        path: "/".to_string(),
                        path_type: PathType::Prefix,
                        backend: IngressBackend::to_service(plan.name(), network::WIKI_SERVICE_PORT),
                    }],
                },
            }],
        },
    }))
}

/// Default-deny for the Wiki.js pods with the few flows they need.
pub fn network_policy(plan: &BuildPlan) -> ResourceObject {
    let ingress_from = if plan.config.ingress_host().is_some() {
        let mut ns = Labels::new();
        ns.insert(
            keys::NAMESPACE_NAME.to_string(),
            plan.config.ingress_controller_namespace.clone(),
        );
        NetworkPolicyPeer {
            namespace_selector: Some(LabelSelector::new(ns)),
            ..Default::default()
        }
    } else {
        NetworkPolicyPeer {
            pod_selector: Some(LabelSelector::everything()),
            ..Default::default()
        }
    };

    let mut egress = vec![
        NetworkPolicyEgressRule {
            to: vec![],
            ports: vec![
                NetworkPolicyPort::udp(network::DNS_PORT),
                NetworkPolicyPort::tcp(network::DNS_PORT),
            ],
        },
        NetworkPolicyEgressRule {
            to: vec![],
            ports: vec![NetworkPolicyPort::tcp(network::HTTPS_PORT)],
        },
    ];
    if let Some(db) = plan.config.database.as_ref().filter(|_| plan.is_postgres()) {
        let to = db
            .host
            .as_deref()
            .and_then(|h| h.trim().parse::<IpAddr>().ok())
            .map(|ip| NetworkPolicyPeer {
                ip_block: Some(IpBlock {
                    cidr: match ip {
                        IpAddr::V4(_) => format!("{}/32", ip),
                        IpAddr::V6(_) => format!("{}/128", ip),
                    },
                }),
                ..Default::default()
            })
            .into_iter()
            .collect();
        egress.push(NetworkPolicyEgressRule {
            to,
            ports: vec![NetworkPolicyPort::tcp(db.port)],
        });
    }

    ResourceObject::NetworkPolicy(NetworkPolicy {
        metadata: ObjectMeta::namespaced(plan.name(), plan.namespace())
            .with_labels(plan.common_labels.clone()),
        spec: NetworkPolicySpec {
            pod_selector: LabelSelector::new(plan.selector_labels.clone()),
            policy_types: vec![PolicyType::Ingress, PolicyType::Egress],
            ingress: vec![NetworkPolicyIngressRule {
                from: vec![ingress_from],
                ports: vec![NetworkPolicyPort::tcp(network::WIKI_CONTAINER_PORT)],
            }],
            egress,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::config::{DatabaseMode, DeploymentConfig, PostgresConfig, SecretKeyRefConfig};

    fn policy(cfg: &DeploymentConfig) -> NetworkPolicy {
        let plan = BuildPlan::new(cfg).unwrap();
        match network_policy(&plan) {
            ResourceObject::NetworkPolicy(p) => p,
            other => panic!("expected NetworkPolicy, got {}", other.kind()),
        }
    }

    #[test]
    fn no_host_no_ingress() {
        let cfg = DeploymentConfig {
            ingress_host: Some(String::new()),
            ..Default::default()
        };
        let plan = BuildPlan::new(&cfg).unwrap();
        assert!(ingress(&plan).is_none());
    }

    #[test]
    fn ingress_with_issuer_gets_tls() {
        let cfg = DeploymentConfig {
            ingress_host: Some("wiki.example.com".to_string()),
            cluster_issuer: Some("letsencrypt-prod".to_string()),
            ..Default::default()
        };
        let plan = BuildPlan::new(&cfg).unwrap();
        let Some(ResourceObject::Ingress(ing)) = ingress(&plan) else {
            panic!("expected Ingress");
        };
        assert_eq!(
            ing.metadata.annotations[keys::CERT_MANAGER_CLUSTER_ISSUER],
            "letsencrypt-prod"
        );
        assert_eq!(ing.spec.tls[0].secret_name, "wikijs-tls");
        assert_eq!(ing.spec.tls[0].hosts, vec!["wiki.example.com"]);
        let backend = ing.backends().next().unwrap();
        assert_eq!((backend.service_name(), backend.service_port()), ("wikijs", 80));
    }

    #[test]
    fn ingress_without_tls() {
        let cfg = DeploymentConfig {
            ingress_host: Some("wiki.example.com".to_string()),
            ..Default::default()
        };
        let plan = BuildPlan::new(&cfg).unwrap();
        let Some(ResourceObject::Ingress(ing)) = ingress(&plan) else {
            panic!("expected Ingress");
        };
        assert!(ing.spec.tls.is_empty());
        assert!(ing.metadata.annotations.is_empty());
    }

    #[test]
    fn sqlite_policy_has_no_database_egress() {
        let p = policy(&DeploymentConfig::default());
        assert!(p.allows_egress_port(53));
        assert!(p.allows_egress_port(443));
        assert!(!p.allows_egress_port(5432));
    }

    #[test]
    fn postgres_policy_opens_database_port() {
        let cfg = DeploymentConfig {
            database_mode: DatabaseMode::Postgres,
            database: Some(PostgresConfig {
                host: Some("10.1.2.3".to_string()),
                port: 6432,
                ..Default::default()
            }),
            db_credentials_secret_ref: Some(SecretKeyRefConfig {
                name: "wiki-db".to_string(),
                username_key: "username".to_string(),
                password_key: "password".to_string(),
            }),
            ..Default::default()
        };
        let p = policy(&cfg);
        assert!(p.allows_egress_port(6432));
        let db_rule = p.spec.egress.last().unwrap();
        assert_eq!(
            db_rule.to[0].ip_block.as_ref().unwrap().cidr,
            "10.1.2.3/32"
        );
    }

    #[test]
    fn ingress_traffic_from_controller_namespace() {
        let cfg = DeploymentConfig {
            ingress_host: Some("wiki.example.com".to_string()),
            ..Default::default()
        };
        let p = policy(&cfg);
        let peer = &p.spec.ingress[0].from[0];
        let ns = peer.namespace_selector.as_ref().unwrap();
        assert_eq!(ns.match_labels[keys::NAMESPACE_NAME], "ingress-nginx");
    }
}

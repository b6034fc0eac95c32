use pkg_generate::{ClusterProfile, DeploymentConfig, check, generate};
use pkg_types::config::parse_config;
use pkg_types::labels::{Labels, is_subset};
use pkg_types::meta::ResourceKind;
use pkg_types::object::ResourceObject;
use pkg_types::volume::AccessMode;
use proptest::prelude::*;

const WIKI_YAML: &str = r#"
namespace: wikijs
databaseMode: sqlite
storageSize: 5Gi
ingressHost: wiki.example.com
cpuRequest: 100m
memRequest: 256Mi
cpuLimit: 500m
memLimit: 512Mi
"#;

fn profile() -> ClusterProfile {
    ClusterProfile {
        storage_classes: vec!["standard".to_string()],
        ..Default::default()
    }
}

fn wiki() -> DeploymentConfig {
    parse_config(WIKI_YAML).unwrap()
}

#[test]
fn sqlite_wiki_end_to_end() {
    let bundle = check(&wiki(), &profile()).unwrap();
    for kind in [
        ResourceKind::Namespace,
        ResourceKind::PersistentVolumeClaim,
        ResourceKind::Deployment,
        ResourceKind::Service,
        ResourceKind::Ingress,
        ResourceKind::ServiceAccount,
        ResourceKind::Role,
        ResourceKind::RoleBinding,
        ResourceKind::NetworkPolicy,
    ] {
        assert_eq!(bundle.count(kind), 1, "{}", kind);
    }

    for object in &bundle.objects {
        match object {
            ResourceObject::PersistentVolumeClaim(pvc) => {
                assert_eq!(pvc.spec.resources.requests.storage.as_str(), "5Gi");
                assert_eq!(pvc.spec.access_modes, vec![AccessMode::ReadWriteOnce]);
            }
            ResourceObject::Deployment(deploy) => {
                assert_eq!(deploy.spec.replicas, 1);
                let resources = &deploy.spec.template.spec.containers[0].resources;
                assert_eq!(resources.requests.cpu.as_str(), "100m");
                assert_eq!(resources.requests.memory.as_str(), "256Mi");
                assert_eq!(resources.limits.cpu.as_str(), "500m");
                assert_eq!(resources.limits.memory.as_str(), "512Mi");
            }
            ResourceObject::Ingress(ingress) => {
                assert_eq!(ingress.hosts().collect::<Vec<_>>(), ["wiki.example.com"]);
            }
            _ => {}
        }
    }

    let rendered = generate(&wiki(), &profile()).unwrap();
    assert_eq!(rendered.len(), bundle.len());
    let docs: Vec<serde_yaml::Value> = rendered
        .documents
        .iter()
        .map(|d| serde_yaml::from_str(&d.yaml).unwrap())
        .collect();
    assert_eq!(docs.first().unwrap()["kind"].as_str(), Some("Namespace"));
    assert_eq!(docs.last().unwrap()["kind"].as_str(), Some("NetworkPolicy"));
}

#[test]
fn postgres_without_credentials_fails_before_output() {
    let mut config = wiki();
    config.database_mode = pkg_types::config::DatabaseMode::Postgres;
    let err = generate(&config, &profile()).unwrap_err();
    assert_eq!(err.kind_name(), "MissingReference");
    assert_eq!(err.field(), "dbCredentialsSecretRef");
    assert_eq!(err.object().kind, ResourceKind::Deployment);
}

#[test]
fn postgres_opens_database_egress() {
    let config: DeploymentConfig = parse_config(
        r#"
namespace: wikijs
databaseMode: postgres
database:
  host: 10.0.0.5
  port: 6432
dbCredentialsSecretRef:
  name: wiki-db
"#,
    )
    .unwrap();
    let bundle = check(&config, &profile()).unwrap();
    assert!(bundle.is_external(&pkg_types::meta::ObjectRef::namespaced(
        ResourceKind::Secret,
        "wikijs",
        "wiki-db"
    )));
    let allows = bundle.objects.iter().any(|o| match o {
        ResourceObject::NetworkPolicy(np) => np.allows_egress_port(6432),
        _ => false,
    });
    assert!(allows);
}

#[test]
fn generation_is_byte_identical() {
    let a = generate(&wiki(), &profile()).unwrap().to_stream();
    let b = generate(&wiki(), &profile()).unwrap().to_stream();
    assert_eq!(a, b);
}

#[test]
fn empty_ingress_host_omits_ingress() {
    let mut config = wiki();
    config.ingress_host = Some(String::new());
    let bundle = check(&config, &profile()).unwrap();
    assert_eq!(bundle.count(ResourceKind::Ingress), 0);
    let stream = generate(&config, &profile()).unwrap().to_stream();
    assert!(!stream.contains("kind: Ingress"));
}

#[test]
fn non_positive_storage_size_fails() {
    for size in ["0", "0Gi", "-1Gi"] {
        let mut config = wiki();
        config.storage_size = size.to_string();
        let err = generate(&config, &profile()).unwrap_err();
        assert_eq!(err.kind_name(), "InvalidField", "{}", size);
        assert_eq!(err.field(), "storageSize");
    }
}

#[test]
fn unknown_config_keys_are_rejected() {
    let yaml = format!("{}\nstorageClas: fast\n", WIKI_YAML);
    assert!(parse_config::<DeploymentConfig>(&yaml).is_err());
}

fn pod_labels(bundle: &pkg_types::bundle::Bundle) -> Labels {
    bundle.deployments().next().unwrap().pod_labels().clone()
}

proptest! {
    #[test]
    fn sqlite_never_scales(replicas in proptest::option::of(0u32..6)) {
        let mut config = wiki();
        config.replicas = replicas;
        match check(&config, &profile()) {
            Ok(bundle) => {
                prop_assert!(replicas.unwrap_or(0) <= 1);
                prop_assert_eq!(bundle.deployments().next().unwrap().spec.replicas, 1);
            }
            Err(err) => {
                prop_assert!(replicas.unwrap_or(0) > 1);
                prop_assert_eq!(err.kind_name(), "ConfigConflict");
            }
        }
    }

    #[test]
    fn selectors_are_subsets_of_pod_labels(
        extra in proptest::collection::btree_map("[a-z]{1,8}", "[a-z0-9]{1,8}", 0..5)
    ) {
        let mut config = wiki();
        config.labels = extra;
        let bundle = check(&config, &profile()).unwrap();
        let pods = pod_labels(&bundle);
        for object in &bundle.objects {
            match object {
                ResourceObject::Service(svc) => {
                    prop_assert!(!svc.spec.selector.is_empty());
                    prop_assert!(is_subset(&svc.spec.selector, &pods));
                }
                ResourceObject::NetworkPolicy(np) => {
                    prop_assert!(is_subset(&np.spec.pod_selector.match_labels, &pods));
                }
                _ => {}
            }
        }
    }

    #[test]
    fn roles_stay_read_only(
        verbs in proptest::collection::vec(
            prop_oneof![Just("get"), Just("list"), Just("watch"), Just("create"), Just("delete"), Just("*")],
            1..4,
        ),
        resources in proptest::collection::vec(
            prop_oneof![Just("configmaps"), Just("secrets"), Just("pods"), Just("*")],
            1..3,
        ),
    ) {
        let mut config = wiki();
        config.rbac_rules = Some(vec![pkg_types::rbac::PolicyRule {
            api_groups: vec![String::new()],
            resources: resources.iter().map(|s| s.to_string()).collect(),
            verbs: verbs.iter().map(|s| s.to_string()).collect(),
        }]);
        match check(&config, &profile()) {
            Ok(bundle) => {
                for object in &bundle.objects {
                    if let ResourceObject::Role(role) = object {
                        for rule in &role.rules {
                            prop_assert!(rule.verbs.iter().all(|v| ["get", "list", "watch"].contains(&v.as_str())));
                            prop_assert!(rule.resources.iter().all(|r| ["configmaps", "secrets"].contains(&r.as_str())));
                        }
                    }
                }
            }
            Err(err) => prop_assert_eq!(err.kind_name(), "ExcessivePermission"),
        }
    }
}

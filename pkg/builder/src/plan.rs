//! Checks a [`DeploymentConfig`] and derives everything the object
//! constructors need: names, labels, parsed quantities, replica count.

use pkg_constants::labels as keys;
use pkg_types::config::{DatabaseMode, DeploymentConfig};
use pkg_types::error::{GenerateError, Result};
use pkg_types::labels::Labels;
use pkg_types::meta::{ObjectRef, ResourceKind};
use pkg_types::pod::{ResourceList, ResourceRequirements};
use pkg_types::quantity::Quantity;
use pkg_types::validate::{
    validate_data_key, validate_dns_subdomain, validate_host_path, validate_label_key,
    validate_label_value, validate_name,
};
use tracing::warn;

const RESERVED_LABELS: &[&str] = &[
    keys::APP_NAME,
    keys::APP_INSTANCE,
    keys::APP_COMPONENT,
    keys::MANAGED_BY,
];

/// Validated, derived view of one configuration.
#[derive(Debug, Clone)]
pub struct BuildPlan<'a> {
    pub config: &'a DeploymentConfig,
    pub replicas: u32,
    pub storage: Quantity,
    pub resources: ResourceRequirements,
    /// Labels on every namespaced object.
    pub common_labels: Labels,
    /// Labels that identify the Wiki.js pods; used by every selector.
    pub selector_labels: Labels,
    /// Labels on the pod template; a superset of `selector_labels`.
    pub pod_labels: Labels,
}

impl<'a> BuildPlan<'a> {
    pub fn new(config: &'a DeploymentConfig) -> Result<Self> {
        let namespace_ref = ObjectRef::cluster(ResourceKind::Namespace, &config.namespace);
        validate_name(&config.namespace)
            .map_err(|e| GenerateError::invalid_field(&namespace_ref, "namespace", e))?;

        let deploy_ref = ObjectRef::namespaced(ResourceKind::Deployment, &config.namespace, &config.name);
        validate_name(&config.name)
            .map_err(|e| GenerateError::invalid_field(&deploy_ref, "name", e))?;
        validate_image(&config.image)
            .map_err(|reason| GenerateError::invalid_field(&deploy_ref, "image", reason))?;

        for (key, value) in &config.labels {
            validate_label_key(key)
                .and_then(|_| validate_label_value(value))
                .map_err(|e| GenerateError::invalid_field(&deploy_ref, "labels", e))?;
            if RESERVED_LABELS.contains(&key.as_str()) {
                return Err(GenerateError::invalid_field(
                    &deploy_ref,
                    "labels",
                    format!("label key '{}' is managed by the generator", key),
                ));
            }
        }

        let resources = ResourceRequirements {
            requests: ResourceList {
                cpu: parse_quantity(&deploy_ref, "cpuRequest", &config.cpu_request)?,
                memory: parse_quantity(&deploy_ref, "memRequest", &config.mem_request)?,
            },
            limits: ResourceList {
                cpu: parse_quantity(&deploy_ref, "cpuLimit", &config.cpu_limit)?,
                memory: parse_quantity(&deploy_ref, "memLimit", &config.mem_limit)?,
            },
        };

        let pvc_ref = ObjectRef::namespaced(
            ResourceKind::PersistentVolumeClaim,
            &config.namespace,
            &data_claim_name(&config.name),
        );
        let storage = parse_quantity(&pvc_ref, "storageSize", &config.storage_size)?;
        if !storage.is_positive() {
            return Err(GenerateError::invalid_field(
                &pvc_ref,
                "storageSize",
                format!("must be greater than zero (got {})", storage),
            ));
        }
        validate_name(&config.storage_class)
            .map_err(|e| GenerateError::invalid_field(&pvc_ref, "storageClass", e))?;

        let pv_ref = ObjectRef::cluster(
            ResourceKind::PersistentVolume,
            &data_volume_name(&config.namespace, &config.name),
        );
        validate_host_path(&config.persistent_volume.host_path)
            .map_err(|e| GenerateError::invalid_field(&pv_ref, "persistentVolume.hostPath", e))?;

        let secret_ref = ObjectRef::namespaced(
            ResourceKind::Secret,
            &config.namespace,
            &data_secret_name(&config.name),
        );
        for key in config.secret_data.keys() {
            validate_data_key(key)
                .map_err(|e| GenerateError::invalid_field(&secret_ref, "secretData", e))?;
        }

        let ingress_ref = ObjectRef::namespaced(ResourceKind::Ingress, &config.namespace, &config.name);
        if let Some(host) = config.ingress_host() {
            validate_dns_subdomain(host)
                .map_err(|e| GenerateError::invalid_field(&ingress_ref, "ingressHost", e))?;
            // Becomes a namespaceSelector label value on the NetworkPolicy.
            let policy_ref =
                ObjectRef::namespaced(ResourceKind::NetworkPolicy, &config.namespace, &config.name);
            validate_name(&config.ingress_controller_namespace).map_err(|e| {
                GenerateError::invalid_field(&policy_ref, "ingressControllerNamespace", e)
            })?;
        }
        if let Some(tls) = config.tls_secret_name() {
            validate_name(tls)
                .map_err(|e| GenerateError::invalid_field(&ingress_ref, "tlsSecretName", e))?;
        }

        let replicas = resolve_replicas(config, &deploy_ref)?;
        check_database(config, &deploy_ref)?;

        let mut selector_labels = Labels::new();
        selector_labels.insert(keys::APP_NAME.to_string(), keys::APP_NAME_VALUE.to_string());
        selector_labels.insert(keys::APP_INSTANCE.to_string(), config.name.clone());

        let mut common_labels = config.labels.clone();
        common_labels.extend(selector_labels.clone());
        common_labels.insert(keys::MANAGED_BY.to_string(), keys::MANAGED_BY_VALUE.to_string());

        let mut pod_labels = common_labels.clone();
        pod_labels.insert(keys::APP_COMPONENT.to_string(), "wiki".to_string());

        Ok(Self {
            config,
            replicas,
            storage,
            resources,
            common_labels,
            selector_labels,
            pod_labels,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn is_postgres(&self) -> bool {
        self.config.database_mode == DatabaseMode::Postgres
    }

    // --- object names ---

    pub fn service_account_name(&self) -> String {
        self.config.name.clone()
    }

    pub fn role_name(&self) -> String {
        format!("{}-config-reader", self.config.name)
    }

    pub fn volume_name(&self) -> String {
        data_volume_name(&self.config.namespace, &self.config.name)
    }

    pub fn claim_name(&self) -> String {
        data_claim_name(&self.config.name)
    }

    pub fn config_map_name(&self) -> String {
        format!("{}-config", self.config.name)
    }

    pub fn secret_name(&self) -> String {
        data_secret_name(&self.config.name)
    }

    /// TLS secret for the Ingress: explicit name, or derived when a
    /// cert-manager issuer will create it.
    pub fn tls_secret_name(&self) -> Option<String> {
        match (self.config.tls_secret_name(), &self.config.cluster_issuer) {
            (Some(name), _) => Some(name.to_string()),
            (None, Some(_)) => Some(format!("{}-tls", self.config.name)),
            (None, None) => None,
        }
    }

    pub fn object_ref(&self, kind: ResourceKind, name: &str) -> ObjectRef {
        if kind.is_namespaced() {
            ObjectRef::namespaced(kind, self.namespace(), name)
        } else {
            ObjectRef::cluster(kind, name)
        }
    }
}

fn data_claim_name(name: &str) -> String {
    format!("{}-data", name)
}

fn data_volume_name(namespace: &str, name: &str) -> String {
    format!("{}-{}-data", namespace, name)
}

fn data_secret_name(name: &str) -> String {
    format!("{}-secrets", name)
}

fn parse_quantity(object: &ObjectRef, field: &str, raw: &str) -> Result<Quantity> {
    Quantity::parse(raw).map_err(|e| GenerateError::invalid_field(object, field, e))
}

/// Rejects empty references and shell/whitespace characters.
fn validate_image(image: &str) -> std::result::Result<(), String> {
    if image.trim().is_empty() {
        return Err("image must not be empty".to_string());
    }
    if let Some(c) = image
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, ';' | '&' | '|' | '`' | '$'))
    {
        return Err(format!("image '{}' contains forbidden character {:?}", image, c));
    }
    if image.starts_with('-') || image.starts_with('.') {
        return Err(format!("image '{}' must not start with '-' or '.'", image));
    }
    Ok(())
}

/// SQLite tolerates one writer: replicas is always 1, and asking for more is
/// an error rather than a silent override.
fn resolve_replicas(config: &DeploymentConfig, deploy_ref: &ObjectRef) -> Result<u32> {
    match config.database_mode {
        DatabaseMode::Sqlite => match config.replicas {
            Some(n) if n > 1 => Err(GenerateError::ConfigConflict {
                object: deploy_ref.clone(),
                field: "replicas".to_string(),
                reason: format!(
                    "databaseMode sqlite supports a single writer; replicas must be 1 (got {})",
                    n
                ),
            }),
            Some(0) => {
                warn!(
                    "Deployment {}: replicas 0 with sqlite clamped to 1",
                    deploy_ref
                );
                Ok(1)
            }
            _ => Ok(1),
        },
        DatabaseMode::Postgres => {
            let replicas = config.replicas.unwrap_or(1);
            if replicas > 1 && !config.storage_access_mode.allows_shared_writers() {
                return Err(GenerateError::ConfigConflict {
                    object: deploy_ref.clone(),
                    field: "storageAccessMode".to_string(),
                    reason: format!(
                        "{} replicas cannot share a {} volume; use ReadWriteMany",
                        replicas, config.storage_access_mode
                    ),
                });
            }
            Ok(replicas)
        }
    }
}

fn check_database(config: &DeploymentConfig, deploy_ref: &ObjectRef) -> Result<()> {
    if config.database_mode != DatabaseMode::Postgres {
        return Ok(());
    }

    let Some(creds) = &config.db_credentials_secret_ref else {
        return Err(GenerateError::MissingReference {
            object: deploy_ref.clone(),
            field: "dbCredentialsSecretRef".to_string(),
            reason: "databaseMode is postgres".to_string(),
        });
    };
    validate_name(&creds.name)
        .map_err(|e| GenerateError::invalid_field(deploy_ref, "dbCredentialsSecretRef.name", e))?;

    let host = config
        .database
        .as_ref()
        .and_then(|db| db.host.as_deref())
        .map(str::trim)
        .unwrap_or_default();
    if host.is_empty() {
        let cm_ref = ObjectRef::namespaced(
            ResourceKind::ConfigMap,
            &config.namespace,
            &format!("{}-config", config.name),
        );
        return Err(GenerateError::MissingReference {
            object: cm_ref,
            field: "database.host".to_string(),
            reason: "databaseMode is postgres".to_string(),
        });
    }

    Ok(())
}

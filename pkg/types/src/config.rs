use pkg_constants::{network, paths, workload};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rbac::PolicyRule;
use crate::volume::{AccessMode, ReclaimPolicy};

/// Database backend Wiki.js is configured for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseMode {
    /// Embedded SQLite file on the data volume; single writer only.
    #[default]
    Sqlite,
    /// External PostgreSQL server.
    Postgres,
}

impl std::fmt::Display for DatabaseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseMode::Sqlite => write!(f, "sqlite"),
            DatabaseMode::Postgres => write!(f, "postgres"),
        }
    }
}

/// Connection settings for `databaseMode: postgres`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PostgresConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_postgres_port")]
    pub port: u16,
    #[serde(default = "default_postgres_database")]
    pub name: String,
    #[serde(default)]
    pub ssl: bool,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_postgres_port(),
            name: default_postgres_database(),
            ssl: false,
        }
    }
}

fn default_postgres_port() -> u16 {
    network::DEFAULT_POSTGRES_PORT
}

fn default_postgres_database() -> String {
    workload::DEFAULT_POSTGRES_DATABASE.to_string()
}

/// Reference to the Secret holding database credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretKeyRefConfig {
    pub name: String,
    #[serde(default = "default_username_key", alias = "username-key")]
    pub username_key: String,
    #[serde(default = "default_password_key", alias = "password-key")]
    pub password_key: String,
}

fn default_username_key() -> String {
    workload::DEFAULT_DB_USERNAME_KEY.to_string()
}

fn default_password_key() -> String {
    workload::DEFAULT_DB_PASSWORD_KEY.to_string()
}

/// Node-local storage backing the PersistentVolume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersistentVolumeConfig {
    #[serde(default = "default_host_path", alias = "host-path")]
    pub host_path: String,
    #[serde(default, alias = "reclaim-policy")]
    pub reclaim_policy: ReclaimPolicy,
}

impl Default for PersistentVolumeConfig {
    fn default() -> Self {
        Self {
            host_path: default_host_path(),
            reclaim_policy: ReclaimPolicy::default(),
        }
    }
}

fn default_host_path() -> String {
    paths::DEFAULT_HOST_PATH.to_string()
}

/// Deployment configuration file (YAML). The single input to generation.
///
/// Example `wiki.yaml`:
/// ```yaml
/// namespace: wikijs
/// databaseMode: sqlite
/// storageSize: 5Gi
/// ingressHost: wiki.example.com
/// cpuRequest: 100m
/// memRequest: 256Mi
/// cpuLimit: 500m
/// memLimit: 512Mi
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeploymentConfig {
    /// Base name for every object in the bundle.
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_image")]
    pub image: String,
    /// Replica hint; clamped to 1 for sqlite.
    #[serde(default)]
    pub replicas: Option<u32>,
    #[serde(default = "default_storage_size", alias = "storage-size")]
    pub storage_size: String,
    #[serde(default = "default_storage_class", alias = "storage-class")]
    pub storage_class: String,
    #[serde(default, alias = "storage-access-mode")]
    pub storage_access_mode: AccessMode,
    #[serde(default, alias = "persistent-volume")]
    pub persistent_volume: PersistentVolumeConfig,
    /// Host served by the Ingress; empty or absent means no Ingress.
    #[serde(default, alias = "ingress-host")]
    pub ingress_host: Option<String>,
    #[serde(default = "default_ingress_class", alias = "ingress-class-name")]
    pub ingress_class_name: Option<String>,
    /// cert-manager ClusterIssuer annotated on the Ingress.
    #[serde(default, alias = "cluster-issuer")]
    pub cluster_issuer: Option<String>,
    #[serde(default, alias = "tls-secret-name")]
    pub tls_secret_name: Option<String>,
    #[serde(default, alias = "database-mode")]
    pub database_mode: DatabaseMode,
    #[serde(default)]
    pub database: Option<PostgresConfig>,
    #[serde(default, alias = "db-credentials-secret-ref")]
    pub db_credentials_secret_ref: Option<SecretKeyRefConfig>,
    #[serde(default = "default_cpu_request", alias = "cpu-request")]
    pub cpu_request: String,
    #[serde(default = "default_mem_request", alias = "mem-request")]
    pub mem_request: String,
    #[serde(default = "default_cpu_limit", alias = "cpu-limit")]
    pub cpu_limit: String,
    #[serde(default = "default_mem_limit", alias = "mem-limit")]
    pub mem_limit: String,
    /// Extra labels applied to every object and the pod template.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Entries written to the generated Secret.
    #[serde(default, alias = "secret-data")]
    pub secret_data: BTreeMap<String, String>,
    /// Role rules; defaults to read-only access to configmaps and secrets.
    #[serde(default, alias = "rbac-rules")]
    pub rbac_rules: Option<Vec<PolicyRule>>,
    #[serde(
        default = "default_ingress_controller_namespace",
        alias = "ingress-controller-namespace"
    )]
    pub ingress_controller_namespace: String,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            namespace: default_namespace(),
            image: default_image(),
            replicas: None,
            storage_size: default_storage_size(),
            storage_class: default_storage_class(),
            storage_access_mode: AccessMode::default(),
            persistent_volume: PersistentVolumeConfig::default(),
            ingress_host: None,
            ingress_class_name: default_ingress_class(),
            cluster_issuer: None,
            tls_secret_name: None,
            database_mode: DatabaseMode::default(),
            database: None,
            db_credentials_secret_ref: None,
            cpu_request: default_cpu_request(),
            mem_request: default_mem_request(),
            cpu_limit: default_cpu_limit(),
            mem_limit: default_mem_limit(),
            labels: BTreeMap::new(),
            secret_data: BTreeMap::new(),
            rbac_rules: None,
            ingress_controller_namespace: default_ingress_controller_namespace(),
        }
    }
}

impl DeploymentConfig {
    /// Ingress host, treating an empty string as absent.
    pub fn ingress_host(&self) -> Option<&str> {
        self.ingress_host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }

    pub fn tls_secret_name(&self) -> Option<&str> {
        self.tls_secret_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn default_name() -> String {
    workload::DEFAULT_NAME.to_string()
}
fn default_namespace() -> String {
    workload::DEFAULT_NAMESPACE.to_string()
}
fn default_image() -> String {
    workload::DEFAULT_IMAGE.to_string()
}
fn default_storage_size() -> String {
    workload::DEFAULT_STORAGE_SIZE.to_string()
}
fn default_storage_class() -> String {
    workload::DEFAULT_STORAGE_CLASS.to_string()
}
fn default_ingress_class() -> Option<String> {
    Some(network::DEFAULT_INGRESS_CLASS.to_string())
}
fn default_cpu_request() -> String {
    workload::DEFAULT_CPU_REQUEST.to_string()
}
fn default_mem_request() -> String {
    workload::DEFAULT_MEMORY_REQUEST.to_string()
}
fn default_cpu_limit() -> String {
    workload::DEFAULT_CPU_LIMIT.to_string()
}
fn default_mem_limit() -> String {
    workload::DEFAULT_MEMORY_LIMIT.to_string()
}
fn default_ingress_controller_namespace() -> String {
    network::DEFAULT_INGRESS_CONTROLLER_NAMESPACE.to_string()
}

/// What the caller knows about the target cluster (YAML).
///
/// Example `cluster.yaml`:
/// ```yaml
/// storageClasses: [standard, fast-ssd]
/// assumeExternal: false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClusterProfile {
    /// Storage classes known to exist in the cluster.
    #[serde(default, alias = "storage-classes")]
    pub storage_classes: Vec<String>,
    /// Accept any storage class name as provisioned outside this bundle.
    #[serde(default, alias = "assume-external")]
    pub assume_external: bool,
}

impl ClusterProfile {
    pub fn knows_storage_class(&self, name: &str) -> bool {
        self.assume_external || self.storage_classes.iter().any(|s| s == name)
    }
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(path: &str) -> anyhow::Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };
    parse_config(&content)
}

/// Load a YAML config file that must exist.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config<T: serde::de::DeserializeOwned>(content: &str) -> anyhow::Result<T> {
    let config: T = serde_yaml::from_str(content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let cfg: DeploymentConfig = parse_config("namespace: docs\n").unwrap();
        assert_eq!(cfg.namespace, "docs");
        assert_eq!(cfg.name, "wikijs");
        assert_eq!(cfg.database_mode, DatabaseMode::Sqlite);
        assert_eq!(cfg.storage_access_mode, AccessMode::ReadWriteOnce);
        assert_eq!(cfg.ingress_class_name.as_deref(), Some("nginx"));
        assert!(cfg.ingress_host().is_none());
    }

    #[test]
    fn full_postgres_config() {
        let yaml = r#"
namespace: wikijs
databaseMode: postgres
storageSize: 10Gi
ingressHost: wiki.example.com
tlsSecretName: wiki-tls
database:
  host: db.internal
  port: 6432
dbCredentialsSecretRef:
  name: wiki-db
cpuRequest: 250m
memRequest: 512Mi
cpuLimit: "1"
memLimit: 1Gi
labels:
  team: docs
"#;
        let cfg: DeploymentConfig = parse_config(yaml).unwrap();
        assert_eq!(cfg.database_mode, DatabaseMode::Postgres);
        let db = cfg.database.as_ref().unwrap();
        assert_eq!(db.host.as_deref(), Some("db.internal"));
        assert_eq!(db.port, 6432);
        assert_eq!(db.name, "wiki");
        let creds = cfg.db_credentials_secret_ref.as_ref().unwrap();
        assert_eq!(creds.username_key, "username");
        assert_eq!(cfg.tls_secret_name(), Some("wiki-tls"));
        assert_eq!(cfg.labels.get("team").map(String::as_str), Some("docs"));
    }

    #[test]
    fn kebab_aliases_are_accepted() {
        let cfg: DeploymentConfig =
            parse_config("storage-size: 1Gi\ningress-host: docs.example.com\n").unwrap();
        assert_eq!(cfg.storage_size, "1Gi");
        assert_eq!(cfg.ingress_host(), Some("docs.example.com"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: anyhow::Result<DeploymentConfig> = parse_config("replica: 3\n");
        assert!(res.is_err());
    }

    #[test]
    fn empty_ingress_host_is_absent() {
        let cfg: DeploymentConfig = parse_config("ingressHost: \"\"\n").unwrap();
        assert!(cfg.ingress_host().is_none());
    }

    #[test]
    fn cluster_profile() {
        let profile: ClusterProfile = parse_config("storageClasses: [standard]\n").unwrap();
        assert!(profile.knows_storage_class("standard"));
        assert!(!profile.knows_storage_class("fast"));
        let open = ClusterProfile {
            assume_external: true,
            ..Default::default()
        };
        assert!(open.knows_storage_class("anything"));
    }

    #[test]
    fn missing_profile_file_is_default() {
        let profile: ClusterProfile =
            load_config_file("/nonexistent/wikigen/cluster.yaml").unwrap();
        assert_eq!(profile, ClusterProfile::default());
    }
}

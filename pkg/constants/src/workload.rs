//! Workload defaults.

/// Default object base name.
pub const DEFAULT_NAME: &str = "wikijs";

/// Default namespace.
pub const DEFAULT_NAMESPACE: &str = "wikijs";

/// Default Wiki.js image.
pub const DEFAULT_IMAGE: &str = "ghcr.io/requarks/wiki:2";

/// Name of the single container in the pod template.
pub const CONTAINER_NAME: &str = "wiki";

/// Name of the pod volume backed by the PVC.
pub const DATA_VOLUME_NAME: &str = "data";

/// Default PVC size.
pub const DEFAULT_STORAGE_SIZE: &str = "5Gi";

/// Default storage class.
pub const DEFAULT_STORAGE_CLASS: &str = "standard";

pub const DEFAULT_CPU_REQUEST: &str = "100m";
pub const DEFAULT_MEMORY_REQUEST: &str = "256Mi";
pub const DEFAULT_CPU_LIMIT: &str = "500m";
pub const DEFAULT_MEMORY_LIMIT: &str = "512Mi";

/// UID/GID the Wiki.js image runs as.
pub const WIKI_USER_ID: i64 = 1000;

/// Default postgres database name.
pub const DEFAULT_POSTGRES_DATABASE: &str = "wiki";

/// Default keys in the database credentials secret.
pub const DEFAULT_DB_USERNAME_KEY: &str = "username";
pub const DEFAULT_DB_PASSWORD_KEY: &str = "password";

/// Initial delay before probing Wiki.js, which runs migrations on boot.
pub const PROBE_INITIAL_DELAY_SECS: u32 = 30;

/// Probe period.
pub const PROBE_PERIOD_SECS: u32 = 10;

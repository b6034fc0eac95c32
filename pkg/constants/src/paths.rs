//! Filesystem path constants.

// ─── Container ────────────────────────────────────────────────────────────

/// Mount point of the persistent data volume inside the Wiki.js container.
pub const WIKI_DATA_PATH: &str = "/wiki/data";

/// SQLite database file on the data volume.
pub const SQLITE_DB_FILE: &str = "/wiki/data/db.sqlite";

/// HTTP path answered by Wiki.js health checks.
pub const HEALTH_PATH: &str = "/healthz";

// ─── Node ─────────────────────────────────────────────────────────────────

/// Default hostPath backing the PersistentVolume.
pub const DEFAULT_HOST_PATH: &str = "/mnt/data/wikijs";

// ─── CLI ──────────────────────────────────────────────────────────────────

/// Default deployment config file read by `wikigenctl`.
pub const DEFAULT_CONFIG_FILE: &str = "wiki.yaml";

/// Default cluster profile file read by `wikigenctl`.
pub const DEFAULT_CLUSTER_FILE: &str = "cluster.yaml";

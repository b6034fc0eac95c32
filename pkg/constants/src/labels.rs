//! Well-known label and annotation keys.

/// Application name label shared by every object in the bundle.
pub const APP_NAME: &str = "app.kubernetes.io/name";

/// Instance label; one value per generated bundle.
pub const APP_INSTANCE: &str = "app.kubernetes.io/instance";

/// Component label (e.g. `wiki`, `storage`).
pub const APP_COMPONENT: &str = "app.kubernetes.io/component";

/// Tool that produced the manifests.
pub const MANAGED_BY: &str = "app.kubernetes.io/managed-by";

/// Value written under [`MANAGED_BY`].
pub const MANAGED_BY_VALUE: &str = "wikigen";

/// Value written under [`APP_NAME`].
pub const APP_NAME_VALUE: &str = "wikijs";

/// Label the API server puts on every Namespace; used by NetworkPolicy peers.
pub const NAMESPACE_NAME: &str = "kubernetes.io/metadata.name";

/// cert-manager annotation selecting the issuer for an Ingress certificate.
pub const CERT_MANAGER_CLUSTER_ISSUER: &str = "cert-manager.io/cluster-issuer";

/// Maximum length of a label value and of the name part of a label key.
pub const MAX_LABEL_LENGTH: usize = 63;

/// Maximum length of a label key prefix (a DNS subdomain).
pub const MAX_LABEL_PREFIX_LENGTH: usize = 253;

//! Network-related constants.

/// Port Wiki.js listens on inside the container.
pub const WIKI_CONTAINER_PORT: u16 = 3000;

/// Port exposed by the ClusterIP Service.
pub const WIKI_SERVICE_PORT: u16 = 80;

/// Name shared by the container port and the Service port.
pub const HTTP_PORT_NAME: &str = "http";

/// Default port of an external PostgreSQL server.
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Cluster DNS port; egress to it is always allowed.
pub const DNS_PORT: u16 = 53;

/// Outbound HTTPS (update checks, storage/auth modules).
pub const HTTPS_PORT: u16 = 443;

/// Namespace the ingress controller runs in by default.
pub const DEFAULT_INGRESS_CONTROLLER_NAMESPACE: &str = "ingress-nginx";

/// Default `ingressClassName`.
pub const DEFAULT_INGRESS_CLASS: &str = "nginx";

/// In-cluster API server address used as the ArgoCD destination.
pub const IN_CLUSTER_SERVER: &str = "https://kubernetes.default.svc";

/// Namespace ArgoCD Applications live in.
pub const ARGOCD_NAMESPACE: &str = "argocd";

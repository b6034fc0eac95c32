//! `apiVersion` strings for every emitted kind.

/// Core group: Namespace, ConfigMap, Secret, PV, PVC, Service, ServiceAccount.
pub const CORE_V1: &str = "v1";

/// Deployment.
pub const APPS_V1: &str = "apps/v1";

/// Ingress and NetworkPolicy.
pub const NETWORKING_V1: &str = "networking.k8s.io/v1";

/// Role and RoleBinding.
pub const RBAC_V1: &str = "rbac.authorization.k8s.io/v1";

/// API group used in a RoleBinding `roleRef`.
pub const RBAC_GROUP: &str = "rbac.authorization.k8s.io";

/// ArgoCD Application.
pub const ARGOCD_V1ALPHA1: &str = "argoproj.io/v1alpha1";

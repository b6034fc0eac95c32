use serde::Serialize;

use crate::configmap::ConfigMap;
use crate::deployment::Deployment;
use crate::ingress::Ingress;
use crate::meta::{ObjectMeta, ObjectRef, ResourceKind};
use crate::namespace::Namespace;
use crate::network_policy::NetworkPolicy;
use crate::rbac::{Role, RoleBinding, ServiceAccount};
use crate::reference::ReferenceEdge;
use crate::secret::Secret;
use crate::service::Service;
use crate::volume::{PersistentVolume, PersistentVolumeClaim};

/// One Kubernetes object of a known kind.
///
/// Serializes as the bare body (`metadata`, `spec`, ...); `apiVersion` and
/// `kind` are added by the renderer from [`ResourceObject::kind`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceObject {
    Namespace(Namespace),
    ConfigMap(ConfigMap),
    Secret(Secret),
    PersistentVolume(PersistentVolume),
    PersistentVolumeClaim(PersistentVolumeClaim),
    Deployment(Deployment),
    Service(Service),
    Ingress(Ingress),
    ServiceAccount(ServiceAccount),
    Role(Role),
    RoleBinding(RoleBinding),
    NetworkPolicy(NetworkPolicy),
}

impl ResourceObject {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceObject::Namespace(_) => ResourceKind::Namespace,
            ResourceObject::ConfigMap(_) => ResourceKind::ConfigMap,
            ResourceObject::Secret(_) => ResourceKind::Secret,
            ResourceObject::PersistentVolume(_) => ResourceKind::PersistentVolume,
            ResourceObject::PersistentVolumeClaim(_) => ResourceKind::PersistentVolumeClaim,
            ResourceObject::Deployment(_) => ResourceKind::Deployment,
            ResourceObject::Service(_) => ResourceKind::Service,
            ResourceObject::Ingress(_) => ResourceKind::Ingress,
            ResourceObject::ServiceAccount(_) => ResourceKind::ServiceAccount,
            ResourceObject::Role(_) => ResourceKind::Role,
            ResourceObject::RoleBinding(_) => ResourceKind::RoleBinding,
            ResourceObject::NetworkPolicy(_) => ResourceKind::NetworkPolicy,
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            ResourceObject::Namespace(o) => &o.metadata,
            ResourceObject::ConfigMap(o) => &o.metadata,
            ResourceObject::Secret(o) => &o.metadata,
            ResourceObject::PersistentVolume(o) => &o.metadata,
            ResourceObject::PersistentVolumeClaim(o) => &o.metadata,
            ResourceObject::Deployment(o) => &o.metadata,
            ResourceObject::Service(o) => &o.metadata,
            ResourceObject::Ingress(o) => &o.metadata,
            ResourceObject::ServiceAccount(o) => &o.metadata,
            ResourceObject::Role(o) => &o.metadata,
            ResourceObject::RoleBinding(o) => &o.metadata,
            ResourceObject::NetworkPolicy(o) => &o.metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata().name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata().namespace.as_deref()
    }

    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            kind: self.kind(),
            namespace: self.metadata().namespace.clone(),
            name: self.metadata().name.clone(),
        }
    }

    /// Every by-name reference this object makes to another object.
    ///
    /// Label selector bindings are not edges; they are matched separately.
    pub fn references(&self) -> Vec<ReferenceEdge> {
        let me = self.object_ref();
        let mut edges = Vec::new();

        let ns = self.namespace().unwrap_or_default();
        if let Some(namespace) = self.namespace() {
            edges.push(ReferenceEdge::new(
                &me,
                "metadata.namespace",
                ObjectRef::cluster(ResourceKind::Namespace, namespace),
            ));
        }

        match self {
            ResourceObject::PersistentVolume(pv) => {
                edges.push(ReferenceEdge::new(
                    &me,
                    "spec.storageClassName",
                    ObjectRef::cluster(ResourceKind::StorageClass, &pv.spec.storage_class_name),
                ));
            }
            ResourceObject::PersistentVolumeClaim(pvc) => {
                edges.push(ReferenceEdge::new(
                    &me,
                    "spec.storageClassName",
                    ObjectRef::cluster(ResourceKind::StorageClass, &pvc.spec.storage_class_name),
                ));
                if let Some(volume) = &pvc.spec.volume_name {
                    edges.push(ReferenceEdge::new(
                        &me,
                        "spec.volumeName",
                        ObjectRef::cluster(ResourceKind::PersistentVolume, volume),
                    ));
                }
            }
            ResourceObject::Deployment(deploy) => {
                let pod = &deploy.spec.template.spec;
                edges.push(ReferenceEdge::new(
                    &me,
                    "spec.template.spec.serviceAccountName",
                    ObjectRef::namespaced(ResourceKind::ServiceAccount, ns, &pod.service_account_name),
                ));
                for claim in pod.claim_refs() {
                    edges.push(ReferenceEdge::new(
                        &me,
                        "spec.template.spec.volumes.persistentVolumeClaim",
                        ObjectRef::namespaced(ResourceKind::PersistentVolumeClaim, ns, claim),
                    ));
                }
                for cm in pod.config_map_refs() {
                    edges.push(ReferenceEdge::new(
                        &me,
                        "spec.template.spec.containers.envFrom.configMapRef",
                        ObjectRef::namespaced(ResourceKind::ConfigMap, ns, cm),
                    ));
                }
                for secret in pod.secret_refs() {
                    edges.push(ReferenceEdge::new(
                        &me,
                        "spec.template.spec.containers.secretRef",
                        ObjectRef::namespaced(ResourceKind::Secret, ns, secret),
                    ));
                }
            }
            ResourceObject::Ingress(ingress) => {
                for backend in ingress.backends() {
                    edges.push(ReferenceEdge::new(
                        &me,
                        "spec.rules.http.paths.backend.service",
                        ObjectRef::namespaced(ResourceKind::Service, ns, backend.service_name()),
                    ));
                }
                for tls in &ingress.spec.tls {
                    edges.push(ReferenceEdge::new(
                        &me,
                        "spec.tls.secretName",
                        ObjectRef::namespaced(ResourceKind::Secret, ns, &tls.secret_name),
                    ));
                }
            }
            ResourceObject::RoleBinding(binding) => {
                edges.push(ReferenceEdge::new(
                    &me,
                    "roleRef",
                    ObjectRef::namespaced(ResourceKind::Role, ns, &binding.role_ref.name),
                ));
                for subject in &binding.subjects {
                    let subject_ns = subject.namespace.as_deref().unwrap_or(ns);
                    edges.push(ReferenceEdge::new(
                        &me,
                        "subjects",
                        ObjectRef::namespaced(ResourceKind::ServiceAccount, subject_ns, &subject.name),
                    ));
                }
            }
            _ => {}
        }

        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::{RoleRef, Subject, SubjectKind};

    #[test]
    fn role_binding_edges() {
        let binding = ResourceObject::RoleBinding(RoleBinding {
            metadata: ObjectMeta::namespaced("wiki", "wikijs"),
            role_ref: RoleRef {
                api_group: "rbac.authorization.k8s.io".to_string(),
                kind: "Role".to_string(),
                name: "wiki-reader".to_string(),
            },
            subjects: vec![Subject {
                kind: SubjectKind::ServiceAccount,
                name: "wiki".to_string(),
                namespace: Some("wikijs".to_string()),
            }],
        });

        let targets: Vec<String> = binding
            .references()
            .into_iter()
            .map(|e| e.to.to_string())
            .collect();
        assert_eq!(
            targets,
            vec![
                "Namespace/wikijs",
                "Role/wikijs/wiki-reader",
                "ServiceAccount/wikijs/wiki",
            ]
        );
    }

    #[test]
    fn cluster_scoped_object_has_no_namespace_edge() {
        let ns = ResourceObject::Namespace(Namespace {
            metadata: ObjectMeta::cluster("wikijs"),
        });
        assert!(ns.references().is_empty());
        assert_eq!(ns.object_ref().to_string(), "Namespace/wikijs");
    }
}

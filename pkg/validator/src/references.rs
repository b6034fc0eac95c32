use pkg_types::bundle::Bundle;
use pkg_types::error::{GenerateError, Result};
use pkg_types::meta::{ObjectRef, ResourceKind};
use pkg_types::object::ResourceObject;

/// Every edge target is in the bundle or declared external.
///
/// Storage classes are never part of the bundle; they are resolved against
/// the cluster profile by [`crate::storage`].
pub fn check_edges(bundle: &Bundle) -> Result<()> {
    for object in &bundle.objects {
        for edge in object.references() {
            if edge.to.kind == ResourceKind::StorageClass {
                continue;
            }
            if !bundle.contains(&edge.to) && !bundle.is_external(&edge.to) {
                return Err(GenerateError::DanglingReference {
                    object: edge.from,
                    field: edge.field.to_string(),
                    target: edge.to,
                });
            }
        }
    }
    Ok(())
}

/// Every Ingress backend names a Service in the bundle and one of its ports.
pub fn check_ingress_backends(bundle: &Bundle) -> Result<()> {
    for object in bundle.of_kind(ResourceKind::Ingress) {
        let ResourceObject::Ingress(ingress) = object else {
            continue;
        };
        let namespace = object.namespace().unwrap_or_default();
        for backend in ingress.backends() {
            let target =
                ObjectRef::namespaced(ResourceKind::Service, namespace, backend.service_name());
            let exposes = match bundle.find(&target) {
                Some(ResourceObject::Service(svc)) => svc.exposes_port(backend.service_port()),
                _ => false,
            };
            if !exposes {
                return Err(GenerateError::DanglingReference {
                    object: object.object_ref(),
                    field: format!(
                        "spec.rules.http.paths.backend.service.port.number ({})",
                        backend.service_port()
                    ),
                    target,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn built_bundle_has_no_dangling_edges() {
        assert!(check_edges(&fixtures::bundle()).is_ok());
    }

    #[test]
    fn binding_to_missing_account_is_dangling() {
        let mut bundle = fixtures::bundle();
        fixtures::edit(&mut bundle, |o| {
            if let ResourceObject::RoleBinding(rb) = o {
                rb.subjects[0].name = "ghost".to_string();
            }
        });
        let err = check_edges(&bundle).unwrap_err();
        assert_eq!(err.kind_name(), "DanglingReference");
        assert_eq!(err.field(), "subjects");
        assert_eq!(err.object().kind, ResourceKind::RoleBinding);
    }

    #[test]
    fn ingress_to_unknown_port_is_dangling() {
        let mut bundle = fixtures::bundle();
        fixtures::edit(&mut bundle, |o| {
            if let ResourceObject::Ingress(ing) = o {
                ing.spec.rules[0].http.paths[0].backend.service.port.number = 8080;
            }
        });
        assert!(check_edges(&bundle).is_ok());
        let err = check_ingress_backends(&bundle).unwrap_err();
        assert_eq!(err.kind_name(), "DanglingReference");
        assert!(err.field().contains("8080"));
    }

    #[test]
    fn ingress_to_unknown_service_is_dangling() {
        let mut bundle = fixtures::bundle();
        fixtures::edit(&mut bundle, |o| {
            if let ResourceObject::Ingress(ing) = o {
                ing.spec.rules[0].http.paths[0].backend.service.name = "other".to_string();
            }
        });
        let err = check_edges(&bundle).unwrap_err();
        assert_eq!(err.field(), "spec.rules.http.paths.backend.service");
        assert!(check_ingress_backends(&bundle).is_err());
    }

    #[test]
    fn declared_external_satisfies_edge() {
        let mut bundle = fixtures::bundle();
        fixtures::edit(&mut bundle, |o| {
            if let ResourceObject::Deployment(d) = o {
                d.spec.template.spec.service_account_name = "shared".to_string();
            }
        });
        assert!(check_edges(&bundle).is_err());
        bundle.declare_external(ObjectRef::namespaced(
            ResourceKind::ServiceAccount,
            "wikijs",
            "shared",
        ));
        assert!(check_edges(&bundle).is_ok());
    }
}

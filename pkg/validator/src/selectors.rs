use pkg_types::bundle::Bundle;
use pkg_types::error::{GenerateError, Result};
use pkg_types::labels::{Labels, is_subset};
use pkg_types::object::ResourceObject;

/// Whether some Deployment in `namespace` has a pod template matching
/// `selector`.
fn binds_pods(bundle: &Bundle, namespace: Option<&str>, selector: &Labels) -> bool {
    bundle
        .deployments()
        .filter(|d| d.metadata.namespace.as_deref() == namespace)
        .any(|d| is_subset(selector, d.pod_labels()))
}

/// Service selectors must select the pods of a Deployment in the bundle.
/// An empty selector is rejected: it selects nothing the bundle manages.
pub fn check_service_selectors(bundle: &Bundle) -> Result<()> {
    for object in &bundle.objects {
        let ResourceObject::Service(svc) = object else {
            continue;
        };
        let selector = &svc.spec.selector;
        if selector.is_empty() || !binds_pods(bundle, object.namespace(), selector) {
            return Err(GenerateError::SelectorMismatch {
                object: object.object_ref(),
                field: "spec.selector".to_string(),
            });
        }
    }
    Ok(())
}

/// NetworkPolicy pod selectors must be empty (every pod in the namespace) or
/// select the pods of a Deployment in the bundle.
pub fn check_network_policy_selectors(bundle: &Bundle) -> Result<()> {
    for object in &bundle.objects {
        let ResourceObject::NetworkPolicy(policy) = object else {
            continue;
        };
        let selector = &policy.spec.pod_selector;
        if !selector.is_empty() && !binds_pods(bundle, object.namespace(), &selector.match_labels)
        {
            return Err(GenerateError::SelectorMismatch {
                object: object.object_ref(),
                field: "spec.podSelector".to_string(),
            });
        }
    }
    Ok(())
}

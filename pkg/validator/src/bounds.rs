use pkg_types::bundle::Bundle;
use pkg_types::error::{GenerateError, Result};
use pkg_types::meta::{ObjectRef, ResourceKind};
use pkg_types::quantity::Quantity;

/// Limits must be at least the requests, for CPU and memory, on every
/// container of every Deployment.
pub fn check_resource_bounds(bundle: &Bundle) -> Result<()> {
    for deploy in bundle.deployments() {
        for container in &deploy.spec.template.spec.containers {
            let res = &container.resources;
            let pairs: [(&str, &Quantity, &Quantity); 2] = [
                ("cpu", &res.requests.cpu, &res.limits.cpu),
                ("memory", &res.requests.memory, &res.limits.memory),
            ];
            for (resource, request, limit) in pairs {
                if limit < request {
                    return Err(GenerateError::InvalidResourceBounds {
                        object: ObjectRef {
                            kind: ResourceKind::Deployment,
                            namespace: deploy.metadata.namespace.clone(),
                            name: deploy.metadata.name.clone(),
                        },
                        field: format!(
                            "spec.template.spec.containers[{}].resources.{}",
                            container.name, resource
                        ),
                        request: request.to_string(),
                        limit: limit.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::config::DeploymentConfig;

    fn bundle(cpu: (&str, &str), mem: (&str, &str)) -> Bundle {
        let cfg = DeploymentConfig {
            cpu_request: cpu.0.to_string(),
            cpu_limit: cpu.1.to_string(),
            mem_request: mem.0.to_string(),
            mem_limit: mem.1.to_string(),
            ..Default::default()
        };
        pkg_builder::build(&cfg).unwrap()
    }

    #[test]
    fn equal_bounds_pass() {
        assert!(check_resource_bounds(&bundle(("500m", "0.5"), ("1Gi", "1024Mi"))).is_ok());
    }

    #[test]
    fn cpu_limit_below_request() {
        let err = check_resource_bounds(&bundle(("1", "500m"), ("256Mi", "512Mi"))).unwrap_err();
        assert_eq!(err.kind_name(), "InvalidResourceBounds");
        assert_eq!(err.field(), "spec.template.spec.containers[wiki].resources.cpu");
        assert!(err.to_string().contains("limit 500m is below request 1"));
    }

    #[test]
    fn memory_limit_below_request() {
        let err = check_resource_bounds(&bundle(("100m", "500m"), ("1Gi", "1G"))).unwrap_err();
        assert_eq!(err.field(), "spec.template.spec.containers[wiki].resources.memory");
    }
}

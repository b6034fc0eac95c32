//! Resource model builder: one [`DeploymentConfig`] in, one [`Bundle`] out.
//!
//! Construction is pure. Configuration problems that make a bundle
//! impossible to build (conflicting options, missing references, malformed
//! values) are reported here; consistency between the built objects is the
//! validator's job.

pub mod network;
pub mod plan;
pub mod rbac;
pub mod settings;
pub mod storage;
pub mod workload;

use pkg_types::bundle::Bundle;
use pkg_types::config::DeploymentConfig;
use pkg_types::error::{GenerateError, Result};
use pkg_types::meta::{ObjectMeta, ResourceKind};
use pkg_types::namespace::Namespace;
use pkg_types::object::ResourceObject;
use pkg_types::validate::{validate_dns_subdomain, validate_name};
use tracing::{debug, info};

pub use plan::BuildPlan;

/// Build every object for `config`.
pub fn build(config: &DeploymentConfig) -> Result<Bundle> {
    let plan = BuildPlan::new(config)?;
    let mut bundle = Bundle::default();

    let mut namespace_meta = ObjectMeta::cluster(plan.namespace());
    namespace_meta.labels = plan.config.labels.clone();
    bundle.push(ResourceObject::Namespace(Namespace {
        metadata: namespace_meta,
    }));

    bundle.push(rbac::service_account(&plan));
    bundle.push(rbac::role(&plan));
    bundle.push(rbac::role_binding(&plan));
    bundle.push(storage::persistent_volume(&plan));
    bundle.push(storage::persistent_volume_claim(&plan));
    bundle.push(settings::config_map(&plan));
    bundle.push(settings::secret(&plan));
    bundle.push(workload::deployment(&plan));
    bundle.push(workload::service(&plan));
    if let Some(ingress) = network::ingress(&plan) {
        bundle.push(ingress);
    }
    bundle.push(network::network_policy(&plan));

    for object in &bundle.objects {
        check_object_name(object)?;
        debug!("Built {}", object.object_ref());
    }

    declare_externals(&plan, &mut bundle)?;

    info!(
        "Built {} objects for {}/{} (database={}, replicas={})",
        bundle.len(),
        plan.namespace(),
        plan.name(),
        plan.config.database_mode,
        plan.replicas
    );
    Ok(bundle)
}

/// Derived names must still be valid once suffixes are appended.
fn check_object_name(object: &ResourceObject) -> Result<()> {
    let res = if object.kind().is_namespaced() {
        validate_name(object.name())
    } else {
        validate_dns_subdomain(object.name())
    };
    res.map_err(|e| GenerateError::invalid_field(&object.object_ref(), "metadata.name", e))
}

/// Record references the bundle expects someone else to satisfy.
fn declare_externals(plan: &BuildPlan, bundle: &mut Bundle) -> Result<()> {
    if plan.config.ingress_host().is_some() {
        if let Some(tls) = plan.tls_secret_name() {
            let target = plan.object_ref(ResourceKind::Secret, &tls);
            debug!("External TLS secret {}", target);
            bundle.declare_external(target);
        }
    }

    if let (true, Some(creds)) = (plan.is_postgres(), &plan.config.db_credentials_secret_ref) {
        let target = plan.object_ref(ResourceKind::Secret, &creds.name);
        if creds.name == plan.secret_name() {
            // Credentials live in the generated Secret, so its keys must too.
            for key in [&creds.username_key, &creds.password_key] {
                if !plan.config.secret_data.contains_key(key) {
                    return Err(GenerateError::DanglingReference {
                        object: plan.object_ref(ResourceKind::Deployment, plan.name()),
                        field: format!("dbCredentialsSecretRef (key '{}')", key),
                        target,
                    });
                }
            }
        } else {
            debug!("External credentials secret {}", target);
            bundle.declare_external(target);
        }
    }

    Ok(())
}

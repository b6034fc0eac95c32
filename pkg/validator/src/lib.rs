//! Cross-reference validator.
//!
//! Makes the invariants the API server only enforces at apply time (or never
//! enforces, like a Service selecting zero pods) explicit, before anything
//! is rendered. Checks run in a fixed order and the first failure wins.

pub mod bounds;
pub mod permissions;
pub mod references;
pub mod selectors;
pub mod storage;

use pkg_types::bundle::Bundle;
use pkg_types::config::ClusterProfile;
use pkg_types::error::Result;
use tracing::{debug, info};

pub struct Validator {
    profile: ClusterProfile,
}

impl Validator {
    pub fn new(profile: ClusterProfile) -> Self {
        Self { profile }
    }

    /// Return `bundle` unchanged if every check passes.
    pub fn validate(&self, bundle: Bundle) -> Result<Bundle> {
        references::check_edges(&bundle)?;
        debug!("reference edges resolved");
        selectors::check_service_selectors(&bundle)?;
        selectors::check_network_policy_selectors(&bundle)?;
        debug!("selectors bind pod templates");
        references::check_ingress_backends(&bundle)?;
        permissions::check_roles(&bundle)?;
        storage::check_storage_classes(&bundle, &self.profile)?;
        bounds::check_resource_bounds(&bundle)?;

        info!(
            "Validated {} objects ({} external references)",
            bundle.len(),
            bundle.externals.len()
        );
        Ok(bundle)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ClusterProfile::default())
    }
}

/// Test fixtures shared by the check modules.
#[cfg(test)]
pub(crate) mod fixtures {
    use pkg_types::bundle::Bundle;
    use pkg_types::config::{ClusterProfile, DeploymentConfig};
    use pkg_types::object::ResourceObject;

    pub fn config() -> DeploymentConfig {
        DeploymentConfig {
            ingress_host: Some("wiki.example.com".to_string()),
            ..Default::default()
        }
    }

    pub fn bundle() -> Bundle {
        pkg_builder::build(&config()).unwrap()
    }

    pub fn profile() -> ClusterProfile {
        ClusterProfile {
            storage_classes: vec!["standard".to_string()],
            assume_external: false,
        }
    }

    /// Apply `f` to every object of the bundle.
    pub fn edit(bundle: &mut Bundle, mut f: impl FnMut(&mut ResourceObject)) {
        for object in bundle.objects.iter_mut() {
            f(object);
        }
    }
}

//! Build, validate and render a Wiki.js deployment in one call.
//!
//! [`generate`] is a pure function of its inputs: no cluster access, no
//! clock, no randomness. The same config and profile always produce the
//! same bytes.

pub mod batch;

pub use batch::{BatchOutcome, generate_batch};
pub use pkg_render::{RenderedBundle, RenderedDocument};
pub use pkg_types::config::{ClusterProfile, DeploymentConfig};
pub use pkg_types::error::{GenerateError, Result};

use pkg_types::bundle::Bundle;
use pkg_validator::Validator;
use tracing::info;

/// Build and validate without rendering.
pub fn check(config: &DeploymentConfig, profile: &ClusterProfile) -> Result<Bundle> {
    let bundle = pkg_builder::build(config)?;
    Validator::new(profile.clone()).validate(bundle)
}

pub fn generate(config: &DeploymentConfig, profile: &ClusterProfile) -> Result<RenderedBundle> {
    let bundle = check(config, profile)?;
    let rendered = pkg_render::render(&bundle)?;
    info!(
        "Generated {} documents for {}/{}",
        rendered.len(),
        config.namespace,
        config.name
    );
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_and_generate_agree() {
        let config = DeploymentConfig::default();
        let profile = ClusterProfile {
            storage_classes: vec!["standard".to_string()],
            ..Default::default()
        };
        let bundle = check(&config, &profile).unwrap();
        let rendered = generate(&config, &profile).unwrap();
        assert_eq!(bundle.len(), rendered.len());
    }

    #[test]
    fn unknown_storage_class_stops_generation() {
        let err = generate(&DeploymentConfig::default(), &ClusterProfile::default()).unwrap_err();
        assert_eq!(err.kind_name(), "UnknownStorageClass");
    }
}

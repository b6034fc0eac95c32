use serde::{Deserialize, Serialize};

use crate::labels::{LabelSelector, Labels};
use crate::meta::ObjectMeta;
use crate::pod::PodTemplateSpec;

// --- Deployment strategy ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingUpdateParams {
    pub max_surge: u32,
    pub max_unavailable: u32,
}

impl Default for RollingUpdateParams {
    fn default() -> Self {
        Self {
            max_surge: 1,
            max_unavailable: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum DeploymentStrategy {
    RollingUpdate { rolling_update: RollingUpdateParams },
    Recreate,
}

impl Default for DeploymentStrategy {
    fn default() -> Self {
        DeploymentStrategy::RollingUpdate {
            rolling_update: RollingUpdateParams::default(),
        }
    }
}

// --- Deployment spec ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentSpec {
    pub replicas: u32,
    /// Label selector for matching pods
    pub selector: LabelSelector,
    #[serde(default)]
    pub strategy: DeploymentStrategy,
    pub template: PodTemplateSpec,
}

// --- Deployment ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub metadata: ObjectMeta,
    pub spec: DeploymentSpec,
}

impl Deployment {
    pub fn pod_labels(&self) -> &Labels {
        &self.spec.template.metadata.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_shapes() {
        let recreate = serde_yaml::to_string(&DeploymentStrategy::Recreate).unwrap();
        assert_eq!(recreate, "type: Recreate\n");
        let rolling = serde_yaml::to_string(&DeploymentStrategy::default()).unwrap();
        assert_eq!(
            rolling,
            "type: RollingUpdate\nrollingUpdate:\n  maxSurge: 1\n  maxUnavailable: 0\n"
        );
    }
}

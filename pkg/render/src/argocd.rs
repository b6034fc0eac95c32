//! ArgoCD `Application` pointing at a directory of generated manifests.

use serde::Serialize;

use pkg_constants::api::ARGOCD_V1ALPHA1;
use pkg_constants::network::{ARGOCD_NAMESPACE, IN_CLUSTER_SERVER};
use pkg_types::config::DeploymentConfig;
use pkg_types::meta::ObjectMeta;

use crate::document::render_document;

pub const KIND: &str = "Application";
pub const DEFAULT_PROJECT: &str = "default";
pub const DEFAULT_REVISION: &str = "HEAD";

#[derive(Debug, Clone)]
pub struct ApplicationOptions {
    pub repo_url: String,
    /// Path inside the repository; defaults to the target namespace.
    pub path: Option<String>,
    pub target_revision: String,
    pub project: String,
}

impl ApplicationOptions {
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            path: None,
            target_revision: DEFAULT_REVISION.to_string(),
            project: DEFAULT_PROJECT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSource {
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    pub path: String,
    pub target_revision: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationDestination {
    pub server: String,
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomatedSync {
    pub prune: bool,
    pub self_heal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPolicy {
    pub automated: AutomatedSync,
    pub sync_options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSpec {
    pub project: String,
    pub source: ApplicationSource,
    pub destination: ApplicationDestination,
    pub sync_policy: SyncPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Application {
    pub metadata: ObjectMeta,
    pub spec: ApplicationSpec,
}

pub fn application(config: &DeploymentConfig, options: &ApplicationOptions) -> Application {
    let path = options
        .path
        .clone()
        .unwrap_or_else(|| config.namespace.clone());
    Application {
        metadata: ObjectMeta::namespaced(&config.name, ARGOCD_NAMESPACE),
        spec: ApplicationSpec {
            project: options.project.clone(),
            source: ApplicationSource {
                repo_url: options.repo_url.clone(),
                path,
                target_revision: options.target_revision.clone(),
            },
            destination: ApplicationDestination {
                server: IN_CLUSTER_SERVER.to_string(),
                namespace: config.namespace.clone(),
            },
            sync_policy: SyncPolicy {
                automated: AutomatedSync {
                    prune: true,
                    self_heal: true,
                },
                sync_options: vec!["CreateNamespace=true".to_string()],
            },
        },
    }
}

pub fn render_application(app: &Application) -> Result<String, serde_yaml::Error> {
    let source = format!("{}/{}/{}", KIND, ARGOCD_NAMESPACE, app.metadata.name);
    render_document(&source, ARGOCD_V1ALPHA1, KIND, app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_targets_the_wiki_namespace() {
        let config = DeploymentConfig {
            namespace: "docs".to_string(),
            ..Default::default()
        };
        let app = application(&config, &ApplicationOptions::new("https://git.example.com/infra.git"));
        assert_eq!(app.metadata.namespace.as_deref(), Some("argocd"));
        assert_eq!(app.spec.source.path, "docs");
        assert_eq!(app.spec.destination.namespace, "docs");

        let yaml = render_application(&app).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["apiVersion"].as_str(), Some("argoproj.io/v1alpha1"));
        assert_eq!(value["kind"].as_str(), Some("Application"));
        assert_eq!(
            value["spec"]["source"]["repoURL"].as_str(),
            Some("https://git.example.com/infra.git")
        );
        assert_eq!(value["spec"]["source"]["targetRevision"].as_str(), Some("HEAD"));
        assert_eq!(
            value["spec"]["destination"]["server"].as_str(),
            Some("https://kubernetes.default.svc")
        );
        assert_eq!(value["spec"]["syncPolicy"]["automated"]["selfHeal"].as_bool(), Some(true));
        assert_eq!(
            value["spec"]["syncPolicy"]["syncOptions"][0].as_str(),
            Some("CreateNamespace=true")
        );
    }

    #[test]
    fn explicit_path_wins() {
        let mut options = ApplicationOptions::new("git@example.com:infra.git");
        options.path = Some("clusters/prod/wiki".to_string());
        let app = application(&DeploymentConfig::default(), &options);
        assert_eq!(app.spec.source.path, "clusters/prod/wiki");
    }
}

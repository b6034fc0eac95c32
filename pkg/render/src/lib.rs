//! Serializer: a validated [`Bundle`] in, ordered YAML documents out.
//!
//! Documents are ordered by kind (Namespace, RBAC, storage, ConfigMap,
//! Secret, Deployment, Service, Ingress, NetworkPolicy) and then by name.
//! All maps in the model are ordered, so identical input always renders
//! byte-identical output.

pub mod argocd;
pub mod document;
pub mod output;

use pkg_types::bundle::Bundle;
use pkg_types::error::{GenerateError, Result};
use pkg_types::meta::ObjectRef;
use pkg_types::object::ResourceObject;
use tracing::debug;

/// One rendered object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub object: ObjectRef,
    /// File name used by the directory writer, e.g. `08-deployment-wikijs.yaml`.
    pub file_name: String,
    pub yaml: String,
}

/// Every document of a bundle, in apply order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBundle {
    pub documents: Vec<RenderedDocument>,
}

impl RenderedBundle {
    /// Multi-document YAML stream, suitable for `kubectl apply -f -`.
    pub fn to_stream(&self) -> String {
        let mut out = String::new();
        for doc in &self.documents {
            out.push_str("---\n");
            out.push_str(&doc.yaml);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Objects of `bundle` in apply order.
pub fn ordered(bundle: &Bundle) -> Vec<&ResourceObject> {
    let mut objects: Vec<&ResourceObject> = bundle.objects.iter().collect();
    objects.sort_by_key(|o| o.object_ref());
    objects
}

pub fn render(bundle: &Bundle) -> Result<RenderedBundle> {
    let mut documents = Vec::with_capacity(bundle.len());
    for (index, object) in ordered(bundle).into_iter().enumerate() {
        let object_ref = object.object_ref();
        let kind = object.kind();
        let yaml = document::render_document(
            &object_ref.to_string(),
            kind.api_version(),
            &kind.to_string(),
            object,
        )
        .map_err(|source| GenerateError::Render {
            object: object_ref.clone(),
            source,
        })?;
        let file_name = format!("{:02}-{}-{}.yaml", index, kind.slug(), object.name());
        debug!("Rendered {} as {}", object_ref, file_name);
        documents.push(RenderedDocument {
            object: object_ref,
            file_name,
            yaml,
        });
    }
    Ok(RenderedBundle { documents })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::config::DeploymentConfig;
    use pkg_types::meta::ResourceKind;

    fn config() -> DeploymentConfig {
        DeploymentConfig {
            ingress_host: Some("wiki.example.com".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn documents_follow_apply_order() {
        let mut bundle = pkg_builder::build(&config()).unwrap();
        bundle.objects.reverse();
        let rendered = render(&bundle).unwrap();
        let kinds: Vec<ResourceKind> = rendered.documents.iter().map(|d| d.object.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ResourceKind::Namespace,
                ResourceKind::ServiceAccount,
                ResourceKind::Role,
                ResourceKind::RoleBinding,
                ResourceKind::PersistentVolume,
                ResourceKind::PersistentVolumeClaim,
                ResourceKind::ConfigMap,
                ResourceKind::Secret,
                ResourceKind::Deployment,
                ResourceKind::Service,
                ResourceKind::Ingress,
                ResourceKind::NetworkPolicy,
            ]
        );
        assert_eq!(rendered.documents[0].file_name, "00-namespace-wikijs.yaml");
        assert_eq!(rendered.documents[8].file_name, "08-deployment-wikijs.yaml");
    }

    #[test]
    fn render_is_deterministic() {
        let a = render(&pkg_builder::build(&config()).unwrap()).unwrap();
        let b = render(&pkg_builder::build(&config()).unwrap()).unwrap();
        assert_eq!(a.to_stream(), b.to_stream());
    }

    #[test]
    fn stream_separates_documents() {
        let rendered = render(&pkg_builder::build(&config()).unwrap()).unwrap();
        let stream = rendered.to_stream();
        assert_eq!(stream.matches("---\n").count(), rendered.len());
        assert!(stream.starts_with("---\n# Source: wikigen (Namespace/wikijs)\napiVersion: v1\nkind: Namespace\n"));
    }

    #[test]
    fn deployment_document_shape() {
        let rendered = render(&pkg_builder::build(&config()).unwrap()).unwrap();
        let doc = &rendered
            .documents
            .iter()
            .find(|d| d.object.kind == ResourceKind::Deployment)
            .unwrap()
            .yaml;
        let value: serde_yaml::Value = serde_yaml::from_str(doc).unwrap();
        assert_eq!(value["apiVersion"].as_str(), Some("apps/v1"));
        assert_eq!(value["spec"]["replicas"].as_u64(), Some(1));
        assert_eq!(value["spec"]["strategy"]["type"].as_str(), Some("Recreate"));
        let container = &value["spec"]["template"]["spec"]["containers"][0];
        assert_eq!(container["resources"]["limits"]["memory"].as_str(), Some("512Mi"));
        assert_eq!(container["ports"][0]["containerPort"].as_u64(), Some(3000));
        assert_eq!(
            value["spec"]["template"]["spec"]["volumes"][0]["persistentVolumeClaim"]["claimName"]
                .as_str(),
            Some("wikijs-data")
        );
    }
}

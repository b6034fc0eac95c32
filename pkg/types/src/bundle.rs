use std::collections::BTreeSet;

use crate::deployment::Deployment;
use crate::meta::{ObjectRef, ResourceKind};
use crate::object::ResourceObject;

/// The object set produced by one build, plus the references it expects to
/// be satisfied outside of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    pub objects: Vec<ResourceObject>,
    /// Objects referenced by the bundle but provisioned by someone else
    /// (cert-manager TLS secrets, operator-managed credentials, ...).
    pub externals: BTreeSet<ObjectRef>,
}

impl Bundle {
    pub fn push(&mut self, object: ResourceObject) {
        self.objects.push(object);
    }

    pub fn declare_external(&mut self, target: ObjectRef) {
        self.externals.insert(target);
    }

    pub fn contains(&self, target: &ObjectRef) -> bool {
        self.find(target).is_some()
    }

    pub fn find(&self, target: &ObjectRef) -> Option<&ResourceObject> {
        self.objects.iter().find(|o| {
            o.kind() == target.kind
                && o.name() == target.name
                && o.namespace() == target.namespace.as_deref()
        })
    }

    pub fn is_external(&self, target: &ObjectRef) -> bool {
        self.externals.contains(target)
    }

    pub fn of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &ResourceObject> {
        self.objects.iter().filter(move |o| o.kind() == kind)
    }

    pub fn count(&self, kind: ResourceKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn deployments(&self) -> impl Iterator<Item = &Deployment> {
        self.objects.iter().filter_map(|o| match o {
            ResourceObject::Deployment(d) => Some(d),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

//! Typed model of the Kubernetes objects in a Wiki.js deployment bundle.
//!
//! Every kind is a plain serde struct shaped like the Kubernetes schema
//! (camelCase fields, `metadata` + body). Maps are `BTreeMap` so that
//! serialization order never depends on hashing.

pub mod bundle;
pub mod config;
pub mod configmap;
pub mod deployment;
pub mod error;
pub mod ingress;
pub mod labels;
pub mod meta;
pub mod namespace;
pub mod network_policy;
pub mod object;
pub mod pod;
pub mod quantity;
pub mod rbac;
pub mod reference;
pub mod secret;
pub mod service;
pub mod validate;
pub mod volume;

pub use bundle::Bundle;
pub use error::{GenerateError, Result};
pub use meta::{ObjectMeta, ObjectRef, ResourceKind};
pub use object::ResourceObject;
pub use quantity::Quantity;
pub use reference::ReferenceEdge;

//! RBAC allow-list.
//!
//! The generated Role may only read configuration objects in its own namespace.

/// Verbs a generated Role may grant.
pub const ALLOWED_VERBS: &[&str] = &["get", "list", "watch"];

/// Resources a generated Role may target.
pub const ALLOWED_RESOURCES: &[&str] = &["configmaps", "secrets"];

/// API groups a generated Role may target (core only).
pub const ALLOWED_API_GROUPS: &[&str] = &[""];

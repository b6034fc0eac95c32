use serde::{Deserialize, Serialize};

use crate::meta::ObjectMeta;

// --- Service account ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccount {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub automount_service_account_token: bool,
}

// --- Policy rules ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRule {
    /// API groups this rule applies to (e.g., "" for core, "*" for all)
    #[serde(default)]
    pub api_groups: Vec<String>,
    /// Resource types (e.g., "configmaps", "secrets", "*" for all)
    pub resources: Vec<String>,
    /// Allowed verbs (e.g., "get", "list", "create", "update", "delete", "*" for all)
    pub verbs: Vec<String>,
}

// --- Role ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub metadata: ObjectMeta,
    pub rules: Vec<PolicyRule>,
}

// --- Subject ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectKind {
    ServiceAccount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub kind: SubjectKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRef {
    pub api_group: String,
    pub kind: String,
    pub name: String,
}

// --- RoleBinding ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleBinding {
    pub metadata: ObjectMeta,
    pub role_ref: RoleRef,
    pub subjects: Vec<Subject>,
}

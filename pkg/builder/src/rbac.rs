use pkg_constants::{api, rbac};
use pkg_types::meta::ObjectMeta;
use pkg_types::object::ResourceObject;
use pkg_types::rbac::{PolicyRule, Role, RoleBinding, RoleRef, ServiceAccount, Subject, SubjectKind};

use crate::plan::BuildPlan;

/// Read-only access to configuration objects in the namespace.
pub fn default_rules() -> Vec<PolicyRule> {
    vec![PolicyRule {
        api_groups: rbac::ALLOWED_API_GROUPS.iter().map(|s| s.to_string()).collect(),
        resources: rbac::ALLOWED_RESOURCES.iter().map(|s| s.to_string()).collect(),
        verbs: rbac::ALLOWED_VERBS.iter().map(|s| s.to_string()).collect(),
    }]
}

pub fn service_account(plan: &BuildPlan) -> ResourceObject {
    ResourceObject::ServiceAccount(ServiceAccount {
        metadata: ObjectMeta::namespaced(&plan.service_account_name(), plan.namespace())
            .with_labels(plan.common_labels.clone()),
        automount_service_account_token: true,
    })
}

/// Role with the configured rules. Scope is checked by the validator, not here.
pub fn role(plan: &BuildPlan) -> ResourceObject {
    let rules = plan
        .config
        .rbac_rules
        .clone()
        .unwrap_or_else(default_rules);
    ResourceObject::Role(Role {
        metadata: ObjectMeta::namespaced(&plan.role_name(), plan.namespace())
            .with_labels(plan.common_labels.clone()),
        rules,
    })
}

pub fn role_binding(plan: &BuildPlan) -> ResourceObject {
    ResourceObject::RoleBinding(RoleBinding {
        metadata: ObjectMeta::namespaced(&plan.role_name(), plan.namespace())
            .with_labels(plan.common_labels.clone()),
        role_ref: RoleRef {
            api_group: api::RBAC_GROUP.to_string(),
            kind: "Role".to_string(),
            name: plan.role_name(),
        },
        subjects: vec![Subject {
            kind: SubjectKind::ServiceAccount,
            name: plan.service_account_name(),
            namespace: Some(plan.namespace().to_string()),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::config::DeploymentConfig;

    #[test]
    fn binding_points_at_role_and_account() {
        let cfg = DeploymentConfig::default();
        let plan = BuildPlan::new(&cfg).unwrap();
        let ResourceObject::RoleBinding(binding) = role_binding(&plan) else {
            panic!("expected RoleBinding");
        };
        assert_eq!(binding.role_ref.name, "wikijs-config-reader");
        assert_eq!(binding.subjects[0].name, "wikijs");
        assert_eq!(binding.subjects[0].namespace.as_deref(), Some("wikijs"));
    }

    #[test]
    fn configured_rules_replace_default() {
        let cfg = DeploymentConfig {
            rbac_rules: Some(vec![PolicyRule {
                api_groups: vec!["".to_string()],
                resources: vec!["configmaps".to_string()],
                verbs: vec!["get".to_string()],
            }]),
            ..Default::default()
        };
        let plan = BuildPlan::new(&cfg).unwrap();
        let ResourceObject::Role(role) = role(&plan) else {
            panic!("expected Role");
        };
        assert_eq!(role.rules.len(), 1);
        assert_eq!(role.rules[0].verbs, vec!["get"]);
    }
}

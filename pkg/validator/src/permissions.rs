use pkg_constants::rbac::{ALLOWED_API_GROUPS, ALLOWED_RESOURCES, ALLOWED_VERBS};
use pkg_types::bundle::Bundle;
use pkg_types::error::{GenerateError, Result};
use pkg_types::object::ResourceObject;

/// Every Role rule stays inside the read-only allow-list.
pub fn check_roles(bundle: &Bundle) -> Result<()> {
    for object in &bundle.objects {
        let ResourceObject::Role(role) = object else {
            continue;
        };
        for (i, rule) in role.rules.iter().enumerate() {
            let checks: [(&str, &[String], &[&str]); 3] = [
                ("apiGroups", rule.api_groups.as_slice(), ALLOWED_API_GROUPS),
                ("resources", rule.resources.as_slice(), ALLOWED_RESOURCES),
                ("verbs", rule.verbs.as_slice(), ALLOWED_VERBS),
            ];
            for (field, requested, allowed) in checks {
                if let Some(bad) = requested.iter().find(|r| !allowed.contains(&r.as_str())) {
                    return Err(GenerateError::ExcessivePermission {
                        object: object.object_ref(),
                        field: format!("rules[{}].{}", i, field),
                        detail: format!(
                            "'{}' is outside the allow-list [{}]",
                            bad,
                            allowed.join(", ")
                        ),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use pkg_types::rbac::PolicyRule;

    fn with_rules(rules: Vec<PolicyRule>) -> Bundle {
        let mut bundle = fixtures::bundle();
        fixtures::edit(&mut bundle, |o| {
            if let ResourceObject::Role(r) = o {
                r.rules = rules.clone();
            }
        });
        bundle
    }

    fn rule(groups: &[&str], resources: &[&str], verbs: &[&str]) -> PolicyRule {
        let owned = |xs: &[&str]| -> Vec<String> { xs.iter().map(|s| s.to_string()).collect() };
        PolicyRule {
            api_groups: owned(groups),
            resources: owned(resources),
            verbs: owned(verbs),
        }
    }

    #[test]
    fn default_role_is_allowed() {
        assert!(check_roles(&fixtures::bundle()).is_ok());
    }

    #[test]
    fn narrower_rules_are_allowed() {
        let bundle = with_rules(vec![rule(&[""], &["secrets"], &["get"])]);
        assert!(check_roles(&bundle).is_ok());
    }

    #[test]
    fn write_verb_is_excessive() {
        let bundle = with_rules(vec![rule(&[""], &["configmaps"], &["get", "update"])]);
        let err = check_roles(&bundle).unwrap_err();
        assert_eq!(err.kind_name(), "ExcessivePermission");
        assert_eq!(err.field(), "rules[0].verbs");
    }

    #[test]
    fn wildcards_are_excessive() {
        let bundle = with_rules(vec![
            rule(&[""], &["configmaps"], &["get"]),
            rule(&[""], &["*"], &["get"]),
        ]);
        assert_eq!(check_roles(&bundle).unwrap_err().field(), "rules[1].resources");

        let bundle = with_rules(vec![rule(&["apps"], &["secrets"], &["list"])]);
        assert_eq!(check_roles(&bundle).unwrap_err().field(), "rules[0].apiGroups");
    }
}

//! ConfigMap and Secret holding the Wiki.js environment.

use pkg_constants::paths;
use pkg_types::configmap::ConfigMap;
use pkg_types::meta::ObjectMeta;
use pkg_types::object::ResourceObject;
use pkg_types::secret::{OPAQUE, Secret};
use std::collections::BTreeMap;

use crate::plan::BuildPlan;

pub fn config_map(plan: &BuildPlan) -> ResourceObject {
    let mut data = BTreeMap::new();
    data.insert(
        "DB_TYPE".to_string(),
        plan.config.database_mode.to_string(),
    );

    match &plan.config.database {
        Some(db) if plan.is_postgres() => {
            data.insert(
                "DB_HOST".to_string(),
                db.host.clone().unwrap_or_default().trim().to_string(),
            );
            data.insert("DB_PORT".to_string(), db.port.to_string());
            data.insert("DB_NAME".to_string(), db.name.clone());
            data.insert("DB_SSL".to_string(), db.ssl.to_string());
            if plan.replicas > 1 {
                data.insert("HA_ACTIVE".to_string(), "true".to_string());
            }
        }
        _ => {
            data.insert("DB_FILEPATH".to_string(), paths::SQLITE_DB_FILE.to_string());
        }
    }

    ResourceObject::ConfigMap(ConfigMap {
        metadata: ObjectMeta::namespaced(&plan.config_map_name(), plan.namespace())
            .with_labels(plan.common_labels.clone()),
        data,
    })
}

pub fn secret(plan: &BuildPlan) -> ResourceObject {
    ResourceObject::Secret(Secret {
        metadata: ObjectMeta::namespaced(&plan.secret_name(), plan.namespace())
            .with_labels(plan.common_labels.clone()),
        secret_type: OPAQUE.to_string(),
        string_data: plan.config.secret_data.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::config::{DatabaseMode, DeploymentConfig, PostgresConfig, SecretKeyRefConfig};

    fn data(obj: ResourceObject) -> BTreeMap<String, String> {
        match obj {
            ResourceObject::ConfigMap(cm) => cm.data,
            other => panic!("expected ConfigMap, got {}", other.kind()),
        }
    }

    #[test]
    fn sqlite_entries() {
        let cfg = DeploymentConfig::default();
        let plan = BuildPlan::new(&cfg).unwrap();
        let data = data(config_map(&plan));
        assert_eq!(data["DB_TYPE"], "sqlite");
        assert_eq!(data["DB_FILEPATH"], "/wiki/data/db.sqlite");
        assert!(!data.contains_key("DB_HOST"));
    }

    #[test]
    fn postgres_entries() {
        let cfg = DeploymentConfig {
            database_mode: DatabaseMode::Postgres,
            database: Some(PostgresConfig {
                host: Some("10.0.0.5".to_string()),
                ssl: true,
                ..Default::default()
            }),
            db_credentials_secret_ref: Some(SecretKeyRefConfig {
                name: "wiki-db".to_string(),
                username_key: "username".to_string(),
                password_key: "password".to_string(),
            }),
            ..Default::default()
        };
        let plan = BuildPlan::new(&cfg).unwrap();
        let data = data(config_map(&plan));
        assert_eq!(data["DB_TYPE"], "postgres");
        assert_eq!(data["DB_HOST"], "10.0.0.5");
        assert_eq!(data["DB_PORT"], "5432");
        assert_eq!(data["DB_SSL"], "true");
        assert!(!data.contains_key("DB_FILEPATH"));
        assert!(!data.contains_key("HA_ACTIVE"));
    }
}

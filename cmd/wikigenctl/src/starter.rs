/// Printed by `wikigenctl init`.
pub const STARTER_CONFIG: &str = r#"# wikigen deployment config
name: wikijs
namespace: wikijs
image: ghcr.io/requarks/wiki:2

# sqlite runs a single replica on a ReadWriteOnce volume.
# postgres needs database.host and dbCredentialsSecretRef.
databaseMode: sqlite
# database:
#   host: postgres.db.svc.cluster.local
#   port: 5432
#   name: wiki
#   ssl: false
# dbCredentialsSecretRef:
#   name: wiki-db
#   usernameKey: username
#   passwordKey: password
# replicas: 2

storageSize: 5Gi
storageClass: standard
storageAccessMode: ReadWriteOnce
persistentVolume:
  hostPath: /mnt/data/wikijs
  reclaimPolicy: Retain

# Leave empty to skip the Ingress.
ingressHost: ""
ingressClassName: nginx
# clusterIssuer: letsencrypt-prod
# tlsSecretName: wikijs-tls
ingressControllerNamespace: ingress-nginx

cpuRequest: 100m
memRequest: 256Mi
cpuLimit: 500m
memLimit: 512Mi

labels: {}
secretData: {}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::config::{DatabaseMode, DeploymentConfig, parse_config};

    #[test]
    fn starter_parses_to_defaults() {
        let cfg: DeploymentConfig = parse_config(STARTER_CONFIG).unwrap();
        assert_eq!(cfg.database_mode, DatabaseMode::Sqlite);
        assert_eq!(cfg.ingress_host(), None);
        assert_eq!(cfg.storage_size, DeploymentConfig::default().storage_size);
    }
}

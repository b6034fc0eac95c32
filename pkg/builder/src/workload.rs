use pkg_constants::{network, paths, workload};
use pkg_types::deployment::{Deployment, DeploymentSpec, DeploymentStrategy, RollingUpdateParams};
use pkg_types::labels::LabelSelector;
use pkg_types::meta::ObjectMeta;
use pkg_types::object::ResourceObject;
use pkg_types::pod::{
    ContainerPort, ContainerSecurityContext, ContainerSpec, EnvFromSource, EnvVar, HttpGetAction,
    LocalObjectReference, PodSecurityContext, PodSpec, PodTemplateSpec, Probe, Protocol,
    TemplateMeta,
};
use pkg_types::service::{Service, ServicePort, ServiceSpec, ServiceType};
use pkg_types::volume::{Volume, VolumeMount, VolumeSource};

use crate::plan::BuildPlan;

pub fn deployment(plan: &BuildPlan) -> ResourceObject {
    // The sqlite file must be released before the next pod opens it.
    let strategy = if plan.is_postgres() {
        DeploymentStrategy::RollingUpdate {
            rolling_update: RollingUpdateParams::default(),
        }
    } else {
        DeploymentStrategy::Recreate
    };

    ResourceObject::Deployment(Deployment {
        metadata: ObjectMeta::namespaced(plan.name(), plan.namespace())
            .with_labels(plan.common_labels.clone()),
        spec: DeploymentSpec {
            replicas: plan.replicas,
            selector: LabelSelector::new(plan.selector_labels.clone()),
            strategy,
            template: PodTemplateSpec {
                metadata: TemplateMeta {
                    labels: plan.pod_labels.clone(),
                },
                spec: pod_spec(plan),
            },
        },
    })
}

fn pod_spec(plan: &BuildPlan) -> PodSpec {
    PodSpec {
        service_account_name: plan.service_account_name(),
        security_context: Some(PodSecurityContext {
            run_as_user: workload::WIKI_USER_ID,
            run_as_group: workload::WIKI_USER_ID,
            fs_group: workload::WIKI_USER_ID,
        }),
        containers: vec![container(plan)],
        volumes: vec![Volume {
            name: workload::DATA_VOLUME_NAME.to_string(),
            source: VolumeSource::PersistentVolumeClaim {
                claim_name: plan.claim_name(),
            },
        }],
    }
}

fn container(plan: &BuildPlan) -> ContainerSpec {
    let mut env = Vec::new();
    if plan.is_postgres() {
        if let Some(creds) = &plan.config.db_credentials_secret_ref {
            env.push(EnvVar::from_secret("DB_USER", &creds.name, &creds.username_key));
            env.push(EnvVar::from_secret("DB_PASS", &creds.name, &creds.password_key));
        }
    }

    ContainerSpec {
        name: workload::CONTAINER_NAME.to_string(),
        image: plan.config.image.clone(),
        ports: vec![ContainerPort {
            name: network::HTTP_PORT_NAME.to_string(),
            container_port: network::WIKI_CONTAINER_PORT,
            protocol: Protocol::TCP,
        }],
        env_from: vec![
            EnvFromSource {
                config_map_ref: Some(LocalObjectReference {
                    name: plan.config_map_name(),
                }),
                secret_ref: None,
            },
            EnvFromSource {
                config_map_ref: None,
                secret_ref: Some(LocalObjectReference {
                    name: plan.secret_name(),
                }),
            },
        ],
        env,
        resources: plan.resources.clone(),
        volume_mounts: vec![VolumeMount {
            name: workload::DATA_VOLUME_NAME.to_string(),
            mount_path: paths::WIKI_DATA_PATH.to_string(),
            read_only: false,
        }],
        readiness_probe: Some(health_probe()),
        liveness_probe: Some(health_probe()),
        security_context: Some(ContainerSecurityContext {
            allow_privilege_escalation: false,
            run_as_non_root: true,
        }),
    }
}

fn health_probe() -> Probe {
    Probe {
        http_get: HttpGetAction {
            path: paths::HEALTH_PATH.to_string(),
            port: network::HTTP_PORT_NAME.to_string(),
        },
        initial_delay_seconds: workload::PROBE_INITIAL_DELAY_SECS,
        period_seconds: workload::PROBE_PERIOD_SECS,
    }
}

pub fn service(plan: &BuildPlan) -> ResourceObject {
    ResourceObject::Service(Service {
        metadata: ObjectMeta::namespaced(plan.name(), plan.namespace())
            .with_labels(plan.common_labels.clone()),
        spec: ServiceSpec {
            service_type: ServiceType::ClusterIP,
            selector: plan.selector_labels.clone(),
            ports: vec![ServicePort {
                name: network::HTTP_PORT_NAME.to_string(),
                port: network::WIKI_SERVICE_PORT,
                target_port: network::WIKI_CONTAINER_PORT,
                protocol: Protocol::TCP,
            }],
        },
    })
}

use pkg_types::meta::ObjectMeta;
use pkg_types::object::ResourceObject;
use pkg_types::volume::{
    HostPathVolumeSource, PersistentVolume, PersistentVolumeClaim, PersistentVolumeClaimSpec,
    PersistentVolumeSpec, StorageAmount, VolumeResourceRequirements,
};

use crate::plan::BuildPlan;

/// Node-local volume sized exactly like the claim that binds it.
pub fn persistent_volume(plan: &BuildPlan) -> ResourceObject {
    let pv = &plan.config.persistent_volume;
    ResourceObject::PersistentVolume(PersistentVolume {
        metadata: ObjectMeta::cluster(&plan.volume_name()).with_labels(plan.common_labels.clone()),
        spec: PersistentVolumeSpec {
            capacity: StorageAmount {
                storage: plan.storage.clone(),
            },
            access_modes: vec![plan.config.storage_access_mode],
            persistent_volume_reclaim_policy: pv.reclaim_policy,
            storage_class_name: plan.config.storage_class.clone(),
            host_path: HostPathVolumeSource {
                path: pv.host_path.clone(),
                path_type: Some("DirectoryOrCreate".to_string()),
            },
        },
    })
}

/// Claim pre-bound to [`persistent_volume`] through `volumeName`.
pub fn persistent_volume_claim(plan: &BuildPlan) -> ResourceObject {
    ResourceObject::PersistentVolumeClaim(PersistentVolumeClaim {
        metadata: ObjectMeta::namespaced(&plan.claim_name(), plan.namespace())
            .with_labels(plan.common_labels.clone()),
        spec: PersistentVolumeClaimSpec {
            access_modes: vec![plan.config.storage_access_mode],
            storage_class_name: plan.config.storage_class.clone(),
            volume_name: Some(plan.volume_name()),
            resources: VolumeResourceRequirements {
                requests: StorageAmount {
                    storage: plan.storage.clone(),
                },
            },
        },
    })
}

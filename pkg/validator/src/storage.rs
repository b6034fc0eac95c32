use pkg_types::bundle::Bundle;
use pkg_types::config::ClusterProfile;
use pkg_types::error::{GenerateError, Result};
use pkg_types::meta::ResourceKind;
use pkg_types::object::ResourceObject;

/// Storage classes named by claims (then volumes) must be known to the
/// caller, unless the profile accepts any class as external.
pub fn check_storage_classes(bundle: &Bundle, profile: &ClusterProfile) -> Result<()> {
    let claims = bundle.of_kind(ResourceKind::PersistentVolumeClaim);
    let volumes = bundle.of_kind(ResourceKind::PersistentVolume);
    for object in claims.chain(volumes) {
        let class = match object {
            ResourceObject::PersistentVolumeClaim(pvc) => &pvc.spec.storage_class_name,
            ResourceObject::PersistentVolume(pv) => &pv.spec.storage_class_name,
            _ => continue,
        };
        if !profile.knows_storage_class(class) {
            return Err(GenerateError::UnknownStorageClass {
                object: object.object_ref(),
                field: "spec.storageClassName".to_string(),
                storage_class: class.clone(),
            });
        }
    }
    Ok(())
}

use thiserror::Error;

use crate::meta::ObjectRef;

/// Everything that can stop a bundle from being generated.
///
/// Each variant names the offending object and field so the user knows
/// what to change in the configuration.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("config conflict on {object} ({field}): {reason}")]
    ConfigConflict {
        object: ObjectRef,
        field: String,
        reason: String,
    },

    #[error("excessive permission in {object} ({field}): {detail}")]
    ExcessivePermission {
        object: ObjectRef,
        field: String,
        detail: String,
    },

    #[error("unknown storage class '{storage_class}' referenced by {object} ({field})")]
    UnknownStorageClass {
        object: ObjectRef,
        field: String,
        storage_class: String,
    },

    #[error("invalid resource bounds on {object} ({field}): limit {limit} is below request {request}")]
    InvalidResourceBounds {
        object: ObjectRef,
        field: String,
        request: String,
        limit: String,
    },

    #[error("dangling reference from {object} ({field}) to {target}")]
    DanglingReference {
        object: ObjectRef,
        field: String,
        target: ObjectRef,
    },

    #[error("missing reference on {object}: {field} is required when {reason}")]
    MissingReference {
        object: ObjectRef,
        field: String,
        reason: String,
    },

    #[error("selector of {object} ({field}) matches no pod template labels")]
    SelectorMismatch { object: ObjectRef, field: String },

    #[error("invalid {field} on {object}: {reason}")]
    InvalidField {
        object: ObjectRef,
        field: String,
        reason: String,
    },

    #[error("failed to render {object}: {source}")]
    Render {
        object: ObjectRef,
        #[source]
        source: serde_yaml::Error,
    },
}

impl GenerateError {
    pub fn object(&self) -> &ObjectRef {
        match self {
            GenerateError::ConfigConflict { object, .. }
            | GenerateError::ExcessivePermission { object, .. }
            | GenerateError::UnknownStorageClass { object, .. }
            | GenerateError::InvalidResourceBounds { object, .. }
            | GenerateError::DanglingReference { object, .. }
            | GenerateError::MissingReference { object, .. }
            | GenerateError::SelectorMismatch { object, .. }
            | GenerateError::InvalidField { object, .. }
            | GenerateError::Render { object, .. } => object,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            GenerateError::ConfigConflict { field, .. }
            | GenerateError::ExcessivePermission { field, .. }
            | GenerateError::UnknownStorageClass { field, .. }
            | GenerateError::InvalidResourceBounds { field, .. }
            | GenerateError::DanglingReference { field, .. }
            | GenerateError::MissingReference { field, .. }
            | GenerateError::SelectorMismatch { field, .. }
            | GenerateError::InvalidField { field, .. } => field,
            GenerateError::Render { .. } => "",
        }
    }

    /// Stable name of the error kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            GenerateError::ConfigConflict { .. } => "ConfigConflict",
            GenerateError::ExcessivePermission { .. } => "ExcessivePermission",
            GenerateError::UnknownStorageClass { .. } => "UnknownStorageClass",
            GenerateError::InvalidResourceBounds { .. } => "InvalidResourceBounds",
            GenerateError::DanglingReference { .. } => "DanglingReference",
            GenerateError::MissingReference { .. } => "MissingReference",
            GenerateError::SelectorMismatch { .. } => "SelectorMismatch",
            GenerateError::InvalidField { .. } => "InvalidField",
            GenerateError::Render { .. } => "Render",
        }
    }

    pub fn invalid_field(object: &ObjectRef, field: &str, reason: impl ToString) -> Self {
        GenerateError::InvalidField {
            object: object.clone(),
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::ResourceKind;

    #[test]
    fn message_names_object_and_field() {
        let err = GenerateError::InvalidResourceBounds {
            object: ObjectRef::namespaced(ResourceKind::Deployment, "wikijs", "wikijs"),
            field: "spec.template.spec.containers[wiki].resources.cpu".to_string(),
            request: "500m".to_string(),
            limit: "100m".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid resource bounds on Deployment/wikijs/wikijs \
             (spec.template.spec.containers[wiki].resources.cpu): \
             limit 100m is below request 500m"
        );
        assert_eq!(err.kind_name(), "InvalidResourceBounds");
        assert_eq!(err.object().name, "wikijs");
    }
}

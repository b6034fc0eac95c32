use std::fmt;

use crate::meta::ObjectRef;

/// Directed reference from one object to another, through one field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReferenceEdge {
    pub from: ObjectRef,
    /// Field path on `from` that holds the reference.
    pub field: &'static str,
    pub to: ObjectRef,
}

impl ReferenceEdge {
    pub fn new(from: &ObjectRef, field: &'static str, to: ObjectRef) -> Self {
        Self {
            from: from.clone(),
            field,
            to,
        }
    }
}

impl fmt::Display for ReferenceEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --{}--> {}", self.from, self.field, self.to)
    }
}

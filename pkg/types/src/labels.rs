use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered label map.
pub type Labels = BTreeMap<String, String>;

/// Returns true if every pair in `selector` is present in `labels`.
///
/// An empty selector is a subset of anything.
pub fn is_subset(selector: &Labels, labels: &Labels) -> bool {
    selector
        .iter()
        .all(|(key, value)| labels.get(key) == Some(value))
}

/// Equality-based label selector (`matchLabels`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: Labels,
}

impl LabelSelector {
    pub fn new(match_labels: Labels) -> Self {
        Self { match_labels }
    }

    /// Selector that matches every pod in the namespace.
    pub fn everything() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.match_labels.is_empty()
    }
}

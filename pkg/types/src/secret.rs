use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::meta::ObjectMeta;

/// Secret type for arbitrary user data.
pub const OPAQUE: &str = "Opaque";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    pub metadata: ObjectMeta,
    #[serde(rename = "type")]
    pub secret_type: String,
    /// Plain-text values; the API server encodes them into `data` on apply.
    #[serde(default)]
    pub string_data: BTreeMap<String, String>,
}

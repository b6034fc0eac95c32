//! One object → one self-describing YAML document.

use serde::Serialize;
use serde::ser::Error as _;
use serde_yaml::{Mapping, Value};

/// First line of every generated document. Also how the directory writer
/// recognises files it owns.
pub const HEADER_PREFIX: &str = "# Source: wikigen";

/// Serialize `body` with `apiVersion` and `kind` prepended.
///
/// `body` must serialize to a mapping; its field order is kept.
pub fn to_document<T: Serialize>(
    api_version: &str,
    kind: &str,
    body: &T,
) -> Result<Value, serde_yaml::Error> {
    let Value::Mapping(fields) = serde_yaml::to_value(body)? else {
        return Err(serde_yaml::Error::custom(format!(
            "{} body did not serialize to a mapping",
            kind
        )));
    };

    let mut doc = Mapping::with_capacity(fields.len() + 2);
    doc.insert("apiVersion".into(), api_version.into());
    doc.insert("kind".into(), kind.into());
    for (key, value) in fields {
        doc.insert(key, value);
    }
    Ok(Value::Mapping(doc))
}

/// Render a document with its header comment.
pub fn render_document<T: Serialize>(
    source: &str,
    api_version: &str,
    kind: &str,
    body: &T,
) -> Result<String, serde_yaml::Error> {
    let doc = to_document(api_version, kind, body)?;
    let yaml = serde_yaml::to_string(&doc)?;
    Ok(format!("{} ({})\n{}", HEADER_PREFIX, source, yaml))
}

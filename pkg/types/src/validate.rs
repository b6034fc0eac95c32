use anyhow::{Result, bail};
use pkg_constants::labels::{MAX_LABEL_LENGTH, MAX_LABEL_PREFIX_LENGTH};

/// Validate a Kubernetes-style resource name.
/// Rules: lowercase `[a-z0-9-]`, max 63 chars, no leading/trailing hyphens.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("name must not be empty");
    }
    if name.len() > 63 {
        bail!("name '{}' exceeds 63 characters (got {})", name, name.len());
    }
    if name.starts_with('-') || name.ends_with('-') {
        bail!("name '{}' must not start or end with a hyphen", name);
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        bail!(
            "name '{}' must contain only lowercase letters, digits, and hyphens [a-z0-9-]",
            name
        );
    }
    Ok(())
}

/// Validate a DNS subdomain such as an ingress host or a label key prefix.
/// Dot-separated names, each a valid resource name, max 253 chars.
pub fn validate_dns_subdomain(value: &str) -> Result<()> {
    if value.is_empty() {
        bail!("host must not be empty");
    }
    if value.len() > MAX_LABEL_PREFIX_LENGTH {
        bail!(
            "'{}' exceeds {} characters (got {})",
            value,
            MAX_LABEL_PREFIX_LENGTH,
            value.len()
        );
    }
    for part in value.split('.') {
        if let Err(e) = validate_name(part) {
            bail!("'{}' is not a valid DNS subdomain: {}", value, e);
        }
    }
    Ok(())
}

/// Validate a label key: optional `prefix/` DNS subdomain, then a name of at
/// most 63 chars of `[A-Za-z0-9._-]`, starting and ending alphanumeric.
pub fn validate_label_key(key: &str) -> Result<()> {
    let name = match key.split_once('/') {
        Some((prefix, name)) => {
            validate_dns_subdomain(prefix)?;
            name
        }
        None => key,
    };
    if name.is_empty() {
        bail!("label key '{}' has an empty name", key);
    }
    if !is_label_token(name) {
        bail!(
            "label key '{}' must be at most {} characters of [A-Za-z0-9._-], \
             starting and ending with an alphanumeric character",
            key,
            MAX_LABEL_LENGTH
        );
    }
    Ok(())
}

/// Validate a label value: empty, or same rules as a label key name.
pub fn validate_label_value(value: &str) -> Result<()> {
    if value.is_empty() || is_label_token(value) {
        return Ok(());
    }
    bail!(
        "label value '{}' must be at most {} characters of [A-Za-z0-9._-], \
         starting and ending with an alphanumeric character",
        value,
        MAX_LABEL_LENGTH
    );
}

/// Validate a ConfigMap or Secret data key: `[-._a-zA-Z0-9]+`, at most
/// 253 chars, and not `.` or `..`.
pub fn validate_data_key(key: &str) -> Result<()> {
    if key.is_empty() {
        bail!("data key must not be empty");
    }
    if key.len() > MAX_LABEL_PREFIX_LENGTH {
        bail!(
            "data key '{}' exceeds {} characters (got {})",
            key,
            MAX_LABEL_PREFIX_LENGTH,
            key.len()
        );
    }
    if key == "." || key == ".." {
        bail!("data key must not be '{}'", key);
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        bail!("data key '{}' must contain only [-._a-zA-Z0-9]", key);
    }
    Ok(())
}

/// Validate a hostPath: absolute, with no `..` segment.
pub fn validate_host_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        bail!("host path '{}' must be absolute", path);
    }
    if path.split('/').any(|segment| segment == "..") {
        bail!("host path '{}' must not contain '..'", path);
    }
    Ok(())
}

fn is_label_token(s: &str) -> bool {
    let bytes = s.as_bytes();
    s.len() <= MAX_LABEL_LENGTH
        && bytes.first().is_some_and(u8::is_ascii_alphanumeric)
        && bytes.last().is_some_and(u8::is_ascii_alphanumeric)
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

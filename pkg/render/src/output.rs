//! Write rendered documents to a directory, one file per object.
//!
//! Files previously generated into the same directory that no longer have
//! a counterpart are removed, so a GitOps sync prunes the objects too.
//! Only files whose first line carries the generator header are touched.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::RenderedBundle;
use crate::document::HEADER_PREFIX;

pub fn write_directory(rendered: &RenderedBundle, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let keep: BTreeSet<&str> = rendered
        .documents
        .iter()
        .map(|d| d.file_name.as_str())
        .collect();
    for stale in generated_files(dir)? {
        let is_stale = stale
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| !keep.contains(n));
        if is_stale {
            fs::remove_file(&stale)
                .with_context(|| format!("failed to remove {}", stale.display()))?;
            info!("Removed stale manifest {}", stale.display());
        }
    }

    let mut written = Vec::with_capacity(rendered.len());
    for doc in &rendered.documents {
        let path = dir.join(&doc.file_name);
        fs::write(&path, &doc.yaml)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!("Wrote {}", path.display());
        written.push(path);
    }
    info!("Wrote {} manifests to {}", written.len(), dir.display());
    Ok(written)
}

/// YAML files in `dir` that carry the generator header.
fn generated_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let entries = fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("yaml") {
            continue;
        }
        if has_generator_header(&path)? {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Checks the first line only. Files that are not UTF-8 are not ours.
fn has_generator_header(path: &Path) -> Result<bool> {
    let file = fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut first = String::new();
    match BufReader::new(file).read_line(&mut first) {
        Ok(_) => Ok(first.starts_with(HEADER_PREFIX)),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            debug!("Skipping non-UTF-8 file {}", path.display());
            Ok(false)
        }
        Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
    }
}

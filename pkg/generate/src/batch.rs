//! Generate many configs at once on the blocking pool.

use anyhow::{Context, anyhow};
use pkg_render::RenderedBundle;
use pkg_types::config::{ClusterProfile, DeploymentConfig};
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Result for one input, tagged with the label it was submitted under
/// (usually the config file path).
#[derive(Debug)]
pub struct BatchOutcome {
    pub label: String,
    pub result: anyhow::Result<RenderedBundle>,
}

/// Run [`crate::generate`] for every input concurrently.
///
/// Outcomes come back in input order. A failing input does not stop the
/// others.
pub async fn generate_batch(
    inputs: Vec<(String, DeploymentConfig)>,
    profile: ClusterProfile,
) -> Vec<BatchOutcome> {
    let mut tasks = JoinSet::new();
    let mut labels = Vec::with_capacity(inputs.len());
    for (index, (label, config)) in inputs.into_iter().enumerate() {
        labels.push(label);
        let profile = profile.clone();
        tasks.spawn_blocking(move || (index, crate::generate(&config, &profile)));
    }

    let mut slots: Vec<Option<anyhow::Result<RenderedBundle>>> =
        labels.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => {
                debug!("Batch item {} finished", labels[index]);
                slots[index] = Some(result.with_context(|| labels[index].clone()));
            }
            Err(e) => warn!("Batch task failed to complete: {}", e),
        }
    }

    labels
        .into_iter()
        .zip(slots)
        .map(|(label, slot)| {
            let result = slot.unwrap_or_else(|| Err(anyhow!("{}: generation task aborted", label)));
            BatchOutcome { label, result }
        })
        .collect()
}

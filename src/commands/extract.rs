use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::snapshot::Snapshot;

/// Print the extracted event as JSON.
pub async fn run(snapshot_path: &Path, config: &Config) -> Result<()> {
    let snapshot = Snapshot::load(snapshot_path).await?;
    let record = snapshot.extract(&config.selectors)?;

    let json = serde_json::to_string_pretty(&record.to_event_data())
        .context("Failed to serialize event")?;
    println!("{}", json);

    Ok(())
}

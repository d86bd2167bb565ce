use std::path::Path;

use anyhow::{Context, Result};
use shepherd_sync_core::EventData;
use shepherd_sync_core::ics::generate_ics;

use crate::config::Config;

/// Print the calendar document for an event JSON file, as produced by
/// `shepherd-sync extract`.
pub async fn run(event_path: &Path, config: &Config) -> Result<()> {
    let contents = tokio::fs::read_to_string(event_path)
        .await
        .with_context(|| format!("Failed to read event file {}", event_path.display()))?;

    let event: EventData = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse event file {}", event_path.display()))?;

    let document = generate_ics(&event, &config.uid_domain)?;
    println!("{}", document);

    Ok(())
}

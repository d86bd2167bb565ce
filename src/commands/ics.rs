use std::path::Path;

use anyhow::Result;
use shepherd_sync_core::ics::generate_ics;

use crate::config::Config;
use crate::snapshot::Snapshot;

/// Print the calendar document for a saved form.
pub async fn run(snapshot_path: &Path, config: &Config) -> Result<()> {
    let snapshot = Snapshot::load(snapshot_path).await?;
    let record = snapshot.extract(&config.selectors)?;

    let document = generate_ics(&record.to_event_data(), &config.uid_domain)?;
    println!("{}", document);

    Ok(())
}

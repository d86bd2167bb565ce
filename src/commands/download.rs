use std::path::{Path, PathBuf};

use anyhow::Result;
use owo_colors::OwoColorize;
use shepherd_sync_core::{DownloadStatus, PipelineOptions};

use crate::config::Config;
use crate::download;
use crate::snapshot::Snapshot;

/// Build the .ics payload for a saved form and write it to disk.
pub async fn run(
    snapshot_path: &Path,
    out: Option<PathBuf>,
    save_as: bool,
    config: &Config,
) -> Result<()> {
    let snapshot = Snapshot::load(snapshot_path).await?;

    let options = PipelineOptions {
        uid_domain: config.uid_domain.clone(),
        prompt_save_location: save_as || config.save_as,
    };
    let request = snapshot.create_download(&config.selectors, &options)?;

    let output_dir = out.unwrap_or_else(|| config.output_dir());
    let target = download::resolve_target(&request, &output_dir)?;

    match download::save(&request, &target).await {
        DownloadStatus::Success => {
            println!("{}", format!("  Saved: {}", target.display()).green());
            Ok(())
        }
        DownloadStatus::Error { message } => {
            anyhow::bail!("Download failed: {}", message)
        }
    }
}

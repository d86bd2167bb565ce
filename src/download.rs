//! Writes download requests to disk, standing in for the browser's
//! download manager.

use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::Input;
use shepherd_sync_core::payload::decode_data_uri;
use shepherd_sync_core::{DownloadRequest, DownloadStatus};
use tracing::{debug, warn};

/// Where the file for `request` should go. Prompts when the request asks
/// for a save location.
pub fn resolve_target(request: &DownloadRequest, output_dir: &Path) -> Result<PathBuf> {
    let default_path = output_dir.join(safe_file_name(&request.suggested_filename));

    if !request.prompt_save_location {
        return Ok(default_path);
    }

    let answer: String = Input::new()
        .with_prompt("  Save as")
        .default(default_path.display().to_string())
        .interact_text()?;
    Ok(PathBuf::from(answer))
}

/// Decode the payload and write it to `target`.
pub async fn save(request: &DownloadRequest, target: &Path) -> DownloadStatus {
    let bytes = match decode_data_uri(&request.payload_uri) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "rejected download payload");
            return DownloadStatus::Error {
                message: e.to_string(),
            };
        }
    };

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            return DownloadStatus::Error {
                message: format!("Could not create {}: {}", parent.display(), e),
            };
        }
    }

    match tokio::fs::write(target, &bytes).await {
        Ok(()) => {
            debug!(path = %target.display(), bytes = bytes.len(), "wrote calendar file");
            DownloadStatus::Success
        }
        Err(e) => DownloadStatus::Error {
            message: format!("Could not write {}: {}", target.display(), e),
        },
    }
}

/// Titles come from client names; keep them from escaping the output directory.
fn safe_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '-',
            _ => c,
        })
        .collect()
}

//! Saved appointment forms read from disk.

use std::path::Path;

use anyhow::{Context, Result};
use shepherd_sync_core::extract::extract;
use shepherd_sync_core::{
    AppointmentRecord, DownloadRequest, FixtureFragment, HtmlDocument, LocatorRules,
    PipelineOptions, SyncResult, create_download,
};

/// A page saved from the browser, or a JSON fixture of one form.
pub enum Snapshot {
    Html(HtmlDocument),
    Fixture(FixtureFragment),
}

impl Snapshot {
    /// `.json` files are fixtures, anything else is parsed as HTML.
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            let fixture = FixtureFragment::from_json(&contents)
                .with_context(|| format!("Failed to parse fixture {}", path.display()))?;
            Ok(Snapshot::Fixture(fixture))
        } else {
            Ok(Snapshot::Html(HtmlDocument::parse(&contents)))
        }
    }

    pub fn extract(&self, rules: &LocatorRules) -> SyncResult<AppointmentRecord> {
        match self {
            Snapshot::Html(doc) => extract(&doc.fragment(&rules.form)?, rules),
            Snapshot::Fixture(form) => extract(form, rules),
        }
    }

    pub fn create_download(
        &self,
        rules: &LocatorRules,
        options: &PipelineOptions,
    ) -> SyncResult<DownloadRequest> {
        match self {
            Snapshot::Html(doc) => create_download(&doc.fragment(&rules.form)?, rules, options),
            Snapshot::Fixture(form) => create_download(form, rules, options),
        }
    }
}

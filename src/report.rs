//! Not-found accumulation and the end-of-run report.
//!
//! Tracks that could not be located or added at the destination are recorded
//! per playlist-transfer attempt and flushed once, append-only, when the run
//! ends. The report lives across playlists within one invocation and never
//! persists identity state between runs.

use serde_json::json;
use tokio::io::AsyncWriteExt;

use crate::{Res, config, info, providers::Platform, success, warning};

/// One playlist-transfer attempt: the `"<source>-><dest> '<name>'"` key and
/// the human-readable descriptions that could not be transferred.
#[derive(Debug, Clone)]
pub struct NotFoundRecord {
    pub key: String,
    pub tracks: Vec<String>,
}

/// Accumulates not-found entries across every playlist of a run.
#[derive(Debug, Default)]
pub struct NotFoundReport {
    records: Vec<NotFoundRecord>,
}

impl NotFoundReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one playlist transfer.
    pub fn record(&mut self, source: Platform, dest: Platform, playlist: &str, tracks: Vec<String>) {
        self.records.push(NotFoundRecord {
            key: format!("{}->{} '{}'", source.slug(), dest.slug(), playlist),
            tracks,
        });
    }

    /// Total number of not-found tracks across the whole run.
    pub fn total(&self) -> usize {
        self.records.iter().map(|record| record.tracks.len()).sum()
    }

    /// Appends one JSON line per recorded playlist attempt to the report file.
    /// Prior runs' lines are never read back or rewritten.
    pub async fn flush(&self) -> Res<()> {
        let mut content = String::new();
        for record in &self.records {
            content.push_str(&json!({ &record.key: record.tracks }).to_string());
            content.push('\n');
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(config::report_path())
            .await?;
        file.write_all(content.as_bytes()).await?;
        Ok(())
    }

    /// Prints the end-of-run summary: full success on zero not-found,
    /// otherwise the count and a pointer to the report file.
    pub fn print_summary(&self) {
        let total = self.total();
        if total == 0 {
            success!("Sync completed successfully! All tracks were found and transferred.");
        } else {
            warning!("Sync completed. {} track(s) could not be found.", total);
            info!(
                "Check '{}' for details about tracks that couldn't be transferred.",
                config::report_path().display()
            );
        }
    }
}

use crate::models::{ListingRecord, SinkRow};
use crate::scrapers::traits::ListingSink;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Appends one JSON array per row to a file
pub struct JsonLinesSink {
    path: PathBuf,
    // Serialises appends from concurrent scrapes
    lock: Mutex<()>,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl ListingSink for JsonLinesSink {
    async fn append(&self, row: &SinkRow) -> Result<()> {
        let mut line = serde_json::to_string(row).context("Failed to serialize sink row")?;
        line.push('\n');

        let _guard = self.lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .await
            .with_context(|| format!("Failed to append to {}", self.path.display()))?;
        file.flush().await?;

        debug!("Appended row to {}", self.path.display());
        Ok(())
    }
}

/// Hand a scraped record to the sink. Failures are logged and swallowed so
/// they never change the scrape outcome.
pub async fn record_listing(sink: &dyn ListingSink, record: &ListingRecord) {
    if let Err(e) = sink.append(&record.sink_row()).await {
        warn!("Failed to record listing {}: {:#}", record.url, e);
    }
}

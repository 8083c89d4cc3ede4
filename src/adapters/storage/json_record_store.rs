use std::path::{Path, PathBuf};

use error_stack::ResultExt;
use thiserror::Error;
use tracing::instrument;

use crate::adapters::config::storage_config::StorageConfig;
use crate::domain::{record::DomainRecord, variant::Variant};
use crate::ports::record_source::{DateWindow, RecordSource, RecordSourceError};

#[derive(Error, Debug)]
pub enum RecordStoreError {
    #[error("Failed to access snapshot file '{0}'")]
    Io(String),
    #[error("Snapshot file '{0}' is not a JSON array of records")]
    Json(String),
}

/// JSON snapshots of fetched records, one pretty-printed file per variant.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    dir: PathBuf,
}

impl JsonRecordStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            dir: config.dir.clone(),
        }
    }

    pub fn path_for(&self, variant: Variant) -> PathBuf {
        self.dir.join(variant.snapshot_file_name())
    }

    #[instrument(skip(records), fields(count = records.len()))]
    pub async fn save(
        &self,
        variant: Variant,
        records: &[DomainRecord],
    ) -> error_stack::Result<PathBuf, RecordStoreError> {
        let path = self.path_for(variant);
        let json = serde_json::to_vec_pretty(records)
            .change_context_lazy(|| RecordStoreError::Json(display(&path)))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .change_context_lazy(|| RecordStoreError::Io(display(&self.dir)))?;
        tokio::fs::write(&path, json)
            .await
            .change_context_lazy(|| RecordStoreError::Io(display(&path)))?;

        tracing::info!("💾 Saved {} {} records to {}", records.len(), variant, path.display());
        Ok(path)
    }

    #[instrument]
    pub async fn load(
        &self,
        variant: Variant,
    ) -> error_stack::Result<Vec<DomainRecord>, RecordStoreError> {
        let path = self.path_for(variant);
        let bytes = tokio::fs::read(&path)
            .await
            .change_context_lazy(|| RecordStoreError::Io(display(&path)))?;

        serde_json::from_slice(&bytes)
            .change_context_lazy(|| RecordStoreError::Json(display(&path)))
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// Replays a previous `fetch`. The date window was applied when the snapshot was
/// taken, so it is ignored here.
#[async_trait::async_trait]
impl RecordSource for JsonRecordStore {
    fn source_name(&self) -> &str {
        "JSON snapshot"
    }

    async fn fetch_records(
        &self,
        variant: Variant,
        window: DateWindow,
    ) -> error_stack::Result<Vec<DomainRecord>, RecordSourceError> {
        if !window.is_unbounded() {
            tracing::warn!("Date window {:?} ignored when reading snapshots", window);
        }
        self.load(variant)
            .await
            .change_context(RecordSourceError::FetchFailed(variant))
    }
}

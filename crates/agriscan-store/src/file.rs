//! File-backed repository: one pretty-printed JSON array per collection.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::StoreError;
use crate::repository::{Repository, check_collection};

/// Stores each collection as `<dir>/<collection>.json`.
///
/// Writes go to a temporary file in the same directory and are renamed into
/// place, so a reader sees either the old array or the new one, never a
/// partial write. Writers are serialised through an internal lock so
/// concurrent appends do not lose records.
#[derive(Debug)]
pub struct JsonFileRepository {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRepository {
    /// Open (creating if needed) a repository rooted at `dir`.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        info!(dir = %dir.display(), "opened json repository");
        Ok(Self {
            dir: dir.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    async fn read(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let bytes = match tokio::fs::read(self.path_for(collection)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&bytes)? {
            Value::Array(records) => Ok(records),
            _ => Err(StoreError::NotAnArray {
                collection: collection.to_string(),
            }),
        }
    }

    async fn write(&self, collection: &str, records: &[Value]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let dir = self.dir.clone();
        let path = self.path_for(collection);

        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(&bytes)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::Other(format!("write task failed: {e}")))??;

        debug!(collection, count = records.len(), "wrote collection");
        Ok(())
    }
}

#[async_trait]
impl Repository for JsonFileRepository {
    async fn get(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        check_collection(collection)?;
        self.read(collection).await
    }

    async fn set(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError> {
        check_collection(collection)?;
        let _guard = self.write_lock.lock().await;
        self.write(collection, &records).await
    }

    async fn append(&self, collection: &str, record: Value) -> Result<(), StoreError> {
        check_collection(collection)?;
        let _guard = self.write_lock.lock().await;
        let mut records = self.read(collection).await?;
        records.push(record);
        self.write(collection, &records).await
    }
}

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::StoreError;
use crate::repository::{Repository, check_collection};

/// In-memory repository. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn get(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        check_collection(collection)?;
        let guard = self.collections.read().await;
        Ok(guard.get(collection).cloned().unwrap_or_default())
    }

    async fn set(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError> {
        check_collection(collection)?;
        self.collections
            .write()
            .await
            .insert(collection.to_string(), records);
        Ok(())
    }

    async fn append(&self, collection: &str, record: Value) -> Result<(), StoreError> {
        check_collection(collection)?;
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(record);
        Ok(())
    }
}

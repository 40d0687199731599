use async_trait::async_trait;
use serde_json::Value;

use crate::StoreError;

/// Opaque JSON records grouped into named collections (`history`,
/// `fraud_reports`, ...).
///
/// Records are kept in insertion order. Implementations must be safe to
/// share between concurrent requests.
#[async_trait]
pub trait Repository: Send + Sync {
    /// All records in a collection; empty if it has never been written.
    async fn get(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Replace a collection's records wholesale.
    async fn set(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError>;

    /// Add one record to the end of a collection.
    async fn append(&self, collection: &str, record: Value) -> Result<(), StoreError>;
}

/// Collection names become file names, so keep them to `[a-z0-9_-]`.
pub(crate) fn check_collection(name: &str) -> Result<(), StoreError> {
    let ok = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names() {
        assert!(check_collection("history").is_ok());
        assert!(check_collection("fraud_reports").is_ok());
        assert!(check_collection("").is_err());
        assert!(check_collection("../etc").is_err());
        assert!(check_collection("History").is_err());
    }
}

//! Per-user scan history.

use std::sync::Arc;

use agriscan_core::{NewScan, ScanRecord, ValidationError};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{Repository, StoreError};

pub const COLLECTION: &str = "history";

/// Saves reconciled scans and lists them back per user.
pub struct HistoryStore<R> {
    repo: Arc<R>,
}

impl<R: Repository> HistoryStore<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Record a scan for `user_id`, assigning its id and timestamp.
    pub async fn save(&self, user_id: &str, scan: NewScan) -> Result<ScanRecord, StoreError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ValidationError::Blank("user_id").into());
        }
        scan.observation.validate()?;

        let record = ScanRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            observation: scan.observation,
            verdict: scan.verdict,
            plu_meaning: scan.plu_meaning,
            advice: scan.advice,
            image_ref: scan.image_ref,
            created_at: now(),
        };
        self.repo
            .append(COLLECTION, serde_json::to_value(&record)?)
            .await?;
        info!(
            id = %record.id,
            user = %record.user_id,
            produce = %record.observation.produce_label,
            verdict = %record.verdict.verdict,
            "saved scan"
        );
        Ok(record)
    }

    /// A user's scans, newest first.
    pub async fn list(&self, user_id: &str) -> Result<Vec<ScanRecord>, StoreError> {
        let user_id = user_id.trim();
        let mut records: Vec<ScanRecord> = self
            .repo
            .get(COLLECTION)
            .await?
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<ScanRecord>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable history record");
                    None
                }
            })
            .filter(|record| record.user_id == user_id)
            .collect();
        newest_first(&mut records, |r| r.created_at.as_str());
        Ok(records)
    }
}

pub(crate) fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Sort by timestamp descending. Records written in the same instant keep
/// reverse insertion order; unparseable timestamps sink to the end.
pub(crate) fn newest_first<T>(records: &mut [T], created_at: impl Fn(&T) -> &str) {
    records.reverse();
    records.sort_by_key(|r| {
        std::cmp::Reverse(
            DateTime::parse_from_rfc3339(created_at(r))
                .ok()
                .map(|t| t.with_timezone(&Utc)),
        )
    });
}

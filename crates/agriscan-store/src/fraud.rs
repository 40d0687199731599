//! Community fraud reports against vendors.

use std::sync::Arc;

use agriscan_core::{FraudReport, NewFraudReport, ValidationError};
use tracing::{info, warn};
use uuid::Uuid;

use crate::history::{newest_first, now};
use crate::{Repository, StoreError};

pub const COLLECTION: &str = "fraud_reports";

pub struct FraudReportStore<R> {
    repo: Arc<R>,
}

impl<R: Repository> FraudReportStore<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Validate and store a report. Vendor, location, produce and the
    /// displayed label are required; optional fields that are blank after trimming are stored as absent.
    pub async fn submit(&self, report: NewFraudReport) -> Result<FraudReport, StoreError> {
        let report = normalise(report)?;
        let stored = FraudReport {
            id: Uuid::new_v4().to_string(),
            report,
            created_at: now(),
        };
        self.repo
            .append(COLLECTION, serde_json::to_value(&stored)?)
            .await?;
        info!(
            id = %stored.id,
            vendor = %stored.report.vendor_name,
            location = %stored.report.location,
            "fraud report submitted"
        );
        Ok(stored)
    }

    /// Every report, newest first.
    pub async fn list(&self) -> Result<Vec<FraudReport>, StoreError> {
        let mut reports: Vec<FraudReport> = self
            .repo
            .get(COLLECTION)
            .await?
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(report) => Some(report),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable fraud report");
                    None
                }
            })
            .collect();
        newest_first(&mut reports, |r| r.created_at.as_str());
        Ok(reports)
    }
}

fn required(value: String, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::Blank(field))
    } else {
        Ok(value.to_string())
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalise(report: NewFraudReport) -> Result<NewFraudReport, ValidationError> {
    Ok(NewFraudReport {
        vendor_name: required(report.vendor_name, "vendor_name")?,
        location: required(report.location, "location")?,
        produce_label: required(report.produce_label, "produce_label")?,
        organic_label: required(report.organic_label, "organic_label")?,
        user_id: optional(report.user_id),
        email: optional(report.email),
        plu: optional(report.plu),
        description: optional(report.description),
    })
}

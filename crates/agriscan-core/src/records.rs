//! Persisted record shapes for scan history and fraud reports.
//!
//! These are what the store crate writes as opaque JSON. The verdict is
//! embedded in the scan record that wraps its observation; it is never
//! stored on its own.

use serde::{Deserialize, Serialize};

use crate::observation::ProduceObservation;
use crate::verdict::Verdict;

/// A scan about to be written to history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScan {
    pub observation: ProduceObservation,
    /// The latest verdict for this observation (a manual PLU override
    /// replaces the automatic one before saving).
    pub verdict: Verdict,
    pub plu_meaning: Option<String>,
    pub advice: Option<String>,
    pub image_ref: Option<String>,
}

/// A scan as stored in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub observation: ProduceObservation,
    pub verdict: Verdict,
    pub plu_meaning: Option<String>,
    pub advice: Option<String>,
    pub image_ref: Option<String>,
    /// RFC 3339 timestamp string.
    pub created_at: String,
}

/// A user's report of produce sold as organic that appears not to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFraudReport {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub produce_label: String,
    pub organic_label: String,
    pub vendor_name: String,
    pub location: String,
    pub plu: Option<String>,
    pub description: Option<String>,
}

/// A fraud report as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudReport {
    pub id: String,
    #[serde(flatten)]
    pub report: NewFraudReport,
    /// RFC 3339 timestamp string.
    pub created_at: String,
}

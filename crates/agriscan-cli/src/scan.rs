//! Turning an observation into what the user sees: input decoding, table
//! selection, and the automatic or manual-override verdict.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use agriscan_core::{
    ClassifiedScan, NewScan, PluCode, PluLookup, ProduceObservation, RawObservation,
    ValidationError, Verdict, digits_only,
};
use agriscan_verdict::{PluTable, PluTableEntry, reconcile, reconcile_with_manual_plu};
use anyhow::Context;
use serde::Serialize;

/// A reconciled scan ready for display or saving.
#[derive(Debug, Serialize)]
pub struct Evaluation {
    pub observation: ProduceObservation,
    pub verdict: Verdict,
    /// The code the verdict was based on: the manual entry if one was given.
    pub plu: Option<PluCode>,
    pub plu_meaning: Option<String>,
    pub manual: bool,
    /// Nutrition and cleaning advice sent by the classifier.
    pub advice: Option<String>,
}

impl Evaluation {
    pub fn into_new_scan(self, image_ref: Option<String>) -> NewScan {
        NewScan {
            observation: self.observation,
            verdict: self.verdict,
            plu_meaning: self.plu_meaning,
            advice: self.advice,
            image_ref,
        }
    }
}

/// Reconcile a classified scan, letting a typed-in code replace the detected one.
pub fn evaluate(
    scan: ClassifiedScan,
    manual_plu: Option<&str>,
    table: &PluTable,
) -> Result<Evaluation, ValidationError> {
    let ClassifiedScan {
        observation,
        advice,
    } = scan;
    let (verdict, plu, manual) = match manual_plu {
        Some(raw) => {
            let code = digits_only(raw);
            let verdict = reconcile_with_manual_plu(&observation, &code, table)?;
            (verdict, Some(PluCode::parse(&code)?), true)
        }
        None => (
            reconcile(&observation, table)?,
            observation.detected_plu.clone(),
            false,
        ),
    };
    let plu_meaning = plu
        .as_ref()
        .and_then(|code| table.lookup(code).ok())
        .map(|found| found.meaning);
    Ok(Evaluation {
        observation,
        verdict,
        plu,
        plu_meaning,
        manual,
        advice,
    })
}

/// Read a classifier payload from a file, or stdin when `input` is `-`.
pub fn read_scan(input: &Path) -> anyhow::Result<ClassifiedScan> {
    let text = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading observation from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("reading {}", input.display()))?
    };
    parse_scan(&text)
}

pub fn parse_scan(text: &str) -> anyhow::Result<ClassifiedScan> {
    let raw: RawObservation = serde_json::from_str(text).context("parsing observation JSON")?;
    ClassifiedScan::try_from(raw).context("invalid observation")
}

/// The built-in table, or one loaded from a `{"4011": {"meaning": ..., "is_organic": ...}}` file.
pub fn load_table(path: Option<&Path>) -> anyhow::Result<PluTable> {
    let Some(path) = path else {
        return Ok(PluTable::standard().clone());
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let map: BTreeMap<String, PluTableEntry> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    let table =
        PluTable::from_map(map).with_context(|| format!("invalid PLU table {}", path.display()))?;
    tracing::info!(path = %path.display(), entries = table.len(), "loaded PLU table");
    Ok(table)
}

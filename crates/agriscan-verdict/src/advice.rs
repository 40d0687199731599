//! Reasoning and recommendation text for each reconciliation outcome.

use agriscan_core::{OrganicLabel, PluCode};

fn percent(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

fn lowercase(label: OrganicLabel) -> &'static str {
    match label {
        OrganicLabel::Organic => "organic",
        OrganicLabel::NonOrganic => "non-organic",
    }
}

// ── No PLU ──

/// `unresolved` is a code that was read or typed but is not in the table.
pub(crate) fn model_only_reasoning(
    model: OrganicLabel,
    confidence: f64,
    unresolved: Option<&PluCode>,
) -> String {
    let cross_check = match unresolved {
        None => "No PLU code was found to cross-verify this result.".to_string(),
        Some(code) => format!(
            "PLU code {code} is not in the reference table, so it could not be used to \
             cross-verify this result."
        ),
    };
    format!(
        "AI model predicted {model} with {} confidence. {cross_check}",
        percent(confidence)
    )
}

pub(crate) fn model_only_recommendation(model: OrganicLabel) -> String {
    let text = match model {
        OrganicLabel::Organic => {
            "Likely organic produce. A light rinse with water is recommended before consumption."
        }
        OrganicLabel::NonOrganic => {
            "Likely conventional produce. Wash thoroughly with water and a vegetable brush to \
             remove pesticide residues."
        }
    };
    text.to_string()
}

// ── PLU agrees ──

pub(crate) fn agreement_reasoning(label: OrganicLabel, confidence: f64, code: &PluCode) -> String {
    format!(
        "Both AI model ({} confidence) and PLU code {code} agree this produce is {}.",
        percent(confidence),
        lowercase(label)
    )
}

pub(crate) fn agreement_recommendation(label: OrganicLabel) -> String {
    let text = match label {
        OrganicLabel::Organic => {
            "This organic produce can be rinsed lightly with water before consumption."
        }
        OrganicLabel::NonOrganic => {
            "Wash thoroughly with water and a vegetable brush to remove pesticide residues."
        }
    };
    text.to_string()
}

// ── PLU disagrees ──

pub(crate) fn disagreement_reasoning(
    model: OrganicLabel,
    confidence: f64,
    plu: OrganicLabel,
    code: &PluCode,
) -> String {
    format!(
        "AI model predicted {model} ({} confidence), but PLU code {code} indicates {plu}. \
         PLU codes are generally more reliable as they are standardized industry labels.",
        percent(confidence)
    )
}

pub(crate) fn disagreement_recommendation(plu: OrganicLabel) -> String {
    let text = match plu {
        OrganicLabel::Organic => {
            "Despite model uncertainty, PLU code confirms organic status. Light rinse recommended."
        }
        OrganicLabel::NonOrganic => {
            "PLU code indicates conventional produce. Wash thoroughly to remove potential \
             pesticide residues."
        }
    };
    text.to_string()
}

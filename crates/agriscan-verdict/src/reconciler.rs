//! Verdict reconciliation.
//!
//! Combines the vision model's organic prediction with the PLU code (read
//! from the sticker, or typed in by the user) into one [`Verdict`]:
//!
//! 1. No usable PLU (absent, or not in the table): the model's call stands,
//!    banded by [`reliability_for`].
//! 2. PLU agrees with the model: confidence is boosted toward, but capped
//!    below, certainty.
//! 3. PLU disagrees: the PLU label wins at a fixed confidence.
//!
//! `MatchType::DisagreementModelTrusted` is never produced here.

use agriscan_core::{
    MatchType, OrganicLabel, PluCode, PluLookup, PluLookupResult, ProduceObservation,
    Reliability, ValidationError, Verdict,
};

use crate::advice;

/// Weight applied to model confidence when a PLU code corroborates it.
pub const AGREEMENT_WEIGHT: f64 = 0.9;
/// Offset added to the weighted model confidence on agreement.
pub const AGREEMENT_OFFSET: f64 = 0.1;
/// Ceiling on corroborated confidence; leaves room for sticker error.
pub const AGREEMENT_CAP: f64 = 0.95;
/// Confidence reported when the PLU code overrides the model.
pub const PLU_TRUSTED_CONFIDENCE: f64 = 0.85;

/// Band a confidence score into a reliability tier.
///
/// Break points at 0.90 and 0.70, both inclusive lower bounds.
pub fn reliability_for(confidence: f64) -> Reliability {
    Reliability::from_confidence(confidence)
}

/// Reconcile an observation against its detected PLU code.
///
/// Fails only on a contract violation in `observation`. A detected code
/// missing from `lookup` is not an error: the scan is treated as if no
/// sticker had been read.
pub fn reconcile(
    observation: &ProduceObservation,
    lookup: &impl PluLookup,
) -> Result<Verdict, ValidationError> {
    observation.validate()?;
    let code = observation.detected_plu.as_ref();
    let resolved = code.and_then(|c| lookup.lookup(c).ok());
    Ok(decide(observation, code, resolved.as_ref()))
}

/// Reconcile using a PLU code typed in by the user instead of the detected one.
///
/// `manual_code` must already be 4–5 digits (see `agriscan_core::digits_only`
/// for sanitising raw input). The result supersedes any automatic verdict
/// for the same observation.
pub fn reconcile_with_manual_plu(
    observation: &ProduceObservation,
    manual_code: &str,
    lookup: &impl PluLookup,
) -> Result<Verdict, ValidationError> {
    observation.validate()?;
    let code = PluCode::parse(manual_code)?;
    let resolved = lookup.lookup(&code).ok();
    Ok(decide(observation, Some(&code), resolved.as_ref()))
}

fn decide(
    observation: &ProduceObservation,
    code: Option<&PluCode>,
    resolved: Option<&PluLookupResult>,
) -> Verdict {
    let model = observation.model_organic_prediction;
    let confidence = observation.model_organic_confidence;

    let Some(plu) = resolved else {
        return Verdict {
            verdict: model,
            verdict_confidence: confidence,
            match_type: MatchType::NoPluCode,
            reliability: reliability_for(confidence),
            reasoning: advice::model_only_reasoning(model, confidence, code),
            recommendation: advice::model_only_recommendation(model),
        };
    };

    let plu_label = OrganicLabel::from_is_organic(plu.is_organic);
    if plu_label == model {
        Verdict {
            verdict: plu_label,
            verdict_confidence: (confidence * AGREEMENT_WEIGHT + AGREEMENT_OFFSET)
                .min(AGREEMENT_CAP),
            match_type: MatchType::PerfectMatch,
            reliability: Reliability::VeryHigh,
            reasoning: advice::agreement_reasoning(plu_label, confidence, &plu.code),
            recommendation: advice::agreement_recommendation(plu_label),
        }
    } else {
        Verdict {
            verdict: plu_label,
            verdict_confidence: PLU_TRUSTED_CONFIDENCE,
            match_type: MatchType::DisagreementPluTrusted,
            reliability: Reliability::High,
            reasoning: advice::disagreement_reasoning(model, confidence, plu_label, &plu.code),
            recommendation: advice::disagreement_recommendation(plu_label),
        }
    }
}

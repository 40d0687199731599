use serde::{Deserialize, Serialize};

use crate::observation::OrganicLabel;

/// How the vision model's prediction and the PLU code related when the
/// verdict was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    /// PLU code resolved and agrees with the model.
    PerfectMatch,
    /// PLU code resolved and disagrees; the PLU label wins.
    DisagreementPluTrusted,
    /// Disagreement resolved in the model's favour. Never produced by the
    /// reconciler; kept so stored and displayed values stay decodable.
    DisagreementModelTrusted,
    /// No usable PLU code; the model's prediction stands alone.
    NoPluCode,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerfectMatch => "PERFECT_MATCH",
            Self::DisagreementPluTrusted => "DISAGREEMENT_PLU_TRUSTED",
            Self::DisagreementModelTrusted => "DISAGREEMENT_MODEL_TRUSTED",
            Self::NoPluCode => "NO_PLU_CODE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PerfectMatch => "Perfect Match",
            Self::DisagreementPluTrusted => "PLU Code Trusted",
            Self::DisagreementModelTrusted => "AI Model Trusted",
            Self::NoPluCode => "No PLU Code",
        }
    }
}

/// Coarse banding of verdict confidence for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reliability {
    Moderate,
    High,
    VeryHigh,
}

impl Reliability {
    /// Lower bound (inclusive) of the `VeryHigh` band.
    pub const VERY_HIGH_FROM: f64 = 0.90;
    /// Lower bound (inclusive) of the `High` band.
    pub const HIGH_FROM: f64 = 0.70;

    /// Band a confidence score. Everything under 0.70 is `Moderate`;
    /// there is no lower band.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= Self::VERY_HIGH_FROM {
            Self::VeryHigh
        } else if confidence >= Self::HIGH_FROM {
            Self::High
        } else {
            Self::Moderate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryHigh => "VERY_HIGH",
            Self::High => "HIGH",
            Self::Moderate => "MODERATE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Moderate => "Moderate",
        }
    }
}

/// The final organic / non-organic call for one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub verdict: OrganicLabel,
    pub verdict_confidence: f64,
    #[serde(rename = "match")]
    pub match_type: MatchType,
    pub reliability: Reliability,
    pub reasoning: String,
    pub recommendation: String,
}

impl Verdict {
    /// Whether the display layer should surface the verification analysis:
    /// anything short of a very-high perfect match.
    pub fn needs_attention(&self) -> bool {
        self.match_type != MatchType::PerfectMatch || self.reliability != Reliability::VeryHigh
    }
}

//! Classifier output for a single scan.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::advice::join_sections;
use crate::error::{ValidationError, check_confidence};
use crate::plu::PluCode;

/// Organic status, as predicted by the vision model or implied by a PLU code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrganicLabel {
    Organic,
    NonOrganic,
}

impl OrganicLabel {
    pub fn from_is_organic(is_organic: bool) -> Self {
        if is_organic {
            Self::Organic
        } else {
            Self::NonOrganic
        }
    }

    pub fn is_organic(&self) -> bool {
        matches!(self, Self::Organic)
    }

    /// Wire form: `ORGANIC` / `NON_ORGANIC`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organic => "ORGANIC",
            Self::NonOrganic => "NON_ORGANIC",
        }
    }

    /// Human form used in reasoning text: `Organic` / `Non-Organic`.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Organic => "Organic",
            Self::NonOrganic => "Non-Organic",
        }
    }
}

impl fmt::Display for OrganicLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for OrganicLabel {
    type Err = ValidationError;

    /// Accepts the spellings classifier backends have used over time:
    /// `ORGANIC`, `Organic`, `Non-Organic`, `non_organic`, `NON ORGANIC`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        match normalised.as_str() {
            "ORGANIC" => Ok(Self::Organic),
            "NON_ORGANIC" | "NONORGANIC" => Ok(Self::NonOrganic),
            _ => Err(ValidationError::UnknownPrediction(s.to_string())),
        }
    }
}

/// One scan's classifier output. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProduceObservation {
    pub produce_label: String,
    pub produce_confidence: f64,
    pub model_organic_prediction: OrganicLabel,
    pub model_organic_confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_plu: Option<PluCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plu_confidence: Option<f64>,
}

impl ProduceObservation {
    /// Check the caller contract: non-blank label, every confidence in `[0, 1]`.
    ///
    /// PLU shape is already enforced by [`PluCode`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.produce_label.trim().is_empty() {
            return Err(ValidationError::MissingField("produce_label"));
        }
        check_confidence("produce_confidence", self.produce_confidence)?;
        check_confidence("model_organic_confidence", self.model_organic_confidence)?;
        if let Some(c) = self.plu_confidence {
            check_confidence("plu_confidence", c)?;
        }
        Ok(())
    }
}

/// Loosely-typed classifier payload, as received over the wire.
///
/// Every field is optional so that a missing value surfaces as a
/// [`ValidationError`] naming the field, not as a generic decode failure.
/// Unknown fields (`plu_meaning`, nested verdicts, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawObservation {
    pub produce_label: Option<String>,
    pub produce_confidence: Option<f64>,
    pub model_organic_prediction: Option<String>,
    pub model_organic_confidence: Option<f64>,
    /// Legacy name for `model_organic_prediction`.
    pub organic_label: Option<String>,
    /// Legacy name for `model_organic_confidence`.
    pub organic_confidence: Option<f64>,
    pub detected_plu: Option<String>,
    pub plu_confidence: Option<f64>,
    /// Nutrition and cleaning advice, headed `**Nutrition:**` / `**Cleaning Tips:**`.
    pub automatic_advice: Option<String>,
    /// Legacy split form of `automatic_advice`.
    pub nutrition_facts: Option<String>,
    /// Legacy split form of `automatic_advice`.
    pub cleaning_tips: Option<String>,
}

impl RawObservation {
    /// The advice text, rebuilt from the legacy split fields when the
    /// combined one is absent or blank.
    pub fn advice(&self) -> Option<String> {
        match self.automatic_advice.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Some(text.to_string()),
            _ => join_sections(self.nutrition_facts.as_deref(), self.cleaning_tips.as_deref()),
        }
    }
}

/// A decoded classifier response: the observation the reconciler needs plus
/// the advice text that travels with it into history.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedScan {
    pub observation: ProduceObservation,
    pub advice: Option<String>,
}

impl TryFrom<RawObservation> for ClassifiedScan {
    type Error = ValidationError;

    fn try_from(raw: RawObservation) -> Result<Self, Self::Error> {
        let advice = raw.advice();
        Ok(Self {
            observation: ProduceObservation::try_from(raw)?,
            advice,
        })
    }
}

/// Placeholder some backends send instead of omitting `detected_plu`.
const NOT_DETECTED: &str = "Not Detected";

impl TryFrom<RawObservation> for ProduceObservation {
    type Error = ValidationError;

    fn try_from(raw: RawObservation) -> Result<Self, Self::Error> {
        let produce_label = raw
            .produce_label
            .filter(|l| !l.trim().is_empty())
            .ok_or(ValidationError::MissingField("produce_label"))?;
        let produce_confidence = raw
            .produce_confidence
            .ok_or(ValidationError::MissingField("produce_confidence"))?;
        let model_organic_prediction = raw
            .model_organic_prediction
            .or(raw.organic_label)
            .ok_or(ValidationError::MissingField("model_organic_prediction"))?
            .parse()?;
        let model_organic_confidence = raw
            .model_organic_confidence
            .or(raw.organic_confidence)
            .ok_or(ValidationError::MissingField("model_organic_confidence"))?;

        let detected_plu = match raw.detected_plu.as_deref().map(str::trim) {
            None | Some("") | Some(NOT_DETECTED) => None,
            Some(code) => Some(PluCode::parse(code)?),
        };
        // A confidence without a code carries nothing.
        let plu_confidence = detected_plu.as_ref().and(raw.plu_confidence);

        let observation = Self {
            produce_label,
            produce_confidence,
            model_organic_prediction,
            model_organic_confidence,
            detected_plu,
            plu_confidence,
        };
        observation.validate()?;
        Ok(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banana() -> ProduceObservation {
        ProduceObservation {
            produce_label: "banana".into(),
            produce_confidence: 0.97,
            model_organic_prediction: OrganicLabel::Organic,
            model_organic_confidence: 0.92,
            detected_plu: Some(PluCode::parse("94011").unwrap()),
            plu_confidence: Some(0.88),
        }
    }

    #[test]
    fn label_parses_backend_spellings() {
        for s in ["ORGANIC", "organic", "Organic", " organic "] {
            assert_eq!(s.parse::<OrganicLabel>().unwrap(), OrganicLabel::Organic);
        }
        for s in ["NON_ORGANIC", "Non-Organic", "non organic", "nonorganic"] {
            assert_eq!(s.parse::<OrganicLabel>().unwrap(), OrganicLabel::NonOrganic);
        }
        assert_eq!(
            "conventional".parse::<OrganicLabel>(),
            Err(ValidationError::UnknownPrediction("conventional".into()))
        );
    }

    #[test]
    fn label_wire_form() {
        assert_eq!(
            serde_json::to_string(&OrganicLabel::NonOrganic).unwrap(),
            "\"NON_ORGANIC\""
        );
        assert_eq!(OrganicLabel::NonOrganic.to_string(), "Non-Organic");
    }

    #[test]
    fn valid_observation_passes() {
        assert_eq!(banana().validate(), Ok(()));
    }

    #[test]
    fn blank_label_rejected() {
        let obs = ProduceObservation {
            produce_label: "  ".into(),
            ..banana()
        };
        assert_eq!(
            obs.validate(),
            Err(ValidationError::MissingField("produce_label"))
        );
    }

    #[test]
    fn out_of_range_confidences_rejected() {
        let obs = ProduceObservation {
            model_organic_confidence: 1.2,
            ..banana()
        };
        assert!(matches!(
            obs.validate(),
            Err(ValidationError::ConfidenceOutOfRange {
                field: "model_organic_confidence",
                ..
            })
        ));

        let obs = ProduceObservation {
            plu_confidence: Some(-0.1),
            ..banana()
        };
        assert!(matches!(
            obs.validate(),
            Err(ValidationError::ConfidenceOutOfRange {
                field: "plu_confidence",
                ..
            })
        ));
    }

    #[test]
    fn typed_json_roundtrip_omits_absent_plu() {
        let obs = ProduceObservation {
            detected_plu: None,
            plu_confidence: None,
            ..banana()
        };
        let json = serde_json::to_value(&obs).unwrap();
        assert!(json.get("detected_plu").is_none());
        assert_eq!(json["model_organic_prediction"], "ORGANIC");
        let parsed: ProduceObservation = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, obs);
    }

    #[test]
    fn raw_payload_converts() {
        let raw: RawObservation = serde_json::from_str(
            r#"{
                "produce_label": "apple",
                "produce_confidence": 0.91,
                "model_organic_prediction": "Organic",
                "model_organic_confidence": 0.8,
                "detected_plu": "4131",
                "plu_confidence": 0.7,
                "plu_meaning": "ignored"
            }"#,
        )
        .unwrap();
        let obs = ProduceObservation::try_from(raw).unwrap();
        assert_eq!(obs.model_organic_prediction, OrganicLabel::Organic);
        assert_eq!(obs.detected_plu.unwrap().as_str(), "4131");
        assert_eq!(obs.plu_confidence, Some(0.7));
    }

    #[test]
    fn raw_payload_accepts_legacy_fields() {
        let raw: RawObservation = serde_json::from_str(
            r#"{
                "produce_label": "carrot",
                "produce_confidence": 0.9,
                "organic_label": "Non-Organic",
                "organic_confidence": 0.65
            }"#,
        )
        .unwrap();
        let obs = ProduceObservation::try_from(raw).unwrap();
        assert_eq!(obs.model_organic_prediction, OrganicLabel::NonOrganic);
        assert_eq!(obs.model_organic_confidence, 0.65);
        assert!(obs.detected_plu.is_none());
    }

    #[test]
    fn raw_payload_treats_placeholder_plu_as_absent() {
        for placeholder in ["", "Not Detected"] {
            let raw = RawObservation {
                produce_label: Some("kiwi".into()),
                produce_confidence: Some(0.8),
                model_organic_prediction: Some("ORGANIC".into()),
                model_organic_confidence: Some(0.75),
                detected_plu: Some(placeholder.into()),
                plu_confidence: Some(0.2),
                ..Default::default()
            };
            let obs = ProduceObservation::try_from(raw).unwrap();
            assert!(obs.detected_plu.is_none());
            assert!(obs.plu_confidence.is_none());
        }
    }

    #[test]
    fn raw_payload_reports_missing_fields() {
        let raw = RawObservation {
            produce_label: Some("pear".into()),
            produce_confidence: Some(0.8),
            model_organic_confidence: Some(0.5),
            ..Default::default()
        };
        assert_eq!(
            ProduceObservation::try_from(raw),
            Err(ValidationError::MissingField("model_organic_prediction"))
        );

        assert_eq!(
            ProduceObservation::try_from(RawObservation::default()),
            Err(ValidationError::MissingField("produce_label"))
        );
    }

    #[test]
    fn raw_payload_rejects_malformed_plu() {
        let raw = RawObservation {
            produce_label: Some("pear".into()),
            produce_confidence: Some(0.8),
            model_organic_prediction: Some("ORGANIC".into()),
            model_organic_confidence: Some(0.5),
            detected_plu: Some("94O11".into()),
            ..Default::default()
        };
        assert_eq!(
            ProduceObservation::try_from(raw),
            Err(ValidationError::MalformedPlu("94O11".into()))
        );
    }

    #[test]
    fn classified_scan_keeps_advice() {
        let raw: RawObservation = serde_json::from_str(
            r#"{
                "produce_label": "banana",
                "produce_confidence": 0.97,
                "model_organic_prediction": "ORGANIC",
                "model_organic_confidence": 0.92,
                "detected_plu": "94011",
                "automatic_advice": "**Nutrition:** potassium\n**Cleaning Tips:** rinse"
            }"#,
        )
        .unwrap();
        let scan = ClassifiedScan::try_from(raw).unwrap();
        assert_eq!(scan.observation.produce_label, "banana");
        assert_eq!(
            scan.advice.as_deref(),
            Some("**Nutrition:** potassium\n**Cleaning Tips:** rinse")
        );
    }

    #[test]
    fn legacy_split_advice_is_joined() {
        let raw = RawObservation {
            automatic_advice: Some("   ".into()),
            nutrition_facts: Some("Vitamin C".into()),
            cleaning_tips: Some("Scrub the rind".into()),
            ..Default::default()
        };
        assert_eq!(
            raw.advice().as_deref(),
            Some("**Nutrition:** Vitamin C\n\n**Cleaning Tips:** Scrub the rind")
        );
        assert!(RawObservation::default().advice().is_none());
    }

    #[test]
    fn classified_scan_still_validates() {
        let raw = RawObservation {
            automatic_advice: Some("Rinse well.".into()),
            ..Default::default()
        };
        assert_eq!(
            ClassifiedScan::try_from(raw),
            Err(ValidationError::MissingField("produce_label"))
        );
    }
}

use thiserror::Error;

/// Malformed input handed to the reconciler or one of its boundary decoders.
///
/// Never recovered locally: a caller that gets one of these must show a
/// "could not analyze" state instead of a verdict.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field} must be within [0, 1], got {value}")]
    ConfidenceOutOfRange { field: &'static str, value: f64 },

    #[error("malformed PLU code {0:?}: expected 4 or 5 digits")]
    MalformedPlu(String),

    #[error("unrecognised organic prediction {0:?}")]
    UnknownPrediction(String),

    #[error("{0} must not be blank")]
    Blank(&'static str),
}

/// A well-formed PLU code that is absent from the lookup table.
///
/// Expected and recoverable: the reconciler treats it like a scan with no
/// sticker at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("PLU code {code} not found")]
pub struct PluNotFound {
    pub code: String,
}

/// Check that a confidence score is a finite value in `[0, 1]`.
pub fn check_confidence(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::ConfidenceOutOfRange { field, value })
    }
}

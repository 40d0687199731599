pub mod advice;
pub mod context;
pub mod error;
pub mod observation;
pub mod plu;
pub mod records;
pub mod verdict;

pub use advice::AdviceSections;
pub use context::{chat_context, system_prompt};
pub use error::{PluNotFound, ValidationError};
pub use observation::{ClassifiedScan, OrganicLabel, ProduceObservation, RawObservation};
pub use plu::{PluCode, PluLookup, PluLookupResult, digits_only};
pub use records::{FraudReport, NewFraudReport, NewScan, ScanRecord};
pub use verdict::{MatchType, Reliability, Verdict};

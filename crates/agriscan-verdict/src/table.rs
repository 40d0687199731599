//! Static PLU reference table.
//!
//! Holds canonical 4-digit conventional codes for common produce together
//! with their `9`-prefixed organic counterparts. The stored `is_organic` flag
//! must agree with the shape rule on [`PluCode::is_organic`]; tables that
//! disagree are rejected at construction.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use agriscan_core::{PluCode, PluLookup, PluLookupResult, PluNotFound, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Built-in rows: `(code, meaning, is_organic)`.
const STANDARD_ROWS: &[(&str, &str, bool)] = &[
    ("4011", "Bananas, yellow (conventionally grown)", false),
    ("94011", "Bananas, yellow (organically grown)", true),
    ("84011", "Bananas, yellow (retired 8-prefix, conventionally grown)", false),
    ("4131", "Apples, Fuji (conventionally grown)", false),
    ("94131", "Apples, Fuji (organically grown)", true),
    ("4133", "Apples, Gala (conventionally grown)", false),
    ("94133", "Apples, Gala (organically grown)", true),
    ("4017", "Apples, Granny Smith (conventionally grown)", false),
    ("94017", "Apples, Granny Smith (organically grown)", true),
    ("4015", "Apples, Red Delicious (conventionally grown)", false),
    ("94015", "Apples, Red Delicious (organically grown)", true),
    ("4020", "Apples, Golden Delicious (conventionally grown)", false),
    ("94020", "Apples, Golden Delicious (organically grown)", true),
    ("4046", "Avocados, Hass (conventionally grown)", false),
    ("94046", "Avocados, Hass (organically grown)", true),
    ("4012", "Oranges, Navel (conventionally grown)", false),
    ("94012", "Oranges, Navel (organically grown)", true),
    ("4048", "Limes (conventionally grown)", false),
    ("94048", "Limes (organically grown)", true),
    ("4053", "Lemons (conventionally grown)", false),
    ("94053", "Lemons (organically grown)", true),
    ("4030", "Kiwifruit (conventionally grown)", false),
    ("94030", "Kiwifruit (organically grown)", true),
    ("4022", "Grapes, green seedless (conventionally grown)", false),
    ("94022", "Grapes, green seedless (organically grown)", true),
    ("4023", "Grapes, red seedless (conventionally grown)", false),
    ("94023", "Grapes, red seedless (organically grown)", true),
    ("4062", "Cucumbers (conventionally grown)", false),
    ("94062", "Cucumbers (organically grown)", true),
    ("4065", "Peppers, green bell (conventionally grown)", false),
    ("94065", "Peppers, green bell (organically grown)", true),
    ("4088", "Peppers, red bell (conventionally grown)", false),
    ("94088", "Peppers, red bell (organically grown)", true),
    ("4087", "Tomatoes, Roma (conventionally grown)", false),
    ("94087", "Tomatoes, Roma (organically grown)", true),
    ("4664", "Tomatoes, on the vine (conventionally grown)", false),
    ("94664", "Tomatoes, on the vine (organically grown)", true),
    ("4562", "Carrots, loose (conventionally grown)", false),
    ("94562", "Carrots, loose (organically grown)", true),
    ("4060", "Broccoli (conventionally grown)", false),
    ("94060", "Broccoli (organically grown)", true),
    ("4072", "Potatoes, Russet (conventionally grown)", false),
    ("94072", "Potatoes, Russet (organically grown)", true),
    ("4082", "Onions, red (conventionally grown)", false),
    ("94082", "Onions, red (organically grown)", true),
];

static STANDARD: LazyLock<PluTable> = LazyLock::new(|| {
    let rows = STANDARD_ROWS.iter().map(|&(code, meaning, is_organic)| {
        (
            code.to_string(),
            PluTableEntry {
                meaning: meaning.to_string(),
                is_organic,
            },
        )
    });
    PluTable::from_entries(rows).expect("built-in PLU table is well-formed")
});

/// One table row as stored on disk: the code is the map key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluTableEntry {
    pub meaning: String,
    pub is_organic: bool,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Malformed(#[from] ValidationError),

    #[error("PLU {code}: stored is_organic={stored} contradicts the code's shape")]
    Inconsistent { code: String, stored: bool },

    #[error("PLU {code} appears more than once")]
    Duplicate { code: String },
}

/// Read-only PLU table keyed by code.
#[derive(Debug, Clone)]
pub struct PluTable {
    entries: HashMap<PluCode, PluLookupResult>,
}

/// Summary statistics for a PluTable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluTableSummary {
    pub total: usize,
    pub organic: usize,
    pub conventional: usize,
}

impl PluTable {
    /// The built-in table, constructed once per process.
    pub fn standard() -> &'static PluTable {
        &STANDARD
    }

    /// Build a table from `(code, entry)` pairs.
    ///
    /// Every code must be 4–5 digits, appear once, and have an `is_organic`
    /// flag that matches the shape rule.
    pub fn from_entries(
        rows: impl IntoIterator<Item = (String, PluTableEntry)>,
    ) -> Result<Self, TableError> {
        let mut entries = HashMap::new();
        for (code, entry) in rows {
            let code = PluCode::parse(&code)?;
            if code.is_organic() != entry.is_organic {
                return Err(TableError::Inconsistent {
                    code: code.to_string(),
                    stored: entry.is_organic,
                });
            }
            if entries.contains_key(&code) {
                return Err(TableError::Duplicate {
                    code: code.to_string(),
                });
            }
            entries.insert(
                code.clone(),
                PluLookupResult {
                    code,
                    is_organic: entry.is_organic,
                    meaning: entry.meaning,
                },
            );
        }
        Ok(Self { entries })
    }

    /// Build a table from the on-disk map format: `{"4011": {"meaning": ..., "is_organic": false}}`.
    pub fn from_map(map: BTreeMap<String, PluTableEntry>) -> Result<Self, TableError> {
        Self::from_entries(map)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries ordered by code.
    pub fn entries(&self) -> Vec<&PluLookupResult> {
        let mut out: Vec<&PluLookupResult> = self.entries.values().collect();
        out.sort_by(|a, b| a.code.cmp(&b.code));
        out
    }

    /// Summary statistics.
    pub fn summary(&self) -> PluTableSummary {
        let organic = self.entries.values().filter(|e| e.is_organic).count();
        PluTableSummary {
            total: self.entries.len(),
            organic,
            conventional: self.entries.len() - organic,
        }
    }
}

impl PluLookup for PluTable {
    fn lookup(&self, code: &PluCode) -> Result<PluLookupResult, PluNotFound> {
        self.entries.get(code).cloned().ok_or_else(|| PluNotFound {
            code: code.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> PluCode {
        PluCode::parse(s).unwrap()
    }

    fn entry(meaning: &str, is_organic: bool) -> PluTableEntry {
        PluTableEntry {
            meaning: meaning.into(),
            is_organic,
        }
    }

    #[test]
    fn standard_table_builds() {
        let table = PluTable::standard();
        assert_eq!(table.len(), STANDARD_ROWS.len());
    }

    #[test]
    fn stored_flag_matches_shape_for_every_entry() {
        for e in PluTable::standard().entries() {
            let s = e.code.as_str();
            let by_shape = s.len() == 5 && s.starts_with('9');
            assert_eq!(e.is_organic, by_shape, "entry {s}");
            assert_eq!(e.is_organic, e.code.is_organic(), "entry {s}");
        }
    }

    #[test]
    fn every_conventional_code_has_organic_counterpart() {
        let table = PluTable::standard();
        for e in table.entries() {
            if e.code.as_str().len() == 4 {
                let organic = code(&format!("9{}", e.code));
                let found = table
                    .lookup(&organic)
                    .unwrap_or_else(|_| panic!("missing organic counterpart for {}", e.code));
                assert!(found.is_organic);
            }
        }
    }

    #[test]
    fn banana_codes() {
        let table = PluTable::standard();
        let conventional = table.lookup(&code("4011")).unwrap();
        assert!(!conventional.is_organic);
        assert!(conventional.meaning.contains("Bananas"));

        let organic = table.lookup(&code("94011")).unwrap();
        assert!(organic.is_organic);
        assert!(organic.meaning.contains("organically grown"));
    }

    #[test]
    fn five_digit_non_nine_prefix_is_conventional() {
        let gm = PluTable::standard().lookup(&code("84011")).unwrap();
        assert!(!gm.is_organic);
    }

    #[test]
    fn unknown_code_not_found() {
        let err = PluTable::standard().lookup(&code("99999")).unwrap_err();
        assert_eq!(err.code, "99999");
    }

    #[test]
    fn summary_counts() {
        let summary = PluTable::standard().summary();
        assert_eq!(summary.total, STANDARD_ROWS.len());
        assert_eq!(summary.organic + summary.conventional, summary.total);
        assert_eq!(
            summary.organic,
            STANDARD_ROWS.iter().filter(|r| r.2).count()
        );
    }

    #[test]
    fn entries_sorted_by_code() {
        let entries = PluTable::standard().entries();
        for pair in entries.windows(2) {
            assert!(pair[0].code < pair[1].code);
        }
    }

    #[test]
    fn rejects_inconsistent_flag() {
        let err = PluTable::from_entries([("4011".to_string(), entry("Bananas", true))])
            .unwrap_err();
        assert!(matches!(
            err,
            TableError::Inconsistent { ref code, stored: true } if code == "4011"
        ));
    }

    #[test]
    fn rejects_malformed_code() {
        let err =
            PluTable::from_entries([("40x1".to_string(), entry("?", false))]).unwrap_err();
        assert!(matches!(
            err,
            TableError::Malformed(ValidationError::MalformedPlu(_))
        ));
    }

    #[test]
    fn rejects_duplicate_code() {
        let err = PluTable::from_entries([
            ("4011".to_string(), entry("Bananas", false)),
            ("94011".to_string(), entry("Organic bananas", true)),
            ("4011".to_string(), entry("Bananas again", false)),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::Duplicate { ref code } if code == "4011"));
    }

    #[test]
    fn from_json_map() {
        let map: BTreeMap<String, PluTableEntry> = serde_json::from_str(
            r#"{
                "4225": {"meaning": "Avocados, large Hass", "is_organic": false},
                "94225": {"meaning": "Avocados, large Hass (organic)", "is_organic": true}
            }"#,
        )
        .unwrap();
        let table = PluTable::from_map(map).unwrap();
        assert_eq!(table.summary().organic, 1);
        assert!(table.lookup(&code("94225")).unwrap().is_organic);
    }
}

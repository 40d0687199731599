//! Verdict reconciliation: cross-checks the vision model's organic prediction
//! against the PLU code read from the sticker (or typed in by the user).

mod advice;
pub mod reconciler;
pub mod table;

pub use reconciler::{reconcile, reconcile_with_manual_plu, reliability_for};
pub use table::{PluTable, PluTableEntry, PluTableSummary, TableError};

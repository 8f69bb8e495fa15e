//! Reconciliation of API songs with spreadsheet data.
//!
//! [`merge`] runs first and produces the dataset that is persisted;
//! [`backfill`] is the corrective second pass over that dataset.

mod backfill;
mod engine;

pub use backfill::*;
pub use engine::*;

//! Spreadsheet ingestion.
//!
//! Sheets come in two shapes: the new-song sheet, whose records repeat in
//! fixed-width groups across each row, and constant sheets with a named
//! header row. Both feed one [`SheetLookup`]; only the new-song sheet feeds
//! the [`CandidateTable`].

mod ingest;
mod lookup;

pub use ingest::*;
pub use lookup::*;

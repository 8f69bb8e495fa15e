//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod backfill;
pub mod inspect;
pub mod update;

//! Chart-related types and data structures.
//!
//! This module contains types for representing songs and their charts:
//! - `Difficulty` - chart difficulties (BAS, ADV, EXP, MAS, ULT, WE)
//! - `Song`, `SongMeta`, `ChartRecord` - the dataset records
//! - `Level` - numeric or display chart level
//! - title normalization and content-derived song ids

mod difficulty;
mod id;
mod level;
mod song;
mod title;

pub use difficulty::*;
pub use id::*;
pub use level::*;
pub use song::*;
pub use title::*;

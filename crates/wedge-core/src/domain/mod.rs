//! Domain entities: card identifiers and duplicate-read suppression.

pub mod dedupe;
pub mod uid;

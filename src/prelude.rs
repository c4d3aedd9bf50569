//! Prelude module for the khmer_calendar crate.
//!
//! Re-exports the derive macros from derive_more used across the modules.

#[allow(unused_imports)]
pub use derive_more::{Display, Into};

//! Document layer for yamlmatch.
//!
//! Turns the loosely typed inputs of a match into YAML value trees and back
//! into canonical text for display.
//!
//! # Key Types
//!
//! - [`MatchInput`] — Closed set of accepted input shapes (text, bytes, `Display`)
//! - [`MatchError`] / [`Side`] — Extraction and parse failures, attributed to one side
//! - [`parse_document`] — YAML text to [`Value`]
//! - [`render`] / [`normalise`] — Canonical, key-sorted rendering
//! - [`yaml11`] — YAML 1.1 resolution of plain scalars (`yes`, `off`, `010`)

pub mod error;
pub mod input;
pub mod parse;
pub mod render;
pub mod yaml11;

pub use error::{MatchError, MatchResult, Side};
pub use input::{extract_text, MatchInput};
pub use parse::parse_document;
pub use render::{canonicalize, compare_values, normalise, render};

pub use serde_yaml::Value;

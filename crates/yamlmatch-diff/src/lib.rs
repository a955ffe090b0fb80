//! Diff engine for yamlmatch.
//!
//! Compares two YAML value trees and reports every point where they diverge,
//! each with the path leading to it.
//!
//! # Key Types
//!
//! - [`ValueDiff`] / [`DiffEntry`] -- Structural diff (changed / type mismatch / missing)
//! - [`DiffPath`] / [`PathSegment`] -- Location of an entry inside the tree
//! - [`RenderedDiff`] / [`DiffHunk`] / [`DiffLine`] -- Expected vs actual rendering, line by line

pub mod inline;
pub mod path;
pub mod text_diff;
pub mod value_diff;

pub use inline::{inline, ValueKind};
pub use path::{DiffPath, PathSegment};
pub use text_diff::{diff_text, DiffHunk, DiffLine, LineSpan, RenderedDiff};
pub use value_diff::{diff_values, DiffEntry, MissingFrom, ValueDiff};

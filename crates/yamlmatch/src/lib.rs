//! Semantic YAML matching for assertion-style tests.
//!
//! Two documents match when they deserialize to the same data, regardless of
//! formatting, key order, or quoting. On mismatch the failure message shows
//! both documents in canonical form followed by one line per divergent path.
//!
//! ```
//! use yamlmatch::{expect, match_yaml_with_diffs};
//!
//! expect("a: 1\nb: 2").to(match_yaml_with_diffs(r#"{"b": 2, "a": 1}"#));
//! expect("a: 1").to_not(match_yaml_with_diffs("a: 2"));
//! ```

pub mod config;
pub mod expectation;
pub mod format;
pub mod matcher;
pub mod yaml_matcher;

pub use config::MatcherConfig;
pub use expectation::{expect, Expectation};
pub use matcher::Matcher;
pub use yaml_matcher::{match_yaml_with_diffs, MatchYamlWithDiffs, DIFFS_HEADING};

// Re-export key types
pub use yamlmatch_diff::{DiffEntry, DiffPath, MissingFrom, ValueDiff};
pub use yamlmatch_doc::{MatchError, MatchInput, MatchResult, Side, Value};

//! YAML document parsing into a value tree.

use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

use crate::error::{MatchError, MatchResult, Side};
use crate::yaml11::resolve_document;

/// Parse `text` into a value tree, attributing any failure to `side`.
///
/// A document without content (empty, whitespace, comments, or a bare
/// `---`) is `Null`. When the stream holds several documents only the first
/// one is returned. Plain scalars resolve as in YAML 1.1, so `yes` and `off`
/// are booleans and `010` is octal; quoted scalars stay strings.
///
/// Duplicate mapping keys are rejected.
pub fn parse_document(side: Side, text: &str) -> MatchResult<Value> {
    if is_blank(text) {
        return Ok(Value::Null);
    }

    let first = match serde_yaml::Deserializer::from_str(text).next() {
        Some(document) => Value::deserialize(document),
        None => return Ok(Value::Null),
    };

    first.map(|value| resolve_document(text, value)).map_err(|source| {
        debug!(side = side.noun(), error = %source, "document is not valid YAML");
        MatchError::Parse {
            side,
            text: text.to_owned(),
            source,
        }
    })
}

fn is_blank(text: &str) -> bool {
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

//! Formatting of values for matcher messages.
//!
//! Produces the `<type>: value` layout assertion messages use, e.g.
//!
//! ```text
//! Expected
//!     <string>: b: 2
//! to match YAML of
//!     <string>: a: 1
//! ```

use yamlmatch_doc::MatchInput;

/// One level of indentation.
pub const INDENT: &str = "    ";

/// Format a value with its type name at the given indentation depth.
///
/// Continuation lines of multi-line values are indented to the same depth.
/// Values longer than `max_length` characters are truncated (`0` = never).
pub fn object(type_name: &str, value: &str, indentation: usize, max_length: usize) -> String {
    let indent = INDENT.repeat(indentation);
    let value = truncate(value, max_length);
    let value = value.replace('\n', &format!("\n{indent}"));
    format!("{indent}<{type_name}>: {value}")
}

/// Format a match input, showing `<nil>: nil` for a missing value.
pub fn input(input: &MatchInput, indentation: usize, max_length: usize) -> String {
    object(input.type_name(), &input_value(input), indentation, max_length)
}

/// The value part of a formatted input.
pub fn input_value(input: &MatchInput) -> String {
    match input {
        MatchInput::Text(s) => s.clone(),
        MatchInput::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        MatchInput::Stringer(d) => d.to_string(),
        MatchInput::Other { repr, .. } => repr.clone(),
        MatchInput::Nil => "nil".into(),
    }
}

/// Compose `Expected <actual> <text> <expected>` for two rendered strings.
pub fn message(actual: &str, text: &str, expected: &str, max_length: usize) -> String {
    format!(
        "Expected\n{}\n{text}\n{}",
        object("string", actual, 1, max_length),
        object("string", expected, 1, max_length)
    )
}

fn truncate(value: &str, max_length: usize) -> String {
    if max_length == 0 || value.chars().count() <= max_length {
        return value.to_owned();
    }
    let kept: String = value.chars().take(max_length).collect();
    format!("{kept}...\n(representation truncated at {max_length} characters)")
}

//! The YAML matcher: semantic equality with a per-path diff on failure.

use tracing::debug;
use yamlmatch_diff::{diff_text, diff_values, DiffEntry};
use yamlmatch_doc::{extract_text, normalise, parse_document, MatchError, MatchInput, MatchResult, Side};

use crate::config::MatcherConfig;
use crate::format;
use crate::matcher::Matcher;

/// Heading placed above the diff lines in failure messages.
pub const DIFFS_HEADING: &str = "Diffs: (expected vs actual)";

/// Build a matcher that succeeds when the actual input is the same YAML
/// document as `expected`, regardless of formatting, key order, or quoting.
///
/// Construction never fails; unsupported inputs are reported by
/// [`Matcher::matches`].
pub fn match_yaml_with_diffs(expected: impl Into<MatchInput>) -> MatchYamlWithDiffs {
    MatchYamlWithDiffs::new(expected)
}

/// Semantic YAML matcher.
///
/// Holds the expected input and the diff entries of the last
/// [`matches`](Matcher::matches) call. Each assertion should use its own
/// instance.
#[derive(Debug)]
pub struct MatchYamlWithDiffs {
    expected: MatchInput,
    config: MatcherConfig,
    diffs: Vec<DiffEntry>,
}

/// Both sides of one match, extracted to text.
struct MatchRequest {
    actual: String,
    expected: String,
}

impl MatchYamlWithDiffs {
    pub fn new(expected: impl Into<MatchInput>) -> Self {
        Self {
            expected: expected.into(),
            config: MatcherConfig::default(),
            diffs: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: MatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn expected(&self) -> &MatchInput {
        &self.expected
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Diff entries recorded by the last `matches` call, expected as the
    /// left-hand side.
    pub fn diffs(&self) -> &[DiffEntry] {
        &self.diffs
    }

    /// The recorded diff entries as message lines.
    pub fn diff_lines(&self) -> Vec<String> {
        self.diffs.iter().map(ToString::to_string).collect()
    }

    fn extract(&self, side: Side, input: &MatchInput) -> MatchResult<String> {
        extract_text(input).ok_or_else(|| {
            debug!(side = side.noun(), kind = input.type_name(), "unsupported matcher input");
            MatchError::Extraction {
                matcher: self.config.name.clone(),
                side,
                formatted: format::input(input, 1, self.config.max_length),
            }
        })
    }

    fn request(&self, actual: &MatchInput) -> MatchResult<MatchRequest> {
        Ok(MatchRequest {
            actual: self.extract(Side::Actual, actual)?,
            expected: self.extract(Side::Expected, &self.expected)?,
        })
    }

    // Falls back to the raw text, or the formatted value, when a side cannot
    // be rendered, so that building a message never fails.
    fn rendering(&self, side: Side, input: &MatchInput) -> String {
        match extract_text(input) {
            Some(text) => normalise(side, &text).unwrap_or(text),
            None => format::input_value(input),
        }
    }

    fn compose(&self, actual: &MatchInput, text: &str) -> String {
        let actual_rendering = self.rendering(Side::Actual, actual);
        let expected_rendering = self.rendering(Side::Expected, &self.expected);

        let mut message = format::message(
            &actual_rendering,
            text,
            &expected_rendering,
            self.config.max_length,
        );
        message.push('\n');
        message.push_str(DIFFS_HEADING);
        message.push('\n');
        message.push_str(&self.diff_lines().join("\n"));
        message.push('\n');

        if self.config.show_rendered_diff {
            let rendered = diff_text(&expected_rendering, &actual_rendering);
            if !rendered.is_empty() {
                message.push_str(&format!("Rendered diff (expected vs actual):\n{rendered}\n"));
            }
        }
        message
    }
}

impl Matcher for MatchYamlWithDiffs {
    fn matches(&mut self, actual: &MatchInput) -> MatchResult<bool> {
        self.diffs.clear();

        let request = self.request(actual)?;
        let actual_value = parse_document(Side::Actual, &request.actual)?;
        let expected_value = parse_document(Side::Expected, &request.expected)?;

        let diff = diff_values(&expected_value, &actual_value);
        debug!(diffs = diff.len(), "compared YAML documents");

        self.diffs = diff.entries;
        Ok(self.diffs.is_empty())
    }

    fn failure_message(&self, actual: &MatchInput) -> String {
        self.compose(actual, "to match YAML of")
    }

    fn negated_failure_message(&self, actual: &MatchInput) -> String {
        self.compose(actual, "not to match YAML of")
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use proptest::prelude::*;

    use super::*;

    fn run(expected: impl Into<MatchInput>, actual: impl Into<MatchInput>) -> MatchResult<bool> {
        match_yaml_with_diffs(expected).matches(&actual.into())
    }

    struct Manifest;

    impl fmt::Display for Manifest {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("kind: Pod\nname: web")
        }
    }

    #[test]
    fn equal_documents_match() {
        assert!(run("a: 1", "a: 1").unwrap());
        assert!(run(r#"{"a":1}"#, "a: 1").unwrap());
        assert!(run("", "---").unwrap());
    }

    #[test]
    fn key_order_is_irrelevant() {
        assert!(run(r#"{"b":2, "a":1}"#, "a: 1\nb: 2").unwrap());
    }

    #[test]
    fn yaml11_booleans_and_octal_match_their_values() {
        assert!(run("a: true\nb: 8", "a: yes\nb: 010").unwrap());
        assert!(run("[true, false, 3]", "[on, Off, 0b11]").unwrap());
        assert!(run("no: 1", "false: 1").unwrap());
    }

    #[test]
    fn quoted_yaml11_words_are_strings() {
        assert!(run(r#"{"a": "yes"}"#, "a: 'yes'").unwrap());

        let mut m = match_yaml_with_diffs("a: true");
        let actual: MatchInput = "a: 'yes'".into();
        assert!(!m.matches(&actual).unwrap());
        assert_eq!(m.diff_lines(), vec![r#"["a"]: true != "yes" (bool vs string)"#]);
        assert!(m.failure_message(&actual).contains("a: 'yes'"));
    }

    #[test]
    fn mismatch_is_not_an_error() {
        let mut m = match_yaml_with_diffs(r#"{"b":2, "a":1}"#);
        assert!(!m.matches(&"a: 1".into()).unwrap());
        assert_eq!(m.diffs().len(), 1);
        assert!(m.diff_lines()[0].contains(r#"["b"]"#));
    }

    #[test]
    fn bytes_and_text_are_interchangeable() {
        assert!(run(b"a: 1".to_vec(), b"a: 1".to_vec()).unwrap());
        assert!(run(b"a: 1".to_vec(), "a: 1").unwrap());
        assert!(run("a: 1", b"a: 1".as_slice()).unwrap());
    }

    #[test]
    fn stringers_are_accepted() {
        assert!(run("name: web\nkind: Pod", MatchInput::stringer(Manifest)).unwrap());
    }

    #[test]
    fn malformed_actual_is_an_error() {
        let err = run("", "good:\nbad").unwrap_err();
        assert_eq!(err.side(), Side::Actual);
        assert!(err
            .to_string()
            .contains("Actual 'good:\nbad' should be valid YAML"));
    }

    #[test]
    fn malformed_expected_is_an_error() {
        let err = run("good:\nbad", "").unwrap_err();
        assert_eq!(err.side(), Side::Expected);
        assert!(err
            .to_string()
            .contains("Expected 'good:\nbad' should be valid YAML"));
    }

    #[test]
    fn errors_take_precedence_over_mismatches() {
        let err = run("a: 1", "{b: 2").unwrap_err();
        assert!(matches!(err, MatchError::Parse { side: Side::Actual, .. }));
    }

    #[test]
    fn unsupported_actual_is_an_error() {
        let err = run("", 2).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Got actual:\n    <i32>: 2"), "{msg}");
        assert!(msg.starts_with("MatchYamlWithDiffs matcher requires a string, stringer, or byte sequence."));

        let err = run("", None::<&str>).unwrap_err();
        assert!(err.to_string().contains("Got actual:\n    <nil>: nil"));
    }

    #[test]
    fn unsupported_expected_is_an_error() {
        let err = run(2, "").unwrap_err();
        assert!(err.to_string().contains("Got expected:\n    <i32>: 2"));

        let err = run(MatchInput::Nil, "").unwrap_err();
        assert!(err.to_string().contains("Got expected:\n    <nil>: nil"));
    }

    #[test]
    fn actual_is_checked_before_expected() {
        let err = run(MatchInput::Nil, 2).unwrap_err();
        assert_eq!(err.side(), Side::Actual);
    }

    #[test]
    fn configured_name_appears_in_errors() {
        let mut m = match_yaml_with_diffs("")
            .with_config(MatcherConfig::default().with_name("MatchManifest"));
        let err = m.matches(&true.into()).unwrap_err();
        assert!(err.to_string().starts_with("MatchManifest matcher requires"));
    }

    #[test]
    fn failure_message_layout() {
        let m = match_yaml_with_diffs("a: 1");
        let msg = m.failure_message(&"b: 2".into());
        assert!(msg.starts_with(
            "Expected\n    <string>: b: 2\nto match YAML of\n    <string>: a: 1\nDiffs: (expected vs actual)\n"
        ));
    }

    #[test]
    fn failure_message_is_normalised() {
        let m = match_yaml_with_diffs("a: 'one'");
        let msg = m.failure_message(&"{b: two}".into());
        assert!(msg.contains("<string>: b: two\nto match YAML of\n    <string>: a: one"), "{msg}");
    }

    #[test]
    fn negated_failure_message_is_normalised() {
        let m = match_yaml_with_diffs("a: 'one'");
        let msg = m.negated_failure_message(&"{a: one}".into());
        assert!(msg.contains("<string>: a: one\nnot to match YAML of\n    <string>: a: one"), "{msg}");
    }

    #[test]
    fn failure_message_lists_cached_diffs() {
        let mut m = match_yaml_with_diffs("a: 1\nb: 2\nc: [1]");
        let actual: MatchInput = "a: 1\nb: 3\nc: []".into();
        assert!(!m.matches(&actual).unwrap());
        let msg = m.failure_message(&actual);
        assert!(msg.ends_with(&format!(
            "{DIFFS_HEADING}\n[\"b\"]: 2 != 3\n[\"c\"][0]: 1 != (missing)\n"
        )));
    }

    #[test]
    fn diffs_are_overwritten_by_each_match() {
        let mut m = match_yaml_with_diffs("a: 1");
        assert!(!m.matches(&"a: 2".into()).unwrap());
        assert_eq!(m.diffs().len(), 1);
        assert!(m.matches(&"a: 1".into()).unwrap());
        assert!(m.diffs().is_empty());
    }

    #[test]
    fn messages_without_match_have_no_diffs() {
        let m = match_yaml_with_diffs("a: 1");
        assert!(m
            .failure_message(&"a: 2".into())
            .ends_with(&format!("{DIFFS_HEADING}\n\n")));
    }

    #[test]
    fn messages_tolerate_unparseable_inputs() {
        let m = match_yaml_with_diffs("a: 1");
        let msg = m.failure_message(&"{oops".into());
        assert!(msg.contains("<string>: {oops"));
        let msg = m.failure_message(&7u8.into());
        assert!(msg.contains("<string>: 7"));
    }

    #[test]
    fn rendered_diff_is_optional() {
        let actual: MatchInput = "a: 1\nb: 3".into();
        let mut m = match_yaml_with_diffs("a: 1\nb: 2")
            .with_config(MatcherConfig::default().with_rendered_diff(true));
        assert!(!m.matches(&actual).unwrap());
        let msg = m.failure_message(&actual);
        assert!(msg.contains("Rendered diff (expected vs actual):"));
        assert!(msg.contains("-b: 2"));
        assert!(msg.contains("+b: 3"));

        let plain = match_yaml_with_diffs("a: 1\nb: 2").failure_message(&actual);
        assert!(!plain.contains("Rendered diff"));
    }

    fn arb_yaml() -> impl Strategy<Value = String> {
        prop::collection::btree_map("[a-c]", 0i64..3, 0..3).prop_map(|m| {
            m.into_iter()
                .map(|(k, v)| format!("{k}: {v}\n"))
                .collect::<String>()
        })
    }

    proptest! {
        #[test]
        fn outcome_is_symmetric(a in arb_yaml(), b in arb_yaml()) {
            prop_assert_eq!(run(a.as_str(), b.as_str()).unwrap(), run(b.as_str(), a.as_str()).unwrap());
        }

        #[test]
        fn bytes_and_text_agree(a in arb_yaml(), b in arb_yaml()) {
            let text = run(a.as_str(), b.as_str()).unwrap();
            prop_assert_eq!(run(a.clone().into_bytes(), b.as_str()).unwrap(), text);
            prop_assert_eq!(run(a.as_str(), b.clone().into_bytes()).unwrap(), text);
        }
    }
}

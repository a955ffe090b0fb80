use yamlmatch_doc::{MatchInput, MatchResult};

/// The contract an assertion API needs from a matcher.
///
/// `matches` must be called before either message method; the messages may
/// rely on state recorded by the most recent `matches` call.
pub trait Matcher {
    /// Decide whether `actual` satisfies the matcher.
    ///
    /// `Ok(false)` is an ordinary mismatch. `Err` means the inputs could not
    /// be compared at all.
    fn matches(&mut self, actual: &MatchInput) -> MatchResult<bool>;

    /// Explain why `actual` did not match.
    fn failure_message(&self, actual: &MatchInput) -> String;

    /// Explain why `actual` matched when it should not have.
    fn negated_failure_message(&self, actual: &MatchInput) -> String;
}

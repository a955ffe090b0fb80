//! Assertion-style entry point: `expect(actual).to(matcher)`.

use yamlmatch_doc::MatchInput;

use crate::matcher::Matcher;

/// Start an assertion about `actual`.
pub fn expect(actual: impl Into<MatchInput>) -> Expectation {
    Expectation {
        actual: actual.into(),
    }
}

/// An actual value awaiting a matcher.
#[derive(Debug)]
pub struct Expectation {
    actual: MatchInput,
}

impl Expectation {
    pub fn actual(&self) -> &MatchInput {
        &self.actual
    }

    /// Assert that the matcher succeeds. Panics with its failure message
    /// otherwise.
    #[track_caller]
    pub fn to<M: Matcher>(self, mut matcher: M) {
        if let Err(message) = self.try_to(&mut matcher) {
            panic!("{message}");
        }
    }

    /// Assert that the matcher fails. Panics with its negated failure message
    /// otherwise.
    #[track_caller]
    pub fn to_not<M: Matcher>(self, mut matcher: M) {
        if let Err(message) = self.try_to_not(&mut matcher) {
            panic!("{message}");
        }
    }

    /// Like [`to`](Self::to), returning the message instead of panicking.
    pub fn try_to<M: Matcher>(&self, matcher: &mut M) -> Result<(), String> {
        match matcher.matches(&self.actual) {
            Ok(true) => Ok(()),
            Ok(false) => Err(matcher.failure_message(&self.actual)),
            Err(e) => Err(e.to_string()),
        }
    }

    /// Like [`to_not`](Self::to_not), returning the message instead of
    /// panicking. A matcher error fails the assertion either way.
    pub fn try_to_not<M: Matcher>(&self, matcher: &mut M) -> Result<(), String> {
        match matcher.matches(&self.actual) {
            Ok(false) => Ok(()),
            Ok(true) => Err(matcher.negated_failure_message(&self.actual)),
            Err(e) => Err(e.to_string()),
        }
    }
}

//! Line diff between the expected and actual canonical renderings.
//!
//! Both documents are rendered with sorted keys first, so the only lines that
//! differ are the ones whose data differs. The structural diff stays the
//! authoritative result; this view is an optional extra in failure messages.

use std::fmt;
use std::ops::Range;

use similar::{ChangeTag, TextDiff};

/// Unchanged rendering lines shown around each difference.
const CONTEXT_LINES: usize = 3;

/// Where the expected and actual renderings disagree, grouped into hunks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedDiff {
    pub hunks: Vec<DiffHunk>,
}

impl RenderedDiff {
    /// True when both renderings are the same text.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Lines that appear only in the expected rendering.
    pub fn expected_only(&self) -> usize {
        self.count(|line| matches!(line, DiffLine::Expected(_)))
    }

    /// Lines that appear only in the actual rendering.
    pub fn actual_only(&self) -> usize {
        self.count(|line| matches!(line, DiffLine::Actual(_)))
    }

    fn count(&self, pred: impl Fn(&DiffLine) -> bool) -> usize {
        self.hunks
            .iter()
            .flat_map(|hunk| &hunk.lines)
            .filter(|line| pred(*line))
            .count()
    }
}

impl fmt::Display for RenderedDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, hunk) in self.hunks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{hunk}")?;
        }
        Ok(())
    }
}

/// 1-based line span of one rendering covered by a hunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSpan {
    pub first: usize,
    pub len: usize,
}

impl From<Range<usize>> for LineSpan {
    fn from(range: Range<usize>) -> Self {
        LineSpan {
            first: range.start + 1,
            len: range.len(),
        }
    }
}

/// Neighbouring differences plus their surrounding unchanged lines.
///
/// Displays as a unified-diff hunk, `-` for expected and `+` for actual.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    pub expected: LineSpan,
    pub actual: LineSpan,
    pub lines: Vec<DiffLine>,
}

impl fmt::Display for DiffHunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@@ -{},{} +{},{} @@",
            self.expected.first, self.expected.len, self.actual.first, self.actual.len
        )?;
        for line in &self.lines {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

/// One rendering line, tagged with the side(s) it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    Both(String),
    Expected(String),
    Actual(String),
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffLine::Both(s) => write!(f, " {s}"),
            DiffLine::Expected(s) => write!(f, "-{s}"),
            DiffLine::Actual(s) => write!(f, "+{s}"),
        }
    }
}

/// Diff the `expected` rendering against the `actual` one, line by line.
pub fn diff_text(expected: &str, actual: &str) -> RenderedDiff {
    if expected == actual {
        return RenderedDiff { hunks: Vec::new() };
    }

    let text_diff = TextDiff::from_lines(expected, actual);
    let mut hunks = Vec::new();

    for group in text_diff.grouped_ops(CONTEXT_LINES) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };

        let mut lines = Vec::new();
        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                lines.push(match change.tag() {
                    ChangeTag::Equal => DiffLine::Both(text),
                    ChangeTag::Delete => DiffLine::Expected(text),
                    ChangeTag::Insert => DiffLine::Actual(text),
                });
            }
        }

        hunks.push(DiffHunk {
            expected: LineSpan::from(first.old_range().start..last.old_range().end),
            actual: LineSpan::from(first.new_range().start..last.new_range().end),
            lines,
        });
    }

    RenderedDiff { hunks }
}

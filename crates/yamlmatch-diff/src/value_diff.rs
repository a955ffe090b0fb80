//! Structural diff: compare two YAML value trees.
//!
//! Every divergence is reported independently with the path it occurs at.
//! Mapping key order is ignored; sequence order is significant.

use std::fmt;

use serde_yaml::{Mapping, Value};

use crate::inline::{inline, ValueKind};
use crate::path::DiffPath;

/// Which of the two compared trees a value is absent from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingFrom {
    Lhs,
    Rhs,
}

/// The result of comparing two value trees.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueDiff {
    /// The divergences, in traversal order.
    pub entries: Vec<DiffEntry>,
}

impl ValueDiff {
    /// Create an empty value diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the trees are deeply equal.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of values present on one side only.
    pub fn missing(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, DiffEntry::Missing { .. }))
            .count()
    }

    /// Number of kind mismatches.
    pub fn type_mismatches(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, DiffEntry::TypeMismatch { .. }))
            .count()
    }

    /// Number of same-kind values that differ.
    pub fn changes(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, DiffEntry::Changed { .. }))
            .count()
    }

    /// One human-readable line per entry.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl IntoIterator for ValueDiff {
    type Item = DiffEntry;
    type IntoIter = std::vec::IntoIter<DiffEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A single point of divergence.
#[derive(Clone, Debug, PartialEq)]
pub enum DiffEntry {
    /// Both sides hold a value of the same kind, but they differ.
    Changed { path: DiffPath, lhs: Value, rhs: Value },
    /// The two sides hold values of different kinds.
    TypeMismatch { path: DiffPath, lhs: Value, rhs: Value },
    /// A mapping key or sequence element exists on one side only.
    Missing {
        path: DiffPath,
        from: MissingFrom,
        value: Value,
    },
}

impl DiffEntry {
    pub fn path(&self) -> &DiffPath {
        match self {
            DiffEntry::Changed { path, .. }
            | DiffEntry::TypeMismatch { path, .. }
            | DiffEntry::Missing { path, .. } => path,
        }
    }
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffEntry::Changed { path, lhs, rhs } => {
                write!(f, "{path}: {} != {}", inline(lhs), inline(rhs))
            }
            DiffEntry::TypeMismatch { path, lhs, rhs } => write!(
                f,
                "{path}: {} != {} ({} vs {})",
                inline(lhs),
                inline(rhs),
                ValueKind::of(lhs),
                ValueKind::of(rhs)
            ),
            DiffEntry::Missing {
                path,
                from: MissingFrom::Rhs,
                value,
            } => write!(f, "{path}: {} != (missing)", inline(value)),
            DiffEntry::Missing {
                path,
                from: MissingFrom::Lhs,
                value,
            } => write!(f, "{path}: (missing) != {}", inline(value)),
        }
    }
}

/// Compare two value trees.
///
/// The result is empty iff `lhs` and `rhs` are deeply equal. Mapping keys
/// are visited in `lhs` order, followed by keys found only in `rhs`.
pub fn diff_values(lhs: &Value, rhs: &Value) -> ValueDiff {
    let mut entries = Vec::new();
    walk(&DiffPath::root(), lhs, rhs, &mut entries);
    ValueDiff { entries }
}

fn walk(path: &DiffPath, lhs: &Value, rhs: &Value, out: &mut Vec<DiffEntry>) {
    match (lhs, rhs) {
        (Value::Mapping(l), Value::Mapping(r)) => walk_mappings(path, l, r, out),
        (Value::Sequence(l), Value::Sequence(r)) => walk_sequences(path, l, r, out),
        (Value::Tagged(l), Value::Tagged(r)) if l.tag == r.tag => {
            walk(path, &l.value, &r.value, out)
        }
        _ if ValueKind::of(lhs) != ValueKind::of(rhs) => out.push(DiffEntry::TypeMismatch {
            path: path.clone(),
            lhs: lhs.clone(),
            rhs: rhs.clone(),
        }),
        _ if lhs != rhs => out.push(DiffEntry::Changed {
            path: path.clone(),
            lhs: lhs.clone(),
            rhs: rhs.clone(),
        }),
        _ => {}
    }
}

fn walk_mappings(path: &DiffPath, lhs: &Mapping, rhs: &Mapping, out: &mut Vec<DiffEntry>) {
    for (key, l) in lhs {
        match rhs.get(key) {
            Some(r) => walk(&path.key(key), l, r, out),
            None => out.push(DiffEntry::Missing {
                path: path.key(key),
                from: MissingFrom::Rhs,
                value: l.clone(),
            }),
        }
    }

    for (key, r) in rhs {
        if !lhs.contains_key(key) {
            out.push(DiffEntry::Missing {
                path: path.key(key),
                from: MissingFrom::Lhs,
                value: r.clone(),
            });
        }
    }
}

fn walk_sequences(path: &DiffPath, lhs: &[Value], rhs: &[Value], out: &mut Vec<DiffEntry>) {
    for (i, (l, r)) in lhs.iter().zip(rhs).enumerate() {
        walk(&path.index(i), l, r, out);
    }

    // At most one of these tails is non-empty.
    for (i, l) in lhs.iter().enumerate().skip(rhs.len()) {
        out.push(DiffEntry::Missing {
            path: path.index(i),
            from: MissingFrom::Rhs,
            value: l.clone(),
        });
    }
    for (i, r) in rhs.iter().enumerate().skip(lhs.len()) {
        out.push(DiffEntry::Missing {
            path: path.index(i),
            from: MissingFrom::Lhs,
            value: r.clone(),
        });
    }
}

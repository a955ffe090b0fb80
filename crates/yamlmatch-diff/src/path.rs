//! Paths from a document root to a nested value.

use std::fmt;

use serde_yaml::Value;

use crate::inline::inline;

/// One step into a collection.
#[derive(Clone, Debug, PartialEq)]
pub enum PathSegment {
    /// A mapping key.
    Key(Value),
    /// A sequence index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(Value::String(s)) => write!(f, "[{s:?}]"),
            PathSegment::Key(key) => write!(f, "[{}]", inline(key)),
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// A location inside a value tree. The empty path is the root.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiffPath {
    segments: Vec<PathSegment>,
}

impl DiffPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// A new path one mapping key deeper.
    pub fn key(&self, key: &Value) -> Self {
        self.child(PathSegment::Key(key.clone()))
    }

    /// A new path one sequence index deeper.
    pub fn index(&self, index: usize) -> Self {
        self.child(PathSegment::Index(index))
    }

    fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for DiffPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("<root>");
        }
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

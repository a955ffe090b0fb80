use serde::{Deserialize, Serialize};

/// Default truncation threshold for formatted values in messages.
pub const DEFAULT_MAX_LENGTH: usize = 4000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Name used when an input has an unsupported type.
    pub name: String,
    /// Formatted values longer than this are truncated. `0` disables truncation.
    pub max_length: usize,
    /// Append a line diff of the two canonical renderings to failure messages.
    pub show_rendered_diff: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            name: "MatchYamlWithDiffs".into(),
            max_length: DEFAULT_MAX_LENGTH,
            show_rendered_diff: false,
        }
    }
}

impl MatcherConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_rendered_diff(mut self, show: bool) -> Self {
        self.show_rendered_diff = show;
        self
    }
}

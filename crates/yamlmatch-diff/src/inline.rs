//! Single-line display of values inside diff entries.

use std::fmt;

use serde_yaml::Value;

/// The kind of a value, as named in type mismatch entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Sequence,
    Mapping,
    Tagged,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
            Value::Tagged(_) => ValueKind::Tagged,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
            ValueKind::Tagged => "tagged",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap a value for flow-style, single-line display.
pub fn inline(value: &Value) -> Inline<'_> {
    Inline(value)
}

/// `Display` adapter returned by [`inline`].
pub struct Inline<'a>(&'a Value);

impl fmt::Display for Inline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            // Quoted so that "1" and 1 remain distinguishable.
            Value::String(s) => write!(f, "{s:?}"),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", inline(item))?;
                }
                f.write_str("]")
            }
            Value::Mapping(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", inline(k), inline(v))?;
                }
                f.write_str("}")
            }
            Value::Tagged(tagged) => write!(f, "{} {}", tagged.tag, inline(&tagged.value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn scalars() {
        assert_eq!(inline(&Value::Null).to_string(), "null");
        assert_eq!(inline(&yaml("true")).to_string(), "true");
        assert_eq!(inline(&yaml("42")).to_string(), "42");
        assert_eq!(inline(&yaml("'42'")).to_string(), "\"42\"");
    }

    #[test]
    fn collections_are_flow_style() {
        assert_eq!(inline(&yaml("- 1\n- two")).to_string(), r#"[1, "two"]"#);
        assert_eq!(
            inline(&yaml("a: 1\nb: [x]")).to_string(),
            r#"{"a": 1, "b": ["x"]}"#
        );
        assert_eq!(inline(&yaml("{}")).to_string(), "{}");
    }

    #[test]
    fn tagged_values_show_the_tag() {
        assert_eq!(inline(&yaml("!point 1")).to_string(), "!point 1");
    }

    #[test]
    fn kinds() {
        assert_eq!(ValueKind::of(&yaml("1")), ValueKind::Number);
        assert_eq!(ValueKind::of(&yaml("[]")), ValueKind::Sequence);
        assert_eq!(ValueKind::of(&yaml("~")).to_string(), "null");
    }
}

//! Input shapes accepted by the matcher and their text extraction.
//!
//! The accepted shapes form a closed set: text, raw bytes, and anything
//! implementing `Display`. Everything else is carried as [`MatchInput::Other`]
//! (or [`MatchInput::Nil`]) so that the error can show what was supplied.

use std::fmt;

/// A value handed to the matcher, either as the actual or the expected side.
pub enum MatchInput {
    /// Already textual.
    Text(String),
    /// Raw bytes, decoded as UTF-8 on extraction.
    Bytes(Vec<u8>),
    /// A value converted through its `Display` impl on every extraction.
    Stringer(Box<dyn fmt::Display>),
    /// An unsupported value, kept as its type name and debug representation.
    Other { type_name: String, repr: String },
    /// The absence of a value.
    Nil,
}

impl MatchInput {
    /// Wrap any `Display` value.
    pub fn stringer(value: impl fmt::Display + 'static) -> Self {
        MatchInput::Stringer(Box::new(value))
    }

    /// Capture an unsupported value for error reporting.
    pub fn other<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        MatchInput::Other {
            type_name: short_type_name(std::any::type_name::<T>()),
            repr: format!("{value:?}"),
        }
    }

    /// A short name for the kind of value held, as shown in diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            MatchInput::Text(_) => "string",
            MatchInput::Bytes(_) => "[]byte",
            MatchInput::Stringer(_) => "stringer",
            MatchInput::Other { type_name, .. } => type_name,
            MatchInput::Nil => "nil",
        }
    }
}

/// Extract the text of an input.
///
/// Returns `None` for shapes that carry no text. Never panics; invalid UTF-8
/// in byte input is replaced rather than rejected.
pub fn extract_text(input: &MatchInput) -> Option<String> {
    match input {
        MatchInput::Text(s) => Some(s.clone()),
        MatchInput::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
        MatchInput::Stringer(d) => Some(d.to_string()),
        MatchInput::Other { .. } | MatchInput::Nil => None,
    }
}

// Strip module paths so `alloc::string::String` shows as `String`, while
// keeping generic arguments readable.
fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            segment.push(c);
        } else {
            out.push_str(segment.rsplit("::").next().unwrap_or(&segment));
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(segment.rsplit("::").next().unwrap_or(&segment));
    out
}

impl fmt::Debug for MatchInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchInput::Text(s) => f.debug_tuple("Text").field(s).finish(),
            MatchInput::Bytes(b) => f
                .debug_tuple("Bytes")
                .field(&String::from_utf8_lossy(b))
                .finish(),
            MatchInput::Stringer(d) => f.debug_tuple("Stringer").field(&d.to_string()).finish(),
            MatchInput::Other { type_name, repr } => f
                .debug_struct("Other")
                .field("type_name", type_name)
                .field("repr", repr)
                .finish(),
            MatchInput::Nil => f.write_str("Nil"),
        }
    }
}

impl From<&str> for MatchInput {
    fn from(s: &str) -> Self {
        MatchInput::Text(s.to_owned())
    }
}

impl From<String> for MatchInput {
    fn from(s: String) -> Self {
        MatchInput::Text(s)
    }
}

impl From<&String> for MatchInput {
    fn from(s: &String) -> Self {
        MatchInput::Text(s.clone())
    }
}

impl From<Vec<u8>> for MatchInput {
    fn from(b: Vec<u8>) -> Self {
        MatchInput::Bytes(b)
    }
}

impl From<&[u8]> for MatchInput {
    fn from(b: &[u8]) -> Self {
        MatchInput::Bytes(b.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for MatchInput {
    fn from(b: &[u8; N]) -> Self {
        MatchInput::Bytes(b.to_vec())
    }
}

impl<T: Into<MatchInput>> From<Option<T>> for MatchInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(MatchInput::Nil, Into::into)
    }
}

macro_rules! impl_from_unsupported {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for MatchInput {
                fn from(value: $t) -> Self {
                    MatchInput::other(&value)
                }
            }
        )*
    };
}

impl_from_unsupported!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char);

//! YAML 1.1 scalar resolution on top of `serde_yaml`.
//!
//! `serde_yaml` resolves untagged plain scalars with the YAML 1.2 core
//! schema. Documents written for YAML 1.1 tooling also use `yes`/`no`/`on`/
//! `off`, leading-zero octal, `0b` binary and `_` digit separators, so plain
//! scalars left as strings are resolved again with the 1.1 rules. Scalar
//! styles come from the `saphyr-parser` event stream, which yields one
//! `Scalar` event per scalar node in the same order the value tree is walked.
//! Quoted and explicitly tagged scalars are never re-resolved.

use std::collections::HashMap;
use std::ops::Range;

use saphyr_parser::{Event, Parser, ScalarStyle};
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};
use tracing::debug;

/// Re-resolve the plain scalars of the first document in `text`.
///
/// `value` must be the tree `serde_yaml` produced for that document. When the
/// event stream cannot be lined up with the tree, `value` is returned as is.
pub fn resolve_document(text: &str, value: Value) -> Value {
    let Some(flags) = plain_scalar_flags(text) else {
        debug!("scalar styles unavailable; keeping core schema resolution");
        return value;
    };
    let mut flags = flags.into_iter();
    match reresolve(&value, &mut flags) {
        Some(resolved) if flags.next().is_none() => resolved,
        _ => {
            debug!("scalar events do not line up with the document; keeping core schema resolution");
            value
        }
    }
}

/// The value a YAML 1.1 parser gives the plain scalar `text`, when that is
/// not a string.
///
/// Only the forms the core schema leaves as strings matter here: the extra
/// boolean words, octal and binary integers, and digit separators.
pub fn resolve_plain(text: &str) -> Option<Value> {
    if let Some(b) = resolve_bool(text) {
        return Some(Value::Bool(b));
    }
    let plain = text.replace('_', "");
    resolve_int(&plain).or_else(|| resolve_float(&plain).map(Value::from))
}

/// Single-quote the plain scalars of `rendered` that a YAML 1.1 reader
/// would not read back as strings.
///
/// `serde_yaml` already quotes strings the core schema would misread, so
/// this only touches words like `yes` or `off` and literals like `0b11`.
pub fn quote_ambiguous_scalars(rendered: &str) -> String {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    for item in Parser::new_from_str(rendered) {
        let Ok((event, span)) = item else {
            return rendered.to_owned();
        };
        if let Event::Scalar(value, style, _, tag) = event {
            if matches!(style, ScalarStyle::Plain) && tag.is_none() && needs_quotes(&value) {
                if let Some(range) = locate(rendered, span.start.index(), span.end.index(), &value) {
                    ranges.push(range);
                }
            }
        }
    }

    let mut quoted = rendered.to_owned();
    for range in ranges.into_iter().rev() {
        quoted.insert(range.end, '\'');
        quoted.insert(range.start, '\'');
    }
    quoted
}

fn needs_quotes(token: &str) -> bool {
    resolve_plain(token).is_some()
        && matches!(serde_yaml::from_str::<Value>(token), Ok(Value::String(_)))
}

/// Byte range of a scalar whose marker indices may count chars or bytes.
fn locate(text: &str, start: usize, end: usize, value: &str) -> Option<Range<usize>> {
    let by_char = char_to_byte(text, start)
        .zip(char_to_byte(text, end))
        .map(|(s, e)| s..e);
    [by_char, Some(start..end)]
        .into_iter()
        .flatten()
        .find(|range| text.get(range.clone()) == Some(value))
}

fn char_to_byte(text: &str, index: usize) -> Option<usize> {
    text.char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .nth(index)
}

/// One flag per scalar node of the first document, in document order: true
/// for untagged plain scalars. Aliases repeat the flags of their anchor.
fn plain_scalar_flags(text: &str) -> Option<Vec<bool>> {
    let mut flags = Vec::new();
    let mut anchors: HashMap<usize, Vec<bool>> = HashMap::new();
    let mut open: Vec<(usize, usize)> = Vec::new();

    for item in Parser::new_from_str(text) {
        let (event, _) = item.ok()?;
        match event {
            Event::Scalar(_, style, anchor, tag) => {
                let plain = matches!(style, ScalarStyle::Plain) && tag.is_none();
                flags.push(plain);
                if anchor != 0 {
                    anchors.insert(anchor, vec![plain]);
                }
            }
            Event::SequenceStart(anchor, _) | Event::MappingStart(anchor, _) => {
                open.push((anchor, flags.len()));
            }
            Event::SequenceEnd | Event::MappingEnd => {
                let (anchor, start) = open.pop()?;
                if anchor != 0 {
                    anchors.insert(anchor, flags[start..].to_vec());
                }
            }
            Event::Alias(anchor) => flags.extend(anchors.get(&anchor)?.iter().copied()),
            Event::DocumentEnd => break,
            _ => {}
        }
    }
    Some(flags)
}

fn reresolve<I: Iterator<Item = bool>>(value: &Value, flags: &mut I) -> Option<Value> {
    Some(match value {
        Value::Sequence(items) => Value::Sequence(
            items
                .iter()
                .map(|item| reresolve(item, flags))
                .collect::<Option<_>>()?,
        ),
        Value::Mapping(map) => {
            let mut resolved = Mapping::with_capacity(map.len());
            for (k, v) in map {
                let k = reresolve(k, flags)?;
                let v = reresolve(v, flags)?;
                resolved.insert(k, v);
            }
            Value::Mapping(resolved)
        }
        Value::Tagged(tagged) => Value::Tagged(Box::new(TaggedValue {
            tag: tagged.tag.clone(),
            value: reresolve(&tagged.value, flags)?,
        })),
        Value::String(s) => match flags.next()? {
            true => resolve_plain(s).unwrap_or_else(|| value.clone()),
            false => value.clone(),
        },
        scalar => {
            flags.next()?;
            scalar.clone()
        }
    })
}

fn resolve_bool(text: &str) -> Option<bool> {
    match text {
        "y" | "Y" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" | "true" | "True" | "TRUE" => {
            Some(true)
        }
        "n" | "N" | "no" | "No" | "NO" | "off" | "Off" | "OFF" | "false" | "False" | "FALSE" => {
            Some(false)
        }
        _ => None,
    }
}

fn resolve_int(plain: &str) -> Option<Value> {
    let (negative, unsigned) = match plain.as_bytes().first()? {
        b'-' => (true, &plain[1..]),
        b'+' => (false, &plain[1..]),
        _ => (false, plain),
    };
    let (radix, digits) = if let Some(d) = unsigned.strip_prefix("0b") {
        (2, d)
    } else if let Some(d) = unsigned.strip_prefix("0o") {
        (8, d)
    } else if let Some(d) = unsigned.strip_prefix("0x") {
        (16, d)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let magnitude = u64::from_str_radix(digits, radix).ok()?;
    if negative {
        i64::try_from(-i128::from(magnitude)).ok().map(Value::from)
    } else {
        Some(Value::from(magnitude))
    }
}

/// `[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?`
fn resolve_float(plain: &str) -> Option<f64> {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let body = plain.strip_prefix(['-', '+']).unwrap_or(plain);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some(("", frac)) => all_digits(frac),
        Some((int, frac)) => all_digits(int) && (frac.is_empty() || all_digits(frac)),
        None => all_digits(mantissa),
    };
    let exponent_ok = exponent.map_or(true, |e| all_digits(e.strip_prefix(['-', '+']).unwrap_or(e)));
    if !(mantissa_ok && exponent_ok) {
        return None;
    }
    plain.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn resolve(text: &str) -> Value {
        let first = serde_yaml::Deserializer::from_str(text).next().unwrap();
        resolve_document(text, Value::deserialize(first).unwrap())
    }

    #[test]
    fn boolean_words() {
        for word in ["y", "Y", "yes", "Yes", "YES", "on", "On", "ON"] {
            assert_eq!(resolve_plain(word), Some(Value::Bool(true)), "{word}");
        }
        for word in ["n", "N", "no", "No", "NO", "off", "Off", "OFF"] {
            assert_eq!(resolve_plain(word), Some(Value::Bool(false)), "{word}");
        }
        assert_eq!(resolve_plain("yEs"), None);
        assert_eq!(resolve_plain("yes please"), None);
    }

    #[test]
    fn integer_forms() {
        assert_eq!(resolve_plain("010"), Some(Value::from(8u64)));
        assert_eq!(resolve_plain("-010"), Some(Value::from(-8i64)));
        assert_eq!(resolve_plain("0o17"), Some(Value::from(15u64)));
        assert_eq!(resolve_plain("0b101"), Some(Value::from(5u64)));
        assert_eq!(resolve_plain("1_000"), Some(Value::from(1000u64)));
        assert_eq!(resolve_plain("-9223372036854775808"), Some(Value::from(i64::MIN)));
        assert_eq!(resolve_plain("08"), None);
        assert_eq!(resolve_plain("0b"), None);
        assert_eq!(resolve_plain("-"), None);
    }

    #[test]
    fn float_forms() {
        assert_eq!(resolve_plain("1_000.5"), Some(Value::from(1000.5)));
        assert_eq!(resolve_plain("1."), Some(Value::from(1.0)));
        assert_eq!(resolve_plain("inf"), None);
        assert_eq!(resolve_plain("nan"), None);
        assert_eq!(resolve_plain("1e"), None);
        assert_eq!(resolve_plain("."), None);
    }

    #[test]
    fn only_plain_untagged_scalars_are_resolved() {
        let value = resolve("a: yes\nb: 'yes'\nc: \"on\"\nd: !thing off\ne: 010\nf: '010'");
        let expected: Value =
            serde_yaml::from_str("a: true\nb: 'yes'\nc: 'on'\nd: !thing 'off'\ne: 8\nf: '010'")
                .unwrap();
        assert_eq!(value, expected);
    }

    #[test]
    fn keys_and_flow_collections_are_resolved() {
        let value = resolve("{on: [no, 'no', 0b11]}");
        let expected: Value = serde_yaml::from_str("true: [false, 'no', 3]").unwrap();
        assert_eq!(value, expected);
    }

    #[test]
    fn aliases_follow_their_anchor() {
        let value = resolve("a: &x yes\nb: *x\nc: &q 'on'\nd: *q\ne: &s [off]\nf: *s");
        let expected: Value =
            serde_yaml::from_str("a: true\nb: true\nc: 'on'\nd: 'on'\ne: [false]\nf: [false]")
                .unwrap();
        assert_eq!(value, expected);
    }

    #[test]
    fn only_the_first_document_is_walked() {
        assert_eq!(resolve("yes\n---\n'no'\n"), Value::Bool(true));
    }

    #[test]
    fn ambiguous_rendered_scalars_are_quoted() {
        assert_eq!(quote_ambiguous_scalars("a: yes\nb: 1\nc: plain\n"), "a: 'yes'\nb: 1\nc: plain\n");
        assert_eq!(quote_ambiguous_scalars("off: [on]\n"), "'off': ['on']\n");
        assert_eq!(quote_ambiguous_scalars("- 'y'\n- n\n"), "- 'y'\n- 'n'\n");
        assert_eq!(quote_ambiguous_scalars("é: 1_0\n"), "é: '1_0'\n");
    }
}

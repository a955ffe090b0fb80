//! Canonical rendering of value trees.
//!
//! Mapping keys are sorted recursively with a total order before the value is
//! serialized, so two documents that differ only in key order, quoting, or
//! layout render to the same string.

use std::cmp::Ordering;

use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Number, Value};

use crate::error::{MatchResult, Side};
use crate::parse::parse_document;
use crate::yaml11::quote_ambiguous_scalars;

/// Return a copy of `value` with every mapping's keys in canonical order.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Sequence(items) => Value::Sequence(items.iter().map(canonicalize).collect()),
        Value::Mapping(map) => {
            let mut entries: Vec<(&Value, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| compare_values(a, b));
            let mut sorted = Mapping::with_capacity(entries.len());
            for (k, v) in entries {
                sorted.insert(canonicalize(k), canonicalize(v));
            }
            Value::Mapping(sorted)
        }
        Value::Tagged(tagged) => Value::Tagged(Box::new(TaggedValue {
            tag: tagged.tag.clone(),
            value: canonicalize(&tagged.value),
        })),
        scalar => scalar.clone(),
    }
}

/// Render a value in canonical form, without surrounding whitespace.
///
/// Strings a YAML 1.1 reader would take for booleans or numbers are quoted,
/// so the rendering parses back to the same value.
///
/// # Panics
///
/// Panics if the serializer rejects the value. Values produced by
/// [`parse_document`] always serialize.
pub fn render(value: &Value) -> String {
    match serde_yaml::to_string(&canonicalize(value)) {
        Ok(text) => quote_ambiguous_scalars(&text).trim().to_owned(),
        Err(e) => panic!("canonical rendering of a parsed YAML value failed: {e}"),
    }
}

/// Parse `text` and render it canonically.
pub fn normalise(side: Side, text: &str) -> MatchResult<String> {
    Ok(render(&parse_document(side, text)?))
}

/// A total order over values used to sort mapping keys.
///
/// Kinds are ordered null, bool, number, string, sequence, mapping, tagged.
/// Integers compare exactly, other numbers by value with an integer placed
/// before an equal float. Strings compare lexicographically, collections
/// element by element.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    kind_rank(a).cmp(&kind_rank(b)).then_with(|| match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Sequence(x), Value::Sequence(y)) => compare_iter(x.iter(), y.iter()),
        (Value::Mapping(x), Value::Mapping(y)) => {
            let mut xs: Vec<_> = x.iter().collect();
            let mut ys: Vec<_> = y.iter().collect();
            xs.sort_by(|(a, _), (b, _)| compare_values(a, b));
            ys.sort_by(|(a, _), (b, _)| compare_values(a, b));
            for ((xk, xv), (yk, yv)) in xs.iter().zip(ys.iter()) {
                let ord = compare_values(xk, yk).then_with(|| compare_values(xv, yv));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            xs.len().cmp(&ys.len())
        }
        (Value::Tagged(x), Value::Tagged(y)) => x
            .tag
            .to_string()
            .cmp(&y.tag.to_string())
            .then_with(|| compare_values(&x.value, &y.value)),
        _ => Ordering::Equal,
    })
}

fn compare_numbers(x: &Number, y: &Number) -> Ordering {
    match (as_integer(x), as_integer(y)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => {
            let (fx, fy) = (x.as_f64().unwrap_or(f64::NAN), y.as_f64().unwrap_or(f64::NAN));
            fx.total_cmp(&fy).then_with(|| x.is_f64().cmp(&y.is_f64()))
        }
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn compare_iter<'a>(
    mut xs: impl Iterator<Item = &'a Value>,
    mut ys: impl Iterator<Item = &'a Value>,
) -> Ordering {
    loop {
        match (xs.next(), ys.next()) {
            (Some(x), Some(y)) => match compare_values(x, y) {
                Ordering::Equal => continue,
                ord => return ord,
            },
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
        }
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Sequence(_) => 4,
        Value::Mapping(_) => 5,
        Value::Tagged(_) => 6,
    }
}

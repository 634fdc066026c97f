//! Named fail-soft scalar conversions.
//!
//! These deliberately never fail: a non-numeric string casts to `0`, an
//! unrecognized boolean word casts to `false`. That policy is load-bearing
//! (union resolution relies on primitive alternatives always succeeding), so
//! it lives here as explicit functions rather than ambient cast semantics.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::value::{Backing, Value};

use super::temporal;

/// Leading numeric prefix of a string, the way weak numeric casts read one:
/// `"12abc"` → 12, `"-3.5kg"` → -3.5.
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+(\.\d+)?([eE][+-]?\d+)?").expect("static pattern"));

/// Best-effort integer cast. Never fails; the fallback is 0.
pub fn to_int_lossy(value: &Value) -> i64 {
    match value {
        Value::Int(i) => *i,
        Value::Float(f) => *f as i64,
        Value::Bool(b) => *b as i64,
        Value::Str(s) => str_to_int_lossy(s),
        _ => 0,
    }
}

pub fn str_to_int_lossy(s: &str) -> i64 {
    let t = s.trim();
    if let Ok(i) = t.parse::<i64>() {
        return i;
    }
    if let Ok(f) = t.parse::<f64>() {
        return f as i64;
    }
    LEADING_NUMBER
        .find(t)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|f| f as i64)
        .unwrap_or(0)
}

/// Best-effort float cast. Never fails; the fallback is 0.0.
pub fn to_float_lossy(value: &Value) -> f64 {
    match value {
        Value::Float(f) => *f,
        Value::Int(i) => *i as f64,
        Value::Bool(b) => *b as i64 as f64,
        Value::Str(s) => str_to_float_lossy(s),
        _ => 0.0,
    }
}

/// The case-insensitive exact forms `Infinity` / `-Infinity` / `NaN` map to
/// the IEEE-754 specials; everything else goes through the numeric cast.
pub fn str_to_float_lossy(s: &str) -> f64 {
    let t = s.trim();
    match t.to_ascii_lowercase().as_str() {
        "infinity" => return f64::INFINITY,
        "-infinity" => return f64::NEG_INFINITY,
        "nan" => return f64::NAN,
        _ => {}
    }
    if let Ok(f) = t.parse::<f64>() {
        return f;
    }
    LEADING_NUMBER
        .find(t)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Permissive boolean vocabulary: `true`/`1`/`yes`/`on` (case-insensitive,
/// trimmed) are true; every other string — including unrecognized words — is
/// false.
pub fn str_to_bool(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Truthiness for the non-string shapes a bool cast can see.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::Str(s) => str_to_bool(s),
        Value::Seq(xs) => !xs.is_empty(),
        Value::Map(m) => !m.is_empty(),
        Value::Object(_) | Value::Enum(_) | Value::DateTime(_) => true,
    }
}

/// Canonical string form, where one exists. Containers and instances have
/// none (`None` surfaces as `UnsupportedCoercion` in the dispatcher).
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Str(s) => Some(s.clone()),
        Value::Enum(ev) => Some(match ev.backing() {
            Some(Backing::Int(i)) => i.to_string(),
            Some(Backing::Str(s)) => s.clone(),
            None => ev.member().to_string(),
        }),
        Value::DateTime(dt) => Some(temporal::render(dt)),
        Value::Seq(_) | Value::Map(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_cast_is_fail_soft() {
        assert_eq!(str_to_int_lossy("42"), 42);
        assert_eq!(str_to_int_lossy(" -7 "), -7);
        assert_eq!(str_to_int_lossy("3.9"), 3);
        assert_eq!(str_to_int_lossy("12abc"), 12);
        assert_eq!(str_to_int_lossy("abc"), 0);
        assert_eq!(str_to_int_lossy(""), 0);
        assert_eq!(to_int_lossy(&Value::Float(9.7)), 9);
        assert_eq!(to_int_lossy(&Value::Seq(vec![])), 0);
    }

    #[test]
    fn float_specials() {
        assert_eq!(str_to_float_lossy("Infinity"), f64::INFINITY);
        assert_eq!(str_to_float_lossy("-infinity"), f64::NEG_INFINITY);
        let nan = str_to_float_lossy("NaN");
        assert_ne!(nan, nan);
        assert_eq!(str_to_float_lossy("2.5e3"), 2500.0);
        assert_eq!(str_to_float_lossy("oops"), 0.0);
    }

    #[test]
    fn bool_vocabulary() {
        for s in ["true", "1", "yes", "on", "YES", " On "] {
            assert!(str_to_bool(s), "{s:?} should be true");
        }
        for s in ["false", "0", "no", "off", "banana", ""] {
            assert!(!str_to_bool(s), "{s:?} should be false");
        }
    }

    #[test]
    fn stringify_scalars_and_specials() {
        assert_eq!(stringify(&Value::Int(5)).as_deref(), Some("5"));
        assert_eq!(stringify(&Value::Bool(true)).as_deref(), Some("true"));
        assert_eq!(stringify(&Value::from("x")).as_deref(), Some("x"));
        assert!(stringify(&Value::Seq(vec![])).is_none());
    }
}

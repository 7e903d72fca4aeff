//! Record and Value Module
//! Scalar cell values and the record shape shared by the encoder and decoder.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A record maps field names to scalar values.
///
/// A missing key plays the role of an undefined value: it encodes exactly
/// like [`Value::Null`].
pub type Record = BTreeMap<String, Value>;

/// A scalar cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text of a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

/// String form used for CSV cells. `Null` renders as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write_float(f, *x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Shortest decimal text for a float. `-0` prints as `0`, integral values drop
/// the fraction, and magnitudes of at least 1e21 or below 1e-6 use exponent
/// notation with an explicit sign (`1e+21`, `1e-7`).
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if x == 0.0 {
        return f.write_str("0");
    }

    let magnitude = x.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{x:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{mantissa}e+{power}")
            }
            _ => f.write_str(&exp),
        };
    }
    write!(f, "{x}")
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Build a [`Record`] from `(field, value)` pairs.
pub fn record<I, K, V>(pairs: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_cell_text() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Integer(-42).to_string(), "-42");
        assert_eq!(Value::Float(30.0).to_string(), "30");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from("a,b").to_string(), "a,b");
    }

    #[test]
    fn float_text_follows_number_to_string() {
        assert_eq!(Value::Float(-0.0).to_string(), "0");
        assert_eq!(Value::Float(1e21).to_string(), "1e+21");
        assert_eq!(Value::Float(-2.5e22).to_string(), "-2.5e+22");
        assert_eq!(Value::Float(1e-7).to_string(), "1e-7");
        assert_eq!(Value::Float(1.5e-7).to_string(), "1.5e-7");
        assert_eq!(Value::Float(1e20).to_string(), "100000000000000000000");
        assert_eq!(Value::Float(0.000001).to_string(), "0.000001");
    }

    #[test]
    fn option_none_is_null() {
        let v: Value = Option::<&str>::None.into();
        assert!(v.is_null());
        let v: Value = Some(7i64).into();
        assert_eq!(v, Value::Integer(7));
    }
}

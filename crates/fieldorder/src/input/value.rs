//! Scalar cell values and records.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single cell value.
///
/// Values compare exactly: `Integer(1)` and `Float(1.0)` are distinct, and
/// floats are compared by bit pattern so they can be used as map keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// A record: field name to value, in field order.
pub type Record = IndexMap<String, Value>;

/// Build a record from `(field, value)` pairs.
pub fn record<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Record
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

impl Value {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(_) => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Integer(_) => 0,
            Value::Float(_) => 1,
            Value::Text(_) => 2,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Text(s) => s.hash(state),
        }
    }
}

impl Ord for Value {
    /// Numbers sort before text. Integers and floats compare numerically,
    /// with integers first on a numeric tie.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Text(_), _) => Ordering::Greater,
            (_, Value::Text(_)) => Ordering::Less,
            _ => {
                let (a, b) = (self.as_f64().unwrap_or(0.0), other.as_f64().unwrap_or(0.0));
                a.total_cmp(&b).then_with(|| self.rank().cmp(&other.rank()))
            }
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_sort_before_text() {
        let mut values = vec![
            Value::from("Boston"),
            Value::from("Bill Jones"),
            Value::from(100000),
            Value::from("bat"),
        ];
        values.sort();

        assert_eq!(values[0], Value::Integer(100000));
        assert_eq!(values[1], Value::from("Bill Jones"));
        assert_eq!(values[2], Value::from("Boston"));
        assert_eq!(values[3], Value::from("bat"));
    }

    #[test]
    fn test_integer_and_float_are_distinct() {
        assert_ne!(Value::Integer(1), Value::Float(1.0));
        assert_eq!(Value::Integer(1).cmp(&Value::Float(1.0)), Ordering::Less);
        assert_eq!(Value::Float(0.5).cmp(&Value::Integer(1)), Ordering::Less);
    }

    #[test]
    fn test_float_keys_hash_consistently() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Value::Float(2.5));
        set.insert(Value::Float(2.5));
        set.insert(Value::Float(f64::NAN));
        set.insert(Value::Float(f64::NAN));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_record_preserves_field_order() {
        let r = record([("zipcode", Value::from("02134")), ("beds", Value::from(3))]);
        let fields: Vec<&str> = r.keys().map(|k| k.as_str()).collect();

        assert_eq!(fields, vec!["zipcode", "beds"]);
        assert_eq!(r["zipcode"].to_string(), "02134");
    }

    #[test]
    fn test_untagged_serialization() {
        let r = record([("a", Value::from(1)), ("b", Value::from("x"))]);
        let json = serde_json::to_string(&r).unwrap();

        assert_eq!(json, r#"{"a":1,"b":"x"}"#);
    }
}

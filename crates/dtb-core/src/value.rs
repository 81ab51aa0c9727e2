//! Field values carried by rows and normalized structures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Int(_) => None,
        }
    }

    /// Coerce to the canonical text representation.
    ///
    /// Text is kept as is; integers render in decimal.
    pub fn into_text(self) -> Value {
        match self {
            Value::Int(n) => Value::Text(n.to_string()),
            text @ Value::Text(_) => text,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_coercion() {
        assert_eq!(Value::Int(35).into_text(), Value::Text("35".into()));
        assert_eq!(Value::from("Acre").into_text(), Value::from("Acre"));
    }

    #[test]
    fn untagged_json() {
        let v: Vec<Value> = serde_json::from_str(r#"[12, "Acre"]"#).unwrap();
        assert_eq!(v, vec![Value::Int(12), Value::from("Acre")]);
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"[12,"Acre"]"#);
    }
}

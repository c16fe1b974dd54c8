//! Property values carried by edges
//!
//! Loaders hand over plain JSON-like scalars. Only numeric values can be
//! projected as edge weights.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Scalar property value.
///
/// Deserialized untagged so `{"distance": 12}` and `{"distance": 12.5}` both
/// load without wrapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl PropertyValue {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Numeric value widened to f64, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Integer(i) => Some(*i as f64),
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Null => "Null",
            PropertyValue::Integer(_) => "Integer",
            PropertyValue::Float(_) => "Float",
            PropertyValue::Boolean(_) => "Boolean",
            PropertyValue::String(_) => "String",
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

/// Property map for storing edge properties
pub type PropertyMap = HashMap<String, PropertyValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_widening() {
        assert_eq!(PropertyValue::Integer(42).as_number(), Some(42.0));
        assert_eq!(PropertyValue::Float(2.5).as_number(), Some(2.5));
        assert_eq!(PropertyValue::from("12").as_number(), None);
        assert_eq!(PropertyValue::Boolean(true).as_number(), None);
    }

    #[test]
    fn test_untagged_json() {
        let props: PropertyMap =
            serde_json::from_str(r#"{"distance": 12, "fare": 7.25, "vendor": "cmt", "note": null}"#)
                .unwrap();

        assert_eq!(props["distance"], PropertyValue::Integer(12));
        assert_eq!(props["fare"], PropertyValue::Float(7.25));
        assert_eq!(props["vendor"].as_string(), Some("cmt"));
        assert!(props["note"].is_null());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(PropertyValue::Integer(1).type_name(), "Integer");
        assert_eq!(PropertyValue::String("x".into()).type_name(), "String");
        assert_eq!(format!("{}", PropertyValue::from("x")), "\"x\"");
    }
}

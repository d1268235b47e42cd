//! Runtime type classification.
//!
//! A single pure function maps any [`Value`] onto the closed [`TypeTag`]
//! enum. All downstream branching in the engine and the assertion catalogue
//! switches on the tag — never on ad hoc predicate checks.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Value;

/// Closed set of runtime type tags.
///
/// `Nan` is split out of `Number` because validation treats a non-numeric
/// number as its own kind of wrong. Host values outside the modeled set
/// (functions, symbols, ...) all classify as `Misc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Null,
    Undefined,
    Nan,
    String,
    Number,
    Boolean,
    Array,
    Object,
    Map,
    Set,
    Regexp,
    Date,
    BigInt,
    Misc,
}

impl TypeTag {
    /// Lowercase name used in diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Undefined => "undefined",
            TypeTag::Nan => "nan",
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
            TypeTag::Map => "map",
            TypeTag::Set => "set",
            TypeTag::Regexp => "regexp",
            TypeTag::Date => "date",
            TypeTag::BigInt => "bigint",
            TypeTag::Misc => "misc",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifies a value.
///
/// Total and pure: every value maps to exactly one tag, and `NaN` numbers
/// map to [`TypeTag::Nan`].
///
/// # Examples
///
/// ```
/// use sift::value::{classify, TypeTag, Value};
///
/// assert_eq!(classify(&Value::from(1.0)), TypeTag::Number);
/// assert_eq!(classify(&Value::Number(f64::NAN)), TypeTag::Nan);
/// assert_eq!(classify(&Value::Null), TypeTag::Null);
/// ```
#[must_use]
pub fn classify(value: &Value) -> TypeTag {
    match value {
        Value::Null => TypeTag::Null,
        Value::Undefined => TypeTag::Undefined,
        Value::Bool(_) => TypeTag::Boolean,
        Value::Number(n) => {
            if n.is_nan() {
                TypeTag::Nan
            } else {
                TypeTag::Number
            }
        }
        Value::BigInt(_) => TypeTag::BigInt,
        Value::String(_) => TypeTag::String,
        Value::Array(_) => TypeTag::Array,
        Value::Object(_) => TypeTag::Object,
        Value::Map(_) => TypeTag::Map,
        Value::Set(_) => TypeTag::Set,
        Value::Regexp(_) => TypeTag::Regexp,
        Value::Date(_) => TypeTag::Date,
        Value::Opaque(_) => TypeTag::Misc,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_tag() {
        let cases = [
            (Value::Null, TypeTag::Null),
            (Value::Undefined, TypeTag::Undefined),
            (Value::Bool(true), TypeTag::Boolean),
            (Value::Number(1.5), TypeTag::Number),
            (Value::Number(f64::NAN), TypeTag::Nan),
            (Value::BigInt(7), TypeTag::BigInt),
            (Value::String("x".into()), TypeTag::String),
            (Value::Array(vec![]), TypeTag::Array),
            (Value::object([("k", Value::Null)]), TypeTag::Object),
            (Value::map([("k", Value::Null)]), TypeTag::Map),
            (Value::set([Value::Null]), TypeTag::Set),
            (Value::Regexp("^a$".into()), TypeTag::Regexp),
            (Value::Date(0), TypeTag::Date),
            (Value::Opaque("closure".into()), TypeTag::Misc),
        ];
        for (value, expected) in cases {
            assert_eq!(classify(&value), expected);
        }
    }

    #[test]
    fn tag_serializes_lowercase() {
        let json = serde_json::to_string(&TypeTag::BigInt).unwrap();
        assert_eq!(json, "\"bigint\"");
    }
}

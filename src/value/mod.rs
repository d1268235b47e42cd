//! Dynamic value model.
//!
//! The engine validates arbitrary runtime data, so inputs are represented as
//! an owned [`Value`] tree rather than a static type. The variant set mirrors
//! the host values the original data accepted: keyed containers come in two
//! flavors (`Object` and `Map`), indexed containers likewise (`Array` and
//! `Set`), numbers are doubles (so `NaN` is representable), and values
//! outside the modeled set travel as [`Value::Opaque`] labels.
//!
//! # Examples
//!
//! ```
//! use sift::value::Value;
//! use sift::value;
//!
//! let user = value!({ "name": "Alice", "tags": ["admin", "ops"] });
//! assert_eq!(user.entries().unwrap().len(), 2);
//! assert_eq!(Value::from(3.5), Value::Number(3.5));
//! ```

mod classify;

pub use classify::{classify, TypeTag};

use indexmap::IndexMap;

/// Insertion-ordered key/value entries backing [`Value::Object`] and
/// [`Value::Map`].
pub type Entries = IndexMap<String, Value>;

/// An owned, dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An explicit null.
    Null,
    /// An absent value. Distinct from `Null`: assertions treat `Undefined`
    /// as "not provided" and pass unless `required` is in the chain.
    Undefined,
    /// A boolean.
    Bool(bool),
    /// A double-precision number. `NaN` is representable and classifies as
    /// its own type tag.
    Number(f64),
    /// An arbitrary-precision-ish integer (128-bit).
    BigInt(i128),
    /// A UTF-8 string.
    String(String),
    /// An ordered sequence.
    Array(Vec<Value>),
    /// A plain keyed record. Iteration order is insertion order.
    Object(Entries),
    /// A keyed dictionary, kept distinct from `Object` at the tag level.
    Map(Entries),
    /// An unordered, duplicate-free collection.
    Set(Vec<Value>),
    /// A regular expression pattern (stored as source text).
    Regexp(String),
    /// A timestamp in milliseconds since the Unix epoch.
    Date(i64),
    /// A host value outside the modeled set (function, symbol, ...),
    /// carried as a descriptive label. Classifies as [`TypeTag::Misc`].
    Opaque(String),
}

impl Value {
    /// Builds an [`Value::Object`] from key/value pairs, preserving order.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect::<Entries>(),
        )
    }

    /// Builds a [`Value::Map`] from key/value pairs, preserving order.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect::<Entries>(),
        )
    }

    /// Builds a [`Value::Set`], dropping duplicate elements.
    pub fn set<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Set(unique)
    }

    /// Returns the keyed entries of an `Object` or `Map`.
    #[must_use]
    pub fn entries(&self) -> Option<&Entries> {
        match self {
            Value::Object(entries) | Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the elements of an `Array` or `Set`.
    #[must_use]
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) | Value::Set(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Returns the string slice of a `String` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the numeric payload of a `Number` value (including `NaN`).
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// True for `Value::Undefined`.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// True for `Value::Null`, `Value::Undefined`, and the empty string —
    /// the "absent" family the comparison assertions skip over.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            Value::Null | Value::Undefined => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Element/entry/character count for sized values.
    ///
    /// Strings count characters, containers count elements or entries.
    /// Returns `None` for unsized values.
    #[must_use]
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(items) | Value::Set(items) => Some(items.len()),
            Value::Object(entries) | Value::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Converts a `serde_json::Value` into a [`Value`].
    ///
    /// JSON has no undefined/map/set/date distinctions, so the result only
    /// uses the JSON-expressible variants.
    #[must_use]
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Projects the value onto JSON.
    ///
    /// Deliberately lossy: `Undefined` and `NaN` become JSON null, `Map`
    /// becomes an object, `Set` an array, `Regexp` its pattern text, `Date`
    /// its epoch-millisecond count, and `Opaque` its label.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null | Value::Undefined => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::BigInt(n) => {
                // i128 does not fit serde_json's number model past i64.
                i64::try_from(*n).map_or_else(
                    |_| serde_json::Value::String(n.to_string()),
                    |small| serde_json::Value::Number(small.into()),
                )
            }
            Value::String(s) | Value::Regexp(s) | Value::Opaque(s) => {
                serde_json::Value::String(s.clone())
            }
            Value::Array(items) | Value::Set(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(entries) | Value::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Date(millis) => serde_json::Value::Number((*millis).into()),
        }
    }

    /// Short JSON rendering used by `{{input}}` message templating.
    ///
    /// Capped at 20 characters so oversized inputs stay readable in error
    /// messages.
    #[must_use]
    pub fn preview(&self) -> String {
        let rendered = match self {
            // Bare strings render without JSON quoting, like the source
            // interpolation did.
            Value::String(s) => s.clone(),
            Value::Undefined => "undefined".to_string(),
            other => serde_json::to_string(&other.to_json())
                .unwrap_or_else(|_| "<unprintable>".to_string()),
        };
        if rendered.chars().count() <= 20 {
            rendered
        } else {
            rendered.chars().take(20).collect()
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Undefined, Into::into)
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Refinement transforms.
//!
//! Transforms never fail and never touch the node's input: they rewrite the
//! refinement in place, element-wise over containers. A chain like
//! `trim().to_lowercase().email()` therefore validates the original input
//! while emitting the cleaned copy.

use indexmap::IndexMap;

use crate::foundation::{AssertOutcome, ValidationContext};
use crate::value::Value;

/// Applies a string rewrite to a value, descending one level into
/// containers (the shape the source transforms covered).
fn map_strings(value: Value, f: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(&s)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Value::String(f(&s)),
                    other => other,
                })
                .collect(),
        ),
        Value::Set(items) => Value::set(items.into_iter().map(|item| match item {
            Value::String(s) => Value::String(f(&s)),
            other => other,
        })),
        Value::Object(entries) => Value::Object(rewrite_entries(entries, f)),
        Value::Map(entries) => Value::Map(rewrite_entries(entries, f)),
        other => other,
    }
}

fn rewrite_entries(
    entries: IndexMap<String, Value>,
    f: &dyn Fn(&str) -> String,
) -> IndexMap<String, Value> {
    entries
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => (key, Value::String(f(&s))),
            other => (key, other),
        })
        .collect()
}

/// Scalar-to-string rendering used by `stringify`.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Undefined => "undefined".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_finite() && n.fract() == 0.0 && n.abs() < 9e15 {
                format!("{}", *n as i64)
            } else {
                n.to_string()
            }
        }
        Value::BigInt(n) => n.to_string(),
        Value::Regexp(s) | Value::Opaque(s) => s.clone(),
        Value::Date(millis) => millis.to_string(),
        other => serde_json::to_string(&other.to_json()).unwrap_or_default(),
    }
}

/// Numeric coercion used by `to_number`: strings parse (or become `NaN`),
/// booleans become 0/1, null becomes 0, everything else `NaN`.
fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => *n,
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        Value::Bool(true) => 1.0,
        Value::Bool(false) => 0.0,
        Value::Null => 0.0,
        Value::BigInt(n) => *n as f64,
        Value::Date(millis) => *millis as f64,
        _ => f64::NAN,
    }
}

impl ValidationContext {
    /// Trims whitespace from the refinement's string content.
    ///
    /// Containers are rewritten element-wise; non-string elements pass
    /// through unchanged.
    pub fn trim(mut self) -> AssertOutcome {
        self.apply_criterion("trim");
        let refined = map_strings(self.refinement.clone(), &|s| s.trim().to_string());
        self.refine(refined);
        Ok(self)
    }

    /// Lowercases the refinement's string content, element-wise over
    /// containers.
    pub fn to_lowercase(mut self) -> AssertOutcome {
        self.apply_criterion("to_lowercase");
        let refined = map_strings(self.refinement.clone(), &str::to_lowercase);
        self.refine(refined);
        Ok(self)
    }

    /// Uppercases the refinement's string content, element-wise over
    /// containers.
    pub fn to_uppercase(mut self) -> AssertOutcome {
        self.apply_criterion("to_uppercase");
        let refined = map_strings(self.refinement.clone(), &str::to_uppercase);
        self.refine(refined);
        Ok(self)
    }

    /// Renders the refinement as a string; containers render element-wise.
    pub fn stringify(mut self) -> AssertOutcome {
        self.apply_criterion("stringify");
        let refined = match self.refinement.clone() {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| Value::String(render_scalar(item)))
                    .collect(),
            ),
            Value::Set(items) => {
                Value::set(items.iter().map(|item| Value::String(render_scalar(item))))
            }
            Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| {
                        let rendered = Value::String(render_scalar(&value));
                        (key, rendered)
                    })
                    .collect(),
            ),
            Value::Map(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| {
                        let rendered = Value::String(render_scalar(&value));
                        (key, rendered)
                    })
                    .collect(),
            ),
            scalar => Value::String(render_scalar(&scalar)),
        };
        self.refine(refined);
        Ok(self)
    }

    /// Coerces the refinement to a number; containers coerce element-wise.
    ///
    /// Non-numeric text becomes `NaN` — chain a numeric assertion to reject
    /// it.
    pub fn to_number(mut self) -> AssertOutcome {
        self.apply_criterion("to_number");
        let refined = match self.refinement.clone() {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| Value::Number(coerce_number(item)))
                    .collect(),
            ),
            Value::Set(items) => {
                Value::set(items.iter().map(|item| Value::Number(coerce_number(item))))
            }
            Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::Number(coerce_number(&value))))
                    .collect(),
            ),
            Value::Map(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::Number(coerce_number(&value))))
                    .collect(),
            ),
            scalar => Value::Number(coerce_number(&scalar)),
        };
        self.refine(refined);
        Ok(self)
    }

    /// Coerces the refinement to an array: sets unwrap, strings split on
    /// commas, objects and maps yield their values. Anything else is left
    /// unchanged.
    pub fn to_array(mut self) -> AssertOutcome {
        self.apply_criterion("to_array");
        let refined = match self.refinement.clone() {
            Value::Set(items) => Value::Array(items),
            Value::String(s) => {
                Value::Array(s.split(',').map(|part| Value::String(part.to_string())).collect())
            }
            Value::Object(entries) | Value::Map(entries) => {
                Value::Array(entries.into_values().collect())
            }
            other => other,
        };
        self.refine(refined);
        Ok(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Presence and content-condition assertions.

use crate::foundation::{AssertOutcome, ValidationContext};
use crate::value::{TypeTag, Value};

impl ValidationContext {
    /// The input must be provided.
    ///
    /// Only `undefined` fails — `null` is a provided value. Use
    /// [`Self::not_empty`] to reject null and empty containers as well.
    pub fn required(mut self) -> AssertOutcome {
        self.apply_criterion("required");
        if self.input.is_undefined() {
            self.fail("missing_required", "The value is required.")?;
        }
        Ok(self)
    }

    /// The input must not be empty.
    ///
    /// Fails on `null`, `undefined`, the empty string, and empty arrays,
    /// sets, objects and maps.
    pub fn not_empty(mut self) -> AssertOutcome {
        self.apply_criterion("not_empty");
        let empty = match &self.input {
            Value::Null | Value::Undefined => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) | Value::Set(items) => items.is_empty(),
            Value::Object(entries) | Value::Map(entries) => entries.is_empty(),
            _ => false,
        };
        if empty {
            self.fail("empty", "The value is empty.")?;
        }
        Ok(self)
    }

    /// The input string must not contain whitespace.
    pub fn no_whitespace(mut self) -> AssertOutcome {
        self.apply_criterion("no_whitespace");
        if self.input.is_absent() {
            return Ok(self);
        }
        let has_whitespace = self
            .input
            .as_str()
            .is_some_and(|s| s.chars().any(char::is_whitespace));
        if has_whitespace {
            self.fail(
                "whitespace",
                "The value {{input}} should not contain whitespace.",
            )?;
        }
        Ok(self)
    }

    /// The input array must not contain duplicate elements.
    ///
    /// Only meaningful for arrays; any other provided input is reported as
    /// a usage-class violation through the sink.
    pub fn unique_items(mut self) -> AssertOutcome {
        self.apply_criterion("unique_items");
        if matches!(self.input, Value::Null | Value::Undefined) {
            return Ok(self);
        }
        if self.type_tag != TypeTag::Array {
            self.fail(
                "usage",
                "'unique_items' is only available for array values.",
            )?;
            return Ok(self);
        }
        let duplicated = {
            let items = self.input.items().unwrap_or(&[]);
            let mut seen: Vec<&Value> = Vec::with_capacity(items.len());
            items.iter().any(|item| {
                if seen.contains(&item) {
                    true
                } else {
                    seen.push(item);
                    false
                }
            })
        };
        if duplicated {
            self.fail("duplicate_items", "The value {{input}} has duplicate items.")?;
        }
        Ok(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================

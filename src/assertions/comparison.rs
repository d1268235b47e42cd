//! Comparison assertions.
//!
//! The comparison family skips absent inputs (`null`, `undefined`, the
//! empty string) — pair with [`ValidationContext::required`] when presence
//! matters.

use crate::foundation::{AssertOutcome, ValidationContext, ValidationError};
use crate::value::{TypeTag, Value};

impl ValidationContext {
    /// The input must equal the expected value.
    pub fn is(mut self, expected: impl Into<Value>) -> AssertOutcome {
        self.apply_criterion("is");
        if self.input.is_absent() {
            return Ok(self);
        }
        let expected = expected.into();
        if self.input != expected {
            let error = ValidationError::new(
                "not_equal",
                format!(
                    "The value '{}' should be '{}'.",
                    self.input.preview(),
                    expected.preview()
                ),
            )
            .with_param("expected", expected.preview());
            self.fail_with(error)?;
        }
        Ok(self)
    }

    /// The input must differ from the given value.
    pub fn is_not(mut self, unexpected: impl Into<Value>) -> AssertOutcome {
        self.apply_criterion("is_not");
        if self.input.is_absent() {
            return Ok(self);
        }
        let unexpected = unexpected.into();
        if self.input == unexpected {
            let error = ValidationError::new(
                "equal",
                format!("The value '{}' should not be '{}'.", self.input.preview(), unexpected.preview()),
            )
            .with_param("unexpected", unexpected.preview());
            self.fail_with(error)?;
        }
        Ok(self)
    }

    /// The input must be a number greater than or equal to the limit.
    pub fn min_value(mut self, limit: f64) -> AssertOutcome {
        self.apply_criterion("min_value");
        if self.input.is_absent() {
            return Ok(self);
        }
        match self.input.as_number() {
            None => self.fail("invalid_type", "The value {{input}} should be a number.")?,
            Some(n) if n < limit => {
                let error = ValidationError::new(
                    "min_value",
                    format!(
                        "The value '{}' should be equal or greater than '{limit}'.",
                        self.input.preview()
                    ),
                )
                .with_param("min", limit.to_string());
                self.fail_with(error)?;
            }
            Some(_) => {}
        }
        Ok(self)
    }

    /// The input must be a number less than or equal to the limit.
    pub fn max_value(mut self, limit: f64) -> AssertOutcome {
        self.apply_criterion("max_value");
        if self.input.is_absent() {
            return Ok(self);
        }
        match self.input.as_number() {
            None => self.fail("invalid_type", "The value {{input}} should be a number.")?,
            Some(n) if n > limit => {
                let error = ValidationError::new(
                    "max_value",
                    format!(
                        "The value '{}' should be equal or less than '{limit}'.",
                        self.input.preview()
                    ),
                )
                .with_param("max", limit.to_string());
                self.fail_with(error)?;
            }
            Some(_) => {}
        }
        Ok(self)
    }

    /// The input (or, for array inputs, every element) must appear in the
    /// allowed list.
    pub fn one_of(mut self, allowed: &[Value]) -> AssertOutcome {
        self.apply_criterion("one_of");
        if self.input.is_absent() {
            return Ok(self);
        }
        if self.type_tag == TypeTag::Array {
            let missing: Vec<String> = self
                .input
                .items()
                .unwrap_or(&[])
                .iter()
                .filter(|item| !allowed.contains(item))
                .map(Value::preview)
                .collect();
            for item in missing {
                let error = ValidationError::new(
                    "not_in_list",
                    format!("The value '{item}' is not in the list."),
                );
                self.fail_with(error)?;
            }
            return Ok(self);
        }
        if !allowed.contains(&self.input) {
            self.fail("not_in_list", "The value {{input}} is not in the list.")?;
        }
        Ok(self)
    }

    /// The input (or, for array inputs, every element) must not appear in
    /// the forbidden list.
    pub fn not_one_of(mut self, forbidden: &[Value]) -> AssertOutcome {
        self.apply_criterion("not_one_of");
        if self.input.is_absent() {
            return Ok(self);
        }
        if self.type_tag == TypeTag::Array {
            let present: Vec<String> = self
                .input
                .items()
                .unwrap_or(&[])
                .iter()
                .filter(|item| forbidden.contains(item))
                .map(Value::preview)
                .collect();
            for item in present {
                let error = ValidationError::new(
                    "in_list",
                    format!("The value '{item}' is in the forbidden list."),
                );
                self.fail_with(error)?;
            }
            return Ok(self);
        }
        if forbidden.contains(&self.input) {
            self.fail("in_list", "The value {{input}} is in the forbidden list.")?;
        }
        Ok(self)
    }

    /// The input's length must equal the expected count.
    ///
    /// Strings count characters; arrays, sets, objects and maps count
    /// elements or entries.
    pub fn exact_length(mut self, expected: usize) -> AssertOutcome {
        self.apply_criterion("exact_length");
        if self.input.is_absent() {
            return Ok(self);
        }
        match self.input.length() {
            None => self.fail("invalid_type", "The value {{input}} should have a length.")?,
            Some(len) if len != expected => {
                let error = ValidationError::new(
                    "exact_length",
                    format!("The length of '{}' should be {expected}.", self.input.preview()),
                )
                .with_param("expected", expected.to_string())
                .with_param("actual", len.to_string());
                self.fail_with(error)?;
            }
            Some(_) => {}
        }
        Ok(self)
    }

    /// The input's length must be at least the given count.
    pub fn min_length(mut self, min: usize) -> AssertOutcome {
        self.apply_criterion("min_length");
        if self.input.is_absent() {
            return Ok(self);
        }
        match self.input.length() {
            None => self.fail("invalid_type", "The value {{input}} should have a length.")?,
            Some(len) if len < min => {
                let error = ValidationError::new(
                    "min_length",
                    format!(
                        "The length of '{}' should be equal or greater than {min}.",
                        self.input.preview()
                    ),
                )
                .with_param("min", min.to_string())
                .with_param("actual", len.to_string());
                self.fail_with(error)?;
            }
            Some(_) => {}
        }
        Ok(self)
    }

    /// The input's length must be at most the given count.
    pub fn max_length(mut self, max: usize) -> AssertOutcome {
        self.apply_criterion("max_length");
        if self.input.is_absent() {
            return Ok(self);
        }
        match self.input.length() {
            None => self.fail("invalid_type", "The value {{input}} should have a length.")?,
            Some(len) if len > max => {
                let error = ValidationError::new(
                    "max_length",
                    format!(
                        "The length of '{}' should be equal or less than {max}.",
                        self.input.preview()
                    ),
                )
                .with_param("max", max.to_string())
                .with_param("actual", len.to_string());
                self.fail_with(error)?;
            }
            Some(_) => {}
        }
        Ok(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::engine::single;
    use crate::foundation::ValidationOptions;
    use crate::value::Value;

    fn soft() -> ValidationOptions {
        ValidationOptions::default().with_soft_fail(true)
    }

    #[test]
    fn is_matches_exact_values() {
        assert!(single("a", soft()).is("a").unwrap().is_valid());
        assert!(!single("a", soft()).is("b").unwrap().is_valid());
    }

    #[test]
    fn absent_inputs_skip_comparisons() {
        assert!(single(Value::Null, soft()).min_value(5.0).unwrap().is_valid());
        assert!(single("", soft()).is("x").unwrap().is_valid());
        assert!(single(Value::Undefined, soft()).max_length(1).unwrap().is_valid());
    }

    #[test]
    fn value_bounds() {
        assert!(single(5, soft()).min_value(5.0).unwrap().is_valid());
        assert!(!single(4, soft()).min_value(5.0).unwrap().is_valid());
        assert!(single(5, soft()).max_value(5.0).unwrap().is_valid());
        assert!(!single(6, soft()).max_value(5.0).unwrap().is_valid());
    }

    #[test]
    fn non_number_bound_reports_type_error() {
        let ctx = single("abc", soft()).min_value(1.0).unwrap();
        assert_eq!(ctx.errors()[0].code, "invalid_type");
    }

    #[test]
    fn one_of_scans_array_elements() {
        let allowed = [Value::from("a"), Value::from("b")];
        let ctx = single(vec![Value::from("a"), Value::from("c")], soft())
            .one_of(&allowed)
            .unwrap();
        assert!(!ctx.is_valid());
        assert_eq!(ctx.errors().len(), 1);
    }

    #[test]
    fn length_family_measures_strings_and_containers() {
        assert!(single("abc", soft()).exact_length(3).unwrap().is_valid());
        assert!(single("héllo", soft()).min_length(5).unwrap().is_valid());
        let obj = Value::object([("a", Value::from(1)), ("b", Value::from(2))]);
        assert!(single(obj, soft()).max_length(2).unwrap().is_valid());
        assert!(!single(42, soft()).exact_length(2).unwrap().is_valid());
    }

    #[test]
    fn hard_fail_propagates_immediately() {
        let err = single(4, ValidationOptions::default())
            .min_value(5.0)
            .unwrap_err();
        assert_eq!(err.code, "min_value");
    }
}

//! Type-tag and numeric-class assertions.
//!
//! All of these treat `undefined` as an automatic pass — values are
//! optional unless the chain also carries `required()`.

use crate::foundation::{AssertOutcome, ValidationContext};
use crate::value::{TypeTag, Value};

impl ValidationContext {
    /// The input must be a keyed object.
    ///
    /// # Examples
    ///
    /// ```
    /// use sift::engine::single;
    /// use sift::foundation::ValidationOptions;
    /// use sift::value;
    ///
    /// let opts = ValidationOptions::default().with_soft_fail(true);
    /// assert!(single(value!({ "k": "v" }), opts.clone()).object().unwrap().is_valid());
    /// assert!(!single(value!([1, 2, 3]), opts).object().unwrap().is_valid());
    /// ```
    pub fn object(mut self) -> AssertOutcome {
        self.apply_criterion("object");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if self.type_tag != TypeTag::Object {
            self.fail("invalid_type", "The value {{input}} should be an object.")?;
        }
        Ok(self)
    }

    /// The input must be an array.
    pub fn array(mut self) -> AssertOutcome {
        self.apply_criterion("array");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if self.type_tag != TypeTag::Array {
            self.fail("invalid_type", "The value {{input}} should be an array.")?;
        }
        Ok(self)
    }

    /// The input must be an array whose every element is a keyed object.
    pub fn array_of_objects(mut self) -> AssertOutcome {
        self.apply_criterion("array_of_objects");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if self.type_tag != TypeTag::Array {
            self.fail(
                "invalid_type",
                "The value {{input}} should be an array of objects.",
            )?;
            return Ok(self);
        }
        let all_objects = self
            .input
            .items()
            .unwrap_or(&[])
            .iter()
            .all(|item| matches!(item, Value::Object(_)));
        if !all_objects {
            self.fail(
                "invalid_type",
                "The value {{input}} should be an array of objects.",
            )?;
        }
        Ok(self)
    }

    /// The input must be a string.
    ///
    /// # Examples
    ///
    /// ```
    /// use sift::engine::single;
    /// use sift::foundation::ValidationOptions;
    ///
    /// let opts = ValidationOptions::default().with_soft_fail(true);
    /// assert!(single("hello", opts.clone()).string().unwrap().is_valid());
    /// assert!(!single(1, opts).string().unwrap().is_valid());
    /// ```
    pub fn string(mut self) -> AssertOutcome {
        self.apply_criterion("string");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if self.type_tag != TypeTag::String {
            self.fail("invalid_type", "The value {{input}} should be a string.")?;
        }
        Ok(self)
    }

    /// The input must be a boolean.
    pub fn boolean(mut self) -> AssertOutcome {
        self.apply_criterion("boolean");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if self.type_tag != TypeTag::Boolean {
            self.fail("invalid_type", "The value {{input}} should be a boolean.")?;
        }
        Ok(self)
    }

    /// The input must be a number. Array inputs are accepted when every
    /// element is a number (an empty array passes — reject it with
    /// [`Self::not_empty`] if needed).
    pub fn number(mut self) -> AssertOutcome {
        self.apply_criterion("number");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if self.type_tag == TypeTag::Array {
            let all_numbers = self
                .input
                .items()
                .unwrap_or(&[])
                .iter()
                .all(|item| matches!(item, Value::Number(n) if !n.is_nan()));
            if !all_numbers {
                self.fail("invalid_type", "The value {{input}} should be a number.")?;
            }
            return Ok(self);
        }
        if self.type_tag != TypeTag::Number {
            self.fail("invalid_type", "The value {{input}} should be a number.")?;
        }
        Ok(self)
    }

    /// The input must be a non-negative number (zero or greater, fractions
    /// allowed).
    pub fn non_negative_number(mut self) -> AssertOutcome {
        self.apply_criterion("non_negative_number");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if !self.numeric_input().is_some_and(|n| n >= 0.0) {
            self.fail(
                "invalid_number",
                "The value {{input}} should be a non-negative number.",
            )?;
        }
        Ok(self)
    }

    /// The input must be a positive number (greater than zero, fractions
    /// allowed).
    ///
    /// # Examples
    ///
    /// ```
    /// use sift::engine::single;
    /// use sift::foundation::ValidationOptions;
    ///
    /// let opts = ValidationOptions::default().with_soft_fail(true);
    /// assert!(single(1.1, opts.clone()).positive_number().unwrap().is_valid());
    /// assert!(!single(0, opts.clone()).positive_number().unwrap().is_valid());
    /// assert!(!single(-1, opts).positive_number().unwrap().is_valid());
    /// ```
    pub fn positive_number(mut self) -> AssertOutcome {
        self.apply_criterion("positive_number");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if !self.numeric_input().is_some_and(|n| n > 0.0) {
            self.fail(
                "invalid_number",
                "The value {{input}} should be a positive number.",
            )?;
        }
        Ok(self)
    }

    /// The input must be a natural number: a positive whole number
    /// (1, 2, 3, ...).
    pub fn natural_number(mut self) -> AssertOutcome {
        self.apply_criterion("natural_number");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if !self.numeric_input().is_some_and(|n| is_integral(n) && n > 0.0) {
            self.fail(
                "invalid_number",
                "The value {{input}} should be a natural number.",
            )?;
        }
        Ok(self)
    }

    /// The input must be a whole number: a non-negative integer
    /// (0, 1, 2, ...).
    pub fn whole_number(mut self) -> AssertOutcome {
        self.apply_criterion("whole_number");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if !self.numeric_input().is_some_and(|n| is_integral(n) && n >= 0.0) {
            self.fail(
                "invalid_number",
                "The value {{input}} should be a whole number.",
            )?;
        }
        Ok(self)
    }

    /// The input must be an integer (negative, zero, or positive).
    pub fn integer(mut self) -> AssertOutcome {
        self.apply_criterion("integer");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if !self.numeric_input().is_some_and(is_integral) {
            self.fail("invalid_number", "The value {{input}} should be an integer.")?;
        }
        Ok(self)
    }

    /// The input must be a negative integer (-1, -2, -3, ...).
    pub fn negative_integer(mut self) -> AssertOutcome {
        self.apply_criterion("negative_integer");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if !self.numeric_input().is_some_and(|n| is_integral(n) && n < 0.0) {
            self.fail(
                "invalid_number",
                "The value {{input}} should be a negative integer.",
            )?;
        }
        Ok(self)
    }

    /// A non-NaN numeric input, if there is one.
    fn numeric_input(&self) -> Option<f64> {
        self.input().as_number().filter(|n| !n.is_nan())
    }
}

fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::engine::single;
    use crate::foundation::ValidationOptions;
    use crate::value;
    use crate::value::Value;

    fn soft() -> ValidationOptions {
        ValidationOptions::default().with_soft_fail(true)
    }

    #[test]
    fn undefined_passes_every_type_assertion() {
        let u = || single(Value::Undefined, soft());
        assert!(u().object().unwrap().is_valid());
        assert!(u().string().unwrap().is_valid());
        assert!(u().number().unwrap().is_valid());
        assert!(u().integer().unwrap().is_valid());
    }

    #[test]
    fn string_assertion() {
        assert!(single("x", soft()).string().unwrap().is_valid());
        assert!(!single(true, soft()).string().unwrap().is_valid());
    }

    #[test]
    fn number_assertion_rejects_nan() {
        assert!(single(1.5, soft()).number().unwrap().is_valid());
        assert!(!single(f64::NAN, soft()).number().unwrap().is_valid());
        assert!(!single("1", soft()).number().unwrap().is_valid());
    }

    #[test]
    fn number_assertion_scans_arrays() {
        assert!(single(value!([1, 2, 3]), soft()).number().unwrap().is_valid());
        assert!(!single(value!([1, "x"]), soft()).number().unwrap().is_valid());
        // Empty arrays pass; `not_empty` is the dedicated check.
        assert!(single(Vec::<Value>::new(), soft()).number().unwrap().is_valid());
    }

    #[test]
    fn numeric_classes() {
        assert!(single(0, soft()).non_negative_number().unwrap().is_valid());
        assert!(!single(-1, soft()).non_negative_number().unwrap().is_valid());
        assert!(single(1, soft()).natural_number().unwrap().is_valid());
        assert!(!single(0, soft()).natural_number().unwrap().is_valid());
        assert!(!single(1.5, soft()).natural_number().unwrap().is_valid());
        assert!(single(0, soft()).whole_number().unwrap().is_valid());
        assert!(single(-3, soft()).integer().unwrap().is_valid());
        assert!(!single(-3.5, soft()).integer().unwrap().is_valid());
        assert!(single(-3, soft()).negative_integer().unwrap().is_valid());
        assert!(!single(3, soft()).negative_integer().unwrap().is_valid());
    }

    #[test]
    fn array_of_objects_assertion() {
        assert!(single(value!([{ "a": 1 }]), soft())
            .array_of_objects()
            .unwrap()
            .is_valid());
        assert!(!single(value!([1, 2]), soft())
            .array_of_objects()
            .unwrap()
            .is_valid());
    }
}

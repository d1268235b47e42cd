//! Failure sink.
//!
//! Assertions never construct control flow themselves: every violation is
//! routed through [`ValidationContext::fail`], which decides — per the
//! active options — whether the failure is returned for `?`-propagation
//! (fail-fast) or recorded on the context (soft-fail). Keeping the decision
//! in one place is what lets `softFail` and `abortEarly` apply uniformly
//! across the whole assertion catalogue.

use std::borrow::Cow;

use crate::foundation::context::ValidationContext;
use crate::foundation::error::ValidationError;
use crate::value::Value;

/// Placeholder resolved to a truncated JSON preview of the current input.
const INPUT_PLACEHOLDER: &str = "{{input}}";

/// Renders a message template against the current input.
///
/// Static templates without the placeholder pass through borrowed.
pub(crate) fn render_template(template: &'static str, input: &Value) -> Cow<'static, str> {
    if template.contains(INPUT_PLACEHOLDER) {
        Cow::Owned(template.replace(INPUT_PLACEHOLDER, &format!("'{}'", input.preview())))
    } else {
        Cow::Borrowed(template)
    }
}

impl ValidationContext {
    /// Reports a violation of the current assertion.
    ///
    /// The message template may contain `{{input}}`, resolved to a quoted
    /// JSON preview of the input capped at 20 characters.
    ///
    /// Under `softFail` the error is appended (unless `abortEarly` already
    /// saw a failure on this branch), validity is cleared, and evaluation
    /// continues. Otherwise the error is returned and `?` unwinds the chain.
    pub(crate) fn fail(
        &mut self,
        code: &'static str,
        template: &'static str,
    ) -> Result<(), ValidationError> {
        let mut error = ValidationError::new(code, render_template(template, &self.input));
        if let Some(key) = &self.key {
            error = error.with_key(key.clone());
        }
        if let Some(index) = self.index {
            error = error.with_index(index);
        }
        if let Some(criterion) = self.criterion {
            error = error.with_criterion(criterion);
        }
        self.sink(error)
    }

    /// Like [`Self::fail`], for pre-built errors carrying params.
    pub(crate) fn fail_with(&mut self, mut error: ValidationError) -> Result<(), ValidationError> {
        if error.key.is_none() {
            error.key = self.key.clone();
        }
        if error.index.is_none() {
            error.index = self.index;
        }
        if error.criterion.is_none() {
            error.criterion = self.criterion;
        }
        self.sink(error)
    }

    fn sink(&mut self, error: ValidationError) -> Result<(), ValidationError> {
        if !self.options.soft_fail {
            return Err(error);
        }
        // A recorded failure already decided this branch; abort-early stops
        // recording the rest of the chain.
        if !(self.options.abort_early && !self.is_valid) {
            self.errors.push(error);
        }
        self.is_valid = false;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Per-node validation state.
//!
//! A [`ValidationContext`] is the unit of state threaded through one branch
//! of validation: the raw input, the refinement being built, the cached type
//! tag, positional metadata for error attribution, the accumulated errors,
//! and the active options. Contexts are created fresh per traversal entry
//! point (and per element/entry during container scans) and folded into
//! their parent once evaluated — no context is ever shared.
//!
//! Assertions consume and return the context, so chains compose with `?`:
//!
//! ```
//! use sift::engine::single;
//! use sift::foundation::ValidationOptions;
//!
//! let ctx = single("hello", ValidationOptions::default())
//!     .required()
//!     .and_then(|ctx| ctx.string())
//!     .and_then(|ctx| ctx.min_length(3))
//!     .unwrap();
//! assert!(ctx.is_valid());
//! ```

use crate::foundation::error::ValidationError;
use crate::foundation::options::ValidationOptions;
use crate::value::{classify, TypeTag, Value};

/// Result type of one assertion in a chain.
///
/// `Ok` carries the (possibly mutated) context forward; `Err` is the
/// fail-fast path taken when `softFail` is off.
pub type AssertOutcome = Result<ValidationContext, ValidationError>;

/// The mutable state of one validation branch.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    pub(crate) input: Value,
    pub(crate) refinement: Value,
    pub(crate) type_tag: TypeTag,
    pub(crate) key: Option<String>,
    pub(crate) index: Option<usize>,
    pub(crate) criterion: Option<&'static str>,
    pub(crate) is_valid: bool,
    pub(crate) errors: Vec<ValidationError>,
    pub(crate) options: ValidationOptions,
}

impl ValidationContext {
    /// Creates the base-case context for a bare value.
    ///
    /// Never fails: `input == refinement`, the type tag is cached, the error
    /// list starts empty. Downstream assertions are what may fail.
    #[must_use]
    pub fn single(value: impl Into<Value>, options: ValidationOptions) -> Self {
        let input = value.into();
        let type_tag = classify(&input);
        Self {
            refinement: input.clone(),
            input,
            type_tag,
            key: None,
            index: None,
            criterion: None,
            is_valid: true,
            errors: Vec::new(),
            options,
        }
    }

    /// Child context for a keyed-container entry.
    pub(crate) fn child_keyed(value: Value, key: &str, options: ValidationOptions) -> Self {
        let mut ctx = Self::single(value, options);
        ctx.key = Some(key.to_string());
        ctx
    }

    /// Child context for an indexed-container element.
    pub(crate) fn child_indexed(value: Value, index: usize, options: ValidationOptions) -> Self {
        let mut ctx = Self::single(value, options);
        ctx.index = Some(index);
        ctx
    }

    /// The raw value under inspection at this node.
    #[must_use]
    pub fn input(&self) -> &Value {
        &self.input
    }

    /// The value that will be emitted if validation succeeds.
    ///
    /// Transforming assertions mutate this, never [`Self::input`].
    #[must_use]
    pub fn refinement(&self) -> &Value {
        &self.refinement
    }

    /// Consumes the context, yielding the refinement.
    #[must_use]
    pub fn into_refinement(self) -> Value {
        self.refinement
    }

    /// Cached classification of the input.
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    /// Object/map key this node is bound to, when scanned from a keyed
    /// container.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Array/set position this node is bound to, when scanned from an
    /// indexed container.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Name of the most recently applied assertion.
    #[must_use]
    pub fn criterion(&self) -> Option<&'static str> {
        self.criterion
    }

    /// True until a failure has been recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// The violations recorded so far, in evaluation order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// The active option set.
    #[must_use]
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Replaces the refinement value.
    pub(crate) fn refine(&mut self, value: Value) {
        self.refinement = value;
    }

    /// Marks the assertion currently being applied.
    pub(crate) fn apply_criterion(&mut self, name: &'static str) {
        self.criterion = Some(name);
    }

    /// Folds an already-attributed batch of child errors into this node.
    pub(crate) fn absorb(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        for error in errors {
            self.is_valid = false;
            self.errors.push(error);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::TypeTag;

    #[test]
    fn single_starts_valid_with_cached_tag() {
        let ctx = ValidationContext::single("hello", ValidationOptions::default());
        assert!(ctx.is_valid());
        assert!(ctx.errors().is_empty());
        assert_eq!(ctx.type_tag(), TypeTag::String);
        assert_eq!(ctx.input(), ctx.refinement());
    }

    #[test]
    fn child_contexts_carry_positional_metadata() {
        let keyed =
            ValidationContext::child_keyed(Value::from(1), "age", ValidationOptions::default());
        assert_eq!(keyed.key(), Some("age"));
        assert_eq!(keyed.index(), None);

        let indexed =
            ValidationContext::child_indexed(Value::from(1), 4, ValidationOptions::default());
        assert_eq!(indexed.key(), None);
        assert_eq!(indexed.index(), Some(4));
    }

    #[test]
    fn absorb_flips_validity() {
        let mut ctx = ValidationContext::single(1, ValidationOptions::default());
        ctx.absorb([ValidationError::new("x", "y")]);
        assert!(!ctx.is_valid());
        assert_eq!(ctx.errors().len(), 1);
    }
}

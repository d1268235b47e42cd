//! Rule-tree traversal engine.
//!
//! The entry points below are the whole caller boundary: a value and a rule
//! (a leaf chain, or a shape-tree of rules) go in, a [`ValidationContext`]
//! exposing `{ is_valid, errors, refinement }` comes out.
//!
//! Traversal is strictly synchronous, single-threaded, ordinary call-stack
//! recursion: child contexts are created per container entry/element,
//! evaluated to completion, and folded into their parent before the scan
//! continues. `UsageError`s (caller mistakes) always surface as `Err`;
//! `ValidationError`s surface as `Err` only when `softFail` is off —
//! otherwise they accumulate on the returned context.
//!
//! # Examples
//!
//! ```
//! use sift::engine::{object_iterate, Rule, RuleMap};
//! use sift::foundation::ValidationOptions;
//! use sift::value;
//!
//! let rules = RuleMap::new()
//!     .rule("name", Rule::leaf(|ctx| ctx.required()?.string()))
//!     .rule("age", Rule::leaf(|ctx| ctx.required()?.positive_number()));
//!
//! let report = object_iterate(
//!     value!({ "name": "Alice", "age": -5 }),
//!     &rules,
//!     ValidationOptions::default().with_soft_fail(true),
//! )
//! .unwrap();
//!
//! assert!(!report.is_valid());
//! assert_eq!(report.errors()[0].key.as_deref(), Some("age"));
//! ```

mod dispatch;
mod items;
mod keyed;
mod quorum;
mod rule;

pub use rule::{Rule, RuleFn, RuleMap};

use items::{indexed_iterate, IndexedKind, ItemRule};
use keyed::{keyed_iterate, KeyedKind};

use crate::foundation::{EngineError, ValidationContext, ValidationOptions};
use crate::value::Value;

/// Validates a bare value: the base case terminating all recursion.
///
/// Always succeeds — downstream assertions are what may fail. The returned
/// context has `input == refinement`, a cached type tag, and an empty error
/// list.
#[must_use]
pub fn single(value: impl Into<Value>, options: ValidationOptions) -> ValidationContext {
    ValidationContext::single(value, options)
}

/// Validates a keyed object against a key→rule mapping.
///
/// Every ruled key is resolved per the entry policy; every unruled input
/// key is rejected or kept/stripped per the entry policy and
/// `stripUndefinedKey`. The refinement is a freshly assembled object.
pub fn object_iterate(
    value: impl Into<Value>,
    rules: &RuleMap,
    options: ValidationOptions,
) -> Result<ValidationContext, EngineError> {
    keyed_iterate(
        KeyedKind::Object,
        value.into(),
        rules,
        options,
        "objectIterate",
    )
}

/// Validates a map against a key→rule mapping.
///
/// Same contract as [`object_iterate`]; the refinement is rebuilt as a new
/// map.
pub fn map_iterate(
    value: impl Into<Value>,
    rules: &RuleMap,
    options: ValidationOptions,
) -> Result<ValidationContext, EngineError> {
    keyed_iterate(KeyedKind::Map, value.into(), rules, options, "mapIterate")
}

/// Validates every element of an array against one rule, then applies the
/// configured item-quorum policy to the per-element outcomes.
pub fn array_iterate(
    value: impl Into<Value>,
    rule: &Rule,
    options: ValidationOptions,
) -> Result<ValidationContext, EngineError> {
    indexed_iterate(
        IndexedKind::Array,
        value.into(),
        ItemRule::Single(rule),
        options,
        "arrayIterate",
    )
}

/// Validates every element of a set against one rule.
///
/// Same contract as [`array_iterate`]; the refinement is rebuilt as a new
/// set from the surviving elements, with no order guarantee.
pub fn set_iterate(
    value: impl Into<Value>,
    rule: &Rule,
    options: ValidationOptions,
) -> Result<ValidationContext, EngineError> {
    indexed_iterate(
        IndexedKind::Set,
        value.into(),
        ItemRule::Single(rule),
        options,
        "setIterate",
    )
}

/// Validates an array of objects: every element is scanned against the same
/// key→rule mapping, and the item-quorum policy aggregates the outcomes.
///
/// A fixed composition of [`array_iterate`] and [`object_iterate`] — it adds
/// no policy of its own.
pub fn array_object_iterate(
    value: impl Into<Value>,
    rules: &RuleMap,
    options: ValidationOptions,
) -> Result<ValidationContext, EngineError> {
    indexed_iterate(
        IndexedKind::Array,
        value.into(),
        ItemRule::Keyed(rules),
        options,
        "arrayObjectIterate",
    )
}

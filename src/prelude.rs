//! Prelude module for convenient imports.
//!
//! Provides a single `use sift::prelude::*;` import that brings in the
//! engine entry points, the rule model, the option/error types, and the
//! value model.
//!
//! # Examples
//!
//! ```
//! use sift::prelude::*;
//! use sift::{rules, value};
//!
//! let report = object_iterate(
//!     value!({ "name": "Alice" }),
//!     &rules! { "name" => Rule::leaf(|ctx| ctx.required()?.string()) },
//!     ValidationOptions::default(),
//! )
//! .unwrap();
//! assert!(report.is_valid());
//! ```

// ============================================================================
// ENGINE: entry points and rule model
// ============================================================================

pub use crate::engine::{
    array_iterate, array_object_iterate, map_iterate, object_iterate, set_iterate, single, Rule,
    RuleMap,
};

// ============================================================================
// FOUNDATION: context, options, errors
// ============================================================================

pub use crate::foundation::{
    AssertOutcome, EngineError, EntryMode, ItemMode, UsageError, ValidationContext,
    ValidationError, ValidationOptions,
};

// ============================================================================
// VALUE MODEL
// ============================================================================

pub use crate::value::{classify, TypeTag, Value};

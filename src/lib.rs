//! # sift
//!
//! A schema-less, chainable value validation and refinement engine.
//!
//! Given an arbitrary runtime [`Value`](value::Value) and a composable rule
//! tree, sift determines validity, collects structured diagnostics, and
//! produces a refined (possibly transformed and pruned) copy of the input.
//!
//! ## Quick Start
//!
//! ```rust
//! use sift::prelude::*;
//! use sift::{rules, value};
//!
//! let rules = rules! {
//!     "name" => Rule::leaf(|ctx| ctx.required()?.string()?.trim()),
//!     "age" => Rule::leaf(|ctx| ctx.required()?.positive_number()),
//! };
//!
//! let report = object_iterate(
//!     value!({ "name": " Alice ", "age": 30 }),
//!     &rules,
//!     ValidationOptions::default().with_soft_fail(true),
//! )
//! .unwrap();
//!
//! assert!(report.is_valid());
//! assert_eq!(report.refinement(), &value!({ "name": "Alice", "age": 30 }));
//! ```
//!
//! ## Layout
//!
//! - [`value`] — the dynamic [`Value`](value::Value) model and the
//!   [`classify`](value::classify) type-tag function.
//! - [`foundation`] — the per-node validation context, the option set, and
//!   the two-class error design ([`UsageError`](foundation::UsageError) for
//!   caller mistakes, [`ValidationError`](foundation::ValidationError) for
//!   data violations).
//! - [`engine`] — the rule-tree traversal engine: `single`,
//!   `object_iterate`, `array_iterate`, `set_iterate`, `map_iterate`,
//!   `array_object_iterate`.
//! - [`assertions`] — the chainable leaf assertion catalogue.
//!
//! ## Failure policy
//!
//! Fail-fast callers leave `softFail` off and match the returned
//! [`EngineError`](foundation::EngineError); best-effort callers (form
//! validation and the like) turn it on and inspect
//! `{ is_valid, errors, refinement }` on the returned context. Caller
//! mistakes (wrong container shape, empty rule maps, missing quorum
//! thresholds) surface as [`UsageError`](foundation::UsageError) regardless
//! of the policy.

// ValidationContext moves through every assertion by value; the chain style
// depends on consuming self, so the large-enum-variant family of lints stays
// off.
#![allow(clippy::result_large_err)]

pub mod assertions;
pub mod engine;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod value;

//! Foundation: context, options, errors, failure sink.
//!
//! Everything the traversal engine and the assertion catalogue share:
//!
//! - **Context**: [`ValidationContext`], the per-node mutable record
//!   (input, refinement, validity, errors, options) threaded through one
//!   validation branch.
//! - **Options**: [`ValidationOptions`] with the quorum and entry policies.
//! - **Errors**: the [`ValidationError`] / [`UsageError`] split and the
//!   [`EngineError`] umbrella.
//! - **Sink**: the single choke point deciding between fail-fast and
//!   accumulate-and-report.

pub mod context;
pub mod error;
pub mod options;
mod sink;

pub use context::{AssertOutcome, ValidationContext};
pub use error::{EngineError, ErrorParams, UsageError, ValidationError};
pub use options::{EntryMode, ItemMode, ValidationOptions};

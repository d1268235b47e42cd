//! Rule dispatch.
//!
//! One place decides what "run this rule against that value" means for each
//! [`Rule`] variant, so the keyed and indexed traversals stay symmetric.

use crate::engine::items::{indexed_iterate, IndexedKind, ItemRule};
use crate::engine::keyed::{keyed_iterate, KeyedKind};
use crate::engine::rule::Rule;
use crate::foundation::{EngineError, ValidationContext, ValidationOptions};
use crate::value::Value;

/// Where the value sits in its parent container, for error attribution.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Position<'a> {
    Keyed(&'a str),
    Indexed(usize),
}

/// Runs a rule against a value bound at the given position.
///
/// - `Leaf` chains run on a child context carrying the position, so the
///   failure sink stamps attribution directly.
/// - `Nested` recurses into a keyed scan of the value; its errors come back
///   attributed to the inner keys and the caller prefixes/tags them.
/// - `Items` runs an indexed scan of the value under the embedded option
///   overlay; `softFail` is inherited from the enclosing scan so that no
///   validation error crosses a container boundary the caller did not ask
///   for.
pub(crate) fn apply_rule(
    rule: &Rule,
    value: &Value,
    position: Position<'_>,
    options: &ValidationOptions,
) -> Result<ValidationContext, EngineError> {
    match rule {
        Rule::Leaf(chain) => {
            let child = match position {
                Position::Keyed(key) => {
                    ValidationContext::child_keyed(value.clone(), key, options.clone())
                }
                Position::Indexed(index) => {
                    ValidationContext::child_indexed(value.clone(), index, options.clone())
                }
            };
            chain(child).map_err(EngineError::from)
        }
        Rule::Nested(rules) => keyed_iterate(
            KeyedKind::Object,
            value.clone(),
            rules,
            options.clone(),
            "objectIterate",
        ),
        Rule::Items(inner, item_options) => {
            let mut overlay = item_options.clone();
            overlay.soft_fail = options.soft_fail;
            indexed_iterate(
                IndexedKind::Array,
                value.clone(),
                ItemRule::Single(inner),
                overlay,
                "arrayIterate",
            )
        }
    }
}

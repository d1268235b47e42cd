//! Indexed-container traversal, shared by `arrayIterate`, `setIterate`, and
//! the `arrayObjectIterate` composition.
//!
//! Every element gets an isolated child context carrying a forced
//! `softFail: true` overlay, so a single bad element never aborts the scan;
//! the quorum policy then decides the collection's aggregate verdict from
//! the valid/invalid counts. Usage errors raised by a nested dispatch are
//! not softened — they always propagate.

use crate::engine::dispatch::{apply_rule, Position};
use crate::engine::keyed::{keyed_iterate, KeyedKind};
use crate::engine::rule::{Rule, RuleMap};
use crate::foundation::{
    EngineError, ItemMode, UsageError, ValidationContext, ValidationError, ValidationOptions,
};
use crate::value::{classify, Value};

/// Which indexed container shape a traversal expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndexedKind {
    Array,
    Set,
}

impl IndexedKind {
    fn expected(self) -> &'static str {
        match self {
            IndexedKind::Array => "array",
            IndexedKind::Set => "set",
        }
    }

    fn take_items(self, input: Value) -> Result<Vec<Value>, Value> {
        match (self, input) {
            (IndexedKind::Array, Value::Array(items)) | (IndexedKind::Set, Value::Set(items)) => {
                Ok(items)
            }
            (_, other) => Err(other),
        }
    }

    fn rebuild(self, items: Vec<Value>) -> Value {
        match self {
            IndexedKind::Array => Value::Array(items),
            // Refined elements may collide after transforms; the set
            // reconstruction de-duplicates again.
            IndexedKind::Set => Value::set(items),
        }
    }
}

/// The per-element rule of an indexed scan: either an ordinary [`Rule`] or
/// a borrowed rule map (the `arrayObjectIterate` composition).
pub(crate) enum ItemRule<'a> {
    Single(&'a Rule),
    Keyed(&'a RuleMap),
}

impl ItemRule<'_> {
    fn apply(
        &self,
        value: &Value,
        index: usize,
        options: &ValidationOptions,
    ) -> Result<ValidationContext, EngineError> {
        match self {
            ItemRule::Single(rule) => apply_rule(rule, value, Position::Indexed(index), options),
            ItemRule::Keyed(rules) => keyed_iterate(
                KeyedKind::Object,
                value.clone(),
                rules,
                options.clone(),
                "objectIterate",
            ),
        }
    }

    /// Leaf chains stamp their own attribution through the sink; everything
    /// else comes back attributed to inner positions only.
    fn is_leaf(&self) -> bool {
        matches!(self, ItemRule::Single(Rule::Leaf(_)))
    }
}

pub(crate) fn indexed_iterate(
    kind: IndexedKind,
    input: Value,
    rule: ItemRule<'_>,
    options: ValidationOptions,
    operation: &'static str,
) -> Result<ValidationContext, EngineError> {
    let items = kind.take_items(input).map_err(|other| {
        UsageError::InvalidInput {
            operation,
            expected: kind.expected(),
            actual: classify(&other).name(),
        }
    })?;

    if items.is_empty() {
        return Err(UsageError::EmptyInput { operation }.into());
    }

    let mode = options.item_validation_mode;
    if mode.needs_threshold() && options.item_validation_threshold.is_none() {
        return Err(UsageError::MissingThreshold { mode: mode.name() }.into());
    }
    let threshold = options.item_validation_threshold.unwrap_or(0);

    tracing::trace!(operation, elements = items.len(), mode = mode.name(), "indexed scan");

    // Elements run under forced soft-fail: the scan owns the verdict.
    let mut element_options = options.clone();
    element_options.soft_fail = true;

    let mut valid = 0usize;
    let mut invalid = 0usize;
    let mut passing: Vec<Value> = Vec::new();
    let mut element_errors: Vec<ValidationError> = Vec::new();

    for (index, element) in items.iter().enumerate() {
        if options.abort_early
            && mode.decided_failed(valid, invalid, items.len() - index, threshold)
        {
            tracing::trace!(operation, index, "quorum decided, scan aborted");
            break;
        }

        let child = rule.apply(element, index, &element_options)?;
        if child.is_valid {
            valid += 1;
            passing.push(child.refinement);
        } else {
            invalid += 1;
            let from_leaf = rule.is_leaf();
            for mut error in child.errors {
                if !from_leaf {
                    error.tag_index(index);
                }
                element_errors.push(error);
            }
        }
    }

    let passed = mode.verdict(valid, invalid, threshold);
    tracing::trace!(operation, valid, invalid, passed, "quorum verdict");

    let container = kind.rebuild(items);
    let mut ctx = ValidationContext::single(container.clone(), options.clone());

    if passed {
        ctx.refine(kind.rebuild(passing));
        return Ok(ctx);
    }

    // Failing verdicts driven by an excess of valid elements surface a
    // single policy error; everything else surfaces the per-element errors.
    let excess_valid = match mode {
        ItemMode::None => valid > 0,
        ItemMode::One => valid > 1,
        ItemMode::AtMost | ItemMode::Exactly => valid > threshold,
        _ => false,
    };
    let mut surfaced = if excess_valid {
        vec![quorum_error(mode, threshold, valid, invalid)]
    } else {
        element_errors
    };
    if surfaced.is_empty() {
        surfaced.push(quorum_error(mode, threshold, valid, invalid));
    }

    if !options.soft_fail {
        let first = surfaced.remove(0);
        return Err(first.into());
    }

    // `all` hands back the input untouched on failure; the tolerant modes
    // keep only the elements that individually passed.
    ctx.refine(if mode == ItemMode::All {
        container
    } else {
        kind.rebuild(passing)
    });
    ctx.absorb(surfaced);
    Ok(ctx)
}

fn quorum_error(mode: ItemMode, threshold: usize, valid: usize, invalid: usize) -> ValidationError {
    let mut error = ValidationError::new(
        "item_quorum",
        format!(
            "Item quorum '{}' not met: {} valid, {} invalid.",
            mode.name(),
            valid,
            invalid
        ),
    )
    .with_criterion("item_quorum")
    .with_param("mode", mode.name())
    .with_param("valid", valid.to_string());
    if mode.needs_threshold() {
        error = error.with_param("threshold", threshold.to_string());
    }
    error
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rule::Rule;
    use crate::value;

    fn not_two() -> Rule {
        Rule::leaf(|ctx| ctx.is_not(2))
    }

    fn soft() -> ValidationOptions {
        ValidationOptions::default().with_soft_fail(true)
    }

    fn scan(input: Value, rule: &Rule, options: ValidationOptions) -> ValidationContext {
        indexed_iterate(
            IndexedKind::Array,
            input,
            ItemRule::Single(rule),
            options,
            "arrayIterate",
        )
        .unwrap()
    }

    #[test]
    fn empty_array_is_a_usage_error_even_under_soft_fail() {
        let rule = not_two();
        let err = indexed_iterate(
            IndexedKind::Array,
            Value::Array(vec![]),
            ItemRule::Single(&rule),
            soft(),
            "arrayIterate",
        )
        .unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn counted_mode_without_threshold_is_a_usage_error() {
        let rule = not_two();
        let err = indexed_iterate(
            IndexedKind::Array,
            value!([1, 2, 3]),
            ItemRule::Single(&rule),
            soft().with_item_mode(ItemMode::Exactly),
            "arrayIterate",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Usage(UsageError::MissingThreshold { .. })
        ));
    }

    #[test]
    fn all_mode_fails_and_returns_input_unchanged() {
        let rule = not_two();
        let ctx = scan(value!([1, 2, 3]), &rule, soft());
        assert!(!ctx.is_valid());
        assert_eq!(ctx.refinement(), &value!([1, 2, 3]));
        assert_eq!(ctx.errors().len(), 1);
        assert_eq!(ctx.errors()[0].index, Some(1));
    }

    #[test]
    fn any_mode_keeps_only_passing_elements() {
        let rule = not_two();
        let ctx = scan(
            value!([1, 2, 3]),
            &rule,
            soft().with_item_mode(ItemMode::Any),
        );
        assert!(ctx.is_valid());
        assert_eq!(ctx.refinement(), &value!([1, 3]));
    }

    #[test]
    fn none_mode_failure_is_a_policy_error() {
        let rule = not_two();
        let ctx = scan(
            value!([1, 2, 3]),
            &rule,
            soft().with_item_mode(ItemMode::None),
        );
        assert!(!ctx.is_valid());
        assert_eq!(ctx.errors().len(), 1);
        assert_eq!(ctx.errors()[0].code, "item_quorum");
    }

    #[test]
    fn hard_fail_surfaces_first_driving_error() {
        let rule = not_two();
        let err = indexed_iterate(
            IndexedKind::Array,
            value!([1, 2, 3]),
            ItemRule::Single(&rule),
            ValidationOptions::default(),
            "arrayIterate",
        )
        .unwrap_err();
        let validation = err.as_validation().expect("validation error");
        assert_eq!(validation.index, Some(1));
    }

    #[test]
    fn set_scan_rebuilds_a_set_of_passing_elements() {
        let rule = not_two();
        let ctx = indexed_iterate(
            IndexedKind::Set,
            Value::set([Value::from(1), Value::from(2), Value::from(3)]),
            ItemRule::Single(&rule),
            soft().with_item_mode(ItemMode::Any),
            "setIterate",
        )
        .unwrap();
        assert!(ctx.is_valid());
        assert_eq!(ctx.refinement(), &Value::set([Value::from(1), Value::from(3)]));
    }

    #[test]
    fn abort_early_truncates_the_scan() {
        let rule = not_two();
        let ctx = scan(
            value!([2, 1, 2, 1, 2]),
            &rule,
            soft().with_abort_early(true),
        );
        // First element fails; `all` is then decided and the scan stops.
        assert!(!ctx.is_valid());
        assert_eq!(ctx.errors().len(), 1);
    }
}

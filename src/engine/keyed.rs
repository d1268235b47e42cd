//! Keyed-container traversal, shared by `objectIterate` and `mapIterate`.
//!
//! Two passes over the node:
//!
//! 1. every ruled key is resolved against the input — missing keys violate
//!    the entry policy when it requires them, present keys get a child
//!    context and their rule dispatched on its variant;
//! 2. every input key without a rule is either a violation (entry policy
//!    forbids extras) or kept/stripped per `stripUndefinedKey`.
//!
//! The refinement is a freshly assembled container; the input is never
//! mutated in place. Child errors fold upward tagged with their originating
//! key (dotted paths for nested scans).

use crate::engine::dispatch::{apply_rule, Position};
use crate::engine::rule::{Rule, RuleMap};
use crate::foundation::{
    EngineError, UsageError, ValidationContext, ValidationError, ValidationOptions,
};
use crate::value::{classify, Entries, Value};

/// Which keyed container shape a traversal expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyedKind {
    Object,
    Map,
}

impl KeyedKind {
    fn expected(self) -> &'static str {
        match self {
            KeyedKind::Object => "object",
            KeyedKind::Map => "map",
        }
    }

    fn take_entries(self, input: Value) -> Result<Entries, Value> {
        match (self, input) {
            (KeyedKind::Object, Value::Object(entries)) | (KeyedKind::Map, Value::Map(entries)) => {
                Ok(entries)
            }
            (_, other) => Err(other),
        }
    }

    fn rebuild(self, entries: Entries) -> Value {
        match self {
            KeyedKind::Object => Value::Object(entries),
            KeyedKind::Map => Value::Map(entries),
        }
    }
}

pub(crate) fn keyed_iterate(
    kind: KeyedKind,
    input: Value,
    rules: &RuleMap,
    options: ValidationOptions,
    operation: &'static str,
) -> Result<ValidationContext, EngineError> {
    let entries = kind.take_entries(input).map_err(|other| {
        UsageError::InvalidInput {
            operation,
            expected: kind.expected(),
            actual: classify(&other).name(),
        }
    })?;

    if entries.is_empty() {
        return Err(UsageError::EmptyInput { operation }.into());
    }
    if rules.is_empty() {
        return Err(UsageError::EmptyRules { operation }.into());
    }

    tracing::trace!(operation, keys = entries.len(), rules = rules.len(), "keyed scan");

    let entry_mode = options.entry_validation_mode;
    let mut refined = Entries::new();
    let mut collected: Vec<ValidationError> = Vec::new();
    let mut failed = false;

    // Pass 1: ruled keys, in rule order.
    for (key, rule) in rules.iter() {
        if options.abort_early && failed {
            break;
        }
        match entries.get(key.as_str()) {
            None => {
                if entry_mode.requires_all_rules() {
                    let error = ValidationError::new(
                        "missing_required",
                        format!("The value '{key}' is required."),
                    )
                    .with_key(key.clone())
                    .with_criterion("required_key");
                    if !options.soft_fail {
                        return Err(error.into());
                    }
                    collected.push(error);
                    failed = true;
                }
            }
            Some(value) => {
                let child = apply_rule(rule, value, Position::Keyed(key.as_str()), &options)?;
                if !child.is_valid {
                    failed = true;
                    let needs_prefix = !matches!(rule, Rule::Leaf(_));
                    for mut error in child.errors {
                        if needs_prefix {
                            error.prefix_key(key);
                        }
                        collected.push(error);
                    }
                }
                refined.insert(key.clone(), child.refinement);
            }
        }
    }

    // Pass 2: input keys without a rule.
    for (key, value) in &entries {
        if options.abort_early && failed {
            break;
        }
        if rules.contains(key.as_str()) {
            continue;
        }
        if entry_mode.forbids_extra_keys() {
            let error =
                ValidationError::new("undefined_key", format!("Key '{key}' is undefined."))
                    .with_key(key.clone())
                    .with_criterion("known_key");
            if !options.soft_fail {
                return Err(error.into());
            }
            collected.push(error);
            failed = true;
        } else if !options.strip_undefined_key {
            refined.insert(key.clone(), value.clone());
        }
    }

    tracing::trace!(operation, valid = !failed, errors = collected.len(), "keyed verdict");

    let mut ctx = ValidationContext::single(kind.rebuild(entries), options);
    ctx.refine(kind.rebuild(refined));
    ctx.absorb(collected);
    Ok(ctx)
}

// ============================================================================
// TESTS
// ============================================================================

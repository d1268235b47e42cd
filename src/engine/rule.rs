//! Rule model.
//!
//! A rule's shape is decided once, at construction time, by picking a
//! [`Rule`] variant — the traversal engine dispatches on the tag instead of
//! re-inspecting callables and maps at every step.

use std::fmt;

use indexmap::IndexMap;

use crate::foundation::{AssertOutcome, ValidationContext, ValidationOptions};

/// Boxed assertion chain: consumes a fresh child context, applies
/// assertions, returns the outcome.
pub type RuleFn = dyn Fn(ValidationContext) -> AssertOutcome + Send + Sync;

/// One node of a rule tree.
///
/// # Examples
///
/// ```
/// use sift::engine::{Rule, RuleMap};
/// use sift::foundation::ValidationOptions;
///
/// let rule = Rule::nested(
///     RuleMap::new()
///         .rule("name", Rule::leaf(|ctx| ctx.required()?.string()))
///         .rule("tags", Rule::items(
///             Rule::leaf(|ctx| ctx.string()),
///             ValidationOptions::default(),
///         )),
/// );
/// assert_eq!(rule.kind(), "nested");
/// ```
pub enum Rule {
    /// A zero-argument assertion chain applied to the node's value.
    Leaf(Box<RuleFn>),
    /// A keyed shape-tree applied to an object/map value (recursive).
    Nested(RuleMap),
    /// An embedded array rule: the inner rule runs against every element of
    /// the node's array value under the given option overlay.
    Items(Box<Rule>, ValidationOptions),
}

impl Rule {
    /// Wraps an assertion chain as a leaf rule.
    pub fn leaf<F>(chain: F) -> Self
    where
        F: Fn(ValidationContext) -> AssertOutcome + Send + Sync + 'static,
    {
        Rule::Leaf(Box::new(chain))
    }

    /// Wraps a keyed rule map.
    #[must_use]
    pub fn nested(rules: RuleMap) -> Self {
        Rule::Nested(rules)
    }

    /// Wraps an embedded array rule with its option overlay.
    #[must_use]
    pub fn items(rule: Rule, options: ValidationOptions) -> Self {
        Rule::Items(Box::new(rule), options)
    }

    /// Variant name, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Rule::Leaf(_) => "leaf",
            Rule::Nested(_) => "nested",
            Rule::Items(_, _) => "items",
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Leaf(_) => f.write_str("Rule::Leaf(<chain>)"),
            Rule::Nested(rules) => f.debug_tuple("Rule::Nested").field(rules).finish(),
            Rule::Items(rule, options) => f
                .debug_tuple("Rule::Items")
                .field(rule)
                .field(options)
                .finish(),
        }
    }
}

// ============================================================================
// RULE MAP
// ============================================================================

/// Insertion-ordered mapping from key to [`Rule`].
#[derive(Default)]
pub struct RuleMap {
    entries: IndexMap<String, Rule>,
}

impl RuleMap {
    /// Creates an empty rule map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule for a key (builder form).
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(mut self, key: impl Into<String>, rule: Rule) -> Self {
        self.entries.insert(key.into(), rule);
        self
    }

    /// Adds a rule for a key.
    pub fn insert(&mut self, key: impl Into<String>, rule: Rule) {
        self.entries.insert(key.into(), rule);
    }

    /// Looks up the rule bound to a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.entries.get(key)
    }

    /// True when a rule is bound to the key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of ruled keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no keys are ruled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates ruled keys and rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Rule)> {
        self.entries.iter()
    }
}

impl fmt::Debug for RuleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v.kind())))
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

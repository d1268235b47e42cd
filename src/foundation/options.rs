//! Option set controlling traversal and failure policy.
//!
//! A [`ValidationOptions`] value is always the result of overlaying caller
//! choices onto the baseline defaults: `Default::default()` is the baseline,
//! the `with_*` builders are the overlay. Field names (de)serialize in
//! camelCase, so option sets can be read straight from configuration JSON.

use serde::{Deserialize, Serialize};

/// Quorum policy for indexed-container scans (arrays and sets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemMode {
    /// Every element must pass.
    All,
    /// At least one element must pass.
    Any,
    /// No element may pass.
    None,
    /// Exactly one element must pass.
    One,
    /// At least `threshold` elements must pass.
    AtLeast,
    /// At most `threshold` elements may pass.
    AtMost,
    /// Exactly `threshold` elements must pass.
    Exactly,
}

impl ItemMode {
    /// True for the modes that require an explicit numeric threshold.
    #[must_use]
    pub fn needs_threshold(self) -> bool {
        matches!(self, ItemMode::AtLeast | ItemMode::AtMost | ItemMode::Exactly)
    }

    /// Lowercase wire name, for diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ItemMode::All => "all",
            ItemMode::Any => "any",
            ItemMode::None => "none",
            ItemMode::One => "one",
            ItemMode::AtLeast => "atLeast",
            ItemMode::AtMost => "atMost",
            ItemMode::Exactly => "exactly",
        }
    }
}

/// Key-presence and extra-key policy for keyed-container scans (objects and
/// maps).
///
/// Two independent questions — "must every ruled key be present?" and "may
/// the input carry unruled keys?" — give the four modes:
///
/// | mode | ruled keys required | extra keys allowed |
/// |---|---|---|
/// | `Strict` | yes | no |
/// | `RequireAllRules` | yes | yes |
/// | `ForbidExtra` | no | no |
/// | `Flexible` | no | yes |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryMode {
    Strict,
    Flexible,
    ForbidExtra,
    RequireAllRules,
}

impl EntryMode {
    /// Whether every key named by the rule map must be present in the input.
    #[must_use]
    pub fn requires_all_rules(self) -> bool {
        matches!(self, EntryMode::Strict | EntryMode::RequireAllRules)
    }

    /// Whether input keys without a rule are a violation.
    #[must_use]
    pub fn forbids_extra_keys(self) -> bool {
        matches!(self, EntryMode::Strict | EntryMode::ForbidExtra)
    }
}

/// The active configuration for one validation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    /// Quorum policy for array/set scans.
    pub item_validation_mode: ItemMode,
    /// Threshold for the `atLeast` / `atMost` / `exactly` quorum modes.
    pub item_validation_threshold: Option<usize>,
    /// Key policy for object/map scans.
    pub entry_validation_mode: EntryMode,
    /// Whether unruled keys are dropped from the refinement (tolerant entry
    /// modes only).
    pub strip_undefined_key: bool,
    /// Accumulate violations instead of failing on the first one.
    pub soft_fail: bool,
    /// Stop scanning further siblings once a failure has been recorded.
    pub abort_early: bool,
    /// Reject calendar-impossible dates (Feb 30, Apr 31) in date assertions.
    pub strict_date_validation: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            item_validation_mode: ItemMode::All,
            item_validation_threshold: None,
            entry_validation_mode: EntryMode::Strict,
            strip_undefined_key: true,
            soft_fail: false,
            abort_early: false,
            strict_date_validation: false,
        }
    }
}

impl ValidationOptions {
    /// Baseline defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the quorum policy for array/set scans.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_item_mode(mut self, mode: ItemMode) -> Self {
        self.item_validation_mode = mode;
        self
    }

    /// Sets the quorum threshold.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_item_threshold(mut self, threshold: usize) -> Self {
        self.item_validation_threshold = Some(threshold);
        self
    }

    /// Sets the key policy for object/map scans.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_entry_mode(mut self, mode: EntryMode) -> Self {
        self.entry_validation_mode = mode;
        self
    }

    /// Sets whether unruled keys survive into the refinement.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_strip_undefined_key(mut self, strip: bool) -> Self {
        self.strip_undefined_key = strip;
        self
    }

    /// Switches to accumulate-and-report failure handling.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_soft_fail(mut self, soft: bool) -> Self {
        self.soft_fail = soft;
        self
    }

    /// Stops sibling scans after the first recorded failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_abort_early(mut self, abort: bool) -> Self {
        self.abort_early = abort;
        self
    }

    /// Enables the calendar-impossibility check in date assertions.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_strict_date_validation(mut self, strict: bool) -> Self {
        self.strict_date_validation = strict;
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_baseline() {
        let opts = ValidationOptions::default();
        assert_eq!(opts.item_validation_mode, ItemMode::All);
        assert_eq!(opts.entry_validation_mode, EntryMode::Strict);
        assert!(opts.strip_undefined_key);
        assert!(!opts.soft_fail);
        assert!(!opts.abort_early);
    }

    #[test]
    fn entry_mode_matrix() {
        assert!(EntryMode::Strict.requires_all_rules());
        assert!(EntryMode::Strict.forbids_extra_keys());
        assert!(EntryMode::RequireAllRules.requires_all_rules());
        assert!(!EntryMode::RequireAllRules.forbids_extra_keys());
        assert!(!EntryMode::ForbidExtra.requires_all_rules());
        assert!(EntryMode::ForbidExtra.forbids_extra_keys());
        assert!(!EntryMode::Flexible.requires_all_rules());
        assert!(!EntryMode::Flexible.forbids_extra_keys());
    }

    #[test]
    fn camel_case_wire_names() {
        let opts = ValidationOptions::default()
            .with_item_mode(ItemMode::AtLeast)
            .with_item_threshold(2)
            .with_entry_mode(EntryMode::RequireAllRules);
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json["itemValidationMode"], "atLeast");
        assert_eq!(json["itemValidationThreshold"], 2);
        assert_eq!(json["entryValidationMode"], "requireAllRules");
        assert_eq!(json["stripUndefinedKey"], true);
    }

    #[test]
    fn overlay_deserializes_over_defaults() {
        let opts: ValidationOptions =
            serde_json::from_str(r#"{"softFail": true, "itemValidationMode": "any"}"#).unwrap();
        assert!(opts.soft_fail);
        assert_eq!(opts.item_validation_mode, ItemMode::Any);
        // Unmentioned fields keep the baseline.
        assert_eq!(opts.entry_validation_mode, EntryMode::Strict);
    }
}

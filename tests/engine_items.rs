//! Indexed-container traversal: the quorum table, abort-early truncation,
//! refinement policies, and the array-of-objects composition.

use pretty_assertions::assert_eq;
use rstest::rstest;

use sift::prelude::*;
use sift::{rules, value};

fn soft() -> ValidationOptions {
    ValidationOptions::default().with_soft_fail(true)
}

/// A rule that fails only on the number 2.
fn not_two() -> Rule {
    Rule::leaf(|ctx| ctx.is_not(2))
}

#[rstest]
#[case::all_fails(ItemMode::All, None, false)]
#[case::any_passes(ItemMode::Any, None, true)]
#[case::none_fails(ItemMode::None, None, false)]
#[case::one_fails(ItemMode::One, None, false)]
#[case::at_least_two_passes(ItemMode::AtLeast, Some(2), true)]
#[case::at_most_two_passes(ItemMode::AtMost, Some(2), true)]
#[case::at_most_one_fails(ItemMode::AtMost, Some(1), false)]
#[case::exactly_two_passes(ItemMode::Exactly, Some(2), true)]
#[case::exactly_one_fails(ItemMode::Exactly, Some(1), false)]
fn quorum_table_on_one_failing_element(
    #[case] mode: ItemMode,
    #[case] threshold: Option<usize>,
    #[case] expected_valid: bool,
) {
    // [1, 2, 3] with a rule that fails only on 2: two valid, one invalid.
    let mut opts = soft().with_item_mode(mode);
    if let Some(threshold) = threshold {
        opts = opts.with_item_threshold(threshold);
    }
    let report = array_iterate(value!([1, 2, 3]), &not_two(), opts).unwrap();
    assert_eq!(report.is_valid(), expected_valid, "{mode:?}");
}

#[test]
fn all_failure_keeps_the_input_unchanged() {
    let report = array_iterate(value!([1, 2, 3]), &not_two(), soft()).unwrap();
    assert!(!report.is_valid());
    assert_eq!(report.refinement(), &value!([1, 2, 3]));
    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].index, Some(1));
}

#[test]
fn tolerant_modes_keep_only_passing_elements_in_order() {
    let report = array_iterate(
        value!([2, 1, 2, 3]),
        &not_two(),
        soft().with_item_mode(ItemMode::Any),
    )
    .unwrap();
    assert!(report.is_valid());
    assert_eq!(report.refinement(), &value!([1, 3]));
}

#[test]
fn one_mode_keeps_the_single_passing_element() {
    let report = array_iterate(
        value!([2, 5, 2]),
        &not_two(),
        soft().with_item_mode(ItemMode::One),
    )
    .unwrap();
    assert!(report.is_valid());
    assert_eq!(report.refinement(), &value!([5]));
}

#[test]
fn none_mode_yields_an_empty_refinement_on_pass() {
    let report = array_iterate(
        value!([2, 2]),
        &not_two(),
        soft().with_item_mode(ItemMode::None),
    )
    .unwrap();
    assert!(report.is_valid());
    assert_eq!(report.refinement(), &value!([]));
}

#[test]
fn abort_early_records_only_the_first_failing_element() {
    // Elements at positions 1 and 3 fail.
    let input = value!([1, 2, 3, 2, 5]);

    let full = array_iterate(input.clone(), &not_two(), soft()).unwrap();
    assert_eq!(full.errors().len(), 2);

    let truncated =
        array_iterate(input, &not_two(), soft().with_abort_early(true)).unwrap();
    assert_eq!(truncated.errors().len(), 1);
    assert_eq!(truncated.errors()[0].index, Some(1));
}

#[test]
fn abort_early_does_not_truncate_quorums_that_need_the_full_scan() {
    // `any` can only fail after every element has been seen; the last
    // element rescues the verdict even with abort-early on.
    let report = array_iterate(
        value!([2, 2, 2, 1]),
        &not_two(),
        soft().with_item_mode(ItemMode::Any).with_abort_early(true),
    )
    .unwrap();
    assert!(report.is_valid());
    assert_eq!(report.refinement(), &value!([1]));
}

#[test]
fn empty_array_is_a_usage_error_even_under_soft_fail() {
    let err = array_iterate(value!([]), &not_two(), soft()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Usage(UsageError::EmptyInput { .. })
    ));
}

#[test]
fn counted_modes_require_a_threshold() {
    let err = array_iterate(
        value!([1, 2]),
        &not_two(),
        soft().with_item_mode(ItemMode::AtLeast),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Usage(UsageError::MissingThreshold { .. })
    ));
}

#[test]
fn non_array_input_is_a_usage_error() {
    let err = array_iterate(value!({ "a": 1 }), &not_two(), soft()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Usage(UsageError::InvalidInput { .. })
    ));
}

#[test]
fn hard_fail_surfaces_the_first_driving_error() {
    let err = array_iterate(value!([1, 2, 3]), &not_two(), ValidationOptions::default())
        .unwrap_err();
    let validation = err.as_validation().expect("validation error");
    assert_eq!(validation.index, Some(1));
}

#[test]
fn excess_valid_failures_surface_a_policy_error() {
    let report = array_iterate(
        value!([1, 3, 5]),
        &not_two(),
        soft().with_item_mode(ItemMode::None),
    )
    .unwrap();
    assert!(!report.is_valid());
    assert_eq!(report.errors().len(), 1);
    let error = &report.errors()[0];
    assert_eq!(error.code, "item_quorum");
    assert_eq!(error.param("mode"), Some("none"));
}

// ============================================================================
// SETS
// ============================================================================

#[test]
fn set_scan_rebuilds_a_set() {
    let input = Value::set([Value::from(1), Value::from(2), Value::from(3)]);
    let report = set_iterate(
        input,
        &not_two(),
        soft().with_item_mode(ItemMode::Any),
    )
    .unwrap();
    assert!(report.is_valid());
    assert_eq!(
        report.refinement(),
        &Value::set([Value::from(1), Value::from(3)])
    );
}

#[test]
fn set_scan_rejects_arrays() {
    let err = set_iterate(value!([1, 2]), &not_two(), soft()).unwrap_err();
    assert!(err.is_usage());
}

#[test]
fn none_mode_on_sets_yields_the_empty_set() {
    let input = Value::set([Value::from(2)]);
    let report = set_iterate(
        input,
        &not_two(),
        soft().with_item_mode(ItemMode::None),
    )
    .unwrap();
    assert!(report.is_valid());
    assert_eq!(report.refinement(), &Value::Set(vec![]));
}

// ============================================================================
// ARRAY-OF-OBJECTS COMPOSITION
// ============================================================================

#[test]
fn array_object_iterate_scans_each_element_with_the_rule_map() {
    let rule_map = rules! {
        "name" => Rule::leaf(|ctx| ctx.required()?.string()),
        "age" => Rule::leaf(|ctx| ctx.required()?.positive_number()),
    };
    let report = array_object_iterate(
        value!([
            { "name": "Alice", "age": 30 },
            { "name": "Bob", "age": -1 },
        ]),
        &rule_map,
        soft(),
    )
    .unwrap();

    assert!(!report.is_valid());
    assert_eq!(report.errors().len(), 1);
    let error = &report.errors()[0];
    assert_eq!(error.index, Some(1));
    assert_eq!(error.key.as_deref(), Some("age"));
}

#[test]
fn array_object_iterate_rejects_non_object_elements() {
    let rule_map = rules! { "name" => Rule::leaf(|ctx| ctx.string()) };
    let err = array_object_iterate(
        value!([{ "name": "x" }, 5]),
        &rule_map,
        soft(),
    )
    .unwrap_err();
    // A non-object element is a caller shape mistake, surfaced even
    // mid-scan and even under soft-fail.
    assert!(err.is_usage());
}

#[test]
fn array_object_iterate_refines_each_element() {
    let rule_map = rules! {
        "tag" => Rule::leaf(|ctx| ctx.required()?.trim()?.to_uppercase()),
    };
    let report = array_object_iterate(
        value!([{ "tag": " a " }, { "tag": "b" }]),
        &rule_map,
        ValidationOptions::default(),
    )
    .unwrap();
    assert!(report.is_valid());
    assert_eq!(
        report.refinement(),
        &value!([{ "tag": "A" }, { "tag": "B" }])
    );
}

//! Item-quorum policy evaluation.
//!
//! An indexed-container scan classifies elements into valid and invalid
//! sets; the quorum policy then decides the collection's aggregate verdict.
//! The same arithmetic also answers the abort-early question: given the
//! counts so far and the number of elements not yet scanned, can the verdict
//! still come out as a pass? Once it cannot, the scan stops.

use crate::foundation::ItemMode;

impl ItemMode {
    /// Aggregate verdict after a (possibly truncated) scan.
    ///
    /// `threshold` is only meaningful for the counted modes; callers have
    /// already rejected counted modes without one.
    #[must_use]
    pub fn verdict(self, valid: usize, invalid: usize, threshold: usize) -> bool {
        match self {
            ItemMode::All => invalid == 0,
            ItemMode::Any => valid >= 1,
            ItemMode::None => valid == 0,
            ItemMode::One => valid == 1,
            ItemMode::AtLeast => valid >= threshold,
            ItemMode::AtMost => valid <= threshold,
            ItemMode::Exactly => valid == threshold,
        }
    }

    /// True once the verdict can no longer come out as a pass, no matter how
    /// the `remaining` unscanned elements evaluate.
    ///
    /// This is the abort-early trigger: `All` is decided by the first
    /// invalid element, `None` by the first valid one, the capped modes once
    /// the valid count exceeds their cap, and the floored modes once the
    /// remaining elements cannot reach the floor. `Any` can only fail after
    /// a full scan.
    #[must_use]
    pub fn decided_failed(
        self,
        valid: usize,
        invalid: usize,
        remaining: usize,
        threshold: usize,
    ) -> bool {
        match self {
            ItemMode::All => invalid > 0,
            ItemMode::Any => false,
            ItemMode::None => valid > 0,
            ItemMode::One => valid > 1,
            ItemMode::AtLeast => valid + remaining < threshold,
            ItemMode::AtMost => valid > threshold,
            ItemMode::Exactly => valid > threshold || valid + remaining < threshold,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Error types.
//!
//! Two disjoint classes with different propagation contracts:
//!
//! - [`UsageError`] — the caller misused the API surface (wrong argument
//!   shape, empty required container, missing threshold). Always surfaced
//!   immediately regardless of `softFail`, never placed in a context's
//!   accumulated error list.
//! - [`ValidationError`] — the data under test violated an assertion.
//!   Thrown or accumulated depending on the `softFail` option.
//!
//! String fields use `Cow<'static, str>` for zero allocation in the common
//! case of static error codes and messages.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

/// Inline key/value parameters attached to a validation error.
///
/// Most errors carry 0–2 params, so they live inline.
pub type ErrorParams = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured record of one data violation.
///
/// # Examples
///
/// ```
/// use sift::foundation::ValidationError;
///
/// let error = ValidationError::new("min_value", "Value is too small")
///     .with_key("age")
///     .with_param("min", "0");
/// assert_eq!(error.param("min"), Some("0"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error code for programmatic handling.
    pub code: Cow<'static, str>,

    /// Human-readable message, already templated.
    pub message: Cow<'static, str>,

    /// Originating object/map key, when the failure happened inside a keyed
    /// scan. Nested scans produce dotted paths (`"user.email"`).
    pub key: Option<String>,

    /// Originating array/set position, when the failure happened inside an
    /// indexed scan.
    pub index: Option<usize>,

    /// Name of the assertion that reported the failure.
    pub criterion: Option<&'static str>,

    /// Ordered key/value parameters (expected/actual values and the like).
    pub params: ErrorParams,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            key: None,
            index: None,
            criterion: None,
            params: ErrorParams::new(),
        }
    }

    /// Sets the originating key.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the originating index.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Sets the reporting assertion's name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_criterion(mut self, criterion: &'static str) -> Self {
        self.criterion = Some(criterion);
        self
    }

    /// Adds a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Prefixes the key path with a parent key, keeping the existing path as
    /// the suffix. Used when folding child errors into a keyed parent scan.
    pub(crate) fn prefix_key(&mut self, parent: &str) {
        self.key = Some(match self.key.take() {
            Some(inner) => format!("{parent}.{inner}"),
            None => parent.to_string(),
        });
    }

    /// Stamps the element index, when not already attributed to a deeper
    /// position.
    pub(crate) fn tag_index(&mut self, index: usize) {
        if self.index.is_none() {
            self.index = Some(index);
        }
    }

    /// Converts the error to a JSON structure.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::json;

        let params: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();

        json!({
            "code": self.code,
            "message": self.message,
            "key": self.key,
            "index": self.index,
            "criterion": self.criterion,
            "params": params,
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.key, self.index) {
            (Some(key), _) => write!(f, "[{}] {}: {}", key, self.code, self.message)?,
            (None, Some(index)) => write!(f, "[{}] {}: {}", index, self.code, self.message)?,
            (None, None) => write!(f, "{}: {}", self.code, self.message)?,
        }

        if !self.params.is_empty() {
            write!(f, " (")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, ")")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// USAGE ERROR
// ============================================================================

/// The caller misused the API surface.
///
/// Usage errors represent programmer mistakes, not data invalidity: they are
/// returned immediately regardless of `softFail` and never enter a context's
/// error list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// The input value has the wrong shape for the requested traversal.
    #[error("`{operation}` requires {expected} input, got {actual}")]
    InvalidInput {
        operation: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// The input container is empty.
    #[error("`{operation}` requires a non-empty input")]
    EmptyInput { operation: &'static str },

    /// The rule map is empty.
    #[error("`{operation}` requires a non-empty rule map")]
    EmptyRules { operation: &'static str },

    /// A counted quorum mode was selected without its threshold.
    #[error("item validation mode `{mode}` requires itemValidationThreshold")]
    MissingThreshold { mode: &'static str },
}

// ============================================================================
// ENGINE ERROR
// ============================================================================

/// Umbrella error for the fallible engine entry points.
///
/// `Usage` always propagates; `Validation` only escapes when `softFail` is
/// off (fail-fast callers match on it, best-effort callers never see it).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl EngineError {
    /// Returns the validation error, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            EngineError::Validation(err) => Some(err),
            EngineError::Usage(_) => None,
        }
    }

    /// True for the usage class.
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, EngineError::Usage(_))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_key() {
        let error = ValidationError::new("required", "The value is required.").with_key("email");
        assert_eq!(format!("{error}"), "[email] required: The value is required.");
    }

    #[test]
    fn display_with_index_and_params() {
        let error = ValidationError::new("invalid_type", "Wrong type")
            .with_index(3)
            .with_param("expected", "string");
        assert_eq!(format!("{error}"), "[3] invalid_type: Wrong type (expected=string)");
    }

    #[test]
    fn prefix_key_builds_dotted_paths() {
        let mut error = ValidationError::new("x", "y").with_key("email");
        error.prefix_key("user");
        assert_eq!(error.key.as_deref(), Some("user.email"));

        let mut bare = ValidationError::new("x", "y");
        bare.prefix_key("user");
        assert_eq!(bare.key.as_deref(), Some("user"));
    }

    #[test]
    fn tag_index_keeps_deeper_attribution() {
        let mut error = ValidationError::new("x", "y").with_index(7);
        error.tag_index(0);
        assert_eq!(error.index, Some(7));
    }

    #[test]
    fn zero_alloc_static_strings() {
        let error = ValidationError::new("required", "The value is required.");
        assert!(matches!(error.code, Cow::Borrowed(_)));
        assert!(matches!(error.message, Cow::Borrowed(_)));
    }

    #[test]
    fn usage_error_display() {
        let error = UsageError::InvalidInput {
            operation: "objectIterate",
            expected: "object",
            actual: "array",
        };
        assert_eq!(
            error.to_string(),
            "`objectIterate` requires object input, got array"
        );
    }

    #[test]
    fn engine_error_classification() {
        let usage: EngineError = UsageError::EmptyInput { operation: "arrayIterate" }.into();
        assert!(usage.is_usage());
        assert!(usage.as_validation().is_none());

        let validation: EngineError = ValidationError::new("x", "y").into();
        assert!(!validation.is_usage());
        assert!(validation.as_validation().is_some());
    }

    #[test]
    fn json_export_shape() {
        let json = ValidationError::new("min_value", "too small")
            .with_key("age")
            .with_criterion("min_value")
            .with_param("min", "0")
            .to_json_value();
        assert_eq!(json["code"], "min_value");
        assert_eq!(json["key"], "age");
        assert_eq!(json["criterion"], "min_value");
        assert_eq!(json["params"]["min"], "0");
    }
}

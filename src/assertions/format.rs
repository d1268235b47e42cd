//! Format assertions: addresses, identifiers, credentials, file names,
//! dates, and caller-supplied regular expressions.
//!
//! Fixed patterns are compiled once into `LazyLock` statics. Date assertions
//! validate shape by pattern; the optional `strictDateValidation` option
//! adds a calendar check (month ranges, per-month day counts, leap years).

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::{AssertOutcome, ValidationContext, ValidationError};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^([\w-]+(?:\.[\w-]+)*)@((?:[\w-]+\.)*\w[\w-]{0,66})\.([a-z]{2,6}(?:\.[a-z]{2})?)$",
    )
    .expect("email pattern compiles")
});

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("url pattern compiles"));

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("code pattern compiles"));

static PATH_SEGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]*$").expect("path pattern compiles"));

static INJECTION_SAFE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.@-]*$").expect("injection pattern compiles"));

static IMAGE_FILE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\S.*\.(jpg|jpeg|png|gif|bmp|tiff|tif|svg|webp)$")
        .expect("image pattern compiles")
});

/// Accepted date-time shapes: the common `YYYY-MM-DD HH:mm:ss` family, ISO
/// 8601 with optional fractional seconds and zone offsets, and a few loose
/// regional variants.
static DATE_TIME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$",
        r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$",
        r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{1,3}$",
        r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$",
        r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{1,3}Z$",
        r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}[+-]\d{2}:\d{2}$",
        r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{1,3}[+-]\d{2}:\d{2}$",
        r"^\d{4}-\d{1,2}-\d{1,2} \d{1,2}:\d{2}:\d{2}$",
        r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{1,3}$",
        r"^\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}$",
        r"^\d{2}/\d{2}/\d{4} \d{2}:\d{2}:\d{2}$",
        r"^\d{2}-\d{2}-\d{4} \d{2}:\d{2}:\d{2}$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("date-time pattern compiles"))
    .collect()
});

static LEADING_ISO_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})").expect("iso date compiles"));

static DATE_ONLY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("date-only compiles"));

const PASSWORD_SPECIALS: &str = "@$!%*#?&";

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
            if leap {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Calendar verdict for a year/month/day triple.
enum CalendarCheck {
    Ok,
    BadMonth(u32),
    BadDay(u32),
    Impossible { year: i32, month: u32, day: u32 },
}

fn check_calendar(year: i32, month: u32, day: u32) -> CalendarCheck {
    if !(1..=12).contains(&month) {
        return CalendarCheck::BadMonth(month);
    }
    if !(1..=31).contains(&day) {
        return CalendarCheck::BadDay(day);
    }
    if day > days_in_month(year, month) {
        return CalendarCheck::Impossible { year, month, day };
    }
    CalendarCheck::Ok
}

impl ValidationContext {
    /// The input must look like an email address.
    ///
    /// # Examples
    ///
    /// ```
    /// use sift::engine::single;
    /// use sift::foundation::ValidationOptions;
    ///
    /// let opts = ValidationOptions::default().with_soft_fail(true);
    /// assert!(single("user@example.com", opts.clone()).email().unwrap().is_valid());
    /// assert!(!single("user", opts).email().unwrap().is_valid());
    /// ```
    pub fn email(mut self) -> AssertOutcome {
        self.apply_criterion("email");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if !self.string_input_matches(&EMAIL_REGEX) {
            self.fail(
                "invalid_format",
                "The value {{input}} should be a correct email format.",
            )?;
        }
        Ok(self)
    }

    /// The input must be an http(s) URL.
    pub fn url(mut self) -> AssertOutcome {
        self.apply_criterion("url");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if !self.string_input_matches(&URL_REGEX) {
            self.fail(
                "invalid_format",
                "The value {{input}} should be a valid URL format.",
            )?;
        }
        Ok(self)
    }

    /// The input must parse as an IPv4 or IPv6 address.
    pub fn ip(mut self) -> AssertOutcome {
        self.apply_criterion("ip");
        if self.input.is_undefined() {
            return Ok(self);
        }
        let parses = self
            .input
            .as_str()
            .is_some_and(|s| s.parse::<std::net::IpAddr>().is_ok());
        if !parses {
            self.fail(
                "invalid_format",
                "The value {{input}} should be a valid IP format.",
            )?;
        }
        Ok(self)
    }

    /// The input must be a code identifier: starts with a letter, contains
    /// only letters, digits, underscores and hyphens, at most 50 characters.
    pub fn code(mut self) -> AssertOutcome {
        self.apply_criterion("code");
        if self.input.is_undefined() {
            return Ok(self);
        }
        let too_long = self
            .input
            .as_str()
            .is_some_and(|s| s.chars().count() > 50);
        if too_long {
            self.fail(
                "invalid_format",
                "The value {{input}} should be at most 50 characters.",
            )?;
            return Ok(self);
        }
        if !self.string_input_matches(&CODE_REGEX) {
            self.fail(
                "invalid_format",
                "The value {{input}} should start with a letter and contain only letters, numbers, underscores, and hyphens.",
            )?;
        }
        Ok(self)
    }

    /// The input must be a path segment: letters, digits, underscores and
    /// hyphens only.
    pub fn path_segment(mut self) -> AssertOutcome {
        self.apply_criterion("path_segment");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if !self.string_input_matches(&PATH_SEGMENT_REGEX) {
            self.fail(
                "invalid_format",
                "The value {{input}} should contain only letters, numbers, underscores, and hyphens.",
            )?;
        }
        Ok(self)
    }

    /// The input must be safe for interpolation: letters, digits,
    /// underscores, dots, at signs and hyphens only.
    pub fn injection_safe(mut self) -> AssertOutcome {
        self.apply_criterion("injection_safe");
        if self.input.is_undefined() {
            return Ok(self);
        }
        if !self.string_input_matches(&INJECTION_SAFE_REGEX) {
            self.fail(
                "invalid_format",
                "The value {{input}} should contain only letters, numbers, underscores, dots, at signs, and hyphens.",
            )?;
        }
        Ok(self)
    }

    /// The input must contain only ASCII letters.
    pub fn alphabetic(mut self) -> AssertOutcome {
        self.apply_criterion("alphabetic");
        if self.input.is_undefined() {
            return Ok(self);
        }
        let ok = self
            .input
            .as_str()
            .is_some_and(|s| s.chars().all(|c| c.is_ascii_alphabetic()));
        if !ok {
            self.fail("invalid_format", "The value {{input}} should be alphabetic.")?;
        }
        Ok(self)
    }

    /// The input must contain only ASCII capital letters.
    pub fn uppercase(mut self) -> AssertOutcome {
        self.apply_criterion("uppercase");
        if self.input.is_undefined() {
            return Ok(self);
        }
        let ok = self
            .input
            .as_str()
            .is_some_and(|s| s.chars().all(|c| c.is_ascii_uppercase()));
        if !ok {
            self.fail(
                "invalid_format",
                "The value {{input}} should be a capital letter.",
            )?;
        }
        Ok(self)
    }

    /// The input must contain only ASCII lowercase letters.
    pub fn lowercase(mut self) -> AssertOutcome {
        self.apply_criterion("lowercase");
        if self.input.is_undefined() {
            return Ok(self);
        }
        let ok = self
            .input
            .as_str()
            .is_some_and(|s| s.chars().all(|c| c.is_ascii_lowercase()));
        if !ok {
            self.fail("invalid_format", "The value {{input}} should be a lowercase.")?;
        }
        Ok(self)
    }

    /// The input must contain only ASCII letters and digits.
    pub fn alphanumeric(mut self) -> AssertOutcome {
        self.apply_criterion("alphanumeric");
        if self.input.is_undefined() {
            return Ok(self);
        }
        let ok = self
            .input
            .as_str()
            .is_some_and(|s| s.chars().all(|c| c.is_ascii_alphanumeric()));
        if !ok {
            self.fail(
                "invalid_format",
                "The value {{input}} should contain only numbers and letters.",
            )?;
        }
        Ok(self)
    }

    /// The input must be a password of 8–20 characters with at least one
    /// letter, one digit, and one of `@$!%*#?&`, drawn only from those
    /// classes.
    pub fn password(mut self) -> AssertOutcome {
        self.apply_criterion("password");
        if self.input.is_undefined() {
            return Ok(self);
        }
        let ok = self.input.as_str().is_some_and(is_valid_password);
        if !ok {
            self.fail(
                "invalid_format",
                "The value should be a valid password format.",
            )?;
        }
        Ok(self)
    }

    /// The input must name an image file (or, for array inputs, every
    /// element must), matched case-insensitively on the extension.
    pub fn image_file(mut self) -> AssertOutcome {
        self.apply_criterion("image_file");
        if self.input.is_undefined() {
            return Ok(self);
        }
        let ok = match (self.input.as_str(), self.input.items()) {
            (Some(s), _) => IMAGE_FILE_REGEX.is_match(&s.to_lowercase()),
            (None, Some(items)) => items.iter().all(|item| {
                item.as_str()
                    .is_some_and(|s| IMAGE_FILE_REGEX.is_match(&s.to_lowercase()))
            }),
            (None, None) => false,
        };
        if !ok {
            self.fail(
                "invalid_format",
                "The value {{input}} should be a valid image file format.",
            )?;
        }
        Ok(self)
    }

    /// The input must be a date-time string in one of the accepted shapes.
    ///
    /// With `strictDateValidation` the leading `YYYY-M-D` part must also be
    /// a real calendar date (Feb 30 and the like are rejected).
    pub fn date_time(mut self) -> AssertOutcome {
        self.apply_criterion("date_time");
        if self.input.is_undefined() {
            return Ok(self);
        }
        let Some(text) = self.input.as_str().map(str::to_owned) else {
            self.fail(
                "invalid_type",
                "The value {{input}} should be a string for datetime validation.",
            )?;
            return Ok(self);
        };
        if !DATE_TIME_PATTERNS.iter().any(|p| p.is_match(&text)) {
            self.fail(
                "invalid_format",
                "The value {{input}} should be a valid date time format.",
            )?;
            return Ok(self);
        }
        if self.options.strict_date_validation {
            if let Some(caps) = LEADING_ISO_DATE_REGEX.captures(&text) {
                let (year, month, day) = parse_date_captures(&caps);
                self.report_calendar(check_calendar(year, month, day))?;
            }
        }
        Ok(self)
    }

    /// The input must be an ISO 8601 calendar date (`YYYY-MM-DD`).
    ///
    /// # Examples
    ///
    /// ```
    /// use sift::engine::single;
    /// use sift::foundation::ValidationOptions;
    ///
    /// let strict = ValidationOptions::default()
    ///     .with_soft_fail(true)
    ///     .with_strict_date_validation(true);
    /// assert!(single("2024-02-29", strict.clone()).date_only().unwrap().is_valid());
    /// assert!(!single("2023-02-29", strict).date_only().unwrap().is_valid());
    /// ```
    pub fn date_only(mut self) -> AssertOutcome {
        self.apply_criterion("date_only");
        if self.input.is_undefined() {
            return Ok(self);
        }
        let captured = self
            .input
            .as_str()
            .and_then(|s| DATE_ONLY_REGEX.captures(s).map(|caps| parse_date_captures(&caps)));
        let Some((year, month, day)) = captured else {
            self.fail(
                "invalid_format",
                "The value {{input}} should be a valid date format.",
            )?;
            return Ok(self);
        };
        if self.options.strict_date_validation {
            self.report_calendar(check_calendar(year, month, day))?;
        }
        Ok(self)
    }

    /// The input string must match the given pattern.
    pub fn matches(mut self, pattern: &Regex) -> AssertOutcome {
        self.apply_criterion("matches");
        if self.input.is_absent() {
            return Ok(self);
        }
        if !self.string_input_matches(pattern) {
            self.fail("invalid_format", "The value {{input}} is wrong format.")?;
        }
        Ok(self)
    }

    /// The input string must not match the given pattern.
    pub fn rejects(mut self, pattern: &Regex) -> AssertOutcome {
        self.apply_criterion("rejects");
        if self.input.is_absent() {
            return Ok(self);
        }
        let matched = self.input.as_str().is_some_and(|s| pattern.is_match(s));
        if matched || self.input.as_str().is_none() {
            self.fail("invalid_format", "The value {{input}} is wrong format.")?;
        }
        Ok(self)
    }

    fn string_input_matches(&self, pattern: &Regex) -> bool {
        self.input.as_str().is_some_and(|s| pattern.is_match(s))
    }

    fn report_calendar(&mut self, check: CalendarCheck) -> Result<(), ValidationError> {
        match check {
            CalendarCheck::Ok => Ok(()),
            CalendarCheck::BadMonth(month) => self.fail_with(
                ValidationError::new(
                    "invalid_date",
                    format!("The month '{month}' should be between 1 and 12."),
                )
                .with_param("month", month.to_string()),
            ),
            CalendarCheck::BadDay(day) => self.fail_with(
                ValidationError::new(
                    "invalid_date",
                    format!("The day '{day}' should be between 1 and 31."),
                )
                .with_param("day", day.to_string()),
            ),
            CalendarCheck::Impossible { year, month, day } => self.fail_with(
                ValidationError::new(
                    "invalid_date",
                    format!("The date '{year}-{month}-{day}' is not a valid date."),
                ),
            ),
        }
    }
}

fn is_valid_password(s: &str) -> bool {
    let len = s.chars().count();
    if !(8..=20).contains(&len) {
        return false;
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);
    s.chars().all(allowed)
        && s.chars().any(|c| c.is_ascii_alphabetic())
        && s.chars().any(|c| c.is_ascii_digit())
        && s.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

fn parse_date_captures(caps: &regex::Captures<'_>) -> (i32, u32, u32) {
    // The patterns guarantee all-digit captures of bounded width.
    let year = caps[1].parse().unwrap_or(0);
    let month = caps[2].parse().unwrap_or(0);
    let day = caps[3].parse().unwrap_or(0);
    (year, month, day)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::single;
    use crate::foundation::ValidationOptions;

    fn soft() -> ValidationOptions {
        ValidationOptions::default().with_soft_fail(true)
    }

    fn strict() -> ValidationOptions {
        soft().with_strict_date_validation(true)
    }

    #[test]
    fn email_format() {
        assert!(single("user@example.com", soft()).email().unwrap().is_valid());
        assert!(single("first.last@sub.example.co.uk", soft()).email().unwrap().is_valid());
        assert!(!single("user", soft()).email().unwrap().is_valid());
        assert!(!single(1, soft()).email().unwrap().is_valid());
    }

    #[test]
    fn url_format() {
        assert!(single("http://example.com", soft()).url().unwrap().is_valid());
        assert!(single("https://example.com", soft()).url().unwrap().is_valid());
        assert!(!single("example.com", soft()).url().unwrap().is_valid());
        assert!(!single("ftp://example.com", soft()).url().unwrap().is_valid());
    }

    #[test]
    fn ip_format() {
        assert!(single("192.168.0.1", soft()).ip().unwrap().is_valid());
        assert!(single("2001:0db8:85a3:0000:0000:8a2e:0370:7334", soft())
            .ip()
            .unwrap()
            .is_valid());
        assert!(single("::ffff:192.168.0.1", soft()).ip().unwrap().is_valid());
        assert!(!single("example.com", soft()).ip().unwrap().is_valid());
    }

    #[test]
    fn code_format() {
        assert!(single("promo-123", soft()).code().unwrap().is_valid());
        assert!(!single("123-promo", soft()).code().unwrap().is_valid());
        assert!(!single("promo@123", soft()).code().unwrap().is_valid());
        let long = "a".repeat(51);
        assert!(!single(long, soft()).code().unwrap().is_valid());
    }

    #[test]
    fn character_classes() {
        assert!(single("Hello", soft()).alphabetic().unwrap().is_valid());
        assert!(!single("Hello1", soft()).alphabetic().unwrap().is_valid());
        assert!(single("HELLO", soft()).uppercase().unwrap().is_valid());
        assert!(!single("Hello", soft()).uppercase().unwrap().is_valid());
        assert!(single("hello", soft()).lowercase().unwrap().is_valid());
        assert!(single("hello123", soft()).alphanumeric().unwrap().is_valid());
        assert!(!single("hello-123", soft()).alphanumeric().unwrap().is_valid());
    }

    #[test]
    fn password_format() {
        assert!(single("Password1!", soft()).password().unwrap().is_valid());
        assert!(!single("Pass1!", soft()).password().unwrap().is_valid());
        assert!(!single("Password!", soft()).password().unwrap().is_valid());
        assert!(!single("Password1", soft()).password().unwrap().is_valid());
    }

    #[test]
    fn image_files() {
        assert!(single("photo.JPG", soft()).image_file().unwrap().is_valid());
        assert!(!single("notes.txt", soft()).image_file().unwrap().is_valid());
        let list = crate::value!(["a.png", "b.webp"]);
        assert!(single(list, soft()).image_file().unwrap().is_valid());
    }

    #[test]
    fn date_time_shapes() {
        let ok = [
            "2023-01-05 09:05:02",
            "2023-01-05T09:05:02Z",
            "2023-01-05T09:05:02.123+05:00",
            "2023/01/05 09:05:02",
        ];
        for text in ok {
            assert!(single(text, soft()).date_time().unwrap().is_valid(), "{text}");
        }
        assert!(!single("2023-01-05", soft()).date_time().unwrap().is_valid());
        assert!(!single("09:05:02", soft()).date_time().unwrap().is_valid());
    }

    #[test]
    fn strict_dates_reject_impossible_calendars() {
        assert!(!single("2023-02-30", strict()).date_only().unwrap().is_valid());
        assert!(!single("2023-04-31", strict()).date_only().unwrap().is_valid());
        assert!(!single("2023-13-01", strict()).date_only().unwrap().is_valid());
        assert!(single("2024-02-29", strict()).date_only().unwrap().is_valid());
        assert!(!single("2023-02-30 09:05:02", strict()).date_time().unwrap().is_valid());
        // Without the option the shape alone decides.
        assert!(single("2023-02-30", soft()).date_only().unwrap().is_valid());
    }

    #[test]
    fn regex_assertions() {
        let digits = Regex::new(r"^\d+$").unwrap();
        assert!(single("123", soft()).matches(&digits).unwrap().is_valid());
        assert!(!single("12a", soft()).matches(&digits).unwrap().is_valid());
        assert!(single("abc", soft()).rejects(&digits).unwrap().is_valid());
        assert!(!single("123", soft()).rejects(&digits).unwrap().is_valid());
    }

    #[test]
    fn days_in_month_table() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 12), 31);
    }
}

//! Booking number candidate validation
//!
//! Extraction patterns are deliberately loose, so every candidate goes
//! through this validator before it is treated as a real booking number.
//! The rules reject ordinary words that happen to follow a "booking number"
//! label ("coorg", "luxury") and digit strings too long to be codes
//! (phone numbers), while accepting the formats agents actually produce:
//! short numeric codes, letter codes, and dash-delimited references.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::patterns::FALSE_POSITIVE_WORDS;

static CODE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9-]+$").expect("code shape pattern"));

/// Validates extracted booking number candidates against a deny-list of
/// known false positives plus structural rules.
pub struct BookingNumberValidator {
    false_positives: HashSet<&'static str>,
}

impl Default for BookingNumberValidator {
    fn default() -> Self {
        Self {
            false_positives: FALSE_POSITIVE_WORDS.clone(),
        }
    }
}

impl BookingNumberValidator {
    /// Replace the deny-list, for tests and alternate deployments.
    pub fn with_false_positives(false_positives: HashSet<&'static str>) -> Self {
        Self { false_positives }
    }

    /// Whether `candidate` is plausible as a booking number.
    ///
    /// Rules, in order:
    /// 1. deny-listed words are rejected regardless of shape
    /// 2. fewer than 3 characters is too short
    /// 3. 3-8 letters is a valid letter code (spelled-out references)
    /// 4. 3-8 digits is a valid numeric code
    /// 5. otherwise the candidate must be uppercase alphanumeric with
    ///    optional dashes, contain at least one digit, and carry fewer
    ///    than 10 digits total (10+ digits is a phone number)
    pub fn is_valid(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();

        if self.false_positives.contains(candidate.to_lowercase().as_str()) {
            return false;
        }
        if candidate.len() < 3 {
            return false;
        }

        if candidate.chars().all(|c| c.is_ascii_alphabetic()) {
            return candidate.len() <= 8;
        }
        if candidate.chars().all(|c| c.is_ascii_digit()) {
            return candidate.len() <= 8;
        }

        let upper = candidate.to_uppercase();
        if !CODE_SHAPE.is_match(&upper) {
            return false;
        }
        let digit_count = upper.chars().filter(|c| c.is_ascii_digit()).count();
        digit_count >= 1 && digit_count < 10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_codes() {
        let validator = BookingNumberValidator::default();
        assert!(!validator.is_valid("12"), "two digits is too short");
        assert!(validator.is_valid("123"));
        assert!(validator.is_valid("78901234"));
        assert!(
            !validator.is_valid("9876543210"),
            "ten digits is a phone number"
        );
    }

    #[test]
    fn test_letter_codes() {
        let validator = BookingNumberValidator::default();
        assert!(validator.is_valid("TCWFO"));
        assert!(validator.is_valid("abc"));
        assert!(!validator.is_valid("ABCDEFGHI"), "nine letters is too long");
    }

    #[test]
    fn test_alphanumeric_and_dash_formats() {
        let validator = BookingNumberValidator::default();
        assert!(validator.is_valid("BK4521"));
        assert!(validator.is_valid("TC-2024-1234"));
        assert!(validator.is_valid("tc-2024-1234"), "case-insensitive");
        assert!(
            !validator.is_valid("TC-1234567890"),
            "ten digits across groups is a phone number"
        );
    }

    #[test]
    fn test_false_positive_words_rejected() {
        let validator = BookingNumberValidator::default();
        assert!(!validator.is_valid("coorg"));
        assert!(!validator.is_valid("Luxury"));
        assert!(!validator.is_valid("DECEMBER"));
        assert!(!validator.is_valid("integrated"));
    }

    #[test]
    fn test_injected_deny_list() {
        let validator =
            BookingNumberValidator::with_false_positives(["zzz"].into_iter().collect());
        assert!(!validator.is_valid("zzz"));
        assert!(validator.is_valid("coorg"), "default deny-list not in play");
    }

    #[test]
    fn test_whitespace_trimmed() {
        let validator = BookingNumberValidator::default();
        assert!(validator.is_valid("  BK4521  "));
    }
}

//! Pattern tables for booking number extraction and confirmation detection
//!
//! All pattern sets are owned, immutable configuration data constructed via
//! `Default` and injected into the components that use them, so tests can
//! substitute trimmed sets. The defaults are compiled once at program start.
//!
//! STT regularly mishears "booking" as "bouquet", "bucket", "boofing" or
//! "buffing"; the default patterns match those forms on purpose.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// "booking" plus its common STT misrecognitions, as a regex alternation
const BOOKING_ALTS: &str = "booking|bouquet|bucket|boofing|buffing";

/// Compiled extraction patterns, ordered most specific to most general.
/// The first pattern whose capture passes validation wins.
static NUMBER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Dash-delimited formats: TC-2024-1234
        format!(r"(?i)(?:{BOOKING_ALTS})\s*numbers?[:\s]+(?:is\s+)?([A-Z]{{2,4}}-[0-9]{{4}}-[0-9]+)"),
        r"(?i)confirmation\s*numbers?[:\s]+(?:is\s+)?([A-Z]{2,4}-[0-9]{4}-[0-9]+)".to_string(),
        r"(?i)reference\s*numbers?[:\s]+(?:is\s+)?([A-Z]{2,4}-[0-9]{4}-[0-9]+)".to_string(),
        // Alphanumeric codes (letters and digits mixed)
        format!(r"(?i)(?:{BOOKING_ALTS})\s*numbers?[:\s]+(?:is\s+)?([A-Z]+[0-9]+[A-Z0-9]*)"),
        format!(r"(?i)(?:{BOOKING_ALTS})\s*numbers?[:\s]+(?:is\s+)?([0-9]+[A-Z]+[A-Z0-9]*)"),
        r"(?i)confirmation\s*numbers?[:\s]+(?:is\s+)?([A-Z]+[0-9]+[A-Z0-9]*)".to_string(),
        r"(?i)confirmation\s*numbers?[:\s]+(?:is\s+)?([0-9]+[A-Z]+[A-Z0-9]*)".to_string(),
        // Simple numeric codes
        format!(r"(?i)(?:{BOOKING_ALTS})\s*numbers?[:\s]+(?:is\s+)?(\d{{3,8}})\b"),
        r"(?i)confirmation\s*numbers?[:\s]+(?:is\s+)?(\d{3,8})\b".to_string(),
        r"(?i)reference\s*numbers?[:\s]+(?:is\s+)?(\d{3,8})\b".to_string(),
        r"(?i)reservation\s*numbers?[:\s]+(?:is\s+)?(\d{3,8})\b".to_string(),
        // "your booking/confirmation is X" forms
        format!(r"(?i)your (?:{BOOKING_ALTS}) (?:number )?is[:\s]+([A-Z0-9-]{{3,15}})"),
        r"(?i)your confirmation (?:number )?is[:\s]+([A-Z0-9-]{3,15})".to_string(),
        r"(?i)your reservation (?:number )?is[:\s]+([A-Z0-9-]{3,15})".to_string(),
        r"(?i)your reference (?:number )?is[:\s]+([A-Z0-9-]{3,15})".to_string(),
        // Trailing fallback after confirmed/booked
        format!(
            r"(?i)(?:confirmed|booked).*?(?:{BOOKING_ALTS}|confirmation|reference|reservation)\s*(?:number)?\s*(?:is)?\s*[:\s]+([A-Z0-9-]{{3,15}})"
        ),
    ]
    .into_iter()
    .map(|p| Regex::new(&p).expect("extraction pattern"))
    .collect()
});

/// Looser patterns for raw/diagnostic capture: any word token after a
/// booking-number label, even if it could never validate.
static RAW_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(r"(?i)(?:{BOOKING_ALTS})\s*numbers?[:\s]+(?:is\s+)?(\w+)"),
        r"(?i)confirmation\s*numbers?[:\s]+(?:is\s+)?(\w+)".to_string(),
        r"(?i)reference\s*numbers?[:\s]+(?:is\s+)?(\w+)".to_string(),
        r"(?i)reservation\s*numbers?[:\s]+(?:is\s+)?(\w+)".to_string(),
        format!(r"(?i)your (?:{BOOKING_ALTS}) (?:number )?is[:\s]+(\w+)"),
        r"(?i)your confirmation (?:number )?is[:\s]+(\w+)".to_string(),
    ]
    .into_iter()
    .map(|p| Regex::new(&p).expect("raw extraction pattern"))
    .collect()
});

/// Phrases that indicate a number should be nearby (fallback window scan)
const CONFIRMATION_INDICATORS: &[&str] = &[
    "booking number",
    "bouquet number",
    "bucket number",
    "boofing number",
    "buffing number",
    "confirmation number",
    "reference number",
    "reservation number",
    "your booking is",
    "your bouquet is",
    "your boofing is",
    "booking confirmed",
    "reservation confirmed",
];

/// Filler words never returned as a raw candidate. "number" is listed but
/// checked after the literal-"number" special case in the extractor, where
/// the agent saying "number" verbatim is itself a diagnostic signal.
const SKIP_WORDS: &[&str] = &[
    "the", "a", "an", "your", "our", "this", "that", "it", "for", "and", "or", "is", "number",
];

/// Pattern set consumed by the booking number extractor
pub struct ExtractionPatterns {
    pub number_patterns: Vec<Regex>,
    pub raw_patterns: Vec<Regex>,
    pub confirmation_indicators: Vec<&'static str>,
    pub skip_words: HashSet<&'static str>,
}

impl Default for ExtractionPatterns {
    fn default() -> Self {
        Self {
            number_patterns: NUMBER_PATTERNS.clone(),
            raw_patterns: RAW_PATTERNS.clone(),
            confirmation_indicators: CONFIRMATION_INDICATORS.to_vec(),
            skip_words: SKIP_WORDS.iter().copied().collect(),
        }
    }
}

/// Phrase tables consumed by the confirmation detector
pub struct ConfirmationPhrases {
    /// Confirmation language that still requires a validated number
    pub confirmation: Vec<&'static str>,
    /// Explicit confirmations that hold even without a number
    pub explicit: Vec<&'static str>,
    /// Failure language; any hit overrides every confirmation signal
    pub failure: Vec<&'static str>,
    /// "(confirmed|booked) ... number ... digits" safety net
    pub confirmed_with_number: Regex,
}

impl Default for ConfirmationPhrases {
    fn default() -> Self {
        Self {
            confirmation: vec![
                "your booking number is",
                "your bouquet number is",
                "your confirmation number is",
                "your reference number is",
                "your reservation number is",
                "booking number:",
                "bouquet number:",
                "confirmation number:",
                "i have confirmed your booking",
                "your booking has been confirmed",
                "your reservation has been confirmed",
                "booking is confirmed",
                "reservation is confirmed",
                "i've booked your",
                "successfully booked",
                "booking confirmed for",
                "reservation confirmed for",
                "your booking is confirmed",
                "your reservation is confirmed",
            ],
            explicit: vec![
                "your booking has been confirmed",
                "i have confirmed your booking",
                "booking is now confirmed",
                "reservation is now confirmed",
                "your stay has been booked",
                "i've successfully booked",
                "your booking is confirmed",
                "your reservation is confirmed",
                "successfully made your reservation",
                "successfully made your booking",
            ],
            failure: vec![
                "encountered an issue",
                "encountered a issue",
                "encountering an issue",
                "encountering a issue",
                "technical issue",
                "technical hitch",
                "technical problem",
                "unable to finalize",
                "unable to complete",
                "cannot finalize",
                "cannot complete",
                "can't finalize",
                "can't complete",
                "system issue",
                "preventing me from",
                "try that again",
                "try again",
                "let me try",
                "having trouble",
                "having difficulty",
            ],
            confirmed_with_number: Regex::new(
                r"(?:confirmed|booked).*?(?:booking|bouquet|bucket|confirmation|reservation|reference)\s*(?:number)?\s*(?:is)?\s*\d{3,}",
            )
            .expect("confirmed-with-number pattern"),
        }
    }
}

/// Words that superficially resemble booking codes and must be rejected:
/// common English words, filler, domain nouns (resorts, room types),
/// calendar words, currency terms.
pub static FALSE_POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Common words
        "the", "a", "is", "your", "plus", "and", "for", "to", "of", "in", "on", "at", "that",
        "this", "with", "you", "are", "was", "been", "have", "has", "had", "will", "would",
        "could", "should", "may", "might", "must", "can", "do", "does",
        // Filler/polite words
        "correctly", "certainly", "absolutely", "definitely", "please", "kindly", "thank",
        "thanks", "sorry", "apologies", "welcome", "hello", "goodbye",
        // Contact info labels
        "phone", "mobile", "email", "address", "name", "guest", "guests",
        // Location names
        "coorg", "kodai", "tamara", "resort", "resorts", "cottage", "cottages", "room", "rooms",
        // Time words
        "january", "february", "march", "april", "june", "july", "august", "september",
        "october", "november", "december", "monday", "tuesday", "wednesday", "thursday",
        "friday", "saturday", "sunday", "today", "tomorrow", "yesterday", "nights", "night",
        "days", "day", "week",
        // Room types
        "luxury", "suite", "heritage", "superior", "deluxe", "premium",
        // Currency/price words
        "indian", "india", "inr", "rupees", "amount", "total", "price",
        // Generic words
        "integrated", "process", "system", "details", "information", "moment", "second",
        "minute", "shortly", "right", "away", "perfect", "wonderful", "lovely", "beautiful",
        "great", "good", "checking", "checkin", "checkout", "staying", "travel", "traveling",
    ]
    .into_iter()
    .collect()
});

//! Spelled-out booking code recovery
//!
//! Agents often dictate codes character by character ("T. C. W. F. O.") or
//! as number words ("THREE TWO ONE"), and STT transcribes them as separated
//! tokens. This module reassembles such runs before the labeled regex
//! patterns get a chance, and maps spoken-digit homophones ("won", "tree",
//! "niner") back to digits.

use once_cell::sync::Lazy;
use regex::Regex;

/// Number words and their common STT homophones
const WORD_TO_DIGIT: &[(&str, &str)] = &[
    ("zero", "0"),
    ("oh", "0"),
    ("o", "0"),
    ("one", "1"),
    ("won", "1"),
    ("two", "2"),
    ("to", "2"),
    ("too", "2"),
    ("three", "3"),
    ("tree", "3"),
    ("four", "4"),
    ("for", "4"),
    ("fore", "4"),
    ("five", "5"),
    ("six", "6"),
    ("sex", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("ate", "8"),
    ("nine", "9"),
    ("niner", "9"),
];

static WORD_TO_DIGIT_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    WORD_TO_DIGIT
        .iter()
        .map(|(word, digit)| {
            let pattern = format!(r"(?i)\b{word}\b");
            (Regex::new(&pattern).expect("word-to-digit pattern"), *digit)
        })
        .collect()
});

/// Run of 3-8 single alphanumeric tokens separated by spaces and/or periods,
/// e.g. "T C W F O" or "T. C. W. F. O.". Single-char tokens only, so
/// ordinary words terminate the run.
static SPELLED_TOKEN_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([A-Z0-9](?:[\s.]+[A-Z0-9]\b){2,7})").expect("spelled token run pattern")
});

/// A run that continues past the 8-token cap (e.g. a spelled-out phone
/// number) is not a booking code; this detects the leftover continuation.
static RUN_CONTINUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[\s.]+[A-Z0-9]\b").expect("run continuation pattern"));

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s.]+").expect("separator pattern"));

/// Convert spelled-out number words to digits, in place in the text.
///
/// "THREE TWO ONE" -> "3 2 1"; separators are preserved, callers that need
/// a contiguous code should go through [`extract_spelled_code`].
pub fn convert_spelled_numbers(text: &str) -> String {
    let mut result = text.to_string();
    for (pattern, digit) in WORD_TO_DIGIT_PATTERNS.iter() {
        result = pattern.replace_all(&result, *digit).into_owned();
    }
    result
}

/// Extract a booking code that was dictated character by character.
///
/// "T. C. W. F. O. is your code" -> "TCWFO"
/// "THREE TWO ONE QRY"           -> "321"  (number words become digits)
pub fn extract_spelled_code(text: &str) -> Option<String> {
    // Single letters/digits separated by spaces or dots
    if let Some(code) = first_token_run(text, false) {
        return Some(code);
    }

    // Spelled-out number words: convert, then look for the single-digit
    // token run the conversion produced. Only runs assembled from converted
    // tokens count; a literal digit run already in the text (a rate quote,
    // a phone number) is the labeled patterns' job, not this path's.
    let converted = convert_spelled_numbers(text);
    if converted != text {
        if let Some(code) = first_token_run(&converted, true) {
            return Some(code);
        }
    }

    None
}

/// First separated single-token run that cleans up to a 3-8 char code.
/// Runs that keep going past the cap (spelled phone numbers) are skipped
/// in full, not truncated into a shorter "code".
fn first_token_run(text: &str, digits_only: bool) -> Option<String> {
    let mut pos = 0;
    while let Some(caps) = SPELLED_TOKEN_RUN.captures_at(text, pos) {
        let m = caps.get(1).expect("capture group 1");
        let mut end = m.end();
        let mut overlong = false;
        while let Some(cont) = RUN_CONTINUATION.find(&text[end..]) {
            overlong = true;
            end += cont.end();
        }
        pos = end;
        if overlong {
            continue;
        }

        let cleaned = SEPARATORS.replace_all(m.as_str(), "").to_uppercase();
        if !(3..=8).contains(&cleaned.len()) {
            continue;
        }
        if digits_only && !cleaned.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        return Some(cleaned);
    }
    None
}

/// Normalize text before labeled-pattern extraction: collapse the first
/// spelled code into its contiguous form, then convert remaining number
/// words to digits.
pub fn normalize_spelled_numbers(text: &str) -> String {
    let mut normalized = text.to_string();

    if let Some(code) = extract_spelled_code(text) {
        normalized = SPELLED_TOKEN_RUN
            .replace(&normalized, code.as_str())
            .into_owned();
    }

    convert_spelled_numbers(&normalized)
}

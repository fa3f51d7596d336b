//! Booking number extraction
//!
//! Pulls the booking/confirmation number out of the agent's side of a
//! transcript. Extraction is layered from most to least reliable:
//! spelled-out codes first, then the labeled regex patterns, then a
//! windowed digit scan near confirmation phrases. Raw mode additionally
//! captures whatever word followed the label even when it cannot validate,
//! so failure diagnosis can report what the agent actually said.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use hotel_eval_core::{Speaker, Transcript};

use crate::number_parser::{extract_spelled_code, normalize_spelled_numbers};
use crate::patterns::ExtractionPatterns;
use crate::validation::BookingNumberValidator;

/// Chars of agent text scanned after a confirmation indicator phrase
const INDICATOR_WINDOW: usize = 80;

static WINDOW_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{3,8})\b").expect("window digit pattern"));

/// Extracts booking numbers from the agent side of a transcript.
#[derive(Default)]
pub struct BookingNumberExtractor {
    patterns: ExtractionPatterns,
    validator: BookingNumberValidator,
}

impl BookingNumberExtractor {
    pub fn new(patterns: ExtractionPatterns, validator: BookingNumberValidator) -> Self {
        Self {
            patterns,
            validator,
        }
    }

    /// Extract a validated booking number, or `None` if the agent never
    /// produced one.
    pub fn extract(&self, transcript: &Transcript) -> Option<String> {
        self.extract_inner(transcript, false)
    }

    /// Extract whatever the agent offered as the booking number, valid or
    /// not. Valid numbers still win; the loose capture only kicks in when
    /// nothing validates. Used for failure reporting.
    pub fn extract_raw(&self, transcript: &Transcript) -> Option<String> {
        self.extract_inner(transcript, true)
    }

    fn extract_inner(&self, transcript: &Transcript, allow_invalid: bool) -> Option<String> {
        let agent_text = transcript.speaker_text(Speaker::Agent);

        // Codes dictated character by character ("T. C. W. F. O.")
        if let Some(code) = extract_spelled_code(&agent_text) {
            if self.validator.is_valid(&code) {
                debug!(code, "extracted spelled-out booking code");
                return Some(code);
            }
        }

        // Collapse spelled digits so the labeled patterns see "7788", not
        // "seven seven eight eight"
        let agent_text = normalize_spelled_numbers(&agent_text);
        let agent_text_lower = agent_text.to_lowercase();

        for pattern in &self.patterns.number_patterns {
            if let Some(caps) = pattern.captures(&agent_text) {
                let candidate = caps[1].trim().to_uppercase();
                if self.validator.is_valid(&candidate) {
                    debug!(candidate, "extracted labeled booking number");
                    return Some(candidate);
                }
            }
        }

        // Last resort: digits in a short window after a confirmation phrase
        for indicator in &self.patterns.confirmation_indicators {
            if let Some(pos) = agent_text_lower.find(indicator) {
                let window = bounded_window(&agent_text_lower, pos, INDICATOR_WINDOW);
                for caps in WINDOW_DIGITS.captures_iter(window) {
                    let candidate = &caps[1];
                    if self.validator.is_valid(candidate) {
                        debug!(candidate, indicator, "extracted number near indicator");
                        return Some(candidate.to_string());
                    }
                }
            }
        }

        if allow_invalid {
            for pattern in &self.patterns.raw_patterns {
                if let Some(caps) = pattern.captures(&agent_text) {
                    let candidate = caps[1].trim();
                    // The agent literally saying "number" ("your booking
                    // number is number") is itself a diagnostic signal
                    if candidate.eq_ignore_ascii_case("number") {
                        return Some("number".to_string());
                    }
                    if !self
                        .patterns
                        .skip_words
                        .contains(candidate.to_lowercase().as_str())
                    {
                        return Some(candidate.to_string());
                    }
                }
            }
        }

        None
    }
}

/// Slice up to `len` bytes starting at `pos`, clamped back to char
/// boundaries so multi-byte text cannot panic the scan.
fn bounded_window(text: &str, pos: usize, len: usize) -> &str {
    let mut end = (pos + len).min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[pos..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_eval_core::Utterance;

    fn extractor() -> BookingNumberExtractor {
        BookingNumberExtractor::default()
    }

    fn transcript(agent_lines: &[&str]) -> Transcript {
        Transcript::from(
            agent_lines
                .iter()
                .map(|line| Utterance::agent(*line))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_simple_numeric_code() {
        let t = transcript(&["Your booking is confirmed. Your booking number is 7788."]);
        assert_eq!(extractor().extract(&t), Some("7788".to_string()));
    }

    #[test]
    fn test_dash_delimited_reference() {
        let t = transcript(&["Your confirmation number is TC-2024-1234, see you soon!"]);
        assert_eq!(extractor().extract(&t), Some("TC-2024-1234".to_string()));
    }

    #[test]
    fn test_stt_misheard_booking_word() {
        let t = transcript(&["All done! Your bouquet number is BK4521."]);
        assert_eq!(extractor().extract(&t), Some("BK4521".to_string()));
    }

    #[test]
    fn test_spelled_out_code() {
        let t = transcript(&["Your booking code: T. C. W. F. O. is your code."]);
        assert_eq!(extractor().extract(&t), Some("TCWFO".to_string()));
    }

    #[test]
    fn test_spelled_number_words() {
        let t = transcript(&["Your booking number is THREE TWO ONE QRY"]);
        assert_eq!(extractor().extract(&t), Some("321".to_string()));
    }

    #[test]
    fn test_indicator_window_fallback() {
        // No "is" between label and digits, so the labeled patterns miss
        let t = transcript(&["Booking confirmed! Reference number for your stay, 456123."]);
        assert_eq!(extractor().extract(&t), Some("456123".to_string()));
    }

    #[test]
    fn test_customer_digits_ignored() {
        let mut t = Transcript::new();
        t.push(Utterance::customer("My phone is 98765 43210, booking number 5544"));
        t.push(Utterance::agent("Thank you, let me note that down."));
        assert_eq!(extractor().extract(&t), None);
    }

    #[test]
    fn test_no_number_present() {
        let t = transcript(&["I'm unable to finalize your booking right now."]);
        assert_eq!(extractor().extract(&t), None);
        assert_eq!(extractor().extract_raw(&t), None);
    }

    #[test]
    fn test_raw_captures_invalid_value() {
        let t = transcript(&["Your booking number is coorg, have a great day!"]);
        let e = extractor();
        assert_eq!(e.extract(&t), None);
        assert_eq!(e.extract_raw(&t), Some("coorg".to_string()));
    }

    #[test]
    fn test_raw_captures_literal_number_word() {
        let t = transcript(&["Booking number: number"]);
        let e = extractor();
        assert_eq!(e.extract(&t), None);
        assert_eq!(e.extract_raw(&t), Some("number".to_string()));
    }

    #[test]
    fn test_phone_number_not_mistaken_for_booking() {
        let t = transcript(&["Your booking number is 9876543210"]);
        assert_eq!(extractor().extract(&t), None);
    }

    #[test]
    fn test_rate_quote_not_mistaken_for_booking_number() {
        // "to" and "for" convert to digits, but the rate itself was never
        // spelled out and must not leak through the spelled-code path
        let t = transcript(&[
            "The total comes to 45000 INR for two nights.",
            "Your booking number is BK4521.",
        ]);
        assert_eq!(extractor().extract(&t), Some("BK4521".to_string()));
    }

    #[test]
    fn test_rate_quote_alone_yields_no_number() {
        let t = transcript(&["The rate comes to 45000 INR for the two nights, all inclusive."]);
        let e = extractor();
        assert_eq!(e.extract(&t), None);
        assert_eq!(e.extract_raw(&t), None);
    }

    #[test]
    fn test_empty_transcript() {
        let t = Transcript::new();
        assert_eq!(extractor().extract(&t), None);
    }
}

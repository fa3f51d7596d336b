//! Booking confirmation detection
//!
//! Decides whether the agent actually confirmed a booking. Confirmation
//! language alone is not enough: the conjunctive rule requires a validated
//! booking number alongside it, unless the agent used one of the explicit
//! unconditional phrasings. Failure language anywhere in the agent's text
//! overrides every confirmation signal.

use tracing::debug;

use hotel_eval_core::{Speaker, Transcript};

use crate::extraction::BookingNumberExtractor;
use crate::patterns::ConfirmationPhrases;

/// Detects confirmed bookings from agent-side transcript text.
#[derive(Default)]
pub struct ConfirmationDetector {
    phrases: ConfirmationPhrases,
    extractor: BookingNumberExtractor,
}

impl ConfirmationDetector {
    pub fn new(phrases: ConfirmationPhrases, extractor: BookingNumberExtractor) -> Self {
        Self { phrases, extractor }
    }

    /// Whether the transcript shows a confirmed booking.
    ///
    /// True when any of these hold, with failure language overriding all:
    /// 1. a confirmation phrase is present and a booking number validates
    /// 2. an explicit unconditional confirmation phrase is present
    /// 3. "(confirmed|booked) ... number ... digits" appears in agent text
    pub fn is_confirmed(&self, transcript: &Transcript) -> bool {
        let agent_text = transcript.speaker_text_lower(Speaker::Agent);

        // Failure language vetoes confirmation regardless of anything else
        if let Some(pattern) = self
            .phrases
            .failure
            .iter()
            .find(|p| agent_text.contains(**p))
        {
            debug!(pattern, "failure language present, booking not confirmed");
            return false;
        }

        let has_confirmation_phrase = self
            .phrases
            .confirmation
            .iter()
            .any(|p| agent_text.contains(p));
        let has_valid_number = self.extractor.extract(transcript).is_some();

        let explicit_confirmed = self.phrases.explicit.iter().any(|p| agent_text.contains(p));

        let confirmed_with_number = self.phrases.confirmed_with_number.is_match(&agent_text);

        (has_confirmation_phrase && has_valid_number) || explicit_confirmed || confirmed_with_number
    }
}

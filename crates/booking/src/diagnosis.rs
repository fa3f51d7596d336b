//! Failure diagnosis for calls that ended without a confirmed booking
//!
//! Produces one human-readable explanation per failed call. Checks run in
//! a fixed priority order: infrastructure and format failures (bad booking
//! number, technical-issue language, agent silence) are diagnosed before
//! behavioral ones (customer declined, stalled flow), so the report blames
//! the most actionable cause.

use unicode_segmentation::UnicodeSegmentation;

use hotel_eval_core::{ConversationStage, Speaker, Transcript};

use crate::extraction::BookingNumberExtractor;

/// Technical/system failure phrases and their canned explanations
const TECHNICAL_PATTERNS: &[(&str, &str)] = &[
    ("technical issue", "Technical issue with booking system"),
    ("technical hitch", "Technical hitch encountered"),
    ("system issue", "System issue prevented booking"),
    ("unable to complete", "Agent unable to complete booking"),
    ("unable to finalize", "Agent unable to finalize booking"),
    ("cannot complete", "Agent could not complete booking"),
    ("cannot finalize", "Agent could not finalize booking"),
    ("preventing me from", "System preventing booking completion"),
    ("call us back", "Agent asked customer to call back later"),
    ("call back later", "Agent asked customer to call back later"),
];

/// Customer phrases that signal backing out of the booking
const DECLINE_PATTERNS: &[&str] = &[
    "no thank",
    "don't want",
    "not interested",
    "cancel",
    "never mind",
    "changed my mind",
    "not now",
    "maybe later",
    "let me think",
];

/// Leading graphemes compared when checking for a repeating agent
const REPEAT_PREFIX_LEN: usize = 50;

/// Explains why a call failed to reach a confirmed booking.
#[derive(Default)]
pub struct FailureDiagnosis {
    extractor: BookingNumberExtractor,
}

impl FailureDiagnosis {
    pub fn new(extractor: BookingNumberExtractor) -> Self {
        Self { extractor }
    }

    /// One explanatory string for a terminal, unconfirmed transcript.
    pub fn describe(&self, transcript: &Transcript, stage: ConversationStage) -> String {
        if transcript.len() < 2 {
            return "Conversation ended prematurely - no meaningful interaction".to_string();
        }

        let agent_text = transcript.speaker_text_lower(Speaker::Agent);

        // 1. Agent offered a booking number that doesn't validate
        let valid = self.extractor.extract(transcript);
        let raw = self.extractor.extract_raw(transcript);
        if let (None, Some(raw)) = (valid, raw) {
            if raw.eq_ignore_ascii_case("number") {
                return "Agent said 'number' instead of providing actual booking number"
                    .to_string();
            }
            return format!("Agent provided invalid booking number '{raw}'");
        }

        // 2. Technical/system issues mentioned by the agent
        for (pattern, message) in TECHNICAL_PATTERNS {
            if agent_text.contains(pattern) {
                return (*message).to_string();
            }
        }

        // 3. Agent went silent after the customer's last message
        if let (Some(customer_idx), Some(agent_idx)) = (
            transcript.last_index_of(Speaker::Customer),
            transcript.last_index_of(Speaker::Agent),
        ) {
            if customer_idx > agent_idx {
                return "Agent stopped responding after customer's last message".to_string();
            }
        }

        // 4. Customer backed out
        let customer_text = transcript.speaker_text_lower(Speaker::Customer);
        if DECLINE_PATTERNS.iter().any(|p| customer_text.contains(p)) {
            return "Customer declined to proceed with booking".to_string();
        }

        // 5. Abrupt termination
        let message_count = transcript.len();
        if message_count < 5 {
            return format!(
                "Conversation ended after only {message_count} messages - agent or customer disconnected"
            );
        }

        // 6. Agent looping on one message
        if agent_stuck_repeating(transcript) {
            return "Agent stuck repeating the same message".to_string();
        }

        // 7. Stage-keyed fallback
        stage_context(stage, message_count)
    }
}

/// Last three agent messages identical in their leading graphemes
fn agent_stuck_repeating(transcript: &Transcript) -> bool {
    let agent_messages: Vec<&str> = transcript
        .by_speaker(Speaker::Agent)
        .map(|u| u.text.as_str())
        .collect();
    if agent_messages.len() < 3 {
        return false;
    }
    let prefixes: Vec<String> = agent_messages[agent_messages.len() - 3..]
        .iter()
        .map(|text| {
            text.to_lowercase()
                .graphemes(true)
                .take(REPEAT_PREFIX_LEN)
                .collect()
        })
        .collect();
    prefixes[0] == prefixes[1] && prefixes[1] == prefixes[2]
}

fn stage_context(stage: ConversationStage, message_count: usize) -> String {
    use ConversationStage::*;
    match stage {
        Greeting => format!("Conversation stalled during initial greeting ({message_count} messages)"),
        NameCollected => "Agent collected name but failed to ask for phone number".to_string(),
        PhoneCollected => "Agent collected phone but failed to ask which resort".to_string(),
        ResortSelected => "Agent confirmed resort but didn't ask for travel dates".to_string(),
        DatesProvided => "Agent got dates but didn't check guest count/occupancy".to_string(),
        OccupancyChecked => {
            "Agent checked occupancy but didn't discuss experience preferences".to_string()
        }
        ExperienceIntent => "Agent discussed preferences but didn't recommend a room".to_string(),
        RoomPositioned => "Agent positioned room but didn't provide pricing".to_string(),
        RateQuoted => "Agent quoted price but conversation stalled before confirmation".to_string(),
        ExperienceShaped => "Agent discussed experiences but didn't collect email".to_string(),
        OccasionAsked => "Agent asked about occasions but didn't collect email".to_string(),
        EmailCollected => "Agent collected email but didn't confirm the booking".to_string(),
        RecapDone => "Agent recapped details but didn't ask for final confirmation".to_string(),
        ConfirmationAsked => {
            "Agent asked for confirmation but customer didn't respond or declined".to_string()
        }
        BookingConfirmed => {
            format!("Conversation incomplete at {stage} stage ({message_count} messages)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_eval_core::Utterance;

    fn describe(utterances: Vec<Utterance>, stage: ConversationStage) -> String {
        FailureDiagnosis::default().describe(&Transcript::from(utterances), stage)
    }

    #[test]
    fn test_tiny_transcript() {
        let desc = describe(
            vec![Utterance::agent("Welcome!")],
            ConversationStage::Greeting,
        );
        assert_eq!(
            desc,
            "Conversation ended prematurely - no meaningful interaction"
        );
    }

    #[test]
    fn test_invalid_booking_number_reported_verbatim() {
        let desc = describe(
            vec![
                Utterance::customer("So am I booked?"),
                Utterance::agent("Yes! Your booking number is coorg."),
            ],
            ConversationStage::RateQuoted,
        );
        assert_eq!(desc, "Agent provided invalid booking number 'coorg'");
    }

    #[test]
    fn test_literal_number_special_case() {
        let desc = describe(
            vec![
                Utterance::customer("What's my booking number?"),
                Utterance::agent("Booking number: number"),
            ],
            ConversationStage::RateQuoted,
        );
        assert_eq!(
            desc,
            "Agent said 'number' instead of providing actual booking number"
        );
    }

    #[test]
    fn test_technical_issue() {
        let desc = describe(
            vec![
                Utterance::customer("Please book it."),
                Utterance::agent("I'm encountering a technical issue and cannot finalize your booking."),
            ],
            ConversationStage::ConfirmationAsked,
        );
        assert_eq!(desc, "Technical issue with booking system");
    }

    #[test]
    fn test_agent_went_silent() {
        let desc = describe(
            vec![
                Utterance::agent("Welcome to Tamara!"),
                Utterance::customer("I'd like to book a cottage"),
                Utterance::customer("Hello? Are you there?"),
            ],
            ConversationStage::Greeting,
        );
        assert_eq!(desc, "Agent stopped responding after customer's last message");
    }

    #[test]
    fn test_customer_declined() {
        let desc = describe(
            vec![
                Utterance::agent("Welcome!"),
                Utterance::customer("Actually, never mind, I changed my mind"),
                Utterance::agent("No problem at all."),
            ],
            ConversationStage::RoomPositioned,
        );
        assert_eq!(desc, "Customer declined to proceed with booking");
    }

    #[test]
    fn test_agent_stuck_repeating() {
        let looped = "Please hold while I check availability for you";
        let desc = describe(
            vec![
                Utterance::agent("Welcome!"),
                Utterance::customer("A cottage please"),
                Utterance::agent(looped),
                Utterance::customer("Ok"),
                Utterance::agent(looped),
                Utterance::customer("Still waiting"),
                Utterance::agent(looped),
            ],
            ConversationStage::ResortSelected,
        );
        assert_eq!(desc, "Agent stuck repeating the same message");
    }

    #[test]
    fn test_stage_fallback() {
        let desc = describe(
            vec![
                Utterance::agent("Welcome! May I know your name?"),
                Utterance::customer("Ananya Iyer"),
                Utterance::agent("Great. And your phone number?"),
                Utterance::customer("It's 98765 43210"),
                Utterance::agent("Which resort would you prefer?"),
                Utterance::customer("Hmm"),
                Utterance::agent("We have two resorts."),
                Utterance::customer("Ok"),
                Utterance::agent("Take your time."),
            ],
            ConversationStage::PhoneCollected,
        );
        assert_eq!(desc, "Agent collected phone but failed to ask which resort");
    }
}

//! Natural call-end detection
//!
//! The polling loop needs to know when to hang up. Only the last few
//! utterances matter: a farewell early in the call does not end it.

use hotel_eval_core::{Speaker, Transcript, Utterance};

/// Utterances from the tail of the call considered for farewell cues
const RECENT_WINDOW: usize = 5;

/// Customer phrases that end the call on their own
const CUSTOMER_ENDINGS: &[&str] = &[
    "goodbye",
    "bye",
    "good bye",
    "bye bye",
    "thank you for your help",
    "thanks for your help",
    "i'll call back",
    "call you back",
];

/// Softer customer cues that need an agent closing to count
const CUSTOMER_SOFT_ENDINGS: &[&str] = &["thank you", "thanks", "that's all", "sounds good"];

/// Agent closing phrases
const AGENT_ENDINGS: &[&str] = &[
    "have a wonderful",
    "have a great",
    "have a lovely",
    "thank you for calling",
    "goodbye",
    "take care",
    "enjoy your stay",
    "look forward to",
    "i understand",
    "i apologize",
    "email you all the details",
    "email you the details",
];

/// Detects whether a call has reached a natural close.
#[derive(Default)]
pub struct CallEndDetector;

impl CallEndDetector {
    pub fn new() -> Self {
        Self
    }

    /// True if the call appears to have ended naturally.
    ///
    /// A strong customer farewell ends the call by itself. A softer
    /// customer cue ("thanks", "that's all") only counts when the agent
    /// has also spoken a closing phrase in the same window. Fewer than 3
    /// utterances never ends, to avoid triggering on near-empty calls.
    pub fn is_ended(&self, transcript: &Transcript) -> bool {
        if transcript.len() < 3 {
            return false;
        }

        let recent = transcript.last_n(RECENT_WINDOW);
        let recent_customer = window_text(recent, Speaker::Customer);
        let recent_agent = window_text(recent, Speaker::Agent);

        if CUSTOMER_ENDINGS.iter().any(|p| recent_customer.contains(p)) {
            return true;
        }

        let customer_winding_down = CUSTOMER_SOFT_ENDINGS
            .iter()
            .any(|p| recent_customer.contains(p));
        let agent_closed = AGENT_ENDINGS.iter().any(|p| recent_agent.contains(p));

        customer_winding_down && agent_closed
    }
}

fn window_text(window: &[Utterance], speaker: Speaker) -> String {
    window
        .iter()
        .filter(|u| u.speaker == speaker)
        .map(|u| u.text.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

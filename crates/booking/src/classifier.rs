//! Conversation stage classification
//!
//! Infers how far along the fixed booking flow a call has progressed, from
//! keyword evidence alone. Predicates are evaluated in strictly descending
//! stage order with first-match-wins: keyword presence accumulates as a call
//! progresses and is never retracted, so the most advanced stage whose
//! predicate holds is the right answer even when earlier-stage keywords are
//! also present.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use hotel_eval_core::{ConversationStage, Speaker, Transcript};

use crate::confirmation::ConfirmationDetector;

static RATE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4,}").expect("rate digits"));
static PHONE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{5,}").expect("phone digits"));

const CONFIRMATION_ASKED_PHRASES: &[&str] = &[
    "shall i go ahead",
    "shall i confirm",
    "shall i book",
    "should i proceed",
    "shall i secure",
    "ready to confirm",
    "would you like me to book",
    "shall i make the reservation",
];

const RECAP_PHRASES: &[&str] = &[
    "let me recap",
    "let me quickly recap",
    "to summarize",
    "you're looking at",
    "so that's",
    "just to confirm",
];
const RECAP_DETAIL_WORDS: &[&str] = &["inr", "total", "nights"];

const OCCASION_PHRASES: &[&str] = &[
    "special occasion",
    "celebrating",
    "anniversary",
    "birthday",
    "honeymoon",
    "any occasion",
];

const EXPERIENCE_PHRASES: &[&str] = &[
    "spa",
    "plantation walk",
    "guided",
    "activities",
    "experiences",
    "yoga",
    "meditation",
    "nature walk",
];
const EXPERIENCE_FRAMING_WORDS: &[&str] = &["enjoy", "love", "recommend"];

const RATE_WORDS: &[&str] = &["total", "inr", "comes to", "rupees"];

const ROOM_WORDS: &[&str] = &[
    "cottage",
    "luxury cottage",
    "suite cottage",
    "eden lotus",
    "heritage room",
    "heritage suite",
    "superior luxury",
];

const EXPERIENCE_INTENT_PHRASES: &[&str] = &[
    "what kind of getaway",
    "restful",
    "experiential",
    "nature-focused",
    "how would you like to spend",
];

const OCCUPANCY_QUESTIONS: &[&str] = &[
    "how many guests",
    "how many people",
    "any children",
    "children traveling",
    "adults",
    "occupancy",
];
const OCCUPANCY_ANSWERS: &[&str] = &[
    "adult", "people", "guests", "child", "children", "2", "3", "4",
];

const DATE_WORDS: &[&str] = &[
    "night",
    "nights",
    "tomorrow",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "december",
    "january",
    "february",
    "march",
    "today",
    "next week",
    "this weekend",
];

const RESORT_WORDS: &[&str] = &["coorg", "kodai"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Classifies a transcript to the most advanced booking-flow stage whose
/// evidence predicate holds.
#[derive(Default)]
pub struct StageClassifier {
    confirmation: ConfirmationDetector,
}

impl StageClassifier {
    pub fn new(confirmation: ConfirmationDetector) -> Self {
        Self { confirmation }
    }

    /// Infer the current stage of the booking conversation.
    ///
    /// Total over its input: an empty or unmatched transcript classifies
    /// as [`ConversationStage::Greeting`].
    pub fn classify(&self, transcript: &Transcript) -> ConversationStage {
        let agent = transcript.speaker_text_lower(Speaker::Agent);
        let customer = transcript.speaker_text_lower(Speaker::Customer);

        let stage = self.classify_inner(transcript, &agent, &customer);
        trace!(%stage, utterances = transcript.len(), "classified transcript");
        stage
    }

    fn classify_inner(
        &self,
        transcript: &Transcript,
        agent: &str,
        customer: &str,
    ) -> ConversationStage {
        use ConversationStage::*;

        if self.confirmation.is_confirmed(transcript) {
            return BookingConfirmed;
        }

        if contains_any(agent, CONFIRMATION_ASKED_PHRASES) {
            return ConfirmationAsked;
        }

        if contains_any(agent, RECAP_PHRASES) && contains_any(agent, RECAP_DETAIL_WORDS) {
            return RecapDone;
        }

        if agent.contains("email") && customer.contains('@') {
            return EmailCollected;
        }

        if contains_any(agent, OCCASION_PHRASES) {
            return OccasionAsked;
        }

        if contains_any(agent, EXPERIENCE_PHRASES) && contains_any(agent, EXPERIENCE_FRAMING_WORDS)
        {
            return ExperienceShaped;
        }

        if contains_any(agent, RATE_WORDS) && RATE_DIGITS.is_match(agent) {
            return RateQuoted;
        }

        if contains_any(agent, ROOM_WORDS) {
            return RoomPositioned;
        }

        if contains_any(agent, EXPERIENCE_INTENT_PHRASES) {
            return ExperienceIntent;
        }

        if contains_any(agent, OCCUPANCY_QUESTIONS) && contains_any(customer, OCCUPANCY_ANSWERS) {
            return OccupancyChecked;
        }

        if contains_any(customer, DATE_WORDS) {
            return DatesProvided;
        }

        if contains_any(customer, RESORT_WORDS) {
            return ResortSelected;
        }

        if PHONE_DIGITS.is_match(&customer.replace(' ', "")) {
            return PhoneCollected;
        }

        if transcript.len() > 3 && agent.contains("name") && name_was_answered(transcript) {
            return NameCollected;
        }

        Greeting
    }
}

/// An agent utterance mentioning "name" followed later by a substantive
/// customer reply (more than 3 chars).
fn name_was_answered(transcript: &Transcript) -> bool {
    let utterances = transcript.utterances();
    utterances.iter().enumerate().any(|(i, u)| {
        u.speaker == Speaker::Agent
            && u.text.to_lowercase().contains("name")
            && utterances[i + 1..]
                .iter()
                .any(|u2| u2.speaker == Speaker::Customer && u2.text.len() > 3)
    })
}

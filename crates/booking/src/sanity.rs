//! Conversation sanity checks
//!
//! Non-blocking structural diagnostics over a finished transcript. All
//! checks always run and append warnings independently; only the
//! empty-transcript and too-short checks affect the returned sanity flag.
//! Callers log the warnings, they never gate on them.

use hotel_eval_core::{Speaker, Transcript};

/// Message counts outside this range get a length warning
const SANE_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 10..=100;

/// Leading chars compared when checking for a repeating agent
const REPEAT_PREFIX_LEN: usize = 100;

/// Outcome of a sanity pass.
#[derive(Debug, Clone)]
pub struct SanityReport {
    pub is_sane: bool,
    pub warnings: Vec<String>,
}

/// Structural health checks for one conversation.
#[derive(Default)]
pub struct SanityChecker;

impl SanityChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, transcript: &Transcript) -> SanityReport {
        if transcript.is_empty() {
            return SanityReport {
                is_sane: false,
                warnings: vec!["Conversation is empty - no messages".to_string()],
            };
        }

        let mut warnings = Vec::new();
        let mut is_sane = true;
        let message_count = transcript.len();

        if message_count < 4 {
            warnings.push(format!(
                "Very short conversation ({message_count} messages) - may indicate early termination"
            ));
            is_sane = false;
        }

        check_turn_alternation(transcript, &mut warnings);
        check_message_content(transcript, &mut warnings);
        check_speaker_balance(transcript, &mut warnings);
        check_repetition(transcript, &mut warnings);

        if message_count > *SANE_LENGTH_RANGE.end() {
            warnings.push(format!(
                "Unusually long conversation ({message_count} messages)"
            ));
        } else if message_count < *SANE_LENGTH_RANGE.start() {
            warnings.push(format!(
                "Unusually short conversation ({message_count} messages)"
            ));
        }

        SanityReport { is_sane, warnings }
    }
}

/// One warning per run of 3 or more consecutive messages from one speaker
fn check_turn_alternation(transcript: &Transcript, warnings: &mut Vec<String>) {
    let mut run_speaker: Option<Speaker> = None;
    let mut run_len = 0usize;

    let mut flush = |speaker: Option<Speaker>, len: usize, warnings: &mut Vec<String>| {
        if let Some(speaker) = speaker {
            if len >= 3 {
                warnings.push(format!("Speaker {speaker} spoke {len} times in a row"));
            }
        }
    };

    for utterance in transcript {
        if run_speaker == Some(utterance.speaker) {
            run_len += 1;
        } else {
            flush(run_speaker, run_len, warnings);
            run_speaker = Some(utterance.speaker);
            run_len = 1;
        }
    }
    flush(run_speaker, run_len, warnings);
}

fn check_message_content(transcript: &Transcript, warnings: &mut Vec<String>) {
    for utterance in transcript {
        let trimmed = utterance.text.trim();
        if trimmed.is_empty() {
            warnings.push(format!("Empty message from {}", utterance.speaker));
        } else if trimmed.len() < 2 {
            warnings.push(format!(
                "Suspiciously short message from {}",
                utterance.speaker
            ));
        }
    }
}

fn check_speaker_balance(transcript: &Transcript, warnings: &mut Vec<String>) {
    let agent_count = transcript.by_speaker(Speaker::Agent).count();
    let customer_count = transcript.by_speaker(Speaker::Customer).count();

    if agent_count == 0 {
        warnings.push("No agent messages found".to_string());
    } else if customer_count == 0 {
        warnings.push("No customer messages found".to_string());
    }
}

/// Last three agent messages identical in their leading chars
fn check_repetition(transcript: &Transcript, warnings: &mut Vec<String>) {
    let agent_prefixes: Vec<String> = transcript
        .by_speaker(Speaker::Agent)
        .map(|u| u.text.to_lowercase().chars().take(REPEAT_PREFIX_LEN).collect())
        .collect();

    if agent_prefixes.len() >= 3 {
        let last_three = &agent_prefixes[agent_prefixes.len() - 3..];
        if last_three[0] == last_three[1] && last_three[1] == last_three[2] {
            warnings.push("Agent stuck repeating same message".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_eval_core::Utterance;

    fn check(utterances: Vec<Utterance>) -> SanityReport {
        SanityChecker::new().check(&Transcript::from(utterances))
    }

    #[test]
    fn test_empty_transcript_not_sane() {
        let report = check(vec![]);
        assert!(!report.is_sane);
        assert_eq!(report.warnings, vec!["Conversation is empty - no messages"]);
    }

    #[test]
    fn test_too_short_flips_sanity() {
        let report = check(vec![
            Utterance::agent("Welcome!"),
            Utterance::customer("Hello there"),
        ]);
        assert!(!report.is_sane);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("Very short conversation")));
    }

    #[test]
    fn test_consecutive_speaker_warns_but_stays_sane() {
        let report = check(vec![
            Utterance::agent("Welcome!"),
            Utterance::customer("Hi"),
            Utterance::agent("One moment."),
            Utterance::agent("Still checking."),
            Utterance::agent("Almost there."),
            Utterance::customer("Ok"),
            Utterance::agent("Thanks for waiting."),
            Utterance::customer("Sure"),
            Utterance::agent("Which resort would you like?"),
            Utterance::customer("Coorg please"),
        ]);
        assert!(report.is_sane);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("spoke 3 times in a row")));
    }

    #[test]
    fn test_empty_and_tiny_messages_warn() {
        let report = check(vec![
            Utterance::agent("Welcome!"),
            Utterance::customer(""),
            Utterance::agent("Hello? Are you there by any chance?"),
            Utterance::customer("y"),
        ]);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("Empty message from customer")));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("Suspiciously short message from customer")));
    }

    #[test]
    fn test_one_sided_conversation_warns() {
        let report = check(vec![
            Utterance::agent("Welcome!"),
            Utterance::agent("Hello?"),
        ]);
        assert!(report.warnings.iter().any(|w| w == "No customer messages found"));
    }

    #[test]
    fn test_repeating_agent_warns() {
        let looped = "Please hold while I check";
        let report = check(vec![
            Utterance::agent(looped),
            Utterance::customer("Ok"),
            Utterance::agent(looped),
            Utterance::customer("Waiting"),
            Utterance::agent(looped),
            Utterance::customer("Still here"),
        ]);
        assert!(report
            .warnings
            .iter()
            .any(|w| w == "Agent stuck repeating same message"));
    }

    #[test]
    fn test_healthy_conversation_is_clean() {
        let utterances = vec![
            Utterance::agent("Welcome to Tamara Resorts! May I know your name?"),
            Utterance::customer("Ananya Iyer"),
            Utterance::agent("Thank you, Ananya. Your phone number?"),
            Utterance::customer("98765 43210"),
            Utterance::agent("Which resort would you like?"),
            Utterance::customer("Coorg please"),
            Utterance::agent("Lovely. What dates suit you?"),
            Utterance::customer("Next Friday, two nights"),
            Utterance::agent("How many guests?"),
            Utterance::customer("Two adults"),
        ];
        let report = check(utterances);
        assert!(report.is_sane);
        assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    }
}

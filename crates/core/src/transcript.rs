//! Transcript types
//!
//! A transcript is the call timeline: an append-only, ordered sequence of
//! finalized utterances. Upstream transport buffers partial STT fragments and
//! flushes them into one immutable [`Utterance`] before anything here sees
//! them; every analysis component assumes each utterance is a finished,
//! stable unit of text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Side of the call that produced an utterance.
///
/// Exactly two roles exist: the voice agent under evaluation and the
/// simulated customer driving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The hotel booking agent under evaluation
    Agent,
    /// The simulated customer
    Customer,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Agent => "agent",
            Speaker::Customer => "customer",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One finalized, speaker-tagged unit of transcribed speech.
///
/// Text arrives already STT-transcribed and may contain misrecognitions;
/// the analysis engine is designed to tolerate them rather than expect
/// clean input. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    /// Who spoke
    pub speaker: Speaker,
    /// Finalized transcribed text
    pub text: String,
    /// When the utterance was finalized
    pub timestamp: DateTime<Utc>,
}

impl Utterance {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an agent utterance
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Speaker::Agent, text)
    }

    /// Create a customer utterance
    pub fn customer(text: impl Into<String>) -> Self {
        Self::new(Speaker::Customer, text)
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Ordered, append-only sequence of utterances for one call.
///
/// Ordering is semantically significant (it is the call timeline). All
/// analysis components take `&Transcript` and never mutate it, so
/// back-to-back queries on the same snapshot are always consistent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    utterances: Vec<Utterance>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized utterance to the timeline
    pub fn push(&mut self, utterance: Utterance) {
        self.utterances.push(utterance);
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Utterance> {
        self.utterances.iter()
    }

    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    /// View of the first `n` utterances, for prefix-based progression checks
    pub fn prefix(&self, n: usize) -> Transcript {
        Transcript {
            utterances: self.utterances[..n.min(self.utterances.len())].to_vec(),
        }
    }

    /// The last up-to-`n` utterances
    pub fn last_n(&self, n: usize) -> &[Utterance] {
        let start = self.utterances.len().saturating_sub(n);
        &self.utterances[start..]
    }

    /// Utterances spoken by one side of the call
    pub fn by_speaker(&self, speaker: Speaker) -> impl Iterator<Item = &Utterance> {
        self.utterances.iter().filter(move |u| u.speaker == speaker)
    }

    /// Lower-cased concatenation of one speaker's text, space-joined.
    ///
    /// This is the primary surface the rule-based classifiers match against.
    pub fn speaker_text_lower(&self, speaker: Speaker) -> String {
        self.by_speaker(speaker)
            .map(|u| u.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Case-preserving concatenation of one speaker's text, space-joined
    pub fn speaker_text(&self, speaker: Speaker) -> String {
        self.by_speaker(speaker)
            .map(|u| u.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Index of the last utterance from the given speaker, if any
    pub fn last_index_of(&self, speaker: Speaker) -> Option<usize> {
        self.utterances
            .iter()
            .rposition(|u| u.speaker == speaker)
    }

    /// Full conversation rendered as "speaker: text" lines
    pub fn render(&self) -> String {
        self.utterances
            .iter()
            .map(|u| format!("{}: {}", u.speaker, u.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<Utterance>> for Transcript {
    fn from(utterances: Vec<Utterance>) -> Self {
        Self { utterances }
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Utterance;
    type IntoIter = std::slice::Iter<'a, Utterance>;

    fn into_iter(self) -> Self::IntoIter {
        self.utterances.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_text_lower_filters_by_role() {
        let transcript = Transcript::from(vec![
            Utterance::agent("Welcome to Tamara Resorts"),
            Utterance::customer("Hi, I want to book a cottage"),
            Utterance::agent("Certainly! May I know your name?"),
        ]);

        let agent = transcript.speaker_text_lower(Speaker::Agent);
        assert!(agent.contains("welcome to tamara resorts"));
        assert!(agent.contains("may i know your name"));
        assert!(!agent.contains("cottage"));
    }

    #[test]
    fn test_prefix_is_a_view_of_the_timeline() {
        let transcript = Transcript::from(vec![
            Utterance::agent("one"),
            Utterance::customer("two"),
            Utterance::agent("three"),
        ]);

        assert_eq!(transcript.prefix(2).len(), 2);
        assert_eq!(transcript.prefix(10).len(), 3);
    }

    #[test]
    fn test_last_index_of() {
        let transcript = Transcript::from(vec![
            Utterance::agent("hello"),
            Utterance::customer("hi"),
            Utterance::customer("are you there?"),
        ]);

        assert_eq!(transcript.last_index_of(Speaker::Agent), Some(0));
        assert_eq!(transcript.last_index_of(Speaker::Customer), Some(2));
    }
}

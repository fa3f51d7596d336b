//! Rule-based conversation quality scoring
//!
//! Four 0-100 sub-scores weighted into one overall number. The weights and
//! phrase tables are tuned for the hotel booking script; they measure how the
//! call felt, not whether it succeeded (that is the stage/confirmation
//! engine's job).

use hotel_eval_core::{QualityScore, Speaker, Transcript};

const NATURALNESS_WEIGHT: f32 = 0.25;
const PROFESSIONALISM_WEIGHT: f32 = 0.30;
const CLARITY_WEIGHT: f32 = 0.25;
const ENGAGEMENT_WEIGHT: f32 = 0.20;

const CONVERSATIONAL_MARKERS: [&str; 5] =
    ["wonderful", "great", "perfect", "i understand", "of course"];
const ROBOTIC_PATTERNS: [&str; 4] = ["as per", "kindly note", "please be informed", "as mentioned"];

const COURTESY_PHRASES: [&str; 5] =
    ["thank you", "please", "you're welcome", "my pleasure", "happy to"];
const PROFESSIONAL_MARKERS: [&str; 4] = ["may i", "would you like", "i'd be happy", "let me help"];
const UNPROFESSIONAL_WORDS: [&str; 5] = ["yeah", "nope", "dunno", "gonna", "wanna"];

const PRICING_KEYWORDS: [&str; 5] = ["per night", "total", "inr", "rupees", "comes to"];
const NEXT_STEP_PHRASES: [&str; 4] = ["shall i", "would you like me to", "let me", "i'll go ahead"];
const VAGUE_PATTERNS: [&str; 5] = ["maybe", "perhaps", "not sure", "i think", "probably"];

const POSITIVE_WORDS: [&str; 6] = ["yes", "great", "wonderful", "perfect", "sounds good", "thank you"];

/// Scores one transcript on naturalness, professionalism, clarity and
/// engagement
#[derive(Debug, Default)]
pub struct QualityScorer;

impl QualityScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, transcript: &Transcript) -> QualityScore {
        let naturalness = self.naturalness(transcript);
        let professionalism = self.professionalism(transcript);
        let clarity = self.clarity(transcript);
        let engagement = self.engagement(transcript);

        let overall = naturalness * NATURALNESS_WEIGHT
            + professionalism * PROFESSIONALISM_WEIGHT
            + clarity * CLARITY_WEIGHT
            + engagement * ENGAGEMENT_WEIGHT;

        QualityScore {
            overall: round1(overall),
            naturalness: round1(naturalness),
            professionalism: round1(professionalism),
            clarity: round1(clarity),
            engagement: round1(engagement),
        }
    }

    /// Flow and variety: repetitive openings cost, conversational markers
    /// earn, corporate boilerplate costs
    fn naturalness(&self, transcript: &Transcript) -> f32 {
        let mut score = 100.0;

        let agent_messages: Vec<String> = transcript
            .by_speaker(Speaker::Agent)
            .map(|u| u.text.to_lowercase())
            .collect();

        if agent_messages.len() >= 3 {
            let start = agent_messages.len().saturating_sub(5);
            let unique_starts: std::collections::HashSet<String> = agent_messages[start..]
                .iter()
                .map(|msg| msg.chars().take(30).collect())
                .collect();
            if unique_starts.len() < 3 {
                score -= 20.0;
            }
        }

        let marker_count = agent_messages
            .iter()
            .filter(|msg| CONVERSATIONAL_MARKERS.iter().any(|m| msg.contains(m)))
            .count() as f32;
        score += (marker_count * 5.0).min(20.0);

        let robotic_count = agent_messages
            .iter()
            .filter(|msg| ROBOTIC_PATTERNS.iter().any(|p| msg.contains(p)))
            .count() as f32;
        score -= (robotic_count * 10.0).min(30.0);

        score.clamp(0.0, 100.0)
    }

    fn professionalism(&self, transcript: &Transcript) -> f32 {
        let mut score = 70.0;

        let agent_text = transcript.speaker_text_lower(Speaker::Agent);

        let courtesy_count = COURTESY_PHRASES
            .iter()
            .filter(|p| agent_text.contains(*p))
            .count() as f32;
        score += (courtesy_count * 5.0).min(20.0);

        let prof_count = PROFESSIONAL_MARKERS
            .iter()
            .filter(|m| agent_text.contains(*m))
            .count() as f32;
        score += (prof_count * 5.0).min(15.0);

        let unprof_count = UNPROFESSIONAL_WORDS
            .iter()
            .filter(|w| agent_text.contains(*w))
            .count() as f32;
        score -= (unprof_count * 10.0).min(30.0);

        score.clamp(0.0, 100.0)
    }

    fn clarity(&self, transcript: &Transcript) -> f32 {
        let mut score = 80.0;

        let agent_messages: Vec<String> = transcript
            .by_speaker(Speaker::Agent)
            .map(|u| u.text.to_lowercase())
            .collect();

        let has_clear_pricing = agent_messages
            .iter()
            .any(|msg| PRICING_KEYWORDS.iter().any(|kw| msg.contains(kw)));
        if has_clear_pricing {
            score += 10.0;
        }

        let has_clear_next_steps = agent_messages
            .iter()
            .any(|msg| NEXT_STEP_PHRASES.iter().any(|p| msg.contains(p)));
        if has_clear_next_steps {
            score += 10.0;
        }

        let vague_count = agent_messages
            .iter()
            .filter(|msg| VAGUE_PATTERNS.iter().any(|p| msg.contains(p)))
            .count() as f32;
        score -= (vague_count * 10.0).min(30.0);

        score.clamp(0.0, 100.0)
    }

    /// How involved the customer was: message length and positive sentiment
    fn engagement(&self, transcript: &Transcript) -> f32 {
        let mut score = 50.0;

        let customer_messages: Vec<&str> = transcript
            .by_speaker(Speaker::Customer)
            .map(|u| u.text.as_str())
            .collect();

        if customer_messages.is_empty() {
            return 0.0;
        }

        let avg_length: f32 = customer_messages
            .iter()
            .map(|msg| msg.chars().count() as f32)
            .sum::<f32>()
            / customer_messages.len() as f32;
        if avg_length > 50.0 {
            score += 20.0;
        } else if avg_length < 15.0 {
            score -= 20.0;
        }

        let positive_count = customer_messages
            .iter()
            .filter(|msg| {
                let lower = msg.to_lowercase();
                POSITIVE_WORDS.iter().any(|w| lower.contains(w))
            })
            .count() as f32;
        score += (positive_count * 10.0).min(30.0);

        score.clamp(0.0, 100.0)
    }
}

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

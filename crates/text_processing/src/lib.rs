//! Text cleanup for transcribed speech
//!
//! The STT layer mishears phonetically similar words constantly; this
//! crate repairs the known confusions before transcripts reach the
//! analysis components. Cleanup is best-effort normalization, not a
//! guarantee - downstream pattern tables still tolerate the misheard
//! forms they care about (the booking extractor matches "bouquet number"
//! on its own).

pub mod corrections;

use tracing::trace;

pub use corrections::{CorrectionRule, CORRECTION_RULES};

/// Applies STT correction rules to utterance text.
pub struct SttCorrector {
    rules: Vec<CorrectionRule>,
}

impl Default for SttCorrector {
    fn default() -> Self {
        Self {
            rules: CORRECTION_RULES.clone(),
        }
    }
}

impl SttCorrector {
    /// Build a corrector over a custom rule table
    pub fn with_rules(rules: Vec<CorrectionRule>) -> Self {
        Self { rules }
    }

    /// Repair known STT misrecognitions in one utterance.
    ///
    /// Rules apply in order over the evolving text. A rule with a context
    /// only fires when its context pattern matches somewhere in the text,
    /// keeping legitimate uses of ambiguous words ("weekend", "state")
    /// intact outside booking-domain sentences.
    pub fn clean(&self, text: &str) -> String {
        let mut result = text.to_string();
        for rule in &self.rules {
            if let Some(context) = &rule.context {
                if !context.is_match(&result) {
                    continue;
                }
            }
            let replaced = rule.pattern.replace_all(&result, rule.replacement);
            if replaced != result {
                trace!(pattern = rule.pattern.as_str(), "applied STT correction");
                result = replaced.into_owned();
            }
        }
        result
    }
}

//! Explicit state machine over the booking flow
//!
//! Two consumers share the transition table in
//! [`hotel_eval_core::stage`]: a live tracker fed by the polling loop
//! during a call, and a post-hoc progression validator that re-classifies
//! transcript prefixes at quartile sample points. Both are diagnostic
//! aids; callers log their findings but never block on them.

use tracing::warn;

use hotel_eval_core::{ConversationStage, Transcript, ALL_STAGES};

use crate::classifier::StageClassifier;

/// Consecutive sample points may not skip more than this many stages
const MAX_STAGE_JUMP: usize = 4;

/// Stages any confirmed booking must have passed through
const REQUIRED_STAGES: &[ConversationStage] = &[
    ConversationStage::NameCollected,
    ConversationStage::PhoneCollected,
    ConversationStage::ResortSelected,
    ConversationStage::DatesProvided,
];

/// Tracks the live stage of one call as the polling loop feeds it fresh
/// classifications.
#[derive(Debug)]
pub struct ConversationStateMachine {
    current: ConversationStage,
    history: Vec<ConversationStage>,
    invalid_transitions: Vec<(ConversationStage, ConversationStage)>,
}

impl Default for ConversationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStateMachine {
    pub fn new() -> Self {
        Self {
            current: ConversationStage::Greeting,
            history: vec![ConversationStage::Greeting],
            invalid_transitions: Vec::new(),
        }
    }

    pub fn current(&self) -> ConversationStage {
        self.current
    }

    pub fn history(&self) -> &[ConversationStage] {
        &self.history
    }

    /// Transitions observed that the flow graph does not allow
    pub fn invalid_transitions(&self) -> &[(ConversationStage, ConversationStage)] {
        &self.invalid_transitions
    }

    /// Advance to `next`. Staying on the current stage is always allowed
    /// (the classifier re-reports the same stage between real progress).
    /// Disallowed moves are recorded and applied anyway, since the
    /// transcript is the ground truth and this tracker is diagnostic.
    pub fn transition(&mut self, next: ConversationStage) -> bool {
        let allowed = self.current.can_transition_to(next);
        if !allowed {
            warn!(from = %self.current, to = %next, "flow graph does not allow this transition");
            self.invalid_transitions.push((self.current, next));
        }
        if next != self.current {
            self.current = next;
            self.history.push(next);
        }
        allowed
    }

    /// Stages the flow graph allows next from the current stage
    pub fn expected_next(&self) -> &'static [ConversationStage] {
        self.current.allowed_transitions()
    }

    pub fn is_terminal(&self) -> bool {
        self.current.is_terminal()
    }

    /// (current step, total steps) along the booking flow
    pub fn progress(&self) -> (usize, usize) {
        self.current.progress()
    }
}

/// Outcome of a post-hoc progression check over one transcript.
#[derive(Debug, Clone)]
pub struct ProgressionCheck {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Validate that stage classifications of growing transcript prefixes
/// follow a plausible forward progression.
///
/// The transcript is sampled at quartiles. Any regression (a later sample
/// classifying to an earlier stage) or a jump skipping more than
/// [`MAX_STAGE_JUMP`] stages between consecutive samples is reported.
/// `BOOKING_CONFIRMED` is exempt from the regression check since it can be
/// detected on a truncated prefix. When the final sample is confirmed, a
/// required-stage checklist (name, phone, resort, dates) must have been
/// observed among the samples or the full-transcript classification.
pub fn validate_stage_progression(
    transcript: &Transcript,
    classifier: &StageClassifier,
) -> ProgressionCheck {
    if transcript.is_empty() {
        return ProgressionCheck {
            is_valid: true,
            errors: Vec::new(),
        };
    }

    let n = transcript.len();
    let sample_points = [n / 4, n / 2, 3 * n / 4, n - 1];

    let mut errors = Vec::new();
    let mut seen_stages = Vec::new();
    let mut highest: Option<usize> = None;

    for point in sample_points {
        let stage = classifier.classify(&transcript.prefix(point + 1));
        seen_stages.push(stage);
        let index = stage.index();

        if let Some(high) = highest {
            if stage != ConversationStage::BookingConfirmed && index < high {
                errors.push(format!(
                    "Stage regressed from {} to {}",
                    ALL_STAGES[high], stage
                ));
            }
            if index > high && index - high > MAX_STAGE_JUMP {
                errors.push(format!(
                    "Unrealistic jump from {} to {}, skipping {} stages",
                    ALL_STAGES[high],
                    stage,
                    index - high - 1
                ));
            }
        }
        highest = Some(highest.map_or(index, |h| h.max(index)));
    }

    let final_stage = *seen_stages.last().unwrap_or(&ConversationStage::Greeting);
    if final_stage == ConversationStage::BookingConfirmed {
        let full_stage = classifier.classify(transcript);
        let missing: Vec<String> = REQUIRED_STAGES
            .iter()
            .filter(|required| !seen_stages.contains(required) && **required != full_stage)
            .map(|stage| stage.to_string())
            .collect();
        if !missing.is_empty() {
            errors.push(format!(
                "Booking confirmed but missing required stages: {}",
                missing.join(", ")
            ));
        }
    }

    ProgressionCheck {
        is_valid: errors.is_empty(),
        errors,
    }
}

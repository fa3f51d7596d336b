//! Evaluation result types
//!
//! One [`EvaluationResult`] is created per scenario run and never mutated
//! after the run completes; the report layer consumes it as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::stage::ConversationStage;
use crate::transcript::Transcript;

/// Pass/fail/not-applicable verdict for one criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::NotApplicable => "N/A",
        };
        write!(f, "{s}")
    }
}

/// How a criterion verdict was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMethod {
    /// Deterministic keyword/regex rules
    Pattern,
    /// External LLM judge
    Llm,
}

/// Verdict plus evaluation metadata for one criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionOutcome {
    pub verdict: Verdict,
    pub method: EvaluationMethod,
    /// Short explanation of what was checked
    pub reason: String,
}

impl CriterionOutcome {
    pub fn pattern(verdict: Verdict, reason: impl Into<String>) -> Self {
        Self {
            verdict,
            method: EvaluationMethod::Pattern,
            reason: reason.into(),
        }
    }

    pub fn llm(verdict: Verdict, reason: impl Into<String>) -> Self {
        Self {
            verdict,
            method: EvaluationMethod::Llm,
            reason: reason.into(),
        }
    }
}

/// Conversation quality sub-scores, each 0-100
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityScore {
    pub overall: f32,
    pub naturalness: f32,
    pub professionalism: f32,
    pub clarity: f32,
    pub engagement: f32,
}

/// Booking number evidence from a run.
///
/// A raw-but-invalid number (agent said "your booking number is number") is
/// evaluatively different from no number at all, so both forms are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingNumberEvidence {
    /// Number that passed format validation, if any
    pub validated: Option<String>,
    /// Whatever the agent actually said in a booking-number context
    pub raw: Option<String>,
}

/// Immutable record of one scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub run_id: Uuid,
    pub scenario_id: String,
    pub scenario_name: String,
    pub started_at: DateTime<Utc>,
    pub duration_seconds: f64,
    /// Full call timeline as analyzed
    pub transcript: Transcript,
    /// Furthest stage the call reached
    pub stage: ConversationStage,
    pub booking_confirmed: bool,
    pub booking_number: BookingNumberEvidence,
    /// Per-criterion verdicts, keyed by criterion name
    pub criteria: BTreeMap<String, CriterionOutcome>,
    /// Why the booking did not complete; None on success
    pub failure_description: Option<String>,
    /// Advisory sanity warnings from the transcript structure checks
    pub sanity_warnings: Vec<String>,
    pub quality: QualityScore,
}

impl EvaluationResult {
    /// Headline pass signal: did the call end in a confirmed booking
    pub fn passed(&self) -> bool {
        self.booking_confirmed
    }

    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }
}

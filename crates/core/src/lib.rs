//! Core types for the hotel booking voice-agent evaluation harness
//!
//! This crate provides the foundational types used across all other crates:
//! - Transcript types (speaker-tagged utterances from the STT layer)
//! - Scenario schema (customer profile, evaluation criteria)
//! - Evaluation result types (verdicts, quality scores, per-run records)
//! - Error types

pub mod error;
pub mod result;
pub mod scenario;
pub mod stage;
pub mod transcript;

pub use error::{Error, Result};
pub use stage::{ConversationStage, ALL_STAGES};
pub use result::{
    BookingNumberEvidence, CriterionOutcome, EvaluationMethod, EvaluationResult, QualityScore,
    Verdict,
};
pub use scenario::{
    ConversationStyle, CriterionDefinition, CustomerInfo, Scenario, ScenarioFile,
};
pub use transcript::{Speaker, Transcript, Utterance};

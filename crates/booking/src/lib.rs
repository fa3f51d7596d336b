//! Conversation-progress inference over hotel booking call transcripts
//!
//! Given only the raw speaker-tagged transcript of a call (produced by
//! unreliable speech-to-text), this crate reconstructs what actually
//! happened: how far the booking flow progressed, whether a booking was
//! confirmed, what the booking number is, and why a failed call failed.
//!
//! Every component is a pure, total, synchronous function over an
//! immutable [`hotel_eval_core::Transcript`]; degenerate input produces a
//! default classification, never an error. The orchestration loop polls
//! these components on the live transcript every few seconds and once more
//! at call termination.

pub mod call_end;
pub mod classifier;
pub mod confirmation;
pub mod diagnosis;
pub mod extraction;
pub mod number_parser;
pub mod patterns;
pub mod sanity;
pub mod state_machine;
pub mod validation;

pub use call_end::CallEndDetector;
pub use classifier::StageClassifier;
pub use confirmation::ConfirmationDetector;
pub use diagnosis::FailureDiagnosis;
pub use extraction::BookingNumberExtractor;
pub use patterns::{ConfirmationPhrases, ExtractionPatterns};
pub use sanity::{SanityChecker, SanityReport};
pub use state_machine::{validate_stage_progression, ConversationStateMachine, ProgressionCheck};
pub use validation::BookingNumberValidator;

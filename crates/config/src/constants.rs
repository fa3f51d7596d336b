//! Centralized constants for the evaluation harness
//!
//! Single source of truth for call timeouts and judge transport defaults;
//! the settings layer seeds its serde defaults from here.

/// Call and polling timeouts
pub mod timeouts {
    /// Hard ceiling on one scenario call, seconds
    pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 600;

    /// No utterance from either side for this long counts as a stall, seconds
    pub const INACTIVITY_TIMEOUT_SECS: u64 = 45;

    /// Silence from the agent before the simulated customer prompts it
    /// (keep-alive), seconds
    pub const AGENT_RESPONSE_TIMEOUT_SECS: u64 = 20;

    /// Keep-alive attempts before the customer gives up on the agent
    pub const MAX_KEEPALIVE_ATTEMPTS: u32 = 3;
}

/// Judge transport defaults
pub mod judge {
    /// Default Gemini model used for subjective-criteria verdicts
    pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

    /// Request timeout for one judge call, seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

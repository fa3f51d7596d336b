//! Scenario schema
//!
//! A scenario describes one simulated customer call: who the customer is,
//! how they talk, and which criteria the agent is graded on. Scenarios are
//! authored as JSON (`scenarios.json`, envelope `{ "scenarios": [...] }`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Customer identity the simulated caller presents to the agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// How the simulated customer behaves on the call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationStyle {
    /// Overall tone, e.g. "friendly", "impatient"
    #[serde(default)]
    pub tone: Option<String>,
    /// Opening behavior, e.g. "direct", "hesitant"
    #[serde(default)]
    pub opening: Option<String>,
    /// Free-form style knobs the prompt builder consumes
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// One evaluation criterion definition from the scenario file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriterionDefinition {
    #[serde(default)]
    pub description: String,
    /// Critical criteria fail the whole run when they fail
    #[serde(default)]
    pub critical: bool,
}

/// One simulated-call scenario
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub customer: CustomerInfo,
    /// Stay preferences (resort, dates, occupancy...), free-form
    #[serde(default)]
    pub preferences: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub conversation_style: ConversationStyle,
    /// Criterion name -> definition. BTreeMap keeps report ordering stable.
    #[serde(default)]
    pub evaluation_criteria: BTreeMap<String, CriterionDefinition>,
    /// Per-scenario call timeout override, seconds
    #[serde(default)]
    pub timeout: Option<u64>,
}

/// Envelope of the scenarios file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

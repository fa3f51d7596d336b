//! LLM judge seam for subjective criteria
//!
//! Subjective criteria (empathy, patience and the like) are offered to an
//! injected [`CriterionJudge`] first; pattern evaluation is always the
//! fallback, so a missing or failing judge never blocks a run.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use hotel_eval_config::JudgeConfig;
use hotel_eval_core::{CriterionDefinition, CustomerInfo, Verdict};

/// Criterion-name keywords that mark a criterion as subjective
pub const SUBJECTIVE_KEYWORDS: [&str; 5] =
    ["empathy", "patience", "retention", "sensitivity", "courteous"];

/// Whether a criterion name marks a subjective judgement call
pub fn is_subjective(criterion_name: &str) -> bool {
    let name = criterion_name.to_lowercase();
    SUBJECTIVE_KEYWORDS.iter().any(|kw| name.contains(kw))
}

/// External judgement capability for one criterion.
///
/// `None` means "no verdict" (unavailable, timed out, or the judge answered
/// something other than pass/fail); the caller falls back to patterns.
#[async_trait]
pub trait CriterionJudge: Send + Sync {
    async fn judge(
        &self,
        criterion_name: &str,
        definition: &CriterionDefinition,
        conversation: &str,
        customer: &CustomerInfo,
    ) -> Option<Verdict>;
}

/// Gemini-backed judge over the generateContent REST endpoint
pub struct GeminiJudge {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiJudge {
    /// Build a judge from config. `None` when disabled or no key is set.
    pub fn from_config(config: &JudgeConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let Some(api_key) = config.api_key.clone() else {
            warn!("judge enabled but no api key set, subjective criteria use patterns only");
            return None;
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .ok()?;

        Some(Self {
            client,
            api_key,
            model: config.model.clone(),
        })
    }

    fn build_prompt(
        criterion_name: &str,
        definition: &CriterionDefinition,
        conversation: &str,
        customer: &CustomerInfo,
    ) -> String {
        let title: String = criterion_name
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "You are an expert evaluator for hotel booking conversations.\n\n\
             Evaluate this conversation based on the following criterion:\n\n\
             **Criterion**: {title}\n\
             **Description**: {description}\n\
             **Critical**: {critical}\n\n\
             **Customer Context**:\n\
             - Name: {name}\n\
             - Phone: {phone}\n\
             - Email: {email}\n\n\
             **Conversation**:\n{conversation}\n\n\
             **Instructions**:\n\
             1. Read the entire conversation carefully\n\
             2. Evaluate whether the criterion was met\n\
             3. Consider context, tone, and appropriateness\n\
             4. Respond with ONLY \"PASS\" or \"FAIL\" (one word, no explanation)\n\n\
             Your evaluation:",
            description = if definition.description.is_empty() {
                "N/A"
            } else {
                &definition.description
            },
            critical = definition.critical,
            name = customer.name,
            phone = customer.phone,
            email = customer.email,
        )
    }

    async fn generate(&self, prompt: String) -> Result<String, reqwest::Error> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response: GenerateResponse = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        Ok(text)
    }
}

#[async_trait]
impl CriterionJudge for GeminiJudge {
    async fn judge(
        &self,
        criterion_name: &str,
        definition: &CriterionDefinition,
        conversation: &str,
        customer: &CustomerInfo,
    ) -> Option<Verdict> {
        let prompt = Self::build_prompt(criterion_name, definition, conversation, customer);

        match self.generate(prompt).await {
            Ok(text) => {
                let answer = text.trim().to_uppercase();
                match answer.as_str() {
                    "PASS" => {
                        debug!(criterion = criterion_name, "judge verdict: PASS");
                        Some(Verdict::Pass)
                    }
                    "FAIL" => {
                        debug!(criterion = criterion_name, "judge verdict: FAIL");
                        Some(Verdict::Fail)
                    }
                    other => {
                        warn!(
                            criterion = criterion_name,
                            answer = other,
                            "judge returned unexpected answer"
                        );
                        None
                    }
                }
            }
            Err(error) => {
                warn!(criterion = criterion_name, %error, "judge request failed");
                None
            }
        }
    }
}

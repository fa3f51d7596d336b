//! Pattern-based evaluation of scenario criteria
//!
//! Each criterion a scenario names is resolved to a [`CriterionKind`] exactly
//! once, at scenario load; evaluation then dispatches on the closed enum.
//! Unrecognized names resolve to [`CriterionKind::Unknown`] and come back
//! N/A rather than failing the run.

use std::collections::BTreeMap;

use tracing::debug;

use hotel_eval_core::{
    CriterionDefinition, CriterionOutcome, CustomerInfo, Scenario, Speaker, Transcript, Verdict,
};

use crate::judge::is_subjective;

/// Closed set of criterion checks the pattern evaluator knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionKind {
    NameCaptured,
    PhoneCaptured,
    EmailCaptured,
    Empathy,
    ChildPolicy,
    AlternativeOffered,
    CourteousClosing,
    SuperiorCapacity,
    SuiteSuggested,
    ExtraBedPolicy,
    ActivityPricing,
    PricingClarity,
    MealPlanExplained,
    BudgetSensitivity,
    NoUnrealisticPricing,
    NegotiationHandling,
    Patience,
    ConfirmationSent,
    /// No evaluation logic for this name; always N/A
    Unknown,
}

impl CriterionKind {
    /// Resolve a scenario's criterion name to a kind by its keywords.
    /// First match wins, in the order listed here.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        let has = |kw: &str| name.contains(kw);

        if has("name") && has("captured") {
            Self::NameCaptured
        } else if has("phone") && has("captured") {
            Self::PhoneCaptured
        } else if has("email") && has("captured") {
            Self::EmailCaptured
        } else if has("empathy") {
            Self::Empathy
        } else if has("policy") && has("child") {
            Self::ChildPolicy
        } else if has("alternative") && has("offered") {
            Self::AlternativeOffered
        } else if has("closing") && has("courteous") {
            Self::CourteousClosing
        } else if has("capacity") && has("superior") {
            Self::SuperiorCapacity
        } else if has("suite") && has("suggested") {
            Self::SuiteSuggested
        } else if has("extra_bed") {
            Self::ExtraBedPolicy
        } else if has("activity_pricing") {
            Self::ActivityPricing
        } else if has("pricing") && has("clear") {
            Self::PricingClarity
        } else if has("meal_plan") {
            Self::MealPlanExplained
        } else if has("budget") && has("sensitivity") {
            Self::BudgetSensitivity
        } else if has("unrealistic_pricing") {
            Self::NoUnrealisticPricing
        } else if has("negotiation") {
            Self::NegotiationHandling
        } else if has("patience") {
            Self::Patience
        } else if has("confirmation_sent") {
            Self::ConfirmationSent
        } else {
            Self::Unknown
        }
    }
}

/// A scenario criterion with its kind resolved and subjectivity precomputed
#[derive(Debug, Clone)]
pub struct ResolvedCriterion {
    pub name: String,
    pub kind: CriterionKind,
    pub definition: CriterionDefinition,
    /// Subjective criteria are offered to the LLM judge first
    pub subjective: bool,
}

/// Resolve every criterion a scenario declares, preserving name order
pub fn resolve_criteria(scenario: &Scenario) -> Vec<ResolvedCriterion> {
    scenario
        .evaluation_criteria
        .iter()
        .map(|(name, definition)| {
            let kind = CriterionKind::from_name(name);
            if kind == CriterionKind::Unknown {
                debug!(criterion = %name, "no evaluation logic for criterion, will report N/A");
            }
            ResolvedCriterion {
                name: name.clone(),
                kind,
                definition: definition.clone(),
                subjective: is_subjective(name),
            }
        })
        .collect()
}

const EMPATHY_PHRASES: [&str; 11] = [
    "i understand",
    "i appreciate",
    "i'm sorry",
    "unfortunately",
    "apologize",
    "disappointing",
    "sympathize",
    "regret",
    "appreciate your",
    "understand this",
    "understand that",
];

/// A refusal right after an empathy phrase cancels it out
const EMPATHY_INVALIDATORS: [&str; 5] = [
    "but we cannot",
    "but i cannot",
    "however we cannot",
    "unfortunately we cannot help",
    "i understand but no",
];

const EMPATHY_WINDOW: usize = 100;

/// Deterministic keyword/regex evaluation of a resolved criterion set
#[derive(Debug, Default)]
pub struct CriteriaEvaluator;

impl CriteriaEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate every criterion against the transcript with patterns only
    pub fn evaluate_all(
        &self,
        criteria: &[ResolvedCriterion],
        transcript: &Transcript,
        customer: &CustomerInfo,
    ) -> BTreeMap<String, CriterionOutcome> {
        criteria
            .iter()
            .map(|c| (c.name.clone(), self.evaluate(c, transcript, customer)))
            .collect()
    }

    /// Evaluate one criterion against the transcript with patterns only
    pub fn evaluate(
        &self,
        criterion: &ResolvedCriterion,
        transcript: &Transcript,
        customer: &CustomerInfo,
    ) -> CriterionOutcome {
        let conversation = transcript.render();
        let conversation_lower = conversation.to_lowercase();

        let (verdict, reason) = match criterion.kind {
            CriterionKind::NameCaptured => (
                name_captured(&customer.name, &conversation_lower),
                format!(
                    "Checked if customer name '{}' appears in conversation",
                    customer.name
                ),
            ),
            CriterionKind::PhoneCaptured => {
                let tail = phone_tail(&customer.phone);
                (
                    phone_captured(&customer.phone, &conversation),
                    format!("Checked if phone number ending in {tail} appears in conversation"),
                )
            }
            CriterionKind::EmailCaptured => {
                let username = email_username(&customer.email);
                (
                    email_captured(&customer.email, &conversation_lower),
                    format!("Checked if email username '{username}' appears in conversation"),
                )
            }
            CriterionKind::Empathy => (
                empathy_shown(&conversation_lower),
                "Checked for empathy phrases like 'I understand', 'I appreciate', 'I'm sorry'"
                    .to_string(),
            ),
            CriterionKind::ChildPolicy => (
                child_policy(&conversation_lower),
                "Checked if child policy keywords (children, policy, not permitted) were mentioned"
                    .to_string(),
            ),
            CriterionKind::AlternativeOffered => (
                alternative_offered(&conversation_lower),
                "Checked if alternative property (Kodaikanal) was offered".to_string(),
            ),
            CriterionKind::CourteousClosing => (
                courteous_closing(transcript),
                "Checked for courteous closing phrases in last few agent messages".to_string(),
            ),
            CriterionKind::SuperiorCapacity => (
                superior_capacity(&conversation_lower),
                "Checked if Superior Cottage capacity was correctly stated".to_string(),
            ),
            CriterionKind::SuiteSuggested => (
                suite_suggested(&conversation_lower),
                "Checked if Suite Cottage was suggested for 3 adults".to_string(),
            ),
            CriterionKind::ExtraBedPolicy => (
                extra_bed_policy(&conversation_lower),
                "Checked if extra bed policy was correctly stated".to_string(),
            ),
            CriterionKind::ActivityPricing => (
                activity_pricing(&conversation_lower),
                "Checked if bird watching was correctly marked as chargeable".to_string(),
            ),
            CriterionKind::PricingClarity => (
                pricing_clarity(&conversation_lower),
                "Checked for pricing clarity phrases (per night, total, etc.)".to_string(),
            ),
            CriterionKind::MealPlanExplained => (
                meal_plan_explained(&conversation_lower),
                "Checked if meal plan differences (AP vs CP) were explained".to_string(),
            ),
            CriterionKind::BudgetSensitivity => (
                budget_sensitivity(&conversation_lower),
                "Checked if agent respected budget constraints".to_string(),
            ),
            CriterionKind::NoUnrealisticPricing => (
                no_unrealistic_pricing(&conversation_lower),
                "Checked for unrealistically low pricing".to_string(),
            ),
            CriterionKind::NegotiationHandling => (
                negotiation_handling(&conversation_lower, transcript),
                "Checked if rate negotiation included value explanation".to_string(),
            ),
            CriterionKind::Patience => (
                agent_patience(&conversation_lower),
                "Checked for patience indicators (happy to repeat, no problem, etc.)".to_string(),
            ),
            CriterionKind::ConfirmationSent => (
                booking_confirmation_sent(&conversation_lower),
                "Checked if booking confirmation email was mentioned".to_string(),
            ),
            CriterionKind::Unknown => (
                Verdict::NotApplicable,
                "No specific evaluation logic implemented for this criterion".to_string(),
            ),
        };

        CriterionOutcome::pattern(verdict, reason)
    }
}

fn pass_if(condition: bool) -> Verdict {
    if condition {
        Verdict::Pass
    } else {
        Verdict::Fail
    }
}

/// All name parts present, with one allowed to be missing (STT mangles
/// Indian names often enough that a strict match would be unfair)
fn name_captured(customer_name: &str, conversation_lower: &str) -> Verdict {
    let parts: Vec<String> = customer_name
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let matches = parts
        .iter()
        .filter(|part| conversation_lower.contains(part.as_str()))
        .count();
    pass_if(matches + 1 >= parts.len())
}

fn phone_tail(customer_phone: &str) -> String {
    let digits: String = customer_phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let skip = digits.len().saturating_sub(5);
    digits.chars().skip(skip).collect()
}

/// The last five digits are enough evidence the number was read back
fn phone_captured(customer_phone: &str, conversation: &str) -> Verdict {
    pass_if(conversation.contains(&phone_tail(customer_phone)))
}

fn email_username(customer_email: &str) -> String {
    customer_email
        .to_lowercase()
        .split('@')
        .next()
        .unwrap_or_default()
        .to_string()
}

fn email_captured(customer_email: &str, conversation_lower: &str) -> Verdict {
    pass_if(conversation_lower.contains(&email_username(customer_email)))
}

/// Clamp a byte index down to the nearest char boundary
fn window_after(text: &str, start: usize, len: usize) -> &str {
    let mut end = (start + len).min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[start..end]
}

/// At least two empathy phrases that are not immediately walked back
fn empathy_shown(conversation_lower: &str) -> Verdict {
    let mut empathy_count = 0;
    for phrase in EMPATHY_PHRASES {
        if let Some(pos) = conversation_lower.find(phrase) {
            let context = window_after(conversation_lower, pos, EMPATHY_WINDOW);
            let invalidated = EMPATHY_INVALIDATORS.iter().any(|inv| context.contains(inv));
            if !invalidated {
                empathy_count += 1;
            }
        }
    }
    pass_if(empathy_count >= 2)
}

fn child_policy(conversation_lower: &str) -> Verdict {
    let keywords = ["children", "child", "policy", "not permitted", "not allowed", "under"];
    let matches = keywords
        .iter()
        .filter(|kw| conversation_lower.contains(*kw))
        .count();
    pass_if(matches >= 2)
}

fn alternative_offered(conversation_lower: &str) -> Verdict {
    let alternatives = ["kodaikanal", "kodai", "other property", "alternative"];
    pass_if(alternatives.iter().any(|alt| conversation_lower.contains(alt)))
}

fn courteous_closing(transcript: &Transcript) -> Verdict {
    if transcript.is_empty() {
        return Verdict::Fail;
    }

    let agent_messages: Vec<String> = transcript
        .by_speaker(Speaker::Agent)
        .map(|u| u.text.to_lowercase())
        .collect();
    let start = agent_messages.len().saturating_sub(3);
    let last_messages = agent_messages[start..].join(" ");

    let courteous = ["thank you", "thanks", "help you", "assist you", "pleasure", "welcome"];
    pass_if(courteous.iter().any(|p| last_messages.contains(p)))
}

fn superior_capacity(conversation_lower: &str) -> Verdict {
    let has = |s: &str| conversation_lower.contains(s);
    if has("superior") && (has("cannot") || has("can't") || has("not accommodate")) {
        return Verdict::Pass;
    }
    if has("superior") && (has("3 adults") || has("three adults")) {
        return Verdict::Fail;
    }
    Verdict::NotApplicable
}

fn suite_suggested(conversation_lower: &str) -> Verdict {
    let has = |s: &str| conversation_lower.contains(s);
    pass_if(has("suite") && (has("3 adults") || has("three adults")))
}

fn extra_bed_policy(conversation_lower: &str) -> Verdict {
    let has = |s: &str| conversation_lower.contains(s);
    if has("extra bed") {
        if has("not available") || has("no extra") || has("cannot provide") {
            return Verdict::Pass;
        }
        if has("available") || has("can arrange") {
            return Verdict::Fail;
        }
    }
    Verdict::NotApplicable
}

/// Bird watching is chargeable; calling it complimentary is a policy error
fn activity_pricing(conversation_lower: &str) -> Verdict {
    let has = |s: &str| conversation_lower.contains(s);
    if has("bird") && has("watching") {
        if has("chargeable") || has("charge") || has("additional") || has("cost") {
            return Verdict::Pass;
        }
        if has("complimentary") || has("free") || has("included") {
            return Verdict::Fail;
        }
    }
    Verdict::NotApplicable
}

fn pricing_clarity(conversation_lower: &str) -> Verdict {
    let phrases = ["per night", "per day", "each night", "total", "for the stay", "entire stay"];
    pass_if(phrases.iter().any(|p| conversation_lower.contains(p)))
}

fn meal_plan_explained(conversation_lower: &str) -> Verdict {
    let has = |s: &str| conversation_lower.contains(s);
    if (has("ap") || has("all inclusive")) && (has("cp") || has("breakfast")) {
        if has("includes") || has("included") || has("meals") {
            return Verdict::Pass;
        }
    }
    Verdict::Fail
}

fn budget_sensitivity(conversation_lower: &str) -> Verdict {
    let has = |s: &str| conversation_lower.contains(s);
    if has("budget") || has("31000") || has("31,000") {
        if has("40000") || has("40,000") {
            return Verdict::Fail;
        }
        return Verdict::Pass;
    }
    Verdict::NotApplicable
}

fn no_unrealistic_pricing(conversation_lower: &str) -> Verdict {
    let has = |s: &str| conversation_lower.contains(s);
    if has("9000") || has("9,000") {
        return Verdict::Fail;
    }
    Verdict::Pass
}

fn negotiation_handling(conversation_lower: &str, transcript: &Transcript) -> Verdict {
    let has = |s: &str| conversation_lower.contains(s);
    if has("rate") || has("price") || has("negotiate") {
        if has("value") || has("includes") || has("offer") {
            return Verdict::Pass;
        }
        // Repetition without a value explanation
        if transcript.by_speaker(Speaker::Agent).count() >= 3 {
            return Verdict::Fail;
        }
    }
    Verdict::NotApplicable
}

/// Can't definitively fail patience without evidence, so N/A when silent
fn agent_patience(conversation_lower: &str) -> Verdict {
    let phrases = ["happy to repeat", "let me repeat", "no problem", "of course", "certainly"];
    if phrases.iter().any(|p| conversation_lower.contains(p)) {
        return Verdict::Pass;
    }
    Verdict::NotApplicable
}

fn booking_confirmation_sent(conversation_lower: &str) -> Verdict {
    let phrases = ["confirmation", "confirm", "send you", "email you"];
    let has_email = conversation_lower.contains("email");
    pass_if(has_email && phrases.iter().any(|p| conversation_lower.contains(p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_eval_core::Utterance;

    fn transcript(turns: &[(&str, &str)]) -> Transcript {
        Transcript::from(
            turns
                .iter()
                .map(|(role, text)| match *role {
                    "agent" => Utterance::agent(*text),
                    _ => Utterance::customer(*text),
                })
                .collect::<Vec<_>>(),
        )
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Ananya Krishnan Iyer".to_string(),
            phone: "+91 98765 43210".to_string(),
            email: "ananya.iyer@example.com".to_string(),
        }
    }

    fn resolved(name: &str) -> ResolvedCriterion {
        ResolvedCriterion {
            name: name.to_string(),
            kind: CriterionKind::from_name(name),
            definition: CriterionDefinition::default(),
            subjective: is_subjective(name),
        }
    }

    #[test]
    fn test_kind_resolution() {
        assert_eq!(CriterionKind::from_name("name_captured"), CriterionKind::NameCaptured);
        assert_eq!(CriterionKind::from_name("phone_captured"), CriterionKind::PhoneCaptured);
        assert_eq!(CriterionKind::from_name("empathy_shown"), CriterionKind::Empathy);
        assert_eq!(CriterionKind::from_name("child_policy_stated"), CriterionKind::ChildPolicy);
        assert_eq!(
            CriterionKind::from_name("courteous_closing"),
            CriterionKind::CourteousClosing
        );
        assert_eq!(CriterionKind::from_name("extra_bed_policy"), CriterionKind::ExtraBedPolicy);
        assert_eq!(
            CriterionKind::from_name("no_unrealistic_pricing"),
            CriterionKind::NoUnrealisticPricing
        );
        assert_eq!(CriterionKind::from_name("customer_retention"), CriterionKind::Unknown);
    }

    #[test]
    fn test_name_capture_allows_one_missing_part() {
        let t = transcript(&[
            ("agent", "May I have your name?"),
            ("customer", "Ananya Iyer"),
            ("agent", "Thank you, Ananya Iyer."),
        ]);
        let outcome = CriteriaEvaluator::new().evaluate(&resolved("name_captured"), &t, &customer());
        // "krishnan" never appears, one missing part is tolerated
        assert_eq!(outcome.verdict, Verdict::Pass);
    }

    #[test]
    fn test_phone_capture_matches_last_five_digits() {
        let t = transcript(&[
            ("agent", "Let me read that back: nine eight seven six five 43210."),
        ]);
        let outcome =
            CriteriaEvaluator::new().evaluate(&resolved("phone_captured"), &t, &customer());
        assert_eq!(outcome.verdict, Verdict::Pass);

        let t = transcript(&[("agent", "I could not note your number down.")]);
        let outcome =
            CriteriaEvaluator::new().evaluate(&resolved("phone_captured"), &t, &customer());
        assert_eq!(outcome.verdict, Verdict::Fail);
    }

    #[test]
    fn test_email_capture_matches_username() {
        let t = transcript(&[("agent", "I have ananya.iyer at example dot com on file.")]);
        let outcome =
            CriteriaEvaluator::new().evaluate(&resolved("email_captured"), &t, &customer());
        assert_eq!(outcome.verdict, Verdict::Pass);
    }

    #[test]
    fn test_empathy_needs_two_phrases() {
        let t = transcript(&[("agent", "I understand, that must be frustrating.")]);
        let outcome = CriteriaEvaluator::new().evaluate(&resolved("empathy_shown"), &t, &customer());
        assert_eq!(outcome.verdict, Verdict::Fail);

        let t = transcript(&[
            ("agent", "I understand, and I appreciate your patience while we sort this out."),
        ]);
        let outcome = CriteriaEvaluator::new().evaluate(&resolved("empathy_shown"), &t, &customer());
        assert_eq!(outcome.verdict, Verdict::Pass);
    }

    #[test]
    fn test_empathy_invalidated_by_refusal() {
        let t = transcript(&[
            ("agent", "I understand but we cannot do that. I appreciate your call but we cannot."),
        ]);
        let outcome = CriteriaEvaluator::new().evaluate(&resolved("empathy_shown"), &t, &customer());
        assert_eq!(outcome.verdict, Verdict::Fail);
    }

    #[test]
    fn test_courteous_closing_looks_at_last_agent_messages() {
        let t = transcript(&[
            ("agent", "Thank you for calling!"),
            ("agent", "Rate is INR 42000."),
            ("agent", "Noted."),
            ("agent", "Anything else?"),
            ("agent", "Goodbye."),
        ]);
        // "thank you" scrolled out of the last three agent messages
        let outcome =
            CriteriaEvaluator::new().evaluate(&resolved("courteous_closing"), &t, &customer());
        assert_eq!(outcome.verdict, Verdict::Fail);

        let t = transcript(&[("agent", "Happy to help you, thank you for calling!")]);
        let outcome =
            CriteriaEvaluator::new().evaluate(&resolved("courteous_closing"), &t, &customer());
        assert_eq!(outcome.verdict, Verdict::Pass);
    }

    #[test]
    fn test_superior_capacity_three_state() {
        let t = transcript(&[("agent", "The Superior Cottage cannot accommodate three guests.")]);
        let outcome =
            CriteriaEvaluator::new().evaluate(&resolved("superior_capacity"), &t, &customer());
        assert_eq!(outcome.verdict, Verdict::Pass);

        let t = transcript(&[("agent", "The Superior Cottage fits 3 adults comfortably.")]);
        let outcome =
            CriteriaEvaluator::new().evaluate(&resolved("superior_capacity"), &t, &customer());
        assert_eq!(outcome.verdict, Verdict::Fail);

        let t = transcript(&[("agent", "We have lovely cottages.")]);
        let outcome =
            CriteriaEvaluator::new().evaluate(&resolved("superior_capacity"), &t, &customer());
        assert_eq!(outcome.verdict, Verdict::NotApplicable);
    }

    #[test]
    fn test_unrealistic_pricing_flags_too_cheap() {
        let t = transcript(&[("agent", "Two nights come to just INR 9000 in total.")]);
        let outcome =
            CriteriaEvaluator::new().evaluate(&resolved("no_unrealistic_pricing"), &t, &customer());
        assert_eq!(outcome.verdict, Verdict::Fail);
    }

    #[test]
    fn test_unknown_criterion_is_not_applicable() {
        let t = transcript(&[("agent", "Hello!")]);
        let outcome =
            CriteriaEvaluator::new().evaluate(&resolved("secret_handshake"), &t, &customer());
        assert_eq!(outcome.verdict, Verdict::NotApplicable);
    }

    #[test]
    fn test_resolve_criteria_marks_subjective() {
        let mut scenario = Scenario::default();
        scenario.evaluation_criteria.insert(
            "empathy_shown".to_string(),
            CriterionDefinition {
                description: "Agent is empathetic".to_string(),
                critical: false,
            },
        );
        scenario
            .evaluation_criteria
            .insert("phone_captured".to_string(), CriterionDefinition::default());

        let resolved = resolve_criteria(&scenario);
        assert_eq!(resolved.len(), 2);
        let empathy = resolved.iter().find(|c| c.name == "empathy_shown").unwrap();
        assert!(empathy.subjective);
        let phone = resolved.iter().find(|c| c.name == "phone_captured").unwrap();
        assert!(!phone.subjective);
    }
}

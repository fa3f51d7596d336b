//! Scenario evaluation: criteria verdicts, quality scoring and result
//! assembly
//!
//! [`ScenarioEvaluator`] runs the full post-call analysis for one scenario:
//! stage classification, confirmation and booking-number evidence, failure
//! diagnosis, sanity checks, per-criterion verdicts (LLM judge first for
//! subjective criteria when one is injected, patterns otherwise) and quality
//! scores, assembled into one immutable [`EvaluationResult`].

pub mod criteria;
pub mod judge;
pub mod quality;
pub mod summary;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use hotel_eval_booking::{
    BookingNumberExtractor, ConfirmationDetector, FailureDiagnosis, SanityChecker, StageClassifier,
};
use hotel_eval_core::{
    BookingNumberEvidence, CriterionOutcome, EvaluationResult, Scenario, Transcript, Utterance,
};
use hotel_eval_text_processing::SttCorrector;

pub use criteria::{resolve_criteria, CriteriaEvaluator, CriterionKind, ResolvedCriterion};
pub use judge::{is_subjective, CriterionJudge, GeminiJudge, SUBJECTIVE_KEYWORDS};
pub use quality::QualityScorer;
pub use summary::RunSummary;

/// Full post-call analysis for one scenario run
pub struct ScenarioEvaluator {
    classifier: StageClassifier,
    confirmation: ConfirmationDetector,
    extractor: BookingNumberExtractor,
    diagnosis: FailureDiagnosis,
    sanity: SanityChecker,
    criteria: CriteriaEvaluator,
    quality: QualityScorer,
    corrector: SttCorrector,
    judge: Option<Arc<dyn CriterionJudge>>,
}

impl Default for ScenarioEvaluator {
    fn default() -> Self {
        Self {
            classifier: StageClassifier::default(),
            confirmation: ConfirmationDetector::default(),
            extractor: BookingNumberExtractor::default(),
            diagnosis: FailureDiagnosis::default(),
            sanity: SanityChecker::default(),
            criteria: CriteriaEvaluator::default(),
            quality: QualityScorer::default(),
            corrector: SttCorrector::default(),
            judge: None,
        }
    }
}

impl ScenarioEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject an LLM judge for subjective criteria
    pub fn with_judge(mut self, judge: Arc<dyn CriterionJudge>) -> Self {
        self.judge = Some(judge);
        self
    }

    /// Evaluate one finished call.
    ///
    /// Analysis runs on the raw transcript exactly as the STT layer produced
    /// it (every component tolerates misrecognitions); only the transcript
    /// stored in the result is passed through the correction table, so
    /// reports read cleanly.
    pub async fn evaluate(
        &self,
        scenario: &Scenario,
        transcript: &Transcript,
        started_at: DateTime<Utc>,
        duration_seconds: f64,
    ) -> EvaluationResult {
        let stage = self.classifier.classify(transcript);
        let booking_confirmed = self.confirmation.is_confirmed(transcript);
        let booking_number = BookingNumberEvidence {
            validated: self.extractor.extract(transcript),
            raw: self.extractor.extract_raw(transcript),
        };

        let failure_description = if booking_confirmed {
            None
        } else {
            Some(self.diagnosis.describe(transcript, stage))
        };

        let sanity = self.sanity.check(transcript);
        let quality = self.quality.score(transcript);
        let criteria = self.evaluate_criteria(scenario, transcript).await;

        debug!(
            scenario = %scenario.id,
            %stage,
            booking_confirmed,
            criteria = criteria.len(),
            "scenario evaluated"
        );

        EvaluationResult {
            run_id: Uuid::new_v4(),
            scenario_id: scenario.id.clone(),
            scenario_name: scenario.name.clone(),
            started_at,
            duration_seconds,
            transcript: self.clean_transcript(transcript),
            stage,
            booking_confirmed,
            booking_number,
            criteria,
            failure_description,
            sanity_warnings: sanity.warnings,
            quality,
        }
    }

    /// Judge-first for subjective criteria, pattern fallback always
    async fn evaluate_criteria(
        &self,
        scenario: &Scenario,
        transcript: &Transcript,
    ) -> BTreeMap<String, CriterionOutcome> {
        let resolved = resolve_criteria(scenario);
        let conversation = transcript.render();
        let mut outcomes = BTreeMap::new();

        for criterion in &resolved {
            if criterion.subjective {
                if let Some(judge) = &self.judge {
                    let verdict = judge
                        .judge(
                            &criterion.name,
                            &criterion.definition,
                            &conversation,
                            &scenario.customer,
                        )
                        .await;
                    if let Some(verdict) = verdict {
                        outcomes.insert(
                            criterion.name.clone(),
                            CriterionOutcome::llm(
                                verdict,
                                format!(
                                    "AI-evaluated based on conversation context and {}",
                                    if criterion.definition.description.is_empty() {
                                        "criterion definition"
                                    } else {
                                        &criterion.definition.description
                                    }
                                ),
                            ),
                        );
                        continue;
                    }
                }
            }

            outcomes.insert(
                criterion.name.clone(),
                self.criteria
                    .evaluate(criterion, transcript, &scenario.customer),
            );
        }

        outcomes
    }

    /// Apply the STT correction table to every utterance, keeping speakers
    /// and timestamps
    fn clean_transcript(&self, transcript: &Transcript) -> Transcript {
        transcript
            .iter()
            .map(|u| Utterance {
                speaker: u.speaker,
                text: self.corrector.clean(&u.text),
                timestamp: u.timestamp,
            })
            .collect::<Vec<_>>()
            .into()
    }
}

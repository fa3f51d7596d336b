//! Aggregate summary over a batch of evaluation runs

use std::collections::BTreeMap;
use std::fmt;

use tracing::info;

use hotel_eval_core::{ConversationStage, EvaluationResult};

/// Pass/fail totals and a failed-stage histogram for one batch
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Furthest stage reached by each failed run
    pub failed_stages: BTreeMap<ConversationStage, usize>,
}

impl RunSummary {
    pub fn from_results(results: &[EvaluationResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed()).count();

        let mut failed_stages = BTreeMap::new();
        for result in results.iter().filter(|r| !r.passed()) {
            *failed_stages.entry(result.stage).or_insert(0) += 1;
        }

        Self {
            total,
            passed,
            failed: total - passed,
            failed_stages,
        }
    }

    /// Pass rate as a percentage; `None` for an empty batch
    pub fn pass_rate(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.passed as f64 / self.total as f64 * 100.0)
        }
    }

    /// Log the summary at info level
    pub fn log(&self) {
        info!(
            total = self.total,
            passed = self.passed,
            failed = self.failed,
            "evaluation complete"
        );
        if let Some(rate) = self.pass_rate() {
            info!("success rate: {rate:.1}%");
        }
        for (stage, count) in &self.failed_stages {
            info!(stage = %stage, count, "failed at stage");
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total scenarios: {}", self.total)?;
        writeln!(f, "Passed: {}", self.passed)?;
        writeln!(f, "Failed: {}", self.failed)?;
        match self.pass_rate() {
            Some(rate) => writeln!(f, "Success rate: {rate:.1}%")?,
            None => writeln!(f, "Success rate: N/A")?,
        }
        if !self.failed_stages.is_empty() {
            writeln!(f, "Failed at stages:")?;
            for (stage, count) in &self.failed_stages {
                writeln!(f, "  - {stage}: {count}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hotel_eval_core::{BookingNumberEvidence, QualityScore, Transcript};
    use std::collections::BTreeMap as Map;
    use uuid::Uuid;

    fn result(confirmed: bool, stage: ConversationStage) -> EvaluationResult {
        EvaluationResult {
            run_id: Uuid::new_v4(),
            scenario_id: "s".to_string(),
            scenario_name: "Scenario".to_string(),
            started_at: Utc::now(),
            duration_seconds: 120.0,
            transcript: Transcript::new(),
            stage,
            booking_confirmed: confirmed,
            booking_number: BookingNumberEvidence::default(),
            criteria: Map::new(),
            failure_description: None,
            sanity_warnings: Vec::new(),
            quality: QualityScore::default(),
        }
    }

    #[test]
    fn test_summary_counts_and_histogram() {
        let results = vec![
            result(true, ConversationStage::BookingConfirmed),
            result(false, ConversationStage::RateQuoted),
            result(false, ConversationStage::RateQuoted),
            result(false, ConversationStage::Greeting),
        ];

        let summary = RunSummary::from_results(&results);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 3);
        assert_eq!(summary.pass_rate(), Some(25.0));
        assert_eq!(summary.failed_stages[&ConversationStage::RateQuoted], 2);
        assert_eq!(summary.failed_stages[&ConversationStage::Greeting], 1);

        let rendered = summary.to_string();
        assert!(rendered.contains("Success rate: 25.0%"));
        assert!(rendered.contains("RATE_QUOTED: 2"));
    }

    #[test]
    fn test_empty_batch_has_no_rate() {
        let summary = RunSummary::from_results(&[]);
        assert_eq!(summary.pass_rate(), None);
        assert!(summary.to_string().contains("Success rate: N/A"));
    }
}

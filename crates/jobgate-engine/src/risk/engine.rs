use chrono::{DateTime, Utc};
use tracing::{debug, info};

use jobgate_core::config::RiskGateConfig;
use jobgate_core::errors::Result;
use jobgate_core::job::Job;
use jobgate_core::risk::{RiskFactor, RiskGateResult};
use jobgate_core::traits::{Clock, SystemClock};

use super::aggregate::{classify, risk_score};
use super::evaluators::{EvalContext, EVALUATORS};
use super::explain::explanation;

/// Deterministic rule engine scoring a listing's risk.
///
/// Algorithm:
/// 1. Validate the job (timestamp parses, range ordered, rate sane)
/// 2. Run competition, budget, scope, timeline, fraud evaluators in order
/// 3. Classify the severity multiset into a gate status
/// 4. Derive recommendation, explanation, and cumulative score
///
/// The engine holds no mutable state; one instance may serve any number of
/// concurrent evaluations.
#[derive(Debug, Clone)]
pub struct RiskGateEngine<C: Clock = SystemClock> {
    config: RiskGateConfig,
    clock: C,
}

impl RiskGateEngine<SystemClock> {
    pub fn new(config: RiskGateConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for RiskGateEngine<SystemClock> {
    fn default() -> Self {
        Self {
            config: RiskGateConfig::default(),
            clock: SystemClock,
        }
    }
}

impl<C: Clock> RiskGateEngine<C> {
    /// Build an engine, rejecting out-of-range thresholds up front.
    pub fn with_clock(config: RiskGateConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    pub fn config(&self) -> &RiskGateConfig {
        &self.config
    }

    /// Evaluate against the engine clock's current time.
    pub fn evaluate(&self, job: &Job) -> Result<RiskGateResult> {
        self.evaluate_at(job, self.clock.now())
    }

    /// Evaluate as of `now`. Staleness is measured from `posted_at` to `now`.
    pub fn evaluate_at(&self, job: &Job, now: DateTime<Utc>) -> Result<RiskGateResult> {
        job.validate()?;
        let ctx = EvalContext::new(job, &self.config, now)?;

        let risk_factors: Vec<RiskFactor> = EVALUATORS
            .iter()
            .filter_map(|evaluate| evaluate(&ctx))
            .inspect(|f| {
                debug!(
                    job_id = %job.id,
                    category = ?f.category,
                    severity = ?f.severity,
                    "{}",
                    f.description
                );
            })
            .collect();

        let gate_status = classify(&risk_factors);
        let score = risk_score(&risk_factors);
        info!(
            job_id = %job.id,
            gate = ?gate_status,
            factors = risk_factors.len(),
            score,
            "risk gate evaluated"
        );

        Ok(RiskGateResult {
            gate_status,
            recommendation: gate_status.recommendation(),
            explanation: explanation(gate_status, &risk_factors),
            risk_factors,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::test_support::{clean_title, job, now};
    use jobgate_core::errors::JobGateError;
    use jobgate_core::traits::FixedClock;
    use jobgate_core::types::{GateStatus, Recommendation, RiskCategory, Severity};

    fn engine() -> RiskGateEngine<FixedClock> {
        RiskGateEngine::with_clock(RiskGateConfig::default(), FixedClock(now())).unwrap()
    }

    fn summary(result: &RiskGateResult) -> Vec<(RiskCategory, Severity)> {
        result
            .risk_factors
            .iter()
            .map(|f| (f.category, f.severity))
            .collect()
    }

    #[test]
    fn short_urgent_crowded_underpaid_listing_is_blocked() {
        let title = "Urgent fix needed for checkout page in web store!!";
        assert_eq!(title.chars().count(), 50);
        let mut j = job(title);
        j.applicants_min = Some(60);
        j.applicants_max = Some(80);
        j.ehr_twd = Some(300.0);

        let result = engine().evaluate(&j).unwrap();
        assert_eq!(
            summary(&result),
            vec![
                (RiskCategory::Competition, Severity::Critical),
                (RiskCategory::Budget, Severity::High),
                (RiskCategory::Scope, Severity::Critical),
                (RiskCategory::Timeline, Severity::High),
            ]
        );
        assert_eq!(result.gate_status, GateStatus::HardBlock);
        assert_eq!(result.recommendation, Recommendation::DoNotProceed);
        assert_eq!(result.score, 1.0);
        assert_eq!(
            result.explanation,
            vec![
                "🔴 Do not apply - this listing carries high risk".to_string(),
                String::new(),
                "Key risk factors:".to_string(),
                "• Competition too intense (70+ applicants already)".to_string(),
                "• Effective hourly rate too low (TWD 300/hr)".to_string(),
                "• Requirements description too brief (only 50 characters)".to_string(),
                String::new(),
                "Recommended action: skip this listing".to_string(),
            ]
        );
    }

    #[test]
    fn detailed_listing_without_applicant_data_passes() {
        let mut j = job(&clean_title(250));
        j.ehr_twd = Some(1200.0);

        let result = engine().evaluate(&j).unwrap();
        assert_eq!(
            summary(&result),
            vec![(RiskCategory::Competition, Severity::Low)]
        );
        assert_eq!(result.gate_status, GateStatus::Pass);
        assert_eq!(result.recommendation, Recommendation::Proceed);
        assert_eq!(result.score, 0.1);
    }

    #[test]
    fn no_factors_means_pass_and_zero_score() {
        let mut j = job(&clean_title(250));
        j.applicants_min = Some(2);
        j.applicants_max = Some(6);
        j.ehr_twd = Some(1200.0);

        let result = engine().evaluate(&j).unwrap();
        assert!(result.risk_factors.is_empty());
        assert_eq!(result.gate_status, GateStatus::Pass);
        assert_eq!(result.recommendation, Recommendation::Proceed);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.explanation.len(), 3);
    }

    #[test]
    fn crowded_listing_always_blocks() {
        let e = engine();
        for (min, max) in [(50, 50), (40, 60), (0, 100), (90, 400)] {
            let mut j = job(&clean_title(250));
            j.applicants_min = Some(min);
            j.applicants_max = Some(max);
            j.ehr_twd = Some(1200.0);
            let result = e.evaluate(&j).unwrap();
            assert_eq!(result.gate_status, GateStatus::HardBlock, "{min}-{max}");
        }
    }

    #[test]
    fn two_mediums_warn_and_compound() {
        let mut j = job(&format!("{} quick job", clean_title(250)));
        j.applicants_min = Some(2);
        j.applicants_max = Some(6);
        j.ehr_twd = Some(9000.0);

        let result = engine().evaluate(&j).unwrap();
        assert_eq!(
            summary(&result),
            vec![
                (RiskCategory::Budget, Severity::Medium),
                (RiskCategory::Scope, Severity::Medium),
            ]
        );
        assert_eq!(result.gate_status, GateStatus::SoftWarning);
        assert_eq!(result.recommendation, Recommendation::ReviewCarefully);
        assert!((result.score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn unparseable_timestamp_is_invalid_input() {
        let mut j = job(&clean_title(250));
        j.posted_at = "yesterday".into();
        assert!(matches!(
            engine().evaluate(&j),
            Err(JobGateError::InvalidInput(_))
        ));
    }

    #[test]
    fn bad_config_rejected_at_construction() {
        let mut config = RiskGateConfig::default();
        config.hard_block.max_applicants = 10;
        assert!(matches!(
            RiskGateEngine::new(config),
            Err(JobGateError::Configuration(_))
        ));
    }

    #[test]
    fn custom_thresholds_change_outcome() {
        let mut config = RiskGateConfig::default();
        config.hard_block.max_applicants = 200;
        config.soft_warning.max_applicants = 100;
        let lenient = RiskGateEngine::with_clock(config, FixedClock(now())).unwrap();
        assert_eq!(lenient.config().hard_block.max_applicants, 200);
        assert_eq!(lenient.config().soft_warning.min_description_length, 200);

        let mut j = job(&clean_title(250));
        j.applicants_min = Some(60);
        j.applicants_max = Some(80);
        j.ehr_twd = Some(1200.0);

        assert_eq!(engine().evaluate(&j).unwrap().gate_status, GateStatus::HardBlock);
        assert_eq!(lenient.evaluate(&j).unwrap().gate_status, GateStatus::Pass);
    }

    #[test]
    fn evaluate_at_overrides_clock() {
        let mut j = job(&clean_title(250));
        j.applicants_min = Some(2);
        j.applicants_max = Some(6);
        j.ehr_twd = Some(1200.0);
        let later = now() + chrono::Duration::days(60);

        let result = engine().evaluate_at(&j, later).unwrap();
        assert_eq!(
            summary(&result),
            vec![(RiskCategory::Timeline, Severity::Medium)]
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let mut j = job("Need a quick job done, pay first");
        j.applicants_min = Some(15);
        j.applicants_max = Some(30);
        let e = engine();
        assert_eq!(e.evaluate(&j).unwrap(), e.evaluate(&j).unwrap());
    }
}

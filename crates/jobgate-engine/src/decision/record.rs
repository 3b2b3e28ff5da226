use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::info;

use jobgate_core::errors::{JobGateError, Result};
use jobgate_core::job::Job;
use jobgate_core::record::{
    Decision, DecisionContext, DecisionId, DecisionRecord, FollowUp, RecordId,
};
use jobgate_core::risk::RiskGateResult;
use jobgate_core::signal::ParticipantSignal;
use jobgate_core::traits::{Clock, SequenceSource, SystemClock};
use jobgate_core::types::{DecisionOutcome, UnitFloat};

use super::digest::{context_digest, verify_context};
use super::sequence::RandomSequence;
use super::timeline::{budget_label, extract_timeline};

/// Everything needed to assemble a decision record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordInput {
    pub job_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub job: Job,
    pub risk_assessment: RiskGateResult,
    #[serde(default)]
    pub participant_signals: Vec<ParticipantSignal>,
    pub decided_by: String,
    pub outcome: DecisionOutcome,
    pub reasoning: String,
    pub confidence: UnitFloat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<String>>,
}

/// Assembles decision records from a job, its risk result and the team's
/// signals. Performs no evaluation of its own: the risk result is copied into
/// the record as given.
#[derive(Debug, Clone, Default)]
pub struct DecisionRecordEngine<S: SequenceSource = RandomSequence, C: Clock = SystemClock> {
    sequence: S,
    clock: C,
}

impl DecisionRecordEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SequenceSource, C: Clock> DecisionRecordEngine<S, C> {
    pub fn with_parts(sequence: S, clock: C) -> Self {
        Self { sequence, clock }
    }

    fn next_decision_id(&self, year: i32) -> DecisionId {
        DecisionId::new(year, self.sequence.next_sequence(year))
    }

    pub fn create_record(&self, input: CreateRecordInput) -> Result<DecisionRecord> {
        if input.job_id.trim().is_empty() {
            return Err(JobGateError::invalid_input("job_id is required"));
        }
        if input.decided_by.trim().is_empty() {
            return Err(JobGateError::invalid_input("decided_by is required"));
        }
        if input.job_id != input.job.id {
            return Err(JobGateError::invalid_input(format!(
                "job_id '{}' does not match the job snapshot '{}'",
                input.job_id, input.job.id
            )));
        }

        let now = self.clock.now();
        let context = DecisionContext {
            job_title: input.job.title.clone(),
            budget: budget_label(&input.job),
            timeline: extract_timeline(&input.job.title),
            risk_assessment: input.risk_assessment,
        };
        let digest = context_digest(&context)?;

        let record = DecisionRecord {
            id: RecordId::at(now),
            decision_id: self.next_decision_id(now.year()),
            job_id: input.job_id,
            team_id: input.team_id,
            context,
            context_digest: digest,
            participants: input.participant_signals,
            decision: Decision {
                outcome: input.outcome,
                confidence: input.confidence,
                conditions: input.conditions,
                decided_by: input.decided_by,
                reasoning: input.reasoning,
            },
            follow_up: None,
            created_at: now,
            updated_at: now,
        };

        info!(
            record_id = %record.id,
            decision_id = %record.decision_id,
            job_id = %record.job_id,
            outcome = ?record.decision.outcome,
            participants = record.participants.len(),
            "decision record created"
        );
        Ok(record)
    }

    /// Attach a retrospective. Only `follow_up` and `updated_at` change.
    pub fn attach_follow_up(
        &self,
        mut record: DecisionRecord,
        follow_up: FollowUp,
    ) -> Result<DecisionRecord> {
        if !verify_context(&record)? {
            return Err(JobGateError::invalid_input(format!(
                "record {} context does not match its digest",
                record.decision_id
            )));
        }
        record.follow_up = Some(follow_up);
        record.updated_at = self.clock.now();
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::sequence::CounterSequence;
    use crate::decision::test_support::{at, signals};
    use crate::risk::test_support::{job, now};
    use crate::risk::RiskGateEngine;
    use jobgate_core::config::RiskGateConfig;
    use jobgate_core::traits::FixedClock;
    use jobgate_core::types::SignalType::*;

    fn engine() -> DecisionRecordEngine<CounterSequence, FixedClock> {
        DecisionRecordEngine::with_parts(CounterSequence::starting_at(7), FixedClock(now()))
    }

    fn input(title: &str) -> CreateRecordInput {
        let mut j = job(title);
        j.ehr_twd = Some(800.0);
        j.applicants_min = Some(25);
        j.applicants_max = Some(35);
        let risk = RiskGateEngine::with_clock(RiskGateConfig::default(), FixedClock(now()))
            .unwrap()
            .evaluate(&j)
            .unwrap();
        CreateRecordInput {
            job_id: j.id.clone(),
            team_id: Some("team-a".into()),
            job: j,
            risk_assessment: risk,
            participant_signals: signals(&[Recommend, Caution, Recommend]),
            decided_by: "owner-1".into(),
            outcome: DecisionOutcome::Proceed,
            reasoning: "Good client history".into(),
            confidence: UnitFloat::new(0.8).unwrap(),
            conditions: Some(vec!["Fixed milestones".into()]),
        }
    }

    #[test]
    fn assembles_context_and_decision() {
        let inp = input("Build a 3 week reporting dashboard");
        let signals = inp.participant_signals.clone();
        let record = engine().create_record(inp).unwrap();

        assert_eq!(record.decision_id.to_string(), "DR-2026-007");
        assert_eq!(record.job_id, "job-1");
        assert_eq!(record.team_id.as_deref(), Some("team-a"));
        assert_eq!(record.context.job_title, "Build a 3 week reporting dashboard");
        assert_eq!(record.context.budget, "TWD 800/hr");
        assert_eq!(record.context.timeline, "3 weeks");
        assert_eq!(record.participants, signals);
        assert_eq!(record.decision.decided_by, "owner-1");
        assert_eq!(record.decision.confidence.value(), 0.8);
        assert_eq!(record.created_at, now());
        assert_eq!(record.updated_at, record.created_at);
        assert_eq!(record.id.datetime(), record.created_at);
        assert!(record.follow_up.is_none());
    }

    #[test]
    fn risk_assessment_is_copied_unchanged() {
        let inp = input("Urgent: migrate database");
        let original = inp.risk_assessment.clone();
        let record = engine().create_record(inp).unwrap();
        assert_eq!(record.context.risk_assessment, original);

        let json = serde_json::to_string(&record).unwrap();
        let back: DecisionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.context.risk_assessment, original);
    }

    #[test]
    fn missing_rate_is_unspecified_budget() {
        let mut inp = input("Logo design");
        inp.job.ehr_twd = None;
        let record = engine().create_record(inp).unwrap();
        assert_eq!(record.context.budget, "unspecified");
        assert_eq!(record.context.timeline, "unspecified");
    }

    #[test]
    fn sequence_advances_per_record() {
        let e = engine();
        let a = e.create_record(input("a")).unwrap();
        let b = e.create_record(input("b")).unwrap();
        assert_eq!(a.decision_id.sequence + 1, b.decision_id.sequence);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn default_engine_draws_random_sequence() {
        let record = DecisionRecordEngine::new().create_record(input("a")).unwrap();
        assert!((1..=999).contains(&record.decision_id.sequence));
    }

    #[test]
    fn required_identities_enforced() {
        let mut inp = input("a");
        inp.decided_by = " ".into();
        assert!(matches!(
            engine().create_record(inp),
            Err(JobGateError::InvalidInput(_))
        ));

        let mut inp = input("a");
        inp.job_id.clear();
        assert!(engine().create_record(inp).is_err());
    }

    #[test]
    fn job_id_must_name_the_frozen_job() {
        let mut inp = input("a");
        inp.job_id = "job-2".into();
        let err = engine().create_record(inp).unwrap_err();
        assert!(matches!(err, JobGateError::InvalidInput(_)));
        assert!(err.to_string().contains("job-2"));
    }

    #[test]
    fn digest_matches_frozen_context() {
        let record = engine().create_record(input("a")).unwrap();
        assert!(verify_context(&record).unwrap());

        let mut tampered = record.clone();
        tampered.context.risk_assessment.score = 0.0;
        tampered.context.budget = "TWD 9000/hr".into();
        assert!(!verify_context(&tampered).unwrap());
    }

    #[test]
    fn follow_up_only_touches_follow_up_and_updated_at() {
        let record = engine().create_record(input("a")).unwrap();
        let later = at("2026-12-01T10:00:00Z");
        let e = DecisionRecordEngine::with_parts(CounterSequence::default(), FixedClock(later));

        let updated = e
            .attach_follow_up(
                record.clone(),
                FollowUp {
                    review_date: later,
                    actual_outcome: Some("Delivered on time".into()),
                    lessons_learned: Some("Milestones worked".into()),
                },
            )
            .unwrap();

        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.created_at, record.created_at);
        assert_eq!(updated.context, record.context);
        assert_eq!(updated.decision, record.decision);
        assert_eq!(
            updated.follow_up.as_ref().and_then(|f| f.actual_outcome.as_deref()),
            Some("Delivered on time")
        );
    }

    #[test]
    fn follow_up_refuses_tampered_record() {
        let mut record = engine().create_record(input("a")).unwrap();
        record.context.job_title = "something else".into();
        let result = engine().attach_follow_up(
            record,
            FollowUp {
                review_date: now(),
                actual_outcome: None,
                lessons_learned: None,
            },
        );
        assert!(matches!(result, Err(JobGateError::InvalidInput(_))));
    }
}

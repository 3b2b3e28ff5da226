//! The five independent risk evaluators.
//!
//! Each evaluator inspects one dimension of a listing and returns the first
//! matching condition in its own priority order, or nothing. Evaluators never
//! see each other's output.

use chrono::{DateTime, Utc};

use jobgate_core::config::RiskGateConfig;
use jobgate_core::errors::Result;
use jobgate_core::job::Job;
use jobgate_core::risk::{Evidence, RiskFactor};
use jobgate_core::types::{RiskCategory, Severity};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Signature shared by all evaluators.
pub type Evaluator = fn(&EvalContext<'_>) -> Option<RiskFactor>;

/// Evaluators in output order.
pub const EVALUATORS: [Evaluator; 5] = [competition, budget, scope, timeline, fraud_signal];

/// Per-evaluation view of a job, with the parsed timestamp and the lowercased
/// title computed once.
pub struct EvalContext<'a> {
    pub job: &'a Job,
    pub config: &'a RiskGateConfig,
    pub now: DateTime<Utc>,
    pub posted_at: DateTime<Utc>,
    title_lower: String,
}

impl<'a> EvalContext<'a> {
    pub fn new(job: &'a Job, config: &'a RiskGateConfig, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            job,
            config,
            now,
            posted_at: job.posted_at_utc()?,
            title_lower: job.title.to_lowercase(),
        })
    }

    /// Keywords contained in the title, case-insensitively, in list order.
    pub fn matching(&self, keywords: &[String]) -> Vec<String> {
        keywords
            .iter()
            .filter(|k| self.title_lower.contains(&k.to_lowercase()))
            .cloned()
            .collect()
    }

    pub fn days_since_posted(&self) -> f64 {
        (self.now - self.posted_at).num_seconds() as f64 / SECONDS_PER_DAY
    }
}

fn factor(
    category: RiskCategory,
    severity: Severity,
    description: String,
    evidence: Evidence,
) -> Option<RiskFactor> {
    Some(RiskFactor {
        category,
        severity,
        description,
        evidence,
    })
}

/// Applicant pressure. Missing data is flagged low rather than ignored.
pub fn competition(ctx: &EvalContext<'_>) -> Option<RiskFactor> {
    let Some(mid) = ctx.job.applicants_mid() else {
        return factor(
            RiskCategory::Competition,
            Severity::Low,
            "Competition data missing; using a conservative estimate".into(),
            Evidence::CompetitionDataMissing {
                source: ctx.job.source_key.clone(),
            },
        );
    };

    let hard = ctx.config.hard_block.max_applicants;
    if mid >= f64::from(hard) {
        return factor(
            RiskCategory::Competition,
            Severity::Critical,
            format!("Competition too intense ({mid}+ applicants already)"),
            Evidence::Competition {
                applicants_mid: mid,
                threshold: hard,
            },
        );
    }

    let soft = ctx.config.soft_warning.max_applicants;
    if mid >= f64::from(soft) {
        return factor(
            RiskCategory::Competition,
            Severity::High,
            format!("High competition ({mid} applicants)"),
            Evidence::Competition {
                applicants_mid: mid,
                threshold: soft,
            },
        );
    }

    None
}

/// Range vagueness first, then effective hourly rate.
pub fn budget(ctx: &EvalContext<'_>) -> Option<RiskFactor> {
    if let Some((min, max)) = ctx.job.applicant_range() {
        let range = f64::from(max) - f64::from(min);
        let mid = (f64::from(min) + f64::from(max)) / 2.0;
        if mid > 0.0 {
            let variance_ratio = range / mid;
            if variance_ratio > ctx.config.soft_warning.budget_variance_ratio {
                return factor(
                    RiskCategory::Budget,
                    Severity::Medium,
                    format!("Budget range too vague (variance ratio {variance_ratio:.1})"),
                    Evidence::BudgetVariance {
                        range,
                        mid,
                        variance_ratio,
                    },
                );
            }
        }
    }

    let rate = ctx.job.ehr_twd?;
    if rate < ctx.config.min_hourly_rate {
        return factor(
            RiskCategory::Budget,
            Severity::High,
            format!("Effective hourly rate too low (TWD {rate}/hr)"),
            Evidence::HourlyRate {
                ehr_twd: rate,
                bound: ctx.config.min_hourly_rate,
            },
        );
    }
    if rate > ctx.config.max_hourly_rate {
        return factor(
            RiskCategory::Budget,
            Severity::Medium,
            format!("Effective hourly rate anomalously high (TWD {rate}/hr), verify authenticity"),
            Evidence::HourlyRate {
                ehr_twd: rate,
                bound: ctx.config.max_hourly_rate,
            },
        );
    }

    None
}

/// Title length stands in for description depth.
pub fn scope(ctx: &EvalContext<'_>) -> Option<RiskFactor> {
    let title_length = ctx.job.title_len();

    let hard = ctx.config.hard_block.min_description_length;
    if title_length < hard {
        return factor(
            RiskCategory::Scope,
            Severity::Critical,
            format!("Requirements description too brief (only {title_length} characters)"),
            Evidence::ScopeLength {
                title_length,
                threshold: hard,
            },
        );
    }

    let soft = ctx.config.soft_warning.min_description_length;
    if title_length < soft {
        return factor(
            RiskCategory::Scope,
            Severity::High,
            format!("Requirements description lacks detail ({title_length} characters)"),
            Evidence::ScopeLength {
                title_length,
                threshold: soft,
            },
        );
    }

    let vague = ctx.matching(&ctx.config.vague_scope_keywords);
    if !vague.is_empty() {
        return factor(
            RiskCategory::Scope,
            Severity::Medium,
            "Contains vague scope keywords".into(),
            Evidence::VagueScope {
                detected_terms: vague,
            },
        );
    }

    if ctx.matching(&ctx.config.deliverable_keywords).is_empty() {
        return factor(
            RiskCategory::Scope,
            Severity::Low,
            "No deliverables or outcomes mentioned".into(),
            Evidence::MissingDeliverables,
        );
    }

    None
}

pub fn timeline(ctx: &EvalContext<'_>) -> Option<RiskFactor> {
    let urgent = ctx.matching(&ctx.config.urgent_keywords);
    if !urgent.is_empty() {
        return factor(
            RiskCategory::Timeline,
            Severity::High,
            "Urgent timeline keywords present".into(),
            Evidence::UrgentTimeline {
                detected_terms: urgent,
            },
        );
    }

    let days = ctx.days_since_posted();
    if days > f64::from(ctx.config.stale_after_days) {
        return factor(
            RiskCategory::Timeline,
            Severity::Medium,
            format!(
                "Listing posted {} days ago; it may be stale",
                days.round() as i64
            ),
            Evidence::StaleListing {
                days_since_posted: days,
                posted_at: ctx.job.posted_at.clone(),
            },
        );
    }

    None
}

pub fn fraud_signal(ctx: &EvalContext<'_>) -> Option<RiskFactor> {
    let suspicious = ctx.matching(&ctx.config.fraud_signals);
    if suspicious.is_empty() {
        return None;
    }
    factor(
        RiskCategory::FraudSignal,
        Severity::Critical,
        format!("Contains suspicious phrases: {}", suspicious.join(", ")),
        Evidence::FraudTerms {
            suspicious_terms: suspicious,
        },
    )
}

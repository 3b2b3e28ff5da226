use serde::{Deserialize, Serialize};

use crate::types::{GateStatus, Recommendation, RiskCategory, Severity};

/// One detected risk condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    #[serde(rename = "type")]
    pub category: RiskCategory,
    pub severity: Severity,
    pub description: String,
    pub evidence: Evidence,
}

/// Data backing a factor's description. Display-only; nothing downstream
/// branches on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    CompetitionDataMissing {
        source: String,
    },
    Competition {
        applicants_mid: f64,
        threshold: u32,
    },
    BudgetVariance {
        range: f64,
        mid: f64,
        variance_ratio: f64,
    },
    HourlyRate {
        ehr_twd: f64,
        bound: f64,
    },
    ScopeLength {
        title_length: usize,
        threshold: usize,
    },
    VagueScope {
        detected_terms: Vec<String>,
    },
    MissingDeliverables,
    UrgentTimeline {
        detected_terms: Vec<String>,
    },
    StaleListing {
        days_since_posted: f64,
        posted_at: String,
    },
    FraudTerms {
        suspicious_terms: Vec<String>,
    },
}

/// Outcome of one risk gate evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskGateResult {
    pub gate_status: GateStatus,
    /// At most one factor per category, in evaluator order.
    pub risk_factors: Vec<RiskFactor>,
    pub recommendation: Recommendation,
    pub explanation: Vec<String>,
    /// Cumulative risk in [0, 1].
    pub score: f64,
}

impl RiskGateResult {
    pub fn factor(&self, category: RiskCategory) -> Option<&RiskFactor> {
        self.risk_factors.iter().find(|f| f.category == category)
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.risk_factors.iter().map(|f| f.severity).max()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.risk_factors
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    /// Categories of all critical factors, in evaluator order.
    pub fn critical_categories(&self) -> Vec<RiskCategory> {
        self.risk_factors
            .iter()
            .filter(|f| f.severity == Severity::Critical)
            .map(|f| f.category)
            .collect()
    }
}

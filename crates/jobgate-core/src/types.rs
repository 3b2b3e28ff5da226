use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A floating-point value constrained to [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct UnitFloat(f64);

impl UnitFloat {
    pub fn new(v: f64) -> Option<Self> {
        if (0.0..=1.0).contains(&v) {
            Some(Self(v))
        } else {
            None
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Whole percent, rounded half away from zero.
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl Serialize for UnitFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UnitFloat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = f64::deserialize(deserializer)?;
        UnitFloat::new(v).ok_or_else(|| serde::de::Error::custom(format!("{v} not in [0.0, 1.0]")))
    }
}

/// Risk dimension a factor belongs to. Declaration order is evaluator order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    Competition,
    Budget,
    Scope,
    Timeline,
    FraudSignal,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::Competition,
        RiskCategory::Budget,
        RiskCategory::Scope,
        RiskCategory::Timeline,
        RiskCategory::FraudSignal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::Competition => "competition",
            RiskCategory::Budget => "budget",
            RiskCategory::Scope => "scope",
            RiskCategory::Timeline => "timeline",
            RiskCategory::FraudSignal => "fraud signal",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Contribution of one factor of this severity to the cumulative risk score.
    pub fn weight(self) -> f64 {
        match self {
            Severity::Low => 0.2,
            Severity::Medium => 0.4,
            Severity::High => 0.6,
            Severity::Critical => 0.8,
        }
    }
}

/// Tri-state gate classification, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateStatus {
    Pass,
    SoftWarning,
    HardBlock,
}

impl GateStatus {
    /// The recommendation paired with this status. The pairing is fixed.
    pub fn recommendation(self) -> Recommendation {
        match self {
            GateStatus::Pass => Recommendation::Proceed,
            GateStatus::SoftWarning => Recommendation::ReviewCarefully,
            GateStatus::HardBlock => Recommendation::DoNotProceed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GateStatus::Pass => "passed",
            GateStatus::SoftWarning => "needs caution",
            GateStatus::HardBlock => "high risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Proceed,
    ReviewCarefully,
    DoNotProceed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamRole {
    DecisionOwner,
    TechnicalReviewer,
    BusinessReviewer,
    RiskReviewer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalType {
    Recommend,
    Caution,
    Reject,
}

/// Reviewer's tag for what their reasoning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasoningCategory {
    Budget,
    Scope,
    Timeline,
    Technical,
    Strategic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionOutcome {
    Proceed,
    Skip,
    Defer,
}

impl DecisionOutcome {
    pub fn label(self) -> &'static str {
        match self {
            DecisionOutcome::Proceed => "take the job",
            DecisionOutcome::Skip => "skip",
            DecisionOutcome::Defer => "defer decision",
        }
    }
}

/// Agreement classification over a set of reviewer signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Consensus {
    StrongAgreement,
    Majority,
    Split,
    NoConsensus,
}

impl Consensus {
    pub fn label(self) -> &'static str {
        match self {
            Consensus::StrongAgreement => "strong agreement",
            Consensus::Majority => "majority agrees",
            Consensus::Split => "split opinions",
            Consensus::NoConsensus => "no consensus",
        }
    }
}

use jobgate_core::risk::RiskFactor;
use jobgate_core::types::{GateStatus, Severity};

/// Severity weight that saturates the score: `min(sum / SCORE_SCALE, 1)`.
pub const SCORE_SCALE: f64 = 2.0;

/// Map the severity multiset to a gate status.
///
/// Any critical factor or two high factors block; one high factor or two
/// medium factors warn; everything else passes. Low factors never move the
/// gate on their own.
pub fn classify(factors: &[RiskFactor]) -> GateStatus {
    let count = |s: Severity| factors.iter().filter(|f| f.severity == s).count();
    let critical = count(Severity::Critical);
    let high = count(Severity::High);
    let medium = count(Severity::Medium);

    if critical > 0 || high >= 2 {
        GateStatus::HardBlock
    } else if high > 0 || medium >= 2 {
        GateStatus::SoftWarning
    } else {
        GateStatus::Pass
    }
}

/// Cumulative risk score in [0, 1]. Weights are summed, not averaged, so
/// several moderate risks compound.
pub fn risk_score(factors: &[RiskFactor]) -> f64 {
    let total: f64 = factors.iter().map(|f| f.severity.weight()).sum();
    (total / SCORE_SCALE).min(1.0)
}

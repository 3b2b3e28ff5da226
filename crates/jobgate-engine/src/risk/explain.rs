use jobgate_core::risk::RiskFactor;
use jobgate_core::types::GateStatus;

/// Factors listed in an explanation, taken in evaluator order.
pub const MAX_LISTED_FACTORS: usize = 3;

pub const FACTORS_HEADER: &str = "Key risk factors:";

pub fn headline(status: GateStatus) -> &'static str {
    match status {
        GateStatus::HardBlock => "🔴 Do not apply - this listing carries high risk",
        GateStatus::SoftWarning => "🟡 Evaluate carefully - this listing carries moderate risk",
        GateStatus::Pass => "✅ OK to apply - risk is within an acceptable range",
    }
}

pub fn recommended_action(status: GateStatus) -> &'static str {
    match status {
        GateStatus::HardBlock => "Recommended action: skip this listing",
        GateStatus::SoftWarning => "Recommended action: weigh the risks carefully before deciding",
        GateStatus::Pass => "Recommended action: continue with the normal application flow",
    }
}

/// Display lines for a gate result.
///
/// Layout: headline; when factors exist, a blank line, the header and up to
/// three bulleted descriptions; a blank line; the recommended action.
pub fn explanation(status: GateStatus, factors: &[RiskFactor]) -> Vec<String> {
    let mut lines = vec![headline(status).to_string()];

    if !factors.is_empty() {
        lines.push(String::new());
        lines.push(FACTORS_HEADER.to_string());
        lines.extend(
            factors
                .iter()
                .take(MAX_LISTED_FACTORS)
                .map(|f| format!("• {}", f.description)),
        );
    }

    lines.push(String::new());
    lines.push(recommended_action(status).to_string());
    lines
}

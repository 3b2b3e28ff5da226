//! Prose fragments for presenting a decision. Each fragment is keyed to one
//! input condition; callers decide how to join them.

use jobgate_core::record::DecisionRecord;
use jobgate_core::risk::RiskGateResult;
use jobgate_core::types::{Consensus, DecisionOutcome, GateStatus};

use super::consensus::SignalAnalysis;

/// Ordered summary lines: decision, consensus, gate status (when not a pass),
/// then the decider's reasoning.
pub fn decision_summary(record: &DecisionRecord, analysis: &SignalAnalysis) -> Vec<String> {
    let decision = &record.decision;
    let mut lines = vec![
        format!(
            "Decision: {} (confidence: {}%)",
            decision.outcome.label(),
            decision.confidence.percent()
        ),
        format!("Team consensus: {}", analysis.consensus.label()),
    ];

    let gate = record.context.risk_assessment.gate_status;
    if gate != GateStatus::Pass {
        lines.push(format!("Risk gate status: {}", gate.label()));
    }

    lines.push(format!("Key consideration: {}", decision.reasoning));
    lines
}

/// Opening phrases a decider can complete when writing their reasoning.
pub fn reasoning_templates(
    risk: &RiskGateResult,
    analysis: &SignalAnalysis,
    outcome: DecisionOutcome,
) -> Vec<String> {
    let mut templates = Vec::new();

    match (risk.gate_status, outcome) {
        (GateStatus::HardBlock, DecisionOutcome::Proceed) => templates
            .push("Although the risk gate flagged high risk, the team assessed that...".into()),
        (GateStatus::Pass, DecisionOutcome::Skip) => templates
            .push("Although the risk is manageable, for strategic reasons...".into()),
        _ => {}
    }

    match analysis.consensus {
        Consensus::StrongAgreement => templates.push("The team agrees unanimously that...".into()),
        Consensus::Split => {
            templates.push("Team opinions were divided; the final call was based on...".into())
        }
        Consensus::Majority | Consensus::NoConsensus => {}
    }

    let critical = risk.critical_categories();
    if !critical.is_empty() {
        let names: Vec<&str> = critical.iter().map(|c| c.label()).collect();
        templates.push(format!(
            "Considering the critical risk factors ({})...",
            names.join(", ")
        ));
    }

    templates
}

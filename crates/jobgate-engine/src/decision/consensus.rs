use serde::{Deserialize, Serialize};
use tracing::debug;

use jobgate_core::errors::{JobGateError, Result};
use jobgate_core::signal::ParticipantSignal;
use jobgate_core::types::{Consensus, SignalType};

/// Distribution of reviewer signals and the resulting consensus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalAnalysis {
    pub recommend: usize,
    pub caution: usize,
    pub reject: usize,
    pub total: usize,
    pub consensus: Consensus,
    /// The signal type holding the largest share, when no other type ties it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant: Option<SignalType>,
}

impl SignalAnalysis {
    pub fn count(&self, signal: SignalType) -> usize {
        match signal {
            SignalType::Recommend => self.recommend,
            SignalType::Caution => self.caution,
            SignalType::Reject => self.reject,
        }
    }
}

/// Classify by the largest category's share of all signals.
///
/// Shares are compared as integer ratios so 4 of 5 lands exactly on the
/// 0.8 boundary.
fn classify(max: usize, total: usize) -> Consensus {
    if max * 10 >= total * 8 {
        Consensus::StrongAgreement
    } else if max * 10 >= total * 6 {
        Consensus::Majority
    } else if max * 10 >= total * 4 {
        Consensus::Split
    } else {
        Consensus::NoConsensus
    }
}

/// Count signals by type and classify agreement.
///
/// An empty slice has no meaningful share and is rejected as invalid input.
pub fn analyze_signals(signals: &[ParticipantSignal]) -> Result<SignalAnalysis> {
    if signals.is_empty() {
        return Err(JobGateError::invalid_input(
            "consensus requires at least one participant signal",
        ));
    }

    let count = |t: SignalType| signals.iter().filter(|s| s.signal == t).count();
    let recommend = count(SignalType::Recommend);
    let caution = count(SignalType::Caution);
    let reject = count(SignalType::Reject);
    let total = signals.len();

    let tallies = [
        (SignalType::Recommend, recommend),
        (SignalType::Caution, caution),
        (SignalType::Reject, reject),
    ];
    let max = recommend.max(caution).max(reject);
    let mut leaders = tallies.iter().filter(|(_, n)| *n == max);
    let dominant = match (leaders.next(), leaders.next()) {
        (Some((t, _)), None) => Some(*t),
        _ => None,
    };

    let consensus = classify(max, total);
    debug!(recommend, caution, reject, total, consensus = ?consensus, "signals analyzed");

    Ok(SignalAnalysis {
        recommend,
        caution,
        reject,
        total,
        consensus,
        dominant,
    })
}

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{JobGateError, Result};

/// Thresholds and keyword lists for the risk gate.
///
/// Every field has a default; a JSON document only needs to name the fields
/// it overrides. Keyword matching is case-insensitive substring containment
/// against the job title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskGateConfig {
    pub hard_block: HardBlockThresholds,
    pub soft_warning: SoftWarningThresholds,

    /// Effective hourly rate (TWD) below which pay is flagged as too low.
    pub min_hourly_rate: f64,
    /// Effective hourly rate (TWD) above which pay is flagged as suspicious.
    pub max_hourly_rate: f64,
    /// Listings older than this are flagged as possibly stale.
    pub stale_after_days: u32,

    pub fraud_signals: Vec<String>,
    pub urgent_keywords: Vec<String>,
    pub vague_scope_keywords: Vec<String>,
    pub deliverable_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardBlockThresholds {
    pub max_applicants: u32,
    pub min_description_length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftWarningThresholds {
    pub max_applicants: u32,
    pub min_description_length: usize,
    pub budget_variance_ratio: f64,
}

impl Default for HardBlockThresholds {
    fn default() -> Self {
        Self {
            max_applicants: 50,
            min_description_length: 100,
        }
    }
}

impl Default for SoftWarningThresholds {
    fn default() -> Self {
        Self {
            max_applicants: 20,
            min_description_length: 200,
            budget_variance_ratio: 2.0,
        }
    }
}

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

impl Default for RiskGateConfig {
    fn default() -> Self {
        Self {
            hard_block: HardBlockThresholds::default(),
            soft_warning: SoftWarningThresholds::default(),
            min_hourly_rate: 500.0,
            max_hourly_rate: 5000.0,
            stale_after_days: 30,
            fraud_signals: phrases(&[
                "test project",
                "urgent payment",
                "pay first",
                "advance payment",
                "no experience required",
                "easy money",
            ]),
            urgent_keywords: phrases(&[
                "urgent",
                "asap",
                "rush",
                "immediately",
                "emergency",
                "急件",
                "緊急",
                "火速",
            ]),
            vague_scope_keywords: phrases(&[
                "undefined scope",
                "flexible requirements",
                "we will decide later",
                "simple project",
                "quick job",
                "簡單項目",
                "範圍不明",
                "彈性需求",
            ]),
            deliverable_keywords: phrases(&["交付", "deliverable", "outcome", "result"]),
        }
    }
}

impl RiskGateConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Check that thresholds are usable. Called by the engine constructor so
    /// a bad configuration never reaches evaluation.
    pub fn validate(&self) -> Result<()> {
        let hb = &self.hard_block;
        let sw = &self.soft_warning;

        if hb.max_applicants == 0 || sw.max_applicants == 0 {
            return Err(JobGateError::configuration(
                "max_applicants thresholds must be positive",
            ));
        }
        if sw.max_applicants > hb.max_applicants {
            return Err(JobGateError::configuration(format!(
                "soft_warning.max_applicants ({}) exceeds hard_block.max_applicants ({})",
                sw.max_applicants, hb.max_applicants
            )));
        }
        if hb.min_description_length == 0 || sw.min_description_length == 0 {
            return Err(JobGateError::configuration(
                "min_description_length thresholds must be positive",
            ));
        }
        if sw.min_description_length < hb.min_description_length {
            return Err(JobGateError::configuration(format!(
                "soft_warning.min_description_length ({}) is below hard_block.min_description_length ({})",
                sw.min_description_length, hb.min_description_length
            )));
        }
        if !(sw.budget_variance_ratio.is_finite() && sw.budget_variance_ratio > 0.0) {
            return Err(JobGateError::configuration(format!(
                "budget_variance_ratio must be a positive number, got {}",
                sw.budget_variance_ratio
            )));
        }
        if !(self.min_hourly_rate.is_finite()
            && self.max_hourly_rate.is_finite()
            && self.min_hourly_rate > 0.0
            && self.min_hourly_rate < self.max_hourly_rate)
        {
            return Err(JobGateError::configuration(format!(
                "hourly rate bounds must satisfy 0 < min < max, got {} / {}",
                self.min_hourly_rate, self.max_hourly_rate
            )));
        }
        if self.stale_after_days == 0 {
            return Err(JobGateError::configuration(
                "stale_after_days must be positive",
            ));
        }

        for (name, list) in [
            ("fraud_signals", &self.fraud_signals),
            ("urgent_keywords", &self.urgent_keywords),
            ("vague_scope_keywords", &self.vague_scope_keywords),
            ("deliverable_keywords", &self.deliverable_keywords),
        ] {
            if list.iter().any(|k| k.trim().is_empty()) {
                return Err(JobGateError::configuration(format!(
                    "{name} contains an empty phrase"
                )));
            }
        }

        Ok(())
    }
}

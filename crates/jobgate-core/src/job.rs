use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{JobGateError, Result};

/// A freelance listing under evaluation, as populated by ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub source_key: String,
    pub title: String,

    #[serde(default)]
    pub url: String,

    /// ISO-8601 / RFC 3339 posting timestamp.
    pub posted_at: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub skills: BTreeSet<String>,

    #[serde(default)]
    pub remote: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicants_min: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicants_max: Option<u32>,

    /// Effective hourly rate in TWD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ehr_twd: Option<f64>,

    /// Attractiveness score (0-100). Not read by the risk gate.
    #[serde(default)]
    pub score: f64,

    #[serde(default)]
    pub breakdown: ScoreBreakdown,

    #[serde(default)]
    pub reasons_top: Vec<String>,

    #[serde(default)]
    pub reasons_positive: Vec<String>,

    #[serde(default)]
    pub reasons_negative: Vec<String>,

    /// Timestamp of the exchange rate used to compute `ehr_twd`.
    #[serde(default)]
    pub fx_as_of: String,
}

/// Components of the upstream attractiveness score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(default, alias = "P")]
    pub reward: f64,
    #[serde(default, alias = "Fit")]
    pub fit: f64,
    #[serde(default, alias = "Q")]
    pub quality: f64,
    #[serde(default, alias = "R")]
    pub risk: f64,
    #[serde(default, alias = "Comp")]
    pub competition: f64,
}

impl Job {
    /// Parse `posted_at` into UTC.
    pub fn posted_at_utc(&self) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.posted_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                JobGateError::invalid_input(format!(
                    "job {}: unparseable posted_at '{}': {e}",
                    self.id, self.posted_at
                ))
            })
    }

    /// Both applicant bounds, when the source reported a full range.
    pub fn applicant_range(&self) -> Option<(u32, u32)> {
        match (self.applicants_min, self.applicants_max) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    /// Midpoint of the applicant range.
    pub fn applicants_mid(&self) -> Option<f64> {
        self.applicant_range()
            .map(|(min, max)| (f64::from(min) + f64::from(max)) / 2.0)
    }

    /// Title length in Unicode scalar values.
    pub fn title_len(&self) -> usize {
        self.title.chars().count()
    }

    /// Reject structurally malformed data. Absent optional fields are fine.
    pub fn validate(&self) -> Result<()> {
        self.posted_at_utc()?;

        if let Some((min, max)) = self.applicant_range() {
            if min > max {
                return Err(JobGateError::invalid_input(format!(
                    "job {}: applicants_min ({min}) exceeds applicants_max ({max})",
                    self.id
                )));
            }
        }

        if let Some(rate) = self.ehr_twd {
            if !rate.is_finite() || rate < 0.0 {
                return Err(JobGateError::invalid_input(format!(
                    "job {}: ehr_twd must be a non-negative number, got {rate}",
                    self.id
                )));
            }
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::job;
    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let mut j = job("t");
        j.posted_at = "2026-10-10T17:00:00+08:00".into();
        let at = j.posted_at_utc().unwrap();
        assert_eq!(at.to_rfc3339(), "2026-10-10T09:00:00+00:00");
    }

    #[test]
    fn unparseable_timestamp_is_invalid_input() {
        let mut j = job("t");
        j.posted_at = "last tuesday".into();
        assert!(matches!(
            j.posted_at_utc(),
            Err(JobGateError::InvalidInput(_))
        ));
        assert!(j.validate().is_err());
    }

    #[test]
    fn midpoint_requires_both_bounds() {
        let mut j = job("t");
        j.applicants_min = Some(10);
        assert_eq!(j.applicants_mid(), None);
        j.applicants_max = Some(15);
        assert_eq!(j.applicants_mid(), Some(12.5));
    }

    #[test]
    fn inverted_range_rejected() {
        let mut j = job("t");
        j.applicants_min = Some(30);
        j.applicants_max = Some(10);
        assert!(matches!(j.validate(), Err(JobGateError::InvalidInput(_))));
    }

    #[test]
    fn negative_rate_rejected() {
        let mut j = job("t");
        j.ehr_twd = Some(-1.0);
        assert!(j.validate().is_err());
        j.ehr_twd = Some(f64::NAN);
        assert!(j.validate().is_err());
        j.ehr_twd = Some(0.0);
        assert!(j.validate().is_ok());
    }

    #[test]
    fn title_len_counts_chars_not_bytes() {
        let j = job("緊急網站");
        assert_eq!(j.title_len(), 4);
    }

    #[test]
    fn deserializes_minimal_listing_with_upstream_breakdown_keys() {
        let j: Job = serde_json::from_str(
            r#"{
                "id": "j9",
                "source_key": "yourator",
                "title": "Build a dashboard",
                "posted_at": "2026-10-01T00:00:00Z",
                "breakdown": {"P": 0.7, "Fit": 0.9, "Q": 0.5, "R": 0.2, "Comp": 0.4}
            }"#,
        )
        .unwrap();
        assert!(j.skills.is_empty());
        assert_eq!(j.applicant_range(), None);
        assert_eq!(j.breakdown.fit, 0.9);
        assert_eq!(j.breakdown.competition, 0.4);
    }
}

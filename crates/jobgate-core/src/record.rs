use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ulid::Ulid;

use crate::errors::JobGateError;
use crate::risk::RiskGateResult;
use crate::signal::ParticipantSignal;
use crate::types::{DecisionOutcome, UnitFloat};

/// Internal, collision-free identifier of a decision record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(Ulid);

impl RecordId {
    /// Id whose timestamp component is `at`, truncated to milliseconds.
    pub fn at(at: DateTime<Utc>) -> Self {
        Self(Ulid::from_datetime(at.into()))
    }

    /// Creation instant encoded in the id.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.0.datetime())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecordId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Human-facing decision number, rendered `DR-<year>-<NNN>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecisionId {
    pub year: i32,
    pub sequence: u32,
}

impl DecisionId {
    pub fn new(year: i32, sequence: u32) -> Self {
        Self { year, sequence }
    }
}

impl fmt::Display for DecisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DR-{}-{:03}", self.year, self.sequence)
    }
}

impl FromStr for DecisionId {
    type Err = JobGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || JobGateError::invalid_input(format!("malformed decision id '{s}'"));
        let rest = s.strip_prefix("DR-").ok_or_else(bad)?;
        let (year, seq) = rest.split_once('-').ok_or_else(bad)?;
        if year.len() != 4 || seq.len() < 3 {
            return Err(bad());
        }
        let year = year.parse().map_err(|_| bad())?;
        let sequence = seq.parse().map_err(|_| bad())?;
        Ok(Self { year, sequence })
    }
}

impl Serialize for DecisionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DecisionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Snapshot of what the team saw when deciding. Frozen at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionContext {
    pub job_title: String,
    pub budget: String,
    pub timeline: String,
    pub risk_assessment: RiskGateResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub outcome: DecisionOutcome,
    pub confidence: UnitFloat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<String>>,
    pub decided_by: String,
    pub reasoning: String,
}

/// Retrospective attached after the job played out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    pub review_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_outcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lessons_learned: Option<String>,
}

/// Durable, auditable outcome of a team decision on one listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub id: RecordId,
    pub decision_id: DecisionId,
    pub job_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub context: DecisionContext,
    /// SHA-256 over the canonical JSON of `context`, taken at creation.
    pub context_digest: String,
    pub participants: Vec<ParticipantSignal>,
    pub decision: Decision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<FollowUp>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

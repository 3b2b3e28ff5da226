use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ReasoningCategory, SignalType, TeamRole, UnitFloat};

/// One reviewer's judgment on a listing. Never mutated after submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSignal {
    pub user_id: String,
    pub role: TeamRole,
    pub signal: SignalType,
    pub reasoning: SignalReasoning,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReasoning {
    pub category: ReasoningCategory,
    pub details: String,
    pub confidence: UnitFloat,
}

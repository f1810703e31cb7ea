use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Join of seeker x posting. Unique per pair (schema constraint); created
/// once by the seeker, status mutated only by the owning employer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplication {
    pub id: Uuid,
    pub job_posting_id: Uuid,
    pub job_seeker_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Submitted,
    Viewed,
    InProgress,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// The fixed label set, in dashboard display order.
    pub const ALL: [ApplicationStatus; 5] = [
        Self::Submitted,
        Self::Viewed,
        Self::InProgress,
        Self::Accepted,
        Self::Rejected,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "submitted" => Some(Self::Submitted),
            "viewed" => Some(Self::Viewed),
            "in_progress" => Some(Self::InProgress),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Viewed => "viewed",
            Self::InProgress => "in_progress",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

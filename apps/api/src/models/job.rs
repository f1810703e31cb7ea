use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Employer-authored job listing. Status transitions gate visibility:
/// only `published` postings are served to non-owners.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPosting {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub company_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub employment_type: String,
    pub work_location_type: String,
    pub experience_level: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub salary_range_min: Option<i64>,
    pub salary_range_max: Option<i64>,
    pub featured: bool,
    pub status: String,
    pub applications_count: i32,
    pub views_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Posting lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Draft,
    Published,
    Paused,
    Closed,
}

impl JobStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "paused" => Some(Self::Paused),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Paused => "paused",
            Self::Closed => "closed",
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Scored (seeker, posting) pairing produced by an external process.
/// This API reads them and flips the viewed/clicked flags only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRecommendation {
    pub id: Uuid,
    pub job_seeker_id: Uuid,
    pub job_posting_id: Uuid,
    pub recommendation_score: f64,
    pub is_viewed: bool,
    pub is_clicked: bool,
    pub created_at: DateTime<Utc>,
}

//! Recommendations are produced by an external process; this API reads them
//! for the owning seeker and flips the viewed/clicked flags.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::extract::SeekerUser;
use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::models::recommendation::JobRecommendation;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecommendationWithJob {
    pub recommendation_id: Uuid,
    pub recommendation_score: f64,
    pub is_viewed: bool,
    pub is_clicked: bool,
    pub recommended_at: chrono::DateTime<chrono::Utc>,
    #[sqlx(flatten)]
    pub job: JobPosting,
}

/// GET /api/v1/recommendations
/// Highest score first, then newest, capped at 20.
pub async fn handle_list(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
) -> Result<Json<Vec<RecommendationWithJob>>, AppError> {
    let recommendations: Vec<RecommendationWithJob> = sqlx::query_as(
        "SELECT r.id AS recommendation_id, r.recommendation_score, r.is_viewed,
                r.is_clicked, r.created_at AS recommended_at, p.*
         FROM job_recommendations r
         JOIN job_postings p ON p.id = r.job_posting_id
         WHERE r.job_seeker_id = $1 AND p.status = 'published'
         ORDER BY r.recommendation_score DESC, r.created_at DESC
         LIMIT 20",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(recommendations))
}

/// POST /api/v1/recommendations/:id/viewed
pub async fn handle_mark_viewed(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRecommendation>, AppError> {
    flip_flag(&state, user.id, id, Flag::Viewed).await
}

/// POST /api/v1/recommendations/:id/clicked
pub async fn handle_mark_clicked(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRecommendation>, AppError> {
    flip_flag(&state, user.id, id, Flag::Clicked).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Viewed,
    Clicked,
}

impl Flag {
    /// A click implies the recommendation was seen; marking viewed touches
    /// only its own column. Each column is assigned at most once.
    fn set_clause(self) -> &'static str {
        match self {
            Flag::Viewed => "is_viewed = TRUE",
            Flag::Clicked => "is_clicked = TRUE, is_viewed = TRUE",
        }
    }
}

async fn flip_flag(
    state: &AppState,
    seeker_id: Uuid,
    recommendation_id: Uuid,
    flag: Flag,
) -> Result<Json<JobRecommendation>, AppError> {
    let sql = format!(
        "UPDATE job_recommendations SET {}
         WHERE id = $1 AND job_seeker_id = $2
         RETURNING *",
        flag.set_clause()
    );
    let updated: Option<JobRecommendation> = sqlx::query_as(&sql)
        .bind(recommendation_id)
        .bind(seeker_id)
        .fetch_optional(&state.db)
        .await?;

    updated.map(Json).ok_or_else(|| {
        AppError::NotFound(format!("Recommendation {recommendation_id} not found"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Postgres rejects an UPDATE that assigns the same column twice, so the
    // viewed clause must name is_viewed exactly once.
    #[test]
    fn test_viewed_clause_assigns_each_column_once() {
        let clause = Flag::Viewed.set_clause();
        assert_eq!(clause.matches("is_viewed").count(), 1);
        assert!(!clause.contains("is_clicked"));
    }

    #[test]
    fn test_clicked_clause_implies_viewed_without_duplicates() {
        let clause = Flag::Clicked.set_clause();
        assert_eq!(clause.matches("is_clicked").count(), 1);
        assert_eq!(clause.matches("is_viewed").count(), 1);
    }
}

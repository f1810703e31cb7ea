//! Saved jobs: an idempotent per-seeker toggle over published postings.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::extract::SeekerUser;
use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::state::AppState;

/// PUT /api/v1/jobs/:id/save
/// Saving twice is a no-op; both calls answer 204.
pub async fn handle_save(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let exists: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM job_postings WHERE id = $1 AND status = 'published'")
            .bind(job_id)
            .fetch_optional(&state.db)
            .await?;
    if exists.is_none() {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    sqlx::query(
        "INSERT INTO saved_jobs (job_posting_id, job_seeker_id)
         VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(job_id)
    .bind(user.id)
    .execute(&state.db)
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/jobs/:id/save
/// Unsaving an unsaved job is equally a no-op.
pub async fn handle_unsave(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    sqlx::query("DELETE FROM saved_jobs WHERE job_posting_id = $1 AND job_seeker_id = $2")
        .bind(job_id)
        .bind(user.id)
        .execute(&state.db)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SavedJobRow {
    pub saved_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub job: JobPosting,
}

/// GET /api/v1/saved-jobs
/// Most recently saved first.
pub async fn handle_list(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
) -> Result<Json<Vec<SavedJobRow>>, AppError> {
    let saved: Vec<SavedJobRow> = sqlx::query_as(
        "SELECT s.created_at AS saved_at, p.*
         FROM saved_jobs s
         JOIN job_postings p ON p.id = s.job_posting_id
         WHERE s.job_seeker_id = $1
         ORDER BY s.created_at DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(saved))
}

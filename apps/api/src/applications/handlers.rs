use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::extract::{EmployerUser, SeekerUser};
use crate::auth::handlers::fetch_profile;
use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, JobApplication};
use crate::notifications::fan_out;
use crate::state::AppState;

/// The application row and the posting counter move in one statement, so a
/// rejected insert (duplicate apply) never bumps the counter and a bump
/// never happens without its row.
const APPLY_SQL: &str = "WITH application AS (
         INSERT INTO job_applications (job_posting_id, job_seeker_id)
         VALUES ($1, $2)
         RETURNING *
     ), counter AS (
         UPDATE job_postings
         SET applications_count = applications_count + 1
         WHERE id = $1
     )
     SELECT * FROM application";

/// POST /api/v1/jobs/:id/apply
/// The (seeker, posting) uniqueness lives in the schema; a second apply
/// surfaces as a conflict. A successful apply bumps the posting counter and
/// notifies the employer.
pub async fn handle_apply(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobApplication>, AppError> {
    #[derive(FromRow)]
    struct PostingTarget {
        employer_id: Uuid,
        title: String,
    }

    let posting: Option<PostingTarget> = sqlx::query_as(
        "SELECT employer_id, title FROM job_postings WHERE id = $1 AND status = 'published'",
    )
    .bind(job_id)
    .fetch_optional(&state.db)
    .await?;
    let posting = posting.ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let application: JobApplication = sqlx::query_as(APPLY_SQL)
        .bind(job_id)
        .bind(user.id)
        .fetch_one(&state.db)
        .await
        .map_err(|e| AppError::on_unique_violation(e, "You have already applied to this job"))?;

    let applicant_name = fetch_profile(&state, user.id)
        .await
        .map(|p| p.full_name)
        .unwrap_or_else(|_| "A candidate".to_string());
    fan_out(
        &state,
        posting.employer_id,
        "new_application",
        &format!("{applicant_name} applied to \"{}\"", posting.title),
        Some(&format!("/employer/jobs/{job_id}/applicants")),
    )
    .await;

    Ok(Json(application))
}

/// An application joined with its posting, for the seeker's list.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationWithJob {
    pub id: Uuid,
    pub job_posting_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub job_title: String,
    pub job_status: String,
}

/// GET /api/v1/applications
pub async fn handle_my_applications(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
) -> Result<Json<Vec<ApplicationWithJob>>, AppError> {
    let applications: Vec<ApplicationWithJob> = sqlx::query_as(
        "SELECT a.id, a.job_posting_id, a.status, a.created_at, a.updated_at,
                p.title AS job_title, p.status AS job_status
         FROM job_applications a
         JOIN job_postings p ON p.id = a.job_posting_id
         WHERE a.job_seeker_id = $1
         ORDER BY a.created_at DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(applications))
}

/// An application joined with its applicant, for the employer's list.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicantRow {
    pub id: Uuid,
    pub job_posting_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub applicant_id: Uuid,
    pub applicant_name: String,
    pub applicant_avatar: Option<String>,
}

/// GET /api/v1/employer/jobs/:id/applicants
/// Scoped to the owning employer by the join predicate.
pub async fn handle_applicants(
    State(state): State<AppState>,
    EmployerUser(user): EmployerUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicantRow>>, AppError> {
    let owns: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM job_postings WHERE id = $1 AND employer_id = $2")
            .bind(job_id)
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    if owns.is_none() {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    let applicants: Vec<ApplicantRow> = sqlx::query_as(
        "SELECT a.id, a.job_posting_id, a.status, a.created_at,
                pr.id AS applicant_id, pr.full_name AS applicant_name,
                pr.avatar_url AS applicant_avatar
         FROM job_applications a
         JOIN profiles pr ON pr.id = a.job_seeker_id
         WHERE a.job_posting_id = $1
         ORDER BY a.created_at DESC",
    )
    .bind(job_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(applicants))
}

#[derive(Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

/// PATCH /api/v1/applications/:id/status
/// Only the posting's employer may move an application through the
/// lifecycle; the seeker is notified of the change.
pub async fn handle_set_status(
    State(state): State<AppState>,
    EmployerUser(user): EmployerUser,
    Path(application_id): Path<Uuid>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<Json<JobApplication>, AppError> {
    let status = ApplicationStatus::parse(&req.status)
        .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", req.status)))?;

    #[derive(FromRow)]
    struct UpdatedApplication {
        #[sqlx(flatten)]
        application: JobApplication,
        job_title: String,
    }

    let updated: Option<UpdatedApplication> = sqlx::query_as(
        "UPDATE job_applications a
         SET status = $3, updated_at = now()
         FROM job_postings p
         WHERE a.id = $1 AND a.job_posting_id = p.id AND p.employer_id = $2
         RETURNING a.*, p.title AS job_title",
    )
    .bind(application_id)
    .bind(user.id)
    .bind(status.as_str())
    .fetch_optional(&state.db)
    .await?;
    let updated = updated
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))?;

    fan_out(
        &state,
        updated.application.job_seeker_id,
        "application_status_change",
        &format!(
            "Your application for \"{}\" is now {}",
            updated.job_title,
            status.as_str()
        ),
        Some("/applications"),
    )
    .await;

    Ok(Json(updated.application))
}

/// A row of the employer's recent-applicants feed.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecentApplicant {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub job_posting_id: Uuid,
    pub job_title: String,
    pub applicant_id: Uuid,
    pub applicant_name: String,
    pub applicant_avatar: Option<String>,
}

/// GET /api/v1/employer/recent-applicants
/// The five newest applications across all of the employer's postings.
pub async fn handle_recent_applicants(
    State(state): State<AppState>,
    EmployerUser(user): EmployerUser,
) -> Result<Json<Vec<RecentApplicant>>, AppError> {
    Ok(Json(recent_applicants_for(&state, user.id).await?))
}

/// Shared with the employer dashboard.
pub async fn recent_applicants_for(
    state: &AppState,
    employer_id: Uuid,
) -> Result<Vec<RecentApplicant>, AppError> {
    let recent: Vec<RecentApplicant> = sqlx::query_as(
        "SELECT a.id, a.created_at, a.job_posting_id, p.title AS job_title,
                pr.id AS applicant_id, pr.full_name AS applicant_name,
                pr.avatar_url AS applicant_avatar
         FROM job_applications a
         JOIN job_postings p ON p.id = a.job_posting_id
         JOIN profiles pr ON pr.id = a.job_seeker_id
         WHERE p.employer_id = $1
         ORDER BY a.created_at DESC
         LIMIT 5",
    )
    .bind(employer_id)
    .fetch_all(&state.db)
    .await?;
    Ok(recent)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The insert and the counter bump must share one statement; two
    // statements can leave the counter drifting if the second fails.
    #[test]
    fn test_apply_writes_row_and_counter_in_one_statement() {
        assert!(!APPLY_SQL.contains(';'));
        assert!(APPLY_SQL.contains("INSERT INTO job_applications"));
        assert!(APPLY_SQL.contains("applications_count = applications_count + 1"));
        assert!(APPLY_SQL.trim_start().starts_with("WITH"));
    }
}

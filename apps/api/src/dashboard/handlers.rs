use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::applications::handlers::{recent_applicants_for, RecentApplicant};
use crate::auth::extract::{EmployerUser, SeekerUser};
use crate::dashboard::aggregate::{
    applications_over_time, employer_totals, status_chart, DayBucket, EmployerTotals, StatusCount,
    CHART_WINDOW_DAYS,
};
use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::profile::completion::completion_score;
use crate::profile::handlers::load_full_seeker;
use crate::state::AppState;

#[derive(Serialize)]
pub struct EmployerDashboardResponse {
    pub totals: EmployerTotals,
    pub applications_over_time: Vec<DayBucket>,
    pub recent_applicants: Vec<RecentApplicant>,
    pub jobs: Vec<JobPosting>,
}

/// GET /api/v1/employer/dashboard
pub async fn handle_employer(
    State(state): State<AppState>,
    EmployerUser(user): EmployerUser,
) -> Result<Json<EmployerDashboardResponse>, AppError> {
    let jobs: Vec<JobPosting> = sqlx::query_as(
        "SELECT * FROM job_postings WHERE employer_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    let totals = employer_totals(&jobs);

    let window_applications: Vec<(DateTime<Utc>,)> = sqlx::query_as(
        "SELECT a.created_at
         FROM job_applications a
         JOIN job_postings p ON p.id = a.job_posting_id
         WHERE p.employer_id = $1
           AND a.created_at >= now() - make_interval(days => $2)",
    )
    .bind(user.id)
    .bind(CHART_WINDOW_DAYS as i32)
    .fetch_all(&state.db)
    .await?;
    let created: Vec<DateTime<Utc>> = window_applications.into_iter().map(|(ts,)| ts).collect();

    let recent_applicants = recent_applicants_for(&state, user.id).await?;

    Ok(Json(EmployerDashboardResponse {
        totals,
        applications_over_time: applications_over_time(&created, Utc::now().date_naive()),
        recent_applicants,
        jobs,
    }))
}

#[derive(Serialize)]
pub struct SeekerDashboardResponse {
    pub total_applications: i64,
    pub saved_jobs: i64,
    pub new_recommendations: i64,
    pub completion: u32,
    pub status_chart: Vec<StatusCount>,
}

/// GET /api/v1/job-seeker/dashboard
pub async fn handle_seeker(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
) -> Result<Json<SeekerDashboardResponse>, AppError> {
    let statuses: Vec<(String,)> =
        sqlx::query_as("SELECT status FROM job_applications WHERE job_seeker_id = $1")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;
    let statuses: Vec<String> = statuses.into_iter().map(|(s,)| s).collect();

    let saved_jobs: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM saved_jobs WHERE job_seeker_id = $1")
            .bind(user.id)
            .fetch_one(&state.db)
            .await?;

    let new_recommendations: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM job_recommendations
         WHERE job_seeker_id = $1 AND is_viewed = FALSE",
    )
    .bind(user.id)
    .fetch_one(&state.db)
    .await?;

    let full = load_full_seeker(&state, user.id).await?;

    Ok(Json(SeekerDashboardResponse {
        total_applications: statuses.len() as i64,
        saved_jobs,
        new_recommendations,
        completion: completion_score(&full),
        status_chart: status_chart(&statuses),
    }))
}

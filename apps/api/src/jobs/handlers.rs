use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extract::{EmployerUser, MaybeUser};
use crate::errors::AppError;
use crate::jobs::filters::JobFilters;
use crate::models::job::{JobPosting, JobStatus};
use crate::state::AppState;

#[derive(Serialize)]
pub struct JobListResponse {
    pub items: Vec<JobPosting>,
    pub total_count: i64,
}

/// GET /api/v1/jobs
/// Public listing: published only, filtered, featured-first then newest,
/// one page. Backend failures surface as the generic error body with an
/// empty result left to the client.
pub async fn handle_list(
    State(state): State<AppState>,
    Query(filters): Query<JobFilters>,
) -> Result<Json<JobListResponse>, AppError> {
    let items: Vec<JobPosting> = filters
        .list_query()
        .build_query_as()
        .fetch_all(&state.db)
        .await?;

    let total_count: i64 = filters
        .count_query()
        .build_query_scalar()
        .fetch_one(&state.db)
        .await?;

    Ok(Json(JobListResponse { items, total_count }))
}

/// GET /api/v1/jobs/:id
/// A non-published posting is visible only to its employer. Every view by
/// someone other than the owner bumps the view counter.
pub async fn handle_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    MaybeUser(user): MaybeUser,
) -> Result<Json<JobPosting>, AppError> {
    let posting: Option<JobPosting> = sqlx::query_as("SELECT * FROM job_postings WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    let posting = posting.ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    let is_owner = user.as_ref().is_some_and(|u| u.id == posting.employer_id);
    if posting.status != "published" && !is_owner {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }

    if !is_owner {
        let posting: JobPosting = sqlx::query_as(
            "UPDATE job_postings SET views_count = views_count + 1 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&state.db)
        .await?;
        return Ok(Json(posting));
    }

    Ok(Json(posting))
}

/// GET /api/v1/jobs/:id/similar
/// Same industry or employment type, capped at 3.
pub async fn handle_similar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    let similar: Vec<JobPosting> = sqlx::query_as(
        "SELECT other.* FROM job_postings other
         JOIN job_postings base ON base.id = $1
         WHERE other.id <> base.id
           AND other.status = 'published'
           AND (other.industry = base.industry
                OR other.employment_type = base.employment_type)
         ORDER BY other.featured DESC, other.created_at DESC
         LIMIT 3",
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(similar))
}

#[derive(Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub employment_type: String,
    pub work_location_type: String,
    pub experience_level: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub salary_range_min: Option<i64>,
    pub salary_range_max: Option<i64>,
    pub company_id: Option<Uuid>,
    pub status: Option<String>,
}

/// POST /api/v1/employer/jobs
pub async fn handle_create(
    State(state): State<AppState>,
    EmployerUser(user): EmployerUser,
    Json(req): Json<CreateJobRequest>,
) -> Result<Json<JobPosting>, AppError> {
    if req.title.trim().is_empty() || req.description.trim().is_empty() {
        return Err(AppError::Validation(
            "Title and description are required".to_string(),
        ));
    }
    let status = match &req.status {
        Some(s) => JobStatus::parse(s)
            .ok_or_else(|| AppError::Validation(format!("Unknown status '{s}'")))?,
        None => JobStatus::Draft,
    };
    if let (Some(min), Some(max)) = (req.salary_range_min, req.salary_range_max) {
        if min > max {
            return Err(AppError::Validation(
                "salary_range_min cannot exceed salary_range_max".to_string(),
            ));
        }
    }

    let posting: JobPosting = sqlx::query_as(
        "INSERT INTO job_postings
            (employer_id, company_id, title, description, employment_type,
             work_location_type, experience_level, industry, location,
             salary_range_min, salary_range_max, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
         RETURNING *",
    )
    .bind(user.id)
    .bind(req.company_id)
    .bind(req.title.trim())
    .bind(req.description.trim())
    .bind(&req.employment_type)
    .bind(&req.work_location_type)
    .bind(&req.experience_level)
    .bind(&req.industry)
    .bind(&req.location)
    .bind(req.salary_range_min)
    .bind(req.salary_range_max)
    .bind(status.as_str())
    .fetch_one(&state.db)
    .await?;

    Ok(Json(posting))
}

#[derive(Deserialize)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub employment_type: Option<String>,
    pub work_location_type: Option<String>,
    pub experience_level: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub salary_range_min: Option<i64>,
    pub salary_range_max: Option<i64>,
    pub featured: Option<bool>,
    pub status: Option<String>,
}

/// PATCH /api/v1/employer/jobs/:id
/// Partial edit, including the status transitions
/// (draft/published/paused/closed) that gate seeker visibility.
pub async fn handle_update(
    State(state): State<AppState>,
    EmployerUser(user): EmployerUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateJobRequest>,
) -> Result<Json<JobPosting>, AppError> {
    if let Some(s) = &req.status {
        JobStatus::parse(s).ok_or_else(|| AppError::Validation(format!("Unknown status '{s}'")))?;
    }

    let posting: Option<JobPosting> = sqlx::query_as(
        "UPDATE job_postings
         SET title = COALESCE($3, title),
             description = COALESCE($4, description),
             employment_type = COALESCE($5, employment_type),
             work_location_type = COALESCE($6, work_location_type),
             experience_level = COALESCE($7, experience_level),
             industry = COALESCE($8, industry),
             location = COALESCE($9, location),
             salary_range_min = COALESCE($10, salary_range_min),
             salary_range_max = COALESCE($11, salary_range_max),
             featured = COALESCE($12, featured),
             status = COALESCE($13, status),
             updated_at = now()
         WHERE id = $1 AND employer_id = $2
         RETURNING *",
    )
    .bind(id)
    .bind(user.id)
    .bind(req.title.as_deref().map(str::trim))
    .bind(req.description.as_deref().map(str::trim))
    .bind(&req.employment_type)
    .bind(&req.work_location_type)
    .bind(&req.experience_level)
    .bind(&req.industry)
    .bind(&req.location)
    .bind(req.salary_range_min)
    .bind(req.salary_range_max)
    .bind(req.featured)
    .bind(&req.status)
    .fetch_optional(&state.db)
    .await?;

    posting
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// GET /api/v1/employer/jobs
/// The employer's own postings, every status, newest first.
pub async fn handle_employer_list(
    State(state): State<AppState>,
    EmployerUser(user): EmployerUser,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    let postings: Vec<JobPosting> = sqlx::query_as(
        "SELECT * FROM job_postings WHERE employer_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(postings))
}

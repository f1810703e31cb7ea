use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::company::Company;
use crate::models::job::JobPosting;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CompanyFilters {
    pub search: Option<String>,
}

/// GET /api/v1/companies
pub async fn handle_list(
    State(state): State<AppState>,
    Query(filters): Query<CompanyFilters>,
) -> Result<Json<Vec<Company>>, AppError> {
    let companies: Vec<Company> = match filters.search.as_deref().map(str::trim) {
        Some(search) if !search.is_empty() => {
            sqlx::query_as(
                "SELECT * FROM companies
                 WHERE name ILIKE $1 OR industry ILIKE $1
                 ORDER BY name
                 LIMIT 50",
            )
            .bind(format!("%{search}%"))
            .fetch_all(&state.db)
            .await?
        }
        _ => {
            sqlx::query_as("SELECT * FROM companies ORDER BY name LIMIT 50")
                .fetch_all(&state.db)
                .await?
        }
    };
    Ok(Json(companies))
}

#[derive(Serialize)]
pub struct CompanyDetailResponse {
    pub company: Company,
    pub open_postings: Vec<JobPosting>,
}

/// GET /api/v1/companies/:id
/// The company record with its currently published postings.
pub async fn handle_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyDetailResponse>, AppError> {
    let company: Option<Company> = sqlx::query_as("SELECT * FROM companies WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    let company = company.ok_or_else(|| AppError::NotFound(format!("Company {id} not found")))?;

    let open_postings: Vec<JobPosting> = sqlx::query_as(
        "SELECT * FROM job_postings
         WHERE company_id = $1 AND status = 'published'
         ORDER BY featured DESC, created_at DESC",
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(CompanyDetailResponse {
        company,
        open_postings,
    }))
}

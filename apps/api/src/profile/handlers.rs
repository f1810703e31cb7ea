use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extract::{AuthUser, EmployerUser, SeekerUser};
use crate::auth::gate::Role;
use crate::auth::handlers::fetch_profile;
use crate::errors::AppError;
use crate::models::profile::{
    Education, FullSeekerProfile, JobSeekerProfile, Language, Profile, Skill, WorkExperience,
};
use crate::profile::completion::completion_score;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub seeker: Option<JobSeekerProfile>,
    pub work_experiences: Vec<WorkExperience>,
    pub educations: Vec<Education>,
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
    /// Completion percentage; present for seekers only.
    pub completion: Option<u32>,
}

impl From<FullSeekerProfile> for ProfileResponse {
    fn from(full: FullSeekerProfile) -> Self {
        let completion = completion_score(&full);
        ProfileResponse {
            profile: full.profile,
            seeker: Some(full.seeker),
            work_experiences: full.work_experiences,
            educations: full.educations,
            skills: full.skills,
            languages: full.languages,
            completion: Some(completion),
        }
    }
}

/// Loads a seeker profile with all child collections.
pub async fn load_full_seeker(
    state: &AppState,
    profile_id: Uuid,
) -> Result<FullSeekerProfile, AppError> {
    let profile = fetch_profile(state, profile_id).await?;

    let seeker: Option<JobSeekerProfile> =
        sqlx::query_as("SELECT * FROM job_seeker_profiles WHERE profile_id = $1")
            .bind(profile_id)
            .fetch_optional(&state.db)
            .await?;
    let seeker = seeker
        .ok_or_else(|| AppError::NotFound(format!("No seeker profile for {profile_id}")))?;

    let work_experiences: Vec<WorkExperience> = sqlx::query_as(
        "SELECT * FROM work_experiences
         WHERE job_seeker_profile_id = $1
         ORDER BY start_date DESC",
    )
    .bind(seeker.id)
    .fetch_all(&state.db)
    .await?;

    let educations: Vec<Education> = sqlx::query_as(
        "SELECT * FROM educations
         WHERE job_seeker_profile_id = $1
         ORDER BY start_date DESC NULLS LAST",
    )
    .bind(seeker.id)
    .fetch_all(&state.db)
    .await?;

    let skills: Vec<Skill> = sqlx::query_as(
        "SELECT s.id, s.name FROM skills s
         JOIN job_seeker_skills l ON l.skill_id = s.id
         WHERE l.job_seeker_profile_id = $1
         ORDER BY s.name",
    )
    .bind(seeker.id)
    .fetch_all(&state.db)
    .await?;

    let languages: Vec<Language> = sqlx::query_as(
        "SELECT lg.id, lg.name FROM languages lg
         JOIN job_seeker_languages l ON l.language_id = lg.id
         WHERE l.job_seeker_profile_id = $1
         ORDER BY lg.name",
    )
    .bind(seeker.id)
    .fetch_all(&state.db)
    .await?;

    Ok(FullSeekerProfile {
        profile,
        seeker,
        work_experiences,
        educations,
        skills,
        languages,
    })
}

/// GET /api/v1/profile
/// The caller's own profile. Seekers get the extension row, child sections
/// and the completion score; employers get the identity row alone.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    if user.role == Role::Seeker {
        return Ok(Json(load_full_seeker(&state, user.id).await?.into()));
    }
    let profile = fetch_profile(&state, user.id).await?;
    Ok(Json(ProfileResponse {
        profile,
        seeker: None,
        work_experiences: vec![],
        educations: vec![],
        skills: vec![],
        languages: vec![],
        completion: None,
    }))
}

/// GET /api/v1/seekers/:profile_id
/// Employer view of an applicant's full profile.
pub async fn handle_applicant_view(
    State(state): State<AppState>,
    EmployerUser(_): EmployerUser,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    Ok(Json(load_full_seeker(&state, profile_id).await?.into()))
}

#[derive(Deserialize)]
pub struct UpdateSeekerRequest {
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub availability: Option<String>,
}

/// PATCH /api/v1/profile/seeker
pub async fn handle_update_seeker(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    Json(req): Json<UpdateSeekerRequest>,
) -> Result<Json<JobSeekerProfile>, AppError> {
    let seeker: Option<JobSeekerProfile> = sqlx::query_as(
        "UPDATE job_seeker_profiles
         SET headline = COALESCE($2, headline),
             summary = COALESCE($3, summary),
             availability = COALESCE($4, availability)
         WHERE profile_id = $1
         RETURNING *",
    )
    .bind(user.id)
    .bind(&req.headline)
    .bind(&req.summary)
    .bind(&req.availability)
    .fetch_optional(&state.db)
    .await?;

    seeker
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No seeker profile".to_string()))
}

async fn seeker_profile_id(state: &AppState, profile_id: Uuid) -> Result<Uuid, AppError> {
    let id: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM job_seeker_profiles WHERE profile_id = $1")
            .bind(profile_id)
            .fetch_optional(&state.db)
            .await?;
    id.ok_or_else(|| AppError::NotFound("No seeker profile".to_string()))
}

#[derive(Deserialize)]
pub struct ExperienceRequest {
    pub title: String,
    pub company_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// POST /api/v1/profile/experiences
pub async fn handle_add_experience(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    Json(req): Json<ExperienceRequest>,
) -> Result<Json<WorkExperience>, AppError> {
    if req.title.trim().is_empty() || req.company_name.trim().is_empty() {
        return Err(AppError::Validation(
            "Title and company name are required".to_string(),
        ));
    }
    let seeker_id = seeker_profile_id(&state, user.id).await?;

    let experience: WorkExperience = sqlx::query_as(
        "INSERT INTO work_experiences
            (job_seeker_profile_id, title, company_name, start_date, end_date, description)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(seeker_id)
    .bind(req.title.trim())
    .bind(req.company_name.trim())
    .bind(req.start_date)
    .bind(req.end_date)
    .bind(&req.description)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(experience))
}

/// DELETE /api/v1/profile/experiences/:id
pub async fn handle_delete_experience(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let seeker_id = seeker_profile_id(&state, user.id).await?;
    sqlx::query("DELETE FROM work_experiences WHERE id = $1 AND job_seeker_profile_id = $2")
        .bind(id)
        .bind(seeker_id)
        .execute(&state.db)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct EducationRequest {
    pub school: String,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// POST /api/v1/profile/educations
pub async fn handle_add_education(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    Json(req): Json<EducationRequest>,
) -> Result<Json<Education>, AppError> {
    if req.school.trim().is_empty() {
        return Err(AppError::Validation("School is required".to_string()));
    }
    let seeker_id = seeker_profile_id(&state, user.id).await?;

    let education: Education = sqlx::query_as(
        "INSERT INTO educations
            (job_seeker_profile_id, school, degree, field_of_study, start_date, end_date)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(seeker_id)
    .bind(req.school.trim())
    .bind(&req.degree)
    .bind(&req.field_of_study)
    .bind(req.start_date)
    .bind(req.end_date)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(education))
}

/// DELETE /api/v1/profile/educations/:id
pub async fn handle_delete_education(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let seeker_id = seeker_profile_id(&state, user.id).await?;
    sqlx::query("DELETE FROM educations WHERE id = $1 AND job_seeker_profile_id = $2")
        .bind(id)
        .bind(seeker_id)
        .execute(&state.db)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct NamedEntryRequest {
    pub name: String,
}

/// POST /api/v1/profile/skills
/// Upserts the skill by name and links it; linking twice is a no-op.
pub async fn handle_add_skill(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    Json(req): Json<NamedEntryRequest>,
) -> Result<Json<Skill>, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Skill name is required".to_string()));
    }
    let seeker_id = seeker_profile_id(&state, user.id).await?;

    let skill: Skill = sqlx::query_as(
        "INSERT INTO skills (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
         RETURNING id, name",
    )
    .bind(name)
    .fetch_one(&state.db)
    .await?;

    sqlx::query(
        "INSERT INTO job_seeker_skills (job_seeker_profile_id, skill_id)
         VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(seeker_id)
    .bind(skill.id)
    .execute(&state.db)
    .await?;

    Ok(Json(skill))
}

/// DELETE /api/v1/profile/skills/:skill_id
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    Path(skill_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let seeker_id = seeker_profile_id(&state, user.id).await?;
    sqlx::query(
        "DELETE FROM job_seeker_skills WHERE job_seeker_profile_id = $1 AND skill_id = $2",
    )
    .bind(seeker_id)
    .bind(skill_id)
    .execute(&state.db)
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/profile/languages
pub async fn handle_add_language(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    Json(req): Json<NamedEntryRequest>,
) -> Result<Json<Language>, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Language name is required".to_string()));
    }
    let seeker_id = seeker_profile_id(&state, user.id).await?;

    let language: Language = sqlx::query_as(
        "INSERT INTO languages (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
         RETURNING id, name",
    )
    .bind(name)
    .fetch_one(&state.db)
    .await?;

    sqlx::query(
        "INSERT INTO job_seeker_languages (job_seeker_profile_id, language_id)
         VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(seeker_id)
    .bind(language.id)
    .execute(&state.db)
    .await?;

    Ok(Json(language))
}

/// DELETE /api/v1/profile/languages/:language_id
pub async fn handle_remove_language(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    Path(language_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let seeker_id = seeker_profile_id(&state, user.id).await?;
    sqlx::query(
        "DELETE FROM job_seeker_languages WHERE job_seeker_profile_id = $1 AND language_id = $2",
    )
    .bind(seeker_id)
    .bind(language_id)
    .execute(&state.db)
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

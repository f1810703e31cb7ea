use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::extract::{AuthUser, MaybeUser};
use crate::auth::password::{hash_password, validate_email, validate_password, verify_password};
use crate::auth::tokens::issue_token;
use crate::errors::AppError;
use crate::models::profile::{Profile, ProfileCredentials, PROFILE_COLUMNS};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub user_type: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub profile: Profile,
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    if req.full_name.trim().is_empty() {
        return Err(AppError::Validation("Full name is required".to_string()));
    }
    if !matches!(req.user_type.as_str(), "job_seeker" | "employer") {
        return Err(AppError::Validation(
            "user_type must be job_seeker or employer".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;

    let profile: Profile = sqlx::query_as(&format!(
        "INSERT INTO profiles (full_name, email, password_hash, user_type)
         VALUES ($1, $2, $3, $4)
         RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(req.full_name.trim())
    .bind(req.email.to_lowercase())
    .bind(&password_hash)
    .bind(&req.user_type)
    .fetch_one(&state.db)
    .await
    .map_err(|e| AppError::on_unique_violation(e, "An account with this email already exists"))?;

    // Seekers get their extension row up front so the profile page and
    // completion scoring have something to read.
    if profile.user_type == "job_seeker" {
        sqlx::query("INSERT INTO job_seeker_profiles (profile_id) VALUES ($1)")
            .bind(profile.id)
            .execute(&state.db)
            .await?;
    }

    info!("New {} account: {}", profile.user_type, profile.id);

    let token = issue_token(
        &state.config.jwt_secret,
        profile.id,
        &profile.email,
        &profile.user_type,
    )?;
    Ok(Json(SessionResponse { token, profile }))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let creds: Option<ProfileCredentials> =
        sqlx::query_as("SELECT id, password_hash FROM profiles WHERE email = $1")
            .bind(req.email.to_lowercase())
            .fetch_optional(&state.db)
            .await?;

    let bad_credentials = || AppError::Unauthorized("Invalid email or password".to_string());
    let creds = creds.ok_or_else(bad_credentials)?;
    if !verify_password(&req.password, &creds.password_hash) {
        return Err(bad_credentials());
    }

    let profile = fetch_profile(&state, creds.id).await?;
    let token = issue_token(
        &state.config.jwt_secret,
        profile.id,
        &profile.email,
        &profile.user_type,
    )?;
    Ok(Json(SessionResponse { token, profile }))
}

/// POST /api/v1/auth/logout
/// Sessions are stateless; the client discards the token.
pub async fn handle_logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// GET /api/v1/auth/session
/// Resolves the bearer token to the current profile in one round trip.
pub async fn handle_session(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(fetch_profile(&state, user.id).await?))
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub company_id: Option<Uuid>,
}

/// PATCH /api/v1/auth/profile
/// Partial update of the caller's own identity row.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    if let Some(name) = &req.full_name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Full name cannot be empty".to_string()));
        }
    }

    let profile: Profile = sqlx::query_as(&format!(
        "UPDATE profiles
         SET full_name = COALESCE($2, full_name),
             avatar_url = COALESCE($3, avatar_url),
             company_id = COALESCE($4, company_id),
             updated_at = now()
         WHERE id = $1
         RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(user.id)
    .bind(req.full_name.as_deref().map(str::trim))
    .bind(&req.avatar_url)
    .bind(req.company_id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(profile))
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// POST /api/v1/auth/forgot-password
/// Always answers 204 so the endpoint cannot be used to probe for accounts.
/// The reset link is logged in place of an outbound email.
pub async fn handle_forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<StatusCode, AppError> {
    let profile_id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM profiles WHERE email = $1")
        .bind(req.email.to_lowercase())
        .fetch_optional(&state.db)
        .await?;

    if let Some(profile_id) = profile_id {
        let token: Uuid = sqlx::query_scalar(
            "INSERT INTO password_reset_tokens (profile_id, expires_at)
             VALUES ($1, now() + interval '1 hour')
             RETURNING token",
        )
        .bind(profile_id)
        .fetch_one(&state.db)
        .await?;

        info!(
            "Password reset link for {profile_id}: {}/update-password?token={token}",
            state.config.app_base_url
        );
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct UpdatePasswordRequest {
    pub token: Option<Uuid>,
    pub password: String,
}

/// POST /api/v1/auth/update-password
/// Accepts either a valid reset token or an authenticated session.
pub async fn handle_update_password(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<StatusCode, AppError> {
    validate_password(&req.password)?;

    let profile_id = match req.token {
        Some(token) => {
            let profile_id: Option<Uuid> = sqlx::query_scalar(
                "DELETE FROM password_reset_tokens
                 WHERE token = $1 AND expires_at > now()
                 RETURNING profile_id",
            )
            .bind(token)
            .fetch_optional(&state.db)
            .await?;
            profile_id
                .ok_or_else(|| AppError::Unauthorized("Invalid or expired reset link".to_string()))?
        }
        None => {
            user.ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?
                .id
        }
    };

    let password_hash = hash_password(&req.password)?;
    sqlx::query("UPDATE profiles SET password_hash = $2, updated_at = now() WHERE id = $1")
        .bind(profile_id)
        .bind(&password_hash)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn fetch_profile(state: &AppState, id: Uuid) -> Result<Profile, AppError> {
    let profile: Option<Profile> =
        sqlx::query_as(&format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"))
            .bind(id)
            .fetch_optional(&state.db)
            .await?;
    profile.ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))
}

//! Axum extractors that apply the role gate per route.
//!
//! The session token is resolved once into an `AuthUser`; gated routes take
//! `SeekerUser` / `EmployerUser` and a mismatch answers 303 with the caller's
//! role-appropriate default path in `Location`.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::auth::gate::{decide, Decision, Role};
use crate::auth::tokens::verify_token;
use crate::errors::AppError;
use crate::state::AppState;

/// An authenticated caller. Identity and role come from the verified
/// session token; handlers that need the full profile row fetch it.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Caller on a public route: authenticated if a valid token is present,
/// anonymous otherwise. Never rejects.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

/// Caller gated to job seekers.
#[derive(Debug, Clone)]
pub struct SeekerUser(pub AuthUser);

/// Caller gated to employers.
#[derive(Debug, Clone)]
pub struct EmployerUser(pub AuthUser);

fn bearer_user(parts: &Parts, state: &AppState) -> Option<AuthUser> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    let claims = verify_token(&state.config.jwt_secret, token).ok()?;
    Some(AuthUser {
        id: claims.sub,
        email: claims.email,
        role: Role::from_user_type(&claims.user_type),
    })
}

fn gated(parts: &Parts, state: &AppState, allowed: &[Role]) -> Result<AuthUser, AppError> {
    let user = bearer_user(parts, state);
    let role = user.as_ref().map_or(Role::Guest, |u| u.role);
    match decide(role, allowed) {
        Decision::Allow => {
            // Allow implies a real user: Guest is never in an allowed set.
            user.ok_or(AppError::RedirectTo("/login"))
        }
        Decision::Redirect(path) => Err(AppError::RedirectTo(path)),
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        gated(parts, state, &[Role::Seeker, Role::Employer])
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        Ok(MaybeUser(bearer_user(parts, state)))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SeekerUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        gated(parts, state, &[Role::Seeker]).map(SeekerUser)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for EmployerUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        gated(parts, state, &[Role::Employer]).map(EmployerUser)
    }
}

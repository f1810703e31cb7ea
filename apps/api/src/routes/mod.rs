pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    response::Redirect,
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::state::AppState;
use crate::{
    applications, auth, companies, dashboard, jobs, notifications, profile, recommendations,
    saved, storage,
};

/// Unknown paths land on home, like the SPA catch-all route.
async fn fallback_home() -> Redirect {
    Redirect::to("/")
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session / identity
        .route("/api/v1/auth/signup", post(auth::handlers::handle_signup))
        .route("/api/v1/auth/login", post(auth::handlers::handle_login))
        .route("/api/v1/auth/logout", post(auth::handlers::handle_logout))
        .route("/api/v1/auth/session", get(auth::handlers::handle_session))
        .route(
            "/api/v1/auth/profile",
            patch(auth::handlers::handle_update_profile),
        )
        .route(
            "/api/v1/auth/forgot-password",
            post(auth::handlers::handle_forgot_password),
        )
        .route(
            "/api/v1/auth/update-password",
            post(auth::handlers::handle_update_password),
        )
        // Public job surface
        .route("/api/v1/jobs", get(jobs::handlers::handle_list))
        .route("/api/v1/jobs/:id", get(jobs::handlers::handle_detail))
        .route("/api/v1/jobs/:id/similar", get(jobs::handlers::handle_similar))
        // Seeker actions on a posting
        .route(
            "/api/v1/jobs/:id/apply",
            post(applications::handlers::handle_apply),
        )
        .route(
            "/api/v1/jobs/:id/save",
            put(saved::handle_save).delete(saved::handle_unsave),
        )
        .route("/api/v1/saved-jobs", get(saved::handle_list))
        .route(
            "/api/v1/applications",
            get(applications::handlers::handle_my_applications),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(applications::handlers::handle_set_status),
        )
        // Seeker profile
        .route("/api/v1/profile", get(profile::handlers::handle_get_profile))
        .route(
            "/api/v1/profile/seeker",
            patch(profile::handlers::handle_update_seeker),
        )
        .route(
            "/api/v1/profile/experiences",
            post(profile::handlers::handle_add_experience),
        )
        .route(
            "/api/v1/profile/experiences/:id",
            delete(profile::handlers::handle_delete_experience),
        )
        .route(
            "/api/v1/profile/educations",
            post(profile::handlers::handle_add_education),
        )
        .route(
            "/api/v1/profile/educations/:id",
            delete(profile::handlers::handle_delete_education),
        )
        .route(
            "/api/v1/profile/skills",
            post(profile::handlers::handle_add_skill),
        )
        .route(
            "/api/v1/profile/skills/:id",
            delete(profile::handlers::handle_remove_skill),
        )
        .route(
            "/api/v1/profile/languages",
            post(profile::handlers::handle_add_language),
        )
        .route(
            "/api/v1/profile/languages/:id",
            delete(profile::handlers::handle_remove_language),
        )
        // Recommendations
        .route("/api/v1/recommendations", get(recommendations::handle_list))
        .route(
            "/api/v1/recommendations/:id/viewed",
            post(recommendations::handle_mark_viewed),
        )
        .route(
            "/api/v1/recommendations/:id/clicked",
            post(recommendations::handle_mark_clicked),
        )
        // Dashboards
        .route(
            "/api/v1/job-seeker/dashboard",
            get(dashboard::handlers::handle_seeker),
        )
        .route(
            "/api/v1/employer/dashboard",
            get(dashboard::handlers::handle_employer),
        )
        // Employer posting management
        .route(
            "/api/v1/employer/jobs",
            post(jobs::handlers::handle_create).get(jobs::handlers::handle_employer_list),
        )
        .route(
            "/api/v1/employer/jobs/:id",
            patch(jobs::handlers::handle_update),
        )
        .route(
            "/api/v1/employer/jobs/:id/applicants",
            get(applications::handlers::handle_applicants),
        )
        .route(
            "/api/v1/employer/recent-applicants",
            get(applications::handlers::handle_recent_applicants),
        )
        .route(
            "/api/v1/seekers/:id",
            get(profile::handlers::handle_applicant_view),
        )
        // Notifications
        .route(
            "/api/v1/notifications",
            get(notifications::handlers::handle_list),
        )
        .route(
            "/api/v1/notifications/read-all",
            post(notifications::handlers::handle_read_all),
        )
        .route(
            "/api/v1/notifications/stream",
            get(notifications::handlers::handle_stream),
        )
        // Companies
        .route("/api/v1/companies", get(companies::handle_list))
        .route("/api/v1/companies/:id", get(companies::handle_detail))
        // Storage: the default body limit is below the resume cap, so the
        // upload routes raise it and leave size rejection to validation.
        .route(
            "/api/v1/storage/avatar",
            post(storage::handle_upload_avatar)
                .layer(DefaultBodyLimit::max(storage::UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/api/v1/storage/resume",
            post(storage::handle_upload_resume)
                .layer(DefaultBodyLimit::max(storage::UPLOAD_BODY_LIMIT)),
        )
        .fallback(fallback_home)
        .with_state(state)
}

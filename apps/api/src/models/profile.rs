use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Identity record. Safe for client responses: no password hash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub user_type: String,
    pub company_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Columns selected whenever a `Profile` row is fetched. Keeps the
/// password hash out of every read path except login.
pub const PROFILE_COLUMNS: &str =
    "id, full_name, email, avatar_url, user_type, company_id, created_at, updated_at";

/// Credential row fetched only by the login path.
#[derive(Debug, FromRow)]
pub struct ProfileCredentials {
    pub id: Uuid,
    pub password_hash: String,
}

/// 1:1 extension of a job-seeker `Profile`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobSeekerProfile {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub resume_url: Option<String>,
    pub availability: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkExperience {
    pub id: Uuid,
    pub job_seeker_profile_id: Uuid,
    pub title: String,
    pub company_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Education {
    pub id: Uuid,
    pub job_seeker_profile_id: Uuid,
    pub school: String,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Language {
    pub id: Uuid,
    pub name: String,
}

/// A seeker profile with all child collections, as returned by the profile
/// endpoints and consumed by completion scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullSeekerProfile {
    pub profile: Profile,
    pub seeker: JobSeekerProfile,
    pub work_experiences: Vec<WorkExperience>,
    pub educations: Vec<Education>,
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
}

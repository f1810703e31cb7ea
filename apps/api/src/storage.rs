//! File storage: avatars (public-read images) and resumes (documents,
//! 5 MB cap enforced before the bytes go anywhere near the bucket).

use aws_sdk_s3::primitives::ByteStream;
use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::auth::extract::{AuthUser, SeekerUser};
use crate::errors::AppError;
use crate::models::profile::{JobSeekerProfile, Profile, PROFILE_COLUMNS};
use crate::state::AppState;

pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// Request body ceiling for the upload routes: the resume cap plus room
/// for multipart framing. Axum's default limit sits below the resume cap,
/// so the routes raise it to let `validate_resume` do the rejecting.
pub const UPLOAD_BODY_LIMIT: usize = MAX_RESUME_BYTES + 1024 * 1024;

const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

const DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Path-style public URL, as served by MinIO locally and S3 in production.
pub fn public_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key)
}

fn image_extension(content_type: &str) -> Result<&'static str, AppError> {
    IMAGE_EXTENSIONS
        .iter()
        .find(|(ct, _)| *ct == content_type)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| AppError::Validation("Avatar must be a JPEG, PNG or WebP image".to_string()))
}

fn validate_resume(content_type: &str, size: usize) -> Result<(), AppError> {
    if !DOCUMENT_TYPES.contains(&content_type) {
        return Err(AppError::Validation(
            "Resume must be a PDF or Word document".to_string(),
        ));
    }
    if size > MAX_RESUME_BYTES {
        return Err(AppError::Validation("Resume exceeds the 5 MB limit".to_string()));
    }
    Ok(())
}

async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Upload failed: {e}")))?;
        return Ok((content_type, data.to_vec()));
    }
    Err(AppError::Validation("Missing 'file' field".to_string()))
}

async fn put_object(
    state: &AppState,
    bucket: &str,
    key: &str,
    content_type: &str,
    data: Vec<u8>,
) -> Result<String, AppError> {
    state
        .s3
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(data))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("Upload to {bucket}/{key} failed: {e}")))?;

    Ok(public_url(&state.config.s3_endpoint, bucket, key))
}

/// POST /api/v1/storage/avatar
/// Stores the image in the public avatars bucket and points the caller's
/// profile at it.
pub async fn handle_upload_avatar(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<Profile>, AppError> {
    let (content_type, data) = read_file_field(&mut multipart).await?;
    let ext = image_extension(&content_type)?;

    let key = format!("{}/avatar.{ext}", user.id);
    let url = put_object(&state, &state.config.avatars_bucket, &key, &content_type, data).await?;
    info!("Stored avatar for {}: {url}", user.id);

    let profile: Profile = sqlx::query_as(&format!(
        "UPDATE profiles SET avatar_url = $2, updated_at = now()
         WHERE id = $1
         RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(user.id)
    .bind(&url)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(profile))
}

/// POST /api/v1/storage/resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    SeekerUser(user): SeekerUser,
    mut multipart: Multipart,
) -> Result<Json<JobSeekerProfile>, AppError> {
    let (content_type, data) = read_file_field(&mut multipart).await?;
    validate_resume(&content_type, data.len())?;

    let key = format!("{}/resume", user.id);
    let url = put_object(&state, &state.config.resumes_bucket, &key, &content_type, data).await?;
    info!("Stored resume for {}: {url}", user.id);

    let seeker: Option<JobSeekerProfile> = sqlx::query_as(
        "UPDATE job_seeker_profiles SET resume_url = $2 WHERE profile_id = $1 RETURNING *",
    )
    .bind(user.id)
    .bind(&url)
    .fetch_optional(&state.db)
    .await?;

    seeker
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No seeker profile".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_joins_cleanly() {
        assert_eq!(
            public_url("http://localhost:9000/", "avatars", "u1/avatar.png"),
            "http://localhost:9000/avatars/u1/avatar.png"
        );
    }

    #[test]
    fn test_resume_cap_is_five_megabytes() {
        assert!(validate_resume("application/pdf", MAX_RESUME_BYTES).is_ok());
        assert!(validate_resume("application/pdf", MAX_RESUME_BYTES + 1).is_err());
    }

    // A full-size resume must reach validate_resume instead of being cut
    // off by the body limit first.
    #[test]
    fn test_body_limit_admits_a_full_size_resume() {
        assert!(UPLOAD_BODY_LIMIT > MAX_RESUME_BYTES);
    }

    #[test]
    fn test_resume_rejects_non_documents() {
        assert!(validate_resume("image/png", 100).is_err());
        assert!(validate_resume(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            100
        )
        .is_ok());
    }

    #[test]
    fn test_avatar_accepts_images_only() {
        assert_eq!(image_extension("image/png").unwrap(), "png");
        assert!(image_extension("application/pdf").is_err());
    }
}

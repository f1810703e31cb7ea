use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Session token lifetime. The client discards the token on sign-out.
const TOKEN_TTL_DAYS: i64 = 7;

/// JWT claims carried by every session token. The role travels with the
/// token so route gating needs no extra round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub user_type: String,
    pub exp: i64,
    pub iat: i64,
}

pub fn issue_token(
    secret: &str,
    user_id: Uuid,
    email: &str,
    user_type: &str,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        user_type: user_type.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Token encoding failed: {e}")))
}

/// Decodes and validates a session token. Expired or malformed tokens are
/// an `Err`; callers on public routes treat that as an anonymous caller.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired session".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_identity() {
        let id = Uuid::new_v4();
        let token = issue_token("test-secret", id, "a@b.cm", "employer").unwrap();
        let claims = verify_token("test-secret", &token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "a@b.cm");
        assert_eq!(claims.user_type, "employer");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token("secret-one", Uuid::new_v4(), "a@b.cm", "job_seeker").unwrap();
        assert!(verify_token("secret-two", &token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(verify_token("test-secret", "not-a-jwt").is_err());
    }
}

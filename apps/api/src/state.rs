use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::notifications::hub::NotificationHub;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub config: Config,
    /// In-process fan-out hub: one broadcast channel per connected user,
    /// feeding the SSE notification streams.
    pub notifier: NotificationHub,
}

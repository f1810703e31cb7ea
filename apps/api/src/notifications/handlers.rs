use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::{Stream, StreamExt};
use serde::Serialize;
use tokio_stream::wrappers::BroadcastStream;

use crate::auth::extract::AuthUser;
use crate::errors::AppError;
use crate::models::notification::Notification;
use crate::state::AppState;

#[derive(Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
}

/// GET /api/v1/notifications
/// Latest 10 for the bell dropdown, plus the total unread count.
pub async fn handle_list(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<NotificationListResponse>, AppError> {
    let notifications: Vec<Notification> = sqlx::query_as(
        "SELECT * FROM notifications
         WHERE user_id = $1
         ORDER BY created_at DESC
         LIMIT 10",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    let unread_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
    )
    .bind(user.id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(NotificationListResponse {
        notifications,
        unread_count,
    }))
}

#[derive(Serialize)]
pub struct ReadAllResponse {
    pub updated: u64,
    pub unread_count: i64,
}

/// POST /api/v1/notifications/read-all
/// One bulk update scoped to the caller's unread rows. The response carries
/// the confirmed state so clients reconcile instead of trusting an
/// optimistic local copy.
pub async fn handle_read_all(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ReadAllResponse>, AppError> {
    let result =
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE")
            .bind(user.id)
            .execute(&state.db)
            .await?;

    Ok(Json(ReadAllResponse {
        updated: result.rows_affected(),
        unread_count: 0,
    }))
}

/// GET /api/v1/notifications/stream
/// SSE channel filtered by the authenticated user id. The subscription
/// lives exactly as long as the connection; lagged receivers skip missed
/// events and reconcile on the next list fetch.
pub async fn handle_stream(
    State(state): State<AppState>,
    user: AuthUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.notifier.subscribe(user.id);
    let stream = BroadcastStream::new(rx).filter_map(|msg| async move {
        let notification = msg.ok()?; // Lagged: drop, client refetches
        let event = Event::default()
            .event("notification")
            .json_data(&notification)
            .ok()?;
        Some(Ok(event))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

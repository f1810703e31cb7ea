// Notification fan-out: state-changing actions write a row addressed to the
// counterparty and push it over that user's live channel. A fan-out failure
// is logged and never fails the triggering action.

pub mod handlers;
pub mod hub;

use tracing::warn;
use uuid::Uuid;

use crate::models::notification::Notification;
use crate::state::AppState;

/// Writes a notification row for `user_id` and publishes it to their live
/// channel if they are connected.
pub async fn fan_out(state: &AppState, user_id: Uuid, kind: &str, message: &str, link: Option<&str>) {
    let inserted: Result<Notification, sqlx::Error> = sqlx::query_as(
        "INSERT INTO notifications (user_id, kind, message, link)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(user_id)
    .bind(kind)
    .bind(message)
    .bind(link)
    .fetch_one(&state.db)
    .await;

    match inserted {
        Ok(notification) => state.notifier.publish(user_id, notification),
        Err(e) => warn!("Failed to create {kind} notification for {user_id}: {e}"),
    }
}

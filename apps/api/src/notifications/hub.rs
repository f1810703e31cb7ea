use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::notification::Notification;

/// Buffered events per user channel. A receiver that lags past this drops
/// the missed events; the next list fetch reconciles.
const CHANNEL_CAPACITY: usize = 32;

/// In-process push hub keyed by user id. A channel exists only while
/// someone is subscribed (or until the next publish finds it dead).
#[derive(Clone, Default)]
pub struct NotificationHub {
    channels: Arc<Mutex<HashMap<Uuid, broadcast::Sender<Notification>>>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to `user_id`'s channel, creating it on first use.
    /// Channel lifetime is tied to the receivers: once the last one is
    /// dropped, the next publish prunes the entry.
    pub fn subscribe(&self, user_id: Uuid) -> broadcast::Receiver<Notification> {
        let mut channels = self.channels.lock().unwrap();
        channels
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Delivers to `user_id` if they are connected; a no-op otherwise.
    pub fn publish(&self, user_id: Uuid, notification: Notification) {
        let mut channels = self.channels.lock().unwrap();
        if let Some(sender) = channels.get(&user_id) {
            if sender.send(notification).is_err() {
                // All receivers gone; drop the dead channel.
                channels.remove(&user_id);
            }
        }
    }

    #[cfg(test)]
    fn channel_count(&self) -> usize {
        self.channels.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample(user_id: Uuid) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            user_id,
            kind: "new_application".to_string(),
            message: "Someone applied".to_string(),
            link: None,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_notification() {
        let hub = NotificationHub::new();
        let user = Uuid::new_v4();
        let mut rx = hub.subscribe(user);

        hub.publish(user, sample(user));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.user_id, user);
        assert_eq!(received.kind, "new_application");
    }

    #[tokio::test]
    async fn test_publish_to_other_user_not_delivered() {
        let hub = NotificationHub::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut rx = hub.subscribe(user);

        hub.publish(other, sample(other));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dead_channel_pruned_on_publish() {
        let hub = NotificationHub::new();
        let user = Uuid::new_v4();
        let rx = hub.subscribe(user);
        drop(rx);
        assert_eq!(hub.channel_count(), 1);

        hub.publish(user, sample(user));
        assert_eq!(hub.channel_count(), 0);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let hub = NotificationHub::new();
        hub.publish(Uuid::new_v4(), sample(Uuid::new_v4()));
        assert_eq!(hub.channel_count(), 0);
    }
}

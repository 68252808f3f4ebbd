//! UI container: transient notifications.
//!
//! Every notification removes itself after a fixed lifetime unless it is
//! dismissed first. Each pending removal holds a [`CancellationToken`] so
//! dismissal and clearing stop the timer instead of letting it fire late.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::container::Container;

pub const DEFAULT_NOTIFICATION_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub severity: Severity,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Oldest first
    pub notifications: Vec<Notification>,
}

struct UiInner {
    container: Container<UiState>,
    timers: Mutex<HashMap<String, CancellationToken>>,
    lifetime: Duration,
}

impl UiInner {
    fn remove(&self, id: &str) {
        if let Some(token) = self.timers.lock().remove(id) {
            token.cancel();
        }
        self.container
            .update(|s| s.notifications.retain(|n| n.id != id));
    }
}

impl Drop for UiInner {
    fn drop(&mut self) {
        for (_, token) in self.timers.lock().drain() {
            token.cancel();
        }
    }
}

#[derive(Clone)]
pub struct UiStore {
    inner: Arc<UiInner>,
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_LIFETIME)
    }
}

impl UiStore {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            inner: Arc::new(UiInner {
                container: Container::new(UiState::default()),
                timers: Mutex::new(HashMap::new()),
                lifetime,
            }),
        }
    }

    pub fn snapshot(&self) -> UiState {
        self.inner.container.snapshot()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.container.read(|s| s.notifications.clone())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiState> {
        self.inner.container.subscribe()
    }

    /// Number of auto-dismiss timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.inner.timers.lock().len()
    }

    /// Append a notification and schedule its removal. Returns its id.
    ///
    /// Outside a tokio runtime the notification is kept until dismissed.
    pub fn add_notification(&self, severity: Severity, message: impl Into<String>) -> String {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            severity,
            message: message.into(),
            created_at: Utc::now(),
        };
        let id = notification.id.clone();

        self.inner
            .container
            .update(|s| s.notifications.push(notification));
        self.schedule_removal(&id);

        id
    }

    /// Dismiss a notification and cancel its pending timer.
    pub fn remove_notification(&self, id: &str) {
        self.inner.remove(id);
    }

    /// Dismiss everything and cancel every pending timer.
    pub fn clear_notifications(&self) {
        for (_, token) in self.inner.timers.lock().drain() {
            token.cancel();
        }
        self.inner.container.update(|s| s.notifications.clear());
    }

    fn schedule_removal(&self, id: &str) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No runtime available, notification {} will not auto-dismiss", id);
                return;
            }
        };

        let token = CancellationToken::new();
        self.inner
            .timers
            .lock()
            .insert(id.to_string(), token.clone());

        let inner: Weak<UiInner> = Arc::downgrade(&self.inner);
        let lifetime = self.inner.lifetime;
        let id = id.to_string();
        handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(lifetime) => {
                    if let Some(inner) = inner.upgrade() {
                        tracing::debug!("Auto-dismissing notification {}", id);
                        inner.remove(&id);
                    }
                }
            }
        });
    }
}

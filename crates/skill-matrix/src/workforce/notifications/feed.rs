use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use super::domain::{CustomNotification, FeedSnapshot, Notification};

/// The feed never grows past the 50 most recent entries.
pub const FEED_CAPACITY: usize = 50;

static CUSTOM_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_custom_id() -> String {
    let id = CUSTOM_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("custom-{id:06}")
}

/// In-memory view of one viewer's persisted notification list, with the
/// merge and mutation rules the surrounding service relies on.
#[derive(Debug, Default)]
pub struct NotificationFeed {
    entries: Vec<Notification>,
}

impl NotificationFeed {
    pub fn new(entries: Vec<Notification>) -> Self {
        Self { entries }
    }

    /// Merge a freshly derived set into the feed. Entries whose id is already
    /// present are left untouched, so a viewer's read flag and the original
    /// timestamp survive re-derivation. The combined list is then ordered
    /// newest first and truncated to capacity.
    pub fn merge(&mut self, fresh: Vec<Notification>) {
        for notification in fresh {
            if !self.contains(&notification.id) {
                self.entries.push(notification);
            }
        }
        self.entries
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.entries.truncate(FEED_CAPACITY);
    }

    /// Unknown ids are a no-op, not an error.
    pub fn mark_read(&mut self, id: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            entry.read = true;
        }
    }

    pub fn mark_all_read(&mut self) {
        for entry in &mut self.entries {
            entry.read = true;
        }
    }

    /// Unknown ids are a no-op, not an error.
    pub fn remove(&mut self, id: &str) {
        self.entries.retain(|entry| entry.id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Insert an ad hoc entry at the front with a generated id and the
    /// supplied timestamp, then re-apply the capacity bound.
    pub fn push_custom(&mut self, draft: CustomNotification, now: DateTime<Utc>) -> String {
        let id = next_custom_id();
        self.entries.insert(
            0,
            Notification {
                id: id.clone(),
                kind: draft.kind,
                title: draft.title,
                message: draft.message,
                timestamp: now,
                read: false,
                priority: draft.priority,
                action_url: draft.action_url,
                metadata: draft.metadata,
            },
        );
        self.entries.truncate(FEED_CAPACITY);
        id
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.read).count()
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            notifications: self.entries.clone(),
            unread_count: self.unread_count(),
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }
}

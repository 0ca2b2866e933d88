use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use super::super::domain::EmployeeId;
use super::super::repository::{NotificationStore, StoreError, WorkforceStore};
use super::deriver::derive_feed;
use super::domain::{CustomNotification, FeedSnapshot};
use super::feed::NotificationFeed;

/// Service composing the entity store, the per-viewer feed store, and the
/// derivation rules. Each call loads, transforms, persists, and returns the
/// updated snapshot; serializing concurrent writers is the store's job.
pub struct NotificationService<W, S> {
    workforce: Arc<W>,
    feeds: Arc<S>,
}

impl<W, S> NotificationService<W, S>
where
    W: WorkforceStore + 'static,
    S: NotificationStore + 'static,
{
    pub fn new(workforce: Arc<W>, feeds: Arc<S>) -> Self {
        Self { workforce, feeds }
    }

    /// Re-derive the viewer's feed against current data and merge it over the
    /// persisted list. The welcome flag is recorded on the first pass so the
    /// welcome entry is derived exactly once per viewer, ever.
    pub fn refresh(
        &self,
        viewer: &EmployeeId,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<FeedSnapshot, NotificationServiceError> {
        let dataset = self.workforce.load()?;
        let employee = dataset
            .employee(viewer)
            .ok_or_else(|| NotificationServiceError::UnknownEmployee(viewer.0.clone()))?;

        let previous = self.feeds.load_feed(viewer)?;
        let welcomed = self.feeds.was_welcomed(viewer)?;

        let feed = derive_feed(employee, &dataset, previous, welcomed, today, now);

        self.feeds.save_feed(viewer, feed.entries())?;
        if !welcomed {
            self.feeds.set_welcomed(viewer)?;
        }

        Ok(feed.snapshot())
    }

    pub fn mark_read(
        &self,
        viewer: &EmployeeId,
        notification_id: &str,
    ) -> Result<FeedSnapshot, NotificationServiceError> {
        self.mutate(viewer, |feed| feed.mark_read(notification_id))
    }

    pub fn mark_all_read(
        &self,
        viewer: &EmployeeId,
    ) -> Result<FeedSnapshot, NotificationServiceError> {
        self.mutate(viewer, NotificationFeed::mark_all_read)
    }

    pub fn remove(
        &self,
        viewer: &EmployeeId,
        notification_id: &str,
    ) -> Result<FeedSnapshot, NotificationServiceError> {
        self.mutate(viewer, |feed| feed.remove(notification_id))
    }

    pub fn clear(&self, viewer: &EmployeeId) -> Result<FeedSnapshot, NotificationServiceError> {
        self.mutate(viewer, NotificationFeed::clear)
    }

    pub fn add_custom(
        &self,
        viewer: &EmployeeId,
        draft: CustomNotification,
        now: DateTime<Utc>,
    ) -> Result<FeedSnapshot, NotificationServiceError> {
        self.mutate(viewer, |feed| {
            feed.push_custom(draft, now);
        })
    }

    fn mutate<F>(
        &self,
        viewer: &EmployeeId,
        apply: F,
    ) -> Result<FeedSnapshot, NotificationServiceError>
    where
        F: FnOnce(&mut NotificationFeed),
    {
        let mut feed = NotificationFeed::new(self.feeds.load_feed(viewer)?);
        apply(&mut feed);
        self.feeds.save_feed(viewer, feed.entries())?;
        Ok(feed.snapshot())
    }
}

/// Error raised by the notification service.
#[derive(Debug, thiserror::Error)]
pub enum NotificationServiceError {
    #[error("employee {0} not found")]
    UnknownEmployee(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

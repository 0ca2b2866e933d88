//! Derivation of the per-viewer notification feed from point-in-time facts
//! about certifications, trainings, and skill assessments, plus the
//! merge-by-id rules that keep re-derivation idempotent.

mod deriver;
pub mod domain;
mod feed;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use deriver::{derive, derive_feed};
pub use domain::{CustomNotification, FeedSnapshot, Notification, NotificationKind};
pub use feed::{NotificationFeed, FEED_CAPACITY};
pub use router::notification_router;
pub use service::{NotificationService, NotificationServiceError};

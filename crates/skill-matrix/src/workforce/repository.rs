use super::domain::{EmployeeId, WorkforceDataset};
use super::notifications::Notification;

/// Storage abstraction over the entity collections so the engines can be
/// exercised against any backing store.
pub trait WorkforceStore: Send + Sync {
    fn load(&self) -> Result<WorkforceDataset, StoreError>;
    fn save(&self, dataset: &WorkforceDataset) -> Result<(), StoreError>;
}

/// Per-viewer persistence for the notification feed and the one-shot
/// welcome flag. The core never touches ambient storage directly; everything
/// goes through this trait.
pub trait NotificationStore: Send + Sync {
    fn load_feed(&self, viewer: &EmployeeId) -> Result<Vec<Notification>, StoreError>;
    fn save_feed(&self, viewer: &EmployeeId, entries: &[Notification]) -> Result<(), StoreError>;
    fn was_welcomed(&self, viewer: &EmployeeId) -> Result<bool, StoreError>;
    fn set_welcomed(&self, viewer: &EmployeeId) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use skill_matrix::error::AppError;
use skill_matrix::workforce::domain::{EmployeeId, WorkforceDataset};
use skill_matrix::workforce::notifications::Notification;
use skill_matrix::workforce::repository::{NotificationStore, StoreError, WorkforceStore};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
pub(crate) struct InMemoryWorkforceStore {
    dataset: RwLock<WorkforceDataset>,
}

impl InMemoryWorkforceStore {
    pub(crate) fn with_dataset(dataset: WorkforceDataset) -> Self {
        Self {
            dataset: RwLock::new(dataset),
        }
    }
}

impl WorkforceStore for InMemoryWorkforceStore {
    fn load(&self) -> Result<WorkforceDataset, StoreError> {
        Ok(self
            .dataset
            .read()
            .expect("dataset lock poisoned")
            .clone())
    }

    fn save(&self, dataset: &WorkforceDataset) -> Result<(), StoreError> {
        *self.dataset.write().expect("dataset lock poisoned") = dataset.clone();
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryNotificationStore {
    feeds: Mutex<HashMap<EmployeeId, Vec<Notification>>>,
    welcomed: Mutex<HashSet<EmployeeId>>,
}

impl NotificationStore for InMemoryNotificationStore {
    fn load_feed(&self, viewer: &EmployeeId) -> Result<Vec<Notification>, StoreError> {
        Ok(self
            .feeds
            .lock()
            .expect("feed mutex poisoned")
            .get(viewer)
            .cloned()
            .unwrap_or_default())
    }

    fn save_feed(&self, viewer: &EmployeeId, entries: &[Notification]) -> Result<(), StoreError> {
        self.feeds
            .lock()
            .expect("feed mutex poisoned")
            .insert(viewer.clone(), entries.to_vec());
        Ok(())
    }

    fn was_welcomed(&self, viewer: &EmployeeId) -> Result<bool, StoreError> {
        Ok(self
            .welcomed
            .lock()
            .expect("welcome mutex poisoned")
            .contains(viewer))
    }

    fn set_welcomed(&self, viewer: &EmployeeId) -> Result<(), StoreError> {
        self.welcomed
            .lock()
            .expect("welcome mutex poisoned")
            .insert(viewer.clone());
        Ok(())
    }
}

pub(crate) fn load_dataset<P: AsRef<Path>>(path: P) -> Result<WorkforceDataset, AppError> {
    let file = std::fs::File::open(path)?;
    let dataset = serde_json::from_reader(file)?;
    Ok(dataset)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::workforce::domain::{
    Assessor, Certification, CertificationId, Employee, EmployeeId, EmployeeStatus, Role, Skill,
    SkillAssessment, SkillCategory, SkillId, Training, TrainingId, WorkforceDataset,
};
use crate::workforce::notifications::Notification;
use crate::workforce::repository::{NotificationStore, StoreError, WorkforceStore};

pub(super) fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn member() -> Employee {
    Employee {
        id: EmployeeId("emp-1".to_string()),
        name: "Sarah Johnson".to_string(),
        email: "sarah@example.com".to_string(),
        role: Role::User,
        department: "Engineering".to_string(),
        location: "San Francisco".to_string(),
        status: EmployeeStatus::Active,
        project_assignment: None,
        manager: Some(EmployeeId("emp-9".to_string())),
        join_date: NaiveDate::from_ymd_opt(2021, 8, 20).expect("valid date"),
    }
}

pub(super) fn admin() -> Employee {
    Employee {
        id: EmployeeId("emp-9".to_string()),
        name: "Alex Rivera".to_string(),
        email: "alex@example.com".to_string(),
        role: Role::Admin,
        department: "People Operations".to_string(),
        location: "New York".to_string(),
        status: EmployeeStatus::Active,
        project_assignment: None,
        manager: None,
        join_date: NaiveDate::from_ymd_opt(2019, 2, 1).expect("valid date"),
    }
}

pub(super) fn certification(
    id: &str,
    owner: &EmployeeId,
    expiry: NaiveDate,
) -> Certification {
    Certification {
        id: CertificationId(id.to_string()),
        name: "Certified Kubernetes Administrator".to_string(),
        employee_id: owner.clone(),
        issued_date: expiry - Duration::days(730),
        expiry_date: expiry,
        issuer: Some("CNCF".to_string()),
        credential_id: None,
        verification_url: None,
        category: None,
        tags: BTreeSet::new(),
        project_assignment: None,
        priority: None,
    }
}

pub(super) fn training(
    id: &str,
    assignee: &EmployeeId,
    progress: u8,
    due_date: Option<NaiveDate>,
) -> Training {
    Training {
        id: TrainingId(id.to_string()),
        course_name: "Kubernetes Fundamentals".to_string(),
        description: "Introduction to Kubernetes concepts".to_string(),
        assigned_to: assignee.clone(),
        assigned_by: EmployeeId("emp-9".to_string()),
        progress,
        due_date,
        start_date: None,
        completed_date: None,
        category: None,
        duration: None,
        tags: BTreeSet::new(),
        project_assignment: None,
        priority: None,
        provider: None,
        cost: None,
    }
}

pub(super) fn assessment(
    owner: &EmployeeId,
    skill: &str,
    last_updated: NaiveDate,
) -> SkillAssessment {
    SkillAssessment {
        employee_id: owner.clone(),
        skill_id: SkillId(skill.to_string()),
        proficiency: 4,
        notes: None,
        last_updated,
        assessed_by: Assessor::SelfAssessed,
    }
}

/// Member with a fresh assessment, one expiring certification, and one
/// unstarted training due in five days.
pub(super) fn dataset() -> WorkforceDataset {
    let today = fixed_today();
    let member = member();
    let admin = admin();

    WorkforceDataset {
        employees: vec![member.clone(), admin],
        skills: vec![Skill {
            id: SkillId("sk-1".to_string()),
            name: "Kubernetes".to_string(),
            category: SkillCategory::DevOps,
            description: "Container orchestration".to_string(),
            tags: BTreeSet::new(),
        }],
        assessments: vec![assessment(&member.id, "sk-1", today - Duration::days(5))],
        certifications: vec![certification(
            "cert-1",
            &member.id,
            today + Duration::days(10),
        )],
        trainings: vec![training(
            "tr-1",
            &member.id,
            0,
            Some(today + Duration::days(5)),
        )],
    }
}

#[derive(Default)]
pub(super) struct MemoryWorkforceStore {
    dataset: Mutex<WorkforceDataset>,
}

impl MemoryWorkforceStore {
    pub(super) fn with_dataset(dataset: WorkforceDataset) -> Arc<Self> {
        Arc::new(Self {
            dataset: Mutex::new(dataset),
        })
    }
}

impl WorkforceStore for MemoryWorkforceStore {
    fn load(&self) -> Result<WorkforceDataset, StoreError> {
        Ok(self.dataset.lock().expect("dataset mutex poisoned").clone())
    }

    fn save(&self, dataset: &WorkforceDataset) -> Result<(), StoreError> {
        *self.dataset.lock().expect("dataset mutex poisoned") = dataset.clone();
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryNotificationStore {
    feeds: Mutex<HashMap<EmployeeId, Vec<Notification>>>,
    welcomed: Mutex<HashSet<EmployeeId>>,
}

impl NotificationStore for MemoryNotificationStore {
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

/// Store that fails every call, for exercising 500 paths.
pub(super) struct UnavailableNotificationStore;

impl NotificationStore for UnavailableNotificationStore {
    fn load_feed(&self, _viewer: &EmployeeId) -> Result<Vec<Notification>, StoreError> {
        Err(StoreError::Unavailable("feed store offline".to_string()))
    }

    fn save_feed(&self, _viewer: &EmployeeId, _entries: &[Notification]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("feed store offline".to_string()))
    }

    fn was_welcomed(&self, _viewer: &EmployeeId) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("feed store offline".to_string()))
    }

    fn set_welcomed(&self, _viewer: &EmployeeId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("feed store offline".to_string()))
    }
}

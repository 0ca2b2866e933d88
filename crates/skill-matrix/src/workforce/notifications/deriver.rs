use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use super::super::domain::{
    CertificationStatus, Employee, Priority, Role, TrainingStatus, WorkforceDataset,
};
use super::domain::{Notification, NotificationKind};
use super::feed::NotificationFeed;

/// Staleness threshold for the assessment reminder, in days.
const ASSESSMENT_REMINDER_AFTER_DAYS: i64 = 30;
/// Trainings due within this many days trigger the due-soon notice.
const TRAINING_DUE_WINDOW_DAYS: i64 = 7;

/// Derive the fresh notification set for one viewer from point-in-time facts.
/// Pure and total: malformed or absent optional fields suppress the affected
/// notification kind instead of failing.
pub fn derive(
    viewer: &Employee,
    dataset: &WorkforceDataset,
    today: NaiveDate,
    now: DateTime<Utc>,
    welcomed: bool,
) -> Vec<Notification> {
    let mut fresh = Vec::new();

    // Expiring certifications owned by the viewer. Expired certifications are
    // surfaced as a distinct state elsewhere and deliberately not re-notified.
    for certification in dataset
        .certifications
        .iter()
        .filter(|certification| certification.employee_id == viewer.id)
    {
        if certification.status(today) == CertificationStatus::ExpiringSoon {
            let days = certification.days_until_expiry(today);
            fresh.push(Notification {
                id: format!("cert-expiry-{}", certification.id.0),
                kind: NotificationKind::CertificationExpiry,
                title: "Certification expiring soon".to_string(),
                message: format!(
                    "Your {} certification expires in {} day{}",
                    certification.name,
                    days,
                    plural(days)
                ),
                timestamp: now,
                read: false,
                priority: Priority::High,
                action_url: Some("/certifications".to_string()),
                metadata: BTreeMap::from([
                    ("certification_id".to_string(), json!(certification.id.0)),
                    ("days_until_expiry".to_string(), json!(days)),
                ]),
            });
        }
    }

    // Trainings the viewer has not yet started, due within the window. An
    // in-progress training near its due date does not notify.
    for training in dataset
        .trainings
        .iter()
        .filter(|training| training.assigned_to == viewer.id)
    {
        if training.status() != TrainingStatus::NotStarted {
            continue;
        }
        let Some(days) = training.days_until_due(today) else {
            continue;
        };
        if days > 0 && days <= TRAINING_DUE_WINDOW_DAYS {
            fresh.push(Notification {
                id: format!("training-due-{}", training.id.0),
                kind: NotificationKind::TrainingDue,
                title: "Training due soon".to_string(),
                message: format!(
                    "{} is due in {} day{}",
                    training.course_name,
                    days,
                    plural(days)
                ),
                timestamp: now,
                read: false,
                priority: Priority::Medium,
                action_url: Some("/training".to_string()),
                metadata: BTreeMap::from([
                    ("training_id".to_string(), json!(training.id.0)),
                    ("days_until_due".to_string(), json!(days)),
                ]),
            });
        }
    }

    // Assessment staleness. With no assessments on record the baseline is the
    // epoch, so the reminder always fires for unassessed viewers.
    let last_assessment = dataset
        .assessments
        .iter()
        .filter(|assessment| assessment.employee_id == viewer.id)
        .map(|assessment| assessment.last_updated)
        .max()
        // NaiveDate::default() is the Unix epoch.
        .unwrap_or_default();
    let days_stale = (today - last_assessment).num_days();
    if days_stale > ASSESSMENT_REMINDER_AFTER_DAYS {
        fresh.push(Notification {
            id: "skill-assessment-reminder".to_string(),
            kind: NotificationKind::SkillAssessment,
            title: "Skill assessment reminder".to_string(),
            message: format!("It has been {days_stale} days since your last skill update"),
            timestamp: now,
            read: false,
            priority: Priority::Low,
            action_url: Some("/skills".to_string()),
            metadata: BTreeMap::from([(
                "days_since_last_assessment".to_string(),
                json!(days_stale),
            )]),
        });
    }

    if viewer.role == Role::Admin {
        let expiring = dataset
            .certifications
            .iter()
            .filter(|certification| certification.status(today) == CertificationStatus::ExpiringSoon)
            .count();
        if expiring > 0 {
            fresh.push(Notification {
                id: "admin-cert-expiry".to_string(),
                kind: NotificationKind::System,
                title: "Team certifications expiring".to_string(),
                message: format!(
                    "{} team certification{} are expiring soon",
                    expiring,
                    plural(expiring as i64)
                ),
                timestamp: now,
                read: false,
                priority: Priority::High,
                action_url: Some("/employees".to_string()),
                metadata: BTreeMap::from([("count".to_string(), json!(expiring))]),
            });
        }

        let pending = dataset
            .trainings
            .iter()
            .filter(|training| training.status() == TrainingStatus::NotStarted)
            .count();
        if pending > 0 {
            fresh.push(Notification {
                id: "admin-pending-training".to_string(),
                kind: NotificationKind::System,
                title: "Pending training assignments".to_string(),
                message: format!(
                    "{} training course{} have not been started yet",
                    pending,
                    plural(pending as i64)
                ),
                timestamp: now,
                read: false,
                priority: Priority::Medium,
                action_url: Some("/analytics".to_string()),
                metadata: BTreeMap::from([("count".to_string(), json!(pending))]),
            });
        }
    }

    if !welcomed {
        let (message, action_url) = match viewer.role {
            Role::Admin => (
                "Explore the admin dashboard to manage your team's skills and development",
                "/dashboard",
            ),
            Role::User => (
                "Start by updating your skills and exploring available training courses",
                "/skills",
            ),
        };
        fresh.push(Notification {
            id: "welcome-notification".to_string(),
            kind: NotificationKind::System,
            title: "Welcome to the skill matrix portal!".to_string(),
            message: message.to_string(),
            timestamp: now,
            read: false,
            priority: Priority::Low,
            action_url: Some(action_url.to_string()),
            metadata: BTreeMap::from([("is_welcome".to_string(), json!(true))]),
        });
    }

    fresh
}

/// Full derivation pass: derive the fresh set and merge it over the
/// previously persisted entries, preserving read state and timestamps of
/// anything already seen.
pub fn derive_feed(
    viewer: &Employee,
    dataset: &WorkforceDataset,
    previous: Vec<Notification>,
    welcomed: bool,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> NotificationFeed {
    let fresh = derive(viewer, dataset, today, now, welcomed);
    let mut feed = NotificationFeed::new(previous);
    feed.merge(fresh);
    feed
}

fn plural(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

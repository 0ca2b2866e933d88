use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::super::domain::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    CertificationExpiry,
    TrainingDue,
    SkillAssessment,
    Achievement,
    System,
}

impl NotificationKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::CertificationExpiry => "Certification Expiry",
            Self::TrainingDue => "Training Due",
            Self::SkillAssessment => "Skill Assessment",
            Self::Achievement => "Achievement",
            Self::System => "System",
        }
    }
}

/// One feed entry. The id is a deterministic function of the triggering fact
/// (`cert-expiry-<id>`, `training-due-<id>`, ...), which is what makes
/// re-derivation idempotent. `read` is the only field a viewer ever mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    /// Opaque facts used to render the message; never reinterpreted here.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

/// Caller-supplied draft for an ad hoc feed entry; id and timestamp are
/// assigned on insertion.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

/// Merged feed state returned to callers after every derivation or mutation.
#[derive(Debug, Clone, Serialize)]
pub struct FeedSnapshot {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

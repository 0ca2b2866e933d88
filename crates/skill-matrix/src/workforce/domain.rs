use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier wrapper for employees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Identifier wrapper for skills.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkillId(pub String);

/// Identifier wrapper for certifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificationId(pub String);

/// Identifier wrapper for training assignments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrainingId(pub String);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::User => "Employee",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    OnLeave,
}

impl EmployeeStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::OnLeave => "On Leave",
        }
    }
}

/// Fixed skill taxonomy used across the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Programming,
    Database,
    Cloud,
    #[serde(rename = "devops")]
    DevOps,
    #[serde(rename = "ai_ml")]
    AiMl,
}

impl SkillCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::Programming => "Programming",
            Self::Database => "Database",
            Self::Cloud => "Cloud",
            Self::DevOps => "DevOps",
            Self::AiMl => "AI/ML",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl TrainingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationStatus {
    Active,
    ExpiringSoon,
    Expired,
}

impl CertificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Expired => "Expired",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Who recorded an assessment: the employee themselves, or a named reviewer.
/// Serialized as the literal `"self"` or the reviewer's employee id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assessor {
    SelfAssessed,
    Reviewer(EmployeeId),
}

impl Serialize for Assessor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Assessor::SelfAssessed => serializer.serialize_str("self"),
            Assessor::Reviewer(id) => serializer.serialize_str(&id.0),
        }
    }
}

impl<'de> Deserialize<'de> for Assessor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Err(D::Error::custom("assessor must be 'self' or an employee id"));
        }
        if raw == "self" {
            Ok(Assessor::SelfAssessed)
        } else {
            Ok(Assessor::Reviewer(EmployeeId(raw)))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    /// Unique per employee; the store compares emails case-insensitively.
    pub email: String,
    pub role: Role,
    pub department: String,
    pub location: String,
    pub status: EmployeeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_assignment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<EmployeeId>,
    pub join_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub category: SkillCategory,
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

/// One proficiency assessment; the store guarantees at most one per
/// (employee, skill) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAssessment {
    pub employee_id: EmployeeId,
    pub skill_id: SkillId,
    /// 1 (novice) to 5 (expert). 0 never appears in stored assessments; it is
    /// the matrix placeholder for "not assessed".
    pub proficiency: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub last_updated: NaiveDate,
    pub assessed_by: Assessor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: CertificationId,
    pub name: String,
    pub employee_id: EmployeeId,
    pub issued_date: NaiveDate,
    pub expiry_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_assignment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Certification {
    /// Signed whole days between `today` and the expiry date.
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }

    /// Status is a pure function of the expiry date, recomputed on every
    /// read; stored status fields are never trusted.
    pub fn status(&self, today: NaiveDate) -> CertificationStatus {
        let days = self.days_until_expiry(today);
        if days <= 0 {
            CertificationStatus::Expired
        } else if days <= 30 {
            CertificationStatus::ExpiringSoon
        } else {
            CertificationStatus::Active
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Training {
    pub id: TrainingId,
    pub course_name: String,
    pub description: String,
    pub assigned_to: EmployeeId,
    pub assigned_by: EmployeeId,
    /// Completion percentage, 0-100.
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Set by the store exactly when progress reaches 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_assignment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
}

impl Training {
    /// Status derived from progress; 0 means not started, 100 (or anything
    /// above, tolerated) means completed.
    pub fn status(&self) -> TrainingStatus {
        match self.progress {
            0 => TrainingStatus::NotStarted,
            p if p >= 100 => TrainingStatus::Completed,
            _ => TrainingStatus::InProgress,
        }
    }

    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        self.due_date.map(|due| (due - today).num_days())
    }
}

/// The five entity collections the engines operate over. Owned and mutated by
/// the surrounding store; the analytics and notification code only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkforceDataset {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub assessments: Vec<SkillAssessment>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub trainings: Vec<Training>,
}

impl WorkforceDataset {
    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| &employee.id == id)
    }

    pub fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.iter().find(|skill| &skill.id == id)
    }

    pub fn assessment(&self, employee: &EmployeeId, skill: &SkillId) -> Option<&SkillAssessment> {
        self.assessments
            .iter()
            .find(|assessment| &assessment.employee_id == employee && &assessment.skill_id == skill)
    }
}

use std::str::FromStr;

use serde_json::{json, Value};

use super::super::domain::{Assessor, WorkforceDataset};

/// Which collection an export covers. `All` bundles every collection and is
/// only available as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Employees,
    Skills,
    Certifications,
    Trainings,
    Assessments,
    All,
}

impl ExportKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::Skills => "skills",
            Self::Certifications => "certifications",
            Self::Trainings => "trainings",
            Self::Assessments => "assessments",
            Self::All => "all",
        }
    }
}

impl FromStr for ExportKind {
    type Err = ExportError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "employees" => Ok(Self::Employees),
            "skills" => Ok(Self::Skills),
            "certifications" => Ok(Self::Certifications),
            "trainings" => Ok(Self::Trainings),
            "assessments" => Ok(Self::Assessments),
            "all" => Ok(Self::All),
            other => Err(ExportError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Error enumeration for export failures.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unknown export kind: {0}")]
    UnknownKind(String),
    #[error("unknown export format: {0}")]
    UnknownFormat(String),
    #[error("the combined export is only available as JSON")]
    CsvUnsupported,
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write CSV: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON export of one collection, or the whole dataset for `All`. Derived
/// fields (certification/training status) are intentionally absent: exports
/// carry source-of-truth data only.
pub fn export_json(dataset: &WorkforceDataset, kind: ExportKind) -> Value {
    match kind {
        ExportKind::Employees => json!(dataset.employees),
        ExportKind::Skills => json!(dataset.skills),
        ExportKind::Certifications => json!(dataset.certifications),
        ExportKind::Trainings => json!(dataset.trainings),
        ExportKind::Assessments => json!(dataset.assessments),
        ExportKind::All => json!({
            "employees": dataset.employees,
            "skills": dataset.skills,
            "assessments": dataset.assessments,
            "certifications": dataset.certifications,
            "trainings": dataset.trainings,
        }),
    }
}

/// CSV export of one collection. Optional fields serialize as empty columns;
/// tag sets are joined with `;`.
pub fn export_csv(dataset: &WorkforceDataset, kind: ExportKind) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    match kind {
        ExportKind::Employees => {
            writer.write_record([
                "id",
                "name",
                "email",
                "role",
                "department",
                "location",
                "status",
                "project_assignment",
                "manager",
                "join_date",
            ])?;
            for employee in &dataset.employees {
                writer.write_record([
                    employee.id.0.clone(),
                    employee.name.clone(),
                    employee.email.clone(),
                    employee.role.label().to_string(),
                    employee.department.clone(),
                    employee.location.clone(),
                    employee.status.label().to_string(),
                    employee.project_assignment.clone().unwrap_or_default(),
                    employee
                        .manager
                        .as_ref()
                        .map(|manager| manager.0.clone())
                        .unwrap_or_default(),
                    employee.join_date.to_string(),
                ])?;
            }
        }
        ExportKind::Skills => {
            writer.write_record(["id", "name", "category", "description", "tags"])?;
            for skill in &dataset.skills {
                writer.write_record([
                    skill.id.0.clone(),
                    skill.name.clone(),
                    skill.category.label().to_string(),
                    skill.description.clone(),
                    skill.tags.iter().cloned().collect::<Vec<_>>().join(";"),
                ])?;
            }
        }
        ExportKind::Certifications => {
            writer.write_record([
                "id",
                "name",
                "employee_id",
                "issued_date",
                "expiry_date",
                "issuer",
                "credential_id",
                "category",
                "priority",
            ])?;
            for certification in &dataset.certifications {
                writer.write_record([
                    certification.id.0.clone(),
                    certification.name.clone(),
                    certification.employee_id.0.clone(),
                    certification.issued_date.to_string(),
                    certification.expiry_date.to_string(),
                    certification.issuer.clone().unwrap_or_default(),
                    certification.credential_id.clone().unwrap_or_default(),
                    certification.category.clone().unwrap_or_default(),
                    certification
                        .priority
                        .map(|priority| priority.label().to_string())
                        .unwrap_or_default(),
                ])?;
            }
        }
        ExportKind::Trainings => {
            writer.write_record([
                "id",
                "course_name",
                "assigned_to",
                "assigned_by",
                "progress",
                "due_date",
                "start_date",
                "completed_date",
                "category",
                "provider",
                "cost",
            ])?;
            for training in &dataset.trainings {
                writer.write_record([
                    training.id.0.clone(),
                    training.course_name.clone(),
                    training.assigned_to.0.clone(),
                    training.assigned_by.0.clone(),
                    training.progress.to_string(),
                    training
                        .due_date
                        .map(|date| date.to_string())
                        .unwrap_or_default(),
                    training
                        .start_date
                        .map(|date| date.to_string())
                        .unwrap_or_default(),
                    training
                        .completed_date
                        .map(|date| date.to_string())
                        .unwrap_or_default(),
                    training.category.clone().unwrap_or_default(),
                    training.provider.clone().unwrap_or_default(),
                    training
                        .cost
                        .map(|cost| cost.to_string())
                        .unwrap_or_default(),
                ])?;
            }
        }
        ExportKind::Assessments => {
            writer.write_record([
                "employee_id",
                "skill_id",
                "proficiency",
                "notes",
                "last_updated",
                "assessed_by",
            ])?;
            for assessment in &dataset.assessments {
                let assessed_by = match &assessment.assessed_by {
                    Assessor::SelfAssessed => "self".to_string(),
                    Assessor::Reviewer(id) => id.0.clone(),
                };
                writer.write_record([
                    assessment.employee_id.0.clone(),
                    assessment.skill_id.0.clone(),
                    assessment.proficiency.to_string(),
                    assessment.notes.clone().unwrap_or_default(),
                    assessment.last_updated.to_string(),
                    assessed_by,
                ])?;
            }
        }
        ExportKind::All => return Err(ExportError::CsvUnsupported),
    }

    writer.flush()?;
    let data = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

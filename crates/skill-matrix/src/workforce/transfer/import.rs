use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::domain::{Assessor, EmployeeId, SkillAssessment, SkillId, WorkforceDataset};

/// Bulk assessment upload. Parsing is strict (malformed CSV fails the whole
/// import); row semantics are lenient (bad rows are collected as errors while
/// the rest apply).
#[derive(Debug)]
pub struct AssessmentCsvImporter {
    rows: Vec<RawRow>,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    employee_id: String,
    skill_id: String,
    proficiency: String,
    #[serde(default)]
    notes: Option<String>,
    last_updated: String,
    assessed_by: String,
}

/// Outcome of applying an import: row counts plus per-row rejections.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub processed: usize,
    pub created: usize,
    pub updated: usize,
    pub errors: Vec<RowError>,
}

/// One rejected row; `row` is 1-based and excludes the header line.
#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

/// Error enumeration for import failures.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read assessment upload: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid assessment CSV data: {0}")]
    Csv(#[from] csv::Error),
}

impl AssessmentCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = Vec::new();
        for record in csv_reader.deserialize::<RawRow>() {
            rows.push(record?);
        }
        Ok(Self { rows })
    }

    /// Upsert the parsed rows into the dataset by (employee, skill) pair.
    pub fn apply_to(&self, dataset: &mut WorkforceDataset) -> ImportSummary {
        let mut summary = ImportSummary {
            processed: self.rows.len(),
            created: 0,
            updated: 0,
            errors: Vec::new(),
        };

        for (index, row) in self.rows.iter().enumerate() {
            let row_number = index + 1;
            match validate_row(row, dataset) {
                Ok(assessment) => {
                    let existing = dataset.assessments.iter_mut().find(|candidate| {
                        candidate.employee_id == assessment.employee_id
                            && candidate.skill_id == assessment.skill_id
                    });
                    match existing {
                        Some(entry) => {
                            *entry = assessment;
                            summary.updated += 1;
                        }
                        None => {
                            dataset.assessments.push(assessment);
                            summary.created += 1;
                        }
                    }
                }
                Err(message) => summary.errors.push(RowError {
                    row: row_number,
                    message,
                }),
            }
        }

        summary
    }
}

fn validate_row(row: &RawRow, dataset: &WorkforceDataset) -> Result<SkillAssessment, String> {
    let employee_id = EmployeeId(row.employee_id.clone());
    if dataset.employee(&employee_id).is_none() {
        return Err(format!("unknown employee: {}", row.employee_id));
    }

    let skill_id = SkillId(row.skill_id.clone());
    if dataset.skill(&skill_id).is_none() {
        return Err(format!("unknown skill: {}", row.skill_id));
    }

    let proficiency: u8 = row
        .proficiency
        .parse()
        .map_err(|_| format!("proficiency '{}' is not a number", row.proficiency))?;
    if !(1..=5).contains(&proficiency) {
        return Err(format!("proficiency {proficiency} is outside 1-5"));
    }

    let last_updated = NaiveDate::parse_from_str(&row.last_updated, "%Y-%m-%d")
        .map_err(|_| format!("last_updated '{}' is not YYYY-MM-DD", row.last_updated))?;

    let assessed_by = if row.assessed_by == "self" {
        Assessor::SelfAssessed
    } else if row.assessed_by.is_empty() {
        return Err("assessed_by must be 'self' or an employee id".to_string());
    } else {
        Assessor::Reviewer(EmployeeId(row.assessed_by.clone()))
    };

    Ok(SkillAssessment {
        employee_id,
        skill_id,
        proficiency,
        notes: row.notes.clone().filter(|notes| !notes.is_empty()),
        last_updated,
        assessed_by,
    })
}

use chrono::NaiveDate;
use serde::Serialize;

use super::super::domain::{
    Assessor, CertificationStatus, EmployeeId, Role, SkillCategory, SkillId, TrainingStatus,
};

/// Headline dashboard snapshot; every field is derived from the dataset and
/// safe to serialize straight into an HTTP response.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_employees: usize,
    pub total_skills: usize,
    pub total_certifications: usize,
    pub total_trainings: usize,
    /// Mean proficiency over all assessments, rounded to 2 decimals; 0.0 when
    /// no assessments exist.
    pub average_skill_level: f64,
    pub skills_by_category: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: SkillCategory,
    pub category_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixEmployee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: Role,
}

/// One cell of the employee x skill cross product. Unassessed pairs carry
/// proficiency 0 and empty optional fields.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixCell {
    pub skill_id: SkillId,
    pub skill_name: String,
    pub category: SkillCategory,
    pub proficiency: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessed_by: Option<Assessor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow {
    pub employee: MatrixEmployee,
    pub skills: Vec<MatrixCell>,
}

/// Department-filterable analytics rollup for the reporting views.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsOverview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub total_employees: usize,
    pub total_skills: usize,
    pub total_assessments: usize,
    /// Mean proficiency over the in-scope assessments, rounded to 1 decimal.
    pub average_skill_level: f64,
    pub proficiency_distribution: Vec<ProficiencyBucket>,
    pub department_comparison: Vec<DepartmentBreakdown>,
    pub training_status: Vec<TrainingStatusCount>,
    pub certification_status: Vec<CertificationStatusCount>,
    pub top_skills: Vec<TopSkill>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProficiencyBucket {
    pub level: u8,
    pub count: usize,
    /// Whole-percent share of in-scope assessments at this level.
    pub share_pct: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentBreakdown {
    pub department: String,
    pub employees: usize,
    pub assessments: usize,
    pub average_skill_level: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingStatusCount {
    pub status: TrainingStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CertificationStatusCount {
    pub status: CertificationStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopSkill {
    pub skill_id: SkillId,
    pub name: String,
    pub category: SkillCategory,
    pub assessments: usize,
    pub average_level: f64,
}

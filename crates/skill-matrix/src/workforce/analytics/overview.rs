use std::collections::HashSet;

use chrono::NaiveDate;

use super::super::domain::{
    CertificationStatus, EmployeeId, TrainingStatus, WorkforceDataset,
};
use super::stats::round_to;
use super::views::{
    AnalyticsOverview, CertificationStatusCount, DepartmentBreakdown, ProficiencyBucket, TopSkill,
    TrainingStatusCount,
};

const TOP_SKILL_LIMIT: usize = 10;

/// Department-filterable analytics rollup. The department filter scopes
/// employees, assessments, and top skills; training and certification
/// breakdowns stay organization-wide.
pub fn analytics_overview(
    dataset: &WorkforceDataset,
    today: NaiveDate,
    department: Option<&str>,
) -> AnalyticsOverview {
    let in_scope: Vec<_> = dataset
        .employees
        .iter()
        .filter(|employee| department.map_or(true, |dept| employee.department == dept))
        .collect();
    let in_scope_ids: HashSet<&EmployeeId> = in_scope.iter().map(|employee| &employee.id).collect();

    let scoped_assessments: Vec<_> = dataset
        .assessments
        .iter()
        .filter(|assessment| in_scope_ids.contains(&assessment.employee_id))
        .collect();

    let average_skill_level = if scoped_assessments.is_empty() {
        0.0
    } else {
        let sum: f64 = scoped_assessments
            .iter()
            .map(|assessment| f64::from(assessment.proficiency))
            .sum();
        round_to(sum / scoped_assessments.len() as f64, 1)
    };

    let proficiency_distribution = (1..=5u8)
        .map(|level| {
            let count = scoped_assessments
                .iter()
                .filter(|assessment| assessment.proficiency == level)
                .count();
            let share_pct = if scoped_assessments.is_empty() {
                0
            } else {
                ((count as f64 / scoped_assessments.len() as f64) * 100.0).round() as u32
            };
            ProficiencyBucket {
                level,
                count,
                share_pct,
            }
        })
        .collect();

    let mut departments: Vec<&str> = Vec::new();
    for employee in &dataset.employees {
        if !departments.contains(&employee.department.as_str()) {
            departments.push(&employee.department);
        }
    }
    let department_comparison = departments
        .into_iter()
        .map(|dept| {
            let members: HashSet<&EmployeeId> = dataset
                .employees
                .iter()
                .filter(|employee| employee.department == dept)
                .map(|employee| &employee.id)
                .collect();
            let assessments: Vec<_> = dataset
                .assessments
                .iter()
                .filter(|assessment| members.contains(&assessment.employee_id))
                .collect();
            let average = if assessments.is_empty() {
                0.0
            } else {
                let sum: f64 = assessments
                    .iter()
                    .map(|assessment| f64::from(assessment.proficiency))
                    .sum();
                round_to(sum / assessments.len() as f64, 1)
            };
            DepartmentBreakdown {
                department: dept.to_string(),
                employees: members.len(),
                assessments: assessments.len(),
                average_skill_level: average,
            }
        })
        .collect();

    let training_status = [
        TrainingStatus::Completed,
        TrainingStatus::InProgress,
        TrainingStatus::NotStarted,
    ]
    .into_iter()
    .map(|status| TrainingStatusCount {
        status,
        status_label: status.label(),
        count: dataset
            .trainings
            .iter()
            .filter(|training| training.status() == status)
            .count(),
    })
    .collect();

    let certification_status = [
        CertificationStatus::Active,
        CertificationStatus::ExpiringSoon,
        CertificationStatus::Expired,
    ]
    .into_iter()
    .map(|status| CertificationStatusCount {
        status,
        status_label: status.label(),
        count: dataset
            .certifications
            .iter()
            .filter(|certification| certification.status(today) == status)
            .count(),
    })
    .collect();

    let mut top_skills: Vec<TopSkill> = dataset
        .skills
        .iter()
        .map(|skill| {
            let assessments: Vec<_> = scoped_assessments
                .iter()
                .filter(|assessment| assessment.skill_id == skill.id)
                .collect();
            let average_level = if assessments.is_empty() {
                0.0
            } else {
                let sum: f64 = assessments
                    .iter()
                    .map(|assessment| f64::from(assessment.proficiency))
                    .sum();
                round_to(sum / assessments.len() as f64, 1)
            };
            TopSkill {
                skill_id: skill.id.clone(),
                name: skill.name.clone(),
                category: skill.category,
                assessments: assessments.len(),
                average_level,
            }
        })
        .collect();
    top_skills.sort_by(|a, b| b.assessments.cmp(&a.assessments));
    top_skills.truncate(TOP_SKILL_LIMIT);

    AnalyticsOverview {
        department: department.map(str::to_string),
        total_employees: in_scope.len(),
        total_skills: dataset.skills.len(),
        total_assessments: scoped_assessments.len(),
        average_skill_level,
        proficiency_distribution,
        department_comparison,
        training_status,
        certification_status,
        top_skills,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workforce::domain::{
        Assessor, Certification, CertificationId, Employee, EmployeeStatus, Role, Skill,
        SkillAssessment, SkillCategory, SkillId, Training, TrainingId,
    };
    use chrono::Duration;
    use std::collections::BTreeSet;

    fn employee(id: &str, department: &str) -> Employee {
        Employee {
            id: EmployeeId(id.to_string()),
            name: id.to_string(),
            email: format!("{id}@example.com"),
            role: Role::User,
            department: department.to_string(),
            location: "Remote".to_string(),
            status: EmployeeStatus::Active,
            project_assignment: None,
            manager: None,
            join_date: NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date"),
        }
    }

    fn assessment(employee: &str, skill: &str, proficiency: u8) -> SkillAssessment {
        SkillAssessment {
            employee_id: EmployeeId(employee.to_string()),
            skill_id: SkillId(skill.to_string()),
            proficiency,
            notes: None,
            last_updated: NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date"),
            assessed_by: Assessor::SelfAssessed,
        }
    }

    fn sample_dataset(today: NaiveDate) -> WorkforceDataset {
        WorkforceDataset {
            employees: vec![
                employee("emp-1", "Engineering"),
                employee("emp-2", "Engineering"),
                employee("emp-3", "Analytics"),
            ],
            skills: vec![
                Skill {
                    id: SkillId("sk-1".to_string()),
                    name: "Rust".to_string(),
                    category: SkillCategory::Programming,
                    description: String::new(),
                    tags: BTreeSet::new(),
                },
                Skill {
                    id: SkillId("sk-2".to_string()),
                    name: "PostgreSQL".to_string(),
                    category: SkillCategory::Database,
                    description: String::new(),
                    tags: BTreeSet::new(),
                },
            ],
            assessments: vec![
                assessment("emp-1", "sk-1", 5),
                assessment("emp-2", "sk-1", 3),
                assessment("emp-3", "sk-2", 4),
            ],
            certifications: vec![Certification {
                id: CertificationId("cert-1".to_string()),
                name: "CKA".to_string(),
                employee_id: EmployeeId("emp-1".to_string()),
                issued_date: today - Duration::days(700),
                expiry_date: today + Duration::days(10),
                issuer: None,
                credential_id: None,
                verification_url: None,
                category: None,
                tags: BTreeSet::new(),
                project_assignment: None,
                priority: None,
            }],
            trainings: vec![Training {
                id: TrainingId("tr-1".to_string()),
                course_name: "Advanced React Patterns".to_string(),
                description: String::new(),
                assigned_to: EmployeeId("emp-1".to_string()),
                assigned_by: EmployeeId("emp-3".to_string()),
                progress: 65,
                due_date: None,
                start_date: None,
                completed_date: None,
                category: None,
                duration: None,
                tags: BTreeSet::new(),
                project_assignment: None,
                priority: None,
                provider: None,
                cost: None,
            }],
        }
    }

    #[test]
    fn department_filter_scopes_employees_and_assessments() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
        let overview = analytics_overview(&sample_dataset(today), today, Some("Engineering"));

        assert_eq!(overview.department.as_deref(), Some("Engineering"));
        assert_eq!(overview.total_employees, 2);
        assert_eq!(overview.total_assessments, 2);
        assert_eq!(overview.average_skill_level, 4.0);

        let rust = &overview.top_skills[0];
        assert_eq!(rust.name, "Rust");
        assert_eq!(rust.assessments, 2);
        assert_eq!(rust.average_level, 4.0);
        // The other department's PostgreSQL assessment is out of scope.
        assert_eq!(overview.top_skills[1].assessments, 0);
    }

    #[test]
    fn breakdowns_stay_org_wide() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
        let overview = analytics_overview(&sample_dataset(today), today, Some("Analytics"));

        let in_progress = overview
            .training_status
            .iter()
            .find(|entry| entry.status == TrainingStatus::InProgress)
            .expect("in-progress bucket present");
        assert_eq!(in_progress.count, 1);

        let expiring = overview
            .certification_status
            .iter()
            .find(|entry| entry.status == CertificationStatus::ExpiringSoon)
            .expect("expiring bucket present");
        assert_eq!(expiring.count, 1);
    }

    #[test]
    fn distribution_percentages_cover_in_scope_assessments() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
        let overview = analytics_overview(&sample_dataset(today), today, None);

        assert_eq!(overview.total_assessments, 3);
        let level_four = &overview.proficiency_distribution[3];
        assert_eq!(level_four.level, 4);
        assert_eq!(level_four.count, 1);
        assert_eq!(level_four.share_pct, 33);
    }

    #[test]
    fn empty_dataset_produces_zeroed_overview() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
        let overview = analytics_overview(&WorkforceDataset::default(), today, None);

        assert_eq!(overview.total_employees, 0);
        assert_eq!(overview.average_skill_level, 0.0);
        assert!(overview.department_comparison.is_empty());
        assert!(overview.top_skills.is_empty());
        assert!(overview
            .proficiency_distribution
            .iter()
            .all(|bucket| bucket.count == 0 && bucket.share_pct == 0));
    }
}

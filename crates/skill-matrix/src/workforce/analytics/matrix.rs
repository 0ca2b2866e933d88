use std::collections::HashMap;

use super::super::domain::{EmployeeId, SkillAssessment, SkillId, WorkforceDataset};
use super::views::{MatrixCell, MatrixEmployee, MatrixRow};

/// Cross every employee with every skill. This is an outer join: employees
/// appear with all skills whether or not an assessment exists, and rows
/// follow the input ordering of both collections (callers typically pre-sort
/// by name).
pub fn skill_matrix(dataset: &WorkforceDataset) -> Vec<MatrixRow> {
    let assessments: HashMap<(&EmployeeId, &SkillId), &SkillAssessment> = dataset
        .assessments
        .iter()
        .map(|assessment| ((&assessment.employee_id, &assessment.skill_id), assessment))
        .collect();

    dataset
        .employees
        .iter()
        .map(|employee| {
            let skills = dataset
                .skills
                .iter()
                .map(|skill| match assessments.get(&(&employee.id, &skill.id)) {
                    Some(assessment) => MatrixCell {
                        skill_id: skill.id.clone(),
                        skill_name: skill.name.clone(),
                        category: skill.category,
                        proficiency: assessment.proficiency,
                        notes: assessment.notes.clone(),
                        last_updated: Some(assessment.last_updated),
                        assessed_by: Some(assessment.assessed_by.clone()),
                    },
                    None => MatrixCell {
                        skill_id: skill.id.clone(),
                        skill_name: skill.name.clone(),
                        category: skill.category,
                        proficiency: 0,
                        notes: None,
                        last_updated: None,
                        assessed_by: None,
                    },
                })
                .collect();

            MatrixRow {
                employee: MatrixEmployee {
                    id: employee.id.clone(),
                    name: employee.name.clone(),
                    email: employee.email.clone(),
                    department: employee.department.clone(),
                    role: employee.role,
                },
                skills,
            }
        })
        .collect()
}

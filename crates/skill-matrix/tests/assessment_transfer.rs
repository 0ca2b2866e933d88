use std::collections::BTreeSet;
use std::io::Cursor;

use chrono::NaiveDate;
use skill_matrix::workforce::analytics::dashboard_stats;
use skill_matrix::workforce::domain::{
    Employee, EmployeeId, EmployeeStatus, Role, Skill, SkillCategory, SkillId, WorkforceDataset,
};
use skill_matrix::workforce::transfer::{export_csv, AssessmentCsvImporter, ExportKind};

fn dataset() -> WorkforceDataset {
    WorkforceDataset {
        employees: vec![Employee {
            id: EmployeeId("emp-1".to_string()),
            name: "Lisa Wang".to_string(),
            email: "lisa@example.com".to_string(),
            role: Role::User,
            department: "Analytics".to_string(),
            location: "Boston".to_string(),
            status: EmployeeStatus::Active,
            project_assignment: None,
            manager: None,
            join_date: NaiveDate::from_ymd_opt(2022, 7, 1).expect("valid date"),
        }],
        skills: vec![Skill {
            id: SkillId("sk-1".to_string()),
            name: "Python".to_string(),
            category: SkillCategory::Programming,
            description: "Python programming".to_string(),
            tags: BTreeSet::new(),
        }],
        assessments: Vec::new(),
        certifications: Vec::new(),
        trainings: Vec::new(),
    }
}

#[test]
fn imported_assessments_flow_into_the_dashboard() {
    let mut dataset = dataset();
    let csv = "employee_id,skill_id,proficiency,notes,last_updated,assessed_by\n\
               emp-1,sk-1,5,,2026-02-20,self\n";

    let importer = AssessmentCsvImporter::from_reader(Cursor::new(csv)).expect("import parses");
    let summary = importer.apply_to(&mut dataset);
    assert_eq!(summary.created, 1);
    assert!(summary.errors.is_empty());

    let stats = dashboard_stats(&dataset);
    assert_eq!(stats.average_skill_level, 5.0);
}

#[test]
fn export_round_trips_through_the_importer() {
    let mut dataset = dataset();
    let seed = "employee_id,skill_id,proficiency,notes,last_updated,assessed_by\n\
                emp-1,sk-1,3,quarterly review,2026-01-15,self\n";
    AssessmentCsvImporter::from_reader(Cursor::new(seed))
        .expect("seed parses")
        .apply_to(&mut dataset);

    let exported = export_csv(&dataset, ExportKind::Assessments).expect("export builds");

    let mut reimported = dataset.clone();
    reimported.assessments.clear();
    let summary = AssessmentCsvImporter::from_reader(Cursor::new(exported))
        .expect("exported csv parses")
        .apply_to(&mut reimported);

    assert_eq!(summary.created, 1);
    assert!(summary.errors.is_empty());
    assert_eq!(reimported.assessments, dataset.assessments);
}

use crate::infra::{load_dataset, parse_date, InMemoryNotificationStore, InMemoryWorkforceStore};
use chrono::{Duration, Local, NaiveDate, Utc};
use clap::Args;
use skill_matrix::error::AppError;
use skill_matrix::workforce::analytics::views::{AnalyticsOverview, DashboardStats};
use skill_matrix::workforce::analytics::{analytics_overview, dashboard_stats, skill_matrix};
use skill_matrix::workforce::domain::{
    Assessor, Certification, CertificationId, Employee, EmployeeId, EmployeeStatus, Role, Skill,
    SkillAssessment, SkillCategory, SkillId, Training, TrainingId, WorkforceDataset,
};
use skill_matrix::workforce::notifications::{FeedSnapshot, NotificationService};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// JSON dataset file; the built-in sample dataset is used when omitted
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Evaluation date for the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Restrict the analytics rollup to one department
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Include the full employee x skill matrix in the output
    #[arg(long)]
    pub(crate) list_matrix: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// JSON dataset file; the built-in sample dataset is used when omitted
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Override the evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the notification walkthrough portion of the demo
    #[arg(long)]
    pub(crate) skip_notifications: bool,
}

/// Seed dataset used by `serve` and the CLI demos when no dataset file is
/// given. Dates are relative to `today` so the derived states stay
/// interesting: one expiring certification, one training due this week, and
/// one employee overdue for a skill refresh.
pub(crate) fn sample_dataset(today: NaiveDate) -> WorkforceDataset {
    let admin = EmployeeId("emp-0".to_string());

    let employee = |id: &str, name: &str, email: &str, role, department: &str, location: &str| {
        Employee {
            id: EmployeeId(id.to_string()),
            name: name.to_string(),
            email: email.to_string(),
            role,
            department: department.to_string(),
            location: location.to_string(),
            status: EmployeeStatus::Active,
            project_assignment: None,
            manager: if id == "emp-0" {
                None
            } else {
                Some(admin.clone())
            },
            join_date: today - Duration::days(700),
        }
    };

    let skill = |id: &str, name: &str, category, description: &str| Skill {
        id: SkillId(id.to_string()),
        name: name.to_string(),
        category,
        description: description.to_string(),
        tags: BTreeSet::new(),
    };

    let assessment = |employee: &str, skill: &str, proficiency, days_ago, assessor| {
        SkillAssessment {
            employee_id: EmployeeId(employee.to_string()),
            skill_id: SkillId(skill.to_string()),
            proficiency,
            notes: None,
            last_updated: today - Duration::days(days_ago),
            assessed_by: assessor,
        }
    };

    WorkforceDataset {
        employees: vec![
            employee(
                "emp-0",
                "Alex Rivera",
                "alex@company.com",
                Role::Admin,
                "People Operations",
                "New York",
            ),
            employee(
                "emp-1",
                "John Doe",
                "john@company.com",
                Role::User,
                "Engineering",
                "New York",
            ),
            employee(
                "emp-2",
                "Sarah Johnson",
                "sarah@company.com",
                Role::User,
                "Engineering",
                "San Francisco",
            ),
            employee(
                "emp-3",
                "Mike Chen",
                "mike@company.com",
                Role::User,
                "Infrastructure",
                "Seattle",
            ),
            employee(
                "emp-4",
                "Lisa Wang",
                "lisa@company.com",
                Role::User,
                "Analytics",
                "Boston",
            ),
        ],
        skills: vec![
            skill("sk-1", "React", SkillCategory::Frontend, "React.js development"),
            skill("sk-2", "Node.js", SkillCategory::Backend, "Server-side JavaScript"),
            skill("sk-3", "TypeScript", SkillCategory::Programming, "Typed JavaScript"),
            skill("sk-4", "PostgreSQL", SkillCategory::Database, "Relational database"),
            skill("sk-5", "AWS", SkillCategory::Cloud, "Amazon Web Services"),
            skill("sk-6", "Docker", SkillCategory::DevOps, "Containerization"),
            skill("sk-7", "Python", SkillCategory::Programming, "Python programming"),
            skill("sk-8", "Java", SkillCategory::Programming, "Java programming"),
            skill("sk-9", "Kubernetes", SkillCategory::DevOps, "Container orchestration"),
            skill(
                "sk-10",
                "Machine Learning",
                SkillCategory::AiMl,
                "ML algorithms and models",
            ),
        ],
        assessments: vec![
            // John's assessments are deliberately stale to trip the reminder.
            assessment("emp-1", "sk-1", 5, 45, Assessor::SelfAssessed),
            assessment("emp-1", "sk-3", 4, 45, Assessor::Reviewer(admin.clone())),
            assessment("emp-1", "sk-2", 3, 50, Assessor::SelfAssessed),
            assessment("emp-2", "sk-1", 4, 12, Assessor::SelfAssessed),
            assessment("emp-2", "sk-2", 5, 12, Assessor::Reviewer(admin.clone())),
            assessment("emp-2", "sk-4", 3, 16, Assessor::SelfAssessed),
            assessment("emp-3", "sk-6", 5, 6, Assessor::Reviewer(admin.clone())),
            assessment("emp-3", "sk-9", 4, 6, Assessor::SelfAssessed),
            assessment("emp-3", "sk-5", 4, 10, Assessor::SelfAssessed),
            assessment("emp-4", "sk-7", 5, 4, Assessor::Reviewer(admin.clone())),
            assessment("emp-4", "sk-10", 4, 4, Assessor::SelfAssessed),
            assessment("emp-4", "sk-4", 3, 8, Assessor::SelfAssessed),
        ],
        certifications: vec![
            Certification {
                id: CertificationId("cert-1".to_string()),
                name: "AWS Certified Developer".to_string(),
                employee_id: EmployeeId("emp-1".to_string()),
                issued_date: today - Duration::days(610),
                expiry_date: today + Duration::days(120),
                issuer: Some("Amazon Web Services".to_string()),
                credential_id: None,
                verification_url: None,
                category: Some("Cloud".to_string()),
                tags: BTreeSet::new(),
                project_assignment: None,
                priority: None,
            },
            Certification {
                id: CertificationId("cert-2".to_string()),
                name: "Certified Kubernetes Administrator".to_string(),
                employee_id: EmployeeId("emp-3".to_string()),
                issued_date: today - Duration::days(710),
                expiry_date: today + Duration::days(20),
                issuer: Some("CNCF".to_string()),
                credential_id: None,
                verification_url: None,
                category: Some("DevOps".to_string()),
                tags: BTreeSet::new(),
                project_assignment: None,
                priority: None,
            },
            Certification {
                id: CertificationId("cert-3".to_string()),
                name: "Google Cloud Professional".to_string(),
                employee_id: EmployeeId("emp-2".to_string()),
                issued_date: today - Duration::days(790),
                expiry_date: today - Duration::days(60),
                issuer: Some("Google".to_string()),
                credential_id: None,
                verification_url: None,
                category: Some("Cloud".to_string()),
                tags: BTreeSet::new(),
                project_assignment: None,
                priority: None,
            },
        ],
        trainings: vec![
            Training {
                id: TrainingId("tr-1".to_string()),
                course_name: "Advanced React Patterns".to_string(),
                description: "Learn advanced React patterns and hooks".to_string(),
                assigned_to: EmployeeId("emp-1".to_string()),
                assigned_by: admin.clone(),
                progress: 65,
                due_date: Some(today + Duration::days(30)),
                start_date: Some(today - Duration::days(20)),
                completed_date: None,
                category: Some("Frontend".to_string()),
                duration: Some("6 weeks".to_string()),
                tags: BTreeSet::new(),
                project_assignment: None,
                priority: None,
                provider: None,
                cost: None,
            },
            Training {
                id: TrainingId("tr-2".to_string()),
                course_name: "Kubernetes Fundamentals".to_string(),
                description: "Introduction to Kubernetes concepts".to_string(),
                assigned_to: EmployeeId("emp-2".to_string()),
                assigned_by: admin.clone(),
                progress: 0,
                due_date: Some(today + Duration::days(5)),
                start_date: None,
                completed_date: None,
                category: Some("DevOps".to_string()),
                duration: Some("4 weeks".to_string()),
                tags: BTreeSet::new(),
                project_assignment: None,
                priority: None,
                provider: None,
                cost: None,
            },
            Training {
                id: TrainingId("tr-3".to_string()),
                course_name: "Machine Learning with Python".to_string(),
                description: "Comprehensive ML course using Python".to_string(),
                assigned_to: EmployeeId("emp-4".to_string()),
                assigned_by: admin,
                progress: 100,
                due_date: None,
                start_date: Some(today - Duration::days(60)),
                completed_date: Some(today - Duration::days(10)),
                category: Some("AI/ML".to_string()),
                duration: Some("8 weeks".to_string()),
                tags: BTreeSet::new(),
                project_assignment: None,
                priority: None,
                provider: None,
                cost: Some(450),
            },
        ],
    }
}

pub(crate) fn resolve_dataset(
    path: Option<PathBuf>,
    today: NaiveDate,
) -> Result<(WorkforceDataset, bool), AppError> {
    match path {
        Some(path) => Ok((load_dataset(path)?, true)),
        None => Ok((sample_dataset(today), false)),
    }
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        dataset,
        today,
        department,
        list_matrix,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let (dataset, imported) = resolve_dataset(dataset, today)?;

    let stats = dashboard_stats(&dataset);
    let overview = analytics_overview(&dataset, today, department.as_deref());

    println!("Skill matrix report (evaluated {today})");
    if imported {
        println!("Data source: dataset file");
    } else {
        println!("Data source: built-in sample dataset");
    }

    render_stats(&stats);
    render_overview(&overview);

    if list_matrix {
        println!("\nSkill matrix");
        for row in skill_matrix(&dataset) {
            let assessed: Vec<String> = row
                .skills
                .iter()
                .filter(|cell| cell.proficiency > 0)
                .map(|cell| format!("{} L{}", cell.skill_name, cell.proficiency))
                .collect();
            let summary = if assessed.is_empty() {
                "no assessments".to_string()
            } else {
                assessed.join(", ")
            };
            println!("- {} ({}): {}", row.employee.name, row.employee.department, summary);
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        dataset,
        today,
        skip_notifications,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let (dataset, _) = resolve_dataset(dataset, today)?;

    println!("Skill matrix portal demo (evaluated {today})");
    render_stats(&dashboard_stats(&dataset));
    render_overview(&analytics_overview(&dataset, today, None));

    if skip_notifications {
        return Ok(());
    }

    let workforce = Arc::new(InMemoryWorkforceStore::with_dataset(dataset.clone()));
    let feeds = Arc::new(InMemoryNotificationStore::default());
    let service = NotificationService::new(workforce, feeds);

    println!("\nNotification walkthrough");
    for employee in &dataset.employees {
        let snapshot = service
            .refresh(&employee.id, today, Utc::now())
            .map_err(|err| {
                AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))
            })?;
        render_feed(&employee.name, &snapshot);
    }

    // A second pass derives nothing new: the merge is idempotent and the
    // welcome entries stay one-shot.
    let first = &dataset.employees[0];
    let again = service
        .refresh(&first.id, today, Utc::now())
        .map_err(|err| {
            AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))
        })?;
    println!(
        "\nSecond refresh for {}: {} notifications, {} unread (unchanged)",
        first.name,
        again.notifications.len(),
        again.unread_count
    );

    Ok(())
}

fn render_stats(stats: &DashboardStats) {
    println!("\nDashboard");
    println!(
        "- {} employees, {} skills, {} certifications, {} trainings",
        stats.total_employees, stats.total_skills, stats.total_certifications, stats.total_trainings
    );
    println!("- Average skill level: {}", stats.average_skill_level);
    for entry in &stats.skills_by_category {
        println!("- {}: {} skills", entry.category_label, entry.count);
    }
}

fn render_overview(overview: &AnalyticsOverview) {
    println!("\nAnalytics");
    match &overview.department {
        Some(department) => println!("- Scope: {department}"),
        None => println!("- Scope: organization-wide"),
    }
    println!(
        "- {} assessments, average level {}",
        overview.total_assessments, overview.average_skill_level
    );

    println!("- Proficiency distribution:");
    for bucket in &overview.proficiency_distribution {
        println!(
            "    Level {}: {} ({}%)",
            bucket.level, bucket.count, bucket.share_pct
        );
    }

    println!("- Training status:");
    for entry in &overview.training_status {
        println!("    {}: {}", entry.status_label, entry.count);
    }

    println!("- Certification status:");
    for entry in &overview.certification_status {
        println!("    {}: {}", entry.status_label, entry.count);
    }

    if let Some(top) = overview.top_skills.first() {
        println!(
            "- Most assessed skill: {} ({} assessments, average {})",
            top.name, top.assessments, top.average_level
        );
    }
}

fn render_feed(name: &str, snapshot: &FeedSnapshot) {
    println!("\n{name}: {} unread", snapshot.unread_count);
    for notification in &snapshot.notifications {
        println!(
            "- [{}] {}: {}",
            notification.priority.label(),
            notification.title,
            notification.message
        );
    }
}

use super::super::domain::WorkforceDataset;
use super::views::{CategoryCount, DashboardStats};

pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Compute the dashboard snapshot. Pure function of the dataset; an empty
/// dataset yields zero counts and a 0.0 average rather than a division error.
pub fn dashboard_stats(dataset: &WorkforceDataset) -> DashboardStats {
    let average_skill_level = if dataset.assessments.is_empty() {
        0.0
    } else {
        let sum: f64 = dataset
            .assessments
            .iter()
            .map(|assessment| f64::from(assessment.proficiency))
            .sum();
        round_to(sum / dataset.assessments.len() as f64, 2)
    };

    // Only the categories present in the input, in first-seen order; the
    // order is stable for identical input but otherwise unspecified.
    let mut skills_by_category: Vec<CategoryCount> = Vec::new();
    for skill in &dataset.skills {
        match skills_by_category
            .iter_mut()
            .find(|entry| entry.category == skill.category)
        {
            Some(entry) => entry.count += 1,
            None => skills_by_category.push(CategoryCount {
                category: skill.category,
                category_label: skill.category.label(),
                count: 1,
            }),
        }
    }

    DashboardStats {
        total_employees: dataset.employees.len(),
        total_skills: dataset.skills.len(),
        total_certifications: dataset.certifications.len(),
        total_trainings: dataset.trainings.len(),
        average_skill_level,
        skills_by_category,
    }
}

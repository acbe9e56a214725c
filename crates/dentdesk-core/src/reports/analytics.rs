//! Practice-wide analytics.

use serde::{Deserialize, Serialize};

use super::{escape_csv, percentage};
use crate::models::{Appointment, AppointmentStatus, PlanStatus, StepType, TreatmentPlan};

/// A labelled count and its share of the group total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Breakdown {
    pub label: String,
    pub count: usize,
    pub percent: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PracticeAnalytics {
    pub total_plans: usize,
    pub plans_by_status: Vec<Breakdown>,
    pub total_appointments: usize,
    pub appointments_by_status: Vec<Breakdown>,
    pub total_steps: usize,
    pub procedures_by_type: Vec<Breakdown>,
    /// Total cost of completed plans
    pub completed_revenue: f64,
    /// Patient responsibility on active plans
    pub outstanding_balance: f64,
    pub generated_at: String,
}

impl PracticeAnalytics {
    pub fn compute(plans: &[TreatmentPlan], appointments: &[Appointment]) -> Self {
        let plans_by_status = breakdown(
            PlanStatus::ALL
                .iter()
                .map(|status| {
                    let count = plans.iter().filter(|p| p.status == *status).count();
                    (status.as_str().to_string(), count)
                })
                .collect(),
        );

        let appointments_by_status = breakdown(
            AppointmentStatus::ALL
                .iter()
                .map(|status| {
                    let count = appointments.iter().filter(|a| a.status == *status).count();
                    (status.as_str().to_string(), count)
                })
                .collect(),
        );

        let steps: Vec<_> = plans.iter().flat_map(|p| p.steps.iter()).collect();
        let procedures_by_type = breakdown(
            StepType::ALL
                .iter()
                .map(|step_type| {
                    let count = steps.iter().filter(|s| s.step_type == *step_type).count();
                    (step_type.label().to_string(), count)
                })
                .collect(),
        );

        let completed_revenue: f64 = plans
            .iter()
            .filter(|p| p.status == PlanStatus::Completed)
            .map(|p| p.total_cost)
            .sum();
        let outstanding_balance: f64 = plans
            .iter()
            .filter(|p| p.status == PlanStatus::Active)
            .map(|p| p.patient_responsibility())
            .sum();

        Self {
            total_plans: plans.len(),
            plans_by_status,
            total_appointments: appointments.len(),
            appointments_by_status,
            total_steps: steps.len(),
            procedures_by_type,
            completed_revenue,
            outstanding_balance,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format, one row per breakdown entry.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("group,label,count,percent\n");

        let groups = [
            ("plans", &self.plans_by_status),
            ("appointments", &self.appointments_by_status),
            ("procedures", &self.procedures_by_type),
        ];
        for (group, rows) in groups {
            for row in rows.iter() {
                csv.push_str(&format!(
                    "{},{},{},{}\n",
                    group,
                    escape_csv(&row.label),
                    row.count,
                    row.percent
                ));
            }
        }

        csv
    }
}

fn breakdown(counts: Vec<(String, usize)>) -> Vec<Breakdown> {
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    counts
        .into_iter()
        .map(|(label, count)| Breakdown {
            label,
            count,
            percent: percentage(count as f64, total as f64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn find<'a>(rows: &'a [Breakdown], label: &str) -> &'a Breakdown {
        rows.iter().find(|r| r.label == label).unwrap()
    }

    #[test]
    fn test_compute_over_fixtures() {
        let analytics =
            PracticeAnalytics::compute(&fixtures::treatment_plans(), &fixtures::appointments());

        assert_eq!(analytics.total_plans, 3);
        assert_eq!(find(&analytics.plans_by_status, "active").count, 1);
        assert_eq!(find(&analytics.plans_by_status, "active").percent, 33);
        assert_eq!(find(&analytics.plans_by_status, "cancelled").percent, 0);

        assert_eq!(analytics.total_appointments, 6);
        assert_eq!(find(&analytics.appointments_by_status, "confirmed").count, 3);
        assert_eq!(find(&analytics.appointments_by_status, "confirmed").percent, 50);

        assert_eq!(analytics.total_steps, 5);
        assert_eq!(find(&analytics.procedures_by_type, "Root Canal").count, 1);
        assert_eq!(find(&analytics.procedures_by_type, "Root Canal").percent, 20);

        assert_eq!(analytics.completed_revenue, 450.0);
        assert_eq!(analytics.outstanding_balance, 74.0);
    }

    #[test]
    fn test_empty_inputs() {
        let analytics = PracticeAnalytics::compute(&[], &[]);
        assert_eq!(analytics.total_plans, 0);
        assert!(analytics.plans_by_status.iter().all(|r| r.percent == 0));
        assert_eq!(analytics.completed_revenue, 0.0);
    }

    #[test]
    fn test_csv_rows() {
        let analytics =
            PracticeAnalytics::compute(&fixtures::treatment_plans(), &fixtures::appointments());
        let csv = analytics.to_csv();
        // Header + 4 plan statuses + 3 appointment statuses + 5 procedure types
        assert_eq!(csv.lines().count(), 13);
        assert!(csv.contains("appointments,pending,2,33"));
    }
}

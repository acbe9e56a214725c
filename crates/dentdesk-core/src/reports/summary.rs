//! Printable treatment plan summary.

use serde::{Deserialize, Serialize};

use super::{escape_csv, format_currency, percentage};
use crate::models::{Patient, StepStatus, TreatmentPlan};

/// One procedure line on a printed plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryLine {
    pub procedure: String,
    pub description: String,
    /// Comma-separated tooth numbers
    pub teeth: String,
    pub status: StepStatus,
    pub scheduled_date: Option<String>,
    pub cost: f64,
}

/// A treatment plan as the patient sees it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentSummary {
    pub plan_id: String,
    pub title: String,
    pub patient_id: String,
    pub patient_name: Option<String>,
    pub insurance_provider: Option<String>,
    pub lines: Vec<SummaryLine>,
    pub total_cost: f64,
    pub insurance_coverage: f64,
    pub patient_responsibility: f64,
    /// Share of the cost insurance pays
    pub coverage_percent: u8,
    /// Completed steps over non-cancelled steps
    pub progress_percent: u8,
    pub generated_at: String,
}

impl TreatmentSummary {
    pub fn from_plan(plan: &TreatmentPlan, patient: Option<&Patient>) -> Self {
        let lines = plan
            .steps
            .iter()
            .map(|step| SummaryLine {
                procedure: step.step_type.label().to_string(),
                description: step.description.clone(),
                teeth: step
                    .teeth
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                status: step.status,
                scheduled_date: step.scheduled_date.clone(),
                cost: step.cost.unwrap_or(0.0),
            })
            .collect();

        let billable = plan.billable_steps().count();
        let completed = plan
            .steps
            .iter()
            .filter(|step| step.status == StepStatus::Completed)
            .count();

        Self {
            plan_id: plan.id.clone(),
            title: plan.title.clone(),
            patient_id: plan.patient_id.clone(),
            patient_name: patient.map(|p| p.name.clone()),
            insurance_provider: patient
                .and_then(|p| p.insurance.as_ref())
                .map(|i| i.provider.clone()),
            lines,
            total_cost: plan.total_cost,
            insurance_coverage: plan.insurance_coverage,
            patient_responsibility: plan.patient_responsibility(),
            coverage_percent: percentage(plan.insurance_coverage, plan.total_cost),
            progress_percent: percentage(completed as f64, billable as f64),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format, one row per procedure.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("plan_id,patient_id,procedure,description,teeth,status,scheduled_date,cost\n");

        for line in &self.lines {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{:.2}\n",
                escape_csv(&self.plan_id),
                escape_csv(&self.patient_id),
                escape_csv(&line.procedure),
                escape_csv(&line.description),
                escape_csv(&line.teeth),
                line.status.as_str(),
                escape_csv(line.scheduled_date.as_deref().unwrap_or("")),
                line.cost,
            ));
        }

        csv
    }

    /// Plain-text totals block for the printed footer.
    pub fn totals_text(&self) -> String {
        format!(
            "Total: {}\nInsurance ({}%): {}\nPatient responsibility: {}",
            format_currency(self.total_cost),
            self.coverage_percent,
            format_currency(self.insurance_coverage),
            format_currency(self.patient_responsibility),
        )
    }
}

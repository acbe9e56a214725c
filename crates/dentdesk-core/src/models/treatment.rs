//! Treatment plan models.

use serde::{Deserialize, Serialize};

/// Treatment plan status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Being authored, not yet presented to the patient
    Draft,
    /// Accepted and in progress
    Active,
    Completed,
    Cancelled,
}

impl PlanStatus {
    pub const ALL: [PlanStatus; 4] = [Self::Draft, Self::Active, Self::Completed, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

/// Procedure performed in a treatment step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    Filling,
    Extraction,
    Crown,
    RootCanal,
    Hygiene,
}

impl StepType {
    pub const ALL: [StepType; 5] = [
        Self::Filling,
        Self::Extraction,
        Self::Crown,
        Self::RootCanal,
        Self::Hygiene,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filling => "filling",
            Self::Extraction => "extraction",
            Self::Crown => "crown",
            Self::RootCanal => "root_canal",
            Self::Hygiene => "hygiene",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Filling => "Filling",
            Self::Extraction => "Extraction",
            Self::Crown => "Crown",
            Self::RootCanal => "Root Canal",
            Self::Hygiene => "Hygiene",
        }
    }
}

/// Treatment step status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl StepStatus {
    pub const ALL: [StepStatus; 4] = [
        Self::Planned,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

/// One procedure within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentStep {
    /// Step ID
    pub id: String,
    /// Procedure type
    pub step_type: StepType,
    /// Description shown to the patient
    pub description: String,
    /// Tooth numbers (universal numbering); not validated
    pub teeth: Vec<u8>,
    pub status: StepStatus,
    /// Scheduled date (YYYY-MM-DD)
    pub scheduled_date: Option<String>,
    pub cost: Option<f64>,
    /// Reference to a clinical image
    pub image_url: Option<String>,
    pub notes: Option<String>,
}

impl TreatmentStep {
    /// Create a planned step.
    pub fn new(step_type: StepType, description: String, teeth: Vec<u8>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            step_type,
            description,
            teeth,
            status: StepStatus::Planned,
            scheduled_date: None,
            cost: None,
            image_url: None,
            notes: None,
        }
    }
}

/// A patient-scoped bundle of procedures with cost metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentPlan {
    /// Plan ID
    pub id: String,
    /// Patient ID
    pub patient_id: String,
    pub title: String,
    pub status: PlanStatus,
    /// Total cost of the plan
    pub total_cost: f64,
    /// Amount expected from insurance
    pub insurance_coverage: f64,
    /// Ordered procedures
    pub steps: Vec<TreatmentStep>,
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl TreatmentPlan {
    /// Create an empty draft plan.
    pub fn new(patient_id: String, title: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            title,
            status: PlanStatus::Draft,
            total_cost: 0.0,
            insurance_coverage: 0.0,
            steps: Vec::new(),
            notes: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// What the patient owes after insurance. Never negative.
    pub fn patient_responsibility(&self) -> f64 {
        (self.total_cost - self.insurance_coverage).max(0.0)
    }

    /// Sum of the step costs that are set.
    pub fn steps_cost(&self) -> f64 {
        self.steps.iter().filter_map(|step| step.cost).sum()
    }

    /// Steps that still count toward the plan (not cancelled).
    pub fn billable_steps(&self) -> impl Iterator<Item = &TreatmentStep> {
        self.steps
            .iter()
            .filter(|step| step.status != StepStatus::Cancelled)
    }

    /// First step that is planned or in progress.
    pub fn next_step(&self) -> Option<&TreatmentStep> {
        self.steps
            .iter()
            .find(|step| matches!(step.status, StepStatus::Planned | StepStatus::InProgress))
    }

    pub fn step(&self, step_id: &str) -> Option<&TreatmentStep> {
        self.steps.iter().find(|step| step.id == step_id)
    }

    pub fn step_mut(&mut self, step_id: &str) -> Option<&mut TreatmentStep> {
        self.steps.iter_mut().find(|step| step.id == step_id)
    }

    /// Check whether any step is of the given type.
    pub fn has_step_type(&self, step_type: StepType) -> bool {
        self.steps.iter().any(|step| step.step_type == step_type)
    }

    /// Apply a patch. Fields left as `None` are untouched.
    pub fn apply(&mut self, patch: TreatmentPatch) {
        if let Some(patient_id) = patch.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(total_cost) = patch.total_cost {
            self.total_cost = total_cost;
        }
        if let Some(insurance_coverage) = patch.insurance_coverage {
            self.insurance_coverage = insurance_coverage;
        }
        if let Some(steps) = patch.steps {
            self.steps = steps;
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        self.touch();
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Partial update for a treatment plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TreatmentPatch {
    pub patient_id: Option<String>,
    pub title: Option<String>,
    pub status: Option<PlanStatus>,
    pub total_cost: Option<f64>,
    pub insurance_coverage: Option<f64>,
    pub steps: Option<Vec<TreatmentStep>>,
    pub notes: Option<String>,
}

impl TreatmentPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_plan() -> TreatmentPlan {
        let mut plan = TreatmentPlan::new("patient-1".into(), "Restorative work".into());
        plan.total_cost = 1800.0;
        plan.insurance_coverage = 900.0;

        let mut filling = TreatmentStep::new(StepType::Filling, "Composite filling".into(), vec![14]);
        filling.status = StepStatus::Completed;
        filling.cost = Some(300.0);

        let mut crown = TreatmentStep::new(StepType::Crown, "Porcelain crown".into(), vec![3]);
        crown.cost = Some(1500.0);

        let mut cancelled = TreatmentStep::new(StepType::Hygiene, "Deep cleaning".into(), vec![]);
        cancelled.status = StepStatus::Cancelled;

        plan.steps = vec![filling, crown, cancelled];
        plan
    }

    #[test]
    fn test_new_plan_is_draft() {
        let plan = TreatmentPlan::new("patient-1".into(), "Checkup".into());
        assert_eq!(plan.status, PlanStatus::Draft);
        assert!(plan.steps.is_empty());
        assert_eq!(plan.created_at, plan.updated_at);
    }

    #[test]
    fn test_patient_responsibility() {
        let mut plan = make_plan();
        assert_eq!(plan.patient_responsibility(), 900.0);

        plan.insurance_coverage = 5000.0;
        assert_eq!(plan.patient_responsibility(), 0.0);
    }

    #[test]
    fn test_steps() {
        let plan = make_plan();
        assert_eq!(plan.steps_cost(), 1800.0);
        assert_eq!(plan.billable_steps().count(), 2);
        assert_eq!(plan.next_step().unwrap().step_type, StepType::Crown);
        assert!(plan.has_step_type(StepType::Hygiene));
        assert!(!plan.has_step_type(StepType::RootCanal));
    }

    #[test]
    fn test_apply_patch() {
        let mut plan = make_plan();
        plan.updated_at = "2020-01-01T00:00:00+00:00".into();

        plan.apply(TreatmentPatch {
            status: Some(PlanStatus::Active),
            notes: Some("Patient agreed".into()),
            ..Default::default()
        });

        assert_eq!(plan.status, PlanStatus::Active);
        assert_eq!(plan.notes.as_deref(), Some("Patient agreed"));
        assert_eq!(plan.title, "Restorative work");
        assert_ne!(plan.updated_at, "2020-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&StepType::RootCanal).unwrap(), "\"root_canal\"");
        assert_eq!(serde_json::to_string(&StepStatus::InProgress).unwrap(), "\"in_progress\"");
        assert_eq!(StepType::parse("root_canal"), Some(StepType::RootCanal));
        assert_eq!(PlanStatus::parse("archived"), None);
    }
}

//! Dentdesk Core Library
//!
//! Local-first dental practice core: patient records, appointments, clinical
//! image intake, treatment planning and report data.
//!
//! # Architecture
//!
//! ```text
//!     Image intake ─▶ Patient + symptoms ─▶ Analyzer ─▶ Diagnostic suggestion
//!         [wizard]                          (port)
//!                                                              │
//!                                              Clinician authors plan
//!                                                              │
//!                              ┌───────────────────────────────▼──────┐
//!                              │          Treatment Store             │
//!                              │  filters · sort · pagination · CRUD  │
//!                              └───────────────┬──────────────────────┘
//!                                              │ every mutation
//!                                              ▼
//!                                  StatePersistence ("treatment-store")
//!                                              │
//!                         ┌────────────────────┼────────────────────┐
//!                         ▼                    ▼                    ▼
//!                  Plan summaries       Practice analytics      SQLite db
//!                  (JSON / CSV)          (JSON / CSV)     patients, appointments
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer (patients, appointments, state blobs)
//! - [`models`]: Domain types (Patient, Appointment, TreatmentPlan, etc.)
//! - [`store`]: Treatment store with injected persistence
//! - [`wizard`]: Clinical intake state machine and analyzer port
//! - [`reports`]: Summaries, analytics and export
//! - [`fixtures`]: Sample clinic data

pub mod config;
pub mod db;
pub mod fixtures;
pub mod logging;
pub mod models;
pub mod reports;
pub mod store;
pub mod wizard;

// Re-export commonly used types
pub use config::CoreConfig;
pub use db::Database;
pub use models::{
    Appointment, AppointmentStatus, DiagnosticRecord, Patient, PlanStatus, StepStatus, StepType,
    TreatmentPatch, TreatmentPlan, TreatmentStep, UploadedImage,
};
pub use reports::{PracticeAnalytics, TreatmentSummary};
pub use store::{MemoryPersistence, StatePersistence, TreatmentStore};
pub use wizard::{AnalysisOutcome, Analyzer, FixtureAnalyzer, IntakeWizard, WizardStep};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

type SharedDatabase = Arc<Mutex<Database>>;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DentalError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl From<db::DbError> for DentalError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => DentalError::NotFound(what),
            other => DentalError::DatabaseError(other.to_string()),
        }
    }
}

impl From<store::StoreError> for DentalError {
    fn from(e: store::StoreError) -> Self {
        match e {
            store::StoreError::NotFound(what) => DentalError::NotFound(what),
            store::StoreError::InvalidInput(msg) => DentalError::InvalidInput(msg),
            store::StoreError::Json(e) => DentalError::SerializationError(e.to_string()),
            other => DentalError::DatabaseError(other.to_string()),
        }
    }
}

impl From<wizard::WizardError> for DentalError {
    fn from(e: wizard::WizardError) -> Self {
        match e {
            wizard::WizardError::UnsupportedMediaType(_)
            | wizard::WizardError::FileTooLarge { .. }
            | wizard::WizardError::TooManyFiles(_)
            | wizard::WizardError::DuplicateImage(_) => DentalError::InvalidInput(e.to_string()),
            other => DentalError::InvalidState(other.to_string()),
        }
    }
}

impl From<config::ConfigError> for DentalError {
    fn from(e: config::ConfigError) -> Self {
        DentalError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for DentalError {
    fn from(e: serde_json::Error) -> Self {
        DentalError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for DentalError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DentalError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
///
/// `config_json` overrides [`CoreConfig`] defaults; missing fields keep them.
#[uniffi::export]
pub fn open_core(path: String, config_json: Option<String>) -> Result<Arc<DentalCore>, DentalError> {
    let config = match config_json {
        Some(json) => CoreConfig::from_json(&json)?,
        None => CoreConfig::default(),
    };
    let db = Database::open(&path)?;
    Ok(Arc::new(DentalCore::with_database(db, config)?))
}

/// Create an in-memory core seeded with sample data (for demos and testing).
#[uniffi::export]
pub fn open_core_in_memory() -> Result<Arc<DentalCore>, DentalError> {
    let config = CoreConfig {
        seed_sample_data: true,
        ..CoreConfig::default()
    };
    let db = Database::open_in_memory()?;
    Ok(Arc::new(DentalCore::with_database(db, config)?))
}

/// Install the log subscriber. Returns `false` if one was already installed.
#[uniffi::export]
pub fn init_logging(directive: String) -> bool {
    logging::init_tracing(&directive)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe core wrapper for FFI.
///
/// The store persists through the shared database handle, so the database
/// lock is never held while calling into the store.
#[derive(uniffi::Object)]
pub struct DentalCore {
    config: CoreConfig,
    db: SharedDatabase,
    store: Mutex<TreatmentStore<SharedDatabase>>,
    wizard: Mutex<IntakeWizard>,
    analyzer: FixtureAnalyzer,
}

impl DentalCore {
    /// Build a core over an opened database.
    pub fn with_database(mut db: Database, config: CoreConfig) -> Result<Self, DentalError> {
        config.validate()?;

        if config.seed_sample_data {
            db.seed_sample_data()?;
        }
        // Sample plans only go into a store that was never saved
        let never_saved = db.get_state(&config.storage_key)?.is_none();

        let db = Arc::new(Mutex::new(db));
        let mut store = TreatmentStore::load_or_default(Arc::clone(&db), &config);
        if config.seed_sample_data && never_saved {
            // Reverse so the first sample plan ends up on top
            for plan in fixtures::treatment_plans().into_iter().rev() {
                store.add_treatment(plan)?;
            }
        }

        Ok(Self {
            wizard: Mutex::new(IntakeWizard::new(&config)),
            store: Mutex::new(store),
            analyzer: FixtureAnalyzer::with_sample_data(),
            db,
            config,
        })
    }
}

#[uniffi::export]
impl DentalCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Create a new patient.
    pub fn create_patient(
        &self,
        name: String,
        date_of_birth: String,
        phone: Option<String>,
        email: Option<String>,
    ) -> Result<FfiPatient, DentalError> {
        if name.trim().is_empty() {
            return Err(DentalError::InvalidInput("name cannot be empty".into()));
        }
        let mut patient = Patient::new(name, date_of_birth);
        patient.contact.phone = phone;
        patient.contact.email = email;

        let db = self.db.lock()?;
        db.insert_patient(&patient)?;
        Ok(patient.into())
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: String) -> Result<Option<FfiPatient>, DentalError> {
        let db = self.db.lock()?;
        Ok(db.get_patient(&id)?.map(Into::into))
    }

    /// Get a patient record as JSON, including history.
    pub fn get_patient_json(&self, id: String) -> Result<String, DentalError> {
        let db = self.db.lock()?;
        let patient = db
            .get_patient(&id)?
            .ok_or_else(|| DentalError::NotFound(format!("patient {id}")))?;
        Ok(serde_json::to_string(&patient)?)
    }

    /// List all patients.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, DentalError> {
        let db = self.db.lock()?;
        Ok(db.list_patients()?.into_iter().map(Into::into).collect())
    }

    /// Fuzzy patient lookup for the intake patient picker.
    pub fn find_patients(&self, query: String, limit: u32) -> Result<Vec<FfiPatient>, DentalError> {
        let patients = self.db.lock()?.list_patients()?;
        Ok(wizard::rank_patients(&query, &patients, limit as usize)
            .into_iter()
            .map(|m| m.patient.clone().into())
            .collect())
    }

    /// Delete a patient.
    pub fn delete_patient(&self, id: String) -> Result<bool, DentalError> {
        let db = self.db.lock()?;
        Ok(db.delete_patient(&id)?)
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    /// Book a pending appointment.
    pub fn book_appointment(
        &self,
        patient_id: String,
        date: String,
        time: String,
        duration_minutes: u32,
        appointment_type: String,
    ) -> Result<FfiAppointment, DentalError> {
        chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| DentalError::InvalidInput(format!("date {date}: {e}")))?;
        chrono::NaiveTime::parse_from_str(&time, "%H:%M")
            .map_err(|e| DentalError::InvalidInput(format!("time {time}: {e}")))?;

        let mut appointment = Appointment::new(patient_id, date, time, appointment_type);
        appointment.duration_minutes = duration_minutes;

        let db = self.db.lock()?;
        db.insert_appointment(&appointment)?;
        Ok(appointment.into())
    }

    /// Set an appointment's status ("confirmed", "pending", "cancelled").
    pub fn set_appointment_status(&self, id: String, status: String) -> Result<bool, DentalError> {
        let status = AppointmentStatus::parse(&status)
            .ok_or_else(|| DentalError::InvalidInput(format!("unknown status {status}")))?;
        let db = self.db.lock()?;
        Ok(db.update_appointment_status(&id, status)?)
    }

    /// List appointments on a day.
    pub fn appointments_on(&self, date: String) -> Result<Vec<FfiAppointment>, DentalError> {
        let db = self.db.lock()?;
        Ok(db.list_appointments_on(&date)?.into_iter().map(Into::into).collect())
    }

    /// List a patient's appointments, most recent first.
    pub fn appointments_for_patient(&self, patient_id: String) -> Result<Vec<FfiAppointment>, DentalError> {
        let db = self.db.lock()?;
        Ok(db
            .list_appointments_for_patient(&patient_id)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// List upcoming non-cancelled appointments.
    pub fn upcoming_appointments(&self, from_date: String, limit: u32) -> Result<Vec<FfiAppointment>, DentalError> {
        let db = self.db.lock()?;
        Ok(db
            .list_upcoming_appointments(&from_date, limit as usize)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    // =========================================================================
    // Treatment Store Operations
    // =========================================================================

    /// Add a plan given as JSON (a full `TreatmentPlan`).
    pub fn add_treatment_json(&self, plan_json: String) -> Result<FfiTreatmentPlan, DentalError> {
        let plan: TreatmentPlan = serde_json::from_str(&plan_json)?;
        let summary = FfiTreatmentPlan::from(&plan);
        self.store.lock()?.add_treatment(plan)?;
        Ok(summary)
    }

    /// Create an empty draft plan for a patient.
    pub fn create_treatment(&self, patient_id: String, title: String) -> Result<FfiTreatmentPlan, DentalError> {
        let plan = TreatmentPlan::new(patient_id, title);
        let summary = FfiTreatmentPlan::from(&plan);
        self.store.lock()?.add_treatment(plan)?;
        Ok(summary)
    }

    /// Apply a JSON `TreatmentPatch` to a plan.
    pub fn update_treatment_json(&self, id: String, patch_json: String) -> Result<bool, DentalError> {
        let patch: TreatmentPatch = serde_json::from_str(&patch_json)?;
        Ok(self.store.lock()?.update_treatment(&id, patch)?)
    }

    /// Delete a plan. Unknown ids return `false`.
    pub fn delete_treatment(&self, id: String) -> Result<bool, DentalError> {
        Ok(self.store.lock()?.delete_treatment(&id)?)
    }

    /// Full plan as JSON.
    pub fn get_treatment_json(&self, id: String) -> Result<String, DentalError> {
        let store = self.store.lock()?;
        let plan = store
            .get(&id)
            .ok_or_else(|| DentalError::NotFound(format!("treatment {id}")))?;
        Ok(serde_json::to_string(plan)?)
    }

    /// Append a procedure to a plan.
    pub fn add_treatment_step(
        &self,
        plan_id: String,
        step_type: String,
        description: String,
        teeth: Vec<u8>,
        cost: Option<f64>,
    ) -> Result<String, DentalError> {
        let step_type = StepType::parse(&step_type)
            .ok_or_else(|| DentalError::InvalidInput(format!("unknown step type {step_type}")))?;
        let mut step = TreatmentStep::new(step_type, description, teeth);
        step.cost = cost;
        let step_id = step.id.clone();
        self.store.lock()?.add_step(&plan_id, step)?;
        Ok(step_id)
    }

    /// Set a step's status ("planned", "in_progress", "completed", "cancelled").
    pub fn set_step_status(&self, plan_id: String, step_id: String, status: String) -> Result<(), DentalError> {
        let status = StepStatus::parse(&status)
            .ok_or_else(|| DentalError::InvalidInput(format!("unknown step status {status}")))?;
        Ok(self.store.lock()?.update_step_status(&plan_id, &step_id, status)?)
    }

    /// Remove a step from a plan. Returns `false` if the plan has no such step.
    pub fn remove_treatment_step(&self, plan_id: String, step_id: String) -> Result<bool, DentalError> {
        Ok(self.store.lock()?.remove_step(&plan_id, &step_id)?)
    }

    /// Merge filters and return to page 1.
    ///
    /// `None` leaves a filter unchanged. An empty string clears it, as does
    /// `"all"` for status and step type.
    pub fn set_treatment_filters(
        &self,
        status: Option<String>,
        patient_id: Option<String>,
        search: Option<String>,
        step_type: Option<String>,
    ) -> Result<(), DentalError> {
        let status = parse_filter(status, |s| {
            PlanStatus::parse(s).ok_or_else(|| DentalError::InvalidInput(format!("unknown plan status {s}")))
        })?;
        let step_type = parse_filter(step_type, |s| {
            StepType::parse(s).ok_or_else(|| DentalError::InvalidInput(format!("unknown step type {s}")))
        })?;

        Ok(self.store.lock()?.set_filters(store::FilterPatch {
            status,
            patient_id: patient_id.map(Some),
            search: search.map(Some),
            step_type,
        })?)
    }

    /// Sort the list by "created_at", "updated_at", "total_cost" or "title",
    /// "asc" or "desc". Returns to page 1.
    pub fn set_treatment_sort(&self, field: String, direction: String) -> Result<(), DentalError> {
        let field = match field.as_str() {
            "created_at" => store::SortField::CreatedAt,
            "updated_at" => store::SortField::UpdatedAt,
            "total_cost" => store::SortField::TotalCost,
            "title" => store::SortField::Title,
            other => return Err(DentalError::InvalidInput(format!("unknown sort field {other}"))),
        };
        let direction = match direction.as_str() {
            "asc" | "ascending" => store::SortDirection::Ascending,
            "desc" | "descending" => store::SortDirection::Descending,
            other => return Err(DentalError::InvalidInput(format!("unknown sort direction {other}"))),
        };
        Ok(self.store.lock()?.set_sort(store::Sort { field, direction })?)
    }

    pub fn clear_treatment_filters(&self) -> Result<(), DentalError> {
        Ok(self.store.lock()?.clear_filters()?)
    }

    pub fn set_treatment_page(&self, page: Option<u32>, page_size: Option<u32>) -> Result<(), DentalError> {
        Ok(self
            .store
            .lock()?
            .set_pagination(store::PaginationPatch { page, page_size })?)
    }

    /// Current page of the treatment list.
    pub fn treatment_page(&self) -> Result<FfiTreatmentPage, DentalError> {
        let page = self.store.lock()?.visible();
        Ok(page.into())
    }

    // =========================================================================
    // Intake Wizard Operations
    // =========================================================================

    /// Add an image to the intake. Returns the upload id.
    pub fn wizard_add_image(
        &self,
        file_name: String,
        media_type: String,
        bytes: Vec<u8>,
    ) -> Result<String, DentalError> {
        let image = UploadedImage::from_bytes(file_name, media_type, &bytes);
        let id = image.id.clone();
        self.wizard.lock()?.add_upload(image)?;
        Ok(id)
    }

    pub fn wizard_remove_image(&self, id: String) -> Result<bool, DentalError> {
        Ok(self.wizard.lock()?.remove_upload(&id)?)
    }

    pub fn wizard_select_patient(&self, patient_id: String) -> Result<(), DentalError> {
        if self.db.lock()?.get_patient(&patient_id)?.is_none() {
            return Err(DentalError::NotFound(format!("patient {patient_id}")));
        }
        Ok(self.wizard.lock()?.select_patient(patient_id)?)
    }

    pub fn wizard_clear_patient(&self) -> Result<(), DentalError> {
        Ok(self.wizard.lock()?.clear_patient()?)
    }

    pub fn wizard_toggle_symptom(&self, symptom: String) -> Result<bool, DentalError> {
        Ok(self.wizard.lock()?.toggle_symptom(&symptom)?)
    }

    pub fn wizard_set_notes(&self, notes: String) -> Result<(), DentalError> {
        Ok(self.wizard.lock()?.set_notes(&notes)?)
    }

    /// Move forward; returns the new step number.
    pub fn wizard_advance(&self) -> Result<u8, DentalError> {
        Ok(self.wizard.lock()?.advance()?.number())
    }

    /// Move back; returns the new step number.
    pub fn wizard_back(&self) -> Result<u8, DentalError> {
        Ok(self.wizard.lock()?.back().number())
    }

    /// Run the analyzer for the pending intake.
    pub fn wizard_run_analysis(&self) -> Result<FfiWizardState, DentalError> {
        let mut wizard = self.wizard.lock()?;
        wizard.run_analysis(&self.analyzer)?;
        Ok(FfiWizardState::from(&*wizard))
    }

    /// Diagnostic record of a finished analysis, as JSON.
    pub fn wizard_result_json(&self) -> Result<Option<String>, DentalError> {
        let wizard = self.wizard.lock()?;
        match wizard.outcome() {
            Some(AnalysisOutcome::Ready(record)) => Ok(Some(serde_json::to_string(record)?)),
            _ => Ok(None),
        }
    }

    pub fn wizard_state(&self) -> Result<FfiWizardState, DentalError> {
        let wizard = self.wizard.lock()?;
        Ok(FfiWizardState::from(&*wizard))
    }

    pub fn wizard_reset(&self) -> Result<(), DentalError> {
        self.wizard.lock()?.reset();
        Ok(())
    }

    // =========================================================================
    // Report Operations
    // =========================================================================

    /// Printable plan summary as JSON.
    pub fn treatment_summary_json(&self, plan_id: String) -> Result<String, DentalError> {
        Ok(self.treatment_summary(&plan_id)?.to_json()?)
    }

    /// Printable plan summary as CSV.
    pub fn treatment_summary_csv(&self, plan_id: String) -> Result<String, DentalError> {
        Ok(self.treatment_summary(&plan_id)?.to_csv())
    }

    /// Practice analytics as JSON.
    pub fn analytics_json(&self) -> Result<String, DentalError> {
        Ok(self.analytics()?.to_json()?)
    }

    /// Practice analytics as CSV.
    pub fn analytics_csv(&self) -> Result<String, DentalError> {
        Ok(self.analytics()?.to_csv())
    }

    /// Key the treatment store is persisted under.
    pub fn storage_key(&self) -> String {
        self.config.storage_key.clone()
    }
}

impl DentalCore {
    fn treatment_summary(&self, plan_id: &str) -> Result<TreatmentSummary, DentalError> {
        let plan = self
            .store
            .lock()?
            .get(plan_id)
            .cloned()
            .ok_or_else(|| DentalError::NotFound(format!("treatment {plan_id}")))?;
        let patient = self.db.lock()?.get_patient(&plan.patient_id)?;
        Ok(TreatmentSummary::from_plan(&plan, patient.as_ref()))
    }

    fn analytics(&self) -> Result<PracticeAnalytics, DentalError> {
        let plans = self.store.lock()?.treatments().to_vec();
        let appointments = self.db.lock()?.list_appointments()?;
        Ok(PracticeAnalytics::compute(&plans, &appointments))
    }
}

/// Empty or "all" clears the filter; anything else must parse.
fn parse_filter<T>(
    value: Option<String>,
    parse: impl Fn(&str) -> Result<T, DentalError>,
) -> Result<Option<Option<T>>, DentalError> {
    match value.as_deref().map(str::trim) {
        None => Ok(None),
        Some("") | Some("all") => Ok(Some(None)),
        Some(s) => parse(s).map(|v| Some(Some(v))),
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub name: String,
    pub date_of_birth: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub insurance_provider: Option<String>,
    pub coverage_percent: Option<f64>,
    pub last_visit: Option<String>,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        let (insurance_provider, coverage_percent) = match patient.insurance {
            Some(insurance) => (Some(insurance.provider), Some(insurance.coverage_percent)),
            None => (None, None),
        };
        Self {
            id: patient.id,
            name: patient.name,
            date_of_birth: patient.date_of_birth,
            phone: patient.contact.phone,
            email: patient.contact.email,
            insurance_provider,
            coverage_percent,
            last_visit: patient.last_visit,
        }
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub patient_id: String,
    pub date: String,
    pub time: String,
    pub duration_minutes: u32,
    pub appointment_type: String,
    pub status: String,
    pub notes: Option<String>,
}

impl From<Appointment> for FfiAppointment {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            patient_id: appointment.patient_id,
            date: appointment.date,
            time: appointment.time,
            duration_minutes: appointment.duration_minutes,
            appointment_type: appointment.appointment_type,
            status: appointment.status.as_str().to_string(),
            notes: appointment.notes,
        }
    }
}

/// FFI-safe treatment plan list row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTreatmentPlan {
    pub id: String,
    pub patient_id: String,
    pub title: String,
    pub status: String,
    pub total_cost: f64,
    pub insurance_coverage: f64,
    pub patient_responsibility: f64,
    pub step_count: u32,
    pub updated_at: String,
}

impl From<&TreatmentPlan> for FfiTreatmentPlan {
    fn from(plan: &TreatmentPlan) -> Self {
        Self {
            id: plan.id.clone(),
            patient_id: plan.patient_id.clone(),
            title: plan.title.clone(),
            status: plan.status.as_str().to_string(),
            total_cost: plan.total_cost,
            insurance_coverage: plan.insurance_coverage,
            patient_responsibility: plan.patient_responsibility(),
            step_count: plan.steps.len() as u32,
            updated_at: plan.updated_at.clone(),
        }
    }
}

/// FFI-safe page of treatment plans.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTreatmentPage {
    pub items: Vec<FfiTreatmentPlan>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub filtered_total: u64,
    pub total_pages: u32,
}

impl From<store::TreatmentPage> for FfiTreatmentPage {
    fn from(page: store::TreatmentPage) -> Self {
        Self {
            items: page.items.iter().map(FfiTreatmentPlan::from).collect(),
            page: page.info.page,
            page_size: page.info.page_size,
            total: page.info.total as u64,
            filtered_total: page.info.filtered_total as u64,
            total_pages: page.info.total_pages,
        }
    }
}

/// FFI-safe wizard snapshot.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiWizardState {
    pub step: u8,
    pub upload_count: u32,
    pub selected_patient: Option<String>,
    pub symptoms: Vec<String>,
    pub processing: bool,
    pub can_advance: bool,
    pub result_summary: Option<String>,
    pub error: Option<String>,
}

impl From<&IntakeWizard> for FfiWizardState {
    fn from(wizard: &IntakeWizard) -> Self {
        let (result_summary, error) = match wizard.outcome() {
            Some(AnalysisOutcome::Ready(record)) => (Some(record.summary.clone()), None),
            Some(AnalysisOutcome::Failed(message)) => (None, Some(message.clone())),
            Some(AnalysisOutcome::Processing) | None => (None, None),
        };
        Self {
            step: wizard.step().number(),
            upload_count: wizard.uploads().len() as u32,
            selected_patient: wizard.selected_patient().map(Into::into),
            symptoms: wizard.symptoms().to_vec(),
            processing: wizard.is_processing(),
            can_advance: wizard.can_advance(),
            result_summary,
            error,
        }
    }
}

//! Treatment plan store.
//!
//! An explicit state object over the clinic's treatment plans. Every
//! successful mutation writes the whole persisted state through the injected
//! [`StatePersistence`] port. `total` is always the length of the plan list.

mod persistence;
mod query;

pub use persistence::*;
pub use query::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CoreConfig;
use crate::models::{StepStatus, TreatmentPatch, TreatmentPlan, TreatmentStep};

/// Version of the persisted blob layout.
pub const STORE_SCHEMA_VERSION: u32 = 1;

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported store schema version: {0}")]
    UnsupportedVersion(u32),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The blob written under the storage key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedState {
    pub version: u32,
    pub treatments: Vec<TreatmentPlan>,
    pub filters: Filters,
    pub sort: Sort,
    pub pagination: Pagination,
}

/// In-memory treatment plans with filters, sort and pagination.
pub struct TreatmentStore<P: StatePersistence> {
    persistence: P,
    storage_key: String,
    state: PersistedState,
}

impl<P: StatePersistence> TreatmentStore<P> {
    /// Create an empty store. Nothing is written until the first mutation.
    pub fn new(persistence: P, config: &CoreConfig) -> Self {
        Self {
            persistence,
            storage_key: config.storage_key.clone(),
            state: empty_state(config),
        }
    }

    /// Rehydrate from persistence, or start empty if nothing is stored.
    pub fn load(persistence: P, config: &CoreConfig) -> StoreResult<Self> {
        let state = match persistence.read(&config.storage_key)? {
            Some(blob) => decode_state(&blob)?,
            None => empty_state(config),
        };
        tracing::debug!(
            key = %config.storage_key,
            treatments = state.treatments.len(),
            "Loaded treatment store"
        );
        Ok(Self {
            persistence,
            storage_key: config.storage_key.clone(),
            state,
        })
    }

    /// Like [`load`](Self::load), but a corrupt or unreadable blob yields an
    /// empty store instead of an error.
    pub fn load_or_default(persistence: P, config: &CoreConfig) -> Self {
        let state = match persistence.read(&config.storage_key) {
            Ok(Some(blob)) => decode_state(&blob).unwrap_or_else(|e| {
                tracing::warn!(key = %config.storage_key, "Discarding stored treatments: {e}");
                empty_state(config)
            }),
            Ok(None) => empty_state(config),
            Err(e) => {
                tracing::warn!(key = %config.storage_key, "Failed to read stored treatments: {e}");
                empty_state(config)
            }
        };
        Self {
            persistence,
            storage_key: config.storage_key.clone(),
            state,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All plans in store order (most recently added first).
    pub fn treatments(&self) -> &[TreatmentPlan] {
        &self.state.treatments
    }

    pub fn get(&self, id: &str) -> Option<&TreatmentPlan> {
        self.state.treatments.iter().find(|plan| plan.id == id)
    }

    pub fn total(&self) -> usize {
        self.state.treatments.len()
    }

    pub fn filters(&self) -> &Filters {
        &self.state.filters
    }

    pub fn sort(&self) -> Sort {
        self.state.sort
    }

    pub fn pagination(&self) -> Pagination {
        self.state.pagination
    }

    /// The current page of filtered, sorted plans.
    pub fn visible(&self) -> TreatmentPage {
        paginate(
            &self.state.treatments,
            &self.state.filters,
            &self.state.sort,
            &self.state.pagination,
        )
    }

    /// Plans for one patient regardless of filters.
    pub fn for_patient(&self, patient_id: &str) -> Vec<&TreatmentPlan> {
        self.state
            .treatments
            .iter()
            .filter(|plan| plan.patient_id == patient_id)
            .collect()
    }

    pub fn snapshot(&self) -> &PersistedState {
        &self.state
    }

    // =========================================================================
    // Plan actions
    // =========================================================================

    /// Prepend a plan. Ids must be unique.
    pub fn add_treatment(&mut self, plan: TreatmentPlan) -> StoreResult<()> {
        if self.get(&plan.id).is_some() {
            return Err(StoreError::InvalidInput(format!(
                "Treatment {} already exists",
                plan.id
            )));
        }
        tracing::info!(id = %plan.id, patient_id = %plan.patient_id, "Adding treatment plan");
        self.state.treatments.insert(0, plan);
        self.persist()
    }

    /// Apply a patch to a plan. Returns `false` if no plan has this id.
    /// An empty patch changes nothing, `updated_at` included.
    pub fn update_treatment(&mut self, id: &str, patch: TreatmentPatch) -> StoreResult<bool> {
        let Some(plan) = self.state.treatments.iter_mut().find(|plan| plan.id == id) else {
            return Ok(false);
        };
        if patch.is_empty() {
            return Ok(true);
        }
        plan.apply(patch);
        tracing::info!(id, "Updated treatment plan");
        self.persist()?;
        Ok(true)
    }

    /// Remove a plan. An unknown id leaves the store untouched.
    pub fn delete_treatment(&mut self, id: &str) -> StoreResult<bool> {
        let Some(index) = self.state.treatments.iter().position(|plan| plan.id == id) else {
            tracing::debug!(id, "Delete of unknown treatment ignored");
            return Ok(false);
        };
        self.state.treatments.remove(index);
        tracing::info!(id, "Deleted treatment plan");
        self.persist()?;
        Ok(true)
    }

    // =========================================================================
    // Step actions
    // =========================================================================

    /// Append a step to a plan.
    pub fn add_step(&mut self, plan_id: &str, step: TreatmentStep) -> StoreResult<()> {
        let plan = self.plan_mut(plan_id)?;
        if plan.step(&step.id).is_some() {
            return Err(StoreError::InvalidInput(format!(
                "Step {} already exists in plan {}",
                step.id, plan_id
            )));
        }
        plan.steps.push(step);
        plan.touch();
        self.persist()
    }

    pub fn update_step_status(
        &mut self,
        plan_id: &str,
        step_id: &str,
        status: StepStatus,
    ) -> StoreResult<()> {
        let plan = self.plan_mut(plan_id)?;
        let step = plan
            .step_mut(step_id)
            .ok_or_else(|| StoreError::NotFound(format!("step {step_id}")))?;
        step.status = status;
        plan.touch();
        tracing::debug!(plan_id, step_id, status = status.as_str(), "Step status changed");
        self.persist()
    }

    /// Remove a step. Returns `false` if the plan has no such step.
    pub fn remove_step(&mut self, plan_id: &str, step_id: &str) -> StoreResult<bool> {
        let plan = self.plan_mut(plan_id)?;
        let Some(index) = plan.steps.iter().position(|step| step.id == step_id) else {
            return Ok(false);
        };
        plan.steps.remove(index);
        plan.touch();
        self.persist()?;
        Ok(true)
    }

    // =========================================================================
    // View state
    // =========================================================================

    /// Merge a filter patch. Always returns to page 1.
    pub fn set_filters(&mut self, patch: FilterPatch) -> StoreResult<()> {
        self.state.filters.merge(patch);
        self.state.pagination.page = 1;
        self.persist()
    }

    pub fn clear_filters(&mut self) -> StoreResult<()> {
        self.state.filters = Filters::default();
        self.state.pagination.page = 1;
        self.persist()
    }

    pub fn set_sort(&mut self, sort: Sort) -> StoreResult<()> {
        self.state.sort = sort;
        self.state.pagination.page = 1;
        self.persist()
    }

    /// Change the page and/or page size. Both must be at least 1.
    pub fn set_pagination(&mut self, patch: PaginationPatch) -> StoreResult<()> {
        if patch.page == Some(0) {
            return Err(StoreError::InvalidInput("page must be at least 1".into()));
        }
        if patch.page_size == Some(0) {
            return Err(StoreError::InvalidInput("page_size must be at least 1".into()));
        }
        if let Some(page) = patch.page {
            self.state.pagination.page = page;
        }
        if let Some(page_size) = patch.page_size {
            self.state.pagination.page_size = page_size;
        }
        self.persist()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write the current state. Called after every mutation; exposed so a
    /// caller can retry after a failed write.
    pub fn flush(&self) -> StoreResult<()> {
        self.persist()
    }

    /// Drop all plans and view state, and remove the stored blob.
    pub fn clear(&mut self, config: &CoreConfig) -> StoreResult<()> {
        self.state = empty_state(config);
        self.persistence.remove(&self.storage_key)?;
        tracing::info!(key = %self.storage_key, "Cleared treatment store");
        Ok(())
    }

    fn persist(&self) -> StoreResult<()> {
        let blob = serde_json::to_string(&self.state)?;
        self.persistence.write(&self.storage_key, &blob).map_err(|e| {
            tracing::error!(key = %self.storage_key, "Failed to persist treatment store: {e}");
            StoreError::from(e)
        })
    }

    fn plan_mut(&mut self, plan_id: &str) -> StoreResult<&mut TreatmentPlan> {
        self.state
            .treatments
            .iter_mut()
            .find(|plan| plan.id == plan_id)
            .ok_or_else(|| StoreError::NotFound(format!("treatment {plan_id}")))
    }
}

fn empty_state(config: &CoreConfig) -> PersistedState {
    PersistedState {
        version: STORE_SCHEMA_VERSION,
        treatments: Vec::new(),
        filters: Filters::default(),
        sort: Sort::default(),
        pagination: Pagination {
            page: 1,
            page_size: config.page_size,
        },
    }
}

fn decode_state(blob: &str) -> StoreResult<PersistedState> {
    let state: PersistedState = serde_json::from_str(blob)?;
    if state.version != STORE_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedVersion(state.version));
    }
    Ok(state)
}

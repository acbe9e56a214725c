//! Filter, sort and pagination state for the treatment list.

use serde::{Deserialize, Serialize};

use crate::models::{PlanStatus, StepType, TreatmentPlan};

/// Active list filters. `None` means "any".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Filters {
    pub status: Option<PlanStatus>,
    pub patient_id: Option<String>,
    /// Case-insensitive substring over title and notes
    pub search: Option<String>,
    /// Plan must contain at least one step of this type
    pub step_type: Option<StepType>,
}

/// Partial filter update.
///
/// The outer `Option` says whether to touch the filter: `None` leaves it,
/// `Some(None)` clears it, `Some(Some(v))` sets it. Blank strings clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub status: Option<Option<PlanStatus>>,
    pub patient_id: Option<Option<String>>,
    pub search: Option<Option<String>>,
    pub step_type: Option<Option<StepType>>,
}

impl Filters {
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(patient_id) = patch.patient_id {
            self.patient_id = non_blank(patient_id);
        }
        if let Some(search) = patch.search {
            self.search = non_blank(search);
        }
        if let Some(step_type) = patch.step_type {
            self.step_type = step_type;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check whether a plan passes every active filter.
    pub fn matches(&self, plan: &TreatmentPlan) -> bool {
        if let Some(status) = self.status {
            if plan.status != status {
                return false;
            }
        }
        if let Some(patient_id) = &self.patient_id {
            if &plan.patient_id != patient_id {
                return false;
            }
        }
        if let Some(step_type) = self.step_type {
            if !plan.has_step_type(step_type) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_title = plan.title.to_lowercase().contains(&needle);
            let in_notes = plan
                .notes
                .as_deref()
                .is_some_and(|notes| notes.to_lowercase().contains(&needle));
            if !in_title && !in_notes {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    TotalCost,
    Title,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            field: SortField::UpdatedAt,
            direction: SortDirection::Descending,
        }
    }
}

impl Sort {
    /// Stable sort; ties keep store order (newest added first).
    pub fn apply(&self, plans: &mut [&TreatmentPlan]) {
        plans.sort_by(|a, b| {
            let ordering = match self.field {
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                SortField::TotalCost => a
                    .total_cost
                    .partial_cmp(&b.total_cost)
                    .unwrap_or(std::cmp::Ordering::Equal),
                SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            };
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}

/// Requested page. `total` is never stored; it is derived from the plan list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationPatch {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Pagination as seen by the UI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    /// Number of plans in the store
    pub total: usize,
    /// Number of plans passing the filters
    pub filtered_total: usize,
    pub total_pages: u32,
}

/// One page of the filtered, sorted plan list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentPage {
    pub items: Vec<TreatmentPlan>,
    pub info: PageInfo,
}

/// Filter, sort and slice the plans for display.
pub fn paginate(
    plans: &[TreatmentPlan],
    filters: &Filters,
    sort: &Sort,
    pagination: &Pagination,
) -> TreatmentPage {
    let mut matching: Vec<&TreatmentPlan> = plans.iter().filter(|p| filters.matches(p)).collect();
    sort.apply(&mut matching);

    let page_size = pagination.page_size.max(1) as usize;
    let filtered_total = matching.len();
    let total_pages = filtered_total.div_ceil(page_size) as u32;
    let start = (pagination.page.max(1) as usize - 1) * page_size;

    let items = matching
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    TreatmentPage {
        items,
        info: PageInfo {
            page: pagination.page,
            page_size: pagination.page_size,
            total: plans.len(),
            filtered_total,
            total_pages,
        },
    }
}

//! Patient models.

use serde::{Deserialize, Serialize};

/// A patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Patient ID
    pub id: String,
    /// Full name
    pub name: String,
    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: String,
    /// Contact details
    pub contact: ContactInfo,
    /// Dental insurance, if any
    pub insurance: Option<Insurance>,
    /// Free-text medical history entries (allergies, conditions, medications)
    pub medical_history: Vec<String>,
    /// Past dental procedures
    pub dental_history: Vec<DentalHistoryEntry>,
    /// Date of the last visit (YYYY-MM-DD)
    pub last_visit: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Insurance coverage on file for a patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insurance {
    pub provider: String,
    pub policy_number: String,
    /// Share of treatment cost the insurer pays, 0-100
    pub coverage_percent: f64,
}

/// One past procedure in the patient's dental history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DentalHistoryEntry {
    pub date: String,
    pub procedure: String,
    pub notes: Option<String>,
}

impl Patient {
    /// Create a new patient with required fields.
    pub fn new(name: String, date_of_birth: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            date_of_birth,
            contact: ContactInfo::default(),
            insurance: None,
            medical_history: Vec::new(),
            dental_history: Vec::new(),
            last_visit: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Check if the patient has insurance on file.
    pub fn is_insured(&self) -> bool {
        self.insurance.is_some()
    }

    /// Age in whole years on the given date, if the birth date parses.
    pub fn age_on(&self, on: chrono::NaiveDate) -> Option<u32> {
        let dob = chrono::NaiveDate::parse_from_str(&self.date_of_birth, "%Y-%m-%d").ok()?;
        on.years_since(dob)
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

//! Appointment models.

use serde::{Deserialize, Serialize};

/// Appointment status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 3] = [Self::Confirmed, Self::Pending, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

/// A scheduled visit. No overlap checking is done between appointments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Appointment ID
    pub id: String,
    /// Patient ID (weak reference)
    pub patient_id: String,
    /// Date (YYYY-MM-DD)
    pub date: String,
    /// Start time (HH:MM)
    pub time: String,
    /// Length of the visit
    pub duration_minutes: u32,
    /// Visit type (e.g., "Cleaning", "Consultation")
    pub appointment_type: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

impl Appointment {
    /// Create a pending appointment.
    pub fn new(patient_id: String, date: String, time: String, appointment_type: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            date,
            time,
            duration_minutes: 30,
            appointment_type,
            status: AppointmentStatus::Pending,
            notes: None,
        }
    }

    /// Whether the appointment is still expected to happen.
    pub fn is_active(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }
}

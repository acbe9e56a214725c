//! SQLite schema definition.

/// Complete database schema for dentdesk.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    date_of_birth TEXT NOT NULL,
    phone TEXT,
    email TEXT,
    address TEXT,
    insurance TEXT,                               -- JSON object {provider, policy_number, coverage_percent}
    medical_history TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
    dental_history TEXT NOT NULL DEFAULT '[]',    -- JSON array of {date, procedure, notes}
    last_visit TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);

-- ============================================================================
-- Appointments
-- ============================================================================

-- patient_id is a weak reference: appointments may outlive a patient record
CREATE TABLE IF NOT EXISTS appointments (
    id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL,
    date TEXT NOT NULL,                           -- YYYY-MM-DD
    time TEXT NOT NULL,                           -- HH:MM
    duration_minutes INTEGER NOT NULL DEFAULT 30,
    appointment_type TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('confirmed', 'pending', 'cancelled')),
    notes TEXT
);

CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id);
CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(date, time);

-- ============================================================================
-- Application State (key -> JSON blob)
-- ============================================================================

CREATE TABLE IF NOT EXISTS app_state (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        assert!(conn.execute_batch(SCHEMA).is_ok());
    }

    #[test]
    fn test_appointment_status_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO appointments (id, patient_id, date, time, appointment_type, status)
             VALUES ('a1', 'p1', '2024-01-01', '09:00', 'Cleaning', 'no_show')",
            [],
        );
        assert!(result.is_err());

        let result = conn.execute(
            "INSERT INTO appointments (id, patient_id, date, time, appointment_type, status)
             VALUES ('a1', 'p1', '2024-01-01', '09:00', 'Cleaning', 'confirmed')",
            [],
        );
        assert!(result.is_ok());
    }
}

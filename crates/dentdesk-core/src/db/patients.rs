//! Patient database operations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{ContactInfo, DentalHistoryEntry, Insurance, Patient};

const PATIENT_COLUMNS: &str = r#"
    id, name, date_of_birth, phone, email, address, insurance,
    medical_history, dental_history, last_visit, created_at, updated_at
"#;

impl Database {
    /// Insert a new patient.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        insert_patient_on(&self.conn, patient)
    }

    /// Update an existing patient.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        let insurance_json = patient
            .insurance
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let medical_json = serde_json::to_string(&patient.medical_history)?;
        let dental_json = serde_json::to_string(&patient.dental_history)?;

        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                name = ?2,
                date_of_birth = ?3,
                phone = ?4,
                email = ?5,
                address = ?6,
                insurance = ?7,
                medical_history = ?8,
                dental_history = ?9,
                last_visit = ?10,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                patient.id,
                patient.name,
                patient.date_of_birth,
                patient.contact.phone,
                patient.contact.email,
                patient.contact.address,
                insurance_json,
                medical_json,
                dental_json,
                patient.last_visit,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: &str) -> DbResult<Option<Patient>> {
        let sql = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?");
        self.conn
            .query_row(&sql, [id], PatientRow::from_row)
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Search patients by name (prefix match).
    pub fn search_patients(&self, query: &str, limit: usize) -> DbResult<Vec<Patient>> {
        let escaped = query
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("{}%", escaped);
        let sql = format!(
            "SELECT {PATIENT_COLUMNS} FROM patients WHERE name LIKE ? ESCAPE '\\' ORDER BY name LIMIT ?"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![pattern, limit as i64], PatientRow::from_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }

    /// List all patients.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let sql = format!("SELECT {PATIENT_COLUMNS} FROM patients ORDER BY name");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], PatientRow::from_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }

    pub fn count_patients(&self) -> DbResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete a patient. Appointments referencing it are left in place.
    pub fn delete_patient(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Record a visit date on the patient.
    pub fn record_visit(&self, id: &str, date: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE patients SET last_visit = ?, updated_at = datetime('now') WHERE id = ?",
            [date, id],
        )?;
        Ok(rows_affected > 0)
    }
}

pub(super) fn insert_patient_on(conn: &Connection, patient: &Patient) -> DbResult<()> {
    let insurance_json = patient
        .insurance
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    let medical_json = serde_json::to_string(&patient.medical_history)?;
    let dental_json = serde_json::to_string(&patient.dental_history)?;

    conn.execute(
        r#"
        INSERT INTO patients (
            id, name, date_of_birth, phone, email, address, insurance,
            medical_history, dental_history, last_visit, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        "#,
        params![
            patient.id,
            patient.name,
            patient.date_of_birth,
            patient.contact.phone,
            patient.contact.email,
            patient.contact.address,
            insurance_json,
            medical_json,
            dental_json,
            patient.last_visit,
            patient.created_at,
            patient.updated_at,
        ],
    )?;
    Ok(())
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    id: String,
    name: String,
    date_of_birth: String,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    insurance: Option<String>,
    medical_history: String,
    dental_history: String,
    last_visit: Option<String>,
    created_at: String,
    updated_at: String,
}

impl PatientRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            date_of_birth: row.get(2)?,
            phone: row.get(3)?,
            email: row.get(4)?,
            address: row.get(5)?,
            insurance: row.get(6)?,
            medical_history: row.get(7)?,
            dental_history: row.get(8)?,
            last_visit: row.get(9)?,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    }
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let insurance: Option<Insurance> = row
            .insurance
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        let medical_history: Vec<String> = serde_json::from_str(&row.medical_history)?;
        let dental_history: Vec<DentalHistoryEntry> = serde_json::from_str(&row.dental_history)?;

        Ok(Patient {
            id: row.id,
            name: row.name,
            date_of_birth: row.date_of_birth,
            contact: ContactInfo {
                phone: row.phone,
                email: row.email,
                address: row.address,
            },
            insurance,
            medical_history,
            dental_history,
            last_visit: row.last_visit,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn make_patient(name: &str) -> Patient {
        let mut patient = Patient::new(name.into(), "1985-03-12".into());
        patient.contact.phone = Some("555-0101".into());
        patient.insurance = Some(Insurance {
            provider: "Delta Dental".into(),
            policy_number: "DD-1001".into(),
            coverage_percent: 80.0,
        });
        patient.medical_history = vec!["Penicillin allergy".into()];
        patient.dental_history = vec![DentalHistoryEntry {
            date: "2023-05-10".into(),
            procedure: "Cleaning".into(),
            notes: None,
        }];
        patient
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();
        let patient = make_patient("Sarah Johnson");
        db.insert_patient(&patient).unwrap();

        let retrieved = db.get_patient(&patient.id).unwrap().unwrap();
        assert_eq!(retrieved, patient);
    }

    #[test]
    fn test_get_missing() {
        let db = setup_db();
        assert!(db.get_patient("nope").unwrap().is_none());
    }

    #[test]
    fn test_update_patient() {
        let db = setup_db();
        let mut patient = make_patient("Sarah Johnson");
        db.insert_patient(&patient).unwrap();

        patient.insurance = None;
        patient.medical_history.push("Hypertension".into());
        assert!(db.update_patient(&patient).unwrap());

        let retrieved = db.get_patient(&patient.id).unwrap().unwrap();
        assert_eq!(retrieved.insurance, None);
        assert_eq!(retrieved.medical_history.len(), 2);

        let stranger = make_patient("Nobody");
        assert!(!db.update_patient(&stranger).unwrap());
    }

    #[test]
    fn test_search_patients() {
        let db = setup_db();
        db.insert_patient(&make_patient("Michael Chen")).unwrap();
        db.insert_patient(&make_patient("Michelle Park")).unwrap();
        db.insert_patient(&make_patient("Emily Davis")).unwrap();

        let results = db.search_patients("Mich", 10).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Michael Chen");

        let limited = db.search_patients("Mich", 1).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let db = setup_db();
        db.insert_patient(&make_patient("Mitch Hale")).unwrap();
        db.insert_patient(&make_patient("Mi_ Tran")).unwrap();
        db.insert_patient(&make_patient("100% Smile")).unwrap();

        assert!(db.search_patients("Mi_h", 10).unwrap().is_empty());

        let underscore = db.search_patients("Mi_", 10).unwrap();
        assert_eq!(underscore.len(), 1);
        assert_eq!(underscore[0].name, "Mi_ Tran");

        assert_eq!(db.search_patients("100%", 10).unwrap().len(), 1);
        assert!(db.search_patients("%", 10).unwrap().is_empty());
    }

    #[test]
    fn test_delete_and_record_visit() {
        let db = setup_db();
        let patient = make_patient("Sarah Johnson");
        db.insert_patient(&patient).unwrap();

        assert!(db.record_visit(&patient.id, "2024-02-01").unwrap());
        let retrieved = db.get_patient(&patient.id).unwrap().unwrap();
        assert_eq!(retrieved.last_visit.as_deref(), Some("2024-02-01"));

        assert!(db.delete_patient(&patient.id).unwrap());
        assert!(!db.delete_patient(&patient.id).unwrap());
        assert_eq!(db.count_patients().unwrap(), 0);
    }
}

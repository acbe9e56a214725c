//! Appointment database operations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Appointment, AppointmentStatus};

const APPOINTMENT_COLUMNS: &str =
    "id, patient_id, date, time, duration_minutes, appointment_type, status, notes";

impl Database {
    /// Insert a new appointment. No conflict checking is performed.
    pub fn insert_appointment(&self, appointment: &Appointment) -> DbResult<()> {
        insert_appointment_on(&self.conn, appointment)
    }

    /// Get an appointment by ID.
    pub fn get_appointment(&self, id: &str) -> DbResult<Option<Appointment>> {
        let sql = format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?");
        self.conn
            .query_row(&sql, [id], AppointmentRow::from_row)
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Change an appointment's status.
    pub fn update_appointment_status(&self, id: &str, status: AppointmentStatus) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE appointments SET status = ? WHERE id = ?",
            [status.as_str(), id],
        )?;
        Ok(rows_affected > 0)
    }

    /// Move an appointment to a new slot.
    pub fn reschedule_appointment(&self, id: &str, date: &str, time: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE appointments SET date = ?, time = ? WHERE id = ?",
            [date, time, id],
        )?;
        Ok(rows_affected > 0)
    }

    /// List every appointment in calendar order.
    pub fn list_appointments(&self) -> DbResult<Vec<Appointment>> {
        self.query_appointments(
            &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments ORDER BY date, time"),
            params![],
        )
    }

    /// List appointments for a patient, most recent first.
    pub fn list_appointments_for_patient(&self, patient_id: &str) -> DbResult<Vec<Appointment>> {
        self.query_appointments(
            &format!(
                "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                 WHERE patient_id = ? ORDER BY date DESC, time DESC"
            ),
            params![patient_id],
        )
    }

    /// List appointments on a given day.
    pub fn list_appointments_on(&self, date: &str) -> DbResult<Vec<Appointment>> {
        self.query_appointments(
            &format!(
                "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE date = ? ORDER BY time"
            ),
            params![date],
        )
    }

    /// List non-cancelled appointments on or after a date.
    pub fn list_upcoming_appointments(&self, from_date: &str, limit: usize) -> DbResult<Vec<Appointment>> {
        self.query_appointments(
            &format!(
                "SELECT {APPOINTMENT_COLUMNS} FROM appointments
                 WHERE date >= ? AND status != 'cancelled'
                 ORDER BY date, time LIMIT ?"
            ),
            params![from_date, limit as i64],
        )
    }

    /// Delete an appointment.
    pub fn delete_appointment(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM appointments WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    fn query_appointments(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, AppointmentRow::from_row)?;

        let mut appointments = Vec::new();
        for row in rows {
            appointments.push(row?.try_into()?);
        }
        Ok(appointments)
    }
}

pub(super) fn insert_appointment_on(conn: &Connection, appointment: &Appointment) -> DbResult<()> {
    conn.execute(
        r#"
        INSERT INTO appointments (
            id, patient_id, date, time, duration_minutes,
            appointment_type, status, notes
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            appointment.id,
            appointment.patient_id,
            appointment.date,
            appointment.time,
            appointment.duration_minutes,
            appointment.appointment_type,
            appointment.status.as_str(),
            appointment.notes,
        ],
    )?;
    Ok(())
}

/// Intermediate row struct for database mapping.
struct AppointmentRow {
    id: String,
    patient_id: String,
    date: String,
    time: String,
    duration_minutes: u32,
    appointment_type: String,
    status: String,
    notes: Option<String>,
}

impl AppointmentRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            date: row.get(2)?,
            time: row.get(3)?,
            duration_minutes: row.get(4)?,
            appointment_type: row.get(5)?,
            status: row.get(6)?,
            notes: row.get(7)?,
        })
    }
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DbError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        let status = AppointmentStatus::parse(&row.status).ok_or_else(|| {
            DbError::Constraint(format!("Unknown appointment status: {}", row.status))
        })?;

        Ok(Appointment {
            id: row.id,
            patient_id: row.patient_id,
            date: row.date,
            time: row.time,
            duration_minutes: row.duration_minutes,
            appointment_type: row.appointment_type,
            status,
            notes: row.notes,
        })
    }
}

//! Database layer for dentdesk.

mod appointments;
mod patients;
mod schema;
mod state;

#[allow(unused_imports)]
pub use appointments::*;
#[allow(unused_imports)]
pub use patients::*;
pub use schema::*;
#[allow(unused_imports)]
pub use state::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

use crate::fixtures;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        let db = Self { conn };
        db.initialize()?;
        tracing::info!(path = %path.as_ref().display(), "Opened database");
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction.
    pub fn transaction(&mut self) -> DbResult<rusqlite::Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Load the sample patients and appointments if no patients exist yet.
    ///
    /// Returns the number of patients inserted.
    pub fn seed_sample_data(&mut self) -> DbResult<usize> {
        if self.count_patients()? > 0 {
            tracing::debug!("Database already has patients, skipping seed");
            return Ok(0);
        }

        let sample_patients = fixtures::patients();
        let sample_appointments = fixtures::appointments();

        let tx = self.conn.transaction()?;
        for patient in &sample_patients {
            patients::insert_patient_on(&tx, patient)?;
        }
        for appointment in &sample_appointments {
            appointments::insert_appointment_on(&tx, appointment)?;
        }
        tx.commit()?;

        tracing::info!(
            patients = sample_patients.len(),
            appointments = sample_appointments.len(),
            "Seeded sample data"
        );
        Ok(sample_patients.len())
    }
}

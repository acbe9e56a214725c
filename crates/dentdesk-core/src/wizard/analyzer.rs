//! Analysis port for the intake wizard.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::fixtures;
use crate::models::DiagnosticRecord;

/// Analysis errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("No diagnostic data available")]
    NoData,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Analyzer failed: {0}")]
    Failed(String),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Everything the wizard collected for one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub patient_id: String,
    /// Content hashes of the uploaded images, in upload order
    pub image_hashes: Vec<String>,
    pub symptoms: Vec<String>,
    pub notes: Option<String>,
}

/// Produces a diagnostic suggestion for an intake.
pub trait Analyzer {
    fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult<DiagnosticRecord>;
}

/// Answers from a fixed list of diagnostic records.
///
/// The record is picked from a digest of the patient id and image hashes, so
/// the same intake always gets the same answer.
pub struct FixtureAnalyzer {
    records: Vec<DiagnosticRecord>,
}

impl FixtureAnalyzer {
    pub fn new(records: Vec<DiagnosticRecord>) -> Self {
        Self { records }
    }

    /// Analyzer over the bundled sample diagnostics.
    pub fn with_sample_data() -> Self {
        Self::new(fixtures::diagnostics())
    }

    fn pick_index(&self, request: &AnalysisRequest) -> usize {
        let mut hasher = Sha256::new();
        hasher.update(request.patient_id.as_bytes());
        for hash in &request.image_hashes {
            hasher.update(hash.as_bytes());
        }
        let digest = hasher.finalize();

        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        (u64::from_be_bytes(prefix) % self.records.len() as u64) as usize
    }
}

impl Analyzer for FixtureAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult<DiagnosticRecord> {
        if self.records.is_empty() {
            return Err(AnalysisError::NoData);
        }
        if request.image_hashes.is_empty() {
            return Err(AnalysisError::InvalidRequest("no images".into()));
        }

        let mut record = self.records[self.pick_index(request)].clone();
        record.id = uuid::Uuid::new_v4().to_string();
        record.patient_id = request.patient_id.clone();
        record.created_at = chrono::Utc::now().to_rfc3339();
        Ok(record)
    }
}

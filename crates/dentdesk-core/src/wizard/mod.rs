//! Clinical intake wizard.
//!
//! A strictly linear three-step flow:
//!
//! ```text
//! Upload (1) ──files present──▶ PatientSelect (2) ──patient chosen──▶ Result (3)
//!     ▲                              │    ▲                              │
//!     └────────────back──────────────┘    └─────────────back─────────────┘
//! ```
//!
//! Entering step 3 puts the wizard into the processing state; the host then
//! calls [`IntakeWizard::run_analysis`] with an [`Analyzer`].

mod analyzer;
mod picker;

pub use analyzer::*;
pub use picker::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CoreConfig;
use crate::models::{DiagnosticRecord, UploadedImage};

/// Wizard errors. Guard violations are reported, never silently ignored.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    #[error("Upload at least one image before continuing")]
    NoUploads,

    #[error("Select a patient before continuing")]
    NoPatientSelected,

    #[error("Action not allowed on step {0:?}")]
    WrongStep(WizardStep),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("File {name} is {size} bytes, limit is {limit}")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("At most {0} images per intake")]
    TooManyFiles(u32),

    #[error("Image already uploaded as {0}")]
    DuplicateImage(String),

    #[error("No analysis in progress")]
    NotProcessing,
}

pub type WizardResult<T> = Result<T, WizardError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Upload = 1,
    PatientSelect = 2,
    Result = 3,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        *self as u8
    }
}

/// What the result screen shows.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Processing,
    Ready(DiagnosticRecord),
    Failed(String),
}

/// Intake state for one patient visit.
#[derive(Debug, Clone)]
pub struct IntakeWizard {
    step: WizardStep,
    uploads: Vec<UploadedImage>,
    selected_patient: Option<String>,
    symptoms: Vec<String>,
    notes: Option<String>,
    processing: bool,
    outcome: Option<AnalysisOutcome>,
    /// Upload limits and allowed media types
    config: CoreConfig,
}

impl IntakeWizard {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            step: WizardStep::Upload,
            uploads: Vec::new(),
            selected_patient: None,
            symptoms: Vec::new(),
            notes: None,
            processing: false,
            outcome: None,
            config: config.clone(),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn uploads(&self) -> &[UploadedImage] {
        &self.uploads
    }

    pub fn selected_patient(&self) -> Option<&str> {
        self.selected_patient.as_deref()
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Result screen state; `None` before step 3.
    pub fn outcome(&self) -> Option<&AnalysisOutcome> {
        self.outcome.as_ref()
    }

    pub fn can_advance(&self) -> bool {
        self.check_advance().is_ok()
    }

    // =========================================================================
    // Step 1: uploads
    // =========================================================================

    pub fn add_upload(&mut self, image: UploadedImage) -> WizardResult<()> {
        self.require_step(WizardStep::Upload)?;

        if !self.config.accepts_media_type(&image.media_type) {
            return Err(WizardError::UnsupportedMediaType(image.media_type));
        }
        if image.size_bytes > self.config.max_upload_bytes {
            return Err(WizardError::FileTooLarge {
                name: image.file_name,
                size: image.size_bytes,
                limit: self.config.max_upload_bytes,
            });
        }
        if self.uploads.len() >= self.config.max_upload_files as usize {
            return Err(WizardError::TooManyFiles(self.config.max_upload_files));
        }
        if let Some(existing) = self
            .uploads
            .iter()
            .find(|u| u.content_hash == image.content_hash)
        {
            return Err(WizardError::DuplicateImage(existing.file_name.clone()));
        }

        tracing::debug!(file = %image.file_name, size = image.size_bytes, "Image added to intake");
        self.uploads.push(image);
        Ok(())
    }

    /// Remove an upload by id. Returns whether it existed.
    pub fn remove_upload(&mut self, id: &str) -> WizardResult<bool> {
        self.require_step(WizardStep::Upload)?;
        let before = self.uploads.len();
        self.uploads.retain(|u| u.id != id);
        Ok(self.uploads.len() != before)
    }

    // =========================================================================
    // Step 2: patient and symptoms
    // =========================================================================

    pub fn select_patient(&mut self, patient_id: String) -> WizardResult<()> {
        self.require_step(WizardStep::PatientSelect)?;
        self.selected_patient = Some(patient_id);
        Ok(())
    }

    pub fn clear_patient(&mut self) -> WizardResult<()> {
        self.require_step(WizardStep::PatientSelect)?;
        self.selected_patient = None;
        Ok(())
    }

    /// Add the symptom, or remove it if already present. Returns whether it
    /// is selected afterwards.
    pub fn toggle_symptom(&mut self, symptom: &str) -> WizardResult<bool> {
        self.require_step(WizardStep::PatientSelect)?;
        let symptom = symptom.trim();
        if let Some(index) = self
            .symptoms
            .iter()
            .position(|s| s.eq_ignore_ascii_case(symptom))
        {
            self.symptoms.remove(index);
            return Ok(false);
        }
        if symptom.is_empty() {
            return Ok(false);
        }
        self.symptoms.push(symptom.to_string());
        Ok(true)
    }

    pub fn set_notes(&mut self, notes: &str) -> WizardResult<()> {
        self.require_step(WizardStep::PatientSelect)?;
        let notes = notes.trim();
        self.notes = (!notes.is_empty()).then(|| notes.to_string());
        Ok(())
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move forward one step if the current step's guard holds.
    pub fn advance(&mut self) -> WizardResult<WizardStep> {
        let next = self.check_advance()?;
        if next == WizardStep::Result {
            self.processing = true;
            self.outcome = Some(AnalysisOutcome::Processing);
        }
        tracing::info!(from = self.step.number(), to = next.number(), "Wizard advanced");
        self.step = next;
        Ok(next)
    }

    /// Move back one step. Always clears any analysis state.
    pub fn back(&mut self) -> WizardStep {
        self.processing = false;
        self.outcome = None;
        self.step = match self.step {
            WizardStep::Upload | WizardStep::PatientSelect => WizardStep::Upload,
            WizardStep::Result => WizardStep::PatientSelect,
        };
        self.step
    }

    /// Start over with an empty intake.
    pub fn reset(&mut self) {
        self.step = WizardStep::Upload;
        self.uploads.clear();
        self.selected_patient = None;
        self.symptoms.clear();
        self.notes = None;
        self.processing = false;
        self.outcome = None;
    }

    // =========================================================================
    // Step 3: analysis
    // =========================================================================

    /// The request the analyzer will receive.
    pub fn analysis_request(&self) -> WizardResult<AnalysisRequest> {
        let patient_id = self
            .selected_patient
            .clone()
            .ok_or(WizardError::NoPatientSelected)?;
        Ok(AnalysisRequest {
            patient_id,
            image_hashes: self.uploads.iter().map(|u| u.content_hash.clone()).collect(),
            symptoms: self.symptoms.clone(),
            notes: self.notes.clone(),
        })
    }

    /// Run the analyzer for the pending intake and record the outcome.
    ///
    /// Analyzer failures become [`AnalysisOutcome::Failed`]; only calling this
    /// outside the processing state is an error.
    pub fn run_analysis(&mut self, analyzer: &dyn Analyzer) -> WizardResult<&AnalysisOutcome> {
        self.require_step(WizardStep::Result)?;
        if !self.processing {
            return Err(WizardError::NotProcessing);
        }

        let request = self.analysis_request()?;
        let outcome = match analyzer.analyze(&request) {
            Ok(record) => {
                tracing::info!(
                    patient_id = %request.patient_id,
                    findings = record.findings.len(),
                    "Analysis complete"
                );
                AnalysisOutcome::Ready(record)
            }
            Err(e) => {
                tracing::warn!(patient_id = %request.patient_id, "Analysis failed: {e}");
                AnalysisOutcome::Failed(e.to_string())
            }
        };

        self.processing = false;
        Ok(&*self.outcome.insert(outcome))
    }

    fn check_advance(&self) -> WizardResult<WizardStep> {
        match self.step {
            WizardStep::Upload if self.uploads.is_empty() => Err(WizardError::NoUploads),
            WizardStep::Upload => Ok(WizardStep::PatientSelect),
            WizardStep::PatientSelect if self.selected_patient.is_none() => {
                Err(WizardError::NoPatientSelected)
            }
            WizardStep::PatientSelect => Ok(WizardStep::Result),
            WizardStep::Result => Err(WizardError::WrongStep(WizardStep::Result)),
        }
    }

    fn require_step(&self, step: WizardStep) -> WizardResult<()> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::WrongStep(self.step))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingAnalyzer;

    impl Analyzer for FailingAnalyzer {
        fn analyze(&self, _request: &AnalysisRequest) -> AnalysisResult<DiagnosticRecord> {
            Err(AnalysisError::Failed("model offline".into()))
        }
    }

    fn wizard() -> IntakeWizard {
        IntakeWizard::new(&CoreConfig::default())
    }

    fn png(name: &str, bytes: &[u8]) -> UploadedImage {
        UploadedImage::from_bytes(name.into(), "image/png".into(), bytes)
    }

    fn wizard_at_patient_select() -> IntakeWizard {
        let mut wizard = wizard();
        wizard.add_upload(png("bitewing.png", b"one")).unwrap();
        wizard.advance().unwrap();
        wizard
    }

    #[test]
    fn test_cannot_leave_upload_without_files() {
        let mut wizard = wizard();
        assert_eq!(wizard.advance(), Err(WizardError::NoUploads));
        assert_eq!(wizard.step(), WizardStep::Upload);
        assert!(!wizard.can_advance());
    }

    #[test]
    fn test_cannot_leave_patient_select_without_patient() {
        let mut wizard = wizard_at_patient_select();
        assert_eq!(wizard.step(), WizardStep::PatientSelect);
        assert_eq!(wizard.advance(), Err(WizardError::NoPatientSelected));
        assert_eq!(wizard.step(), WizardStep::PatientSelect);
    }

    #[test]
    fn test_full_flow() {
        let mut wizard = wizard_at_patient_select();
        wizard.select_patient("P-1001".into()).unwrap();
        assert!(wizard.toggle_symptom("Sensitivity to cold").unwrap());
        wizard.set_notes("Pain when chewing").unwrap();

        assert_eq!(wizard.advance(), Ok(WizardStep::Result));
        assert!(wizard.is_processing());
        assert_eq!(wizard.outcome(), Some(&AnalysisOutcome::Processing));

        let analyzer = FixtureAnalyzer::with_sample_data();
        let outcome = wizard.run_analysis(&analyzer).unwrap().clone();
        match outcome {
            AnalysisOutcome::Ready(record) => assert_eq!(record.patient_id, "P-1001"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!wizard.is_processing());

        // Analysis already done
        assert_eq!(
            wizard.run_analysis(&analyzer).unwrap_err(),
            WizardError::NotProcessing
        );
        assert_eq!(
            wizard.advance().unwrap_err(),
            WizardError::WrongStep(WizardStep::Result)
        );
    }

    #[test]
    fn test_failed_analysis_is_an_outcome() {
        let mut wizard = wizard_at_patient_select();
        wizard.select_patient("P-1001".into()).unwrap();
        wizard.advance().unwrap();

        let outcome = wizard.run_analysis(&FailingAnalyzer).unwrap();
        assert!(matches!(outcome, AnalysisOutcome::Failed(msg) if msg.contains("model offline")));
    }

    #[test]
    fn test_back_clears_analysis() {
        let mut wizard = wizard_at_patient_select();
        wizard.select_patient("P-1001".into()).unwrap();
        wizard.advance().unwrap();

        assert_eq!(wizard.back(), WizardStep::PatientSelect);
        assert!(!wizard.is_processing());
        assert!(wizard.outcome().is_none());
        // Selection survives going back
        assert_eq!(wizard.selected_patient(), Some("P-1001"));

        assert_eq!(wizard.back(), WizardStep::Upload);
        assert_eq!(wizard.back(), WizardStep::Upload);
        assert_eq!(wizard.uploads().len(), 1);
    }

    #[test]
    fn test_upload_validation() {
        let mut wizard = wizard();

        let pdf = UploadedImage::from_bytes("report.pdf".into(), "application/pdf".into(), b"x");
        assert!(matches!(
            wizard.add_upload(pdf),
            Err(WizardError::UnsupportedMediaType(_))
        ));

        wizard.add_upload(png("a.png", b"same")).unwrap();
        assert!(matches!(
            wizard.add_upload(png("b.png", b"same")),
            Err(WizardError::DuplicateImage(name)) if name == "a.png"
        ));

        let mut big = png("big.png", b"big");
        big.size_bytes = u64::MAX;
        assert!(matches!(
            wizard.add_upload(big),
            Err(WizardError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_file_count_limit() {
        let config = CoreConfig {
            max_upload_files: 2,
            ..CoreConfig::default()
        };
        let mut wizard = IntakeWizard::new(&config);
        wizard.add_upload(png("1.png", b"1")).unwrap();
        wizard.add_upload(png("2.png", b"2")).unwrap();
        assert_eq!(
            wizard.add_upload(png("3.png", b"3")),
            Err(WizardError::TooManyFiles(2))
        );
    }

    #[test]
    fn test_remove_upload_blocks_advance() {
        let mut wizard = wizard();
        let image = png("a.png", b"a");
        let id = image.id.clone();
        wizard.add_upload(image).unwrap();

        assert!(wizard.remove_upload(&id).unwrap());
        assert!(!wizard.remove_upload(&id).unwrap());
        assert_eq!(wizard.advance(), Err(WizardError::NoUploads));
    }

    #[test]
    fn test_step_guards_on_actions() {
        let mut wizard = wizard();
        assert_eq!(
            wizard.select_patient("P-1".into()),
            Err(WizardError::WrongStep(WizardStep::Upload))
        );

        let mut wizard = wizard_at_patient_select();
        assert!(matches!(
            wizard.add_upload(png("late.png", b"late")),
            Err(WizardError::WrongStep(WizardStep::PatientSelect))
        ));
    }

    #[test]
    fn test_toggle_symptom() {
        let mut wizard = wizard_at_patient_select();
        assert!(wizard.toggle_symptom("Swelling").unwrap());
        assert!(!wizard.toggle_symptom("swelling").unwrap());
        assert!(wizard.symptoms().is_empty());
        assert!(!wizard.toggle_symptom("  ").unwrap());
    }

    #[test]
    fn test_reset() {
        let mut wizard = wizard_at_patient_select();
        wizard.select_patient("P-1".into()).unwrap();
        wizard.reset();
        assert_eq!(wizard.step(), WizardStep::Upload);
        assert!(wizard.uploads().is_empty());
        assert!(wizard.selected_patient().is_none());
    }
}

// ============================================================================
// ECG VIEWMODEL - File set and simulated progress
// ============================================================================
// The backend answers only once the whole record is classified, so the bar
// is driven by a timer up to 90% and completed by the response.
// ============================================================================

use crate::error::ApiError;
use crate::models::ecg::EcgAnalysis;
use crate::models::upload::FilePart;
use crate::services::ecg_service::validate_ecg_files;

pub const PROGRESS_STEP: u8 = 10;
pub const PROGRESS_CEILING: u8 = 90;
pub const PROGRESS_TICK_MS: u32 = 500;

const ANALYZING_FROM: u8 = 50;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum EcgPhase {
    #[default]
    Idle,
    Uploading,
    Analyzing,
    Complete,
    Failed,
}

impl EcgPhase {
    pub fn label(&self) -> &'static str {
        match self {
            EcgPhase::Idle => "Ready",
            EcgPhase::Uploading => "Uploading",
            EcgPhase::Analyzing => "Analyzing",
            EcgPhase::Complete => "Complete",
            EcgPhase::Failed => "Failed",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, EcgPhase::Uploading | EcgPhase::Analyzing)
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct EcgViewModel {
    files: Vec<FilePart>,
    progress: u8,
    phase: EcgPhase,
    result: Option<EcgAnalysis>,
    error: Option<ApiError>,
}

impl EcgViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn phase(&self) -> EcgPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&EcgAnalysis> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Replaces the selection and clears any previous outcome
    pub fn select_files(&mut self, files: Vec<FilePart>) {
        self.files = files;
        self.progress = 0;
        self.phase = EcgPhase::Idle;
        self.result = None;
        self.error = None;
    }

    pub fn remove_file(&mut self, file_name: &str) {
        self.files.retain(|file| file.file_name != file_name);
    }

    /// Validates the selection and starts the progress bar. Returns the
    /// files to upload.
    pub fn start(&mut self) -> Result<Vec<FilePart>, ApiError> {
        if self.phase.is_running() {
            return Err(ApiError::Validation("Analysis already in progress".to_string()));
        }
        if let Err(e) = validate_ecg_files(&self.files) {
            self.error = Some(e.clone());
            return Err(e);
        }
        self.progress = 0;
        self.phase = EcgPhase::Uploading;
        self.result = None;
        self.error = None;
        log::info!("🫀 Starting ECG analysis of {} files", self.files.len());
        Ok(self.files.clone())
    }

    /// One timer step; never reaches 100 on its own
    pub fn tick(&mut self) {
        if !self.phase.is_running() {
            return;
        }
        self.progress = self.progress.saturating_add(PROGRESS_STEP).min(PROGRESS_CEILING);
        if self.progress >= ANALYZING_FROM {
            self.phase = EcgPhase::Analyzing;
        }
    }

    pub fn finish(&mut self, outcome: Result<EcgAnalysis, ApiError>) {
        match outcome {
            Ok(analysis) => {
                self.progress = 100;
                self.phase = EcgPhase::Complete;
                self.result = Some(analysis);
            }
            Err(e) => {
                log::error!("❌ ECG analysis failed: {}", e);
                self.progress = 0;
                self.phase = EcgPhase::Failed;
                self.error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ecg::FinalPrediction;

    fn record() -> Vec<FilePart> {
        ["100.hea", "100.dat", "100.atr"]
            .into_iter()
            .map(|name| FilePart::new(name, "application/octet-stream", vec![0; 4]))
            .collect()
    }

    fn analysis() -> EcgAnalysis {
        EcgAnalysis {
            signal_plot: None,
            predictions: vec![],
            final_prediction: FinalPrediction {
                class_name: "Normal".into(),
                confidence: 97.5,
                distribution: Default::default(),
                average_probabilities: Default::default(),
            },
        }
    }

    #[test]
    fn progress_stops_at_ninety_until_the_answer() {
        let mut vm = EcgViewModel::new();
        vm.select_files(record());
        vm.start().unwrap();

        for _ in 0..4 {
            vm.tick();
        }
        assert_eq!(vm.progress(), 40);
        assert_eq!(vm.phase(), EcgPhase::Uploading);

        for _ in 0..20 {
            vm.tick();
        }
        assert_eq!(vm.progress(), 90);
        assert_eq!(vm.phase().label(), "Analyzing");

        vm.finish(Ok(analysis()));
        assert_eq!(vm.progress(), 100);
        assert_eq!(vm.phase(), EcgPhase::Complete);
        assert_eq!(vm.result().unwrap().final_prediction.class_name, "Normal");
    }

    #[test]
    fn failure_resets_progress() {
        let mut vm = EcgViewModel::new();
        vm.select_files(record());
        vm.start().unwrap();
        vm.tick();

        vm.finish(Err(ApiError::Network("timeout".into())));

        assert_eq!(vm.progress(), 0);
        assert_eq!(vm.phase(), EcgPhase::Failed);
        assert!(vm.error().is_some());
        vm.tick();
        assert_eq!(vm.progress(), 0);
    }

    #[test]
    fn incomplete_record_does_not_start() {
        let mut vm = EcgViewModel::new();
        vm.select_files(record());
        vm.remove_file("100.dat");

        assert!(vm.start().is_err());
        assert_eq!(vm.phase(), EcgPhase::Idle);
        assert!(vm.error().is_some());
    }

    #[test]
    fn second_start_while_running_is_rejected() {
        let mut vm = EcgViewModel::new();
        vm.select_files(record());
        vm.start().unwrap();
        assert!(vm.start().is_err());
    }
}

//! Async driver of the analysis flow.
//!
//! `Analyzer` owns the [`FlowState`] behind a mutex and a pluggable
//! [`ScoreBackend`]. The lock is held only while reading or writing flow
//! state, never across a backend call, so the user can reset or pick a new
//! file while a request is in flight; the generation token in the flow keeps
//! the late completion from clobbering the restarted session.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::errors::AtsError;
use crate::insights::Insights;

use super::backend::ScoreBackend;
use super::flow::{FlowState, FlowStep};
use super::types::{AnalysisResult, ParsedResume, SelectedFile, WeightedAtsScore};

pub struct Analyzer {
    state: Mutex<FlowState>,
    backend: Arc<dyn ScoreBackend>,
}

impl Analyzer {
    pub fn new(backend: Arc<dyn ScoreBackend>) -> Self {
        Analyzer {
            state: Mutex::new(FlowState::new()),
            backend,
        }
    }

    pub async fn step(&self) -> FlowStep {
        self.state.lock().await.step()
    }

    pub async fn parsed(&self) -> Option<ParsedResume> {
        self.state.lock().await.parsed().cloned()
    }

    pub async fn insights(&self) -> Option<Insights> {
        self.state.lock().await.insights().cloned()
    }

    pub async fn analysis(&self) -> Option<AnalysisResult> {
        self.state.lock().await.analysis().cloned()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error().map(str::to_string)
    }

    /// Accepts a picked file, or rejects it without touching the flow.
    pub async fn select_file(&self, file: SelectedFile) -> Result<(), AtsError> {
        self.state.lock().await.select_file(file)
    }

    /// Uploads the selected file for parsing and folds the outcome back into
    /// the flow. The error returned is the same one recorded in the flow
    /// state, so callers may ignore it and poll instead.
    pub async fn parse_resume(&self) -> Result<ParsedResume, AtsError> {
        let (generation, file) = self.state.lock().await.begin_parse()?;
        info!(file = %file.name, "parsing resume");

        let outcome = self.backend.parse_resume(&file).await;
        let mut state = self.state.lock().await;
        match outcome {
            Ok(parsed) => {
                state.finish_parse(generation, Ok(parsed.clone()));
                Ok(parsed)
            }
            Err(e) => {
                let message = e.user_message();
                state.finish_parse(generation, Err(e));
                Err(AtsError::Server(message))
            }
        }
    }

    /// Scores the parsed resume against `job_description`.
    pub async fn analyze(&self, job_description: &str) -> Result<AnalysisResult, AtsError> {
        let (generation, parsed, jd) = self.state.lock().await.begin_analyze(job_description)?;
        info!(score_inputs = jd.len(), "requesting analysis");

        let outcome = self.backend.analyze(&parsed, &jd).await;
        let mut state = self.state.lock().await;
        match outcome {
            Ok(analysis) => {
                state.finish_analyze(generation, Ok(analysis.clone()));
                Ok(analysis)
            }
            Err(e) => {
                let message = e.user_message();
                state.finish_analyze(generation, Err(e));
                Err(AtsError::Server(message))
            }
        }
    }

    /// Flow-independent weighted scoring of a plain skill list. Does not
    /// touch the flow state.
    pub async fn weighted_score(
        &self,
        resume_skills: &[String],
        job_description: &str,
    ) -> Result<WeightedAtsScore, AtsError> {
        let jd = job_description.trim();
        if jd.is_empty() {
            return Err(AtsError::Validation(
                "Please provide a job description".to_string(),
            ));
        }
        self.backend.weighted_score(resume_skills, jd).await
    }

    /// Drops everything and returns the flow to `Idle`.
    pub async fn reset(&self) {
        self.state.lock().await.reset();
    }
}

//! The upload → parse → analyze flow as a pure state machine.
//!
//! No I/O happens here. The orchestrator calls `begin_*` before dispatching a
//! backend request and `finish_*` with the outcome; every completion carries
//! the generation token handed out by its `begin_*`, and a completion whose
//! token no longer matches is dropped. Reset and file selection bump the
//! token, so an in-flight request can never write results into a flow the
//! user has already restarted.

use serde::Serialize;
use tracing::debug;

use crate::errors::AtsError;
use crate::insights::Insights;

use super::types::{AnalysisResult, ParsedResume, SelectedFile};

/// Where the flow currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum FlowStep {
    #[default]
    Idle,
    FileSelected,
    Parsing,
    Parsed,
    Analyzing,
    Analyzed,
    Failed,
}

/// Generation token identifying one parse/analyze dispatch.
pub type Generation = u64;

/// Full state of the analysis flow.
#[derive(Debug, Default)]
pub struct FlowState {
    step: FlowStep,
    generation: Generation,
    file: Option<SelectedFile>,
    parsed: Option<ParsedResume>,
    insights: Option<Insights>,
    analysis: Option<AnalysisResult>,
    error: Option<String>,
}

impl FlowState {
    pub fn new() -> Self {
        FlowState::default()
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn parsed(&self) -> Option<&ParsedResume> {
        self.parsed.as_ref()
    }

    pub fn insights(&self) -> Option<&Insights> {
        self.insights.as_ref()
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Last user-facing error message, if the flow is carrying one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ────────────────────────────────────────────────────────────────────────
    // Events
    // ────────────────────────────────────────────────────────────────────────

    /// Accepts a newly picked file. Non-PDF files are rejected and the state
    /// is left exactly as it was. Accepting a file restarts the flow: prior
    /// parse/analysis results are dropped and the generation is bumped so any
    /// in-flight completion lands stale.
    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), AtsError> {
        if !file.is_pdf() {
            return Err(AtsError::Validation("Please upload a PDF file".to_string()));
        }
        self.generation += 1;
        self.step = FlowStep::FileSelected;
        self.file = Some(file);
        self.parsed = None;
        self.insights = None;
        self.analysis = None;
        self.error = None;
        Ok(())
    }

    /// Starts a parse. Only legal with a freshly selected file; returns the
    /// generation token the completion must carry and the file to upload.
    pub fn begin_parse(&mut self) -> Result<(Generation, SelectedFile), AtsError> {
        match (self.step(), &self.file) {
            (FlowStep::FileSelected, Some(file)) => {
                let file = file.clone();
                self.step = FlowStep::Parsing;
                self.error = None;
                Ok((self.generation, file))
            }
            _ => Err(AtsError::Validation(
                "Please select a PDF file first".to_string(),
            )),
        }
    }

    /// Applies a parse outcome. Returns `false` when the completion is stale
    /// (the flow was reset or a new file was selected while the request was
    /// in flight) and the state was left untouched.
    pub fn finish_parse(
        &mut self,
        generation: Generation,
        result: Result<ParsedResume, AtsError>,
    ) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "dropping stale parse result");
            return false;
        }
        match result {
            Ok(parsed) => {
                self.insights = Some(Insights::from_text(&parsed.raw_text));
                self.parsed = Some(parsed);
                self.step = FlowStep::Parsed;
                self.error = None;
            }
            Err(e) => {
                self.parsed = None;
                self.insights = None;
                self.analysis = None;
                self.step = FlowStep::Failed;
                self.error = Some(e.user_message());
            }
        }
        true
    }

    /// Starts an analysis run. Requires a parsed resume and a non-empty job
    /// description; returns the token plus the request inputs.
    pub fn begin_analyze(
        &mut self,
        job_description: &str,
    ) -> Result<(Generation, ParsedResume, String), AtsError> {
        let jd = job_description.trim();
        if jd.is_empty() {
            return Err(AtsError::Validation(
                "Please provide a job description".to_string(),
            ));
        }
        match (self.step(), &self.parsed) {
            (FlowStep::Parsed | FlowStep::Analyzed, Some(parsed)) => {
                let parsed = parsed.clone();
                self.step = FlowStep::Analyzing;
                self.error = None;
                Ok((self.generation, parsed, jd.to_string()))
            }
            _ => Err(AtsError::Validation(
                "Please parse a resume before analyzing".to_string(),
            )),
        }
    }

    /// Applies an analysis outcome. A failure returns the flow to `Parsed`
    /// (the resume stays parsed, analysis can be retried); a stale completion
    /// is dropped, returning `false`.
    pub fn finish_analyze(
        &mut self,
        generation: Generation,
        result: Result<AnalysisResult, AtsError>,
    ) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "dropping stale analysis result");
            return false;
        }
        match result {
            Ok(analysis) => {
                self.analysis = Some(analysis);
                self.step = FlowStep::Analyzed;
                self.error = None;
            }
            Err(e) => {
                self.step = FlowStep::Parsed;
                self.error = Some(e.user_message());
            }
        }
        true
    }

    /// Returns the flow to `Idle`, dropping everything. Bumps the generation
    /// so in-flight completions land stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.step = FlowStep::Idle;
        self.file = None;
        self.parsed = None;
        self.insights = None;
        self.analysis = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::PDF_MIME;

    fn pdf_file() -> SelectedFile {
        SelectedFile::new("resume.pdf", PDF_MIME, &b"%PDF-1.4 fake"[..])
    }

    fn parsed_resume() -> ParsedResume {
        ParsedResume {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: String::new(),
            skills: vec!["Rust".to_string()],
            education: vec![],
            experience: vec![],
            raw_text: "Led the team. Improved throughput by 40%.".to_string(),
        }
    }

    fn analysis_result(score: u32) -> AnalysisResult {
        AnalysisResult {
            score,
            skill_score: 0,
            quality_score: 0,
            score_label: None,
            feedback: Default::default(),
            skill_match: Default::default(),
            quality: Default::default(),
        }
    }

    fn parsed_flow() -> FlowState {
        let mut flow = FlowState::new();
        flow.select_file(pdf_file()).unwrap();
        let (generation, _) = flow.begin_parse().unwrap();
        assert!(flow.finish_parse(generation, Ok(parsed_resume())));
        flow
    }

    #[test]
    fn test_initial_state_is_idle() {
        let flow = FlowState::new();
        assert_eq!(flow.step(), FlowStep::Idle);
        assert!(flow.file().is_none());
        assert!(flow.error().is_none());
    }

    #[test]
    fn test_non_pdf_rejected_and_state_unchanged() {
        let mut flow = FlowState::new();
        let err = flow
            .select_file(SelectedFile::new("cv.png", "image/png", &b"\x89PNG"[..]))
            .unwrap_err();
        assert_eq!(err.user_message(), "Please upload a PDF file");
        assert_eq!(flow.step(), FlowStep::Idle);
        assert!(flow.file().is_none());
    }

    #[test]
    fn test_non_pdf_rejected_after_parse_keeps_results() {
        let mut flow = parsed_flow();
        let before = flow.generation();
        flow.select_file(SelectedFile::new("cv.txt", "text/plain", &b"hi"[..]))
            .unwrap_err();
        assert_eq!(flow.step(), FlowStep::Parsed);
        assert!(flow.parsed().is_some());
        assert_eq!(flow.generation(), before);
    }

    #[test]
    fn test_select_file_clears_previous_results() {
        let mut flow = parsed_flow();
        flow.select_file(pdf_file()).unwrap();
        assert_eq!(flow.step(), FlowStep::FileSelected);
        assert!(flow.parsed().is_none());
        assert!(flow.insights().is_none());
        assert!(flow.analysis().is_none());
    }

    #[test]
    fn test_parse_success_computes_insights() {
        let flow = parsed_flow();
        assert_eq!(flow.step(), FlowStep::Parsed);
        let insights = flow.insights().expect("insights present");
        assert!(insights.word_count > 0);
        assert!(insights.action_verbs.unique >= 2); // led, improved
    }

    #[test]
    fn test_parse_failure_enters_failed_with_message() {
        let mut flow = FlowState::new();
        flow.select_file(pdf_file()).unwrap();
        let (generation, _) = flow.begin_parse().unwrap();
        assert!(flow.finish_parse(
            generation,
            Err(AtsError::Server("Could not extract text from PDF".to_string())),
        ));
        assert_eq!(flow.step(), FlowStep::Failed);
        assert!(flow.parsed().is_none());
        assert_eq!(flow.error(), Some("Could not extract text from PDF"));
    }

    #[test]
    fn test_begin_parse_without_file_is_validation_error() {
        let mut flow = FlowState::new();
        assert!(matches!(flow.begin_parse(), Err(AtsError::Validation(_))));
    }

    #[test]
    fn test_begin_parse_twice_is_rejected() {
        let mut flow = FlowState::new();
        flow.select_file(pdf_file()).unwrap();
        flow.begin_parse().unwrap();
        assert!(matches!(flow.begin_parse(), Err(AtsError::Validation(_))));
    }

    #[test]
    fn test_stale_parse_result_after_reset_is_ignored() {
        let mut flow = FlowState::new();
        flow.select_file(pdf_file()).unwrap();
        let (generation, _) = flow.begin_parse().unwrap();
        flow.reset();
        assert!(!flow.finish_parse(generation, Ok(parsed_resume())));
        assert_eq!(flow.step(), FlowStep::Idle);
        assert!(flow.parsed().is_none());
    }

    #[test]
    fn test_stale_parse_result_after_new_file_is_ignored() {
        let mut flow = FlowState::new();
        flow.select_file(pdf_file()).unwrap();
        let (generation, _) = flow.begin_parse().unwrap();
        flow.select_file(pdf_file()).unwrap();
        assert!(!flow.finish_parse(generation, Ok(parsed_resume())));
        assert_eq!(flow.step(), FlowStep::FileSelected);
    }

    #[test]
    fn test_analyze_requires_parsed_resume() {
        let mut flow = FlowState::new();
        flow.select_file(pdf_file()).unwrap();
        assert!(matches!(
            flow.begin_analyze("Rust engineer"),
            Err(AtsError::Validation(_))
        ));
    }

    #[test]
    fn test_analyze_rejects_blank_job_description() {
        let mut flow = parsed_flow();
        let err = flow.begin_analyze("   \n ").unwrap_err();
        assert_eq!(err.user_message(), "Please provide a job description");
        assert_eq!(flow.step(), FlowStep::Parsed);
    }

    #[test]
    fn test_analyze_success_reaches_analyzed() {
        let mut flow = parsed_flow();
        let (generation, parsed, jd) = flow.begin_analyze("  Rust engineer  ").unwrap();
        assert_eq!(jd, "Rust engineer");
        assert_eq!(parsed.name, "Jane Doe");
        assert!(flow.finish_analyze(generation, Ok(analysis_result(72))));
        assert_eq!(flow.step(), FlowStep::Analyzed);
        assert_eq!(flow.analysis().unwrap().score, 72);
    }

    #[test]
    fn test_analyze_failure_returns_to_parsed_and_is_retryable() {
        let mut flow = parsed_flow();
        let (generation, _, _) = flow.begin_analyze("Rust engineer").unwrap();
        assert!(flow.finish_analyze(
            generation,
            Err(AtsError::Server("Scoring backend overloaded".to_string())),
        ));
        assert_eq!(flow.step(), FlowStep::Parsed);
        assert_eq!(flow.error(), Some("Scoring backend overloaded"));
        assert!(flow.parsed().is_some());

        // retry succeeds
        let (generation, _, _) = flow.begin_analyze("Rust engineer").unwrap();
        assert!(flow.finish_analyze(generation, Ok(analysis_result(64))));
        assert_eq!(flow.step(), FlowStep::Analyzed);
    }

    #[test]
    fn test_reanalyze_from_analyzed_is_allowed() {
        let mut flow = parsed_flow();
        let (generation, _, _) = flow.begin_analyze("Backend role").unwrap();
        flow.finish_analyze(generation, Ok(analysis_result(50)));

        let (generation, _, _) = flow.begin_analyze("Platform role").unwrap();
        flow.finish_analyze(generation, Ok(analysis_result(90)));
        assert_eq!(flow.analysis().unwrap().score, 90);
    }

    #[test]
    fn test_stale_analysis_after_reset_is_ignored() {
        let mut flow = parsed_flow();
        let (generation, _, _) = flow.begin_analyze("Rust engineer").unwrap();
        flow.reset();
        assert!(!flow.finish_analyze(generation, Ok(analysis_result(99))));
        assert!(flow.analysis().is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut flow = parsed_flow();
        let before = flow.generation();
        flow.reset();
        assert_eq!(flow.step(), FlowStep::Idle);
        assert!(flow.file().is_none());
        assert!(flow.parsed().is_none());
        assert!(flow.insights().is_none());
        assert!(flow.analysis().is_none());
        assert!(flow.error().is_none());
        assert!(flow.generation() > before);
    }
}

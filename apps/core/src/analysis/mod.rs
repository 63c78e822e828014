//! Upload → parse → analyze flow: state machine, backend client, wire types.

pub mod backend;
pub mod flow;
pub mod orchestrator;
pub mod types;

pub use backend::{HttpBackend, ScoreBackend};
pub use flow::{FlowState, FlowStep, Generation};
pub use orchestrator::Analyzer;
pub use types::{
    AnalysisResult, Feedback, ParsedResume, QualityIssue, QualityReport, SelectedFile, SkillMatch,
    WeightedAtsScore, PDF_MIME,
};

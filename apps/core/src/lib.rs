//! atscore — UI-framework-independent core of a resume / ATS-score checker
//! client.
//!
//! The crate owns four concerns:
//! - [`insights`]: pure text heuristics (readability, skim time, action verbs,
//!   quantifiable metrics) recomputed from the parsed resume text.
//! - [`analysis`]: the upload → parse → analyze flow as an explicit state
//!   machine, plus the HTTP client for the remote parse/score backend.
//! - [`builder`]: the in-memory resume document model with immutable-update
//!   operations.
//! - [`render`] / [`export`]: laying the document out as a visual snapshot and
//!   serializing it to PDF, Word, and the ATS analysis report.
//!
//! Parsing, the scoring algorithm itself, authentication, and payments live in
//! a remote backend and are consumed only through [`analysis::ScoreBackend`].

pub mod analysis;
pub mod builder;
pub mod config;
pub mod errors;
pub mod export;
pub mod insights;
pub mod render;

pub use analysis::{Analyzer, FlowStep, HttpBackend, ScoreBackend, SelectedFile};
pub use builder::ResumeDocument;
pub use config::Config;
pub use errors::AtsError;
pub use export::Exporter;
pub use insights::Insights;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes structured logging for embedding shells and integration tests.
/// Honors `RUST_LOG` when set; falls back to the given level for this crate.
pub fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), default_level))
        }))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();
}

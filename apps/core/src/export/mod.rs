//! Export pipeline: resume PDF/DOCX and the ATS analysis report.
//!
//! All exports go through [`Exporter`], which enforces single-flight: a
//! second export of any kind while one is pending is rejected. Conversions
//! return complete byte buffers; `save` writes only after a conversion has
//! fully succeeded, so a failure never leaves a partial file behind.

pub mod docx;
pub mod pdf;
pub mod report;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::analysis::AnalysisResult;
use crate::builder::ResumeDocument;
use crate::errors::AtsError;
use crate::insights::Insights;
use crate::render::render;

pub const RESUME_PDF_FILENAME: &str = "resume.pdf";
pub const RESUME_DOCX_FILENAME: &str = "resume.docx";
pub const REPORT_FILENAME: &str = "ats-analysis-report.pdf";

/// A finished export: filename it should be saved under plus the bytes.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Writes the artifact into `dir` and returns the full path.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, AtsError> {
        let path = dir.join(self.filename);
        fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), size = self.bytes.len(), "export saved");
        Ok(path)
    }
}

/// Serializes documents and reports, one export at a time.
#[derive(Debug, Default)]
pub struct Exporter {
    in_flight: AtomicBool,
}

/// Releases the single-flight slot when the export finishes, on success and
/// on error alike.
#[derive(Debug)]
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Exporter {
    pub fn new() -> Self {
        Exporter::default()
    }

    fn begin(&self) -> Result<InFlight<'_>, AtsError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AtsError::Export(
                "Another export is already in progress".to_string(),
            ));
        }
        Ok(InFlight(&self.in_flight))
    }

    /// Renders and serializes the resume as `resume.pdf`.
    pub fn resume_pdf(&self, document: &ResumeDocument) -> Result<ExportArtifact, AtsError> {
        let _guard = self.begin()?;
        let bytes = pdf::to_pdf_bytes(&render(document))?;
        Ok(ExportArtifact {
            filename: RESUME_PDF_FILENAME,
            bytes,
        })
    }

    /// Renders and serializes the resume as `resume.docx`.
    pub fn resume_docx(&self, document: &ResumeDocument) -> Result<ExportArtifact, AtsError> {
        let _guard = self.begin()?;
        let bytes = docx::to_docx_bytes(&render(document))?;
        Ok(ExportArtifact {
            filename: RESUME_DOCX_FILENAME,
            bytes,
        })
    }

    /// Serializes the analysis report as `ats-analysis-report.pdf`.
    pub fn analysis_report(
        &self,
        analysis: &AnalysisResult,
        insights: Option<&Insights>,
    ) -> Result<ExportArtifact, AtsError> {
        let _guard = self.begin()?;
        let bytes = report::to_report_bytes(analysis, insights)?;
        Ok(ExportArtifact {
            filename: REPORT_FILENAME,
            bytes,
        })
    }
}

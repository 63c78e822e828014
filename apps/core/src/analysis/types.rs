//! Wire types for the remote parse/score backend.
//!
//! All backend payloads are camelCase JSON wrapped in a `{success, data}` /
//! `{success, error}` envelope. Deserialization is strict on the fields the
//! flow depends on (`rawText`, `score`) and lenient everywhere else, so a
//! backend that adds fields never breaks the client.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// MIME type accepted for resume upload.
pub const PDF_MIME: &str = "application/pdf";

// ────────────────────────────────────────────────────────────────────────────
// Upload
// ────────────────────────────────────────────────────────────────────────────

/// A file the user has picked for analysis. Bytes are held in memory for the
/// lifetime of the flow; typical resumes are well under a megabyte.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        SelectedFile {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Upload gate: only PDF is accepted, decided by declared MIME type.
    pub fn is_pdf(&self) -> bool {
        self.mime == PDF_MIME
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Parse result
// ────────────────────────────────────────────────────────────────────────────

/// Structured resume returned by `/parse-resume`. `rawText` is the
/// load-bearing field: every local insight derives from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    pub raw_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis result
// ────────────────────────────────────────────────────────────────────────────

/// A single flagged problem in the resume, categorized by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityIssue {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

/// Per-section quality breakdown and flagged issues.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    #[serde(default)]
    pub issues: Vec<QualityIssue>,
    #[serde(default)]
    pub improvements: Vec<String>,
    /// Section name → 0–100 score.
    #[serde(default)]
    pub sections: BTreeMap<String, u32>,
}

/// Skills matched against the job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatch {
    #[serde(default)]
    pub matched: Vec<String>,
    #[serde(default)]
    pub missing: Vec<String>,
}

/// Narrative feedback accompanying the score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skill_recommendations: Vec<String>,
}

/// Full result of `/ats-analyze`. Unlike parse, the analyze endpoint puts
/// its fields at the top level of the response body next to the `success`
/// flag. Only `score` is required; every other field degrades to empty when
/// the backend omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub score: u32,
    #[serde(default)]
    pub skill_score: u32,
    #[serde(default)]
    pub quality_score: u32,
    #[serde(default)]
    pub score_label: Option<String>,
    #[serde(default)]
    pub feedback: Feedback,
    #[serde(default, rename = "skills")]
    pub skill_match: SkillMatch,
    #[serde(default)]
    pub quality: QualityReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Weighted score (legacy endpoint)
// ────────────────────────────────────────────────────────────────────────────

/// Result of the older `/ats-score-weighted` endpoint, kept for callers that
/// score a plain skill list against a job description without uploading a
/// file. The endpoint predates the envelope convention; field names drifted
/// between deployments, hence the aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedAtsScore {
    #[serde(alias = "atsScore")]
    pub score: u32,
    #[serde(default, alias = "explanation")]
    pub feedback: String,
    #[serde(default)]
    pub matched_core_skills: Vec<String>,
    #[serde(default)]
    pub missing_core_skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Envelope
// ────────────────────────────────────────────────────────────────────────────

/// First-pass decode of any response: success flag plus optional
/// server-provided message. The payload is decoded in a second pass only
/// when `success` is true.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "error")]
    pub message: Option<String>,
}

/// Second-pass decode carrying the typed payload.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

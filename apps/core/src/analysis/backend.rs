//! HTTP client for the remote parse/score backend.
//!
//! The backend is consumed through the [`ScoreBackend`] trait so the flow can
//! run against a mock in tests and so a different transport can be slotted in
//! without touching the orchestrator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::errors::AtsError;

use super::types::{
    AnalysisResult, DataEnvelope, ParsedResume, SelectedFile, StatusEnvelope, WeightedAtsScore,
};

/// Remote operations the analysis flow depends on.
#[async_trait]
pub trait ScoreBackend: Send + Sync {
    /// Uploads the resume file and returns its structured contents.
    async fn parse_resume(&self, file: &SelectedFile) -> Result<ParsedResume, AtsError>;

    /// Scores an already parsed resume against a job description.
    async fn analyze(
        &self,
        parsed: &ParsedResume,
        job_description: &str,
    ) -> Result<AnalysisResult, AtsError>;

    /// Scores a plain skill list against a job description, without a file.
    async fn weighted_score(
        &self,
        resume_skills: &[String],
        job_description: &str,
    ) -> Result<WeightedAtsScore, AtsError>;
}

/// Production backend talking JSON over HTTP to the analysis service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn from_config(config: &Config) -> Result<Self, AtsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(HttpBackend {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ScoreBackend for HttpBackend {
    #[instrument(skip(self, file), fields(file = %file.name, size = file.bytes.len()))]
    async fn parse_resume(&self, file: &SelectedFile) -> Result<ParsedResume, AtsError> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;
        let form = Form::new().part("resume", part);

        let response = self
            .client
            .post(self.url("/parse-resume"))
            .multipart(form)
            .send()
            .await?;
        let body = read_success_body(response).await?;
        decode_enveloped::<ParsedResume>(&body, "Failed to parse resume")
    }

    #[instrument(skip(self, parsed, job_description))]
    async fn analyze(
        &self,
        parsed: &ParsedResume,
        job_description: &str,
    ) -> Result<AnalysisResult, AtsError> {
        let payload = json!({
            "parsedResume": parsed,
            "jobDescription": job_description,
        });

        let response = self
            .client
            .post(self.url("/ats-analyze"))
            .json(&payload)
            .send()
            .await?;
        let body = read_success_body(response).await?;
        decode_flat::<AnalysisResult>(&body, "Failed to analyze resume")
    }

    #[instrument(skip(self, resume_skills, job_description))]
    async fn weighted_score(
        &self,
        resume_skills: &[String],
        job_description: &str,
    ) -> Result<WeightedAtsScore, AtsError> {
        let payload = json!({
            "resumeSkills": resume_skills,
            "jobDescription": job_description,
        });

        let response = self
            .client
            .post(self.url("/ats-score-weighted"))
            .json(&payload)
            .send()
            .await?;
        let body = read_success_body(response).await?;
        // legacy endpoint: payload at the top level, like analyze
        decode_flat::<WeightedAtsScore>(&body, "Failed to compute ATS score")
    }
}

/// Drains the response body, turning non-2xx statuses into [`AtsError::Server`]
/// with the server's own error message when the body carries one.
async fn read_success_body(response: reqwest::Response) -> Result<String, AtsError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        return Ok(body);
    }
    debug!(%status, "backend returned error status");
    let message = serde_json::from_str::<StatusEnvelope>(&body)
        .ok()
        .and_then(|env| env.message)
        .unwrap_or_else(|| format!("Server returned {status}"));
    Err(AtsError::Server(message))
}

/// Checks the `success` flag of a response body, turning `success: false`
/// into a server error carrying the body's message when present.
fn check_success(body: &str, fallback: &str) -> Result<(), AtsError> {
    let status: StatusEnvelope = serde_json::from_str(body)
        .map_err(|e| AtsError::MalformedResponse(e.to_string()))?;
    if !status.success {
        return Err(AtsError::Server(
            status.message.unwrap_or_else(|| fallback.to_string()),
        ));
    }
    Ok(())
}

/// Decodes a `{success, data}` envelope in two passes: the status flag
/// first, then the typed payload under `data`.
fn decode_enveloped<T: DeserializeOwned>(body: &str, fallback: &str) -> Result<T, AtsError> {
    check_success(body, fallback)?;
    let envelope: DataEnvelope<T> = serde_json::from_str(body)
        .map_err(|e| AtsError::MalformedResponse(e.to_string()))?;
    Ok(envelope.data)
}

/// Decodes a response whose payload sits at the top level next to the
/// `success` flag (the analyze endpoint's shape).
fn decode_flat<T: DeserializeOwned>(body: &str, fallback: &str) -> Result<T, AtsError> {
    check_success(body, fallback)?;
    serde_json::from_str::<T>(body).map_err(|e| AtsError::MalformedResponse(e.to_string()))
}

//! Recruiter insights — locally computed, derived entirely from the parsed
//! resume's raw text. No network calls; destroyed and recomputed whenever the
//! source text changes.

pub mod text_metrics;

use serde::{Deserialize, Serialize};

pub use text_metrics::{
    compute_action_verbs, compute_quantifiable_metrics, compute_readability, compute_skim_time,
    ActionVerbs, MetricsLevel, QuantifiableMetrics, Readability, ReadabilityLevel, VerbLevel,
};

/// Aggregate of all locally computed text metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub readability: Readability,
    pub skim_time: String,
    pub word_count: u32,
    pub action_verbs: ActionVerbs,
    pub metrics: QuantifiableMetrics,
}

impl Insights {
    /// Computes the full insight set from raw resume text. Pure.
    pub fn from_text(raw_text: &str) -> Self {
        Insights {
            readability: compute_readability(raw_text),
            skim_time: compute_skim_time(raw_text),
            word_count: text_metrics::word_count(raw_text),
            action_verbs: compute_action_verbs(raw_text),
            metrics: compute_quantifiable_metrics(raw_text),
        }
    }
}

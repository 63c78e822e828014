//! Text metrics — pure heuristics over raw resume text.
//!
//! Every function here is deterministic and side-effect-free: same input,
//! same output, no I/O. They run synchronously whenever the parsed resume
//! text changes.

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Levels
// ────────────────────────────────────────────────────────────────────────────

/// Readability classification derived from average sentence length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadabilityLevel {
    Unknown,
    Complex,
    Professional,
    #[serde(rename = "Easy to Read")]
    EasyToRead,
}

impl fmt::Display for ReadabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReadabilityLevel::Unknown => "Unknown",
            ReadabilityLevel::Complex => "Complex",
            ReadabilityLevel::Professional => "Professional",
            ReadabilityLevel::EasyToRead => "Easy to Read",
        };
        f.write_str(s)
    }
}

/// Action-verb usage classification. Aim is 5+ distinct strong verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerbLevel {
    Weak,
    Good,
    Strong,
}

impl fmt::Display for VerbLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerbLevel::Weak => "Weak",
            VerbLevel::Good => "Good",
            VerbLevel::Strong => "Strong",
        };
        f.write_str(s)
    }
}

/// Quantifiable-metric density classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricsLevel {
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    Good,
    Excellent,
}

impl fmt::Display for MetricsLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MetricsLevel::NeedsImprovement => "Needs Improvement",
            MetricsLevel::Good => "Good",
            MetricsLevel::Excellent => "Excellent",
        };
        f.write_str(s)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Results
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    pub score: u32,
    pub level: ReadabilityLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionVerbs {
    pub score: u32,
    /// Total occurrences of strong verbs, duplicates included.
    pub count: u32,
    /// Distinct strong verbs used.
    pub unique: u32,
    pub level: VerbLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantifiableMetrics {
    pub count: u32,
    pub level: MetricsLevel,
}

/// The fixed vocabulary of strong action verbs scanned for in resume text.
pub const STRONG_VERBS: [&str; 27] = [
    "accelerated",
    "achieved",
    "analyzed",
    "built",
    "collaborated",
    "created",
    "delivered",
    "developed",
    "driven",
    "enhanced",
    "expanded",
    "generated",
    "improved",
    "increased",
    "initiated",
    "led",
    "managed",
    "maximized",
    "optimized",
    "orchestrated",
    "reduced",
    "resolved",
    "spearheaded",
    "streamlined",
    "transformed",
    "utilized",
    "won",
];

// ────────────────────────────────────────────────────────────────────────────
// Metric functions
// ────────────────────────────────────────────────────────────────────────────

/// Words split on whitespace; used by every metric and by the word-count
/// insight itself.
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Simplified Flesch-Kincaid-style readability from average words per
/// sentence. Sentences are the non-empty segments between `.`, `!`, `?`.
///
/// avg > 20 → Complex (60); avg > 14 → Professional (80); else Easy to Read
/// (95). Empty text → Unknown (0).
pub fn compute_readability(text: &str) -> Readability {
    if text.trim().is_empty() {
        return Readability {
            score: 0,
            level: ReadabilityLevel::Unknown,
        };
    }

    let words = word_count(text);
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1);
    let avg_words_per_sentence = f64::from(words) / sentences as f64;

    if avg_words_per_sentence > 20.0 {
        Readability {
            score: 60,
            level: ReadabilityLevel::Complex,
        }
    } else if avg_words_per_sentence > 14.0 {
        Readability {
            score: 80,
            level: ReadabilityLevel::Professional,
        }
    } else {
        Readability {
            score: 95,
            level: ReadabilityLevel::EasyToRead,
        }
    }
}

/// Estimated skim time at 400 words per minute, rounded up to whole seconds.
/// Formats as `"{n}s"` under a minute, else `"{ceil(n/60)}m"`.
///
/// 400 wpm models a recruiter scanning, not reading (~250 wpm).
pub fn compute_skim_time(text: &str) -> String {
    let words = word_count(text) as u64;
    if words == 0 {
        return "0s".to_string();
    }

    let seconds = (words * 60).div_ceil(400);
    if seconds < 60 {
        format!("{seconds}s")
    } else {
        format!("{}m", seconds.div_ceil(60))
    }
}

/// Counts strong action verbs among the lowercased whitespace tokens of the
/// text. `score = min(100, unique * 20)`; ≥80 Strong, ≥40 Good, else Weak.
pub fn compute_action_verbs(text: &str) -> ActionVerbs {
    let lower = text.to_lowercase();
    let mut count = 0u32;
    let mut seen: HashSet<&str> = HashSet::new();

    for token in lower.split_whitespace() {
        if let Some(verb) = STRONG_VERBS.iter().find(|v| **v == token) {
            count += 1;
            seen.insert(verb);
        }
    }

    let unique = seen.len() as u32;
    let score = (unique * 20).min(100);
    let level = if score >= 80 {
        VerbLevel::Strong
    } else if score >= 40 {
        VerbLevel::Good
    } else {
        VerbLevel::Weak
    };

    ActionVerbs {
        score,
        count,
        unique,
        level,
    }
}

fn metric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Percentages, currency, and abbreviated scales ("10k+", "2m+").
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\d+%|\$\d+|\d+k\+|\d+m\+").expect("metric pattern is valid")
    })
}

/// Counts quantified-result markers (percentages, currency, abbreviated
/// scales). ≥5 Excellent, ≥3 Good, else Needs Improvement.
pub fn compute_quantifiable_metrics(text: &str) -> QuantifiableMetrics {
    let count = metric_pattern().find_iter(text).count() as u32;

    let level = if count >= 5 {
        MetricsLevel::Excellent
    } else if count >= 3 {
        MetricsLevel::Good
    } else {
        MetricsLevel::NeedsImprovement
    };

    QuantifiableMetrics { count, level }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── readability ─────────────────────────────────────────────────────────

    #[test]
    fn test_readability_empty_text_is_unknown() {
        let r = compute_readability("");
        assert_eq!(r.score, 0);
        assert_eq!(r.level, ReadabilityLevel::Unknown);
    }

    #[test]
    fn test_readability_whitespace_only_is_unknown() {
        let r = compute_readability("   \n\t  ");
        assert_eq!(r.level, ReadabilityLevel::Unknown);
    }

    #[test]
    fn test_readability_short_sentences_easy_to_read() {
        // 3 sentences of 4 words each → avg 4 ≤ 14
        let r = compute_readability("I build web apps. I ship them fast. They work very well.");
        assert_eq!(r.score, 95);
        assert_eq!(r.level, ReadabilityLevel::EasyToRead);
    }

    #[test]
    fn test_readability_avg_above_14_is_professional() {
        // 15 words, one sentence → avg 15, in the (14, 20] band
        let text = "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen.";
        let r = compute_readability(text);
        assert_eq!(r.score, 80);
        assert_eq!(r.level, ReadabilityLevel::Professional);
    }

    #[test]
    fn test_readability_avg_exactly_20_is_professional() {
        // Threshold is strict: avg must exceed 20 to be Complex.
        let words: Vec<String> = (0..20).map(|i| format!("w{i}")).collect();
        let text = format!("{}.", words.join(" "));
        let r = compute_readability(&text);
        assert_eq!(r.level, ReadabilityLevel::Professional);
    }

    #[test]
    fn test_readability_fifty_word_single_sentence_is_complex() {
        // 50 words / 1 sentence = 50 average → Complex
        let words: Vec<String> = (0..50).map(|i| format!("word{i}")).collect();
        let text = format!("{}.", words.join(" "));
        let r = compute_readability(&text);
        assert_eq!(r.score, 60);
        assert_eq!(r.level, ReadabilityLevel::Complex);
    }

    #[test]
    fn test_readability_is_pure() {
        let text = "Shipped the launch. Owned the rollout. Measured the impact.";
        assert_eq!(compute_readability(text), compute_readability(text));
    }

    // ── skim time ───────────────────────────────────────────────────────────

    #[test]
    fn test_skim_time_empty_is_zero_seconds() {
        assert_eq!(compute_skim_time(""), "0s");
    }

    #[test]
    fn test_skim_time_hundred_words_is_fifteen_seconds() {
        let text = vec!["word"; 100].join(" ");
        assert_eq!(compute_skim_time(&text), "15s");
    }

    #[test]
    fn test_skim_time_rounds_up_to_whole_seconds() {
        // 10 words → 1.5s → ceil → 2s
        let text = vec!["word"; 10].join(" ");
        assert_eq!(compute_skim_time(&text), "2s");
    }

    #[test]
    fn test_skim_time_switches_to_minutes_at_sixty_seconds() {
        // 400 words → exactly 60s → "1m"
        let text = vec!["word"; 400].join(" ");
        assert_eq!(compute_skim_time(&text), "1m");
    }

    #[test]
    fn test_skim_time_long_text_in_minutes() {
        // 4000 words → 600s → 10m
        let text = vec!["word"; 4000].join(" ");
        assert_eq!(compute_skim_time(&text), "10m");
    }

    // ── action verbs ────────────────────────────────────────────────────────

    #[test]
    fn test_action_verbs_empty_text_is_weak_zero() {
        let v = compute_action_verbs("");
        assert_eq!(v.score, 0);
        assert_eq!(v.count, 0);
        assert_eq!(v.unique, 0);
        assert_eq!(v.level, VerbLevel::Weak);
    }

    #[test]
    fn test_action_verbs_case_insensitive() {
        let upper = compute_action_verbs("LED the team");
        let lower = compute_action_verbs("led the team");
        assert_eq!(upper.unique, lower.unique);
        assert_eq!(upper.unique, 1);
    }

    #[test]
    fn test_action_verbs_duplicates_counted_once_for_unique() {
        let v = compute_action_verbs("led led led");
        assert_eq!(v.count, 3);
        assert_eq!(v.unique, 1);
        assert_eq!(v.score, 20);
        assert_eq!(v.level, VerbLevel::Weak);
    }

    #[test]
    fn test_action_verbs_two_distinct_is_good() {
        let v = compute_action_verbs("built and optimized the pipeline");
        assert_eq!(v.unique, 2);
        assert_eq!(v.score, 40);
        assert_eq!(v.level, VerbLevel::Good);
    }

    #[test]
    fn test_action_verbs_four_distinct_is_strong() {
        let v = compute_action_verbs("achieved built delivered led");
        assert_eq!(v.unique, 4);
        assert_eq!(v.score, 80);
        assert_eq!(v.level, VerbLevel::Strong);
    }

    #[test]
    fn test_action_verbs_score_caps_at_100() {
        let text = "accelerated achieved analyzed built collaborated created delivered";
        let v = compute_action_verbs(text);
        assert_eq!(v.unique, 7);
        assert_eq!(v.score, 100);
    }

    // ── quantifiable metrics ────────────────────────────────────────────────

    #[test]
    fn test_metrics_empty_text_needs_improvement() {
        let m = compute_quantifiable_metrics("");
        assert_eq!(m.count, 0);
        assert_eq!(m.level, MetricsLevel::NeedsImprovement);
    }

    #[test]
    fn test_metrics_percentage_and_currency_detected() {
        let m = compute_quantifiable_metrics("Grew revenue by 25% and saved $10k");
        assert!(m.count >= 2, "expected ≥2 matches, got {}", m.count);
    }

    #[test]
    fn test_metrics_abbreviated_scales_case_insensitive() {
        let m = compute_quantifiable_metrics("Scaled to 100K+ users and 2M+ requests");
        assert_eq!(m.count, 2);
    }

    #[test]
    fn test_metrics_three_matches_is_good() {
        let m = compute_quantifiable_metrics("Cut costs 30%, lifted signups 12%, saved $400");
        assert_eq!(m.count, 3);
        assert_eq!(m.level, MetricsLevel::Good);
    }

    #[test]
    fn test_metrics_five_matches_is_excellent() {
        let m = compute_quantifiable_metrics("10% 20% 30% $50 99%");
        assert_eq!(m.count, 5);
        assert_eq!(m.level, MetricsLevel::Excellent);
    }

    // ── level display strings ───────────────────────────────────────────────

    #[test]
    fn test_level_display_matches_ui_strings() {
        assert_eq!(ReadabilityLevel::EasyToRead.to_string(), "Easy to Read");
        assert_eq!(MetricsLevel::NeedsImprovement.to_string(), "Needs Improvement");
        assert_eq!(VerbLevel::Strong.to_string(), "Strong");
    }
}

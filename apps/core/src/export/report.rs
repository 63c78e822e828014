//! ATS analysis report export.
//!
//! A structured text report built directly from the analysis result plus the
//! local insights: header, score block, critical issues, missing skills,
//! recommendations, and a writing tip when the action-verb variety is low.
//! Layout is a simple y-cursor that breaks to a new page past 270mm.

use chrono::Local;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::analysis::AnalysisResult;
use crate::errors::AtsError;
use crate::insights::Insights;
use crate::render::wrap_text;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const PAGE_BREAK_AT_MM: f32 = 270.0;
const WRAP_CHARS: usize = 90;

struct ReportWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y_mm: f32,
}

impl ReportWriter {
    fn new() -> Result<Self, AtsError> {
        let (doc, page, layer) =
            PdfDocument::new("ATS Analysis Report", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AtsError::Export(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AtsError::Export(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(ReportWriter {
            doc,
            layer,
            regular,
            bold,
            y_mm: MARGIN_MM,
        })
    }

    fn break_page_if_needed(&mut self) {
        if self.y_mm > PAGE_BREAK_AT_MM {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y_mm = MARGIN_MM;
        }
    }

    fn line(&mut self, text: &str, size_pt: f32, bold: bool) {
        self.break_page_if_needed();
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(
            text,
            size_pt,
            Mm(MARGIN_MM),
            Mm(PAGE_HEIGHT_MM - self.y_mm),
            font,
        );
        self.y_mm += size_pt * 0.55;
    }

    fn wrapped(&mut self, text: &str, size_pt: f32) {
        for line in wrap_text(text, WRAP_CHARS) {
            self.line(&line, size_pt, false);
        }
    }

    fn bullet(&mut self, text: &str) {
        let mut lines = wrap_text(text, WRAP_CHARS - 3).into_iter();
        if let Some(first) = lines.next() {
            self.line(&format!("- {first}"), 10.0, false);
        }
        for rest in lines {
            self.line(&format!("  {rest}"), 10.0, false);
        }
    }

    fn heading(&mut self, text: &str) {
        self.y_mm += 4.0;
        self.line(text, 14.0, true);
        self.y_mm += 1.0;
    }

    fn gap(&mut self, mm: f32) {
        self.y_mm += mm;
    }

    fn finish(self) -> Result<Vec<u8>, AtsError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| AtsError::Export(e.to_string()))
    }
}

/// Minimum distinct action verbs before the report stops nudging the writer.
const VERB_VARIETY_TARGET: u32 = 5;

/// Serializes the analysis report to PDF bytes.
pub fn to_report_bytes(
    analysis: &AnalysisResult,
    insights: Option<&Insights>,
) -> Result<Vec<u8>, AtsError> {
    let mut writer = ReportWriter::new()?;

    writer.line("ATS Analysis Report", 22.0, true);
    writer.line(
        &format!("Generated on {}", Local::now().format("%m/%d/%Y")),
        10.0,
        false,
    );
    writer.gap(6.0);

    writer.line("Overall Match Score", 14.0, true);
    writer.line(&format!("{}%", analysis.score), 32.0, true);
    writer.line(&format!("Skills: {}%", analysis.skill_score), 12.0, false);
    writer.line(&format!("Quality: {}%", analysis.quality_score), 12.0, false);
    writer.gap(4.0);

    if !analysis.quality.issues.is_empty() {
        writer.heading("Critical Issues");
        for issue in &analysis.quality.issues {
            writer.bullet(&issue.message);
        }
    }

    if !analysis.skill_match.missing.is_empty() {
        writer.heading("Missing Skills");
        writer.wrapped(&analysis.skill_match.missing.join(", "), 10.0);
    }

    if !analysis.quality.improvements.is_empty() {
        writer.heading("Recommendations");
        for improvement in &analysis.quality.improvements {
            writer.bullet(improvement);
        }
    }

    if let Some(insights) = insights {
        if insights.action_verbs.unique < VERB_VARIETY_TARGET {
            writer.heading("Action Verbs Analysis");
            writer.wrapped(
                &format!(
                    "Your resume uses only {} strong action verbs. Consider using words like: \
                     Analyzed, Developed, Led, Managed.",
                    insights.action_verbs.unique
                ),
                10.0,
            );
        }
    }

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Feedback, QualityIssue, QualityReport, SkillMatch};

    fn sample_analysis() -> AnalysisResult {
        AnalysisResult {
            score: 72,
            skill_score: 65,
            quality_score: 80,
            score_label: Some("Good".to_string()),
            feedback: Feedback {
                summary: "Solid match with room to grow.".to_string(),
                skill_recommendations: vec!["Add Kubernetes experience".to_string()],
            },
            skill_match: SkillMatch {
                matched: vec!["Rust".to_string()],
                missing: vec!["Kubernetes".to_string()],
            },
            quality: QualityReport {
                issues: vec![
                    QualityIssue {
                        kind: "critical".to_string(),
                        message: "No summary section".to_string(),
                    },
                    QualityIssue {
                        kind: "minor".to_string(),
                        message: "Inconsistent date formats".to_string(),
                    },
                ],
                improvements: vec!["Quantify achievements".to_string()],
                sections: Default::default(),
            },
        }
    }

    #[test]
    fn test_report_bytes_have_magic_header() {
        let bytes = to_report_bytes(&sample_analysis(), None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_report_with_low_verb_variety_succeeds() {
        let insights = Insights::from_text("Worked on things. Worked on more things.");
        assert!(insights.action_verbs.unique < VERB_VARIETY_TARGET);
        let bytes = to_report_bytes(&sample_analysis(), Some(&insights)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_report_paginates_without_error() {
        let mut analysis = sample_analysis();
        analysis.quality.improvements = (0..200)
            .map(|i| format!("Improvement suggestion number {i} with enough words to wrap"))
            .collect();
        let bytes = to_report_bytes(&analysis, None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}

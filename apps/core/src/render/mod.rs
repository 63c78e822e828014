//! Visual layout of a [`ResumeDocument`].
//!
//! Rendering produces a continuous column of positioned, styled text lines at
//! A4 width (millimetre coordinates, origin at the top of the content area),
//! plus an HTML snapshot carrying the print style sheet. The export pipeline
//! slices the line column into pages; the HTML variant feeds the Word export.

use crate::builder::{ContactInfo, ResumeDocument, SectionData, SectionKind};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 15.0;

/// Vertical space usable for content on one page.
pub const USABLE_HEIGHT_MM: f32 = PAGE_HEIGHT_MM - 2.0 * MARGIN_MM;

/// Greedy wrap width for body text at 11pt across the content column.
const BODY_WRAP_CHARS: usize = 95;

// ────────────────────────────────────────────────────────────────────────────
// Line model
// ────────────────────────────────────────────────────────────────────────────

/// Visual role of a rendered line. Sizes and line heights are fixed per
/// style, mirroring the print style sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Candidate name: 24pt bold, uppercase, centered.
    Name,
    /// Contact strip under the name: 10pt, centered.
    ContactStrip,
    /// Section heading: 14pt bold, uppercase, ruled underneath.
    SectionTitle,
    /// Item heading (job title, degree, certification name): 12pt bold.
    ItemTitle,
    /// Item metadata (company, dates): 10pt.
    ItemMeta,
    /// Body text: 11pt.
    Body,
}

impl LineStyle {
    pub fn font_size_pt(self) -> f32 {
        match self {
            LineStyle::Name => 24.0,
            LineStyle::ContactStrip => 10.0,
            LineStyle::SectionTitle => 14.0,
            LineStyle::ItemTitle => 12.0,
            LineStyle::ItemMeta => 10.0,
            LineStyle::Body => 11.0,
        }
    }

    /// Line advance in mm, roughly 1.35× the font size.
    pub fn height_mm(self) -> f32 {
        match self {
            LineStyle::Name => 11.5,
            LineStyle::ContactStrip => 5.0,
            LineStyle::SectionTitle => 9.0,
            LineStyle::ItemTitle => 6.0,
            LineStyle::ItemMeta => 4.8,
            LineStyle::Body => 5.2,
        }
    }

    pub fn bold(self) -> bool {
        matches!(
            self,
            LineStyle::Name | LineStyle::SectionTitle | LineStyle::ItemTitle
        )
    }

    pub fn centered(self) -> bool {
        matches!(self, LineStyle::Name | LineStyle::ContactStrip)
    }
}

/// One positioned line of text. `y_mm` is the top of the line, measured from
/// the top of the content column (margins excluded).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderLine {
    pub text: String,
    pub style: LineStyle,
    pub y_mm: f32,
}

/// Full rendering of a document: the positioned line column and the HTML
/// snapshot with the print style sheet.
#[derive(Debug, Clone)]
pub struct RenderedResume {
    pub lines: Vec<RenderLine>,
    pub content_height_mm: f32,
    pub html: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

struct LineWriter {
    lines: Vec<RenderLine>,
    cursor_mm: f32,
}

impl LineWriter {
    fn new() -> Self {
        LineWriter {
            lines: Vec::new(),
            cursor_mm: 0.0,
        }
    }

    fn push(&mut self, text: impl Into<String>, style: LineStyle) {
        self.lines.push(RenderLine {
            text: text.into(),
            style,
            y_mm: self.cursor_mm,
        });
        self.cursor_mm += style.height_mm();
    }

    fn push_wrapped(&mut self, text: &str, style: LineStyle) {
        for line in wrap_text(text, BODY_WRAP_CHARS) {
            self.push(line, style);
        }
    }

    fn gap(&mut self, mm: f32) {
        self.cursor_mm += mm;
    }
}

/// Greedy word wrap. Words longer than `max_chars` land on their own line
/// unbroken.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn contact_strip(contact: &ContactInfo) -> String {
    [
        contact.email.as_str(),
        contact.phone.as_str(),
        contact.location.as_str(),
        contact.linkedin.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" | ")
}

fn section_title(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Contact => "", // contact renders as the header block
        SectionKind::Experience => "EXPERIENCE",
        SectionKind::Education => "EDUCATION",
        SectionKind::Skills => "SKILLS",
        SectionKind::Certifications => "CERTIFICATIONS",
    }
}

fn join_nonempty(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(sep)
}

/// Lays the document out as a positioned line column plus the HTML snapshot.
pub fn render(document: &ResumeDocument) -> RenderedResume {
    let mut writer = LineWriter::new();

    for section in document.sections() {
        match &section.data {
            SectionData::Contact(contact) => {
                let name = if contact.name.is_empty() {
                    "YOUR NAME".to_string()
                } else {
                    contact.name.to_uppercase()
                };
                writer.push(name, LineStyle::Name);
                if !contact.title.is_empty() {
                    writer.push(contact.title.clone(), LineStyle::ContactStrip);
                }
                let strip = contact_strip(contact);
                if !strip.is_empty() {
                    writer.push(strip, LineStyle::ContactStrip);
                }
                writer.gap(4.0);
            }
            SectionData::Experience { items } => {
                writer.push(section_title(section.kind), LineStyle::SectionTitle);
                for item in items {
                    writer.push(item.title.clone(), LineStyle::ItemTitle);
                    let meta = join_nonempty(&[&item.company, &item.duration], " | ");
                    if !meta.is_empty() {
                        writer.push(meta, LineStyle::ItemMeta);
                    }
                    writer.push_wrapped(&item.description, LineStyle::Body);
                    writer.gap(2.5);
                }
            }
            SectionData::Education { items } => {
                writer.push(section_title(section.kind), LineStyle::SectionTitle);
                for item in items {
                    writer.push(item.degree.clone(), LineStyle::ItemTitle);
                    let gpa = if item.gpa.is_empty() {
                        String::new()
                    } else {
                        format!("GPA: {}", item.gpa)
                    };
                    let meta = join_nonempty(&[&item.institution, &item.year, &gpa], " | ");
                    if !meta.is_empty() {
                        writer.push(meta, LineStyle::ItemMeta);
                    }
                    writer.gap(2.5);
                }
            }
            SectionData::Skills { skills } => {
                writer.push(section_title(section.kind), LineStyle::SectionTitle);
                writer.push_wrapped(skills, LineStyle::Body);
                writer.gap(2.5);
            }
            SectionData::Certifications { items } => {
                writer.push(section_title(section.kind), LineStyle::SectionTitle);
                for item in items {
                    writer.push(item.name.clone(), LineStyle::ItemTitle);
                    let meta = join_nonempty(&[&item.issuer, &item.date], " | ");
                    if !meta.is_empty() {
                        writer.push(meta, LineStyle::ItemMeta);
                    }
                    writer.gap(2.5);
                }
            }
        }
    }

    RenderedResume {
        content_height_mm: writer.cursor_mm,
        html: render_html(document),
        lines: writer.lines,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HTML
// ────────────────────────────────────────────────────────────────────────────

const PRINT_STYLE: &str = "\
body { font-family: 'Times New Roman', Times, serif; color: #000; margin: 40px; }\n\
h1 { font-size: 24pt; text-transform: uppercase; text-align: center; margin: 0 0 4px 0; }\n\
.contact { text-align: center; font-size: 10pt; margin: 0 0 16px 0; }\n\
h2 { font-size: 14pt; text-transform: uppercase; border-bottom: 1px solid #000; margin: 14px 0 6px 0; }\n\
h3 { font-size: 12pt; margin: 8px 0 2px 0; }\n\
.meta { font-size: 10pt; font-style: italic; margin: 0 0 4px 0; }\n\
p { font-size: 11pt; margin: 0 0 6px 0; }";

pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn push_heading(html: &mut String, kind: SectionKind) {
    html.push_str(&format!("<h2>{}</h2>\n", section_title(kind)));
}

/// Renders the document as a standalone HTML page with the print style sheet.
pub fn render_html(document: &ResumeDocument) -> String {
    let mut body = String::new();

    for section in document.sections() {
        match &section.data {
            SectionData::Contact(contact) => {
                let name = if contact.name.is_empty() {
                    "Your Name".to_string()
                } else {
                    contact.name.clone()
                };
                body.push_str(&format!("<h1>{}</h1>\n", html_escape(&name)));
                if !contact.title.is_empty() {
                    body.push_str(&format!(
                        "<p class=\"contact\">{}</p>\n",
                        html_escape(&contact.title)
                    ));
                }
                let strip = contact_strip(contact);
                if !strip.is_empty() {
                    body.push_str(&format!(
                        "<p class=\"contact\">{}</p>\n",
                        html_escape(&strip)
                    ));
                }
            }
            SectionData::Experience { items } => {
                push_heading(&mut body, section.kind);
                for item in items {
                    body.push_str(&format!("<h3>{}</h3>\n", html_escape(&item.title)));
                    let meta = join_nonempty(&[&item.company, &item.duration], " | ");
                    if !meta.is_empty() {
                        body.push_str(&format!("<p class=\"meta\">{}</p>\n", html_escape(&meta)));
                    }
                    if !item.description.is_empty() {
                        body.push_str(&format!("<p>{}</p>\n", html_escape(&item.description)));
                    }
                }
            }
            SectionData::Education { items } => {
                push_heading(&mut body, section.kind);
                for item in items {
                    body.push_str(&format!("<h3>{}</h3>\n", html_escape(&item.degree)));
                    let gpa = if item.gpa.is_empty() {
                        String::new()
                    } else {
                        format!("GPA: {}", item.gpa)
                    };
                    let meta = join_nonempty(&[&item.institution, &item.year, &gpa], " | ");
                    if !meta.is_empty() {
                        body.push_str(&format!("<p class=\"meta\">{}</p>\n", html_escape(&meta)));
                    }
                }
            }
            SectionData::Skills { skills } => {
                push_heading(&mut body, section.kind);
                if !skills.is_empty() {
                    body.push_str(&format!("<p>{}</p>\n", html_escape(skills)));
                }
            }
            SectionData::Certifications { items } => {
                push_heading(&mut body, section.kind);
                for item in items {
                    body.push_str(&format!("<h3>{}</h3>\n", html_escape(&item.name)));
                    let meta = join_nonempty(&[&item.issuer, &item.date], " | ");
                    if !meta.is_empty() {
                        body.push_str(&format!("<p class=\"meta\">{}</p>\n", html_escape(&meta)));
                    }
                }
            }
        }
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <style>\n{PRINT_STYLE}\n</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{ContactPatch, SectionPatch};

    fn sample_document() -> ResumeDocument {
        let doc = ResumeDocument::default();
        let contact = doc.sections()[0].id;
        let experience = doc.sections()[1].id;
        let skills = doc.sections()[3].id;
        doc.update_section(
            contact,
            SectionPatch::Contact(ContactPatch {
                name: Some("Jane Doe".to_string()),
                email: Some("jane@example.com".to_string()),
                phone: Some("555-0100".to_string()),
                ..ContactPatch::default()
            }),
        )
        .update_item(experience, 0, "title", "Backend Engineer")
        .update_item(experience, 0, "company", "Initech")
        .update_item(experience, 0, "duration", "2021 - 2024")
        .update_item(experience, 0, "description", "Led migrations and improved throughput.")
        .update_section(skills, SectionPatch::Skills("Rust, SQL, Tokio".to_string()))
    }

    #[test]
    fn test_name_renders_first_uppercase_centered() {
        let rendered = render(&sample_document());
        let first = &rendered.lines[0];
        assert_eq!(first.text, "JANE DOE");
        assert_eq!(first.style, LineStyle::Name);
        assert!(first.style.centered());
        assert_eq!(first.y_mm, 0.0);
    }

    #[test]
    fn test_contact_strip_joins_nonempty_fields() {
        let rendered = render(&sample_document());
        let strip = rendered
            .lines
            .iter()
            .find(|l| l.style == LineStyle::ContactStrip)
            .unwrap();
        assert_eq!(strip.text, "jane@example.com | 555-0100");
    }

    #[test]
    fn test_lines_have_increasing_positions() {
        let rendered = render(&sample_document());
        for pair in rendered.lines.windows(2) {
            assert!(pair[1].y_mm > pair[0].y_mm);
        }
        let last = rendered.lines.last().unwrap();
        assert!(rendered.content_height_mm >= last.y_mm + last.style.height_mm());
    }

    #[test]
    fn test_section_titles_present_in_order() {
        let rendered = render(&sample_document());
        let titles: Vec<&str> = rendered
            .lines
            .iter()
            .filter(|l| l.style == LineStyle::SectionTitle)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(titles, vec!["EXPERIENCE", "EDUCATION", "SKILLS"]);
    }

    #[test]
    fn test_wrap_text_greedy() {
        let lines = wrap_text("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn test_wrap_text_long_word_kept_whole() {
        let lines = wrap_text("short incomprehensibilities", 10);
        assert_eq!(lines, vec!["short", "incomprehensibilities"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn test_html_escapes_user_text() {
        let doc = sample_document();
        let skills = doc.sections()[3].id;
        let doc = doc.update_section(
            skills,
            SectionPatch::Skills("C++ <templates> & \"generics\"".to_string()),
        );
        let html = render_html(&doc);
        assert!(html.contains("&lt;templates&gt; &amp; &quot;generics&quot;"));
        assert!(!html.contains("<templates>"));
    }

    #[test]
    fn test_html_carries_print_styles() {
        let html = render_html(&sample_document());
        assert!(html.contains("Times New Roman"));
        assert!(html.contains("font-size: 24pt"));
        assert!(html.contains("<h1>Jane Doe</h1>"));
        assert!(html.contains("<h2>EXPERIENCE</h2>"));
    }
}

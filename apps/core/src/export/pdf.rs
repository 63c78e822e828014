//! Resume PDF export.
//!
//! The rendered line column is sliced into A4 pages: page count comes from
//! repeatedly subtracting one page of usable height until nothing remains, so
//! 2.4 pages of content yields 3 pages. Text is drawn with the builtin Times
//! faces to match the print style sheet.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::errors::AtsError;
use crate::render::{LineStyle, RenderedResume, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, USABLE_HEIGHT_MM};

const PT_TO_MM: f32 = 25.4 / 72.0;

/// Average glyph advance as a fraction of the font size, used to center
/// lines without real font metrics.
const AVG_GLYPH_EM: f32 = 0.5;

/// Number of pages needed for `content_height_mm` of content, one usable
/// page height at a time. Empty content still produces one page.
pub fn page_count(content_height_mm: f32, usable_height_mm: f32) -> usize {
    let mut pages = 0;
    let mut height_left = content_height_mm;
    loop {
        pages += 1;
        height_left -= usable_height_mm;
        if height_left <= 0.0 {
            return pages;
        }
    }
}

fn line_x_mm(text: &str, style: LineStyle) -> f32 {
    if style.centered() {
        let width_mm = text.chars().count() as f32 * style.font_size_pt() * AVG_GLYPH_EM * PT_TO_MM;
        ((PAGE_WIDTH_MM - width_mm) / 2.0).max(MARGIN_MM)
    } else {
        MARGIN_MM
    }
}

/// Serializes the rendered resume to PDF bytes.
pub fn to_pdf_bytes(rendered: &RenderedResume) -> Result<Vec<u8>, AtsError> {
    let pages = page_count(rendered.content_height_mm, USABLE_HEIGHT_MM);

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Resume",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "content",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::TimesRoman)
        .map_err(|e| AtsError::Export(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::TimesBold)
        .map_err(|e| AtsError::Export(e.to_string()))?;

    let mut layers: Vec<PdfLayerReference> = vec![doc.get_page(first_page).get_layer(first_layer)];
    for _ in 1..pages {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for line in &rendered.lines {
        if line.text.is_empty() {
            continue;
        }
        let page_index = ((line.y_mm / USABLE_HEIGHT_MM) as usize).min(pages - 1);
        let y_in_page = line.y_mm - page_index as f32 * USABLE_HEIGHT_MM;
        // use_text positions the baseline from the bottom-left corner
        let baseline_mm =
            PAGE_HEIGHT_MM - MARGIN_MM - y_in_page - line.style.font_size_pt() * PT_TO_MM;
        let font = font_for(&regular, &bold, line.style);
        layers[page_index].use_text(
            line.text.clone(),
            line.style.font_size_pt(),
            Mm(line_x_mm(&line.text, line.style)),
            Mm(baseline_mm),
            font,
        );
    }

    doc.save_to_bytes().map_err(|e| AtsError::Export(e.to_string()))
}

fn font_for<'a>(
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
    style: LineStyle,
) -> &'a IndirectFontRef {
    if style.bold() {
        bold
    } else {
        regular
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ResumeDocument;
    use crate::render::render;

    #[test]
    fn test_page_count_partial_page_rounds_up() {
        // 2.4 pages of content → 3 pages
        assert_eq!(page_count(2.4 * USABLE_HEIGHT_MM, USABLE_HEIGHT_MM), 3);
    }

    #[test]
    fn test_page_count_exact_fit() {
        assert_eq!(page_count(USABLE_HEIGHT_MM, USABLE_HEIGHT_MM), 1);
        assert_eq!(page_count(2.0 * USABLE_HEIGHT_MM, USABLE_HEIGHT_MM), 2);
    }

    #[test]
    fn test_page_count_empty_content_is_one_page() {
        assert_eq!(page_count(0.0, USABLE_HEIGHT_MM), 1);
    }

    #[test]
    fn test_pdf_bytes_have_magic_header() {
        let rendered = render(&ResumeDocument::default());
        let bytes = to_pdf_bytes(&rendered).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_centered_line_starts_right_of_margin() {
        let x = line_x_mm("JANE DOE", LineStyle::Name);
        assert!(x > MARGIN_MM);
        assert_eq!(line_x_mm("Led migrations.", LineStyle::Body), MARGIN_MM);
    }
}

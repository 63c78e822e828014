//! Resume Word export.
//!
//! Rebuilds the rendered line column as a DOCX with the same print styling:
//! Times faces, 24pt centered name, ruled-look (underlined) section titles.

use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts};

use crate::errors::AtsError;
use crate::render::{LineStyle, RenderedResume};

const FONT_FAMILY: &str = "Times New Roman";

fn run_for(line_text: &str, style: LineStyle) -> Run {
    // docx-rs sizes are half-points
    let mut run = Run::new()
        .add_text(line_text)
        .size((style.font_size_pt() * 2.0) as usize)
        .fonts(RunFonts::new().ascii(FONT_FAMILY));
    if style.bold() {
        run = run.bold();
    }
    if style == LineStyle::SectionTitle {
        run = run.underline("single");
    }
    run
}

/// Serializes the rendered resume to DOCX bytes.
pub fn to_docx_bytes(rendered: &RenderedResume) -> Result<Vec<u8>, AtsError> {
    let mut docx = Docx::new();

    for line in &rendered.lines {
        let mut paragraph = Paragraph::new().add_run(run_for(&line.text, line.style));
        if line.style.centered() {
            paragraph = paragraph.align(AlignmentType::Center);
        }
        docx = docx.add_paragraph(paragraph);
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| AtsError::Export(e.to_string()))?;
    Ok(buffer.into_inner())
}

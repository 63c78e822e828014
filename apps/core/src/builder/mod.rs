//! Resume builder: in-memory document model and helpers.

pub mod document;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub use document::{
    CertificationItem, ContactInfo, ContactPatch, EducationItem, ExperienceItem, ResumeDocument,
    Section, SectionData, SectionKind, SectionPatch,
};

/// Encodes an uploaded profile photo as an image data URL for embedding in
/// the contact payload and the HTML rendering.
pub fn photo_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

//! In-memory resume document model.
//!
//! Every mutating operation returns a new snapshot (immutable-update
//! discipline) so a rendering layer can diff cheaply and undo/redo can be
//! layered on later without re-architecture. Section ids are opaque and
//! stable for the lifetime of the in-memory session; they are not persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Section payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Contact,
    Experience,
    Education,
    Skills,
    Certifications,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    /// Image data URL (`data:image/...;base64,...`), built via
    /// [`crate::builder::photo_data_url`].
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

impl ExperienceItem {
    fn set(&mut self, field: &str, value: &str) -> bool {
        match field {
            "title" => self.title = value.to_string(),
            "company" => self.company = value.to_string(),
            "duration" => self.duration = value.to_string(),
            "description" => self.description = value.to_string(),
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub gpa: String,
}

impl EducationItem {
    fn set(&mut self, field: &str, value: &str) -> bool {
        match field {
            "degree" => self.degree = value.to_string(),
            "institution" => self.institution = value.to_string(),
            "year" => self.year = value.to_string(),
            "gpa" => self.gpa = value.to_string(),
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificationItem {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

impl CertificationItem {
    fn set(&mut self, field: &str, value: &str) -> bool {
        match field {
            "name" => self.name = value.to_string(),
            "issuer" => self.issuer = value.to_string(),
            "date" => self.date = value.to_string(),
            _ => return false,
        }
        true
    }
}

/// Type-specific data payload of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SectionData {
    Contact(ContactInfo),
    Experience { items: Vec<ExperienceItem> },
    Education { items: Vec<EducationItem> },
    Skills { skills: String },
    Certifications { items: Vec<CertificationItem> },
}

impl SectionData {
    fn default_for(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Contact => SectionData::Contact(ContactInfo::default()),
            SectionKind::Experience => SectionData::Experience {
                items: vec![ExperienceItem::default()],
            },
            SectionKind::Education => SectionData::Education {
                items: vec![EducationItem::default()],
            },
            SectionKind::Skills => SectionData::Skills {
                skills: String::new(),
            },
            SectionKind::Certifications => SectionData::Certifications {
                items: vec![CertificationItem::default()],
            },
        }
    }

    /// Number of item records, if this payload carries an item list.
    pub fn item_count(&self) -> Option<usize> {
        match self {
            SectionData::Experience { items } => Some(items.len()),
            SectionData::Education { items } => Some(items.len()),
            SectionData::Certifications { items } => Some(items.len()),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Patches
// ────────────────────────────────────────────────────────────────────────────

/// Shallow-merge patch for the contact payload. `None` fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub profile_image: Option<String>,
}

impl ContactPatch {
    fn apply(self, contact: &mut ContactInfo) {
        if let Some(name) = self.name {
            contact.name = name;
        }
        if let Some(title) = self.title {
            contact.title = title;
        }
        if let Some(email) = self.email {
            contact.email = email;
        }
        if let Some(phone) = self.phone {
            contact.phone = phone;
        }
        if let Some(location) = self.location {
            contact.location = location;
        }
        if let Some(linkedin) = self.linkedin {
            contact.linkedin = linkedin;
        }
        if let Some(image) = self.profile_image {
            contact.profile_image = Some(image);
        }
    }
}

/// Patch applied by [`ResumeDocument::update_section`]. A kind mismatch with
/// the target section is a no-op.
#[derive(Debug, Clone)]
pub enum SectionPatch {
    Contact(ContactPatch),
    Skills(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    pub kind: SectionKind,
    pub data: SectionData,
}

impl Section {
    fn new(kind: SectionKind) -> Self {
        Section {
            id: Uuid::new_v4(),
            kind,
            data: SectionData::default_for(kind),
        }
    }
}

/// Ordered sequence of resume sections. The contact section is the implicit
/// first section and is excluded from reordering; calling code never offers
/// it for removal (a design contract, not enforced here).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    sections: Vec<Section>,
}

impl Default for ResumeDocument {
    /// The starter document: contact, one experience, one education, skills.
    fn default() -> Self {
        ResumeDocument {
            sections: vec![
                Section::new(SectionKind::Contact),
                Section::new(SectionKind::Experience),
                Section::new(SectionKind::Education),
                Section::new(SectionKind::Skills),
            ],
        }
    }
}

impl ResumeDocument {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: Uuid) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// The contact payload, when present (always present in documents built
    /// through this module).
    pub fn contact(&self) -> Option<&ContactInfo> {
        self.sections.iter().find_map(|s| match &s.data {
            SectionData::Contact(contact) => Some(contact),
            _ => None,
        })
    }

    fn map_section(&self, id: Uuid, f: impl FnOnce(&mut Section)) -> Self {
        let mut next = self.clone();
        if let Some(section) = next.sections.iter_mut().find(|s| s.id == id) {
            f(section);
        }
        next
    }

    /// Shallow-merges `patch` into the section's data. No-op if the id is
    /// unknown or the patch kind does not match the section kind.
    pub fn update_section(&self, id: Uuid, patch: SectionPatch) -> Self {
        self.map_section(id, |section| match (&mut section.data, patch) {
            (SectionData::Contact(contact), SectionPatch::Contact(p)) => p.apply(contact),
            (SectionData::Skills { skills }, SectionPatch::Skills(text)) => *skills = text,
            _ => {}
        })
    }

    /// Appends a new section of `kind` with a fresh id and a type-appropriate
    /// default payload. A second contact section is rejected (no-op); the UI
    /// keeps contact as the implicit first section.
    pub fn add_section(&self, kind: SectionKind) -> Self {
        if kind == SectionKind::Contact
            && self.sections.iter().any(|s| s.kind == SectionKind::Contact)
        {
            return self.clone();
        }
        let mut next = self.clone();
        next.sections.push(Section::new(kind));
        next
    }

    /// Removes the section with `id`. No-op on unknown ids.
    pub fn remove_section(&self, id: Uuid) -> Self {
        let mut next = self.clone();
        next.sections.retain(|s| s.id != id);
        next
    }

    /// Appends one type-appropriate empty item record to a multi-item
    /// section. No-op if the section has no item list.
    pub fn add_item(&self, section_id: Uuid) -> Self {
        self.map_section(section_id, |section| match &mut section.data {
            SectionData::Experience { items } => items.push(ExperienceItem::default()),
            SectionData::Education { items } => items.push(EducationItem::default()),
            SectionData::Certifications { items } => items.push(CertificationItem::default()),
            _ => {}
        })
    }

    /// Replaces one field of the item at `index`. No-op if the index is out
    /// of range or the field name is unknown for the item type.
    pub fn update_item(&self, section_id: Uuid, index: usize, field: &str, value: &str) -> Self {
        self.map_section(section_id, |section| match &mut section.data {
            SectionData::Experience { items } => {
                if let Some(item) = items.get_mut(index) {
                    item.set(field, value);
                }
            }
            SectionData::Education { items } => {
                if let Some(item) = items.get_mut(index) {
                    item.set(field, value);
                }
            }
            SectionData::Certifications { items } => {
                if let Some(item) = items.get_mut(index) {
                    item.set(field, value);
                }
            }
            _ => {}
        })
    }

    /// Removes the item at `index` unless it is the last remaining item in
    /// that section: item lists never become empty through this operation.
    pub fn remove_item(&self, section_id: Uuid, index: usize) -> Self {
        fn remove_guarded<T>(items: &mut Vec<T>, index: usize) {
            if items.len() > 1 && index < items.len() {
                items.remove(index);
            }
        }

        self.map_section(section_id, |section| match &mut section.data {
            SectionData::Experience { items } => remove_guarded(items, index),
            SectionData::Education { items } => remove_guarded(items, index),
            SectionData::Certifications { items } => remove_guarded(items, index),
            _ => {}
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

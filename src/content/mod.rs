//! Content flattener: document to ordered render blocks
//!
//! The flattener is a pure transform over a document snapshot. It always
//! emits the header first, then one section block per populated section in
//! flow order. Empty sections are dropped here, before layout ever sees them.

mod projection;

pub use projection::{
    join_nonempty, Project, Projection, META_SEPARATOR, RANGE_SEPARATOR, ROLE_SEPARATOR,
};

use crate::document::{Document, SectionKind};
use serde::Serialize;

/// Separator between skills in the header
pub const SKILL_SEPARATOR: &str = " · ";

/// Contact, summary and skills, printed once at the top of page 1
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBlock {
    pub name: String,
    pub title: String,
    /// Email, phone, location and link, blanks dropped
    pub contact: Vec<String>,
    pub summary: Option<String>,
    pub skills: Vec<String>,
}

impl HeaderBlock {
    /// Build the header from a document
    pub fn from_document(document: &Document) -> Self {
        let contact = &document.contact;
        let summary = document.summary.trim();

        Self {
            name: contact.full_name.trim().to_string(),
            title: contact.title.trim().to_string(),
            contact: [
                contact.email.as_str(),
                contact.phone.as_str(),
                contact.location.as_str(),
                contact.link(),
            ]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
            summary: if summary.is_empty() {
                None
            } else {
                Some(summary.to_string())
            },
            skills: document
                .skills
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Contact parts joined for display
    pub fn contact_line(&self) -> String {
        self.contact.join(META_SEPARATOR)
    }

    /// Skills joined for display
    pub fn skills_line(&self) -> String {
        self.skills.join(SKILL_SEPARATOR)
    }
}

/// One entry of a section, already projected to its printable lines
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBlock {
    pub role: String,
    pub meta: Option<String>,
    pub summary: Option<String>,
    /// Non-blank bullets; empty means no list is printed
    pub bullets: Vec<String>,
}

/// A titled section and its items
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionBlock {
    pub kind: SectionKind,
    pub title: String,
    pub items: Vec<ItemBlock>,
}

/// The flattener's output unit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderBlock {
    Header(HeaderBlock),
    Section(SectionBlock),
}

impl RenderBlock {
    /// Check if this is the header block
    pub fn is_header(&self) -> bool {
        matches!(self, RenderBlock::Header(_))
    }
}

/// Flatten a document into render blocks
pub fn flatten(document: &Document) -> Vec<RenderBlock> {
    let mut blocks = Vec::with_capacity(1 + SectionKind::ALL.len());
    blocks.push(RenderBlock::Header(HeaderBlock::from_document(document)));

    for kind in SectionKind::ALL {
        let items = project_section(document, kind);
        if items.is_empty() {
            continue;
        }
        blocks.push(RenderBlock::Section(SectionBlock {
            kind,
            title: document.section_title(kind).to_string(),
            items,
        }));
    }

    blocks
}

fn project_section(document: &Document, kind: SectionKind) -> Vec<ItemBlock> {
    match kind {
        SectionKind::Experience => project_all(&document.experience),
        SectionKind::Education => project_all(&document.education),
        SectionKind::Projects => project_all(&document.projects),
        SectionKind::Licenses => project_all(&document.licenses),
        SectionKind::Certifications => project_all(&document.certifications),
        SectionKind::Awards => project_all(&document.awards),
        SectionKind::Research => project_all(&document.research),
        SectionKind::Others => project_all(&document.others.items),
        SectionKind::References => project_all(&document.references),
    }
}

fn project_all<T: Project>(items: &[T]) -> Vec<ItemBlock> {
    items
        .iter()
        .map(|item| item.projection().into_block())
        .collect()
}

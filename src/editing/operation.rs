//! Edit operations and results

use crate::document::{Direction, ItemField, SectionKind};
use serde::{Deserialize, Serialize};

/// A contact field shown in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    FullName,
    Title,
    Email,
    Phone,
    Location,
    Link,
}

/// A described mutation of the document: a field path plus its new value
///
/// Hosts send these as JSON, e.g.
/// `{"op":"setItemField","section":"experience","index":0,"field":"role","value":"Engineer"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum EditOp {
    /// Set a contact field
    SetContact { field: ContactField, value: String },
    /// Replace the summary text
    SetSummary { value: String },
    /// Replace the skills from a comma-separated string
    SetSkills { value: String },
    /// Replace the skills with an already split list
    SetSkillList { skills: Vec<String> },
    /// Set a scalar field of one item
    SetItemField {
        section: SectionKind,
        index: usize,
        field: ItemField,
        value: String,
    },
    /// Append a blank item to a section
    AddItem { section: SectionKind },
    /// Move an item one slot up or down
    MoveItem {
        section: SectionKind,
        index: usize,
        direction: Direction,
    },
    DeleteItem { section: SectionKind, index: usize },
    /// Append an empty bullet to an item
    AddBullet { section: SectionKind, index: usize },
    EditBullet {
        section: SectionKind,
        index: usize,
        bullet: usize,
        value: String,
    },
    RemoveLastBullet { section: SectionKind, index: usize },
    /// Rename the free-form section
    SetOthersTitle { value: String },
}

impl EditOp {
    /// Create a contact field edit
    pub fn set_contact(field: ContactField, value: impl Into<String>) -> Self {
        Self::SetContact {
            field,
            value: value.into(),
        }
    }

    /// Create an item field edit
    pub fn set_item_field(
        section: SectionKind,
        index: usize,
        field: ItemField,
        value: impl Into<String>,
    ) -> Self {
        Self::SetItemField {
            section,
            index,
            field,
            value: value.into(),
        }
    }

    /// Create an append of a blank item
    pub fn add_item(section: SectionKind) -> Self {
        Self::AddItem { section }
    }

    /// Create a reorder
    pub fn move_item(section: SectionKind, index: usize, direction: Direction) -> Self {
        Self::MoveItem {
            section,
            index,
            direction,
        }
    }

    /// Parse a command sent by a host
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// The part of the document an edit touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affected {
    /// Contact, summary or skills
    Header,
    Section(SectionKind),
}

/// Result of applying an edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditResult {
    pub affected: Affected,
    /// The item or bullet list changed shape, so the host form must be rebuilt
    pub structural: bool,
    /// False when the command was a no-op (e.g. moving the first item up)
    pub changed: bool,
}

impl EditResult {
    pub fn new(affected: Affected) -> Self {
        Self {
            affected,
            structural: false,
            changed: true,
        }
    }

    /// Mark the edit as changing list shape
    pub fn structural(mut self) -> Self {
        self.structural = true;
        self
    }

    /// Mark the edit as a no-op
    pub fn unchanged(mut self) -> Self {
        self.changed = false;
        self
    }

    /// Check if the document was modified
    pub fn has_changes(&self) -> bool {
        self.changed
    }
}

/// Split a comma-separated skills string, dropping blank entries
pub fn split_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

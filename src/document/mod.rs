//! Document model: the structured resume and its snapshot format

mod item;
mod section;

pub use item::{
    AwardItem, CredentialItem, EducationItem, ExperienceItem, ItemField, ItemList, OtherItem,
    ProjectItem, ReferenceItem, ResearchItem, SectionItem,
};
pub use section::{Direction, SectionKind, DEFAULT_OTHERS_TITLE};

use crate::editing::{split_skills, Affected, ContactField, EditOp, EditResult};
use crate::error::{Error, Result};
use item::{nullable, string_list};
use serde::{Deserialize, Deserializer, Serialize};

/// Snapshot schema version written by this crate
pub const SCHEMA_VERSION: u32 = 1;

/// A link shown in the contact line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactLink {
    #[serde(deserialize_with = "nullable")]
    pub label: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
}

/// Contact details printed in the header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    #[serde(deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub phone: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    /// Stored as a list for snapshot compatibility; only the first entry is used
    #[serde(deserialize_with = "nullable")]
    pub links: Vec<ContactLink>,
}

impl Contact {
    /// Get the single editable link URL
    pub fn link(&self) -> &str {
        self.links.first().map(|l| l.url.as_str()).unwrap_or("")
    }

    /// Replace the links with a single unlabeled URL
    pub fn set_link(&mut self, url: impl Into<String>) {
        self.links = vec![ContactLink {
            label: String::new(),
            url: url.into(),
        }];
    }

    fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::FullName => &mut self.full_name,
            ContactField::Title => &mut self.title,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Location => &mut self.location,
            ContactField::Link => {
                if self.links.is_empty() {
                    self.links.push(ContactLink::default());
                }
                self.links.truncate(1);
                &mut self.links[0].url
            }
        }
    }
}

/// The renameable free-form section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OthersSection {
    #[serde(deserialize_with = "nullable")]
    pub section_title: String,
    #[serde(deserialize_with = "nullable")]
    pub items: Vec<OtherItem>,
}

impl Default for OthersSection {
    fn default() -> Self {
        Self {
            section_title: DEFAULT_OTHERS_TITLE.to_string(),
            items: Vec::new(),
        }
    }
}

impl OthersSection {
    /// Get the title to print, falling back when blank
    pub fn title(&self) -> &str {
        let title = self.section_title.trim();
        if title.is_empty() {
            DEFAULT_OTHERS_TITLE
        } else {
            title
        }
    }
}

/// Accept anything for `others`; non-objects become the default section
fn lenient_others<'de, D>(deserializer: D) -> std::result::Result<OthersSection, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_object() {
        OthersSection::deserialize(value).map_err(D::Error::custom)
    } else {
        Ok(OthersSection::default())
    }
}

/// The structured resume document
///
/// Every section collection always exists. Missing or `null` collections in a
/// snapshot load as empty, so a partial file from an older version imports
/// cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub version: u32,
    #[serde(deserialize_with = "nullable")]
    pub contact: Contact,
    #[serde(deserialize_with = "nullable")]
    pub summary: String,
    #[serde(deserialize_with = "string_list")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub experience: Vec<ExperienceItem>,
    #[serde(deserialize_with = "nullable")]
    pub education: Vec<EducationItem>,
    #[serde(deserialize_with = "nullable")]
    pub projects: Vec<ProjectItem>,
    #[serde(deserialize_with = "nullable")]
    pub licenses: Vec<CredentialItem>,
    #[serde(deserialize_with = "nullable")]
    pub certifications: Vec<CredentialItem>,
    #[serde(deserialize_with = "nullable")]
    pub awards: Vec<AwardItem>,
    #[serde(deserialize_with = "nullable")]
    pub research: Vec<ResearchItem>,
    #[serde(deserialize_with = "lenient_others")]
    pub others: OthersSection,
    #[serde(deserialize_with = "nullable")]
    pub references: Vec<ReferenceItem>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create the empty default document
    pub fn new() -> Self {
        Self {
            version: SCHEMA_VERSION,
            contact: Contact::default(),
            summary: String::new(),
            skills: Vec::new(),
            experience: Vec::new(),
            education: Vec::new(),
            projects: Vec::new(),
            licenses: Vec::new(),
            certifications: Vec::new(),
            awards: Vec::new(),
            research: Vec::new(),
            others: OthersSection::default(),
            references: Vec::new(),
        }
    }

    /// Parse a document snapshot
    ///
    /// The payload must be a JSON object. Missing keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(Error::NotAnObject);
        }

        let document: Document = serde_json::from_value(value)?;
        if document.version > SCHEMA_VERSION {
            log::warn!(
                "Document schema version {} is newer than supported version {}",
                document.version,
                SCHEMA_VERSION
            );
        }
        Ok(document)
    }

    /// Serialize for storage
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize for export, indented by two spaces
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get the item collection of a section
    pub fn items(&self, kind: SectionKind) -> &dyn ItemList {
        match kind {
            SectionKind::Experience => &self.experience,
            SectionKind::Education => &self.education,
            SectionKind::Projects => &self.projects,
            SectionKind::Licenses => &self.licenses,
            SectionKind::Certifications => &self.certifications,
            SectionKind::Awards => &self.awards,
            SectionKind::Research => &self.research,
            SectionKind::Others => &self.others.items,
            SectionKind::References => &self.references,
        }
    }

    /// Get the mutable item collection of a section
    pub fn items_mut(&mut self, kind: SectionKind) -> &mut dyn ItemList {
        match kind {
            SectionKind::Experience => &mut self.experience,
            SectionKind::Education => &mut self.education,
            SectionKind::Projects => &mut self.projects,
            SectionKind::Licenses => &mut self.licenses,
            SectionKind::Certifications => &mut self.certifications,
            SectionKind::Awards => &mut self.awards,
            SectionKind::Research => &mut self.research,
            SectionKind::Others => &mut self.others.items,
            SectionKind::References => &mut self.references,
        }
    }

    /// Get the number of items in a section
    pub fn section_len(&self, kind: SectionKind) -> usize {
        self.items(kind).len()
    }

    /// Get the printed title of a section
    pub fn section_title(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Others => self.others.title(),
            _ => kind.default_title(),
        }
    }

    /// Apply an edit command in place
    pub fn apply_edit(&mut self, op: EditOp) -> Result<EditResult> {
        match op {
            EditOp::SetContact { field, value } => {
                *self.contact.field_mut(field) = value;
                Ok(EditResult::header())
            }
            EditOp::SetSummary { value } => {
                self.summary = value;
                Ok(EditResult::header())
            }
            EditOp::SetSkills { value } => {
                self.skills = split_skills(&value);
                Ok(EditResult::header())
            }
            EditOp::SetSkillList { skills } => {
                self.skills = skills;
                Ok(EditResult::header())
            }
            EditOp::SetItemField {
                section,
                index,
                field,
                value,
            } => {
                let item = self.item_mut(section, index)?;
                let slot = item
                    .field_mut(field)
                    .ok_or(Error::UnknownField { section, field })?;
                *slot = value;
                Ok(EditResult::section(section))
            }
            EditOp::AddItem { section } => {
                self.items_mut(section).push_default();
                Ok(EditResult::section(section).structural())
            }
            EditOp::MoveItem {
                section,
                index,
                direction,
            } => {
                let items = self.items_mut(section);
                if index >= items.len() {
                    return Err(Error::ItemOutOfRange { section, index });
                }
                let target = match direction {
                    Direction::Up => index.checked_sub(1),
                    Direction::Down => index.checked_add(1),
                };
                // Moving past either end leaves the order untouched
                let moved = target.map_or(false, |to| items.move_item(index, to));
                let result = EditResult::section(section).structural();
                Ok(if moved { result } else { result.unchanged() })
            }
            EditOp::DeleteItem { section, index } => {
                if !self.items_mut(section).remove(index) {
                    return Err(Error::ItemOutOfRange { section, index });
                }
                Ok(EditResult::section(section).structural())
            }
            EditOp::AddBullet { section, index } => {
                self.item_mut(section, index)?
                    .bullets_mut()
                    .push(String::new());
                Ok(EditResult::section(section).structural())
            }
            EditOp::EditBullet {
                section,
                index,
                bullet,
                value,
            } => {
                let slot = self
                    .item_mut(section, index)?
                    .bullets_mut()
                    .get_mut(bullet)
                    .ok_or(Error::BulletOutOfRange {
                        section,
                        index,
                        bullet,
                    })?;
                *slot = value;
                Ok(EditResult::section(section))
            }
            EditOp::RemoveLastBullet { section, index } => {
                let removed = self.item_mut(section, index)?.bullets_mut().pop();
                let result = EditResult::section(section).structural();
                Ok(if removed.is_some() {
                    result
                } else {
                    result.unchanged()
                })
            }
            EditOp::SetOthersTitle { value } => {
                self.others.section_title = if value.is_empty() {
                    DEFAULT_OTHERS_TITLE.to_string()
                } else {
                    value
                };
                Ok(EditResult::section(SectionKind::Others))
            }
        }
    }

    fn item_mut(&mut self, section: SectionKind, index: usize) -> Result<&mut dyn SectionItem> {
        self.items_mut(section)
            .item_mut(index)
            .ok_or(Error::ItemOutOfRange { section, index })
    }
}

impl EditResult {
    fn header() -> Self {
        Self::new(Affected::Header)
    }

    fn section(kind: SectionKind) -> Self {
        Self::new(Affected::Section(kind))
    }
}

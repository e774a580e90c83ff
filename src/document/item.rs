//! Item records for the repeatable sections

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Deserialize a value where `null` means "use the default"
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a string list, treating a `null` list as empty and dropping `null` entries
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(entries.into_iter().flatten().flatten().collect())
}

/// A scalar field of an item record, addressed by its snapshot name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    Role,
    Company,
    Location,
    Start,
    End,
    Degree,
    School,
    Year,
    Name,
    Link,
    Summary,
    Issuer,
    Issued,
    Expires,
    CredId,
    CredUrl,
    Title,
    Date,
    Scope,
    Venue,
    PubDate,
    Url,
    Authors,
    Heading,
    Subheading,
    Meta,
    Rel,
    Email,
    Phone,
    Note,
}

impl ItemField {
    /// Get the snapshot name of this field
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemField::Role => "role",
            ItemField::Company => "company",
            ItemField::Location => "location",
            ItemField::Start => "start",
            ItemField::End => "end",
            ItemField::Degree => "degree",
            ItemField::School => "school",
            ItemField::Year => "year",
            ItemField::Name => "name",
            ItemField::Link => "link",
            ItemField::Summary => "summary",
            ItemField::Issuer => "issuer",
            ItemField::Issued => "issued",
            ItemField::Expires => "expires",
            ItemField::CredId => "credId",
            ItemField::CredUrl => "credUrl",
            ItemField::Title => "title",
            ItemField::Date => "date",
            ItemField::Scope => "scope",
            ItemField::Venue => "venue",
            ItemField::PubDate => "pubDate",
            ItemField::Url => "url",
            ItemField::Authors => "authors",
            ItemField::Heading => "heading",
            ItemField::Subheading => "subheading",
            ItemField::Meta => "meta",
            ItemField::Rel => "rel",
            ItemField::Email => "email",
            ItemField::Phone => "phone",
            ItemField::Note => "note",
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable access shared by every item record
pub trait SectionItem {
    /// Get a mutable handle to a scalar field, if this record has it
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String>;

    /// Free-text bullets, blank entries included
    fn bullets(&self) -> &[String];

    fn bullets_mut(&mut self) -> &mut Vec<String>;
}

/// Type-erased view over one section's item collection
pub trait ItemList {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a blank record
    fn push_default(&mut self);

    /// Swap the item at `from` with the one at `to`; returns false when
    /// either index is out of range
    fn move_item(&mut self, from: usize, to: usize) -> bool;

    fn remove(&mut self, index: usize) -> bool;

    fn item_mut(&mut self, index: usize) -> Option<&mut dyn SectionItem>;
}

impl<T: SectionItem + Default + 'static> ItemList for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn push_default(&mut self) {
        self.push(T::default());
    }

    fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= Vec::len(self) || to >= Vec::len(self) {
            return false;
        }
        let item = Vec::remove(self, from);
        self.insert(to, item);
        true
    }

    fn remove(&mut self, index: usize) -> bool {
        if index >= Vec::len(self) {
            return false;
        }
        Vec::remove(self, index);
        true
    }

    fn item_mut(&mut self, index: usize) -> Option<&mut dyn SectionItem> {
        self.get_mut(index).map(|item| item as &mut dyn SectionItem)
    }
}

/// A position held
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceItem {
    #[serde(deserialize_with = "nullable")]
    pub role: String,
    #[serde(deserialize_with = "nullable")]
    pub company: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    #[serde(deserialize_with = "nullable")]
    pub start: String,
    #[serde(deserialize_with = "nullable")]
    pub end: String,
    #[serde(deserialize_with = "string_list")]
    pub bullets: Vec<String>,
}

impl SectionItem for ExperienceItem {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Role => Some(&mut self.role),
            ItemField::Company => Some(&mut self.company),
            ItemField::Location => Some(&mut self.location),
            ItemField::Start => Some(&mut self.start),
            ItemField::End => Some(&mut self.end),
            _ => None,
        }
    }

    fn bullets(&self) -> &[String] {
        &self.bullets
    }

    fn bullets_mut(&mut self) -> &mut Vec<String> {
        &mut self.bullets
    }
}

/// A degree or course of study
///
/// The bullet list is stored as `details` in snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationItem {
    #[serde(deserialize_with = "nullable")]
    pub degree: String,
    #[serde(deserialize_with = "nullable")]
    pub school: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    #[serde(deserialize_with = "nullable")]
    pub year: String,
    #[serde(deserialize_with = "string_list")]
    pub details: Vec<String>,
}

impl SectionItem for EducationItem {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Degree => Some(&mut self.degree),
            ItemField::School => Some(&mut self.school),
            ItemField::Location => Some(&mut self.location),
            ItemField::Year => Some(&mut self.year),
            _ => None,
        }
    }

    fn bullets(&self) -> &[String] {
        &self.details
    }

    fn bullets_mut(&mut self) -> &mut Vec<String> {
        &mut self.details
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub link: String,
    #[serde(deserialize_with = "nullable")]
    pub summary: String,
    #[serde(deserialize_with = "string_list")]
    pub bullets: Vec<String>,
}

impl SectionItem for ProjectItem {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Name => Some(&mut self.name),
            ItemField::Link => Some(&mut self.link),
            ItemField::Summary => Some(&mut self.summary),
            _ => None,
        }
    }

    fn bullets(&self) -> &[String] {
        &self.bullets
    }

    fn bullets_mut(&mut self) -> &mut Vec<String> {
        &mut self.bullets
    }
}

/// A license or certification; both sections share this shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CredentialItem {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub issuer: String,
    #[serde(deserialize_with = "nullable")]
    pub issued: String,
    #[serde(deserialize_with = "nullable")]
    pub expires: String,
    #[serde(deserialize_with = "nullable")]
    pub cred_id: String,
    #[serde(deserialize_with = "nullable")]
    pub cred_url: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    #[serde(deserialize_with = "string_list")]
    pub bullets: Vec<String>,
}

impl SectionItem for CredentialItem {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Name => Some(&mut self.name),
            ItemField::Issuer => Some(&mut self.issuer),
            ItemField::Issued => Some(&mut self.issued),
            ItemField::Expires => Some(&mut self.expires),
            ItemField::CredId => Some(&mut self.cred_id),
            ItemField::CredUrl => Some(&mut self.cred_url),
            ItemField::Location => Some(&mut self.location),
            _ => None,
        }
    }

    fn bullets(&self) -> &[String] {
        &self.bullets
    }

    fn bullets_mut(&mut self) -> &mut Vec<String> {
        &mut self.bullets
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardItem {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub issuer: String,
    #[serde(deserialize_with = "nullable")]
    pub date: String,
    #[serde(deserialize_with = "nullable")]
    pub scope: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    #[serde(deserialize_with = "nullable")]
    pub summary: String,
    #[serde(deserialize_with = "string_list")]
    pub bullets: Vec<String>,
}

impl SectionItem for AwardItem {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Title => Some(&mut self.title),
            ItemField::Issuer => Some(&mut self.issuer),
            ItemField::Date => Some(&mut self.date),
            ItemField::Scope => Some(&mut self.scope),
            ItemField::Location => Some(&mut self.location),
            ItemField::Summary => Some(&mut self.summary),
            _ => None,
        }
    }

    fn bullets(&self) -> &[String] {
        &self.bullets
    }

    fn bullets_mut(&mut self) -> &mut Vec<String> {
        &mut self.bullets
    }
}

/// A published paper or artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResearchItem {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub venue: String,
    #[serde(deserialize_with = "nullable")]
    pub pub_date: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    /// Comma-separated co-authors, printed verbatim
    #[serde(deserialize_with = "nullable")]
    pub authors: String,
    #[serde(deserialize_with = "nullable")]
    pub summary: String,
    #[serde(deserialize_with = "string_list")]
    pub bullets: Vec<String>,
}

impl SectionItem for ResearchItem {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Title => Some(&mut self.title),
            ItemField::Venue => Some(&mut self.venue),
            ItemField::PubDate => Some(&mut self.pub_date),
            ItemField::Url => Some(&mut self.url),
            ItemField::Authors => Some(&mut self.authors),
            ItemField::Summary => Some(&mut self.summary),
            _ => None,
        }
    }

    fn bullets(&self) -> &[String] {
        &self.bullets
    }

    fn bullets_mut(&mut self) -> &mut Vec<String> {
        &mut self.bullets
    }
}

/// Free-form entry of the renameable section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherItem {
    #[serde(deserialize_with = "nullable")]
    pub heading: String,
    #[serde(deserialize_with = "nullable")]
    pub subheading: String,
    #[serde(deserialize_with = "nullable")]
    pub meta: String,
    #[serde(deserialize_with = "nullable")]
    pub link: String,
    #[serde(deserialize_with = "string_list")]
    pub bullets: Vec<String>,
}

impl SectionItem for OtherItem {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Heading => Some(&mut self.heading),
            ItemField::Subheading => Some(&mut self.subheading),
            ItemField::Meta => Some(&mut self.meta),
            ItemField::Link => Some(&mut self.link),
            _ => None,
        }
    }

    fn bullets(&self) -> &[String] {
        &self.bullets
    }

    fn bullets_mut(&mut self) -> &mut Vec<String> {
        &mut self.bullets
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceItem {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub role: String,
    #[serde(deserialize_with = "nullable")]
    pub company: String,
    /// Relationship to the author
    #[serde(deserialize_with = "nullable")]
    pub rel: String,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub phone: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    #[serde(deserialize_with = "nullable")]
    pub note: String,
    #[serde(deserialize_with = "string_list")]
    pub bullets: Vec<String>,
}

impl SectionItem for ReferenceItem {
    fn field_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::Name => Some(&mut self.name),
            ItemField::Role => Some(&mut self.role),
            ItemField::Company => Some(&mut self.company),
            ItemField::Rel => Some(&mut self.rel),
            ItemField::Email => Some(&mut self.email),
            ItemField::Phone => Some(&mut self.phone),
            ItemField::Url => Some(&mut self.url),
            ItemField::Note => Some(&mut self.note),
            _ => None,
        }
    }

    fn bullets(&self) -> &[String] {
        &self.bullets
    }

    fn bullets_mut(&mut self) -> &mut Vec<String> {
        &mut self.bullets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_access() {
        let mut item = ExperienceItem::default();
        *item.field_mut(ItemField::Role).unwrap() = "Engineer".to_string();
        assert_eq!(item.role, "Engineer");
        assert!(item.field_mut(ItemField::Degree).is_none());
    }

    #[test]
    fn test_education_bullets_are_details() {
        let mut item = EducationItem::default();
        item.bullets_mut().push("Dean's list".to_string());
        assert_eq!(item.details, vec!["Dean's list".to_string()]);
    }

    #[test]
    fn test_item_list_move_and_remove() {
        let mut list: Vec<ProjectItem> = Vec::new();
        list.push_default();
        list.push_default();
        list[0].name = "first".into();
        list[1].name = "second".into();

        assert!(ItemList::move_item(&mut list, 0, 1));
        assert_eq!(list[0].name, "second");
        assert!(!ItemList::move_item(&mut list, 1, 2));

        assert!(ItemList::remove(&mut list, 0));
        assert_eq!(ItemList::len(&list), 1);
        assert!(!ItemList::remove(&mut list, 5));
    }

    #[test]
    fn test_camel_case_snapshot_names() {
        let item: ResearchItem =
            serde_json::from_str(r#"{"title":"T","pubDate":"2023","bullets":null}"#).unwrap();
        assert_eq!(item.pub_date, "2023");
        assert!(item.bullets.is_empty());

        let cred = CredentialItem {
            cred_id: "X1".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&cred).unwrap();
        assert!(json.contains("\"credId\":\"X1\""));
    }
}

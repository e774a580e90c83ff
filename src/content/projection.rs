//! Per-kind projection of item records onto the generic item block shape
//!
//! Every section renders its items as role line, meta line, summary line and
//! bullets. The kinds differ only in which fields feed which line, so each
//! record describes its mapping once and `Projection::into_block` does the rest.

use crate::content::ItemBlock;
use crate::document::{
    AwardItem, CredentialItem, EducationItem, ExperienceItem, OtherItem, ProjectItem,
    ReferenceItem, ResearchItem, SectionItem,
};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Separator between the two parts of a role line
pub const ROLE_SEPARATOR: &str = " — ";
/// Separator between meta and summary parts
pub const META_SEPARATOR: &str = " • ";
/// Separator inside a date range
pub const RANGE_SEPARATOR: &str = " – ";

type Parts<'a> = SmallVec<[Cow<'a, str>; 5]>;

/// Which fields of a record feed which line of its item block
pub struct Projection<'a> {
    pub role: Parts<'a>,
    pub meta: Parts<'a>,
    pub summary: Parts<'a>,
    pub bullets: &'a [String],
}

impl<'a> Projection<'a> {
    /// Collapse the mapping into an item block
    pub fn into_block(self) -> ItemBlock {
        ItemBlock {
            role: join_nonempty(self.role.as_slice(), ROLE_SEPARATOR),
            meta: non_empty(join_nonempty(self.meta.as_slice(), META_SEPARATOR)),
            summary: non_empty(join_nonempty(self.summary.as_slice(), META_SEPARATOR)),
            bullets: self
                .bullets
                .iter()
                .map(|b| b.trim())
                .filter(|b| !b.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Records that know their projection
pub trait Project: SectionItem {
    fn projection(&self) -> Projection<'_>;
}

/// Join the non-blank parts with `separator`
pub fn join_nonempty<S: AsRef<str>>(parts: &[S], separator: &str) -> String {
    let mut out = String::new();
    for part in parts.iter().map(|p| p.as_ref().trim()).filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push_str(separator);
        }
        out.push_str(part);
    }
    out
}

fn parts<'a, const N: usize>(items: [Cow<'a, str>; N]) -> Parts<'a> {
    items.into_iter().collect()
}

fn p(text: &str) -> Cow<'_, str> {
    Cow::Borrowed(text)
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// "start – end", or whichever side is present
fn range<'a>(start: &'a str, end: &'a str) -> Cow<'a, str> {
    Cow::Owned(join_nonempty(&[start, end], RANGE_SEPARATOR))
}

/// "label value", or nothing when the value is blank
fn labeled<'a>(label: &str, value: &'a str) -> Cow<'a, str> {
    let value = value.trim();
    if value.is_empty() {
        Cow::Borrowed("")
    } else {
        Cow::Owned(format!("{label}{value}"))
    }
}

impl Project for ExperienceItem {
    fn projection(&self) -> Projection<'_> {
        Projection {
            role: parts([p(&self.role), p(&self.company)]),
            meta: parts([p(&self.location), range(&self.start, &self.end)]),
            summary: SmallVec::new(),
            bullets: &self.bullets,
        }
    }
}

impl Project for EducationItem {
    fn projection(&self) -> Projection<'_> {
        Projection {
            role: parts([p(&self.degree), p(&self.school)]),
            meta: parts([p(&self.location), p(&self.year)]),
            summary: SmallVec::new(),
            bullets: &self.details,
        }
    }
}

impl Project for ProjectItem {
    fn projection(&self) -> Projection<'_> {
        Projection {
            role: parts([p(&self.name), p(&self.link)]),
            meta: SmallVec::new(),
            summary: parts([p(&self.summary)]),
            bullets: &self.bullets,
        }
    }
}

impl Project for CredentialItem {
    fn projection(&self) -> Projection<'_> {
        Projection {
            role: parts([p(&self.name), p(&self.issuer)]),
            meta: parts([range(&self.issued, &self.expires), p(&self.location)]),
            summary: parts([labeled("ID: ", &self.cred_id), p(&self.cred_url)]),
            bullets: &self.bullets,
        }
    }
}

impl Project for AwardItem {
    fn projection(&self) -> Projection<'_> {
        Projection {
            role: parts([p(&self.title), p(&self.issuer)]),
            meta: parts([
                p(&self.date),
                p(&self.scope),
                p(&self.location),
            ]),
            summary: parts([p(&self.summary)]),
            bullets: &self.bullets,
        }
    }
}

impl Project for ResearchItem {
    fn projection(&self) -> Projection<'_> {
        Projection {
            role: parts([p(&self.title), p(&self.venue)]),
            meta: parts([
                p(&self.pub_date),
                p(&self.url),
                p(&self.authors),
            ]),
            summary: parts([p(&self.summary)]),
            bullets: &self.bullets,
        }
    }
}

impl Project for OtherItem {
    fn projection(&self) -> Projection<'_> {
        Projection {
            role: parts([p(&self.heading), p(&self.subheading)]),
            meta: parts([p(&self.meta), p(&self.link)]),
            summary: SmallVec::new(),
            bullets: &self.bullets,
        }
    }
}

impl Project for ReferenceItem {
    fn projection(&self) -> Projection<'_> {
        Projection {
            role: parts([p(&self.name), p(&self.role)]),
            meta: parts([
                p(&self.company),
                p(&self.rel),
                p(&self.email),
                p(&self.phone),
                p(&self.url),
            ]),
            summary: parts([p(&self.note)]),
            bullets: &self.bullets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_projection() {
        let item = ExperienceItem {
            role: "Engineer".into(),
            company: "Acme".into(),
            location: "Oslo".into(),
            start: "2020".into(),
            end: "Present".into(),
            bullets: vec!["Shipped".into(), "  ".into(), String::new()],
        };
        let block = item.projection().into_block();
        assert_eq!(block.role, "Engineer — Acme");
        assert_eq!(block.meta.as_deref(), Some("Oslo • 2020 – Present"));
        assert_eq!(block.summary, None);
        assert_eq!(block.bullets, vec!["Shipped".to_string()]);
    }

    #[test]
    fn test_partial_meta() {
        let item = ExperienceItem {
            role: "Intern".into(),
            end: "2019".into(),
            ..Default::default()
        };
        let block = item.projection().into_block();
        assert_eq!(block.role, "Intern");
        assert_eq!(block.meta.as_deref(), Some("2019"));
    }

    #[test]
    fn test_credential_projection() {
        let item = CredentialItem {
            name: "CKA".into(),
            issuer: "CNCF".into(),
            issued: "Jun 2024".into(),
            location: "Remote".into(),
            cred_id: "ABC-1".into(),
            cred_url: "https://verify".into(),
            ..Default::default()
        };
        let block = item.projection().into_block();
        assert_eq!(block.role, "CKA — CNCF");
        assert_eq!(block.meta.as_deref(), Some("Jun 2024 • Remote"));
        assert_eq!(block.summary.as_deref(), Some("ID: ABC-1 • https://verify"));
    }

    #[test]
    fn test_reference_projection() {
        let item = ReferenceItem {
            name: "Linus".into(),
            role: "Maintainer".into(),
            email: "l@k.org".into(),
            note: "Available upon request".into(),
            ..Default::default()
        };
        let block = item.projection().into_block();
        assert_eq!(block.meta.as_deref(), Some("l@k.org"));
        assert_eq!(block.summary.as_deref(), Some("Available upon request"));
    }

    #[test]
    fn test_empty_record_projects_blank_role() {
        let block = OtherItem::default().projection().into_block();
        assert_eq!(block.role, "");
        assert!(block.meta.is_none());
        assert!(block.bullets.is_empty());
    }

    #[test]
    fn test_join_nonempty() {
        assert_eq!(join_nonempty(&["a", " ", "b"], " • "), "a • b");
        assert_eq!(join_nonempty::<&str>(&[], " • "), "");
    }
}

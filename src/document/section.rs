//! Section kinds and their fixed ordering

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used for the renameable section when the user leaves it blank
pub const DEFAULT_OTHERS_TITLE: &str = "Others";

/// The kind of a repeatable section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Experience,
    Education,
    Projects,
    Licenses,
    Certifications,
    Awards,
    Research,
    Others,
    References,
}

impl SectionKind {
    /// Every section kind in flow order
    pub const ALL: [SectionKind; 9] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Projects,
        SectionKind::Licenses,
        SectionKind::Certifications,
        SectionKind::Awards,
        SectionKind::Research,
        SectionKind::Others,
        SectionKind::References,
    ];

    /// Get the fixed printed title for this kind
    ///
    /// `Others` carries a user-supplied title; this returns its fallback.
    pub fn default_title(&self) -> &'static str {
        match self {
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Projects => "Projects",
            SectionKind::Licenses => "Licenses",
            SectionKind::Certifications => "Certifications",
            SectionKind::Awards => "Awards",
            SectionKind::Research => "Published Research",
            SectionKind::Others => DEFAULT_OTHERS_TITLE,
            SectionKind::References => "References",
        }
    }

    /// Get the key this section is stored under in the document snapshot
    pub fn key(&self) -> &'static str {
        match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Projects => "projects",
            SectionKind::Licenses => "licenses",
            SectionKind::Certifications => "certifications",
            SectionKind::Awards => "awards",
            SectionKind::Research => "research",
            SectionKind::Others => "others",
            SectionKind::References => "references",
        }
    }

    /// Position of this kind in flow order
    pub fn ordinal(&self) -> usize {
        SectionKind::ALL
            .iter()
            .position(|kind| kind == self)
            .unwrap_or(SectionKind::ALL.len())
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_title())
    }
}

/// Direction for reordering an item within its section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Up,
    Down,
}

//! Pages and the fragments placed on them

use crate::content::{HeaderBlock, ItemBlock, SectionBlock};
use crate::document::SectionKind;
use crate::layout::MeasurementOracle;
use serde::Serialize;

/// An open section container on a page
///
/// The shell that starts a section carries the anchor (title plus first
/// item). A shell opened on a later page because the section spilled repeats
/// the title and is marked `continued`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionShell {
    pub kind: SectionKind,
    pub title: String,
    pub items: Vec<ItemBlock>,
    pub continued: bool,
}

impl SectionShell {
    /// Open a section: its title plus the first item, if any
    pub fn anchor(section: &SectionBlock) -> Self {
        Self {
            kind: section.kind,
            title: section.title.clone(),
            items: section.items.first().cloned().into_iter().collect(),
            continued: false,
        }
    }

    /// Continue a section on a new page under a repeated title
    pub fn continued(section: &SectionBlock, item: ItemBlock) -> Self {
        Self {
            kind: section.kind,
            title: section.title.clone(),
            items: vec![item],
            continued: true,
        }
    }
}

/// A placed piece of a render block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Fragment {
    Header(HeaderBlock),
    Section(SectionShell),
}

impl Fragment {
    /// Get the section shell, if this fragment is one
    pub fn as_section(&self) -> Option<&SectionShell> {
        match self {
            Fragment::Section(shell) => Some(shell),
            Fragment::Header(_) => None,
        }
    }
}

/// A fixed-size page and the fragments placed on it, in order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Page index (0-based)
    pub index: usize,
    pub fragments: Vec<Fragment>,
    /// A unit was placed here without a fit check and may overflow
    pub forced: bool,
    /// A forced page that the oracle found over capacity once the pass ended
    pub overflows: bool,
}

impl Page {
    /// Create a new empty page
    pub fn new(index: usize) -> Self {
        Self {
            index,
            fragments: Vec::new(),
            forced: false,
            overflows: false,
        }
    }

    /// Check if nothing has been placed yet
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Get the open section shell: the last fragment, when it is a section
    pub fn open_shell_mut(&mut self) -> Option<&mut SectionShell> {
        match self.fragments.last_mut() {
            Some(Fragment::Section(shell)) => Some(shell),
            _ => None,
        }
    }

    /// Section shells on this page, in order
    pub fn sections(&self) -> impl Iterator<Item = &SectionShell> + '_ {
        self.fragments.iter().filter_map(Fragment::as_section)
    }

    /// Check if this page carries the header
    pub fn has_header(&self) -> bool {
        self.fragments
            .iter()
            .any(|f| matches!(f, Fragment::Header(_)))
    }

    /// Count the section items placed on this page
    pub fn item_count(&self) -> usize {
        self.sections().map(|s| s.items.len()).sum()
    }
}

/// Engine output: every page, in order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Pagination {
    pages: Vec<Page>,
}

impl Pagination {
    pub(crate) fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// A single empty page, the state before the first pass
    pub fn blank() -> Self {
        Self::new(vec![Page::new(0)])
    }

    /// Get pages
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Get page count
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Human-readable page count
    pub fn label(&self) -> String {
        crate::render::describe(self.page_count())
    }

    /// Check if any unit was placed without a fit check
    pub fn has_forced_placements(&self) -> bool {
        self.pages.iter().any(|p| p.forced)
    }

    /// Count the pages flagged as over capacity by the pass
    pub fn overflow_count(&self) -> usize {
        self.pages.iter().filter(|p| p.overflows).count()
    }

    /// Ask the oracle which finished pages exceed their capacity
    ///
    /// Diagnostics only; placement never depends on this.
    pub fn overflowing_pages<O>(&self, oracle: &mut O) -> Vec<usize>
    where
        O: MeasurementOracle + ?Sized,
    {
        self.pages
            .iter()
            .filter(|page| !oracle.fits(page))
            .map(|page| page.index)
            .collect()
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

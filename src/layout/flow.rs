//! Greedy single-pass flow of render blocks into pages
//!
//! Every placement is checked once against the oracle. A unit that does not
//! fit moves to a fresh page and is placed there without a second check, so
//! the pass always terminates and never reorders content. Oversized units are
//! accepted as overflowing rather than failing.

use crate::content::{HeaderBlock, ItemBlock, RenderBlock, SectionBlock};
use crate::document::SectionKind;
use crate::layout::pagination::{Fragment, Page, Pagination, SectionShell};
use crate::layout::MeasurementOracle;
use log::debug;
use std::fmt;
use std::mem;

/// What is being placed, for logging
#[derive(Debug, Clone, Copy)]
enum Unit {
    Header,
    /// Section title plus its first item
    Anchor(SectionKind),
    /// Section title with no items
    Title(SectionKind),
    /// A later item of a section
    Item(SectionKind, usize),
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Header => f.write_str("header"),
            Unit::Anchor(kind) => write!(f, "{} anchor", kind.key()),
            Unit::Title(kind) => write!(f, "{} title", kind.key()),
            Unit::Item(kind, index) => write!(f, "{} item {}", kind.key(), index),
        }
    }
}

/// Flow render blocks into pages
///
/// Never fails. For a fixed input and a deterministic oracle the result is
/// reproducible.
pub fn paginate<O>(blocks: &[RenderBlock], oracle: &mut O) -> Pagination
where
    O: MeasurementOracle + ?Sized,
{
    oracle.begin_pass();
    let mut flow = Flow::new(oracle);
    for block in blocks {
        match block {
            RenderBlock::Header(header) => flow.place_header(header),
            RenderBlock::Section(section) => flow.place_section(section),
        }
    }
    flow.finish(blocks.len())
}

struct Flow<'o, O: ?Sized> {
    oracle: &'o mut O,
    closed: Vec<Page>,
    /// Always the last page; only it receives content
    current: Page,
    checks: usize,
}

impl<'o, O> Flow<'o, O>
where
    O: MeasurementOracle + ?Sized,
{
    fn new(oracle: &'o mut O) -> Self {
        Self {
            oracle,
            closed: Vec::new(),
            current: Page::new(0),
            checks: 0,
        }
    }

    fn fits(&mut self) -> bool {
        self.checks += 1;
        self.oracle.fits(&self.current)
    }

    fn open_page(&mut self) {
        let index = self.closed.len() + 1;
        let done = mem::replace(&mut self.current, Page::new(index));
        self.closed.push(done);
    }

    fn place_header(&mut self, header: &HeaderBlock) {
        self.place(Fragment::Header(header.clone()), Unit::Header);
    }

    fn place_section(&mut self, section: &SectionBlock) {
        let unit = if section.items.is_empty() {
            Unit::Title(section.kind)
        } else {
            Unit::Anchor(section.kind)
        };
        self.place(Fragment::Section(SectionShell::anchor(section)), unit);

        for (index, item) in section.items.iter().enumerate().skip(1) {
            self.append_item(section, index, item);
        }
    }

    /// Place a top-level unit, moving it to a fresh page on overflow
    fn place(&mut self, fragment: Fragment, unit: Unit) {
        self.current.fragments.push(fragment);
        if self.fits() {
            return;
        }

        if self.current.fragments.len() == 1 {
            // Page was empty: a new one would hold the same content
            debug!(
                "{} exceeds an empty page {}, placed as is",
                unit, self.current.index
            );
            self.current.forced = true;
            return;
        }

        if let Some(fragment) = self.current.fragments.pop() {
            self.open_page();
            debug!(
                "{} overflowed, forced onto new page {}",
                unit, self.current.index
            );
            self.current.fragments.push(fragment);
            self.current.forced = true;
        }
    }

    /// Append an item to the open shell, continuing the section on a fresh
    /// page under a repeated title when it overflows
    fn append_item(&mut self, section: &SectionBlock, index: usize, item: &ItemBlock) {
        let unit = Unit::Item(section.kind, index);
        match self.current.open_shell_mut() {
            Some(shell) => shell.items.push(item.clone()),
            None => {
                let shell = SectionShell::continued(section, item.clone());
                self.place(Fragment::Section(shell), unit);
                return;
            }
        }
        if self.fits() {
            return;
        }

        if let Some(shell) = self.current.open_shell_mut() {
            shell.items.pop();
        }
        self.open_page();
        debug!(
            "{} overflowed, section continues on page {}",
            unit, self.current.index
        );
        let shell = SectionShell::continued(section, item.clone());
        self.current.fragments.push(Fragment::Section(shell));
        self.current.forced = true;
    }

    fn finish(mut self, blocks: usize) -> Pagination {
        self.closed.push(self.current);
        // pages are final now; placement no longer depends on the answer
        for page in self.closed.iter_mut().filter(|page| page.forced) {
            self.checks += 1;
            page.overflows = !self.oracle.fits(page);
        }
        debug!(
            "paginated {} blocks into {} pages ({} fit checks)",
            blocks,
            self.closed.len(),
            self.checks
        );
        Pagination::new(self.closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> RenderBlock {
        RenderBlock::Header(HeaderBlock {
            name: "Ada".to_string(),
            title: String::new(),
            contact: Vec::new(),
            summary: None,
            skills: Vec::new(),
        })
    }

    fn section(kind: SectionKind, count: usize) -> RenderBlock {
        RenderBlock::Section(SectionBlock {
            kind,
            title: kind.default_title().to_string(),
            items: (0..count)
                .map(|i| ItemBlock {
                    role: format!("item {i}"),
                    meta: None,
                    summary: None,
                    bullets: Vec::new(),
                })
                .collect(),
        })
    }

    /// Each fragment costs one unit, each item one more
    fn budget(limit: usize) -> impl FnMut(&Page) -> bool {
        move |page: &Page| page.fragments.len() + page.item_count() <= limit
    }

    #[test]
    fn test_header_only() {
        let pagination = paginate(&[header()], &mut budget(10));
        assert_eq!(pagination.page_count(), 1);
        assert!(pagination.pages()[0].has_header());
        assert!(!pagination.has_forced_placements());
    }

    #[test]
    fn test_items_spill_under_repeated_title() {
        // header(1) + shell(1) + 3 items = 5
        let blocks = [header(), section(SectionKind::Experience, 5)];
        let pagination = paginate(&blocks, &mut budget(5));
        let pages = pagination.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].item_count(), 3);

        let continued: Vec<_> = pages[1].sections().collect();
        assert_eq!(continued.len(), 1);
        assert!(continued[0].continued);
        assert_eq!(continued[0].title, "Experience");
        assert_eq!(continued[0].items[0].role, "item 3");
        assert_eq!(continued[0].items[1].role, "item 4");
    }

    #[test]
    fn test_anchor_moves_whole() {
        // anchor needs 2 units, only 1 left after header + full section
        let blocks = [
            header(),
            section(SectionKind::Experience, 1),
            section(SectionKind::Education, 1),
        ];
        let pagination = paginate(&blocks, &mut budget(4));
        let pages = pagination.pages();
        assert_eq!(pages.len(), 2);
        let first: Vec<_> = pages[1].sections().collect();
        assert_eq!(first[0].kind, SectionKind::Education);
        assert_eq!(first[0].items.len(), 1);
        assert!(!first[0].continued);
    }

    #[test]
    fn test_oversized_unit_is_forced_once() {
        let blocks = [header(), section(SectionKind::Projects, 1)];
        let mut checks = 0;
        let mut oracle = |page: &Page| {
            checks += 1;
            page.item_count() == 0
        };
        let pagination = paginate(&blocks, &mut oracle);
        assert_eq!(pagination.page_count(), 2);
        assert!(pagination.pages()[1].forced);
        assert!(pagination.pages()[1].overflows);
        // two placements plus one recheck of the forced page
        assert_eq!(checks, 3);
    }

    #[test]
    fn test_oversized_header_stays_on_first_page() {
        let pagination = paginate(&[header()], &mut |_: &Page| false);
        assert_eq!(pagination.page_count(), 1);
        assert!(pagination.pages()[0].has_header());
        assert!(pagination.pages()[0].forced);
        assert!(pagination.pages()[0].overflows);
    }

    #[test]
    fn test_spilled_page_is_forced_but_fits() {
        let blocks = [header(), section(SectionKind::Experience, 5)];
        let pagination = paginate(&blocks, &mut budget(5));
        let pages = pagination.pages();
        assert!(pages[1].forced);
        assert!(!pages[1].overflows);
        assert_eq!(pagination.overflow_count(), 0);
    }

    #[test]
    fn test_unit_names() {
        assert_eq!(Unit::Header.to_string(), "header");
        assert_eq!(Unit::Anchor(SectionKind::Projects).to_string(), "projects anchor");
        assert_eq!(Unit::Title(SectionKind::Awards).to_string(), "awards title");
        assert_eq!(
            Unit::Item(SectionKind::Experience, 3).to_string(),
            "experience item 3"
        );
    }

    #[test]
    fn test_title_only_section() {
        let blocks = [header(), section(SectionKind::Awards, 0)];
        let pagination = paginate(&blocks, &mut budget(10));
        let shells: Vec<_> = pagination.pages()[0].sections().collect();
        assert_eq!(shells.len(), 1);
        assert!(shells[0].items.is_empty());
    }

    #[test]
    fn test_page_indices() {
        let blocks = [header(), section(SectionKind::Experience, 12)];
        let pagination = paginate(&blocks, &mut budget(4));
        for (i, page) in pagination.pages().iter().enumerate() {
            assert_eq!(page.index, i);
            assert!(!page.is_empty());
        }
    }
}

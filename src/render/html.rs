//! Page markup for preview and print

use crate::content::{HeaderBlock, ItemBlock};
use crate::layout::{Fragment, LayoutConstraints, Page, Pagination, SectionShell};
use std::borrow::Cow;

/// Escape text for HTML content and attribute values
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Markup for one page
pub fn page_html(page: &Page, constraints: &LayoutConstraints) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        r#"<div class="page" data-page="{}" style="width:{}px;height:{}px">"#,
        page.index + 1,
        constraints.page_width,
        constraints.page_height
    ));
    out.push_str(&format!(
        r#"<div class="page-inner" style="padding:{}px {}px {}px {}px">"#,
        constraints.margin_top,
        constraints.margin_right,
        constraints.margin_bottom,
        constraints.margin_left
    ));
    for fragment in &page.fragments {
        match fragment {
            Fragment::Header(header) => write_header(&mut out, header),
            Fragment::Section(shell) => write_section(&mut out, shell),
        }
    }
    out.push_str("</div></div>");
    out
}

/// Markup for every page, in order
pub fn pages_html(pagination: &Pagination, constraints: &LayoutConstraints) -> String {
    pagination
        .pages()
        .iter()
        .map(|page| page_html(page, constraints))
        .collect()
}

fn element(out: &mut String, tag: &str, class: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push_str(" class=\"");
    out.push_str(class);
    out.push_str("\">");
    out.push_str(&escape_html(text));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_header(out: &mut String, header: &HeaderBlock) {
    out.push_str(r#"<header class="r-header">"#);
    element(out, "div", "r-name", &header.name);
    element(out, "div", "r-title", &header.title);
    if !header.contact.is_empty() {
        element(out, "div", "r-contact", &header.contact_line());
    }
    if let Some(summary) = &header.summary {
        element(out, "p", "r-summary", summary);
    }
    if !header.skills.is_empty() {
        element(out, "div", "r-skills", &header.skills_line());
    }
    out.push_str("</header>");
}

fn write_section(out: &mut String, shell: &SectionShell) {
    out.push_str(&format!(
        r#"<section class="r-section" data-section="{}"{}>"#,
        shell.kind.key(),
        if shell.continued {
            r#" data-continued="true""#
        } else {
            ""
        }
    ));
    element(out, "h2", "r-section-title", &shell.title);
    for item in &shell.items {
        write_item(out, item);
    }
    out.push_str("</section>");
}

fn write_item(out: &mut String, item: &ItemBlock) {
    out.push_str(r#"<div class="r-item">"#);
    element(out, "div", "r-role", &item.role);
    if let Some(meta) = &item.meta {
        element(out, "div", "r-meta", meta);
    }
    if let Some(summary) = &item.summary {
        element(out, "div", "r-summary", summary);
    }
    if !item.bullets.is_empty() {
        out.push_str(r#"<ul class="r-bullets">"#);
        for bullet in &item.bullets {
            out.push_str("<li>");
            out.push_str(&escape_html(bullet));
            out.push_str("</li>");
        }
        out.push_str("</ul>");
    }
    out.push_str("</div>");
}

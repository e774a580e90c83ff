//! Page counter label

/// Describe a page count for the status line
pub fn describe(page_count: usize) -> String {
    if page_count == 1 {
        "1 page".to_string()
    } else {
        format!("{page_count} pages")
    }
}

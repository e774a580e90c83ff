//! Render output: page markup, preview snapshot and status label

mod html;
mod preview;
mod status;

pub use html::{escape_html, page_html, pages_html};
pub use preview::{PreviewPage, PreviewSnapshot, PreviewState};
pub use status::describe;

//! Error types for resume-pager.

use crate::document::{ItemField, SectionKind};
use thiserror::Error;

/// Result type alias for resume-pager operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the document and command boundaries.
///
/// The flow engine never fails; oversize content is placed anyway.
#[derive(Error, Debug)]
pub enum Error {
    /// The payload is not valid JSON or does not match the document shape.
    #[error("Invalid JSON file: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload parsed but is not a JSON object.
    #[error("Invalid JSON file: expected a document object")]
    NotAnObject,

    /// A command referenced an item that does not exist.
    #[error("{section} has no item at index {index}")]
    ItemOutOfRange { section: SectionKind, index: usize },

    /// A command referenced a bullet that does not exist.
    #[error("{section} item {index} has no bullet at index {bullet}")]
    BulletOutOfRange {
        section: SectionKind,
        index: usize,
        bullet: usize,
    },

    /// The field does not belong to items of this section.
    #[error("{section} items have no `{field}` field")]
    UnknownField {
        section: SectionKind,
        field: ItemField,
    },

    /// Writing to the key/value store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Check if this error came from parsing an imported payload
    pub fn is_malformed_import(&self) -> bool {
        matches!(self, Error::Json(_) | Error::NotAnObject)
    }
}

//! Editing model: typed commands applied to the document

mod operation;

pub use operation::{split_skills, Affected, ContactField, EditOp, EditResult};

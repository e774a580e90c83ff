//! Flow layout: render blocks into fixed-size pages

mod engine;
mod flow;
pub mod font;
mod line_break;
mod oracle;
mod pagination;
mod scale;

pub use engine::{LayoutConstraints, LayoutState};
pub use flow::paginate;
pub use font::{FontMetrics, StyleSheet, TextStyle};
pub use line_break::{LineBreaker, TextLine};
pub use oracle::{MeasurementOracle, MetricOracle};
pub use pagination::{Fragment, Page, Pagination, SectionShell};
pub use scale::{compute_scale, compute_scale_with, stack_gap, COMPACT_STACK_GAP, STACK_GAP};

//! Compact room reports.
//!
//! Full snapshots run to tens of thousands of lines; these generators
//! reduce one to a few screens: a 5-layer Markdown index for orientation
//! and a short build summary for quality review.

mod index;
mod shorten;
mod summary;

pub use index::generate_index;
pub use shorten::{shorten_effect, shorten_prefab, shorten_trigger};
pub use summary::build_summary;

//! Item documents and prefab builders.
//!
//! An item splits into two halves the way the platform stores them: the
//! spatial/visual shell ([`Item`]) and the behavioral payload
//! ([`ExtraData`]), which rides inside the item as a JSON-encoded string
//! in the embedded snapshot format.

pub mod builders;
mod extra;
mod item;

pub use extra::ExtraData;
pub use item::{ImageInteractivityDetails, Item};

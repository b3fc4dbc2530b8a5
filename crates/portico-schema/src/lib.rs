//! Prefab schema system for Portico.
//!
//! Maps a `prefabName` to the structural schema of its extra-data payload
//! and content string, and validates instances against it.

mod catalog;
mod field;
mod prefab;
mod registry;
mod validation;

pub use catalog::known_addressable_effects;
pub use field::{FieldSchema, FieldType};
pub use prefab::{ContentIssue, ContentRule, PrefabSchema};
pub use registry::SchemaRegistry;
pub use validation::{check_content, validate_extra_data};

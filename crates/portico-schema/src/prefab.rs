//! Prefab schema definitions

use crate::field::FieldSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The invariant a prefab imposes on its item's `contentString`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum ContentRule {
    /// No constraint (empty or any string)
    Any,
    /// Must be empty
    Empty,
    /// Must be a non-empty URL
    Url,
    /// Must be a non-empty GLB URL carrying the `?dynamic=true` flag
    GlbUrlDynamic,
    /// Must be `FurnitureAddressables/{EffectName}`
    AddressablePath,
    /// Must be a destination room id
    RoomId,
    /// Must be one of a fixed set of element names
    Element { values: Vec<String> },
}

/// Problems found while checking a content string against its rule.
///
/// `UnknownEffect` is advisory: the platform ships new addressable
/// effects faster than the catalog is updated.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentIssue {
    Missing { expected: &'static str },
    MissingPrefix { prefix: &'static str },
    MissingQueryFlag { flag: &'static str },
    UnknownEffect { name: String },
    NotInSet { value: String, allowed: Vec<String> },
    NotEmpty { value: String },
}

/// Structural schema for one prefab type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefabSchema {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, FieldSchema>,
    pub content: ContentRule,
}

impl PrefabSchema {
    pub fn new(name: impl Into<String>, content: ContentRule) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: HashMap::new(),
            content,
        }
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(|s| s.as_str()).collect()
    }

    /// Names of all extra-data keys the prefab requires
    pub fn required_fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .fields
            .iter()
            .filter(|(_, f)| f.required)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort();
        names
    }
}

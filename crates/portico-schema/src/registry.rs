//! Schema registry for loading and managing prefab schemas

use crate::catalog::builtin_prefabs;
use crate::field::{FieldSchema, FieldType};
use crate::prefab::{ContentRule, PrefabSchema};
use portico_core::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Registry mapping `prefabName` to its structural schema
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    prefabs: HashMap<String, PrefabSchema>,
}

impl SchemaRegistry {
    /// Create an empty registry (no builtins)
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the platform's fixed prefab catalog
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for schema in builtin_prefabs() {
            registry.register(schema);
        }
        registry
    }

    /// Builtins plus project-local schemas from a directory.
    /// Local definitions override builtin entries of the same name.
    pub fn builtin_with_overrides<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut registry = Self::builtin();
        registry.load_directory(path)?;
        Ok(registry)
    }

    /// Load schemas from a directory into this registry (additive/override).
    ///
    /// Expects `path/prefabs/*.toml`. A missing directory is not an error;
    /// most projects run on the builtin catalog alone.
    pub fn load_directory<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let prefabs_path = path.as_ref().join("prefabs");
        if !prefabs_path.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(&prefabs_path)? {
            let entry = entry?;
            let file_path = entry.path();
            if file_path.extension().map(|e| e == "toml").unwrap_or(false) {
                self.load_file(&file_path)?;
            }
        }

        Ok(())
    }

    /// Load prefab schemas from a TOML file
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let content = fs::read_to_string(path)?;
        self.load_str(&content)
    }

    /// Load prefab schemas from a TOML string
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let file: PrefabSchemaFile = toml::from_str(content)?;

        for (name, def) in file.prefab {
            let schema = def.into_prefab_schema(name.clone());
            self.prefabs.insert(name, schema);
        }

        Ok(())
    }

    /// Register a prefab schema directly
    pub fn register(&mut self, schema: PrefabSchema) {
        self.prefabs.insert(schema.name.clone(), schema);
    }

    /// Get a prefab schema by name
    pub fn get(&self, name: &str) -> Option<&PrefabSchema> {
        self.prefabs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.prefabs.contains_key(name)
    }

    /// All registered prefab names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.prefabs.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }
}

/// TOML file format for prefab schemas
#[derive(Debug, Deserialize)]
struct PrefabSchemaFile {
    prefab: HashMap<String, PrefabSchemaDefinition>,
}

#[derive(Debug, Deserialize)]
struct PrefabSchemaDefinition {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content: Option<ContentRuleDefinition>,
    #[serde(default)]
    fields: HashMap<String, FieldSchemaDefinition>,
}

/// Content rule as it appears in TOML: a keyword string, or a table with
/// `rule`/`values` for element sets.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentRuleDefinition {
    Keyword(String),
    Detailed { rule: String, values: Vec<String> },
}

impl ContentRuleDefinition {
    fn into_content_rule(self) -> ContentRule {
        match self {
            ContentRuleDefinition::Keyword(kw) => match kw.as_str() {
                "empty" => ContentRule::Empty,
                "url" => ContentRule::Url,
                "glb-url-dynamic" => ContentRule::GlbUrlDynamic,
                "addressable" => ContentRule::AddressablePath,
                "room-id" => ContentRule::RoomId,
                _ => ContentRule::Any,
            },
            ContentRuleDefinition::Detailed { rule, values } => match rule.as_str() {
                "element" => ContentRule::Element { values },
                _ => ContentRule::Any,
            },
        }
    }
}

/// Field definition as it appears in TOML files
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FieldSchemaDefinition {
    Simple(String),
    Detailed(DetailedFieldSchema),
}

#[derive(Debug, Clone, Deserialize)]
struct DetailedFieldSchema {
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    values: Option<Vec<String>>,
    #[serde(default)]
    default: Option<toml::Value>,
    #[serde(default)]
    required: Option<bool>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    element: Option<String>,
}

impl PrefabSchemaDefinition {
    fn into_prefab_schema(self, name: String) -> PrefabSchema {
        let mut schema = PrefabSchema::new(
            name,
            self.content
                .map(|c| c.into_content_rule())
                .unwrap_or(ContentRule::Any),
        );
        schema.description = self.description;
        for (field_name, def) in self.fields {
            schema.fields.insert(field_name, def.into_field_schema());
        }
        schema
    }
}

impl FieldSchemaDefinition {
    fn into_field_schema(self) -> FieldSchema {
        match self {
            FieldSchemaDefinition::Simple(type_str) => {
                FieldSchema::new(parse_field_type(&type_str, None, None))
            }
            FieldSchemaDefinition::Detailed(d) => FieldSchema {
                field_type: parse_field_type(&d.field_type, d.values.as_ref(), d.element.as_deref()),
                default: d.default.map(toml_to_json),
                required: d.required.unwrap_or(false),
                description: d.description,
                min: d.min,
                max: d.max,
            },
        }
    }
}

fn parse_field_type(
    type_str: &str,
    enum_values: Option<&Vec<String>>,
    array_element: Option<&str>,
) -> FieldType {
    match type_str {
        "bool" => FieldType::Bool,
        "int" => FieldType::Int,
        "float" => FieldType::Float,
        "string" => FieldType::String,
        "color" => FieldType::Color,
        "url" => FieldType::Url,
        "object" => FieldType::Object,
        "enum" => FieldType::Enum {
            values: enum_values.cloned().unwrap_or_default(),
        },
        "array" => {
            let element_type = array_element
                .map(|e| parse_field_type(e, None, None))
                .unwrap_or(FieldType::String);
            FieldType::Array {
                element: Box::new(element_type),
            }
        }
        _ => FieldType::String, // Default fallback
    }
}

fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::Value::from(i),
        toml::Value::Float(f) => serde_json::Value::from(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(d) => serde_json::Value::String(d.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = SchemaRegistry::builtin();
        assert!(registry.contains("ResizableCube"));
        assert!(registry.contains("Addressable"));
        assert!(!registry.contains("NotAPrefab"));
        assert_eq!(registry.len(), 24);
    }

    #[test]
    fn test_load_prefab_string() {
        let toml = r#"
[prefab.SlidingDoor]
description = "A custom door prefab"
content = "url"

[prefab.SlidingDoor.fields]
locked = { type = "bool", default = false }
style = { type = "enum", values = ["hinged", "sliding"], required = true }
speed = { type = "float", min = 0.0, max = 10.0 }
tags = { type = "array", element = "string" }
"#;

        let mut registry = SchemaRegistry::new();
        registry.load_str(toml).unwrap();

        let door = registry.get("SlidingDoor").unwrap();
        assert_eq!(door.name, "SlidingDoor");
        assert_eq!(door.content, ContentRule::Url);
        assert!(door.fields.contains_key("locked"));
        assert_eq!(door.required_fields(), vec!["style"]);

        let speed = door.get_field("speed").unwrap();
        assert_eq!(speed.min, Some(0.0));
        assert_eq!(speed.max, Some(10.0));
    }

    #[test]
    fn test_override_builtin() {
        let toml = r#"
[prefab.JumpPad]
content = "any"

[prefab.JumpPad.fields]
p = { type = "float", min = 0.0, max = 20.0, required = true }
"#;

        let mut registry = SchemaRegistry::builtin();
        registry.load_str(toml).unwrap();

        let pad = registry.get("JumpPad").unwrap();
        assert_eq!(pad.required_fields(), vec!["p"]);
        assert_eq!(pad.get_field("p").unwrap().max, Some(20.0));
    }

    #[test]
    fn test_element_content_rule() {
        let toml = r#"
[prefab.Lava]
content = { rule = "element", values = ["lava", "water"] }
"#;

        let mut registry = SchemaRegistry::new();
        registry.load_str(toml).unwrap();

        match &registry.get("Lava").unwrap().content {
            ContentRule::Element { values } => assert_eq!(values.len(), 2),
            other => panic!("unexpected rule {other:?}"),
        }
    }
}

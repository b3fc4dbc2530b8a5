//! Prefab schema introspection command

use anyhow::Result;
use portico_schema::{ContentRule, FieldType, SchemaRegistry};

pub fn run(name: Option<&str>, schemas_path: &str) -> Result<()> {
    let registry = SchemaRegistry::builtin_with_overrides(schemas_path)?;

    let Some(name) = name else {
        println!("Known prefabs:");
        for prefab in registry.names() {
            println!("  - {prefab}");
        }
        return Ok(());
    };

    let Some(schema) = registry.get(name) else {
        println!("Prefab '{name}' not found.");
        println!();
        println!("Known prefabs:");
        for prefab in registry.names() {
            println!("  - {prefab}");
        }
        return Ok(());
    };

    println!("Prefab: {}", schema.name);
    if let Some(desc) = &schema.description {
        println!("Description: {desc}");
    }
    println!("Content string: {}", format_content_rule(&schema.content));
    println!();
    println!("Extra-data fields:");

    let mut fields: Vec<_> = schema.fields.iter().collect();
    fields.sort_by_key(|(name, _)| *name);

    if fields.is_empty() {
        println!("  (none declared)");
    }

    for (field_name, field) in fields {
        let required = if field.required { " (required)" } else { "" };
        print!("  {field_name} : {}{required}", format_field_type(&field.field_type));

        if let Some(default) = &field.default {
            print!(" = {default}");
        }
        println!();

        if let Some(desc) = &field.description {
            println!("    # {desc}");
        }
        if field.min.is_some() || field.max.is_some() {
            let min = field.min.map(|v| v.to_string()).unwrap_or_default();
            let max = field.max.map(|v| v.to_string()).unwrap_or_default();
            println!("    # Range: {min} .. {max}");
        }
    }

    Ok(())
}

fn format_content_rule(rule: &ContentRule) -> String {
    match rule {
        ContentRule::Any => "any".to_string(),
        ContentRule::Empty => "must be empty".to_string(),
        ContentRule::Url => "URL".to_string(),
        ContentRule::GlbUrlDynamic => "GLB URL with ?dynamic=true".to_string(),
        ContentRule::AddressablePath => "FurnitureAddressables/{EffectName}".to_string(),
        ContentRule::RoomId => "destination room id".to_string(),
        ContentRule::Element { values } => format!("one of [{}]", values.join(", ")),
    }
}

fn format_field_type(ft: &FieldType) -> String {
    match ft {
        FieldType::Bool => "bool".to_string(),
        FieldType::Int => "int".to_string(),
        FieldType::Float => "float".to_string(),
        FieldType::String => "string".to_string(),
        FieldType::Color => "color".to_string(),
        FieldType::Url => "url".to_string(),
        FieldType::Object => "object".to_string(),
        FieldType::Enum { values } => format!("enum[{}]", values.join(", ")),
        FieldType::Array { element } => format!("array<{}>", format_field_type(element)),
    }
}

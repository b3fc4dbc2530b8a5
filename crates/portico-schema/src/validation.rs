//! Validation of extra-data payloads against prefab schemas

use crate::catalog::KNOWN_ADDRESSABLE_EFFECTS;
use crate::field::FieldType;
use crate::prefab::{ContentIssue, ContentRule, PrefabSchema};
use portico_core::{Color, PorticoError};
use serde_json::{Map, Value};

/// Keys every prefab's extra data may carry regardless of schema.
/// `Tasks`/`ViewNodes` hold the interaction wiring validated separately.
const COMMON_KEYS: &[&str] = &["Tasks", "ViewNodes"];

/// Validate a parsed extra-data object against its prefab schema.
///
/// Collects every problem rather than stopping at the first one. Unknown
/// keys are allowed, since editor versions add fields faster than the catalog.
pub fn validate_extra_data(schema: &PrefabSchema, data: &Map<String, Value>) -> Vec<PorticoError> {
    let mut errors = Vec::new();

    // Required keys present
    for name in schema.required_fields() {
        if !data.contains_key(name) {
            errors.push(PorticoError::MissingRequiredField(name.to_string()));
        }
    }

    // Each provided key that the schema declares
    for (key, value) in data {
        if COMMON_KEYS.contains(&key.as_str()) {
            continue;
        }
        if let Some(field) = schema.get_field(key) {
            validate_field_value(key, &field.field_type, value, field.min, field.max, &mut errors);
        }
    }

    errors
}

fn validate_field_value(
    field_name: &str,
    field_type: &FieldType,
    value: &Value,
    min: Option<f64>,
    max: Option<f64>,
    errors: &mut Vec<PorticoError>,
) {
    match (field_type, value) {
        (FieldType::Bool, Value::Bool(_)) => {}
        (FieldType::Int, Value::Number(n)) if n.is_i64() || n.is_u64() => {
            if let Some(v) = n.as_f64() {
                check_range(field_name, v, min, max, errors);
            }
        }
        (FieldType::Float, Value::Number(n)) => {
            // Integers are accepted where floats are expected
            if let Some(v) = n.as_f64() {
                check_range(field_name, v, min, max, errors);
            }
        }
        (FieldType::String, Value::String(_)) => {}
        (FieldType::Color, Value::String(s)) => {
            if !Color::is_valid_hex(s) {
                errors.push(PorticoError::InvalidColor(format!(
                    "{field_name}: \"{s}\" must be 6-char hex (e.g. \"FF0000\")"
                )));
            }
        }
        (FieldType::Url, Value::String(_)) => {}
        (FieldType::Enum { values }, Value::String(s)) => {
            if !values.contains(s) {
                errors.push(PorticoError::InvalidEnumValue {
                    value: s.clone(),
                    allowed: values.clone(),
                });
            }
        }
        (FieldType::Array { element }, Value::Array(arr)) => {
            for (i, item) in arr.iter().enumerate() {
                validate_field_value(&format!("{field_name}[{i}]"), element, item, None, None, errors);
            }
        }
        (FieldType::Object, Value::Object(_)) => {}
        _ => {
            errors.push(PorticoError::InvalidFieldType {
                expected: format!("{field_name}: {}", field_type.type_name()),
                got: value_type_name(value).to_string(),
            });
        }
    }
}

fn check_range(
    field_name: &str,
    value: f64,
    min: Option<f64>,
    max: Option<f64>,
    errors: &mut Vec<PorticoError>,
) {
    let below = min.map(|m| value < m).unwrap_or(false);
    let above = max.map(|m| value > m).unwrap_or(false);
    if below || above {
        errors.push(PorticoError::ValueOutOfRange {
            field: field_name.to_string(),
            min: min.unwrap_or(f64::MIN),
            max: max.unwrap_or(f64::MAX),
            value,
        });
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check an item's content string against its prefab's content rule.
pub fn check_content(schema: &PrefabSchema, content: &str) -> Vec<ContentIssue> {
    let mut issues = Vec::new();

    match &schema.content {
        ContentRule::Any => {}
        ContentRule::Empty => {
            if !content.is_empty() {
                issues.push(ContentIssue::NotEmpty {
                    value: content.to_string(),
                });
            }
        }
        ContentRule::Url => {
            if content.is_empty() {
                issues.push(ContentIssue::Missing { expected: "a URL" });
            }
        }
        ContentRule::GlbUrlDynamic => {
            if content.is_empty() {
                issues.push(ContentIssue::Missing {
                    expected: "a GLB URL",
                });
            } else if !content.contains("?dynamic=true") {
                issues.push(ContentIssue::MissingQueryFlag {
                    flag: "?dynamic=true",
                });
            }
        }
        ContentRule::AddressablePath => {
            const PREFIX: &str = "FurnitureAddressables/";
            if content.is_empty() {
                issues.push(ContentIssue::Missing {
                    expected: "FurnitureAddressables/{EffectName}",
                });
            } else if let Some(effect) = content.strip_prefix(PREFIX) {
                if !KNOWN_ADDRESSABLE_EFFECTS.contains(&effect) {
                    issues.push(ContentIssue::UnknownEffect {
                        name: effect.to_string(),
                    });
                }
            } else {
                issues.push(ContentIssue::MissingPrefix { prefix: PREFIX });
            }
        }
        ContentRule::RoomId => {
            if content.is_empty() {
                issues.push(ContentIssue::Missing {
                    expected: "a destination room id",
                });
            }
        }
        ContentRule::Element { values } => {
            if !values.iter().any(|v| v == content) {
                issues.push(ContentIssue::NotInSet {
                    value: content.to_string(),
                    allowed: values.clone(),
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SchemaRegistry;
    use serde_json::json;

    fn builtin(name: &str) -> PrefabSchema {
        SchemaRegistry::builtin().get(name).unwrap().clone()
    }

    fn as_map(v: Value) -> Map<String, Value> {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn test_valid_cube_data() {
        let schema = builtin("ResizableCube");
        let data = as_map(json!({
            "col": "FF0000",
            "e": 1.5,
            "o": 0.8,
            "c": false,
            "Tasks": [],
            "ViewNodes": []
        }));

        assert!(validate_extra_data(&schema, &data).is_empty());
    }

    #[test]
    fn test_missing_required_field() {
        let schema = builtin("WorldText");
        let data = as_map(json!({ "lookAtCamera": true }));

        let errors = validate_extra_data(&schema, &data);
        assert!(errors
            .iter()
            .any(|e| matches!(e, PorticoError::MissingRequiredField(f) if f == "text")));
    }

    #[test]
    fn test_invalid_color() {
        let schema = builtin("ResizableCube");
        let data = as_map(json!({ "col": "red" }));

        let errors = validate_extra_data(&schema, &data);
        assert!(errors.iter().any(|e| matches!(e, PorticoError::InvalidColor(_))));
    }

    #[test]
    fn test_opacity_out_of_range() {
        let schema = builtin("ResizableCube");
        let data = as_map(json!({ "o": 1.5 }));

        let errors = validate_extra_data(&schema, &data);
        assert!(errors
            .iter()
            .any(|e| matches!(e, PorticoError::ValueOutOfRange { .. })));
    }

    #[test]
    fn test_int_accepted_for_float() {
        let schema = builtin("JumpPad");
        let data = as_map(json!({ "p": 7 }));
        assert!(validate_extra_data(&schema, &data).is_empty());
    }

    #[test]
    fn test_wrong_type() {
        let schema = builtin("Trigger");
        let data = as_map(json!({ "keyCode": 88 }));

        let errors = validate_extra_data(&schema, &data);
        assert!(errors
            .iter()
            .any(|e| matches!(e, PorticoError::InvalidFieldType { .. })));
    }

    #[test]
    fn test_npc_animation_enum() {
        let schema = builtin("GLBNPC");
        let data = as_map(json!({ "n": "Guide", "a": "Breakdance" }));

        let errors = validate_extra_data(&schema, &data);
        assert!(errors
            .iter()
            .any(|e| matches!(e, PorticoError::InvalidEnumValue { .. })));
    }

    #[test]
    fn test_unknown_keys_allowed() {
        let schema = builtin("ResizableCube");
        let data = as_map(json!({ "futureKey": {"nested": 1} }));
        assert!(validate_extra_data(&schema, &data).is_empty());
    }

    #[test]
    fn test_addressable_content() {
        let schema = builtin("Addressable");

        assert!(check_content(&schema, "FurnitureAddressables/Fire2").is_empty());

        let issues = check_content(&schema, "Fire2");
        assert!(matches!(issues[0], ContentIssue::MissingPrefix { .. }));

        // Unknown effects are flagged but survivable
        let issues = check_content(&schema, "FurnitureAddressables/BrandNewEffect");
        assert!(matches!(issues[0], ContentIssue::UnknownEffect { .. }));

        let issues = check_content(&schema, "");
        assert!(matches!(issues[0], ContentIssue::Missing { .. }));
    }

    #[test]
    fn test_collectable_content() {
        let schema = builtin("GlbCollectable");

        assert!(check_content(&schema, "https://cdn.example.com/coin.glb?dynamic=true").is_empty());

        let issues = check_content(&schema, "https://cdn.example.com/coin.glb");
        assert!(matches!(issues[0], ContentIssue::MissingQueryFlag { .. }));
    }

    #[test]
    fn test_elemental_content() {
        let schema = builtin("9Cube");

        assert!(check_content(&schema, "lava").is_empty());
        let issues = check_content(&schema, "plasma");
        assert!(matches!(issues[0], ContentIssue::NotInSet { .. }));
    }
}

//! Built-in prefab catalog.
//!
//! The platform supports a fixed set of prefab types; their extra-data
//! schemas and content-string rules are declared here. Project-local TOML
//! schemas loaded over the builtins may extend or override entries.

use crate::field::{FieldSchema, FieldType};
use crate::prefab::{ContentRule, PrefabSchema};
use serde_json::json;

/// Known addressable VFX names (the `FurnitureAddressables/` suffix set).
/// Not exhaustive; the platform adds effects over time, so an unknown
/// name downgrades to a warning during validation.
pub const KNOWN_ADDRESSABLE_EFFECTS: &[&str] = &[
    // Particles
    "DustParticles",
    "ParticlesExplosion1",
    "ParticlesExplosion2",
    "ParticlesExplosion3",
    "ParticlesExplosion4",
    "ParticlesExplosion5",
    // Fire
    "Fire",
    "Fire1",
    "Fire2",
    "Fire3",
    "FireBall1",
    // Explosion
    "ExplosionBomb1",
    "ExplosionBomb2",
    "ExplosionBomb3",
    "ExplosionBomb4",
    "ExplosionBomb5",
    "ExplosionBomb6",
    "ExplosionBomb7",
    "ExplosionRing1",
    "ExplosionRings2",
    "ExplosionRings3",
    "MagneticExplosion",
    "NuclearExplosion",
    "ShockExplosion",
    "SmokeExplosion1",
    "SmokeExplosion2",
    "WavesExplosion",
    // Lightning
    "LightningBall1",
    "LightningExplosion1",
    "LightningExplosion2",
    "LightningExplosion3",
    "LightningParticlesTree",
    "LightningShock1",
    "LightningStrike1",
    "LightningWave3",
    "LightningWaves2",
    // Energy
    "AtomBall1",
    "AtomBall2",
    // Other
    "LineWaves1",
    "Portal",
];

pub fn known_addressable_effects() -> &'static [&'static str] {
    KNOWN_ADDRESSABLE_EFFECTS
}

/// NPC idle animation names ("" = default idle)
const NPC_ANIMATIONS: &[&str] = &[
    "",
    "Sitting",
    "Can Can",
    "Wave",
    "Salute",
    "Jive",
    "Salsa",
    "Shuffling",
    "Chicken",
    "Slide n Jive",
    "Robot",
];

fn field(ft: FieldType) -> FieldSchema {
    FieldSchema::new(ft)
}

fn enum_field(values: &[&str]) -> FieldSchema {
    FieldSchema::new(FieldType::Enum {
        values: values.iter().map(|s| s.to_string()).collect(),
    })
}

fn object_array() -> FieldSchema {
    FieldSchema::new(FieldType::Array {
        element: Box::new(FieldType::Object),
    })
}

fn prefab(
    name: &str,
    description: &str,
    content: ContentRule,
    fields: Vec<(&str, FieldSchema)>,
) -> PrefabSchema {
    let mut schema = PrefabSchema::new(name, content);
    schema.description = Some(description.to_string());
    for (key, f) in fields {
        schema.fields.insert(key.to_string(), f);
    }
    schema
}

/// Build the full built-in catalog, one schema per supported prefab.
pub fn builtin_prefabs() -> Vec<PrefabSchema> {
    vec![
        // ── Building ────────────────────────────────────────────────
        prefab(
            "ResizableCube",
            "Primary building block",
            ContentRule::Any,
            vec![
                ("col", field(FieldType::Color).default_value(json!("888888"))),
                ("e", field(FieldType::Float).range(Some(0.0), None)),
                ("o", field(FieldType::Float).range(Some(0.0), Some(1.0))),
                ("c", field(FieldType::Bool).default_value(json!(true))),
                ("s", field(FieldType::Bool).default_value(json!(true))),
                ("nav", field(FieldType::Bool).default_value(json!(false))),
                ("title", field(FieldType::String)),
            ],
        ),
        prefab(
            "WorldText",
            "3D text label with rich formatting",
            ContentRule::Any,
            vec![
                ("text", field(FieldType::String).required()),
                ("lookAtCamera", field(FieldType::Bool).default_value(json!(true))),
            ],
        ),
        prefab(
            "Portal",
            "Teleportation between rooms or spawn points",
            ContentRule::RoomId,
            vec![
                ("id", field(FieldType::String).required()),
                ("sn", field(FieldType::String)),
                ("cm", field(FieldType::String).default_value(json!("teleport"))),
                ("auto", field(FieldType::Bool)),
            ],
        ),
        prefab(
            "SpawnPoint",
            "Where players appear; empty name is the default spawn",
            ContentRule::Any,
            vec![
                ("n", field(FieldType::String).default_value(json!(""))),
                ("r", field(FieldType::Float).default_value(json!(0.0))),
            ],
        ),
        // ── Models ──────────────────────────────────────────────────
        prefab(
            "GLB",
            "Custom 3D model",
            ContentRule::Url,
            vec![
                ("s", field(FieldType::Bool).default_value(json!(true))),
                ("c", field(FieldType::Bool).default_value(json!(true))),
            ],
        ),
        prefab(
            "GlbCollectable",
            "Pickupable model that modifies a room variable",
            ContentRule::GlbUrlDynamic,
            vec![
                ("valueLabel", field(FieldType::String).required()),
                ("valueChange", field(FieldType::Int).required()),
                ("displayValue", field(FieldType::Bool).default_value(json!(true))),
                ("se", field(FieldType::Url)),
                ("minRespawnTime", field(FieldType::Float).range(Some(0.0), None)),
                ("maxRespawnTime", field(FieldType::Float).range(Some(0.0), None)),
            ],
        ),
        prefab(
            "Destructible",
            "Model that can be destroyed by weapons",
            ContentRule::Url,
            vec![
                ("maxHealth", field(FieldType::Int).required().range(Some(1.0), None)),
                ("respawnTime", field(FieldType::Float).required().range(Some(0.0), None)),
                ("destructionEffect", field(FieldType::Object)),
                ("particleOrigin", field(FieldType::Object)),
                ("healthBarPos", field(FieldType::Object)),
                ("multiplayer", field(FieldType::Bool)),
            ],
        ),
        prefab(
            "GLBNPC",
            "Interactive character with dialogue and AI",
            ContentRule::Url,
            vec![
                ("n", field(FieldType::String).required()),
                ("a", enum_field(NPC_ANIMATIONS)),
                ("p", field(FieldType::String)),
                ("bq", field(FieldType::Bool)),
                ("swn", field(FieldType::Bool)),
                ("events", object_array()),
                (
                    "tags",
                    field(FieldType::Array {
                        element: Box::new(FieldType::String),
                    }),
                ),
            ],
        ),
        // ── Gameplay ────────────────────────────────────────────────
        prefab(
            "Trigger",
            "Invisible zone for interactions",
            ContentRule::Any,
            vec![
                ("events", object_array()),
                ("cm", field(FieldType::String)),
                ("keyCode", field(FieldType::String).required()),
                ("pressBtn", field(FieldType::Bool)),
            ],
        ),
        prefab(
            "JumpPad",
            "Launches players into the air",
            ContentRule::Any,
            vec![(
                "p",
                field(FieldType::Float).default_value(json!(6.9)).range(Some(0.0), None),
            )],
        ),
        prefab("Gun", "Pickupable weapon", ContentRule::Any, gun_fields()),
        prefab("Shotgun", "Pickupable shotgun", ContentRule::Any, gun_fields()),
        prefab(
            "9Cube",
            "Animated elemental block",
            ContentRule::Element {
                values: vec!["lava".into(), "hotlava".into(), "water".into()],
            },
            vec![
                ("GLBUrl", field(FieldType::Url)),
                ("c", field(FieldType::String)),
                ("nc", field(FieldType::Bool)),
            ],
        ),
        // ── Lighting ────────────────────────────────────────────────
        prefab(
            "Light",
            "Static point light",
            ContentRule::Any,
            vec![
                ("c", field(FieldType::Color).default_value(json!("FFFFFF"))),
                ("b", field(FieldType::Float).default_value(json!(2.0)).range(Some(0.0), None)),
                ("r", field(FieldType::Float).default_value(json!(10.0)).range(Some(0.0), None)),
                ("no", field(FieldType::Bool)),
            ],
        ),
        prefab(
            "SpotLight",
            "Directional cone light",
            ContentRule::Any,
            vec![
                ("c", field(FieldType::Color).default_value(json!("FFFFFF"))),
                ("b", field(FieldType::Float).default_value(json!(2.0)).range(Some(0.0), None)),
                ("r", field(FieldType::Float).default_value(json!(5.0)).range(Some(0.0), None)),
                ("ang", field(FieldType::Float).default_value(json!(80.0)).range(Some(0.0), Some(180.0))),
            ],
        ),
        prefab(
            "BlinkLight",
            "Animated flashing light",
            ContentRule::Any,
            vec![
                ("c", field(FieldType::Color).default_value(json!("FFB200"))),
                ("b", field(FieldType::Float).default_value(json!(2.5)).range(Some(0.0), None)),
                ("r", field(FieldType::Float).default_value(json!(7.0)).range(Some(0.0), None)),
                ("bd", field(FieldType::Float).default_value(json!(1.0)).range(Some(0.0), None)),
                ("bi", field(FieldType::Float).default_value(json!(2.0)).range(Some(0.0), None)),
            ],
        ),
        // ── Media & display ─────────────────────────────────────────
        prefab(
            "DefaultPainting",
            "2D image in 3D space",
            ContentRule::Url,
            vec![
                ("t", field(FieldType::Bool)),
                ("b", field(FieldType::Bool)),
                ("e", field(FieldType::Float).range(Some(0.0), None)),
            ],
        ),
        prefab(
            "DefaultVideo",
            "MP4 video surface",
            ContentRule::Url,
            vec![
                ("b", field(FieldType::Bool)),
                ("e", field(FieldType::Float).range(Some(0.0), None)),
            ],
        ),
        prefab("PlaceableTV", "Streaming screen", ContentRule::Any, vec![]),
        prefab(
            "Leaderboard",
            "Displays player rankings",
            ContentRule::Any,
            vec![
                ("gn", field(FieldType::String)),
                ("ln", field(FieldType::String).default_value(json!("Score"))),
                ("ci", field(FieldType::String)),
                ("tb", field(FieldType::Bool)),
            ],
        ),
        prefab("Chart", "Data chart display", ContentRule::Any, vec![]),
        prefab("GLBSign", "Model-backed sign", ContentRule::Any, vec![]),
        // ── Camera & misc ───────────────────────────────────────────
        prefab("CameraObject", "Camera anchor", ContentRule::Any, vec![]),
        // ── Visual effects ──────────────────────────────────────────
        prefab(
            "Addressable",
            "Built-in particle/visual effect",
            ContentRule::AddressablePath,
            vec![],
        ),
    ]
}

fn gun_fields() -> Vec<(&'static str, FieldSchema)> {
    vec![
        ("weaponType", field(FieldType::Int).range(Some(1.0), Some(3.0))),
        ("maxDamage", field(FieldType::Int).range(Some(0.0), None)),
        ("minDamage", field(FieldType::Int).range(Some(0.0), None)),
        ("firerate", field(FieldType::Float).range(Some(0.0), None)),
        ("clipSize", field(FieldType::Int).range(Some(0.0), None)),
        ("startLoaded", field(FieldType::Bool).default_value(json!(true))),
        ("autoReload", field(FieldType::Bool).default_value(json!(true))),
        ("gunColor", field(FieldType::Color).default_value(json!("000000"))),
        ("isInfinityAmmo", field(FieldType::Bool)),
        ("automaticWeapon", field(FieldType::Bool)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_all_prefabs() {
        let prefabs = builtin_prefabs();
        assert_eq!(prefabs.len(), 24);

        let names: Vec<&str> = prefabs.iter().map(|p| p.name.as_str()).collect();
        for expected in [
            "ResizableCube",
            "WorldText",
            "Portal",
            "SpawnPoint",
            "GLB",
            "GlbCollectable",
            "Destructible",
            "GLBNPC",
            "Trigger",
            "JumpPad",
            "Gun",
            "Shotgun",
            "9Cube",
            "Light",
            "BlinkLight",
            "SpotLight",
            "DefaultPainting",
            "DefaultVideo",
            "PlaceableTV",
            "Leaderboard",
            "Chart",
            "GLBSign",
            "CameraObject",
        ] {
            assert!(names.contains(&expected), "missing prefab {expected}");
        }
        assert!(names.contains(&"Addressable"));
    }

    #[test]
    fn test_required_keys() {
        let prefabs = builtin_prefabs();
        let by_name = |n: &str| prefabs.iter().find(|p| p.name == n).unwrap();

        assert_eq!(by_name("Trigger").required_fields(), vec!["keyCode"]);
        assert_eq!(by_name("WorldText").required_fields(), vec!["text"]);
        assert_eq!(
            by_name("GlbCollectable").required_fields(),
            vec!["valueChange", "valueLabel"]
        );
        assert_eq!(by_name("GLBNPC").required_fields(), vec!["n"]);
        assert_eq!(
            by_name("Destructible").required_fields(),
            vec!["maxHealth", "respawnTime"]
        );
        assert_eq!(by_name("Portal").required_fields(), vec!["id"]);
    }

    #[test]
    fn test_addressable_effect_set() {
        assert!(KNOWN_ADDRESSABLE_EFFECTS.contains(&"Fire2"));
        assert!(KNOWN_ADDRESSABLE_EFFECTS.contains(&"DustParticles"));
        assert!(!KNOWN_ADDRESSABLE_EFFECTS.contains(&"NotAnEffect"));
    }
}

//! Typed builders for every supported prefab.
//!
//! Each builder produces an `(Item, ExtraData)` pair: the spatial shell
//! and the behavioral payload. Keys that match the engine default are
//! left out of the payload, the way the editor writes items.
//!
//! ```
//! use portico_core::Vec3;
//! use portico_item::builders::Cube;
//!
//! let (item, extra) = Cube::new(Vec3::new(0.0, 0.5, 0.0))
//!     .color("FF0000")
//!     .emission(1.0)
//!     .build();
//! assert_eq!(item.prefab_name, "ResizableCube");
//! assert_eq!(extra.get("col").unwrap(), "FF0000");
//! ```

use crate::extra::ExtraData;
use crate::item::Item;
use portico_core::{Quat, Vec3};
use serde_json::json;

/// The rigged block model behind elemental cubes.
const ELEMENTAL_RIG_URL: &str =
    "https://dwh7ute75zx34.cloudfront.net/Models/08_09/9SliceBlock_Rig_Empty.glb";

/// ResizableCube, the primary building block.
///
/// Ground is y=0; a unit cube resting on the ground has its center at
/// y=0.5.
pub struct Cube {
    pos: Vec3,
    scale: Vec3,
    color: String,
    emission: f32,
    opacity: f32,
    texture: String,
    collider: bool,
    shadows: bool,
    nav_mesh: bool,
    title: String,
}

impl Cube {
    pub fn new(pos: Vec3) -> Self {
        Self {
            pos,
            scale: Vec3::ONE,
            color: "888888".to_string(),
            emission: 0.0,
            opacity: 1.0,
            texture: String::new(),
            collider: true,
            shadows: true,
            nav_mesh: false,
            title: String::new(),
        }
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// 6-char hex, no `#` prefix.
    pub fn color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn emission(mut self, emission: f32) -> Self {
        self.emission = emission;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Texture image URL; empty keeps the solid color.
    pub fn texture(mut self, url: &str) -> Self {
        self.texture = url.to_string();
        self
    }

    /// false lets players pass through.
    pub fn collider(mut self, collider: bool) -> Self {
        self.collider = collider;
        self
    }

    /// false disables shadow casting (cheaper to render).
    pub fn shadows(mut self, shadows: bool) -> Self {
        self.shadows = shadows;
        self
    }

    /// true marks the surface walkable for NPC navigation.
    pub fn nav_mesh(mut self, nav_mesh: bool) -> Self {
        self.nav_mesh = nav_mesh;
        self
    }

    /// Internal label, not visible in-world.
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::with_wiring();
        extra.insert("col", json!(self.color));
        if self.emission > 0.0 {
            extra.insert("e", json!(self.emission));
        }
        if self.opacity < 1.0 {
            extra.insert("o", json!(self.opacity));
        }
        if !self.collider {
            extra.insert("c", json!(false));
        }
        if !self.shadows {
            extra.insert("s", json!(false));
        }
        if self.nav_mesh {
            extra.insert("nav", json!(true));
        }
        if !self.title.is_empty() {
            extra.insert("title", json!(self.title));
        }

        let item = Item::base("ResizableCube", self.pos, Quat::IDENTITY, self.scale)
            .with_content(self.texture);
        (item, extra)
    }
}

/// WorldText: 3D text label. Supports `<b>`, `<i>`, `<color=#hex>` tags.
pub struct Text {
    pos: Vec3,
    content: String,
    billboard: bool,
    scale: Vec3,
}

impl Text {
    pub fn new(pos: Vec3, content: &str) -> Self {
        Self {
            pos,
            content: content.to_string(),
            billboard: true,
            scale: Vec3::ONE,
        }
    }

    /// false fixes the rotation instead of facing the camera.
    pub fn billboard(mut self, billboard: bool) -> Self {
        self.billboard = billboard;
        self
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::with_wiring();
        extra.insert("text", json!(self.content));
        extra.insert("lookAtCamera", json!(self.billboard));

        (Item::base("WorldText", self.pos, Quat::IDENTITY, self.scale), extra)
    }
}

/// SpawnPoint. Empty name is the default spawn; named spawns are
/// referenced by Portal `sn`. Scale is always 0.3.
pub struct Spawn {
    pos: Vec3,
    name: String,
    rotation_offset: f32,
}

impl Spawn {
    pub fn new(pos: Vec3) -> Self {
        Self {
            pos,
            name: String::new(),
            rotation_offset: 0.0,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Player facing offset in degrees; 0 faces +Z.
    pub fn rotation_offset(mut self, degrees: f32) -> Self {
        self.rotation_offset = degrees;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::new();
        extra.insert("Tasks", json!([]));
        extra.insert("n", json!(self.name));
        extra.insert("r", json!(self.rotation_offset));

        (
            Item::base("SpawnPoint", self.pos, Quat::IDENTITY, Vec3::splat(0.3)),
            extra,
        )
    }
}

/// Portal to another room (or spawn point in the same room).
pub struct Portal {
    pos: Vec3,
    scale: Vec3,
    destination_room_id: String,
    spawn_name: String,
    auto_teleport: bool,
}

impl Portal {
    pub fn new(pos: Vec3, scale: Vec3, destination_room_id: &str) -> Self {
        Self {
            pos,
            scale,
            destination_room_id: destination_room_id.to_string(),
            spawn_name: String::new(),
            auto_teleport: true,
        }
    }

    pub fn spawn_name(mut self, name: &str) -> Self {
        self.spawn_name = name.to_string();
        self
    }

    /// false requires a key press instead of teleporting on contact.
    pub fn auto_teleport(mut self, auto: bool) -> Self {
        self.auto_teleport = auto;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::with_wiring();
        extra.insert("id", json!(self.destination_room_id.clone()));
        extra.insert("sn", json!(self.spawn_name));
        extra.insert("cm", json!("teleport"));
        if self.auto_teleport {
            extra.insert("auto", json!(true));
        }

        let item = Item::base("Portal", self.pos, Quat::IDENTITY, self.scale)
            .with_content(self.destination_room_id);
        (item, extra)
    }
}

/// GlbCollectable: pickup that modifies a room variable. The variable
/// must be declared in the room settings' numericParameters.
pub struct Collectible {
    pos: Vec3,
    glb_url: String,
    variable: String,
    value_change: i64,
    sound_url: String,
    display_value: bool,
    respawn_time: Option<(f32, f32)>,
}

impl Collectible {
    pub fn new(pos: Vec3, glb_url: &str, variable: &str) -> Self {
        Self {
            pos,
            glb_url: glb_url.to_string(),
            variable: variable.to_string(),
            value_change: 1,
            sound_url: String::new(),
            display_value: true,
            respawn_time: None,
        }
    }

    /// Amount added on collection; negative subtracts.
    pub fn value_change(mut self, change: i64) -> Self {
        self.value_change = change;
        self
    }

    /// MP3 played on collection.
    pub fn sound(mut self, url: &str) -> Self {
        self.sound_url = url.to_string();
        self
    }

    pub fn display_value(mut self, display: bool) -> Self {
        self.display_value = display;
        self
    }

    /// Random respawn delay range in seconds.
    pub fn respawn(mut self, min_seconds: f32, max_seconds: f32) -> Self {
        self.respawn_time = Some((min_seconds, max_seconds));
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        // The engine only animates collectibles loaded dynamically
        let url = if self.glb_url.contains("?dynamic=true") {
            self.glb_url
        } else {
            format!("{}?dynamic=true", self.glb_url)
        };

        let mut extra = ExtraData::with_wiring();
        extra.insert("valueLabel", json!(self.variable));
        extra.insert("valueChange", json!(self.value_change));
        extra.insert("displayValue", json!(self.display_value));
        if !self.sound_url.is_empty() {
            extra.insert("se", json!(self.sound_url));
        }
        if let Some((min, max)) = self.respawn_time {
            extra.insert("minRespawnTime", json!(min));
            extra.insert("maxRespawnTime", json!(max));
        }

        let item =
            Item::base("GlbCollectable", self.pos, Quat::IDENTITY, Vec3::ONE).with_content(url);
        (item, extra)
    }
}

/// JumpPad. Power reference: 4-5 small hop, 6-7 medium, 8-10 large,
/// 12+ extreme.
pub struct JumpPad {
    pos: Vec3,
    power: f32,
    scale: Vec3,
}

impl JumpPad {
    pub fn new(pos: Vec3) -> Self {
        Self {
            pos,
            power: 6.9,
            scale: Vec3::ONE,
        }
    }

    pub fn power(mut self, power: f32) -> Self {
        self.power = power;
        self
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::new();
        extra.insert("p", json!(self.power));

        (Item::base("JumpPad", self.pos, Quat::IDENTITY, self.scale), extra)
    }
}

/// Trigger: invisible interaction zone. Visible in build mode only.
pub struct Trigger {
    pos: Vec3,
    scale: Vec3,
    press_button: bool,
    key_code: String,
    message: String,
}

impl Trigger {
    pub fn new(pos: Vec3, scale: Vec3) -> Self {
        Self {
            pos,
            scale,
            press_button: false,
            key_code: "X".to_string(),
            message: String::new(),
        }
    }

    /// Require a key press instead of firing on enter.
    pub fn press_button(mut self, press: bool) -> Self {
        self.press_button = press;
        self
    }

    pub fn key_code(mut self, key: &str) -> Self {
        self.key_code = key.to_string();
        self
    }

    /// Shown as "Press [key] to [message]".
    pub fn message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::new();
        extra.insert("events", json!([]));
        extra.insert("cm", json!(self.message));
        extra.insert("keyCode", json!(self.key_code));
        extra.insert("Tasks", json!([]));
        extra.insert("ViewNodes", json!([]));
        if self.press_button {
            extra.insert("pressBtn", json!(true));
        }

        (Item::base("Trigger", self.pos, Quat::IDENTITY, self.scale), extra)
    }
}

/// Static point light.
pub struct Light {
    pos: Vec3,
    color: String,
    brightness: f32,
    range: f32,
    night_only: bool,
}

impl Light {
    pub fn new(pos: Vec3) -> Self {
        Self {
            pos,
            color: "FFFFFF".to_string(),
            brightness: 2.0,
            range: 10.0,
            night_only: false,
        }
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }

    pub fn night_only(mut self, night_only: bool) -> Self {
        self.night_only = night_only;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::with_wiring();
        extra.insert("c", json!(self.color));
        extra.insert("b", json!(self.brightness));
        extra.insert("r", json!(self.range));
        if self.night_only {
            extra.insert("no", json!(true));
        }

        (Item::base("Light", self.pos, Quat::IDENTITY, Vec3::ONE), extra)
    }
}

/// Directional cone light.
pub struct SpotLight {
    pos: Vec3,
    rot: Quat,
    color: String,
    brightness: f32,
    range: f32,
    angle: f32,
}

impl SpotLight {
    pub fn new(pos: Vec3) -> Self {
        Self {
            pos,
            rot: Quat::IDENTITY,
            color: "FFFFFF".to_string(),
            brightness: 2.0,
            range: 5.0,
            angle: 80.0,
        }
    }

    /// Points the cone.
    pub fn rotation(mut self, rot: Quat) -> Self {
        self.rot = rot;
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }

    /// Cone spread in degrees; smaller is a narrower beam.
    pub fn angle(mut self, degrees: f32) -> Self {
        self.angle = degrees;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::with_wiring();
        extra.insert("c", json!(self.color));
        extra.insert("b", json!(self.brightness));
        extra.insert("r", json!(self.range));
        extra.insert("ang", json!(self.angle));

        (Item::base("SpotLight", self.pos, self.rot, Vec3::ONE), extra)
    }
}

/// Flashing light.
pub struct BlinkLight {
    pos: Vec3,
    color: String,
    brightness: f32,
    range: f32,
    blink_duration: f32,
    blink_interval: f32,
}

impl BlinkLight {
    pub fn new(pos: Vec3) -> Self {
        Self {
            pos,
            color: "FFB200".to_string(),
            brightness: 2.5,
            range: 7.0,
            blink_duration: 1.0,
            blink_interval: 2.0,
        }
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }

    /// Seconds the light stays on, and seconds between blinks.
    pub fn blink(mut self, duration: f32, interval: f32) -> Self {
        self.blink_duration = duration;
        self.blink_interval = interval;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::with_wiring();
        extra.insert("c", json!(self.color));
        extra.insert("b", json!(self.brightness));
        extra.insert("r", json!(self.range));
        extra.insert("bd", json!(self.blink_duration));
        extra.insert("bi", json!(self.blink_interval));

        (Item::base("BlinkLight", self.pos, Quat::IDENTITY, Vec3::ONE), extra)
    }
}

/// GLBNPC: interactive character. Setting a personality enables AI chat.
pub struct Npc {
    pos: Vec3,
    rot: Quat,
    glb_url: String,
    name: String,
    personality: String,
    animation: String,
    auto_popup: bool,
}

impl Npc {
    pub fn new(pos: Vec3, glb_url: &str, name: &str) -> Self {
        Self {
            pos,
            rot: Quat::IDENTITY,
            glb_url: glb_url.to_string(),
            name: name.to_string(),
            personality: String::new(),
            animation: String::new(),
            auto_popup: true,
        }
    }

    pub fn rotation(mut self, rot: Quat) -> Self {
        self.rot = rot;
        self
    }

    /// AI personality prompt.
    pub fn personality(mut self, prompt: &str) -> Self {
        self.personality = prompt.to_string();
        self
    }

    /// Idle animation name (e.g. "Sitting", "Wave"); empty for idle.
    pub fn animation(mut self, animation: &str) -> Self {
        self.animation = animation.to_string();
        self
    }

    /// false keeps the dialogue closed until the player clicks.
    pub fn auto_popup(mut self, auto_popup: bool) -> Self {
        self.auto_popup = auto_popup;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::new();
        extra.insert("n", json!(self.name));
        extra.insert("a", json!(self.animation));
        extra.insert("p", json!(self.personality));
        extra.insert("bq", json!(true));
        extra.insert("swn", json!(self.auto_popup));
        extra.insert("events", json!([]));
        extra.insert("tags", json!([]));
        extra.insert("Tasks", json!([]));
        extra.insert("ViewNodes", json!([]));

        let item =
            Item::base("GLBNPC", self.pos, self.rot, Vec3::ONE).with_content(self.glb_url);
        (item, extra)
    }
}

/// Custom 3D model from a public GLB URL.
pub struct Glb {
    pos: Vec3,
    rot: Quat,
    scale: Vec3,
    glb_url: String,
    shadows: bool,
    collider: bool,
}

impl Glb {
    pub fn new(pos: Vec3, glb_url: &str) -> Self {
        Self {
            pos,
            rot: Quat::IDENTITY,
            scale: Vec3::ONE,
            glb_url: glb_url.to_string(),
            shadows: true,
            collider: true,
        }
    }

    pub fn rotation(mut self, rot: Quat) -> Self {
        self.rot = rot;
        self
    }

    /// Proportional multiplier on the model's native size.
    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn shadows(mut self, shadows: bool) -> Self {
        self.shadows = shadows;
        self
    }

    pub fn collider(mut self, collider: bool) -> Self {
        self.collider = collider;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::with_wiring();
        if !self.shadows {
            extra.insert("s", json!(false));
        }
        if !self.collider {
            extra.insert("c", json!(false));
        }

        let item = Item::base("GLB", self.pos, self.rot, self.scale).with_content(self.glb_url);
        (item, extra)
    }
}

/// 2D image panel. Images lie flat by default; stand one upright with
/// `Quat::from_euler(0.0, 90.0, 0.0)`.
pub struct Image {
    pos: Vec3,
    rot: Quat,
    scale: Vec3,
    image_url: String,
    transparent: bool,
    borderless: bool,
    emission: f32,
}

impl Image {
    pub fn new(pos: Vec3, image_url: &str) -> Self {
        Self {
            pos,
            rot: Quat::IDENTITY,
            // (width, height, thickness); keep z thin
            scale: Vec3::new(2.0, 1.5, 0.03),
            image_url: image_url.to_string(),
            transparent: false,
            borderless: false,
            emission: 0.0,
        }
    }

    pub fn rotation(mut self, rot: Quat) -> Self {
        self.rot = rot;
        self
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Respect PNG alpha.
    pub fn transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn borderless(mut self, borderless: bool) -> Self {
        self.borderless = borderless;
        self
    }

    pub fn emission(mut self, emission: f32) -> Self {
        self.emission = emission;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::with_wiring();
        if self.transparent {
            extra.insert("t", json!(true));
        }
        if self.borderless {
            extra.insert("b", json!(true));
        }
        if self.emission > 0.0 {
            extra.insert("e", json!(self.emission));
        }

        let item =
            Item::base("DefaultPainting", self.pos, self.rot, self.scale).with_content(self.image_url);
        (item, extra)
    }
}

/// MP4 video panel. Unlike images, videos display upright by default.
pub struct Video {
    pos: Vec3,
    rot: Quat,
    scale: Vec3,
    video_url: String,
    borderless: bool,
    emission: f32,
}

impl Video {
    pub fn new(pos: Vec3, video_url: &str) -> Self {
        Self {
            pos,
            rot: Quat::IDENTITY,
            scale: Vec3::new(3.0, 1.7, 0.03),
            video_url: video_url.to_string(),
            borderless: false,
            emission: 0.0,
        }
    }

    pub fn rotation(mut self, rot: Quat) -> Self {
        self.rot = rot;
        self
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn borderless(mut self, borderless: bool) -> Self {
        self.borderless = borderless;
        self
    }

    pub fn emission(mut self, emission: f32) -> Self {
        self.emission = emission;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::with_wiring();
        if self.borderless {
            extra.insert("b", json!(true));
        }
        if self.emission > 0.0 {
            extra.insert("e", json!(self.emission));
        }

        let item =
            Item::base("DefaultVideo", self.pos, self.rot, self.scale).with_content(self.video_url);
        (item, extra)
    }
}

/// Pickupable weapon. Type 1 = pistol, 2 = rifle, 3 = shotgun.
pub struct Gun {
    pos: Vec3,
    weapon_type: i64,
    max_damage: i64,
    min_damage: i64,
    firerate: f32,
    clip_size: i64,
    infinite_ammo: bool,
    automatic: bool,
    color: String,
}

impl Gun {
    pub fn new(pos: Vec3) -> Self {
        Self {
            pos,
            weapon_type: 1,
            max_damage: 20,
            min_damage: 10,
            firerate: 0.5,
            clip_size: 12,
            infinite_ammo: false,
            automatic: false,
            color: "000000".to_string(),
        }
    }

    pub fn weapon_type(mut self, weapon_type: i64) -> Self {
        self.weapon_type = weapon_type;
        self
    }

    /// Close-range and long-range damage.
    pub fn damage(mut self, max: i64, min: i64) -> Self {
        self.max_damage = max;
        self.min_damage = min;
        self
    }

    /// Seconds between shots; lower fires faster.
    pub fn firerate(mut self, firerate: f32) -> Self {
        self.firerate = firerate;
        self
    }

    pub fn clip_size(mut self, clip_size: i64) -> Self {
        self.clip_size = clip_size;
        self
    }

    pub fn infinite_ammo(mut self, infinite: bool) -> Self {
        self.infinite_ammo = infinite;
        self
    }

    /// Hold to fire continuously.
    pub fn automatic(mut self, automatic: bool) -> Self {
        self.automatic = automatic;
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::with_wiring();
        extra.insert("weaponType", json!(self.weapon_type));
        extra.insert("maxDamage", json!(self.max_damage));
        extra.insert("minDamage", json!(self.min_damage));
        extra.insert("firerate", json!(self.firerate));
        extra.insert("clipSize", json!(self.clip_size));
        extra.insert("startLoaded", json!(true));
        extra.insert("autoReload", json!(true));
        extra.insert("gunColor", json!(self.color));
        if self.infinite_ammo {
            extra.insert("isInfinityAmmo", json!(true));
        }
        if self.automatic {
            extra.insert("automaticWeapon", json!(true));
        }

        (Item::base("Gun", self.pos, Quat::IDENTITY, Vec3::ONE), extra)
    }
}

/// Destructible model with health and respawn.
pub struct Destructible {
    pos: Vec3,
    scale: Vec3,
    glb_url: String,
    max_health: i64,
    respawn_time: f32,
    multiplayer: bool,
}

impl Destructible {
    pub fn new(pos: Vec3, glb_url: &str) -> Self {
        Self {
            pos,
            scale: Vec3::ONE,
            glb_url: glb_url.to_string(),
            max_health: 100,
            respawn_time: 10.0,
            multiplayer: false,
        }
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn max_health(mut self, health: i64) -> Self {
        self.max_health = health;
        self
    }

    pub fn respawn_time(mut self, seconds: f32) -> Self {
        self.respawn_time = seconds;
        self
    }

    /// Share destruction state across players.
    pub fn multiplayer(mut self, multiplayer: bool) -> Self {
        self.multiplayer = multiplayer;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::with_wiring();
        extra.insert("maxHealth", json!(self.max_health));
        extra.insert("respawnTime", json!(self.respawn_time));
        extra.insert(
            "destructionEffect",
            json!({
                "particleCount": 40,
                "minParticleSize": 0.01,
                "maxParticleSize": 0.4,
                "minParticleSpeed": 1.0,
                "maxParticleSpeed": 6.0,
                "particleLifetime": 5.0,
                "radius": 2.0
            }),
        );
        extra.insert(
            "particleOrigin",
            json!({"rotation": [0, 0, 0, 1], "scale": [1, 1, 1]}),
        );
        extra.insert(
            "healthBarPos",
            json!({"position": [0, 2, 0], "rotation": [0, 0, 0, 1], "scale": [1, 1, 1]}),
        );
        if self.multiplayer {
            extra.insert("multiplayer", json!(true));
        }

        let item = Item::base("Destructible", self.pos, Quat::IDENTITY, self.scale)
            .with_content(self.glb_url);
        (item, extra)
    }
}

/// 9Cube elemental block: "lava", "hotlava" or "water".
pub struct Elemental {
    pos: Vec3,
    scale: Vec3,
    element: String,
    collider: bool,
}

impl Elemental {
    pub fn new(pos: Vec3, element: &str) -> Self {
        Self {
            pos,
            scale: Vec3::ONE,
            element: element.to_string(),
            collider: true,
        }
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn collider(mut self, collider: bool) -> Self {
        self.collider = collider;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::with_wiring();
        extra.insert("GLBUrl", json!(ELEMENTAL_RIG_URL));
        extra.insert("c", json!(""));
        if !self.collider {
            extra.insert("nc", json!(true));
        }

        let item =
            Item::base("9Cube", self.pos, Quat::IDENTITY, self.scale).with_content(self.element);
        (item, extra)
    }
}

/// Addressable VFX: built-in particle effect by name, e.g. "Fire2".
/// The `FurnitureAddressables/` prefix is added here.
pub struct Addressable {
    pos: Vec3,
    rot: Quat,
    scale: Vec3,
    effect_name: String,
}

impl Addressable {
    pub fn new(pos: Vec3, effect_name: &str) -> Self {
        Self {
            pos,
            rot: Quat::IDENTITY,
            scale: Vec3::ONE,
            effect_name: effect_name.to_string(),
        }
    }

    pub fn rotation(mut self, rot: Quat) -> Self {
        self.rot = rot;
        self
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let extra = ExtraData::with_wiring();
        let item = Item::base("Addressable", self.pos, self.rot, self.scale)
            .with_content(format!("FurnitureAddressables/{}", self.effect_name));
        (item, extra)
    }
}

/// Leaderboard display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardStyle {
    Blue,
    Orange,
    Screen,
}

impl LeaderboardStyle {
    fn content_string(self) -> &'static str {
        match self {
            LeaderboardStyle::Blue => {
                "~1slpk_Leaderboard_Black_NeonBlue.glb?alt=media&token=8b518415-b51b-4264-ae7e-d49465260757"
            }
            LeaderboardStyle::Orange => {
                "~5wnot_Leaderboard_Gray_NeonOrange.glb?alt=media&token=5312ebfe-b00b-4f99-ad4b-a72bd518a74a"
            }
            LeaderboardStyle::Screen => {
                "https://firebasestorage.googleapis.com/v0/b/portals-1b487.appspot.com/o/GLBs%2F00L_screenLeaderboard.glb?alt=media&token=b1f9eef5-ee70-4d5e-a9ee-3e8e2ef26e59?screenOnly=true"
            }
        }
    }
}

/// Leaderboard showing player rankings for one game/variable.
pub struct Leaderboard {
    pos: Vec3,
    game_name: String,
    score_label: String,
    time_based: bool,
    style: LeaderboardStyle,
}

impl Leaderboard {
    pub fn new(pos: Vec3, game_name: &str) -> Self {
        Self {
            pos,
            game_name: game_name.to_string(),
            score_label: "Score".to_string(),
            time_based: false,
            style: LeaderboardStyle::Blue,
        }
    }

    /// Label for the score column ("Points", "Time", "Coins", ...).
    pub fn score_label(mut self, label: &str) -> Self {
        self.score_label = label.to_string();
        self
    }

    /// Display times instead of numeric scores.
    pub fn time_based(mut self, time_based: bool) -> Self {
        self.time_based = time_based;
        self
    }

    pub fn style(mut self, style: LeaderboardStyle) -> Self {
        self.style = style;
        self
    }

    pub fn build(self) -> (Item, ExtraData) {
        let mut extra = ExtraData::with_wiring();
        extra.insert("gn", json!(self.game_name));
        extra.insert("ln", json!(self.score_label));
        extra.insert("ci", json!(""));
        if self.time_based {
            extra.insert("tb", json!(true));
        }

        let item = Item::base("Leaderboard", self.pos, Quat::IDENTITY, Vec3::ONE)
            .with_content(self.style.content_string());
        (item, extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_default_payload_is_minimal() {
        let (item, extra) = Cube::new(Vec3::new(0.0, 0.5, 0.0)).build();
        assert_eq!(item.prefab_name, "ResizableCube");
        assert_eq!(extra.get("col").unwrap(), "888888");
        // Engine defaults stay implicit
        assert!(extra.get("e").is_none());
        assert!(extra.get("o").is_none());
        assert!(extra.get("c").is_none());
        assert!(extra.get("s").is_none());
    }

    #[test]
    fn test_cube_conditional_keys() {
        let (_, extra) = Cube::new(Vec3::ZERO)
            .emission(1.0)
            .opacity(0.5)
            .collider(false)
            .shadows(false)
            .nav_mesh(true)
            .title("floor")
            .build();
        assert_eq!(extra.get("e").unwrap(), 1.0);
        assert_eq!(extra.get("o").unwrap(), 0.5);
        assert_eq!(extra.get("c").unwrap(), false);
        assert_eq!(extra.get("s").unwrap(), false);
        assert_eq!(extra.get("nav").unwrap(), true);
        assert_eq!(extra.get("title").unwrap(), "floor");
    }

    #[test]
    fn test_spawn_scale_fixed() {
        let (item, extra) = Spawn::new(Vec3::new(0.0, 0.2, 0.0)).name("arena").build();
        assert_eq!(item.scale, Vec3::splat(0.3));
        assert_eq!(extra.get("n").unwrap(), "arena");
        assert!(extra.get("ViewNodes").is_none());
    }

    #[test]
    fn test_collectible_url_suffix() {
        let (item, _) =
            Collectible::new(Vec3::ZERO, "https://cdn.example.com/coin.glb", "coins").build();
        assert!(item.content_string.ends_with("?dynamic=true"));

        // Already-suffixed URLs are left alone
        let (item, _) = Collectible::new(
            Vec3::ZERO,
            "https://cdn.example.com/coin.glb?dynamic=true",
            "coins",
        )
        .build();
        assert_eq!(item.content_string.matches("?dynamic=true").count(), 1);
    }

    #[test]
    fn test_portal_content_mirrors_destination() {
        let (item, extra) = Portal::new(Vec3::ZERO, Vec3::splat(2.0), "room-uuid-1234")
            .spawn_name("arena")
            .build();
        assert_eq!(item.content_string, "room-uuid-1234");
        assert_eq!(extra.get("id").unwrap(), "room-uuid-1234");
        assert_eq!(extra.get("sn").unwrap(), "arena");
        assert_eq!(extra.get("auto").unwrap(), true);
    }

    #[test]
    fn test_addressable_prefix() {
        let (item, _) = Addressable::new(Vec3::new(0.0, 0.5, 0.0), "Fire2").build();
        assert_eq!(item.content_string, "FurnitureAddressables/Fire2");
    }

    #[test]
    fn test_elemental_content() {
        let (item, extra) = Elemental::new(Vec3::ZERO, "lava").collider(false).build();
        assert_eq!(item.content_string, "lava");
        assert_eq!(extra.get("nc").unwrap(), true);
        assert!(extra.get("GLBUrl").unwrap().as_str().unwrap().ends_with(".glb"));
    }

    #[test]
    fn test_gun_defaults() {
        let (_, extra) = Gun::new(Vec3::ZERO).build();
        assert_eq!(extra.get("weaponType").unwrap(), 1);
        assert_eq!(extra.get("startLoaded").unwrap(), true);
        assert_eq!(extra.get("autoReload").unwrap(), true);
        assert!(extra.get("isInfinityAmmo").is_none());
    }

    #[test]
    fn test_trigger_payload() {
        let (_, extra) = Trigger::new(Vec3::ZERO, Vec3::splat(3.0))
            .press_button(true)
            .key_code("H")
            .message("open the gate")
            .build();
        assert_eq!(extra.get("keyCode").unwrap(), "H");
        assert_eq!(extra.get("cm").unwrap(), "open the gate");
        assert_eq!(extra.get("pressBtn").unwrap(), true);
    }

    #[test]
    fn test_leaderboard_styles() {
        let (blue, _) = Leaderboard::new(Vec3::ZERO, "Coin Rush").build();
        assert!(blue.content_string.contains("NeonBlue"));

        let (screen, extra) = Leaderboard::new(Vec3::ZERO, "Speedrun")
            .style(LeaderboardStyle::Screen)
            .time_based(true)
            .score_label("Time")
            .build();
        assert!(screen.content_string.contains("screenLeaderboard"));
        assert_eq!(extra.get("tb").unwrap(), true);
        assert_eq!(extra.get("ln").unwrap(), "Time");
    }

    #[test]
    fn test_image_and_video_default_scales() {
        let (image, _) = Image::new(Vec3::ZERO, "https://cdn.example.com/poster.png").build();
        assert_eq!(image.scale, Vec3::new(2.0, 1.5, 0.03));

        let (video, _) = Video::new(Vec3::ZERO, "https://cdn.example.com/clip.mp4").build();
        assert_eq!(video.scale, Vec3::new(3.0, 1.7, 0.03));
    }
}

//! Room settings.
//!
//! Settings are two layers deep on the wire: a small top-level object,
//! and a `roomSettingsExtraData` field holding a second JSON document as
//! a string. [`RoomSettings::default`] reproduces the platform defaults
//! for both layers.

use portico_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Known room base scenes
pub const VALID_ROOM_BASES: &[&str] = &["BlankScene", "BlankSceneNight"];

/// Top-level settings keys of the platform schema. A settings object with
/// none of these present is almost certainly in a foreign format.
pub const SETTINGS_EXPECTED_KEYS: &[&str] = &[
    "roomBase",
    "isNight",
    "roomSettingsExtraData",
    "wallIndex",
    "allCanBuild",
    "chatDisabled",
    "globalSpeaking",
    "inTownHallMode",
    "audiusPlaylist",
    "roomPrompt",
    "bannedUsers",
    "tasksRefresh",
    "onlyNftHolders",
    "roomNodeExtraData",
    "shareLiveKitCrossInstances",
    "tokenImage",
    "tokenName",
    "tokenAddress",
];

/// Keys that indicate a hand-rolled game-design format rather than the
/// platform schema
pub const SETTINGS_WRONG_KEYS: &[&str] = &[
    "roomName",
    "description",
    "skybox",
    "fogDensity",
    "fogColor",
    "ambientColor",
    "ambientIntensity",
    "gravity",
];

/// Top-level room settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSettings {
    pub room_base: String,
    pub only_nft_holders: bool,
    pub is_night: bool,
    pub wall_index: i32,
    pub in_town_hall_mode: bool,
    pub global_speaking: bool,
    pub audius_playlist: String,
    pub chat_disabled: bool,
    pub all_can_build: bool,
    pub room_prompt: String,
    /// Second settings layer, JSON-encoded (see [`SettingsExtraData`])
    pub room_settings_extra_data: String,
    pub room_node_extra_data: String,
    pub banned_users: String,
    pub share_live_kit_cross_instances: bool,
    pub token_image: String,
    pub token_name: String,
    pub token_address: String,
    pub tasks_refresh: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            room_base: "BlankScene".to_string(),
            only_nft_holders: false,
            is_night: false,
            wall_index: 0,
            in_town_hall_mode: false,
            global_speaking: false,
            audius_playlist: String::new(),
            chat_disabled: false,
            all_can_build: false,
            room_prompt: String::new(),
            room_settings_extra_data: SettingsExtraData::default().to_json_string(),
            room_node_extra_data: String::new(),
            banned_users: String::new(),
            share_live_kit_cross_instances: false,
            token_image: String::new(),
            token_name: String::new(),
            token_address: String::new(),
            tasks_refresh: true,
            extra: Map::new(),
        }
    }
}

impl RoomSettings {
    /// Decode the inner settings layer
    pub fn parse_extra_data(&self) -> Result<SettingsExtraData> {
        if self.room_settings_extra_data.is_empty() {
            return Ok(SettingsExtraData::default());
        }
        Ok(serde_json::from_str(&self.room_settings_extra_data)?)
    }

    /// Re-encode the inner settings layer
    pub fn set_extra_data(&mut self, extra: &SettingsExtraData) {
        self.room_settings_extra_data = extra.to_json_string();
    }
}

/// A room variable declaration inside `numericParameters`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericParameter {
    /// Variable name
    #[serde(rename = "N")]
    pub name: String,
    /// Value type discriminator
    #[serde(rename = "VT", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NumericParameter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value_type: None,
            extra: Map::new(),
        }
    }
}

/// Player movement tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementValues {
    pub movement_state_name: String,
    pub walk_by_default: bool,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub sprint_speed: f32,
    pub strafing: bool,
    pub jump_timer: f32,
    pub jump_height: f32,
    pub air_speed: f32,
    pub gravity: f32,
    pub rotation_speed: f32,
    pub ledge_grab: bool,
    pub force_first_person: bool,
    pub stop_vertical_input: bool,
    pub stop_jumps: bool,
}

impl Default for MovementValues {
    fn default() -> Self {
        Self {
            movement_state_name: String::new(),
            walk_by_default: false,
            walk_speed: 2.0,
            run_speed: 4.0,
            sprint_speed: 6.8,
            strafing: false,
            jump_timer: 0.3,
            jump_height: 4.0,
            air_speed: 5.0,
            gravity: -10.0,
            rotation_speed: 16.0,
            ledge_grab: false,
            force_first_person: false,
            stop_vertical_input: false,
            stop_jumps: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FogSettings {
    pub day_fog_max: f32,
    pub night_fog_max: f32,
    pub day_fog_color: String,
    pub night_fog_color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostProcessSettings {
    pub bloom_day_intensity: f32,
    pub bloom_night_intensity: f32,
    pub bloom_day_clamp: f32,
    pub bloom_night_clamp: f32,
    pub bloom_day_diffusion: f32,
    pub bloom_night_diffusion: f32,
    pub camera_max_distance_day: f32,
    pub camera_max_distance_night: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LightValues {
    #[serde(rename = "NightShadows")]
    pub night_shadows: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSettings {
    pub acceleration: f32,
    pub drag: f32,
    pub max_speed: f32,
    pub steering: f32,
    pub mass: f32,
    pub gravity: f32,
    pub time_to_max_steer: f32,
}

/// The inner settings document stored JSON-encoded in
/// `roomSettingsExtraData`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsExtraData {
    pub welcome_embed: String,
    pub open_welcome_iframe_in_background: bool,
    pub add_welcome_iframe_to_info_button: bool,
    pub show_welcome_on_entry: bool,
    pub sky_box_day_texture_url: String,
    pub sky_box_night_texture_url: String,
    pub sky_box_day_rotation: f32,
    pub sky_box_night_rotation: f32,
    pub sky_box_day_exposure: f32,
    pub sky_box_night_exposure: f32,
    pub enable_custom_avatars: bool,
    pub default_to_ready_player_me: bool,
    pub player_collisions: bool,
    pub preload_room: bool,
    pub fast_download: bool,
    pub allowed_users: i64,
    pub disable_h_to_spawn: bool,
    pub play_join_sound: bool,
    pub jump_sounds: bool,
    pub show_name_tags: bool,
    pub show_backpack: bool,
    pub show_quest_log: bool,
    pub show_player_count: bool,
    pub show_mic: bool,
    pub show_music: bool,
    pub show_emotes: bool,
    pub show_space_info: bool,
    pub request_mic_popup: bool,
    pub require_username: bool,
    pub released_room: String,
    #[serde(rename = "uncompressedGLB")]
    pub uncompressed_glb: bool,
    pub movement_values: MovementValues,
    /// Declared room variables; referenced by value effects and
    /// collectibles
    pub numeric_parameters: Vec<NumericParameter>,
    pub fog: FogSettings,
    pub postprocess: PostProcessSettings,
    pub light_values: LightValues,
    pub blocky_avatars: bool,
    pub rpm_avatars: bool,
    pub collectible_avatars: bool,
    pub custom_avatars: bool,
    pub roundy_avatars: bool,
    pub guardian_avatars: bool,
    pub psx: bool,
    pub pixelation: f32,
    /// Named movement profiles, referenced by ChangeMovementProfile
    pub movement_states: Vec<Value>,
    pub custom_space_avatars: Vec<Value>,
    /// Named camera states, referenced by ChangeCamState
    pub custom_camera_states: Vec<Value>,
    pub weapon_datas: Vec<Value>,
    pub default_camera_state: i64,
    pub default_weapon: i64,
    pub default_movement_state: i64,
    /// Itself a JSON-encoded document (third layer down)
    #[serde(rename = "EventData")]
    pub event_data: String,
    pub voice_chat_range: f32,
    pub global_chat: bool,
    pub onboarding_type: i64,
    #[serde(rename = "RoomItemsData")]
    pub room_items_data: Vec<Value>,
    pub car_settings: CarSettings,
    #[serde(rename = "showCombatUI")]
    pub show_combat_ui: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SettingsExtraData {
    fn default() -> Self {
        Self {
            welcome_embed: String::new(),
            open_welcome_iframe_in_background: false,
            add_welcome_iframe_to_info_button: false,
            show_welcome_on_entry: false,
            sky_box_day_texture_url: String::new(),
            sky_box_night_texture_url: String::new(),
            sky_box_day_rotation: 0.0,
            sky_box_night_rotation: 0.0,
            sky_box_day_exposure: 1.0,
            sky_box_night_exposure: 1.0,
            enable_custom_avatars: false,
            default_to_ready_player_me: false,
            player_collisions: true,
            preload_room: false,
            fast_download: false,
            allowed_users: 0,
            disable_h_to_spawn: false,
            play_join_sound: true,
            jump_sounds: false,
            show_name_tags: true,
            show_backpack: true,
            show_quest_log: false,
            show_player_count: true,
            show_mic: true,
            show_music: true,
            show_emotes: true,
            show_space_info: true,
            request_mic_popup: false,
            require_username: false,
            released_room: String::new(),
            uncompressed_glb: false,
            movement_values: MovementValues::default(),
            numeric_parameters: Vec::new(),
            fog: FogSettings::default(),
            postprocess: PostProcessSettings::default(),
            light_values: LightValues::default(),
            blocky_avatars: false,
            rpm_avatars: false,
            collectible_avatars: false,
            custom_avatars: false,
            roundy_avatars: false,
            guardian_avatars: true,
            psx: false,
            pixelation: 0.24,
            movement_states: Vec::new(),
            custom_space_avatars: Vec::new(),
            custom_camera_states: Vec::new(),
            weapon_datas: Vec::new(),
            default_camera_state: -1,
            default_weapon: -1,
            default_movement_state: -1,
            event_data: json!({"itemNames": [], "itemEvents": []}).to_string(),
            voice_chat_range: 14.0,
            global_chat: false,
            onboarding_type: 1,
            room_items_data: Vec::new(),
            car_settings: CarSettings::default(),
            show_combat_ui: false,
            extra: Map::new(),
        }
    }
}

impl SettingsExtraData {
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Declare a room variable
    pub fn add_variable(&mut self, name: &str) {
        self.numeric_parameters.push(NumericParameter::new(name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_wire_keys() {
        let settings = RoomSettings::default();
        let json = serde_json::to_value(&settings).unwrap();

        for key in SETTINGS_EXPECTED_KEYS {
            assert!(json.get(*key).is_some(), "missing settings key {key}");
        }
        assert_eq!(json["roomBase"], "BlankScene");
        assert_eq!(json["tasksRefresh"], true);
    }

    #[test]
    fn test_inner_layer_roundtrip() {
        let settings = RoomSettings::default();
        let inner = settings.parse_extra_data().unwrap();

        assert!(inner.player_collisions);
        assert!(inner.guardian_avatars);
        assert_eq!(inner.voice_chat_range, 14.0);
        assert_eq!(inner.default_camera_state, -1);
        assert_eq!(inner.movement_values.sprint_speed, 6.8);
        assert_eq!(inner.movement_values.gravity, -10.0);

        // Third layer: EventData is itself encoded JSON
        let event_data: Value = serde_json::from_str(&inner.event_data).unwrap();
        assert_eq!(event_data["itemNames"], json!([]));
    }

    #[test]
    fn test_inner_layer_wire_keys() {
        let inner = SettingsExtraData::default();
        let json = serde_json::to_value(&inner).unwrap();

        for key in [
            "welcomeEmbed",
            "skyBoxDayTextureUrl",
            "uncompressedGLB",
            "movementValues",
            "numericParameters",
            "fog",
            "postprocess",
            "lightValues",
            "EventData",
            "RoomItemsData",
            "carSettings",
            "showCombatUI",
            "disableHToSpawn",
        ] {
            assert!(json.get(key).is_some(), "missing inner key {key}");
        }
        assert_eq!(json["fog"]["DayFogMax"], 0.0);
        assert_eq!(json["postprocess"]["BloomDayIntensity"], 0.0);
        assert_eq!(json["lightValues"]["NightShadows"], 0);
    }

    #[test]
    fn test_add_variable() {
        let mut settings = RoomSettings::default();
        let mut inner = settings.parse_extra_data().unwrap();
        inner.add_variable("coins");
        settings.set_extra_data(&inner);

        let reparsed = settings.parse_extra_data().unwrap();
        assert_eq!(reparsed.numeric_parameters.len(), 1);
        assert_eq!(reparsed.numeric_parameters[0].name, "coins");
    }
}

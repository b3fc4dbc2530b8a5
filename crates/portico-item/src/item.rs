//! The item wire format

use crate::extra::ExtraData;
use portico_core::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Button overlay config for image items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageInteractivityDetails {
    #[serde(rename = "buttonText")]
    pub button_text: String,
    #[serde(rename = "buttonURL")]
    pub button_url: String,
}

/// One placeable item, field-for-field the shape the platform stores.
///
/// `extra_data` is the JSON-encoded behavioral payload; it is `None` in
/// the separated snapshot format, where payloads live in a top-level
/// `logic` map instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "prefabName")]
    pub prefab_name: String,
    #[serde(rename = "parentItemID", default)]
    pub parent_item_id: u64,
    #[serde(rename = "currentEditornetId", default)]
    pub current_editornet_id: u64,
    pub pos: Vec3,
    #[serde(rename = "modelsize", default)]
    pub model_size: Vec3,
    #[serde(rename = "modelCenter", default)]
    pub model_center: Vec3,
    pub rot: Quat,
    pub scale: Vec3,
    #[serde(rename = "contentString", default)]
    pub content_string: String,
    #[serde(rename = "interactivityType", default)]
    pub interactivity_type: i32,
    #[serde(rename = "interactivityURL", default)]
    pub interactivity_url: String,
    #[serde(rename = "hoverTitle", default)]
    pub hover_title: String,
    #[serde(rename = "hoverBodyContent", default)]
    pub hover_body_content: String,
    #[serde(rename = "ImageInteractivityDetails", default)]
    pub image_interactivity_details: ImageInteractivityDetails,
    #[serde(rename = "sessionData", default)]
    pub session_data: String,
    #[serde(rename = "instanceId", default)]
    pub instance_id: String,
    pub placed: bool,
    pub locked: bool,
    #[serde(rename = "superLocked", default)]
    pub super_locked: bool,
    #[serde(
        rename = "extraData",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub extra_data: Option<String>,
    /// Unknown wire fields ride along so load/save never drops them
    #[serde(flatten)]
    pub extra_fields: serde_json::Map<String, serde_json::Value>,
}

impl Item {
    /// Base item shell all prefabs share.
    pub fn base(prefab_name: impl Into<String>, pos: Vec3, rot: Quat, scale: Vec3) -> Self {
        Self {
            prefab_name: prefab_name.into(),
            parent_item_id: 0,
            current_editornet_id: 0,
            pos,
            model_size: Vec3::ZERO,
            model_center: Vec3::ZERO,
            rot,
            scale,
            content_string: String::new(),
            interactivity_type: 0,
            interactivity_url: String::new(),
            hover_title: String::new(),
            hover_body_content: String::new(),
            image_interactivity_details: ImageInteractivityDetails::default(),
            session_data: String::new(),
            instance_id: String::new(),
            placed: true,
            locked: false,
            super_locked: false,
            extra_data: None,
            extra_fields: serde_json::Map::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content_string = content.into();
        self
    }

    pub fn with_parent(mut self, parent_item_id: u64) -> Self {
        self.parent_item_id = parent_item_id;
        self
    }

    /// Embed a payload as the item's extraData string.
    pub fn set_extra(&mut self, extra: &ExtraData) {
        self.extra_data = Some(extra.to_compact_string());
    }

    /// Parse the embedded payload, if any. An empty string parses to an
    /// empty payload (editor-placed items may carry one).
    pub fn parse_extra(&self) -> portico_core::Result<ExtraData> {
        match &self.extra_data {
            Some(raw) => ExtraData::parse(raw),
            None => Ok(ExtraData::new()),
        }
    }
}

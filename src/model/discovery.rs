use crate::model::{Availability, Device, EntityCategory};

// also see: https://www.home-assistant.io/integrations/mqtt/#mqtt-discovery

/// Selects the state from the published state payload.
pub const VALUE_TEMPLATE: &str = "{{ value_json.state }}";
/// Selects the attributes from the published state payload.
pub const JSON_ATTRIBUTES_TEMPLATE: &str = "{{ value_json.attributes | tojson }}";

/// Discovery message
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Discovery {
    pub availability: Vec<Availability>,

    pub enabled_by_default: bool,

    pub name: String,

    /// Becomes the last part of the Home Assistant entity id.
    pub object_id: String,

    pub unique_id: String,

    pub state_topic: String,

    pub value_template: String,

    /// Attributes are part of the state message, so this is the state topic.
    pub json_attributes_topic: String,

    pub json_attributes_template: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_category: Option<EntityCategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
}

/// State message, carrying the state and the attributes of an entity.
#[derive(Clone, Debug, serde::Serialize)]
pub struct StatePayload<'a, S, A> {
    pub state: &'a S,
    pub attributes: &'a A,
}

use crate::model::Availability;
use serde_json::{Map, Value};

/// Classification of an entity which isn't a primary one.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Debug,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
    serde::Serialize,
    serde::Deserialize,
)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Config,
    Diagnostic,
}

/// Read-only view of an entity which can be announced.
///
/// Entities are owned and mutated by their domain. Announcing one only reads its current
/// properties.
pub trait Entity {
    type State: serde::Serialize;
    type Attributes: serde::Serialize;

    /// Globally unique and stable id.
    fn entity_id(&self) -> &str;

    /// Unique within the entity's domain, used for topics.
    fn object_id(&self) -> &str;

    fn name(&self) -> &str;

    fn state(&self) -> &Self::State;

    fn attributes(&self) -> &Self::Attributes;

    fn enabled_by_default(&self) -> bool {
        true
    }

    fn entity_category(&self) -> Option<EntityCategory> {
        None
    }

    fn device_name(&self) -> Option<&str> {
        None
    }

    fn device_identifiers(&self) -> &[String] {
        &[]
    }

    /// Explicit availability rules. If empty, the rules of the client are used.
    fn availability(&self) -> &[Availability] {
        &[]
    }
}

/// A snapshot of an entity, holding plain JSON values.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EntitySnapshot {
    pub entity_id: String,
    pub object_id: String,
    pub name: String,

    #[serde(default)]
    pub state: Value,
    #[serde(default)]
    pub attributes: Map<String, Value>,

    #[serde(default = "default_enabled_by_default")]
    pub enabled_by_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_category: Option<EntityCategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub device_identifiers: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub availability: Vec<Availability>,
}

fn default_enabled_by_default() -> bool {
    true
}

impl EntitySnapshot {
    pub fn new(
        entity_id: impl Into<String>,
        object_id: impl Into<String>,
        name: impl Into<String>,
        state: impl Into<Value>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            object_id: object_id.into(),
            name: name.into(),
            state: state.into(),
            enabled_by_default: true,
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_device(mut self, name: impl Into<String>, identifiers: Vec<String>) -> Self {
        self.device_name = Some(name.into());
        self.device_identifiers = identifiers;
        self
    }
}

impl Entity for EntitySnapshot {
    type State = Value;
    type Attributes = Map<String, Value>;

    fn entity_id(&self) -> &str {
        &self.entity_id
    }

    fn object_id(&self) -> &str {
        &self.object_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> &Self::State {
        &self.state
    }

    fn attributes(&self) -> &Self::Attributes {
        &self.attributes
    }

    fn enabled_by_default(&self) -> bool {
        self.enabled_by_default
    }

    fn entity_category(&self) -> Option<EntityCategory> {
        self.entity_category
    }

    fn device_name(&self) -> Option<&str> {
        self.device_name.as_deref()
    }

    fn device_identifiers(&self) -> &[String] {
        &self.device_identifiers
    }

    fn availability(&self) -> &[Availability] {
        &self.availability
    }
}

/// Default prefix Home Assistant listens for discovery messages on.
pub const DEFAULT_DISCOVERY_PREFIX: &str = "homeassistant";

/// Configuration of the publishing client, fixed at startup.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ClientConfig {
    /// The MQTT client id, also the root of all state topics
    pub client_id: String,

    /// Prefix of the discovery config topics
    #[serde(default = "default_discovery_prefix")]
    pub discovery_prefix: String,

    /// Publish discovery configs with the retain flag
    #[serde(default = "default_retain_config")]
    pub retain_config: bool,

    /// Last will topic of the client, defaults to `<client_id>/lwt`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_will_topic: Option<String>,
}

fn default_discovery_prefix() -> String {
    DEFAULT_DISCOVERY_PREFIX.to_string()
}

fn default_retain_config() -> bool {
    true
}

impl ClientConfig {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            discovery_prefix: default_discovery_prefix(),
            retain_config: default_retain_config(),
            last_will_topic: None,
        }
    }

    pub fn with_discovery_prefix(mut self, discovery_prefix: impl Into<String>) -> Self {
        self.discovery_prefix = discovery_prefix.into();
        self
    }

    pub fn with_retain_config(mut self, retain_config: bool) -> Self {
        self.retain_config = retain_config;
        self
    }

    pub fn with_last_will_topic(mut self, last_will_topic: impl Into<String>) -> Self {
        self.last_will_topic = Some(last_will_topic.into());
        self
    }

    pub fn last_will_topic(&self) -> String {
        match &self.last_will_topic {
            Some(topic) => topic.clone(),
            None => format!("{}/lwt", self.client_id),
        }
    }
}

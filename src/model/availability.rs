/// Payload the client publishes on its connection topic while connected.
pub const CLIENT_CONNECTION_ONLINE: &str = "online";
/// Payload the client publishes on its connection topic once it goes away.
pub const CLIENT_CONNECTION_OFFLINE: &str = "offline";

/// Payload published on the last will topic while the client is alive.
pub const LAST_WILL_ALIVE: &str = "alive";
/// Payload the broker publishes on the last will topic when the client dies.
pub const LAST_WILL_DEAD: &str = "dead";

/// The topic a client reports its own connection state on.
pub fn client_connection_topic(client_id: &str) -> String {
    format!("{client_id}/state")
}

/// A single availability rule.
///
/// Home Assistant shows an entity as available only if all of its rules report available.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Availability {
    pub topic: String,
    pub payload_available: String,
    pub payload_not_available: String,
}

impl Availability {
    pub fn new(
        topic: impl Into<String>,
        payload_available: impl Into<String>,
        payload_not_available: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            payload_available: payload_available.into(),
            payload_not_available: payload_not_available.into(),
        }
    }

    /// Availability driven by the last will of the client
    pub fn last_will(topic: impl Into<String>) -> Self {
        Self::new(topic, LAST_WILL_ALIVE, LAST_WILL_DEAD)
    }

    /// Availability driven by the connection state of the client
    pub fn client_connection(client_id: &str) -> Self {
        Self::new(
            client_connection_topic(client_id),
            CLIENT_CONNECTION_ONLINE,
            CLIENT_CONNECTION_OFFLINE,
        )
    }
}

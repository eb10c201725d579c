use crate::publisher::{ClientConfig, DEFAULT_DISCOVERY_PREFIX};
use crate::utils::is_default;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[cfg_attr(feature = "clap", derive(clap::Parser))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ConnectorOptions {
    /// The MQTT client id, defaults to a random ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "clap", arg(long, env))]
    pub client_id: Option<String>,

    /// The MQTT's servers/brokers hostname
    #[cfg_attr(feature = "clap", arg(long, env))]
    pub host: String,

    /// The MQTT's server/brokers port, defaults to 1883 without TLS and 8883 with TLS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "clap", arg(long, env))]
    pub port: Option<u16>,

    /// TLS is used by default, you can disable it here.
    #[serde(default, skip_serializing_if = "is_default")]
    #[cfg_attr(feature = "clap", arg(long, env))]
    pub disable_tls: bool,

    #[serde(default = "default_keep_alive", skip_serializing_if = "is_default_keep_alive")]
    #[serde(with = "humantime_serde")]
    #[cfg_attr(feature = "clap", arg(long, env, value_parser = DurationValueParser, default_value = "5s"))]
    #[cfg_attr(feature = "schemars", schemars(schema_with = "humantime_duration"))]
    pub keep_alive: Duration,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "clap", arg(long, env))]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "clap", arg(long, env))]
    pub password: Option<String>,

    /// Discovery prefix, defaults to `homeassistant`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "clap", arg(long, env))]
    pub discovery_prefix: Option<String>,

    /// Don't retain discovery configs on the broker.
    #[serde(default, skip_serializing_if = "is_default")]
    #[cfg_attr(feature = "clap", arg(long, env))]
    pub disable_retain_config: bool,

    /// Last will topic, defaults to `<client_id>/lwt`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "clap", arg(long, env))]
    pub last_will_topic: Option<String>,

    /// Number of requests which can be queued for the MQTT event loop.
    ///
    /// Creating an entity queues two requests, so this limits the number of entities which can
    /// be created at once.
    #[serde(
        default = "default_request_capacity",
        skip_serializing_if = "is_default_request_capacity"
    )]
    #[cfg_attr(feature = "clap", arg(long, env, default_value_t = DEFAULT_REQUEST_CAPACITY))]
    pub request_capacity: usize,
}

pub const DEFAULT_REQUEST_CAPACITY: usize = 1024;

impl ConnectorOptions {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            client_id: None,
            host: host.into(),
            port: None,
            disable_tls: false,
            keep_alive: default_keep_alive(),
            username: None,
            password: None,
            discovery_prefix: None,
            disable_retain_config: false,
            last_will_topic: None,
            request_capacity: DEFAULT_REQUEST_CAPACITY,
        }
    }

    /// Resolve the configuration of the publishing client.
    pub fn client_config(&self, client_id: impl Into<String>) -> ClientConfig {
        let config = ClientConfig::new(client_id)
            .with_discovery_prefix(
                self.discovery_prefix
                    .as_deref()
                    .unwrap_or(DEFAULT_DISCOVERY_PREFIX),
            )
            .with_retain_config(!self.disable_retain_config);

        match &self.last_will_topic {
            Some(topic) => config.with_last_will_topic(topic),
            None => config,
        }
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(if self.disable_tls { 1883 } else { 8883 })
    }
}

#[cfg(feature = "schemars")]
fn humantime_duration(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
    use schemars::schema::*;
    use schemars::JsonSchema;
    use serde_json::json;

    let mut schema: SchemaObject = <String>::json_schema(gen).into();
    schema.metadata = Some(Box::new(Metadata {
        description: Some(r#"A duration in the humantime format. For example: '30s' for 30 seconds. '5m' for 5 minutes."#.to_string()),
        examples: vec![json!("5s"), json!("1m")],
        ..Default::default()
    }));
    schema.into()
}

#[cfg(feature = "clap")]
#[derive(Clone)]
pub struct DurationValueParser;

#[cfg(feature = "clap")]
impl clap::builder::TypedValueParser for DurationValueParser {
    type Value = Duration;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        _arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        use std::str::FromStr;
        Ok(humantime::Duration::from_str(&value.to_string_lossy())
            .map_err(|_err| clap::Error::new(clap::error::ErrorKind::Format).with_cmd(cmd))?
            .into())
    }
}

fn default_keep_alive() -> Duration {
    Duration::from_secs(5)
}

fn is_default_keep_alive(value: &Duration) -> bool {
    *value == default_keep_alive()
}

fn default_request_capacity() -> usize {
    DEFAULT_REQUEST_CAPACITY
}

fn is_default_request_capacity(value: &usize) -> bool {
    *value == DEFAULT_REQUEST_CAPACITY
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options: ConnectorOptions = serde_json::from_value(json!({
            "host": "broker.local",
        }))
        .unwrap();

        assert_eq!(options, ConnectorOptions::new("broker.local"));
        assert_eq!(options.keep_alive, Duration::from_secs(5));
        assert_eq!(options.port(), 8883);
        assert_eq!(options.request_capacity, 1024);
    }

    #[test]
    fn test_keep_alive() {
        let options: ConnectorOptions = serde_json::from_value(json!({
            "host": "broker.local",
            "keep_alive": "30s",
            "disable_tls": true,
        }))
        .unwrap();

        assert_eq!(options.keep_alive, Duration::from_secs(30));
        assert_eq!(options.port(), 1883);
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "host": "broker.local",
                "disable_tls": true,
                "keep_alive": "30s",
            })
        );
    }

    #[test]
    fn test_client_config() {
        let mut options = ConnectorOptions::new("broker.local");
        options.discovery_prefix = Some("ha".to_string());
        options.disable_retain_config = true;

        let config = options.client_config("viseron");
        assert_eq!(config.client_id, "viseron");
        assert_eq!(config.discovery_prefix, "ha");
        assert!(!config.retain_config);
        assert_eq!(config.last_will_topic(), "viseron/lwt");
    }
}

mod client;
mod error;
mod options;

pub use error::*;
pub use options::*;

use crate::model::{
    client_connection_topic, CLIENT_CONNECTION_ONLINE, LAST_WILL_ALIVE, LAST_WILL_DEAD,
};
use crate::publisher::{ClientConfig, DiscoveryPublisher};
use client::Session;
use rand::{distributions::Alphanumeric, Rng};
use rumqttc::{AsyncClient, Event, Incoming, LastWill, MqttOptions, QoS, TlsConfiguration};
use std::future::Future;
use std::time::Duration;
use tokio::{select, sync::mpsc};

/// Payload of the birth message Home Assistant sends once it (re)started.
const HOMEASSISTANT_ONLINE: &str = "online";

fn random_client_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(23)
        .map(char::from)
        .collect()
}

/// Runs the MQTT connection, handing a [`DiscoveryPublisher`] to the handler.
pub struct Connector<F, H>
where
    F: FnOnce(DiscoveryPublisher<AsyncClient>) -> H,
    H: ConnectorHandler,
{
    options: ConnectorOptions,
    handler: F,
}

pub trait ConnectorHandler {
    type Error: std::error::Error + Send + Sync;

    /// Called when the connection state changes. Entities should be created once connected.
    fn connected(&mut self, state: bool) -> impl Future<Output = Result<(), Self::Error>>;
    /// Called when Home Assistant restarted and requires all entities to be created again.
    fn restarted(&mut self) -> impl Future<Output = Result<(), Self::Error>>;
}

fn mqtt_options(options: &ConnectorOptions, config: &ClientConfig) -> MqttOptions {
    let mut mqttoptions = MqttOptions::new(&config.client_id, &options.host, options.port());
    mqttoptions.set_keep_alive(options.keep_alive);
    mqttoptions.set_last_will(LastWill::new(
        config.last_will_topic(),
        LAST_WILL_DEAD,
        QoS::AtLeastOnce,
        true,
    ));

    if !options.disable_tls {
        mqttoptions.set_transport(rumqttc::Transport::Tls(TlsConfiguration::Native));
    }

    if let Some(username) = &options.username {
        mqttoptions.set_credentials(username, options.password.clone().unwrap_or_default());
    }

    mqttoptions
}

/// Announce that this client is alive and connected.
fn announce_connection<S: Session>(session: &S, config: &ClientConfig) -> Result<(), S::Error> {
    session.publish(config.last_will_topic(), LAST_WILL_ALIVE.into(), true)?;
    session.publish(
        client_connection_topic(&config.client_id),
        CLIENT_CONNECTION_ONLINE.into(),
        true,
    )?;
    session.subscribe(status_topic(config))?;

    Ok(())
}

fn status_topic(config: &ClientConfig) -> String {
    format!("{}/status", config.discovery_prefix)
}

/// What the handler gets notified about.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ConnectorEvent {
    Connected(bool),
    Restarted,
}

/// Process an event of the MQTT connection, returning what the handler must be notified of.
fn on_event<S: Session>(
    session: &S,
    config: &ClientConfig,
    event: &Event,
) -> Result<Option<ConnectorEvent>, S::Error> {
    match event {
        Event::Incoming(Incoming::ConnAck(_)) => {
            log::info!("Connected");
            announce_connection(session, config)?;
            Ok(Some(ConnectorEvent::Connected(true)))
        }
        Event::Incoming(Incoming::Disconnect) => {
            log::info!("Disconnected");
            Ok(Some(ConnectorEvent::Connected(false)))
        }
        Event::Incoming(Incoming::Publish(publish)) => {
            log::debug!("Received: {publish:?}");
            if publish.topic != status_topic(config) {
                log::info!("Skipping unknown topic: {}", publish.topic);
                return Ok(None);
            }

            let payload = String::from_utf8_lossy(&publish.payload);
            log::info!("Home Assistant status: {payload}");
            Ok((payload == HOMEASSISTANT_ONLINE).then_some(ConnectorEvent::Restarted))
        }
        _ => Ok(None),
    }
}

async fn notify<H: ConnectorHandler>(
    handler: &mut H,
    event: ConnectorEvent,
) -> Result<(), H::Error> {
    match event {
        ConnectorEvent::Connected(state) => handler.connected(state).await,
        ConnectorEvent::Restarted => handler.restarted().await,
    }
}

impl<F, H> Connector<F, H>
where
    F: FnOnce(DiscoveryPublisher<AsyncClient>) -> H,
    H: ConnectorHandler,
{
    pub fn new(options: ConnectorOptions, handler: F) -> Self {
        Self { options, handler }
    }

    pub async fn run(self) -> Result<(), Error<H::Error>> {
        let client_id = self
            .options
            .client_id
            .clone()
            .unwrap_or_else(random_client_id);
        let config = self.options.client_config(client_id);

        let mqttoptions = mqtt_options(&self.options, &config);
        log::debug!("Options: {mqttoptions:#?}");

        let (client, mut eventloop) =
            AsyncClient::new(mqttoptions, self.options.request_capacity);

        let mut handler =
            (self.handler)(DiscoveryPublisher::new(client.clone(), config.clone()));

        // the event loop must keep draining requests while the handler publishes
        let (tx, mut rx) = mpsc::unbounded_channel();

        let connection = async {
            loop {
                let event = match eventloop.poll().await {
                    Ok(event) => match on_event(&client, &config, &event) {
                        Ok(Some(event)) => event,
                        Ok(None) => continue,
                        Err(err) => {
                            log::warn!("Failed to announce the connection: {err}");
                            client.try_disconnect().map_err(Error::Disconnect)?;
                            return Err(Error::Announce(err));
                        }
                    },
                    Err(err) => {
                        log::warn!("Connection failed: {err}");
                        if tx.send(ConnectorEvent::Connected(false)).is_err() {
                            break;
                        }
                        tokio::time::sleep(Duration::from_secs(5)).await;
                        continue;
                    }
                };

                if tx.send(event).is_err() {
                    break;
                }
            }

            Ok::<_, Error<H::Error>>(())
        };

        let handling = async {
            while let Some(event) = rx.recv().await {
                notify(&mut handler, event).await.map_err(Error::Handler)?;
            }

            Ok::<_, Error<H::Error>>(())
        };

        select! {
            ret = connection => { ret? },
            ret = handling => { ret? },
        }

        log::info!("MQTT runner exited");

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{Component, EntitySnapshot};
    use crate::publisher::Transport;
    use rumqttc::{ConnAck, ConnectReturnCode, Publish};
    use std::cell::RefCell;
    use std::convert::Infallible;

    #[derive(Default)]
    struct Recorder {
        published: RefCell<Vec<(String, String, bool)>>,
        subscribed: RefCell<Vec<String>>,
    }

    impl Transport for Recorder {
        type Error = Infallible;

        fn publish(&self, topic: String, payload: Vec<u8>, retain: bool) -> Result<(), Infallible> {
            let payload = String::from_utf8(payload).unwrap();
            self.published.borrow_mut().push((topic, payload, retain));
            Ok(())
        }
    }

    impl Session for Recorder {
        fn subscribe(&self, topic: String) -> Result<(), Infallible> {
            self.subscribed.borrow_mut().push(topic);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Notified {
        events: Vec<ConnectorEvent>,
    }

    impl ConnectorHandler for Notified {
        type Error = Infallible;

        async fn connected(&mut self, state: bool) -> Result<(), Infallible> {
            self.events.push(ConnectorEvent::Connected(state));
            Ok(())
        }

        async fn restarted(&mut self) -> Result<(), Infallible> {
            self.events.push(ConnectorEvent::Restarted);
            Ok(())
        }
    }

    fn config() -> ClientConfig {
        ClientConfig::new("viseron").with_discovery_prefix("ha")
    }

    fn status(payload: &str) -> Event {
        Event::Incoming(Incoming::Publish(Publish::new(
            "ha/status",
            QoS::AtLeastOnce,
            payload,
        )))
    }

    #[test]
    fn test_random_client_id() {
        let id = random_client_id();
        assert_eq!(id.len(), 23);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_mqtt_options() {
        let mut options = ConnectorOptions::new("broker.local");
        options.disable_tls = true;
        let config = options.client_config("viseron");

        let mqttoptions = mqtt_options(&options, &config);
        assert_eq!(mqttoptions.client_id(), "viseron");
        assert_eq!(mqttoptions.broker_address(), ("broker.local".to_string(), 1883));
        assert_eq!(mqttoptions.keep_alive(), Duration::from_secs(5));

        let will = mqttoptions.last_will().unwrap();
        assert_eq!(will.topic, "viseron/lwt");
        assert_eq!(&will.message[..], b"dead");
        assert!(will.retain);
    }

    #[test]
    fn test_status_topic() {
        assert_eq!(status_topic(&config()), "ha/status");
    }

    #[test]
    fn test_connack() {
        let session = Recorder::default();
        let event = Event::Incoming(Incoming::ConnAck(ConnAck {
            session_present: false,
            code: ConnectReturnCode::Success,
        }));

        assert_eq!(
            on_event(&session, &config(), &event).unwrap(),
            Some(ConnectorEvent::Connected(true))
        );
        assert_eq!(
            session.published.take(),
            vec![
                ("viseron/lwt".to_string(), "alive".to_string(), true),
                ("viseron/state".to_string(), "online".to_string(), true),
            ]
        );
        assert_eq!(session.subscribed.take(), vec!["ha/status".to_string()]);
    }

    #[test]
    fn test_disconnect() {
        let session = Recorder::default();
        let event = Event::Incoming(Incoming::Disconnect);

        assert_eq!(
            on_event(&session, &config(), &event).unwrap(),
            Some(ConnectorEvent::Connected(false))
        );
        assert!(session.published.borrow().is_empty());
    }

    #[test]
    fn test_homeassistant_status() {
        let session = Recorder::default();

        assert_eq!(
            on_event(&session, &config(), &status("online")).unwrap(),
            Some(ConnectorEvent::Restarted)
        );
        assert_eq!(on_event(&session, &config(), &status("offline")).unwrap(), None);
    }

    #[test]
    fn test_unknown_topic() {
        let session = Recorder::default();
        let event = Event::Incoming(Incoming::Publish(Publish::new(
            "homeassistant/status",
            QoS::AtLeastOnce,
            "online",
        )));

        assert_eq!(on_event(&session, &config(), &event).unwrap(), None);
        assert_eq!(
            on_event(&session, &config(), &Event::Incoming(Incoming::PingResp)).unwrap(),
            None
        );
        assert!(session.published.borrow().is_empty());
        assert!(session.subscribed.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_notify() {
        let mut handler = Notified::default();

        for event in [
            ConnectorEvent::Connected(true),
            ConnectorEvent::Restarted,
            ConnectorEvent::Connected(false),
        ] {
            notify(&mut handler, event).await.unwrap();
        }

        assert_eq!(
            handler.events,
            vec![
                ConnectorEvent::Connected(true),
                ConnectorEvent::Restarted,
                ConnectorEvent::Connected(false),
            ]
        );
    }

    /// Creating entities on connect must not overflow the queue of the (not yet polled) event
    /// loop.
    #[tokio::test]
    async fn test_create_many_on_connect() {
        let options = ConnectorOptions::new("broker.local");
        let config = options.client_config("viseron");
        let (client, _eventloop) =
            AsyncClient::new(mqtt_options(&options, &config), options.request_capacity);

        announce_connection(&client, &config).unwrap();

        let publisher = DiscoveryPublisher::new(client, config);
        for n in 0..200 {
            let entity = EntitySnapshot::new(
                format!("binary_sensor.camera_{n}_motion"),
                format!("camera_{n}_motion"),
                format!("Camera {n} Motion"),
                "off",
            );
            publisher
                .create(Component::BinarySensor, &entity)
                .unwrap_or_else(|err| panic!("failed to create entity {n}: {err}"));
        }
    }
}

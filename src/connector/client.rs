use crate::publisher::Transport;
use rumqttc::{AsyncClient, QoS};

impl Transport for AsyncClient {
    type Error = rumqttc::ClientError;

    fn publish(&self, topic: String, payload: Vec<u8>, retain: bool) -> Result<(), Self::Error> {
        log::debug!("Publish on {topic} (retain: {retain})");

        self.try_publish(topic, QoS::AtLeastOnce, retain, payload)
            .inspect_err(|err| {
                log::warn!("failed to publish: {err}");
            })
    }
}

/// A transport which also receives messages.
pub(crate) trait Session: Transport {
    fn subscribe(&self, topic: String) -> Result<(), Self::Error>;
}

impl Session for AsyncClient {
    fn subscribe(&self, topic: String) -> Result<(), Self::Error> {
        log::info!("Subscribing to: {topic}");
        self.try_subscribe(topic, QoS::AtLeastOnce)
    }
}

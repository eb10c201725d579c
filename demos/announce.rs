//! Announce a motion sensor and toggle its state

use clap::Parser;
use homeassistant_discovery::connector::{Connector, ConnectorHandler, ConnectorOptions};
use homeassistant_discovery::edgetpu::DeviceSpecifier;
use homeassistant_discovery::model::{Component, EntitySnapshot};
use homeassistant_discovery::publisher::{DiscoveryPublisher, PublishError};
use rumqttc::{AsyncClient, ClientError};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

#[derive(Debug, clap::Parser)]
struct Cli {
    #[command(flatten)]
    connector: ConnectorOptions,

    /// The Edge TPU reported in the attributes of the sensor
    #[arg(long, env, default_value = ":0")]
    device: DeviceSpecifier,
}

struct MotionSensor {
    publisher: DiscoveryPublisher<AsyncClient>,
    entity: EntitySnapshot,
    started: bool,
}

impl MotionSensor {
    pub fn new(publisher: DiscoveryPublisher<AsyncClient>, device: DeviceSpecifier) -> Self {
        let entity = EntitySnapshot::new(
            "binary_sensor.camera_1_motion",
            "camera_1_motion",
            "Camera 1 Motion",
            "off",
        )
        .with_attribute("device", device.to_string())
        .with_device("Camera 1", vec!["camera_1".to_string()]);

        Self {
            publisher,
            entity,
            started: false,
        }
    }

    fn announce(&mut self) -> Result<(), PublishError<ClientError>> {
        self.publisher.create(Component::BinarySensor, &self.entity)?;

        if !self.started {
            self.started = true;

            let publisher = self.publisher.clone();
            let mut entity = self.entity.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_secs(5));
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                let mut state = false;
                loop {
                    interval.tick().await;
                    entity.state = if state { "on" } else { "off" }.into();
                    if let Err(err) = publisher.update_state(Component::BinarySensor, &entity) {
                        log::warn!("Failed to update state: {err}");
                    }
                    state = !state;
                }
            });
        }

        Ok(())
    }
}

impl ConnectorHandler for MotionSensor {
    type Error = PublishError<ClientError>;

    async fn connected(&mut self, state: bool) -> Result<(), Self::Error> {
        log::info!("Connected: {state}");
        if state {
            self.announce()?;
        }
        Ok(())
    }

    async fn restarted(&mut self) -> Result<(), Self::Error> {
        log::info!("Restarted");
        self.announce()?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    log::info!("Starting up example");

    let device = cli.device;
    let connector = Connector::new(cli.connector, move |publisher| {
        MotionSensor::new(publisher, device)
    });
    connector.run().await?;

    log::info!("Exiting");

    Ok(())
}

mod config;
mod error;

pub use config::*;
pub use error::*;

use crate::model::{
    Availability, Component, Device, Discovery, Entity, EntityId, StatePayload,
    JSON_ATTRIBUTES_TEMPLATE, VALUE_TEMPLATE,
};

/// Outbound side of the MQTT connection.
///
/// Queuing, delivery and reconnecting are the business of the implementation.
pub trait Transport {
    type Error: std::error::Error + Send + Sync + 'static;

    fn publish(&self, topic: String, payload: Vec<u8>, retain: bool) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;

    fn publish(&self, topic: String, payload: Vec<u8>, retain: bool) -> Result<(), Self::Error> {
        (**self).publish(topic, payload, retain)
    }
}

/// An entity, as seen by Home Assistant.
pub struct DiscoveryEntity<'a, E: ?Sized> {
    id: EntityId,
    config: &'a ClientConfig,
    entity: &'a E,
}

impl<'a, E> DiscoveryEntity<'a, E>
where
    E: Entity + ?Sized,
{
    pub fn new(component: Component, config: &'a ClientConfig, entity: &'a E) -> Self {
        Self {
            id: EntityId::new(component, entity.object_id().to_string()),
            config,
            entity,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn state_topic(&self) -> String {
        self.id.state_topic(&self.config.client_id)
    }

    pub fn config_topic(&self) -> String {
        self.id.config_topic(&self.config.discovery_prefix)
    }

    /// The availability rules, either the entity's own or those of the client.
    ///
    /// NOTE: the fallback assumes all entities share the single connection of this client.
    pub fn availability(&self) -> Vec<Availability> {
        let availability = self.entity.availability();
        if !availability.is_empty() {
            return availability.to_vec();
        }

        vec![
            Availability::last_will(self.config.last_will_topic()),
            Availability::client_connection(&self.config.client_id),
        ]
    }

    pub fn device(&self) -> Option<Device> {
        Device::grouping(self.entity.device_name(), self.entity.device_identifiers())
    }

    pub fn config_payload(&self) -> Discovery {
        let state_topic = self.state_topic();

        Discovery {
            availability: self.availability(),
            enabled_by_default: self.entity.enabled_by_default(),
            name: self.entity.name().to_string(),
            object_id: self.entity.object_id().to_string(),
            unique_id: self.entity.entity_id().to_string(),
            json_attributes_topic: state_topic.clone(),
            state_topic,
            value_template: VALUE_TEMPLATE.to_string(),
            json_attributes_template: JSON_ATTRIBUTES_TEMPLATE.to_string(),
            entity_category: self.entity.entity_category(),
            device: self.device(),
        }
    }

    pub fn state_payload(&self) -> StatePayload<'a, E::State, E::Attributes> {
        StatePayload {
            state: self.entity.state(),
            attributes: self.entity.attributes(),
        }
    }
}

/// Announces entities to Home Assistant.
#[derive(Clone, Debug)]
pub struct DiscoveryPublisher<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> DiscoveryPublisher<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn entity<'a, E: Entity + ?Sized>(
        &'a self,
        component: Component,
        entity: &'a E,
    ) -> DiscoveryEntity<'a, E> {
        DiscoveryEntity::new(component, &self.config, entity)
    }

    /// Create the entity in Home Assistant, publishing its config and then its state.
    ///
    /// Both payloads are serialized before anything gets published, so an entity is never
    /// announced without its state.
    pub fn create<E: Entity + ?Sized>(
        &self,
        component: Component,
        entity: &E,
    ) -> Result<(), PublishError<T::Error>> {
        let entity = self.entity(component, entity);

        let config_topic = entity.config_topic();
        let config = serde_json::to_vec(&entity.config_payload())?;
        let state = serde_json::to_vec(&entity.state_payload())?;

        log::info!("Announce {} on {config_topic}", entity.id().object_id);

        self.transport
            .publish(config_topic, config, self.config.retain_config)
            .map_err(PublishError::Transport)?;
        self.transport
            .publish(entity.state_topic(), state, true)
            .map_err(PublishError::Transport)?;

        Ok(())
    }

    /// Publish the current state of an already created entity.
    pub fn update_state<E: Entity + ?Sized>(
        &self,
        component: Component,
        entity: &E,
    ) -> Result<(), PublishError<T::Error>> {
        let entity = self.entity(component, entity);

        let topic = entity.state_topic();
        let state = serde_json::to_vec(&entity.state_payload())?;

        log::debug!("Update state on {topic}");

        self.transport
            .publish(topic, state, true)
            .map_err(PublishError::Transport)
    }
}

use crate::model::Component;
use std::borrow::Cow;

/// Identifies an entity on the topic level.
///
/// The `object_id` is unique within its component, so the pair determines both topics.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityId {
    pub component: Component,
    pub object_id: Cow<'static, str>,
}

impl EntityId {
    pub fn new(component: Component, object_id: impl Into<Cow<'static, str>>) -> Self {
        Self {
            component,
            object_id: object_id.into(),
        }
    }

    /// render the state topic
    pub fn state_topic(&self, client_id: &str) -> String {
        format!(
            "{client_id}/{component}/{object_id}/state",
            component = self.component,
            object_id = self.object_id,
        )
    }

    /// render the config topic
    pub fn config_topic(&self, discovery_prefix: &str) -> String {
        format!(
            "{discovery_prefix}/{component}/{object_id}/config",
            component = self.component,
            object_id = self.object_id,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_topics() {
        let id = EntityId::new(Component::Sensor, "o1");
        assert_eq!(id.state_topic("c1"), "c1/sensor/o1/state");
        assert_eq!(id.config_topic("homeassistant"), "homeassistant/sensor/o1/config");
    }

    #[test]
    fn test_topics_component() {
        let id = EntityId::new(Component::BinarySensor, "camera_one_motion");
        assert_eq!(
            id.config_topic("ha"),
            "ha/binary_sensor/camera_one_motion/config"
        );
    }
}

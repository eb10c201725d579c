//! Announce detector entities to Home Assistant using MQTT discovery.
//!
//! The [`publisher`] turns an [`model::Entity`] into a discovery config and a state message.
//! The [`connector`] provides the MQTT connection which carries them, and [`edgetpu`] holds the
//! detector configuration, including the device specifier validation.

pub mod connector;
pub mod edgetpu;
pub mod model;
pub mod publisher;

mod utils;

mod availability;
mod component;
mod discovery;
mod entity;
mod id;

pub use availability::*;
pub use component::*;
pub use discovery::*;
pub use entity::*;
pub use id::*;

/// Manufacturer reported for every announced device.
pub const MANUFACTURER: &str = "Viseron";

/// Groups multiple entities under one physical device.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Device {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub manufacturer: String,
}

impl Device {
    /// Build the device grouping of an entity.
    ///
    /// A device can only be expressed if both a name and identifiers are present, otherwise
    /// there is no device at all.
    pub fn grouping(name: Option<&str>, identifiers: &[String]) -> Option<Self> {
        let name = name.filter(|name| !name.is_empty())?;
        if identifiers.is_empty() {
            return None;
        }

        Some(Self {
            identifiers: identifiers.to_vec(),
            name: Some(name.to_string()),
            manufacturer: MANUFACTURER.to_string(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grouping() {
        let device = Device::grouping(Some("Cam1"), &["abc".to_string()]);
        assert_eq!(
            serde_json::to_value(device).unwrap(),
            json!({
                "identifiers": ["abc"],
                "name": "Cam1",
                "manufacturer": "Viseron",
            })
        );
    }

    #[test]
    fn test_partial_grouping() {
        assert_eq!(Device::grouping(Some("Cam1"), &[]), None);
        assert_eq!(Device::grouping(None, &["abc".to_string()]), None);
        assert_eq!(Device::grouping(Some(""), &["abc".to_string()]), None);
    }
}

/// The Home Assistant domain an entity gets announced under.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Debug,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Component {
    BinarySensor,
    Button,
    Camera,
    Image,
    Sensor,
    Switch,
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_render() {
        assert_eq!(Component::BinarySensor.to_string(), "binary_sensor");
        assert_eq!(Component::Sensor.as_ref(), "sensor");
        assert_eq!(Component::from_str("image").unwrap(), Component::Image);
        assert!(Component::from_str("Sensor").is_err());
    }
}

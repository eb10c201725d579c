use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("EdgeTPU device {0} is invalid. Please check your configuration")]
pub struct InvalidDeviceSpecifier(pub String);

/// A rule of the device specifier grammar.
struct Rule {
    /// What the rule selects
    description: &'static str,
    matches: fn(&str) -> bool,
}

const CLASSES: [&str; 2] = ["usb", "pci"];

fn is_digit(value: &str) -> bool {
    value.len() == 1 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Accepted forms, checked in order.
const RULES: [Rule; 3] = [
    Rule {
        description: "`:<N>`, the N-th Edge TPU",
        matches: |spec| spec.strip_prefix(':').is_some_and(is_digit),
    },
    Rule {
        description: "`usb`, `pci` or `cpu`, any Edge TPU of the class, or the CPU",
        matches: |spec| spec == "cpu" || CLASSES.contains(&spec),
    },
    Rule {
        description: "`usb:<N>` or `pci:<N>`, the N-th Edge TPU of the class",
        matches: |spec| {
            spec.split_once(':')
                .is_some_and(|(class, index)| CLASSES.contains(&class) && is_digit(index))
        },
    },
];

/// Validate an Edge TPU device specifier, returning it unchanged.
pub fn validate(spec: &str) -> Result<&str, InvalidDeviceSpecifier> {
    match RULES.iter().find(|rule| (rule.matches)(spec)) {
        Some(rule) => {
            log::debug!("Device specifier {spec} matches {}", rule.description);
            Ok(spec)
        }
        None => Err(InvalidDeviceSpecifier(spec.to_string())),
    }
}

/// A validated Edge TPU device specifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(try_from = "String", into = "String")]
pub struct DeviceSpecifier(String);

impl DeviceSpecifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DeviceSpecifier {
    fn default() -> Self {
        Self(":0".to_string())
    }
}

impl TryFrom<String> for DeviceSpecifier {
    type Error = InvalidDeviceSpecifier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)?;
        Ok(Self(value))
    }
}

impl FromStr for DeviceSpecifier {
    type Err = InvalidDeviceSpecifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(validate(s)?.to_string()))
    }
}

impl From<DeviceSpecifier> for String {
    fn from(value: DeviceSpecifier) -> Self {
        value.0
    }
}

impl AsRef<str> for DeviceSpecifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for DeviceSpecifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

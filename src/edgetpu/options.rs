use crate::edgetpu::DeviceSpecifier;
use crate::utils::is_default;

pub const DEFAULT_MODEL_PATH: &str = "/detectors/models/edgetpu/model.tflite";
pub const DEFAULT_LABEL_PATH: &str = "/detectors/models/edgetpu/labels.txt";

/// Configuration of the Edge TPU object detector.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct EdgeTpuOptions {
    /// Path to the model, compiled for the Edge TPU
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Path to the file with the labels of the model
    #[serde(default = "default_label_path")]
    pub label_path: String,

    /// The device to run on, defaults to the first Edge TPU (`:0`)
    #[serde(default, skip_serializing_if = "is_default")]
    pub device: DeviceSpecifier,
}

impl Default for EdgeTpuOptions {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            label_path: default_label_path(),
            device: DeviceSpecifier::default(),
        }
    }
}

fn default_model_path() -> String {
    DEFAULT_MODEL_PATH.to_string()
}

fn default_label_path() -> String {
    DEFAULT_LABEL_PATH.to_string()
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options: EdgeTpuOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(options, EdgeTpuOptions::default());
        assert_eq!(options.device.as_str(), ":0");
    }

    #[test]
    fn test_device() {
        let options: EdgeTpuOptions = serde_json::from_value(json!({
            "device": "pci:1",
        }))
        .unwrap();
        assert_eq!(options.device.as_str(), "pci:1");
        assert_eq!(options.model_path, DEFAULT_MODEL_PATH);
    }

    #[test]
    fn test_invalid_device() {
        let err = serde_json::from_value::<EdgeTpuOptions>(json!({
            "device": "gpu",
        }))
        .unwrap_err();

        assert!(err
            .to_string()
            .contains("EdgeTPU device gpu is invalid. Please check your configuration"));
    }
}

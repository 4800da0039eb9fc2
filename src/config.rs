#![warn(missing_docs)]
//! Diagram configuration files.
//!
//! A configuration is a YAML (`.yaml`, `.yml`) or JSON (`.json`) document. All fields are optional and default to the
//! values of a freshly created diagram:
//! ```yaml
//! canvas:
//!   width: 800
//!   height: 400
//! element: concave-mirror
//! parameters:
//!   focal_length: 100
//!   object_distance: 150
//!   object_height: 50
//! trace_rays: true
//! ```
use crate::{
    element::ElementType,
    error::{SkResult, SketchError},
    optical_model::{OpticalModel, Parameters},
};
use log::info;
use serde_derive::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Size of the drawing canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    /// canvas width
    pub width: f64,
    /// canvas height
    pub height: f64,
}
impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
        }
    }
}

/// Complete description of a diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SketchConfig {
    /// canvas size
    pub canvas: CanvasConfig,
    /// optical element at the optical center
    pub element: ElementType,
    /// focal length, object distance and object height
    pub parameters: Parameters,
    /// draw the two construction rays
    pub trace_rays: bool,
}
impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            element: ElementType::default(),
            parameters: Parameters::default(),
            trace_rays: true,
        }
    }
}
impl SketchConfig {
    /// Read a configuration file. The format is chosen from the file extension.
    /// # Errors
    /// This function returns an error if the file cannot be read, has an unsupported extension or cannot be parsed.
    pub fn from_file(path: &Path) -> SkResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SketchError::Config(format!("cannot read file {} : {}", path.display(), e))
        })?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&contents)?,
            Some("json") => Self::from_json(&contents)?,
            _ => {
                return Err(SketchError::Config(format!(
                    "unsupported configuration file type: {}",
                    path.display()
                )))
            }
        };
        info!("configuration read from {}", path.display());
        Ok(config)
    }
    /// Parse a configuration from a YAML string.
    /// # Errors
    /// This function returns an error if the string is not a valid configuration.
    pub fn from_yaml(yaml: &str) -> SkResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| SketchError::Config(format!("parsing of configuration failed: {e}")))
    }
    /// Parse a configuration from a JSON string.
    /// # Errors
    /// This function returns an error if the string is not a valid configuration.
    pub fn from_json(json: &str) -> SkResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SketchError::Config(format!("parsing of configuration failed: {e}")))
    }
    /// Serialize this configuration to YAML.
    /// # Errors
    /// This function returns an error if the serialization fails.
    pub fn to_yaml(&self) -> SkResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| SketchError::Config(format!("serialization of configuration failed: {e}")))
    }
    /// Create the [`OpticalModel`] described by this configuration.
    /// # Errors
    /// This function returns an error if the canvas size is invalid.
    pub fn to_model(&self) -> SkResult<OpticalModel> {
        let mut model = OpticalModel::new(self.canvas.width, self.canvas.height)?;
        model.set_element_type(self.element);
        model.set_parameters(
            self.parameters.focal_length,
            self.parameters.object_distance,
            self.parameters.object_height,
        );
        Ok(model)
    }
}

//! Viewer configuration with TOML file support.
//!
//! Every configurable behaviour of the viewer (control bar, camera,
//! pointer/reticle interaction, render scheduling) lives here. Options
//! serialize to/from TOML so hosts can ship presets next to their content.

mod camera;
mod control_bar;
mod interaction;
mod rendering;

use std::path::Path;

pub use camera::CameraOptions;
pub use control_bar::{ControlBarOptions, ControlButton};
pub use interaction::InteractionOptions;
pub use rendering::RenderingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::error::ViewerError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[interaction]`) work.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Control-bar widget options.
    pub control_bar: ControlBarOptions,
    /// Camera projection and orbit-control parameters.
    pub camera: CameraOptions,
    /// Pointer, reticle and infospot behaviour.
    pub interaction: InteractionOptions,
    /// Frame scheduling options.
    pub rendering: RenderingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] if the file cannot be read, or
    /// [`ViewerError::OptionsParse`] if its contents are not valid options.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, ViewerError> {
        toml::from_str(content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] on write failure.
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }

    /// Reticle dwell time as a duration.
    #[must_use]
    pub fn dwell_time(&self) -> Duration {
        Duration::from_millis(self.interaction.dwell_time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_surface() {
        let opts = Options::default();
        assert!(opts.control_bar.show);
        assert_eq!(
            opts.control_bar.buttons,
            vec![
                ControlButton::Fullscreen,
                ControlButton::Navigation,
                ControlButton::Vr,
                ControlButton::Video,
            ]
        );
        assert!(!opts.control_bar.auto_hide);
        assert!(opts.interaction.auto_hide_infospot);
        assert!(!opts.camera.horizontal_only);
        assert_eq!(opts.interaction.click_tolerance, 10.0);
        assert_eq!(opts.camera.fov, 60.0);
        assert!(!opts.camera.reverse_drag);
        assert!(!opts.interaction.enable_reticle);
        assert_eq!(opts.dwell_time(), Duration::from_millis(1500));
        assert!(opts.interaction.auto_reticle_select);
        assert!(!opts.rendering.passive);
    }

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[interaction]
enable_reticle = true
dwell_time_ms = 800

[control_bar]
buttons = ["vr", "fullscreen"]
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert!(opts.interaction.enable_reticle);
        assert_eq!(opts.interaction.dwell_time_ms, 800);
        // Everything else should be default
        assert_eq!(opts.interaction.click_tolerance, 10.0);
        assert!(opts.control_bar.show);
        assert_eq!(
            opts.control_bar.buttons,
            vec![ControlButton::Vr, ControlButton::Fullscreen]
        );
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml("[camera]\nfov = \"wide\"").unwrap_err();
        assert!(matches!(err, ViewerError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join("panoview-options-test");
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.rendering.passive = true;
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("control_bar"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("interaction"));
        assert!(props.contains_key("rendering"));

        // Skipped fields should be absent
        let bar = &props["control_bar"]["properties"];
        assert!(bar.get("show").is_some());
        assert!(bar.get("buttons").is_none());
        assert!(props["rendering"]["properties"].get("clear_color").is_none());
    }
}

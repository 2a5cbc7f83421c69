//! Runtime configuration for the mind-map core.
//!
//! # Responsibility
//! - Hold every tunable constant (room, placement, sizing, panel layout,
//!   interaction bindings) in one serde-backed structure.
//! - Load optional JSON overrides; absent fields keep their defaults.
//!
//! # Invariants
//! - A config returned by `from_json_str`/`load_config_file` has passed
//!   `validate()`.

use crate::interaction::state_machine::InteractionConfig;
use crate::model::geometry::RoomBounds;
use crate::panel::projector::PanelLayout;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Errors raised while loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Room extents in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Gap kept between nodes and each wall.
    pub margin: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 20.0,
            depth: 30.0,
            margin: 1.0,
        }
    }
}

impl RoomConfig {
    pub fn bounds(&self) -> RoomBounds {
        RoomBounds::new(Vec3::new(self.width, self.height, self.depth), self.margin)
    }
}

/// Camera-relative placement of manually added nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Distance in front of the camera.
    pub standoff: f32,
    /// Maximum random offset per axis.
    pub jitter: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            standoff: 5.0,
            jitter: 0.25,
        }
    }
}

/// Node size derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    pub base_size: f32,
    pub per_connection: f32,
    /// Grow nodes with their connection degree.
    pub scale_with_degree: bool,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            base_size: 0.2,
            per_connection: 0.05,
            scale_with_degree: false,
        }
    }
}

/// Complete core configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MindMapConfig {
    pub room: RoomConfig,
    pub placement: PlacementConfig,
    pub sizing: SizingConfig,
    pub panel: PanelLayout,
    pub interaction: InteractionConfig,
}

impl MindMapConfig {
    /// Parses JSON overrides on top of defaults and validates the result.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks numeric ranges that would break clamping or projection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }

        let room = &self.room;
        for (name, value) in [
            ("room.width", room.width),
            ("room.height", room.height),
            ("room.depth", room.depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be > 0")));
            }
        }
        let smallest_half = room.width.min(room.height).min(room.depth) / 2.0;
        if !(0.0..smallest_half).contains(&room.margin) {
            return Err(ConfigError::Invalid(format!(
                "room.margin must be in [0, {smallest_half})"
            )));
        }

        if self.placement.jitter < 0.0 || self.placement.standoff < 0.0 {
            return Err(ConfigError::Invalid(
                "placement.jitter and placement.standoff must be >= 0".to_string(),
            ));
        }
        if self.sizing.base_size <= 0.0 || self.sizing.per_connection < 0.0 {
            return Err(ConfigError::Invalid(
                "sizing.base_size must be > 0 and sizing.per_connection >= 0".to_string(),
            ));
        }

        let panel = &self.panel;
        if panel.min_scale <= 0.0 || panel.min_scale > panel.max_scale {
            return Err(ConfigError::Invalid(
                "panel scale range must satisfy 0 < min_scale <= max_scale".to_string(),
            ));
        }
        if panel.reference_distance <= 0.0 {
            return Err(ConfigError::Invalid(
                "panel.reference_distance must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    fn numeric_fields(&self) -> [(&'static str, f32); 16] {
        let room = &self.room;
        let placement = &self.placement;
        let sizing = &self.sizing;
        let panel = &self.panel;
        [
            ("room.width", room.width),
            ("room.height", room.height),
            ("room.depth", room.depth),
            ("room.margin", room.margin),
            ("placement.standoff", placement.standoff),
            ("placement.jitter", placement.jitter),
            ("sizing.base_size", sizing.base_size),
            ("sizing.per_connection", sizing.per_connection),
            ("panel.base_width", panel.base_width),
            ("panel.base_height", panel.base_height),
            ("panel.base_font_size", panel.base_font_size),
            ("panel.min_scale", panel.min_scale),
            ("panel.max_scale", panel.max_scale),
            ("panel.reference_distance", panel.reference_distance),
            ("panel.offset_x", panel.offset_x),
            ("panel.offset_y", panel.offset_y),
        ]
    }
}

/// Reads and validates a JSON config file.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<MindMapConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    MindMapConfig::from_json_str(&text)
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, MindMapConfig};
    use crate::interaction::state_machine::PointerButton;

    #[test]
    fn defaults_match_room_and_panel_constants() {
        let config = MindMapConfig::default();
        config.validate().expect("defaults are valid");
        assert_eq!(config.room.bounds().interior_half_extents().x, 14.0);
        assert_eq!(config.room.bounds().interior_half_extents().y, 9.0);
        assert_eq!(config.placement.standoff, 5.0);
        assert_eq!(config.panel.base_width, 200.0);
        assert_eq!(config.interaction.drag_button, PointerButton::Auxiliary);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = MindMapConfig::from_json_str(
            r#"{ "room": { "width": 40.0 }, "interaction": { "drag_button": "secondary" } }"#,
        )
        .expect("partial override");
        assert_eq!(config.room.width, 40.0);
        assert_eq!(config.room.height, 20.0);
        assert_eq!(config.interaction.drag_button, PointerButton::Secondary);
    }

    #[test]
    fn oversized_margin_is_rejected() {
        let err = MindMapConfig::from_json_str(r#"{ "room": { "margin": 10.0 } }"#)
            .expect_err("margin equal to half height must fail");
        assert!(matches!(err, ConfigError::Invalid(message) if message.contains("room.margin")));
    }

    #[test]
    fn overflowing_numbers_are_rejected_as_non_finite() {
        for json in [
            r#"{ "placement": { "jitter": 1e39 } }"#,
            r#"{ "placement": { "standoff": 1e39 } }"#,
            r#"{ "sizing": { "per_connection": 1e39 } }"#,
            r#"{ "panel": { "max_scale": 1e39 } }"#,
            r#"{ "panel": { "reference_distance": 1e39 } }"#,
            r#"{ "panel": { "offset_x": -1e39 } }"#,
        ] {
            let err = MindMapConfig::from_json_str(json).unwrap_err();
            assert!(
                matches!(&err, ConfigError::Invalid(message) if message.contains("must be finite")),
                "{json}: {err}"
            );
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = MindMapConfig::from_json_str("{ room: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

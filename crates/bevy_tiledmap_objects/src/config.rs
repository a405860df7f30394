//! Serializable object layer settings.
//!
//! Describes everything about an object layer except its objects, in the shape Tiled
//! writes it to JSON maps (`draworder` as its attribute string, `color` as hex).

use bevy::color::Srgba;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layer::{DrawOrder, ObjectGroup};

/// Layer-level settings of an [`ObjectGroup`].
///
/// # Example
///
/// ```rust
/// use bevy_tiledmap_objects::prelude::*;
///
/// let config = ObjectGroupConfig::from_json(
///     r##"{ "name": "spawns", "width": 40, "height": 30, "draworder": "index", "color": "#ff8000" }"##,
/// )
/// .unwrap();
/// let group = ObjectGroup::from_config(&config).unwrap();
/// assert_eq!(group.draw_order(), DrawOrder::Index);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectGroupConfig {
    /// Layer name
    pub name: String,
    /// Horizontal layer offset in tiles
    pub x: i32,
    /// Vertical layer offset in tiles
    pub y: i32,
    /// Layer width in tiles
    pub width: i32,
    /// Layer height in tiles
    pub height: i32,
    /// Layer opacity, 0.0 to 1.0
    pub opacity: f32,
    /// Whether the layer is shown
    pub visible: bool,
    /// Object color as a hex string (`#RRGGBB` or `#RRGGBBAA`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Draw order; unknown strings load as [`DrawOrder::Unknown`]
    #[serde(rename = "draworder")]
    pub draw_order: DrawOrder,
}

impl Default for ObjectGroupConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            opacity: 1.0,
            visible: true,
            color: None,
            draw_order: DrawOrder::TopDown,
        }
    }
}

impl ObjectGroupConfig {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize settings to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    fn parse_color(&self) -> Result<Option<Color>, ConfigError> {
        let Some(value) = self.color.as_deref() else {
            return Ok(None);
        };
        let srgba = Srgba::hex(value).map_err(|source| ConfigError::InvalidColor {
            value: value.to_owned(),
            source,
        })?;
        Ok(Some(Color::Srgba(srgba)))
    }
}

impl ObjectGroup {
    /// Build an empty object layer from its settings.
    pub fn from_config(config: &ObjectGroupConfig) -> Result<Self, ConfigError> {
        let color = config.parse_color()?;

        let mut group = ObjectGroup::new(
            config.name.clone(),
            config.x,
            config.y,
            config.width,
            config.height,
        );
        group.set_opacity(config.opacity);
        group.set_visible(config.visible);
        group.set_color(color);
        group.set_draw_order(config.draw_order);
        if group.draw_order() == DrawOrder::Unknown {
            warn!(
                "Object layer '{}' has an unrecognized draw order, keeping it as unknown",
                config.name
            );
        }
        Ok(group)
    }

    /// Capture this layer's settings.
    pub fn to_config(&self) -> ObjectGroupConfig {
        let position = self.position();
        let size = self.size();
        ObjectGroupConfig {
            name: self.name().to_owned(),
            x: position.x,
            y: position.y,
            width: size.x,
            height: size.y,
            opacity: self.opacity(),
            visible: self.is_visible(),
            color: self.color().map(|color| color.to_srgba().to_hex()),
            draw_order: self.draw_order(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = ObjectGroupConfig::from_json("{}").unwrap();
        assert_eq!(config, ObjectGroupConfig::default());
        assert_eq!(config.draw_order, DrawOrder::TopDown);
    }

    #[test]
    fn test_unknown_draw_order_passes_through() {
        let config = ObjectGroupConfig::from_json(r#"{ "draworder": "diagonal" }"#).unwrap();
        assert_eq!(config.draw_order, DrawOrder::Unknown);

        let group = ObjectGroup::from_config(&config).unwrap();
        assert_eq!(group.draw_order(), DrawOrder::Unknown);
        assert!(config.to_json().unwrap().contains(r#""draworder":"unknown""#));
    }

    #[test]
    fn test_group_settings_round_trip() {
        let config = ObjectGroupConfig {
            name: "pickups".into(),
            x: 2,
            y: 3,
            width: 40,
            height: 30,
            opacity: 0.75,
            visible: false,
            color: Some("#ff8000".into()),
            draw_order: DrawOrder::Index,
        };

        let group = ObjectGroup::from_config(&config).unwrap();
        assert_eq!(group.name(), "pickups");
        assert_eq!(group.size(), IVec2::new(40, 30));
        assert!(!group.is_visible());
        assert_eq!(group.color(), Some(Color::Srgba(Srgba::hex("ff8000").unwrap())));

        let restored = group.to_config();
        assert_eq!(restored.draw_order, DrawOrder::Index);
        assert_eq!(restored.color.as_deref().map(str::to_lowercase), Some("#ff8000".into()));
        assert_eq!(restored.width, 40);
    }

    #[test]
    fn test_invalid_color_is_an_error() {
        let config = ObjectGroupConfig {
            color: Some("not a color".into()),
            ..Default::default()
        };
        let err = ObjectGroup::from_config(&config).unwrap_err();
        match err {
            ConfigError::InvalidColor { value, .. } => assert_eq!(value, "not a color"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = ObjectGroupConfig::from_json("{ \"width\": \"wide\" }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}

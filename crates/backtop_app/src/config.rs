//! Widget configuration file handling
//!
//! ```toml
//! [button]
//! default_position = "bottom-left"
//! size = "large"
//! background_color = "#336699"
//!
//! [scroll]
//! show_after = 400
//! duration_ms = 650
//! easing = "ease_in_out_cubic"
//! ```

use anyhow::{Context, Result};
use backtop_animation::Easing;
use backtop_core::{Color, Position, Shadow};
use backtop_platform::ScrollBehavior;
use backtop_widgets::config::{DEFAULT_BORDER_RADIUS, DEFAULT_Z_INDEX};
use backtop_widgets::{ButtonSize, Corner, FloatingButtonConfig, ScrollToTopConfig, StyleOverrides};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level widget configuration (backtop.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WidgetConfigFile {
    #[serde(default)]
    pub button: ButtonSection,
    #[serde(default)]
    pub scroll: ScrollSection,
}

/// Floating button options
#[derive(Debug, Deserialize, Serialize)]
pub struct ButtonSection {
    #[serde(default)]
    pub default_position: Corner,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default = "default_true")]
    pub draggable: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub size: ButtonSize,
    /// `#rrggbb` / `#rrggbbaa`; malformed values are ignored
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default = "default_border_radius")]
    pub border_radius: f32,
    #[serde(default = "default_z_index")]
    pub z_index: i32,
    #[serde(default)]
    pub class_name: String,
    /// Text label; the up-chevron is used when absent
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub box_shadow: Option<Shadow>,
    #[serde(default)]
    pub style: StyleOverrides,
}

fn default_true() -> bool {
    true
}

fn default_border_radius() -> f32 {
    DEFAULT_BORDER_RADIUS
}

fn default_z_index() -> i32 {
    DEFAULT_Z_INDEX
}

impl Default for ButtonSection {
    fn default() -> Self {
        Self {
            default_position: Corner::default(),
            position: None,
            draggable: true,
            disabled: false,
            size: ButtonSize::default(),
            color: None,
            background_color: None,
            border_radius: default_border_radius(),
            z_index: default_z_index(),
            class_name: String::new(),
            label: None,
            box_shadow: None,
            style: StyleOverrides::default(),
        }
    }
}

/// Scroll-to-top options
#[derive(Debug, Deserialize, Serialize)]
pub struct ScrollSection {
    #[serde(default = "default_show_after")]
    pub show_after: f32,
    #[serde(default = "default_true")]
    pub smooth: bool,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,
    #[serde(default)]
    pub behavior: ScrollBehavior,
    #[serde(default)]
    pub easing: Easing,
}

fn default_show_after() -> f32 {
    300.0
}

fn default_duration_ms() -> u32 {
    500
}

impl Default for ScrollSection {
    fn default() -> Self {
        Self {
            show_after: default_show_after(),
            smooth: true,
            duration_ms: default_duration_ms(),
            behavior: ScrollBehavior::default(),
            easing: Easing::default(),
        }
    }
}

/// Parse a color option, dropping malformed values with a warning
fn lenient_color(option: &'static str, value: Option<&str>) -> Option<Color> {
    let value = value?;
    match Color::parse_hex(value) {
        Ok(color) => Some(color),
        Err(err) => {
            tracing::warn!(option, %err, "ignoring color");
            None
        }
    }
}

impl ButtonSection {
    /// Button configuration without callbacks
    pub fn to_config(&self) -> FloatingButtonConfig {
        let mut config = FloatingButtonConfig::new()
            .default_position(self.default_position)
            .draggable(self.draggable)
            .disabled(self.disabled)
            .size(self.size)
            .border_radius(self.border_radius)
            .z_index(self.z_index)
            .class_name(self.class_name.clone())
            .style(self.style);
        config.position = self.position;
        config.color = lenient_color("color", self.color.as_deref());
        config.background_color =
            lenient_color("background_color", self.background_color.as_deref());
        config.box_shadow = self.box_shadow;
        if let Some(label) = &self.label {
            config.content = backtop_widgets::Content::text(label.clone());
        }
        config
    }
}

impl WidgetConfigFile {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Scroll-to-top configuration without callbacks
    pub fn to_scroll_config(&self) -> ScrollToTopConfig {
        ScrollToTopConfig::new()
            .button(self.button.to_config())
            .show_after(self.scroll.show_after)
            .smooth(self.scroll.smooth)
            .duration_ms(self.scroll.duration_ms)
            .behavior(self.scroll.behavior)
            .easing(self.scroll.easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = WidgetConfigFile::from_toml_str("").unwrap();
        let config = file.to_scroll_config();
        assert_eq!(config.show_after, 300.0);
        assert_eq!(config.duration_ms, 500);
        assert!(config.smooth);
        assert_eq!(config.behavior, ScrollBehavior::Smooth);
        assert_eq!(config.easing, Easing::EaseInOutQuad);
        assert_eq!(config.button.size, ButtonSize::Medium);
        assert_eq!(config.button.default_position, Corner::BottomRight);
        assert!(config.button.draggable);
        assert_eq!(config.button.z_index, 1000);
    }

    #[test]
    fn test_full_file() {
        let file = WidgetConfigFile::from_toml_str(
            r##"
            [button]
            default_position = "top-left"
            size = "small"
            draggable = false
            background_color = "#336699"
            color = "not-a-color"
            position = { x = 15.0, y = 25.0 }
            label = "Top"

            [button.style]
            opacity = 0.8

            [scroll]
            show_after = 450
            smooth = false
            behavior = "auto"
            easing = "linear"
            "##,
        )
        .unwrap();
        let config = file.to_scroll_config();
        assert_eq!(config.show_after, 450.0);
        assert!(!config.smooth);
        assert_eq!(config.behavior, ScrollBehavior::Auto);
        assert_eq!(config.easing, Easing::Linear);

        let button = &config.button;
        assert_eq!(button.default_position, Corner::TopLeft);
        assert_eq!(button.size, ButtonSize::Small);
        assert!(!button.draggable);
        assert_eq!(button.background_color, Some(Color::from_hex(0x336699)));
        assert_eq!(button.color, None);
        assert_eq!(button.position, Some(Position::new(15.0, 25.0)));
        assert_eq!(button.style.opacity, Some(0.8));
        assert_eq!(button.content, backtop_widgets::Content::text("Top"));
    }

    #[test]
    fn test_unknown_size_falls_back() {
        let file = WidgetConfigFile::from_toml_str("[button]\nsize = \"enormous\"\n").unwrap();
        assert_eq!(file.button.size, ButtonSize::Medium);
    }

    #[test]
    fn test_bad_behavior_is_an_error() {
        assert!(WidgetConfigFile::from_toml_str("[scroll]\nbehavior = \"warp\"\n").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let file = WidgetConfigFile::default();
        let text = file.to_toml().unwrap();
        let parsed = WidgetConfigFile::from_toml_str(&text).unwrap();
        assert_eq!(parsed.scroll.duration_ms, 500);
        assert_eq!(parsed.button.size, ButtonSize::Medium);
    }
}

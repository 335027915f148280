//! Widget configuration
//!
//! Builder-style configs for [`FloatingButton`](crate::FloatingButton) and
//! [`ScrollToTop`](crate::ScrollToTop), plus the named option enums they use.

use std::fmt;
use std::str::FromStr;

use backtop_animation::Easing;
use backtop_core::{Color, Position, Shadow, Size};
use backtop_platform::ScrollBehavior;
use serde::{Deserialize, Serialize};

use crate::content::Content;
use crate::style::StyleOverrides;

/// Distance between the control and the viewport edge for corner placement
pub const CORNER_MARGIN: f32 = 20.0;

/// Default border radius (percent of the diameter)
pub const DEFAULT_BORDER_RADIUS: f32 = 50.0;

/// Default stacking order of a plain floating button
pub const DEFAULT_Z_INDEX: i32 = 1000;

/// Click handler
pub type ClickHandler = Box<dyn FnMut() + Send>;

/// Drag-start / drag-end handler, called with the control's top-left
pub type DragHandler = Box<dyn FnMut(Position) + Send>;

/// Control diameter preset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ButtonSize {
    /// Diameter in pixels
    pub fn diameter(&self) -> f32 {
        match self {
            ButtonSize::Small => 40.0,
            ButtonSize::Medium => 50.0,
            ButtonSize::Large => 60.0,
        }
    }

    pub fn extent(&self) -> Size {
        Size::square(self.diameter())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonSize::Small => "small",
            ButtonSize::Medium => "medium",
            ButtonSize::Large => "large",
        }
    }

    /// Lenient lookup: unknown names fall back to `Medium`
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(name, "unknown button size, using medium");
            ButtonSize::Medium
        })
    }
}

impl fmt::Display for ButtonSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ButtonSize {
    type Err = backtop_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(ButtonSize::Small),
            "medium" => Ok(ButtonSize::Medium),
            "large" => Ok(ButtonSize::Large),
            other => Err(backtop_core::Error::InvalidOption {
                option: "size",
                value: other.to_string(),
            }),
        }
    }
}

impl From<String> for ButtonSize {
    fn from(name: String) -> Self {
        ButtonSize::from_name(&name)
    }
}

impl From<ButtonSize> for String {
    fn from(size: ButtonSize) -> Self {
        size.as_str().to_string()
    }
}

/// Viewport corner used to place an uncontrolled control
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Corner {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl Corner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::BottomRight => "bottom-right",
            Corner::BottomLeft => "bottom-left",
            Corner::TopRight => "top-right",
            Corner::TopLeft => "top-left",
        }
    }

    /// Lenient lookup: unknown names fall back to `BottomRight`
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(name, "unknown corner, using bottom-right");
            Corner::BottomRight
        })
    }

    /// Top-left of a control of `diameter` placed in this corner.
    ///
    /// Each axis is clamped to the viewport, so a viewport smaller than the
    /// control plus margins yields 0 rather than a negative coordinate.
    pub fn place(&self, viewport: Size, diameter: f32) -> Position {
        let far_x = viewport.width - diameter - CORNER_MARGIN;
        let far_y = viewport.height - diameter - CORNER_MARGIN;
        let raw = match self {
            Corner::BottomRight => Position::new(far_x, far_y),
            Corner::BottomLeft => Position::new(CORNER_MARGIN, far_y),
            Corner::TopRight => Position::new(far_x, CORNER_MARGIN),
            Corner::TopLeft => Position::new(CORNER_MARGIN, CORNER_MARGIN),
        };
        backtop_core::geometry::clamp_into(raw, Size::square(diameter), viewport)
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Corner {
    type Err = backtop_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "bottom-right" => Ok(Corner::BottomRight),
            "bottom-left" => Ok(Corner::BottomLeft),
            "top-right" => Ok(Corner::TopRight),
            "top-left" => Ok(Corner::TopLeft),
            _ => Err(backtop_core::Error::InvalidOption {
                option: "default_position",
                value: s.to_string(),
            }),
        }
    }
}

impl From<String> for Corner {
    fn from(name: String) -> Self {
        Corner::from_name(&name)
    }
}

impl From<Corner> for String {
    fn from(corner: Corner) -> Self {
        corner.as_str().to_string()
    }
}

/// Floating button configuration
pub struct FloatingButtonConfig {
    pub content: Content,
    /// Extra class names appended after the built-in ones
    pub class_name: String,
    /// Style overrides applied after everything else
    pub style: StyleOverrides,
    /// Controlled position; when set, drag and resize never move the control
    pub position: Option<Position>,
    pub default_position: Corner,
    pub draggable: bool,
    pub disabled: bool,
    pub size: ButtonSize,
    pub color: Option<Color>,
    pub background_color: Option<Color>,
    pub border_radius: f32,
    pub box_shadow: Option<Shadow>,
    pub z_index: i32,
    pub on_click: Option<ClickHandler>,
    pub on_drag_start: Option<DragHandler>,
    pub on_drag_end: Option<DragHandler>,
}

impl Default for FloatingButtonConfig {
    fn default() -> Self {
        Self {
            content: Content::Empty,
            class_name: String::new(),
            style: StyleOverrides::default(),
            position: None,
            default_position: Corner::BottomRight,
            draggable: true,
            disabled: false,
            size: ButtonSize::Medium,
            color: None,
            background_color: None,
            border_radius: DEFAULT_BORDER_RADIUS,
            box_shadow: None,
            z_index: DEFAULT_Z_INDEX,
            on_click: None,
            on_drag_start: None,
            on_drag_end: None,
        }
    }
}

impl fmt::Debug for FloatingButtonConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatingButtonConfig")
            .field("content", &self.content)
            .field("class_name", &self.class_name)
            .field("position", &self.position)
            .field("default_position", &self.default_position)
            .field("draggable", &self.draggable)
            .field("disabled", &self.disabled)
            .field("size", &self.size)
            .field("on_click", &self.on_click.is_some())
            .finish_non_exhaustive()
    }
}

impl FloatingButtonConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn style(mut self, style: StyleOverrides) -> Self {
        self.style = style;
        self
    }

    /// Pin the control to a caller-owned position
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn default_position(mut self, corner: Corner) -> Self {
        self.default_position = corner;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn border_radius(mut self, radius: f32) -> Self {
        self.border_radius = radius;
        self
    }

    pub fn box_shadow(mut self, shadow: Shadow) -> Self {
        self.box_shadow = Some(shadow);
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn on_drag_start<F>(mut self, handler: F) -> Self
    where
        F: FnMut(Position) + Send + 'static,
    {
        self.on_drag_start = Some(Box::new(handler));
        self
    }

    pub fn on_drag_end<F>(mut self, handler: F) -> Self
    where
        F: FnMut(Position) + Send + 'static,
    {
        self.on_drag_end = Some(Box::new(handler));
        self
    }
}

/// Scroll-to-top configuration
///
/// Wraps a [`FloatingButtonConfig`]; every button option passes through.
#[derive(Debug)]
pub struct ScrollToTopConfig {
    pub button: FloatingButtonConfig,
    /// Vertical offset (px) the page must exceed before the control shows
    pub show_after: f32,
    /// Animate the scroll with the widget's own easing
    pub smooth: bool,
    pub duration_ms: u32,
    /// Host behavior for the non-animated path
    pub behavior: ScrollBehavior,
    pub easing: Easing,
}

impl Default for ScrollToTopConfig {
    fn default() -> Self {
        Self {
            button: FloatingButtonConfig::default(),
            show_after: 300.0,
            smooth: true,
            duration_ms: 500,
            behavior: ScrollBehavior::Smooth,
            easing: Easing::EaseInOutQuad,
        }
    }
}

impl ScrollToTopConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the wrapped button configuration
    pub fn button(mut self, button: FloatingButtonConfig) -> Self {
        self.button = button;
        self
    }

    pub fn show_after(mut self, px: f32) -> Self {
        self.show_after = px;
        self
    }

    pub fn smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn content(mut self, content: Content) -> Self {
        self.button.content = content;
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.button.class_name = class_name.into();
        self
    }

    pub fn style(mut self, style: StyleOverrides) -> Self {
        self.button.style = style;
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.button.position = Some(position);
        self
    }

    pub fn default_position(mut self, corner: Corner) -> Self {
        self.button.default_position = corner;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.button.draggable = draggable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.button.disabled = disabled;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.button.size = size;
        self
    }

    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.button.on_click = Some(Box::new(handler));
        self
    }

    pub fn on_drag_start<F>(mut self, handler: F) -> Self
    where
        F: FnMut(Position) + Send + 'static,
    {
        self.button.on_drag_start = Some(Box::new(handler));
        self
    }

    pub fn on_drag_end<F>(mut self, handler: F) -> Self
    where
        F: FnMut(Position) + Send + 'static,
    {
        self.button.on_drag_end = Some(Box::new(handler));
        self
    }
}

//! Style resolution for the rendered control
//!
//! The theme (class list) supplies the look; [`ResolvedStyle`] only carries
//! geometry and the properties a caller explicitly overrode.

use backtop_core::{Color, Rect, Shadow};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// Whether the control receives pointer input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEvents {
    #[default]
    Auto,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    Default,
    Pointer,
    Grab,
    Grabbing,
    NotAllowed,
}

/// Caller-supplied style properties; `None` leaves the property alone
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    pub color: Option<Color>,
    pub background_color: Option<Color>,
    pub border_radius: Option<f32>,
    pub box_shadow: Option<Shadow>,
    pub z_index: Option<i32>,
    pub opacity: Option<f32>,
    pub visibility: Option<Visibility>,
    pub pointer_events: Option<PointerEvents>,
    pub cursor: Option<Cursor>,
}

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
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
        self.border_radius = Some(radius);
        self
    }

    pub fn box_shadow(mut self, shadow: Shadow) -> Self {
        self.box_shadow = Some(shadow);
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn pointer_events(mut self, pointer_events: PointerEvents) -> Self {
        self.pointer_events = Some(pointer_events);
        self
    }

    pub fn cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Final style of the control for one render
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedStyle {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub color: Option<Color>,
    pub background_color: Option<Color>,
    /// `None` keeps the theme's circular radius
    pub border_radius: Option<f32>,
    pub box_shadow: Option<Shadow>,
    /// `None` keeps the theme's stacking order
    pub z_index: Option<i32>,
    pub opacity: f32,
    pub visibility: Visibility,
    pub pointer_events: PointerEvents,
    pub cursor: Option<Cursor>,
}

impl ResolvedStyle {
    /// Geometry-only style for a control occupying `rect`
    pub fn at(rect: Rect) -> Self {
        Self {
            left: rect.x(),
            top: rect.y(),
            width: rect.width(),
            height: rect.height(),
            color: None,
            background_color: None,
            border_radius: None,
            box_shadow: None,
            z_index: None,
            opacity: 1.0,
            visibility: Visibility::Visible,
            pointer_events: PointerEvents::Auto,
            cursor: None,
        }
    }

    /// Apply every property `overrides` sets
    pub fn apply(&mut self, overrides: &StyleOverrides) {
        if let Some(color) = overrides.color {
            self.color = Some(color);
        }
        if let Some(color) = overrides.background_color {
            self.background_color = Some(color);
        }
        if let Some(radius) = overrides.border_radius {
            self.border_radius = Some(radius);
        }
        if let Some(shadow) = overrides.box_shadow {
            self.box_shadow = Some(shadow);
        }
        if let Some(z_index) = overrides.z_index {
            self.z_index = Some(z_index);
        }
        if let Some(opacity) = overrides.opacity {
            self.opacity = opacity;
        }
        if let Some(visibility) = overrides.visibility {
            self.visibility = visibility;
        }
        if let Some(pointer_events) = overrides.pointer_events {
            self.pointer_events = pointer_events;
        }
        if let Some(cursor) = overrides.cursor {
            self.cursor = Some(cursor);
        }
    }

    pub fn with(mut self, overrides: &StyleOverrides) -> Self {
        self.apply(overrides);
        self
    }
}

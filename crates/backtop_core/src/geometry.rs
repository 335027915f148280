//! Screen-space geometry
//!
//! All coordinates are logical pixels with the origin at the viewport's
//! top-left corner.

use serde::{Deserialize, Serialize};

/// 2D position (top-left anchored)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`
    pub fn offset_from(self, other: Position) -> Position {
        Position::new(self.x - other.x, self.y - other.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Square size, used for circular controls
    pub const fn square(side: f32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

/// Axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Position,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Position::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_origin_size(origin: Position, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.size.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.size.height
    }
}

/// Clamp `value` into `[0, max]`, collapsing to 0 when `max` is negative.
///
/// `f32::clamp` panics when `min > max`, which happens whenever the
/// viewport is smaller than the control.
pub fn clamp_to_extent(value: f32, max: f32) -> f32 {
    value.min(max).max(0.0)
}

/// Clamp a top-left position so a box of `extent` stays inside `viewport`
pub fn clamp_into(position: Position, extent: Size, viewport: Size) -> Position {
    Position::new(
        clamp_to_extent(position.x, viewport.width - extent.width),
        clamp_to_extent(position.y, viewport.height - extent.height),
    )
}

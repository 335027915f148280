//! Event model
//!
//! Everything a host surface delivers to a widget: pointer input, scroll and
//! resize notifications, animation frames and expired timers.

use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::new_key_type;

use crate::geometry::{Position, Size};

/// Event type identifier
pub type EventType = u32;

/// Event types understood by the widgets
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// Click synthesized by the host after a press/release on the control
    pub const CLICK: EventType = 8;
    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;
    /// A frame previously requested with `request_frame`
    pub const ANIMATION_FRAME: EventType = 50;
    /// A timeout previously armed with `set_timeout`
    pub const TIMER: EventType = 51;
}

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a mounted widget
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate a fresh, process-unique id
    pub fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

new_key_type! {
    /// Handle to a global listener registered with the host
    pub struct ListenerId;
    /// Handle to a pending animation frame request
    pub struct FrameId;
    /// Handle to a pending timeout
    pub struct TimerId;
}

/// Who an event is addressed to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventTarget {
    /// The widget's own element (hit-tested pointer events, clicks)
    Widget(WidgetId),
    /// Window-level delivery through a global listener
    Window,
}

/// A UI event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub target: EventTarget,
    pub data: EventData,
    /// Host clock in milliseconds
    pub timestamp: f64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        /// Client coordinates
        x: f32,
        y: f32,
        button: u8,
    },
    Scroll {
        offset_x: f32,
        offset_y: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    Frame {
        id: FrameId,
    },
    Timer {
        id: TimerId,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: EventTarget, data: EventData, timestamp: f64) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp,
        }
    }

    /// Pointer position, if this is a pointer event
    pub fn pointer_position(&self) -> Option<Position> {
        match self.data {
            EventData::Pointer { x, y, .. } => Some(Position::new(x, y)),
            _ => None,
        }
    }

    /// Vertical scroll offset carried by a scroll event
    pub fn scroll_offset_y(&self) -> Option<f32> {
        match self.data {
            EventData::Scroll { offset_y, .. } => Some(offset_y),
            _ => None,
        }
    }

    /// New viewport size carried by a resize event
    pub fn viewport_size(&self) -> Option<Size> {
        match self.data {
            EventData::Resize { width, height } => Some(Size::new(width, height)),
            _ => None,
        }
    }

    /// Whether the event was addressed to the given widget's element
    pub fn targets(&self, widget: WidgetId) -> bool {
        self.target == EventTarget::Widget(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_ids_are_unique() {
        let a = WidgetId::next();
        let b = WidgetId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_pointer_accessors() {
        let id = WidgetId::next();
        let event = Event::new(
            event_types::POINTER_DOWN,
            EventTarget::Widget(id),
            EventData::Pointer {
                x: 12.0,
                y: 34.0,
                button: 0,
            },
            0.0,
        );
        assert_eq!(event.pointer_position(), Some(Position::new(12.0, 34.0)));
        assert_eq!(event.scroll_offset_y(), None);
        assert!(event.targets(id));
        assert!(!event.targets(WidgetId::next()));
    }

    #[test]
    fn test_resize_accessor() {
        let event = Event::new(
            event_types::RESIZE,
            EventTarget::Window,
            EventData::Resize {
                width: 1024.0,
                height: 768.0,
            },
            5.0,
        );
        assert_eq!(event.viewport_size(), Some(Size::new(1024.0, 768.0)));
        assert_eq!(event.pointer_position(), None);
    }
}

//! The host surface contract
//!
//! A host is whatever mounts a widget: it owns the viewport and the page
//! scroll offset, schedules frames and timeouts, and delivers events. Widgets
//! only ever talk to the outside world through [`HostSurface`].

use std::fmt;
use std::str::FromStr;

use backtop_core::{Event, FrameId, ListenerId, Position, Size, TimerId, WidgetId};
use serde::{Deserialize, Serialize};

use crate::selection::TextSelection;

/// Window-level events a widget can listen for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerMove,
    PointerUp,
    Scroll,
    Resize,
}

/// How a programmatic scroll should be carried out by the host
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    /// Jump immediately
    Auto,
    /// Let the host animate natively
    #[default]
    Smooth,
}

impl ScrollBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollBehavior::Auto => "auto",
            ScrollBehavior::Smooth => "smooth",
        }
    }
}

impl fmt::Display for ScrollBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScrollBehavior {
    type Err = backtop_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ScrollBehavior::Auto),
            "smooth" => Ok(ScrollBehavior::Smooth),
            other => Err(backtop_core::Error::InvalidOption {
                option: "behavior",
                value: other.to_string(),
            }),
        }
    }
}

/// An event routed to a specific widget
#[derive(Clone, Debug, PartialEq)]
pub struct Delivery {
    pub owner: WidgetId,
    pub event: Event,
}

/// Services a host provides to mounted widgets
pub trait HostSurface {
    /// Current viewport size, or `None` before the first layout
    fn viewport(&self) -> Option<Size>;

    /// Current page scroll offset
    fn scroll_offset(&self) -> Position;

    /// Scroll the page vertically to `top`
    fn scroll_to(&mut self, top: f32, behavior: ScrollBehavior);

    /// Host clock in milliseconds
    fn now(&self) -> f64;

    /// Ask for an `ANIMATION_FRAME` event on the next frame
    fn request_frame(&mut self, owner: WidgetId) -> FrameId;

    fn cancel_frame(&mut self, id: FrameId);

    /// Ask for a `TIMER` event after `delay_ms`
    fn set_timeout(&mut self, owner: WidgetId, delay_ms: u64) -> TimerId;

    fn clear_timeout(&mut self, id: TimerId);

    /// Start receiving window-level events of `kind`
    fn subscribe(&mut self, owner: WidgetId, kind: ListenerKind) -> ListenerId;

    fn unsubscribe(&mut self, id: ListenerId);

    /// Handle to the page-wide text-selection switch
    fn text_selection(&self) -> TextSelection;
}

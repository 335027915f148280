//! backtop core
//!
//! Foundation types shared by every backtop crate:
//!
//! - **Geometry**: positions, sizes and viewport clamping
//! - **Events**: the pointer/scroll/resize/frame/timer events a host delivers
//! - **State Machines**: flat FSMs for widget interaction states
//! - **Colors**: style values for the rendered control

pub mod color;
pub mod error;
pub mod events;
pub mod fsm;
pub mod geometry;

pub use color::{Color, Shadow};
pub use error::{Error, Result};
pub use events::{
    event_types, Event, EventData, EventTarget, EventType, FrameId, ListenerId, TimerId, WidgetId,
};
pub use fsm::{StateId, StateMachine, Transition};
pub use geometry::{Position, Rect, Size};

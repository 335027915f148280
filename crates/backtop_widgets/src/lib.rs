//! backtop widget library
//!
//! A floating, draggable button and the scroll-to-top control built on it.
//! Widgets are host-agnostic: they receive events through
//! [`Widget::handle_event`] and act on the page only through
//! [`backtop_platform::HostSurface`].

pub mod config;
pub mod content;
pub mod floating_button;
pub mod scroll_to_top;
pub mod style;
pub mod widget;

pub use config::{
    ButtonSize, ClickHandler, Corner, DragHandler, FloatingButtonConfig, ScrollToTopConfig,
};
pub use content::{Content, SvgIcon};
pub use floating_button::FloatingButton;
pub use scroll_to_top::ScrollToTop;
pub use style::{Cursor, PointerEvents, ResolvedStyle, StyleOverrides, Visibility};
pub use widget::{ControlSignal, ControlView, Signals, Widget};

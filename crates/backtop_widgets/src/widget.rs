//! Base widget trait and types

use backtop_core::{Event, Position, Rect, WidgetId};
use backtop_platform::HostSurface;
use smallvec::SmallVec;

use crate::content::Content;
use crate::style::ResolvedStyle;

/// What a widget reports back to its host after handling an event
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlSignal {
    /// A drag gesture began with the control at this top-left
    DragStarted(Position),
    /// A drag gesture ended; `moved` is true when the control actually moved
    DragEnded { position: Position, moved: bool },
    /// The control was activated
    Clicked,
}

pub type Signals = SmallVec<[ControlSignal; 2]>;

/// Everything a renderer needs to paint the control
#[derive(Clone, Debug, PartialEq)]
pub struct ControlView {
    pub rect: Rect,
    pub classes: Vec<String>,
    pub style: ResolvedStyle,
    pub content: Content,
    pub disabled: bool,
}

impl ControlView {
    /// Space-separated class attribute
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Base trait for all widgets
pub trait Widget {
    /// Get the widget's unique ID
    fn id(&self) -> WidgetId;

    /// Attach to a host: register listeners and compute initial state
    fn mount(&mut self, host: &mut dyn HostSurface);

    /// Release everything the widget holds on the host
    fn unmount(&mut self, host: &mut dyn HostSurface);

    /// Handle an event delivered by the host
    fn handle_event(&mut self, host: &mut dyn HostSurface, event: &Event) -> Signals;

    /// Whether `point` lands on the control
    fn hit_test(&self, point: Position) -> bool;

    /// Render the widget
    fn view(&self) -> ControlView;
}

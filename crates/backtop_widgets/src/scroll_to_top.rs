//! Scroll-to-top control
//!
//! Wraps a [`FloatingButton`] and adds:
//!
//! - Visibility driven by the page scroll offset (`HIDDEN`/`VISIBLE` FSM)
//! - Click-to-top, either animated frame by frame or delegated to the host
//! - A short window after a drag during which clicks are swallowed, so that
//!   releasing a dragged control does not also scroll the page

use backtop_animation::{Easing, RunToken, ScrollAnimator};
use backtop_core::events::event_types;
use backtop_core::fsm::{EventId, StateMachine};
use backtop_core::{Event, EventData, FrameId, ListenerId, Position, TimerId, WidgetId};
use backtop_platform::{HostSurface, ListenerKind, ScrollBehavior};
use smallvec::SmallVec;

use crate::config::{ClickHandler, DragHandler, ScrollToTopConfig};
use crate::content::Content;
use crate::floating_button::FloatingButton;
use crate::style::{Cursor, PointerEvents, StyleOverrides, Visibility};
use crate::widget::{ControlSignal, ControlView, Signals, Widget};

/// Visibility states
pub mod states {
    pub const HIDDEN: u32 = 0;
    pub const VISIBLE: u32 = 1;
}

const SCROLLED_PAST: EventId = 100;
const SCROLLED_ABOVE: EventId = 101;

/// How long clicks stay suppressed after a drag ends
pub const DRAG_CLICK_SUPPRESSION_MS: u64 = 300;

/// Stacking order of the scroll-to-top control
pub const SCROLL_TO_TOP_Z_INDEX: i32 = 9999;

pub const SCROLL_TO_TOP_CLASS: &str = "scroll-to-top-draggable";

fn visibility_machine() -> StateMachine {
    StateMachine::builder("scroll_to_top", states::HIDDEN)
        .on(states::HIDDEN, SCROLLED_PAST, states::VISIBLE)
        .on(states::VISIBLE, SCROLLED_ABOVE, states::HIDDEN)
        .build()
}

/// Floating control that scrolls the page back to the top
pub struct ScrollToTop {
    button: FloatingButton,
    show_after: f32,
    smooth: bool,
    duration_ms: u32,
    behavior: ScrollBehavior,
    easing: Easing,
    on_click: Option<ClickHandler>,
    on_drag_start: Option<DragHandler>,
    on_drag_end: Option<DragHandler>,
    class_name: String,
    style: StyleOverrides,
    visibility: StateMachine,
    scroll_listener: Option<ListenerId>,
    animator: ScrollAnimator,
    /// Outstanding frame requests and the run each belongs to
    pending_frames: SmallVec<[(FrameId, RunToken); 2]>,
    /// Clicks are swallowed while set
    drag_suppressed: bool,
    suppression_timer: Option<TimerId>,
}

impl ScrollToTop {
    pub fn new(config: ScrollToTopConfig) -> Self {
        let ScrollToTopConfig {
            mut button,
            show_after,
            smooth,
            duration_ms,
            behavior,
            easing,
        } = config;

        // The wrapper owns the caller's hooks; the inner button only signals.
        let on_click = button.on_click.take();
        let on_drag_start = button.on_drag_start.take();
        let on_drag_end = button.on_drag_end.take();

        let mut button = FloatingButton::with_id(WidgetId::next(), button);
        let class_name = button.take_class_name();
        let style = button.take_style();
        let content = button.config().content.clone().or(Content::default_chevron());
        button.set_content(content);

        Self {
            button,
            show_after,
            smooth,
            duration_ms,
            behavior,
            easing,
            on_click,
            on_drag_start,
            on_drag_end,
            class_name,
            style,
            visibility: visibility_machine(),
            scroll_listener: None,
            animator: ScrollAnimator::new(),
            pending_frames: SmallVec::new(),
            drag_suppressed: false,
            suppression_timer: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_in(states::VISIBLE)
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Whether a click right now would be swallowed
    pub fn is_click_suppressed(&self) -> bool {
        self.drag_suppressed || self.button.is_dragging()
    }

    pub fn position(&self) -> Position {
        self.button.position()
    }

    pub fn show_after(&self) -> f32 {
        self.show_after
    }

    pub fn button(&self) -> &FloatingButton {
        &self.button
    }

    /// Inner button, for updating position, size and flags between events
    pub fn button_mut(&mut self) -> &mut FloatingButton {
        &mut self.button
    }

    pub fn set_show_after(&mut self, host: &dyn HostSurface, px: f32) {
        self.show_after = px;
        self.update_visibility(host.scroll_offset().y);
    }

    fn update_visibility(&mut self, offset_y: f32) {
        let event = if offset_y > self.show_after {
            SCROLLED_PAST
        } else {
            SCROLLED_ABOVE
        };
        let prev_state = self.visibility.current_state();
        let new_state = self.visibility.send(event);
        if prev_state != new_state {
            tracing::debug!(
                widget = self.button.id().raw(),
                offset_y,
                visible = new_state == states::VISIBLE,
                "visibility changed"
            );
        }
    }

    fn scroll_to_top(&mut self, host: &mut dyn HostSurface) {
        if self.smooth && self.duration_ms > 0 {
            let start = host.scroll_offset().y;
            let token = self
                .animator
                .start(start, host.now(), self.duration_ms, self.easing);
            let frame = host.request_frame(self.button.id());
            self.pending_frames.push((frame, token));
        } else {
            tracing::debug!(behavior = %self.behavior, "scrolling to top");
            host.scroll_to(0.0, self.behavior);
        }
    }

    fn on_frame(&mut self, host: &mut dyn HostSurface, id: FrameId, now: f64) {
        let Some(index) = self.pending_frames.iter().position(|(frame, _)| *frame == id) else {
            return;
        };
        let (_, token) = self.pending_frames.remove(index);

        let Some(sample) = self.animator.sample(token, now) else {
            tracing::trace!(token = token.raw(), "stale frame ignored");
            return;
        };
        host.scroll_to(sample.offset, ScrollBehavior::Auto);
        if !sample.finished {
            let next = host.request_frame(self.button.id());
            self.pending_frames.push((next, token));
        }
    }

    fn on_timer(&mut self, id: TimerId) {
        if self.suppression_timer == Some(id) {
            self.suppression_timer = None;
            self.drag_suppressed = false;
            tracing::trace!(widget = self.button.id().raw(), "click suppression lifted");
        }
    }

    fn clear_suppression_timer(&mut self, host: &mut dyn HostSurface) {
        if let Some(id) = self.suppression_timer.take() {
            host.clear_timeout(id);
        }
    }

    fn on_signal(
        &mut self,
        host: &mut dyn HostSurface,
        signal: ControlSignal,
    ) -> Option<ControlSignal> {
        match signal {
            ControlSignal::DragStarted(position) => {
                self.clear_suppression_timer(host);
                self.drag_suppressed = true;
                if let Some(handler) = self.on_drag_start.as_mut() {
                    handler(position);
                }
                Some(signal)
            }
            ControlSignal::DragEnded { position, .. } => {
                // Every drag-end opens the window, including a press without movement.
                self.clear_suppression_timer(host);
                self.drag_suppressed = true;
                self.suppression_timer =
                    Some(host.set_timeout(self.button.id(), DRAG_CLICK_SUPPRESSION_MS));
                if let Some(handler) = self.on_drag_end.as_mut() {
                    handler(position);
                }
                Some(signal)
            }
            ControlSignal::Clicked => {
                if self.drag_suppressed {
                    tracing::debug!(widget = self.button.id().raw(), "click swallowed after drag");
                    return None;
                }
                self.scroll_to_top(host);
                if let Some(handler) = self.on_click.as_mut() {
                    handler();
                }
                Some(signal)
            }
        }
    }

    fn presentation(&self) -> StyleOverrides {
        let visible = self.is_visible();
        StyleOverrides::new()
            .cursor(Cursor::Pointer)
            .z_index(SCROLL_TO_TOP_Z_INDEX)
            .opacity(if visible { 1.0 } else { 0.0 })
            .visibility(if visible {
                Visibility::Visible
            } else {
                Visibility::Hidden
            })
            .pointer_events(if visible {
                PointerEvents::Auto
            } else {
                PointerEvents::None
            })
    }
}

impl Widget for ScrollToTop {
    fn id(&self) -> WidgetId {
        self.button.id()
    }

    fn mount(&mut self, host: &mut dyn HostSurface) {
        if self.button.is_mounted() {
            return;
        }
        self.button.mount(host);
        self.scroll_listener = Some(host.subscribe(self.id(), ListenerKind::Scroll));
        self.update_visibility(host.scroll_offset().y);
    }

    fn unmount(&mut self, host: &mut dyn HostSurface) {
        if !self.button.is_mounted() {
            return;
        }
        self.button.unmount(host);
        if let Some(id) = self.scroll_listener.take() {
            host.unsubscribe(id);
        }
        self.clear_suppression_timer(host);
        self.drag_suppressed = false;
        for (frame, _) in self.pending_frames.drain(..) {
            host.cancel_frame(frame);
        }
        if let Some(token) = self.animator.cancel() {
            tracing::debug!(token = token.raw(), "scroll run cancelled on unmount");
        }
    }

    fn handle_event(&mut self, host: &mut dyn HostSurface, event: &Event) -> Signals {
        match (event.event_type, &event.data) {
            (event_types::SCROLL, EventData::Scroll { offset_y, .. }) => {
                self.update_visibility(*offset_y);
                Signals::new()
            }
            (event_types::ANIMATION_FRAME, EventData::Frame { id }) => {
                self.on_frame(host, *id, event.timestamp);
                Signals::new()
            }
            (event_types::TIMER, EventData::Timer { id }) => {
                self.on_timer(*id);
                Signals::new()
            }
            _ => {
                let inner = self.button.handle_event(host, event);
                inner
                    .into_iter()
                    .filter_map(|signal| self.on_signal(host, signal))
                    .collect()
            }
        }
    }

    /// Hidden controls take no pointer input
    fn hit_test(&self, point: Position) -> bool {
        self.is_visible() && self.button.hit_test(point)
    }

    fn view(&self) -> ControlView {
        let mut view = self.button.view();
        view.classes.push(SCROLL_TO_TOP_CLASS.to_string());
        view.classes
            .extend(self.class_name.split_whitespace().map(str::to_string));
        view.style.apply(&self.presentation());
        view.style.apply(&self.style);
        view
    }
}

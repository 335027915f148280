//! Draggable floating button
//!
//! The control sits at a caller-controlled position or at a viewport corner
//! it manages itself. A pointer press on it starts a drag:
//!
//! - `IDLE --POINTER_DOWN--> DRAGGING`: window pointer-move/up listeners are
//!   registered and text selection is suppressed
//! - `DRAGGING --POINTER_UP--> IDLE`: both listeners are dropped and selection
//!   comes back
//!
//! Clicks are ignored while dragging or disabled.

use backtop_core::events::event_types;
use backtop_core::fsm::StateMachine;
use backtop_core::geometry::clamp_to_extent;
use backtop_core::{Event, ListenerId, Position, Rect, Size, WidgetId};
use backtop_platform::{HostSurface, ListenerKind, SelectionGuard};
use smallvec::SmallVec;

use crate::config::{ButtonSize, FloatingButtonConfig, DEFAULT_BORDER_RADIUS, DEFAULT_Z_INDEX};
use crate::content::Content;
use crate::style::{ResolvedStyle, StyleOverrides};
use crate::widget::{ControlSignal, ControlView, Signals, Widget};

/// Drag states
pub mod states {
    pub const IDLE: u32 = 0;
    pub const DRAGGING: u32 = 1;
}

/// Base class of the control
pub const BASE_CLASS: &str = "btn-float-draggable";

fn drag_machine() -> StateMachine {
    StateMachine::builder("floating_button", states::IDLE)
        .on(states::IDLE, event_types::POINTER_DOWN, states::DRAGGING)
        .on(states::DRAGGING, event_types::POINTER_UP, states::IDLE)
        .build()
}

/// A floating, optionally draggable button
pub struct FloatingButton {
    id: WidgetId,
    config: FloatingButtonConfig,
    fsm: StateMachine,
    /// Self-managed top-left; while dragging, the gesture position
    tracked: Position,
    /// Pointer position relative to the control's top-left at drag start
    drag_offset: Option<Position>,
    drag_origin: Position,
    viewport: Option<Size>,
    mounted: bool,
    resize_listener: Option<ListenerId>,
    pointer_listeners: SmallVec<[ListenerId; 2]>,
    selection: Option<SelectionGuard>,
}

impl FloatingButton {
    pub fn new(config: FloatingButtonConfig) -> Self {
        Self::with_id(WidgetId::next(), config)
    }

    pub(crate) fn with_id(id: WidgetId, config: FloatingButtonConfig) -> Self {
        Self {
            id,
            tracked: config.position.unwrap_or(Position::ZERO),
            config,
            fsm: drag_machine(),
            drag_offset: None,
            drag_origin: Position::ZERO,
            viewport: None,
            mounted: false,
            resize_listener: None,
            pointer_listeners: SmallVec::new(),
            selection: None,
        }
    }

    pub fn config(&self) -> &FloatingButtonConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.fsm.is_in(states::DRAGGING)
    }

    pub fn is_controlled(&self) -> bool {
        self.config.position.is_some()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Top-left the control is rendered at
    pub fn position(&self) -> Position {
        self.config.position.unwrap_or(self.tracked)
    }

    /// Position the current (or last) drag gesture reported
    pub fn gesture_position(&self) -> Position {
        self.tracked
    }

    pub fn diameter(&self) -> f32 {
        self.config.size.diameter()
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position(), self.config.size.extent())
    }

    pub fn drag_state(&self) -> u32 {
        self.fsm.current_state()
    }

    /// Switch between controlled (`Some`) and self-managed (`None`) placement
    pub fn set_position(&mut self, position: Option<Position>) {
        match (self.config.position, position) {
            (Some(previous), None) if !self.is_dragging() => self.tracked = previous,
            (_, Some(next)) if !self.is_dragging() => self.tracked = next,
            _ => {}
        }
        self.config.position = position;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
    }

    pub fn set_draggable(&mut self, draggable: bool) {
        self.config.draggable = draggable;
    }

    /// Change the diameter, keeping the control inside the viewport
    pub fn set_size(&mut self, size: ButtonSize) {
        self.config.size = size;
        if let Some(viewport) = self.viewport {
            self.tracked = backtop_core::geometry::clamp_into(self.tracked, size.extent(), viewport);
        }
    }

    pub(crate) fn set_content(&mut self, content: Content) {
        self.config.content = content;
    }

    pub(crate) fn take_style(&mut self) -> StyleOverrides {
        std::mem::take(&mut self.config.style)
    }

    pub(crate) fn take_class_name(&mut self) -> String {
        std::mem::take(&mut self.config.class_name)
    }

    /// Corner placement for the known viewport, `{0,0}` before measurement
    fn corner_position(&self) -> Position {
        match self.viewport {
            Some(viewport) => self.config.default_position.place(viewport, self.diameter()),
            None => Position::ZERO,
        }
    }

    fn on_resize(&mut self, viewport: Size) {
        self.viewport = Some(viewport);
        if self.is_controlled() || self.is_dragging() {
            return;
        }
        self.tracked = self.corner_position();
        tracing::debug!(
            widget = self.id.raw(),
            x = self.tracked.x,
            y = self.tracked.y,
            "repositioned after resize"
        );
    }

    fn on_pointer_down(&mut self, host: &mut dyn HostSurface, pointer: Position) -> Signals {
        let mut signals = Signals::new();
        if !self.config.draggable || self.config.disabled {
            return signals;
        }

        let prev_state = self.fsm.current_state();
        let new_state = self.fsm.send(event_types::POINTER_DOWN);
        if prev_state == new_state {
            return signals;
        }

        let origin = self.position();
        self.tracked = origin;
        self.drag_origin = origin;
        self.drag_offset = Some(pointer.offset_from(origin));

        self.pointer_listeners
            .push(host.subscribe(self.id, ListenerKind::PointerMove));
        self.pointer_listeners
            .push(host.subscribe(self.id, ListenerKind::PointerUp));
        self.selection = Some(host.text_selection().suppress());

        tracing::debug!(widget = self.id.raw(), x = origin.x, y = origin.y, "drag started");
        if let Some(handler) = self.config.on_drag_start.as_mut() {
            handler(origin);
        }
        signals.push(ControlSignal::DragStarted(origin));
        signals
    }

    fn on_pointer_move(&mut self, host: &dyn HostSurface, pointer: Position) {
        if !self.is_dragging() || !self.config.draggable || self.config.disabled {
            return;
        }
        let Some(offset) = self.drag_offset else {
            return;
        };

        // Nothing to clamp against before the first measurement; stay put.
        let Some(viewport) = host.viewport().or(self.viewport) else {
            tracing::trace!(widget = self.id.raw(), "drag move before viewport is known");
            return;
        };

        let raw = pointer.offset_from(offset);
        let diameter = self.diameter();
        self.tracked = Position::new(
            clamp_to_extent(raw.x, viewport.width - diameter),
            clamp_to_extent(raw.y, viewport.height - diameter),
        );
        tracing::trace!(
            widget = self.id.raw(),
            x = self.tracked.x,
            y = self.tracked.y,
            "drag move"
        );
    }

    fn on_pointer_up(&mut self, host: &mut dyn HostSurface) -> Signals {
        let mut signals = Signals::new();
        let prev_state = self.fsm.current_state();
        let new_state = self.fsm.send(event_types::POINTER_UP);
        if prev_state == new_state {
            return signals;
        }

        self.release_drag(host);
        let position = self.tracked;
        let moved = position != self.drag_origin;

        tracing::debug!(widget = self.id.raw(), x = position.x, y = position.y, moved, "drag ended");
        if let Some(handler) = self.config.on_drag_end.as_mut() {
            handler(position);
        }
        signals.push(ControlSignal::DragEnded { position, moved });
        signals
    }

    fn on_click(&mut self) -> Signals {
        let mut signals = Signals::new();
        if self.is_dragging() || self.config.disabled {
            tracing::trace!(widget = self.id.raw(), "click ignored");
            return signals;
        }
        if let Some(handler) = self.config.on_click.as_mut() {
            handler();
        }
        signals.push(ControlSignal::Clicked);
        signals
    }

    fn release_drag(&mut self, host: &mut dyn HostSurface) {
        for id in self.pointer_listeners.drain(..) {
            host.unsubscribe(id);
        }
        self.drag_offset = None;
        self.selection = None;
    }

    fn classes(&self) -> Vec<String> {
        let mut classes = vec![
            BASE_CLASS.to_string(),
            format!("{}--{}", BASE_CLASS, self.config.size),
        ];
        if self.is_dragging() {
            classes.push(format!("{}--dragging", BASE_CLASS));
        }
        if self.config.disabled {
            classes.push(format!("{}--disabled", BASE_CLASS));
        }
        classes.extend(self.config.class_name.split_whitespace().map(str::to_string));
        classes
    }

    fn resolved_style(&self, rect: Rect) -> ResolvedStyle {
        let mut style = ResolvedStyle::at(rect);
        style.background_color = self.config.background_color;
        style.color = self.config.color;
        if self.config.border_radius != DEFAULT_BORDER_RADIUS {
            style.border_radius = Some(self.config.border_radius);
        }
        style.box_shadow = self.config.box_shadow;
        if self.config.z_index != DEFAULT_Z_INDEX {
            style.z_index = Some(self.config.z_index);
        }
        style.with(&self.config.style)
    }
}

impl Widget for FloatingButton {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn mount(&mut self, host: &mut dyn HostSurface) {
        if self.mounted {
            tracing::debug!(widget = self.id.raw(), "already mounted");
            return;
        }
        self.mounted = true;
        self.viewport = host.viewport();
        self.resize_listener = Some(host.subscribe(self.id, ListenerKind::Resize));
        if !self.is_controlled() {
            self.tracked = self.corner_position();
        }
        tracing::debug!(
            widget = self.id.raw(),
            corner = %self.config.default_position,
            controlled = self.is_controlled(),
            "floating button mounted"
        );
    }

    fn unmount(&mut self, host: &mut dyn HostSurface) {
        if !self.mounted {
            return;
        }
        if self.is_dragging() {
            self.fsm.send(event_types::POINTER_UP);
        }
        self.release_drag(host);
        if let Some(id) = self.resize_listener.take() {
            host.unsubscribe(id);
        }
        self.mounted = false;
        tracing::debug!(widget = self.id.raw(), "floating button unmounted");
    }

    fn handle_event(&mut self, host: &mut dyn HostSurface, event: &Event) -> Signals {
        match event.event_type {
            event_types::POINTER_DOWN if event.targets(self.id) => match event.pointer_position() {
                Some(pointer) => self.on_pointer_down(host, pointer),
                None => Signals::new(),
            },
            event_types::POINTER_MOVE => {
                if let Some(pointer) = event.pointer_position() {
                    self.on_pointer_move(host, pointer);
                }
                Signals::new()
            }
            event_types::POINTER_UP => self.on_pointer_up(host),
            event_types::CLICK if event.targets(self.id) => self.on_click(),
            event_types::RESIZE => {
                if let Some(viewport) = event.viewport_size() {
                    self.on_resize(viewport);
                }
                Signals::new()
            }
            _ => Signals::new(),
        }
    }

    fn hit_test(&self, point: Position) -> bool {
        self.rect().contains(point)
    }

    fn view(&self) -> ControlView {
        let rect = self.rect();
        ControlView {
            rect,
            classes: self.classes(),
            style: self.resolved_style(rect),
            content: self.config.content.clone(),
            disabled: self.config.disabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backtop_platform::HeadlessHost;
    use std::sync::{Arc, Mutex};

    fn host() -> HeadlessHost {
        HeadlessHost::with_viewport(1024.0, 768.0, 3000.0).unwrap()
    }

    fn mounted(config: FloatingButtonConfig, host: &mut HeadlessHost) -> FloatingButton {
        let mut button = FloatingButton::new(config);
        button.mount(host);
        button
    }

    fn dispatch(
        button: &mut FloatingButton,
        host: &mut HeadlessHost,
        deliveries: Vec<backtop_platform::Delivery>,
    ) -> Signals {
        let mut signals = Signals::new();
        for delivery in deliveries {
            if delivery.owner == button.id() {
                signals.extend(button.handle_event(host, &delivery.event));
            }
        }
        signals
    }

    #[test]
    fn test_mount_places_in_corner() {
        let mut host = host();
        let button = mounted(FloatingButtonConfig::new(), &mut host);
        assert_eq!(button.position(), Position::new(954.0, 698.0));
        assert!(host.has_listener(button.id(), ListenerKind::Resize));
    }

    #[test]
    fn test_mount_without_viewport_uses_origin() {
        let mut host = HeadlessHost::new();
        let mut button = mounted(FloatingButtonConfig::new(), &mut host);
        assert_eq!(button.position(), Position::ZERO);

        let deliveries = host.set_viewport(800.0, 600.0).unwrap();
        dispatch(&mut button, &mut host, deliveries);
        assert_eq!(button.position(), Position::new(730.0, 530.0));
    }

    #[test]
    fn test_drag_before_measurement_stays_at_origin() {
        let mut host = HeadlessHost::new();
        let mut button = mounted(FloatingButtonConfig::new(), &mut host);
        let id = button.id();

        let down = host.pointer_down(Position::new(10.0, 10.0), id);
        dispatch(&mut button, &mut host, down);
        assert!(button.is_dragging());

        let moved = host.pointer_move(Position::new(5000.0, 4000.0));
        dispatch(&mut button, &mut host, moved);
        assert_eq!(button.position(), Position::ZERO);

        let up = host.pointer_up(Position::new(5000.0, 4000.0));
        let signals = dispatch(&mut button, &mut host, up);
        assert_eq!(
            signals.as_slice(),
            &[ControlSignal::DragEnded {
                position: Position::ZERO,
                moved: false
            }]
        );
    }

    #[test]
    fn test_drag_moves_and_clamps() {
        let mut host = host();
        let mut button = mounted(FloatingButtonConfig::new().size(ButtonSize::Small), &mut host);
        let id = button.id();

        let down = host.pointer_down(Position::new(974.0, 718.0), id);
        let signals = dispatch(&mut button, &mut host, down);
        assert_eq!(
            signals.as_slice(),
            &[ControlSignal::DragStarted(Position::new(964.0, 708.0))]
        );
        assert!(button.is_dragging());
        assert!(host.text_selection().is_suppressed());

        let moved = host.pointer_move(Position::new(110.0, 60.0));
        dispatch(&mut button, &mut host, moved);
        assert_eq!(button.position(), Position::new(100.0, 50.0));

        let moved = host.pointer_move(Position::new(5000.0, -300.0));
        dispatch(&mut button, &mut host, moved);
        assert_eq!(button.position(), Position::new(1024.0 - 40.0, 0.0));

        let up = host.pointer_up(Position::new(5000.0, -300.0));
        let signals = dispatch(&mut button, &mut host, up);
        assert_eq!(
            signals.as_slice(),
            &[ControlSignal::DragEnded {
                position: Position::new(984.0, 0.0),
                moved: true
            }]
        );
        assert!(!button.is_dragging());
        assert!(!host.text_selection().is_suppressed());
        assert!(!host.has_listener(id, ListenerKind::PointerMove));
        assert!(!host.has_listener(id, ListenerKind::PointerUp));
    }

    #[test]
    fn test_not_draggable_ignores_press() {
        let mut host = host();
        let mut button = mounted(FloatingButtonConfig::new().draggable(false), &mut host);
        let id = button.id();
        let down = host.pointer_down(Position::new(960.0, 700.0), id);
        assert!(dispatch(&mut button, &mut host, down).is_empty());
        assert!(!button.is_dragging());
        assert_eq!(host.listener_count(), 1);
    }

    #[test]
    fn test_disabled_ignores_press_and_click() {
        let clicks = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&clicks);
        let mut host = host();
        let mut button = mounted(
            FloatingButtonConfig::new()
                .disabled(true)
                .on_click(move || *counter.lock().unwrap() += 1),
            &mut host,
        );
        let id = button.id();

        let down = host.pointer_down(Position::new(960.0, 700.0), id);
        dispatch(&mut button, &mut host, down);
        let click = host.click(Position::new(960.0, 700.0), id);
        dispatch(&mut button, &mut host, click);

        assert!(!button.is_dragging());
        assert_eq!(*clicks.lock().unwrap(), 0);
        assert!(button.view().has_class("btn-float-draggable--disabled"));
    }

    #[test]
    fn test_click_fires_once() {
        let clicks = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&clicks);
        let mut host = host();
        let mut button = mounted(
            FloatingButtonConfig::new().on_click(move || *counter.lock().unwrap() += 1),
            &mut host,
        );
        let click = host.click(Position::new(960.0, 700.0), button.id());
        let signals = dispatch(&mut button, &mut host, click);
        assert_eq!(signals.as_slice(), &[ControlSignal::Clicked]);
        assert_eq!(*clicks.lock().unwrap(), 1);
    }

    #[test]
    fn test_click_while_dragging_is_ignored() {
        let mut host = host();
        let mut button = mounted(FloatingButtonConfig::new(), &mut host);
        let id = button.id();
        let down = host.pointer_down(Position::new(960.0, 700.0), id);
        dispatch(&mut button, &mut host, down);
        let click = host.click(Position::new(960.0, 700.0), id);
        assert!(dispatch(&mut button, &mut host, click).is_empty());
    }

    #[test]
    fn test_controlled_position_is_authoritative() {
        let positions = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&positions);
        let mut host = host();
        let mut button = mounted(
            FloatingButtonConfig::new()
                .position(Position::new(100.0, 100.0))
                .on_drag_end(move |p| sink.lock().unwrap().push(p)),
            &mut host,
        );
        let id = button.id();

        let deliveries = host.set_viewport(500.0, 500.0).unwrap();
        dispatch(&mut button, &mut host, deliveries);
        assert_eq!(button.position(), Position::new(100.0, 100.0));

        let down = host.pointer_down(Position::new(110.0, 110.0), id);
        dispatch(&mut button, &mut host, down);
        let moved = host.pointer_move(Position::new(210.0, 160.0));
        dispatch(&mut button, &mut host, moved);
        let up = host.pointer_up(Position::new(210.0, 160.0));
        dispatch(&mut button, &mut host, up);

        assert_eq!(button.position(), Position::new(100.0, 100.0));
        assert_eq!(positions.lock().unwrap().as_slice(), &[Position::new(200.0, 150.0)]);
    }

    #[test]
    fn test_resize_during_drag_keeps_gesture_position() {
        let mut host = host();
        let mut button = mounted(FloatingButtonConfig::new(), &mut host);
        let id = button.id();
        let down = host.pointer_down(Position::new(960.0, 700.0), id);
        dispatch(&mut button, &mut host, down);

        let deliveries = host.set_viewport(1280.0, 900.0).unwrap();
        dispatch(&mut button, &mut host, deliveries);
        assert_eq!(button.position(), Position::new(954.0, 698.0));
    }

    #[test]
    fn test_view_classes_and_style() {
        let mut host = host();
        let button = mounted(
            FloatingButtonConfig::new()
                .size(ButtonSize::Large)
                .class_name("extra  more")
                .border_radius(12.0)
                .z_index(1000)
                .style(StyleOverrides::new().opacity(0.5)),
            &mut host,
        );
        let view = button.view();
        assert_eq!(
            view.class_attr(),
            "btn-float-draggable btn-float-draggable--large extra more"
        );
        assert_eq!(view.style.border_radius, Some(12.0));
        assert_eq!(view.style.z_index, None);
        assert_eq!(view.style.opacity, 0.5);
        assert_eq!((view.style.width, view.style.height), (60.0, 60.0));
    }

    #[test]
    fn test_unmount_mid_drag_releases_everything() {
        let mut host = host();
        let mut button = mounted(FloatingButtonConfig::new(), &mut host);
        let id = button.id();
        let down = host.pointer_down(Position::new(960.0, 700.0), id);
        dispatch(&mut button, &mut host, down);
        assert_eq!(host.listener_count(), 3);

        button.unmount(&mut host);
        assert_eq!(host.listener_count(), 0);
        assert!(!host.text_selection().is_suppressed());
        assert!(!button.is_dragging());
    }

    #[test]
    fn test_hit_test_uses_rendered_box() {
        let mut host = host();
        let button = mounted(FloatingButtonConfig::new(), &mut host);
        assert!(button.hit_test(Position::new(954.0, 698.0)));
        assert!(button.hit_test(Position::new(1004.0, 748.0)));
        assert!(!button.hit_test(Position::new(950.0, 700.0)));
    }
}

//! Deterministic headless host
//!
//! Simulates a browser-like window: a viewport over a taller document, a
//! virtual millisecond clock, window listeners, frame requests and timeouts.
//! Input methods return the [`Delivery`] list the caller should hand to the
//! owning widgets; nothing is dispatched behind the caller's back.

use backtop_core::{
    event_types, Event, EventData, EventTarget, EventType, FrameId, ListenerId, Position, Size,
    TimerId, WidgetId,
};
use slotmap::SlotMap;

use crate::error::{PlatformError, Result};
use crate::host::{Delivery, HostSurface, ListenerKind, ScrollBehavior};
use crate::selection::TextSelection;

/// A registered window listener
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Listener {
    pub owner: WidgetId,
    pub kind: ListenerKind,
}

/// A programmatic scroll performed through [`HostSurface::scroll_to`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollWrite {
    pub top: f32,
    pub behavior: ScrollBehavior,
    /// Host clock when the write happened
    pub at: f64,
}

#[derive(Clone, Copy, Debug)]
struct PendingTimer {
    owner: WidgetId,
    due: f64,
    seq: u64,
}

/// Simulated window for tests and headless runs
#[derive(Debug)]
pub struct HeadlessHost {
    viewport: Option<Size>,
    document_height: f32,
    scroll: Position,
    /// A programmatic scroll happened since the last `advance`
    scroll_dirty: bool,
    clock: f64,
    listeners: SlotMap<ListenerId, Listener>,
    frames: SlotMap<FrameId, WidgetId>,
    frame_order: Vec<FrameId>,
    timers: SlotMap<TimerId, PendingTimer>,
    timer_seq: u64,
    selection: TextSelection,
    scroll_log: Vec<ScrollWrite>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    /// A host that has not been laid out yet (no viewport)
    pub fn new() -> Self {
        Self {
            viewport: None,
            document_height: 0.0,
            scroll: Position::ZERO,
            scroll_dirty: false,
            clock: 0.0,
            listeners: SlotMap::with_key(),
            frames: SlotMap::with_key(),
            frame_order: Vec::new(),
            timers: SlotMap::with_key(),
            timer_seq: 0,
            selection: TextSelection::new(),
            scroll_log: Vec::new(),
        }
    }

    /// A host with the given viewport and a document of `document_height`
    pub fn with_viewport(width: f32, height: f32, document_height: f32) -> Result<Self> {
        validate_viewport(width, height)?;
        let mut host = Self::new();
        host.viewport = Some(Size::new(width, height));
        host.document_height = document_height.max(height);
        Ok(host)
    }

    /// Resize the viewport, notifying resize listeners
    pub fn set_viewport(&mut self, width: f32, height: f32) -> Result<Vec<Delivery>> {
        validate_viewport(width, height)?;
        self.viewport = Some(Size::new(width, height));
        self.document_height = self.document_height.max(height);
        self.scroll.y = self.clamp_scroll(self.scroll.y);

        tracing::debug!(width, height, "viewport resized");
        Ok(self.broadcast(
            ListenerKind::Resize,
            event_types::RESIZE,
            EventData::Resize { width, height },
        ))
    }

    pub fn set_document_height(&mut self, height: f32) {
        let viewport_height = self.viewport.map_or(0.0, |v| v.height);
        self.document_height = height.max(viewport_height);
        self.scroll.y = self.clamp_scroll(self.scroll.y);
    }

    /// The user scrolled the page to `top`
    pub fn user_scroll(&mut self, top: f32) -> Result<Vec<Delivery>> {
        if !top.is_finite() {
            return Err(PlatformError::InvalidScrollOffset(top));
        }
        self.scroll.y = self.clamp_scroll(top);
        self.scroll_dirty = false;
        Ok(self.scroll_notifications())
    }

    /// Pointer pressed on a widget's element
    pub fn pointer_down(&mut self, position: Position, target: WidgetId) -> Vec<Delivery> {
        vec![self.targeted(event_types::POINTER_DOWN, position, target)]
    }

    /// Click synthesized on a widget's element
    pub fn click(&mut self, position: Position, target: WidgetId) -> Vec<Delivery> {
        vec![self.targeted(event_types::CLICK, position, target)]
    }

    /// Pointer moved anywhere in the window
    pub fn pointer_move(&mut self, position: Position) -> Vec<Delivery> {
        self.broadcast(
            ListenerKind::PointerMove,
            event_types::POINTER_MOVE,
            pointer_data(position),
        )
    }

    /// Pointer released anywhere in the window
    pub fn pointer_up(&mut self, position: Position) -> Vec<Delivery> {
        self.broadcast(
            ListenerKind::PointerUp,
            event_types::POINTER_UP,
            pointer_data(position),
        )
    }

    /// Advance the clock by `ms`.
    ///
    /// Returns expired timers in due order, then scroll notifications for
    /// programmatic scrolls, then one frame event per frame requested before
    /// this call.
    pub fn advance(&mut self, ms: f64) -> Vec<Delivery> {
        self.clock += ms.max(0.0);
        let mut deliveries = Vec::new();

        let mut due: Vec<(TimerId, PendingTimer)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= self.clock)
            .map(|(id, timer)| (id, *timer))
            .collect();
        due.sort_by(|a, b| a.1.due.total_cmp(&b.1.due).then(a.1.seq.cmp(&b.1.seq)));
        for (id, timer) in due {
            self.timers.remove(id);
            deliveries.push(Delivery {
                owner: timer.owner,
                event: Event::new(
                    event_types::TIMER,
                    EventTarget::Window,
                    EventData::Timer { id },
                    self.clock,
                ),
            });
        }

        if std::mem::take(&mut self.scroll_dirty) {
            deliveries.extend(self.scroll_notifications());
        }

        for id in std::mem::take(&mut self.frame_order) {
            if let Some(owner) = self.frames.remove(id) {
                deliveries.push(Delivery {
                    owner,
                    event: Event::new(
                        event_types::ANIMATION_FRAME,
                        EventTarget::Window,
                        EventData::Frame { id },
                        self.clock,
                    ),
                });
            }
        }

        deliveries
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll.y
    }

    pub fn document_height(&self) -> f32 {
        self.document_height
    }

    /// Every programmatic scroll so far, oldest first
    pub fn scroll_log(&self) -> &[ScrollWrite] {
        &self.scroll_log
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listener(&self, owner: WidgetId, kind: ListenerKind) -> bool {
        self.listeners
            .values()
            .any(|l| l.owner == owner && l.kind == kind)
    }

    pub fn listener(&self, id: ListenerId) -> Result<Listener> {
        self.listeners
            .get(id)
            .copied()
            .ok_or(PlatformError::UnknownListener(id))
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether the host still holds anything on behalf of `owner`
    pub fn holds_resources_for(&self, owner: WidgetId) -> bool {
        self.listeners.values().any(|l| l.owner == owner)
            || self.frames.values().any(|o| *o == owner)
            || self.timers.values().any(|t| t.owner == owner)
    }

    fn clamp_scroll(&self, top: f32) -> f32 {
        let viewport_height = self.viewport.map_or(0.0, |v| v.height);
        let max = (self.document_height - viewport_height).max(0.0);
        top.min(max).max(0.0)
    }

    fn scroll_notifications(&self) -> Vec<Delivery> {
        self.broadcast(
            ListenerKind::Scroll,
            event_types::SCROLL,
            EventData::Scroll {
                offset_x: self.scroll.x,
                offset_y: self.scroll.y,
            },
        )
    }

    fn targeted(&self, event_type: EventType, position: Position, target: WidgetId) -> Delivery {
        Delivery {
            owner: target,
            event: Event::new(
                event_type,
                EventTarget::Widget(target),
                pointer_data(position),
                self.clock,
            ),
        }
    }

    fn broadcast(&self, kind: ListenerKind, event_type: EventType, data: EventData) -> Vec<Delivery> {
        self.listeners
            .values()
            .filter(|l| l.kind == kind)
            .map(|l| Delivery {
                owner: l.owner,
                event: Event::new(event_type, EventTarget::Window, data.clone(), self.clock),
            })
            .collect()
    }
}

impl HostSurface for HeadlessHost {
    fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    fn scroll_offset(&self) -> Position {
        self.scroll
    }

    fn scroll_to(&mut self, top: f32, behavior: ScrollBehavior) {
        self.scroll.y = self.clamp_scroll(top);
        self.scroll_dirty = true;
        self.scroll_log.push(ScrollWrite {
            top: self.scroll.y,
            behavior,
            at: self.clock,
        });
    }

    fn now(&self) -> f64 {
        self.clock
    }

    fn request_frame(&mut self, owner: WidgetId) -> FrameId {
        let id = self.frames.insert(owner);
        self.frame_order.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.frames.remove(id).is_none() {
            tracing::trace!("{}", PlatformError::UnknownFrame(id));
        }
    }

    fn set_timeout(&mut self, owner: WidgetId, delay_ms: u64) -> TimerId {
        self.timer_seq += 1;
        self.timers.insert(PendingTimer {
            owner,
            due: self.clock + delay_ms as f64,
            seq: self.timer_seq,
        })
    }

    fn clear_timeout(&mut self, id: TimerId) {
        if self.timers.remove(id).is_none() {
            tracing::trace!("{}", PlatformError::UnknownTimer(id));
        }
    }

    fn subscribe(&mut self, owner: WidgetId, kind: ListenerKind) -> ListenerId {
        tracing::trace!(owner = owner.raw(), ?kind, "subscribe");
        self.listeners.insert(Listener { owner, kind })
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        match self.listeners.remove(id) {
            Some(listener) => {
                tracing::trace!(owner = listener.owner.raw(), kind = ?listener.kind, "unsubscribe")
            }
            None => tracing::warn!("{}", PlatformError::UnknownListener(id)),
        }
    }

    fn text_selection(&self) -> TextSelection {
        self.selection.clone()
    }
}

fn pointer_data(position: Position) -> EventData {
    EventData::Pointer {
        x: position.x,
        y: position.y,
        button: 0,
    }
}

fn validate_viewport(width: f32, height: f32) -> Result<()> {
    if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
        Ok(())
    } else {
        Err(PlatformError::InvalidViewport { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> HeadlessHost {
        HeadlessHost::with_viewport(1024.0, 768.0, 4000.0).unwrap()
    }

    #[test]
    fn test_new_host_has_no_viewport() {
        let host = HeadlessHost::new();
        assert_eq!(host.viewport(), None);
        assert_eq!(host.scroll_offset(), Position::ZERO);
    }

    #[test]
    fn test_invalid_viewport_rejected() {
        assert!(HeadlessHost::with_viewport(-1.0, 100.0, 100.0).is_err());
        let mut host = host();
        assert!(host.set_viewport(f32::NAN, 10.0).is_err());
    }

    #[test]
    fn test_scroll_is_clamped_to_document() {
        let mut host = host();
        host.user_scroll(10_000.0).unwrap();
        assert_eq!(host.scroll_y(), 4000.0 - 768.0);
        host.user_scroll(-50.0).unwrap();
        assert_eq!(host.scroll_y(), 0.0);
    }

    #[test]
    fn test_scroll_notifies_only_subscribers() {
        let mut host = host();
        let a = WidgetId::next();
        let b = WidgetId::next();
        host.subscribe(a, ListenerKind::Scroll);
        host.subscribe(b, ListenerKind::Resize);

        let deliveries = host.user_scroll(500.0).unwrap();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].owner, a);
        assert_eq!(deliveries[0].event.scroll_offset_y(), Some(500.0));
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut host = host();
        let owner = WidgetId::next();
        let id = host.subscribe(owner, ListenerKind::PointerMove);
        assert_eq!(host.pointer_move(Position::new(1.0, 1.0)).len(), 1);

        host.unsubscribe(id);
        assert!(host.pointer_move(Position::new(1.0, 1.0)).is_empty());
        assert_eq!(host.listener(id), Err(PlatformError::UnknownListener(id)));
    }

    #[test]
    fn test_frames_fire_once_in_request_order() {
        let mut host = host();
        let a = WidgetId::next();
        let b = WidgetId::next();
        let fa = host.request_frame(a);
        let fb = host.request_frame(b);

        let deliveries = host.advance(16.0);
        assert_eq!(deliveries.len(), 2);
        assert_eq!(deliveries[0].event.data, EventData::Frame { id: fa });
        assert_eq!(deliveries[1].event.data, EventData::Frame { id: fb });
        assert_eq!(deliveries[0].event.timestamp, 16.0);

        assert!(host.advance(16.0).is_empty());
    }

    #[test]
    fn test_cancelled_frame_never_fires() {
        let mut host = host();
        let id = host.request_frame(WidgetId::next());
        host.cancel_frame(id);
        assert!(host.advance(16.0).is_empty());
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn test_timers_fire_when_due() {
        let mut host = host();
        let owner = WidgetId::next();
        let late = host.set_timeout(owner, 300);
        let early = host.set_timeout(owner, 100);

        assert!(host.advance(99.0).is_empty());
        let first = host.advance(1.0);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].event.data, EventData::Timer { id: early });

        let second = host.advance(500.0);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].event.data, EventData::Timer { id: late });
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn test_cleared_timer_never_fires() {
        let mut host = host();
        let id = host.set_timeout(WidgetId::next(), 10);
        host.clear_timeout(id);
        assert!(host.advance(50.0).is_empty());
    }

    #[test]
    fn test_programmatic_scroll_notifies_on_next_advance() {
        let mut host = host();
        let owner = WidgetId::next();
        host.subscribe(owner, ListenerKind::Scroll);
        host.user_scroll(900.0).unwrap();

        host.scroll_to(0.0, ScrollBehavior::Auto);
        assert_eq!(host.scroll_y(), 0.0);
        assert_eq!(host.scroll_log().len(), 1);
        assert_eq!(host.scroll_log()[0].behavior, ScrollBehavior::Auto);

        let deliveries = host.advance(0.0);
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].event.scroll_offset_y(), Some(0.0));
        assert!(host.advance(0.0).is_empty());
    }

    #[test]
    fn test_pointer_down_is_targeted() {
        let mut host = host();
        let owner = WidgetId::next();
        let deliveries = host.pointer_down(Position::new(5.0, 6.0), owner);
        assert_eq!(deliveries.len(), 1);
        assert!(deliveries[0].event.targets(owner));
    }

    #[test]
    fn test_holds_resources_for_owner() {
        let mut host = host();
        let owner = WidgetId::next();
        assert!(!host.holds_resources_for(owner));
        let timer = host.set_timeout(owner, 10);
        assert!(host.holds_resources_for(owner));
        host.clear_timeout(timer);
        assert!(!host.holds_resources_for(owner));
    }
}

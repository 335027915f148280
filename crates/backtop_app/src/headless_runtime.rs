//! Headless runtime: one scroll-to-top control mounted on a simulated window.

use anyhow::{bail, Result};
use backtop_core::Position;
use backtop_platform::{Delivery, HeadlessHost};
use backtop_widgets::{ControlSignal, ControlView, ScrollToTop, ScrollToTopConfig, Widget};

/// Configuration for deterministic headless execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Logical viewport width.
    pub width: f32,
    /// Logical viewport height.
    pub height: f32,
    /// Total scrollable document height.
    pub document_height: f32,
    /// Logical milliseconds between frames.
    pub frame_ms: u64,
    /// Upper bound on frames pumped by a single settle.
    pub max_frames: u32,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            document_height: 4000.0,
            frame_ms: 16,
            max_frames: 1000,
        }
    }
}

impl HeadlessRunConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            bail!("headless dimensions must be non-zero");
        }
        if !self.document_height.is_finite() || self.document_height < 0.0 {
            bail!("document height must be a non-negative number");
        }
        if self.frame_ms == 0 {
            bail!("headless frame_ms must be > 0");
        }
        if self.max_frames == 0 {
            bail!("headless max_frames must be > 0");
        }
        Ok(())
    }
}

/// Mounted widget plus the host it lives on.
pub struct HeadlessRuntime {
    cfg: HeadlessRunConfig,
    host: HeadlessHost,
    widget: ScrollToTop,
    clicks: u64,
    frames: u64,
}

impl HeadlessRuntime {
    /// Build the host and mount a control configured by `widget`.
    pub fn new(cfg: HeadlessRunConfig, widget: ScrollToTopConfig) -> Result<Self> {
        cfg.validate()?;
        let mut host = HeadlessHost::with_viewport(cfg.width, cfg.height, cfg.document_height)?;
        let mut widget = ScrollToTop::new(widget);
        widget.mount(&mut host);
        tracing::info!(
            width = cfg.width,
            height = cfg.height,
            document_height = cfg.document_height,
            "headless runtime started"
        );
        Ok(Self {
            cfg,
            host,
            widget,
            clicks: 0,
            frames: 0,
        })
    }

    pub fn config(&self) -> &HeadlessRunConfig {
        &self.cfg
    }

    pub fn host(&self) -> &HeadlessHost {
        &self.host
    }

    pub fn widget(&self) -> &ScrollToTop {
        &self.widget
    }

    /// Clicks that reached the control and were not swallowed.
    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    /// Animation frames delivered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn now(&self) -> f64 {
        backtop_platform::HostSurface::now(&self.host)
    }

    pub fn scroll_y(&self) -> f32 {
        self.host.scroll_y()
    }

    pub fn position(&self) -> Position {
        self.widget.position()
    }

    pub fn is_visible(&self) -> bool {
        self.widget.is_visible()
    }

    pub fn view(&self) -> ControlView {
        self.widget.view()
    }

    /// Center of the control, where a user would click.
    pub fn control_center(&self) -> Position {
        let rect = self.widget.button().rect();
        Position::new(
            rect.x() + rect.width() / 2.0,
            rect.y() + rect.height() / 2.0,
        )
    }

    pub fn scroll(&mut self, y: f32) -> Result<()> {
        let deliveries = self.host.user_scroll(y)?;
        self.dispatch(deliveries);
        Ok(())
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        let deliveries = self.host.set_viewport(width, height)?;
        self.dispatch(deliveries);
        Ok(())
    }

    /// Press at `point`; returns whether the control was hit.
    pub fn pointer_down(&mut self, point: Position) -> bool {
        if !self.widget.hit_test(point) {
            tracing::trace!(x = point.x, y = point.y, "pointer down missed the control");
            return false;
        }
        let deliveries = self.host.pointer_down(point, self.widget.id());
        self.dispatch(deliveries);
        true
    }

    pub fn pointer_move(&mut self, point: Position) {
        let deliveries = self.host.pointer_move(point);
        self.dispatch(deliveries);
    }

    pub fn pointer_up(&mut self, point: Position) {
        let deliveries = self.host.pointer_up(point);
        self.dispatch(deliveries);
    }

    /// Click at `point`; returns whether the control was hit.
    pub fn click_at(&mut self, point: Position) -> bool {
        if !self.widget.hit_test(point) {
            tracing::trace!(x = point.x, y = point.y, "click missed the control");
            return false;
        }
        let deliveries = self.host.click(point, self.widget.id());
        self.dispatch(deliveries);
        true
    }

    /// Click the center of the control.
    pub fn click_control(&mut self) -> bool {
        self.click_at(self.control_center())
    }

    /// Advance the clock, delivering timers, scroll notifications and frames.
    pub fn advance(&mut self, ms: u64) {
        let deliveries = self.host.advance(ms as f64);
        self.dispatch(deliveries);
    }

    /// Wait `ms`, stepping one frame interval at a time.
    pub fn wait(&mut self, ms: u64) {
        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(self.cfg.frame_ms);
            self.advance(step);
            remaining -= step;
        }
    }

    /// Pump frames every `frame_ms` until none are pending or `max` is hit.
    pub fn run_frames(&mut self, frame_ms: u64, max: u32) -> u32 {
        let mut pumped = 0;
        while self.host.pending_frames() > 0 && pumped < max {
            self.advance(frame_ms);
            pumped += 1;
        }
        // Flush the notification for the final write
        self.advance(0);
        if self.host.pending_frames() > 0 {
            tracing::warn!(max, "animation still running after frame budget");
        }
        pumped
    }

    /// Run the current animation to completion with the configured budget.
    pub fn settle(&mut self) -> u32 {
        self.run_frames(self.cfg.frame_ms, self.cfg.max_frames)
    }

    /// Unmount the control, leaving the host empty.
    pub fn shutdown(&mut self) {
        self.widget.unmount(&mut self.host);
        tracing::info!(clicks = self.clicks, frames = self.frames, "headless runtime stopped");
    }

    fn dispatch(&mut self, deliveries: Vec<Delivery>) {
        for delivery in deliveries {
            if delivery.owner != self.widget.id() {
                continue;
            }
            if delivery.event.event_type == backtop_core::event_types::ANIMATION_FRAME {
                self.frames += 1;
            }
            let signals = self.widget.handle_event(&mut self.host, &delivery.event);
            for signal in signals {
                match signal {
                    ControlSignal::Clicked => {
                        self.clicks += 1;
                        tracing::info!(scroll_y = self.host.scroll_y(), "scroll to top requested");
                    }
                    ControlSignal::DragStarted(p) => {
                        tracing::info!(x = p.x, y = p.y, "drag started")
                    }
                    ControlSignal::DragEnded { position, moved } => {
                        tracing::info!(x = position.x, y = position.y, moved, "drag ended")
                    }
                }
            }
        }
    }
}

//! Token-guarded scroll animation
//!
//! A [`ScrollAnimator`] holds at most one current [`ScrollRun`]. Every run is
//! named by a [`RunToken`]; starting a new run retires the previous token, and
//! sampling with a retired token yields nothing. Frame callbacks that were
//! scheduled for an older run therefore become no-ops instead of fighting the
//! new run over the scroll offset.

use crate::easing::Easing;

/// Generation number of an animation run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunToken(u64);

impl RunToken {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Immutable parameters of one scroll-to-origin run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRun {
    pub token: RunToken,
    /// Vertical offset when the run started
    pub start_offset: f32,
    /// Host clock (ms) when the run started
    pub start_time: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl ScrollRun {
    /// Normalized progress in `0.0..=1.0` at host time `now`
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now - self.start_time) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Scroll offset the run prescribes at host time `now`
    pub fn offset_at(&self, now: f64) -> f32 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            0.0
        } else {
            self.start_offset * (1.0 - self.easing.apply(progress))
        }
    }
}

/// One evaluated animation frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSample {
    pub offset: f32,
    pub progress: f32,
    pub finished: bool,
}

/// Single-slot scroll animator
#[derive(Debug, Default)]
pub struct ScrollAnimator {
    current: Option<ScrollRun>,
    next_token: u64,
}

impl ScrollAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run, retiring whatever run was current
    pub fn start(
        &mut self,
        start_offset: f32,
        start_time: f64,
        duration_ms: u32,
        easing: Easing,
    ) -> RunToken {
        self.next_token += 1;
        let token = RunToken(self.next_token);

        if let Some(previous) = self.current.take() {
            tracing::debug!(
                retired = previous.token.raw(),
                token = token.raw(),
                "scroll run superseded"
            );
        }

        self.current = Some(ScrollRun {
            token,
            start_offset,
            start_time,
            duration_ms: f64::from(duration_ms),
            easing,
        });
        tracing::debug!(token = token.raw(), start_offset, duration_ms, "scroll run started");

        token
    }

    pub fn current(&self) -> Option<&ScrollRun> {
        self.current.as_ref()
    }

    pub fn is_current(&self, token: RunToken) -> bool {
        self.current.is_some_and(|run| run.token == token)
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Evaluate the run named by `token` at host time `now`.
    ///
    /// Returns `None` when `token` is not the current run. The run is retired
    /// once a sample reaches full progress.
    pub fn sample(&mut self, token: RunToken, now: f64) -> Option<FrameSample> {
        let run = self.current.filter(|run| run.token == token)?;

        let progress = run.progress(now);
        let finished = progress >= 1.0;
        let sample = FrameSample {
            offset: run.offset_at(now),
            progress,
            finished,
        };
        tracing::trace!(token = token.raw(), progress, offset = sample.offset, "scroll frame");

        if finished {
            self.current = None;
            tracing::debug!(token = token.raw(), "scroll run finished");
        }

        Some(sample)
    }

    /// Retire the current run without finishing it
    pub fn cancel(&mut self) -> Option<RunToken> {
        self.current.take().map(|run| run.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_reaches_exact_zero() {
        let mut animator = ScrollAnimator::new();
        let token = animator.start(1200.0, 100.0, 500, Easing::EaseInOutQuad);

        let first = animator.sample(token, 116.0).unwrap();
        assert!(first.offset < 1200.0 && first.offset > 0.0);
        assert!(!first.finished);

        let last = animator.sample(token, 600.0).unwrap();
        assert!(last.finished);
        assert_eq!(last.offset, 0.0);
        assert!(!animator.is_running());
    }

    #[test]
    fn test_midpoint_is_half_of_start() {
        let mut animator = ScrollAnimator::new();
        let token = animator.start(800.0, 0.0, 500, Easing::EaseInOutQuad);
        let mid = animator.sample(token, 250.0).unwrap();
        assert_eq!(mid.progress, 0.5);
        assert_eq!(mid.offset, 400.0);
    }

    #[test]
    fn test_overshooting_time_clamps_to_finish() {
        let mut animator = ScrollAnimator::new();
        let token = animator.start(300.0, 0.0, 100, Easing::Linear);
        let sample = animator.sample(token, 10_000.0).unwrap();
        assert_eq!(sample.progress, 1.0);
        assert_eq!(sample.offset, 0.0);
    }

    #[test]
    fn test_frame_before_start_time_holds_start_offset() {
        let mut animator = ScrollAnimator::new();
        let token = animator.start(640.0, 50.0, 500, Easing::EaseInOutQuad);
        let sample = animator.sample(token, 40.0).unwrap();
        assert_eq!(sample.progress, 0.0);
        assert_eq!(sample.offset, 640.0);
    }

    #[test]
    fn test_new_run_retires_old_token() {
        let mut animator = ScrollAnimator::new();
        let first = animator.start(1000.0, 0.0, 500, Easing::EaseInOutQuad);
        let second = animator.start(700.0, 100.0, 500, Easing::EaseInOutQuad);

        assert_ne!(first, second);
        assert!(!animator.is_current(first));
        assert!(animator.is_current(second));
        assert_eq!(animator.sample(first, 200.0), None);
        assert!(animator.sample(second, 200.0).is_some());
    }

    #[test]
    fn test_cancel_retires_run() {
        let mut animator = ScrollAnimator::new();
        let token = animator.start(500.0, 0.0, 500, Easing::Linear);
        assert_eq!(animator.cancel(), Some(token));
        assert_eq!(animator.sample(token, 10.0), None);
        assert_eq!(animator.cancel(), None);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let run = ScrollRun {
            token: RunToken(1),
            start_offset: 900.0,
            start_time: 0.0,
            duration_ms: 0.0,
            easing: Easing::EaseInOutQuad,
        };
        assert_eq!(run.progress(0.0), 1.0);
        assert_eq!(run.offset_at(0.0), 0.0);
    }
}

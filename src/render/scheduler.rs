use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::foundation::error::{ViewerError, ViewerResult};

/// Per-frame scheduling abstraction, the equivalent of a host animation-frame callback.
///
/// `next_frame` resolves when the host is ready for the next frame and yields a monotonic
/// timestamp in milliseconds. Animation progress is computed from these timestamps, so the
/// number of frames in a run depends on the host cadence, not the other way round.
pub trait FrameScheduler {
    /// Wait for the next frame.
    fn next_frame(&mut self) -> impl Future<Output = f64>;
}

/// Frame cadence driven by a tokio interval at a fixed refresh rate.
///
/// Late frames are skipped rather than bunched, the way a display drops frames.
#[derive(Debug)]
pub struct IntervalScheduler {
    period: Duration,
    origin: Option<Instant>,
    interval: Option<Interval>,
}

impl IntervalScheduler {
    /// Scheduler ticking `refresh_hz` times per second.
    pub fn new(refresh_hz: u32) -> ViewerResult<Self> {
        if refresh_hz == 0 {
            return Err(ViewerError::validation("refresh rate must be > 0"));
        }
        Ok(Self {
            period: Duration::from_secs(1) / refresh_hz,
            origin: None,
            interval: None,
        })
    }

    /// Time between frames.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FrameScheduler for IntervalScheduler {
    async fn next_frame(&mut self) -> f64 {
        // The interval needs a runtime, so it is created on first use.
        let interval = self.interval.get_or_insert_with(|| {
            let mut i = tokio::time::interval(self.period);
            i.set_missed_tick_behavior(MissedTickBehavior::Skip);
            i
        });
        let at = interval.tick().await;
        let origin = *self.origin.get_or_insert(at);
        at.saturating_duration_since(origin).as_secs_f64() * 1000.0
    }
}

/// Deterministic clock advancing a fixed step per frame.
///
/// Each frame yields to the executor once so other tasks on the loop interleave with the
/// animation, but no real time passes. Used for offline export and tests.
#[derive(Clone, Debug)]
pub struct ManualScheduler {
    now_ms: f64,
    step_ms: f64,
    frames: u64,
}

impl ManualScheduler {
    /// Clock advancing `step_ms` per frame. The step must be finite and positive, otherwise
    /// progress would never reach the end of a run.
    pub fn new(step_ms: f64) -> ViewerResult<Self> {
        if !step_ms.is_finite() || step_ms <= 0.0 {
            return Err(ViewerError::validation(format!(
                "frame step must be finite and > 0, got {step_ms}"
            )));
        }
        Ok(Self {
            now_ms: 0.0,
            step_ms,
            frames: 0,
        })
    }

    /// Clock matching `fps` frames per second.
    pub fn with_fps(fps: u32) -> ViewerResult<Self> {
        if fps == 0 {
            return Err(ViewerError::validation("fps must be > 0"));
        }
        Self::new(1000.0 / f64::from(fps))
    }

    /// Frames handed out so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current clock value in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

impl FrameScheduler for ManualScheduler {
    async fn next_frame(&mut self) -> f64 {
        tokio::task::yield_now().await;
        let t = self.now_ms;
        self.now_ms += self.step_ms;
        self.frames += 1;
        t
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;

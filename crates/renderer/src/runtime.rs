use std::time::{Duration, Instant};

/// High-level behaviour requested by the caller.
///
/// The render policy decides whether frames should animate continuously or be
/// evaluated at a fixed timestamp.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPolicy {
    /// Run the render loop continuously, optionally clamping the frame rate.
    Animate {
        /// Optional requested frames-per-second cap.
        target_fps: Option<f32>,
    },
    /// Freeze the shader clock at a timestamp; the surface still repaints on
    /// damage and still reacts to gestures.
    Still {
        /// Timestamp to evaluate the shader at (seconds). Defaults to zero.
        time: Option<f32>,
    },
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Self::Animate { target_fps: None }
    }
}

/// Snapshot of the time state supplied to the shader uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    /// Elapsed wall-clock or simulated time in seconds.
    pub seconds: f32,
    /// Monotonic frame counter for the running session.
    pub frame_index: u64,
}

impl TimeSample {
    /// Creates a new time sample.
    pub fn new(seconds: f32, frame_index: u64) -> Self {
        Self {
            seconds,
            frame_index,
        }
    }
}

/// Abstraction over where time values originate from.
pub trait TimeSource: Send {
    /// Resets the source to its initial state.
    fn reset(&mut self);
    /// Produces a time sample for the next frame.
    fn sample(&mut self) -> TimeSample;
}

/// Time source backed by the system monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
    frame: u64,
}

impl SystemTimeSource {
    /// Creates a system time source initialised to `Instant::now()`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
            frame: 0,
        }
    }
}

impl TimeSource for SystemTimeSource {
    fn reset(&mut self) {
        self.origin = Instant::now();
        self.frame = 0;
    }

    fn sample(&mut self) -> TimeSample {
        let elapsed = self.origin.elapsed();
        let sample = TimeSample::new(elapsed.as_secs_f32(), self.frame);
        self.frame = self.frame.saturating_add(1);
        sample
    }
}

/// Time source that always reports a fixed timestamp.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    time: f32,
}

impl FixedTimeSource {
    /// Constructs a fixed time source that always returns the provided time.
    pub fn new(time: f32) -> Self {
        Self { time }
    }
}

impl TimeSource for FixedTimeSource {
    fn reset(&mut self) {}

    fn sample(&mut self) -> TimeSample {
        TimeSample::new(self.time, 0)
    }
}

/// Convenient alias for owning time sources behind trait objects.
pub type BoxedTimeSource = Box<dyn TimeSource + Send>;

/// Builds a time source suited to the requested render policy.
pub fn time_source_for_policy(policy: &RenderPolicy) -> BoxedTimeSource {
    match policy {
        RenderPolicy::Animate { .. } => Box::new(SystemTimeSource::new()),
        RenderPolicy::Still { time } => Box::new(FixedTimeSource::new(time.unwrap_or(0.0))),
    }
}

/// Paces redraw requests when a frame-rate cap is active.
///
/// Without a cap every call reports ready and no deadline, which leaves the
/// event loop free to redraw at display rate.
#[derive(Debug, Clone, Copy)]
pub struct FrameScheduler {
    interval: Option<Duration>,
    last_frame: Option<Instant>,
}

impl FrameScheduler {
    pub fn new(target_fps: Option<f32>) -> Self {
        let interval = target_fps
            .filter(|fps| *fps > 0.0)
            .map(|fps| Duration::from_secs_f64(1.0 / f64::from(fps)));
        Self {
            interval,
            last_frame: None,
        }
    }

    /// True when a frame-rate cap is in effect.
    pub fn is_capped(&self) -> bool {
        self.interval.is_some()
    }

    /// True when enough time has passed to draw another frame.
    pub fn ready_for_frame(&self, now: Instant) -> bool {
        match (self.interval, self.last_frame) {
            (Some(interval), Some(last)) => now.saturating_duration_since(last) >= interval,
            _ => true,
        }
    }

    /// Records that a frame was just presented.
    pub fn mark_rendered(&mut self, now: Instant) {
        self.last_frame = Some(now);
    }

    /// Wake-up deadline for the next frame when capped.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let interval = self.interval?;
        let last = self.last_frame?;
        Some((last + interval).max(now))
    }

    pub fn reset(&mut self) {
        self.last_frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_time_source_reports_non_decreasing_samples() {
        let mut source = SystemTimeSource::new();
        let first = source.sample();
        let second = source.sample();
        assert!(second.seconds >= first.seconds);
        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
    }

    #[test]
    fn fixed_time_source_reports_constant_time() {
        let mut source = FixedTimeSource::new(2.5);
        for _ in 0..3 {
            let sample = source.sample();
            assert_eq!(sample.seconds, 2.5);
            assert_eq!(sample.frame_index, 0);
        }
    }

    #[test]
    fn still_policy_defaults_to_time_zero() {
        let mut source = time_source_for_policy(&RenderPolicy::Still { time: None });
        assert_eq!(source.sample().seconds, 0.0);

        let mut pinned = time_source_for_policy(&RenderPolicy::Still { time: Some(4.25) });
        assert_eq!(pinned.sample().seconds, 4.25);
    }

    #[test]
    fn uncapped_scheduler_is_always_ready() {
        let mut scheduler = FrameScheduler::new(None);
        let now = Instant::now();
        assert!(!scheduler.is_capped());
        assert!(scheduler.ready_for_frame(now));
        scheduler.mark_rendered(now);
        assert!(scheduler.ready_for_frame(now));
        assert!(scheduler.next_deadline(now).is_none());
    }

    #[test]
    fn capped_scheduler_spaces_frames_by_interval() {
        let mut scheduler = FrameScheduler::new(Some(10.0));
        let start = Instant::now();
        assert!(scheduler.ready_for_frame(start));

        scheduler.mark_rendered(start);
        assert!(!scheduler.ready_for_frame(start + Duration::from_millis(50)));
        assert!(scheduler.ready_for_frame(start + Duration::from_millis(100)));

        let deadline = scheduler
            .next_deadline(start + Duration::from_millis(30))
            .expect("capped scheduler has a deadline");
        assert_eq!(deadline, start + Duration::from_millis(100));
    }

    #[test]
    fn overdue_deadline_clamps_to_now() {
        let mut scheduler = FrameScheduler::new(Some(1000.0));
        let start = Instant::now();
        scheduler.mark_rendered(start);
        let late = start + Duration::from_secs(1);
        assert_eq!(scheduler.next_deadline(late), Some(late));
    }

    #[test]
    fn reset_forgets_the_last_frame() {
        let mut scheduler = FrameScheduler::new(Some(60.0));
        let now = Instant::now();
        scheduler.mark_rendered(now);
        assert!(!scheduler.ready_for_frame(now));
        scheduler.reset();
        assert!(scheduler.ready_for_frame(now));
    }

    #[test]
    fn non_positive_fps_means_uncapped() {
        let scheduler = FrameScheduler::new(Some(0.0));
        assert!(!scheduler.is_capped());
    }
}

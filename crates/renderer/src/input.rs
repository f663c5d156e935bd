use std::time::{Duration, Instant};

use crate::tween::{EasingCurve, ProgressTween};

/// Snapshot of the gesture-driven shader parameters for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    pub progress: f32,
    pub direction: f32,
}

/// Turns press/release events into the `progress`/`direction` uniform pair.
///
/// A press aims `progress` at 1.0 with an expo-out ease and flips `direction`
/// to 0.0; a release aims at 0.0 with an expo-in ease and flips `direction`
/// to 1.0. Either event replaces any transition still in flight, so the most
/// recent gesture always wins.
#[derive(Debug)]
pub struct GestureTracker {
    progress: f32,
    direction: f32,
    duration: Duration,
    active: Option<ProgressTween>,
}

impl GestureTracker {
    pub fn new(duration: Duration) -> Self {
        Self {
            progress: 0.0,
            direction: 0.0,
            duration,
            active: None,
        }
    }

    pub fn press(&mut self, now: Instant) {
        self.direction = 0.0;
        self.retarget(1.0, EasingCurve::ExpoOut, now);
    }

    pub fn release(&mut self, now: Instant) {
        self.direction = 1.0;
        self.retarget(0.0, EasingCurve::ExpoIn, now);
    }

    /// Advances the active transition and reports the values to upload.
    pub fn sample(&mut self, now: Instant) -> GestureSample {
        if let Some(tween) = self.active {
            let (value, finished) = tween.value_at(now);
            if finished {
                self.progress = tween.target();
                self.active = None;
            } else {
                self.progress = value;
            }
        }
        GestureSample {
            progress: self.progress,
            direction: self.direction,
        }
    }

    /// True while a transition is still easing toward its target.
    pub fn in_transition(&self) -> bool {
        self.active.is_some()
    }

    fn retarget(&mut self, target: f32, curve: EasingCurve, now: Instant) {
        let from = self.current_value(now);
        match ProgressTween::new(from, target, now, self.duration, curve) {
            Some(tween) => self.active = Some(tween),
            None => {
                self.progress = target;
                self.active = None;
            }
        }
    }

    fn current_value(&self, now: Instant) -> f32 {
        match &self.active {
            Some(tween) => tween.value_at(now).0,
            None => self.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESS: Duration = Duration::from_millis(600);

    #[test]
    fn press_drives_progress_to_one_with_direction_zero() {
        let start = Instant::now();
        let mut tracker = GestureTracker::new(PRESS);
        tracker.press(start);

        let first = tracker.sample(start);
        assert_eq!(first.direction, 0.0);
        assert!(first.progress < 1e-6);

        let done = tracker.sample(start + PRESS);
        assert_eq!(done.progress, 1.0);
        assert_eq!(done.direction, 0.0);
        assert!(!tracker.in_transition());
    }

    #[test]
    fn release_drives_progress_back_to_zero_with_direction_one() {
        let start = Instant::now();
        let mut tracker = GestureTracker::new(PRESS);
        tracker.press(start);
        tracker.sample(start + PRESS);

        tracker.release(start + PRESS);
        let mid = tracker.sample(start + PRESS + Duration::from_millis(300));
        assert_eq!(mid.direction, 1.0);
        assert!(mid.progress < 1.0);

        let done = tracker.sample(start + PRESS + PRESS);
        assert_eq!(done.progress, 0.0);
    }

    #[test]
    fn later_gesture_supersedes_an_unfinished_one() {
        let start = Instant::now();
        let mut tracker = GestureTracker::new(PRESS);
        tracker.press(start);

        let interrupted_at = start + Duration::from_millis(150);
        let before = tracker.sample(interrupted_at);
        tracker.release(interrupted_at);

        let after = tracker.sample(interrupted_at);
        assert_eq!(after.direction, 1.0);
        assert!((after.progress - before.progress).abs() < 1e-5);

        let settled = tracker.sample(interrupted_at + PRESS);
        assert_eq!(settled.progress, 0.0);
        assert_eq!(settled.direction, 1.0);
    }

    #[test]
    fn progress_is_monotonic_within_a_single_press() {
        let start = Instant::now();
        let mut tracker = GestureTracker::new(PRESS);
        tracker.press(start);

        let mut previous = tracker.sample(start).progress;
        for millis in (50..=600).step_by(50) {
            let sample = tracker.sample(start + Duration::from_millis(millis));
            assert!(
                sample.progress >= previous,
                "progress dipped at {millis}ms: {} < {previous}",
                sample.progress
            );
            previous = sample.progress;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn zero_duration_jumps_straight_to_target() {
        let start = Instant::now();
        let mut tracker = GestureTracker::new(Duration::ZERO);
        tracker.press(start);
        assert_eq!(tracker.sample(start).progress, 1.0);

        tracker.release(start);
        let sample = tracker.sample(start);
        assert_eq!(sample.progress, 0.0);
        assert_eq!(sample.direction, 1.0);
    }

    #[test]
    fn sampling_without_gestures_stays_flat() {
        let start = Instant::now();
        let mut tracker = GestureTracker::new(PRESS);
        for secs in 0..5 {
            let sample = tracker.sample(start + Duration::from_secs(secs));
            assert_eq!(sample.progress, 0.0);
            assert_eq!(sample.direction, 0.0);
        }
    }
}

use std::time::{Duration, Instant};

/// Easing curves available for progress transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EasingCurve {
    Linear,
    /// Fast start, asymptotic approach: `1 - 2^(-10t)`, exactly 1 at `t >= 1`.
    ExpoOut,
    /// Slow start, rapid finish: `2^(10(t-1))`, exactly 0 at `t <= 0`.
    ExpoIn,
}

impl EasingCurve {
    /// Maps linear progress `t` in `[0, 1]` onto the configured curve.
    pub fn sample(self, t: f32) -> f32 {
        let clamped = t.clamp(0.0, 1.0);
        match self {
            EasingCurve::Linear => clamped,
            EasingCurve::ExpoOut => {
                if clamped >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * clamped)
                }
            }
            EasingCurve::ExpoIn => {
                if clamped <= 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * (clamped - 1.0))
                }
            }
        }
    }
}

/// Tracks one in-flight eased transition of a scalar toward a target.
///
/// Replacing the tween is how a later gesture supersedes an earlier one; the
/// struct itself never reverses or re-aims once constructed.
#[derive(Clone, Copy, Debug)]
pub struct ProgressTween {
    start_value: f32,
    target: f32,
    started: Instant,
    duration: Duration,
    curve: EasingCurve,
}

impl ProgressTween {
    /// Returns `None` for non-positive durations so callers can jump straight
    /// to the target instead of dividing by zero.
    pub fn new(
        start_value: f32,
        target: f32,
        started: Instant,
        duration: Duration,
        curve: EasingCurve,
    ) -> Option<Self> {
        if duration <= Duration::ZERO {
            return None;
        }
        Some(Self {
            start_value,
            target,
            started,
            duration,
            curve,
        })
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Returns `(value, finished)` for the transition at `now`.
    pub fn value_at(&self, now: Instant) -> (f32, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        let linear = (elapsed.as_secs_f32() / self.duration.as_secs_f32().max(f32::EPSILON))
            .clamp(0.0, 1.0);
        let eased = self.curve.sample(linear);
        let value = self.start_value + (self.target - self.start_value) * eased;
        (value, linear >= 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expo_out_moves_fast_then_settles_exactly() {
        let curve = EasingCurve::ExpoOut;
        assert_eq!(curve.sample(0.0), 0.0);
        assert!((curve.sample(0.1) - 0.5).abs() < 1e-6);
        assert!((curve.sample(0.5) - 0.968_75).abs() < 1e-6);
        assert_eq!(curve.sample(1.0), 1.0);
    }

    #[test]
    fn expo_in_starts_slow_then_accelerates() {
        let curve = EasingCurve::ExpoIn;
        assert_eq!(curve.sample(0.0), 0.0);
        assert!((curve.sample(0.5) - 0.031_25).abs() < 1e-6);
        assert!((curve.sample(0.9) - 0.5).abs() < 1e-6);
        assert!((curve.sample(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn curves_clamp_out_of_range_input() {
        for curve in [EasingCurve::Linear, EasingCurve::ExpoOut, EasingCurve::ExpoIn] {
            assert_eq!(curve.sample(-2.0), curve.sample(0.0));
            assert_eq!(curve.sample(3.0), curve.sample(1.0));
        }
    }

    #[test]
    fn curves_increase_monotonically() {
        for curve in [EasingCurve::Linear, EasingCurve::ExpoOut, EasingCurve::ExpoIn] {
            let mut previous = curve.sample(0.0);
            for step in 1..=20 {
                let next = curve.sample(step as f32 / 20.0);
                assert!(next >= previous, "{curve:?} dipped at step {step}");
                previous = next;
            }
        }
    }

    #[test]
    fn tween_interpolates_between_endpoints() {
        let started = Instant::now();
        let tween = ProgressTween::new(
            0.25,
            1.0,
            started,
            Duration::from_secs(2),
            EasingCurve::Linear,
        )
        .expect("non-zero duration");

        let (at_start, finished) = tween.value_at(started);
        assert!((at_start - 0.25).abs() < 1e-6);
        assert!(!finished);

        let (midway, finished) = tween.value_at(started + Duration::from_secs(1));
        assert!((midway - 0.625).abs() < 1e-6);
        assert!(!finished);

        let (at_end, finished) = tween.value_at(started + Duration::from_secs(2));
        assert!((at_end - 1.0).abs() < 1e-6);
        assert!(finished);
    }

    #[test]
    fn finished_tween_holds_its_target() {
        let started = Instant::now();
        let tween = ProgressTween::new(
            1.0,
            0.0,
            started,
            Duration::from_millis(600),
            EasingCurve::ExpoIn,
        )
        .expect("non-zero duration");

        let (value, finished) = tween.value_at(started + Duration::from_secs(5));
        assert_eq!(value, 0.0);
        assert!(finished);
    }

    #[test]
    fn zero_duration_tween_is_rejected() {
        let result = ProgressTween::new(
            0.0,
            1.0,
            Instant::now(),
            Duration::ZERO,
            EasingCurve::ExpoOut,
        );
        assert!(result.is_none());
    }
}

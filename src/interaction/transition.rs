use std::time::Duration;

use crate::render::Color;

/// Values a transition can tween between.
pub trait Interpolate: Copy + PartialEq {
    fn interpolate(self, to: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Color {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self.lerp(to, t)
    }
}

/// Cubic ease-in-out over `t` in `[0, 1]`.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        0.5 * t * t * t
    } else {
        let t = t - 2.0;
        0.5 * (t * t * t + 2.0)
    }
}

/// Timed tween of one visual property.
///
/// Time is supplied by the caller as a monotonic offset, so the same inputs
/// always produce the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<T> {
    from: T,
    to: T,
    start: Duration,
    duration: Duration,
}

impl<T: Interpolate> Transition<T> {
    /// A transition that already rests at `value`.
    #[must_use]
    pub fn settled(value: T) -> Self {
        Self {
            from: value,
            to: value,
            start: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn target(&self) -> T {
        self.to
    }

    #[must_use]
    pub fn value_at(&self, now: Duration) -> T {
        if self.duration.is_zero() || now >= self.start + self.duration {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }
        let progress = (now - self.start).as_secs_f64() / self.duration.as_secs_f64();
        self.from.interpolate(self.to, ease_cubic_in_out(progress))
    }

    /// Starts a new tween toward `target` from wherever this one is at `now`.
    /// Any in-flight tween is superseded.
    pub fn retarget(&mut self, target: T, now: Duration, duration: Duration) {
        let current = self.value_at(now);
        *self = Self {
            from: current,
            to: target,
            start: now,
            duration,
        };
    }

    #[must_use]
    pub fn is_active(&self, now: Duration) -> bool {
        self.from != self.to && now < self.start + self.duration
    }
}

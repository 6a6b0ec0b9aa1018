#![forbid(unsafe_code)]

//! Target-following animation.
//!
//! Menus never run fixed-duration tweens. Every animated quantity (panel
//! slide offset, panel alpha) is a [`Lag`]: a first-order low-pass follower
//! that closes a fixed fraction of the remaining distance per second.
//! Interrupting an animation is just a call to [`Lag::retarget`]; the
//! follower re-converges from wherever it currently is, so reversals are
//! smooth.
//!
//! # Invariants
//!
//! 1. A tick never moves the value past its target (the per-tick step
//!    factor is capped at 1.0).
//! 2. Successive ticks with a fixed target are monotonic.
//! 3. Non-positive or non-finite `dt` leaves the value untouched.

use std::time::Duration;

/// Default convergence rate: a time constant of 0.1s.
pub const DEFAULT_RATE: f32 = 10.0;

/// First-order lag filter: `value += (target - value) * rate * dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lag {
    value: f32,
    target: f32,
    rate: f32,
}

impl Default for Lag {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Lag {
    /// Create a follower at `value` heading for `target`.
    #[must_use]
    pub const fn new(value: f32, target: f32) -> Self {
        Self {
            value,
            target,
            rate: DEFAULT_RATE,
        }
    }

    /// Set the convergence rate in 1/seconds (builder). Negative rates clamp to 0.
    #[must_use]
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate.max(0.0);
        self
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Value being approached.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Convergence rate in 1/seconds.
    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Change the destination without moving the current value.
    #[inline]
    pub fn retarget(&mut self, target: f32) {
        self.target = target;
    }

    /// Move the current value without changing the destination.
    #[inline]
    pub fn jump(&mut self, value: f32) {
        self.value = value;
    }

    /// Advance by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        let factor = (self.rate * dt).min(1.0);
        self.value += (self.target - self.value) * factor;
    }

    /// Advance by a [`Duration`].
    pub fn tick_duration(&mut self, dt: Duration) {
        self.tick(dt.as_secs_f32());
    }

    /// Absolute distance left to the target.
    #[inline]
    pub fn remaining(&self) -> f32 {
        (self.target - self.value).abs()
    }

    /// Whether the value is within `epsilon` of its target.
    #[inline]
    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.remaining() <= epsilon
    }
}

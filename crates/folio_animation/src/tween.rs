//! Retargetable timed tweens
//!
//! A tween moves a value towards a target over a fixed duration through an
//! easing curve. Setting a new target restarts the tween from wherever the
//! value currently is, so interrupted transitions never jump.

use crate::easing::Easing;
use crate::values::Interpolate;

/// Timed transition between two values
#[derive(Clone, Debug)]
pub struct Tween<T: Interpolate = f32> {
    from: T,
    to: T,
    current: T,
    elapsed_ms: f32,
    duration_ms: f32,
    easing: Easing,
}

impl<T: Interpolate> Tween<T> {
    /// A tween resting at `value`
    pub fn new(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value.clone(),
            current: value,
            elapsed_ms: 0.0,
            duration_ms: 0.0,
            easing: Easing::Linear,
        }
    }

    pub fn value(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.to
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Linear time fraction of the running transition
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Start moving towards `to` from the current value
    ///
    /// A zero duration jumps straight to the target.
    pub fn retarget(&mut self, to: T, duration_ms: f32, easing: Easing) {
        self.from = self.current.clone();
        self.to = to;
        self.elapsed_ms = 0.0;
        self.duration_ms = if duration_ms.is_finite() {
            duration_ms.max(0.0)
        } else {
            0.0
        };
        self.easing = easing;
        if self.duration_ms == 0.0 {
            self.current = self.to.clone();
        }
    }

    /// Jump to a value with no transition
    pub fn snap(&mut self, value: T) {
        self.from = value.clone();
        self.to = value.clone();
        self.current = value;
        self.elapsed_ms = 0.0;
        self.duration_ms = 0.0;
    }

    /// Advance the clock and return the new value
    pub fn advance(&mut self, dt_ms: f32) -> &T {
        if self.is_finished() {
            self.current = self.to.clone();
            return &self.current;
        }
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.elapsed_ms += dt_ms;
        }
        let t = self.easing.apply(self.progress());
        self.current = if self.is_finished() {
            self.to.clone()
        } else {
            self.from.lerp(&self.to, t)
        };
        &self.current
    }
}

impl<T: Interpolate + Default> Default for Tween<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

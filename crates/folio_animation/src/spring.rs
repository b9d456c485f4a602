//! Spring physics animation
//!
//! RK4-integrated spring physics for smooth, natural animations.
//! Supports preset configurations and custom spring parameters.

use serde::{Deserialize, Serialize};

/// Largest step taken by [`Spring::advance`]
const MAX_STEP: f32 = 1.0 / 120.0;

/// Longest frame [`Spring::advance`] simulates, in seconds
pub const MAX_ADVANCE: f32 = 5.0;

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance from target below which the spring may come to rest
    #[serde(default = "default_rest_delta")]
    pub rest_delta: f32,
    /// Speed below which the spring may come to rest
    #[serde(default = "default_rest_speed")]
    pub rest_speed: f32,
}

fn default_rest_delta() -> f32 {
    0.001
}

fn default_rest_speed() -> f32 {
    0.01
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_delta: default_rest_delta(),
            rest_speed: default_rest_speed(),
        }
    }

    /// Heavy, overdamped spring used for dragging covers and pages open
    pub fn page_turn() -> Self {
        Self::new(400.0, 40.0, 0.5)
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Check if the spring is overdamped (slow settling, no oscillation)
    pub fn is_overdamped(&self) -> bool {
        self.damping > self.critical_damping()
    }

    /// Whether every parameter can drive a stable simulation
    pub fn is_valid(&self) -> bool {
        [self.stiffness, self.damping, self.mass, self.rest_delta, self.rest_speed]
            .iter()
            .all(|v| v.is_finite())
            && self.stiffness > 0.0
            && self.mass > 0.0
            && self.damping >= 0.0
            && self.rest_delta > 0.0
            && self.rest_speed > 0.0
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::page_turn()
    }
}

/// A spring-based animator
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Check if the spring has settled (within rest delta of target with minimal velocity)
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.config.rest_delta
            && self.velocity.abs() < self.config.rest_speed
    }

    /// Step the spring simulation using RK4 integration
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }

    /// Advance by `dt` seconds, sub-stepping so long frames stay stable
    ///
    /// Frames longer than [`MAX_ADVANCE`] are simulated as `MAX_ADVANCE`.
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        if dt > MAX_ADVANCE {
            tracing::trace!(dt, max = MAX_ADVANCE, "clamping long spring frame");
        }
        let dt = dt.min(MAX_ADVANCE);
        let steps = (dt / MAX_STEP).ceil().max(1.0) as u32;
        if steps > 1 {
            tracing::trace!(dt, steps, "sub-stepping spring");
        }
        let step = dt / steps as f32;
        for _ in 0..steps {
            self.step(step);
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_settles_to_target() {
        let mut spring = Spring::new(SpringConfig::page_turn(), 0.0);
        spring.set_target(0.2);

        // Simulate for 2 seconds at 60fps
        for _ in 0..120 {
            spring.advance(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert!((spring.value() - 0.2).abs() < 0.001);
    }

    #[test]
    fn test_page_turn_never_overshoots() {
        assert!(SpringConfig::page_turn().is_overdamped());

        let mut spring = Spring::new(SpringConfig::page_turn(), 0.0);
        spring.set_target(0.2);
        for _ in 0..300 {
            spring.advance(1.0 / 60.0);
            assert!(spring.value() <= 0.2 + 1e-6);
        }
    }

    #[test]
    fn test_spring_inherits_velocity() {
        let mut spring = Spring::new(SpringConfig::new(180.0, 12.0, 1.0), 0.0);
        spring.set_target(100.0);

        for _ in 0..10 {
            spring.step(1.0 / 60.0);
        }

        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        // Change target mid-flight - velocity should continue
        spring.set_target(50.0);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_advance_is_stable_for_long_frames() {
        let mut spring = Spring::new(SpringConfig::page_turn(), 0.0);
        spring.set_target(1.0);

        for _ in 0..20 {
            spring.advance(0.25);
            assert!(spring.value().is_finite());
            assert!(spring.value() <= 1.0 + 1e-5);
        }
        assert!(spring.is_settled());
    }

    #[test]
    fn test_huge_frame_is_bounded() {
        let mut spring = Spring::new(SpringConfig::page_turn(), 0.0);
        spring.set_target(0.2);
        spring.advance(1.0e9);
        assert!(spring.is_settled());
        assert!((spring.value() - 0.2).abs() < 0.001);
    }

    #[test]
    fn test_config_from_toml_defaults_rest() {
        let config: SpringConfig = toml::from_str("stiffness = 400.0\ndamping = 40.0\nmass = 0.5")
            .expect("valid spring table");
        assert_eq!(config, SpringConfig::page_turn());
        assert!(config.is_valid());
        assert!(!SpringConfig::new(0.0, 1.0, 1.0).is_valid());
    }
}

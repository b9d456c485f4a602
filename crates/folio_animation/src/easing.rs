//! Easing curves
//!
//! Time-remapping functions for tweens. Besides the usual polynomial curves
//! this supports arbitrary CSS `cubic-bezier(x1, y1, x2, y2)` timing
//! functions, including overshooting ones whose output leaves `[0, 1]`.

use serde::{Deserialize, Serialize};

/// Easing function applied to normalized time
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// CSS cubic-bezier with control points (x1, y1) and (x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Springy entrance that overshoots its target before settling
    pub const fn overshoot() -> Self {
        Easing::CubicBezier(0.34, 1.56, 0.64, 1.0)
    }

    /// Accelerating exit with no overshoot
    pub const fn accelerate() -> Self {
        Easing::CubicBezier(0.4, 0.0, 1.0, 1.0)
    }

    /// Quadratic-style deceleration
    pub const fn ease_out_quad() -> Self {
        Easing::CubicBezier(0.25, 0.46, 0.45, 0.94)
    }

    /// Quadratic-style acceleration
    pub const fn ease_in_quad() -> Self {
        Easing::CubicBezier(0.55, 0.085, 0.68, 0.53)
    }

    /// Apply easing to normalized time `t` (clamped to `[0, 1]`)
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => CubicBezier::new(x1, y1, x2, y2).solve(t),
        }
    }

    /// Whether the curve's output can leave `[0, 1]`
    pub fn overshoots(&self) -> bool {
        match *self {
            Easing::CubicBezier(_, y1, _, y2) => !(0.0..=1.0).contains(&y1) || !(0.0..=1.0).contains(&y2),
            _ => false,
        }
    }

    /// Control points are valid when both x coordinates lie in `[0, 1]`
    pub fn is_valid(&self) -> bool {
        match *self {
            Easing::CubicBezier(x1, y1, x2, y2) => {
                [x1, y1, x2, y2].iter().all(|v| v.is_finite())
                    && (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
            }
            _ => true,
        }
    }

    /// CSS timing-function representation
    pub fn to_css(&self) -> String {
        match *self {
            Easing::Linear => "linear".to_string(),
            Easing::EaseIn => "ease-in".to_string(),
            Easing::EaseOut => "ease-out".to_string(),
            Easing::EaseInOut => "ease-in-out".to_string(),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                format!("cubic-bezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cubic bezier solver
// ─────────────────────────────────────────────────────────────────────────────

/// Unit cubic bezier from (0, 0) to (1, 1) in polynomial form
#[derive(Clone, Copy, Debug)]
struct CubicBezier {
    ax: f32,
    bx: f32,
    cx: f32,
    ay: f32,
    by: f32,
    cy: f32,
}

impl CubicBezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    fn sample_x(&self, s: f32) -> f32 {
        ((self.ax * s + self.bx) * s + self.cx) * s
    }

    fn sample_y(&self, s: f32) -> f32 {
        ((self.ay * s + self.by) * s + self.cy) * s
    }

    fn sample_dx(&self, s: f32) -> f32 {
        (3.0 * self.ax * s + 2.0 * self.bx) * s + self.cx
    }

    /// Curve parameter whose x equals `x`
    fn solve_s(&self, x: f32) -> f32 {
        const EPS: f32 = 1e-6;

        // Newton-Raphson first, it converges in a few steps for most curves
        let mut s = x;
        for _ in 0..8 {
            let err = self.sample_x(s) - x;
            if err.abs() < EPS {
                return s;
            }
            let d = self.sample_dx(s);
            if d.abs() < EPS {
                break;
            }
            s -= err / d;
        }

        // Bisection fallback
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        s = x;
        for _ in 0..64 {
            let v = self.sample_x(s);
            if (v - x).abs() < EPS {
                break;
            }
            if x > v {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }

    fn solve(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        self.sample_y(self.solve_s(x))
    }
}

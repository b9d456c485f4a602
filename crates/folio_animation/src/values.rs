//! Animatable value types
//!
//! Provides the interpolation trait for values that can be tweened,
//! including scalars, colors, points and squircle outlines.

use folio_core::{Color, Outline, Point};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal (for settling detection)
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// Point Implementation
// ============================================================================

impl Interpolate for Point {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Point::lerp(self, *other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

// ============================================================================
// Color Implementation
// ============================================================================

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::lerp(self, other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
    }
}

// ============================================================================
// Outline Implementation
// ============================================================================

impl Interpolate for Outline {
    /// Blends matching outlines point-by-point; `t` is not clamped so
    /// overshooting curves push the shape past either end
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Outline::lerp(self, other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        let (a, b) = (self.size(), other.size());
        (a.width - b.width).abs() < epsilon && (a.height - b.height).abs() < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::generate_outline;

    #[test]
    fn test_f32_extrapolates() {
        assert!((Interpolate::lerp(&0.0f32, &10.0, 1.1) - 11.0).abs() < 1e-5);
    }

    #[test]
    fn test_color_lerp_clamps() {
        let c = Interpolate::lerp(&Color::BLACK, &Color::WHITE, 2.0);
        assert!(c.approx_eq(&Color::WHITE, 1e-6));
    }

    #[test]
    fn test_outline_lerp() {
        let a = generate_outline(200.0, 268.0, 20.0, 1.0);
        let b = generate_outline(200.0, 263.0, 20.0, 1.0);
        let over = Interpolate::lerp(&a, &b, 1.2);
        assert!((over.size().height - 262.0).abs() < 1e-3);
        assert!(Interpolate::lerp(&a, &b, 1.0).approx_eq(&b, 1e-3));
    }
}

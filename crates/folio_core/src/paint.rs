//! Colors, gradients and brushes
//!
//! Everything a layer can be filled with. Besides solid colors and gradients
//! this includes the two procedural fills used on notebook covers: tiled
//! ruling patterns (lines, grids, dots) and fractal grain noise.

use smallvec::SmallVec;

use crate::geometry::{Point, Size};

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color, components in 0.0..=1.0
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color from 8-bit channels and a float alpha, as written in CSS `rgba()`
    pub const fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    pub const fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub const fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// 8-bit channels, rounded
    pub fn to_rgb8(&self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// CSS representation: `#rrggbb` when opaque, `rgba(r,g,b,a)` otherwise
    pub fn to_css(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        if (self.a - 1.0).abs() < f32::EPSILON {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("rgba({},{},{},{})", r, g, b, trim_float(self.a))
        }
    }

    /// Linear interpolation between two colors
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Format a float without trailing zeros (`0.35`, `1`, `-2.5`)
pub fn trim_float(v: f32) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    let s = format!("{:.3}", rounded);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gradients
// ─────────────────────────────────────────────────────────────────────────────

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub offset: f32,
    /// Color at this stop
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// Linear gradient in object bounding box space (0.0-1.0 on both axes)
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub start: Point,
    pub end: Point,
    pub stops: SmallVec<[GradientStop; 4]>,
}

impl Gradient {
    /// Gradient between two points with the given stops
    pub fn linear(start: Point, end: Point, stops: impl IntoIterator<Item = GradientStop>) -> Self {
        Self {
            start,
            end,
            stops: stops.into_iter().collect(),
        }
    }

    /// Gradient following a CSS angle (`0deg` points up, `90deg` points right)
    ///
    /// The gradient line passes through the box center; its length is chosen
    /// so the corners receive the first and last stop, as CSS does for a
    /// square box.
    pub fn css_angle(degrees: f32, stops: impl IntoIterator<Item = GradientStop>) -> Self {
        let rad = degrees.to_radians();
        let dx = rad.sin();
        let dy = -rad.cos();
        let half = (dx.abs() + dy.abs()) / 2.0;
        Self::linear(
            Point::new(0.5 - dx * half, 0.5 - dy * half),
            Point::new(0.5 + dx * half, 0.5 + dy * half),
            stops,
        )
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Get the first color in the gradient (or BLACK if no stops)
    pub fn first_color(&self) -> Color {
        self.stops.first().map(|s| s.color).unwrap_or(Color::BLACK)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tiled patterns
// ─────────────────────────────────────────────────────────────────────────────

/// A family of parallel lines repeating every `period` pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripeSet {
    /// CSS gradient angle of the repetition axis in degrees
    pub angle: f32,
    /// Distance between line starts
    pub period: f32,
    /// Line thickness
    pub thickness: f32,
    pub ink: Color,
}

/// A square grid of dots
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotGrid {
    pub radius: f32,
    pub spacing: f32,
    pub ink: Color,
}

/// A tileable ruling texture
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// Parallel line families (ruled paper, grids, slanted guides)
    Stripes(SmallVec<[StripeSet; 2]>),
    /// Dot grid
    Dots(DotGrid),
}

impl Pattern {
    /// Size of one repeating tile
    pub fn tile_size(&self) -> Size {
        match self {
            Pattern::Stripes(sets) => {
                let period = sets.iter().map(|s| s.period).fold(0.0f32, f32::max);
                Size::new(period, period)
            }
            Pattern::Dots(dots) => Size::new(dots.spacing, dots.spacing),
        }
    }

    /// Every ink color used by the pattern
    pub fn inks(&self) -> SmallVec<[Color; 2]> {
        match self {
            Pattern::Stripes(sets) => sets.iter().map(|s| s.ink).collect(),
            Pattern::Dots(dots) => smallvec::smallvec![dots.ink],
        }
    }
}

/// Fractal grain noise
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseStyle {
    pub base_frequency: f32,
    pub octaves: u32,
    /// Size of the repeating noise tile
    pub tile: f32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Brushes, shadows and filters
// ─────────────────────────────────────────────────────────────────────────────

/// Brush for filling shapes
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Color),
    Gradient(Gradient),
    Pattern(Pattern),
    Noise(NoiseStyle),
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

impl From<Gradient> for Brush {
    fn from(gradient: Gradient) -> Self {
        Brush::Gradient(gradient)
    }
}

impl From<Pattern> for Brush {
    fn from(pattern: Pattern) -> Self {
        Brush::Pattern(pattern)
    }
}

/// Box/text shadow
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: Color,
}

impl Shadow {
    pub fn new(offset_x: f32, offset_y: f32, blur: f32, color: Color) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            spread: 0.0,
            color,
        }
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }
}

/// Brightness/saturation adjustment applied to a whole layer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorFilter {
    pub brightness: f32,
    pub saturate: f32,
}

impl ColorFilter {
    pub const NONE: ColorFilter = ColorFilter {
        brightness: 1.0,
        saturate: 1.0,
    };

    pub fn is_none(&self) -> bool {
        (self.brightness - 1.0).abs() < 1e-4 && (self.saturate - 1.0).abs() < 1e-4
    }
}

impl Default for ColorFilter {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_css() {
        assert_eq!(Color::from_hex(0x60a5fa).to_css(), "#60a5fa");
        assert_eq!(Color::rgba8(255, 255, 255, 0.12).to_css(), "rgba(255,255,255,0.12)");
    }

    #[test]
    fn test_css_angle_135_runs_top_left_to_bottom_right() {
        let g = Gradient::css_angle(135.0, [GradientStop::new(0.0, Color::WHITE)]);
        assert!(g.start.x < 0.01 && g.start.y < 0.01);
        assert!(g.end.x > 0.99 && g.end.y > 0.99);
    }

    #[test]
    fn test_stripes_css() {
        let p = Pattern::Stripes(smallvec::smallvec![StripeSet {
            angle: 180.0,
            period: 20.0,
            thickness: 2.0,
            ink: Color::rgba8(255, 255, 255, 0.15),
        }]);
        assert_eq!(
            p.to_css(),
            "repeating-linear-gradient(180deg, transparent, transparent 18px, rgba(255,255,255,0.15) 18px, rgba(255,255,255,0.15) 20px)"
        );
        assert_eq!(p.tile_size(), Size::new(20.0, 20.0));
    }
}

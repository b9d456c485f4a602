//! Draw Context - recording rendering API
//!
//! The `DrawContext` trait is the surface a book paints onto. Hosts either
//! implement it directly (forwarding to their own renderer) or use
//! `RecordingContext` to capture an ordered list of `DrawCommand`s that can
//! be replayed or serialized later.
//!
//! # Example
//!
//! ```
//! use folio_core::{Color, DrawContext, Path, RecordingContext, Rect, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(200.0, 268.0));
//! ctx.push_opacity(0.5);
//! ctx.fill_path(&Path::rect(Rect::new(0.0, 0.0, 10.0, 10.0)), Color::WHITE.into());
//! ctx.pop_opacity();
//! assert_eq!(ctx.commands().len(), 3);
//! ```

use smallvec::SmallVec;

use crate::geometry::{Affine2D, Mat4, Point, Rect, Size, Vec2};
use crate::paint::{trim_float, Brush, Color, ColorFilter, Shadow};

// ─────────────────────────────────────────────────────────────────────────────
// Transform Types
// ─────────────────────────────────────────────────────────────────────────────

/// Unified transform that can represent 2D or 3D transformations
#[derive(Clone, Debug, PartialEq)]
pub enum Transform {
    /// 2D affine transformation
    Affine2D(Affine2D),
    /// 3D matrix transformation
    Mat4(Mat4),
}

impl Transform {
    /// Create a 2D translation
    pub fn translate(x: f32, y: f32) -> Self {
        Transform::Affine2D(Affine2D::translation(x, y))
    }

    /// Rotation around a vertical hinge at `origin_x`, seen through a
    /// perspective of `perspective` pixels centered on `center`
    pub fn hinge(angle_deg: f32, origin_x: f32, center: Point, perspective: f32) -> Self {
        let to_center = Mat4::translation(center.x, center.y, 0.0);
        let from_center = Mat4::translation(-center.x, -center.y, 0.0);
        let m = to_center
            .mul(&Mat4::perspective(perspective))
            .mul(&from_center)
            .mul(&Mat4::hinge_y(angle_deg.to_radians(), origin_x));
        Transform::Mat4(m)
    }

    /// Flatten to a 2D affine transform (3D matrices lose their depth)
    pub fn to_affine(&self) -> Affine2D {
        match self {
            Transform::Affine2D(a) => *a,
            Transform::Mat4(m) => m.to_affine_2d(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stroke and Text
// ─────────────────────────────────────────────────────────────────────────────

/// Stroke style
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Line width
    pub width: f32,
    /// Stroke only the inner half (CSS borders sit inside the box)
    pub inside: bool,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            inside: false,
        }
    }
}

impl Stroke {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Keep the stroke inside the filled area
    pub fn inside(mut self) -> Self {
        self.inside = true;
        self
    }
}

/// Font weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Regular,
    Medium,
    SemiBold,
    Bold,
}

impl FontWeight {
    pub fn to_numeric(self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::SemiBold => 600,
            FontWeight::Bold => 700,
        }
    }
}

/// Horizontal text alignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text style for drawing
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font family name
    pub family: String,
    /// Font size in pixels
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
    pub align: TextAlign,
    /// Letter spacing adjustment
    pub letter_spacing: f32,
    /// Line height multiplier
    pub line_height: f32,
    /// Stacked text shadows (letterpress highlights)
    pub shadows: SmallVec<[Shadow; 2]>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "system-ui".to_string(),
            size: 14.0,
            weight: FontWeight::Regular,
            color: Color::BLACK,
            align: TextAlign::Left,
            letter_spacing: 0.0,
            line_height: 1.2,
            shadows: SmallVec::new(),
        }
    }
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Path Types
// ─────────────────────────────────────────────────────────────────────────────

/// Path command for building vector paths
#[derive(Clone, Debug, PartialEq)]
pub enum PathCommand {
    /// Move to a point
    MoveTo(Point),
    /// Line to a point
    LineTo(Point),
    /// Cubic Bézier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Arc to a point
    ArcTo {
        radii: Vec2,
        rotation: f32,
        large_arc: bool,
        sweep: bool,
        end: Point,
    },
    /// Close the current subpath
    Close,
}

/// A vector path
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Move to a point
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    /// Line to a point
    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    /// Cubic Bézier curve
    pub fn cubic_to(mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::CubicTo {
            control1: Point::new(cx1, cy1),
            control2: Point::new(cx2, cy2),
            end: Point::new(x, y),
        });
        self
    }

    /// SVG Arc to a point
    ///
    /// - `radii`: The x and y radii of the ellipse
    /// - `rotation`: Rotation angle of the ellipse in radians
    /// - `large_arc`: If true, use the larger arc (> 180 degrees)
    /// - `sweep`: If true, draw clockwise; if false, counter-clockwise
    /// - `x`, `y`: End point of the arc
    pub fn arc_to(
        mut self,
        radii: Vec2,
        rotation: f32,
        large_arc: bool,
        sweep: bool,
        x: f32,
        y: f32,
    ) -> Self {
        self.commands.push(PathCommand::ArcTo {
            radii,
            rotation,
            large_arc,
            sweep,
            end: Point::new(x, y),
        });
        self
    }

    /// Close the path
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Create a rectangle path
    pub fn rect(rect: Rect) -> Self {
        Self::new()
            .move_to(rect.x(), rect.y())
            .line_to(rect.max_x(), rect.y())
            .line_to(rect.max_x(), rect.max_y())
            .line_to(rect.x(), rect.max_y())
            .close()
    }

    /// Create a plain circular-arc rounded rectangle path
    pub fn rounded_rect(rect: Rect, radius: f32) -> Self {
        let x = rect.x();
        let y = rect.y();
        let w = rect.width();
        let h = rect.height();
        let r = radius.clamp(0.0, (w.min(h) / 2.0).max(0.0));
        let radii = Vec2::splat(r);

        Self::new()
            .move_to(x + r, y)
            .line_to(x + w - r, y)
            .arc_to(radii, 0.0, false, true, x + w, y + r)
            .line_to(x + w, y + h - r)
            .arc_to(radii, 0.0, false, true, x + w - r, y + h)
            .line_to(x + r, y + h)
            .arc_to(radii, 0.0, false, true, x, y + h - r)
            .line_to(x, y + r)
            .arc_to(radii, 0.0, false, true, x + r, y)
            .close()
    }

    /// Get the path commands
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Whether every subpath ends with `Close`
    pub fn is_closed(&self) -> bool {
        !self.commands.is_empty() && matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Interpolate command-by-command towards `other`
    ///
    /// Returns `None` when the two paths do not share the same command
    /// structure. `t` is not clamped, so overshooting easing curves
    /// extrapolate past either end.
    pub fn lerp(&self, other: &Path, t: f32) -> Option<Path> {
        if self.commands.len() != other.commands.len() {
            return None;
        }

        let mut commands = Vec::with_capacity(self.commands.len());
        for (a, b) in self.commands.iter().zip(&other.commands) {
            let cmd = match (a, b) {
                (PathCommand::MoveTo(p), PathCommand::MoveTo(q)) => {
                    PathCommand::MoveTo(p.lerp(*q, t))
                }
                (PathCommand::LineTo(p), PathCommand::LineTo(q)) => {
                    PathCommand::LineTo(p.lerp(*q, t))
                }
                (
                    PathCommand::CubicTo {
                        control1: a1,
                        control2: a2,
                        end: ae,
                    },
                    PathCommand::CubicTo {
                        control1: b1,
                        control2: b2,
                        end: be,
                    },
                ) => PathCommand::CubicTo {
                    control1: a1.lerp(*b1, t),
                    control2: a2.lerp(*b2, t),
                    end: ae.lerp(*be, t),
                },
                (
                    PathCommand::ArcTo {
                        radii: ar,
                        rotation,
                        large_arc,
                        sweep,
                        end: ae,
                    },
                    PathCommand::ArcTo {
                        radii: br, end: be, ..
                    },
                ) => PathCommand::ArcTo {
                    radii: Vec2::new(ar.x + (br.x - ar.x) * t, ar.y + (br.y - ar.y) * t),
                    rotation: *rotation,
                    large_arc: *large_arc,
                    sweep: *sweep,
                    end: ae.lerp(*be, t),
                },
                (PathCommand::Close, PathCommand::Close) => PathCommand::Close,
                _ => return None,
            };
            commands.push(cmd);
        }

        Some(Path { commands })
    }

    /// Calculate the bounding rectangle of this path's anchor and control points
    pub fn bounds(&self) -> Rect {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        let mut include = |p: &Point| {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        };

        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => include(p),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    include(control1);
                    include(control2);
                    include(end);
                }
                PathCommand::ArcTo { end, .. } => include(end),
                PathCommand::Close => {}
            }
        }

        if min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite() {
            Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
        } else {
            Rect::ZERO
        }
    }

    /// SVG path data (`d` attribute) with absolute coordinates
    pub fn to_svg_data(&self) -> String {
        let f = trim_float;
        let mut parts: Vec<String> = Vec::with_capacity(self.commands.len());
        for cmd in &self.commands {
            parts.push(match cmd {
                PathCommand::MoveTo(p) => format!("M {} {}", f(p.x), f(p.y)),
                PathCommand::LineTo(p) => format!("L {} {}", f(p.x), f(p.y)),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => format!(
                    "C {} {} {} {} {} {}",
                    f(control1.x),
                    f(control1.y),
                    f(control2.x),
                    f(control2.y),
                    f(end.x),
                    f(end.y)
                ),
                PathCommand::ArcTo {
                    radii,
                    rotation,
                    large_arc,
                    sweep,
                    end,
                } => format!(
                    "A {} {} {} {} {} {} {}",
                    f(radii.x),
                    f(radii.y),
                    f(rotation.to_degrees()),
                    u8::from(*large_arc),
                    u8::from(*sweep),
                    f(end.x),
                    f(end.y)
                ),
                PathCommand::Close => "Z".to_string(),
            });
        }
        parts.join(" ")
    }
}

/// Clip region
#[derive(Clone, Debug, PartialEq)]
pub enum ClipShape {
    /// Axis-aligned rectangle clip
    Rect(Rect),
    /// Arbitrary path clip
    Path(Path),
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// Painting surface for book layers
pub trait DrawContext {
    /// Push a transform onto the stack
    fn push_transform(&mut self, transform: Transform);

    /// Pop the top transform from the stack
    fn pop_transform(&mut self);

    /// Push a clip shape onto the stack
    fn push_clip(&mut self, shape: ClipShape);

    /// Pop the top clip from the stack
    fn pop_clip(&mut self);

    /// Push an opacity value (multiplied with parent)
    fn push_opacity(&mut self, opacity: f32);

    /// Pop the top opacity from the stack
    fn pop_opacity(&mut self);

    /// Push a color filter applied to everything until the matching pop
    fn push_filter(&mut self, filter: ColorFilter);

    /// Pop the top color filter
    fn pop_filter(&mut self);

    /// Fill a path with a brush
    fn fill_path(&mut self, path: &Path, brush: Brush);

    /// Stroke a path
    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, brush: Brush);

    /// Draw an inner shadow inside a path (like CSS inset box-shadow)
    fn draw_inner_shadow(&mut self, path: &Path, shadow: Shadow);

    /// Draw text; `origin` is the center of the first line's baseline box
    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);

    /// Get the current viewport size
    fn viewport_size(&self) -> Size;

    /// Get the current combined opacity
    fn current_opacity(&self) -> f32;
}

/// A recorded drawing operation
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    PushTransform(Transform),
    PopTransform,
    PushClip(ClipShape),
    PopClip,
    PushOpacity(f32),
    PopOpacity,
    PushFilter(ColorFilter),
    PopFilter,
    FillPath {
        path: Path,
        brush: Brush,
    },
    StrokePath {
        path: Path,
        stroke: Stroke,
        brush: Brush,
    },
    DrawInnerShadow {
        path: Path,
        shadow: Shadow,
    },
    DrawText {
        text: String,
        origin: Point,
        style: TextStyle,
    },
}

/// A `DrawContext` that records commands for later replay or export
#[derive(Debug)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    opacity_stack: Vec<f32>,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            opacity_stack: vec![1.0],
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawContext for RecordingContext {
    fn push_transform(&mut self, transform: Transform) {
        self.commands.push(DrawCommand::PushTransform(transform));
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
    }

    fn push_clip(&mut self, shape: ClipShape) {
        self.commands.push(DrawCommand::PushClip(shape));
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCommand::PopClip);
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.commands.push(DrawCommand::PushOpacity(opacity));
        let current = self.current_opacity();
        self.opacity_stack.push(current * opacity.clamp(0.0, 1.0));
    }

    fn pop_opacity(&mut self) {
        self.commands.push(DrawCommand::PopOpacity);
        if self.opacity_stack.len() > 1 {
            self.opacity_stack.pop();
        }
    }

    fn push_filter(&mut self, filter: ColorFilter) {
        self.commands.push(DrawCommand::PushFilter(filter));
    }

    fn pop_filter(&mut self) {
        self.commands.push(DrawCommand::PopFilter);
    }

    fn fill_path(&mut self, path: &Path, brush: Brush) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            brush,
        });
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, brush: Brush) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
            brush,
        });
    }

    fn draw_inner_shadow(&mut self, path: &Path, shadow: Shadow) {
        self.commands.push(DrawCommand::DrawInnerShadow {
            path: path.clone(),
            shadow,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::DrawText {
            text: text.to_string(),
            origin,
            style: style.clone(),
        });
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn current_opacity(&self) -> f32 {
        self.opacity_stack.last().copied().unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_data() {
        let path = Path::new().move_to(0.0, 0.0).line_to(10.5, 0.0).close();
        assert_eq!(path.to_svg_data(), "M 0 0 L 10.5 0 Z");
    }

    #[test]
    fn test_lerp_requires_matching_structure() {
        let a = Path::rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = Path::rect(Rect::new(0.0, 0.0, 10.0, 20.0));
        let mid = a.lerp(&b, 0.5).unwrap();
        assert_eq!(mid.bounds(), Rect::new(0.0, 0.0, 10.0, 15.0));

        let c = Path::new().move_to(0.0, 0.0).close();
        assert!(a.lerp(&c, 0.5).is_none());
    }

    #[test]
    fn test_recording_opacity_stack() {
        let mut ctx = RecordingContext::new(Size::new(10.0, 10.0));
        ctx.push_opacity(0.5);
        ctx.push_opacity(0.5);
        assert!((ctx.current_opacity() - 0.25).abs() < 1e-6);
        ctx.pop_opacity();
        ctx.pop_opacity();
        assert!((ctx.current_opacity() - 1.0).abs() < 1e-6);
        assert_eq!(ctx.commands().len(), 4);
    }
}

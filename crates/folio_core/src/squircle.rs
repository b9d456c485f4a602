//! Squircle outline generation
//!
//! Produces rounded-rectangle outlines with continuous curvature at the
//! corners. Each corner is a circular arc blended into the straight edges by
//! two cubic fillets. The smoothing factor trades arc for fillet: at 0 the
//! corner is a plain quarter circle, at 1 the arc vanishes and the corner is
//! two fillets meeting at 45 degrees.
//!
//! Outlines are pure functions of their inputs. Invalid inputs are clamped,
//! never rejected.
//!
//! ```
//! use folio_core::squircle::generate_outline;
//!
//! let outline = generate_outline(200.0, 268.0, 20.0, 1.0);
//! assert!(outline.is_closed());
//! assert_eq!(outline, generate_outline(200.0, 268.0, 20.0, 1.0));
//! ```

use std::f32::consts::SQRT_2;

use crate::draw::Path;
use crate::error::GeometryError;
use crate::flatten::{self, Polyline, DEFAULT_TOLERANCE};
use crate::geometry::{Point, Rect, Size, Vec2};

/// Below this a length is treated as zero
const EPSILON: f32 = 1e-6;

// ─────────────────────────────────────────────────────────────────────────────
// Inputs
// ─────────────────────────────────────────────────────────────────────────────

/// Corner radius and smoothing
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerSpec {
    pub radius: f32,
    /// 0.0 = circular arc, 1.0 = maximally smooth
    pub smoothing: f32,
}

impl CornerSpec {
    pub const fn new(radius: f32, smoothing: f32) -> Self {
        Self { radius, smoothing }
    }
}

/// Width and height of a book instance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    width: f32,
    height: f32,
}

impl Dimensions {
    /// Standard notebook cover
    pub const COVER: Dimensions = Dimensions {
        width: 200.0,
        height: 268.0,
    };

    /// Smallest side accepted by [`Dimensions::clamped`]
    pub const MIN_EXTENT: f32 = 1.0;

    /// Validate dimensions, rejecting non-positive or non-finite sides
    pub fn try_new(width: f32, height: f32) -> Result<Self, GeometryError> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(GeometryError::InvalidDimensions { width, height })
        }
    }

    /// Clamp each side to at least [`Dimensions::MIN_EXTENT`]
    pub fn clamped(width: f32, height: f32) -> Self {
        let fix = |v: f32| {
            if v.is_finite() {
                v.max(Self::MIN_EXTENT)
            } else {
                Self::MIN_EXTENT
            }
        };
        let clamped = Self {
            width: fix(width),
            height: fix(height),
        };
        if clamped.width != width || clamped.height != height {
            tracing::warn!(
                width,
                height,
                "clamping book dimensions to {}x{}",
                clamped.width,
                clamped.height
            );
        }
        clamped
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::COVER
    }
}

impl TryFrom<Size> for Dimensions {
    type Error = GeometryError;

    fn try_from(size: Size) -> Result<Self, Self::Error> {
        Self::try_new(size.width, size.height)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Outline
// ─────────────────────────────────────────────────────────────────────────────

/// A closed squircle outline
///
/// Carries the path together with the size it was generated for and the
/// effective corner parameters after clamping.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    path: Path,
    size: Size,
    corner: CornerSpec,
}

impl Outline {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Corner parameters actually used (radius and smoothing after clamping)
    pub fn corner(&self) -> CornerSpec {
        self.corner
    }

    pub fn bounds(&self) -> Rect {
        self.path.bounds()
    }

    pub fn is_closed(&self) -> bool {
        self.path.is_closed()
    }

    /// SVG path data, byte-identical for identical inputs
    pub fn to_svg_path_data(&self) -> String {
        self.path.to_svg_data()
    }

    /// Flattened polygon of the outline
    pub fn flatten(&self) -> Vec<Polyline> {
        flatten::flatten(&self.path, DEFAULT_TOLERANCE)
    }

    /// Whether the outline is a single closed contour without self-intersections
    pub fn is_simple(&self) -> bool {
        let polys = self.flatten();
        polys.len() == 1 && polys[0].closed && flatten::is_simple(&polys[0])
    }

    /// Hit-test a point in outline-local coordinates
    pub fn contains(&self, point: Point) -> bool {
        if !self.size.to_rect().contains(point) {
            return false;
        }
        flatten::contains(&self.flatten(), point)
    }

    /// Blend towards `other`, falling back to the nearer endpoint when the
    /// two outlines do not share a command structure
    pub fn lerp(&self, other: &Outline, t: f32) -> Outline {
        match self.path.lerp(&other.path, t) {
            Some(path) => Outline {
                path,
                size: Size::new(
                    self.size.width + (other.size.width - self.size.width) * t,
                    self.size.height + (other.size.height - self.size.height) * t,
                ),
                corner: CornerSpec::new(
                    self.corner.radius + (other.corner.radius - self.corner.radius) * t,
                    self.corner.smoothing + (other.corner.smoothing - self.corner.smoothing) * t,
                ),
            },
            None if t < 0.5 => self.clone(),
            None => other.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Corner parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Lengths describing one corner, all measured along the edges
#[derive(Clone, Copy, Debug, PartialEq)]
struct CornerParams {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    /// Run length of the corner along each adjacent edge
    p: f32,
    /// Chord projection of the circular arc
    arc_section: f32,
    radius: f32,
    smoothing: f32,
}

impl CornerParams {
    fn compute(radius: f32, smoothing: f32, budget: f32) -> Self {
        let radius = radius.min(budget);
        if radius <= EPSILON {
            return Self {
                a: 0.0,
                b: 0.0,
                c: 0.0,
                d: 0.0,
                p: 0.0,
                arc_section: 0.0,
                radius: 0.0,
                smoothing,
            };
        }

        let mut smoothing = smoothing;
        let mut p = (1.0 + smoothing) * radius;
        if p > budget {
            smoothing = smoothing.min(budget / radius - 1.0).max(0.0);
            p = p.min(budget);
        }

        let arc_measure = 90.0 * (1.0 - smoothing);
        let arc_section = (arc_measure / 2.0).to_radians().sin() * radius * SQRT_2;

        let angle_alpha = (90.0 - arc_measure) / 2.0;
        let p3_to_p4 = radius * (angle_alpha / 2.0).to_radians().tan();

        let angle_beta = 45.0 * smoothing;
        let c = p3_to_p4 * angle_beta.to_radians().cos();
        let d = c * angle_beta.to_radians().tan();

        let b = ((p - arc_section - c - d) / 3.0).max(0.0);
        let a = 2.0 * b;

        Self {
            a,
            b,
            c,
            d,
            p,
            arc_section,
            radius,
            smoothing,
        }
    }

    fn has_fillets(&self) -> bool {
        self.a + self.b + self.c + self.d > EPSILON
    }
}

/// Append one corner starting at the current point `from`
///
/// `u` points along the incoming edge, `v` along the outgoing edge. Returns
/// the corner's end point.
fn corner(path: Path, from: Point, u: Vec2, v: Vec2, k: &CornerParams) -> (Path, Point) {
    let at = |origin: Point, du: f32, dv: f32| {
        Point::new(
            origin.x + u.x * du + v.x * dv,
            origin.y + u.y * du + v.y * dv,
        )
    };

    if k.radius <= EPSILON {
        let end = at(from, k.p, k.p);
        return (path, end);
    }

    let mut path = path;
    let mut cursor = from;

    if k.has_fillets() {
        let c1 = at(cursor, k.a, 0.0);
        let c2 = at(cursor, k.a + k.b, 0.0);
        let end = at(cursor, k.a + k.b + k.c, k.d);
        path = path.cubic_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
        cursor = end;
    }

    if k.arc_section > EPSILON {
        let end = at(cursor, k.arc_section, k.arc_section);
        path = path.arc_to(Vec2::splat(k.radius), 0.0, false, true, end.x, end.y);
        cursor = end;
    }

    if k.has_fillets() {
        let c1 = at(cursor, k.d, k.c);
        let c2 = at(cursor, k.d, k.b + k.c);
        let end = at(cursor, k.d, k.a + k.b + k.c);
        path = path.cubic_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
        cursor = end;
    }

    (path, cursor)
}

fn sanitize(name: &'static str, value: f32, max: f32) -> f32 {
    if !value.is_finite() || value < 0.0 {
        tracing::warn!(value, "{name} is invalid, using 0");
        0.0
    } else if value > max {
        tracing::debug!(value, max, "clamping {name}");
        max
    } else {
        value
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate a squircle outline
///
/// Width and height that are negative or not finite become 0. The radius is
/// clamped to `[0, min(width, height) / 2]` and smoothing to `[0, 1]`. When
/// the corner run `(1 + smoothing) * radius` exceeds half the shorter side,
/// smoothing is reduced until it fits.
pub fn generate_outline(width: f32, height: f32, corner_radius: f32, smoothing: f32) -> Outline {
    let w = sanitize("width", width, f32::MAX);
    let h = sanitize("height", height, f32::MAX);
    let budget = w.min(h) / 2.0;
    let radius = sanitize("corner radius", corner_radius, budget);
    let smoothing = sanitize("smoothing", smoothing, 1.0);

    let k = CornerParams::compute(radius, smoothing, budget);

    let right = Vec2::new(1.0, 0.0);
    let down = Vec2::new(0.0, 1.0);
    let left = Vec2::new(-1.0, 0.0);
    let up = Vec2::new(0.0, -1.0);

    let start = Point::new(w - k.p, 0.0);
    let path = Path::new().move_to(start.x, start.y);

    let (path, _) = corner(path, start, right, down, &k);
    let path = path.line_to(w, h - k.p);
    let (path, _) = corner(path, Point::new(w, h - k.p), down, left, &k);
    let path = path.line_to(k.p, h);
    let (path, _) = corner(path, Point::new(k.p, h), left, up, &k);
    let path = path.line_to(0.0, k.p);
    let (path, _) = corner(path, Point::new(0.0, k.p), up, right, &k);
    let path = path.close();

    Outline {
        path,
        size: Size::new(w, h),
        corner: CornerSpec::new(k.radius, k.smoothing),
    }
}

/// Generate an outline from validated dimensions and a corner spec
pub fn outline_for(dimensions: Dimensions, corner: CornerSpec) -> Outline {
    generate_outline(
        dimensions.width(),
        dimensions.height(),
        corner.radius,
        corner.smoothing,
    )
}

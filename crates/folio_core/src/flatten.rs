//! Path flattening
//!
//! Converts a `Path` into lyon path events and flattens them into polylines.
//! Used for outline validation (self-intersection) and point hit-testing.

use lyon::math::point;
use lyon::path::iterator::PathIterator;
use lyon::path::PathEvent;

use crate::draw::{Path, PathCommand};
use crate::geometry::{Point, Vec2};

/// Default flattening tolerance in pixels
pub const DEFAULT_TOLERANCE: f32 = 0.05;

/// A flattened subpath
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Polyline {
    /// Edges of the polyline, including the closing edge when closed
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        let count = if self.closed && n > 2 { n } else { n.saturating_sub(1) };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// Convert an SVG arc to cubic bezier curves
///
/// Endpoint parameterization per the SVG implementation notes, split into
/// segments of at most 90 degrees.
fn arc_to_cubics(
    from: Point,
    radii: Vec2,
    x_rotation: f32,
    large_arc: bool,
    sweep: bool,
    to: Point,
) -> Vec<(Point, Point, Point)> {
    let mut curves = Vec::new();

    if from == to {
        return curves;
    }

    let mut rx = radii.x.abs();
    let mut ry = radii.y.abs();
    if rx == 0.0 || ry == 0.0 {
        return curves;
    }

    let cos_phi = x_rotation.cos();
    let sin_phi = x_rotation.sin();

    let dx = (from.x - to.x) / 2.0;
    let dy = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx + sin_phi * dy;
    let y1p = -sin_phi * dx + cos_phi * dy;

    // Scale radii up when they cannot span the endpoints
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let rx_sq = rx * rx;
    let ry_sq = ry * ry;
    let x1p_sq = x1p * x1p;
    let y1p_sq = y1p * y1p;

    let numer = (rx_sq * ry_sq - rx_sq * y1p_sq - ry_sq * x1p_sq).max(0.0);
    let denom = rx_sq * y1p_sq + ry_sq * x1p_sq;
    let sq = if denom > 0.0 {
        (numer / denom).sqrt()
    } else {
        0.0
    };

    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let cxp = sign * sq * rx * y1p / ry;
    let cyp = sign * sq * -ry * x1p / rx;

    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    fn angle(ux: f32, uy: f32, vx: f32, vy: f32) -> f32 {
        let dot = ux * vx + uy * vy;
        let len = (ux * ux + uy * uy).sqrt() * (vx * vx + vy * vy).sqrt();
        let a = (dot / len).clamp(-1.0, 1.0).acos();
        if ux * vy - uy * vx < 0.0 {
            -a
        } else {
            a
        }
    }

    let theta1 = angle(1.0, 0.0, (x1p - cxp) / rx, (y1p - cyp) / ry);
    let mut dtheta = angle(
        (x1p - cxp) / rx,
        (y1p - cyp) / ry,
        (-x1p - cxp) / rx,
        (-y1p - cyp) / ry,
    );

    if sweep && dtheta < 0.0 {
        dtheta += std::f32::consts::TAU;
    } else if !sweep && dtheta > 0.0 {
        dtheta -= std::f32::consts::TAU;
    }

    let segments = ((dtheta.abs() / std::f32::consts::FRAC_PI_2).ceil() as usize).max(1);
    let step = dtheta / segments as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let on_ellipse = |t: f32| {
        let (s, c) = t.sin_cos();
        Point::new(
            cx + rx * cos_phi * c - ry * sin_phi * s,
            cy + rx * sin_phi * c + ry * cos_phi * s,
        )
    };
    let tangent = |t: f32| {
        let (s, c) = t.sin_cos();
        Vec2::new(
            -rx * cos_phi * s - ry * sin_phi * c,
            -rx * sin_phi * s + ry * cos_phi * c,
        )
    };

    for i in 0..segments {
        let t1 = theta1 + i as f32 * step;
        let t2 = t1 + step;
        let p0 = on_ellipse(t1);
        let mut p3 = on_ellipse(t2);
        if i + 1 == segments {
            p3 = to;
        }
        let d1 = tangent(t1);
        let d2 = tangent(t2);
        curves.push((
            Point::new(p0.x + k * d1.x, p0.y + k * d1.y),
            Point::new(p3.x - k * d2.x, p3.y - k * d2.y),
            p3,
        ));
    }

    curves
}

/// Convert a `Path` to lyon path events
pub fn path_to_lyon_events(path: &Path) -> Vec<PathEvent> {
    let mut events = Vec::new();
    let mut first_point: Option<Point> = None;
    let mut current = Point::ZERO;

    let lp = |p: Point| point(p.x, p.y);

    // Open an implicit subpath at the current point if needed
    fn ensure_begin(
        events: &mut Vec<PathEvent>,
        first_point: &mut Option<Point>,
        current: Point,
    ) {
        if first_point.is_none() {
            events.push(PathEvent::Begin {
                at: point(current.x, current.y),
            });
            *first_point = Some(current);
        }
    }

    for cmd in path.commands() {
        match cmd {
            PathCommand::MoveTo(p) => {
                if let Some(first) = first_point {
                    events.push(PathEvent::End {
                        last: lp(current),
                        first: lp(first),
                        close: false,
                    });
                }
                events.push(PathEvent::Begin { at: lp(*p) });
                first_point = Some(*p);
                current = *p;
            }
            PathCommand::LineTo(p) => {
                ensure_begin(&mut events, &mut first_point, current);
                events.push(PathEvent::Line {
                    from: lp(current),
                    to: lp(*p),
                });
                current = *p;
            }
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => {
                ensure_begin(&mut events, &mut first_point, current);
                events.push(PathEvent::Cubic {
                    from: lp(current),
                    ctrl1: lp(*control1),
                    ctrl2: lp(*control2),
                    to: lp(*end),
                });
                current = *end;
            }
            PathCommand::ArcTo {
                radii,
                rotation,
                large_arc,
                sweep,
                end,
            } => {
                ensure_begin(&mut events, &mut first_point, current);
                let cubics = arc_to_cubics(current, *radii, *rotation, *large_arc, *sweep, *end);
                if cubics.is_empty() {
                    events.push(PathEvent::Line {
                        from: lp(current),
                        to: lp(*end),
                    });
                } else {
                    let mut prev = current;
                    for (c1, c2, to) in cubics {
                        events.push(PathEvent::Cubic {
                            from: lp(prev),
                            ctrl1: lp(c1),
                            ctrl2: lp(c2),
                            to: lp(to),
                        });
                        prev = to;
                    }
                }
                current = *end;
            }
            PathCommand::Close => {
                if let Some(first) = first_point.take() {
                    events.push(PathEvent::End {
                        last: lp(current),
                        first: lp(first),
                        close: true,
                    });
                    current = first;
                }
            }
        }
    }

    if let Some(first) = first_point {
        events.push(PathEvent::End {
            last: lp(current),
            first: lp(first),
            close: false,
        });
    }

    events
}

/// Flatten a path into polylines
///
/// Consecutive duplicate points are dropped, as is a trailing point that
/// repeats the start of a closed subpath.
pub fn flatten(path: &Path, tolerance: f32) -> Vec<Polyline> {
    let events = path_to_lyon_events(path);
    let mut out = Vec::new();
    let mut current = Polyline::default();

    let push = |poly: &mut Polyline, p: Point| {
        if poly
            .points
            .last()
            .map_or(true, |last| last.distance(p) > 1e-4)
        {
            poly.points.push(p);
        }
    };

    for event in events.iter().cloned().flattened(tolerance) {
        match event {
            PathEvent::Begin { at } => {
                current = Polyline::default();
                push(&mut current, Point::new(at.x, at.y));
            }
            PathEvent::Line { to, .. } => push(&mut current, Point::new(to.x, to.y)),
            PathEvent::End { close, .. } => {
                let mut poly = std::mem::take(&mut current);
                poly.closed = close;
                if close && poly.points.len() > 1 {
                    let first = poly.points[0];
                    if poly.points.last().is_some_and(|l| l.distance(first) <= 1e-4) {
                        poly.points.pop();
                    }
                }
                out.push(poly);
            }
            // Flattened iterators only yield lines
            PathEvent::Quadratic { to, .. } | PathEvent::Cubic { to, .. } => {
                push(&mut current, Point::new(to.x, to.y))
            }
        }
    }

    out
}

fn orient(a: Point, b: Point, c: Point) -> f64 {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    let (cx, cy) = (c.x as f64, c.y as f64);
    (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
}

fn segments_cross(a: (Point, Point), b: (Point, Point)) -> bool {
    const EPS: f64 = 1e-7;
    let o1 = orient(a.0, a.1, b.0);
    let o2 = orient(a.0, a.1, b.1);
    let o3 = orient(b.0, b.1, a.0);
    let o4 = orient(b.0, b.1, a.1);

    if o1.abs() < EPS && o2.abs() < EPS {
        // Collinear: overlapping interiors count as an intersection
        let (dx, dy) = ((a.1.x - a.0.x) as f64, (a.1.y - a.0.y) as f64);
        let len_sq = dx * dx + dy * dy;
        if len_sq < EPS {
            return false;
        }
        let proj = |p: Point| ((p.x - a.0.x) as f64 * dx + (p.y - a.0.y) as f64 * dy) / len_sq;
        let (t0, t1) = {
            let (u, v) = (proj(b.0), proj(b.1));
            (u.min(v), u.max(v))
        };
        return t1 > 1e-6 && t0 < 1.0 - 1e-6;
    }

    (o1 > EPS && o2 < -EPS || o1 < -EPS && o2 > EPS)
        && (o3 > EPS && o4 < -EPS || o3 < -EPS && o4 > EPS)
}

/// Whether no two non-adjacent edges of the polyline intersect
pub fn is_simple(poly: &Polyline) -> bool {
    let edges: Vec<_> = poly.edges().collect();
    let n = edges.len();
    for i in 0..n {
        for j in (i + 2)..n {
            // First and last edges share the start vertex of a closed polyline
            if poly.closed && i == 0 && j == n - 1 {
                continue;
            }
            if segments_cross(edges[i], edges[j]) {
                return false;
            }
        }
    }
    true
}

/// Even-odd point containment over a set of closed polylines
pub fn contains(polys: &[Polyline], p: Point) -> bool {
    let mut inside = false;
    for poly in polys {
        let n = poly.points.len();
        if n < 3 {
            continue;
        }
        let mut j = n - 1;
        for i in 0..n {
            let pi = poly.points[i];
            let pj = poly.points[j];
            if (pi.y > p.y) != (pj.y > p.y) {
                let x = pj.x + (p.y - pj.y) / (pi.y - pj.y) * (pi.x - pj.x);
                if p.x < x {
                    inside = !inside;
                }
            }
            j = i;
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn test_arc_endpoints() {
        let cubics = arc_to_cubics(
            Point::new(10.0, 0.0),
            Vec2::splat(10.0),
            0.0,
            false,
            true,
            Point::new(20.0, 10.0),
        );
        assert_eq!(cubics.len(), 1);
        let (c1, c2, end) = cubics[0];
        assert_eq!(end, Point::new(20.0, 10.0));
        // Quarter circle handles are 0.5523 * r long
        assert!((c1.x - 15.523).abs() < 0.01 && c1.y.abs() < 0.01);
        assert!((c2.x - 20.0).abs() < 0.01 && (c2.y - 4.477).abs() < 0.01);
    }

    #[test]
    fn test_flatten_rounded_rect() {
        let path = Path::rounded_rect(Rect::new(0.0, 0.0, 100.0, 60.0), 10.0);
        let polys = flatten(&path, DEFAULT_TOLERANCE);
        assert_eq!(polys.len(), 1);
        assert!(polys[0].closed);
        assert!(polys[0].points.len() > 8);
        assert!(is_simple(&polys[0]));
    }

    #[test]
    fn test_bow_tie_is_not_simple() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .line_to(10.0, 10.0)
            .line_to(10.0, 0.0)
            .line_to(0.0, 10.0)
            .close();
        let polys = flatten(&path, DEFAULT_TOLERANCE);
        assert!(!is_simple(&polys[0]));
    }

    #[test]
    fn test_contains() {
        let path = Path::rounded_rect(Rect::new(0.0, 0.0, 100.0, 100.0), 50.0);
        let polys = flatten(&path, DEFAULT_TOLERANCE);
        assert!(contains(&polys, Point::new(50.0, 50.0)));
        // Corner of the bounding box is outside the circle
        assert!(!contains(&polys, Point::new(2.0, 2.0)));
    }
}

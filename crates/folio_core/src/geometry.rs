//! Core geometry types
//!
//! Points, sizes and rectangles used by outlines and layers, plus the two
//! transform representations the book painter needs: 2D affine matrices for
//! flat offsets and 4x4 matrices for the cover/page hinge rotation.

// ─────────────────────────────────────────────────────────────────────────────
// Points and Sizes
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation between two points (t is not clamped)
    pub fn lerp(&self, other: Point, t: f32) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// 2D vector (radii, offsets)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Length of the shorter side
    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rectangles
// ─────────────────────────────────────────────────────────────────────────────

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.max_x()
            && point.y >= self.origin.y
            && point.y <= self.max_y()
    }
}

impl From<Size> for Rect {
    fn from(size: Size) -> Self {
        size.to_rect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transforms
// ─────────────────────────────────────────────────────────────────────────────

/// 2D affine transformation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2D {
    /// Matrix elements [a, b, c, d, tx, ty]
    /// | a  c  tx |
    /// | b  d  ty |
    /// | 0  0   1 |
    pub elements: [f32; 6],
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

}

/// 4x4 transformation matrix (column-major)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Rotation around the Y axis (radians)
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            cols: [
                [c, 0.0, -s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// CSS-style perspective with the viewer at `distance` along +Z
    pub fn perspective(distance: f32) -> Self {
        let mut m = Self::IDENTITY;
        if distance > 0.0 {
            m.cols[2][3] = -1.0 / distance;
        }
        m
    }

    /// Rotation around a vertical hinge line at `origin_x`
    ///
    /// Equivalent to `translate(ox) * rotateY(angle) * translate(-ox)`.
    pub fn hinge_y(angle: f32, origin_x: f32) -> Self {
        Mat4::translation(origin_x, 0.0, 0.0)
            .mul(&Mat4::rotation_y(angle))
            .mul(&Mat4::translation(-origin_x, 0.0, 0.0))
    }

    /// Multiply two matrices
    pub fn mul(&self, other: &Mat4) -> Mat4 {
        let mut result = [[0.0f32; 4]; 4];
        for (i, col) in result.iter_mut().enumerate() {
            for (j, cell) in col.iter_mut().enumerate() {
                for k in 0..4 {
                    *cell += self.cols[k][j] * other.cols[i][k];
                }
            }
        }
        Mat4 { cols: result }
    }

    /// Drop the Z and W rows, keeping the in-plane part of the transform
    pub fn to_affine_2d(&self) -> Affine2D {
        let c = &self.cols;
        Affine2D {
            elements: [c[0][0], c[0][1], c[1][0], c[1][1], c[3][0], c[3][1]],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Project a point on the z=0 plane through `m`
    fn project(m: &Mat4, point: Point) -> Point {
        let c = &m.cols;
        let x = c[0][0] * point.x + c[1][0] * point.y + c[3][0];
        let y = c[0][1] * point.x + c[1][1] * point.y + c[3][1];
        let w = c[0][3] * point.x + c[1][3] * point.y + c[3][3];
        Point::new(x / w, y / w)
    }

    #[test]
    fn test_rect_center_and_contains() {
        let rect = Rect::new(0.0, 0.0, 200.0, 268.0);
        assert_eq!(rect.center(), Point::new(100.0, 134.0));
        assert!(rect.contains(Point::new(200.0, 0.0)));
        assert!(!rect.contains(Point::new(200.5, 10.0)));
    }

    #[test]
    fn test_hinge_keeps_hinge_line_fixed() {
        let m = Mat4::hinge_y(-1.2, 0.0);
        let on_hinge = project(&m, Point::new(0.0, 50.0));
        assert!((on_hinge.x).abs() < 1e-5);
        assert!((on_hinge.y - 50.0).abs() < 1e-5);

        // Free edge swings toward the hinge in projection
        let free = project(&m, Point::new(200.0, 50.0));
        assert!((free.x - 200.0 * (1.2f32).cos()).abs() < 1e-3);
    }

    #[test]
    fn test_flat_matrix_drops_to_translation() {
        let m = Mat4::translation(12.0, -4.0, 30.0);
        assert_eq!(m.to_affine_2d(), Affine2D::translation(12.0, -4.0));
        assert_eq!(Mat4::default().to_affine_2d(), Affine2D::IDENTITY);
    }
}

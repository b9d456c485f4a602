//! Folio Core
//!
//! Foundational primitives for the Folio notebook renderer:
//!
//! - **Geometry**: points, rectangles, 2D affine and 4x4 transforms
//! - **Paint**: colors, gradients, ruling patterns, grain noise, shadows
//! - **Squircle Outlines**: smooth-cornered rounded rectangles with a
//!   memoizing cache
//! - **Draw Context**: recording rendering API that books paint onto
//!
//! # Example
//!
//! ```rust
//! use folio_core::{generate_outline, OutlineCache};
//!
//! let outline = generate_outline(200.0, 268.0, 20.0, 1.0);
//! assert!(outline.is_simple());
//!
//! let mut cache = OutlineCache::new();
//! let shared = cache.get_or_generate(200.0, 268.0, 20.0, 1.0);
//! assert_eq!(*shared, outline);
//! ```

pub mod cache;
pub mod draw;
pub mod error;
pub mod flatten;
pub mod geometry;
pub mod paint;
pub mod squircle;

pub use cache::{CacheStats, OutlineCache};
pub use draw::{
    ClipShape, DrawCommand, DrawContext, FontWeight, Path, PathCommand,
    RecordingContext, Stroke, TextAlign, TextStyle, Transform,
};
pub use error::GeometryError;
pub use flatten::Polyline;
pub use geometry::{Affine2D, Mat4, Point, Rect, Size, Vec2};
pub use paint::{
    Brush, Color, ColorFilter, DotGrid, Gradient, GradientStop, NoiseStyle, Pattern, Shadow,
    StripeSet,
};
pub use squircle::{generate_outline, outline_for, CornerSpec, Dimensions, Outline};

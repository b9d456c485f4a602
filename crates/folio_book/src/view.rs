//! Book view
//!
//! The composition root: owns a book's outlines, layers and animation
//! driver, routes host events, and paints the current frame onto any
//! [`DrawContext`].
//!
//! ```rust
//! use folio_book::{render_book, BookConfig, BookEvent};
//! use folio_core::Dimensions;
//! use folio_theme::{ColorKey, PatternKey};
//!
//! let config = BookConfig::new("Istorie", ColorKey::Emerald, PatternKey::Dictando).unwrap();
//! let mut book = render_book(config, Dimensions::COVER);
//! book.handle_event(BookEvent::PointerEnter);
//! book.tick(16.0);
//! let svg = book.to_svg();
//! assert!(svg.contains("ISTORIE"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use folio_core::{
    Brush, ClipShape, Dimensions, DrawContext, Outline, OutlineCache, Path, Point,
    RecordingContext, Stroke, Transform,
};

use crate::compositor::{build_layers, FillChannel, FillRegion, Layer, LayerRole};
use crate::config::{BookConfig, BookVariant, MotionConfig};
use crate::driver::AnimationDriver;
use crate::error::Result;
use crate::frame::FrameParams;
use crate::outlines::BookOutlines;
use crate::state::{BookEvent, InteractionState};
use crate::svg::commands_to_svg;

static NEXT_BOOK_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a mounted book
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(u64);

impl BookId {
    fn next() -> Self {
        BookId(NEXT_BOOK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "book-{}", self.0)
    }
}

/// Mount a hover-variant book with default motion
pub fn render_book(config: BookConfig, dimensions: Dimensions) -> BookView {
    let motion = MotionConfig::default();
    let mut cache = OutlineCache::new();
    BookView::mount(config, dimensions, BookVariant::Hover, motion, &mut cache)
}

/// Mount a book with an explicit variant and motion, sharing `cache`
pub fn render_book_with(
    config: BookConfig,
    dimensions: Dimensions,
    variant: BookVariant,
    motion: MotionConfig,
    cache: &mut OutlineCache,
) -> Result<BookView> {
    motion.validate()?;
    Ok(BookView::mount(config, dimensions, variant, motion, cache))
}

/// A mounted, interactive book
#[derive(Debug)]
pub struct BookView {
    id: BookId,
    config: BookConfig,
    dimensions: Dimensions,
    outlines: BookOutlines,
    layers: Vec<Layer>,
    driver: AnimationDriver,
}

impl BookView {
    fn mount(
        config: BookConfig,
        dimensions: Dimensions,
        variant: BookVariant,
        motion: MotionConfig,
        cache: &mut OutlineCache,
    ) -> Self {
        let id = BookId::next();
        let outlines = BookOutlines::build(dimensions, variant, &motion, cache);
        let layers = build_layers(&config, &outlines, variant, &motion);
        let driver = AnimationDriver::new(variant, motion, dimensions.width());
        tracing::debug!(
            %id,
            title = config.title(),
            color = %config.color(),
            pattern = %config.pattern(),
            %variant,
            "mounted book"
        );
        Self {
            id,
            config,
            dimensions,
            outlines,
            layers,
            driver,
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn variant(&self) -> BookVariant {
        self.driver.variant()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn outlines(&self) -> &BookOutlines {
        &self.outlines
    }

    pub fn state(&self) -> InteractionState {
        self.driver.state()
    }

    pub fn frame(&self) -> &FrameParams {
        self.driver.frame()
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    /// Route a host event; returns whether the animation target changed
    pub fn handle_event(&mut self, event: BookEvent) -> bool {
        self.driver.handle_event(&event)
    }

    /// Advance animations by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) -> &FrameParams {
        self.driver.tick(dt_ms)
    }

    /// Front cover outline for the current frame
    pub fn front_outline(&self) -> Cow<'_, Outline> {
        let blend = self.frame().front_cover.height_blend;
        if blend == 0.0 {
            Cow::Borrowed(&*self.outlines.cover)
        } else {
            Cow::Owned(self.outlines.front_cover_at(blend))
        }
    }

    /// Whether a book-local point falls on the front cover
    pub fn hit_test(&self, point: Point) -> bool {
        let lift = self.frame().front_cover.lift_px;
        self.front_outline()
            .contains(Point::new(point.x, point.y - lift))
    }

    /// Paint every visible layer, back to front
    pub fn paint(&self, ctx: &mut dyn DrawContext) {
        let frame = self.frame();
        let cover = frame.front_cover;
        let size = self.dimensions.size();
        let center = Point::new(size.width / 2.0, size.height / 2.0);
        let perspective = self.variant().perspective();

        // Whole-book lift and tilt
        let tilted = cover.lift_px != 0.0 || cover.tilt_deg != 0.0;
        if tilted {
            ctx.push_transform(Transform::translate(0.0, cover.lift_px));
            ctx.push_transform(Transform::hinge(cover.tilt_deg, center.x, center, perspective));
        }

        for layer in &self.layers {
            self.paint_layer(ctx, layer, frame, center, perspective);
        }

        if tilted {
            ctx.pop_transform();
            ctx.pop_transform();
        }
    }

    fn paint_layer(
        &self,
        ctx: &mut dyn DrawContext,
        layer: &Layer,
        frame: &FrameParams,
        center: Point,
        perspective: f32,
    ) {
        let opacity = layer.opacity * frame.layer_opacity(layer.role);
        if opacity <= 0.0 {
            return;
        }

        ctx.push_transform(Transform::translate(layer.offset.x, layer.offset.y));

        let rotation = match layer.role {
            LayerRole::FrontCover => frame.front_cover.rotation_y_deg,
            LayerRole::Page(page) => frame.page_rotation(page),
            _ => 0.0,
        };
        let rotated = rotation != 0.0;
        if rotated {
            let local_center = Point::new(center.x - layer.offset.x, center.y - layer.offset.y);
            ctx.push_transform(Transform::hinge(
                rotation,
                layer.transform_origin.x,
                local_center,
                perspective,
            ));
        }

        let faded = opacity < 1.0;
        if faded {
            ctx.push_opacity(opacity);
        }

        let outline = match layer.role {
            LayerRole::FrontCover => self.front_outline(),
            _ => Cow::Borrowed(&*layer.outline),
        };
        let path = outline.path();
        ctx.push_clip(ClipShape::Path(path.clone()));

        let filter = match layer.role {
            LayerRole::FrontCover => frame.color_filter(self.driver.motion().brightness_boost),
            _ => folio_core::ColorFilter::NONE,
        };
        let filtered = !filter.is_none();
        if filtered {
            ctx.push_filter(filter);
        }

        for fill in &layer.fills {
            let alpha = fill.opacity
                * match fill.channel {
                    FillChannel::Static => 1.0,
                    FillChannel::LightOverlay => frame.light_overlay_opacity,
                };
            if alpha <= 0.0 {
                continue;
            }
            let region = match fill.region {
                FillRegion::Full => Cow::Borrowed(path),
                FillRegion::Rect(rect) => Cow::Owned(Path::rect(rect)),
            };
            if alpha < 1.0 {
                ctx.push_opacity(alpha);
                ctx.fill_path(&region, fill.brush.clone());
                ctx.pop_opacity();
            } else {
                ctx.fill_path(&region, fill.brush.clone());
            }
        }

        for shadow in &layer.inner_shadows {
            ctx.draw_inner_shadow(path, *shadow);
        }

        if let Some(border) = layer.border {
            ctx.stroke_path(path, &Stroke::new(border.width).inside(), Brush::Solid(border.color));
        }

        if let Some(title) = &layer.title {
            for (line, origin) in title.layout.lines.iter().zip(title.layout.line_origins()) {
                ctx.draw_text(line, origin, &title.style);
            }
        }

        if filtered {
            ctx.pop_filter();
        }
        ctx.pop_clip();
        if faded {
            ctx.pop_opacity();
        }
        if rotated {
            ctx.pop_transform();
        }
        ctx.pop_transform();
    }

    /// Serialize the current frame as a standalone SVG document
    pub fn to_svg(&self) -> String {
        let mut ctx = RecordingContext::new(self.dimensions.size());
        self.paint(&mut ctx);
        commands_to_svg(ctx.commands(), ctx.viewport_size(), &self.id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{DrawCommand, Size};
    use folio_theme::{ColorKey, PatternKey};

    fn book(title: &str, color: ColorKey, pattern: PatternKey) -> BookView {
        let config = BookConfig::new(title, color, pattern).expect("valid config");
        render_book(config, Dimensions::COVER)
    }

    fn drag_book() -> BookView {
        let config = BookConfig::new("Fizica", ColorKey::Slate, PatternKey::Punctat)
            .expect("valid config");
        render_book_with(
            config,
            Dimensions::COVER,
            BookVariant::Drag,
            MotionConfig::default(),
            &mut OutlineCache::new(),
        )
        .expect("valid motion")
    }

    fn texts(book: &BookView) -> Vec<(String, f32)> {
        let mut ctx = RecordingContext::new(Size::new(200.0, 268.0));
        book.paint(&mut ctx);
        ctx.commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::DrawText { text, style, .. } => Some((text.clone(), style.size)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_ids_are_unique() {
        let a = book("A", ColorKey::Violet, PatternKey::Simplu);
        let b = book("B", ColorKey::Violet, PatternKey::Simplu);
        assert_ne!(a.id(), b.id());
        assert!(a.to_svg().contains(&format!("{}-clip-", a.id())));
        assert!(!a.to_svg().contains(&format!("{}-clip-", b.id())));
    }

    #[test]
    fn test_long_blue_matematica_book() {
        let mut book = book(
            "matematica avansata super lung",
            ColorKey::Blue,
            PatternKey::Matematica,
        );
        assert_eq!(book.config().title(), "MATEMATICA AVANSATA SUPER LUNG");

        let front = book.layers().last().expect("front cover");
        let title = front.title.as_ref().expect("title");
        assert_eq!(title.layout.text, "MATEMATICA AVANSATA SUPER LUN…");
        assert_eq!(title.layout.text.chars().count(), 30);
        assert_eq!(title.layout.font_size, 13.0);
        assert_eq!(title.style.color.to_css(), "rgba(255,255,255,0.98)");

        let svg = book.to_svg();
        assert!(svg.contains("#60a5fa"));
        assert!(svg.contains("#3b82f6"));
        assert!(svg.contains("#2563eb"));
        // Horizontal and vertical grid rulings
        assert_eq!(svg.matches("<pattern ").count(), 2);

        let drawn: Vec<String> = texts(&book).into_iter().map(|(t, _)| t).collect();
        assert_eq!(drawn, vec!["MATEMATICA AVANSATA", "SUPER LUN…"]);

        book.handle_event(BookEvent::PointerEnter);
        book.tick(300.0);
        let frame = book.frame();
        assert_eq!(frame.sheet_opacities.as_slice(), [1.0, 1.0, 1.0]);
        assert_eq!(frame.front_cover.lift_px, -6.0);

        book.handle_event(BookEvent::PointerLeave);
        book.tick(150.0);
        assert_eq!(book.state().progress, 0.0);
        assert_eq!(book.frame().front_cover.height_blend, 0.0);
        assert_eq!(book.frame().sheet_opacities.as_slice(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_closed_book_skips_sheets() {
        let book = book("Caiet", ColorKey::Rose, PatternKey::Simplu);
        let mut ctx = RecordingContext::new(Size::new(200.0, 268.0));
        book.paint(&mut ctx);
        let white_fills = ctx
            .commands()
            .iter()
            .filter(|c| {
                matches!(c, DrawCommand::FillPath { brush: Brush::Solid(color), .. }
                    if *color == folio_core::Color::WHITE)
            })
            .count();
        assert_eq!(white_fills, 0);
        assert!(!ctx
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::PushFilter(_))));
    }

    #[test]
    fn test_open_book_paints_sheets_and_filter() {
        let mut book = book("Caiet", ColorKey::Rose, PatternKey::Simplu);
        book.handle_event(BookEvent::Focus);
        book.tick(1000.0);
        let mut ctx = RecordingContext::new(Size::new(200.0, 268.0));
        book.paint(&mut ctx);
        let commands = ctx.commands();
        assert!(matches!(commands[0], DrawCommand::PushTransform(_)));
        assert!(commands.iter().any(|c| matches!(c, DrawCommand::PushFilter(f)
            if (f.brightness - 1.04).abs() < 1e-5)));
        let clips = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::PushClip(_)))
            .count();
        // back cover, two sheets, sheet shadow, two staples, front cover
        assert_eq!(clips, 7);
    }

    #[test]
    fn test_hit_test_follows_the_outline() {
        let book = book("Caiet", ColorKey::Violet, PatternKey::Simplu);
        assert!(book.hit_test(Point::new(100.0, 134.0)));
        assert!(!book.hit_test(Point::new(0.5, 0.5)));
        assert!(!book.hit_test(Point::new(250.0, 134.0)));
    }

    #[test]
    fn test_drag_book_rotates_cover_and_pages() {
        let mut book = drag_book();
        assert_eq!(book.layers().len(), 1 + 2 + 12 + 1);
        book.handle_event(BookEvent::PointerDown { x: 10.0, y: 100.0 });
        book.tick(1000.0);
        assert!((book.frame().front_cover.rotation_y_deg + 33.0).abs() < 0.1);

        let mut ctx = RecordingContext::new(Size::new(200.0, 268.0));
        book.paint(&mut ctx);
        let hinges = ctx
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::PushTransform(Transform::Mat4(_))))
            .count();
        assert_eq!(hinges, 13);

        book.handle_event(BookEvent::PointerLeave);
        assert_eq!(book.state(), InteractionState::default());
    }

    #[test]
    fn test_invalid_motion_is_rejected() {
        let config = BookConfig::new("Caiet", ColorKey::Violet, PatternKey::Simplu)
            .expect("valid config");
        let motion = MotionConfig {
            max_drag_progress: 0.0,
            ..Default::default()
        };
        let result = render_book_with(
            config,
            Dimensions::COVER,
            BookVariant::Drag,
            motion,
            &mut OutlineCache::new(),
        );
        assert!(matches!(result, Err(crate::BookError::InvalidMotion(_))));
    }

    #[test]
    fn test_svg_is_balanced() {
        let mut book = drag_book();
        book.handle_event(BookEvent::PointerMove { x: 40.0, y: 40.0 });
        book.tick(120.0);
        let svg = book.to_svg();
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
        assert!(svg.contains("FIZICA"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_svg_canvas_follows_dimensions() {
        let config = BookConfig::new("Mic", ColorKey::Rose, PatternKey::Dictando)
            .expect("valid config");
        let dimensions = Dimensions::try_new(120.0, 160.0).expect("valid size");
        let svg = render_book(config, dimensions).to_svg();
        assert!(svg.contains(r#"width="144" height="184" viewBox="-12 -12 144 184""#));
    }

    #[test]
    fn test_view_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<BookView>();
    }
}

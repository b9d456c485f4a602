//! Layer compositor
//!
//! Builds the fixed, z-ordered layer list for a book. Layers never change
//! order after they are built; the animation driver only supplies per-frame
//! transforms and opacities.
//!
//! ```text
//! back cover < sheets < staples < pages < front cover
//! ```

use std::sync::Arc;

use folio_core::{
    Brush, Color, FontWeight, Gradient, GradientStop, NoiseStyle, Outline, Pattern, Point, Rect,
    Shadow, Size, StripeSet, TextAlign, TextStyle,
};
use folio_theme::{color_theme, pattern_theme, ColorTheme, PatternKey, Texture};
use smallvec::{smallvec, SmallVec};

use crate::config::{BookConfig, BookVariant, MotionConfig, MAX_PAGES};
use crate::outlines::{
    BookOutlines, BACK_SHEET_OFFSET, FRONT_SHEET_OFFSET, PAGE_OFFSET, STAPLE_SIZE,
};
use crate::title::{TitleLayout, LETTER_SPACING, LINE_HEIGHT};

pub const BACK_COVER_COLOR: Color = Color::from_hex(0xe0e0e0);
const PATTERN_OPACITY: f32 = 0.35;
const LINEN_OPACITY: f32 = 0.07;
const GRAIN_OPACITY: f32 = 0.12;
const GRAIN: NoiseStyle = NoiseStyle {
    base_frequency: 0.9,
    octaves: 4,
    tile: 128.0,
};
const DRAG_GRAIN_OPACITY: f32 = 0.1;
const DRAG_GRAIN: NoiseStyle = NoiseStyle {
    base_frequency: 2.0,
    octaves: 3,
    tile: 80.0,
};
const FINE_LINEN_OPACITY: f32 = 0.4;
const EDGE_SHADOW_WIDTH: f32 = 3.0;
const EDGE_SHADOW_OPACITY: f32 = 0.4;
const STAPLE_OPACITY: f32 = 0.55;
/// Distance of the lower staple from the bottom edge
const LOWER_STAPLE_FROM_BOTTOM: f32 = 82.0;
const UPPER_STAPLE_TOP: f32 = 50.0;
pub const TITLE_FONT: &str = "Geist";

/// What a layer depicts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerRole {
    BackCover,
    /// Inner sheet revealed when the hover variant lifts
    FrontSheet,
    /// Outer sheet revealed when the hover variant lifts
    BackSheet,
    /// Inset shadow over the outer sheet
    SheetShadow,
    /// Binder staple, 0 = upper
    Staple(u8),
    /// Turning page, numbered from 1
    Page(u8),
    FrontCover,
}

impl LayerRole {
    /// Whether the driver's sheet opacity applies
    pub fn is_sheet(&self) -> bool {
        matches!(
            self,
            LayerRole::FrontSheet | LayerRole::BackSheet | LayerRole::SheetShadow
        )
    }
}

/// Area a fill covers, in layer-local coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FillRegion {
    /// The whole outline
    Full,
    Rect(Rect),
}

/// Where a fill's opacity comes from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillChannel {
    #[default]
    Static,
    /// Multiplied by the driver's light overlay opacity
    LightOverlay,
}

/// One paint pass inside a layer's outline
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    pub brush: Brush,
    pub opacity: f32,
    pub region: FillRegion,
    pub channel: FillChannel,
}

impl Fill {
    pub fn new(brush: impl Into<Brush>) -> Self {
        Self {
            brush: brush.into(),
            opacity: 1.0,
            region: FillRegion::Full,
            channel: FillChannel::Static,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn in_rect(mut self, rect: Rect) -> Self {
        self.region = FillRegion::Rect(rect);
        self
    }

    pub fn on_channel(mut self, channel: FillChannel) -> Self {
        self.channel = channel;
        self
    }
}

/// Hairline drawn just inside the outline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

/// Title text of the front cover
#[derive(Clone, Debug, PartialEq)]
pub struct CoverTitle {
    pub layout: TitleLayout,
    pub style: TextStyle,
}

/// One composited layer
#[derive(Clone, Debug)]
pub struct Layer {
    pub role: LayerRole,
    pub z_order: i32,
    pub outline: Arc<Outline>,
    /// Top-left corner relative to the book
    pub offset: Point,
    /// Paint passes, bottom first
    pub fills: SmallVec<[Fill; 6]>,
    pub border: Option<Border>,
    pub inner_shadows: SmallVec<[Shadow; 4]>,
    /// Base opacity, multiplied with the driver's per-frame opacity
    pub opacity: f32,
    /// Pivot of 3D rotations, layer-local
    pub transform_origin: Point,
    pub title: Option<CoverTitle>,
}

impl Layer {
    fn new(role: LayerRole, z_order: i32, outline: Arc<Outline>, offset: Point) -> Self {
        let transform_origin = Point::new(0.0, outline.size().height / 2.0);
        Self {
            role,
            z_order,
            outline,
            offset,
            fills: SmallVec::new(),
            border: None,
            inner_shadows: SmallVec::new(),
            opacity: 1.0,
            transform_origin,
            title: None,
        }
    }

    fn fill(mut self, fill: Fill) -> Self {
        self.fills.push(fill);
        self
    }

    fn border(mut self, width: f32, color: Color) -> Self {
        self.border = Some(Border { width, color });
        self
    }

    fn inner_shadow(mut self, shadow: Shadow) -> Self {
        self.inner_shadows.push(shadow);
        self
    }

    /// Layer bounds in book coordinates
    pub fn bounds(&self) -> Rect {
        let size = self.outline.size();
        Rect::new(self.offset.x, self.offset.y, size.width, size.height)
    }
}

/// Build the layers of a book, sorted by z-order
pub fn build_layers(
    config: &BookConfig,
    outlines: &BookOutlines,
    variant: BookVariant,
    motion: &MotionConfig,
) -> Vec<Layer> {
    let mut layers = vec![back_cover(outlines, variant)];

    if variant == BookVariant::Hover {
        layers.extend(sheets(outlines));
    }
    layers.extend(staples(outlines));
    if variant == BookVariant::Drag {
        layers.extend(pages(outlines, motion.page_count));
    }
    layers.push(front_cover(config, outlines, variant));

    layers.sort_by_key(|layer| layer.z_order);
    tracing::debug!(
        count = layers.len(),
        variant = %variant,
        "built book layers"
    );
    layers
}

// ─────────────────────────────────────────────────────────────────────────────
// Back layers
// ─────────────────────────────────────────────────────────────────────────────

fn back_cover(outlines: &BookOutlines, variant: BookVariant) -> Layer {
    let layer = Layer::new(LayerRole::BackCover, 10, outlines.cover.clone(), Point::ZERO)
        .fill(Fill::new(BACK_COVER_COLOR));
    match variant {
        BookVariant::Hover => layer,
        BookVariant::Drag => layer.inner_shadow(
            Shadow::new(0.0, 0.0, 0.0, Color::rgba8(0, 0, 0, 0.08)).with_spread(0.5),
        ),
    }
}

fn sheets(outlines: &BookOutlines) -> [Layer; 3] {
    [
        Layer::new(
            LayerRole::FrontSheet,
            30,
            outlines.front_sheet.clone(),
            FRONT_SHEET_OFFSET,
        )
        .fill(Fill::new(Color::WHITE))
        .border(1.0, Color::rgba8(0, 0, 0, 0.15)),
        Layer::new(
            LayerRole::BackSheet,
            35,
            outlines.back_sheet.clone(),
            BACK_SHEET_OFFSET,
        )
        .fill(Fill::new(Color::from_hex(0xf8f8f8)))
        .border(1.0, Color::rgba8(0, 0, 0, 0.18)),
        Layer::new(
            LayerRole::SheetShadow,
            40,
            outlines.back_sheet.clone(),
            BACK_SHEET_OFFSET,
        )
        .inner_shadow(Shadow::new(-3.0, 0.0, 6.0, Color::rgba8(0, 0, 0, 0.08))),
    ]
}

fn staples(outlines: &BookOutlines) -> [Layer; 2] {
    let height = outlines.cover.size().height;
    let lower_top = (height - LOWER_STAPLE_FROM_BOTTOM).max(UPPER_STAPLE_TOP + STAPLE_SIZE.height);
    let metal = Gradient::css_angle(
        180.0,
        [
            GradientStop::new(0.0, Color::from_hex(0xbbbbbb)),
            GradientStop::new(0.5, Color::from_hex(0x999999)),
            GradientStop::new(1.0, Color::from_hex(0x777777)),
        ],
    );
    let staple = |index: u8, top: f32| {
        let mut layer = Layer::new(
            LayerRole::Staple(index),
            100 + index as i32,
            outlines.staple.clone(),
            Point::new(-STAPLE_SIZE.width, top),
        )
        .fill(Fill::new(metal.clone()));
        layer.opacity = STAPLE_OPACITY;
        layer
    };
    [staple(0, UPPER_STAPLE_TOP), staple(1, lower_top)]
}

fn pages(outlines: &BookOutlines, count: usize) -> impl Iterator<Item = Layer> + '_ {
    (1..=count.min(MAX_PAGES)).map(move |i| {
        Layer::new(
            LayerRole::Page(i as u8),
            150 + i as i32,
            outlines.page.clone(),
            PAGE_OFFSET,
        )
        .fill(Fill::new(Color::WHITE))
        .border(0.75, Color::rgba8(0, 0, 0, 0.12))
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Front cover
// ─────────────────────────────────────────────────────────────────────────────

fn front_cover(config: &BookConfig, outlines: &BookOutlines, variant: BookVariant) -> Layer {
    let theme = color_theme(config.color());
    let size = outlines.cover.size();

    let layer = Layer::new(
        LayerRole::FrontCover,
        200,
        outlines.cover.clone(),
        Point::ZERO,
    );
    let mut layer = match variant {
        BookVariant::Hover => hover_cover_fills(layer, config, theme, size),
        BookVariant::Drag => drag_cover_fills(layer, config, theme),
    };

    layer.title = Some(cover_title(config, theme, size));
    layer
}

/// Lifting cover: full gradient, spine strip, light overlay and edge shade
fn hover_cover_fills(layer: Layer, config: &BookConfig, theme: &ColorTheme, size: Size) -> Layer {
    let mut layer = layer
        .fill(Fill::new(cover_gradient(theme)))
        .fill(Fill::new(spine_strip(theme)));

    if let Some(texture) = cover_texture(config, BookVariant::Hover) {
        layer = layer.fill(texture);
    }

    layer
        .fill(Fill::new(Brush::Noise(GRAIN)).with_opacity(GRAIN_OPACITY))
        .fill(Fill::new(light_overlay()).on_channel(FillChannel::LightOverlay))
        .fill(
            Fill::new(Gradient::css_angle(
                270.0,
                [
                    GradientStop::new(0.0, theme.edge),
                    GradientStop::new(1.0, Color::TRANSPARENT),
                ],
            ))
            .with_opacity(EDGE_SHADOW_OPACITY)
            .in_rect(Rect::new(
                size.width - EDGE_SHADOW_WIDTH,
                0.0,
                EDGE_SHADOW_WIDTH,
                size.height,
            )),
        )
}

/// Turning cover: two-stop gradient, boosted ruling, finer grain and inset edges
fn drag_cover_fills(layer: Layer, config: &BookConfig, theme: &ColorTheme) -> Layer {
    let mut layer = layer.fill(Fill::new(Gradient::css_angle(
        135.0,
        [
            GradientStop::new(0.0, theme.highlight),
            GradientStop::new(1.0, theme.low),
        ],
    )));

    if let Some(texture) = cover_texture(config, BookVariant::Drag) {
        layer = layer.fill(texture);
    }

    layer = layer.fill(Fill::new(Brush::Noise(DRAG_GRAIN)).with_opacity(DRAG_GRAIN_OPACITY));

    for shadow in [
        Shadow::new(0.0, 0.0, 0.0, Color::rgba8(0, 0, 0, 0.1)).with_spread(0.85),
        Shadow::new(2.0, 0.0, 1.0, Color::rgba8(0, 0, 0, 0.1)),
        Shadow::new(-1.5, 0.0, 1.0, Color::rgba8(0, 0, 0, 0.1)),
        Shadow::new(0.0, 2.0, 2.0, Color::rgba8(255, 255, 255, 0.1)),
    ] {
        layer = layer.inner_shadow(shadow);
    }
    layer
}

/// Diagonal base gradient, returning to the highlight in the far corner
fn cover_gradient(theme: &ColorTheme) -> Gradient {
    Gradient::css_angle(
        135.0,
        [
            GradientStop::new(0.0, theme.highlight),
            GradientStop::new(0.46, theme.mid),
            GradientStop::new(0.9, theme.low),
            GradientStop::new(1.0, theme.highlight),
        ],
    )
}

fn spine_strip(theme: &ColorTheme) -> Gradient {
    Gradient::css_angle(
        90.0,
        [
            GradientStop::new(0.0, theme.spine),
            GradientStop::new(0.01, theme.spine),
            GradientStop::new(0.03, Color::TRANSPARENT),
        ],
    )
}

/// Ruling for patterned covers, linen weave for plain ones
///
/// The drag cover boosts white ink too and uses a finer, fainter linen.
fn cover_texture(config: &BookConfig, variant: BookVariant) -> Option<Fill> {
    if config.pattern() == PatternKey::Simplu {
        return match variant {
            BookVariant::Hover => {
                let linen = Texture::Linen.to_pattern()?;
                Some(Fill::new(linen).with_opacity(LINEN_OPACITY))
            }
            BookVariant::Drag => Some(Fill::new(fine_linen()).with_opacity(FINE_LINEN_OPACITY)),
        };
    }
    let boost_white = variant == BookVariant::Drag;
    let texture = pattern_theme(config.pattern())
        .display_texture(config.color().is_light(), boost_white);
    texture
        .to_pattern()
        .map(|pattern| Fill::new(pattern).with_opacity(PATTERN_OPACITY))
}

fn fine_linen() -> Pattern {
    let strand = |angle| StripeSet {
        angle,
        period: 4.0,
        thickness: 1.0,
        ink: Color::rgba8(255, 255, 255, 0.05),
    };
    Pattern::Stripes(smallvec![strand(0.0), strand(90.0)])
}

/// Shade on the spine side fading to a highlight on the open side
fn light_overlay() -> Gradient {
    Gradient::css_angle(
        270.0,
        [
            GradientStop::new(0.0, Color::rgba8(0, 0, 0, 0.08)),
            GradientStop::new(0.5, Color::TRANSPARENT),
            GradientStop::new(1.0, Color::rgba8(255, 255, 255, 0.12)),
        ],
    )
}

fn cover_title(config: &BookConfig, theme: &ColorTheme, size: Size) -> CoverTitle {
    let layout = TitleLayout::new(config.title(), size);
    let mut style = TextStyle::new(layout.font_size)
        .with_family(TITLE_FONT)
        .with_weight(FontWeight::Bold)
        .with_color(theme.text_color)
        .with_align(TextAlign::Center);
    style.letter_spacing = LETTER_SPACING;
    style.line_height = LINE_HEIGHT;
    style.shadows = theme.text_shadow.iter().copied().collect();
    CoverTitle { layout, style }
}

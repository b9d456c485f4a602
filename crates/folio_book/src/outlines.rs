//! Outline set for one book
//!
//! Every layer is clipped by a squircle. Sheet and page sizes are derived
//! from the cover size so books of any dimensions keep the same insets;
//! at the standard 200x268 cover they land on 190x260, 195x264 and 196x264.

use std::sync::Arc;

use folio_core::{Dimensions, Outline, OutlineCache, Point, Size};

use crate::config::{BookVariant, MotionConfig};

/// Every outline in a book is fully smoothed
pub const SMOOTHING: f32 = 1.0;

/// Inner sheet: inset 10x8, offset (3, 3)
const FRONT_SHEET_SHRINK: Size = Size::new(10.0, 8.0);
pub const FRONT_SHEET_OFFSET: Point = Point::new(3.0, 3.0);
/// Outer sheet: inset 5x4, offset (5, 4)
const BACK_SHEET_SHRINK: Size = Size::new(5.0, 4.0);
pub const BACK_SHEET_OFFSET: Point = Point::new(5.0, 4.0);
/// Turning pages: inset 4x4, offset (2, 2)
const PAGE_SHRINK: Size = Size::new(4.0, 4.0);
pub const PAGE_OFFSET: Point = Point::new(2.0, 2.0);

pub const STAPLE_SIZE: Size = Size::new(2.0, 32.0);
pub const STAPLE_RADIUS: f32 = 1.0;

/// Shared outlines used by a book's layers
#[derive(Clone, Debug)]
pub struct BookOutlines {
    /// Cover at rest; also the back cover
    pub cover: Arc<Outline>,
    /// Front cover while lifted
    pub cover_expanded: Arc<Outline>,
    pub front_sheet: Arc<Outline>,
    pub back_sheet: Arc<Outline>,
    pub page: Arc<Outline>,
    pub staple: Arc<Outline>,
}

impl BookOutlines {
    /// Generate (or fetch from `cache`) the outlines for a book
    pub fn build(
        dimensions: Dimensions,
        variant: BookVariant,
        motion: &MotionConfig,
        cache: &mut OutlineCache,
    ) -> Self {
        let (width, height) = (dimensions.width(), dimensions.height());
        let radius = variant.cover_radius();
        // Sheets keep the cover's radius-to-width ratio
        let sheet = |shrink: Size, cache: &mut OutlineCache| {
            let w = (width - shrink.width).max(Dimensions::MIN_EXTENT);
            let h = (height - shrink.height).max(Dimensions::MIN_EXTENT);
            cache.get_or_generate(w, h, radius * w / width, SMOOTHING)
        };

        let expanded_height = (height - motion.expanded_height_delta).max(Dimensions::MIN_EXTENT);
        let page_width = (width - PAGE_SHRINK.width).max(Dimensions::MIN_EXTENT);
        let page_height = (height - PAGE_SHRINK.height).max(Dimensions::MIN_EXTENT);

        Self {
            cover: cache.get_or_generate(width, height, radius, SMOOTHING),
            cover_expanded: cache.get_or_generate(width, expanded_height, radius, SMOOTHING),
            front_sheet: sheet(FRONT_SHEET_SHRINK, cache),
            back_sheet: sheet(BACK_SHEET_SHRINK, cache),
            page: cache.get_or_generate(page_width, page_height, radius, SMOOTHING),
            staple: cache.get_or_generate(STAPLE_SIZE.width, STAPLE_SIZE.height, STAPLE_RADIUS, 0.0),
        }
    }

    /// Front cover outline partway between rest (0) and lifted (1)
    ///
    /// `blend` may overshoot either end.
    pub fn front_cover_at(&self, blend: f32) -> Outline {
        if blend == 0.0 {
            (*self.cover).clone()
        } else if blend == 1.0 {
            (*self.cover_expanded).clone()
        } else {
            self.cover.lerp(&self.cover_expanded, blend)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(variant: BookVariant) -> BookOutlines {
        BookOutlines::build(
            Dimensions::COVER,
            variant,
            &MotionConfig::default(),
            &mut OutlineCache::new(),
        )
    }

    #[test]
    fn test_standard_sizes() {
        let outlines = standard(BookVariant::Hover);
        assert_eq!(outlines.cover.size(), Size::new(200.0, 268.0));
        assert_eq!(outlines.cover_expanded.size(), Size::new(200.0, 263.0));
        assert_eq!(outlines.front_sheet.size(), Size::new(190.0, 260.0));
        assert_eq!(outlines.back_sheet.size(), Size::new(195.0, 264.0));
        assert_eq!(outlines.page.size(), Size::new(196.0, 264.0));
        assert_eq!(outlines.cover.corner().radius, 20.0);
        assert_eq!(outlines.front_sheet.corner().radius, 19.0);
        assert_eq!(outlines.back_sheet.corner().radius, 19.5);
    }

    #[test]
    fn test_drag_variant_radius() {
        let outlines = standard(BookVariant::Drag);
        assert_eq!(outlines.cover.corner().radius, 16.0);
        assert_eq!(outlines.page.corner().radius, 16.0);
    }

    #[test]
    fn test_every_outline_is_simple() {
        let outlines = standard(BookVariant::Hover);
        for outline in [
            &outlines.cover,
            &outlines.cover_expanded,
            &outlines.front_sheet,
            &outlines.back_sheet,
            &outlines.page,
            &outlines.staple,
        ] {
            assert!(outline.is_closed());
            assert!(outline.is_simple());
        }
    }

    #[test]
    fn test_books_share_cached_outlines() {
        let mut cache = OutlineCache::new();
        let motion = MotionConfig::default();
        let a = BookOutlines::build(Dimensions::COVER, BookVariant::Hover, &motion, &mut cache);
        let b = BookOutlines::build(Dimensions::COVER, BookVariant::Hover, &motion, &mut cache);
        assert!(Arc::ptr_eq(&a.cover, &b.cover));
        assert_eq!(cache.stats().misses as usize, cache.len());
    }

    #[test]
    fn test_front_cover_blend() {
        let outlines = standard(BookVariant::Hover);
        assert_eq!(outlines.front_cover_at(0.0), *outlines.cover);
        assert_eq!(outlines.front_cover_at(1.0), *outlines.cover_expanded);
        let halfway = outlines.front_cover_at(0.5);
        assert!((halfway.size().height - 265.5).abs() < 1e-3);
    }
}

//! Cover textures
//!
//! Tileable ruling drawn over the cover gradient: ruled lines, square grids,
//! slanted handwriting guides, dot grids, or a faint linen weave for plain
//! covers.

use folio_core::{Color, DotGrid, Pattern, StripeSet};
use smallvec::{smallvec, SmallVec};

/// Texture descriptor for a cover pattern
#[derive(Clone, Debug, PartialEq)]
pub enum Texture {
    /// No ruling
    None,
    /// Fine cross-hatched weave used on plain covers
    Linen,
    /// One or more families of parallel lines
    Lines(SmallVec<[StripeSet; 2]>),
    /// Dot grid
    Dots(DotGrid),
}

impl Texture {
    /// Horizontal rules every `period` px, `thickness` px thick
    pub fn ruled(period: f32, thickness: f32, ink: Color) -> Self {
        Texture::Lines(smallvec![StripeSet {
            angle: 180.0,
            period,
            thickness,
            ink,
        }])
    }

    /// Square grid of horizontal and vertical rules
    pub fn grid(period: f32, thickness: f32, ink: Color) -> Self {
        Texture::Lines(smallvec![
            StripeSet {
                angle: 180.0,
                period,
                thickness,
                ink,
            },
            StripeSet {
                angle: 90.0,
                period,
                thickness,
                ink,
            },
        ])
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Texture::None)
    }

    /// Paint pattern for this texture
    pub fn to_pattern(&self) -> Option<Pattern> {
        match self {
            Texture::None => None,
            Texture::Linen => Some(Pattern::Stripes(smallvec![
                StripeSet {
                    angle: 0.0,
                    period: 4.0,
                    thickness: 1.0,
                    ink: Color::rgba8(255, 255, 255, 0.4),
                },
                StripeSet {
                    angle: 90.0,
                    period: 4.0,
                    thickness: 1.0,
                    ink: Color::rgba8(255, 255, 255, 0.3),
                },
            ])),
            Texture::Lines(sets) => Some(Pattern::Stripes(sets.clone())),
            Texture::Dots(dots) => Some(Pattern::Dots(*dots)),
        }
    }

    /// CSS `background-image` descriptor
    pub fn to_css(&self) -> String {
        self.to_pattern()
            .map(|p| p.to_css())
            .unwrap_or_else(|| "none".to_string())
    }

    /// Ink colors used by the texture
    pub fn inks(&self) -> SmallVec<[Color; 2]> {
        self.to_pattern().map(|p| p.inks()).unwrap_or_default()
    }

    /// Copy with faint inks raised so the ruling survives on pale covers
    ///
    /// Only ruling textures are boosted; linen and empty textures are
    /// returned unchanged.
    pub fn boosted(&self) -> Texture {
        match self {
            Texture::None | Texture::Linen => self.clone(),
            Texture::Lines(sets) => Texture::Lines(
                sets.iter()
                    .map(|s| StripeSet {
                        ink: boost_ink(s.ink),
                        ..*s
                    })
                    .collect(),
            ),
            Texture::Dots(dots) => Texture::Dots(DotGrid {
                ink: boost_ink(dots.ink),
                ..*dots
            }),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Intensity boost
// ─────────────────────────────────────────────────────────────────────────────

/// Black ink alpha rewrites
const DARK_INK_BOOST: [(f32, f32); 4] = [(0.06, 0.18), (0.07, 0.2), (0.08, 0.22), (0.1, 0.25)];

/// White ink alpha rewrites
const LIGHT_INK_BOOST: [(f32, f32); 5] = [
    (0.1, 0.35),
    (0.12, 0.4),
    (0.13, 0.42),
    (0.15, 0.45),
    (0.18, 0.5),
];

/// Raise a known low-alpha black or white ink to its boosted alpha
///
/// Inks that are not pure black or white, or whose alpha is not in the
/// rewrite table, pass through unchanged.
pub fn boost_ink(ink: Color) -> Color {
    let table: &[(f32, f32)] = match ink.to_rgb8() {
        [0, 0, 0] => &DARK_INK_BOOST,
        [255, 255, 255] => &LIGHT_INK_BOOST,
        _ => return ink,
    };
    table
        .iter()
        .find(|(from, _)| (ink.a - from).abs() < 1e-3)
        .map(|&(_, to)| ink.with_alpha(to))
        .unwrap_or(ink)
}

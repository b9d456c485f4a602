//! Cover patterns
//!
//! Each pattern names a ruling texture for dark covers and, where it
//! exists, a black-ink alternate for light covers.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use folio_core::{Color, DotGrid, StripeSet};
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::error::ThemeError;
use crate::texture::Texture;

/// Cover pattern
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKey {
    /// Plain cover
    #[default]
    Simplu,
    /// Ruled lines
    Dictando,
    /// Square grid
    Matematica,
    /// Slanted handwriting guides
    Romana,
    /// Dot grid
    Punctat,
}

impl PatternKey {
    /// Every key, in display order
    pub const ALL: [PatternKey; 5] = [
        PatternKey::Simplu,
        PatternKey::Dictando,
        PatternKey::Matematica,
        PatternKey::Romana,
        PatternKey::Punctat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKey::Simplu => "simplu",
            PatternKey::Dictando => "dictando",
            PatternKey::Matematica => "matematica",
            PatternKey::Romana => "romana",
            PatternKey::Punctat => "punctat",
        }
    }

    pub fn label(&self) -> &'static str {
        pattern_theme(*self).label
    }

    /// Parse a key, falling back to the default on unknown input
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|err: ThemeError| {
            tracing::warn!("{err}; using '{}'", PatternKey::default());
            PatternKey::default()
        })
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternKey {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        PatternKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ThemeError::UnknownKey {
                kind: "pattern",
                key: s.to_string(),
                expected: PatternKey::ALL.map(|k| k.as_str()).join(", "),
            })
    }
}

/// Texture recipe for one pattern
#[derive(Clone, Debug, PartialEq)]
pub struct PatternTheme {
    pub key: PatternKey,
    pub label: &'static str,
    /// White-ink texture for dark covers
    pub texture: Texture,
    /// Black-ink alternate for light covers
    pub light_texture: Option<Texture>,
}

impl PatternTheme {
    /// Texture to draw over a cover, preferring the light alternate on light covers
    pub fn texture_for(&self, cover_is_light: bool) -> &Texture {
        match (&self.light_texture, cover_is_light) {
            (Some(light), true) => light,
            _ => &self.texture,
        }
    }

    /// Texture as displayed
    ///
    /// Light covers always get boosted ink. `boost_white` also boosts the
    /// white ink drawn on dark covers.
    pub fn display_texture(&self, cover_is_light: bool, boost_white: bool) -> Texture {
        let texture = self.texture_for(cover_is_light);
        if cover_is_light || boost_white {
            texture.boosted()
        } else {
            texture.clone()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pattern table
// ─────────────────────────────────────────────────────────────────────────────

const fn white(alpha: f32) -> Color {
    Color::rgba8(255, 255, 255, alpha)
}

const fn black(alpha: f32) -> Color {
    Color::rgba8(0, 0, 0, alpha)
}

/// Slanted guides plus widely spaced rules
fn handwriting_guides(slant_ink: Color, rule_ink: Color) -> Texture {
    Texture::Lines(smallvec![
        StripeSet {
            angle: 104.8,
            period: 32.0,
            thickness: 2.0,
            ink: slant_ink,
        },
        StripeSet {
            angle: 180.0,
            period: 52.0,
            thickness: 2.0,
            ink: rule_ink,
        },
    ])
}

fn dot_grid(ink: Color) -> Texture {
    Texture::Dots(DotGrid {
        radius: 1.2,
        spacing: 12.0,
        ink,
    })
}

static PATTERNS: LazyLock<[PatternTheme; 5]> = LazyLock::new(|| {
    [
        PatternTheme {
            key: PatternKey::Simplu,
            label: "Simplu",
            texture: Texture::None,
            light_texture: None,
        },
        PatternTheme {
            key: PatternKey::Dictando,
            label: "Dictando",
            texture: Texture::ruled(20.0, 2.0, white(0.15)),
            light_texture: Some(Texture::ruled(20.0, 2.0, black(0.08))),
        },
        PatternTheme {
            key: PatternKey::Matematica,
            label: "Matematică",
            texture: Texture::grid(16.0, 2.0, white(0.12)),
            light_texture: Some(Texture::grid(16.0, 2.0, black(0.07))),
        },
        PatternTheme {
            key: PatternKey::Romana,
            label: "Română",
            texture: handwriting_guides(white(0.13), white(0.1)),
            light_texture: Some(handwriting_guides(black(0.08), black(0.06))),
        },
        PatternTheme {
            key: PatternKey::Punctat,
            label: "Punctat",
            texture: dot_grid(white(0.18)),
            light_texture: Some(dot_grid(black(0.1))),
        },
    ]
});

/// Look up the texture recipe for a pattern
pub fn pattern_theme(key: PatternKey) -> &'static PatternTheme {
    let index = match key {
        PatternKey::Simplu => 0,
        PatternKey::Dictando => 1,
        PatternKey::Matematica => 2,
        PatternKey::Romana => 3,
        PatternKey::Punctat => 4,
    };
    &PATTERNS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_maps_to_its_theme() {
        for key in PatternKey::ALL {
            assert_eq!(pattern_theme(key).key, key);
            assert_eq!(key.as_str().parse::<PatternKey>(), Ok(key));
        }
    }

    #[test]
    fn test_matematica_css() {
        let theme = pattern_theme(PatternKey::Matematica);
        assert_eq!(theme.label, "Matematică");
        assert_eq!(
            theme.texture.to_css(),
            "repeating-linear-gradient(180deg, transparent, transparent 14px, rgba(255,255,255,0.12) 14px, rgba(255,255,255,0.12) 16px), \
             repeating-linear-gradient(90deg, transparent, transparent 14px, rgba(255,255,255,0.12) 14px, rgba(255,255,255,0.12) 16px)"
        );
    }

    #[test]
    fn test_punctat_css() {
        let theme = pattern_theme(PatternKey::Punctat);
        assert_eq!(
            theme.texture.to_css(),
            "radial-gradient(circle, rgba(255,255,255,0.18) 1.2px, transparent 1.2px)"
        );
    }

    #[test]
    fn test_light_cover_uses_boosted_alternate() {
        let theme = pattern_theme(PatternKey::Romana);
        let shown = theme.display_texture(true, false);
        let inks: Vec<f32> = shown.inks().iter().map(|c| c.a).collect();
        assert_eq!(inks, vec![0.22, 0.18]);
        assert!(shown.inks().iter().all(|c| c.to_rgb8() == [0, 0, 0]));

        // Dark covers keep the white texture untouched
        assert_eq!(theme.display_texture(false, false), theme.texture);
    }

    #[test]
    fn test_dark_cover_white_ink_boost() {
        let theme = pattern_theme(PatternKey::Matematica);
        let shown = theme.display_texture(false, true);
        let inks: Vec<f32> = shown.inks().iter().map(|c| c.a).collect();
        assert_eq!(inks, vec![0.4, 0.4]);
        assert!(shown.inks().iter().all(|c| c.to_rgb8() == [255, 255, 255]));

        let dots = pattern_theme(PatternKey::Punctat).display_texture(false, true);
        assert_eq!(dots.inks()[0].a, 0.5);
    }

    #[test]
    fn test_simplu_has_no_texture() {
        let theme = pattern_theme(PatternKey::Simplu);
        assert!(theme.texture_for(true).is_none());
        assert!(theme.display_texture(true, true).is_none());
    }

    #[test]
    fn test_unknown_pattern_falls_back() {
        assert!("caro".parse::<PatternKey>().is_err());
        assert_eq!(PatternKey::parse_or_default("caro"), PatternKey::Simplu);
    }
}

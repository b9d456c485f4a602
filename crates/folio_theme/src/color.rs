//! Cover palettes
//!
//! Each cover color has a three-stop gradient, a spine strip color, an edge
//! shade for the right-hand shadow, and a letterpress title style.

use std::fmt;
use std::str::FromStr;

use folio_core::paint::trim_float;
use folio_core::{Color, Shadow};
use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// Cover color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKey {
    #[default]
    Violet,
    Blue,
    Emerald,
    Rose,
    Amber,
    Slate,
    White,
}

impl ColorKey {
    /// Every key, in display order
    pub const ALL: [ColorKey; 7] = [
        ColorKey::Violet,
        ColorKey::Blue,
        ColorKey::Emerald,
        ColorKey::Rose,
        ColorKey::Amber,
        ColorKey::Slate,
        ColorKey::White,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorKey::Violet => "violet",
            ColorKey::Blue => "blue",
            ColorKey::Emerald => "emerald",
            ColorKey::Rose => "rose",
            ColorKey::Amber => "amber",
            ColorKey::Slate => "slate",
            ColorKey::White => "white",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        color_theme(*self).label
    }

    /// Light covers take dark ink for textures and titles
    pub fn is_light(&self) -> bool {
        matches!(self, ColorKey::White | ColorKey::Amber)
    }

    /// Parse a key, falling back to the default on unknown input
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|err: ThemeError| {
            tracing::warn!("{err}; using '{}'", ColorKey::default());
            ColorKey::default()
        })
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorKey {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ColorKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ThemeError::UnknownKey {
                kind: "color",
                key: s.to_string(),
                expected: ColorKey::ALL.map(|k| k.as_str()).join(", "),
            })
    }
}

/// Palette for one cover color
#[derive(Clone, Debug, PartialEq)]
pub struct ColorTheme {
    pub key: ColorKey,
    pub label: &'static str,
    /// Gradient highlight (top-left and far corner)
    pub highlight: Color,
    pub mid: Color,
    pub low: Color,
    pub spine: Color,
    pub edge: Color,
    pub text_color: Color,
    /// Highlight below and shade above the glyphs
    pub text_shadow: [Shadow; 2],
}

impl ColorTheme {
    /// CSS `text-shadow` value
    pub fn text_shadow_css(&self) -> String {
        self.text_shadow
            .iter()
            .map(|s| {
                format!(
                    "{} {}px {} {}",
                    trim_float(s.offset_x),
                    trim_float(s.offset_y),
                    trim_float(s.blur),
                    s.color.to_css()
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Palette table
// ─────────────────────────────────────────────────────────────────────────────

const fn letterpress(below: Color, above: Color) -> [Shadow; 2] {
    [
        Shadow {
            offset_x: 0.0,
            offset_y: 1.0,
            blur: 0.0,
            spread: 0.0,
            color: below,
        },
        Shadow {
            offset_x: 0.0,
            offset_y: -1.0,
            blur: 0.0,
            spread: 0.0,
            color: above,
        },
    ]
}

const TEXT_ON_DARK: Color = Color::rgba8(255, 255, 255, 0.98);
const SHADOW_ON_DARK: [Shadow; 2] = letterpress(
    Color::rgba8(0, 0, 0, 0.25),
    Color::rgba8(255, 255, 255, 0.12),
);

static VIOLET: ColorTheme = ColorTheme {
    key: ColorKey::Violet,
    label: "Violet",
    highlight: Color::from_hex(0xa78bfa),
    mid: Color::from_hex(0x8b5cf6),
    low: Color::from_hex(0x7c3aed),
    spine: Color::from_hex(0x8b5cf6),
    edge: Color::rgba8(109, 40, 217, 0.6),
    text_color: TEXT_ON_DARK,
    text_shadow: SHADOW_ON_DARK,
};

static BLUE: ColorTheme = ColorTheme {
    key: ColorKey::Blue,
    label: "Albastru",
    highlight: Color::from_hex(0x60a5fa),
    mid: Color::from_hex(0x3b82f6),
    low: Color::from_hex(0x2563eb),
    spine: Color::from_hex(0x3b82f6),
    edge: Color::rgba8(29, 78, 216, 0.6),
    text_color: TEXT_ON_DARK,
    text_shadow: SHADOW_ON_DARK,
};

static EMERALD: ColorTheme = ColorTheme {
    key: ColorKey::Emerald,
    label: "Verde",
    highlight: Color::from_hex(0x34d399),
    mid: Color::from_hex(0x10b981),
    low: Color::from_hex(0x059669),
    spine: Color::from_hex(0x10b981),
    edge: Color::rgba8(4, 120, 87, 0.6),
    text_color: TEXT_ON_DARK,
    text_shadow: SHADOW_ON_DARK,
};

static ROSE: ColorTheme = ColorTheme {
    key: ColorKey::Rose,
    label: "Roșu",
    highlight: Color::from_hex(0xfb7185),
    mid: Color::from_hex(0xf43f5e),
    low: Color::from_hex(0xe11d48),
    spine: Color::from_hex(0xf43f5e),
    edge: Color::rgba8(190, 18, 60, 0.6),
    text_color: TEXT_ON_DARK,
    text_shadow: SHADOW_ON_DARK,
};

static AMBER: ColorTheme = ColorTheme {
    key: ColorKey::Amber,
    label: "Auriu",
    highlight: Color::from_hex(0xfcd34d),
    mid: Color::from_hex(0xf59e0b),
    low: Color::from_hex(0xd97706),
    spine: Color::from_hex(0xf59e0b),
    edge: Color::rgba8(180, 83, 9, 0.6),
    text_color: Color::rgba8(20, 16, 5, 0.88),
    text_shadow: letterpress(
        Color::rgba8(255, 255, 255, 0.4),
        Color::rgba8(0, 0, 0, 0.15),
    ),
};

static SLATE: ColorTheme = ColorTheme {
    key: ColorKey::Slate,
    label: "Gri închis",
    highlight: Color::from_hex(0x64748b),
    mid: Color::from_hex(0x475569),
    low: Color::from_hex(0x334155),
    spine: Color::from_hex(0x475569),
    edge: Color::rgba8(30, 41, 59, 0.6),
    text_color: TEXT_ON_DARK,
    text_shadow: SHADOW_ON_DARK,
};

static WHITE: ColorTheme = ColorTheme {
    key: ColorKey::White,
    label: "Alb",
    highlight: Color::from_hex(0xffffff),
    mid: Color::from_hex(0xf8fafc),
    low: Color::from_hex(0xe2e8f0),
    spine: Color::from_hex(0xf1f5f9),
    edge: Color::rgba8(148, 163, 184, 0.6),
    text_color: Color::rgba8(30, 41, 59, 0.92),
    text_shadow: letterpress(
        Color::rgba8(255, 255, 255, 0.6),
        Color::rgba8(0, 0, 0, 0.08),
    ),
};

/// Look up the palette for a cover color
pub fn color_theme(key: ColorKey) -> &'static ColorTheme {
    match key {
        ColorKey::Violet => &VIOLET,
        ColorKey::Blue => &BLUE,
        ColorKey::Emerald => &EMERALD,
        ColorKey::Rose => &ROSE,
        ColorKey::Amber => &AMBER,
        ColorKey::Slate => &SLATE,
        ColorKey::White => &WHITE,
    }
}

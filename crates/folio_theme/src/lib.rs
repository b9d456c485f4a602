//! Folio Theme Tables
//!
//! Static lookup data for notebook covers:
//!
//! - **Colors**: `ColorKey` → `ColorTheme` (gradient stops, spine, edge,
//!   letterpress title style)
//! - **Patterns**: `PatternKey` → `PatternTheme` (ruling texture plus an
//!   optional alternate for light covers)
//! - **Intensity boost**: raises faint ink so ruling stays visible on pale
//!   covers
//!
//! Lookups are exhaustive over closed enums. String parsing is the only
//! fallible entry point.
//!
//! ```rust
//! use folio_theme::{color_theme, pattern_theme, ColorKey, PatternKey};
//!
//! let blue = color_theme(ColorKey::Blue);
//! assert_eq!(blue.label, "Albastru");
//!
//! let grid = pattern_theme("matematica".parse::<PatternKey>().unwrap());
//! assert!(!grid.texture.is_none());
//! ```

pub mod color;
pub mod error;
pub mod pattern;
pub mod texture;

pub use color::{color_theme, ColorKey, ColorTheme};
pub use error::ThemeError;
pub use pattern::{pattern_theme, PatternKey, PatternTheme};
pub use texture::{boost_ink, Texture};

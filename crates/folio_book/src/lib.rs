//! Folio Book
//!
//! A stapled notebook drawn as a stack of squircle layers:
//!
//! - **Configuration**: normalized title, cover color and pattern, plus
//!   motion timings loadable from TOML
//! - **Title Layout**: length-dependent font size, truncation and two-line
//!   wrapping
//! - **Compositor**: back cover, paper sheets, staples, pages and the
//!   decorated front cover, ordered by z
//! - **Interaction**: event-driven state machines for the hover and drag
//!   variants
//! - **Animation Driver**: tweens and springs producing per-frame layer
//!   parameters
//! - **Export**: painting onto any `DrawContext`, and standalone SVG
//!
//! # Example
//!
//! ```rust
//! use folio_book::{render_book, BookConfig, BookEvent};
//! use folio_core::Dimensions;
//! use folio_theme::{ColorKey, PatternKey};
//!
//! let config = BookConfig::new("matematica", ColorKey::Blue, PatternKey::Matematica).unwrap();
//! let mut book = render_book(config, Dimensions::COVER);
//!
//! book.handle_event(BookEvent::PointerEnter);
//! while book.is_animating() {
//!     book.tick(16.0);
//! }
//! assert_eq!(book.frame().sheet_opacities.as_slice(), [1.0, 1.0, 1.0]);
//! ```

pub mod compositor;
pub mod config;
pub mod driver;
pub mod error;
pub mod frame;
pub mod outlines;
pub mod state;
pub mod svg;
pub mod title;
pub mod view;

pub use compositor::{build_layers, Fill, FillChannel, FillRegion, Layer, LayerRole};
pub use config::{BookConfig, BookVariant, MotionConfig, Transition, MAX_PAGES};
pub use driver::AnimationDriver;
pub use error::{BookError, Result};
pub use frame::{FrameParams, FrontCoverParams};
pub use outlines::BookOutlines;
pub use state::{BookEvent, InteractionMachine, InteractionState, Key, Phase};
pub use svg::commands_to_svg;
pub use title::{display_title, font_size_for, normalize_title, TitleLayout};
pub use view::{render_book, render_book_with, BookId, BookView};

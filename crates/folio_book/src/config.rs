//! Book configuration
//!
//! - [`BookConfig`]: what is on the cover (title, color, pattern)
//! - [`BookVariant`]: which interaction model the book uses
//! - [`MotionConfig`]: timings, curves and angles for the animation driver
//!
//! Motion constants can be loaded from TOML:
//!
//! ```toml
//! entry_duration_ms = 320.0
//! exit_easing = { cubic-bezier = [0.4, 0.0, 1.0, 1.0] }
//!
//! [spring]
//! stiffness = 400.0
//! damping = 40.0
//! mass = 0.5
//! ```

use std::fmt;
use std::str::FromStr;

use folio_animation::{Easing, SpringConfig};
use folio_theme::{ColorKey, PatternKey};
use serde::{Deserialize, Serialize};

use crate::error::{BookError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Book config
// ─────────────────────────────────────────────────────────────────────────────

/// Cover contents for one book
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookConfig {
    title: String,
    color: ColorKey,
    pattern: PatternKey,
}

impl BookConfig {
    /// Create a config, normalizing the title to trimmed upper case
    pub fn new(title: &str, color: ColorKey, pattern: PatternKey) -> Result<Self> {
        let title = crate::title::normalize_title(title);
        if title.is_empty() {
            return Err(BookError::EmptyTitle);
        }
        Ok(Self {
            title,
            color,
            pattern,
        })
    }

    /// Create a config from string keys
    pub fn parse(title: &str, color: &str, pattern: &str) -> Result<Self> {
        Self::new(title, color.parse()?, pattern.parse()?)
    }

    /// Normalized title, before display truncation
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn color(&self) -> ColorKey {
        self.color
    }

    pub fn pattern(&self) -> PatternKey {
        self.pattern
    }
}

/// Interaction model
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookVariant {
    /// Lifts and tilts on hover, revealing the sheets underneath
    #[default]
    Hover,
    /// Cover and pages swing open following the pointer
    Drag,
}

impl BookVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookVariant::Hover => "hover",
            BookVariant::Drag => "drag",
        }
    }

    /// Corner radius of the cover outline
    pub fn cover_radius(&self) -> f32 {
        match self {
            BookVariant::Hover => 20.0,
            BookVariant::Drag => 16.0,
        }
    }

    /// Perspective distance of the 3D transforms
    pub fn perspective(&self) -> f32 {
        match self {
            BookVariant::Hover => 600.0,
            BookVariant::Drag => 1500.0,
        }
    }
}

impl fmt::Display for BookVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hover" => Ok(BookVariant::Hover),
            "drag" => Ok(BookVariant::Drag),
            other => Err(format!("unknown variant '{other}', expected hover or drag")),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Motion config
// ─────────────────────────────────────────────────────────────────────────────

/// Duration and curve of one transition direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub duration_ms: f32,
    pub easing: Easing,
}

/// Most pages a drag book can carry; page layers are numbered with a `u8`
pub const MAX_PAGES: usize = u8::MAX as usize;

/// Animation constants, fixed for the lifetime of a book
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Front cover blend, tilt and filter when opening
    pub entry_duration_ms: f32,
    pub entry_easing: Easing,
    /// Front cover blend, tilt and filter when closing
    pub exit_duration_ms: f32,
    pub exit_easing: Easing,

    pub sheet_entry_duration_ms: f32,
    pub sheet_entry_easing: Easing,
    pub sheet_exit_duration_ms: f32,
    pub sheet_exit_easing: Easing,

    /// The overlay reuses the front cover curves
    pub overlay_entry_duration_ms: f32,
    pub overlay_exit_duration_ms: f32,
    /// Overlay opacity while opened
    pub overlay_dimmed_opacity: f32,

    /// Drag variant opening spring
    pub spring: SpringConfig,
    /// Upper bound of the drag opening amount
    pub max_drag_progress: f32,
    /// Cover rotation at a fully open amount
    pub cover_open_deg: f32,
    /// Per-page rotation step; page i turns `(i + 1) * step`
    pub page_step_deg: f32,
    pub page_count: usize,

    pub tilt_deg: f32,
    pub lift_px: f32,
    /// Front cover height lost while lifted
    pub expanded_height_delta: f32,
    /// Brightness gain while lifted; saturation gains half of it
    pub brightness_boost: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            entry_duration_ms: 280.0,
            entry_easing: Easing::overshoot(),
            exit_duration_ms: 140.0,
            exit_easing: Easing::accelerate(),
            sheet_entry_duration_ms: 180.0,
            sheet_entry_easing: Easing::ease_out_quad(),
            sheet_exit_duration_ms: 100.0,
            sheet_exit_easing: Easing::ease_in_quad(),
            overlay_entry_duration_ms: 200.0,
            overlay_exit_duration_ms: 100.0,
            overlay_dimmed_opacity: 0.6,
            spring: SpringConfig::page_turn(),
            max_drag_progress: 0.2,
            cover_open_deg: 165.0,
            page_step_deg: 10.0,
            page_count: 12,
            tilt_deg: 6.0,
            lift_px: 6.0,
            expanded_height_delta: 5.0,
            brightness_boost: 0.04,
        }
    }
}

impl MotionConfig {
    /// Parse a TOML table; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: MotionConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the driver cannot animate with
    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("entry_duration_ms", self.entry_duration_ms),
            ("exit_duration_ms", self.exit_duration_ms),
            ("sheet_entry_duration_ms", self.sheet_entry_duration_ms),
            ("sheet_exit_duration_ms", self.sheet_exit_duration_ms),
            ("overlay_entry_duration_ms", self.overlay_entry_duration_ms),
            ("overlay_exit_duration_ms", self.overlay_exit_duration_ms),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be a non-negative number, got {value}")));
            }
        }

        let easings = [
            ("entry_easing", self.entry_easing),
            ("exit_easing", self.exit_easing),
            ("sheet_entry_easing", self.sheet_entry_easing),
            ("sheet_exit_easing", self.sheet_exit_easing),
        ];
        for (name, easing) in easings {
            if !easing.is_valid() {
                return Err(invalid(format!("{name} has control points outside [0, 1] on x")));
            }
        }

        if !self.spring.is_valid() {
            return Err(invalid("spring needs positive stiffness and mass".to_string()));
        }
        if !(self.max_drag_progress > 0.0 && self.max_drag_progress <= 1.0) {
            return Err(invalid(format!(
                "max_drag_progress must be in (0, 1], got {}",
                self.max_drag_progress
            )));
        }
        if !(0.0..=1.0).contains(&self.overlay_dimmed_opacity) {
            return Err(invalid(format!(
                "overlay_dimmed_opacity must be in [0, 1], got {}",
                self.overlay_dimmed_opacity
            )));
        }
        let extents = [
            ("cover_open_deg", self.cover_open_deg),
            ("page_step_deg", self.page_step_deg),
            ("tilt_deg", self.tilt_deg),
            ("lift_px", self.lift_px),
            ("expanded_height_delta", self.expanded_height_delta),
            ("brightness_boost", self.brightness_boost),
        ];
        for (name, value) in extents {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be a non-negative number, got {value}")));
            }
        }
        if !(1..=MAX_PAGES).contains(&self.page_count) {
            return Err(invalid(format!(
                "page_count must be in 1..={MAX_PAGES}, got {}",
                self.page_count
            )));
        }
        Ok(())
    }

    /// Front cover transition in the given direction
    pub fn front(&self, opening: bool) -> Transition {
        if opening {
            Transition {
                duration_ms: self.entry_duration_ms,
                easing: self.entry_easing,
            }
        } else {
            Transition {
                duration_ms: self.exit_duration_ms,
                easing: self.exit_easing,
            }
        }
    }

    pub fn sheets(&self, opening: bool) -> Transition {
        if opening {
            Transition {
                duration_ms: self.sheet_entry_duration_ms,
                easing: self.sheet_entry_easing,
            }
        } else {
            Transition {
                duration_ms: self.sheet_exit_duration_ms,
                easing: self.sheet_exit_easing,
            }
        }
    }

    pub fn overlay(&self, opening: bool) -> Transition {
        if opening {
            Transition {
                duration_ms: self.overlay_entry_duration_ms,
                easing: self.entry_easing,
            }
        } else {
            Transition {
                duration_ms: self.overlay_exit_duration_ms,
                easing: self.exit_easing,
            }
        }
    }

    /// Largest opening amount the variant reaches
    pub fn max_progress(&self, variant: BookVariant) -> f32 {
        match variant {
            BookVariant::Hover => 1.0,
            BookVariant::Drag => self.max_drag_progress,
        }
    }
}

fn invalid(message: String) -> BookError {
    BookError::InvalidMotion(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_normalized() {
        let config = BookConfig::new("  matematica  ", ColorKey::Blue, PatternKey::Matematica)
            .expect("valid title");
        assert_eq!(config.title(), "MATEMATICA");
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let err = BookConfig::new("   ", ColorKey::Blue, PatternKey::Simplu).unwrap_err();
        assert!(matches!(err, BookError::EmptyTitle));
    }

    #[test]
    fn test_parse_reports_unknown_keys() {
        let err = BookConfig::parse("Caiet", "purple", "simplu").unwrap_err();
        assert!(matches!(err, BookError::Theme(_)));

        let config = BookConfig::parse("Caiet", "Emerald", "punctat").expect("valid keys");
        assert_eq!(config.color(), ColorKey::Emerald);
        assert_eq!(config.pattern(), PatternKey::Punctat);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("Drag".parse::<BookVariant>(), Ok(BookVariant::Drag));
        assert!("flip".parse::<BookVariant>().is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        let motion = MotionConfig::default();
        motion.validate().expect("defaults validate");
        // Opening is roughly twice as slow as closing on every channel
        assert!(motion.front(true).duration_ms >= 2.0 * motion.front(false).duration_ms);
        assert!(motion.sheets(true).duration_ms > motion.sheets(false).duration_ms);
        assert!(motion.overlay(true).duration_ms >= 2.0 * motion.overlay(false).duration_ms);
        assert_eq!(motion.max_progress(BookVariant::Hover), 1.0);
        assert_eq!(motion.max_progress(BookVariant::Drag), 0.2);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let motion = MotionConfig::from_toml_str(
            r#"
            entry_duration_ms = 320.0
            exit_easing = "ease-in"

            [spring]
            stiffness = 300.0
            damping = 30.0
            mass = 1.0
            "#,
        )
        .expect("valid motion config");
        assert_eq!(motion.entry_duration_ms, 320.0);
        assert_eq!(motion.exit_easing, Easing::EaseIn);
        assert_eq!(motion.spring.rest_delta, 0.001);
        assert_eq!(motion.sheet_entry_duration_ms, 180.0);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = MotionConfig::from_toml_str("max_drag_progress = 1.5").unwrap_err();
        assert!(matches!(err, BookError::InvalidMotion(_)));

        let err = MotionConfig::from_toml_str("exit_duration_ms = -1.0").unwrap_err();
        assert!(err.to_string().contains("exit_duration_ms"));

        let err = MotionConfig::from_toml_str("entry_duration_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, BookError::Config(_)));
    }

    #[test]
    fn test_page_count_is_bounded() {
        assert!(MotionConfig::from_toml_str("page_count = 255").is_ok());
        let err = MotionConfig::from_toml_str("page_count = 256").unwrap_err();
        assert!(err.to_string().contains("page_count"));
        assert!(MotionConfig::from_toml_str("page_count = 0").is_err());
    }
}

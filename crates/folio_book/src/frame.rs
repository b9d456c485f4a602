//! Per-frame layer parameters
//!
//! The driver produces one [`FrameParams`] per tick. Painting reads it to
//! place, rotate and fade layers; the CLI serializes it as JSON.

use folio_core::ColorFilter;
use serde::Serialize;
use smallvec::SmallVec;

use crate::compositor::LayerRole;

/// Front cover placement
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FrontCoverParams {
    /// Rotation around the spine; negative swings the cover open
    pub rotation_y_deg: f32,
    /// Outline blend from rest (0) to lifted (1)
    pub height_blend: f32,
    /// Vertical offset of the whole book; negative is up
    pub lift_px: f32,
    /// Rotation of the whole book around its vertical center line
    pub tilt_deg: f32,
}

/// Animated values for one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameParams {
    pub front_cover: FrontCoverParams,
    /// Front sheet, back sheet and sheet shadow; empty without sheets
    pub sheet_opacities: SmallVec<[f32; 3]>,
    /// Rotation of each page, first page first; empty without pages
    pub page_rotations: Vec<f32>,
    /// 0 = unfiltered, 1 = full brightness boost
    pub filter_intensity: f32,
    pub light_overlay_opacity: f32,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            front_cover: FrontCoverParams::default(),
            sheet_opacities: SmallVec::new(),
            page_rotations: Vec::new(),
            filter_intensity: 0.0,
            light_overlay_opacity: 1.0,
        }
    }
}

impl FrameParams {
    /// Driver-controlled opacity of a layer
    pub fn layer_opacity(&self, role: LayerRole) -> f32 {
        let sheet = |i: usize| self.sheet_opacities.get(i).copied().unwrap_or(0.0);
        match role {
            LayerRole::FrontSheet => sheet(0),
            LayerRole::BackSheet => sheet(1),
            LayerRole::SheetShadow => sheet(2),
            _ => 1.0,
        }
    }

    /// Rotation of a page layer, numbered from 1
    pub fn page_rotation(&self, page: u8) -> f32 {
        (page as usize)
            .checked_sub(1)
            .and_then(|i| self.page_rotations.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    /// Color filter for the front cover, given the full brightness gain
    pub fn color_filter(&self, brightness_boost: f32) -> ColorFilter {
        let intensity = self.filter_intensity.max(0.0);
        ColorFilter {
            brightness: 1.0 + brightness_boost * intensity,
            saturate: 1.0 + brightness_boost / 2.0 * intensity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_rest_frame() {
        let frame = FrameParams::default();
        assert_eq!(frame.layer_opacity(LayerRole::FrontSheet), 0.0);
        assert_eq!(frame.layer_opacity(LayerRole::FrontCover), 1.0);
        assert_eq!(frame.page_rotation(1), 0.0);
        assert!(frame.color_filter(0.04).is_none());
    }

    #[test]
    fn test_lookup() {
        let frame = FrameParams {
            sheet_opacities: smallvec![0.25, 0.5, 0.75],
            page_rotations: vec![-4.0, -6.0],
            filter_intensity: 1.0,
            ..Default::default()
        };
        assert_eq!(frame.layer_opacity(LayerRole::SheetShadow), 0.75);
        assert_eq!(frame.page_rotation(2), -6.0);
        assert_eq!(frame.page_rotation(0), 0.0);
        assert_eq!(frame.page_rotation(3), 0.0);
        let filter = frame.color_filter(0.04);
        assert!((filter.brightness - 1.04).abs() < 1e-6);
        assert!((filter.saturate - 1.02).abs() < 1e-6);
    }

    #[test]
    fn test_serializes_as_json() {
        let frame = FrameParams {
            sheet_opacities: smallvec![1.0, 1.0, 1.0],
            ..Default::default()
        };
        let json = serde_json::to_value(&frame).expect("serializable");
        assert_eq!(json["light_overlay_opacity"], 1.0);
        assert_eq!(json["sheet_opacities"].as_array().map(|a| a.len()), Some(3));
        assert_eq!(json["front_cover"]["rotation_y_deg"], 0.0);
    }
}

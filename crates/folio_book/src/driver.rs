//! Animation driver
//!
//! Turns the interaction state into animated frame parameters. The hover
//! variant animates three timed channels towards a binary target:
//!
//! | Channel | Drives                              | Opening       | Closing       |
//! |---------|-------------------------------------|---------------|---------------|
//! | front   | outline blend, lift, tilt, filter   | 280 ms spring | 140 ms fall   |
//! | sheets  | sheet and sheet shadow opacity      | 180 ms        | 100 ms        |
//! | overlay | light overlay opacity               | 200 ms        | 100 ms        |
//!
//! The drag variant follows the pointer through a single overdamped spring
//! that rotates the cover and the pages.
//!
//! A new target restarts a channel from its current value, so reversing
//! mid-transition never jumps.

use folio_animation::{Spring, Tween};

use crate::config::{BookVariant, MotionConfig, Transition, MAX_PAGES};
use crate::frame::{FrameParams, FrontCoverParams};
use crate::state::{BookEvent, InteractionMachine, InteractionState, Phase};

/// Drives one book's animation from host events and clock ticks
#[derive(Clone, Debug)]
pub struct AnimationDriver {
    variant: BookVariant,
    motion: MotionConfig,
    machine: InteractionMachine,
    front: Tween<f32>,
    sheets: Tween<f32>,
    overlay: Tween<f32>,
    spring: Spring,
    frame: FrameParams,
}

impl AnimationDriver {
    /// Create an idle driver for a book `width` pixels wide
    pub fn new(variant: BookVariant, motion: MotionConfig, width: f32) -> Self {
        let machine = InteractionMachine::new(variant, width, motion.max_progress(variant));
        let spring = Spring::new(motion.spring, 0.0);
        let mut driver = Self {
            variant,
            motion,
            machine,
            front: Tween::new(0.0),
            sheets: Tween::new(0.0),
            overlay: Tween::new(0.0),
            spring,
            frame: FrameParams::default(),
        };
        driver.frame = driver.compute_frame();
        driver
    }

    pub fn variant(&self) -> BookVariant {
        self.variant
    }

    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    pub fn state(&self) -> InteractionState {
        self.machine.state()
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    /// Parameters computed by the latest tick
    pub fn frame(&self) -> &FrameParams {
        &self.frame
    }

    /// Feed a host event, returning whether the animation target changed
    pub fn handle_event(&mut self, event: &BookEvent) -> bool {
        if !self.machine.handle(event) {
            return false;
        }
        self.retarget();
        true
    }

    /// Whether another tick would change the frame
    pub fn is_animating(&self) -> bool {
        match self.variant {
            BookVariant::Hover => {
                !(self.front.is_finished() && self.sheets.is_finished() && self.overlay.is_finished())
            }
            BookVariant::Drag => !self.spring.is_settled(),
        }
    }

    /// Advance the clock by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) -> &FrameParams {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        match self.variant {
            BookVariant::Hover => {
                self.front.advance(dt_ms);
                self.sheets.advance(dt_ms);
                self.overlay.advance(dt_ms);
            }
            BookVariant::Drag => self.spring.advance(dt_ms / 1000.0),
        }
        self.frame = self.compute_frame();
        tracing::trace!(dt_ms, frame = ?self.frame, "book tick");
        &self.frame
    }

    fn retarget(&mut self) {
        let state = self.machine.state();
        match self.variant {
            BookVariant::Hover => {
                let opening = state.hovered;
                let target = if opening { 1.0 } else { 0.0 };
                retarget(&mut self.front, target, self.motion.front(opening));
                retarget(&mut self.sheets, target, self.motion.sheets(opening));
                retarget(&mut self.overlay, target, self.motion.overlay(opening));
            }
            BookVariant::Drag => self.spring.set_target(state.progress),
        }
    }

    fn compute_frame(&self) -> FrameParams {
        let motion = &self.motion;
        match self.variant {
            BookVariant::Hover => {
                let front = *self.front.value();
                let sheets = self.sheets.value().clamp(0.0, 1.0);
                let overlay = *self.overlay.value();
                let dimmed = 1.0 - (1.0 - motion.overlay_dimmed_opacity) * overlay;
                FrameParams {
                    front_cover: FrontCoverParams {
                        rotation_y_deg: 0.0,
                        height_blend: front,
                        lift_px: -motion.lift_px * front,
                        tilt_deg: -motion.tilt_deg * front,
                    },
                    sheet_opacities: smallvec::smallvec![sheets; 3],
                    page_rotations: Vec::new(),
                    filter_intensity: front.max(0.0),
                    light_overlay_opacity: dimmed.clamp(0.0, 1.0),
                }
            }
            BookVariant::Drag => {
                let amount = self.spring.value();
                FrameParams {
                    front_cover: FrontCoverParams {
                        rotation_y_deg: -motion.cover_open_deg * amount,
                        ..Default::default()
                    },
                    sheet_opacities: Default::default(),
                    page_rotations: (1..=motion.page_count.min(MAX_PAGES))
                        .map(|i| -((i + 1) as f32) * motion.page_step_deg * amount)
                        .collect(),
                    filter_intensity: 0.0,
                    light_overlay_opacity: 1.0,
                }
            }
        }
    }
}

fn retarget(tween: &mut Tween<f32>, target: f32, transition: Transition) {
    if *tween.target() != target {
        tween.retarget(target, transition.duration_ms, transition.easing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hover() -> AnimationDriver {
        AnimationDriver::new(BookVariant::Hover, MotionConfig::default(), 200.0)
    }

    fn drag() -> AnimationDriver {
        AnimationDriver::new(BookVariant::Drag, MotionConfig::default(), 200.0)
    }

    /// Milliseconds until `done` holds, ticking 1 ms at a time
    fn time_until(driver: &mut AnimationDriver, done: impl Fn(&FrameParams) -> bool) -> u32 {
        for ms in 1..=2000 {
            if done(driver.tick(1.0)) {
                return ms;
            }
        }
        panic!("condition never reached");
    }

    #[test]
    fn test_rest_frame() {
        let driver = hover();
        let frame = driver.frame();
        assert_eq!(frame.sheet_opacities.as_slice(), [0.0, 0.0, 0.0]);
        assert_eq!(frame.light_overlay_opacity, 1.0);
        assert!(!driver.is_animating());
    }

    #[test]
    fn test_hover_opens_and_settles() {
        let mut driver = hover();
        assert!(driver.handle_event(&BookEvent::PointerEnter));
        assert!(driver.is_animating());
        driver.tick(1000.0);
        let frame = driver.frame();
        assert_eq!(frame.front_cover.height_blend, 1.0);
        assert_eq!(frame.front_cover.lift_px, -6.0);
        assert_eq!(frame.front_cover.tilt_deg, -6.0);
        assert_eq!(frame.sheet_opacities.as_slice(), [1.0, 1.0, 1.0]);
        assert!((frame.light_overlay_opacity - 0.6).abs() < 1e-6);
        assert!(!driver.is_animating());
    }

    #[test]
    fn test_entry_overshoots_before_settling() {
        let mut driver = hover();
        driver.handle_event(&BookEvent::PointerEnter);
        let mut peak = 0.0f32;
        for _ in 0..280 {
            peak = peak.max(driver.tick(1.0).front_cover.height_blend);
        }
        assert!(peak > 1.0, "peak {peak}");
        assert_eq!(driver.frame().front_cover.height_blend, 1.0);
    }

    #[test]
    fn test_entry_is_slower_than_exit() {
        let mut driver = hover();
        driver.handle_event(&BookEvent::PointerEnter);
        let opening = time_until(&mut driver, |f| f.sheet_opacities[0] >= 0.9);
        driver.tick(1000.0);

        driver.handle_event(&BookEvent::PointerLeave);
        let closing = time_until(&mut driver, |f| f.sheet_opacities[0] <= 0.9);
        assert!(opening > closing, "opening {opening}ms, closing {closing}ms");
    }

    #[test]
    fn test_settle_times() {
        let mut driver = hover();
        driver.handle_event(&BookEvent::PointerEnter);
        let mut opening = 0;
        while driver.is_animating() {
            driver.tick(1.0);
            opening += 1;
        }
        driver.handle_event(&BookEvent::PointerLeave);
        let mut closing = 0;
        while driver.is_animating() {
            driver.tick(1.0);
            closing += 1;
        }
        assert_eq!(opening, 280);
        assert_eq!(closing, 140);
        assert_eq!(driver.frame().front_cover.height_blend, 0.0);
    }

    #[test]
    fn test_reversal_starts_from_current_value() {
        let mut driver = hover();
        driver.handle_event(&BookEvent::PointerEnter);
        driver.tick(50.0);
        let before = driver.frame().sheet_opacities[0];
        assert!(before > 0.0 && before < 1.0);

        driver.handle_event(&BookEvent::PointerLeave);
        let after = driver.tick(1.0).sheet_opacities[0];
        assert!((after - before).abs() < 0.05, "jumped from {before} to {after}");
    }

    #[test]
    fn test_enter_leave_returns_to_rest() {
        let mut driver = hover();
        driver.handle_event(&BookEvent::PointerEnter);
        driver.tick(16.0);
        driver.handle_event(&BookEvent::PointerLeave);
        assert_eq!(driver.state().progress, 0.0);
        assert!(!driver.state().hovered);
        driver.tick(1000.0);
        assert_eq!(driver.frame(), hover().frame());
    }

    #[test]
    fn test_drag_rotation_follows_pointer() {
        let mut driver = drag();
        driver.handle_event(&BookEvent::PointerDown { x: 0.0, y: 100.0 });
        assert_eq!(driver.state().progress, 0.2);

        let mut deepest = 0.0f32;
        for _ in 0..1000 {
            let frame = driver.tick(2.0);
            deepest = deepest.min(frame.front_cover.rotation_y_deg);
        }
        // Overdamped: approaches -33 degrees without passing it
        assert!(deepest >= -33.0 - 1e-3, "overshot to {deepest}");
        let frame = driver.frame();
        assert!((frame.front_cover.rotation_y_deg + 33.0).abs() < 0.2);
        assert_eq!(frame.page_rotations.len(), 12);
        assert!((frame.page_rotations[0] + 4.0).abs() < 0.05);
        assert!((frame.page_rotations[11] + 26.0).abs() < 0.2);
        assert!(frame
            .page_rotations
            .windows(2)
            .all(|w| w[1] < w[0]));

        driver.handle_event(&BookEvent::PointerUp);
        driver.tick(3000.0);
        assert!(driver.frame().front_cover.rotation_y_deg.abs() < 0.2);
        assert!(!driver.is_animating());
    }

    #[test]
    fn test_drag_ignores_sheet_channels() {
        let mut driver = drag();
        driver.handle_event(&BookEvent::PointerMove { x: 50.0, y: 10.0 });
        let frame = driver.tick(100.0);
        assert!(frame.sheet_opacities.is_empty());
        assert_eq!(frame.light_overlay_opacity, 1.0);
        assert!(frame.front_cover.rotation_y_deg < 0.0);
    }

    #[test]
    fn test_rotations_match_page_layers() {
        let motion = MotionConfig {
            page_count: 300,
            ..Default::default()
        };
        let mut driver = AnimationDriver::new(BookVariant::Drag, motion, 200.0);
        driver.handle_event(&BookEvent::PointerDown { x: 0.0, y: 0.0 });
        assert_eq!(driver.tick(16.0).page_rotations.len(), MAX_PAGES);
    }

    #[test]
    fn test_bad_tick_is_ignored() {
        let mut driver = hover();
        driver.handle_event(&BookEvent::PointerEnter);
        driver.tick(f32::NAN);
        driver.tick(-5.0);
        assert_eq!(driver.frame().front_cover.height_blend, 0.0);
    }
}

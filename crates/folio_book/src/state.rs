//! Interaction state machine
//!
//! Host input is reduced to an [`InteractionState`]: whether the book is
//! engaged, whether a drag is in progress, and the target opening amount.
//! Each variant has its own phase enum whose transitions are a single
//! `match (self, event)` table.
//!
//! ```text
//! Hover:  Idle ──enter/focus/key down──▶ Engaged ──leave/blur/key up──▶ Idle
//!
//! Drag:   Idle ──enter/move/focus──▶ Engaged ──down──▶ Dragging
//!           ▲                          │                  │
//!           └────────leave/up/blur─────┴──────up/leave────┘
//! ```

use std::fmt;
use std::hash::Hash;

use serde::Serialize;

use crate::config::BookVariant;

/// Key identity, as far as the book cares
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Space,
    Other,
}

impl Key {
    /// Keys that open the book while held
    pub fn activates(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// Input event, with pointer positions in book-local coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BookEvent {
    PointerEnter,
    PointerLeave,
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    Focus,
    Blur,
    KeyDown(Key),
    KeyUp(Key),
}

impl BookEvent {
    /// Horizontal pointer position, when the event carries one
    pub fn pointer_x(&self) -> Option<f32> {
        match *self {
            BookEvent::PointerDown { x, .. } | BookEvent::PointerMove { x, .. } => Some(x),
            _ => None,
        }
    }

    fn is_activation(&self) -> bool {
        match self {
            BookEvent::Focus => true,
            BookEvent::KeyDown(key) => key.activates(),
            _ => false,
        }
    }

    fn is_deactivation(&self) -> bool {
        match self {
            BookEvent::Blur => true,
            BookEvent::KeyUp(key) => key.activates(),
            _ => false,
        }
    }
}

/// Trait for phase enums driven by [`BookEvent`]s
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + fmt::Debug + 'static
{
    /// Handle an event and return the new phase, or None if no transition
    fn on_event(&self, event: &BookEvent) -> Option<Self>;
}

/// Hover variant phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HoverPhase {
    #[default]
    Idle,
    Engaged,
}

impl StateTransitions for HoverPhase {
    fn on_event(&self, event: &BookEvent) -> Option<Self> {
        match (self, event) {
            (HoverPhase::Idle, BookEvent::PointerEnter) => Some(HoverPhase::Engaged),
            (HoverPhase::Idle, e) if e.is_activation() => Some(HoverPhase::Engaged),

            (HoverPhase::Engaged, BookEvent::PointerLeave) => Some(HoverPhase::Idle),
            (HoverPhase::Engaged, e) if e.is_deactivation() => Some(HoverPhase::Idle),
            _ => None,
        }
    }
}

/// Drag variant phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pointer over the book or keyboard focus
    Engaged,
    /// Pointer held down
    Dragging,
}

impl StateTransitions for DragPhase {
    fn on_event(&self, event: &BookEvent) -> Option<Self> {
        match (self, event) {
            // Moving over the book opens it without a press
            (DragPhase::Idle, BookEvent::PointerEnter | BookEvent::PointerMove { .. }) => {
                Some(DragPhase::Engaged)
            }
            (DragPhase::Idle, e) if e.is_activation() => Some(DragPhase::Engaged),

            (DragPhase::Idle | DragPhase::Engaged, BookEvent::PointerDown { .. }) => {
                Some(DragPhase::Dragging)
            }

            (DragPhase::Engaged, BookEvent::PointerLeave | BookEvent::PointerUp) => {
                Some(DragPhase::Idle)
            }
            (DragPhase::Engaged, e) if e.is_deactivation() => Some(DragPhase::Idle),

            // Leaving mid-drag cancels like a release
            (DragPhase::Dragging, BookEvent::PointerUp | BookEvent::PointerLeave) => {
                Some(DragPhase::Idle)
            }
            (DragPhase::Dragging, BookEvent::Blur) => Some(DragPhase::Idle),
            _ => None,
        }
    }
}

/// Phase of either variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Hover(HoverPhase),
    Drag(DragPhase),
}

impl Phase {
    pub fn initial(variant: BookVariant) -> Self {
        match variant {
            BookVariant::Hover => Phase::Hover(HoverPhase::Idle),
            BookVariant::Drag => Phase::Drag(DragPhase::Idle),
        }
    }

    pub fn is_engaged(&self) -> bool {
        !matches!(
            self,
            Phase::Hover(HoverPhase::Idle) | Phase::Drag(DragPhase::Idle)
        )
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Phase::Drag(DragPhase::Dragging))
    }
}

impl StateTransitions for Phase {
    fn on_event(&self, event: &BookEvent) -> Option<Self> {
        match self {
            Phase::Hover(phase) => phase.on_event(event).map(Phase::Hover),
            Phase::Drag(phase) => phase.on_event(event).map(Phase::Drag),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Interaction state
// ─────────────────────────────────────────────────────────────────────────────

/// Opening amount for a pointer at `x` over a book of `width`
///
/// The right edge maps to 0 and the left edge to 1, capped at `max`.
pub fn drag_progress(x: f32, width: f32, max: f32) -> f32 {
    if !x.is_finite() || !(width > 0.0) {
        return 0.0;
    }
    let center_x = width / 2.0;
    let offset = (x - center_x) / (width / 2.0);
    let progress = 1.0 - (offset + 1.0) / 2.0;
    progress.clamp(0.0, max)
}

/// Snapshot of the host input as the driver sees it
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct InteractionState {
    pub hovered: bool,
    pub dragging: bool,
    /// Target opening amount in `[0, max_progress]`
    pub progress: f32,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            hovered: false,
            dragging: false,
            progress: 0.0,
        }
    }
}

/// Reduces events into an [`InteractionState`]
#[derive(Clone, Debug)]
pub struct InteractionMachine {
    phase: Phase,
    state: InteractionState,
    width: f32,
    max_progress: f32,
}

impl InteractionMachine {
    pub fn new(variant: BookVariant, width: f32, max_progress: f32) -> Self {
        Self {
            phase: Phase::initial(variant),
            state: InteractionState::default(),
            width,
            max_progress,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Apply an event, returning whether the state changed
    pub fn handle(&mut self, event: &BookEvent) -> bool {
        let previous = self.state;
        if let Some(next) = self.phase.on_event(event) {
            tracing::debug!(from = ?self.phase, to = ?next, ?event, "book phase transition");
            self.phase = next;
        }

        let progress = match self.phase {
            Phase::Hover(HoverPhase::Idle) | Phase::Drag(DragPhase::Idle) => 0.0,
            Phase::Hover(HoverPhase::Engaged) => self.max_progress,
            Phase::Drag(_) => match event.pointer_x() {
                Some(x) => drag_progress(x, self.width, self.max_progress),
                None if event.is_activation() => self.max_progress,
                None => previous.progress,
            },
        };

        self.state = InteractionState {
            hovered: self.phase.is_engaged(),
            dragging: self.phase.is_dragging(),
            progress,
        };
        self.state != previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hover() -> InteractionMachine {
        InteractionMachine::new(BookVariant::Hover, 200.0, 1.0)
    }

    fn drag() -> InteractionMachine {
        InteractionMachine::new(BookVariant::Drag, 200.0, 0.2)
    }

    #[test]
    fn test_hover_transitions() {
        use BookEvent::*;
        let idle = HoverPhase::Idle;
        assert_eq!(idle.on_event(&PointerEnter), Some(HoverPhase::Engaged));
        assert_eq!(idle.on_event(&Focus), Some(HoverPhase::Engaged));
        assert_eq!(idle.on_event(&KeyDown(Key::Space)), Some(HoverPhase::Engaged));
        assert_eq!(idle.on_event(&KeyDown(Key::Other)), None);
        assert_eq!(idle.on_event(&PointerLeave), None);

        let engaged = HoverPhase::Engaged;
        assert_eq!(engaged.on_event(&PointerLeave), Some(HoverPhase::Idle));
        assert_eq!(engaged.on_event(&KeyUp(Key::Enter)), Some(HoverPhase::Idle));
        assert_eq!(engaged.on_event(&PointerDown { x: 0.0, y: 0.0 }), None);
    }

    #[test]
    fn test_drag_transitions() {
        use BookEvent::*;
        let down = PointerDown { x: 0.0, y: 0.0 };
        assert_eq!(DragPhase::Idle.on_event(&down), Some(DragPhase::Dragging));
        assert_eq!(DragPhase::Engaged.on_event(&down), Some(DragPhase::Dragging));
        assert_eq!(DragPhase::Dragging.on_event(&PointerUp), Some(DragPhase::Idle));
        assert_eq!(DragPhase::Dragging.on_event(&PointerLeave), Some(DragPhase::Idle));
        assert_eq!(DragPhase::Dragging.on_event(&PointerMove { x: 1.0, y: 1.0 }), None);
    }

    #[test]
    fn test_enter_then_leave_resets() {
        let mut machine = hover();
        assert!(machine.handle(&BookEvent::PointerEnter));
        assert_eq!(machine.state().progress, 1.0);
        assert!(machine.state().hovered);

        assert!(machine.handle(&BookEvent::PointerLeave));
        assert_eq!(machine.state(), InteractionState::default());
    }

    #[test]
    fn test_repeated_events_do_not_change_state() {
        let mut machine = hover();
        machine.handle(&BookEvent::PointerEnter);
        assert!(!machine.handle(&BookEvent::Focus));
        assert!(!machine.handle(&BookEvent::PointerEnter));
    }

    #[test]
    fn test_drag_progress_mapping() {
        assert_eq!(drag_progress(200.0, 200.0, 1.0), 0.0);
        assert_eq!(drag_progress(100.0, 200.0, 1.0), 0.5);
        assert_eq!(drag_progress(0.0, 200.0, 1.0), 1.0);
        assert_eq!(drag_progress(0.0, 200.0, 0.2), 0.2);
        assert_eq!(drag_progress(-500.0, 200.0, 0.2), 0.2);
        assert_eq!(drag_progress(900.0, 200.0, 0.2), 0.0);
        assert_eq!(drag_progress(f32::NAN, 200.0, 0.2), 0.0);
    }

    #[test]
    fn test_drag_never_exceeds_max() {
        let mut machine = drag();
        machine.handle(&BookEvent::PointerDown { x: 150.0, y: 10.0 });
        assert!(machine.state().dragging);
        for step in -40..=60 {
            let x = step as f32 * 5.0;
            machine.handle(&BookEvent::PointerMove { x, y: 10.0 });
            let progress = machine.state().progress;
            assert!((0.0..=0.2).contains(&progress), "progress {progress} at x={x}");
        }
        machine.handle(&BookEvent::PointerUp);
        assert_eq!(machine.state(), InteractionState::default());
    }

    #[test]
    fn test_drag_moves_without_press_open_the_cover() {
        let mut machine = drag();
        machine.handle(&BookEvent::PointerMove { x: 90.0, y: 10.0 });
        assert!(machine.state().hovered);
        assert!(!machine.state().dragging);
        assert!((machine.state().progress - 0.2).abs() < 1e-6);

        machine.handle(&BookEvent::PointerMove { x: 170.0, y: 10.0 });
        assert!((machine.state().progress - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_leave_while_dragging_cancels() {
        let mut machine = drag();
        machine.handle(&BookEvent::PointerDown { x: 20.0, y: 10.0 });
        assert_eq!(machine.state().progress, 0.2);
        machine.handle(&BookEvent::PointerLeave);
        assert_eq!(machine.phase(), Phase::Drag(DragPhase::Idle));
        assert_eq!(machine.state().progress, 0.0);
    }

    #[test]
    fn test_keyboard_opens_drag_variant_fully() {
        let mut machine = drag();
        machine.handle(&BookEvent::KeyDown(Key::Enter));
        assert_eq!(machine.state().progress, 0.2);
        machine.handle(&BookEvent::KeyUp(Key::Enter));
        assert_eq!(machine.state().progress, 0.0);
    }
}

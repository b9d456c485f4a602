//! Folio Animation System
//!
//! Spring physics, easing curves, and retargetable tweens.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Easing**: polynomial curves and CSS cubic-bezier timing functions
//! - **Tweens**: timed transitions that restart from the current value when
//!   their target changes
//! - **Interpolation**: scalars, colors, points and squircle outlines

pub mod easing;
pub mod spring;
pub mod tween;
pub mod values;

pub use easing::Easing;
pub use spring::{Spring, SpringConfig};
pub use tween::Tween;
pub use values::Interpolate;

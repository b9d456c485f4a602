//! Geometry error types

use thiserror::Error;

/// Errors raised when validating geometry inputs
///
/// Outline generation itself never fails; these are only returned by the
/// explicit validating constructors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Width or height is non-positive or not finite
    #[error("invalid dimensions {width}x{height}: both sides must be positive and finite")]
    InvalidDimensions { width: f32, height: f32 },
}

//! Color parsing errors.

use thiserror::Error;

/// Errors produced by strict color parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string is not `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    #[error("invalid color format: '{0}'")]
    InvalidColorFormat(String),
}

//! Color math for codesh theme generation.
//!
//! Hex parsing and formatting, RGB/HSL conversion, lightness and saturation
//! adjustments, alpha compositing, mixing, and WCAG luminance/contrast.
//!
//! Two layers are provided:
//! - [`Color`] and [`Hsl`] values with infallible transforms, used by the
//!   theme synthesizer once its inputs are parsed.
//! - Hex-string functions in [`ops`] that parse strictly and fail with
//!   [`ColorError::InvalidColorFormat`] on malformed input.

mod color;
mod error;
mod hsl;
pub mod ops;

pub use color::Color;
pub use error::ColorError;
pub use hsl::Hsl;
pub use ops::{
    adjust_brightness, alpha, contrast_ratio, contrasting_text_color, darken, desaturate,
    hex_to_hsl, hex_to_rgb, hsl_to_hex, is_dark, is_light, is_valid_hex, lighten, luminance, mix,
    rgb_to_hex, saturate, transform, TransformOp,
};

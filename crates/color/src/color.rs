//! RGB(A) color value.

use std::fmt;
use std::str::FromStr;

use crate::{ColorError, Hsl};

/// An sRGB color with an optional alpha channel.
///
/// `a == None` means the color is opaque and is written as `#RRGGBB`;
/// `Some(_)` is written as `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<u8>,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: None }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`; the leading `#` is optional.
    ///
    /// Short forms expand each nibble by duplication (`#abc` → `#aabbcc`).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidColorFormat(hex.to_string());

        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let nibble = |i: usize| -> u8 {
            // Validated above, so every byte is a hex digit.
            let v = (digits.as_bytes()[i] as char).to_digit(16).unwrap_or(0) as u8;
            v * 17
        };
        let byte = |i: usize| -> u8 { u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0) };

        match digits.len() {
            3 => Ok(Self::rgb(nibble(0), nibble(1), nibble(2))),
            4 => Ok(Self::rgb(nibble(0), nibble(1), nibble(2)).with_alpha(nibble(3))),
            6 => Ok(Self::rgb(byte(0), byte(2), byte(4))),
            8 => Ok(Self::rgb(byte(0), byte(2), byte(4)).with_alpha(byte(6))),
            _ => Err(invalid()),
        }
    }

    /// Same color with an explicit alpha byte.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a: Some(a), ..self }
    }

    /// Same color without alpha.
    pub const fn opaque(self) -> Self {
        Self { a: None, ..self }
    }

    /// Uppercase `#RRGGBB`, ignoring alpha.
    pub fn to_rgb_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Uppercase `#RRGGBB` or `#RRGGBBAA` when alpha is present.
    pub fn to_hex(&self) -> String {
        match self.a {
            Some(a) => format!("{}{:02X}", self.to_rgb_hex(), a),
            None => self.to_rgb_hex(),
        }
    }

    /// HSL representation (alpha is dropped).
    pub fn to_hsl(&self) -> Hsl {
        Hsl::from(*self)
    }

    /// Increase HSL lightness by `percent` points, capped at 100.
    pub fn lighten(self, percent: f64) -> Self {
        let mut hsl = self.to_hsl();
        hsl.l = (hsl.l + percent).min(100.0);
        hsl.to_color()
    }

    /// Decrease HSL lightness by `percent` points, floored at 0.
    pub fn darken(self, percent: f64) -> Self {
        let mut hsl = self.to_hsl();
        hsl.l = (hsl.l - percent).max(0.0);
        hsl.to_color()
    }

    /// Positive values lighten, negative values darken.
    pub fn adjust_brightness(self, percent: f64) -> Self {
        if percent >= 0.0 {
            self.lighten(percent)
        } else {
            self.darken(percent.abs())
        }
    }

    /// Increase HSL saturation by `percent` points, capped at 100.
    pub fn saturate(self, percent: f64) -> Self {
        let mut hsl = self.to_hsl();
        hsl.s = (hsl.s + percent).min(100.0);
        hsl.to_color()
    }

    /// Decrease HSL saturation by `percent` points, floored at 0.
    pub fn desaturate(self, percent: f64) -> Self {
        let mut hsl = self.to_hsl();
        hsl.s = (hsl.s - percent).max(0.0);
        hsl.to_color()
    }

    /// Replace alpha with `round(opacity * 255)`; opacity is clamped to `[0, 1]`.
    pub fn alpha(self, opacity: f64) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.with_alpha(a)
    }

    /// Per-channel weighted average: `round(self * w + other * (1 - w))`, `w = weight / 100`.
    ///
    /// Rounding is half away from zero, so mixing black and white at 50 yields `#808080`.
    pub fn mix(self, other: Color, weight: f64) -> Self {
        let w = weight.clamp(0.0, 100.0) / 100.0;
        let channel = |a: u8, b: u8| -> i32 { (a as f64 * w + b as f64 * (1.0 - w)).round() as i32 };
        Self::from_channels(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }

    /// Opaque color from possibly out-of-range channels, clamped to `[0, 255]`.
    pub fn from_channels(r: i32, g: i32, b: i32) -> Self {
        let clamp = |v: i32| v.clamp(0, 255) as u8;
        Self::rgb(clamp(r), clamp(g), clamp(b))
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn luminance(&self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = channel as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// WCAG contrast ratio, always `>= 1`.
    pub fn contrast_ratio(&self, other: &Color) -> f64 {
        let l1 = self.luminance();
        let l2 = other.luminance();
        (l1.max(l2) + 0.05) / (l1.min(l2) + 0.05)
    }

    pub fn is_light(&self) -> bool {
        self.luminance() > 0.5
    }

    pub fn is_dark(&self) -> bool {
        !self.is_light()
    }

    /// Black on light backgrounds, white on dark ones.
    pub fn contrasting_text(&self) -> Color {
        if self.is_light() {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

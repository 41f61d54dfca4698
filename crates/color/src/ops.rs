//! Hex-string color operations.
//!
//! Every function parses its input strictly with [`Color::from_hex`] and
//! returns uppercase hex. HSL adjustments always produce opaque `#RRGGBB`
//! (an input alpha byte is dropped); [`alpha`] produces `#RRGGBBAA`.

use crate::{Color, ColorError, Hsl};

/// A single step of a [`transform`] pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Lighten(f64),
    Darken(f64),
    Saturate(f64),
    Desaturate(f64),
    /// Opacity in `[0, 1]`.
    Alpha(f64),
}

impl TransformOp {
    pub fn apply(self, color: Color) -> Color {
        match self {
            TransformOp::Lighten(pct) => color.lighten(pct),
            TransformOp::Darken(pct) => color.darken(pct),
            TransformOp::Saturate(pct) => color.saturate(pct),
            TransformOp::Desaturate(pct) => color.desaturate(pct),
            TransformOp::Alpha(opacity) => color.alpha(opacity),
        }
    }
}

/// Parse a hex color into its channels.
pub fn hex_to_rgb(hex: &str) -> Result<Color, ColorError> {
    Color::from_hex(hex)
}

/// Format channels as `#RRGGBB`, clamping each to `[0, 255]`.
pub fn rgb_to_hex(r: i32, g: i32, b: i32) -> String {
    Color::from_channels(r, g, b).to_rgb_hex()
}

pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    Ok(Color::from_hex(hex)?.to_hsl())
}

pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    Hsl::new(h, s, l).to_color().to_rgb_hex()
}

pub fn lighten(hex: &str, percent: f64) -> Result<String, ColorError> {
    Ok(Color::from_hex(hex)?.lighten(percent).to_hex())
}

pub fn darken(hex: &str, percent: f64) -> Result<String, ColorError> {
    Ok(Color::from_hex(hex)?.darken(percent).to_hex())
}

pub fn adjust_brightness(hex: &str, percent: f64) -> Result<String, ColorError> {
    Ok(Color::from_hex(hex)?.adjust_brightness(percent).to_hex())
}

pub fn saturate(hex: &str, percent: f64) -> Result<String, ColorError> {
    Ok(Color::from_hex(hex)?.saturate(percent).to_hex())
}

pub fn desaturate(hex: &str, percent: f64) -> Result<String, ColorError> {
    Ok(Color::from_hex(hex)?.desaturate(percent).to_hex())
}

/// Replace any existing alpha byte with `round(opacity * 255)`.
pub fn alpha(hex: &str, opacity: f64) -> Result<String, ColorError> {
    Ok(Color::from_hex(hex)?.alpha(opacity).to_hex())
}

/// Weighted per-channel mix; `weight` is the share of `hex1` in percent.
pub fn mix(hex1: &str, hex2: &str, weight: f64) -> Result<String, ColorError> {
    let c1 = Color::from_hex(hex1)?;
    let c2 = Color::from_hex(hex2)?;
    Ok(c1.mix(c2, weight).to_rgb_hex())
}

pub fn luminance(hex: &str) -> Result<f64, ColorError> {
    Ok(Color::from_hex(hex)?.luminance())
}

pub fn contrast_ratio(hex1: &str, hex2: &str) -> Result<f64, ColorError> {
    Ok(Color::from_hex(hex1)?.contrast_ratio(&Color::from_hex(hex2)?))
}

pub fn is_light(hex: &str) -> Result<bool, ColorError> {
    Ok(Color::from_hex(hex)?.is_light())
}

pub fn is_dark(hex: &str) -> Result<bool, ColorError> {
    Ok(Color::from_hex(hex)?.is_dark())
}

/// `#000000` for light backgrounds, `#FFFFFF` for dark ones.
pub fn contrasting_text_color(background: &str) -> Result<String, ColorError> {
    Ok(Color::from_hex(background)?.contrasting_text().to_rgb_hex())
}

/// `#RRGGBB` or `#RRGGBBAA`, with or without `#`.
pub fn is_valid_hex(hex: &str) -> bool {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    matches!(digits.len(), 6 | 8) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Apply `ops` in order, each consuming the previous result.
pub fn transform(hex: &str, ops: &[TransformOp]) -> Result<String, ColorError> {
    let color = Color::from_hex(hex)?;
    if ops.is_empty() {
        return Ok(color.to_hex());
    }
    Ok(ops.iter().fold(color, |acc, op| op.apply(acc)).to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "#1F1F22", "#ABB2BF", "#7F848E", "#C678DD", "#98C379", "#D19A66", "#61AFEF", "#E5C07B",
        "#E06C75", "#56B6C2", "#FAFAFA", "#383A42", "#000000", "#FFFFFF", "#0184BC", "#123456",
    ];

    #[test]
    fn test_hex_to_rgb_expands_short_form() {
        let c = hex_to_rgb("#abc").unwrap();
        assert_eq!((c.r, c.g, c.b), (0xAA, 0xBB, 0xCC));
        let c = hex_to_rgb("1f1f22").unwrap();
        assert_eq!((c.r, c.g, c.b), (0x1F, 0x1F, 0x22));
    }

    #[test]
    fn test_rgb_hex_round_trip() {
        for hex in SAMPLES {
            let c = hex_to_rgb(hex).unwrap();
            assert_eq!(rgb_to_hex(c.r as i32, c.g as i32, c.b as i32), *hex);
        }
    }

    #[test]
    fn test_rgb_to_hex_clamps() {
        assert_eq!(rgb_to_hex(-1, 256, 16), "#00FF10");
    }

    #[test]
    fn test_hsl_round_trip() {
        for hex in SAMPLES {
            let hsl = hex_to_hsl(hex).unwrap();
            let back = hex_to_rgb(&hsl_to_hex(hsl.h, hsl.s, hsl.l)).unwrap();
            let orig = hex_to_rgb(hex).unwrap();
            assert!((back.r as i32 - orig.r as i32).abs() <= 1);
            assert!((back.g as i32 - orig.g as i32).abs() <= 1);
            assert!((back.b as i32 - orig.b as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_zero_adjustments_are_identity() {
        for hex in SAMPLES {
            assert_eq!(lighten(hex, 0.0).unwrap(), *hex);
            assert_eq!(darken(hex, 0.0).unwrap(), *hex);
            assert_eq!(saturate(hex, 0.0).unwrap(), *hex);
            assert_eq!(desaturate(hex, 0.0).unwrap(), *hex);
            assert_eq!(adjust_brightness(hex, 0.0).unwrap(), *hex);
        }
    }

    #[test]
    fn test_lightness_boundaries() {
        assert_eq!(lighten("#000000", 100.0).unwrap(), "#FFFFFF");
        assert_eq!(darken("#FFFFFF", 100.0).unwrap(), "#000000");
        assert_eq!(lighten("#336699", 1000.0).unwrap(), "#FFFFFF");
        assert_eq!(darken("#336699", 1000.0).unwrap(), "#000000");
    }

    #[test]
    fn test_adjust_brightness_sign() {
        assert_eq!(
            adjust_brightness("#1F1F22", 3.0).unwrap(),
            lighten("#1F1F22", 3.0).unwrap()
        );
        assert_eq!(
            adjust_brightness("#FAFAFA", -3.0).unwrap(),
            darken("#FAFAFA", 3.0).unwrap()
        );
    }

    #[test]
    fn test_saturation_clamps() {
        let grey = desaturate("#C678DD", 100.0).unwrap();
        let hsl = hex_to_hsl(&grey).unwrap();
        assert!(hsl.s < 1.0);
        let vivid = saturate("#C678DD", 1000.0).unwrap();
        assert!(hex_to_hsl(&vivid).unwrap().s > 99.0);
    }

    #[test]
    fn test_alpha() {
        assert_eq!(alpha("#112233", 1.0).unwrap(), "#112233FF");
        assert_eq!(alpha("#112233", 0.0).unwrap(), "#11223300");
        assert_eq!(alpha("#112233", 0.4).unwrap(), "#11223366");
        // existing alpha is replaced, not appended
        assert_eq!(alpha("#112233AA", 0.5).unwrap(), "#11223380");
        assert_eq!(alpha("#abc", 0.1).unwrap(), "#AABBCC1A");
    }

    #[test]
    fn test_mix() {
        assert_eq!(mix("#000000", "#FFFFFF", 50.0).unwrap(), "#808080");
        assert_eq!(mix("#FF0000", "#0000FF", 100.0).unwrap(), "#FF0000");
        assert_eq!(mix("#FF0000", "#0000FF", 0.0).unwrap(), "#0000FF");
    }

    #[test]
    fn test_luminance_and_contrast() {
        assert_eq!(luminance("#000000").unwrap(), 0.0);
        assert!((luminance("#FFFFFF").unwrap() - 1.0).abs() < 1e-9);
        for hex in SAMPLES {
            assert!((contrast_ratio(hex, hex).unwrap() - 1.0).abs() < 1e-12);
        }
        assert!(contrast_ratio("#000000", "#FFFFFF").unwrap() > 20.9);
    }

    #[test]
    fn test_light_dark() {
        assert!(is_light("#FFFFFF").unwrap());
        assert!(is_dark("#000000").unwrap());
        assert!(!is_light("#1F1F22").unwrap());
        assert_eq!(contrasting_text_color("#FAFAFA").unwrap(), "#000000");
        assert_eq!(contrasting_text_color("#1F1F22").unwrap(), "#FFFFFF");
    }

    #[test]
    fn test_transform_pipeline_order() {
        let ops = [TransformOp::Lighten(10.0), TransformOp::Alpha(0.5)];
        let expected = alpha(&lighten("#336699", 10.0).unwrap(), 0.5).unwrap();
        assert_eq!(transform("#336699", &ops).unwrap(), expected);

        // alpha first, then lighten drops the alpha byte again
        let ops = [TransformOp::Alpha(0.5), TransformOp::Lighten(10.0)];
        assert_eq!(
            transform("#336699", &ops).unwrap(),
            lighten("#336699", 10.0).unwrap()
        );

        assert_eq!(transform("#abc", &[]).unwrap(), "#AABBCC");
    }

    #[test]
    fn test_invalid_input_is_an_error() {
        assert!(matches!(
            lighten("not-a-color", 10.0),
            Err(ColorError::InvalidColorFormat(_))
        ));
        assert!(mix("#000000", "#12", 50.0).is_err());
        assert!(!is_valid_hex("#abc"));
        assert!(is_valid_hex("#AABBCC"));
        assert!(is_valid_hex("aabbccdd"));
    }
}

//! Color space conversions between hex strings, RGB and HSL, plus the WCAG 2.1
//! luminance and contrast math used to grade text/background pairs.
//!
//! HSL values are integers (degrees and percent), rounded at every
//! conversion, so `rgb -> hsl -> rgb` is only stable to within one unit.

use std::fmt;

use palette::{LinSrgb, Srgb};
use serde::{Deserialize, Serialize};

/// White text, chosen for dark backgrounds.
pub const LIGHT_TEXT: &str = "#FFFFFF";
/// Black text, chosen for light backgrounds.
pub const DARK_TEXT: &str = "#000000";

const BRIGHTNESS_THRESHOLD: f64 = 128.0;
const AAA_MIN_CONTRAST: f64 = 7.0;
const AA_MIN_CONTRAST: f64 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for Srgb<u8> {
    fn from(rgb: Rgb) -> Self {
        Srgb::new(rgb.r, rgb.g, rgb.b)
    }
}

/// Hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    pub const fn new(h: u16, s: u8, l: u8) -> Self {
        Self { h, s, l }
    }
}

/// Parse `#rrggbb` (the `#` is optional, case is ignored).
///
/// Input is not validated: anything that is not six hex digits yields a
/// meaningless color rather than an error.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    let cleaned = hex.strip_prefix('#').unwrap_or(hex);
    let bits = u32::from_str_radix(cleaned, 16).unwrap_or(0);
    Rgb {
        r: ((bits >> 16) & 255) as u8,
        g: ((bits >> 8) & 255) as u8,
        b: (bits & 255) as u8,
    }
}

pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

fn channel_from_f64(c: f64) -> u8 {
    c.clamp(0.0, 255.0).round() as u8
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / d + 2.0) / 6.0
        } else {
            ((r - g) / d + 4.0) / 6.0
        };
        (h, s)
    };

    Hsl {
        // a hue a hair below 1.0 rounds up to 360, which is the same angle as 0
        h: ((h * 360.0).round() as u16) % 360,
        s: (s * 100.0).round() as u8,
        l: (l * 100.0).round() as u8,
    }
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = f64::from(hsl.h) / 360.0;
    let s = f64::from(hsl.s) / 100.0;
    let l = f64::from(hsl.l) / 100.0;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    Rgb {
        r: channel_from_f64(r * 255.0),
        g: channel_from_f64(g * 255.0),
        b: channel_from_f64(b * 255.0),
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Relative luminance of a color per WCAG 2.1, in `[0.0, 1.0]`.
///
/// For 8-bit channels the sRGB transfer function used by `palette` picks the
/// same linear/power branch as the WCAG 0.03928 cutoff.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let linear: LinSrgb<f64> = Srgb::<u8>::from(rgb).into_format::<f64>().into_linear();
    0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
}

/// WCAG contrast ratio between two hex colors, in `[1.0, 21.0]`.
/// Argument order does not matter.
pub fn calculate_contrast(color1: &str, color2: &str) -> f64 {
    let l1 = relative_luminance(hex_to_rgb(color1));
    let l2 = relative_luminance(hex_to_rgb(color2));
    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG conformance for normal-size text. Ordered `Fail < Aa < Aaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagRating {
    Fail,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

impl WcagRating {
    pub fn as_str(self) -> &'static str {
        match self {
            WcagRating::Fail => "Fail",
            WcagRating::Aa => "AA",
            WcagRating::Aaa => "AAA",
        }
    }
}

impl fmt::Display for WcagRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn wcag_rating(contrast: f64) -> WcagRating {
    if contrast >= AAA_MIN_CONTRAST {
        WcagRating::Aaa
    } else if contrast >= AA_MIN_CONTRAST {
        WcagRating::Aa
    } else {
        WcagRating::Fail
    }
}

/// Perceived brightness of a hex color in `[0, 255]` (YIQ weights).
pub fn perceived_brightness(color: &str) -> f64 {
    let rgb = hex_to_rgb(color);
    (f64::from(rgb.r) * 299.0 + f64::from(rgb.g) * 587.0 + f64::from(rgb.b) * 114.0) / 1000.0
}

pub fn should_use_light_text(background: &str) -> bool {
    perceived_brightness(background) < BRIGHTNESS_THRESHOLD
}

/// Pick black or white text for a background color.
pub fn text_color_for_background(background: &str) -> &'static str {
    if should_use_light_text(background) {
        LIGHT_TEXT
    } else {
        DARK_TEXT
    }
}

//! Palette-level analysis: harmony, a scale per color and a contrast matrix
//! for the leading colors.

use serde::Serialize;

use crate::color::{calculate_contrast, wcag_rating, WcagRating, DARK_TEXT, LIGHT_TEXT};
use crate::extracted::{generate_color_scales, ColorWithScale, ExtractedColor};
use crate::scale::{detect_color_harmony, HarmonyResult};

/// Only the first colors of a palette are compared against each other.
pub const MATRIX_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastCheck {
    pub ratio: f64,
    pub rating: WcagRating,
}

impl ContrastCheck {
    pub fn between(foreground: &str, background: &str) -> Self {
        let ratio = calculate_contrast(foreground, background);
        Self {
            ratio,
            rating: wcag_rating(ratio),
        }
    }
}

/// One foreground color checked against every matrix color and against
/// plain white and black.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastRow {
    pub hex: String,
    pub against: Vec<ContrastCheck>,
    pub on_white: ContrastCheck,
    pub on_black: ContrastCheck,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteReport {
    pub colors: Vec<ColorWithScale>,
    /// `None` for an empty palette.
    pub harmony: Option<HarmonyResult>,
    pub accessibility: Vec<ContrastRow>,
}

pub fn accessibility_matrix(colors: &[ExtractedColor]) -> Vec<ContrastRow> {
    let top = &colors[..colors.len().min(MATRIX_SIZE)];
    top.iter()
        .map(|fg| ContrastRow {
            hex: fg.hex.clone(),
            against: top
                .iter()
                .map(|bg| ContrastCheck::between(&fg.hex, &bg.hex))
                .collect(),
            on_white: ContrastCheck::between(&fg.hex, LIGHT_TEXT),
            on_black: ContrastCheck::between(&fg.hex, DARK_TEXT),
        })
        .collect()
}

pub fn analyze_palette(colors: &[ExtractedColor]) -> PaletteReport {
    let harmony = (!colors.is_empty()).then(|| {
        let hexes: Vec<&str> = colors.iter().map(|c| c.hex.as_str()).collect();
        detect_color_harmony(&hexes)
    });

    PaletteReport {
        colors: generate_color_scales(colors),
        harmony,
        accessibility: accessibility_matrix(colors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::scale::HarmonyType;

    fn swatch(r: u8, g: u8, b: u8) -> ExtractedColor {
        ExtractedColor::from_rgb(Rgb::new(r, g, b), 10, None)
    }

    #[test]
    fn empty_palette_has_no_harmony() {
        let report = analyze_palette(&[]);
        assert_eq!(report.harmony, None);
        assert!(report.colors.is_empty());
        assert!(report.accessibility.is_empty());
    }

    #[test]
    fn matrix_covers_leading_colors_only() {
        let colors: Vec<ExtractedColor> = (0..8u8).map(|i| swatch(30 * i, 100, 200)).collect();
        let rows = accessibility_matrix(&colors);
        assert_eq!(rows.len(), MATRIX_SIZE);
        assert!(rows.iter().all(|row| row.against.len() == MATRIX_SIZE));
        assert_eq!(rows[2].hex, colors[2].hex);
    }

    #[test]
    fn red_against_white_and_black() {
        let rows = accessibility_matrix(&[swatch(255, 0, 0)]);
        let red = &rows[0];
        assert!((red.against[0].ratio - 1.0).abs() < 1e-9);
        assert_eq!(red.against[0].rating, WcagRating::Fail);
        assert!((red.on_white.ratio - 4.0).abs() < 0.01);
        assert_eq!(red.on_white.rating, WcagRating::Fail);
        assert!((red.on_black.ratio - 5.25).abs() < 0.01);
        assert_eq!(red.on_black.rating, WcagRating::Aa);
    }

    #[test]
    fn report_keeps_palette_order() {
        let colors = vec![swatch(255, 0, 0), swatch(0, 255, 0), swatch(0, 0, 255)];
        let report = analyze_palette(&colors);
        assert_eq!(report.harmony.map(|h| h.kind), Some(HarmonyType::Triadic));
        let hexes: Vec<&str> = report.colors.iter().map(|c| c.hex.as_str()).collect();
        assert_eq!(hexes, ["#ff0000", "#00ff00", "#0000ff"]);
        assert_eq!(report.accessibility.len(), 3);
    }

    #[test]
    fn serializes_ratings_and_scales() {
        let report = analyze_palette(&[swatch(255, 0, 0)]);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["harmony"]["type"], "Monochromatic");
        assert_eq!(value["accessibility"][0]["on_black"]["rating"], "AA");
        assert_eq!(value["colors"][0]["hex"], "#ff0000");
        assert!(value["colors"][0]["scale"]["500"].is_string());
    }
}

//! Tint/shade scales and palette harmony.
//!
//! A scale keeps only the hue and saturation of its base color. Lightness
//! comes from a fixed table, so every scale has the same lightness profile and
//! the 500 step sits at 50% even when the base color does not.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::color::{hex_to_rgb, hsl_to_rgb, rgb_to_hex, rgb_to_hsl, Hsl};

/// A step of an 11-step color scale, lightest (`S50`) to darkest (`S950`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shade {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    S950,
}

impl Shade {
    pub const ALL: [Shade; 11] = [
        Shade::S50,
        Shade::S100,
        Shade::S200,
        Shade::S300,
        Shade::S400,
        Shade::S500,
        Shade::S600,
        Shade::S700,
        Shade::S800,
        Shade::S900,
        Shade::S950,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Shade::S50 => "50",
            Shade::S100 => "100",
            Shade::S200 => "200",
            Shade::S300 => "300",
            Shade::S400 => "400",
            Shade::S500 => "500",
            Shade::S600 => "600",
            Shade::S700 => "700",
            Shade::S800 => "800",
            Shade::S900 => "900",
            Shade::S950 => "950",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Target lightness in percent.
    pub fn lightness(self) -> u8 {
        SCALE_LIGHTNESS[self.index()]
    }

    /// Saturation for this step given the base color's saturation.
    pub fn saturation(self, base: u8) -> u8 {
        let s = i32::from(base);
        let adjusted = match self {
            Shade::S50 => (s - 10).max(10),
            Shade::S100 => (s - 5).max(15),
            Shade::S200 | Shade::S300 | Shade::S800 => s,
            Shade::S400 | Shade::S700 => (s + 5).min(100),
            Shade::S500 => (s + 10).min(100),
            Shade::S600 => (s + 8).min(100),
            Shade::S900 => (s - 5).max(20),
            Shade::S950 => (s - 10).max(20),
        };
        adjusted.clamp(0, 100) as u8
    }
}

impl fmt::Display for Shade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Lightness per shade, indexed like [`Shade::ALL`].
pub const SCALE_LIGHTNESS: [u8; 11] = [97, 94, 86, 76, 64, 50, 42, 34, 26, 18, 10];

/// Hex color for each of the 11 shades.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorScale {
    shades: [String; 11],
}

impl ColorScale {
    pub fn get(&self, shade: Shade) -> &str {
        &self.shades[shade.index()]
    }

    /// Shades in order from 50 to 950.
    pub fn iter(&self) -> impl Iterator<Item = (Shade, &str)> {
        Shade::ALL.into_iter().zip(self.shades.iter().map(String::as_str))
    }
}

impl std::ops::Index<Shade> for ColorScale {
    type Output = str;

    fn index(&self, shade: Shade) -> &str {
        self.get(shade)
    }
}

impl Serialize for ColorScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.shades.len()))?;
        for (shade, hex) in self.iter() {
            map.serialize_entry(shade.key(), hex)?;
        }
        map.end()
    }
}

/// Expand a base color into the 50..950 scale.
pub fn generate_color_scale(base_color: &str) -> ColorScale {
    let hsl = rgb_to_hsl(hex_to_rgb(base_color));
    let shades = Shade::ALL.map(|shade| {
        let step = Hsl::new(hsl.h, shade.saturation(hsl.s), shade.lightness());
        rgb_to_hex(hsl_to_rgb(step))
    });
    ColorScale { shades }
}

/// Dark-mode counterpart: light colors are pulled down, dark ones lifted, and
/// saturation is nudged up.
pub fn generate_dark_variant(color: &str) -> String {
    let hsl = rgb_to_hsl(hex_to_rgb(color));
    let l = i32::from(hsl.l);
    let lightness = if l > 50 { (l - 40).max(20) } else { (l + 20).min(70) };
    let saturation = (i32::from(hsl.s) + 10).min(100);
    rgb_to_hex(hsl_to_rgb(Hsl::new(hsl.h, saturation as u8, lightness as u8)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HarmonyType {
    Monochromatic,
    Analogous,
    Complementary,
    #[serde(rename = "Split-Complementary")]
    SplitComplementary,
    Triadic,
    Tetradic,
    Mixed,
}

impl HarmonyType {
    pub fn as_str(self) -> &'static str {
        match self {
            HarmonyType::Monochromatic => "Monochromatic",
            HarmonyType::Analogous => "Analogous",
            HarmonyType::Complementary => "Complementary",
            HarmonyType::SplitComplementary => "Split-Complementary",
            HarmonyType::Triadic => "Triadic",
            HarmonyType::Tetradic => "Tetradic",
            HarmonyType::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for HarmonyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmonyResult {
    #[serde(rename = "type")]
    pub kind: HarmonyType,
    pub score: u8,
}

impl HarmonyResult {
    fn new(kind: HarmonyType, score: i32) -> Self {
        Self {
            kind,
            score: score.clamp(0, 100) as u8,
        }
    }
}

const MONOCHROMATIC_MAX_SPREAD: i32 = 15;
const ANALOGOUS_MAX_SPREAD: i32 = 60;
const ANALOGOUS_IDEAL_SPREAD: i32 = 30;
const COMPLEMENTARY_RANGE: (i32, i32) = (150, 180);
const TRIADIC_AVG_RANGE: (f64, f64) = (100.0, 140.0);
const SPLIT_MIN_SPREAD: i32 = 150;
const SPLIT_MIN_GAP_RANGE: (i32, i32) = (20, 60);
const TETRADIC_AVG_RANGE: (f64, f64) = (70.0, 100.0);

/// Circular distance between two hues, folded into `[0, 180]`.
fn hue_distance(a: u16, b: u16) -> i32 {
    let diff = (i32::from(a) - i32::from(b)).abs();
    if diff > 180 {
        360 - diff
    } else {
        diff
    }
}

/// Classify a palette by the pairwise hue distances of its colors.
pub fn detect_color_harmony<S: AsRef<str>>(colors: &[S]) -> HarmonyResult {
    if colors.len() < 2 {
        return HarmonyResult::new(HarmonyType::Monochromatic, 100);
    }

    let hues: Vec<u16> = colors
        .iter()
        .map(|c| rgb_to_hsl(hex_to_rgb(c.as_ref())).h)
        .collect();

    let mut diffs = Vec::with_capacity(hues.len() * (hues.len() - 1) / 2);
    for (i, &a) in hues.iter().enumerate() {
        for &b in &hues[i + 1..] {
            diffs.push(hue_distance(a, b));
        }
    }

    let max = diffs.iter().copied().max().unwrap_or(0);
    let min = diffs.iter().copied().min().unwrap_or(0);
    let avg = f64::from(diffs.iter().sum::<i32>()) / diffs.len() as f64;
    let in_range = |v: f64, (lo, hi): (f64, f64)| v >= lo && v <= hi;

    if max <= MONOCHROMATIC_MAX_SPREAD {
        return HarmonyResult::new(HarmonyType::Monochromatic, 100 - max);
    }
    if max <= ANALOGOUS_MAX_SPREAD {
        return HarmonyResult::new(HarmonyType::Analogous, 90 - (max - ANALOGOUS_IDEAL_SPREAD));
    }
    if diffs
        .iter()
        .any(|&d| d >= COMPLEMENTARY_RANGE.0 && d <= COMPLEMENTARY_RANGE.1)
    {
        return HarmonyResult::new(HarmonyType::Complementary, 85);
    }
    if colors.len() >= 3 && in_range(avg, TRIADIC_AVG_RANGE) {
        return HarmonyResult::new(HarmonyType::Triadic, 80);
    }
    if max >= SPLIT_MIN_SPREAD && min >= SPLIT_MIN_GAP_RANGE.0 && min <= SPLIT_MIN_GAP_RANGE.1 {
        return HarmonyResult::new(HarmonyType::SplitComplementary, 75);
    }
    if colors.len() >= 4 && in_range(avg, TETRADIC_AVG_RANGE) {
        return HarmonyResult::new(HarmonyType::Tetradic, 70);
    }

    HarmonyResult::new(HarmonyType::Mixed, 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lightness(hex: &str) -> u8 {
        rgb_to_hsl(hex_to_rgb(hex)).l
    }

    #[test]
    fn scale_has_eleven_lowercase_hex_shades() {
        let scale = generate_color_scale("#8B5CF6");
        assert_eq!(scale.iter().count(), 11);
        for (_, hex) in scale.iter() {
            assert_eq!(hex.len(), 7);
            assert!(hex.starts_with('#'));
            assert!(hex[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn scale_lightness_strictly_decreases() {
        for base in ["#3B82F6", "#8b5cf6", "#ff0000", "#808080", "#0a0a0a", "#fafafa", "#10b981"] {
            let scale = generate_color_scale(base);
            let ls: Vec<u8> = scale.iter().map(|(_, hex)| lightness(hex)).collect();
            for pair in ls.windows(2) {
                assert!(pair[0] > pair[1], "{base}: {ls:?}");
            }
        }
    }

    #[test]
    fn scale_500_is_normalized_to_half_lightness() {
        let base = "#3B82F6";
        assert_eq!(lightness(base), 60);
        let scale = generate_color_scale(base);
        assert_eq!(lightness(&scale[Shade::S500]), 50);
        assert_ne!(scale.get(Shade::S500), base.to_lowercase());
    }

    #[test]
    fn saturation_table_clamps() {
        assert_eq!(Shade::S50.saturation(5), 10);
        assert_eq!(Shade::S100.saturation(5), 15);
        assert_eq!(Shade::S500.saturation(95), 100);
        assert_eq!(Shade::S600.saturation(50), 58);
        assert_eq!(Shade::S900.saturation(10), 20);
        assert_eq!(Shade::S950.saturation(100), 90);
        assert_eq!(Shade::S200.saturation(42), 42);
    }

    #[test]
    fn shade_values_and_keys() {
        assert_eq!(Shade::S500.key(), "500");
        assert_eq!(Shade::S950.to_string(), "950");
    }

    #[test]
    fn dark_variant_moves_lightness_toward_middle() {
        // l = 94 -> 54
        assert_eq!(lightness(&generate_dark_variant("#f0f0f0")), 54);
        // l = 20 -> 40
        assert_eq!(lightness(&generate_dark_variant("#333333")), 40);
    }

    #[test]
    fn harmony_single_color_is_monochromatic() {
        let result = detect_color_harmony(&["#FF0000"]);
        assert_eq!(result.kind, HarmonyType::Monochromatic);
        assert_eq!(result.score, 100);
        let empty: [&str; 0] = [];
        assert_eq!(detect_color_harmony(&empty).score, 100);
    }

    #[test]
    fn harmony_close_reds_are_monochromatic() {
        let result = detect_color_harmony(&["#FF0000", "#FF1010", "#FF2020"]);
        assert_eq!(result.kind, HarmonyType::Monochromatic);
    }

    #[test]
    fn harmony_primaries_are_triadic() {
        let result = detect_color_harmony(&["#FF0000", "#00FF00", "#0000FF"]);
        assert_eq!(result.kind, HarmonyType::Triadic);
        assert_eq!(result.score, 80);
    }

    #[test]
    fn harmony_opposites_are_complementary() {
        let result = detect_color_harmony(&["#FF0000", "#00FFFF"]);
        assert_eq!(result.kind, HarmonyType::Complementary);
        assert_eq!(result.score, 85);
    }

    #[test]
    fn harmony_analogous_score_falls_with_spread() {
        // red (0) and orange (30): spread 30
        let result = detect_color_harmony(&["#FF0000", "#FF8000"]);
        assert_eq!(result.kind, HarmonyType::Analogous);
        assert_eq!(result.score, 90);
        // spread 20 scores exactly 100
        let tight = detect_color_harmony(&["#FF0000", "#FF5500"]);
        assert_eq!(tight.kind, HarmonyType::Analogous);
        assert_eq!(tight.score, 100);
    }

    #[test]
    fn harmony_analogous_score_is_clamped() {
        // red (0) and #ff4400 (16): 90 - (16 - 30) = 104
        let result = detect_color_harmony(&["#ff0000", "#ff4400"]);
        assert_eq!(result.kind, HarmonyType::Analogous);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn harmony_four_spread_hues_are_tetradic() {
        // hues 0, 60, 120, 140: widest gap 140, mean gap 80
        let result = detect_color_harmony(&["#ff0000", "#ffff00", "#00ff00", "#00ff55"]);
        assert_eq!(result.kind, HarmonyType::Tetradic);
        assert_eq!(result.score, 70);
    }

    #[test]
    fn harmony_unmatched_pair_is_mixed() {
        // 120 apart, but triadic needs three colors
        let result = detect_color_harmony(&["#ff0000", "#00ff00"]);
        assert_eq!(result.kind, HarmonyType::Mixed);
        assert_eq!(result.score, 60);
    }

    #[test]
    fn harmony_serializes_hyphenated_type() {
        let result = HarmonyResult::new(HarmonyType::SplitComplementary, 75);
        let value = serde_json::to_value(result).unwrap();
        assert_eq!(value["type"], "Split-Complementary");
        assert_eq!(value["score"], 75);
    }
}

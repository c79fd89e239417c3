use serde::{Deserialize, Serialize};

use crate::color::{rgb_to_hex, rgb_to_hsl, Hsl, Rgb};
use crate::naming::{generate_color_name, ColorRole};
use crate::scale::{generate_color_scale, ColorScale};

/// One swatch of an extraction result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedColor {
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
    /// Share of sampled pixels in this color's cluster, in percent.
    pub population: u8,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ColorRole>,
}

impl ExtractedColor {
    /// Build a swatch from a color, deriving hex, HSL and name.
    pub fn from_rgb(rgb: Rgb, population: u8, role: Option<ColorRole>) -> Self {
        Self {
            hex: rgb_to_hex(rgb),
            rgb,
            hsl: rgb_to_hsl(rgb),
            population,
            name: generate_color_name(rgb),
            role,
        }
    }

    /// Perceptual importance: frequent and vivid colors rank first.
    pub fn importance(&self) -> f64 {
        f64::from(self.population) * (f64::from(self.hsl.s) / 100.0 + 0.5)
    }

    pub fn with_scale(&self) -> ColorWithScale {
        ColorWithScale {
            scale: generate_color_scale(&self.hex),
            color: self.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorWithScale {
    #[serde(flatten)]
    pub color: ExtractedColor,
    pub scale: ColorScale,
}

impl std::ops::Deref for ColorWithScale {
    type Target = ExtractedColor;

    fn deref(&self) -> &ExtractedColor {
        &self.color
    }
}

/// Attach a 50..950 scale to each color, keeping order.
pub fn generate_color_scales(colors: &[ExtractedColor]) -> Vec<ColorWithScale> {
    colors.iter().map(ExtractedColor::with_scale).collect()
}

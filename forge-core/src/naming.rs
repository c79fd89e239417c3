//! Human-readable color names and design-system role suggestions.
//!
//! Both classifiers are heuristics over rounded HSL values. Thresholds are kept
//! in ordered tables: the first entry whose bound exceeds the measured value
//! wins.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{rgb_to_hsl, Rgb};

/// Below this saturation a color is named from the gray ramp.
pub const NEUTRAL_MAX_SATURATION: u8 = 10;
/// Above this lightness a color is named from the pastel table.
pub const PASTEL_MIN_LIGHTNESS: u8 = 85;
/// Below this lightness a color is named from the dark table.
pub const DARK_MAX_LIGHTNESS: u8 = 20;

/// `(exclusive upper lightness bound, name)` for low-saturation colors.
pub const NEUTRAL_NAMES: &[(u8, &str)] = &[
    (15, "Charcoal"),
    (30, "Dark Gray"),
    (50, "Gray"),
    (70, "Silver"),
    (85, "Light Gray"),
    (u8::MAX, "Off White"),
];

/// `(exclusive upper hue bound, name)` for very light colors. Hues from 330
/// wrap around to the first entry.
pub const PASTEL_NAMES: &[(u16, &str)] = &[
    (30, "Blush"),
    (60, "Cream"),
    (90, "Mint"),
    (150, "Seafoam"),
    (210, "Ice Blue"),
    (270, "Lavender"),
    (330, "Rose"),
];

/// `(exclusive upper hue bound, name)` for very dark colors. Hues from 330
/// wrap around to the first entry.
pub const DARK_NAMES: &[(u16, &str)] = &[
    (30, "Maroon"),
    (60, "Brown"),
    (150, "Forest"),
    (270, "Navy"),
    (330, "Plum"),
];

/// Hue at which the pastel and dark tables wrap back to their first entry.
const RED_WRAP_HUE: u16 = 330;

/// `(exclusive upper hue bound, name)` for everything else.
pub const HUE_NAMES: &[(u16, &str)] = &[
    (15, "Red"),
    (35, "Orange"),
    (50, "Gold"),
    (65, "Yellow"),
    (85, "Lime"),
    (120, "Green"),
    (150, "Teal"),
    (180, "Cyan"),
    (210, "Blue"),
    (250, "Indigo"),
    (280, "Purple"),
    (310, "Magenta"),
    (340, "Pink"),
    (360, "Red"),
];

const LIGHT_PREFIX_MIN_LIGHTNESS: u8 = 65;
const DARK_PREFIX_MAX_LIGHTNESS: u8 = 35;
const VIVID_PREFIX_MIN_SATURATION: u8 = 70;

/// First name in `table` whose bound exceeds `value`, or the first entry when
/// `value` runs past the end of the table.
fn lookup<T: PartialOrd + Copy>(table: &[(T, &'static str)], value: T) -> &'static str {
    table
        .iter()
        .find(|(bound, _)| value < *bound)
        .or_else(|| table.first())
        .map_or("", |&(_, name)| name)
}

fn wrapped_hue_lookup(table: &[(u16, &'static str)], hue: u16) -> &'static str {
    if hue >= RED_WRAP_HUE {
        return table.first().map_or("", |&(_, name)| name);
    }
    lookup(table, hue)
}

pub fn generate_color_name(rgb: Rgb) -> String {
    let hsl = rgb_to_hsl(rgb);

    if hsl.s < NEUTRAL_MAX_SATURATION {
        return lookup(NEUTRAL_NAMES, hsl.l).to_string();
    }
    if hsl.l > PASTEL_MIN_LIGHTNESS {
        return wrapped_hue_lookup(PASTEL_NAMES, hsl.h).to_string();
    }
    if hsl.l < DARK_MAX_LIGHTNESS {
        return wrapped_hue_lookup(DARK_NAMES, hsl.h).to_string();
    }

    let base = lookup(HUE_NAMES, hsl.h);
    if hsl.l > LIGHT_PREFIX_MIN_LIGHTNESS {
        format!("Light {base}")
    } else if hsl.l < DARK_PREFIX_MAX_LIGHTNESS {
        format!("Dark {base}")
    } else if hsl.s > VIVID_PREFIX_MIN_SATURATION {
        format!("Vivid {base}")
    } else {
        base.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Neutral,
    Background,
}

impl ColorRole {
    pub const ALL: [ColorRole; 5] = [
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Accent,
        ColorRole::Neutral,
        ColorRole::Background,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Accent => "accent",
            ColorRole::Neutral => "neutral",
            ColorRole::Background => "background",
        }
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const VIVID_MIN_SATURATION: u8 = 70;
const VIVID_LIGHTNESS: (u8, u8) = (30, 70);
const MUTED_MAX_SATURATION: u8 = 20;
const BACKGROUND_MIN_LIGHTNESS: u8 = 80;

/// Suggest a role from a color's HSL values and its rank in the extraction.
pub fn suggest_color_role(rgb: Rgb, index: usize, total_colors: usize) -> ColorRole {
    let hsl = rgb_to_hsl(rgb);

    let vivid = hsl.s > VIVID_MIN_SATURATION
        && hsl.l > VIVID_LIGHTNESS.0
        && hsl.l < VIVID_LIGHTNESS.1;
    if vivid {
        return match index {
            0 => ColorRole::Primary,
            1 => ColorRole::Secondary,
            _ => ColorRole::Accent,
        };
    }

    if hsl.s < MUTED_MAX_SATURATION {
        return if hsl.l > BACKGROUND_MIN_LIGHTNESS {
            ColorRole::Background
        } else {
            ColorRole::Neutral
        };
    }

    match index {
        0 => ColorRole::Primary,
        1 => ColorRole::Secondary,
        // index < total / 2 without losing the half on odd totals
        i if i * 2 < total_colors => ColorRole::Accent,
        _ => ColorRole::Neutral,
    }
}

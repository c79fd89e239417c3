//! Color math for palette extraction: conversions, WCAG contrast, naming,
//! role suggestions, tint/shade scales and harmony detection.

pub mod color;
pub mod extracted;
pub mod naming;
pub mod report;
pub mod scale;

pub use color::{
    calculate_contrast, hex_to_rgb, hsl_to_rgb, perceived_brightness, relative_luminance,
    rgb_to_hex, rgb_to_hsl, should_use_light_text, text_color_for_background, wcag_rating, Hsl,
    Rgb, WcagRating, DARK_TEXT, LIGHT_TEXT,
};
pub use extracted::{generate_color_scales, ColorWithScale, ExtractedColor};
pub use naming::{generate_color_name, suggest_color_role, ColorRole};
pub use report::{
    accessibility_matrix, analyze_palette, ContrastCheck, ContrastRow, PaletteReport, MATRIX_SIZE,
};
pub use scale::{
    detect_color_harmony, generate_color_scale, generate_dark_variant, ColorScale, HarmonyResult,
    HarmonyType, Shade,
};

//! Serializers that turn a palette and its tokens into stylesheet, config and
//! design-tool files.
//!
//! Every exporter is a pure function of its input. Output is meant to be
//! pasted into real projects, so identical input must always produce
//! byte-identical text; JSON objects therefore keep insertion order.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use forge_core::{generate_color_scale, hex_to_rgb, ExtractedColor};
use palette::Srgb;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::tokens::{to_token_name, TokenLayers, TokenMap};

pub const DEFAULT_FILE_STEM: &str = "palette-tokens";

/// Slug used by the file exporters when a color name has no usable characters.
const FALLBACK_SLUG: &str = "color";

static QUOTED_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]+)":"#).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Css,
    Tailwind,
    Scss,
    Json,
    Figma,
    TokensStudio,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::Css,
        ExportFormat::Tailwind,
        ExportFormat::Scss,
        ExportFormat::Json,
        ExportFormat::Figma,
        ExportFormat::TokensStudio,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Css => "css",
            ExportFormat::Tailwind => "tailwind",
            ExportFormat::Scss => "scss",
            ExportFormat::Json => "json",
            ExportFormat::Figma => "figma",
            ExportFormat::TokensStudio => "tokens-studio",
        }
    }

    /// Parse a format name, falling back to CSS for anything unrecognized.
    pub fn from_name(name: &str) -> ExportFormat {
        name.parse().unwrap_or_else(|_| {
            log::warn!("unknown export format `{name}`, using css");
            ExportFormat::Css
        })
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Css => ".css",
            ExportFormat::Tailwind => ".js",
            ExportFormat::Scss => ".scss",
            ExportFormat::Json => ".json",
            ExportFormat::Figma => ".figma.json",
            ExportFormat::TokensStudio => ".tokens-studio.json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Css => "text/css",
            ExportFormat::Tailwind | ExportFormat::Scss => "text/plain",
            ExportFormat::Json | ExportFormat::Figma | ExportFormat::TokensStudio => {
                "application/json"
            }
        }
    }

    pub fn file_name(self, stem: &str) -> String {
        format!("{stem}{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown export format `{}`", self.0)
    }
}

impl std::error::Error for UnknownFormat {}

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.name() == lower)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

impl Serialize for ExportFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Lenient like [`ExportFormat::from_name`]: unknown names become CSS.
impl<'de> Deserialize<'de> for ExportFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ExportFormat::from_name(&name))
    }
}

fn slug(color: &ExtractedColor) -> String {
    let name = to_token_name(&color.name);
    if name.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        name
    }
}

fn pretty(value: &Value) -> String {
    // a Value always serializes
    serde_json::to_string_pretty(value).unwrap_or_default()
}

const SECTIONS: [&str; 3] = ["Primitive Tokens", "Semantic Tokens", "Component Tokens"];

fn layers(tokens: &TokenLayers) -> [&TokenMap; 3] {
    [&tokens.primitive, &tokens.semantic, &tokens.component]
}

/// CSS custom properties in a single `:root` block.
pub fn export_to_css(tokens: &TokenLayers, include_comments: bool) -> String {
    let mut lines = vec![":root {".to_string()];

    for (i, (title, layer)) in SECTIONS.iter().zip(layers(tokens)).enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        if include_comments {
            lines.push(format!("  /* {title} */"));
        }
        lines.extend(layer.iter().map(|(name, value)| format!("  {name}: {value};")));
    }

    lines.push("}".to_string());
    lines.join("\n")
}

/// SCSS variables; `--name` becomes `$name`.
pub fn export_to_scss(tokens: &TokenLayers) -> String {
    let mut lines = Vec::new();

    for (i, (title, layer)) in SECTIONS.iter().zip(layers(tokens)).enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!("// {title}"));
        lines.extend(
            layer
                .iter()
                .map(|(name, value)| format!("{}: {value};", name.replacen("--", "$", 1))),
        );
    }

    lines.join("\n")
}

/// Shade keys plus `extra` (`DEFAULT` or `base`) for one color.
fn scale_object(color: &ExtractedColor, leaf: impl Fn(&str) -> Value, extra: &str) -> Value {
    let mut entry = Map::new();
    for (shade, hex) in generate_color_scale(&color.hex).iter() {
        entry.insert(shade.key().to_string(), leaf(hex));
    }
    entry.insert(extra.to_string(), leaf(&color.hex));
    Value::Object(entry)
}

fn color_token(hex: &str) -> Value {
    json!({ "value": hex, "type": "color" })
}

/// A `tailwind.config.js` extending the theme with one scale per color.
pub fn export_to_tailwind(colors: &[ExtractedColor]) -> String {
    let mut palette = Map::new();
    for color in colors {
        palette.insert(slug(color), scale_object(color, |hex| json!(hex), "DEFAULT"));
    }

    let config = json!({ "theme": { "extend": { "colors": palette } } });
    let body = QUOTED_KEY.replace_all(&pretty(&config), "${1}:").into_owned();
    format!("// tailwind.config.js\nmodule.exports = {body}")
}

/// Style Dictionary source file.
pub fn export_to_json(colors: &[ExtractedColor]) -> String {
    let mut palette = Map::new();
    for color in colors {
        palette.insert(slug(color), scale_object(color, color_token, "base"));
    }
    pretty(&json!({ "color": palette }))
}

/// Whole numbers print without a fraction, matching what design tools emit.
fn unit_number(v: f64) -> Value {
    if v.fract() == 0.0 {
        json!(v as u64)
    } else {
        json!(v)
    }
}

/// Figma variables with channels normalized to `[0, 1]`.
pub fn export_to_figma(colors: &[ExtractedColor]) -> String {
    let mut variables = Vec::new();
    for color in colors {
        let base = slug(color);
        for (shade, hex) in generate_color_scale(&color.hex).iter() {
            let rgb: Srgb<f64> = Srgb::<u8>::from(hex_to_rgb(hex)).into_format();
            variables.push(json!({
                "name": format!("color/{base}/{shade}"),
                "resolvedType": "COLOR",
                "valuesByMode": {
                    "Mode 1": {
                        "r": unit_number(rgb.red),
                        "g": unit_number(rgb.green),
                        "b": unit_number(rgb.blue),
                        "a": 1,
                    }
                },
            }));
        }
    }
    pretty(&json!({ "variables": variables }))
}

/// Tokens Studio (Figma plugin) global set.
pub fn export_to_tokens_studio(colors: &[ExtractedColor]) -> String {
    let mut palette = Map::new();
    for color in colors {
        palette.insert(slug(color), scale_object(color, color_token, "base"));
    }
    pretty(&json!({ "global": { "colors": palette } }))
}

pub fn export_tokens(format: ExportFormat, colors: &[ExtractedColor], tokens: &TokenLayers) -> String {
    match format {
        ExportFormat::Css => export_to_css(tokens, true),
        ExportFormat::Tailwind => export_to_tailwind(colors),
        ExportFormat::Scss => export_to_scss(tokens),
        ExportFormat::Json => export_to_json(colors),
        ExportFormat::Figma => export_to_figma(colors),
        ExportFormat::TokensStudio => export_to_tokens_studio(colors),
    }
}

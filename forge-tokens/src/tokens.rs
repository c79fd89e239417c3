//! Three-layer design tokens built from an extracted palette.
//!
//! - primitive: every color and its full 50..950 scale
//! - semantic: purpose aliases (primary, text, background, border, status)
//! - component: aliases for buttons, inputs, cards, badges, links and nav
//!
//! Semantic and component tokens are only emitted when the colors they depend
//! on exist, so a sparse palette yields a sparser token set rather than an
//! error.

use std::sync::LazyLock;

use forge_core::{generate_color_scales, ColorRole, ColorWithScale, ExtractedColor, Shade};
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub const SUCCESS_COLOR: &str = "#10B981";
pub const WARNING_COLOR: &str = "#F59E0B";
pub const ERROR_COLOR: &str = "#EF4444";
pub const INFO_COLOR: &str = "#3B82F6";

const SURFACE_WHITE: &str = "#FFFFFF";
const TRANSPARENT: &str = "transparent";
const CARD_SHADOW: &str = "rgba(0, 0, 0, 0.1)";
/// Appended to a hex color to give the input focus ring 20% alpha.
const RING_ALPHA_SUFFIX: &str = "33";

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]").unwrap());

/// Turn a color name into a CSS-identifier-safe slug: lowercase, whitespace
/// runs become `-`, anything else outside `[a-z0-9-]` is dropped. May return
/// an empty string.
pub fn to_token_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lower, "-");
    NON_SLUG.replace_all(&hyphenated, "").into_owned()
}

/// Insertion-ordered token map. Re-inserting a name overwrites its value in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    entries: Vec<(String, String)>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for TokenMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = TokenMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl Serialize for TokenMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenLayer {
    Primitive,
    Semantic,
    Component,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenLayers {
    pub primitive: TokenMap,
    pub semantic: TokenMap,
    pub component: TokenMap,
}

impl TokenLayers {
    pub fn layer(&self, layer: TokenLayer) -> &TokenMap {
        match layer {
            TokenLayer::Primitive => &self.primitive,
            TokenLayer::Semantic => &self.semantic,
            TokenLayer::Component => &self.component,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenCounts {
    pub primitive: usize,
    pub semantic: usize,
    pub component: usize,
}

pub fn token_names(layer: TokenLayer, tokens: &TokenLayers) -> Vec<&str> {
    tokens.layer(layer).names().collect()
}

pub fn count_tokens(tokens: &TokenLayers) -> TokenCounts {
    TokenCounts {
        primitive: tokens.primitive.len(),
        semantic: tokens.semantic.len(),
        component: tokens.component.len(),
    }
}

pub fn generate_tokens(colors: &[ExtractedColor]) -> TokenLayers {
    let scaled = generate_color_scales(colors);
    let tokens = TokenLayers {
        primitive: primitive_tokens(&scaled),
        semantic: semantic_tokens(&scaled),
        component: component_tokens(&scaled),
    };
    log::debug!("generated tokens: {:?}", count_tokens(&tokens));
    tokens
}

fn find_role(colors: &[ColorWithScale], role: ColorRole) -> Option<&ColorWithScale> {
    colors.iter().find(|c| c.role == Some(role))
}

fn primitive_tokens(colors: &[ColorWithScale]) -> TokenMap {
    let mut tokens = TokenMap::new();

    for (index, color) in colors.iter().enumerate() {
        let mut base = to_token_name(&color.name);
        if base.is_empty() {
            base = format!("color-{}", index + 1);
        }

        tokens.insert(format!("--color-{base}"), color.hex.as_str());
        for (shade, hex) in color.scale.iter() {
            tokens.insert(format!("--color-{base}-{shade}"), hex);
        }
    }

    tokens
}

fn semantic_tokens(colors: &[ColorWithScale]) -> TokenMap {
    let mut tokens = TokenMap::new();

    let primary = find_role(colors, ColorRole::Primary);
    let secondary = find_role(colors, ColorRole::Secondary);
    let accent = find_role(colors, ColorRole::Accent);
    let neutral = find_role(colors, ColorRole::Neutral);
    let background = find_role(colors, ColorRole::Background);

    if let Some(p) = primary {
        tokens.insert("--color-primary", p.hex.as_str());
        tokens.insert("--color-primary-light", &p.scale[Shade::S300]);
        tokens.insert("--color-primary-dark", &p.scale[Shade::S700]);
        tokens.insert("--color-primary-foreground", &p.scale[Shade::S50]);
    }

    match (secondary, primary) {
        (Some(s), _) => {
            tokens.insert("--color-secondary", s.hex.as_str());
            tokens.insert("--color-secondary-light", &s.scale[Shade::S300]);
            tokens.insert("--color-secondary-dark", &s.scale[Shade::S700]);
            tokens.insert("--color-secondary-foreground", &s.scale[Shade::S50]);
        }
        // borrow from the primary scale
        (None, Some(p)) => {
            tokens.insert("--color-secondary", &p.scale[Shade::S600]);
            tokens.insert("--color-secondary-light", &p.scale[Shade::S400]);
            tokens.insert("--color-secondary-dark", &p.scale[Shade::S800]);
        }
        (None, None) => {}
    }

    if let Some(a) = accent {
        tokens.insert("--color-accent", a.hex.as_str());
        tokens.insert("--color-accent-light", &a.scale[Shade::S300]);
        tokens.insert("--color-accent-dark", &a.scale[Shade::S700]);
        tokens.insert("--color-accent-foreground", &a.scale[Shade::S950]);
    }

    let text_source = neutral.or_else(|| colors.last());
    if let Some(t) = text_source {
        tokens.insert("--color-text-primary", &t.scale[Shade::S900]);
        tokens.insert("--color-text-secondary", &t.scale[Shade::S600]);
        tokens.insert("--color-text-muted", &t.scale[Shade::S400]);
        tokens.insert("--color-text-inverse", &t.scale[Shade::S50]);
    }

    let bg_source = background.or(neutral).or_else(|| colors.last());
    if let Some(bg) = bg_source {
        tokens.insert("--color-bg-primary", &bg.scale[Shade::S50]);
        tokens.insert("--color-bg-secondary", &bg.scale[Shade::S100]);
        tokens.insert("--color-bg-tertiary", &bg.scale[Shade::S200]);
        tokens.insert("--color-bg-inverse", &bg.scale[Shade::S900]);
    }

    if let Some(t) = text_source {
        tokens.insert("--color-border-primary", &t.scale[Shade::S200]);
        tokens.insert("--color-border-secondary", &t.scale[Shade::S300]);
        let focus = primary.map_or(&t.scale[Shade::S500], |p| p.hex.as_str());
        tokens.insert("--color-border-focus", focus);
    }

    tokens.insert("--color-success", SUCCESS_COLOR);
    tokens.insert("--color-warning", WARNING_COLOR);
    tokens.insert("--color-error", ERROR_COLOR);
    tokens.insert("--color-info", INFO_COLOR);

    tokens
}

fn component_tokens(colors: &[ColorWithScale]) -> TokenMap {
    let mut tokens = TokenMap::new();

    let primary = find_role(colors, ColorRole::Primary);
    let secondary = find_role(colors, ColorRole::Secondary);
    let neutral = find_role(colors, ColorRole::Neutral).or_else(|| colors.last());

    if let Some(p) = primary {
        tokens.insert("--button-primary-bg", p.hex.as_str());
        tokens.insert("--button-primary-bg-hover", &p.scale[Shade::S600]);
        tokens.insert("--button-primary-bg-active", &p.scale[Shade::S700]);
        tokens.insert("--button-primary-text", &p.scale[Shade::S50]);
        tokens.insert("--button-primary-border", p.hex.as_str());
    }

    if let Some(s) = secondary {
        tokens.insert("--button-secondary-bg", &s.scale[Shade::S100]);
        tokens.insert("--button-secondary-bg-hover", &s.scale[Shade::S200]);
        tokens.insert("--button-secondary-text", &s.scale[Shade::S700]);
        tokens.insert("--button-secondary-border", &s.scale[Shade::S300]);
    }

    if let Some(n) = neutral {
        tokens.insert("--button-ghost-bg", TRANSPARENT);
        tokens.insert("--button-ghost-bg-hover", &n.scale[Shade::S100]);
        tokens.insert("--button-ghost-text", &n.scale[Shade::S700]);
    }

    if let (Some(n), Some(p)) = (neutral, primary) {
        tokens.insert("--input-bg", &n.scale[Shade::S50]);
        tokens.insert("--input-bg-disabled", &n.scale[Shade::S100]);
        tokens.insert("--input-border", &n.scale[Shade::S300]);
        tokens.insert("--input-border-hover", &n.scale[Shade::S400]);
        tokens.insert("--input-border-focus", p.hex.as_str());
        tokens.insert("--input-text", &n.scale[Shade::S900]);
        tokens.insert("--input-placeholder", &n.scale[Shade::S400]);
        tokens.insert("--input-ring", format!("{}{RING_ALPHA_SUFFIX}", p.hex));
    }

    if let Some(n) = neutral {
        tokens.insert("--card-bg", SURFACE_WHITE);
        tokens.insert("--card-bg-hover", &n.scale[Shade::S50]);
        tokens.insert("--card-border", &n.scale[Shade::S200]);
        tokens.insert("--card-shadow", CARD_SHADOW);
    }

    if let (Some(p), Some(s)) = (primary, secondary) {
        tokens.insert("--badge-primary-bg", &p.scale[Shade::S100]);
        tokens.insert("--badge-primary-text", &p.scale[Shade::S700]);
        tokens.insert("--badge-secondary-bg", &s.scale[Shade::S100]);
        tokens.insert("--badge-secondary-text", &s.scale[Shade::S700]);
    }

    if let Some(p) = primary {
        tokens.insert("--link-color", p.hex.as_str());
        tokens.insert("--link-color-hover", &p.scale[Shade::S600]);
        tokens.insert("--link-color-visited", &p.scale[Shade::S700]);
    }

    if let (Some(n), Some(p)) = (neutral, primary) {
        tokens.insert("--nav-bg", SURFACE_WHITE);
        tokens.insert("--nav-border", &n.scale[Shade::S200]);
        tokens.insert("--nav-item-text", &n.scale[Shade::S700]);
        tokens.insert("--nav-item-text-hover", &n.scale[Shade::S900]);
        tokens.insert("--nav-item-text-active", p.hex.as_str());
        tokens.insert("--nav-item-bg-hover", &n.scale[Shade::S100]);
        tokens.insert("--nav-item-bg-active", &p.scale[Shade::S50]);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::{generate_color_scale, Hsl, Rgb};

    fn color(hex: &str, rgb: (u8, u8, u8), hsl: (u16, u8, u8), name: &str, role: ColorRole) -> ExtractedColor {
        ExtractedColor {
            hex: hex.to_string(),
            rgb: Rgb::new(rgb.0, rgb.1, rgb.2),
            hsl: Hsl::new(hsl.0, hsl.1, hsl.2),
            population: 30,
            name: name.to_string(),
            role: Some(role),
        }
    }

    fn palette() -> Vec<ExtractedColor> {
        vec![
            color("#8B5CF6", (139, 92, 246), (263, 89, 66), "Vivid Purple", ColorRole::Primary),
            color("#6366F1", (99, 102, 241), (239, 84, 67), "Indigo", ColorRole::Secondary),
            color("#94A3B8", (148, 163, 184), (215, 20, 65), "Gray", ColorRole::Neutral),
        ]
    }

    #[test]
    fn slugs() {
        assert_eq!(to_token_name("Ocean Blue"), "ocean-blue");
        assert_eq!(to_token_name("  Light   Gray "), "-light-gray-");
        assert_eq!(to_token_name("Rosé #1"), "ros-1");
        assert_eq!(to_token_name("!!!"), "");
    }

    #[test]
    fn token_map_keeps_order_and_overwrites_in_place() {
        let mut map = TokenMap::new();
        map.insert("--b", "1");
        map.insert("--a", "2");
        map.insert("--b", "3");
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("--b", "3"), ("--a", "2")]);
        assert_eq!(map.get("--a"), Some("2"));
        assert!(!map.contains_key("--c"));
    }

    #[test]
    fn primitive_layer_has_base_and_scale() {
        let tokens = generate_tokens(&palette());
        assert_eq!(tokens.primitive.len(), 3 * 12);
        assert_eq!(tokens.primitive.get("--color-vivid-purple"), Some("#8B5CF6"));
        let scale = generate_color_scale("#8B5CF6");
        assert_eq!(
            tokens.primitive.get("--color-vivid-purple-500"),
            Some(scale.get(Shade::S500))
        );
        let first: Vec<&str> = tokens.primitive.names().take(3).collect();
        assert_eq!(
            first,
            vec!["--color-vivid-purple", "--color-vivid-purple-50", "--color-vivid-purple-100"]
        );
    }

    #[test]
    fn empty_slug_falls_back_to_index() {
        let mut colors = palette();
        colors[1].name = "???".to_string();
        let tokens = generate_tokens(&colors);
        assert_eq!(tokens.primitive.get("--color-color-2"), Some("#6366F1"));
    }

    #[test]
    fn semantic_layer_uses_roles() {
        let tokens = generate_tokens(&palette());
        let primary = generate_color_scale("#8B5CF6");
        let neutral = generate_color_scale("#94A3B8");
        assert_eq!(tokens.semantic.get("--color-primary"), Some("#8B5CF6"));
        assert_eq!(tokens.semantic.get("--color-primary-light"), Some(primary.get(Shade::S300)));
        assert_eq!(tokens.semantic.get("--color-primary-dark"), Some(primary.get(Shade::S700)));
        assert_eq!(tokens.semantic.get("--color-secondary"), Some("#6366F1"));
        assert_eq!(tokens.semantic.get("--color-text-primary"), Some(neutral.get(Shade::S900)));
        assert_eq!(tokens.semantic.get("--color-bg-primary"), Some(neutral.get(Shade::S50)));
        assert_eq!(tokens.semantic.get("--color-border-focus"), Some("#8B5CF6"));
        assert_eq!(tokens.semantic.get("--color-success"), Some(SUCCESS_COLOR));
        assert!(!tokens.semantic.contains_key("--color-accent"));
    }

    #[test]
    fn secondary_is_synthesized_from_primary() {
        let colors = vec![palette().remove(0)];
        let tokens = generate_tokens(&colors);
        let primary = generate_color_scale("#8B5CF6");
        assert_eq!(tokens.semantic.get("--color-secondary"), Some(primary.get(Shade::S600)));
        assert_eq!(tokens.semantic.get("--color-secondary-light"), Some(primary.get(Shade::S400)));
        assert_eq!(tokens.semantic.get("--color-secondary-dark"), Some(primary.get(Shade::S800)));
        assert!(!tokens.semantic.contains_key("--color-secondary-foreground"));
        // the only color doubles as text and background source
        assert_eq!(tokens.semantic.get("--color-text-primary"), Some(primary.get(Shade::S900)));
    }

    #[test]
    fn no_colors_leaves_only_status_tokens() {
        let tokens = generate_tokens(&[]);
        assert!(tokens.primitive.is_empty());
        assert!(tokens.component.is_empty());
        assert_eq!(
            token_names(TokenLayer::Semantic, &tokens),
            vec!["--color-success", "--color-warning", "--color-error", "--color-info"]
        );
    }

    #[test]
    fn component_layer() {
        let tokens = generate_tokens(&palette());
        assert_eq!(tokens.component.get("--button-primary-bg"), Some("#8B5CF6"));
        assert!(tokens.component.contains_key("--button-primary-text"));
        assert_eq!(tokens.component.get("--input-ring"), Some("#8B5CF633"));
        assert_eq!(tokens.component.get("--card-bg"), Some("#FFFFFF"));
        assert_eq!(tokens.component.get("--button-ghost-bg"), Some("transparent"));
        assert_eq!(tokens.component.get("--card-shadow"), Some("rgba(0, 0, 0, 0.1)"));
        assert!(tokens.component.contains_key("--badge-secondary-text"));
        assert!(tokens.component.contains_key("--nav-item-bg-active"));
    }

    #[test]
    fn component_groups_need_their_roles() {
        let mut colors = palette();
        colors.retain(|c| c.role == Some(ColorRole::Neutral));
        let tokens = generate_tokens(&colors);
        assert!(tokens.component.contains_key("--button-ghost-bg"));
        assert!(tokens.component.contains_key("--card-bg"));
        assert!(!tokens.component.contains_key("--button-primary-bg"));
        assert!(!tokens.component.contains_key("--input-bg"));
        assert!(!tokens.component.contains_key("--badge-primary-bg"));
        assert!(!tokens.component.contains_key("--nav-bg"));
    }

    #[test]
    fn generation_is_deterministic() {
        let colors = palette();
        assert_eq!(generate_tokens(&colors), generate_tokens(&colors));
    }

    #[test]
    fn counts() {
        let tokens = generate_tokens(&palette());
        let counts = count_tokens(&tokens);
        assert_eq!(counts.primitive, 36);
        assert_eq!(counts.semantic, tokens.semantic.len());
        assert_eq!(counts.component, token_names(TokenLayer::Component, &tokens).len());
    }
}

//! Design tokens and export formats for extracted palettes.

pub mod export;
pub mod tokens;

pub use export::{
    export_to_css, export_to_figma, export_to_json, export_to_scss, export_to_tailwind,
    export_to_tokens_studio, export_tokens, ExportFormat, UnknownFormat, DEFAULT_FILE_STEM,
};
pub use tokens::{
    count_tokens, generate_tokens, to_token_name, token_names, TokenCounts, TokenLayer,
    TokenLayers, TokenMap,
};

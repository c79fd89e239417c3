//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};
use forge_tokens::ExportFormat;

/// Extract color palettes from images and turn them into design tokens
#[derive(Parser, Debug, Clone)]
#[command(name = "palette-forge", version, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Config file path (default: palette-forge.toml)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the dominant colors of an image with harmony, contrast and scales
    #[command(visible_alias = "x")]
    Extract {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the palette report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate design tokens from an image and export them
    #[command(visible_alias = "e")]
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// css, tailwind, scss, json, figma or tokens-studio
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Output file or directory; stdout when omitted
        #[arg(short, long, value_hint = ValueHint::AnyPath)]
        output: Option<PathBuf>,

        /// Leave section comments out of CSS output
        #[arg(long)]
        no_comments: bool,
    },

    /// Print the 50..950 scale of a color
    Scale {
        #[arg(value_parser = parse_hex)]
        color: String,

        /// Print the scale as JSON
        #[arg(long)]
        json: bool,
    },

    /// Contrast ratio and WCAG rating of two colors
    Contrast {
        #[arg(value_parser = parse_hex)]
        foreground: String,

        #[arg(value_parser = parse_hex)]
        background: String,
    },

    /// Detect the harmony of a set of colors
    Harmony {
        #[arg(required = true, value_parser = parse_hex)]
        colors: Vec<String>,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// PNG, JPEG or WebP image
    #[arg(value_hint = ValueHint::FilePath)]
    pub image: PathBuf,

    /// Number of colors to extract
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

/// Accept `#rrggbb` or `rrggbb` and normalize to lowercase with a `#`.
fn parse_hex(s: &str) -> Result<String, String> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(format!("#{}", digits.to_ascii_lowercase()))
    } else {
        Err(format!("`{s}` is not a #rrggbb color"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("palette-forge").chain(args.iter().copied()))
    }

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_shows_summary() {
        let about = Cli::command().get_about().map(ToString::to_string);
        assert_eq!(
            about.as_deref(),
            Some("Extract color palettes from images and turn them into design tokens")
        );
    }

    #[test]
    fn export_flags() {
        let cli = parse(&["-v", "export", "logo.png", "-f", "tokens-studio", "-n", "5", "-o", "out"])
            .unwrap();
        assert!(cli.verbose);
        let Commands::Export { source, format, output, no_comments } = cli.command else {
            panic!("expected export");
        };
        assert_eq!(source.image, PathBuf::from("logo.png"));
        assert_eq!(source.count, Some(5));
        assert_eq!(format, Some(ExportFormat::TokensStudio));
        assert_eq!(output, Some(PathBuf::from("out")));
        assert!(!no_comments);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(parse(&["export", "logo.png", "-f", "sass"]).is_err());
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli = parse(&["extract", "a.png", "-C", "brand.toml", "--json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("brand.toml")));
        assert!(matches!(cli.command, Commands::Extract { json: true, .. }));
    }

    #[test]
    fn hex_arguments_are_normalized() {
        let cli = parse(&["contrast", "FFFFFF", "#1A1A1A"]).unwrap();
        let Commands::Contrast { foreground, background } = cli.command else {
            panic!("expected contrast");
        };
        assert_eq!(foreground, "#ffffff");
        assert_eq!(background, "#1a1a1a");
        assert!(parse(&["scale", "#fff"]).is_err());
        assert!(parse(&["harmony"]).is_err());
    }
}

//! Subcommand implementations. Rendering is kept separate from I/O so the
//! text output can be tested without touching the terminal.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use forge_core::{
    analyze_palette, calculate_contrast, detect_color_harmony, generate_color_scale,
    text_color_for_background, wcag_rating, ColorScale, ContrastCheck, ExtractedColor,
    HarmonyResult, PaletteReport,
};
use forge_image::{extract_colors_with, validate_upload};
use forge_tokens::{count_tokens, export_to_css, export_tokens, generate_tokens, ExportFormat};

use crate::cli::SourceArgs;
use crate::config::Config;

fn load_palette(source: &SourceArgs, config: &Config) -> Result<Vec<ExtractedColor>> {
    let path = &source.image;
    let bytes = fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    let mime = validate_upload(&bytes).with_context(|| format!("cannot use '{}'", path.display()))?;
    log::info!("reading {} ({mime}, {} bytes)", path.display(), bytes.len());

    let colors = extract_colors_with(&bytes, config.extract_options(source.count))
        .with_context(|| format!("failed to extract colors from '{}'", path.display()))?;
    log::info!("extracted {} colors", colors.len());
    Ok(colors)
}

pub fn extract(source: &SourceArgs, json: bool, config: &Config) -> Result<()> {
    let colors = load_palette(source, config)?;
    let report = analyze_palette(&colors);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if colors.is_empty() {
        let requested = config.extract_options(source.count).color_count;
        println!("{}", empty_palette_message(requested));
    } else {
        print!("{}", render_swatches(&colors));
        print!("{}", render_report(&report));
    }
    Ok(())
}

fn empty_palette_message(requested: usize) -> &'static str {
    if requested == 0 {
        "No colors requested."
    } else {
        "No colors found: the image is transparent, white or black."
    }
}

pub fn export(
    source: &SourceArgs,
    format: Option<ExportFormat>,
    output: Option<&Path>,
    no_comments: bool,
    config: &Config,
) -> Result<()> {
    let colors = load_palette(source, config)?;
    let format = format.unwrap_or(config.export.format);
    let tokens = generate_tokens(&colors);

    let counts = count_tokens(&tokens);
    log::info!(
        "generated {} primitive, {} semantic and {} component tokens",
        counts.primitive,
        counts.semantic,
        counts.component
    );

    let include_comments = config.export.include_comments && !no_comments;
    let text = match format {
        ExportFormat::Css => export_to_css(&tokens, include_comments),
        other => export_tokens(other, &colors, &tokens),
    };

    match output {
        Some(path) => {
            let target = output_path(path, format, &config.export.file_stem);
            fs::write(&target, text + "\n")
                .with_context(|| format!("failed to write '{}'", target.display()))?;
            log::info!("wrote {format} tokens to {}", target.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// A directory gets the format's default file name appended.
pub fn output_path(path: &Path, format: ExportFormat, stem: &str) -> PathBuf {
    if path.is_dir() {
        path.join(format.file_name(stem))
    } else {
        path.to_path_buf()
    }
}

pub fn scale(color: &str, json: bool) -> Result<()> {
    let scale = generate_color_scale(color);
    if json {
        println!("{}", serde_json::to_string_pretty(&scale)?);
    } else {
        print!("{}", render_scale(&scale));
    }
    Ok(())
}

pub fn contrast(foreground: &str, background: &str) {
    println!("{}", render_contrast(foreground, background));
}

pub fn harmony(colors: &[String]) {
    println!("{}", render_harmony(&detect_color_harmony(colors)));
}

pub fn render_swatches(colors: &[ExtractedColor]) -> String {
    let mut out = String::new();
    for color in colors {
        let text = text_color_for_background(&color.hex);
        let ratio = calculate_contrast(&color.hex, text);
        let role = color.role.map_or("-", |r| r.as_str());
        let _ = writeln!(
            out,
            "{}  {:>3}%  {:<16} {:<10} text {} {:.2}:1 {}",
            color.hex,
            color.population,
            color.name,
            role,
            text,
            ratio,
            wcag_rating(ratio)
        );
    }
    out
}

fn render_check(check: &ContrastCheck) -> String {
    format!("{:>4.1} {:<4}", check.ratio, check.rating.as_str())
}

/// Harmony, contrast matrix and scales, in that order.
pub fn render_report(report: &PaletteReport) -> String {
    let mut out = String::new();

    if let Some(harmony) = &report.harmony {
        let _ = writeln!(out, "\nHarmony: {}", render_harmony(harmony));
    }

    if !report.accessibility.is_empty() {
        let mut header = format!("\n{:<7}", "");
        for row in &report.accessibility {
            let _ = write!(header, "  {:<9}", row.hex);
        }
        let _ = write!(header, "  {:<9}  {:<9}", "white", "black");
        let _ = writeln!(out, "{}", header.trim_end());

        for row in &report.accessibility {
            let mut line = row.hex.clone();
            for check in row.against.iter().chain([&row.on_white, &row.on_black]) {
                let _ = write!(line, "  {}", render_check(check));
            }
            let _ = writeln!(out, "{}", line.trim_end());
        }
    }

    if !report.colors.is_empty() {
        let _ = writeln!(out, "\nScales");
        for color in &report.colors {
            let shades: Vec<&str> = color.scale.iter().map(|(_, hex)| hex).collect();
            let _ = writeln!(out, "{}  {}", color.hex, shades.join(" "));
        }
    }

    out
}

pub fn render_scale(scale: &ColorScale) -> String {
    scale
        .iter()
        .map(|(shade, hex)| format!("{:>3}  {hex}\n", shade.key()))
        .collect()
}

pub fn render_contrast(foreground: &str, background: &str) -> String {
    let ratio = calculate_contrast(foreground, background);
    format!("{ratio:.2}:1 {}", wcag_rating(ratio))
}

pub fn render_harmony(result: &HarmonyResult) -> String {
    format!("{} ({})", result.kind, result.score)
}

use forge_core::{suggest_color_role, ExtractedColor, Rgb};

use crate::error::Result;
use crate::quantize::median_cut;
use crate::raster::{decode_and_downscale, sample_pixels, RgbaRaster};

pub const DEFAULT_COLOR_COUNT: usize = 8;
/// Longer-edge bound applied before sampling; keeps quantization cheap.
pub const DEFAULT_MAX_EDGE: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Target palette size. Fewer colors come back when the image lacks
    /// distinct clusters.
    pub color_count: usize,
    pub max_edge: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            color_count: DEFAULT_COLOR_COUNT,
            max_edge: DEFAULT_MAX_EDGE,
        }
    }
}

/// Extract up to `color_count` dominant colors from encoded image bytes.
///
/// An image whose pixels are all transparent, near-white or near-black gives
/// an empty palette, not an error.
pub fn extract_colors_from_image(bytes: &[u8], color_count: usize) -> Result<Vec<ExtractedColor>> {
    extract_colors_with(
        bytes,
        ExtractOptions {
            color_count,
            ..ExtractOptions::default()
        },
    )
}

pub fn extract_colors_with(bytes: &[u8], options: ExtractOptions) -> Result<Vec<ExtractedColor>> {
    let raster = decode_and_downscale(bytes, options.max_edge)?;
    Ok(extract_colors_from_raster(&raster, options.color_count))
}

pub fn extract_colors_from_raster(raster: &RgbaRaster, color_count: usize) -> Vec<ExtractedColor> {
    let samples = sample_pixels(raster);
    log::debug!(
        "sampled {} of {} pixels ({}x{})",
        samples.len(),
        raster.pixel_count(),
        raster.width,
        raster.height
    );
    extract_colors_from_samples(&samples, color_count)
}

/// Quantize already-sampled pixels, then name, classify and rank the result.
pub fn extract_colors_from_samples(samples: &[Rgb], color_count: usize) -> Vec<ExtractedColor> {
    let clusters = median_cut(samples, color_count);
    if clusters.is_empty() {
        log::warn!("no colors survived sampling");
        return Vec::new();
    }

    let total = samples.len() as f64;
    let cluster_count = clusters.len();
    let mut colors: Vec<ExtractedColor> = clusters
        .iter()
        .enumerate()
        .map(|(index, cluster)| {
            let population = (cluster.count as f64 / total * 100.0).round() as u8;
            let role = suggest_color_role(cluster.rgb, index, cluster_count);
            ExtractedColor::from_rgb(cluster.rgb, population, Some(role))
        })
        .collect();

    colors.sort_by(|a, b| b.importance().total_cmp(&a.importance()));
    log::debug!("extracted {} colors", colors.len());
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use forge_core::ColorRole;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    fn png(img: RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn solid_red_square() {
        let bytes = png(RgbaImage::from_pixel(100, 100, Rgba([255, 0, 0, 255])));
        let colors = extract_colors_from_image(&bytes, 8).unwrap();
        assert_eq!(colors.len(), 1);
        let red = &colors[0];
        assert_eq!(red.hex, "#ff0000");
        assert_eq!(red.population, 100);
        assert!(red.name.contains("Red"), "{}", red.name);
        assert_eq!(red.role, Some(ColorRole::Primary));
    }

    #[test]
    fn fully_transparent_image_has_no_colors() {
        let bytes = png(RgbaImage::from_pixel(40, 40, Rgba([90, 10, 200, 0])));
        assert!(extract_colors_from_image(&bytes, 8).unwrap().is_empty());
    }

    #[test]
    fn white_and_black_image_has_no_colors() {
        let img = RgbaImage::from_fn(40, 40, |x, _| {
            if x % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        assert!(extract_colors_from_image(&png(img), 8).unwrap().is_empty());
    }

    #[test]
    fn decode_failure_propagates() {
        assert!(extract_colors_from_image(b"\x89PNG broken", 8).is_err());
    }

    #[test]
    fn count_bound_holds() {
        let img = RgbaImage::from_fn(64, 64, |x, y| {
            Rgba([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8, 255])
        });
        let bytes = png(img);
        for n in [1, 3, 8, 16] {
            let colors = extract_colors_from_image(&bytes, n).unwrap();
            assert!(!colors.is_empty());
            assert!(colors.len() <= n);
        }
    }

    fn gray_and_red() -> Vec<Rgb> {
        let mut samples = vec![Rgb::new(100, 110, 120); 50];
        samples.extend(vec![Rgb::new(230, 20, 20); 50]);
        samples
    }

    #[test]
    fn ranks_vivid_colors_first() {
        let colors = extract_colors_from_samples(&gray_and_red(), 8);
        assert_eq!(colors.len(), 2);
        // 50 * (0.84 + 0.5) > 50 * (0.09 + 0.5)
        assert_eq!(colors[0].rgb, Rgb::new(230, 20, 20));
        assert_eq!(colors[1].rgb, Rgb::new(100, 110, 120));
        assert!(colors.iter().all(|c| c.population == 50));
    }

    #[test]
    fn roles_follow_quantizer_order() {
        // the gray box sorts first on the red axis, so the red cluster is
        // ranked second when roles are assigned
        let colors = extract_colors_from_samples(&gray_and_red(), 8);
        assert_eq!(colors[0].role, Some(ColorRole::Secondary));
        assert_eq!(colors[1].role, Some(ColorRole::Neutral));
    }
}

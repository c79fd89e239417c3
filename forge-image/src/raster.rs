//! Decoding, downscaling and pixel sampling.
//!
//! This is the only part of the pipeline that touches an image codec. Everything
//! after [`sample_pixels`] works on plain [`Rgb`] values.

use forge_core::Rgb;
use image::imageops::FilterType;

use crate::error::Result;

/// Only every `SAMPLE_STRIDE`-th pixel is sampled.
pub const SAMPLE_STRIDE: usize = 4;
/// Pixels with alpha below this are treated as transparent.
pub const MIN_ALPHA: u8 = 128;
/// Pixels with every channel above this are skipped as near-white.
pub const NEAR_WHITE: u8 = 250;
/// Pixels with every channel below this are skipped as near-black.
pub const NEAR_BLACK: u8 = 5;

/// A decoded image as tightly packed RGBA bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaRaster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RgbaRaster {
    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }
}

/// Output size for an image whose longer edge must not exceed `max_edge`.
/// Aspect ratio is kept; the shorter edge is truncated but never below 1px.
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let scaled = |short: u32, long: u32| {
        let s = (f64::from(short) / f64::from(long) * f64::from(max_edge)) as u32;
        s.max(1)
    };
    if width > height && width > max_edge {
        (max_edge, scaled(height, width))
    } else if height > max_edge {
        (scaled(width, height), max_edge)
    } else {
        (width, height)
    }
}

/// Decode `bytes` and shrink the result so its longer edge is at most
/// `max_edge` pixels.
pub fn decode_and_downscale(bytes: &[u8], max_edge: u32) -> Result<RgbaRaster> {
    let img = image::load_from_memory(bytes)?;
    let (width, height) = fit_within(img.width(), img.height(), max_edge);

    let img = if (width, height) == (img.width(), img.height()) {
        img
    } else {
        log::debug!(
            "downscaling {}x{} image to {width}x{height}",
            img.width(),
            img.height()
        );
        img.resize_exact(width, height, FilterType::Triangle)
    };

    Ok(RgbaRaster {
        width,
        height,
        data: img.to_rgba8().into_raw(),
    })
}

fn is_background(r: u8, g: u8, b: u8) -> bool {
    let near_white = r > NEAR_WHITE && g > NEAR_WHITE && b > NEAR_WHITE;
    let near_black = r < NEAR_BLACK && g < NEAR_BLACK && b < NEAR_BLACK;
    near_white || near_black
}

/// Sample every fourth pixel, dropping transparent, near-white and near-black
/// ones.
pub fn sample_pixels(raster: &RgbaRaster) -> Vec<Rgb> {
    raster
        .data
        .chunks_exact(4)
        .step_by(SAMPLE_STRIDE)
        .filter_map(|px| {
            let (r, g, b, a) = (px[0], px[1], px[2], px[3]);
            if a < MIN_ALPHA || is_background(r, g, b) {
                None
            } else {
                Some(Rgb::new(r, g, b))
            }
        })
        .collect()
}

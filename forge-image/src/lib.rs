//! Dominant color extraction from raster images.
//!
//! Images are decoded and shrunk by [`raster`], sampled into plain RGB values
//! and reduced with median-cut by [`quantize`]. [`palette`] ties the stages
//! together and attaches names, roles and populations.

pub mod error;
pub mod palette;
pub mod quantize;
pub mod raster;
pub mod validate;

pub use error::{ExtractError, Result};
pub use palette::{
    extract_colors_from_image, extract_colors_from_raster, extract_colors_from_samples,
    extract_colors_with, ExtractOptions, DEFAULT_COLOR_COUNT, DEFAULT_MAX_EDGE,
};
pub use quantize::{median_cut, Cluster};
pub use raster::{decode_and_downscale, sample_pixels, RgbaRaster};
pub use validate::{
    detect_mime_type, is_valid_file_size, is_valid_image_type, validate_upload, MAX_FILE_SIZE,
    SUPPORTED_MIME_TYPES,
};

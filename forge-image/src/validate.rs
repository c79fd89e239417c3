//! Upload checks applied before an image reaches the decoder.

use crate::error::{ExtractError, Result};

/// Largest accepted upload, 10 MiB.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

pub const SVG_MIME_TYPE: &str = "image/svg+xml";

pub const SUPPORTED_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/jpg",
    SVG_MIME_TYPE,
    "image/webp",
];

/// How far into a file to look for an `<svg` root element.
const SVG_SNIFF_LEN: usize = 1024;

pub fn is_valid_image_type(mime: &str) -> bool {
    SUPPORTED_MIME_TYPES.contains(&mime)
}

pub fn is_valid_file_size(len: usize) -> bool {
    len <= MAX_FILE_SIZE
}

/// Best-effort MIME type from a file's leading bytes.
pub fn detect_mime_type(bytes: &[u8]) -> Option<&'static str> {
    if let Ok(format) = image::guess_format(bytes) {
        return Some(format.to_mime_type());
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(SVG_SNIFF_LEN)]);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    let is_svg = head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"));
    is_svg.then_some(SVG_MIME_TYPE)
}

/// Check size and type of an upload, returning its detected MIME type.
pub fn validate_upload(bytes: &[u8]) -> Result<&'static str> {
    if !is_valid_file_size(bytes.len()) {
        return Err(ExtractError::FileTooLarge {
            size: bytes.len(),
            max: MAX_FILE_SIZE,
        });
    }

    match detect_mime_type(bytes) {
        Some(mime) if is_valid_image_type(mime) => Ok(mime),
        Some(mime) => Err(ExtractError::UnsupportedType(mime.to_string())),
        None => Err(ExtractError::UnsupportedType("unknown".to_string())),
    }
}

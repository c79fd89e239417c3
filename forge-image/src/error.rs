use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The decoder could not read or rasterize the image.
    #[error("image could not be loaded")]
    Decode(#[from] image::ImageError),

    #[error("image is {size} bytes, over the {max} byte limit")]
    FileTooLarge { size: usize, max: usize },

    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
}

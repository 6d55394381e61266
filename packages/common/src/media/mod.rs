//! Image resampling for uploaded media.
//!
//! Everything here is synchronous and CPU-bound; async callers should run it
//! on the blocking pool.

pub mod layout;

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

/// Bounding box for stored recipe photos.
pub const RECIPE_MAX_WIDTH: u32 = 1024;
pub const RECIPE_MAX_HEIGHT: u32 = 768;

/// Bounding box for derived recipe thumbnails.
pub const THUMBNAIL_MAX_SIZE: u32 = 100;

/// Neither side of an avatar may exceed this.
pub const AVATAR_MAX_SIZE: u32 = 300;

pub const JPEG_QUALITY: u8 = 90;

/// Avatar extensions the resampler will try to open.
pub const AVATAR_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("not a readable image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("unsupported image format for {0}")]
    UnsupportedFormat(String),
}

/// Shrink `img` so it fits in `max_width`×`max_height`, keeping its aspect
/// ratio. Images that already fit are returned unchanged.
pub fn fit_within(img: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if img.width() <= max_width && img.height() <= max_height {
        return img;
    }
    img.resize(max_width, max_height, FilterType::Lanczos3)
}

pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(&rgb)
        .map_err(ImageError::Encode)?;
    Ok(buf)
}

/// Decode an uploaded recipe photo, fit it to 1024×768 and re-encode as JPEG.
pub fn process_recipe_image(bytes: &[u8]) -> Result<Vec<u8>, ImageError> {
    let img = image::load_from_memory(bytes).map_err(ImageError::Decode)?;
    let img = fit_within(img, RECIPE_MAX_WIDTH, RECIPE_MAX_HEIGHT);
    encode_jpeg(&img, JPEG_QUALITY)
}

/// Derive the small JPEG variant shown in listings.
pub fn make_thumbnail(bytes: &[u8]) -> Result<Vec<u8>, ImageError> {
    let img = image::load_from_memory(bytes).map_err(ImageError::Decode)?;
    let img = fit_within(img, THUMBNAIL_MAX_SIZE, THUMBNAIL_MAX_SIZE);
    encode_jpeg(&img, JPEG_QUALITY)
}

/// Shrink an avatar to at most 300×300, re-encoding it in the format its
/// extension names.
///
/// Returns `Ok(None)` when the image is already small enough.
pub fn shrink_avatar(bytes: &[u8], extension: &str) -> Result<Option<Vec<u8>>, ImageError> {
    let format = ImageFormat::from_extension(extension)
        .ok_or_else(|| ImageError::UnsupportedFormat(extension.to_string()))?;

    let img = image::load_from_memory(bytes).map_err(ImageError::Decode)?;
    if img.width() <= AVATAR_MAX_SIZE && img.height() <= AVATAR_MAX_SIZE {
        return Ok(None);
    }

    let img = img.thumbnail(AVATAR_MAX_SIZE, AVATAR_MAX_SIZE);
    let img = match format {
        // JPEG has no alpha channel.
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img,
    };

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format)
        .map_err(ImageError::Encode)?;
    Ok(Some(buf))
}

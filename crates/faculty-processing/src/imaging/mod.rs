//! Image re-encoding
//!
//! Everything is decoded with `image`, flattened to opaque RGB and written out
//! as baseline JPEG through mozjpeg with optimized Huffman tables.

mod normalizer;
mod thumbnail;

pub use normalizer::{normalize_bytes, normalize_file, NormalizedImage, NormalizerSettings};
pub use thumbnail::{create_thumbnail, thumbnail_bytes, ThumbnailSettings};

use faculty_storage::StorageError;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode JPEG: {0}")]
    Encode(String),

    #[error("Failed to read image: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to write image: {0}")]
    Write(#[from] StorageError),

    #[error("Image task failed: {0}")]
    Task(String),
}

pub(crate) fn decode(data: &[u8]) -> Result<DynamicImage, ImageError> {
    image::load_from_memory(data).map_err(|e| ImageError::Decode(e.to_string()))
}

/// Composite onto an opaque white canvas. Images without alpha pass through.
pub(crate) fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as u16;
        let blend = |c: u8| ((c as u16 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Shrink to fit a `max_width` x `max_height` box keeping the aspect ratio.
/// Images already inside the box are returned unchanged.
pub(crate) fn fit_within(img: RgbImage, max_width: u32, max_height: u32) -> RgbImage {
    let (width, height) = img.dimensions();
    if width <= max_width && height <= max_height {
        return img;
    }
    DynamicImage::ImageRgb8(img)
        .resize(max_width, max_height, FilterType::Lanczos3)
        .to_rgb8()
}

pub(crate) fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let (width, height) = img.dimensions();

    let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
    comp.set_size(width as usize, height as usize);
    comp.set_quality(quality as f32);
    comp.set_optimize_coding(true);

    let mut comp = comp
        .start_compress(Vec::new())
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    comp.write_scanlines(img.as_raw())
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    comp.finish().map_err(|e| ImageError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_flatten_transparent_pixels_become_white() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([10, 20, 30, 255]));

        let flat = flatten_onto_white(&DynamicImage::ImageRgba8(rgba));

        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(flat.get_pixel(1, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_flatten_half_transparent_blends() {
        let mut rgba = RgbaImage::new(1, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 128]));

        let flat = flatten_onto_white(&DynamicImage::ImageRgba8(rgba));
        let [r, _, _] = flat.get_pixel(0, 0).0;
        assert!((125..=129).contains(&r), "got {}", r);
    }

    #[test]
    fn test_fit_within_never_upscales() {
        let small = RgbImage::new(640, 480);
        let result = fit_within(small, 1920, 1920);
        assert_eq!(result.dimensions(), (640, 480));
    }

    #[test]
    fn test_encode_jpeg_produces_jpeg_markers() {
        let img = RgbImage::from_pixel(16, 16, image::Rgb([200, 100, 50]));
        let data = encode_jpeg(&img, 85).unwrap();
        assert_eq!(&data[..2], &[0xFF, 0xD8]);
        assert_eq!(&data[data.len() - 2..], &[0xFF, 0xD9]);
    }
}

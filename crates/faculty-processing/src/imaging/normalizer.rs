use std::path::Path;

use faculty_core::Config;
use faculty_storage::write_atomic;

use super::{decode, encode_jpeg, fit_within, flatten_onto_white, ImageError};

#[derive(Debug, Clone, Copy)]
pub struct NormalizerSettings {
    pub max_dimension: u32,
    /// Byte budget the quality loop tries to get under.
    pub target_bytes: usize,
    pub initial_quality: u8,
    pub quality_step: u8,
    pub min_quality: u8,
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self {
            max_dimension: 1920,
            target_bytes: 1024 * 1024,
            initial_quality: 85,
            quality_step: 10,
            min_quality: 20,
        }
    }
}

impl NormalizerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_dimension: config.image_max_dimension,
            target_bytes: config.max_image_size_bytes,
            ..Self::default()
        }
    }
}

/// Result of normalizing one image.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Quality of the encode that was kept.
    pub quality: u8,
    /// Every quality tried, in order.
    pub attempts: Vec<u8>,
}

/// Decode, flatten, downscale and re-encode until the output fits the budget.
///
/// Encoding starts at `initial_quality` and drops by `quality_step` while the
/// output is over `target_bytes` and the quality is still above `min_quality`.
/// Whatever the last attempt produced is kept, even if it is over budget.
pub fn normalize_bytes(
    data: &[u8],
    settings: &NormalizerSettings,
) -> Result<NormalizedImage, ImageError> {
    let decoded = decode(data)?;
    let flat = flatten_onto_white(&decoded);
    let rgb = fit_within(flat, settings.max_dimension, settings.max_dimension);
    let (width, height) = rgb.dimensions();

    let step = settings.quality_step.max(1);
    let mut quality = settings.initial_quality;
    let mut encoded = encode_jpeg(&rgb, quality)?;
    let mut attempts = vec![quality];

    while encoded.len() > settings.target_bytes && quality > settings.min_quality {
        quality = quality.saturating_sub(step);
        encoded = encode_jpeg(&rgb, quality)?;
        attempts.push(quality);
    }

    tracing::debug!(
        width = width,
        height = height,
        quality = quality,
        attempts = attempts.len(),
        input_bytes = data.len(),
        output_bytes = encoded.len(),
        "Image normalized"
    );

    Ok(NormalizedImage {
        data: encoded,
        width,
        height,
        quality,
        attempts,
    })
}

/// Normalize the image at `path` in place.
///
/// The original stays untouched unless the whole encode succeeds.
pub async fn normalize_file(
    path: &Path,
    settings: NormalizerSettings,
) -> Result<NormalizedImage, ImageError> {
    let original = tokio::fs::read(path).await?;

    let normalized = tokio::task::spawn_blocking(move || normalize_bytes(&original, &settings))
        .await
        .map_err(|e| ImageError::Task(e.to_string()))??;

    write_atomic(path, &normalized.data).await?;
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(img: RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    /// Deterministic noise that JPEG cannot compress well.
    fn noisy_image(width: u32, height: u32) -> RgbaImage {
        let mut state: u32 = 0x1234_5678;
        RgbaImage::from_fn(width, height, |_, _| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let [a, b, c, _] = state.to_le_bytes();
            Rgba([a, b, c, 255])
        })
    }

    #[test]
    fn test_large_image_is_bounded_with_aspect_ratio() {
        let data = png_bytes(RgbaImage::from_pixel(3840, 2160, Rgba([10, 120, 200, 255])));

        let result = normalize_bytes(&data, &NormalizerSettings::default()).unwrap();

        assert_eq!(result.width, 1920);
        assert_eq!(result.height, 1080);
    }

    #[test]
    fn test_portrait_image_is_bounded_on_height() {
        let data = png_bytes(RgbaImage::from_pixel(1000, 4000, Rgba([0, 0, 0, 255])));

        let result = normalize_bytes(&data, &NormalizerSettings::default()).unwrap();

        assert_eq!(result.height, 1920);
        assert_eq!(result.width, 480);
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let data = png_bytes(RgbaImage::from_pixel(200, 100, Rgba([1, 2, 3, 255])));

        let result = normalize_bytes(&data, &NormalizerSettings::default()).unwrap();

        assert_eq!((result.width, result.height), (200, 100));
        assert_eq!(result.attempts, vec![85]);
    }

    #[test]
    fn test_quality_loop_steps_down_and_terminates() {
        let data = png_bytes(noisy_image(256, 256));
        let settings = NormalizerSettings {
            target_bytes: 1,
            ..NormalizerSettings::default()
        };

        let result = normalize_bytes(&data, &settings).unwrap();

        assert_eq!(result.attempts, vec![85, 75, 65, 55, 45, 35, 25, 15]);
        for pair in result.attempts.windows(2) {
            assert_eq!(pair[0] - pair[1], 10);
        }
        assert_eq!(result.quality, 15);
    }

    #[test]
    fn test_quality_loop_stops_once_under_target() {
        let data = png_bytes(noisy_image(256, 256));
        let first = normalize_bytes(
            &data,
            &NormalizerSettings {
                target_bytes: usize::MAX,
                ..NormalizerSettings::default()
            },
        )
        .unwrap();

        // Budget just under the q85 output forces exactly one more attempt.
        let settings = NormalizerSettings {
            target_bytes: first.data.len() - 1,
            ..NormalizerSettings::default()
        };
        let result = normalize_bytes(&data, &settings).unwrap();

        assert_eq!(result.attempts[0], 85);
        assert!(result.attempts.len() >= 2);
        assert!(result.data.len() <= settings.target_bytes || result.quality <= 20);
    }

    #[test]
    fn test_transparent_png_is_flattened_to_white() {
        let data = png_bytes(RgbaImage::from_pixel(32, 32, Rgba([0, 0, 0, 0])));

        let result = normalize_bytes(&data, &NormalizerSettings::default()).unwrap();
        let decoded = image::load_from_memory(&result.data).unwrap().to_rgb8();

        let [r, g, b] = decoded.get_pixel(16, 16).0;
        assert!(r > 245 && g > 245 && b > 245, "got {:?}", (r, g, b));
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let result = normalize_bytes(b"definitely not an image", &NormalizerSettings::default());
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[tokio::test]
    async fn test_normalize_file_rewrites_in_place() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("photo.png");
        std::fs::write(&path, png_bytes(RgbaImage::from_pixel(64, 64, Rgba([9, 9, 9, 255]))))
            .unwrap();

        let result = normalize_file(&path, NormalizerSettings::default())
            .await
            .unwrap();

        let on_disk = std::fs::read(&path).unwrap();
        assert_eq!(on_disk, result.data);
        assert_eq!(&on_disk[..2], &[0xFF, 0xD8]);
    }

    #[tokio::test]
    async fn test_normalize_file_failure_leaves_original() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("broken.jpg");
        std::fs::write(&path, b"not a jpeg").unwrap();

        let result = normalize_file(&path, NormalizerSettings::default()).await;

        assert!(result.is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"not a jpeg");
    }
}

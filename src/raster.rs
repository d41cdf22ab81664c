//! Defines the in-process raster operations: decoding, fit-within
//! dimension computation and JPEG encoding into a memory buffer.
//! Buffers are only handed to storage once fully encoded, so an
//! aborted invocation never leaves a partial derivative behind.

use crate::error::HandlerError;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};

/// Decode source bytes into a raster image, or fail with
/// [`HandlerError::UnsupportedImageFormat`] when they aren't one.
pub fn decode(key: &str, bytes: &[u8]) -> Result<DynamicImage, HandlerError> {
    image::load_from_memory(bytes).map_err(|source| HandlerError::UnsupportedImageFormat {
        key: key.to_string(),
        source,
    })
}

/// Compute the dimensions that fit `(width, height)` within a square
/// `bound` while preserving aspect ratio. Images already inside the
/// box keep their dimensions; this never upscales.
pub fn fit_within(width: u32, height: u32, bound: u32) -> (u32, u32) {
    if width <= bound && height <= bound {
        return (width, height);
    }
    if width >= height {
        let scaled = (f64::from(height) * f64::from(bound) / f64::from(width)).round() as u32;
        (bound, scaled.max(1))
    } else {
        let scaled = (f64::from(width) * f64::from(bound) / f64::from(height)).round() as u32;
        (scaled.max(1), bound)
    }
}

/// Scale an image down to fit within a square bound, preserving
/// aspect ratio. Returns the image unscaled if it already fits.
pub fn shrink_to_fit(image: &DynamicImage, bound: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    let (target_width, target_height) = fit_within(width, height, bound);
    if (target_width, target_height) == (width, height) {
        image.clone()
    } else {
        image.thumbnail_exact(target_width, target_height)
    }
}

/// Encode an image as baseline JPEG at the given quality factor,
/// into a fresh memory buffer.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, HandlerError> {
    // JPEG has no alpha channel; flatten first.
    let rgb = image.to_rgb8();
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder.encode_image(&rgb).map_err(|e| {
        HandlerError::CapabilityError(format!("JPEG encoding failed: {}", e))
    })?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([x as u8, y as u8, (x ^ y) as u8])
        }))
    }

    #[test]
    fn landscape_scales_width_to_the_bound() {
        assert_eq!(fit_within(512, 256, 128), (128, 64));
    }

    #[test]
    fn portrait_scales_height_to_the_bound() {
        assert_eq!(fit_within(256, 512, 128), (64, 128));
    }

    #[test]
    fn proportional_dimension_is_rounded() {
        // 100 * 128 / 333 = 38.4...
        assert_eq!(fit_within(333, 100, 128), (128, 38));
    }

    #[test]
    fn small_images_are_never_upscaled() {
        assert_eq!(fit_within(100, 50, 128), (100, 50));
        assert_eq!(fit_within(128, 128, 128), (128, 128));
    }

    #[test]
    fn degenerate_aspect_ratios_keep_at_least_one_pixel() {
        assert_eq!(fit_within(10000, 10, 128), (128, 1));
    }

    #[test]
    fn shrink_to_fit_preserves_small_images() {
        let image = gradient(100, 50);
        let shrunk = shrink_to_fit(&image, 128);
        assert_eq!(shrunk.dimensions(), (100, 50));
    }

    #[test]
    fn shrink_to_fit_bounds_large_images() {
        let image = gradient(512, 256);
        let shrunk = shrink_to_fit(&image, 128);
        assert_eq!(shrunk.dimensions(), (128, 64));
    }

    #[test]
    fn encoded_jpeg_round_trips_dimensions() {
        let image = gradient(64, 48);
        let bytes = encode_jpeg(&image, 80).unwrap();
        let decoded = decode("x.jpg", &bytes).unwrap();
        assert_eq!(decoded.dimensions(), (64, 48));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode("x.jpg", b"definitely not an image"),
            Err(HandlerError::UnsupportedImageFormat { .. })
        ));
    }
}

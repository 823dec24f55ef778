//! Pure Rust image backend, no external programs.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `image` crate, format sniffed from content, EXIF orientation applied |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` to [`fit_within`] |
//! | Encode | by output extension; JPEG at quality 90 |
//! | Optimize JPEG | [`jpeg::strip_metadata`](super::jpeg::strip_metadata) |
//! | Optimize PNG | `oxipng`, lossless, safe chunk stripping |
//!
//! Re-encoding through the `image` crate never writes EXIF, so resized
//! output already carries no camera metadata; `optimize` matters most for
//! files copied with `--no-resize`.

use super::backend::{BackendError, ImageBackend};
use super::calculations::fit_within;
use super::jpeg;
use crate::types::Dimension;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const JPEG_QUALITY: u8 = 90;

#[derive(Debug, Default, Clone, Copy)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Load and decode an image from disk, upright.
///
/// The EXIF orientation is applied to the pixels because re-encoding drops
/// the tag.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    let decode_failed = |e: image::ImageError| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    };

    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()
        .map_err(decode_failed)?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut img = DynamicImage::from_decoder(decoder).map_err(decode_failed)?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Encode by output extension.
fn save_image(img: &DynamicImage, path: &Path) -> Result<(), BackendError> {
    let format = ImageFormat::from_path(path).map_err(|e| {
        BackendError::ProcessingFailed(format!(
            "Unsupported output format {}: {}",
            path.display(),
            e
        ))
    })?;

    let encoded = match format {
        ImageFormat::Jpeg => {
            let mut writer = BufWriter::new(File::create(path)?);
            JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
                .encode_image(&img.to_rgb8())
        }
        _ => img.save_with_format(path, format),
    };

    encoded.map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
    })
}

impl ImageBackend for RustBackend {
    fn resize(&self, source: &Path, output: &Path, max: Dimension) -> Result<(), BackendError> {
        let img = load_image(source)?;
        let (width, height) = fit_within((img.width(), img.height()), max);
        log::debug!(
            "{}: {}x{} → {}x{}",
            source.display(),
            img.width(),
            img.height(),
            width,
            height
        );

        let resized = img.resize_exact(width, height, FilterType::Lanczos3);
        save_image(&resized, output)
    }

    fn optimize(&self, path: &Path) -> Result<(), BackendError> {
        match lowercase_extension(path).as_str() {
            "jpg" | "jpeg" => {
                let data = std::fs::read(path)?;
                let stripped = jpeg::strip_metadata(&data)?;
                std::fs::write(path, stripped)?;
            }
            "png" => {
                let data = std::fs::read(path)?;
                let mut options = oxipng::Options::default();
                options.strip = oxipng::StripChunks::Safe;
                let optimized = oxipng::optimize_from_memory(&data, &options).map_err(|e| {
                    BackendError::ProcessingFailed(format!(
                        "PNG optimization failed for {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                std::fs::write(path, optimized)?;
            }
            _ => log::debug!("No optimizer for \"{}\", leaving as-is", path.display()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]))
    }

    #[test]
    fn resize_png_fits_box() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("wide.png");
        let out = dir.path().join("out.png");
        gradient(64, 32).save(&src).unwrap();

        RustBackend::new()
            .resize(&src, &out, Dimension::new(16, 16))
            .unwrap();

        assert_eq!(image::image_dimensions(&out).unwrap(), (16, 8));
    }

    #[test]
    fn resize_jpeg_output() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("tall.jpg");
        let out = dir.path().join("tall_t.jpg");
        gradient(30, 60).save(&src).unwrap();

        RustBackend::new()
            .resize(&src, &out, Dimension::new(20, 20))
            .unwrap();

        assert_eq!(image::image_dimensions(&out).unwrap(), (10, 20));
    }

    /// Splice an APP1 segment in right after SOI.
    fn insert_app1(jpeg: &[u8], payload: &[u8]) -> Vec<u8> {
        let mut tagged = jpeg[..2].to_vec();
        tagged.extend_from_slice(&[0xFF, 0xE1]);
        tagged.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
        tagged.extend_from_slice(payload);
        tagged.extend_from_slice(&jpeg[2..]);
        tagged
    }

    /// Minimal big-endian EXIF block with a single Orientation entry.
    fn exif_orientation(value: u16) -> Vec<u8> {
        let mut exif = b"Exif\0\0".to_vec();
        exif.extend_from_slice(b"MM\0\x2A\0\0\0\x08");
        exif.extend_from_slice(&1u16.to_be_bytes());
        exif.extend_from_slice(&0x0112u16.to_be_bytes());
        exif.extend_from_slice(&3u16.to_be_bytes());
        exif.extend_from_slice(&1u32.to_be_bytes());
        exif.extend_from_slice(&value.to_be_bytes());
        exif.extend_from_slice(&[0, 0]);
        exif.extend_from_slice(&0u32.to_be_bytes());
        exif
    }

    #[test]
    fn resize_applies_exif_rotation() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("camera.jpg");
        let out = dir.path().join("camera_small.jpg");
        gradient(60, 30).save(&src).unwrap();
        let clean = std::fs::read(&src).unwrap();
        std::fs::write(&src, insert_app1(&clean, &exif_orientation(6))).unwrap();

        RustBackend::new()
            .resize(&src, &out, Dimension::new(20, 20))
            .unwrap();

        // Stored landscape, shown portrait
        assert_eq!(image::image_dimensions(&out).unwrap(), (10, 20));
    }

    #[test]
    fn resize_missing_source_is_error() {
        let dir = TempDir::new().unwrap();
        let result = RustBackend::new().resize(
            &dir.path().join("missing.jpg"),
            &dir.path().join("out.jpg"),
            Dimension::new(10, 10),
        );
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn resize_undecodable_source_is_error() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("fake.jpg");
        std::fs::write(&src, b"not really a jpeg").unwrap();
        let result = RustBackend::new().resize(&src, &dir.path().join("o.jpg"), Dimension::new(10, 10));
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn optimize_jpeg_strips_app1() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.jpg");
        gradient(24, 24).save(&path).unwrap();

        let clean = std::fs::read(&path).unwrap();
        let tagged = insert_app1(&clean, b"Exif\0\0secret-serial-number");
        std::fs::write(&path, &tagged).unwrap();

        RustBackend::new().optimize(&path).unwrap();

        let optimized = std::fs::read(&path).unwrap();
        assert!(optimized.len() < tagged.len());
        assert!(!optimized.windows(6).any(|w| w == b"secret"));
        assert_eq!(image::image_dimensions(&path).unwrap(), (24, 24));
    }

    #[test]
    fn optimize_png_keeps_pixels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pic.png");
        let original = gradient(16, 16);
        original.save(&path).unwrap();

        RustBackend::new().optimize(&path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded, original);
    }

    #[test]
    fn optimize_other_formats_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pic.bmp");
        gradient(4, 4).save(&path).unwrap();
        let before = std::fs::read(&path).unwrap();

        RustBackend::new().optimize(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), before);
    }
}

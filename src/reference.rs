use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage, ImageFormat};

use crate::error::{GenError, Result};
use crate::models::ReferenceImage;

/// Read and decode a single reference image.
pub fn load_reference_image(path: &Path) -> Result<ReferenceImage> {
    if !path.exists() {
        return Err(GenError::ReferenceNotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|e| GenError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let format = image::guess_format(&bytes).map_err(|e| GenError::ImageDecode {
        path: path.to_path_buf(),
        source: e,
    })?;
    let decoded =
        image::load_from_memory_with_format(&bytes, format).map_err(|e| GenError::ImageDecode {
            path: path.to_path_buf(),
            source: e,
        })?;

    log::info!("🖼️  Reference image: {}", absolute(path).display());
    log::debug!(
        "Reference {} decoded as {:?} {}x{}",
        path.display(),
        format,
        decoded.width(),
        decoded.height()
    );

    let (upload_format, upload_bytes) = if is_upload_format(format) {
        (format, bytes)
    } else {
        log::debug!("Re-encoding {:?} reference {} as PNG", format, path.display());
        (ImageFormat::Png, encode_png(&decoded, path)?)
    };

    Ok(ReferenceImage {
        path: path.to_path_buf(),
        source_format: format,
        image: decoded,
        format: upload_format,
        bytes: upload_bytes,
    })
}

/// Formats the API accepts as inline data without conversion.
fn is_upload_format(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP
    )
}

fn encode_png(image: &DynamicImage, path: &Path) -> Result<Vec<u8>> {
    // PNG has no float channels.
    let image = match image.color() {
        ColorType::Rgb32F | ColorType::Rgba32F => DynamicImage::ImageRgba8(image.to_rgba8()),
        _ => image.clone(),
    };

    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| GenError::ImageEncode {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(buffer.into_inner())
}

/// Load every path in order. The first failure aborts the whole batch.
pub fn load_reference_images<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<ReferenceImage>> {
    paths
        .iter()
        .map(|path| load_reference_image(path.as_ref()))
        .collect()
}

pub(crate) fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::ImageClient;
    use crate::models::AspectRatio;
    use image::{ImageBuffer, Rgb};
    use tempfile::TempDir;

    fn write_image(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.path().join(name);
        let buffer = ImageBuffer::from_pixel(width, height, Rgb([255u8, 0, 255]));
        buffer.save(&path).unwrap();
        path
    }

    #[test]
    fn test_empty_input() {
        let paths: Vec<PathBuf> = Vec::new();
        assert!(load_reference_images(&paths[..]).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_reference_images(&["/nonexistent/path.png"]).unwrap_err();
        match err {
            GenError::ReferenceNotFound(path) => {
                assert_eq!(path, PathBuf::from("/nonexistent/path.png"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_order_preserved() {
        let dir = TempDir::new().unwrap();
        let first = write_image(&dir, "first.png", 4, 2);
        let second = write_image(&dir, "second.jpg", 3, 3);

        let images = load_reference_images(&[&first, &second]).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].path, first);
        assert_eq!(images[0].format, ImageFormat::Png);
        assert_eq!((images[0].width(), images[0].height()), (4, 2));
        assert_eq!(images[1].format, ImageFormat::Jpeg);
        assert_eq!(images[1].mime_type(), "image/jpeg");
    }

    #[test]
    fn test_missing_file_after_valid_one_fails() {
        let dir = TempDir::new().unwrap();
        let valid = write_image(&dir, "ok.png", 1, 1);
        let missing = dir.path().join("missing.png");

        let err = load_reference_images(&[valid, missing.clone()]).unwrap_err();
        assert!(matches!(err, GenError::ReferenceNotFound(path) if path == missing));
    }

    #[test]
    fn test_not_an_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.png");
        fs::write(&path, b"definitely not a png").unwrap();

        let err = load_reference_image(&path).unwrap_err();
        assert!(matches!(err, GenError::ImageDecode { .. }));
    }

    #[test]
    fn test_jpeg_reference_sent_as_read() {
        let dir = TempDir::new().unwrap();
        let path = write_image(&dir, "style.jpg", 2, 2);

        let reference = load_reference_image(&path).unwrap();
        assert_eq!(reference.source_format, ImageFormat::Jpeg);
        assert_eq!(reference.format, ImageFormat::Jpeg);
        assert_eq!(reference.bytes, fs::read(&path).unwrap());
    }

    #[test]
    fn test_bmp_reference_uploaded_as_png() {
        let dir = TempDir::new().unwrap();
        let path = write_image(&dir, "sprite.bmp", 2, 2);

        let reference = load_reference_image(&path).unwrap();
        assert_eq!(reference.source_format, ImageFormat::Bmp);
        assert_eq!(reference.format, ImageFormat::Png);
        assert_eq!(image::guess_format(&reference.bytes).unwrap(), ImageFormat::Png);

        let payload = ImageClient::build_payload("same style", &[reference], AspectRatio::Square);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            serde_json::json!("image/png")
        );
    }

    #[test]
    fn test_gif_reference_uploaded_as_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("anim.gif");
        ImageBuffer::from_pixel(3, 1, image::Rgba([0u8, 255, 0, 255]))
            .save(&path)
            .unwrap();

        let reference = load_reference_image(&path).unwrap();
        assert_eq!(reference.mime_type(), "image/png");
        assert_eq!((reference.width(), reference.height()), (3, 1));
    }
}

//! Best-effort image normalization ahead of OCR. Anything fancier than
//! scaling and contrast belongs to the capture device, not this crate.

use image::{imageops::FilterType, DynamicImage, GrayImage};
use std::io::Cursor;
use thiserror::Error;

/// Captures smaller than this are upscaled 2× — label crops tend to come
/// in well below the glyph size recognizers want.
const UPSCALE_BELOW: u32 = 1200;
/// Hard cap on either dimension; recognizers gain nothing past ~300 DPI.
const MAX_DIMENSION: u32 = 2800;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Decode raw image bytes (JPEG / PNG / WEBP / …), normalize for OCR, and
/// return PNG bytes.
pub fn prepare_for_ocr(data: &[u8]) -> Result<Vec<u8>, PreprocessError> {
    let img = image::load_from_memory(data)?;
    let gray = stretch_contrast(rescale(img).to_luma8());

    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(gray)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}

fn rescale(img: DynamicImage) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    if w < UPSCALE_BELOW && h < UPSCALE_BELOW {
        img.resize(w * 2, h * 2, FilterType::CatmullRom)
    } else if w > MAX_DIMENSION || h > MAX_DIMENSION {
        img.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
    } else {
        img
    }
}

/// Stretch the pixel range to the full 0–255 span via a lookup table.
/// A uniform image is returned untouched.
fn stretch_contrast(mut gray: GrayImage) -> GrayImage {
    let (min_px, max_px) = gray
        .pixels()
        .fold((255u8, 0u8), |(mn, mx), p| (mn.min(p[0]), mx.max(p[0])));

    if min_px == max_px {
        return gray;
    }

    let range = (max_px - min_px) as u32;
    let lut: Vec<u8> = (0u32..256)
        .map(|v| {
            let v = v.saturating_sub(min_px as u32);
            (v * 255 / range).min(255) as u8
        })
        .collect();

    for p in gray.pixels_mut() {
        p[0] = lut[p[0] as usize];
    }
    gray
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    fn png_bytes(img: GrayImage) -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn output_is_png() {
        let img = ImageBuffer::from_fn(8, 8, |_, _| Luma([128u8]));
        let out = prepare_for_ocr(&png_bytes(img)).unwrap();
        assert_eq!(&out[..4], b"\x89PNG");
    }

    #[test]
    fn small_captures_are_upscaled() {
        let img = ImageBuffer::from_fn(40, 20, |_, _| Luma([90u8]));
        let out = prepare_for_ocr(&png_bytes(img)).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (80, 40));
    }

    #[test]
    fn oversized_images_are_capped() {
        let img = ImageBuffer::from_fn(3000, 1500, |_, _| Luma([90u8]));
        let out = prepare_for_ocr(&png_bytes(img)).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert!(decoded.width() <= MAX_DIMENSION && decoded.height() <= MAX_DIMENSION);
    }

    #[test]
    fn contrast_is_stretched_to_full_range() {
        let img = ImageBuffer::from_fn(256, 1, |x, _| Luma([(64 + x / 2) as u8]));
        let stretched = stretch_contrast(img);
        let min = stretched.pixels().map(|p| p[0]).min().unwrap();
        let max = stretched.pixels().map(|p| p[0]).max().unwrap();
        assert_eq!((min, max), (0, 255));
    }

    #[test]
    fn uniform_image_passes_through() {
        let img = ImageBuffer::from_fn(10, 10, |_, _| Luma([77u8]));
        let out = stretch_contrast(img);
        assert!(out.pixels().all(|p| p[0] == 77));
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        assert!(matches!(
            prepare_for_ocr(b"definitely not an image"),
            Err(PreprocessError::Load(_))
        ));
    }
}

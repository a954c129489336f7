//! Image composition pipeline
//!
//! Pure transform from (user photo bytes, overlay) to an encoded avatar:
//! decode, center-crop to a square, resize the overlay to match, alpha-blend
//! the overlay on top, encode as PNG. No I/O, no shared state; callers run
//! it on a blocking thread per request.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::ImageFormat;

use crate::catalog::OverlayAsset;
use crate::error::{AppError, AppResult};

/// Filename hint attached to every delivered avatar
pub const OUTPUT_FILENAME: &str = "avatar.png";

/// An encoded composite ready for delivery
#[derive(Debug, Clone)]
pub struct Composite {
    pub bytes: Vec<u8>,
    pub filename: &'static str,
}

/// Center-crop geometry for a `w`×`h` source: returns `(x, y, d)` where
/// `d = min(w, h)` and the origin uses floor division, so odd offsets always
/// round down. Identical inputs produce identical crops, bit for bit.
pub fn square_crop_origin(w: u32, h: u32) -> (u32, u32, u32) {
    let d = w.min(h);
    ((w - d) / 2, (h - d) / 2, d)
}

/// Composites `overlay` over the photo in `source`.
///
/// The source is decoded, center-cropped to a `d × d` square, and the overlay
/// is resized (bilinear) to the same `d × d` before a straight alpha-over
/// blend. The result is PNG-encoded with the [`OUTPUT_FILENAME`] hint.
///
/// # Errors
/// * `AppError::Decode` - `source` is not a supported raster format
/// * `AppError::Encode` - PNG encoding failed
pub fn compose_avatar(source: &[u8], overlay: &OverlayAsset) -> AppResult<Composite> {
    let photo = image::load_from_memory(source).map_err(AppError::Decode)?.to_rgba8();

    let (x, y, d) = square_crop_origin(photo.width(), photo.height());
    let mut base = imageops::crop_imm(&photo, x, y, d, d).to_image();

    // The blend requires identical pixel dimensions on both operands.
    let resized = imageops::resize(&overlay.image, d, d, FilterType::Triangle);
    imageops::overlay(&mut base, &resized, 0, 0);

    let mut buf = Cursor::new(Vec::new());
    base.write_to(&mut buf, ImageFormat::Png).map_err(AppError::Encode)?;

    log::debug!(
        "Composed avatar for {}: {}x{} source -> {}x{} square, {} bytes",
        overlay.key,
        photo.width(),
        photo.height(),
        d,
        d,
        buf.get_ref().len()
    );

    Ok(Composite {
        bytes: buf.into_inner(),
        filename: OUTPUT_FILENAME,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionKey;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    fn png_bytes(w: u32, h: u32, pixel: Rgba<u8>) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, pixel);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn overlay_of(w: u32, h: u32, pixel: Rgba<u8>) -> OverlayAsset {
        OverlayAsset {
            key: SelectionKey::Vacation,
            image: RgbaImage::from_pixel(w, h, pixel),
        }
    }

    #[test]
    fn test_square_crop_origin_landscape() {
        assert_eq!(square_crop_origin(1000, 600), (200, 0, 600));
    }

    #[test]
    fn test_square_crop_origin_portrait() {
        assert_eq!(square_crop_origin(600, 1000), (0, 200, 600));
    }

    #[test]
    fn test_square_crop_origin_already_square() {
        assert_eq!(square_crop_origin(512, 512), (0, 0, 512));
    }

    #[test]
    fn test_square_crop_origin_odd_offsets_floor() {
        // 7-5=2 -> offset 1; 9-5=4 on a 5x9 -> offset 2; floor, never round up
        assert_eq!(square_crop_origin(7, 5), (1, 0, 5));
        assert_eq!(square_crop_origin(5, 9), (0, 2, 5));
        assert_eq!(square_crop_origin(8, 5), (1, 0, 5));
    }

    #[test]
    fn test_compose_output_is_square_png() {
        let source = png_bytes(100, 60, Rgba([255, 0, 0, 255]));
        let overlay = overlay_of(16, 16, Rgba([0, 0, 255, 0]));

        let composite = compose_avatar(&source, &overlay).unwrap();
        assert_eq!(composite.filename, "avatar.png");
        // PNG signature
        assert_eq!(&composite.bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);

        let out = image::load_from_memory(&composite.bytes).unwrap();
        assert_eq!((out.width(), out.height()), (60, 60));
    }

    #[test]
    fn test_transparent_overlay_leaves_photo_untouched() {
        let source = png_bytes(40, 40, Rgba([10, 200, 30, 255]));
        let overlay = overlay_of(8, 8, Rgba([255, 255, 255, 0]));

        let composite = compose_avatar(&source, &overlay).unwrap();
        let out = image::load_from_memory(&composite.bytes).unwrap().to_rgba8();
        assert_eq!(out.get_pixel(0, 0), &Rgba([10, 200, 30, 255]));
        assert_eq!(out.get_pixel(39, 39), &Rgba([10, 200, 30, 255]));
    }

    #[test]
    fn test_opaque_overlay_wins() {
        let source = png_bytes(32, 32, Rgba([10, 200, 30, 255]));
        let overlay = overlay_of(4, 4, Rgba([5, 6, 7, 255]));

        let composite = compose_avatar(&source, &overlay).unwrap();
        let out = image::load_from_memory(&composite.bytes).unwrap().to_rgba8();
        assert_eq!(out.get_pixel(16, 16), &Rgba([5, 6, 7, 255]));
    }

    #[test]
    fn test_semi_transparent_overlay_blends() {
        let source = png_bytes(20, 20, Rgba([0, 0, 0, 255]));
        let overlay = overlay_of(20, 20, Rgba([255, 255, 255, 128]));

        let composite = compose_avatar(&source, &overlay).unwrap();
        let out = image::load_from_memory(&composite.bytes).unwrap().to_rgba8();
        let px = out.get_pixel(10, 10);
        // ~50% white over black: strictly between, roughly mid-gray
        assert!(px[0] > 100 && px[0] < 160, "got {:?}", px);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_overlay_resized_to_crop_side_not_source_size() {
        // Overlay much larger than the photo must shrink to d x d, and the
        // original asset must stay untouched.
        let source = png_bytes(30, 10, Rgba([1, 2, 3, 255]));
        let overlay = overlay_of(500, 400, Rgba([9, 9, 9, 255]));

        let composite = compose_avatar(&source, &overlay).unwrap();
        let out = image::load_from_memory(&composite.bytes).unwrap();
        assert_eq!((out.width(), out.height()), (10, 10));
        assert_eq!((overlay.image.width(), overlay.image.height()), (500, 400));
    }

    #[test]
    fn test_garbage_bytes_fail_with_decode_error() {
        let overlay = overlay_of(4, 4, Rgba([0, 0, 0, 255]));
        assert!(matches!(
            compose_avatar(b"not an image at all", &overlay),
            Err(AppError::Decode(_))
        ));
    }

    #[test]
    fn test_jpeg_source_is_accepted() {
        let img = RgbaImage::from_pixel(24, 18, Rgba([80, 90, 100, 255]));
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .to_rgb8()
            .write_to(&mut buf, ImageFormat::Jpeg)
            .unwrap();

        let overlay = overlay_of(6, 6, Rgba([0, 0, 0, 0]));
        let composite = compose_avatar(&buf.into_inner(), &overlay).unwrap();
        let out = image::load_from_memory(&composite.bytes).unwrap();
        assert_eq!((out.width(), out.height()), (18, 18));
    }
}

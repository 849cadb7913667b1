//! JPEG encoding for the stream.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use gcam_models::Frame;

use crate::error::VisionResult;

/// Encode a frame as JPEG at the given quality (1-100).
///
/// This is the expensive per-emission step of the stream path and must be
/// called on a copied frame, never under a store lock.
pub fn encode_jpeg(frame: &Frame, quality: u8) -> VisionResult<Vec<u8>> {
    let rgb = frame.to_rgb();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality).encode(
        rgb.data(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

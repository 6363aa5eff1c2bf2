use image::codecs::jpeg::JpegEncoder;
use image::ImageResult;

use super::Frame;

/// Encode a frame as JPEG for the video stream.
pub fn encode_jpeg(frame: &Frame, quality: u8) -> ImageResult<Vec<u8>> {
    let mut buffer = Vec::with_capacity(frame.as_raw().len() / 8);
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    encoder.encode_image(frame)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_frame_has_jpeg_markers() {
        let frame = Frame::from_pixel(32, 24, image::Rgb([40, 40, 40]));
        let jpeg = encode_jpeg(&frame, 80).unwrap();

        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }
}

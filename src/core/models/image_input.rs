use base64::Engine;

use crate::core::errors::ExtractionError;
use crate::core::models::ImageMediaType;
use crate::global_constants;

#[derive(Clone)]
pub struct ImageInput {
    media_type: ImageMediaType,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for ImageInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageInput")
            .field("media_type", &self.media_type)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("byte_len", &self.data.len())
            .finish()
    }
}

impl ImageInput {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, ExtractionError> {
        if data.is_empty() {
            return Err(ExtractionError::invalid_image("image payload is empty"));
        }

        if data.len() > global_constants::MAX_INLINE_IMAGE_BYTES {
            return Err(ExtractionError::invalid_image(format!(
                "image payload is {} bytes, limit is {}",
                data.len(),
                global_constants::MAX_INLINE_IMAGE_BYTES
            )));
        }

        let format = image::guess_format(&data)
            .map_err(|_| ExtractionError::invalid_image("unrecognized image format"))?;

        let media_type = ImageMediaType::from_image_format(format).ok_or_else(|| {
            ExtractionError::invalid_image(format!("unsupported image format {:?}", format))
        })?;

        let (width, height) =
            image::ImageReader::with_format(std::io::Cursor::new(&data), format)
                .into_dimensions()
                .map_err(|e| ExtractionError::invalid_image(format!("malformed image data: {}", e)))?;

        log::debug!(
            "{} accepted {} image {}x{} ({} bytes)",
            global_constants::LOG_TAG_IMAGE_INPUT,
            media_type,
            width,
            height,
            data.len()
        );

        Ok(Self {
            media_type,
            width,
            height,
            data,
        })
    }

    /// Accepts plain base64 or a `data:<mime>;base64,` URL as produced by browser file readers.
    pub fn from_base64(encoded: &str) -> Result<Self, ExtractionError> {
        let trimmed = encoded.trim();
        let payload = match trimmed.split_once(";base64,") {
            Some((prefix, rest)) if prefix.starts_with("data:") => rest,
            _ => trimmed,
        };

        let data = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| ExtractionError::invalid_image(format!("invalid base64 payload: {}", e)))?;

        Self::from_bytes(data)
    }

    pub fn media_type(&self) -> ImageMediaType {
        self.media_type
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

#[cfg(test)]
pub(crate) fn encode_test_image(format: image::ImageFormat, width: u32, height: u32, shade: u8) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([shade, shade, shade]),
    ));
    let mut buffer = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buffer), format)
        .expect("test image encodes");
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_detects_png() {
        let bytes = encode_test_image(image::ImageFormat::Png, 12, 8, 200);

        let input = ImageInput::from_bytes(bytes.clone()).unwrap();

        assert_eq!(input.media_type(), ImageMediaType::Png);
        assert_eq!(input.dimensions(), (12, 8));
        assert_eq!(input.byte_len(), bytes.len());
        assert_eq!(input.bytes(), bytes.as_slice());
    }

    #[test]
    fn test_from_bytes_detects_jpeg() {
        let bytes = encode_test_image(image::ImageFormat::Jpeg, 16, 16, 90);

        let input = ImageInput::from_bytes(bytes).unwrap();

        assert_eq!(input.media_type(), ImageMediaType::Jpeg);
        assert_eq!(input.dimensions(), (16, 16));
    }

    #[test]
    fn test_from_bytes_rejects_empty_payload() {
        let result = ImageInput::from_bytes(Vec::new());

        assert!(matches!(result, Err(ExtractionError::InvalidImage { .. })));
    }

    #[test]
    fn test_from_bytes_rejects_unrecognized_bytes() {
        let result = ImageInput::from_bytes(b"definitely not an image".to_vec());

        assert!(matches!(result, Err(ExtractionError::InvalidImage { .. })));
    }

    #[test]
    fn test_from_bytes_rejects_unsupported_format() {
        let bytes = encode_test_image(image::ImageFormat::Bmp, 4, 4, 10);

        let result = ImageInput::from_bytes(bytes);

        match result {
            Err(ExtractionError::InvalidImage { reason }) => {
                assert!(reason.contains("unsupported"));
            }
            other => panic!("expected InvalidImage, got {:?}", other),
        }
    }

    #[test]
    fn test_from_bytes_rejects_truncated_png() {
        let bytes = encode_test_image(image::ImageFormat::Png, 4, 4, 10);
        let truncated = bytes[..10].to_vec();

        let result = ImageInput::from_bytes(truncated);

        match result {
            Err(ExtractionError::InvalidImage { reason }) => {
                assert!(reason.contains("malformed"));
            }
            other => panic!("expected InvalidImage, got {:?}", other),
        }
    }

    #[test]
    fn test_from_bytes_rejects_oversized_payload() {
        let mut bytes = encode_test_image(image::ImageFormat::Png, 4, 4, 10);
        bytes.resize(global_constants::MAX_INLINE_IMAGE_BYTES + 1, 0);

        let result = ImageInput::from_bytes(bytes);

        match result {
            Err(ExtractionError::InvalidImage { reason }) => {
                assert!(reason.contains("limit"));
            }
            other => panic!("expected InvalidImage, got {:?}", other),
        }
    }

    #[test]
    fn test_from_base64_accepts_data_url() {
        let bytes = encode_test_image(image::ImageFormat::Png, 3, 3, 50);
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        let data_url = format!("data:image/png;base64,{}", encoded);

        let input = ImageInput::from_base64(&data_url).unwrap();

        assert_eq!(input.bytes(), bytes.as_slice());
        assert_eq!(input.to_base64(), encoded);
    }

    #[test]
    fn test_from_base64_rejects_invalid_encoding() {
        let result = ImageInput::from_base64("***not base64***");

        assert!(matches!(result, Err(ExtractionError::InvalidImage { .. })));
    }

    #[test]
    fn test_debug_output_omits_image_bytes() {
        let bytes = encode_test_image(image::ImageFormat::Png, 2, 2, 0);
        let input = ImageInput::from_bytes(bytes).unwrap();

        let debug_str = format!("{:?}", input);

        assert!(debug_str.contains("byte_len"));
        assert!(!debug_str.contains("data"));
    }
}

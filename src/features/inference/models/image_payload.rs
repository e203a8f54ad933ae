use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::core::error::AppError;
use crate::shared::constants::{DEFAULT_IMAGE_MIME_TYPE, MAX_IMAGE_SIZE};

#[derive(Debug, Error, PartialEq)]
pub enum ImagePayloadError {
    #[error("Image payload is empty")]
    Empty,

    #[error("Image data is not valid base64")]
    InvalidBase64,

    #[error("Unsupported media type '{0}', only images are accepted")]
    UnsupportedMediaType(String),

    #[error("Image exceeds the maximum size of {max} bytes")]
    TooLarge { max: usize },
}

impl From<ImagePayloadError> for AppError {
    fn from(e: ImagePayloadError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

/// An image ready to be sent to a vision model
///
/// Keeps the string exactly as received so tickets reference the original
/// data URI rather than a re-encoded copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    original: String,
    mime_type: String,
    data_offset: usize,
}

impl ImagePayload {
    /// Accept a `data:<mime>;base64,<data>` URI or bare base64
    pub fn parse(input: &str) -> Result<Self, ImagePayloadError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ImagePayloadError::Empty);
        }

        let (mime_type, data_offset) = match trimmed.split_once(',') {
            Some((header, _)) => {
                let mime = header
                    .strip_prefix("data:")
                    .and_then(|h| h.split(';').next())
                    .filter(|m| !m.is_empty())
                    .unwrap_or(DEFAULT_IMAGE_MIME_TYPE);
                (mime.to_ascii_lowercase(), header.len() + 1)
            }
            None => (DEFAULT_IMAGE_MIME_TYPE.to_string(), 0),
        };

        if !mime_type.starts_with("image/") {
            return Err(ImagePayloadError::UnsupportedMediaType(mime_type));
        }

        let data = &trimmed[data_offset..];
        if data.is_empty() {
            return Err(ImagePayloadError::Empty);
        }

        let decoded = STANDARD
            .decode(data)
            .map_err(|_| ImagePayloadError::InvalidBase64)?;
        if decoded.len() > MAX_IMAGE_SIZE {
            return Err(ImagePayloadError::TooLarge { max: MAX_IMAGE_SIZE });
        }

        Ok(Self {
            original: trimmed.to_string(),
            mime_type,
            data_offset,
        })
    }

    /// Build a payload from uploaded bytes, producing a data URI
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self, ImagePayloadError> {
        if bytes.is_empty() {
            return Err(ImagePayloadError::Empty);
        }
        if bytes.len() > MAX_IMAGE_SIZE {
            return Err(ImagePayloadError::TooLarge { max: MAX_IMAGE_SIZE });
        }

        let mime_type = mime_type.to_ascii_lowercase();
        if !mime_type.starts_with("image/") {
            return Err(ImagePayloadError::UnsupportedMediaType(mime_type));
        }

        let header = format!("data:{};base64,", mime_type);
        let data_offset = header.len();
        Ok(Self {
            original: format!("{}{}", header, STANDARD.encode(bytes)),
            mime_type,
            data_offset,
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Base64 data without any data URI header
    pub fn base64_data(&self) -> &str {
        &self.original[self.data_offset..]
    }

    /// The image string as received (or the data URI built for an upload)
    pub fn as_data_url(&self) -> &str {
        &self.original
    }

    pub fn into_data_url(self) -> String {
        self.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_uri_keeps_original() {
        let uri = "data:image/png;base64,iVBORw0KGgo=";
        let payload = ImagePayload::parse(uri).unwrap();

        assert_eq!(payload.mime_type(), "image/png");
        assert_eq!(payload.base64_data(), "iVBORw0KGgo=");
        assert_eq!(payload.as_data_url(), uri);
    }

    #[test]
    fn test_parse_bare_base64_defaults_to_jpeg() {
        let payload = ImagePayload::parse("/9j/4AAQSkZJRg==").unwrap();
        assert_eq!(payload.mime_type(), "image/jpeg");
        assert_eq!(payload.base64_data(), "/9j/4AAQSkZJRg==");
    }

    #[test]
    fn test_parse_rejects_invalid_input() {
        assert_eq!(ImagePayload::parse("   "), Err(ImagePayloadError::Empty));
        assert_eq!(
            ImagePayload::parse("data:image/jpeg;base64,"),
            Err(ImagePayloadError::Empty)
        );
        assert_eq!(
            ImagePayload::parse("data:image/jpeg;base64,not*base64!"),
            Err(ImagePayloadError::InvalidBase64)
        );
        assert_eq!(
            ImagePayload::parse("data:text/plain;base64,aGVsbG8="),
            Err(ImagePayloadError::UnsupportedMediaType(
                "text/plain".to_string()
            ))
        );
    }

    #[test]
    fn test_from_bytes_builds_data_uri() {
        let payload = ImagePayload::from_bytes(b"hello", "image/webp").unwrap();
        assert_eq!(payload.as_data_url(), "data:image/webp;base64,aGVsbG8=");
        assert_eq!(payload.base64_data(), "aGVsbG8=");

        assert_eq!(
            ImagePayload::from_bytes(b"", "image/png"),
            Err(ImagePayloadError::Empty)
        );
        assert!(matches!(
            ImagePayload::from_bytes(b"%PDF", "application/pdf"),
            Err(ImagePayloadError::UnsupportedMediaType(_))
        ));
    }
}

//! Background image decoding.

use image::ImageError;
use thiserror::Error;

/// Error decoding background image bytes.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a decodable image.
    #[error("failed to decode image: {0}")]
    Image(#[from] ImageError),
}

/// A decoded background image: RGBA8 pixels plus dimensions.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed RGBA8 pixel data, row-major.
    pub pixels: Vec<u8>,
}

// Pixel buffers run to megabytes; log output gets the byte count only.
impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &format_args!("{} bytes", self.pixels.len()))
            .finish()
    }
}

/// Decodes raw bytes into a background image.
///
/// The editor state machine is generic over this so its tests can decode
/// without real codecs.
pub trait ImageDecoder: Send + Sync {
    /// Decode image bytes into RGBA8 pixels.
    ///
    /// # Errors
    ///
    /// Returns an error when the bytes are not a supported image format.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError>;
}

/// Production decoder backed by the `image` crate's format sniffing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

impl RasterDecoder {
    /// Create a new decoder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ImageDecoder for RasterDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(DecodedImage {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}

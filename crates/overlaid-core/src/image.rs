//! Base image shown beneath the overlays.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use thiserror::Error;

/// Errors raised while turning uploaded bytes into a base image.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image data is empty")]
    Empty,
    #[error("unrecognized image format")]
    UnrecognizedFormat,
    #[error("failed to read image: {0}")]
    Read(String),
    #[error("malformed data URI")]
    MalformedDataUri,
}

/// Image format for stored image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Bmp => "image/bmp",
        }
    }

    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/gif" => Some(ImageFormat::Gif),
            "image/webp" => Some(ImageFormat::WebP),
            "image/bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }
        if data.starts_with(b"BM") && data.len() >= 14 {
            return Some(ImageFormat::Bmp);
        }
        None
    }
}

/// The base image reference installed on the surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseImage {
    pub format: ImageFormat,
    /// Image bytes, base64-encoded so snapshots stay plain JSON.
    pub data_base64: String,
}

impl BaseImage {
    /// Sniff the format of `data` and encode it.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ImageError> {
        if data.is_empty() {
            return Err(ImageError::Empty);
        }
        let format = ImageFormat::from_magic_bytes(data).ok_or(ImageError::UnrecognizedFormat)?;
        Ok(Self {
            format,
            data_base64: STANDARD.encode(data),
        })
    }

    /// Parse a `data:<mime>;base64,<payload>` URI.
    ///
    /// The payload's magic bytes win over the declared MIME type; the MIME
    /// type is only used when the bytes are not recognized.
    pub fn from_data_uri(uri: &str) -> Result<Self, ImageError> {
        let rest = uri.strip_prefix("data:").ok_or(ImageError::MalformedDataUri)?;
        let (header, payload) = rest.split_once(',').ok_or(ImageError::MalformedDataUri)?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or(ImageError::MalformedDataUri)?;
        if payload.is_empty() {
            return Err(ImageError::Empty);
        }
        let data = STANDARD
            .decode(payload)
            .map_err(|_| ImageError::MalformedDataUri)?;
        let format = ImageFormat::from_magic_bytes(&data)
            .or_else(|| ImageFormat::from_mime_type(mime))
            .ok_or(ImageError::UnrecognizedFormat)?;
        Ok(Self {
            format,
            data_base64: payload.to_string(),
        })
    }

    /// Render as a data URI suitable for an `<img src>`.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), self.data_base64)
    }

    /// Get the raw image data (decoded from base64).
    pub fn data(&self) -> Option<Vec<u8>> {
        STANDARD.decode(&self.data_base64).ok()
    }
}

/// Await a pending byte source (e.g. a browser file read) and decode it.
///
/// Nothing is installed on the surface here; the caller hands the result to
/// [`crate::Editor::load_image`] once it resolves.
pub async fn read_image<F, E>(source: F) -> Result<BaseImage, ImageError>
where
    F: Future<Output = Result<Vec<u8>, E>>,
    E: Display,
{
    let bytes = source.await.map_err(|e| ImageError::Read(e.to_string()))?;
    BaseImage::from_bytes(&bytes)
}

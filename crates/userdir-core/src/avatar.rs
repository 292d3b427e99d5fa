//! Avatar images for locally created records.
//!
//! Uploaded avatars are embedded into the record as a `data:` URI. Only PNG
//! and JPEG images are accepted; the type is sniffed from the file contents.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Supported avatar image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Png,
    Jpeg,
}

impl ImageType {
    /// Detect the image type from its leading bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PNG_MAGIC) {
            Some(ImageType::Png)
        } else if bytes.starts_with(JPEG_MAGIC) {
            Some(ImageType::Jpeg)
        } else {
            None
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageType::Png => "image/png",
            ImageType::Jpeg => "image/jpeg",
        }
    }
}

/// An image accepted as an avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    kind: ImageType,
    bytes: Vec<u8>,
}

impl AvatarImage {
    /// Accept `bytes` if they hold a PNG or JPEG image.
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        ImageType::sniff(&bytes).map(|kind| Self { kind, bytes })
    }

    pub fn kind(&self) -> ImageType {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Encode as `data:<mime>;base64,<payload>`.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.kind.mime(), STANDARD.encode(&self.bytes))
    }
}

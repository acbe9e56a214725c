//! Clinical image intake models.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An image received by the intake wizard.
///
/// Only metadata and the content hash are kept; the bytes are hashed on
/// construction and released.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedImage {
    pub id: String,
    pub file_name: String,
    /// MIME type as reported by the picker
    pub media_type: String,
    pub size_bytes: u64,
    /// Lowercase hex SHA-256 of the file content
    pub content_hash: String,
    pub uploaded_at: String,
}

impl UploadedImage {
    /// Build an upload record from raw file content.
    pub fn from_bytes(file_name: String, media_type: String, bytes: &[u8]) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_name,
            media_type: media_type.to_lowercase(),
            size_bytes: bytes.len() as u64,
            content_hash: content_hash(bytes),
            uploaded_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// SHA-256 of the content, hex-encoded.
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        let image = UploadedImage::from_bytes("xray.PNG".into(), "Image/PNG".into(), b"pixels");
        assert_eq!(image.size_bytes, 6);
        assert_eq!(image.media_type, "image/png");
        assert_eq!(image.content_hash.len(), 64);
    }

    #[test]
    fn test_hash_is_content_based() {
        let a = UploadedImage::from_bytes("a.png".into(), "image/png".into(), b"same");
        let b = UploadedImage::from_bytes("b.png".into(), "image/png".into(), b"same");
        let c = UploadedImage::from_bytes("c.png".into(), "image/png".into(), b"other");
        assert_ne!(a.id, b.id);
        assert_eq!(a.content_hash, b.content_hash);
        assert_ne!(a.content_hash, c.content_hash);
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            content_hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}

//! Design Upload System
//!
//! The media-type filter runs synchronously at submission; byte decoding is
//! the one asynchronous boundary in the core. Each accepted upload carries a
//! generation number so that only the most recently submitted upload may
//! produce the authoritative design (last-submitted-wins).

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

/// Media types accepted by the upload filter.
pub const ACCEPTED_MEDIA_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Unsupported upload type: {0}. Please upload a PNG or JPG image.")]
    UnsupportedMediaType(String),
}

/// Check a declared media type against the filter. Exact match only; no
/// sniffing of the actual bytes happens here.
pub fn validate_media_type(declared: &str) -> Result<(), UploadError> {
    if ACCEPTED_MEDIA_TYPES.contains(&declared) {
        Ok(())
    } else {
        Err(UploadError::UnsupportedMediaType(declared.to_string()))
    }
}

/// Handle to an accepted upload whose bytes are still being read.
///
/// The generation is compared against the session's latest on completion;
/// a stale ticket's result is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    pub(crate) generation: u64,
}

impl UploadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// An uploaded design after a successful decode.
///
/// The data reference is a base64 encoding of the decoded bytes, the same
/// opaque form the preview and cart surfaces consume. The checksum gives the
/// asset a stable content identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignAsset {
    pub id: Uuid,
    pub media_type: String,
    pub checksum: String,
    pub data_base64: String,
}

impl DesignAsset {
    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Self {
        Self {
            id: Uuid::new_v4(),
            media_type: media_type.to_string(),
            checksum: sha256_hex(bytes),
            data_base64: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Data-URL form of the reference, e.g. for an <img> source.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data_base64)
    }
}

/// SHA-256 of bytes as a hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

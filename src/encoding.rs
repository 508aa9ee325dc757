//! Artifact encoding.
//!
//! Captured artifacts travel inside a JSON payload, so raw bytes are turned
//! into text first. The alphabet is URL-safe base64, padded and never
//! line-wrapped, which keeps the output free of characters that would need
//! escaping in JSON or in a URL.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;

pub use base64::DecodeError;

/// Encodes raw artifact bytes into a transport-safe string.
///
/// Total over all inputs: every byte sequence, including the empty one,
/// has an encoding.
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE.encode(bytes)
}

/// Inverse of [`encode`].
pub fn decode(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    URL_SAFE.decode(encoded)
}

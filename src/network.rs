//! Network delivery of tagged artifacts.
//!
//! [`UploadPayload`] is the typed wire body; [`Uploader`] is the seam the
//! pipeline calls through; [`HttpUploadClient`] is the HTTP implementation.

pub mod types;
pub mod upload_client;

#[cfg(test)]
pub(crate) mod test_server;

pub use types::{UploadOutcome, UploadPayload};
pub use upload_client::{HttpUploadClient, Uploader};

use std::sync::Arc;

use chrono::Utc;
use log::{error, info, warn};
use warp::{http::StatusCode, reply, Filter, Rejection, Reply};

use super::types::{ApiError, UploadReceipt};
use crate::encoding;
use crate::error_handling::types::StorageError;
use crate::network::UploadPayload;
use crate::storage::{ArtifactStorage, FileArtifactStore, LocationSidecar};

fn error_reply(message: &str, status: StatusCode) -> reply::Response {
    reply::with_status(
        reply::json(&ApiError {
            message: message.to_string(),
        }),
        status,
    )
    .into_response()
}

/// GET /health
pub fn health_route() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| reply::with_status("ok", StatusCode::OK))
}

/// POST /upload
pub fn upload_route(
    store: Arc<FileArtifactStore>,
    max_body_bytes: u64,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path("upload")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(max_body_bytes))
        .and(warp::body::json())
        .and_then(move |payload: UploadPayload| {
            let store = store.clone();
            async move { Ok::<_, Rejection>(accept_upload(store, payload).await) }
        })
}

/// Every route the receiver serves.
pub fn routes(
    store: Arc<FileArtifactStore>,
    max_body_bytes: u64,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    health_route().or(upload_route(store, max_body_bytes))
}

/// Decodes and validates `payload`, then stores it off the async executor.
///
/// Two uploads received in the same millisecond share an id; the later one
/// overwrites the earlier.
async fn accept_upload(store: Arc<FileArtifactStore>, payload: UploadPayload) -> reply::Response {
    let bytes = match encoding::decode(&payload.image) {
        Ok(b) if !b.is_empty() => b,
        Ok(_) => return error_reply("Image is empty", StatusCode::BAD_REQUEST),
        Err(e) => {
            warn!("Rejected upload with undecodable image: {}", e);
            return error_reply("Image is not valid base64", StatusCode::BAD_REQUEST);
        }
    };

    let at = payload.coordinates();
    if !at.is_valid() {
        warn!("Rejected upload with coordinates {}", at);
        return error_reply("Coordinates out of range", StatusCode::BAD_REQUEST);
    }

    let size = bytes.len();
    let stored = tokio::task::spawn_blocking(move || {
        let received_at = Utc::now();
        let path = store.save_artifact(&bytes, received_at)?;
        let sidecar = LocationSidecar {
            latitude: at.latitude,
            longitude: at.longitude,
            received_at,
        };
        store.save_location_sidecar(&path, &sidecar)?;
        Ok::<_, StorageError>(path)
    })
    .await;

    match stored {
        Ok(Ok(path)) => {
            let id = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            info!("Accepted upload {} ({} byte(s) at {})", id, size, at);
            reply::with_status(
                reply::json(&UploadReceipt {
                    status: "ok".to_string(),
                    id,
                }),
                StatusCode::OK,
            )
            .into_response()
        }
        Ok(Err(e)) => {
            error!("Failed to store upload: {}", e);
            error_reply("Failed to store upload", StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => {
            error!("Upload storage task failed: {}", e);
            error_reply("Failed to store upload", StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

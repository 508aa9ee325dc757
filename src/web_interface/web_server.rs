use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;

use super::routes::routes;
use crate::configuration::ReceiverConfig;
use crate::error_handling::types::ReceiverError;
use crate::storage::FileArtifactStore;

/// Local stand-in for the remote upload endpoint.
///
/// Speaks the same wire contract the upload client produces, decodes and
/// stores what it receives, and answers 200 on acceptance or 4xx/5xx
/// otherwise.
pub struct UploadReceiver {
    store: Arc<FileArtifactStore>,
    addr: SocketAddr,
    max_body_bytes: u64,
}

impl UploadReceiver {
    /// Create a new UploadReceiver instance
    pub fn new(store: Arc<FileArtifactStore>, bind_address: IpAddr, port: u16, max_body_bytes: u64) -> Self {
        Self {
            store,
            addr: SocketAddr::new(bind_address, port),
            max_body_bytes,
        }
    }

    pub fn from_config(config: &ReceiverConfig) -> Result<Self, ReceiverError> {
        if config.port == 0 {
            return Err(ReceiverError::InvalidBindAddress(format!(
                "{}:0",
                config.bind_address
            )));
        }
        let store = Arc::new(FileArtifactStore::new(&config.received_dir)?);
        Ok(Self::new(
            store,
            config.bind_address,
            config.port,
            config.max_body_bytes,
        ))
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn store(&self) -> &Arc<FileArtifactStore> {
        &self.store
    }

    /// Serves until the process stops.
    ///
    /// Fails with [`ReceiverError::BindFailed`] if the address is taken or
    /// not permitted.
    pub async fn start(&self) -> Result<(), ReceiverError> {
        let listener = TcpListener::bind(self.addr).await.map_err(|e| {
            error!("Failed to bind upload receiver on {}: {}", self.addr, e);
            ReceiverError::BindFailed(format!("{}: {}", self.addr, e))
        })?;
        info!(
            "Upload receiver listening on http://{}/upload, storing in {}",
            self.addr,
            self.store.base_path().display()
        );
        warp::serve(routes(self.store.clone(), self.max_body_bytes))
            .incoming(listener)
            .run()
            .await;
        Ok(())
    }
}

// Upload receiver module root
pub mod routes;
pub mod types;
pub mod web_server;

// Re-export commonly used items
pub use routes::*;
pub use types::{ApiError, UploadReceipt};
pub use web_server::*;

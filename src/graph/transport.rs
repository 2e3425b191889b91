use crate::errors::AdsError;
use async_trait::async_trait;
use serde_json::Value;

/// One file attached to a multipart create request.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The Graph API wire seam. Production uses
/// [`GraphClient`](crate::graph::client::GraphClient); tests swap in scripted
/// transports.
#[async_trait]
pub trait GraphTransport: Send + Sync {
    /// Authenticated GET of a Graph path (which may carry its own query).
    async fn get_object(&self, path: &str) -> Result<Value, AdsError>;

    /// Authenticated request with an optional form body and file uploads.
    async fn request(
        &self,
        path: &str,
        method: &str,
        post_args: Option<&Value>,
        files: Option<Vec<FileUpload>>,
    ) -> Result<Value, AdsError>;
}

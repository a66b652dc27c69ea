use bytes::Bytes;
use serde::Deserialize;

use crate::config::BlobConfig;

/// Evidence attachments go to an HTTP blob store: one PUT per file, keyed by
/// a caller-supplied path, answering with a public URL.
pub struct BlobStore {
    client: reqwest::Client,
    config: BlobConfig,
}

#[derive(Deserialize)]
struct PutResponse {
    url: Option<String>,
}

impl BlobStore {
    pub fn new(config: BlobConfig, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    /// Upload one file and return its public URL. The store's response body
    /// names the URL; stores that answer without one get the write URL back.
    pub async fn put(
        &self,
        path: &str,
        content_type: Option<String>,
        bytes: Bytes,
    ) -> Result<String, String> {
        let url = format!("{}/{path}", self.config.endpoint.trim_end_matches('/'));

        let mut request = self
            .client
            .put(&url)
            .bearer_auth(&self.config.token)
            .body(bytes);
        if let Some(ct) = content_type {
            request = request.header("content-type", ct);
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("Blob upload failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Blob store returned {status} for {path}"));
        }

        match response.json::<PutResponse>().await {
            Ok(PutResponse { url: Some(public) }) => Ok(public),
            _ => Ok(url),
        }
    }
}

use serde_json::Value;

use crate::config::WebhookConfig;

/// Sink for the workflow-automation webhook. One POST per submission, no
/// retry; a non-2xx response fails the delivery.
pub struct WebhookSink {
    client: reqwest::Client,
    config: WebhookConfig,
}

impl WebhookSink {
    pub fn new(config: WebhookConfig, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    pub async fn deliver(&self, payload: &Value) -> Result<(), String> {
        let mut request = self.client.post(&self.config.url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .json(payload)
            .send()
            .await
            .map_err(|e| format!("Webhook request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(1024)
                .collect::<String>();
            return Err(format!("Webhook returned {status}: {body}"));
        }

        Ok(())
    }
}

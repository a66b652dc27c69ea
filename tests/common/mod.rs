use std::net::SocketAddr;
use std::time::Duration;

use httpmock::MockServer;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use contesta::config::{
    BlobConfig, Config, SheetsConfig, StoreValidationMode, UploadFailureMode, WebhookConfig,
};

/// Sheet coordinates every test uses against the mock sheets server.
pub const SHEETS_PATH: &str = "/v4/spreadsheets/sheet1/values/Lojas!A2:A2000";
pub const SHEETS_KEY: &str = "test-key";

pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit fields urlencoded (the no-attachment path).
    pub async fn submit_form(&self, fields: &[(&str, String)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submissions"))
            .form(fields)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit fields plus evidence files as multipart/form-data.
    pub async fn submit_multipart(
        &self,
        fields: &[(&str, String)],
        files: &[(&str, &[u8], &str)],
    ) -> (Value, StatusCode) {
        let boundary = "------------contesta-test-boundary";
        let mut body: Vec<u8> = Vec::new();

        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for (file_name, bytes, content_type) in files {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"evidencias_files\"; \
                     filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        let resp = self
            .client
            .post(self.url("/api/submissions"))
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await
            .expect("submit multipart failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Baseline config: nothing configured, strict store validation, fail-open
/// uploads. Tests fill in the upstreams they mock.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to a random port
        max_body_size: 10 * 1024 * 1024,
        trusted_proxies: vec![],
        log_level: "warn".to_string(),
        store_validation: StoreValidationMode::Strict,
        upload_failure: UploadFailureMode::Open,
        store_cache_ttl: Duration::from_secs(3600),
        webhook: None,
        sheets: None,
        blob: None,
    }
}

pub fn sheets_config(server: &MockServer) -> SheetsConfig {
    SheetsConfig {
        endpoint: server.url(""),
        sheet_id: "sheet1".to_string(),
        sheet_name: "Lojas".to_string(),
        api_key: SHEETS_KEY.to_string(),
        range: "A2:A2000".to_string(),
    }
}

pub fn webhook_config(server: &MockServer) -> WebhookConfig {
    WebhookConfig {
        url: server.url("/hook"),
        token: None,
    }
}

pub fn blob_config(server: &MockServer) -> BlobConfig {
    BlobConfig {
        endpoint: server.url(""),
        token: "blob-token".to_string(),
    }
}

/// A complete, valid bonus contestation. The occurrence date is well past
/// the 3-business-day window.
pub fn bonus_fields() -> Vec<(&'static str, String)> {
    vec![
        ("form_type", "contestacao_bonus".to_string()),
        ("nome", "Maria Silva".to_string()),
        ("telefone", "11999998888".to_string()),
        ("email", "maria@example.com".to_string()),
        ("tipoSolicitacao", "Bônus de Domingo".to_string()),
        ("data_contestacao", "2025-06-02".to_string()),
        ("turno", "Manhã".to_string()),
        ("loja", "Loja A".to_string()),
        ("valor_recebido", "10".to_string()),
        ("valor_anunciado", "25".to_string()),
        ("detalhamento", "Valor divergente do anunciado.".to_string()),
    ]
}

/// Spawn the app on a random port and hand back a driver.
pub async fn spawn_app(config: Config) -> TestApp {
    let app = contesta::build_app(config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder().build().unwrap();

    TestApp { addr, client }
}

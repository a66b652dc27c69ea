use std::net::IpAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use ipnet::IpNet;
use serde_json::{json, Value};

use crate::state::SharedState;
use crate::submission::pipeline::SubmitError;
use crate::submission::{parser, pipeline};

/// Submission intake. Always answers a tagged `{"success": …}` body; the
/// protocol number rides along on success, a localized message on failure.
pub async fn submit(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<std::net::SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let form = match parser::parse(&headers, body).await {
        Ok(form) => form,
        Err(e) => return failure(StatusCode::BAD_REQUEST, &e),
    };

    let ip = client_ip(&headers, addr.ip(), &state.config.trusted_proxies);
    let form_type = form
        .fields
        .get("form_type")
        .and_then(Value::as_str)
        .unwrap_or("?");
    tracing::info!(%ip, form_type, files = form.files.len(), "Submission received");

    match pipeline::run(&state, form).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({ "success": true, "protocolo": outcome.protocolo })),
        )
            .into_response(),
        Err(SubmitError::MissingWebhook) => failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Configuração do servidor ausente (Webhook URL).",
        ),
        Err(SubmitError::UnknownFormType) => {
            failure(StatusCode::BAD_REQUEST, "Tipo de formulário inválido.")
        }
        Err(SubmitError::Invalid(errors)) => {
            let message = errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "Dados inválidos.".to_string());
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "success": false,
                    "error": message,
                    "field_errors": errors,
                })),
            )
                .into_response()
        }
        Err(SubmitError::Upload(detail)) => {
            tracing::error!("Evidence upload failed: {detail}");
            failure(
                StatusCode::BAD_GATEWAY,
                "Falha ao enviar os anexos. Tente novamente mais tarde.",
            )
        }
        Err(SubmitError::Delivery(detail)) => {
            tracing::error!("Webhook delivery failed: {detail}");
            failure(
                StatusCode::BAD_GATEWAY,
                "Não foi possível enviar sua solicitação. Tente novamente mais tarde.",
            )
        }
    }
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

/// Resolve the requester's IP. X-Forwarded-For is only honored when the
/// direct peer is a trusted proxy, and the first non-proxy hop wins.
fn client_ip(headers: &HeaderMap, peer: IpAddr, trusted_proxies: &[IpNet]) -> IpAddr {
    if trusted_proxies.is_empty() || !trusted_proxies.iter().any(|net| net.contains(&peer)) {
        return peer;
    }

    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    forwarded
        .split(',')
        .filter_map(|hop| hop.trim().parse::<IpAddr>().ok())
        .find(|ip| !trusted_proxies.iter().any(|net| net.contains(ip)))
        .unwrap_or(peer)
}

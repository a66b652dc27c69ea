use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::config::{StoreValidationMode, UploadFailureMode};
use crate::state::AppState;

use super::calendar;
use super::parser::{EvidenceFile, ParsedForm};
use super::phone;
use super::protocol;
use super::schema::FormKind;
use super::validate::{self, FieldError, ValidationCtx};

/// Source tag stamped on every outbound payload.
pub const ORIGEM: &str = "Portal de Contestações";

/// Hard cap on evidence attachments per submission.
pub const MAX_EVIDENCE_FILES: usize = 5;

pub struct SubmitOutcome {
    pub protocolo: String,
}

#[derive(Debug)]
pub enum SubmitError {
    /// Webhook URL is not configured; nothing was attempted.
    MissingWebhook,
    UnknownFormType,
    Invalid(Vec<FieldError>),
    /// An evidence upload failed under fail-closed mode.
    Upload(String),
    /// The webhook refused or could not be reached.
    Delivery(String),
}

/// Run one submission through the full intake sequence: configuration check,
/// form resolution, normalization + validation, protocol generation,
/// evidence upload, payload assembly, webhook delivery.
pub async fn run(state: &AppState, mut form: ParsedForm) -> Result<SubmitOutcome, SubmitError> {
    let webhook = state.webhook.as_ref().ok_or(SubmitError::MissingWebhook)?;

    let kind = form
        .fields
        .get("form_type")
        .and_then(Value::as_str)
        .and_then(FormKind::from_type)
        .ok_or(SubmitError::UnknownFormType)?;

    if let Some(Value::String(raw)) = form.fields.get("telefone") {
        let normalized = phone::normalize(raw);
        form.fields
            .insert("telefone".to_string(), Value::String(normalized));
    }

    // The store directory is consulted fail-open: an unreachable gateway
    // skips store validation instead of blocking the submission.
    let store_list = match (&state.stores, state.config.store_validation) {
        (_, StoreValidationMode::Off) | (None, _) => None,
        (Some(directory), _) => match directory.list().await {
            Ok(list) => Some(list),
            Err(e) => {
                tracing::warn!("Store validation skipped, directory unavailable: {e}");
                None
            }
        },
    };

    let ctx = ValidationCtx {
        today: calendar::local_today(),
        stores: store_list.as_ref().map(|list| list.as_slice()),
        store_mode: state.config.store_validation,
    };
    let errors = validate::validate(kind, &form.fields, &ctx);
    if !errors.is_empty() {
        return Err(SubmitError::Invalid(errors));
    }

    let protocolo = protocol::generate();

    let evidencias_urls = upload_evidence(state, kind, &protocolo, &form.files).await?;
    let evidencias_count = evidencias_urls.len();

    let mut payload = form.fields;
    payload.insert("protocolo".to_string(), json!(protocolo));
    payload.insert("evidencias_urls".to_string(), json!(evidencias_urls));
    payload.insert(
        "timestamp".to_string(),
        json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    payload.insert("origem".to_string(), json!(ORIGEM));

    webhook
        .deliver(&Value::Object(payload))
        .await
        .map_err(SubmitError::Delivery)?;

    tracing::info!(
        form_type = kind.as_type(),
        protocolo = %protocolo,
        evidencias = evidencias_count,
        "Submission forwarded"
    );

    Ok(SubmitOutcome { protocolo })
}

/// Upload eligible attachments concurrently and collect their public URLs.
/// Eligible means non-empty content and a filename, capped at
/// [`MAX_EVIDENCE_FILES`]. Failure handling follows the configured mode.
async fn upload_evidence(
    state: &AppState,
    kind: FormKind,
    protocolo: &str,
    files: &[EvidenceFile],
) -> Result<Vec<String>, SubmitError> {
    let eligible: Vec<&EvidenceFile> = files
        .iter()
        .filter(|f| !f.bytes.is_empty() && !f.file_name.is_empty())
        .take(MAX_EVIDENCE_FILES)
        .collect();

    if eligible.is_empty() {
        return Ok(Vec::new());
    }

    let Some(blob) = &state.blob else {
        tracing::warn!(
            "Blob store not configured, dropping {} attachment(s)",
            eligible.len()
        );
        return Ok(Vec::new());
    };

    let uploads = eligible.iter().map(|file| {
        let path = format!("{}/{protocolo}/{}", kind.as_type(), file.file_name);
        async move {
            blob.put(&path, file.content_type.clone(), file.bytes.clone())
                .await
        }
    });

    let mut urls = Vec::new();
    for result in futures_util::future::join_all(uploads).await {
        match result {
            Ok(url) => urls.push(url),
            Err(e) => match state.config.upload_failure {
                UploadFailureMode::Open => {
                    tracing::warn!("Evidence upload failed, continuing: {e}");
                }
                UploadFailureMode::Closed => return Err(SubmitError::Upload(e)),
            },
        }
    }

    Ok(urls)
}

use axum::http::HeaderMap;
use bytes::Bytes;
use serde_json::{Map, Value};

/// Fixed multipart field name for evidence attachments.
pub const EVIDENCE_FIELD: &str = "evidencias_files";

#[derive(Debug, Clone)]
pub struct EvidenceFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
pub struct ParsedForm {
    pub fields: Map<String, Value>,
    pub files: Vec<EvidenceFile>,
}

/// Parse a request body based on Content-Type. Multipart keeps file parts;
/// urlencoded bodies carry text fields only.
pub async fn parse(headers: &HeaderMap, body: Bytes) -> Result<ParsedForm, String> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("multipart/form-data") {
        parse_multipart(headers, body).await
    } else if content_type.contains("application/x-www-form-urlencoded") || content_type.is_empty()
    {
        parse_form_urlencoded(&body)
    } else {
        Err(format!("Unsupported content type: {content_type}"))
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<ParsedForm, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    let mut fields = Map::new();
    for (key, value) in form_urlencoded::parse(body_str.as_bytes()) {
        fields.insert(key.into_owned(), Value::String(value.into_owned()));
    }

    Ok(ParsedForm {
        fields,
        files: Vec::new(),
    })
}

async fn parse_multipart(headers: &HeaderMap, body: Bytes) -> Result<ParsedForm, String> {
    let boundary = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| "Missing multipart boundary".to_string())?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut form = ParsedForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        let name = field.name().unwrap_or("unknown").to_string();

        // Attachments arrive with a filename; everything else is text.
        if field.file_name().is_some() || name == EVIDENCE_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(|m| m.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| format!("File read error: {e}"))?;
            form.files.push(EvidenceFile {
                file_name,
                content_type,
                bytes,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| format!("Field read error: {e}"))?;
            form.fields.insert(name, Value::String(value));
        }
    }

    Ok(form)
}

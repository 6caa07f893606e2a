use serde::Deserialize;
use url::Url;

/// Response body shape, decided from status, content type and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    /// JSON carrying an artifact reference and the textual source.
    Structured {
        artifact_url: String,
        source_text: String,
    },
    /// Raw artifact bytes to be stored locally.
    Binary,
    Rejected {
        error: Option<String>,
    },
}

/// Content types accepted as a directly renderable artifact.
const ARTIFACT_CONTENT_TYPES: &[&str] = &["application/pdf", "application/octet-stream"];
const PDF_SIGNATURE: &[u8] = b"%PDF";

#[derive(Debug, Deserialize)]
struct StructuredBody {
    pdf_url: String,
    latex_code: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    detail: Option<serde_json::Value>,
}

pub fn classify_response(
    status: u16,
    content_type: Option<&str>,
    body: &[u8],
    base: &Url,
) -> ResponseShape {
    let success = (200..300).contains(&status);
    if !success {
        return ResponseShape::Rejected {
            error: error_message(body),
        };
    }

    match content_type.map(media_essence) {
        Some(essence) if is_json_essence(&essence) => structured_or_malformed(body, base),
        Some(essence) if ARTIFACT_CONTENT_TYPES.contains(&essence.as_str()) => {
            ResponseShape::Binary
        }
        Some(essence) => ResponseShape::Rejected {
            error: Some(format!("unexpected content type {essence}")),
        },
        // No declared type: an object body is JSON, a PDF signature is the artifact.
        None => match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(_)) => structured_or_malformed(body, base),
            _ if body.starts_with(PDF_SIGNATURE) => ResponseShape::Binary,
            _ => ResponseShape::Rejected {
                error: Some("unexpected untyped response".to_string()),
            },
        },
    }
}

fn structured_or_malformed(body: &[u8], base: &Url) -> ResponseShape {
    match serde_json::from_slice::<StructuredBody>(body) {
        Ok(parsed) => ResponseShape::Structured {
            artifact_url: resolve_artifact_url(base, &parsed.pdf_url),
            source_text: parsed.latex_code,
        },
        Err(err) => ResponseShape::Rejected {
            error: error_message(body).or_else(|| Some(format!("malformed response: {err}"))),
        },
    }
}

fn media_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase()
}

fn is_json_essence(essence: &str) -> bool {
    essence == "application/json" || essence.ends_with("+json")
}

/// `error` wins over FastAPI's `detail`; only string details are used.
fn error_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    if let Some(error) = parsed.error.filter(|e| !e.trim().is_empty()) {
        return Some(error);
    }
    match parsed.detail {
        Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

fn resolve_artifact_url(base: &Url, raw: &str) -> String {
    match base.join(raw) {
        Ok(url) => url.to_string(),
        Err(_) => raw.to_string(),
    }
}

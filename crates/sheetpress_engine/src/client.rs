use std::path::PathBuf;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use sheetpress_core::{ServiceReply, SubmissionRequest};
use sheetpress_logging::{press_debug, press_info, press_warn};
use url::Url;

use crate::persist::ArtifactStore;
use crate::response::{classify_response, ResponseShape};
use crate::{ClientError, FailureKind};

pub const FILES_FIELD: &str = "files";
const PART_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// `None` lets a hung request stay in flight.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
    pub artifact_dir: PathBuf,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/upload".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Some(Duration::from_secs(120)),
            max_bytes: 50 * 1024 * 1024,
            artifact_dir: std::env::temp_dir().join("sheetpress"),
        }
    }
}

/// The remote processing service, seen from the client.
#[async_trait::async_trait]
pub trait ProcessingService: Send + Sync {
    async fn process(&self, request: &SubmissionRequest) -> Result<ServiceReply, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestService {
    settings: ClientSettings,
    client: reqwest::Client,
    store: ArtifactStore,
}

impl ReqwestService {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;
        let store = ArtifactStore::new(settings.artifact_dir.clone());
        Ok(Self {
            settings,
            client,
            store,
        })
    }

    fn build_form(request: &SubmissionRequest) -> Result<Form, ClientError> {
        let mut form = Form::new();
        for file in &request.files {
            press_debug!(
                "part {}",
                sheetpress_logging::describe_payload(&file.name, file.payload.len())
            );
            let part = Part::bytes(file.payload.as_bytes().to_vec())
                .file_name(file.name.clone())
                .mime_str(PART_CONTENT_TYPE)
                .map_err(|err| ClientError::new(FailureKind::InvalidPart, err.to_string()))?;
            form = form.part(FILES_FIELD, part);
        }
        let options = request.options;
        Ok(form
            .text("fontSize", options.font_size.wire_value())
            .text("columns", options.columns.wire_value())
            .text("orientation", options.orientation.wire_value()))
    }
}

#[async_trait::async_trait]
impl ProcessingService for ReqwestService {
    async fn process(&self, request: &SubmissionRequest) -> Result<ServiceReply, ClientError> {
        let endpoint = Url::parse(&self.settings.endpoint)
            .map_err(|err| ClientError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let form = Self::build_form(request)?;

        press_info!(
            "POST {} request {} ({} file(s))",
            endpoint,
            request.request_id,
            request.files.len()
        );
        let response = self
            .client
            .post(endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let body = read_capped_body(response, self.settings.max_bytes).await?;
        press_debug!(
            "request {} answered {} ({:?}, {} B)",
            request.request_id,
            status,
            content_type,
            body.len()
        );

        let shape = classify_response(status.as_u16(), content_type.as_deref(), &body, &endpoint);
        let reply = match shape {
            ResponseShape::Structured {
                artifact_url,
                source_text,
            } => ServiceReply::Structured {
                artifact_url,
                source_text,
            },
            ResponseShape::Binary => {
                let artifact_url = self
                    .store
                    .store(&body)
                    .map_err(|err| ClientError::new(FailureKind::Materialize, err.to_string()))?;
                ServiceReply::Artifact { artifact_url }
            }
            ResponseShape::Rejected { error } => {
                press_warn!(
                    "request {} rejected with {}: {:?}",
                    request.request_id,
                    status,
                    error
                );
                ServiceReply::Rejected { error }
            }
        };
        Ok(reply)
    }
}

/// Streams the response body, refusing it once it grows past `max_bytes`.
pub(crate) async fn read_capped_body(
    response: reqwest::Response,
    max_bytes: u64,
) -> Result<Vec<u8>, ClientError> {
    let too_large = |actual| {
        ClientError::new(
            FailureKind::TooLarge {
                max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    };
    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            return Err(too_large(content_len));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        let next_len = bytes.len() as u64 + chunk.len() as u64;
        if next_len > max_bytes {
            return Err(too_large(next_len));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}

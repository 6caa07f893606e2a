use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sheetpress_logging::press_info;
use url::Url;

use crate::client::read_capped_body;
use crate::filename::download_filename;
use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("download failed: {0}")]
    Http(String),
    #[error("cannot retrieve artifact from {0}")]
    UnsupportedUrl(String),
    #[error("invalid destination {0}")]
    InvalidDestination(String),
    #[error("copy target unavailable: {0}")]
    ClipboardUnavailable(String),
}

/// Where copied text goes. Implementations report a short summary for the user.
pub trait TextTarget: Send + Sync {
    fn copy_text(&self, text: &str) -> Result<String, ExportError>;
}

/// Copies to standard output.
pub struct StdoutTarget;

impl TextTarget for StdoutTarget {
    fn copy_text(&self, text: &str) -> Result<String, ExportError> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;
        Ok(format!("copied {} characters to stdout", text.chars().count()))
    }
}

/// Copies into a file, replacing any previous content.
pub struct FileTarget {
    path: PathBuf,
}

impl FileTarget {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TextTarget for FileTarget {
    fn copy_text(&self, text: &str) -> Result<String, ExportError> {
        let (dir, name) = split_target(&self.path)?;
        let path = AtomicFileWriter::new(dir).write(&name, text.as_bytes())?;
        Ok(format!("copied {} characters to {}", text.chars().count(), path.display()))
    }
}

/// Stand-in when the host offers no copy mechanism.
pub struct UnavailableTarget;

impl TextTarget for UnavailableTarget {
    fn copy_text(&self, _text: &str) -> Result<String, ExportError> {
        Err(ExportError::ClipboardUnavailable(
            "no copy target configured".to_string(),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Download destination. A directory keeps the artifact's own file name.
    pub download_to: PathBuf,
    pub request_timeout: Duration,
    /// Upper bound for a remote artifact body.
    pub max_bytes: u64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            download_to: PathBuf::from("."),
            request_timeout: Duration::from_secs(60),
            max_bytes: 50 * 1024 * 1024,
        }
    }
}

pub struct Exporter {
    settings: ExportSettings,
    client: reqwest::Client,
    text_target: Box<dyn TextTarget>,
}

impl Exporter {
    pub fn new(
        settings: ExportSettings,
        text_target: Box<dyn TextTarget>,
    ) -> Result<Self, ExportError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ExportError::Http(err.to_string()))?;
        Ok(Self {
            settings,
            client,
            text_target,
        })
    }

    /// Retrieves the artifact behind `artifact_url` (`file://` or `http(s)://`)
    /// and writes it to the configured destination.
    pub async fn download(&self, artifact_url: &str) -> Result<PathBuf, ExportError> {
        let url = Url::parse(artifact_url)
            .map_err(|_| ExportError::UnsupportedUrl(artifact_url.to_string()))?;
        let bytes = match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|()| ExportError::UnsupportedUrl(artifact_url.to_string()))?;
                tokio::fs::read(&path).await?
            }
            "http" | "https" => {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|err| ExportError::Http(err.to_string()))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(ExportError::Http(format!("http status {}", status.as_u16())));
                }
                read_capped_body(response, self.settings.max_bytes)
                    .await
                    .map_err(|err| ExportError::Http(err.to_string()))?
            }
            _ => return Err(ExportError::UnsupportedUrl(artifact_url.to_string())),
        };

        let (dir, name) = self.destination_for(artifact_url)?;
        let path = AtomicFileWriter::new(dir).write(&name, &bytes)?;
        press_info!("downloaded {} B to {}", bytes.len(), path.display());
        Ok(path)
    }

    pub fn copy_text(&self, text: &str) -> Result<String, ExportError> {
        self.text_target.copy_text(text)
    }

    fn destination_for(&self, artifact_url: &str) -> Result<(PathBuf, String), ExportError> {
        let target = &self.settings.download_to;
        if target.is_dir() {
            Ok((target.clone(), download_filename(artifact_url)))
        } else {
            split_target(target)
        }
    }
}

fn split_target(path: &Path) -> Result<(PathBuf, String), ExportError> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ExportError::InvalidDestination(path.display().to_string()))?
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, name))
}

//! Sheetpress engine: talks to the processing service and executes exports.
mod client;
mod engine;
mod export;
mod filename;
mod persist;
mod response;
mod types;

pub use client::{ClientSettings, ProcessingService, ReqwestService, FILES_FIELD};
pub use engine::EngineHandle;
pub use export::{
    ExportError, ExportSettings, Exporter, FileTarget, StdoutTarget, TextTarget,
    UnavailableTarget,
};
pub use filename::{artifact_filename, download_filename};
pub use persist::{ensure_output_dir, ArtifactStore, AtomicFileWriter, PersistError};
pub use response::{classify_response, ResponseShape};
pub use types::{ClientError, EngineEvent, FailureKind};

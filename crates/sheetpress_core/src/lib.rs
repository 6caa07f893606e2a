//! Sheetpress core: pure batch/submission/result state machine and view-model helpers.
mod batch;
mod effect;
mod msg;
mod options;
mod result;
mod state;
mod submission;
mod update;
mod view_model;
mod viewer;

pub use batch::{
    AddOutcome, BatchSelector, Candidate, MediaKind, Payload, PendingFile, ValidationWarning,
};
pub use effect::Effect;
pub use msg::Msg;
pub use options::{Columns, FontSize, Orientation, RenderOptions, UnknownOption};
pub use result::{ProcessedResult, ServiceReply};
pub use state::{AppState, BatchPolicy};
pub use submission::{
    RequestId, SubmissionController, SubmissionRequest, SubmissionState, SubmitDecision,
    EMPTY_BATCH_MESSAGE, GENERIC_FAILURE_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, FileRowView, ResultView, SubmissionStatus};
pub use viewer::{ExportNotice, ExportRequest, ResultViewer, ViewMode};

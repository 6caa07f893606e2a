use crate::{ExportNotice, RenderOptions, ViewMode};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub files: Vec<FileRowView>,
    pub options: RenderOptions,
    pub warning: Option<String>,
    pub status: SubmissionStatus,
    pub can_submit: bool,
    pub result: Option<ResultView>,
    pub view_mode: ViewMode,
    /// Modes the control surface may present for the current result.
    pub offered_modes: Vec<ViewMode>,
    /// Source text, only while the textual view is active.
    pub textual_body: Option<String>,
    pub export_notice: Option<ExportNotice>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub index: usize,
    pub name: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub artifact_url: String,
    pub has_source_text: bool,
}

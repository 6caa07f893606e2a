#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Dispatch(crate::SubmissionRequest),
    Download { artifact_url: String },
    CopyText { text: String },
}

impl From<crate::ExportRequest> for Effect {
    fn from(request: crate::ExportRequest) -> Self {
        match request {
            crate::ExportRequest::Download { artifact_url } => Effect::Download { artifact_url },
            crate::ExportRequest::CopyText { text } => Effect::CopyText { text },
        }
    }
}

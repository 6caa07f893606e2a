use sheetpress_logging::{press_debug, press_warn};

use crate::ProcessedResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Rendered,
    Textual,
}

/// Export action for the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportRequest {
    Download { artifact_url: String },
    CopyText { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportNotice {
    Completed(String),
    Failed(String),
}

/// Presents the latest successful result. Nothing here feeds back into the
/// batch or the submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultViewer {
    result: Option<ProcessedResult>,
    mode: ViewMode,
    notice: Option<ExportNotice>,
}

impl ResultViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, result: ProcessedResult) {
        self.result = Some(result);
        self.mode = ViewMode::Rendered;
        self.notice = None;
    }

    pub fn result(&self) -> Option<&ProcessedResult> {
        self.result.as_ref()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn notice(&self) -> Option<&ExportNotice> {
        self.notice.as_ref()
    }

    pub fn available_modes(&self) -> Vec<ViewMode> {
        match self.result {
            None => Vec::new(),
            Some(ProcessedResult::Artifact { .. }) => vec![ViewMode::Rendered],
            Some(ProcessedResult::Structured { .. }) => vec![ViewMode::Rendered, ViewMode::Textual],
        }
    }

    /// Returns whether the mode changed.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        if !self.available_modes().contains(&mode) {
            press_warn!("view mode {:?} not offered for current result", mode);
            return false;
        }
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn export_current(&self) -> Option<ExportRequest> {
        let result = self.result.as_ref()?;
        let request = match (self.mode, result.source_text()) {
            (ViewMode::Textual, Some(text)) => ExportRequest::CopyText {
                text: text.to_string(),
            },
            _ => ExportRequest::Download {
                artifact_url: result.artifact_url().to_string(),
            },
        };
        press_debug!("export requested in {:?} mode", self.mode);
        Some(request)
    }

    pub fn export_succeeded(&mut self, summary: impl Into<String>) {
        self.notice = Some(ExportNotice::Completed(summary.into()));
    }

    pub fn export_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        press_warn!("export failed: {}", message);
        self.notice = Some(ExportNotice::Failed(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured() -> ProcessedResult {
        ProcessedResult::Structured {
            artifact_url: "http://svc/out/1.pdf".to_string(),
            source_text: "\\documentclass{article}".to_string(),
        }
    }

    #[test]
    fn textual_only_offered_for_structured_results() {
        let mut viewer = ResultViewer::new();
        assert!(viewer.available_modes().is_empty());
        assert!(!viewer.set_view_mode(ViewMode::Rendered));

        viewer.show(ProcessedResult::Artifact {
            artifact_url: "file:///tmp/a.pdf".to_string(),
        });
        assert_eq!(viewer.available_modes(), vec![ViewMode::Rendered]);
        assert!(!viewer.set_view_mode(ViewMode::Textual));
        assert_eq!(viewer.mode(), ViewMode::Rendered);
    }

    #[test]
    fn export_follows_mode() {
        let mut viewer = ResultViewer::new();
        viewer.show(structured());
        assert_eq!(
            viewer.export_current(),
            Some(ExportRequest::Download {
                artifact_url: "http://svc/out/1.pdf".to_string()
            })
        );
        assert!(viewer.set_view_mode(ViewMode::Textual));
        assert_eq!(
            viewer.export_current(),
            Some(ExportRequest::CopyText {
                text: "\\documentclass{article}".to_string()
            })
        );
    }

    #[test]
    fn show_resets_mode_and_notice() {
        let mut viewer = ResultViewer::new();
        viewer.show(structured());
        viewer.set_view_mode(ViewMode::Textual);
        viewer.export_failed("clipboard unavailable");
        viewer.show(structured());
        assert_eq!(viewer.mode(), ViewMode::Rendered);
        assert!(viewer.notice().is_none());
    }

    #[test]
    fn export_failure_keeps_result() {
        let mut viewer = ResultViewer::new();
        viewer.show(structured());
        viewer.export_failed("denied");
        assert_eq!(viewer.result(), Some(&structured()));
        assert_eq!(
            viewer.notice(),
            Some(&ExportNotice::Failed("denied".to_string()))
        );
    }
}

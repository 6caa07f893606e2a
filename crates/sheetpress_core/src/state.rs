use crate::view_model::{AppViewModel, FileRowView, ResultView, SubmissionStatus};
use crate::{BatchSelector, RenderOptions, ResultViewer, SubmissionController, SubmissionState};

/// What happens to the staged files after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Files stay staged so the same batch can be resubmitted with other options.
    #[default]
    Keep,
    ClearOnSuccess,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) batch: BatchSelector,
    pub(crate) options: RenderOptions,
    pub(crate) submission: SubmissionController,
    pub(crate) viewer: ResultViewer,
    policy: BatchPolicy,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: BatchPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    pub fn batch(&self) -> &BatchSelector {
        &self.batch
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    pub fn submission(&self) -> &SubmissionState {
        self.submission.state()
    }

    pub fn viewer(&self) -> &ResultViewer {
        &self.viewer
    }

    pub fn view(&self) -> AppViewModel {
        let status = match self.submission.state() {
            SubmissionState::Idle => SubmissionStatus::Idle,
            SubmissionState::InFlight { .. } => SubmissionStatus::Submitting,
            SubmissionState::Succeeded(_) => SubmissionStatus::Succeeded,
            SubmissionState::Failed(message) => SubmissionStatus::Failed(message.clone()),
        };

        let result = self.viewer.result().map(|result| ResultView {
            artifact_url: result.artifact_url().to_string(),
            has_source_text: result.source_text().is_some(),
        });
        let textual_body = match self.viewer.mode() {
            crate::ViewMode::Textual => self
                .viewer
                .result()
                .and_then(|result| result.source_text())
                .map(ToOwned::to_owned),
            crate::ViewMode::Rendered => None,
        };

        AppViewModel {
            files: self
                .batch
                .files()
                .iter()
                .enumerate()
                .map(|(index, file)| FileRowView {
                    index,
                    name: file.name.clone(),
                    bytes: file.payload.len() as u64,
                })
                .collect(),
            options: self.options,
            warning: self.batch.warning().map(|warning| warning.message()),
            can_submit: !self.batch.is_empty() && !self.submission.is_in_flight(),
            status,
            result,
            view_mode: self.viewer.mode(),
            offered_modes: self.viewer.available_modes(),
            textual_body,
            export_notice: self.viewer.notice().cloned(),
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

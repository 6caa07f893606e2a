use sheetpress_logging::{press_debug, press_info};

use crate::{AppState, BatchPolicy, Effect, Msg, SubmitDecision};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(candidates) => {
            let outcome = state.batch.add_files(candidates);
            press_debug!(
                "files selected: accepted {}, skipped {}",
                outcome.accepted,
                outcome.skipped
            );
            state.mark_dirty();
            Vec::new()
        }
        Msg::FileRemoved(index) => {
            if state.batch.remove_file(index).is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::BatchCleared => {
            state.batch.reset();
            state.mark_dirty();
            Vec::new()
        }
        Msg::FontSizeSelected(font_size) => {
            state.options.font_size = font_size;
            state.mark_dirty();
            Vec::new()
        }
        Msg::ColumnsSelected(columns) => {
            state.options.columns = columns;
            state.mark_dirty();
            Vec::new()
        }
        Msg::OrientationSelected(orientation) => {
            state.options.orientation = orientation;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SubmitClicked => {
            let options = state.options;
            match state.submission.submit(state.batch.files(), options) {
                SubmitDecision::Dispatched(request) => {
                    state.mark_dirty();
                    vec![Effect::Dispatch(request)]
                }
                SubmitDecision::RejectedEmpty => {
                    state.mark_dirty();
                    Vec::new()
                }
                SubmitDecision::RejectedInFlight => Vec::new(),
            }
        }
        Msg::SubmissionSettled { request_id, reply } => {
            let was_in_flight = state.submission.is_in_flight();
            if let Some(result) = state.submission.settle(request_id, reply) {
                state.viewer.show(result);
                if state.policy() == BatchPolicy::ClearOnSuccess {
                    press_info!("clearing {} staged file(s) after success", state.batch.len());
                    state.batch.reset();
                }
            }
            if was_in_flight && !state.submission.is_in_flight() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ViewModeSelected(mode) => {
            if state.viewer.set_view_mode(mode) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ExportClicked => match state.viewer.export_current() {
            Some(request) => vec![Effect::from(request)],
            None => Vec::new(),
        },
        Msg::ExportFinished(outcome) => {
            match outcome {
                Ok(summary) => state.viewer.export_succeeded(summary),
                Err(message) => state.viewer.export_failed(message),
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

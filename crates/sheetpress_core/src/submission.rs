use sheetpress_logging::{press_debug, press_info, press_warn};

use crate::{PendingFile, ProcessedResult, RenderOptions, ServiceReply};

pub type RequestId = u64;

pub const EMPTY_BATCH_MESSAGE: &str = "no files selected";
pub const GENERIC_FAILURE_MESSAGE: &str = "processing failed";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight {
        request_id: RequestId,
    },
    Succeeded(ProcessedResult),
    Failed(String),
}

/// Everything the engine needs to issue one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub request_id: RequestId,
    pub files: Vec<PendingFile>,
    pub options: RenderOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    Dispatched(SubmissionRequest),
    RejectedEmpty,
    RejectedInFlight,
}

/// Owns the request lifecycle: `Idle -> InFlight -> Succeeded | Failed`,
/// cycling back to `InFlight` on every accepted submit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionController {
    state: SubmissionState,
    last_request_id: RequestId,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, SubmissionState::InFlight { .. })
    }

    pub fn submit(&mut self, batch: &[PendingFile], options: RenderOptions) -> SubmitDecision {
        if let SubmissionState::InFlight { request_id } = self.state {
            press_warn!("submit ignored: request {} still in flight", request_id);
            return SubmitDecision::RejectedInFlight;
        }
        if batch.is_empty() {
            press_warn!("submit rejected: {}", EMPTY_BATCH_MESSAGE);
            self.state = SubmissionState::Failed(EMPTY_BATCH_MESSAGE.to_string());
            return SubmitDecision::RejectedEmpty;
        }

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.state = SubmissionState::InFlight { request_id };
        press_info!(
            "submit: request {} with {} file(s), options {:?}",
            request_id,
            batch.len(),
            options
        );
        SubmitDecision::Dispatched(SubmissionRequest {
            request_id,
            files: batch.to_vec(),
            options,
        })
    }

    /// Applies the reply for `request_id`. Replies that do not match the
    /// in-flight request are dropped. Returns the result on success.
    pub fn settle(
        &mut self,
        request_id: RequestId,
        reply: ServiceReply,
    ) -> Option<ProcessedResult> {
        match self.state {
            SubmissionState::InFlight { request_id: current } if current == request_id => {}
            _ => {
                press_warn!(
                    "reply for request {} dropped; state is {:?}",
                    request_id,
                    self.state
                );
                return None;
            }
        }

        let (next, result) = match reply {
            ServiceReply::Artifact { artifact_url } => {
                let result = ProcessedResult::Artifact { artifact_url };
                (SubmissionState::Succeeded(result.clone()), Some(result))
            }
            ServiceReply::Structured {
                artifact_url,
                source_text,
            } => {
                let result = ProcessedResult::Structured {
                    artifact_url,
                    source_text,
                };
                (SubmissionState::Succeeded(result.clone()), Some(result))
            }
            ServiceReply::Rejected { error } => {
                let message = error
                    .filter(|msg| !msg.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
                (SubmissionState::Failed(message), None)
            }
            ServiceReply::Unreachable { reason } => (
                SubmissionState::Failed(format!(
                    "could not reach the processing service: {reason}"
                )),
                None,
            ),
        };
        press_debug!("request {} settled: {:?}", request_id, next);
        self.state = next;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MediaKind, Payload};

    fn batch(names: &[&str]) -> Vec<PendingFile> {
        names
            .iter()
            .map(|name| PendingFile {
                name: name.to_string(),
                payload: Payload::from(b"%PDF".to_vec()),
                media_kind: MediaKind::Document,
            })
            .collect()
    }

    fn dispatched(decision: SubmitDecision) -> SubmissionRequest {
        match decision {
            SubmitDecision::Dispatched(request) => request,
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn empty_batch_fails_without_request() {
        let mut controller = SubmissionController::new();
        let decision = controller.submit(&[], RenderOptions::default());
        assert_eq!(decision, SubmitDecision::RejectedEmpty);
        assert_eq!(
            controller.state(),
            &SubmissionState::Failed("no files selected".to_string())
        );
    }

    #[test]
    fn accepted_submit_carries_ordered_batch() {
        let mut controller = SubmissionController::new();
        let decision = controller.submit(&batch(&["b.pdf", "a.pdf"]), RenderOptions::default());
        let request = dispatched(decision);
        let names: Vec<_> = request.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.pdf", "a.pdf"]);
        assert_eq!(
            controller.state(),
            &SubmissionState::InFlight {
                request_id: request.request_id
            }
        );
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut controller = SubmissionController::new();
        let files = batch(&["a.pdf"]);
        let first = dispatched(controller.submit(&files, RenderOptions::default()));
        assert_eq!(
            controller.submit(&files, RenderOptions::default()),
            SubmitDecision::RejectedInFlight
        );
        assert!(controller.is_in_flight());

        // Even an empty batch must not knock the controller out of InFlight.
        assert_eq!(
            controller.submit(&[], RenderOptions::default()),
            SubmitDecision::RejectedInFlight
        );
        assert_eq!(
            controller.state(),
            &SubmissionState::InFlight {
                request_id: first.request_id
            }
        );
    }

    #[test]
    fn stale_reply_is_dropped() {
        let mut controller = SubmissionController::new();
        let request = dispatched(controller.submit(&batch(&["a.pdf"]), RenderOptions::default()));
        let reply = ServiceReply::Artifact {
            artifact_url: "file:///tmp/a.pdf".to_string(),
        };
        assert!(controller.settle(request.request_id + 1, reply).is_none());
        assert!(controller.is_in_flight());
    }

    #[test]
    fn rejection_without_message_uses_generic_text() {
        let mut controller = SubmissionController::new();
        let request = dispatched(controller.submit(&batch(&["a.pdf"]), RenderOptions::default()));
        controller.settle(request.request_id, ServiceReply::Rejected { error: None });
        assert_eq!(
            controller.state(),
            &SubmissionState::Failed(GENERIC_FAILURE_MESSAGE.to_string())
        );
    }

    #[test]
    fn transport_failure_is_described() {
        let mut controller = SubmissionController::new();
        let request = dispatched(controller.submit(&batch(&["a.pdf"]), RenderOptions::default()));
        controller.settle(
            request.request_id,
            ServiceReply::Unreachable {
                reason: "connection refused".to_string(),
            },
        );
        assert_eq!(
            controller.state(),
            &SubmissionState::Failed(
                "could not reach the processing service: connection refused".to_string()
            )
        );
    }

    #[test]
    fn resubmit_after_failure_uses_fresh_request_id() {
        let mut controller = SubmissionController::new();
        let files = batch(&["a.pdf"]);
        let first = dispatched(controller.submit(&files, RenderOptions::default()));
        controller.settle(first.request_id, ServiceReply::Rejected { error: None });
        let second = dispatched(controller.submit(&files, RenderOptions::default()));
        assert!(second.request_id > first.request_id);
    }
}

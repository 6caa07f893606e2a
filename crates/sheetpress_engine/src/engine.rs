use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use sheetpress_core::{ServiceReply, SubmissionRequest};
use sheetpress_logging::{press_debug, press_warn};
use tokio_util::sync::CancellationToken;

use crate::export::Exporter;
use crate::{ClientError, EngineEvent, FailureKind, ProcessingService};

enum EngineCommand {
    Submit(SubmissionRequest),
    Download { artifact_url: String },
    CopyText { text: String },
}

impl EngineCommand {
    fn cancelled_event(&self) -> EngineEvent {
        match self {
            EngineCommand::Submit(request) => EngineEvent::Settled {
                request_id: request.request_id,
                reply: ServiceReply::from(ClientError::new(FailureKind::Cancelled, "")),
            },
            EngineCommand::Download { .. } | EngineCommand::CopyText { .. } => {
                EngineEvent::ExportFailed {
                    message: FailureKind::Cancelled.to_string(),
                }
            }
        }
    }
}

/// Runs service requests and exports on a background tokio runtime and
/// reports back through [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    shutdown: CancellationToken,
}

impl EngineHandle {
    pub fn new(
        service: Arc<dyn ProcessingService>,
        exporter: Arc<Exporter>,
    ) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();
        let runtime = tokio::runtime::Runtime::new()?;

        let token = shutdown.clone();
        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let exporter = exporter.clone();
                let event_tx = event_tx.clone();
                let token = token.clone();
                runtime.spawn(async move {
                    let on_cancel = command.cancelled_event();
                    let work = handle_command(service.as_ref(), exporter.as_ref(), command);
                    let event = tokio::select! {
                        event = work => event,
                        _ = token.cancelled() => on_cancel,
                    };
                    let _ = event_tx.send(event);
                });
            }
            press_debug!("engine command channel closed");
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            shutdown,
        })
    }

    pub fn submit(&self, request: SubmissionRequest) {
        self.send(EngineCommand::Submit(request));
    }

    pub fn download(&self, artifact_url: impl Into<String>) {
        self.send(EngineCommand::Download {
            artifact_url: artifact_url.into(),
        });
    }

    pub fn copy_text(&self, text: impl Into<String>) {
        self.send(EngineCommand::CopyText { text: text.into() });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Abandons outstanding work; each abandoned command still reports once,
    /// as a cancellation.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            press_warn!("engine worker is gone; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_command(
    service: &dyn ProcessingService,
    exporter: &Exporter,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::Submit(request) => {
            let request_id = request.request_id;
            let result: Result<ServiceReply, ClientError> = service.process(&request).await;
            let reply = result.unwrap_or_else(|err| {
                press_warn!("request {} failed: {}", request_id, err);
                ServiceReply::from(err)
            });
            EngineEvent::Settled { request_id, reply }
        }
        EngineCommand::Download { artifact_url } => match exporter.download(&artifact_url).await {
            Ok(path) => EngineEvent::ExportCompleted {
                summary: format!("saved to {}", path.display()),
            },
            Err(err) => EngineEvent::ExportFailed {
                message: err.to_string(),
            },
        },
        EngineCommand::CopyText { text } => match exporter.copy_text(&text) {
            Ok(summary) => EngineEvent::ExportCompleted { summary },
            Err(err) => EngineEvent::ExportFailed {
                message: err.to_string(),
            },
        },
    }
}

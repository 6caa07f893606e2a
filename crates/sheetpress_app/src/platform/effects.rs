use std::time::Duration;

use sheetpress_core::{Effect, Msg};
use sheetpress_engine::{EngineEvent, EngineHandle};
use sheetpress_logging::{press_debug, press_info};

/// Hands effects to the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Dispatch(request) => {
                    press_info!(
                        "Dispatch request_id={} files={}",
                        request.request_id,
                        request.files.len()
                    );
                    self.engine.submit(request);
                }
                Effect::Download { artifact_url } => {
                    press_info!("Download url={}", artifact_url);
                    self.engine.download(artifact_url);
                }
                Effect::CopyText { text } => {
                    press_info!("CopyText chars={}", text.chars().count());
                    self.engine.copy_text(text);
                }
            }
        }
    }

    /// Waits up to `timeout` for the next engine event; `Msg::Tick` when none arrived.
    pub fn next_msg(&self, timeout: Duration) -> Msg {
        match self.engine.recv_timeout(timeout) {
            Some(event) => {
                press_debug!("engine event {:?}", event);
                map_event(event)
            }
            None => Msg::Tick,
        }
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Settled { request_id, reply } => Msg::SubmissionSettled { request_id, reply },
        EngineEvent::ExportCompleted { summary } => Msg::ExportFinished(Ok(summary)),
        EngineEvent::ExportFailed { message } => Msg::ExportFinished(Err(message)),
    }
}

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use sheetpress_core::{update, AppState, Effect, Msg, SubmissionStatus, ViewMode};
use sheetpress_engine::{
    EngineHandle, ExportSettings, Exporter, FileTarget, ReqwestService, StdoutTarget, TextTarget,
    UnavailableTarget,
};
use sheetpress_logging::{press_debug, press_warn};

use super::cli::Cli;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::{files, logging, ui};

const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if cli.clear_on_success {
        config.clear_batch_on_success = true;
    }
    logging::initialize(config.log_destination, cli.verbose);

    let service =
        ReqwestService::new(config.client_settings()).context("building HTTP client")?;
    let exporter = Exporter::new(
        ExportSettings {
            download_to: cli.out.clone(),
            max_bytes: config.max_bytes,
            ..ExportSettings::default()
        },
        text_target(cli.copy_to.as_deref()),
    )
    .context("building exporter")?;
    let engine = EngineHandle::new(Arc::new(service), Arc::new(exporter))
        .context("starting engine runtime")?;

    let mut session = Session::new(
        AppState::with_policy(config.batch_policy()),
        EffectRunner::new(engine),
    );

    let candidates = files::read_candidates(&cli.files)?;
    session.dispatch(Msg::FilesSelected(candidates));
    session.dispatch(Msg::FontSizeSelected(cli.font_size));
    session.dispatch(Msg::ColumnsSelected(cli.columns));
    session.dispatch(Msg::OrientationSelected(cli.orientation));
    session.dispatch(Msg::SubmitClicked);
    session.wait_until(|state| state.view().status != SubmissionStatus::Submitting);

    if session.state.view().status == SubmissionStatus::Succeeded {
        let requested = ViewMode::from(cli.view);
        session.dispatch(Msg::ViewModeSelected(requested));
        if session.state.viewer().mode() != requested {
            press_warn!("{:?} view is not offered for this result", requested);
        }
        if cli.export && session.dispatch(Msg::ExportClicked) {
            session.wait_until(|state| state.viewer().notice().is_some());
        }
    }

    session.runner.shutdown();
    let view = session.state.view();
    for line in ui::render::render(&view) {
        println!("{line}");
    }

    Ok(match view.status {
        SubmissionStatus::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

fn text_target(copy_to: Option<&str>) -> Box<dyn TextTarget> {
    match copy_to {
        Some("-") => Box::new(StdoutTarget),
        Some(path) => Box::new(FileTarget::new(path.into())),
        None => Box::new(UnavailableTarget),
    }
}

struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self { state, runner }
    }

    /// Applies `msg` and hands any effects to the engine. Returns whether
    /// effects were produced.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            for line in ui::render::render(&state.view()) {
                press_debug!("view: {}", line);
            }
        }
        self.state = state;
        let produced = !effects.is_empty();
        if effects.iter().any(|effect| matches!(effect, Effect::Dispatch(_))) {
            eprintln!("Processing...");
        }
        self.runner.enqueue(effects);
        produced
    }

    fn wait_until(&mut self, done: impl Fn(&AppState) -> bool) {
        while !done(&self.state) {
            let msg = self.runner.next_msg(POLL_INTERVAL);
            self.dispatch(msg);
        }
    }
}

mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod render;
mod repl;

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use assistant_core::{Msg, OperationKind, StatusTone};
use assistant_engine::{
    park_selection, EngineHandle, FileKeyValueStore, NotesStore, PendingSelection, ServiceClient,
};
use assistant_logging::assistant_info;
use clap::Parser;

use app::Panel;
use cli::{Cli, Command, NotesAction, ServiceAction};
use config::AppConfig;
use effects::{AutoConfirm, Confirm, EffectRunner, StdinConfirm};
use render::{render_result, status_line};

/// Slack on top of the dispatcher timeouts before the panel gives up waiting.
const ENGINE_GRACE: Duration = Duration::from_secs(5);

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli.global)?;
    logging::initialize(&config, cli.global.verbose);
    match AppConfig::source_path(&cli.global) {
        Some(path) => assistant_info!("Loaded config from {:?}", path),
        None => assistant_info!("No config file, using defaults"),
    }
    assistant_info!(
        "research-assistant v{} base_url={} data_dir={:?}",
        env!("CARGO_PKG_VERSION"),
        config.base_url,
        config.data_dir()
    );

    match cli.command {
        Command::Process { operation, text } => run_process(&config, operation, text),
        Command::Capture { operation, text } => run_capture(&config, operation, text),
        Command::Notes { action } => run_notes(&config, action),
        Command::Panel => {
            let mut panel = build_panel(&config, config.export_dir(), Box::new(StdinConfirm));
            repl::run(&mut panel)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Service { action } => run_service(&config, action),
    }
}

fn build_panel(
    config: &AppConfig,
    export_dir: PathBuf,
    confirmer: Box<dyn Confirm>,
) -> Panel<FileKeyValueStore> {
    let settings = config.dispatch_settings();
    let deadline = settings.connect_timeout + settings.request_timeout + ENGINE_GRACE;
    let engine = EngineHandle::new(settings);
    let notes = NotesStore::new(FileKeyValueStore::new(config.data_dir()));
    Panel::new(EffectRunner::new(engine, notes, export_dir, confirmer), deadline)
}

fn run_process(
    config: &AppConfig,
    operation: OperationKind,
    text: Option<String>,
) -> Result<ExitCode> {
    let selection = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read selection from stdin")?;
            buffer
        }
    };

    let mut panel = build_panel(config, config.export_dir(), Box::new(AutoConfirm(false)));
    panel.dispatch(Msg::OperationTriggered {
        operation,
        selection,
    });
    panel.wait_until_settled();

    let view = panel.state().view();
    match (view.status_tone, &view.result) {
        (StatusTone::Success, Some(result)) => {
            let mut out = io::stdout();
            writeln!(out, "{}", result.content)?;
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            let mut err = io::stderr();
            writeln!(err, "{}", status_line(&view))?;
            render_result(&mut err, &view)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_capture(config: &AppConfig, operation: OperationKind, text: String) -> Result<ExitCode> {
    let storage = FileKeyValueStore::new(config.data_dir());
    park_selection(&storage, &PendingSelection { text, operation })?;
    eprintln!(
        "Selection parked for {}; run `research-assistant panel` to process it.",
        operation.label()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_notes(config: &AppConfig, action: NotesAction) -> Result<ExitCode> {
    let export_dir = match &action {
        NotesAction::Export { dir: Some(dir) } => dir.clone(),
        _ => config.export_dir(),
    };
    let confirmer: Box<dyn Confirm> = if action == (NotesAction::Clear { yes: true }) {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(StdinConfirm)
    };
    let mut panel = build_panel(config, export_dir, confirmer);
    let loaded = panel.load_notes()?;

    let msg = match action {
        NotesAction::Show => {
            if loaded.notes.is_empty() {
                eprintln!("(no notes saved)");
            } else {
                println!("{}", loaded.notes);
            }
            return Ok(ExitCode::SUCCESS);
        }
        NotesAction::Save { text } => {
            panel.dispatch(Msg::NotesEdited(text));
            Msg::SaveClicked
        }
        NotesAction::Clear { .. } => Msg::ClearClicked,
        NotesAction::Export { .. } => Msg::ExportClicked,
    };
    panel.dispatch(msg);

    let view = panel.state().view();
    match view.status_tone {
        StatusTone::Error => {
            eprintln!("{}", status_line(&view));
            Ok(ExitCode::FAILURE)
        }
        StatusTone::Success => {
            eprintln!("{}", status_line(&view));
            Ok(ExitCode::SUCCESS)
        }
        StatusTone::Idle | StatusTone::Loading => {
            eprintln!("Notes left unchanged.");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_service(config: &AppConfig, action: ServiceAction) -> Result<ExitCode> {
    let client = ServiceClient::new(config.dispatch_settings());
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let mut out = io::stdout();

    let outcome = runtime.block_on(async {
        match action {
            ServiceAction::Health => client.health().await.map(|map| {
                map.into_iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect::<Vec<_>>()
            }),
            ServiceAction::History => client.history().await.map(|map| {
                map.into_iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect()
            }),
            ServiceAction::Stats => client.usage_stats().await.map(|map| {
                map.into_iter()
                    .map(|(operation, count)| format!("{operation}: {count}"))
                    .collect()
            }),
            ServiceAction::ClearHistory => client.clear_history().await.map(|ack| vec![ack]),
        }
    });

    match outcome {
        Ok(lines) => {
            for line in lines {
                writeln!(out, "{line}")?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("Error: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

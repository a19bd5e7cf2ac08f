//! partbench: replays a script of part operations against a JSON layout and
//! prints the lifecycle events as JSON lines.
//!
//! ```text
//! partbench <replay.json> [--config <config.json>] [--log-dir <dir>]
//! ```

use partbench::core::ContextView;
use partbench::models::LayoutSpec;
use partbench::part_service::{PartEventLog, PartState};
use partbench::services::adapters::{load_config, load_default_config, ScriptedSaveHandler};
use partbench::services::ports::{PartClient, Save, SaveError};
use partbench::PartService;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Deserialize)]
struct ReplayFile {
    #[serde(flatten)]
    layout: LayoutSpec,
    #[serde(default)]
    decisions: Vec<Save>,
    #[serde(default)]
    script: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    Show { id: String, state: PartState },
    Activate { id: String },
    Deactivate { id: String },
    BringToTop { id: String },
    Hide { id: String },
    SavePart { id: String, #[serde(default)] confirm: bool },
    SaveAll { #[serde(default)] confirm: bool },
}

/// Stand-in save target: succeeds and logs.
struct ReplayClient {
    id: String,
}

impl PartClient for ReplayClient {
    fn do_save(&mut self, context: ContextView<'_>) -> Result<(), SaveError> {
        tracing::info!(part = %self.id, context = ?context.name(), "replay save");
        Ok(())
    }
}

struct Args {
    replay: PathBuf,
    config: Option<PathBuf>,
    log_dir: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut replay = None;
    let mut config = None;
    let mut log_dir = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(args.next().ok_or("--config needs a path")?.into()),
            "--log-dir" => log_dir = Some(args.next().ok_or("--log-dir needs a path")?.into()),
            _ if replay.is_none() => replay = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument `{arg}`")),
        }
    }
    Ok(Args {
        replay: replay.ok_or("missing replay file")?,
        config,
        log_dir,
    })
}

fn run(args: Args) -> Result<(), String> {
    let text = std::fs::read_to_string(&args.replay)
        .map_err(|e| format!("cannot read {}: {e}", args.replay.display()))?;
    let replay: ReplayFile = serde_json::from_str(&text).map_err(|e| e.to_string())?;
    let built = replay.layout.build().map_err(|e| e.to_string())?;

    let config = match &args.config {
        Some(path) => load_config(path).map_err(|e| e.to_string())?,
        None => load_default_config(),
    };

    let handler = ScriptedSaveHandler::new(Save::Yes);
    handler.push(replay.decisions.iter().copied());

    let mut service = PartService::builder(built.application)
        .root(built.root)
        .config(config)
        .save_handler(handler)
        .build();

    service.update(|app| {
        let parts: Vec<_> = app
            .model
            .descendants(built.root)
            .into_iter()
            .filter(|&e| app.model.is_part(e))
            .collect();
        for part in parts {
            let id = app.model.element_id(part).unwrap_or_default().to_string();
            app.model.set_client(part, Box::new(ReplayClient { id }));
        }
    });

    let log = PartEventLog::new();
    service.add_part_listener(log.clone());

    for step in replay.script {
        tracing::debug!(step = ?step, "replay step");
        let outcome = match step {
            Step::Show { id, state } => service.show_part_by_id(&id, state).map(|_| ()),
            Step::Activate { id } => service.find_part(&id).map(|p| service.activate(p)),
            Step::Deactivate { id } => service.find_part(&id).map(|p| service.deactivate(p)),
            Step::BringToTop { id } => service.find_part(&id).map(|p| service.bring_to_top(p)),
            Step::Hide { id } => service.find_part(&id).map(|p| service.hide_part(p)),
            Step::SavePart { id, confirm } => {
                let saved = service
                    .find_part(&id)
                    .is_some_and(|p| service.save_part(p, confirm));
                println!("{}", serde_json::json!({ "save_part": id, "ok": saved }));
                Some(())
            }
            Step::SaveAll { confirm } => {
                let saved = service.save_all(confirm);
                println!("{}", serde_json::json!({ "save_all": saved }));
                Some(())
            }
        };
        if outcome.is_none() {
            tracing::warn!("replay step skipped: part not found");
        }

        for event in log.take() {
            let part = service
                .model()
                .element_id(event.part())
                .unwrap_or_default()
                .to_string();
            println!(
                "{}",
                serde_json::json!({ "event": event.name(), "part": part })
            );
        }
    }

    service.pre_destroy();
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("partbench: {message}");
            eprintln!("usage: partbench <replay.json> [--config <config.json>] [--log-dir <dir>]");
            return ExitCode::from(2);
        }
    };
    let _logging = partbench::logging::init(None, args.log_dir.as_deref());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!(error = %message, "replay failed");
            eprintln!("partbench: {message}");
            ExitCode::FAILURE
        }
    }
}

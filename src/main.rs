mod host;
mod runner;

use clap::Parser;
use host::{ConsolePane, ProjectHost, ProjectRef, UiThread};
use runner::{RunOutcome, RunnerConfig, StartupScriptRunner};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::signal;
use tracing::{error, info, Level};
use tracing_subscriber::fmt;

const PANE_NAME: &str = "RunOnStart";

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "runonstart")]
#[command(about = "Run a project's run-on-startup.ps1 whenever the project is opened")]
struct Args {
    /// Project file or directory that is already open
    #[arg(short, long)]
    project: Option<PathBuf>,

    /// TOML config file with a [runner] table
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep reading opened project paths from stdin, one per line
    #[arg(short, long)]
    watch: bool,

    /// Print each run outcome as a JSON line on stdout; the pane moves to stderr
    #[arg(long)]
    json: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr; stdout is the output pane (or the JSON stream)
    fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting runonstart...");

    let runner_config = match &args.config {
        Some(path) => RunnerConfig::from_toml_file(path)?,
        None => RunnerConfig::from_env(),
    };

    info!(
        interpreter = %runner_config.interpreter,
        args = ?runner_config.interpreter_args,
        "Configuration loaded"
    );

    // With --json, stdout carries only outcome lines and the pane moves to stderr
    let pane: Box<dyn runner::ReportSink> = if args.json {
        Box::new(ConsolePane::stderr(PANE_NAME))
    } else {
        Box::new(ConsolePane::stdout(PANE_NAME))
    };
    let (ui, ui_task) = UiThread::spawn(pane);
    let host = ProjectHost::new(StartupScriptRunner::new(runner_config), Arc::new(ui));

    let json = args.json;
    if let Some(outcome) = host.initialize(args.project.map(ProjectRef::Path)).await? {
        report(&outcome, json);
    }

    if args.watch {
        info!("Watching stdin for opened projects...");

        host::watch_projects(
            &host,
            BufReader::new(tokio::io::stdin()),
            async {
                signal::ctrl_c().await.ok();
            },
            |outcome| report(outcome, json),
        )
        .await;
    }

    // Last sink handle goes with the host; the ui task then drains and exits
    drop(host);
    ui_task.await?;

    info!("Goodbye!");
    Ok(())
}

fn report(outcome: &RunOutcome, json: bool) {
    if json {
        if let Err(e) = host::write_json_line(&mut std::io::stdout().lock(), outcome) {
            error!(error = %e, "failed to write outcome");
        }
        return;
    }

    match outcome {
        RunOutcome::NotApplicable { script_path } => {
            info!(script = %script_path.display(), "no startup script")
        }
        RunOutcome::Completed { exit_code, .. } => {
            info!(exit_code = *exit_code, "startup script completed")
        }
        RunOutcome::LaunchFailed { error_message } => {
            error!(error = %error_message, "startup script could not run")
        }
    }
}

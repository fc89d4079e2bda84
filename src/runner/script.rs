// Startup script runner
#![allow(dead_code)]

use crate::runner::config::RunnerConfig;
use crate::runner::error::{Result, RunnerError};
use crate::runner::sink::ReportSink;
use crate::runner::types::{RunOutcome, RunRequest};
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Everything read back from a finished script process
#[derive(Debug)]
struct CapturedOutput {
    stdout: String,
    stderr: String,
    exit_code: i32,
}

/// Runs `run-on-startup.ps1` from a project root and reports to a sink.
///
/// Stateless between calls: every `run` resolves, spawns and reports on its
/// own, so one runner can be shared by any number of triggers.
#[derive(Debug, Clone, Default)]
pub struct StartupScriptRunner {
    config: RunnerConfig,
}

impl StartupScriptRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Check `request`'s root for the startup script and run it if present.
    ///
    /// Never fails: launch and read errors are written to `sink` and returned
    /// as [`RunOutcome::LaunchFailed`]. The sink is activated exactly once,
    /// after the last line of the run.
    pub async fn run(&self, request: &RunRequest, sink: &dyn ReportSink) -> RunOutcome {
        let script_path = request.script_path();

        let outcome = if !script_path.is_file() {
            debug!(
                run_id = %request.id,
                script = %script_path.display(),
                "no startup script"
            );
            sink.write_line(&format!(
                "No startup file found. Looked for '{}'",
                script_path.display()
            ))
            .await;
            RunOutcome::NotApplicable { script_path }
        } else {
            sink.write_line(&format!("Running '{}'", script_path.display()))
                .await;

            match self.execute(request, &script_path).await {
                Ok(CapturedOutput {
                    stdout,
                    stderr,
                    exit_code,
                }) => {
                    sink.write_line(&stdout).await;
                    sink.write_line(&stderr).await;
                    sink.write_line(&format!("ExitCode: {exit_code}")).await;
                    RunOutcome::Completed {
                        stdout,
                        stderr,
                        exit_code,
                    }
                }
                Err(e) => {
                    warn!(run_id = %request.id, error = %e, "startup script failed to run");
                    let error_message = e.to_string();
                    sink.write_line("Error running startup script.").await;
                    sink.write_line(&error_message).await;
                    RunOutcome::LaunchFailed { error_message }
                }
            }
        };

        sink.activate().await;
        outcome
    }

    async fn execute(&self, request: &RunRequest, script_path: &Path) -> Result<CapturedOutput> {
        let start = Instant::now();

        debug!(
            run_id = %request.id,
            interpreter = %self.config.interpreter,
            script = %script_path.display(),
            "spawning startup script"
        );

        let mut command = Command::new(&self.config.interpreter);
        command
            .args(&self.config.interpreter_args)
            .arg(script_path)
            .current_dir(request.root())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);

        let mut child = command
            .spawn()
            .map_err(|e| RunnerError::Spawn(self.config.interpreter.clone(), e))?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or(RunnerError::MissingPipe("output"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or(RunnerError::MissingPipe("error"))?;

        // Both pipes drain together; a full stderr buffer must not stall stdout
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();
        futures::try_join!(
            stdout.read_to_end(&mut stdout_buf),
            stderr.read_to_end(&mut stderr_buf)
        )?;

        let status = child.wait().await?;
        let exit_code = status.code().unwrap_or(-1);

        info!(
            run_id = %request.id,
            script = %script_path.display(),
            duration_ms = start.elapsed().as_millis() as u64,
            exit_code = exit_code,
            stdout_bytes = stdout_buf.len(),
            stderr_bytes = stderr_buf.len(),
            "startup script finished"
        );

        Ok(CapturedOutput {
            stdout: String::from_utf8_lossy(&stdout_buf).into_owned(),
            stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
            exit_code,
        })
    }
}

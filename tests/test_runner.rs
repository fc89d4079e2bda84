// Integration tests for Runner module
// This file should be run with cargo test --test test_runner
// Scripts are executed with /bin/sh so the tests do not need PowerShell

#[path = "../src/runner/mod.rs"]
mod runner;

use async_trait::async_trait;
use runner::{ReportSink, RunOutcome, RunRequest, RunnerConfig, SCRIPT_FILE_NAME, StartupScriptRunner};
use std::sync::{Arc, Mutex};

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SinkEvent {
    Line(String),
    Activate,
}

/// Sink that records every call in order
#[derive(Clone, Default)]
struct RecordingSink {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportSink for RecordingSink {
    async fn write_line(&self, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Line(text.to_string()));
    }

    async fn activate(&self) {
        self.events.lock().unwrap().push(SinkEvent::Activate);
    }
}

fn line(text: impl Into<String>) -> SinkEvent {
    SinkEvent::Line(text.into())
}

#[cfg(unix)]
fn sh_runner() -> StartupScriptRunner {
    StartupScriptRunner::new(RunnerConfig {
        interpreter: "/bin/sh".to_string(),
        interpreter_args: Vec::new(),
    })
}

#[cfg(unix)]
fn write_script(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
    let path = dir.join(SCRIPT_FILE_NAME);
    std::fs::write(&path, body).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test directory without a startup script
    #[tokio::test]
    async fn test_script_not_found() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let sink = RecordingSink::default();
        let request = RunRequest::new(dir.path());

        let outcome = StartupScriptRunner::default().run(&request, &sink).await;

        let expected_path = dir.path().join(SCRIPT_FILE_NAME);
        assert_eq!(
            outcome,
            RunOutcome::NotApplicable {
                script_path: expected_path.clone()
            }
        );
        assert_eq!(
            sink.events(),
            vec![
                line(format!(
                    "No startup file found. Looked for '{}'",
                    expected_path.display()
                )),
                SinkEvent::Activate,
            ]
        );
    }

    /// Test successful script with output on stdout only
    #[cfg(unix)]
    #[tokio::test]
    async fn test_script_hello() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "echo hello\n");
        let sink = RecordingSink::default();

        let outcome = sh_runner().run(&RunRequest::new(dir.path()), &sink).await;

        assert_eq!(
            outcome,
            RunOutcome::Completed {
                stdout: "hello\n".to_string(),
                stderr: String::new(),
                exit_code: 0,
            }
        );
        assert_eq!(
            sink.events(),
            vec![
                line(format!("Running '{}'", script.display())),
                line("hello\n"),
                line(""),
                line("ExitCode: 0"),
                SinkEvent::Activate,
            ]
        );
    }

    /// Test non-zero exit code is still a completed run
    #[cfg(unix)]
    #[tokio::test]
    async fn test_script_exit_code() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        write_script(dir.path(), "echo failing >&2\nexit 1\n");
        let sink = RecordingSink::default();

        let outcome = sh_runner().run(&RunRequest::new(dir.path()), &sink).await;

        assert!(outcome.is_completed());
        assert_eq!(outcome.exit_code(), Some(1));

        let events = sink.events();
        assert_eq!(events.len(), 5);
        assert_eq!(events[2], line("failing\n"));
        assert_eq!(events[3], line("ExitCode: 1"));
        assert_eq!(events[4], SinkEvent::Activate);
    }

    /// Test missing interpreter is reported, not propagated
    #[cfg(unix)]
    #[tokio::test]
    async fn test_interpreter_missing() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "echo never\n");
        let sink = RecordingSink::default();
        let runner = StartupScriptRunner::new(RunnerConfig {
            interpreter: "/nonexistent/interpreter-for-runonstart".to_string(),
            interpreter_args: vec!["-File".to_string()],
        });

        let outcome = runner.run(&RunRequest::new(dir.path()), &sink).await;

        let error_message = match &outcome {
            RunOutcome::LaunchFailed { error_message } => error_message.clone(),
            other => panic!("expected LaunchFailed, got {other:?}"),
        };
        assert!(error_message.contains("/nonexistent/interpreter-for-runonstart"));

        assert_eq!(
            sink.events(),
            vec![
                line(format!("Running '{}'", script.display())),
                line("Error running startup script."),
                line(error_message),
                SinkEvent::Activate,
            ]
        );
    }

    /// Test the script runs inside the project root
    #[cfg(unix)]
    #[tokio::test]
    async fn test_working_directory_is_root() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        write_script(dir.path(), "pwd -P\n");
        let sink = RecordingSink::default();

        let outcome = sh_runner().run(&RunRequest::new(dir.path()), &sink).await;

        let expected = format!("{}\n", dir.path().canonicalize().unwrap().display());
        match outcome {
            RunOutcome::Completed { stdout, .. } => assert_eq!(stdout, expected),
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    /// Test both streams are drained when stderr exceeds the pipe buffer
    #[cfg(unix)]
    #[tokio::test]
    async fn test_large_stderr_does_not_block() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        write_script(
            dir.path(),
            "i=0\nwhile [ $i -lt 5000 ]; do echo \"error line $i\" >&2; i=$((i+1)); done\necho done\n",
        );
        let sink = RecordingSink::default();

        let outcome = tokio::time::timeout(
            std::time::Duration::from_secs(30),
            sh_runner().run(&RunRequest::new(dir.path()), &sink),
        )
        .await
        .expect("run should not deadlock");

        match outcome {
            RunOutcome::Completed {
                stdout,
                stderr,
                exit_code,
            } => {
                assert_eq!(stdout, "done\n");
                assert_eq!(stderr.lines().count(), 5000);
                assert_eq!(exit_code, 0);
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    /// Test interpreter arguments come before the script path
    #[cfg(unix)]
    #[tokio::test]
    async fn test_interpreter_args_precede_script() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        write_script(dir.path(), "false\necho unreachable\n");
        let sink = RecordingSink::default();
        let runner = StartupScriptRunner::new(RunnerConfig {
            interpreter: "/bin/sh".to_string(),
            interpreter_args: vec!["-e".to_string()],
        });

        let outcome = runner.run(&RunRequest::new(dir.path()), &sink).await;

        assert_eq!(
            outcome,
            RunOutcome::Completed {
                stdout: String::new(),
                stderr: String::new(),
                exit_code: 1,
            }
        );
    }

    /// Test a root that is not a directory finds nothing
    #[tokio::test]
    async fn test_root_not_a_directory() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("App.sln");
        std::fs::write(&file, "").unwrap();
        let sink = RecordingSink::default();

        let outcome = StartupScriptRunner::default().run(&RunRequest::new(&file), &sink).await;

        assert!(matches!(outcome, RunOutcome::NotApplicable { .. }));
        assert_eq!(sink.events().last(), Some(&SinkEvent::Activate));
    }

    /// Test repeated runs of a side-effect free script agree
    #[cfg(unix)]
    #[tokio::test]
    async fn test_repeat_run_same_outcome() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        write_script(dir.path(), "echo stable\necho warn >&2\nexit 3\n");
        let runner = sh_runner();

        let first = runner
            .run(&RunRequest::new(dir.path()), &RecordingSink::default())
            .await;
        let second = runner
            .run(&RunRequest::new(dir.path()), &RecordingSink::default())
            .await;

        assert_eq!(first, second);
        assert_eq!(first.exit_code(), Some(3));
    }

    /// Test outcome JSON carries a status tag
    #[test]
    fn test_outcome_json() {
        let outcome = RunOutcome::Completed {
            stdout: "hello\n".to_string(),
            stderr: String::new(),
            exit_code: 0,
        };

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "completed");
        assert_eq!(value["exit_code"], 0);

        let failed = serde_json::to_value(RunOutcome::LaunchFailed {
            error_message: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(failed["status"], "launch_failed");
    }
}

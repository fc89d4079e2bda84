// Project lifecycle adapter
#![allow(dead_code)]

use crate::host::error::HostError;
use crate::host::types::{ProjectRef, resolve_root};
use crate::runner::{ReportSink, RunOutcome, RunRequest, StartupScriptRunner};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Wires host "project opened" notifications to the startup script runner
pub struct ProjectHost {
    runner: StartupScriptRunner,
    sink: Arc<dyn ReportSink>,
    /// Set once the host has been hooked up to project events
    subscribed: AtomicBool,
    /// Held for a whole trigger so output of overlapping runs never interleaves
    run_lock: Mutex<()>,
}

impl ProjectHost {
    pub fn new(runner: StartupScriptRunner, sink: Arc<dyn ReportSink>) -> Arc<Self> {
        Arc::new(Self {
            runner,
            sink,
            subscribed: AtomicBool::new(false),
            run_lock: Mutex::new(()),
        })
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::SeqCst)
    }

    /// Write the banner, handle a project that was open before the host
    /// loaded, and mark the host subscribed for later events.
    pub async fn initialize(
        &self,
        already_open: Option<ProjectRef>,
    ) -> Result<Option<RunOutcome>, HostError> {
        if self.subscribed.swap(true, Ordering::SeqCst) {
            return Err(HostError::AlreadySubscribed);
        }

        self.sink
            .write_line(&format!(
                "{} v{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .await;

        let outcome = match already_open {
            Some(project) => {
                info!(project = ?project, "project already open at startup");
                self.on_project_opened(project).await
            }
            None => None,
        };

        Ok(outcome)
    }

    /// Handle one "project opened" notification.
    ///
    /// Returns `None` when no root directory could be resolved; the reason
    /// has then been written to the sink.
    pub async fn on_project_opened(&self, project: ProjectRef) -> Option<RunOutcome> {
        let _guard = self.run_lock.lock().await;

        match resolve_root(&project) {
            Ok(root) => {
                let request = RunRequest::new(root);
                debug!(run_id = %request.id, root = %request.root().display(), "project opened");
                Some(self.runner.run(&request, self.sink.as_ref()).await)
            }
            Err(e) => {
                warn!(project = ?project, reason = %e, "cannot resolve project root");
                self.sink.write_line(&e.to_string()).await;
                self.sink.activate().await;
                None
            }
        }
    }

    /// Dispatch a notification without waiting for it
    pub fn spawn_open(self: &Arc<Self>, project: ProjectRef) -> JoinHandle<Option<RunOutcome>> {
        let host = Arc::clone(self);
        tokio::spawn(async move { host.on_project_opened(project).await })
    }
}

// UI-affinity dispatch for sink calls

use crate::runner::ReportSink;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Sink operation marshalled onto the UI task
#[derive(Debug)]
enum UiCommand {
    WriteLine {
        text: String,
        done: oneshot::Sender<()>,
    },
    Activate {
        done: oneshot::Sender<()>,
    },
}

/// Single task that owns the real sink.
///
/// Every sink call from any worker runs here, one at a time, in the order
/// the calls were submitted.
pub struct UiThread;

impl UiThread {
    /// Move `sink` onto its own task and return a handle for worker code
    pub fn spawn(sink: Box<dyn ReportSink>) -> (UiHandle, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<UiCommand>(256);

        let handle = tokio::spawn(async move {
            debug!("ui task started");
            while let Some(cmd) = rx.recv().await {
                match cmd {
                    UiCommand::WriteLine { text, done } => {
                        sink.write_line(&text).await;
                        let _ = done.send(());
                    }
                    UiCommand::Activate { done } => {
                        sink.activate().await;
                        let _ = done.send(());
                    }
                }
            }
            debug!("ui task stopped");
        });

        (UiHandle { sender: tx }, handle)
    }
}

/// Cloneable sink that forwards to the UI task and waits for the call to land
#[derive(Debug, Clone)]
pub struct UiHandle {
    sender: mpsc::Sender<UiCommand>,
}

impl UiHandle {
    async fn dispatch(&self, cmd: UiCommand, done: oneshot::Receiver<()>) {
        if self.sender.send(cmd).await.is_err() {
            warn!("ui task closed, dropping sink call");
            return;
        }
        let _ = done.await;
    }
}

#[async_trait]
impl ReportSink for UiHandle {
    async fn write_line(&self, text: &str) {
        let (done, rx) = oneshot::channel();
        let cmd = UiCommand::WriteLine {
            text: text.to_string(),
            done,
        };
        self.dispatch(cmd, rx).await;
    }

    async fn activate(&self) {
        let (done, rx) = oneshot::channel();
        self.dispatch(UiCommand::Activate { done }, rx).await;
    }
}

// Report sink trait

use async_trait::async_trait;

/// Destination for human-readable progress of a run.
///
/// Owned by the caller. Implementations must tolerate being called from the
/// runner's task; marshalling onto a UI-affine thread is the sink's concern.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Append one logical line
    async fn write_line(&self, text: &str);

    /// Bring the sink into view
    async fn activate(&self);
}

// Stream of "project opened" notifications

use crate::host::project::ProjectHost;
use crate::host::types::ProjectRef;
use crate::runner::RunOutcome;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, info};

/// Treat each line of `reader` as an opened project path until the input
/// ends or `shutdown` resolves, then wait for every started run.
///
/// Lines are decoded lossily; a bad line or a read error never cuts short
/// a run that is already in flight.
pub async fn watch_projects<R, S, F>(
    host: &Arc<ProjectHost>,
    mut reader: R,
    shutdown: S,
    mut on_outcome: F,
) where
    R: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
    F: FnMut(&RunOutcome),
{
    tokio::pin!(shutdown);

    // Kept across iterations: read_until appends partial reads on cancel
    let mut buf = Vec::new();
    let mut runs = FuturesUnordered::new();

    loop {
        tokio::select! {
            read = reader.read_until(b'\n', &mut buf) => {
                match read {
                    Ok(0) => {
                        info!("input closed");
                        break;
                    }
                    Ok(_) => {
                        let line = String::from_utf8_lossy(&buf).trim().to_string();
                        buf.clear();
                        debug!(line = %line, "project opened notification");
                        runs.push(host.spawn_open(ProjectRef::path(line)));
                    }
                    Err(e) => {
                        error!(error = %e, "failed to read project notifications");
                        break;
                    }
                }
            }
            Some(joined) = runs.next(), if !runs.is_empty() => {
                match joined {
                    Ok(Some(outcome)) => on_outcome(&outcome),
                    Ok(None) => {}
                    Err(e) => error!(error = %e, "startup run task failed"),
                }
            }
            _ = &mut shutdown => {
                info!("Received shutdown signal");
                break;
            }
        }
    }

    // Runs cannot be cancelled once started; let them finish reporting
    while let Some(joined) = runs.next().await {
        match joined {
            Ok(Some(outcome)) => on_outcome(&outcome),
            Ok(None) => {}
            Err(e) => error!(error = %e, "startup run task failed"),
        }
    }
}

/// One outcome as a single JSON line
pub fn write_json_line<W: Write>(writer: &mut W, outcome: &RunOutcome) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, outcome)?;
    writeln!(writer)?;
    writer.flush()
}

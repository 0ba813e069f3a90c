//! Stream adapter running the follow loop on a background task.

use crate::config::FollowConfig;
use crate::error::Result;
use crate::sink::ChannelSink;
use crate::tail::Tail;
use futures::Stream;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::warn;

/// A stream of lines from a followed file: first the last lines, then every
/// appended line.
pub struct TailStream {
    receiver: mpsc::UnboundedReceiver<Result<String>>,
    _shutdown_tx: broadcast::Sender<()>,
    _task_handle: JoinHandle<()>,
}

impl TailStream {
    /// Validates `path` and starts following it.
    ///
    /// Validation runs synchronously on the calling thread and its failures
    /// are returned here rather than through the stream. It only inspects
    /// metadata, so it does not block on special files. Must be called from
    /// within a Tokio runtime.
    pub fn new<P: AsRef<Path>>(path: P, config: FollowConfig) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let tail = Tail::new(path)?.with_sink(ChannelSink::new(tx.clone()));
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let task_handle = tokio::spawn(follow_task(tail, config, tx, shutdown_rx));

        Ok(TailStream {
            receiver: rx,
            _shutdown_tx: shutdown_tx,
            _task_handle: task_handle,
        })
    }

    /// Check if the stream has been closed/dropped
    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.receiver.is_closed()
    }
}

impl Drop for TailStream {
    fn drop(&mut self) {
        // Ignore errors if the task has already finished
        let _ = self._shutdown_tx.send(());
    }
}

/// Background task that follows the file and forwards failures to the stream
async fn follow_task(
    tail: Tail,
    config: FollowConfig,
    tx: mpsc::UnboundedSender<Result<String>>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let path = tail.path().to_path_buf();
    let shutdown = async move {
        let _ = shutdown_rx.recv().await;
    };

    if let Err(e) = tail.follow_until(&config, shutdown).await {
        warn!(path = %path.display(), error = %e, "follow task stopped");
        let _ = tx.send(Err(e));
    }
}

impl Stream for TailStream {
    type Item = Result<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_recv(cx)
    }
}

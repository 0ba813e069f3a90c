//! The tail reader: emits the last lines of a file, then follows appends.

use crate::config::FollowConfig;
use crate::error::Result;
use crate::reader::{last_lines, read_complete_line};
use crate::sink::{LineSink, StdoutSink};
use crate::validate::validate_path;
use std::future::Future;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, BufReader};
use tracing::{debug, trace};

/// A validated file ready to be followed.
pub struct Tail {
    path: PathBuf,
    sink: Box<dyn LineSink>,
}

impl std::fmt::Debug for Tail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tail").field("path", &self.path).finish()
    }
}

impl Tail {
    /// Validates `path` and creates a reader that writes lines to stdout.
    ///
    /// Fails with [`crate::ValidationError`] when the path does not exist, is
    /// not readable or is a directory. No handle is kept open.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        validate_path(&path)?;

        Ok(Self {
            path,
            sink: Box::new(StdoutSink),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the current sink.
    pub fn register_sink<S: LineSink + 'static>(&mut self, sink: S) {
        self.sink = Box::new(sink);
    }

    pub fn with_sink<S: LineSink + 'static>(mut self, sink: S) -> Self {
        self.register_sink(sink);
        self
    }

    /// Opens the file and emits its last `config.initial_lines` lines.
    ///
    /// The returned session owns the handle; follow it with
    /// [`TailSession::run`] or [`TailSession::run_until`].
    pub async fn start(self, config: &FollowConfig) -> Result<TailSession> {
        let mut file = File::open(&self.path).await?;
        let file_length = file.seek(SeekFrom::End(0)).await?;

        let scan = last_lines(&mut file, file_length, config.initial_lines, config.delimiter).await?;
        debug!(
            path = %self.path.display(),
            file_length,
            lines = scan.lines.len(),
            window = scan.window,
            attempts = scan.attempts,
            "tail session started"
        );

        let mut sink = self.sink;
        for line in &scan.lines {
            sink.emit(line)?;
        }

        Ok(TailSession {
            path: self.path,
            file,
            cursor: scan.end,
            file_length,
            sink,
            delimiter: config.delimiter,
            poll_interval: config.poll_interval,
        })
    }

    /// Emits the last lines, then follows the file until an error occurs.
    pub async fn follow(self, config: &FollowConfig) -> Result<()> {
        self.start(config).await?.run().await
    }

    /// Like [`Tail::follow`], returning cleanly once `shutdown` completes.
    pub async fn follow_until<F>(self, config: &FollowConfig, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        self.start(config).await?.run_until(shutdown).await
    }
}

/// A live follow operation.
///
/// The cursor only moves forward, past lines already handed to the sink. The
/// file handle is closed when the session is dropped.
pub struct TailSession {
    path: PathBuf,
    file: File,
    cursor: u64,
    file_length: u64,
    sink: Box<dyn LineSink>,
    delimiter: u8,
    poll_interval: Duration,
}

impl std::fmt::Debug for TailSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TailSession")
            .field("path", &self.path)
            .field("cursor", &self.cursor)
            .field("file_length", &self.file_length)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl TailSession {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Offset up to which content has been delivered.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// File length observed when the session started.
    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    /// Emits every complete line appended past the cursor.
    ///
    /// Returns the number of lines emitted. An unterminated fragment at the
    /// end of the file is left in place until its delimiter arrives.
    pub async fn poll_once(&mut self) -> Result<usize> {
        let start = self.cursor;
        self.file.seek(SeekFrom::Start(start)).await?;
        let mut reader = BufReader::new(&mut self.file);

        let mut emitted = 0;
        while let Some((line, len)) = read_complete_line(&mut reader, self.delimiter).await? {
            self.sink.emit(&line)?;
            self.cursor += len;
            emitted += 1;
        }

        trace!(start, cursor = self.cursor, emitted, "poll");
        Ok(emitted)
    }

    /// Follows the file until an I/O, decoding or sink error occurs.
    pub async fn run(&mut self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Follows the file until `shutdown` completes or an error occurs.
    ///
    /// `shutdown` is checked before every poll and while waiting between
    /// polls.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let emitted = tokio::select! {
                biased;
                _ = &mut shutdown => break,
                emitted = self.poll_once() => emitted?,
            };

            if emitted == 0 {
                tokio::select! {
                    biased;
                    _ = &mut shutdown => break,
                    _ = tokio::time::sleep(self.poll_interval) => {}
                }
            }
        }

        debug!(path = %self.path.display(), cursor = self.cursor, "tail session stopped");
        Ok(())
    }
}

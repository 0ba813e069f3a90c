//! A library that follows a growing file the way `tail -f` does.
//!
//! Following starts by emitting the file's last lines, found by reading
//! backwards from the end in a widening window rather than scanning the whole
//! file. After that the file is polled for newly appended lines. Lines are
//! handed to a [`LineSink`] with their delimiter; a line is only emitted once
//! its delimiter has been written.
//!
//! # Example
//!
//! ```rust,no_run
//! use tail_follow::{FollowConfig, Tail};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tail = Tail::new("app.log")?.with_sink(|line: &str| print!("> {}", line));
//!
//!     tail.follow_until(&FollowConfig::default(), async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

// Internal modules - not part of public API
mod config;
mod error;
mod reader;
mod sink;
mod stream;
mod tail;
mod validate;

#[cfg(test)]
mod test_helpers;

// Public API exports
pub use config::{DEFAULT_DELIMITER, DEFAULT_INITIAL_LINES, DEFAULT_POLL_INTERVAL, FollowConfig};
pub use error::{Error, Result, ValidationError};
pub use reader::{DEFAULT_BYTES_PER_LINE, LastLines, last_lines};
pub use sink::{ChannelSink, LineSink, StdoutSink, WriterSink};
pub use stream::TailStream;
pub use tail::{Tail, TailSession};

use std::path::Path;
use tokio_stream::Stream;

/// Creates a stream that yields the last lines of a file, then every line
/// appended to it.
///
/// # Arguments
///
/// * `path` - File path to follow
/// * `config` - Follow options (defaults to 10 initial lines, 1s poll interval)
///
/// # Example
///
/// ```rust,no_run
/// use tail_follow::tail_file;
/// use tokio_stream::StreamExt;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut stream = tail_file("app.log", None).await?;
///
///     while let Some(line) = stream.next().await {
///         print!("{}", line?);
///     }
///
///     Ok(())
/// }
/// ```
pub async fn tail_file<P: AsRef<Path>>(
    path: P,
    config: Option<FollowConfig>,
) -> Result<impl Stream<Item = Result<String>>> {
    TailStream::new(path, config.unwrap_or_default())
}

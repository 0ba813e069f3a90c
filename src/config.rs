//! Options for a follow operation.

use std::time::Duration;

/// Number of trailing lines emitted before following starts.
pub const DEFAULT_INITIAL_LINES: usize = 10;

/// Time to wait between poll attempts that found no new line.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Byte terminating each line.
pub const DEFAULT_DELIMITER: u8 = b'\n';

/// Settings consulted when a follow operation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowConfig {
    /// How many of the file's last lines to emit before following.
    pub initial_lines: usize,
    /// Suspension between unsuccessful polls.
    pub poll_interval: Duration,
    /// Line delimiter; emitted lines keep it.
    pub delimiter: u8,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            initial_lines: DEFAULT_INITIAL_LINES,
            poll_interval: DEFAULT_POLL_INTERVAL,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl FollowConfig {
    pub fn with_initial_lines(mut self, initial_lines: usize) -> Self {
        self.initial_lines = initial_lines;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

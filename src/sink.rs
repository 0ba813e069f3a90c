//! Consumers of emitted lines.

use crate::error::{Error, Result};
use std::io::Write;
use tokio::sync::mpsc;

/// Receives each emitted line, delimiter included, in file order.
///
/// Sinks are invoked inline by the follow loop: a slow sink delays the next
/// poll.
pub trait LineSink: Send {
    fn emit(&mut self, line: &str) -> Result<()>;
}

impl<F> LineSink for F
where
    F: FnMut(&str) + Send,
{
    fn emit(&mut self, line: &str) -> Result<()> {
        self(line);
        Ok(())
    }
}

/// Writes lines verbatim to the process's standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn emit(&mut self, line: &str) -> Result<()> {
        write_verbatim(&mut std::io::stdout().lock(), line)
    }
}

/// Writes lines verbatim to any writer, flushing after each line.
#[derive(Debug, Default)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> LineSink for WriterSink<W> {
    fn emit(&mut self, line: &str) -> Result<()> {
        write_verbatim(&mut self.writer, line)
    }
}

fn write_verbatim<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Forwards lines into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Result<String>>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<Result<String>>) -> Self {
        Self { tx }
    }
}

impl LineSink for ChannelSink {
    fn emit(&mut self, line: &str) -> Result<()> {
        self.tx
            .send(Ok(line.to_string()))
            .map_err(|_| Error::StreamClosed)
    }
}

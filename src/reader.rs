//! Line discovery: the backward scan for the last lines of a file and the
//! forward read of newly appended lines.

use crate::error::Result;
use std::io::SeekFrom;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};
use tracing::debug;

/// Starting guess for the size of one line when sizing the scan window.
pub const DEFAULT_BYTES_PER_LINE: u64 = 100;

/// Result of a backward scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastLines {
    /// The last lines, oldest first, each ending with the delimiter.
    pub lines: Vec<String>,
    /// Offset just past the last delimiter of the scanned content. Bytes after
    /// it form an unterminated line that has not been emitted.
    pub end: u64,
    /// Size of the final read window in bytes.
    pub window: u64,
    /// Number of reads it took to find the lines.
    pub attempts: u32,
}

/// Find the last `count` complete lines among the first `file_length` bytes of
/// `reader` by reading backwards from the end in a widening window.
///
/// The window starts at `DEFAULT_BYTES_PER_LINE * count` bytes. When it holds
/// too few delimiters the bytes-per-line estimate is recomputed from what was
/// seen and the window grows; once it covers the whole file the file is read
/// from offset 0.
pub async fn last_lines<R>(
    reader: &mut R,
    file_length: u64,
    count: usize,
    delimiter: u8,
) -> Result<LastLines>
where
    R: AsyncRead + AsyncSeek + Unpin,
{
    let wanted = count as u64;
    let mut window = DEFAULT_BYTES_PER_LINE.saturating_mul(wanted.max(1));
    let mut attempts = 0;

    loop {
        attempts += 1;
        let start = file_length.saturating_sub(window);
        let block = read_block(reader, start, file_length - start).await?;
        let delimiters = count_delimiters(&block, delimiter);

        debug!(attempts, start, window, delimiters, "backward scan attempt");

        // The first segment of a window that does not start the file may be
        // cut, so it needs one delimiter more than the lines it yields.
        if start == 0 || delimiters > wanted {
            let (lines, settled) = take_last_lines(&block, start == 0, count, delimiter)?;
            return Ok(LastLines {
                lines,
                end: start + settled as u64,
                window,
                attempts,
            });
        }

        window = next_window(window, delimiters, wanted);
    }
}

/// Grow the scan window from the density of delimiters seen in the last one.
fn next_window(window: u64, delimiters: u64, wanted: u64) -> u64 {
    let bytes_per_line = if delimiters == 0 {
        window
    } else {
        window / delimiters
    };
    let next = bytes_per_line.saturating_mul(wanted + 1);
    if next > window {
        next
    } else {
        window.saturating_mul(2)
    }
}

async fn read_block<R>(reader: &mut R, start: u64, len: u64) -> Result<Vec<u8>>
where
    R: AsyncRead + AsyncSeek + Unpin,
{
    reader.seek(SeekFrom::Start(start)).await?;
    let mut block = Vec::with_capacity(len as usize);
    (&mut *reader).take(len).read_to_end(&mut block).await?;
    Ok(block)
}

fn count_delimiters(block: &[u8], delimiter: u8) -> u64 {
    block.iter().filter(|&&byte| byte == delimiter).count() as u64
}

/// Split the settled part of `block` into lines and keep the last `count`.
///
/// Returns the lines and the length of the settled part (up to and including
/// the last delimiter).
fn take_last_lines(
    block: &[u8],
    starts_file: bool,
    count: usize,
    delimiter: u8,
) -> Result<(Vec<String>, usize)> {
    let settled = match block.iter().rposition(|&byte| byte == delimiter) {
        Some(position) => position + 1,
        None => return Ok((Vec::new(), 0)),
    };

    let first = if starts_file {
        0
    } else {
        // Drop the possibly cut leading segment.
        block
            .iter()
            .position(|&byte| byte == delimiter)
            .map_or(settled, |position| position + 1)
    };

    let segments: Vec<&[u8]> = split_lines(&block[first..settled], delimiter).collect();
    let skip = segments.len().saturating_sub(count);
    let lines = segments[skip..]
        .iter()
        .map(|segment| String::from_utf8(segment.to_vec()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok((lines, settled))
}

/// Split content into delimiter-terminated segments, keeping the delimiter.
fn split_lines(content: &[u8], delimiter: u8) -> impl Iterator<Item = &[u8]> {
    content.split_inclusive(move |&byte| byte == delimiter)
}

/// Read the next complete line from `reader`.
///
/// Returns `None` when no new bytes are available or when only an
/// unterminated fragment has been written so far; the caller is expected to
/// rewind to where it started before retrying.
pub(crate) async fn read_complete_line<R>(
    reader: &mut R,
    delimiter: u8,
) -> Result<Option<(String, u64)>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let read = reader.read_until(delimiter, &mut buf).await?;
    if read == 0 || buf.last() != Some(&delimiter) {
        return Ok(None);
    }
    Ok(Some((String::from_utf8(buf)?, read as u64)))
}

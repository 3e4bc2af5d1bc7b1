//! Line sources feeding the stream driver

use crate::error::{VizError, VizResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

/// Lazy, possibly endless sequence of input lines.
///
/// `Ok(None)` signals end of input. An `Err` is a failure of the source
/// itself and ends the stream.
#[async_trait]
pub trait LineSource: Send {
    async fn next_line(&mut self) -> VizResult<Option<String>>;
}

/// Line source over any async buffered reader
pub struct ReaderLineSource<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R> ReaderLineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    /// Read lines from `reader`
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl ReaderLineSource<BufReader<Stdin>> {
    /// Line source over the process's standard input
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait]
impl<R> LineSource for ReaderLineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_line(&mut self) -> VizResult<Option<String>> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .await
            .map_err(VizError::input_from)?;
        if read == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        // Invalid UTF-8 is a malformed line, not a broken source
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

/// In-memory line source, optionally ending in a read failure
#[derive(Debug, Default)]
pub struct MemoryLineSource {
    lines: VecDeque<String>,
    failure: Option<String>,
}

impl MemoryLineSource {
    /// Source yielding `lines` then end of input
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            failure: None,
        }
    }

    /// Split a block of text on newlines
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    /// Fail with `message` once the queued lines are consumed
    pub fn fail_with(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

#[async_trait]
impl LineSource for MemoryLineSource {
    async fn next_line(&mut self) -> VizResult<Option<String>> {
        if let Some(line) = self.lines.pop_front() {
            return Ok(Some(line));
        }
        match self.failure.take() {
            Some(message) => Err(VizError::input(message)),
            None => Ok(None),
        }
    }
}

//! Incremental Server-Sent Events decoding.
//!
//! `SseDecoder` turns arbitrary byte chunks into complete events;
//! `sse_events` adapts a fallible byte stream into an event stream.

use std::collections::VecDeque;

mod stream;
pub use stream::sse_events;

/// A dispatched SSE event. Only events carrying at least one `data:` line are dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: Option<String>,
    /// `data:` lines joined with `\n`
    pub data: String,
    pub id: Option<String>,
    pub retry: Option<u64>,
}

impl SseEvent {
    /// True for the `[DONE]` sentinel used by OpenAI-style APIs.
    pub fn is_done(&self) -> bool {
        self.data.trim() == "[DONE]"
    }
}

#[derive(Default)]
struct Pending {
    event: Option<String>,
    data: Vec<String>,
    id: Option<String>,
    retry: Option<u64>,
}

impl Pending {
    fn take(&mut self) -> Option<SseEvent> {
        let pending = std::mem::take(self);
        if pending.data.is_empty() {
            return None;
        }
        Some(SseEvent {
            event: pending.event,
            data: pending.data.join("\n"),
            id: pending.id,
            retry: pending.retry,
        })
    }
}

/// Incremental decoder; chunk boundaries may fall anywhere, including inside
/// a `\r\n` pair or a multi-byte character.
#[derive(Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    pending: Pending,
    ready: VecDeque<SseEvent>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and drain every event it completed.
    pub fn push(&mut self, chunk: &[u8]) -> impl Iterator<Item = SseEvent> + '_ {
        self.buffer.extend_from_slice(chunk);
        while let Some((line_len, consumed)) = next_line(&self.buffer) {
            let line: Vec<u8> = self.buffer.drain(..consumed).take(line_len).collect();
            self.handle_line(&String::from_utf8_lossy(&line));
        }
        self.ready.drain(..)
    }

    /// Flush a trailing event when the peer closed without a blank line.
    pub fn finish(&mut self) -> impl Iterator<Item = SseEvent> + '_ {
        if !self.buffer.is_empty() {
            let mut rest = std::mem::take(&mut self.buffer);
            if rest.last() == Some(&b'\r') {
                rest.pop();
            }
            self.handle_line(&String::from_utf8_lossy(&rest));
        }
        if let Some(ev) = self.pending.take() {
            self.ready.push_back(ev);
        }
        self.ready.drain(..)
    }

    fn handle_line(&mut self, line: &str) {
        if line.is_empty() {
            if let Some(ev) = self.pending.take() {
                self.ready.push_back(ev);
            }
            return;
        }
        if line.starts_with(':') {
            return;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "data" => self.pending.data.push(value.to_string()),
            "event" => self.pending.event = Some(value.to_string()),
            "id" => self.pending.id = Some(value.to_string()),
            "retry" => self.pending.retry = value.trim().parse().ok(),
            _ => {}
        }
    }
}

/// Length of the first complete line and the bytes consumed including its
/// terminator. A trailing lone `\r` waits for the next chunk.
fn next_line(buf: &[u8]) -> Option<(usize, usize)> {
    let idx = buf.iter().position(|b| *b == b'\n' || *b == b'\r')?;
    if buf[idx] == b'\n' {
        return Some((idx, idx + 1));
    }
    match buf.get(idx + 1) {
        None => None,
        Some(b'\n') => Some((idx, idx + 2)),
        Some(_) => Some((idx, idx + 1)),
    }
}

#[cfg(test)]
#[path = "../tests/decoder_tests.rs"]
mod decoder_tests;
#[cfg(test)]
#[path = "../tests/stream_tests.rs"]
mod stream_tests;

//! In-memory log sink for TUI mode.
//!
//! tracing-subscriber writes here through `MakeWriter` instead of stderr, so
//! log output cannot tear the alternate screen.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

/// Lines held before the oldest is dropped.
const CAPACITY: usize = 256;

/// Shared, bounded queue of formatted log lines.
#[derive(Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::with_capacity(CAPACITY)
    }

    /// A buffer always keeps at least the newest line.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Append a line, evicting the oldest when full.
    ///
    /// A poisoned lock is recovered: a panic elsewhere must not silence logging.
    pub fn push(&self, line: String) {
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        while lines.len() >= self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Take every queued line, oldest first.
    pub fn take_all(&self) -> Vec<String> {
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.drain(..).collect()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-event writer: collects bytes and pushes whole lines.
pub struct LineWriter {
    sink: LogBuffer,
    partial: Vec<u8>,
}

impl LineWriter {
    fn push_complete_lines(&mut self) {
        while let Some(pos) = self.partial.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.partial.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..line.len() - 1]).into_owned();
            self.sink.push(text);
        }
    }
}

impl Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.partial.extend_from_slice(buf);
        self.push_complete_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.partial.is_empty() {
            let text = String::from_utf8_lossy(&self.partial).into_owned();
            self.sink.push(text);
            self.partial.clear();
        }
        Ok(())
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        let _ = Write::flush(self);
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter {
            sink: self.clone(),
            partial: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_take() {
        let buf = LogBuffer::new();
        buf.push("dialing".to_string());
        buf.push("dialed".to_string());

        assert_eq!(buf.take_all(), vec!["dialing", "dialed"]);
        assert!(buf.take_all().is_empty());
    }

    #[test]
    fn test_oldest_lines_evicted() {
        let buf = LogBuffer::with_capacity(3);
        for i in 0..5 {
            buf.push(format!("line {}", i));
        }
        assert_eq!(buf.take_all(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_zero_capacity_keeps_newest_line() {
        let buf = LogBuffer::with_capacity(0);
        buf.push("first".to_string());
        buf.push("second".to_string());
        assert_eq!(buf.take_all(), vec!["second"]);
    }

    #[test]
    fn test_writer_splits_lines() {
        let buf = LogBuffer::new();
        let mut writer = buf.make_writer();
        write!(writer, "GET /all_calls\nHTTP 200\n").unwrap();

        assert_eq!(buf.take_all(), vec!["GET /all_calls", "HTTP 200"]);
    }

    #[test]
    fn test_writer_flushes_partial_line_on_drop() {
        let buf = LogBuffer::new();
        {
            let mut writer = buf.make_writer();
            write!(writer, "no newline").unwrap();
            assert!(buf.take_all().is_empty());
        }
        assert_eq!(buf.take_all(), vec!["no newline"]);
    }
}

//! Progress output for test runs
//!
//! [`out`] writes a raw line to standard error. It is deliberately not routed
//! through `tracing`: the lines are meant to interleave with the output of the
//! test harness exactly as written.
//!
//! Code that needs to assert on the emitted lines takes an [`OutputSink`]
//! instead of calling [`out`] directly, and tests hand it a [`MemorySink`].

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Emit an informational message on test progress to standard error
///
/// The message is written followed by a newline. Write failures are returned
/// to the caller.
pub fn out(msg: &str) -> io::Result<()> {
    StderrSink.emit(msg)
}

/// A destination for progress lines
pub trait OutputSink: Send + Sync {
    /// Write one line (the sink appends the newline)
    fn emit(&self, msg: &str) -> io::Result<()>;
}

/// Writes lines to the process's standard error stream
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl OutputSink for StderrSink {
    fn emit(&self, msg: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}", msg)
    }
}

/// Writes lines to any `Write` implementation behind a mutex
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> OutputSink for WriterSink<W> {
    fn emit(&self, msg: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("output writer lock poisoned"))?;
        writeln!(writer, "{}", msg)
    }
}

/// Collects lines in memory
///
/// Clones share the same buffer, so a clone can be handed to the code under
/// test while the original is kept for assertions.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines written so far
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of lines written so far
    pub fn len(&self) -> usize {
        self.lines().len()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OutputSink for MemorySink {
    fn emit(&self, msg: &str) -> io::Result<()> {
        self.lines
            .lock()
            .map_err(|_| io::Error::other("memory sink lock poisoned"))?
            .push(msg.to_string());
        Ok(())
    }
}

impl<T: OutputSink + ?Sized> OutputSink for Arc<T> {
    fn emit(&self, msg: &str) -> io::Result<()> {
        (**self).emit(msg)
    }
}

impl<T: OutputSink + ?Sized> OutputSink for Box<T> {
    fn emit(&self, msg: &str) -> io::Result<()> {
        (**self).emit(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_out_writes_to_stderr() {
        assert!(out("progress: deploying hello-world").is_ok());
    }

    #[test]
    fn test_writer_sink_appends_newline() {
        let sink = WriterSink::new(Vec::new());
        sink.emit("first").unwrap();
        sink.emit("second").unwrap();

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "first\nsecond\n");
    }

    #[test]
    fn test_writer_sink_propagates_write_errors() {
        let sink = WriterSink::new(BrokenWriter);
        let err = sink.emit("lost").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_memory_sink_clones_share_buffer() {
        let sink = MemorySink::new();
        let handle = sink.clone();

        handle.emit("one").unwrap();
        handle.emit("two").unwrap();

        assert_eq!(sink.lines(), vec!["one".to_string(), "two".to_string()]);
        assert_eq!(sink.len(), 2);
        assert!(!sink.is_empty());
    }

    #[test]
    fn test_boxed_sink() {
        let memory = MemorySink::new();
        let boxed: Box<dyn OutputSink> = Box::new(memory.clone());
        boxed.emit("via box").unwrap();
        assert_eq!(memory.lines(), vec!["via box".to_string()]);
    }
}

//! ui::sink
//!
//! Reassignable output destinations.
//!
//! # Design
//!
//! A [`Sink`] is a cheap, clonable handle to a shared writer. Parents hand
//! clones of their sinks to every child, so one reassignment on the root
//! redirects the whole tree. Handles are `Rc`-based: a command tree is used
//! from a single thread.
//!
//! Write failures are logged and otherwise ignored; a broken stdout must not
//! change a command's exit code.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use tracing::warn;

/// A shared handle to a text destination.
#[derive(Clone)]
pub struct Sink {
    label: &'static str,
    writer: Rc<RefCell<dyn Write>>,
}

impl Sink {
    /// Wrap any writer.
    pub fn new<W: Write + 'static>(writer: W) -> Self {
        Self::labelled("custom", writer)
    }

    fn labelled<W: Write + 'static>(label: &'static str, writer: W) -> Self {
        Self {
            label,
            writer: Rc::new(RefCell::new(writer)),
        }
    }

    /// The process's standard output.
    pub fn stdout() -> Self {
        Self::labelled("stdout", io::stdout())
    }

    /// The process's standard error.
    pub fn stderr() -> Self {
        Self::labelled("stderr", io::stderr())
    }

    /// A sink that drops everything.
    pub fn discard() -> Self {
        Self::labelled("discard", io::sink())
    }

    /// Write `text` verbatim and flush.
    pub fn write_str(&self, text: &str) {
        let mut writer = self.writer.borrow_mut();
        let result = writer
            .write_all(text.as_bytes())
            .and_then(|_| writer.flush());
        if let Err(err) = result {
            warn!(sink = self.label, error = %err, "failed to write to sink");
        }
    }

    /// Whether two handles share the same writer.
    pub fn same_as(&self, other: &Sink) -> bool {
        Rc::ptr_eq(&self.writer, &other.writer)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("label", &self.label).finish()
    }
}

/// An in-memory capture buffer whose clones share one destination.
///
/// Used to capture command output in tests and embedding code. Every call to
/// [`SharedBuffer::sink`] hands out the same sink, so `same_as` holds between
/// them.
#[derive(Debug, Clone)]
pub struct SharedBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
    sink: Sink,
}

impl Default for SharedBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedBuffer {
    pub fn new() -> Self {
        let bytes = Rc::new(RefCell::new(Vec::new()));
        let sink = Sink::labelled("buffer", BufferWriter(Rc::clone(&bytes)));
        Self { bytes, sink }
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.bytes.borrow_mut().clear();
    }

    /// The sink writing into this buffer.
    pub fn sink(&self) -> Sink {
        self.sink.clone()
    }
}

struct BufferWriter(Rc<RefCell<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_buffer() {
        let buf = SharedBuffer::new();
        let sink = buf.sink();
        let other = sink.clone();

        sink.write_str("hello ");
        other.write_str("world");

        assert_eq!(buf.contents(), "hello world");
        assert!(sink.same_as(&other));
    }

    #[test]
    fn every_sink_of_a_buffer_is_the_same_destination() {
        let buf = SharedBuffer::new();
        assert!(buf.sink().same_as(&buf.sink()));
        assert!(buf.clone().sink().same_as(&buf.sink()));
    }

    #[test]
    fn distinct_sinks_are_not_the_same() {
        let a = SharedBuffer::new().sink();
        let b = SharedBuffer::new().sink();
        assert!(!a.same_as(&b));
    }

    #[test]
    fn clear_empties_the_buffer() {
        let buf = SharedBuffer::new();
        buf.sink().write_str("x");
        assert!(!buf.is_empty());
        buf.clear();
        assert!(buf.is_empty());
    }

    #[test]
    fn discard_accepts_writes() {
        Sink::discard().write_str("ignored");
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_do_not_panic() {
        let sink = Sink::new(Broken);
        sink.write_str("lost");
        assert!(format!("{:?}", sink).contains("custom"));
    }
}

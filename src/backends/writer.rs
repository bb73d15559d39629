//! Output sinks shared by the writing backends

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Byte sink shared between a logger and everything derived from it
pub type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

pub fn shared_writer<W: Write + Send + 'static>(writer: W) -> SharedWriter {
    Arc::new(Mutex::new(Box::new(writer)))
}

pub fn stdout_writer() -> SharedWriter {
    shared_writer(io::stdout())
}

/// In-memory sink; clones share the same buffer
///
/// # Example
///
/// ```
/// use service_kit::backends::BufferWriter;
/// use std::io::Write;
///
/// let buffer = BufferWriter::new();
/// let mut handle = buffer.clone();
/// writeln!(handle, "hello").unwrap();
/// assert_eq!(buffer.lines(), vec!["hello".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl BufferWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

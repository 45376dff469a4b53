//! Output sink for the `print` builtin.
//!
//! Scripts print through the interpreter's handler rather than straight to
//! stdout, so embedders and tests can capture or discard output.

use std::io::Write as _;
use std::sync::Arc;

use parking_lot::Mutex;

/// Collects printed text in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler::default()
    }

    pub fn write_line(&self, line: &str) {
        let mut buffer = self.buffer.lock();
        buffer.push_str(line);
        buffer.push('\n');
    }

    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

/// Where `print` output goes. Enum dispatch; the set of sinks is closed.
pub enum PrintHandlerImpl {
    /// Writes to the process's stdout (default).
    Stdout,
    /// Captures into a buffer.
    Buffer(BufferPrintHandler),
    /// Drops everything.
    Silent,
}

impl PrintHandlerImpl {
    /// Write `line` followed by a newline.
    pub fn write_line(&self, line: &str) {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                // A closed stdout is not an evaluation error.
                if writeln!(out, "{line}").is_err() {
                    tracing::debug!("stdout closed; dropping printed line");
                }
            }
            Self::Buffer(buffer) => buffer.write_line(line),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for sinks that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.output(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(buffer) = self {
            buffer.clear();
        }
    }
}

/// Print handler shared between the interpreter and its embedder.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

/// A handler that captures output; read it back with `output()`.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

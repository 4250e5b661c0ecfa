//! Terminal I/O abstraction layer.
//!
//! Handles TTY detection, color support, and output capture for testing.
//! Commands write through [`IOStreams`] so tests can assert on exactly what
//! a user would have seen on stdout and stderr.

use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};

use console::{StyledObject, Term};

/// Default terminal width when detection fails.
pub const DEFAULT_WIDTH: usize = 80;

/// Writer wrapper that supports both real I/O and buffered capture.
struct OutputWriter(Box<dyn Write + Send>);

impl std::fmt::Debug for OutputWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OutputWriter")
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

/// Writer that shares a buffer with test code via `Arc<Mutex<Vec<u8>>>`.
struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Captured test output that can be inspected after command execution.
#[derive(Debug, Clone)]
pub struct TestOutput {
    out_buf: Arc<Mutex<Vec<u8>>>,
    err_buf: Arc<Mutex<Vec<u8>>>,
}

impl TestOutput {
    /// Get the captured stdout content as a string.
    pub fn stdout(&self) -> String {
        read_buffer(&self.out_buf)
    }

    /// Get the captured stderr content as a string.
    pub fn stderr(&self) -> String {
        read_buffer(&self.err_buf)
    }
}

fn read_buffer(buf: &Arc<Mutex<Vec<u8>>>) -> String {
    let buf = buf
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    String::from_utf8_lossy(&buf).to_string()
}

/// I/O streams for terminal interaction.
///
/// Commands should use the `ios_println!` / `ios_eprintln!` macros instead
/// of `println!()` / `eprintln!()` so output can be captured in tests.
pub struct IOStreams {
    stdout_is_tty: bool,
    stderr_is_tty: bool,
    color_forced: Option<bool>,
    out: Arc<Mutex<OutputWriter>>,
    err: Arc<Mutex<OutputWriter>>,
}

impl std::fmt::Debug for IOStreams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IOStreams")
            .field("stdout_is_tty", &self.stdout_is_tty)
            .field("stderr_is_tty", &self.stderr_is_tty)
            .field("color_forced", &self.color_forced)
            .finish_non_exhaustive()
    }
}

impl IOStreams {
    /// Create `IOStreams` for the real terminal.
    pub fn system() -> Self {
        Self {
            stdout_is_tty: io::stdout().is_terminal(),
            stderr_is_tty: io::stderr().is_terminal(),
            color_forced: std::env::var("NO_COLOR").ok().map(|_| false),
            out: Arc::new(Mutex::new(OutputWriter(Box::new(io::stdout())))),
            err: Arc::new(Mutex::new(OutputWriter(Box::new(io::stderr())))),
        }
    }

    /// Create `IOStreams` for testing with output captured to buffers.
    ///
    /// Returns the IOStreams and a `TestOutput` handle for reading captured
    /// stdout/stderr after command execution.
    ///
    /// # Example
    ///
    /// ```
    /// use ghp_core::IOStreams;
    ///
    /// let (ios, output) = IOStreams::test_with_output();
    /// ios.println_out("hello");
    /// assert_eq!(output.stdout(), "hello\n");
    /// ```
    pub fn test_with_output() -> (Self, TestOutput) {
        let out_buf = Arc::new(Mutex::new(Vec::<u8>::new()));
        let err_buf = Arc::new(Mutex::new(Vec::<u8>::new()));

        let ios = Self {
            stdout_is_tty: false,
            stderr_is_tty: false,
            color_forced: Some(false),
            out: Arc::new(Mutex::new(OutputWriter(Box::new(SharedWriter(
                out_buf.clone(),
            ))))),
            err: Arc::new(Mutex::new(OutputWriter(Box::new(SharedWriter(
                err_buf.clone(),
            ))))),
        };

        (ios, TestOutput { out_buf, err_buf })
    }

    /// Set the stdout TTY state (for test configuration).
    pub fn set_stdout_tty(&mut self, is_tty: bool) {
        self.stdout_is_tty = is_tty;
    }

    /// Set the stderr TTY state (for test configuration).
    pub fn set_stderr_tty(&mut self, is_tty: bool) {
        self.stderr_is_tty = is_tty;
    }

    // --- Output methods ---

    /// Write a string to stdout followed by a newline.
    pub fn println_out(&self, s: &str) {
        self.writeln_out(format_args!("{s}"));
    }

    /// Write a string to stderr followed by a newline.
    pub fn println_err(&self, s: &str) {
        self.writeln_err(format_args!("{s}"));
    }

    /// Write formatted output to stdout. Accepts format arguments.
    pub fn write_out(&self, args: std::fmt::Arguments<'_>) {
        write_to(&self.out, args, false);
    }

    /// Write formatted output to stdout with trailing newline.
    pub fn writeln_out(&self, args: std::fmt::Arguments<'_>) {
        write_to(&self.out, args, true);
    }

    /// Write formatted output to stderr with trailing newline.
    pub fn writeln_err(&self, args: std::fmt::Arguments<'_>) {
        write_to(&self.err, args, true);
    }

    // --- Query methods ---

    /// Whether stdout is connected to a terminal.
    pub fn is_stdout_tty(&self) -> bool {
        self.stdout_is_tty
    }

    /// Whether stderr is connected to a terminal.
    pub fn is_stderr_tty(&self) -> bool {
        self.stderr_is_tty
    }

    /// Whether color output is enabled.
    pub fn color_enabled(&self) -> bool {
        if let Some(forced) = self.color_forced {
            return forced;
        }
        self.stdout_is_tty
    }

    /// Get the terminal width, or the default if not a TTY.
    pub fn terminal_width(&self) -> usize {
        if self.stdout_is_tty {
            Term::stdout().size().1 as usize
        } else {
            DEFAULT_WIDTH
        }
    }

    /// Create a `ColorScheme` based on the current color settings.
    pub fn color_scheme(&self) -> ColorScheme {
        ColorScheme {
            enabled: self.color_enabled(),
        }
    }
}

fn write_to(writer: &Arc<Mutex<OutputWriter>>, args: std::fmt::Arguments<'_>, newline: bool) {
    let mut w = writer
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let _ = w.write_fmt(args);
    if newline {
        let _ = w.write_all(b"\n");
    }
}

/// Terminal color scheme for themed output.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    fn paint(&self, text: &str, style: fn(StyledObject<String>) -> StyledObject<String>) -> String {
        if self.enabled {
            style(console::style(text.to_string())).to_string()
        } else {
            text.to_string()
        }
    }

    /// Apply bold styling.
    pub fn bold(&self, text: &str) -> String {
        self.paint(text, StyledObject::bold)
    }
}

/// Write to IOStreams stdout, similar to `print!()`.
#[macro_export]
macro_rules! ios_print {
    ($ios:expr, $($arg:tt)*) => {
        $ios.write_out(format_args!($($arg)*))
    };
}

/// Write to IOStreams stdout with newline, similar to `println!()`.
#[macro_export]
macro_rules! ios_println {
    ($ios:expr) => {
        $ios.println_out("")
    };
    ($ios:expr, $($arg:tt)*) => {
        $ios.writeln_out(format_args!($($arg)*))
    };
}

/// Write to IOStreams stderr with newline, similar to `eprintln!()`.
#[macro_export]
macro_rules! ios_eprintln {
    ($ios:expr) => {
        $ios.println_err("")
    };
    ($ios:expr, $($arg:tt)*) => {
        $ios.writeln_err(format_args!($($arg)*))
    };
}

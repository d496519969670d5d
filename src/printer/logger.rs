// src/printer/logger.rs

//! Leveled, colored console messages for the user of the _llx_ program.
//!
//! The readers report progress and recoverable anomalies (a requested date
//! missing from the file, an unparseable line at a file edge) through a
//! [`Logger`]. Messages never affect control flow.
//!
//! Messages are written to stderr.

use crate::debug::printers::de_err;

use std::fmt;
use std::io::{Result, Write};

#[doc(hidden)]
pub use ::termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Verbosity count needed to print [`LogLevel::Verbose`] messages.
pub const VERBOSITY_VERBOSE: u8 = 1;
/// Verbosity count needed to print [`LogLevel::Debug`] messages.
pub const VERBOSITY_DEBUG: u8 = 2;

/// Level of a [`Logger`] message.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum LogLevel {
    Debug,
    Verbose,
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Minimum verbosity count at which this level is printed.
    pub const fn threshold(&self) -> u8 {
        match self {
            LogLevel::Debug => VERBOSITY_DEBUG,
            LogLevel::Verbose => VERBOSITY_VERBOSE,
            _ => 0,
        }
    }

    /// Bracketed prefix printed before the message.
    pub const fn tag(&self) -> &'static str {
        match self {
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Verbose => "[VERBOSE]",
            LogLevel::Info => "[*]",
            LogLevel::Success => "[+]",
            LogLevel::Warning => "[-]",
            LogLevel::Error => "[!]",
        }
    }

    /// [`ColorSpec`] of the tag.
    ///
    /// [`ColorSpec`]: https://docs.rs/termcolor/1.4.1/termcolor/struct.ColorSpec.html
    pub fn color_spec(&self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            LogLevel::Debug => spec.set_fg(Some(Color::Yellow)),
            LogLevel::Verbose => spec.set_fg(Some(Color::Blue)),
            LogLevel::Info => spec.set_fg(Some(Color::Blue)).set_bold(true),
            LogLevel::Success => spec.set_fg(Some(Color::Green)).set_bold(true),
            // orange
            LogLevel::Warning => spec.set_fg(Some(Color::Rgb(255, 135, 0))).set_bold(true),
            LogLevel::Error => spec.set_fg(Some(Color::Red)).set_bold(true),
        };

        spec
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A leveled console logger.
///
/// Cheap to clone; each reader keeps its own copy.
#[derive(Clone, Copy, Debug)]
pub struct Logger {
    color_choice: ColorChoice,
    /// `-v` count
    verbosity: u8,
    /// print nothing at all
    quiet: bool,
    /// print messages without tags or colors
    raw: bool,
}

impl Logger {
    pub fn new(color_choice: ColorChoice, verbosity: u8, quiet: bool, raw: bool) -> Logger {
        Logger {
            color_choice,
            verbosity,
            quiet,
            raw,
        }
    }

    /// A `Logger` that prints nothing.
    pub fn silent() -> Logger {
        Logger::new(ColorChoice::Never, 0, true, false)
    }

    /// Would a message at `level` be printed?
    pub const fn enabled(&self, level: LogLevel) -> bool {
        !self.quiet && self.verbosity >= level.threshold()
    }

    pub const fn is_raw(&self) -> bool {
        self.raw
    }

    /// Uncolored text of one message as it would be printed, without the
    /// trailing newline.
    pub fn format_message(&self, level: LogLevel, message: &str) -> String {
        if self.raw {
            return String::from(message);
        }

        format!("{} {}", level.tag(), message)
    }

    /// Print `message` at `level`.
    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let mut stderr = StandardStream::stderr(self.color_choice);
        let _stdout_lock = std::io::stdout().lock();
        if let Err(_err) = self.write_message(&mut stderr, level, message) {
            // XXX: a closed stderr leaves nowhere else to report this
            de_err!("Logger::log write failed {}", _err);
        }
    }

    fn write_message(
        &self,
        out: &mut StandardStream,
        level: LogLevel,
        message: &str,
    ) -> Result<()> {
        if !self.raw {
            print_colored(&level.color_spec(), level.tag().as_bytes(), out)?;
            out.write_all(b" ")?;
        }
        out.write_all(message.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message)
    }

    pub fn verbose(&self, message: &str) {
        self.log(LogLevel::Verbose, message)
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message)
    }

    pub fn success(&self, message: &str) {
        self.log(LogLevel::Success, message)
    }

    pub fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message)
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message)
    }
}

/// Print colored output to terminal if possible using passed stream,
/// otherwise, print plain output.
///
/// See an example <https://docs.rs/termcolor/1.1.2/termcolor/#detecting-presence-of-a-terminal>.
pub fn print_colored(
    spec: &ColorSpec,
    value: &[u8],
    out: &mut StandardStream,
) -> Result<()> {
    match out.set_color(spec) {
        Ok(_) => {}
        Err(err) => {
            de_err!("print_colored: out.set_color({:?}) returned error {}", spec, err);
            return Err(err);
        }
    };
    match out.write_all(value) {
        Ok(_) => {}
        Err(err) => {
            de_err!("print_colored: out.write_all(…) returned error {}", err);
            return Err(err);
        }
    }
    match out.reset() {
        Ok(_) => {}
        Err(err) => {
            de_err!("print_colored: out.reset() returned error {}", err);
            return Err(err);
        }
    }

    Ok(())
}

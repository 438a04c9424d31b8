//! Leveled logging shared by the transforms.
//!
//! Each transform instance carries its own [`Logger`] (a level, a component
//! name, and a sink). Emission appends a timestamped, name-tagged line to the
//! sink and echoes through the [`log`] facade so host processes that install
//! a `log` backend see the same output on the console.
//!
//! The sink is injected at construction time rather than hardcoded to a
//! module-global path, so tests (and embedders) can substitute an in-memory
//! sink. The default [`FileSink`] appends to `remark-plugins.log` in the
//! process working directory; it opens the file per write in append mode, so
//! concurrent document workers never race on a read-modify-write cycle.

use std::{
  fs::OpenOptions,
  io::{self, Write as _},
  path::PathBuf,
  sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};

/// Default log file name, relative to the process working directory.
pub const DEFAULT_LOG_FILE: &str = "remark-plugins.log";

/// Verbosity level for a [`Logger`].
///
/// `Silent` suppresses everything; `Info` emits info lines only; `Debug`
/// emits both.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  #[default]
  Silent,
  Info,
  Debug,
}

/// Resolve an optional configured level against the legacy `debug` toggle.
///
/// An explicit level always wins; otherwise `debug: true` maps to
/// [`LogLevel::Debug`] and the default is [`LogLevel::Silent`].
#[must_use]
pub fn resolve_log_level(level: Option<LogLevel>, debug: bool) -> LogLevel {
  level.unwrap_or(if debug {
    LogLevel::Debug
  } else {
    LogLevel::Silent
  })
}

/// Append-only destination for log lines.
pub trait LogSink: Send + Sync {
  /// Append one line (no trailing newline included by the caller).
  ///
  /// # Errors
  ///
  /// Returns an error if the line cannot be written.
  fn append(&self, line: &str) -> io::Result<()>;
}

/// Sink that appends to a file, creating it if absent.
#[derive(Debug, Clone)]
pub struct FileSink {
  path: PathBuf,
}

impl FileSink {
  /// Create a sink writing to the given path.
  #[must_use]
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Path this sink appends to.
  #[must_use]
  pub fn path(&self) -> &std::path::Path {
    &self.path
  }
}

impl Default for FileSink {
  fn default() -> Self {
    Self::new(DEFAULT_LOG_FILE)
  }
}

impl LogSink for FileSink {
  fn append(&self, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.path)?;
    writeln!(file, "{line}")
  }
}

/// In-memory sink for tests and embedders.
#[derive(Debug, Default)]
pub struct MemorySink {
  lines: Mutex<Vec<String>>,
}

impl MemorySink {
  /// Create an empty sink.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of all lines appended so far.
  ///
  /// Lines logged after a poisoning panic are unrecoverable; an empty list
  /// is returned in that case.
  #[must_use]
  pub fn lines(&self) -> Vec<String> {
    self
      .lines
      .lock()
      .map(|lines| lines.clone())
      .unwrap_or_default()
  }
}

impl LogSink for MemorySink {
  fn append(&self, line: &str) -> io::Result<()> {
    self
      .lines
      .lock()
      .map_err(|_| io::Error::other("log sink mutex poisoned"))?
      .push(line.to_string());
    Ok(())
  }
}

/// Leveled, named logger over an injected sink.
///
/// Cheap to clone; the sink is shared behind an `Arc`.
#[derive(Clone)]
pub struct Logger {
  level: LogLevel,
  name:  String,
  sink:  Arc<dyn LogSink>,
}

impl Logger {
  /// Create a logger with the given level, component name and sink.
  #[must_use]
  pub fn new(
    level: LogLevel,
    name: impl Into<String>,
    sink: Arc<dyn LogSink>,
  ) -> Self {
    Self {
      level,
      name: name.into(),
      sink,
    }
  }

  /// Create a logger appending to the default log file.
  #[must_use]
  pub fn to_default_file(level: LogLevel, name: impl Into<String>) -> Self {
    Self::new(level, name, Arc::new(FileSink::default()))
  }

  /// Configured level.
  #[must_use]
  pub const fn level(&self) -> LogLevel {
    self.level
  }

  /// Emit a line at [`LogLevel::Info`].
  ///
  /// # Errors
  ///
  /// Returns an error if the sink write fails.
  pub fn info(&self, msg: &str) -> io::Result<()> {
    self.emit(LogLevel::Info, msg)
  }

  /// Emit a line at [`LogLevel::Debug`].
  ///
  /// # Errors
  ///
  /// Returns an error if the sink write fails.
  pub fn debug(&self, msg: &str) -> io::Result<()> {
    self.emit(LogLevel::Debug, msg)
  }

  fn emit(&self, severity: LogLevel, msg: &str) -> io::Result<()> {
    if severity == LogLevel::Silent || self.level < severity {
      return Ok(());
    }

    match severity {
      LogLevel::Info => log::info!("[{}] {msg}", self.name),
      LogLevel::Debug => log::debug!("[{}] {msg}", self.name),
      LogLevel::Silent => {},
    }

    let line = format!("[{}] [{}] {msg}", jiff::Timestamp::now(), self.name);
    self.sink.append(&line)
  }
}

impl std::fmt::Debug for Logger {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Logger")
      .field("level", &self.level)
      .field("name", &self.name)
      .finish_non_exhaustive()
  }
}

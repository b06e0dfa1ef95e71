//! Diagnostics sink.
//!
//! Backends report every failure, and the one successful context creation, as a human-readable
//! message. The structured [`ContextError`] is returned to the caller at the same time; the sink
//! is only about the text.
//!
//! Two sinks are provided:
//!
//! - [`LogDiagnostics`], forwarding to the [log] facade. That’s the default one.
//! - [`MemoryDiagnostics`], keeping the messages around so that you can display them in an
//!   in-app console or inspect them in tests.
//!
//! [`ContextError`]: crate::ContextError
//! [log]: https://crates.io/crates/log

use log::Level;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Two-level message sink (plus a debug level that defaults to nothing).
pub trait Diagnostics {
  /// Report an informative message.
  fn info(&self, message: &str);

  /// Report an error.
  fn error(&self, message: &str);

  /// Report a low-level detail, such as a teardown call the driver rejected.
  ///
  /// Backends never emit it on the path of an operation they report through `info` or `error`:
  /// such an operation leaves exactly one record.
  ///
  /// # Defaults
  ///
  /// Ignored.
  fn debug(&self, _message: &str) {}
}

impl<D> Diagnostics for &D
where
  D: Diagnostics + ?Sized,
{
  fn info(&self, message: &str) {
    (**self).info(message)
  }

  fn error(&self, message: &str) {
    (**self).error(message)
  }

  fn debug(&self, message: &str) {
    (**self).debug(message)
  }
}

/// Sink forwarding to the [log](https://crates.io/crates/log) facade.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LogDiagnostics {
  target: &'static str,
}

impl LogDiagnostics {
  /// Create a sink logging under the given target.
  #[inline]
  pub const fn new(target: &'static str) -> Self {
    LogDiagnostics { target }
  }

  /// Target messages are logged under.
  #[inline]
  pub fn target(&self) -> &'static str {
    self.target
  }
}

impl Default for LogDiagnostics {
  /// Logs under `"glbridge"`.
  fn default() -> Self {
    LogDiagnostics::new("glbridge")
  }
}

impl Diagnostics for LogDiagnostics {
  fn info(&self, message: &str) {
    log::info!(target: self.target, "{}", message);
  }

  fn error(&self, message: &str) {
    log::error!(target: self.target, "{}", message);
  }

  fn debug(&self, message: &str) {
    log::debug!(target: self.target, "{}", message);
  }
}

/// A recorded message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
  /// Level of the message.
  pub level: Level,
  /// The message.
  pub message: String,
}

impl fmt::Display for Record {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    write!(f, "[{}] {}", self.level, self.message)
  }
}

/// Sink keeping every message in memory.
///
/// Clones share the same storage, so you can hand a clone to a backend and keep one to read the
/// messages back.
#[derive(Clone, Debug, Default)]
pub struct MemoryDiagnostics {
  records: Arc<Mutex<Vec<Record>>>,
}

impl MemoryDiagnostics {
  /// Create an empty sink.
  pub fn new() -> Self {
    Self::default()
  }

  fn push(&self, level: Level, message: &str) {
    let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
    records.push(Record {
      level,
      message: message.to_owned(),
    });
  }

  /// All the records so far, oldest first.
  pub fn records(&self) -> Vec<Record> {
    self
      .records
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }

  /// Messages recorded at the given level, oldest first.
  pub fn messages(&self, level: Level) -> Vec<String> {
    self
      .records
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .iter()
      .filter(|record| record.level == level)
      .map(|record| record.message.clone())
      .collect()
  }

  /// Number of messages recorded at the given level.
  pub fn count(&self, level: Level) -> usize {
    self
      .records
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .iter()
      .filter(|record| record.level == level)
      .count()
  }

  /// Forget every record.
  pub fn clear(&self) {
    self
      .records
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clear();
  }
}

impl Diagnostics for MemoryDiagnostics {
  fn info(&self, message: &str) {
    self.push(Level::Info, message);
  }

  fn error(&self, message: &str) {
    self.push(Level::Error, message);
  }

  fn debug(&self, message: &str) {
    self.push(Level::Debug, message);
  }
}

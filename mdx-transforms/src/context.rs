//! Per-document file context handed to every transform.

use std::path::{Path, PathBuf};

/// Identity of the document being transformed.
///
/// Mirrors the virtual-file object of the host pipeline: a current path, a
/// history of prior paths (content that was copied or aliased keeps its
/// provenance there), and the working directory of the build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContext {
  /// Current path of the document, if known.
  pub path: Option<PathBuf>,

  /// Prior paths, oldest first.
  pub history: Vec<PathBuf>,

  /// Working directory of the build process.
  pub cwd: Option<PathBuf>,
}

impl FileContext {
  /// Context for a document at the given path.
  #[must_use]
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: Some(path.into()),
      ..Self::default()
    }
  }

  /// Set the working directory.
  #[must_use]
  pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
    self.cwd = Some(cwd.into());
    self
  }

  /// Human-readable path for log lines: the current path, else the most
  /// recent history entry, else `"unknown"`.
  #[must_use]
  pub fn display_path(&self) -> String {
    self
      .path
      .as_deref()
      .or_else(|| self.history.last().map(PathBuf::as_path))
      .map_or_else(|| "unknown".to_string(), path_to_string)
  }
}

fn path_to_string(path: &Path) -> String {
  path.display().to_string()
}

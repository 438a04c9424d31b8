use std::io;

use thiserror::Error;

/// Error type for transform execution.
///
/// Transforms have one designed hard-failure path: a log sink that cannot be
/// written. Content-level problems (unparseable YAML, unexpected node
/// shapes, absent configuration) are contained where they occur and never
/// surface here.
#[derive(Debug, Error)]
pub enum TransformError {
  #[error("log write failed: {0}")]
  Log(#[from] io::Error),
}

/// Result type for transform execution.
pub type TransformResult<T> = Result<T, TransformError>;

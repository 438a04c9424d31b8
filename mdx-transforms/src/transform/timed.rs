//! Timing decorator for transforms.

use std::time::Instant;

use super::Transform;
use crate::{
  ast::Node,
  context::FileContext,
  error::TransformResult,
  logging::Logger,
};

/// Wraps any transform with wall-clock timing.
///
/// The wrapped transform's contract is untouched: the same tree mutations
/// happen and the same result is returned; the only addition is a
/// `"<name> finished in <ms>ms"` line after a successful run.
pub struct Timed<T> {
  name:   String,
  inner:  T,
  logger: Logger,
}

impl<T> Timed<T> {
  /// Wrap `inner`, reporting under `name` through `logger`.
  #[must_use]
  pub fn new(name: impl Into<String>, inner: T, logger: Logger) -> Self {
    Self {
      name: name.into(),
      inner,
      logger,
    }
  }

  /// Unwrap the decorated transform.
  pub fn into_inner(self) -> T {
    self.inner
  }
}

impl<T: Transform> Transform for Timed<T> {
  fn name(&self) -> &str {
    &self.name
  }

  fn apply(&self, tree: &mut Node, file: &FileContext) -> TransformResult<()> {
    let started = Instant::now();
    self.inner.apply(tree, file)?;
    let elapsed_ms = started.elapsed().as_millis();
    self
      .logger
      .info(&format!("{} finished in {elapsed_ms}ms", self.name))?;
    Ok(())
  }
}
